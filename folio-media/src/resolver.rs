//! Display media resolution.
//!
//! Preference order is animated, then image, then the placeholder. Each
//! declared reference is probed before it is used; when probes cannot be
//! answered the record's own references are trusted (offline mode) and the
//! result says so.

use folio_core::ProjectRecord;
use serde::Serialize;

use crate::probe::{probe, ProbeOutcome};
use crate::{MediaExistence, MediaKind, MediaReference, MediaSettings};

/// How a display URL was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    Verified,
    Unverified,
    Placeholder,
}

/// The one URL to show for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMedia {
    /// Existence confirmed; URL resolved against the media origin.
    Verified { url: String, kind: MediaKind },
    /// Checks could not be answered; URL is taken from the record unverified.
    Unverified { url: String, kind: MediaKind },
    Placeholder { url: String },
}

/// Serializable `{url, kind, mode}` view.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayMediaView<'a> {
    pub url: &'a str,
    pub kind: MediaKind,
    pub mode: ResolutionMode,
}

impl DisplayMedia {
    pub fn url(&self) -> &str {
        match self {
            DisplayMedia::Verified { url, .. }
            | DisplayMedia::Unverified { url, .. }
            | DisplayMedia::Placeholder { url } => url,
        }
    }

    /// Placeholders count as images.
    pub fn kind(&self) -> MediaKind {
        match self {
            DisplayMedia::Verified { kind, .. } | DisplayMedia::Unverified { kind, .. } => *kind,
            DisplayMedia::Placeholder { .. } => MediaKind::Image,
        }
    }

    pub fn mode(&self) -> ResolutionMode {
        match self {
            DisplayMedia::Verified { .. } => ResolutionMode::Verified,
            DisplayMedia::Unverified { .. } => ResolutionMode::Unverified,
            DisplayMedia::Placeholder { .. } => ResolutionMode::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DisplayMedia::Placeholder { .. })
    }

    pub fn view(&self) -> DisplayMediaView<'_> {
        DisplayMediaView {
            url: self.url(),
            kind: self.kind(),
            mode: self.mode(),
        }
    }
}

/// Declared references in preference order.
fn declared(project: &ProjectRecord) -> Vec<(MediaKind, MediaReference<'_>)> {
    let animated = project
        .animated_ref()
        .and_then(MediaReference::parse)
        .map(|r| (MediaKind::Animated, r));
    let image = project
        .image_ref()
        .and_then(MediaReference::parse)
        .map(|r| (MediaKind::Image, r));

    animated.into_iter().chain(image).collect()
}

fn reference_for(project: &ProjectRecord, kind: MediaKind) -> Option<MediaReference<'_>> {
    let raw = match kind {
        MediaKind::Animated => project.animated_ref(),
        MediaKind::Image => project.image_ref(),
    };
    raw.and_then(MediaReference::parse)
}

/// Toggle between animated and image when the other reference exists.
///
/// Pure; applying it twice returns the starting kind whenever both
/// references are declared.
pub fn cycle_media_type(project: &ProjectRecord, current: MediaKind) -> MediaKind {
    let target = match current {
        MediaKind::Animated => MediaKind::Image,
        MediaKind::Image => MediaKind::Animated,
    };

    if reference_for(project, target).is_some() {
        target
    } else {
        current
    }
}

#[derive(Debug, Clone)]
pub struct MediaResolver {
    settings: MediaSettings,
}

impl MediaResolver {
    pub fn new(settings: MediaSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MediaSettings {
        &self.settings
    }

    pub fn placeholder(&self) -> DisplayMedia {
        DisplayMedia::Placeholder {
            url: self.settings.placeholder_url.clone(),
        }
    }

    /// Pick the display URL for `project`.
    pub async fn resolve_display_media(
        &self,
        project: &ProjectRecord,
        check: &dyn MediaExistence,
    ) -> DisplayMedia {
        let candidates = declared(project);
        self.resolve_candidates(project.id, &candidates, check).await
    }

    /// Resolve only the reference of `kind`, e.g. after a toggle.
    pub async fn resolve_kind(
        &self,
        project: &ProjectRecord,
        kind: MediaKind,
        check: &dyn MediaExistence,
    ) -> DisplayMedia {
        let candidates: Vec<_> = reference_for(project, kind)
            .map(|r| (kind, r))
            .into_iter()
            .collect();
        self.resolve_candidates(project.id, &candidates, check).await
    }

    async fn resolve_candidates(
        &self,
        project_id: u32,
        candidates: &[(MediaKind, MediaReference<'_>)],
        check: &dyn MediaExistence,
    ) -> DisplayMedia {
        let mut unanswered: Option<(MediaKind, MediaReference<'_>)> = None;

        for &(kind, reference) in candidates {
            match probe(check, kind, reference.filename(), self.settings.probe_timeout).await {
                ProbeOutcome::Present => {
                    return DisplayMedia::Verified {
                        url: reference.resolve(&self.settings.origin),
                        kind,
                    };
                }
                ProbeOutcome::Absent => {}
                ProbeOutcome::Failed => {
                    unanswered.get_or_insert((kind, reference));
                }
            }
        }

        match unanswered {
            Some((kind, reference)) => {
                tracing::warn!(
                    project_id,
                    %kind,
                    reference = reference.as_str(),
                    "media checks unavailable, using declared reference"
                );
                DisplayMedia::Unverified {
                    url: reference.as_str().to_string(),
                    kind,
                }
            }
            None => {
                tracing::debug!(project_id, "no media found, using placeholder");
                self.placeholder()
            }
        }
    }

    /// The caller could not render `current`; step once down the chain.
    ///
    /// animated → image → placeholder. The placeholder is terminal and an
    /// image never steps back to the animation.
    pub fn next_after_load_failure(
        &self,
        project: &ProjectRecord,
        current: &DisplayMedia,
    ) -> DisplayMedia {
        let image = reference_for(project, MediaKind::Image);

        match (current, image) {
            (DisplayMedia::Verified { kind: MediaKind::Animated, .. }, Some(r)) => {
                DisplayMedia::Unverified {
                    url: r.resolve(&self.settings.origin),
                    kind: MediaKind::Image,
                }
            }
            (DisplayMedia::Unverified { kind: MediaKind::Animated, .. }, Some(r)) => {
                DisplayMedia::Unverified {
                    url: r.as_str().to_string(),
                    kind: MediaKind::Image,
                }
            }
            _ => self.placeholder(),
        }
    }
}
