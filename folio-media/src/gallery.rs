//! Per-project media gallery.
//!
//! Beyond the two declared references a project may ship numbered extras
//! named after its title: `{slug}2.jpg`, `{slug}3.gif`, ... The scan is a
//! fixed, small grid (suffixes 2 to 5, three extensions each) probed
//! concurrently; the result order never depends on which probe finished
//! first.

use std::ops::RangeInclusive;

use folio_core::ProjectRecord;
use futures::future::join_all;
use serde::Serialize;

use crate::probe::{probe, ProbeOutcome};
use crate::{MediaExistence, MediaKind, MediaReference, MediaSettings};

const SUPPLEMENTAL_SUFFIXES: RangeInclusive<u32> = 2..=5;
const SUPPLEMENTAL_EXTENSIONS: [(&str, MediaKind); 3] = [
    ("jpg", MediaKind::Image),
    ("png", MediaKind::Image),
    ("gif", MediaKind::Animated),
];

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaCandidate {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub title: String,
    /// False when the probe could not be answered and the declared
    /// reference was kept anyway.
    pub verified: bool,
}

/// Ordered candidates plus a wrapping selection cursor.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<MediaCandidate>,
    selected: usize,
}

impl Gallery {
    pub fn new(items: Vec<MediaCandidate>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &[MediaCandidate] {
        &self.items
    }

    pub fn into_items(self) -> Vec<MediaCandidate> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<&MediaCandidate> {
        self.items.get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    pub fn next_item(&mut self) {
        if self.items.len() > 1 {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn prev_item(&mut self) {
        if self.items.len() > 1 {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    /// Returns false (and keeps the selection) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }
}

/// Lower-case the title and turn each whitespace run into one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

struct Probe {
    kind: MediaKind,
    filename: String,
    url: String,
    title: String,
    primary: bool,
}

fn planned_probes(project: &ProjectRecord, origin: &str) -> Vec<Probe> {
    let mut probes = Vec::with_capacity(2 + 3 * SUPPLEMENTAL_SUFFIXES.clone().count());

    let primaries = [
        (MediaKind::Image, project.image_ref(), format!("{} Main Image", project.title)),
        (MediaKind::Animated, project.animated_ref(), format!("{} Animation", project.title)),
    ];
    for (kind, raw, title) in primaries {
        if let Some(reference) = raw.and_then(MediaReference::parse) {
            probes.push(Probe {
                kind,
                filename: reference.filename().to_string(),
                url: reference.resolve(origin),
                title,
                primary: true,
            });
        }
    }

    let slug = slugify(&project.title);
    for i in SUPPLEMENTAL_SUFFIXES {
        for (ext, kind) in SUPPLEMENTAL_EXTENSIONS {
            let filename = format!("{slug}{i}.{ext}");
            let (path, title) = match kind {
                MediaKind::Image => (
                    format!("/images/projects/{filename}"),
                    format!("{} Image {i}", project.title),
                ),
                MediaKind::Animated => (
                    format!("/gifs/{filename}"),
                    format!("{} Animation {i}", project.title),
                ),
            };
            probes.push(Probe {
                kind,
                url: MediaReference::RootRelative(&path).resolve(origin),
                filename,
                title,
                primary: false,
            });
        }
    }

    probes
}

/// Build the gallery for `project`.
///
/// Primaries are kept when present, or when their probe could not be
/// answered (marked unverified). Numbered extras are kept only when
/// confirmed. Failures never abort the scan.
pub async fn assemble_gallery(
    project: &ProjectRecord,
    check: &dyn MediaExistence,
    settings: &MediaSettings,
) -> Gallery {
    let probes = planned_probes(project, &settings.origin);

    let outcomes = join_all(
        probes
            .iter()
            .map(|p| probe(check, p.kind, &p.filename, settings.probe_timeout)),
    )
    .await;

    let items: Vec<MediaCandidate> = probes
        .into_iter()
        .zip(outcomes)
        .filter_map(|(p, outcome)| {
            let verified = match (outcome, p.primary) {
                (ProbeOutcome::Present, _) => true,
                (ProbeOutcome::Failed, true) => false,
                _ => return None,
            };
            Some(MediaCandidate {
                kind: p.kind,
                url: p.url,
                title: p.title,
                verified,
            })
        })
        .collect();

    tracing::debug!(project_id = project.id, items = items.len(), "gallery assembled");
    Gallery::new(items)
}
