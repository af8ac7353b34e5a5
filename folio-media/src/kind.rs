use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MediaError;

/// Still image or animation. On the wire animations are `"gif"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    #[serde(rename = "gif", alias = "animated")]
    Animated,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Animated => "gif",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" | "img" => Ok(MediaKind::Image),
            "gif" | "animated" => Ok(MediaKind::Animated),
            other => Err(MediaError::invalid(format!("unknown media kind '{other}'"))),
        }
    }
}

/// A media reference as written on a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaReference<'a> {
    /// Starts with `http://` or `https://`; used as-is.
    Absolute(&'a str),
    /// Path served by the media origin.
    RootRelative(&'a str),
}

impl<'a> MediaReference<'a> {
    /// `None` for blank strings.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if has_scheme(raw, "http://") || has_scheme(raw, "https://") {
            Some(MediaReference::Absolute(raw))
        } else {
            Some(MediaReference::RootRelative(raw))
        }
    }

    /// The reference exactly as declared (trimmed).
    pub fn as_str(&self) -> &'a str {
        match *self {
            MediaReference::Absolute(s) | MediaReference::RootRelative(s) => s,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, MediaReference::Absolute(_))
    }

    /// One fetchable URL: absolute references unchanged, relative ones
    /// prefixed with `origin`.
    pub fn resolve(&self, origin: &str) -> String {
        match *self {
            MediaReference::Absolute(url) => url.to_string(),
            MediaReference::RootRelative(path) => {
                let origin = origin.trim_end_matches('/');
                if path.starts_with('/') {
                    format!("{origin}{path}")
                } else {
                    format!("{origin}/{path}")
                }
            }
        }
    }

    /// Last path segment without query or fragment.
    pub fn filename(&self) -> &'a str {
        let s = self.as_str();
        let s = s.split(['?', '#']).next().unwrap_or(s);
        s.rsplit('/').next().unwrap_or(s)
    }
}

fn has_scheme(raw: &str, scheme: &str) -> bool {
    raw.get(..scheme.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
}
