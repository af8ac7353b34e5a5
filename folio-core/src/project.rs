use serde::{Deserialize, Serialize};

/// One portfolio entry. Field names follow the JSON the site consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl ProjectRecord {
    /// Primary image reference, if non-blank.
    pub fn image_ref(&self) -> Option<&str> {
        non_blank(Some(self.image_url.as_str()))
    }

    /// Animated reference, if non-blank.
    pub fn animated_ref(&self) -> Option<&str> {
        non_blank(self.gif_url.as_deref())
    }

    /// At least one media reference is declared.
    pub fn is_displayable(&self) -> bool {
        self.image_ref().is_some() || self.animated_ref().is_some()
    }

    /// Extended description split on blank lines.
    pub fn paragraphs(&self) -> Vec<&str> {
        let Some(text) = self.extended_description.as_deref() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut start: Option<usize> = None;
        let mut end = 0;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            if line.trim().is_empty() {
                if let Some(s) = start.take() {
                    out.push(text[s..end].trim_end());
                }
            } else {
                start.get_or_insert(line_start);
                end = offset;
            }
        }

        if let Some(s) = start {
            out.push(text[s..end].trim_end());
        }
        out
    }

    /// Category label split on commas.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn has_category(&self, label: &str) -> bool {
        let label = label.trim();
        self.categories().any(|c| c.eq_ignore_ascii_case(label))
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}
