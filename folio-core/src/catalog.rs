//! Read-only project catalog.
//!
//! Built once at startup and shared behind an `Arc`; nothing mutates it
//! afterwards, so any number of handlers can read it concurrently.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::bail_folio;
use crate::errors::{FolioError, FolioResult};
use crate::project::ProjectRecord;

const BUILTIN_PROJECTS: &str = include_str!("../data/projects.json");

#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

/// Optional list filters (`?category=...&featured=true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

impl CatalogFilter {
    fn matches(&self, p: &ProjectRecord) -> bool {
        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) if c.eq_ignore_ascii_case("all") => true,
            Some(c) => p.has_category(c),
        };
        let featured_ok = self.featured.map_or(true, |f| p.featured == f);
        category_ok && featured_ok
    }
}

impl Catalog {
    /// Validate and freeze a project list.
    ///
    /// Ids must be positive and unique; every record needs an image or
    /// animated reference. Declaration order is kept.
    pub fn new(projects: Vec<ProjectRecord>) -> FolioResult<Self> {
        let mut seen = HashSet::with_capacity(projects.len());

        for p in &projects {
            if p.id == 0 {
                bail_folio!(unprocessable, "Project '{}' has a non-positive id", p.title);
            }
            if !seen.insert(p.id) {
                bail_folio!(unprocessable, "Duplicate project id: {}", p.id);
            }
            if !p.is_displayable() {
                bail_folio!(unprocessable, "Project {} has neither an image nor an animation", p.id);
            }
        }

        Ok(Self { projects })
    }

    /// The fixed project list compiled into the binary.
    pub fn builtin() -> FolioResult<Self> {
        Self::from_json(BUILTIN_PROJECTS).context("parsing built-in project list")
    }

    pub fn from_json(raw: &str) -> FolioResult<Self> {
        let projects: Vec<ProjectRecord> = serde_json::from_str(raw)?;
        Self::new(projects)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading project list {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("loading project list {}", path.display()))
    }

    pub fn all(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> FolioResult<&ProjectRecord> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| FolioError::not_found("Project not found").into_anyhow())
    }

    /// Lookup by the raw path segment; anything that is not a positive
    /// integer is simply not found.
    pub fn get_by_segment(&self, raw: &str) -> FolioResult<&ProjectRecord> {
        match raw.trim().parse::<u32>() {
            Ok(id) => self.get(id),
            Err(_) => Err(FolioError::not_found("Project not found").into_anyhow()),
        }
    }

    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&ProjectRecord> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }
}
