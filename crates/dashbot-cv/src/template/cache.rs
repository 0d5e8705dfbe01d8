//! Load-once template cache.

use super::Template;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Immutable cache of obstacle templates, keyed by pattern name.
///
/// Populated once at startup so that a missing image is diagnosed before
/// the loop starts. A pattern that failed to load is simply absent and
/// lookups for it return `None` for the rest of the run; the loop treats
/// that as "no match this cycle" rather than an error.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: HashMap<String, Template>,
}

impl TemplateCache {
    /// Load every named pattern from `dir`, converting to grayscale.
    ///
    /// Missing or undecodable templates are reported and skipped; the
    /// returned cache holds whatever did load.
    pub fn load<'a, I>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut templates = HashMap::new();

        for name in names {
            if templates.contains_key(name) {
                continue;
            }
            match Self::load_one(dir, name) {
                Ok(Some(template)) => {
                    templates.insert(name.to_string(), template);
                }
                Ok(None) => {
                    warn!(pattern = name, dir = %dir.display(), "template image not found");
                }
                Err(e) => {
                    warn!(pattern = name, error = %e, "failed to load template");
                }
            }
        }

        Self { templates }
    }

    fn load_one(dir: &Path, name: &str) -> Result<Option<Template>> {
        let Some(path) = Self::find_file(dir, name) else {
            return Ok(None);
        };

        let image = image::open(&path)
            .with_context(|| format!("failed to decode template: {}", path.display()))?
            .to_luma8();

        Ok(Some(Template::new(name, image)))
    }

    /// A name carrying an extension is taken as-is, otherwise the
    /// supported extensions are tried in order.
    fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
        let direct = dir.join(name);
        if direct.is_file() {
            return Some(direct);
        }

        SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
