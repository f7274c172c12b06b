//! Static class/spec catalog used to decorate roster entries.

use std::collections::HashMap;

use crate::naming::slugify;
use crate::types::{ClassId, SpecId};

/// Class name used when the catalog has no entry for a class id.
pub const UNKNOWN_CLASS_NAME: &str = "Unknown";

/// Class slug used when the catalog has no entry for a class id.
pub const UNKNOWN_CLASS_SLUG: &str = "unknown";

/// Display name and slug of one specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecInfo {
    pub name: String,
    pub slug: String,
}

/// Display name, slug and specializations of one class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassInfo {
    pub name: String,
    pub slug: String,
    pub specs: HashMap<SpecId, SpecInfo>,
}

/// Class id → class info lookup, rebuilt on every aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: HashMap<ClassId, ClassInfo>,
}

impl ClassCatalog {
    /// An empty catalog. Every lookup falls back to the unknown class.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ClassId, info: ClassInfo) {
        self.classes.insert(id, info);
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve `(name, slug)` for a class id, defaulting to
    /// `("Unknown", "unknown")`.
    pub fn class_name_and_slug(&self, id: ClassId) -> (&str, &str) {
        match self.classes.get(&id) {
            Some(info) => (info.name.as_str(), info.slug.as_str()),
            None => (UNKNOWN_CLASS_NAME, UNKNOWN_CLASS_SLUG),
        }
    }

    /// Resolve the display spec for a member.
    ///
    /// Prefers the catalog entry for `spec_id` within the member's class.
    /// Otherwise the raw spec string is used as the name and slugged.
    pub fn resolve_spec(
        &self,
        class_id: ClassId,
        spec_id: Option<SpecId>,
        raw_spec: &str,
    ) -> SpecInfo {
        let catalog_spec = spec_id.and_then(|sid| {
            self.classes
                .get(&class_id)
                .and_then(|class| class.specs.get(&sid))
        });

        match catalog_spec {
            Some(spec) => spec.clone(),
            None => SpecInfo {
                name: raw_spec.to_string(),
                slug: slugify(raw_spec),
            },
        }
    }
}

impl FromIterator<(ClassId, ClassInfo)> for ClassCatalog {
    fn from_iter<I: IntoIterator<Item = (ClassId, ClassInfo)>>(iter: I) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}
