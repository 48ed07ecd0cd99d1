// src/models/manifest.rs

//! Manifest structures: the top-level category listing.

use serde::Deserialize;

/// Top-level manifest document.
///
/// Accepts both the wrapped shape `{ "categories": [...] }` and the legacy
/// bare-array shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

impl Manifest {
    /// The ordered category list, whatever the source shape.
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            Manifest::Wrapped { categories } => categories,
            Manifest::Bare(categories) => categories,
        }
    }
}

/// One category record as declared in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Product-list resource for the simple-file case
    #[serde(default)]
    pub file: Option<String>,

    /// Ordered subcategory list for the grouped case
    #[serde(default)]
    pub subcategories: Option<Vec<Subcategory>>,
}

/// One subcategory record within a category.
#[derive(Debug, Clone, Deserialize)]
pub struct Subcategory {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Product-list resource
    #[serde(default)]
    pub file: Option<String>,
}

/// A category record resolved into its rendering case.
///
/// `file` wins over `subcategories` when both are present; empty strings and
/// empty lists count as absent.
#[derive(Debug, Clone)]
pub enum CategoryEntry {
    /// Simple category backed by a single product list
    Products { title: Option<String>, file: String },

    /// Category grouping an ordered list of subcategories
    Groups {
        title: Option<String>,
        subcategories: Vec<Subcategory>,
    },

    /// Category with no data source at all
    Empty { title: Option<String> },
}

impl Category {
    /// Resolve the record's shape once, at load time.
    pub fn resolve(self) -> CategoryEntry {
        let Category {
            title,
            file,
            subcategories,
        } = self;

        if let Some(file) = file.filter(|f| !f.is_empty()) {
            return CategoryEntry::Products { title, file };
        }
        if let Some(subcategories) = subcategories.filter(|s| !s.is_empty()) {
            return CategoryEntry::Groups {
                title,
                subcategories,
            };
        }
        CategoryEntry::Empty { title }
    }
}
