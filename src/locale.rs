// src/locale.rs

//! Localization redirection and the UI string table layer.
//!
//! Data paths (anything under the configured data prefix) are rewritten to
//! their per-language variant, mirroring the directory layout the site's
//! translation scripts produce: `data/x.json` → `i18n/<lang>/data/x.json`.
//! Paths outside the data prefix pass through untouched.

use std::collections::HashMap;

use crate::config::SiteConfig;
use crate::dom::Document;

/// Attribute marking an element whose text is replaced from the UI string
/// table.
pub const I18N_ATTR: &str = "data-i18n";

/// Flat key → localized string mapping from `ui.json`.
pub type UiStrings = HashMap<String, String>;

/// Rewrites logical data paths to language-specific ones.
#[derive(Debug, Clone)]
pub struct Localizer {
    lang: String,
    base_lang: String,
    data_prefix: String,
    i18n_root: String,
}

impl Localizer {
    /// Build a localizer for an explicit language tag.
    pub fn new(lang: &str, site: &SiteConfig) -> Self {
        Self {
            lang: normalize(lang),
            base_lang: site.base_lang.clone(),
            data_prefix: site.data_prefix.clone(),
            i18n_root: site.i18n_root.clone(),
        }
    }

    /// Detect the client language: an explicit override wins, then the first
    /// entry of the system language preference list, then the base language.
    pub fn detect(site: &SiteConfig, override_lang: Option<&str>) -> Self {
        let raw = override_lang
            .map(str::to_string)
            .or_else(sys_locale::get_locale)
            .unwrap_or_else(|| site.base_lang.clone());
        Self::new(&raw, site)
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn is_base(&self) -> bool {
        self.lang == self.base_lang
    }

    /// Resolve a logical path to its language-specific variant.
    pub fn resolve(&self, path: &str) -> String {
        if !path.starts_with(&self.data_prefix) || self.is_base() {
            return path.to_string();
        }
        format!("{}/{}/{}", self.i18n_root, self.lang, path)
    }
}

/// Normalize a language tag to its 2-letter primary subtag.
fn normalize(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .chars()
        .take(2)
        .collect::<String>()
        .to_lowercase()
}

/// Replace the text of every element carrying the translation-key attribute.
pub fn apply_ui_strings(doc: &mut Document, strings: &UiStrings) {
    doc.for_each_mut(&mut |element| {
        let replacement = element
            .attr(I18N_ATTR)
            .and_then(|key| strings.get(key))
            .cloned();
        if let Some(text) = replacement {
            element.set_text(&text);
        }
    });
}
