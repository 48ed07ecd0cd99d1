// src/config.rs

//! Renderer configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    /// Site location and language settings
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Resource paths relative to the site root
    #[serde(default)]
    pub paths: PathsConfig,

    /// User-visible notice and error strings
    #[serde(default)]
    pub text: TextConfig,
}

impl RenderConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.site.data_prefix.is_empty() {
            return Err(AppError::config("site.data_prefix is empty"));
        }
        if self.site.base_lang.is_empty() {
            return Err(AppError::config("site.base_lang is empty"));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::config(format!("site.base_url is invalid: {e}")))?;
        Ok(())
    }
}

/// Site location and language settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the deployed static site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Page to render, relative to the base URL
    #[serde(default = "defaults::page")]
    pub page: String,

    /// Language the base data files are written in
    #[serde(default = "defaults::base_lang")]
    pub base_lang: String,

    /// Root directory of the per-language data trees
    #[serde(default = "defaults::i18n_root")]
    pub i18n_root: String,

    /// Path prefix marking resources subject to localization redirection
    #[serde(default = "defaults::data_prefix")]
    pub data_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            page: defaults::page(),
            base_lang: defaults::base_lang(),
            i18n_root: defaults::i18n_root(),
            data_prefix: defaults::data_prefix(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Resource paths, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Category manifest
    #[serde(default = "defaults::manifest")]
    pub manifest: String,

    /// Card template markup
    #[serde(default = "defaults::card_template")]
    pub card_template: String,

    /// Legacy static grid markup, injected when the manifest is unreachable
    #[serde(default = "defaults::legacy_grid")]
    pub legacy_grid: String,

    /// Placeholder image for products without one
    #[serde(default = "defaults::placeholder_image")]
    pub placeholder_image: String,

    /// UI string table for the localization layer
    #[serde(default = "defaults::ui_strings")]
    pub ui_strings: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: defaults::manifest(),
            card_template: defaults::card_template(),
            legacy_grid: defaults::legacy_grid(),
            placeholder_image: defaults::placeholder_image(),
            ui_strings: defaults::ui_strings(),
        }
    }
}

/// User-visible notice and error strings.
///
/// Defaults match the Spanish wording of the live site; `{title}` is
/// substituted where present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "defaults::notice_category")]
    pub notice_category: String,

    #[serde(default = "defaults::notice_subcategory")]
    pub notice_subcategory: String,

    #[serde(default = "defaults::notice_section")]
    pub notice_section: String,

    #[serde(default = "defaults::notice_empty")]
    pub notice_empty: String,

    #[serde(default = "defaults::default_category_title")]
    pub default_category_title: String,

    #[serde(default = "defaults::default_subcategory_title")]
    pub default_subcategory_title: String,

    #[serde(default = "defaults::default_alt")]
    pub default_alt: String,

    #[serde(default = "defaults::container_label")]
    pub container_label: String,

    #[serde(default = "defaults::error_face")]
    pub error_face: String,

    #[serde(default = "defaults::error_heading")]
    pub error_heading: String,

    #[serde(default = "defaults::error_body")]
    pub error_body: String,

    #[serde(default = "defaults::error_actions")]
    pub error_actions: String,

    #[serde(default = "defaults::error_detail")]
    pub error_detail: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            notice_category: defaults::notice_category(),
            notice_subcategory: defaults::notice_subcategory(),
            notice_section: defaults::notice_section(),
            notice_empty: defaults::notice_empty(),
            default_category_title: defaults::default_category_title(),
            default_subcategory_title: defaults::default_subcategory_title(),
            default_alt: defaults::default_alt(),
            container_label: defaults::container_label(),
            error_face: defaults::error_face(),
            error_heading: defaults::error_heading(),
            error_body: defaults::error_body(),
            error_actions: defaults::error_actions(),
            error_detail: defaults::error_detail(),
        }
    }
}

mod defaults {
    // Site defaults
    pub fn base_url() -> String {
        "http://localhost:8000/".into()
    }
    pub fn page() -> String {
        "index.html".into()
    }
    pub fn base_lang() -> String {
        "es".into()
    }
    pub fn i18n_root() -> String {
        "i18n".into()
    }
    pub fn data_prefix() -> String {
        "data/".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; carta/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Path defaults
    pub fn manifest() -> String {
        "data/categories.json".into()
    }
    pub fn card_template() -> String {
        "Componentes/productCard.html".into()
    }
    pub fn legacy_grid() -> String {
        "Componentes/productGrid.html".into()
    }
    pub fn placeholder_image() -> String {
        "Imagenes/placeholder.svg".into()
    }
    pub fn ui_strings() -> String {
        "data/ui.json".into()
    }

    // Text defaults
    pub fn notice_category() -> String {
        "No hay productos disponibles para esta categoría.".into()
    }
    pub fn notice_subcategory() -> String {
        "No hay productos disponibles para \"{title}\".".into()
    }
    pub fn notice_section() -> String {
        "No hay productos disponibles para esta sección.".into()
    }
    pub fn notice_empty() -> String {
        "Sin contenido.".into()
    }
    pub fn default_category_title() -> String {
        "Categoría".into()
    }
    pub fn default_subcategory_title() -> String {
        "Subcategoría".into()
    }
    pub fn default_alt() -> String {
        "Producto".into()
    }
    pub fn container_label() -> String {
        "Lista de productos".into()
    }
    pub fn error_face() -> String {
        "😞".into()
    }
    pub fn error_heading() -> String {
        "Lamentamos las molestias".into()
    }
    pub fn error_body() -> String {
        "La página está temporalmente caída.".into()
    }
    pub fn error_actions() -> String {
        "🔄 Reintentar   ✉️ Contactar".into()
    }
    pub fn error_detail() -> String {
        "Error técnico: No se pudo cargar el menú.".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = RenderConfig::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_base_url() {
        let mut config = RenderConfig::default();
        config.site.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[site]\nbase_url = \"https://menu.example.com/\"\n\n[http]\ntimeout_secs = 5"
        )
        .unwrap();

        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.site.base_url, "https://menu.example.com/");
        assert_eq!(config.http.timeout_secs, 5);
        // untouched sections keep their defaults
        assert_eq!(config.paths.manifest, "data/categories.json");
        assert_eq!(config.site.base_lang, "es");
    }

    #[test]
    fn load_or_default_survives_missing_file() {
        let config = RenderConfig::load_or_default("definitely/not/here.toml");
        assert_eq!(config.site.page, "index.html");
    }
}
