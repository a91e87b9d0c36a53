#![forbid(unsafe_code)]

//! Configuration for the glossary browser.
//!
//! Captures the category palette, the diagram cross-reference list, the fixed
//! UI labels, and the font-scale steps as one [`GlossaryConfig`] that can be
//! loaded from JSON (always) or TOML (with the `toml-config` feature).
//!
//! ```toml
//! fallback_color = "#64748b"
//! diagram_terms = ["Activo", "Pasivo"]
//!
//! [palette]
//! Legal = "#7c3aed"
//! Contable = "#0891b2"
//! Fiscal = "#dc2626"
//! Registral = "#ea580c"
//! Laboral = "#16a34a"
//! Institucional = "#6366f1"
//!
//! [font]
//! steps = [0.8, 0.9, 1.0, 1.1, 1.25, 1.4]
//! default_step = 2
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the values the glossary page ships with, so
//! `GlossaryConfig::default()` is always valid.

use std::collections::BTreeMap;
#[cfg(feature = "toml-config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Key the font step is persisted under.
pub const FONT_STEP_KEY: &str = "glossary-font-step";

/// Color used for records whose category is outside the enumeration.
pub const FALLBACK_COLOR: &str = "#64748b";

/// Terms that have a related diagram on the diagrams page.
pub const DEFAULT_DIAGRAM_TERMS: [&str; 19] = [
    "Comerciante Individual",
    "EIRL (Empresa Individual de Responsabilidad Limitada)",
    "SAS (Sociedad por Acciones Simplificada)",
    "Ecuación Contable",
    "Capital Social",
    "Capital Suscrito",
    "Capital Pagado",
    "Activo",
    "Pasivo",
    "Patrimonio",
    "Balance General",
    "ISSS (Instituto Salvadoreño del Seguro Social)",
    "AFP (Administradora de Fondos de Pensiones)",
    "INSAFORP (Instituto Salvadoreño de Formación Profesional)",
    "Cargas Patronales",
    "NIT (Número de Identificación Tributaria)",
    "NRC (Número de Registro de Contribuyente)",
    "Matrícula de Comercio",
    "Solvencia Estadística",
];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Everything tunable about the glossary browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Category label -> `#rrggbb` color. Must cover every category.
    pub palette: BTreeMap<String, String>,

    /// Color for records with an unrecognized category.
    pub fallback_color: String,

    /// Term names that get a "related diagram" action in the detail view.
    pub diagram_terms: Vec<String>,

    /// Fixed UI strings.
    pub labels: Labels,

    /// Font-scale preference parameters.
    pub font: FontConfig,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        let palette = [
            (Category::Legal, "#7c3aed"),
            (Category::Contable, "#0891b2"),
            (Category::Fiscal, "#dc2626"),
            (Category::Registral, "#ea580c"),
            (Category::Laboral, "#16a34a"),
            (Category::Institucional, "#6366f1"),
        ]
        .into_iter()
        .map(|(cat, color)| (cat.label().to_owned(), color.to_owned()))
        .collect();

        Self {
            palette,
            fallback_color: FALLBACK_COLOR.to_owned(),
            diagram_terms: DEFAULT_DIAGRAM_TERMS.iter().map(|s| (*s).to_owned()).collect(),
            labels: Labels::default(),
            font: FontConfig::default(),
        }
    }
}

/// Fixed UI strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub no_results: String,
    pub load_failed: String,
    pub loading: String,
    pub examples_heading: String,
    pub diagram_button: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            no_results: "🔍 No se encontraron términos. Intentá con otra búsqueda.".to_owned(),
            load_failed: "⚠️ No se pudieron cargar los términos.".to_owned(),
            loading: "Cargando términos…".to_owned(),
            examples_heading: "📌 Ejemplos prácticos".to_owned(),
            diagram_button: "📊 Ver diagrama relacionado".to_owned(),
        }
    }
}

/// Font-scale steps and persistence key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Scale factors, ascending.
    pub steps: Vec<f32>,
    /// Index into `steps` used when nothing valid is stored.
    pub default_step: usize,
    /// Preference key.
    pub storage_key: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            steps: vec![0.8, 0.9, 1.0, 1.1, 1.25, 1.4],
            default_step: 2,
            storage_key: FONT_STEP_KEY.to_owned(),
        }
    }
}

impl GlossaryConfig {
    /// Load from a JSON string and validate.
    ///
    /// # Errors
    /// [`ConfigError::Json`] or [`ConfigError::Validation`].
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a TOML string and validate.
    ///
    /// # Errors
    /// [`ConfigError::Toml`] or [`ConfigError::Validation`].
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`GlossaryConfig::from_toml_str`].
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Return `self` when [`GlossaryConfig::validate`] finds nothing.
    ///
    /// # Errors
    /// [`ConfigError::Validation`] with every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check the palette against the category enumeration and the font steps
    /// for sanity. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for cat in Category::ALL {
            match self.palette.get(cat.label()) {
                None => errors.push(format!("palette is missing a color for {cat}")),
                Some(color) if !is_hex_color(color) => {
                    errors.push(format!("palette.{cat} must be #rrggbb, got {color:?}"));
                }
                Some(_) => {}
            }
        }
        for label in self.palette.keys() {
            if Category::from_label(label).is_none() {
                errors.push(format!("palette names unknown category {label:?}"));
            }
        }
        if !is_hex_color(&self.fallback_color) {
            errors.push(format!(
                "fallback_color must be #rrggbb, got {:?}",
                self.fallback_color
            ));
        }

        let steps = &self.font.steps;
        if steps.is_empty() {
            errors.push("font.steps must not be empty".into());
        } else {
            if steps.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                errors.push("font.steps must be positive".into());
            }
            if steps.windows(2).any(|w| w[0] >= w[1]) {
                errors.push("font.steps must be strictly ascending".into());
            }
            if self.font.default_step >= steps.len() {
                errors.push(format!(
                    "font.default_step must be < {}, got {}",
                    steps.len(),
                    self.font.default_step
                ));
            }
        }
        if self.font.storage_key.is_empty() {
            errors.push("font.storage_key must not be empty".into());
        }

        errors
    }

    /// Palette color for a category; the fallback for `None` or a gap.
    #[must_use]
    pub fn color_for(&self, category: Option<Category>) -> &str {
        category
            .and_then(|cat| self.palette.get(cat.label()))
            .map_or(self.fallback_color.as_str(), String::as_str)
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a [`GlossaryConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "toml-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "toml-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "toml-config")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GlossaryConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.diagram_terms.len(), 19);
        assert_eq!(config.font.steps[config.font.default_step], 1.0);
    }

    #[test]
    fn color_lookup_falls_back() {
        let config = GlossaryConfig::default();
        assert_eq!(config.color_for(Some(Category::Fiscal)), "#dc2626");
        assert_eq!(config.color_for(None), FALLBACK_COLOR);
    }

    #[test]
    fn missing_palette_entry_fails_loudly() {
        let mut config = GlossaryConfig::default();
        config.palette.remove("Laboral");
        let errors = config.validate();
        assert_eq!(errors, vec!["palette is missing a color for Laboral".to_string()]);
        assert!(matches!(config.validated(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_palette_category_is_rejected() {
        let mut config = GlossaryConfig::default();
        config.palette.insert("Aduanero".into(), "#000000".into());
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn bad_colors_and_steps_are_reported() {
        let mut config = GlossaryConfig::default();
        config.palette.insert("Legal".into(), "purple".into());
        config.font.steps = vec![1.0, 0.9];
        config.font.default_step = 5;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
    }

    #[test]
    fn json_partial_override_keeps_defaults() {
        let config = GlossaryConfig::from_json_str(r#"{"diagram_terms":["Activo"]}"#).unwrap();
        assert_eq!(config.diagram_terms, vec!["Activo".to_string()]);
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.labels, Labels::default());
    }

    #[test]
    fn json_parse_error() {
        assert!(matches!(
            GlossaryConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn toml_round_trip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glosario.toml");
        std::fs::write(
            &path,
            "fallback_color = \"#111111\"\n[font]\ndefault_step = 0\n",
        )
        .unwrap();
        let config = GlossaryConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.fallback_color, "#111111");
        assert_eq!(config.font.default_step, 0);
        assert_eq!(config.font.steps.len(), 6);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = GlossaryConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
