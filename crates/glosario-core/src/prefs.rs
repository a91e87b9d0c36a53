#![forbid(unsafe_code)]

//! The font-scale display preference and its persistence.
//!
//! The scale is a bounded index into [`FontConfig::steps`]. It is read once at
//! startup and written back on every change through a [`PreferenceStore`].
//! A missing or unparsable stored value means the default step; a number
//! outside the range is clamped.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::FontConfig;

// ---------------------------------------------------------------------------
// Font scale
// ---------------------------------------------------------------------------

/// Direction of a font-size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontAdjust {
    Smaller,
    Reset,
    Larger,
}

impl FontAdjust {
    /// Map the page's `-1 / 0 / +1` convention.
    #[must_use]
    pub fn from_direction(dir: i32) -> Option<Self> {
        match dir {
            -1 => Some(Self::Smaller),
            0 => Some(Self::Reset),
            1 => Some(Self::Larger),
            _ => None,
        }
    }
}

/// Current font-scale step.
#[derive(Debug, Clone, PartialEq)]
pub struct FontScale {
    steps: Vec<f32>,
    default_step: usize,
    step: usize,
}

impl FontScale {
    /// Start at the configured default step.
    #[must_use]
    pub fn new(config: &FontConfig) -> Self {
        let steps = if config.steps.is_empty() {
            FontConfig::default().steps
        } else {
            config.steps.clone()
        };
        let default_step = config.default_step.min(steps.len() - 1);
        Self {
            steps,
            default_step,
            step: default_step,
        }
    }

    /// Restore from a stored string value.
    #[must_use]
    pub fn from_stored(config: &FontConfig, stored: Option<&str>) -> Self {
        let mut scale = Self::new(config);
        match stored.map(|s| s.trim().parse::<i64>()) {
            Some(Ok(step)) => scale.set_step(step),
            Some(Err(_)) => debug!(?stored, "unparsable font step, using default"),
            None => {}
        }
        scale
    }

    fn set_step(&mut self, step: i64) {
        let max = (self.steps.len() - 1) as i64;
        self.step = step.clamp(0, max) as usize;
    }

    /// Apply a change; returns whether the step moved.
    pub fn adjust(&mut self, adjust: FontAdjust) -> bool {
        let before = self.step;
        match adjust {
            FontAdjust::Reset => self.step = self.default_step,
            FontAdjust::Smaller => self.step = self.step.saturating_sub(1),
            FontAdjust::Larger => self.step = (self.step + 1).min(self.steps.len() - 1),
        }
        self.step != before
    }

    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn factor(&self) -> f32 {
        self.steps[self.step]
    }

    /// Root font size in whole percent (`1.25` -> `125`).
    #[must_use]
    pub fn percent(&self) -> u32 {
        (self.factor() * 100.0).round() as u32
    }

    /// Value written to the preference store.
    #[must_use]
    pub fn stored_value(&self) -> String {
        self.step.to_string()
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Errors from a preference backend.
#[derive(Debug)]
pub enum PrefsError {
    /// I/O error reading or writing a file.
    Io(std::io::Error),
    /// JSON encode error.
    Json(serde_json::Error),
    /// Backend not available (e.g. storage disabled in the browser).
    Unavailable(String),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Unavailable(msg) => write!(f, "preference storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for PrefsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Unavailable(_) => None,
        }
    }
}

/// String key/value storage for display preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Backend-specific write failure.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Read the font scale once at startup.
#[must_use]
pub fn load_font_scale(store: &dyn PreferenceStore, config: &FontConfig) -> FontScale {
    FontScale::from_stored(config, store.get(&config.storage_key).as_deref())
}

/// Persist the font scale. Failures are logged and otherwise ignored.
pub fn save_font_scale(store: &mut dyn PreferenceStore, config: &FontConfig, scale: &FontScale) {
    if let Err(err) = store.set(&config.storage_key, &scale.stored_value()) {
        warn!(error = %err, key = %config.storage_key, "failed to persist font step");
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON-object file store (`{"glossary-font-step": "2"}`).
///
/// The file is read once when opened and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open the store. A missing file is an empty store; an unreadable or
    /// corrupt one is logged and treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring corrupt preference file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read preference file");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        let body = serde_json::to_string_pretty(&self.values).map_err(PrefsError::Json)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(PrefsError::Io)?;
        }
        std::fs::write(&self.path, body).map_err(PrefsError::Io)
    }
}
