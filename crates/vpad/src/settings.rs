//! Touch settings table
//!
//! Maps each UI context to how touch input should behave there, plus the
//! directional pad flavor for gameplay. Stored as a TOML file alongside the
//! rest of the game's configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::{TapContext, TouchMode};

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading or saving the touch settings file
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings file
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization failure on save
    #[error("settings encode error: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Per-context preference between the virtual pad and native taps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapPreference {
    /// Virtual pad only
    Pad,
    /// Native taps only
    Tap,
    /// Both sources live
    Both,
}

impl TapPreference {
    /// The touch mode this preference selects
    pub fn touch_mode(self) -> TouchMode {
        match self {
            TapPreference::Pad => TouchMode::TouchOnly,
            TapPreference::Tap => TouchMode::GestureOnly,
            TapPreference::Both => TouchMode::Both,
        }
    }
}

/// Selects between the anchored sector wheel and the floating stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadStyle {
    #[default]
    Anchored,
    Floating,
}

/// Touch input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchSettings {
    /// Directional pad flavor for gameplay
    #[serde(default)]
    pub pad_style: PadStyle,

    /// Tap preference per UI context
    ///
    /// Every context must be present; [`TouchSettings::mode_for`] treats a
    /// missing entry as a contract violation.
    #[serde(default = "default_contexts")]
    pub contexts: HashMap<TapContext, TapPreference>,
}

fn default_contexts() -> HashMap<TapContext, TapPreference> {
    TapContext::ALL
        .iter()
        .map(|&ctx| (ctx, TapPreference::Both))
        .collect()
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            pad_style: PadStyle::default(),
            contexts: default_contexts(),
        }
    }
}

impl TouchSettings {
    /// Default location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vpad").join("touch.toml"))
    }

    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("touch settings {} missing, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Touch mode configured for `context`
    ///
    /// Every context must have an entry; a table missing one is a
    /// programming or packaging error, not a runtime condition.
    pub fn mode_for(&self, context: TapContext) -> TouchMode {
        match self.contexts.get(&context) {
            Some(pref) => pref.touch_mode(),
            None => panic!("no tap preference configured for context {context:?}"),
        }
    }
}
