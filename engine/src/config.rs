use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use limitless_export::{DEFAULT_FILE_SUFFIX, DEFAULT_SCALE};
use limitless_types::ui::UiOptions;

/// Pause between selecting an answer and moving to the next question.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(300);
/// Length of the Analyzing interstitial.
pub const DEFAULT_ANALYZING_DELAY: Duration = Duration::from_millis(2500);
/// Delay before the result view scrolls to a freshly revealed card.
pub const CARD_FOCUS_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MIN_COMMITMENT_CHARS: usize = 5;

/// `~/.limitless/config.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct LimitlessConfig {
    pub display: Option<DisplayConfig>,
    pub quiz: Option<QuizConfig>,
    pub export: Option<ExportConfig>,
    pub content: Option<ContentConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        let (Self::Read { path, .. } | Self::Parse { path, .. }) = self;
        path
    }
}

/// Terminal rendering preferences.
///
/// ```toml
/// [display]
/// ascii_only = false
/// high_contrast = false
/// reduced_motion = false
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw borders, bars, and icons with plain ASCII.
    pub ascii_only: bool,
    /// Black and white palette; profile colors are not used.
    pub high_contrast: bool,
    /// No panel motion and a static spinner.
    pub reduced_motion: bool,
}

/// Quiz pacing.
///
/// ```toml
/// [quiz]
/// advance_delay_ms = 300
/// analyzing_delay_ms = 2500
/// min_commitment_chars = 5
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct QuizConfig {
    pub advance_delay_ms: Option<u64>,
    pub analyzing_delay_ms: Option<u64>,
    pub min_commitment_chars: Option<usize>,
}

/// Card export.
///
/// ```toml
/// [export]
/// dir = "~/Pictures"
/// scale = 3
/// file_suffix = "Limitless_Brain_Declaration"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Output directory. `~` and `${VAR}` are expanded. Default: current directory.
    pub dir: Option<String>,
    /// Pixel upscale factor. Default: 3. Values below 1 are treated as 1.
    pub scale: Option<u32>,
    pub file_suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentConfig {
    /// Content file replacing the bundled questions and profiles.
    pub path: Option<String>,
}

/// Resolved quiz pacing, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub advance_delay: Duration,
    pub analyzing_delay: Duration,
    pub card_focus_delay: Duration,
    pub min_commitment_chars: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            analyzing_delay: DEFAULT_ANALYZING_DELAY,
            card_focus_delay: CARD_FOCUS_DELAY,
            min_commitment_chars: DEFAULT_MIN_COMMITMENT_CHARS,
        }
    }
}

/// Resolved export settings, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub dir: PathBuf,
    pub scale: u32,
    pub file_suffix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            scale: DEFAULT_SCALE,
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
        }
    }
}

/// Everything the controller needs from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub quiz: QuizSettings,
    pub export: ExportSettings,
    pub ui: UiOptions,
}

/// Replace `${VAR}` with the variable's value (empty when unset). An
/// unclosed `${` is kept as written.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some((before, after)) = rest.split_once("${") {
        out.push_str(before);
        let Some((name, tail)) = after.split_once('}') else {
            out.push_str("${");
            out.push_str(after);
            return out;
        };
        if !name.is_empty() {
            out.push_str(&env::var(name).unwrap_or_default());
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(value: &str) -> PathBuf {
    let home_relative = value
        .strip_prefix("~/")
        .or_else(|| (value == "~").then_some(""));
    match (home_relative, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}

/// Expand `${VAR}` references, then a leading `~`.
pub fn expand_path(value: &str) -> PathBuf {
    expand_home(&expand_env_vars(value))
}

impl LimitlessConfig {
    /// Load the config file at [`config_path`]; `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        config_path()
            .filter(|path| path.is_file())
            .map(|path| Self::load_from(&path))
            .transpose()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.display
            .as_ref()
            .map(|display| UiOptions {
                ascii_only: display.ascii_only,
                high_contrast: display.high_contrast,
                reduced_motion: display.reduced_motion,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn quiz_settings(&self) -> QuizSettings {
        let defaults = QuizSettings::default();
        let Some(quiz) = self.quiz.as_ref() else {
            return defaults;
        };
        QuizSettings {
            advance_delay: quiz
                .advance_delay_ms
                .map_or(defaults.advance_delay, Duration::from_millis),
            analyzing_delay: quiz
                .analyzing_delay_ms
                .map_or(defaults.analyzing_delay, Duration::from_millis),
            card_focus_delay: defaults.card_focus_delay,
            min_commitment_chars: quiz
                .min_commitment_chars
                .unwrap_or(defaults.min_commitment_chars),
        }
    }

    #[must_use]
    pub fn export_settings(&self) -> ExportSettings {
        let defaults = ExportSettings::default();
        let Some(export) = self.export.as_ref() else {
            return defaults;
        };
        ExportSettings {
            dir: export
                .dir
                .as_deref()
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map_or(defaults.dir, expand_path),
            scale: export.scale.map_or(defaults.scale, |scale| scale.max(1)),
            file_suffix: export
                .file_suffix
                .as_deref()
                .map(str::trim)
                .filter(|suffix| !suffix.is_empty())
                .map_or(defaults.file_suffix, str::to_string),
        }
    }

    /// Content file override, expanded.
    #[must_use]
    pub fn content_path(&self) -> Option<PathBuf> {
        self.content
            .as_ref()
            .and_then(|content| content.path.as_deref())
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(expand_path)
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            quiz: self.quiz_settings(),
            export: self.export_settings(),
            ui: self.ui_options(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".limitless").join("config.toml"))
}
