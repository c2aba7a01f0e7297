//! Persisted command-line defaults.
//!
//! Defaults live in a flags file holding the same tokens as the command
//! line (`--watch`, `--transition-ms 250`, ...). A global file and a local
//! `.foliorc` are merged, then the real command line is merged on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::carousel::{
    CarouselConfig, DEFAULT_REPEAT_FACTOR, DEFAULT_TOLERANCE, DEFAULT_TRANSITION,
};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_animation: bool,
    pub perf: bool,
    pub theme: Option<ThemeMode>,
    pub transition_ms: Option<u64>,
    pub tolerance: Option<usize>,
    pub repeat: Option<usize>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_animation: self.no_animation || other.no_animation,
            perf: self.perf || other.perf,
            theme: other.theme.or(self.theme),
            transition_ms: other.transition_ms.or(self.transition_ms),
            tolerance: other.tolerance.or(self.tolerance),
            repeat: other.repeat.or(self.repeat),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Carousel tuning implied by these flags, for cards `item_width` apart.
    pub fn carousel_config(&self, item_width: u64) -> CarouselConfig {
        let transition = if self.no_animation {
            Duration::ZERO
        } else {
            self.transition_ms
                .map_or(DEFAULT_TRANSITION, Duration::from_millis)
        };
        CarouselConfig {
            item_width,
            repeat_factor: self.repeat.unwrap_or(DEFAULT_REPEAT_FACTOR),
            tolerance: self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
            transition,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("folio").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("folio")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("folio").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("folio").join("config");
        }
    }

    PathBuf::from(".foliorc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".foliorc")
}

/// Read flags from `path`; a missing file yields no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# folio defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_animation {
        lines.push("--no-animation".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(ms) = flags.transition_ms {
        lines.push(format!("--transition-ms {ms}"));
    }
    if let Some(tolerance) = flags.tolerance {
        lines.push(format!("--tolerance {tolerance}"));
    }
    if let Some(repeat) = flags.repeat {
        lines.push(format!("--repeat {repeat}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the flags file at `path` if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens, ignoring everything else.
///
/// Both `--flag value` and `--flag=value` spellings are accepted.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let mut take_value = || {
            inline_value.map(str::to_string).or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "--watch" => flags.watch = true,
            "--no-animation" => flags.no_animation = true,
            "--perf" => flags.perf = true,
            "--theme" => flags.theme = take_value().as_deref().and_then(parse_theme),
            "--transition-ms" => {
                flags.transition_ms = take_value().and_then(|v| v.parse().ok());
            }
            "--tolerance" => flags.tolerance = take_value().and_then(|v| v.parse().ok()),
            "--repeat" => flags.repeat = take_value().and_then(|v| v.parse().ok()),
            "--debug-log" => flags.debug_log = take_value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
