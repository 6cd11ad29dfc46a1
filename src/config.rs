use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub venues: VenueConfig,
}

/// Numeric and clock limits shared by the classifier and the checklist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thresholds {
    pub attendance_limit: i64,
    pub noise_limit_db: i64,
    pub max_consecutive_days: i64,
    /// Earliest start time without amplified sound (HH:MM).
    pub earliest_start: String,
    /// Earliest start time when amplified sound is used (HH:MM).
    pub earliest_amplified_start: String,
    /// Latest finish time (HH:MM).
    pub latest_finish: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            attendance_limit: 200,
            noise_limit_db: 95,
            max_consecutive_days: 2,
            earliest_start: "05:30".into(),
            earliest_amplified_start: "07:00".into(),
            latest_finish: "22:00".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct VenueConfig {
    /// Substrings that mark a free-text venue as a civic/open space.
    #[serde(default)]
    pub public_keywords: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    thresholds: ThresholdsOverlay,
    #[serde(default)]
    venues: VenuesOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct ThresholdsOverlay {
    attendance_limit: Option<i64>,
    noise_limit_db: Option<i64>,
    max_consecutive_days: Option<i64>,
    earliest_start: Option<String>,
    earliest_amplified_start: Option<String>,
    latest_finish: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct VenuesOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    public_keywords: Vec<String>,
    #[serde(default)]
    remove_public_keywords: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the overlay at `path` if given (errors propagate), otherwise
    ///    the user overlay at ~/.config/permit-gate/config.toml (if exists)
    ///
    /// Scalars override, lists extend. Set `replace = true` in a list section
    /// to replace its defaults entirely, or use `remove_<field>` lists to
    /// subtract specific items.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config();
        let overlay = match path {
            Some(path) => Some(Self::read_overlay(path)?),
            None => Self::load_user_overlay(),
        };
        if let Some(overlay) = overlay {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    fn read_overlay(path: &Path) -> Result<ConfigOverlay> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Try to load user overlay from ~/.config/permit-gate/config.toml.
    /// A missing file is normal; a broken one is logged and skipped.
    fn load_user_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = Path::new(&home).join(".config/permit-gate/config.toml");
        if !path.exists() {
            return None;
        }
        match Self::read_overlay(&path) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("ignoring user config {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let t = overlay.thresholds;
        if let Some(v) = t.attendance_limit {
            self.thresholds.attendance_limit = v;
        }
        if let Some(v) = t.noise_limit_db {
            self.thresholds.noise_limit_db = v;
        }
        if let Some(v) = t.max_consecutive_days {
            self.thresholds.max_consecutive_days = v;
        }
        if let Some(v) = t.earliest_start {
            self.thresholds.earliest_start = v;
        }
        if let Some(v) = t.earliest_amplified_start {
            self.thresholds.earliest_amplified_start = v;
        }
        if let Some(v) = t.latest_finish {
            self.thresholds.latest_finish = v;
        }

        let v = overlay.venues;
        merge_list(
            &mut self.venues.public_keywords,
            v.public_keywords,
            &v.remove_public_keywords,
            v.replace,
        );
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    pub(crate) fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
