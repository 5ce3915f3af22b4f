//! Tunable constants for the diagnostics.
//!
//! Every threshold the diagnostics use lives here with a default that reproduces the standard
//! analysis. A [`Config`] can be built in code or parsed from TOML, where any missing table or
//! key falls back to its default:
//!
//! ```rust
//! use ifs_diagnostics::Config;
//!
//! let cfg = Config::from_toml_str(
//!     r#"
//!     [ssw]
//!     min_separation_days = 25
//!
//!     [polar_vortex]
//!     level = 1000.0
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(cfg.ssw.min_separation_days, 25);
//! assert_eq!(cfg.ssw.recovery_window_days, 30);
//! assert_eq!(cfg.polar_vortex.latitude, 60.0);
//! ```
use crate::error::{AnalysisError, Result};
use serde::Deserialize;

/// All of the configuration for a batch of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the polar vortex index.
    pub polar_vortex: PolarVortexConfig,
    /// Location of the QBO index.
    pub qbo: QboConfig,
    /// Level and bands for the maximum wind jet.
    pub jet: JetConfig,
    /// Pressure band and latitude windows for the mass weighted jets.
    pub mass_weighted_jet: MassWeightedJetConfig,
    /// Admissibility rules for SSW events.
    pub ssw: SswCriteria,
}

impl Config {
    /// Parse a configuration from a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the configuration for inconsistent values.
    pub fn validate(&self) -> Result<()> {
        self.jet.validate()?;
        self.mass_weighted_jet.validate()?;
        self.ssw.validate()
    }
}

/// Where the polar vortex index is sampled, nearest neighbor on the native grid.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolarVortexConfig {
    /// Latitude, degrees north.
    pub latitude: f64,
    /// Pressure level in the units of the source grid, 10 hPa for OpenIFS (Pa).
    pub level: f64,
}

impl Default for PolarVortexConfig {
    fn default() -> Self {
        PolarVortexConfig {
            latitude: 60.0,
            level: 1000.0,
        }
    }
}

/// Grid point used for the QBO index. Defaults to Singapore.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct QboConfig {
    /// Latitude, degrees north.
    pub latitude: f64,
    /// Longitude, degrees east.
    pub longitude: f64,
}

impl Default for QboConfig {
    fn default() -> Self {
        QboConfig {
            latitude: 1.29,
            longitude: 103.85,
        }
    }
}

/// Settings for the jet found from the wind maximum.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct JetConfig {
    /// Pressure level to search, native units (300 hPa in Pa).
    pub level: f64,
    /// Northern hemisphere jets are searched poleward of this latitude (exclusive).
    pub northern_min_latitude: f64,
    /// Southern hemisphere jets are searched poleward of this latitude (exclusive).
    pub southern_max_latitude: f64,
}

impl Default for JetConfig {
    fn default() -> Self {
        JetConfig {
            level: 30000.0,
            northern_min_latitude: 40.0,
            southern_max_latitude: -40.0,
        }
    }
}

impl JetConfig {
    fn validate(&self) -> Result<()> {
        if self.southern_max_latitude >= self.northern_min_latitude {
            return Err(AnalysisError::InvalidConfig(
                "jet hemispheric bands overlap".to_owned(),
            ));
        }
        Ok(())
    }
}

/// An open latitude interval, `south < lat < north`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LatitudeWindow {
    /// Southern edge, exclusive.
    pub south: f64,
    /// Northern edge, exclusive.
    pub north: f64,
}

impl LatitudeWindow {
    /// Is `lat` strictly inside the window?
    #[inline]
    pub fn contains(&self, lat: f64) -> bool {
        lat > self.south && lat < self.north
    }

    /// Do the two open intervals share any latitude?
    #[inline]
    pub fn overlaps(&self, other: &LatitudeWindow) -> bool {
        self.south < other.north && other.south < self.north
    }
}

/// Settings for the mass weighted jets of Archer & Caldeira (2008).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MassWeightedJetConfig {
    /// Lowest pressure kept, exclusive, native units.
    pub level_min: f64,
    /// Highest pressure kept, exclusive, native units.
    pub level_max: f64,
    /// Gravitational acceleration used for the mass proxy, m s-2.
    pub gravity: f64,
    /// Northern hemisphere jet.
    pub northern: LatitudeWindow,
    /// Southern hemisphere subtropical jet.
    pub southern_subtropical: LatitudeWindow,
    /// Southern hemisphere polar jet.
    pub southern_polar: LatitudeWindow,
}

impl Default for MassWeightedJetConfig {
    fn default() -> Self {
        MassWeightedJetConfig {
            level_min: 10000.0,
            level_max: 40000.0,
            gravity: 9.81,
            northern: LatitudeWindow {
                south: 15.0,
                north: 70.0,
            },
            southern_subtropical: LatitudeWindow {
                south: -40.0,
                north: -15.0,
            },
            southern_polar: LatitudeWindow {
                south: -70.0,
                north: -40.0,
            },
        }
    }
}

impl MassWeightedJetConfig {
    /// The three jet windows in output order: northern, southern subtropical, southern polar.
    pub fn windows(&self) -> [LatitudeWindow; 3] {
        [self.northern, self.southern_subtropical, self.southern_polar]
    }

    fn validate(&self) -> Result<()> {
        if !(self.level_min < self.level_max) {
            return Err(AnalysisError::InvalidConfig(
                "mass weighted jet pressure band is empty".to_owned(),
            ));
        }

        if !(self.gravity > 0.0) {
            return Err(AnalysisError::InvalidConfig(
                "gravity must be positive".to_owned(),
            ));
        }

        let windows = self.windows();
        if windows.iter().any(|w| !(w.south < w.north)) {
            return Err(AnalysisError::InvalidConfig(
                "latitude window has south >= north".to_owned(),
            ));
        }

        for (i, w) in windows.iter().enumerate() {
            if windows[i + 1..].iter().any(|other| w.overlaps(other)) {
                return Err(AnalysisError::InvalidConfig(
                    "mass weighted jet windows overlap".to_owned(),
                ));
            }
        }

        Ok(())
    }
}

/// Upper bound on the SSW day thresholds, ten years.
const MAX_SSW_DAYS: i64 = 3660;

/// Admissibility rules for Sudden Stratospheric Warming onsets.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SswCriteria {
    /// Calendar months searched for events. Samples in other months are treated as missing.
    pub months: Vec<u32>,
    /// Later onsets must come more than this many days after the previous accepted onset.
    pub min_separation_days: i64,
    /// The winds must return to westerly within this many days of onset, otherwise the event
    /// is a final warming.
    pub recovery_window_days: i64,
    /// Number of samples before a later onset that must all be westerly or out of season.
    pub quiet_samples: usize,
    /// Onsets in this month are discarded.
    pub excluded_onset_month: u32,
}

impl Default for SswCriteria {
    fn default() -> Self {
        SswCriteria {
            months: vec![11, 12, 1, 2, 3, 4],
            min_separation_days: 20,
            recovery_window_days: 30,
            quiet_samples: 11,
            excluded_onset_month: 4,
        }
    }
}

impl SswCriteria {
    fn validate(&self) -> Result<()> {
        if self.months.is_empty() || self.months.iter().any(|m| !(1..=12).contains(m)) {
            return Err(AnalysisError::InvalidConfig(
                "SSW months must be a non-empty list of months 1-12".to_owned(),
            ));
        }

        if self.min_separation_days < 0
            || self.recovery_window_days <= 0
            || self.min_separation_days > MAX_SSW_DAYS
            || self.recovery_window_days > MAX_SSW_DAYS
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "SSW day thresholds must be positive and at most {} days",
                MAX_SSW_DAYS
            )));
        }

        if !(1..=12).contains(&self.excluded_onset_month) {
            return Err(AnalysisError::InvalidConfig(
                "SSW excluded onset month must be 1-12".to_owned(),
            ));
        }

        Ok(())
    }
}
