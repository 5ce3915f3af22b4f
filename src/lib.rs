#![warn(missing_docs)]
//! Diagnostics for post-processing OpenIFS climate model output.
//!
//! Model output is handed over as a [`Dataset`] of labelled [`Field`]s. The diagnostics are
//! global, seasonal and zonal means, global mean cloud radiative forcing, the polar vortex and
//! QBO indices, jet position and strength (from the wind maximum or mass weighted after Archer
//! & Caldeira, 2008) and Sudden Stratospheric Warming central dates.
//!
//! Each diagnostic is available as a plain function, or a batch can be requested by name:
//!
//! ```rust
//! use ifs_diagnostics::{analyze_tokens, Config, Dataset};
//!
//! let cfg = Config::from_toml_str("[ssw]\nmin_separation_days = 25").unwrap();
//! let results = analyze_tokens(&["SSW", "mw_jet"], &Dataset::new(), &cfg);
//!
//! // Without a zonal wind there is nothing to analyze.
//! assert!(results.is_err());
//! ```
//!
//! Missing data are NaN in fields and propagate through every calculation. The library does
//! not read or write files and does not install a logger; progress is reported through the
//! `log` facade.

//
// API
//
pub use crate::analysis::{analyze, analyze_tokens, Product, Results};
pub use crate::config::{
    Config, JetConfig, LatitudeWindow, MassWeightedJetConfig, PolarVortexConfig, QboConfig,
    SswCriteria,
};
pub use crate::dataset::Dataset;
pub use crate::error::{AnalysisError, Result};
pub use crate::grid::{Axis, CoordValues, Coordinate, Field, Metadata};
pub use crate::jet::{
    jet_position_and_strength, mass_weighted_jet, JetCentroid, MassWeightedJets, MaxWindJets,
};
pub use crate::keys::{Diagnostic, DiagnosticKind, Variable, ZonalVariable};
pub use crate::means::{
    cloud_radiative_forcing, global_mean, global_mean_of, seasonal_mean, seasonal_mean_of,
    zonal_mean,
};
pub use crate::season::{days_in_month, Season};
pub use crate::ssw::{
    detect_ssw, ssw_analysis, ssw_central_dates, EventSeries, WindSeries,
};
pub use crate::wind::{polar_vortex, qbo, total_wind};

//
// Internal use only
//

// Modules
mod analysis;
mod config;
mod dataset;
mod error;
mod grid;
mod jet;
mod keys;
mod means;
mod season;
mod ssw;
#[cfg(test)]
mod test_data;
mod wind;
