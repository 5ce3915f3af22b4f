//! Position and strength of the tropospheric jets.
//!
//! Two methods are available. [`jet_position_and_strength`] takes the latitude of the total wind
//! maximum at 300 hPa in each hemisphere. [`mass_weighted_jet`] follows Archer & Caldeira (2008)
//! and weights every latitude by its mass flux for a smoother estimate.

use crate::{
    config::JetConfig,
    dataset::Dataset,
    error::Result,
    grid::{Axis, Field},
    wind::total_wind,
};

pub use self::mass_weighted::{mass_weighted_jet, JetCentroid, MassWeightedJets};

mod mass_weighted;

/// Jet position and strength from the wind maximum, per hemisphere.
///
/// All fields are indexed by longitude and time.
#[derive(Clone, Debug)]
pub struct MaxWindJets {
    /// Latitude of the northern hemisphere wind maximum.
    pub northern_position: Field,
    /// Total wind at the northern hemisphere maximum.
    pub northern_strength: Field,
    /// Latitude of the southern hemisphere wind maximum.
    pub southern_position: Field,
    /// Total wind at the southern hemisphere maximum.
    pub southern_strength: Field,
}

/// Find the tropospheric jets as the total wind maximum at 300 hPa.
///
/// The northern hemisphere is searched poleward of 40°N and the southern hemisphere poleward of
/// 40°S. Missing values are skipped; where a hemisphere has no valid value the position and
/// strength are NaN. If the maximum is shared by several latitudes the first one in the native
/// order of the latitude coordinate is reported.
pub fn jet_position_and_strength(ds: &Dataset, cfg: &JetConfig) -> Result<MaxWindJets> {
    let u = ds.variable("u")?;
    let v = ds.variable("v")?;

    let wind = total_wind(u, v)?.sel_nearest(Axis::Level, cfg.level)?;

    let north = wind.select_where(Axis::Latitude, |lat| lat > cfg.northern_min_latitude)?;
    let south = wind.select_where(Axis::Latitude, |lat| lat < cfg.southern_max_latitude)?;

    let (north_pos, north_max) = north.argmax_over(Axis::Latitude)?;
    let (south_pos, south_max) = south.argmax_over(Axis::Latitude)?;

    let position_meta = u.metadata().clone().with_units("degrees_north");
    let strength_meta = u
        .metadata()
        .clone()
        .with_standard_name("total wind")
        .with_long_name("total wind");

    Ok(MaxWindJets {
        northern_position: north_pos.with_metadata(position_meta.clone().with_name("jet_nh")),
        northern_strength: north_max.with_metadata(strength_meta.clone().with_name("jet_nh_val")),
        southern_position: south_pos.with_metadata(position_meta.with_name("jet_sh")),
        southern_strength: south_max.with_metadata(strength_meta.with_name("jet_sh_val")),
    })
}
