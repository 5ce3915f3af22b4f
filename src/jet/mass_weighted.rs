use crate::{
    config::{LatitudeWindow, MassWeightedJetConfig},
    dataset::Dataset,
    error::Result,
    grid::{Axis, Field, Metadata},
    wind::total_wind,
};

/// Position of one mass weighted jet and the wind speed there.
#[derive(Clone, Debug)]
pub struct JetCentroid {
    /// Mass flux weighted latitude, indexed by longitude and time.
    pub latitude: Field,
    /// Mass weighted wind speed at the grid latitude nearest to `latitude`.
    pub wind_speed: Field,
}

/// The mass weighted jet diagnostics.
#[derive(Clone, Debug)]
pub struct MassWeightedJets {
    /// Mass weighted average wind speed over the pressure band (lat, lon, time).
    pub wind_speed: Field,
    /// Mass flux weighted pressure (lat, lon, time).
    pub pressure: Field,
    /// Northern hemisphere jet.
    pub northern: JetCentroid,
    /// Southern hemisphere subtropical jet.
    pub southern_subtropical: JetCentroid,
    /// Southern hemisphere polar jet.
    pub southern_polar: JetCentroid,
}

/// Mass weighted jet position and strength, after Archer & Caldeira (2008).
///
/// Only pressure levels strictly between 100 and 400 hPa are used. Each level is given the mass
/// proxy `m = p / g`, and the total wind is integrated over the band weighted by `m`. The jet
/// latitude in each of three latitude windows is the centroid of that integrated wind,
/// `Σ(mwu * lat) / Σ mwu`, computed separately for every longitude and time.
///
/// No error is raised for missing data. A window without latitudes, a band without levels or a
/// missing value inside a window gives NaN for the affected jets.
pub fn mass_weighted_jet(ds: &Dataset, cfg: &MassWeightedJetConfig) -> Result<MassWeightedJets> {
    let u = ds.variable("u")?;
    let v = ds.variable("v")?;

    let uabs = total_wind(u, v)?
        .select_where(Axis::Level, |p| p > cfg.level_min && p < cfg.level_max)?;

    let level_coord = uabs.coord(Axis::Level)?;
    let levels = level_coord.as_numeric()?.to_vec();
    let mass: Vec<f64> = levels.iter().map(|p| p / cfg.gravity).collect();
    let total_mass: f64 = mass.iter().sum();

    // mass weighted wind, integrated over the band
    let mwu = uabs.scale_along(Axis::Level, &mass)?;
    let mwu_sum = mwu.sum_over(Axis::Level)?;

    let wind_speed = mwu_sum.map(|x| x / total_mass).with_metadata(
        u.metadata()
            .clone()
            .with_name("mw_avg_u_abs")
            .with_standard_name("mass_weighted_avg_u_abs")
            .with_long_name("mass weighted average wind speed"),
    );

    let pressure = mwu
        .scale_along(Axis::Level, &levels)?
        .sum_over(Axis::Level)?
        .zip_with(&mwu_sum, |mwp, mwu| mwp / mwu)?
        .with_metadata(
            level_coord
                .metadata()
                .clone()
                .with_name("mw_pres")
                .with_long_name("mass flux weighted pressure"),
        );

    let lat_meta = mwu_sum.coord(Axis::Latitude)?.metadata().clone();
    let centroid = |window: LatitudeWindow, lat_name: &str, ws_name: &str| {
        jet_centroid(
            &mwu_sum,
            &wind_speed,
            window,
            lat_meta.clone().with_name(lat_name),
            ws_name,
        )
    };

    Ok(MassWeightedJets {
        northern: centroid(cfg.northern, "mw_jet_nh", "nh_jet_u")?,
        southern_subtropical: centroid(cfg.southern_subtropical, "mw_jet_sht", "sht_jet_u")?,
        southern_polar: centroid(cfg.southern_polar, "mw_jet_shp", "shp_jet_u")?,
        wind_speed,
        pressure,
    })
}

fn jet_centroid(
    mwu_sum: &Field,
    wind_speed: &Field,
    window: LatitudeWindow,
    lat_meta: Metadata,
    ws_name: &str,
) -> Result<JetCentroid> {
    let inside = mwu_sum.select_where(Axis::Latitude, |lat| window.contains(lat))?;
    let lats = inside.coord(Axis::Latitude)?.as_numeric()?.to_vec();

    let weighted = inside.scale_along(Axis::Latitude, &lats)?.sum_over(Axis::Latitude)?;
    let weight = inside.sum_over(Axis::Latitude)?;

    let latitude = weighted
        .zip_with(&weight, |mwl, mwu| mwl / mwu)?
        .with_metadata(lat_meta);

    let wind_speed = wind_speed
        .sample_nearest(Axis::Latitude, &latitude)?
        .renamed(ws_name);

    Ok(JetCentroid {
        latitude,
        wind_speed,
    })
}
