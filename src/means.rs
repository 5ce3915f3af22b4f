//! Global, seasonal and zonal means.
//!
//! All of these propagate NaN; a missing value anywhere in a reduction makes the result missing.

use crate::{
    dataset::Dataset,
    error::{AnalysisError, Result},
    grid::{Axis, Coordinate, Field, Metadata},
    keys::{Variable, ZonalVariable},
    season::{days_in_month, Season},
};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// Area weighted mean over latitude and longitude.
///
/// Every latitude is weighted by the cosine of the latitude. Any other axes, e.g. time, are kept.
/// The result is named `glomean_<name>` and keeps the rest of the metadata.
pub fn global_mean(fld: &Field) -> Result<Field> {
    let weights: Vec<f64> = fld
        .coord(Axis::Latitude)?
        .as_numeric()?
        .iter()
        .map(|lat| lat.to_radians().cos())
        .collect();

    Ok(fld
        .weighted_mean(Axis::Latitude, &weights, &[Axis::Latitude, Axis::Longitude])?
        .renamed(format!("glomean_{}", fld.name())))
}

/// Global mean of a variable or one of the composites.
pub fn global_mean_of(ds: &Dataset, var: &Variable) -> Result<Field> {
    match var {
        Variable::TotalWind => {
            let u = global_mean(ds.variable("10u")?)?;
            let v = global_mean(ds.variable("10v")?)?;

            let name = "glomean_totalwind";
            Ok(u.zip_with(&v, f64::hypot)?
                .with_metadata(u.metadata().clone().with_name(name).with_long_name(name)))
        }
        Variable::ToaFluxes => flux_sum(ds, "tsr", &["ttr"], "TOA flux"),
        Variable::SurfaceHeatFluxes => {
            flux_sum(ds, "slhf", &["sshf", "ssr", "str"], "surface heat flux")
        }
        Variable::Raw(name) => global_mean(ds.variable(name)?),
    }
}

/// Sum of the global means of `first` and `rest`, with the metadata of `first`.
fn flux_sum(ds: &Dataset, first: &str, rest: &[&str], name: &str) -> Result<Field> {
    let mut sum = global_mean(ds.variable(first)?)?;
    for component in rest {
        sum = sum.zip_with(&global_mean(ds.variable(component)?)?, |a, b| a + b)?;
    }

    let meta = sum.metadata().clone().with_name(name).with_long_name(name);
    Ok(sum.with_metadata(meta))
}

/// Global mean cloud radiative forcing.
///
/// The forcing is `(ttrc - ttr) + (tsrc - tsr)`, the clear sky minus the all sky top of
/// atmosphere fluxes for the thermal and solar bands, averaged like [`global_mean`].
pub fn cloud_radiative_forcing(ds: &Dataset) -> Result<Field> {
    let ttrc = ds.variable("ttrc")?;
    let ttr = ds.variable("ttr")?;
    let tsrc = ds.variable("tsrc")?;
    let tsr = ds.variable("tsr")?;

    let longwave = ttrc.zip_with(ttr, |clear, all| clear - all)?;
    let shortwave = tsrc.zip_with(tsr, |clear, all| clear - all)?;
    let crf = shortwave.zip_with(&longwave, |sw, lw| sw + lw)?;

    Ok(global_mean(&crf)?.with_metadata(
        Metadata::new("glomean_crf")
            .with_long_name("CRF")
            .with_units("J m-2"),
    ))
}

/// Month length weighted seasonal mean.
///
/// The time axis is replaced by a `season` axis. Every time step is weighted by the number of
/// days in its month divided by the total number of days of all the steps in its season. The
/// seasons are ordered DJF, MAM, JJA, SON and seasons without any time step are left out.
pub fn seasonal_mean(fld: &Field) -> Result<Field> {
    let times = fld.coord(Axis::Time)?.as_times()?;

    let mut seasons = vec![];
    let mut groups: Vec<Vec<(usize, f64)>> = vec![];
    for season in Season::iter() {
        let members = times
            .iter()
            .enumerate()
            .filter(|(_, t)| Season::of(t) == season)
            .map(|(k, t)| (k, f64::from(days_in_month(t))))
            .collect_vec();

        if members.is_empty() {
            continue;
        }

        let total: f64 = members.iter().map(|&(_, days)| days).sum();
        groups.push(members.into_iter().map(|(k, days)| (k, days / total)).collect());
        seasons.push(season);
    }

    let coord = Coordinate::seasons(seasons);
    fld.weighted_group_sum(Axis::Time, &groups, coord)
}

/// Seasonal mean of a variable or of the total wind, named `seasmean_<variable>`.
///
/// The flux composites are only available as global means.
pub fn seasonal_mean_of(ds: &Dataset, var: &Variable) -> Result<Field> {
    match var {
        Variable::TotalWind => {
            let u = seasonal_mean(ds.variable("10u")?)?;
            let v = seasonal_mean(ds.variable("10v")?)?;

            let name = "seasmean_totalwind";
            Ok(u.zip_with(&v, f64::hypot)?
                .with_metadata(u.metadata().clone().with_name(name).with_long_name(name)))
        }
        Variable::Raw(name) => {
            let fld = ds.variable(name)?;
            Ok(seasonal_mean(fld)?.renamed(format!("seasmean_{}", name)))
        }
        Variable::ToaFluxes | Variable::SurfaceHeatFluxes => Err(
            AnalysisError::InvalidInput("flux composites only have global means"),
        ),
    }
}

/// Seasonal mean of the zonal mean of temperature or zonal wind.
///
/// Named `zonalmean_t` or `zonalmean_wind`.
pub fn zonal_mean(ds: &Dataset, var: ZonalVariable) -> Result<Field> {
    let fld = ds.variable(var.source())?;
    let zonal = fld.mean_over(Axis::Longitude)?;

    Ok(seasonal_mean(&zonal)?.renamed(format!("zonalmean_{}", var)))
}
