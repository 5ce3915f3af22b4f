//! Synthetic model output built through the public API.
#![allow(dead_code)] // Not every test file uses every helper.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use ifs_diagnostics::{Axis, Coordinate, Dataset, Field, Metadata};
use ndarray::{ArrayD, IxDyn};

pub fn approx_equal(left: f64, right: f64, eps: f64) -> bool {
    (left - right).abs() < eps
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn daily_times(start: NaiveDateTime, days: usize) -> Vec<NaiveDateTime> {
    (0..days as i64).map(|d| start + Duration::days(d)).collect()
}

/// Mid-month time stamps for `months` months starting in January of `year`.
pub fn monthly_times(year: i32, months: usize) -> Vec<NaiveDateTime> {
    (0..months)
        .map(|i| date(year + (i / 12) as i32, (i % 12) as u32 + 1, 15))
        .collect()
}

fn time_coord(times: &[NaiveDateTime]) -> Coordinate {
    Coordinate::time(times.to_vec())
        .with_metadata(Metadata::new("time_counter").with_standard_name("time"))
}

fn lat_coord(lats: &[f64]) -> Coordinate {
    Coordinate::numeric(Axis::Latitude, lats.to_vec()).with_metadata(
        Metadata::new("lat")
            .with_units("degrees_north")
            .with_long_name("latitude"),
    )
}

/// A (lat, lon, time) surface field, `f` gets the (lat, lon, time) indexes.
pub fn surface_field<F>(
    name: &str,
    units: &str,
    lats: &[f64],
    lons: &[f64],
    times: &[NaiveDateTime],
    f: F,
) -> Field
where
    F: Fn(usize, usize, usize) -> f64,
{
    let shape = [lats.len(), lons.len(), times.len()];
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |ix| f(ix[0], ix[1], ix[2]));

    Field::new(
        Metadata::new(name).with_units(units),
        vec![
            lat_coord(lats),
            Coordinate::numeric(Axis::Longitude, lons.to_vec()),
            time_coord(times),
        ],
        data,
    )
    .unwrap()
}

/// A (lat, lon, pressure_levels, time) field, `f` gets the (lat, lon, level, time) indexes.
pub fn pressure_level_field<F>(
    name: &str,
    lats: &[f64],
    lons: &[f64],
    levels: &[f64],
    times: &[NaiveDateTime],
    f: F,
) -> Field
where
    F: Fn(usize, usize, usize, usize) -> f64,
{
    let shape = [lats.len(), lons.len(), levels.len(), times.len()];
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |ix| f(ix[0], ix[1], ix[2], ix[3]));

    Field::new(
        Metadata::new(name)
            .with_units("m s**-1")
            .with_standard_name(if name == "u" {
                "eastward_wind"
            } else {
                "northward_wind"
            }),
        vec![
            lat_coord(lats),
            Coordinate::numeric(Axis::Longitude, lons.to_vec()),
            Coordinate::numeric(Axis::Level, levels.to_vec())
                .with_metadata(Metadata::new("pressure_levels").with_units("Pa")),
            time_coord(times),
        ],
        data,
    )
    .unwrap()
}

/// A zonal wind whose value at 60N and 10 hPa is `pv(time)` at every longitude.
///
/// Elsewhere the wind is a steady 15 m/s westerly.
pub fn polar_vortex_dataset<F>(times: &[NaiveDateTime], pv: F) -> Dataset
where
    F: Fn(NaiveDateTime) -> f64,
{
    let lats = [50.0, 60.0, 70.0];
    let levels = [1000.0, 5000.0, 30000.0];

    let u = pressure_level_field("u", &lats, &[0.0, 120.0, 240.0], &levels, times, |i, _, k, t| {
        if i == 1 && k == 0 {
            pv(times[t])
        } else {
            15.0
        }
    });

    Dataset::new().with_variable(u)
}

/// Daily polar vortex values: 10 m/s westerly except for easterly runs given as (first day,
/// number of days).
pub fn westerly_except(runs: &[(NaiveDateTime, i64)]) -> impl Fn(NaiveDateTime) -> f64 + '_ {
    move |t| {
        let easterly = runs
            .iter()
            .any(|&(first, n)| t >= first && t < first + Duration::days(n));
        if easterly {
            -5.0
        } else {
            10.0
        }
    }
}
