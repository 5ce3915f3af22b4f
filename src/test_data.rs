//! Synthetic grids used in tests.

use crate::{
    dataset::Dataset,
    grid::{Axis, Coordinate, Field, Metadata},
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use ndarray::{ArrayD, IxDyn};

pub(crate) fn daily_times(year: i32, month: u32, day: u32, n: usize) -> Vec<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..n).map(|i| start + Duration::days(i as i64)).collect()
}

pub(crate) fn monthly_times(year: i32, n: usize) -> Vec<NaiveDateTime> {
    (0..n)
        .map(|i| {
            let month = (i % 12) as u32 + 1;
            let year = year + (i / 12) as i32;
            NaiveDate::from_ymd_opt(year, month, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        })
        .collect()
}

pub(crate) fn field_1d(axis: Axis, coords: &[f64], values: &[f64]) -> Field {
    let data = ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec()).unwrap();
    Field::new(
        Metadata::new("test"),
        vec![Coordinate::numeric(axis, coords.to_vec())],
        data,
    )
    .unwrap()
}

pub(crate) fn time_series(times: &[NaiveDateTime], values: &[f64]) -> Field {
    let data = ArrayD::from_shape_vec(IxDyn(&[values.len()]), values.to_vec()).unwrap();
    Field::new(
        Metadata::new("u_polar_vortex").with_units("m s**-1"),
        vec![Coordinate::time(times.to_vec())
            .with_metadata(Metadata::new("time_counter").with_standard_name("time"))],
        data,
    )
    .unwrap()
}

pub(crate) fn lat_lon_field<F>(lats: &[f64], lons: &[f64], f: F) -> Field
where
    F: Fn(usize, usize) -> f64,
{
    let data = ArrayD::from_shape_fn(IxDyn(&[lats.len(), lons.len()]), |ix| f(ix[0], ix[1]));
    Field::new(
        Metadata::new("test"),
        vec![
            Coordinate::numeric(Axis::Latitude, lats.to_vec()),
            Coordinate::numeric(Axis::Longitude, lons.to_vec()),
        ],
        data,
    )
    .unwrap()
}

/// Coordinates for a (lat, lon, pressure_levels, time_counter) grid.
pub(crate) struct Grid4 {
    lats: Vec<f64>,
    lons: Vec<f64>,
    levels: Vec<f64>,
    times: Vec<NaiveDateTime>,
}

impl Grid4 {
    /// Build a field, `f` gets the (lat, lon, level, time) indexes.
    pub(crate) fn field<F>(&self, name: &str, f: F) -> Field
    where
        F: Fn(usize, usize, usize, usize) -> f64,
    {
        let shape = [
            self.lats.len(),
            self.lons.len(),
            self.levels.len(),
            self.times.len(),
        ];
        let data = ArrayD::from_shape_fn(IxDyn(&shape), |ix| f(ix[0], ix[1], ix[2], ix[3]));

        Field::new(
            Metadata::new(name).with_units("m s**-1"),
            vec![
                Coordinate::numeric(Axis::Latitude, self.lats.clone()).with_metadata(
                    Metadata::new("lat")
                        .with_units("degrees_north")
                        .with_long_name("latitude"),
                ),
                Coordinate::numeric(Axis::Longitude, self.lons.clone()),
                Coordinate::numeric(Axis::Level, self.levels.clone())
                    .with_metadata(Metadata::new("pressure_levels").with_units("Pa")),
                Coordinate::time(self.times.clone()),
            ],
            data,
        )
        .unwrap()
    }
}

pub(crate) fn pressure_level_grid(
    lats: &[f64],
    lons: &[f64],
    levels: &[f64],
    times: &[NaiveDateTime],
) -> Grid4 {
    Grid4 {
        lats: lats.to_vec(),
        lons: lons.to_vec(),
        levels: levels.to_vec(),
        times: times.to_vec(),
    }
}

/// A dataset holding only a zonal wind `u` built from `f`.
pub(crate) fn pressure_level_dataset<F>(
    lats: &[f64],
    lons: &[f64],
    levels: &[f64],
    times: &[NaiveDateTime],
    f: F,
) -> Dataset
where
    F: Fn(usize, usize, usize, usize) -> f64,
{
    let grid = pressure_level_grid(lats, lons, levels, times);
    Dataset::new().with_variable(grid.field("u", f))
}
