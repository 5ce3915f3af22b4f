use chrono::{Duration, NaiveDate, NaiveDateTime};
use ifs_diagnostics::{Axis, Coordinate, Dataset, Field, Metadata};
use ndarray::{ArrayD, IxDyn};

const LEVELS: [f64; 8] = [
    1000.0, 5000.0, 10000.0, 20000.0, 25000.0, 30000.0, 50000.0, 85000.0,
];

/// Times for a daily record covering a few winters.
#[allow(dead_code)]
pub fn daily_times(days: usize) -> Vec<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date");

    (0..days as i64).map(|d| start + Duration::days(d)).collect()
}

/// Mid-month times.
#[allow(dead_code)]
pub fn monthly_times(months: usize) -> Vec<NaiveDateTime> {
    (0..months)
        .map(|i| {
            NaiveDate::from_ymd_opt(2000 + (i / 12) as i32, (i % 12) as u32 + 1, 15)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid date")
        })
        .collect()
}

fn coords(nlat: usize, nlon: usize) -> (Coordinate, Coordinate) {
    let dlat = 180.0 / (nlat - 1) as f64;
    let dlon = 360.0 / nlon as f64;

    let lats = (0..nlat).map(|i| 90.0 - i as f64 * dlat).collect();
    let lons = (0..nlon).map(|j| j as f64 * dlon).collect();

    (
        Coordinate::numeric(Axis::Latitude, lats),
        Coordinate::numeric(Axis::Longitude, lons),
    )
}

/// Zonal and meridional wind on a regular (lat, lon, pressure_levels, time_counter) grid.
///
/// The zonal wind has a jet near 40 degrees in both hemispheres and a polar vortex that
/// reverses about every 61 days.
#[allow(dead_code)]
pub fn wind_dataset(nlat: usize, nlon: usize, times: &[NaiveDateTime]) -> Dataset {
    let (lat, lon) = coords(nlat, nlon);
    let lat_vals = lat.as_numeric().expect("numeric").to_vec();

    let shape = [nlat, nlon, LEVELS.len(), times.len()];
    let u = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        let phi = lat_vals[ix[0]];
        let jet = 40.0 * (-((phi.abs() - 40.0) / 12.0).powi(2)).exp();
        let vortex = if phi > 55.0 && LEVELS[ix[2]] < 2000.0 {
            30.0 * (2.0 * std::f64::consts::PI * ix[3] as f64 / 61.0).cos()
        } else {
            0.0
        };
        jet + vortex + (ix[1] % 7) as f64
    });
    let v = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        ((ix[0] + ix[1] + ix[3]) % 5) as f64 - 2.0
    });

    let axes = vec![
        lat,
        lon,
        Coordinate::numeric(Axis::Level, LEVELS.to_vec()),
        Coordinate::time(times.to_vec()),
    ];

    Dataset::new()
        .with_variable(
            Field::new(Metadata::new("u").with_units("m s**-1"), axes.clone(), u)
                .expect("valid grid"),
        )
        .with_variable(
            Field::new(Metadata::new("v").with_units("m s**-1"), axes, v).expect("valid grid"),
        )
}

/// Surface fields on a regular (lat, lon, time_counter) grid.
#[allow(dead_code)]
pub fn surface_dataset(nlat: usize, nlon: usize, times: &[NaiveDateTime]) -> Dataset {
    let (lat, lon) = coords(nlat, nlon);
    let axes = vec![lat, lon, Coordinate::time(times.to_vec())];
    let shape = [nlat, nlon, times.len()];

    ["2t", "10u", "10v", "tsr", "ttr", "tsrc", "ttrc"]
        .iter()
        .enumerate()
        .fold(Dataset::new(), |ds, (n, name)| {
            let data = ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
                (n * 10 + (ix[0] * 3 + ix[1] + ix[2]) % 17) as f64
            });
            ds.with_variable(
                Field::new(Metadata::new(*name), axes.clone(), data).expect("valid grid"),
            )
        })
}
