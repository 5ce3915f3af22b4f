//! Wind based indexes: total wind, the polar vortex index and the QBO index.
use crate::{
    config::{PolarVortexConfig, QboConfig},
    dataset::Dataset,
    error::Result,
    grid::{Axis, Field},
};
use metfor::{MetersPSec, Quantity, WindSpdDir, WindUV};

/// Total wind speed, `sqrt(u² + v²)`, from the wind components.
///
/// The result carries the metadata of `u`. The components must be on the same grid.
pub fn total_wind(u: &Field, v: &Field) -> Result<Field> {
    u.zip_with(v, |u, v| {
        let WindSpdDir { speed, .. }: WindSpdDir<MetersPSec> = WindSpdDir::from(WindUV {
            u: MetersPSec(u),
            v: MetersPSec(v),
        });
        speed.unpack()
    })
}

/// The polar vortex index.
///
/// Zonal wind at the grid point nearest to 60°N and 10 hPa, averaged over longitude. The result
/// is a time series in the units of `u`.
pub fn polar_vortex(ds: &Dataset, cfg: &PolarVortexConfig) -> Result<Field> {
    let u = ds.variable("u")?;

    let u_mean = u
        .sel_nearest(Axis::Latitude, cfg.latitude)?
        .sel_nearest(Axis::Level, cfg.level)?
        .mean_over(Axis::Longitude)?;

    let meta = u
        .metadata()
        .clone()
        .with_name("u_polar_vortex")
        .with_long_name("zonal wind polar vortex index");

    Ok(u_mean.with_metadata(meta))
}

/// The Quasi-Biennial Oscillation index.
///
/// Zonal wind at the grid point closest to Singapore at every pressure level and time.
pub fn qbo(ds: &Dataset, cfg: &QboConfig) -> Result<Field> {
    let u = ds.variable("u")?;

    let u_point = u
        .sel_nearest(Axis::Latitude, cfg.latitude)?
        .sel_nearest(Axis::Longitude, cfg.longitude)?;

    let meta = u.metadata().clone().with_name("u_Singapore");

    Ok(u_point.with_metadata(meta))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::AnalysisError,
        test_data::{daily_times, pressure_level_dataset, pressure_level_grid},
    };

    #[test]
    fn test_total_wind() {
        let grid = pressure_level_grid(&[30.0], &[0.0], &[30000.0], &daily_times(2000, 1, 1, 1));
        let u = grid.field("u", |_, _, _, _| 3.0);
        let v = grid.field("v", |_, _, _, _| -4.0);

        let wind = total_wind(&u, &v).unwrap();
        assert!((wind.data()[[0, 0, 0, 0]] - 5.0).abs() < 1.0e-12);
        assert_eq!(wind.name(), "u");

        let nan_u = grid.field("u", |_, _, _, _| std::f64::NAN);
        assert!(total_wind(&nan_u, &v).unwrap().data()[[0, 0, 0, 0]].is_nan());
    }

    #[test]
    fn test_polar_vortex_selects_nearest_point() {
        let lats = [50.0, 59.0, 70.0];
        let lons = [0.0, 120.0, 240.0];
        let levels = [500.0, 1200.0, 5000.0];
        let times = daily_times(2000, 1, 1, 3);

        // u = level index + 10 * lat index + 100 * lon index + time index
        let ds = pressure_level_dataset(&lats, &lons, &levels, &times, |i, j, k, t| {
            (k + 10 * i + 100 * j + t) as f64
        });

        let pv = polar_vortex(&ds, &PolarVortexConfig::default()).unwrap();
        assert_eq!(pv.axes(), vec![Axis::Time]);
        assert_eq!(pv.name(), "u_polar_vortex");
        assert_eq!(pv.metadata().long_name(), Some("zonal wind polar vortex index"));
        assert_eq!(pv.metadata().units(), Some("m s**-1"));

        // lat 59 -> index 1, level 1200 -> index 1, mean of lon index 0,1,2 -> 100
        for t in 0..3 {
            assert!((pv.data()[[t]] - (1.0 + 10.0 + 100.0 + t as f64)).abs() < 1.0e-12);
        }
    }

    #[test]
    fn test_polar_vortex_missing_axis() {
        let ds = Dataset::new().with_variable(crate::test_data::field_1d(
            Axis::Latitude,
            &[60.0],
            &[1.0],
        ).renamed("u"));

        assert_eq!(
            polar_vortex(&ds, &PolarVortexConfig::default()).unwrap_err(),
            AnalysisError::MissingAxis(Axis::Level)
        );
    }

    #[test]
    fn test_qbo() {
        let ds = pressure_level_dataset(
            &[-10.0, 0.0, 10.0],
            &[0.0, 100.0, 200.0],
            &[1000.0, 5000.0],
            &daily_times(2000, 1, 1, 2),
            |i, j, _, _| (10 * i + j) as f64,
        );

        let q = qbo(&ds, &QboConfig::default()).unwrap();
        assert_eq!(q.axes(), vec![Axis::Level, Axis::Time]);
        assert_eq!(q.name(), "u_Singapore");
        assert!(q.data().iter().all(|&v| (v - 11.0).abs() < 1.0e-12));
    }
}
