use super::{Axis, Metadata};
use crate::{
    error::{AnalysisError, Result},
    season::Season,
};
use chrono::NaiveDateTime;

/// The values along one axis of a field.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordValues {
    /// Latitudes, longitudes or pressure levels, in the native units of the source grid.
    Numeric(Vec<f64>),
    /// Calendar timestamps.
    Time(Vec<NaiveDateTime>),
    /// Season labels left by a seasonal reduction.
    Season(Vec<Season>),
}

impl CoordValues {
    fn len(&self) -> usize {
        match self {
            CoordValues::Numeric(v) => v.len(),
            CoordValues::Time(v) => v.len(),
            CoordValues::Season(v) => v.len(),
        }
    }

    fn select(&self, indices: &[usize]) -> CoordValues {
        match self {
            CoordValues::Numeric(v) => {
                CoordValues::Numeric(indices.iter().map(|&i| v[i]).collect())
            }
            CoordValues::Time(v) => CoordValues::Time(indices.iter().map(|&i| v[i]).collect()),
            CoordValues::Season(v) => CoordValues::Season(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// A labelled axis: which axis it is, the values along it and its own metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
    axis: Axis,
    values: CoordValues,
    meta: Metadata,
}

impl Coordinate {
    /// A numeric coordinate, e.g. latitude.
    ///
    /// The metadata name defaults to the axis name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ifs_diagnostics::{Axis, Coordinate};
    ///
    /// let lat = Coordinate::numeric(Axis::Latitude, vec![-30.0, 0.0, 30.0]);
    /// assert_eq!(lat.len(), 3);
    /// assert_eq!(lat.metadata().name(), "lat");
    /// assert_eq!(lat.nearest_index(10.0).unwrap(), 1);
    /// ```
    pub fn numeric(axis: Axis, values: Vec<f64>) -> Self {
        Coordinate {
            axis,
            values: CoordValues::Numeric(values),
            meta: Metadata::new(axis.to_string()),
        }
    }

    /// A time coordinate.
    pub fn time(values: Vec<NaiveDateTime>) -> Self {
        Coordinate {
            axis: Axis::Time,
            values: CoordValues::Time(values),
            meta: Metadata::new(Axis::Time.to_string()),
        }
    }

    /// A season coordinate.
    pub fn seasons(values: Vec<Season>) -> Self {
        Coordinate {
            axis: Axis::Season,
            values: CoordValues::Season(values),
            meta: Metadata::new(Axis::Season.to_string()),
        }
    }

    /// Replace the metadata of this coordinate.
    #[inline]
    pub fn with_metadata(self, meta: Metadata) -> Self {
        Coordinate { meta, ..self }
    }

    /// Which axis this coordinate labels.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The coordinate values.
    #[inline]
    pub fn values(&self) -> &CoordValues {
        &self.values
    }

    /// The coordinate metadata.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// Number of points along the axis.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no points along the axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the values of a numeric coordinate.
    pub fn as_numeric(&self) -> Result<&[f64]> {
        match &self.values {
            CoordValues::Numeric(v) => Ok(v),
            _ => Err(AnalysisError::InvalidInput("coordinate is not numeric")),
        }
    }

    /// View the values of a time coordinate.
    pub fn as_times(&self) -> Result<&[NaiveDateTime]> {
        match &self.values {
            CoordValues::Time(v) => Ok(v),
            _ => Err(AnalysisError::InvalidInput("coordinate is not a time axis")),
        }
    }

    /// Index of the value nearest to `target`.
    ///
    /// Equally distant values resolve to the first one in native order. This is a nearest
    /// neighbor match, not an interpolation.
    pub fn nearest_index(&self, target: f64) -> Result<usize> {
        if target.is_nan() {
            return Err(AnalysisError::InvalidInput("nearest neighbor target is NaN"));
        }

        nearest(self.as_numeric()?, target)
            .ok_or(AnalysisError::InvalidInput("empty coordinate"))
    }

    pub(crate) fn select(&self, indices: &[usize]) -> Coordinate {
        Coordinate {
            axis: self.axis,
            values: self.values.select(indices),
            meta: self.meta.clone(),
        }
    }
}

/// Index of the value closest to `target`, the first one on ties. NaN values never match.
pub(crate) fn nearest(values: &[f64], target: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| {
            let dist = (v - target).abs();
            match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((i, dist)),
            }
        })
        .map(|(i, _)| i)
}
