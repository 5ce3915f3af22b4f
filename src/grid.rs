//! Labelled gridded fields.
//!
//! A [`Field`] is an `ndarray` array of `f64` values where every array axis is tagged with an
//! [`Axis`] and carries a [`Coordinate`]. Missing data are NaN and propagate through all of the
//! arithmetic and reductions here. Every operation returns a new field; inputs are never
//! modified.

use crate::error::{AnalysisError, Result};
use ndarray::{ArrayD, Axis as ArrayAxis, IxDyn, Zip};
use strum_macros::{Display, EnumIter, EnumString};

pub use self::{
    coordinate::{CoordValues, Coordinate},
    metadata::Metadata,
};

mod coordinate;
mod metadata;

pub(crate) use self::coordinate::nearest;

/// The named axes a field may be indexed by.
///
/// The string forms are the dimension names used by OpenIFS output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Axis {
    /// Latitude in degrees north.
    #[strum(serialize = "lat")]
    Latitude,
    /// Longitude in degrees east.
    #[strum(serialize = "lon")]
    Longitude,
    /// Pressure level, in the units of the source grid (Pa for OpenIFS).
    #[strum(serialize = "pressure_levels")]
    Level,
    /// Time.
    #[strum(serialize = "time_counter")]
    Time,
    /// Season, only present after a seasonal reduction.
    #[strum(serialize = "season")]
    Season,
}

/// A labelled n-dimensional field.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    meta: Metadata,
    coords: Vec<Coordinate>,
    data: ArrayD<f64>,
}

impl Field {
    /// Create a new field, checking that the coordinates describe the data.
    ///
    /// There must be exactly one coordinate per array axis, with matching lengths, and no axis
    /// may appear twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ifs_diagnostics::{Axis, Coordinate, Field, Metadata};
    /// use ndarray::ArrayD;
    ///
    /// let lat = Coordinate::numeric(Axis::Latitude, vec![-45.0, 45.0]);
    /// let data = ArrayD::from_shape_vec(vec![2], vec![1.0, 2.0]).unwrap();
    /// let fld = Field::new(Metadata::new("t"), vec![lat], data).unwrap();
    /// assert_eq!(fld.shape(), &[2]);
    ///
    /// let bad = ArrayD::from_shape_vec(vec![3], vec![1.0, 2.0, 3.0]).unwrap();
    /// let lat = Coordinate::numeric(Axis::Latitude, vec![-45.0, 45.0]);
    /// assert!(Field::new(Metadata::new("t"), vec![lat], bad).is_err());
    /// ```
    pub fn new(meta: Metadata, coords: Vec<Coordinate>, data: ArrayD<f64>) -> Result<Self> {
        if coords.len() != data.ndim() {
            return Err(AnalysisError::ShapeMismatch);
        }

        if coords.iter().zip(data.shape()).any(|(c, &n)| c.len() != n) {
            return Err(AnalysisError::ShapeMismatch);
        }

        for (i, c) in coords.iter().enumerate() {
            if coords[..i].iter().any(|other| other.axis() == c.axis()) {
                return Err(AnalysisError::InvalidInput("duplicate axis"));
            }
        }

        Ok(Field { meta, coords, data })
    }

    /// A field without any axes.
    pub fn scalar(meta: Metadata, value: f64) -> Self {
        Field {
            meta,
            coords: vec![],
            data: ArrayD::from_elem(IxDyn(&[]), value),
        }
    }

    /// The metadata of this field.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// The variable name.
    #[inline]
    pub fn name(&self) -> &str {
        self.meta.name()
    }

    /// The coordinates, one per array axis in array order.
    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// The raw values.
    #[inline]
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// The array shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// The axes of this field in array order.
    pub fn axes(&self) -> Vec<Axis> {
        self.coords.iter().map(Coordinate::axis).collect()
    }

    /// Does this field have the given axis?
    #[inline]
    pub fn has_axis(&self, axis: Axis) -> bool {
        self.coords.iter().any(|c| c.axis() == axis)
    }

    /// Position of `axis` in the array.
    pub fn axis_index(&self, axis: Axis) -> Result<usize> {
        self.coords
            .iter()
            .position(|c| c.axis() == axis)
            .ok_or(AnalysisError::MissingAxis(axis))
    }

    /// The coordinate for `axis`.
    pub fn coord(&self, axis: Axis) -> Result<&Coordinate> {
        self.axis_index(axis).map(|i| &self.coords[i])
    }

    /// Get the value at an index given in array order.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Replace the metadata.
    #[inline]
    pub fn with_metadata(self, meta: Metadata) -> Self {
        Field { meta, ..self }
    }

    /// Replace only the name.
    #[inline]
    pub fn renamed<S: Into<String>>(self, name: S) -> Self {
        let meta = self.meta.clone().with_name(name);
        Field { meta, ..self }
    }

    /// Apply `f` to every value.
    pub fn map<F>(&self, f: F) -> Field
    where
        F: Fn(f64) -> f64,
    {
        Field {
            meta: self.meta.clone(),
            coords: self.coords.clone(),
            data: self.data.mapv(f),
        }
    }

    /// Combine two fields on the same grid value by value. The metadata is taken from `self`.
    pub fn zip_with<F>(&self, other: &Field, f: F) -> Result<Field>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.axes() != other.axes() || self.shape() != other.shape() {
            return Err(AnalysisError::AxisMismatch);
        }

        let data = Zip::from(&self.data)
            .and(&other.data)
            .map_collect(|&a, &b| f(a, b));

        Ok(Field {
            meta: self.meta.clone(),
            coords: self.coords.clone(),
            data,
        })
    }

    /// Select the entry nearest to `target` along a numeric axis. The axis is removed.
    pub fn sel_nearest(&self, axis: Axis, target: f64) -> Result<Field> {
        let i = self.axis_index(axis)?;
        let idx = self.coords[i].nearest_index(target)?;

        Ok(self.without_axis(i, self.data.index_axis(ArrayAxis(i), idx).to_owned()))
    }

    /// Keep only the entries along a numeric axis whose coordinate satisfies `keep`.
    ///
    /// Entries that fail are dropped, so the axis may become empty.
    pub fn select_where<F>(&self, axis: Axis, keep: F) -> Result<Field>
    where
        F: Fn(f64) -> bool,
    {
        let i = self.axis_index(axis)?;
        let indices: Vec<usize> = self.coords[i]
            .as_numeric()?
            .iter()
            .enumerate()
            .filter(|&(_, &v)| keep(v))
            .map(|(k, _)| k)
            .collect();

        let mut coords = self.coords.clone();
        coords[i] = self.coords[i].select(&indices);

        Ok(Field {
            meta: self.meta.clone(),
            coords,
            data: self.data.select(ArrayAxis(i), &indices),
        })
    }

    /// Sum along an axis. NaN propagates; an empty axis sums to zero.
    pub fn sum_over(&self, axis: Axis) -> Result<Field> {
        let i = self.axis_index(axis)?;
        Ok(self.without_axis(i, self.data.sum_axis(ArrayAxis(i))))
    }

    /// Arithmetic mean along an axis. NaN propagates; an empty axis gives NaN.
    pub fn mean_over(&self, axis: Axis) -> Result<Field> {
        let i = self.axis_index(axis)?;
        let data = self
            .data
            .mean_axis(ArrayAxis(i))
            .unwrap_or_else(|| self.data.sum_axis(ArrayAxis(i)).mapv(|_| std::f64::NAN));

        Ok(self.without_axis(i, data))
    }

    /// Multiply every slice along `axis` by the matching factor.
    pub fn scale_along(&self, axis: Axis, factors: &[f64]) -> Result<Field> {
        let i = self.axis_index(axis)?;
        if factors.len() != self.shape()[i] {
            return Err(AnalysisError::ShapeMismatch);
        }

        let mut data = self.data.clone();
        for (mut lane, &factor) in data.axis_iter_mut(ArrayAxis(i)).zip(factors) {
            lane.mapv_inplace(|v| v * factor);
        }

        Ok(Field {
            meta: self.meta.clone(),
            coords: self.coords.clone(),
            data,
        })
    }

    /// Weighted mean over the axes in `over`, with weights that vary along `weight_axis` only.
    ///
    /// `weight_axis` must be one of the axes in `over`. The normalization is the sum of the
    /// weights broadcast over all reduced axes, so this matches a mean over an area where every
    /// point on the same `weight_axis` coordinate has the same weight.
    pub fn weighted_mean(
        &self,
        weight_axis: Axis,
        weights: &[f64],
        over: &[Axis],
    ) -> Result<Field> {
        if !over.contains(&weight_axis) {
            return Err(AnalysisError::InvalidInput("weights must vary along a reduced axis"));
        }

        let mut numerator = self.scale_along(weight_axis, weights)?;
        let mut points = 1usize;
        for &axis in over {
            if axis != weight_axis {
                points *= self.coord(axis)?.len();
            }
            numerator = numerator.sum_over(axis)?;
        }

        let denominator = weights.iter().sum::<f64>() * points as f64;
        Ok(numerator.map(|v| v / denominator))
    }

    /// For every lane along `axis`, the coordinate value of the largest value and the largest
    /// value itself, returned as `(position, maximum)`.
    ///
    /// NaN values are skipped. A lane with no valid values gives NaN for both. When several
    /// values tie for the maximum, the first one in the native order of the axis wins.
    pub fn argmax_over(&self, axis: Axis) -> Result<(Field, Field)> {
        let i = self.axis_index(axis)?;
        let coord = self.coords[i].as_numeric()?;

        let pairs = self.data.map_axis(ArrayAxis(i), |lane| {
            lane.iter()
                .enumerate()
                .filter(|(_, v)| !v.is_nan())
                .fold(None, |best: Option<(usize, f64)>, (k, &v)| match best {
                    Some((_, best_v)) if best_v >= v => best,
                    _ => Some((k, v)),
                })
                .map(|(k, v)| (coord[k], v))
                .unwrap_or((std::f64::NAN, std::f64::NAN))
        });

        let positions = self.without_axis(i, pairs.mapv(|(p, _)| p));
        let maxima = self.without_axis(i, pairs.mapv(|(_, m)| m));

        Ok((positions, maxima))
    }

    /// Sample along `axis` at the coordinate nearest to each value of `targets`.
    ///
    /// `targets` must have exactly the axes of `self` with `axis` removed, in the same order. The
    /// lookup is done point by point. A NaN target gives a NaN sample.
    pub fn sample_nearest(&self, axis: Axis, targets: &Field) -> Result<Field> {
        let i = self.axis_index(axis)?;
        let coord = self.coords[i].as_numeric()?;

        let mut remaining = self.axes();
        remaining.remove(i);
        if remaining != targets.axes() {
            return Err(AnalysisError::AxisMismatch);
        }

        let mut shape = self.shape().to_vec();
        shape.remove(i);
        if shape != targets.shape() {
            return Err(AnalysisError::AxisMismatch);
        }

        let data = Zip::from(self.data.lanes(ArrayAxis(i)))
            .and(&targets.data)
            .map_collect(|lane, &target| {
                if target.is_nan() {
                    return std::f64::NAN;
                }
                nearest(coord, target)
                    .map(|k| lane[k])
                    .unwrap_or(std::f64::NAN)
            });

        Ok(Field {
            meta: self.meta.clone(),
            coords: targets.coords.clone(),
            data,
        })
    }

    /// Replace `axis` by a new axis whose entries are weighted sums over groups of the old one.
    ///
    /// Each group is a list of `(index, weight)` pairs along `axis`. The new coordinate must have
    /// one entry per group and takes the position of the old axis.
    pub fn weighted_group_sum(
        &self,
        axis: Axis,
        groups: &[Vec<(usize, f64)>],
        new_coord: Coordinate,
    ) -> Result<Field> {
        let i = self.axis_index(axis)?;
        if new_coord.len() != groups.len() {
            return Err(AnalysisError::ShapeMismatch);
        }

        let n = self.shape()[i];
        if groups.iter().flatten().any(|&(k, _)| k >= n) {
            return Err(AnalysisError::InvalidInput("group index out of range"));
        }

        let mut shape = self.shape().to_vec();
        shape[i] = groups.len();
        let mut data = ArrayD::<f64>::zeros(IxDyn(&shape));

        for (mut out, members) in data.axis_iter_mut(ArrayAxis(i)).zip(groups) {
            for &(k, weight) in members {
                out.scaled_add(weight, &self.data.index_axis(ArrayAxis(i), k));
            }
        }

        let mut coords = self.coords.clone();
        coords[i] = new_coord;

        Ok(Field {
            meta: self.meta.clone(),
            coords,
            data,
        })
    }

    fn without_axis(&self, i: usize, data: ArrayD<f64>) -> Field {
        let mut coords = self.coords.clone();
        coords.remove(i);

        Field {
            meta: self.meta.clone(),
            coords,
            data,
        }
    }
}
