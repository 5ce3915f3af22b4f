//! Sudden Stratospheric Warming (SSW) detection.
//!
//! SSW central dates are reversals of the polar vortex index, the zonal mean zonal wind at 60°N
//! and 10 hPa, from westerly to easterly during an extended winter (November through April).
//! Three rules from the SSW literature decide which reversals count:
//!
//!  - No SSW is accepted within 20 days of the previous one.
//!  - If the winds do not turn westerly again within 30 days the reversal is a final warming
//!    and is discarded, as is any reversal in April.
//!  - Before an SSW there must be (at least) 10 consecutive days of westerlies.
//!
//! All of these thresholds come from [`SswCriteria`](crate::SswCriteria).

use crate::{
    config::{Config, SswCriteria},
    dataset::Dataset,
    error::{AnalysisError, Result},
    grid::{Axis, Field, Metadata},
    wind::polar_vortex,
};
use chrono::{Datelike, Duration, NaiveDateTime};
use itertools::{izip, Itertools};
use log::debug;
use metfor::MetersPSec;
use optional::{none, some, Optioned};

/// A wind time series where missing samples keep their place in the series.
#[derive(Clone, Debug, PartialEq)]
pub struct WindSeries {
    times: Vec<NaiveDateTime>,
    values: Vec<Optioned<MetersPSec>>,
    time_meta: Metadata,
}

impl WindSeries {
    /// Create a series from parallel vectors of times and values.
    pub fn new(
        times: Vec<NaiveDateTime>,
        values: Vec<Optioned<MetersPSec>>,
        time_meta: Metadata,
    ) -> Result<Self> {
        if times.len() != values.len() {
            return Err(AnalysisError::ShapeMismatch);
        }

        Ok(WindSeries {
            times,
            values,
            time_meta,
        })
    }

    /// Convert a field indexed only by time into a series. NaN values become missing.
    pub fn from_field(fld: &Field) -> Result<Self> {
        let time = fld.coord(Axis::Time)?;
        if fld.coords().len() != 1 {
            return Err(AnalysisError::InvalidInput(
                "wind series must be indexed by time only",
            ));
        }

        let values = fld
            .data()
            .iter()
            .map(|&v| if v.is_nan() { none() } else { some(MetersPSec(v)) })
            .collect();

        WindSeries::new(
            time.as_times()?.to_vec(),
            values,
            time.metadata().clone(),
        )
    }

    /// The sample times.
    #[inline]
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// The values, with missing samples.
    #[inline]
    pub fn values(&self) -> &[Optioned<MetersPSec>] {
        &self.values
    }

    /// Number of samples, including missing ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Mark every sample outside of `months` as missing.
    pub fn restrict_to_months(&self, months: &[u32]) -> WindSeries {
        self.keep_where(|t, _| months.contains(&t.month()))
    }

    /// Mark every sample that is not strictly easterly (negative) as missing.
    pub fn easterly(&self) -> WindSeries {
        self.keep_where(|_, v| v < MetersPSec(0.0))
    }

    fn keep_where<F>(&self, keep: F) -> WindSeries
    where
        F: Fn(&NaiveDateTime, MetersPSec) -> bool,
    {
        let values = izip!(&self.times, &self.values)
            .map(|(t, v)| match v.into_option() {
                Some(v) if keep(t, v) => some(v),
                _ => none(),
            })
            .collect();

        WindSeries {
            times: self.times.clone(),
            values,
            time_meta: self.time_meta.clone(),
        }
    }
}

/// An ordered list of event dates.
#[derive(Clone, Debug, PartialEq)]
pub struct EventSeries {
    meta: Metadata,
    dates: Vec<NaiveDateTime>,
    time_meta: Metadata,
}

impl EventSeries {
    fn ssw_central_dates(dates: Vec<NaiveDateTime>, time_meta: Metadata) -> Self {
        EventSeries {
            meta: Metadata::new("SSW_central_date").with_long_name("SSW central date"),
            dates,
            time_meta,
        }
    }

    /// Name and description of the series.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// Metadata of the time axis the events were found on.
    #[inline]
    pub fn time_metadata(&self) -> &Metadata {
        &self.time_meta
    }

    /// The event dates, strictly increasing.
    #[inline]
    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    /// Number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if no events were found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Find SSW central dates in a dataset with a zonal wind `u`.
pub fn ssw_analysis(ds: &Dataset, cfg: &Config) -> Result<EventSeries> {
    let pv = polar_vortex(ds, &cfg.polar_vortex)?;
    ssw_central_dates(&pv, &cfg.ssw)
}

/// Find SSW central dates in a polar vortex index time series.
pub fn ssw_central_dates(polar_vortex: &Field, criteria: &SswCriteria) -> Result<EventSeries> {
    let series = WindSeries::from_field(polar_vortex)?;
    Ok(detect_ssw(&series, criteria))
}

/// Find SSW central dates in a wind series.
///
/// A series without any samples in the search months gives an empty result.
pub fn detect_ssw(series: &WindSeries, criteria: &SswCriteria) -> EventSeries {
    let easterly = series.restrict_to_months(&criteria.months).easterly();
    let times = easterly.times();
    let values = easterly.values();

    let recoveries = westerly_recoveries(&easterly);
    // Thresholds beyond the range of a Duration saturate.
    let recovery_window =
        Duration::try_days(criteria.recovery_window_days).unwrap_or(Duration::MAX);
    let separation = Duration::try_days(criteria.min_separation_days).unwrap_or(Duration::MAX);

    let recovers = |onset: NaiveDateTime| {
        onset.month() != criteria.excluded_onset_month
            && recoveries
                .iter()
                .any(|&west| west > onset && west - onset < recovery_window)
    };

    let mut dates: Vec<NaiveDateTime> = vec![];
    for i in onset_candidates(&easterly) {
        let onset = times[i];

        let accept = match dates.last() {
            None => recovers(onset),
            Some(&last) => {
                // An onset whose earliest allowed time is before the calendar starts is too
                // close to every earlier event.
                let separated = onset
                    .checked_sub_signed(separation)
                    .map_or(false, |earliest| earliest > last);

                // Clamped at the first sample rather than wrapping to the end of the series, so
                // a candidate fewer than `quiet_samples` into the series still needs every
                // earlier sample clear, including the previous onset.
                let quiet = values[i.saturating_sub(criteria.quiet_samples)..i]
                    .iter()
                    .all(|v| v.is_none());

                separated && quiet && recovers(onset) && onset != last
            }
        };

        if accept {
            debug!("SSW central date {}", onset);
            dates.push(onset);
        }
    }

    debug!("{} SSW events in {} samples", dates.len(), series.len());

    EventSeries::ssw_central_dates(dates, series.time_meta.clone())
}

// The times when an easterly spell ends: the first missing sample after an easterly one. A
// spell that runs to the end of the series has no recovery.
fn westerly_recoveries(easterly: &WindSeries) -> Vec<NaiveDateTime> {
    izip!(easterly.times(), easterly.values())
        .tuple_windows::<(_, _)>()
        .filter(|((_, v0), (_, v1))| v0.is_some() && v1.is_none())
        .map(|(_, (t1, _))| *t1)
        .collect()
}

// Indexes of easterly samples that follow a missing one and are followed by another easterly
// one. The first and last samples are never candidates.
fn onset_candidates(easterly: &WindSeries) -> Vec<usize> {
    izip!(0usize.., easterly.values())
        .tuple_windows::<(_, _, _)>()
        .filter(|((_, prev), (_, v), (_, next))| prev.is_none() && v.is_some() && next.is_some())
        .map(|(_, (i, _), _)| i)
        .collect()
}
