//! Meteorological seasons and calendar helpers for seasonal reductions.
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use strum_macros::{Display, EnumIter, EnumString};

/// A three month meteorological season.
///
/// The declaration order, DJF, MAM, JJA, SON, is the order seasons appear along a `season` axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter)]
pub enum Season {
    /// December, January, February
    DJF,
    /// March, April, May
    MAM,
    /// June, July, August
    JJA,
    /// September, October, November
    SON,
}

impl Season {
    /// The season a calendar month (1-12) belongs to.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ifs_diagnostics::Season;
    ///
    /// assert_eq!(Season::from_month(12), Season::DJF);
    /// assert_eq!(Season::from_month(4), Season::MAM);
    /// assert_eq!(Season::from_month(9), Season::SON);
    /// ```
    pub fn from_month(month: u32) -> Season {
        match month {
            3..=5 => Season::MAM,
            6..=8 => Season::JJA,
            9..=11 => Season::SON,
            _ => Season::DJF,
        }
    }

    /// The season of a timestamp.
    #[inline]
    pub fn of(time: &NaiveDateTime) -> Season {
        Season::from_month(time.month())
    }

    /// The calendar months in this season.
    pub fn months(self) -> [u32; 3] {
        match self {
            Season::DJF => [12, 1, 2],
            Season::MAM => [3, 4, 5],
            Season::JJA => [6, 7, 8],
            Season::SON => [9, 10, 11],
        }
    }
}

/// Number of days in the month of the given timestamp.
pub fn days_in_month(time: &NaiveDateTime) -> u32 {
    let (year, month) = (time.year(), time.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        // Only reachable at the edge of chrono's representable range.
        _ => 31,
    }
}
