// Copyright 2025 the Bandline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar periods: the discrete time axis of a band timeline.
//!
//! A [`Period`] is a calendar-aligned unit (day, week, or month) with a total
//! order, exact successor/predecessor arithmetic, and a stable integer sort
//! key. The rest of the engine only ever manipulates periods through these
//! operations, so day/week/month timelines share one code path.

use core::cmp::Ordering;
use core::fmt;

/// Which calendar unit a timeline instance is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    /// One calendar day.
    Day,
    /// One seven-day week, anchored to the week's first day.
    Week,
    /// One calendar month.
    Month,
}

/// A civil calendar date (proleptic Gregorian).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Date {
    /// Calendar year.
    pub year: i32,
    /// Month of year, `1..=12`.
    pub month: u8,
    /// Day of month, `1..=31`.
    pub day: u8,
}

/// A year/month pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of year, `1..=12`.
    pub month: u8,
}

/// A calendar-aligned time unit with ordering and successor arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    /// A single calendar day.
    Day(Date),
    /// A seven-day week, identified by its first day.
    Week(Date),
    /// A calendar month.
    Month(YearMonth),
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days since 1970-01-01 for a civil date (Howard Hinnant's algorithm).
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let d = i64::from(day);
    let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(z: i64) -> Date {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = mp + if mp < 10 { 3 } else { -9 };
    let year = y + i64::from(m <= 2);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "year fits i32 for any representable period; m/d are in 1..=12 / 1..=31"
    )]
    Date {
        year: year as i32,
        month: m as u8,
        day: d as u8,
    }
}

impl Date {
    /// Returns the date `days` calendar days after `self` (negative moves back).
    fn offset(self, days: i64) -> Self {
        civil_from_days(days_from_civil(self.year, self.month, self.day) + days)
    }

    fn epoch_day(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// One-based day of year.
    fn day_of_year(self) -> i64 {
        self.epoch_day() - days_from_civil(self.year, 1, 1) + 1
    }
}

impl YearMonth {
    /// Whole months since year 0.
    fn month_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_month_index(index: i64) -> Self {
        let year = index.div_euclid(12);
        let month0 = index.rem_euclid(12);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "year fits i32 for any representable period; month0 is in 0..12"
        )]
        Self {
            year: year as i32,
            month: month0 as u8 + 1,
        }
    }
}

impl Period {
    /// Builds a period from a raw `(year, sub-unit index)` identifier.
    ///
    /// Sub-unit meaning per kind:
    /// - `Month`: zero-based month index; values outside `0..12` wrap across
    ///   year boundaries.
    /// - `Week`: week index `i` anchors to day-of-year `7 * i` of `year`
    ///   (the upstream feed's calendar rule); the period then advances in
    ///   exact seven-day steps.
    /// - `Day`: zero-based day-of-year index.
    pub fn from_raw(kind: PeriodKind, year: i32, subunit: i64) -> Self {
        match kind {
            PeriodKind::Day => {
                Self::Day(civil_from_days(days_from_civil(year, 1, 1) + subunit))
            }
            PeriodKind::Week => {
                Self::Week(civil_from_days(days_from_civil(year, 1, 1) + 7 * subunit - 1))
            }
            PeriodKind::Month => {
                Self::Month(YearMonth::from_month_index(i64::from(year) * 12 + subunit))
            }
        }
    }

    /// A day period for a civil date.
    pub fn day(year: i32, month: u8, day: u8) -> Self {
        Self::Day(Date { year, month, day })
    }

    /// A month period. `month` is one-based (`1..=12`).
    pub fn month(year: i32, month: u8) -> Self {
        Self::Month(YearMonth { year, month })
    }

    /// Returns the kind of this period.
    pub fn kind(self) -> PeriodKind {
        match self {
            Self::Day(_) => PeriodKind::Day,
            Self::Week(_) => PeriodKind::Week,
            Self::Month(_) => PeriodKind::Month,
        }
    }

    /// A stable integer key, strictly monotonic with calendar order for
    /// periods of the same kind.
    pub fn sort_key(self) -> i64 {
        match self {
            Self::Day(d) | Self::Week(d) => d.epoch_day(),
            Self::Month(ym) => ym.month_index(),
        }
    }

    /// The next period of the same kind.
    pub fn successor(self) -> Self {
        match self {
            Self::Day(d) => Self::Day(d.offset(1)),
            Self::Week(d) => Self::Week(d.offset(7)),
            Self::Month(ym) => Self::Month(YearMonth::from_month_index(ym.month_index() + 1)),
        }
    }

    /// The previous period of the same kind. Exact inverse of [`successor`].
    ///
    /// [`successor`]: Self::successor
    pub fn predecessor(self) -> Self {
        match self {
            Self::Day(d) => Self::Day(d.offset(-1)),
            Self::Week(d) => Self::Week(d.offset(-7)),
            Self::Month(ym) => Self::Month(YearMonth::from_month_index(ym.month_index() - 1)),
        }
    }

    /// Whether `other` is the direct successor of `self`.
    pub fn is_adjacent_to(self, other: Self) -> bool {
        self.successor() == other
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        // Timelines are homogeneous in kind; the kind tie-break only keeps
        // the order total for mixed collections.
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| kind_rank(self.kind()).cmp(&kind_rank(other.kind())))
    }
}

fn kind_rank(kind: PeriodKind) -> u8 {
    match kind {
        PeriodKind::Day => 0,
        PeriodKind::Week => 1,
        PeriodKind::Month => 2,
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(d) => write!(
                f,
                "{} {}, {}",
                MONTH_NAMES[usize::from(d.month) - 1],
                d.day,
                d.year
            ),
            Self::Week(d) => write!(f, "Week {}, {}", d.day_of_year() / 7, d.year),
            Self::Month(ym) => {
                write!(f, "{} {}", MONTH_NAMES[usize::from(ym.month) - 1], ym.year)
            }
        }
    }
}
