use chrono::{Datelike, FixedOffset, Months, NaiveDate};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::core::primitives::{MILLIS_PER_DAY, local_date, local_midnight_millis};
use crate::error::{TimelineError, TimelineResult};
use crate::ticks::TickLabelFormatter;

/// Spans shorter than this many days get per-day ticks.
pub const DEFAULT_DAY_TICK_THRESHOLD_DAYS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    Now,
    Year,
    Month,
    Day,
}

impl TickKind {
    /// Collision precedence; higher wins.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Now => 3,
            Self::Year => 2,
            Self::Month => 1,
            Self::Day => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickCandidate {
    pub label: String,
    pub kind: TickKind,
    pub timestamp: f64,
}

/// Inputs for calendar tick generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateWindow {
    pub range: TimeRange,
    pub now: f64,
    pub day_tick_threshold_days: f64,
    pub offset: FixedOffset,
}

/// Builds the timestamp-sorted tick candidates for `window.range`.
///
/// Calendar days are walked from the day containing the range start through
/// the day containing the range end; that first day is the reference, so a
/// year or month tick is only emitted when the walk crosses into a new one.
/// Each day yields at most one candidate (year over month over day). When the
/// span is too wide for day ticks only month starts can produce a candidate,
/// so the walk steps month to month instead.
pub fn generate_tick_candidates(
    window: CandidateWindow,
    formatter: &dyn TickLabelFormatter,
) -> TimelineResult<Vec<TickCandidate>> {
    let threshold = window.day_tick_threshold_days;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(TimelineError::InvalidData(
            "day tick threshold must be finite and >= 0".to_owned(),
        ));
    }

    let mut candidates = Vec::new();
    if window.now.is_finite() && window.range.contains(window.now) {
        candidates.push(TickCandidate {
            label: formatter.now_label(),
            kind: TickKind::Now,
            timestamp: window.now,
        });
    }

    let first = local_date(window.range.start(), window.offset)?;
    let last = local_date(window.range.end(), window.offset)?;
    let show_days = window.range.span() < threshold * MILLIS_PER_DAY;

    if show_days {
        let mut previous = first;
        for date in first.iter_days().take_while(|date| *date <= last) {
            let (kind, label) = boundary_candidate(previous, date, formatter)
                .unwrap_or_else(|| (TickKind::Day, formatter.day_label(date)));
            candidates.push(TickCandidate {
                label,
                kind,
                timestamp: local_midnight_millis(date, window.offset)?,
            });
            previous = date;
        }
    } else {
        let mut previous = first;
        let mut month_start = first_of_next_month(first)?;
        while month_start <= last {
            if let Some((kind, label)) = boundary_candidate(previous, month_start, formatter) {
                candidates.push(TickCandidate {
                    label,
                    kind,
                    timestamp: local_midnight_millis(month_start, window.offset)?,
                });
            }
            previous = month_start;
            month_start = first_of_next_month(month_start)?;
        }
    }

    candidates.sort_by_key(|candidate| OrderedFloat(candidate.timestamp));
    Ok(candidates)
}

fn boundary_candidate(
    previous: NaiveDate,
    date: NaiveDate,
    formatter: &dyn TickLabelFormatter,
) -> Option<(TickKind, String)> {
    if date.year() != previous.year() {
        Some((TickKind::Year, formatter.year_label(date)))
    } else if date.month() != previous.month() {
        Some((TickKind::Month, formatter.month_label(date)))
    } else {
        None
    }
}

fn first_of_next_month(date: NaiveDate) -> TimelineResult<NaiveDate> {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .ok_or_else(|| TimelineError::InvalidData(format!("no month follows {date}")))
}
