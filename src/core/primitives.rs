use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{TimelineError, TimelineResult};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> TimelineResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(TimelineError::InvalidTimestamp(millis));
    }
    DateTime::from_timestamp_millis(millis.floor() as i64)
        .ok_or(TimelineError::InvalidTimestamp(millis))
}

/// Calendar date containing `millis` in the given offset.
pub fn local_date(millis: f64, offset: FixedOffset) -> TimelineResult<NaiveDate> {
    Ok(unix_millis_to_datetime(millis)?
        .with_timezone(&offset)
        .date_naive())
}

/// Unix millis of local midnight starting `date`.
pub fn local_midnight_millis(date: NaiveDate, offset: FixedOffset) -> TimelineResult<f64> {
    let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        TimelineError::InvalidData(format!("no midnight for calendar date {date}"))
    })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.timestamp_millis() as f64)
        .ok_or_else(|| TimelineError::InvalidData(format!("ambiguous local midnight for {date}")))
}

pub fn fixed_offset(utc_offset_minutes: i32) -> TimelineResult<FixedOffset> {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            TimelineError::InvalidData(format!(
                "utc offset of {utc_offset_minutes} minutes is out of range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::{fixed_offset, local_date, local_midnight_millis};
    use chrono::NaiveDate;

    #[test]
    fn local_date_honors_offset() {
        // 2023-12-31T23:30:00Z
        let millis = 1_704_065_400_000.0;
        let utc = local_date(millis, fixed_offset(0).expect("utc")).expect("date");
        let cet = local_date(millis, fixed_offset(60).expect("cet")).expect("date");
        assert_eq!(utc, NaiveDate::from_ymd_opt(2023, 12, 31).expect("date"));
        assert_eq!(cet, NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
    }

    #[test]
    fn midnight_in_positive_offset_precedes_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let utc = local_midnight_millis(date, fixed_offset(0).expect("utc")).expect("utc");
        let cet = local_midnight_millis(date, fixed_offset(60).expect("cet")).expect("cet");
        assert!((utc - cet - 3_600_000.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let err = fixed_offset(24 * 60).expect_err("must fail");
        assert!(format!("{err}").contains("utc offset"));
    }
}
