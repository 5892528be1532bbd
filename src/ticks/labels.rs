use chrono::NaiveDate;

/// Locale hook for tick labels.
///
/// The planner only decides which calendar boundaries get a tick; the text
/// shown for each is delegated here.
pub trait TickLabelFormatter {
    fn now_label(&self) -> String;

    /// Label for the first day of a year.
    fn year_label(&self, date: NaiveDate) -> String;

    /// Label for the first day of a month.
    fn month_label(&self, date: NaiveDate) -> String;

    fn day_label(&self, date: NaiveDate) -> String;
}

/// English labels: `"Now"`, 4-digit years, long month names, 2-digit days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnglishLabels;

impl TickLabelFormatter for EnglishLabels {
    fn now_label(&self) -> String {
        "Now".to_owned()
    }

    fn year_label(&self, date: NaiveDate) -> String {
        date.format("%Y").to_string()
    }

    fn month_label(&self, date: NaiveDate) -> String {
        date.format("%B").to_string()
    }

    fn day_label(&self, date: NaiveDate) -> String {
        date.format("%d").to_string()
    }
}
