//! Relative day labels for list views.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Short label for when something happened, relative to `now`.
///
/// Counts whole 24-hour periods elapsed, like the transaction list does:
/// `hoje`, `ontem`, `2 dias atrás`, `3 dias atrás`, then `dd/mm`.
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use dindin_core::relative_day_label;
///
/// let now = Utc::now();
/// assert_eq!(relative_day_label(now - Duration::hours(30), now), "ontem");
/// ```
pub fn relative_day_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_days = (now - date).num_days();

    match elapsed_days {
        0 => "hoje".to_string(),
        1 => "ontem".to_string(),
        2 | 3 => format!("{} dias atrás", elapsed_days),
        _ => day_month(date.date_naive()),
    }
}

fn day_month(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}
