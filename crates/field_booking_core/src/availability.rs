//! crates/field_booking_core/src/availability.rs
//!
//! Works out which `HH:MM` labels on a field's day can no longer be picked as
//! the start or the end of a new booking.
//!
//! Every existing booking is walked from its start in 30-minute steps. The
//! final step is shortened so the walk always lands on the booking's literal
//! end time, which means bookings that are not aligned to the half hour
//! produce labels such as `10:50`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashSet;

use crate::domain::Booking;
use crate::error::{CoreError, CoreResult};
use crate::ports::BookingStore;

const STEP_MINUTES: i64 = 30;
const MINUTES_PER_DAY: i64 = 24 * 60;

//=========================================================================================
// Ordered label set
//=========================================================================================

/// A set of labels that remembers the order labels were first seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the label was already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.seen.contains(&label) {
            return false;
        }
        self.seen.insert(label.clone());
        self.order.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.seen.contains(label)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl Extend<String> for LabelSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

impl<'a> Extend<&'a str> for LabelSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

//=========================================================================================
// Query and result types
//=========================================================================================

/// A validated availability request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapQuery {
    pub field_id: i64,
    pub date: NaiveDate,
    pub exclude_booking_id: Option<i64>,
}

impl OverlapQuery {
    /// Validates the raw request values. Missing or malformed input is a
    /// `CoreError::Validation`, never a data-layer error.
    pub fn parse(
        field_id: Option<&str>,
        date: Option<&str>,
        exclude_booking_id: Option<&str>,
    ) -> CoreResult<Self> {
        let field_id = field_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation("fieldId is required".to_string()))?;
        let field_id = field_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                CoreError::Validation(format!("fieldId must be a positive integer, got '{}'", field_id))
            })?;

        let date = date
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation("date is required".to_string()))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            CoreError::Validation(format!("date must be formatted as YYYY-MM-DD, got '{}'", date))
        })?;

        let exclude_booking_id = match exclude_booking_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                CoreError::Validation(format!("excludeId must be an integer, got '{}'", raw))
            })?),
            None => None,
        };

        Ok(Self {
            field_id,
            date,
            exclude_booking_id,
        })
    }

    /// The UTC day as a half-open range `[start, end)`.
    pub fn day_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        day_bounds(self.date)
    }
}

pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

/// Labels that cannot be used as a new booking's start or end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableTimes {
    pub start_times: LabelSet,
    pub end_times: LabelSet,
}

//=========================================================================================
// Calculation
//=========================================================================================

/// Formats a minute of the day as `HH:MM`.
pub fn time_label(minute_of_day: i64) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Computes the blocked labels for bookings that start on the day beginning at
/// `day_start`. Minutes are measured from `day_start`; anything at or past
/// midnight of the following day yields no label.
pub fn unavailable_times(day_start: DateTime<Utc>, bookings: &[Booking]) -> UnavailableTimes {
    let mut start_times = LabelSet::new();
    let mut end_times = LabelSet::new();
    let mut overlapping_times = LabelSet::new();

    for booking in bookings {
        let start = (booking.start_time - day_start).num_minutes().max(0);
        let end = (booking.end_time - day_start).num_minutes();

        let mut minute = start;
        loop {
            if minute < MINUTES_PER_DAY {
                let label = time_label(minute);
                if minute == start {
                    start_times.insert(label);
                } else if minute == end {
                    end_times.insert(label);
                } else {
                    overlapping_times.insert(label);
                }
            }
            if minute >= end {
                break;
            }
            minute = (minute + STEP_MINUTES).min(end);
        }
    }

    start_times.extend(overlapping_times.iter());
    end_times.extend(overlapping_times.iter());

    UnavailableTimes {
        start_times,
        end_times,
    }
}

/// Fetches the field's bookings for the queried day and computes the blocked
/// labels. A store failure is returned as `CoreError::DataFetch`; it is never
/// turned into an empty result.
pub async fn check_overlapping_times(
    store: &dyn BookingStore,
    query: &OverlapQuery,
) -> CoreResult<UnavailableTimes> {
    let (day_start, day_end) = query.day_bounds();
    let mut bookings = store
        .get_bookings_for_field_between(query.field_id, day_start, day_end, query.exclude_booking_id)
        .await?;
    if let Some(excluded) = query.exclude_booking_id {
        bookings.retain(|b| b.id != excluded);
    }
    Ok(unavailable_times(day_start, &bookings))
}
