//! Day offsets and per-day grouping of conference sessions.
//!
//! Dates are taken in each timestamp's own UTC offset, so a session starting at
//! 23:30-05:00 belongs to that local day even though it is already the next day
//! in UTC.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

use crate::types::{DayOffset, Session, TimeSlot};

/// Earliest start date and latest end date across all sessions.
///
/// Sessions with a null start (or end) are ignored for that bound. Returns
/// `None` when either bound has no values at all.
pub fn date_range(sessions: &[Session]) -> Option<(NaiveDate, NaiveDate)> {
    let start = sessions
        .iter()
        .filter_map(|s| s.start_time.map(|t| t.date_naive()))
        .min()?;
    let end = sessions
        .iter()
        .filter_map(|s| s.end_time.map(|t| t.date_naive()))
        .max()?;
    Some((start, end))
}

/// Number of conference days spanned, counting both ends.
pub fn number_of_days(sessions: &[Session]) -> i64 {
    match date_range(sessions) {
        Some((start, end)) => ((end - start).num_days() + 1).max(0),
        None => 0,
    }
}

/// One entry per conference day, offset 0 being the earliest start date.
pub fn day_offsets(sessions: &[Session]) -> Vec<DayOffset> {
    let Some((start, _)) = date_range(sessions) else {
        return Vec::new();
    };

    (0..number_of_days(sessions))
        .filter_map(|offset| {
            let date = add_days(start, offset)?;
            Some(DayOffset {
                offset,
                day_of_week: date.weekday(),
            })
        })
        .collect()
}

/// Sessions starting on day `day` of the conference, grouped by start time.
///
/// Groups are ordered by start time; sessions within a group by track id
/// (sessions without a track first). The sort is stable, so sessions on the same
/// track keep the back-end's order.
pub fn sessions_for_day(sessions: &[Session], day: i64) -> Vec<TimeSlot> {
    let Some(first_day) = sessions
        .iter()
        .filter_map(|s| s.start_time.map(|t| t.date_naive()))
        .min()
    else {
        return Vec::new();
    };
    let Some(filter_date) = add_days(first_day, day) else {
        return Vec::new();
    };

    let mut on_day: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.start_time.is_some_and(|t| t.date_naive() == filter_date))
        .collect();
    on_day.sort_by_key(|s| s.track_id);

    let mut slots: BTreeMap<_, Vec<Session>> = BTreeMap::new();
    for session in on_day {
        if let Some(start) = session.start_time {
            slots.entry(start).or_default().push(session.clone());
        }
    }

    slots
        .into_iter()
        .map(|(start_time, sessions)| TimeSlot {
            start_time,
            sessions,
        })
        .collect()
}

/// `date` shifted by a signed number of days; `None` if it leaves chrono's range.
fn add_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}
