//! Trigger-time arithmetic for the daily broadcast schedule.

use chrono::{NaiveDateTime, NaiveTime};

use crate::core::error::{AppError, AppResult};

/// An ordered set of daily "HH:MM" trigger times.
///
/// Parsed once at startup; `next_after` drives the scheduler's sleep target.
#[derive(Debug, Clone)]
pub struct TriggerSchedule {
    times: Vec<NaiveTime>,
}

impl TriggerSchedule {
    /// Parse a list of "HH:MM" strings into a schedule.
    ///
    /// Duplicates are collapsed and the result is sorted. An empty or
    /// unparsable list is a startup error.
    pub fn parse(raw: &[&str]) -> AppResult<Self> {
        let mut times = Vec::with_capacity(raw.len());
        for s in raw {
            let time = NaiveTime::parse_from_str(s, "%H:%M")
                .map_err(|e| AppError::Config(format!("invalid trigger time '{}': {}", s, e)))?;
            times.push(time);
        }
        times.sort_unstable();
        times.dedup();
        if times.is_empty() {
            return Err(AppError::Config("trigger time list is empty".to_string()));
        }
        Ok(Self { times })
    }

    /// The earliest trigger instant strictly after `now`.
    ///
    /// Strictness is what prevents a double fire: right after a cycle runs at
    /// 09:00, `now` is past 09:00 and the next candidate is the following
    /// trigger, not 09:00 again.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        for time in &self.times {
            let candidate = today.and_time(*time);
            if candidate > now {
                return candidate;
            }
        }
        // All of today's triggers have passed; roll to the first one tomorrow.
        today.succ_opt().unwrap_or(today).and_time(self.times[0])
    }

    /// Number of trigger times in the schedule.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn schedule() -> TriggerSchedule {
        TriggerSchedule::parse(&crate::core::config::MEAL_TIMES).expect("constant schedule parses")
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .expect("valid date")
            .and_hms_opt(h, m, s)
            .expect("valid time")
    }

    #[test]
    fn fires_at_the_next_listed_minute() {
        // Just before 09:00 the next trigger is 09:00 sharp.
        assert_eq!(schedule().next_after(at(8, 59, 30)), at(9, 0, 0));
    }

    #[test]
    fn a_minute_past_the_trigger_waits_for_the_next_one() {
        // 09:01 is not a trigger; nothing fires until 13:00.
        assert_eq!(schedule().next_after(at(9, 1, 0)), at(13, 0, 0));
    }

    #[test]
    fn exactly_on_the_trigger_instant_moves_to_the_following_one() {
        assert_eq!(schedule().next_after(at(9, 0, 0)), at(13, 0, 0));
    }

    #[test]
    fn rolls_over_to_the_first_trigger_tomorrow() {
        let next = schedule().next_after(at(23, 30, 0));
        let tomorrow = NaiveDate::from_ymd_opt(2026, 8, 7)
            .expect("valid date")
            .and_hms_opt(0, 50, 0)
            .expect("valid time");
        assert_eq!(next, tomorrow);
    }

    #[test]
    fn parse_sorts_and_dedups() {
        let schedule = TriggerSchedule::parse(&["13:00", "09:00", "09:00"]).expect("parse");
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.next_after(at(0, 0, 0)), at(9, 0, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TriggerSchedule::parse(&["25:99"]).is_err());
        assert!(TriggerSchedule::parse(&["soon"]).is_err());
        assert!(TriggerSchedule::parse(&[]).is_err());
    }
}
