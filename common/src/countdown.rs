//! 開催日までのカウントダウン

use crate::error::Result;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// 残り時間
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// 残り時間を計算する。開始時刻を過ぎていれば全て0
pub fn time_left(target_ms: i64, now_ms: i64) -> TimeLeft {
    let distance = target_ms - now_ms;
    if distance <= 0 {
        return TimeLeft::default();
    }
    TimeLeft {
        days: distance / DAY_MS,
        hours: (distance % DAY_MS) / HOUR_MS,
        minutes: (distance % HOUR_MS) / MINUTE_MS,
        seconds: (distance % MINUTE_MS) / SECOND_MS,
    }
}

/// 開催日時
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    start_ms: i64,
}

impl EventSchedule {
    /// RFC 3339形式（例: "2025-12-26T00:00:00+05:30"）から読み込む
    pub fn parse(rfc3339: &str) -> Result<Self> {
        let start = DateTime::parse_from_rfc3339(rfc3339)?;
        Ok(Self {
            start_ms: start.timestamp_millis(),
        })
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn time_left(&self, now_ms: i64) -> TimeLeft {
        time_left(self.start_ms, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_left_breakdown() {
        let distance = 3 * DAY_MS + 4 * HOUR_MS + 5 * MINUTE_MS + 6 * SECOND_MS + 999;
        let left = time_left(distance, 0);
        assert_eq!(
            left,
            TimeLeft {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
    }

    #[test]
    fn test_time_left_after_start_is_zero() {
        assert!(time_left(1_000, 5_000).is_zero());
        assert!(time_left(5_000, 5_000).is_zero());
    }

    #[test]
    fn test_schedule_parse() {
        let schedule = EventSchedule::parse("2025-12-26T00:00:00+05:30").unwrap();
        let utc = EventSchedule::parse("2025-12-25T18:30:00Z").unwrap();
        assert_eq!(schedule.start_ms(), utc.start_ms());

        let left = schedule.time_left(schedule.start_ms() - DAY_MS - 1_000);
        assert_eq!(left.days, 1);
        assert_eq!(left.seconds, 1);
    }

    #[test]
    fn test_schedule_parse_invalid() {
        assert!(EventSchedule::parse("26/12/2025").is_err());
    }
}
