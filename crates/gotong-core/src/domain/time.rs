// SPDX-License-Identifier: Apache-2.0

use crate::domain::messages::Locale;
use crate::ports::boundary::ClockPort;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Time left until a campaign deadline, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingTime {
    Ended,
    LessThanMinute,
    Left { days: u64, hours: u64, minutes: u64 },
}

impl RemainingTime {
    #[must_use]
    pub fn between(deadline_secs: u64, now_secs: u64) -> Self {
        if deadline_secs <= now_secs {
            return Self::Ended;
        }
        let remaining = deadline_secs - now_secs;
        let days = remaining / SECS_PER_DAY;
        let hours = (remaining % SECS_PER_DAY) / SECS_PER_HOUR;
        let minutes = (remaining % SECS_PER_HOUR) / SECS_PER_MINUTE;
        if days == 0 && hours == 0 && minutes == 0 {
            Self::LessThanMinute
        } else {
            Self::Left {
                days,
                hours,
                minutes,
            }
        }
    }

    #[must_use]
    pub fn render(self, locale: Locale) -> String {
        match self {
            Self::Ended => match locale {
                Locale::Id => "Sudah selesai".to_string(),
                Locale::En => "Ended".to_string(),
            },
            Self::LessThanMinute => match locale {
                Locale::Id => "Kurang dari 1 menit".to_string(),
                Locale::En => "Less than a minute".to_string(),
            },
            Self::Left {
                days,
                hours,
                minutes,
            } => {
                let mut parts = Vec::with_capacity(3);
                if days > 0 {
                    parts.push(unit(days, locale, ("hari", "day", "days")));
                }
                if hours > 0 {
                    parts.push(unit(hours, locale, ("jam", "hour", "hours")));
                }
                if minutes > 0 {
                    parts.push(unit(minutes, locale, ("menit", "minute", "minutes")));
                }
                parts.join(" ")
            }
        }
    }
}

fn unit(value: u64, locale: Locale, names: (&str, &str, &str)) -> String {
    let name = match locale {
        Locale::Id => names.0,
        Locale::En if value == 1 => names.1,
        Locale::En => names.2,
    };
    format!("{value} {name}")
}

#[must_use]
pub fn remaining_time(deadline_secs: u64, now_secs: u64, locale: Locale) -> String {
    RemainingTime::between(deadline_secs, now_secs).render(locale)
}

#[must_use]
pub fn remaining_time_with(clock: &dyn ClockPort, deadline_secs: u64, locale: Locale) -> String {
    remaining_time(deadline_secs, clock.now_unix_secs(), locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_zero_components() {
        let now = 1_000_000;
        assert_eq!(
            remaining_time(now + 2 * SECS_PER_DAY + 5 * SECS_PER_MINUTE, now, Locale::Id),
            "2 hari 5 menit"
        );
        assert_eq!(remaining_time(now + SECS_PER_HOUR, now, Locale::Id), "1 jam");
    }

    #[test]
    fn sub_minute_and_past_deadlines() {
        assert_eq!(remaining_time(100, 41, Locale::Id), "Kurang dari 1 menit");
        assert_eq!(remaining_time(100, 100, Locale::Id), "Sudah selesai");
        assert_eq!(remaining_time(0, 100, Locale::En), "Ended");
    }

    #[test]
    fn english_pluralizes() {
        let now = 0;
        assert_eq!(
            remaining_time(SECS_PER_DAY + 2 * SECS_PER_HOUR + 61, now, Locale::En),
            "1 day 2 hours 1 minute"
        );
    }
}
