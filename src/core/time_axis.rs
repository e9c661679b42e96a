use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDateTime, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::types::{Seconds, Timestamp};
use crate::core::vertical_axis::{MAJOR_TICK_WIDTH, MAX_AXIS_LABELS, MINOR_TICK_WIDTH};

const SECONDS_PER_DAY: i64 = 86_400;

/// Characters of the graph width not available to time labels.
const TIME_AXIS_RESERVED_CHARS: u32 = 7;

const MINUTE_GRANULARITIES: [u32; 12] = [1, 2, 5, 10, 20, 30, 60, 120, 240, 360, 480, 720];
const DAY_GRANULARITIES: [u32; 4] = [1, 2, 3, 4];
const MONTH_GRANULARITIES: [u32; 10] = [1, 2, 3, 4, 6, 12, 18, 24, 36, 48];
const FALLBACK_MONTHS: u32 = 96;

/// Time zone used to lay out calendar-aligned time-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeAxisTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl TimeAxisTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    /// Offsets beyond a day are clamped to UTC.
    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// A tick on the time axis. `text` is `None` for unlabelled lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxisLabel {
    pub timestamp: Timestamp,
    pub text: Option<String>,
    pub line_width: u8,
}

/// Resolved horizontal scale of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub labels: Vec<TimeAxisLabel>,
    pub range: (Timestamp, Timestamp),
    pub title: String,
}

/// How tick labels are rendered, chosen from the visible span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLabelFormat {
    /// `HH:MM`, start and end on the same day.
    TimeOfDay,
    /// Weekday and time, less than a week.
    WeekdayTime,
    /// Day of month centered on the day, less than 32 days in one month.
    DayOfMonth,
    /// `MM-DD` within one year.
    MonthDay,
    /// Full `YYYY-MM-DD` date.
    Date,
}

impl TimeLabelFormat {
    fn select(start: NaiveDateTime, end: NaiveDateTime, span: Seconds) -> Self {
        let (start_date, end_date) = (start.date(), end.date());
        if start_date == end_date {
            Self::TimeOfDay
        } else if span < 7 * SECONDS_PER_DAY {
            Self::WeekdayTime
        } else if span < 32 * SECONDS_PER_DAY
            && start_date.year() == end_date.year()
            && start_date.month() == end_date.month()
        {
            Self::DayOfMonth
        } else if start_date.year() == end_date.year() {
            Self::MonthDay
        } else {
            Self::Date
        }
    }

    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::TimeOfDay => "%H:%M",
            Self::WeekdayTime => "%a %H:%M",
            Self::DayOfMonth => "%d",
            Self::MonthDay => "%m-%d",
            Self::Date => "%Y-%m-%d",
        }
    }

    /// Approximate label width in characters.
    #[must_use]
    pub fn size(self) -> f64 {
        match self {
            Self::TimeOfDay | Self::MonthDay => 5.0,
            Self::WeekdayTime => 9.0,
            Self::DayOfMonth => 2.5,
            Self::Date => 8.0,
        }
    }

    /// Offset of the label from its tick line.
    #[must_use]
    pub fn shift(self) -> Seconds {
        match self {
            Self::DayOfMonth => SECONDS_PER_DAY / 2,
            _ => 0,
        }
    }

    fn min_distance(self) -> f64 {
        match self {
            Self::DayOfMonth => SECONDS_PER_DAY as f64,
            _ => 0.0,
        }
    }
}

/// Calendar unit between two time-axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickGranularity {
    Minutes(u32),
    Days(u32),
    /// Weeks starting on Monday.
    Week,
    /// Months counted from the first of the month; assumed 31 days long when
    /// chosen.
    Months(u32),
}

impl TickGranularity {
    /// First granularity at least `min_distance` seconds wide.
    #[must_use]
    pub fn select(min_distance: f64) -> Self {
        if let Some(minutes) = MINUTE_GRANULARITIES
            .iter()
            .copied()
            .find(|minutes| min_distance <= f64::from(*minutes * 60))
        {
            return Self::Minutes(minutes);
        }
        if let Some(days) = DAY_GRANULARITIES
            .iter()
            .copied()
            .find(|days| min_distance <= f64::from(*days) * SECONDS_PER_DAY as f64)
        {
            return Self::Days(days);
        }
        if min_distance <= 7.0 * SECONDS_PER_DAY as f64 {
            return Self::Week;
        }
        let months = MONTH_GRANULARITIES
            .iter()
            .copied()
            .find(|months| min_distance <= f64::from(*months) * 31.0 * SECONDS_PER_DAY as f64)
            .unwrap_or(FALLBACK_MONTHS);
        Self::Months(months)
    }

    /// Nearest aligned boundary at or before `start`.
    fn align(self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        let midnight = start.date().and_hms_opt(0, 0, 0)?;
        match self {
            Self::Minutes(minutes) => {
                let step = i64::from(minutes) * 60;
                let since_midnight = (start - midnight).num_seconds();
                midnight.checked_add_signed(TimeDelta::try_seconds(since_midnight / step * step)?)
            }
            Self::Days(_) => Some(midnight),
            Self::Week => {
                let weekday = u64::from(start.weekday().num_days_from_monday());
                midnight.checked_sub_days(Days::new(weekday))
            }
            Self::Months(_) => midnight.with_day(1),
        }
    }

    fn advance(self, position: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Minutes(minutes) => {
                position.checked_add_signed(TimeDelta::try_minutes(i64::from(minutes))?)
            }
            Self::Days(days) => position.checked_add_days(Days::new(u64::from(days))),
            Self::Week => position.checked_add_days(Days::new(7)),
            Self::Months(months) => position.checked_add_months(Months::new(months)),
        }
    }

    /// Tick instants between `start` and `end`, both inclusive.
    fn ticks(self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        let mut ticks = Vec::new();
        let Some(mut position) = self.align(start) else {
            return ticks;
        };
        if position < start {
            match self.advance(position) {
                Some(next) => position = next,
                None => return ticks,
            }
        }

        while position <= end && ticks.len() < MAX_AXIS_LABELS {
            ticks.push(position);
            match self.advance(position) {
                Some(next) => position = next,
                None => break,
            }
        }
        ticks
    }
}

/// Short rendering of a sampling step: minutes below an hour, hours below a
/// day, days otherwise.
#[must_use]
pub fn step_label(step: Seconds) -> String {
    if step < 3_600 {
        format!("{}m", step / 60)
    } else if step < SECONDS_PER_DAY {
        format!("{}h", step / 3_600)
    } else {
        format!("{}d", step / SECONDS_PER_DAY)
    }
}

fn to_local(timestamp: Timestamp, offset: FixedOffset) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset).naive_local())
}

fn from_local(local: NaiveDateTime, offset: FixedOffset) -> Timestamp {
    local.and_utc().timestamp() - i64::from(offset.local_minus_utc())
}

/// Computes the time axis of a graph sampled from `start` to `end` every
/// `step` seconds. `width` is the graph width in characters.
///
/// The first and last sample carry no displayed interval, so labelling runs
/// over `[start + step, end - step]` while `range` keeps the full window.
#[must_use]
pub fn compute_graph_t_axis(
    start: Timestamp,
    end: Timestamp,
    width: u32,
    step: Seconds,
    time_zone: TimeAxisTimeZone,
) -> TimeAxis {
    let range = (start, end);
    let (start, end) = (start.saturating_add(step), end.saturating_sub(step));
    let offset = time_zone.fixed_offset();

    let (Some(start_local), Some(end_local)) = (to_local(start, offset), to_local(end, offset))
    else {
        warn!(start, end, "time axis window outside the supported calendar range");
        return TimeAxis {
            labels: Vec::new(),
            range,
            title: step_label(step),
        };
    };

    let span = end - start;
    let start_date = start_local.format("%Y-%m-%d").to_string();
    let title = if start_local.date() == end_local.date() {
        start_date
    } else {
        format!("{start_date} \u{2014} {}", end_local.format("%Y-%m-%d"))
    };

    let format = TimeLabelFormat::select(start_local, end_local, span);
    let text_width = f64::from(width.saturating_sub(TIME_AXIS_RESERVED_CHARS).max(1));
    let label_count = ((text_width / format.size()).trunc()).max(2.0);
    let min_distance = format.min_distance().max(span as f64 / label_count);
    let granularity = TickGranularity::select(min_distance);
    trace!(?format, ?granularity, min_distance, "selected time axis granularity");

    let seconds_per_char = span as f64 / text_width;
    let shift = format.shift();
    let mut labels = Vec::new();
    for tick in granularity.ticks(start_local, end_local) {
        let mut position = from_local(tick, offset);
        let mut text = Some(tick.format(format.pattern()).to_string());
        let mut line_width = MAJOR_TICK_WIDTH;

        if shift != 0 {
            labels.push(TimeAxisLabel {
                timestamp: position,
                text: None,
                line_width,
            });
            line_width = MINOR_TICK_WIDTH;
            position += shift;
        }

        let overruns = text.as_ref().is_some_and(|text| {
            text.chars().count() as f64 / 3.5 * seconds_per_char > (end - position) as f64
        });
        if overruns {
            text = None;
        }
        labels.push(TimeAxisLabel {
            timestamp: position,
            text,
            line_width,
        });

        if labels.len() >= MAX_AXIS_LABELS {
            warn!(start, end, ?granularity, "time axis label limit reached");
            labels.truncate(MAX_AXIS_LABELS);
            break;
        }
    }

    TimeAxis {
        labels,
        range,
        title: format!("{title} @ {}", step_label(step)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{TickGranularity, TimeAxisTimeZone};

    #[test]
    fn granularity_tables_are_searched_in_order() {
        assert_eq!(TickGranularity::select(0.0), TickGranularity::Minutes(1));
        assert_eq!(TickGranularity::select(61.0), TickGranularity::Minutes(2));
        assert_eq!(TickGranularity::select(43_201.0), TickGranularity::Days(1));
        assert_eq!(TickGranularity::select(5.0 * 86_400.0), TickGranularity::Week);
        assert_eq!(TickGranularity::select(40.0 * 86_400.0), TickGranularity::Months(2));
        assert_eq!(TickGranularity::select(1e12), TickGranularity::Months(96));
    }

    #[test]
    fn week_ticks_start_on_monday() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid start");
        let end = NaiveDate::from_ymd_opt(2024, 4, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid end");

        let ticks = TickGranularity::Week.ticks(start, end);
        let dates: Vec<String> = ticks.iter().map(|tick| tick.to_string()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-03-18 00:00:00",
                "2024-03-25 00:00:00",
                "2024-04-01 00:00:00"
            ]
        );
    }

    #[test]
    fn oversized_offsets_fall_back_to_utc() {
        let zone = TimeAxisTimeZone::FixedOffsetMinutes { minutes: 2_000 };
        assert_eq!(zone.fixed_offset().local_minus_utc(), 0);
        let zone = TimeAxisTimeZone::FixedOffsetMinutes { minutes: -90 };
        assert_eq!(zone.fixed_offset().local_minus_utc(), -5_400);
    }
}
