use super::models::CalendarEvent;
use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

/// Parse a civil date string, tolerating a trailing time component
pub fn parse_civil_date(input: &str) -> Option<NaiveDate> {
    let date_part = input.split('T').next().unwrap_or(input);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

/// Number of days in the given month, 0 for an invalid year/month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// Build the month grid as week rows of exactly seven cells.
///
/// Weeks run Sunday first. Leading cells carry the trailing days of the
/// previous month, trailing cells the first days of the next month, so
/// every row is complete; a month renders as 5 or 6 rows depending on
/// its length and the weekday of the 1st. An invalid year/month falls
/// back to the current system month.
pub fn build_month_grid(year: i32, month: u32) -> Vec<Vec<DayCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| {
        let today = Local::now().date_naive();
        today.with_day(1).unwrap_or(today)
    });
    let year = first.year();
    let month = first.month();

    let leading = first.weekday().num_days_from_sunday() as i64;
    let days = i64::from(days_in_month(year, month));
    let total = ((leading + days) as u64).div_ceil(7) as i64 * 7;
    let start = first - Duration::days(leading);

    let cells: Vec<DayCell> = (0..total)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DayCell {
                date,
                in_current_month: date.year() == year && date.month() == month,
            }
        })
        .collect();

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

/// Whether an event covers the given day.
///
/// Both ends of the event are normalized to date-only before comparing;
/// the range is inclusive. An event whose start date does not parse
/// never matches (fails closed), and an unparseable end date degrades
/// the event to a single day.
pub fn event_covers_day(event: &CalendarEvent, day: NaiveDate) -> bool {
    let Some(start) = parse_civil_date(&event.start_date) else {
        return false;
    };
    let end = event
        .end_date
        .as_deref()
        .and_then(parse_civil_date)
        .unwrap_or(start);

    start <= day && day <= end.max(start)
}

/// Events covering the given day, in input order.
///
/// The first match is treated as the primary event when a single-event
/// detail panel is shown; no secondary ordering is imposed.
pub fn selected_day_events<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| event_covers_day(event, day))
        .collect()
}

/// Today's civil date in the configured church timezone
pub fn today_in_timezone(timezone: &str) -> NaiveDate {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::Asia::Seoul);
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::models::EventKind;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(start: &str, end: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: "test".to_string(),
            title: "행사".to_string(),
            title_en: None,
            start_date: start.to_string(),
            end_date: end.map(|e| e.to_string()),
            note: None,
            note_en: None,
            kind: EventKind::Default,
        }
    }

    #[test]
    fn test_parse_civil_date() {
        assert_eq!(parse_civil_date("2024-02-29"), Some(date(2024, 2, 29)));
        // A trailing time component is truncated, not an error
        assert_eq!(
            parse_civil_date("2024-02-29T10:30:00"),
            Some(date(2024, 2, 29))
        );

        assert_eq!(parse_civil_date(""), None);
        assert_eq!(parse_civil_date("2023-02-29"), None); // Not a leap year
        assert_eq!(parse_civil_date("02/29/2024"), None);
        assert_eq!(parse_civil_date("soon"), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_grid_rows_are_complete_weeks() {
        for (year, month) in [(2024, 2), (2025, 3), (2025, 6), (2025, 12), (2026, 2)] {
            let grid = build_month_grid(year, month);
            assert!(
                grid.len() == 5 || grid.len() == 6,
                "{}-{} had {} rows",
                year,
                month,
                grid.len()
            );
            for week in &grid {
                assert_eq!(week.len(), 7);
            }
        }
    }

    #[test]
    fn test_grid_dates_are_contiguous() {
        let grid = build_month_grid(2025, 6);
        let cells: Vec<DayCell> = grid.into_iter().flatten().collect();

        for pair in cells.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_grid_starts_on_sunday() {
        for (year, month) in [(2024, 2), (2025, 9), (2026, 1)] {
            let grid = build_month_grid(year, month);
            assert_eq!(
                grid[0][0].date.weekday(),
                chrono::Weekday::Sun,
                "{}-{}",
                year,
                month
            );
        }
    }

    #[test]
    fn test_february_2024_grid() {
        // Leap year, 29 days, the 1st is a Thursday: 4 leading cells,
        // ceil(33 / 7) = 5 rows
        let grid = build_month_grid(2024, 2);
        assert_eq!(grid.len(), 5);

        let cells: Vec<DayCell> = grid.into_iter().flatten().collect();
        assert_eq!(cells.len(), 35);

        // Leading cells show January 28-31
        assert_eq!(cells[0].date, date(2024, 1, 28));
        assert_eq!(cells[3].date, date(2024, 1, 31));
        assert!(cells[..4].iter().all(|cell| !cell.in_current_month));

        // The month itself
        assert_eq!(cells[4].date, date(2024, 2, 1));
        assert!(cells[4..33].iter().all(|cell| cell.in_current_month));

        // Trailing cells show March 1-2
        assert_eq!(cells[33].date, date(2024, 3, 1));
        assert_eq!(cells[34].date, date(2024, 3, 2));
        assert!(cells[33..].iter().all(|cell| !cell.in_current_month));
    }

    #[test]
    fn test_invalid_month_falls_back_to_current_month() {
        let grid = build_month_grid(2025, 0);
        let today = Local::now().date_naive();

        assert!(grid
            .iter()
            .flatten()
            .any(|cell| cell.in_current_month && cell.date.month() == today.month()));
    }

    #[test]
    fn test_single_day_event_is_reflexive() {
        let implicit = event("2025-10-05", None);
        assert!(event_covers_day(&implicit, date(2025, 10, 5)));

        let explicit = event("2025-10-05", Some("2025-10-05"));
        assert!(event_covers_day(&explicit, date(2025, 10, 5)));

        assert!(!event_covers_day(&implicit, date(2025, 10, 4)));
        assert!(!event_covers_day(&implicit, date(2025, 10, 6)));
    }

    #[test]
    fn test_multi_day_event_covers_inclusive_range() {
        let christmas = event("2025-12-24", Some("2025-12-26"));

        assert!(event_covers_day(&christmas, date(2025, 12, 24)));
        assert!(event_covers_day(&christmas, date(2025, 12, 25)));
        assert!(event_covers_day(&christmas, date(2025, 12, 26)));

        assert!(!event_covers_day(&christmas, date(2025, 12, 23)));
        assert!(!event_covers_day(&christmas, date(2025, 12, 27)));
    }

    #[test]
    fn test_multi_day_event_appears_on_exactly_its_range() {
        let christmas = event("2025-12-24", Some("2025-12-26"));
        let grid = build_month_grid(2025, 12);

        let covered: Vec<NaiveDate> = grid
            .iter()
            .flatten()
            .filter(|cell| event_covers_day(&christmas, cell.date))
            .map(|cell| cell.date)
            .collect();

        assert_eq!(
            covered,
            vec![date(2025, 12, 24), date(2025, 12, 25), date(2025, 12, 26)]
        );
    }

    #[test]
    fn test_malformed_start_date_fails_closed() {
        let broken = event("someday", None);
        let grid = build_month_grid(2025, 12);

        assert!(grid
            .iter()
            .flatten()
            .all(|cell| !event_covers_day(&broken, cell.date)));
    }

    #[test]
    fn test_malformed_end_date_degrades_to_single_day() {
        let degraded = event("2025-12-24", Some("whenever"));

        assert!(event_covers_day(&degraded, date(2025, 12, 24)));
        assert!(!event_covers_day(&degraded, date(2025, 12, 25)));
    }

    #[test]
    fn test_selected_day_events_preserve_input_order() {
        let events = vec![
            event("2025-12-25", None),
            event("2025-12-24", Some("2025-12-26")),
            event("2025-12-20", None),
        ];

        let selected = selected_day_events(&events, date(2025, 12, 25));
        assert_eq!(selected.len(), 2);
        // First match in input order is the primary event
        assert_eq!(selected[0].start_date, "2025-12-25");
        assert_eq!(selected[1].start_date, "2025-12-24");
    }

    #[test]
    fn test_today_in_timezone_falls_back_on_bad_zone() {
        // No panic, still a plausible date
        let today = today_in_timezone("Mars/Olympus_Mons");
        assert!(today.year() >= 2024);
    }
}
