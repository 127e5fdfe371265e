pub mod grid;
pub mod models;

pub use grid::{
    build_month_grid, event_covers_day, parse_civil_date, selected_day_events, today_in_timezone,
    DayCell,
};
pub use models::{CalendarEvent, EventKind};
