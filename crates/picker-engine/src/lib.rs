//! # picker-engine
//!
//! Deterministic calendar computation for date/time picker UIs.
//!
//! The engine produces the structured data behind a calendar widget set —
//! the 6×7 month grid with per-cell classification, and the selectable
//! time-of-day option lists — as pure functions of (date inputs,
//! configuration). Rendering, event wiring, styling, and locale strings are
//! external collaborators: they call in with concrete dates and draw
//! whatever comes back.
//!
//! All functions take explicit inputs (no system clock access inside a
//! build) — the caller samples the "now" anchor once per build and passes it
//! in, keeping every build deterministic, testable, and safe to run from any
//! number of threads at once.
//!
//! ## Modules
//!
//! - [`grid`] — 42-cell month grid generation, cell classification, and the
//!   month-selection list
//! - [`timeslot`] — hour/minute/second wheels and discrete time-slot lists
//! - [`value`] — immutable UTC calendar values with normalizing field math
//! - [`pattern`] — the token format/parse contract for date strings
//! - [`error`] — error types

pub mod error;
pub mod grid;
pub mod pattern;
pub mod timeslot;
pub mod value;

pub use error::PickerError;
pub use grid::{
    build_grid, cell_title, classify_cell, classify_grid, month_options, weekday_header,
    CellClasses, CellContext, DisabledDate, DisabledMonth, GridCell, MonthEntry, MonthTag,
    NoDisabledDates, NoDisabledMonths, GRID_CELLS,
};
pub use timeslot::{
    build_time_panel, build_wheel, format_clock, parse_clock, DisabledTime, LabelStyle,
    NoDisabledTimes, SlotGenerator, TimeOptions, TimePanel, TimePanelConfig, TimeRangeSpec,
    TimeSlot, Wheel, WheelEntry,
};
pub use value::{days_in_month, DateValue, FieldPatch};
