//! Calendar grid generation and cell classification.
//!
//! A month view is always a 6×7 grid: the displayed month's days plus enough
//! leading days from the previous month to align the first row on the
//! configured week start, padded with trailing days from the next month up to
//! 42 cells. [`build_grid`] produces the cells; [`classify_cell`] /
//! [`classify_grid`] attach the tags a rendering layer turns into styles.
//!
//! Month membership is decided through the linear month index
//! (`year * 12 + month - 1`), never by comparing raw month numbers — raw
//! comparison tags December leading cells of a January view as "next month"
//! because 12 > 1.

use serde::Serialize;

use crate::error::{PickerError, Result};
use crate::value::{linear_month_index, DateValue};

/// Cell count of the fixed 6×7 month view.
pub const GRID_CELLS: usize = 42;

/// Injected capability deciding whether a calendar day is selectable.
///
/// Implementations are caller-supplied; if one panics, the panic propagates
/// out of the builder untouched — a defective predicate is a caller bug the
/// core does not paper over.
pub trait DisabledDate {
    fn is_disabled(&self, date: DateValue) -> bool;
}

impl<F: Fn(DateValue) -> bool> DisabledDate for F {
    fn is_disabled(&self, date: DateValue) -> bool {
        self(date)
    }
}

/// A predicate that disables nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDisabledDates;

impl DisabledDate for NoDisabledDates {
    fn is_disabled(&self, _date: DateValue) -> bool {
        false
    }
}

/// Injected capability deciding whether a month (1..=12) is selectable in
/// the month-selection view. Panics propagate like the date predicate's.
pub trait DisabledMonth {
    fn is_disabled(&self, month: u32) -> bool;
}

impl<F: Fn(u32) -> bool> DisabledMonth for F {
    fn is_disabled(&self, month: u32) -> bool {
        self(month)
    }
}

/// A predicate that disables nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDisabledMonths;

impl DisabledMonth for NoDisabledMonths {
    fn is_disabled(&self, _month: u32) -> bool {
        false
    }
}

/// One cell of the month-selection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthEntry {
    /// Month number, 1..=12. The rendering layer maps it to a localized name.
    pub month: u32,
    pub actived: bool,
    pub disabled: bool,
}

/// One day slot of the 6×7 grid.
///
/// `month` is a raw month coordinate relative to the displayed year and may
/// leave 1..=12: a January view carries its leading December cells as
/// `month = 0`, a December view its trailing January cells as `month = 13`.
/// `day` is always the literal 1-based day within that (year, month) — a
/// leading cell shows the previous month's real day number, never zero or a
/// negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub year: i32,
    pub month: i32,
    pub day: u32,
}

impl GridCell {
    /// Resolve this cell to a midnight [`DateValue`], normalizing the raw
    /// month coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDate`] when the coordinates are not
    /// representable.
    pub fn date(self) -> Result<DateValue> {
        DateValue::from_ymd(self.year, self.month, self.day as i32)
    }
}

/// Which month a cell belongs to, relative to the displayed one. Exactly one
/// tag applies to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthTag {
    LastMonth,
    CurMonth,
    NextMonth,
}

impl MonthTag {
    fn css_class(self) -> &'static str {
        match self {
            MonthTag::LastMonth => "last-month",
            MonthTag::CurMonth => "cur-month",
            MonthTag::NextMonth => "next-month",
        }
    }
}

/// The classification of one grid cell. The month tag is always present;
/// the boolean tags are additive, except that `in_range` is never set
/// together with `actived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellClasses {
    pub month_tag: MonthTag,
    pub today: bool,
    pub disabled: bool,
    pub actived: bool,
    pub in_range: bool,
}

impl CellClasses {
    /// The class names the rendering layer's stylesheet contract expects, in
    /// render order.
    pub fn css_classes(&self) -> Vec<&'static str> {
        let mut classes = vec![self.month_tag.css_class()];
        if self.today {
            classes.push("today");
        }
        if self.disabled {
            classes.push("disabled");
        }
        if self.actived {
            classes.push("actived");
        }
        if self.in_range {
            classes.push("inrange");
        }
        classes
    }
}

/// Everything [`classify_cell`] needs besides the cell itself.
///
/// `today` is the caller-sampled current instant. Sample it once per grid
/// build and reuse it for all 42 cells, so a build spanning a UTC midnight
/// rollover cannot tag two different cells as "today".
///
/// `range_start` / `range_end` switch on range mode: when `range_start` is
/// present, cells on or before the selected day are `in_range`; when
/// `range_end` is present, cells on or after it are.
pub struct CellContext<'a> {
    pub calendar_year: i32,
    pub calendar_month: u32,
    pub today: DateValue,
    pub selected: Option<DateValue>,
    pub range_start: Option<DateValue>,
    pub range_end: Option<DateValue>,
    pub disabled: &'a dyn DisabledDate,
}

/// Build the 42-cell grid for one month view, row-major, 6 rows of 7.
///
/// # Arguments
///
/// * `year` / `month` — the displayed month, `month` in 1..=12
/// * `first_day_of_week` — ISO weekday of the leftmost column, 1 = Monday ..
///   7 = Sunday
///
/// The number of leading cells is `(weekday(day 1) + 7 - first_day_of_week)
/// % 7`, so when day 1 already falls on the week-start column the view opens
/// directly with the current month.
///
/// # Errors
///
/// Returns [`PickerError::InvalidMonth`] or [`PickerError::InvalidWeekStart`]
/// for out-of-range arguments, [`PickerError::InvalidDate`] when the month is
/// not representable.
pub fn build_grid(year: i32, month: u32, first_day_of_week: u8) -> Result<Vec<GridCell>> {
    if !(1..=12).contains(&month) {
        return Err(PickerError::InvalidMonth(format!(
            "{month} is not in 1..=12"
        )));
    }
    if !(1..=7).contains(&first_day_of_week) {
        return Err(PickerError::InvalidWeekStart(format!(
            "{first_day_of_week} is not in 1..=7 (1 = Monday .. 7 = Sunday)"
        )));
    }

    let month = month as i32;
    let day1 = DateValue::from_ymd(year, month, 1)?;
    let leading = (u32::from(day1.weekday()) + 7 - u32::from(first_day_of_week)) % 7;
    // Day 0 of the displayed month is the previous month's last day.
    let prev_last = DateValue::from_ymd(year, month, 0)?.day();
    // Day 0 of the following month is this month's last day.
    let cur_len = DateValue::from_ymd(year, month + 1, 0)?.day();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for i in 0..leading {
        cells.push(GridCell {
            year,
            month: month - 1,
            day: prev_last - leading + 1 + i,
        });
    }
    for day in 1..=cur_len {
        cells.push(GridCell { year, month, day });
    }
    let trailing = (GRID_CELLS - cells.len()) as u32;
    for day in 1..=trailing {
        cells.push(GridCell {
            year,
            month: month + 1,
            day,
        });
    }
    Ok(cells)
}

/// The weekday numbers of the header row, left to right, starting at
/// `first_day_of_week`.
///
/// The rendering layer maps these to localized day names; the core only
/// decides the rotation.
///
/// # Errors
///
/// Returns [`PickerError::InvalidWeekStart`] when `first_day_of_week` is not
/// in 1..=7.
pub fn weekday_header(first_day_of_week: u8) -> Result<[u8; 7]> {
    if !(1..=7).contains(&first_day_of_week) {
        return Err(PickerError::InvalidWeekStart(format!(
            "{first_day_of_week} is not in 1..=7 (1 = Monday .. 7 = Sunday)"
        )));
    }
    let mut header = [0u8; 7];
    for (i, slot) in header.iter_mut().enumerate() {
        let wd = (u32::from(first_day_of_week) - 1 + i as u32) % 7 + 1;
        *slot = wd as u8;
    }
    Ok(header)
}

/// The twelve cells of the month-selection view for one calendar year.
///
/// A month is `actived` only when the selection falls in `calendar_year` —
/// selecting June 2024 highlights nothing while the view shows 2025. The
/// `disabled` predicate receives the month number, not a date.
pub fn month_options(
    calendar_year: i32,
    selected: Option<DateValue>,
    disabled: &dyn DisabledMonth,
) -> Vec<MonthEntry> {
    (1..=12)
        .map(|month| MonthEntry {
            month,
            actived: selected
                .is_some_and(|s| s.year() == calendar_year && s.month() == month),
            disabled: disabled.is_disabled(month),
        })
        .collect()
}

/// Classify one cell against the displayed month and selection state.
///
/// # Errors
///
/// Returns [`PickerError::InvalidDate`] when the cell's coordinates are not
/// representable. A panicking `disabled` predicate propagates to the caller.
pub fn classify_cell(cell: GridCell, ctx: &CellContext<'_>) -> Result<CellClasses> {
    let cell_date = cell.date()?;

    let calendar_linear = linear_month_index(ctx.calendar_year, ctx.calendar_month as i32);
    let cell_linear = linear_month_index(cell.year, cell.month);
    let month_tag = match cell_linear.cmp(&calendar_linear) {
        std::cmp::Ordering::Less => MonthTag::LastMonth,
        std::cmp::Ordering::Equal => MonthTag::CurMonth,
        std::cmp::Ordering::Greater => MonthTag::NextMonth,
    };

    let today = ctx.today.same_day(cell_date);
    let disabled = ctx.disabled.is_disabled(cell_date);

    let (actived, in_range) = match ctx.selected {
        None => (false, false),
        Some(selected) if selected.same_day(cell_date) => (true, false),
        Some(selected) => {
            let cell_day = cell_date.start_of_day();
            let selected_day = selected.start_of_day();
            let in_range = (ctx.range_start.is_some() && cell_day <= selected_day)
                || (ctx.range_end.is_some() && cell_day >= selected_day);
            (false, in_range)
        }
    };

    Ok(CellClasses {
        month_tag,
        today,
        disabled,
        actived,
        in_range,
    })
}

/// Classify a whole grid with one shared context (and therefore one shared
/// "today" reference).
///
/// # Errors
///
/// Propagates the first [`classify_cell`] failure.
pub fn classify_grid(cells: &[GridCell], ctx: &CellContext<'_>) -> Result<Vec<CellClasses>> {
    cells.iter().map(|&cell| classify_cell(cell, ctx)).collect()
}

/// The formatted full date a rendering layer puts in a cell's hover title
/// (see [`crate::pattern`] for the token set).
///
/// # Errors
///
/// Returns [`PickerError::InvalidDate`] when the cell's coordinates are not
/// representable.
pub fn cell_title(cell: GridCell, date_format: &str) -> Result<String> {
    Ok(cell.date()?.format(date_format))
}
