//! Time-of-day option enumeration for picker panels.
//!
//! Two modes share one entry point, [`build_time_panel`]:
//!
//! - **Wheel mode** — independent hour/minute/second scroll lists. Minutes
//!   honor a step (every multiple of the step below 60); a step of 0 requests
//!   full precision, which means a minute step of 1 plus a seconds wheel.
//! - **Slot-list mode** — a finite list of clock times, either expanded from
//!   a textual start/end/step span or returned verbatim by a caller-supplied
//!   generator.
//!
//! Slot-list configuration that fails to parse, or yields nothing, is not an
//! error: the panel falls back to wheel mode, which is the caller-visible
//! contract the rendering layer relies on.

use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};
use crate::value::{DateValue, FieldPatch};

/// Injected capability deciding whether a candidate time is selectable.
///
/// Like the grid's date predicate, this is caller code: a panic inside it
/// propagates out of the builder.
pub trait DisabledTime {
    fn is_disabled(&self, time: DateValue) -> bool;
}

impl<F: Fn(DateValue) -> bool> DisabledTime for F {
    fn is_disabled(&self, time: DateValue) -> bool {
        self(time)
    }
}

/// A predicate that disables nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDisabledTimes;

impl DisabledTime for NoDisabledTimes {
    fn is_disabled(&self, _time: DateValue) -> bool {
        false
    }
}

/// Caller-supplied slot source, invoked with no arguments; whatever it
/// returns is used verbatim. An empty result simply falls back to wheel mode.
pub trait SlotGenerator {
    fn slots(&self) -> Vec<TimeSlot>;
}

impl<F: Fn() -> Vec<TimeSlot>> SlotGenerator for F {
    fn slots(&self) -> Vec<TimeSlot> {
        self()
    }
}

/// One entry of an hour/minute/second wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelEntry {
    pub value: u32,
    /// Two-digit display label ("05").
    pub label: String,
    pub actived: bool,
    pub disabled: bool,
}

/// The three wheel columns. `seconds` is present only in full-precision mode
/// (minute step 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wheel {
    pub hours: Vec<WheelEntry>,
    pub minutes: Vec<WheelEntry>,
    pub seconds: Option<Vec<WheelEntry>>,
}

/// One discrete clock time of a slot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub label: String,
    pub actived: bool,
    pub disabled: bool,
}

/// A textual clock span: `"HH:MM"` start, end, and step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRangeSpec {
    pub start: String,
    pub end: String,
    pub step: String,
}

/// How slot labels spell clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LabelStyle {
    /// `"13:30"`.
    #[default]
    Hour24,
    /// `"01:30 pm"`, or `"01:30 PM"` with `uppercase`.
    Hour12 { uppercase: bool },
}

/// Where a slot list comes from.
pub enum TimeOptions<'a> {
    Range(TimeRangeSpec),
    Generator(&'a dyn SlotGenerator),
}

/// Configuration for one panel build.
///
/// `now` is the caller-sampled current instant (sampled once per build, like
/// the grid's `today`); it anchors the candidate times handed to the
/// `disabled` predicate when nothing is selected yet.
pub struct TimePanelConfig<'a> {
    /// Slot-list configuration; `None` means wheel mode.
    pub options: Option<TimeOptions<'a>>,
    /// Minute wheel step, 0..=60. 0 requests full precision.
    pub minute_step: u32,
    pub label_style: LabelStyle,
    pub selected: Option<DateValue>,
    pub now: DateValue,
    pub disabled: &'a dyn DisabledTime,
}

/// What the rendering layer gets back: either a finite slot list or the
/// wheel columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TimePanel {
    Slots(Vec<TimeSlot>),
    Wheel(Wheel),
}

/// Parse a `"HH:MM"` clock string into hours and minutes. Returns `None` on
/// anything unparsable — never an error.
pub fn parse_clock(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.split(':');
    let hours = parts.next()?.parse().ok()?;
    let minutes = parts.next()?.parse().ok()?;
    Some((hours, minutes))
}

/// Spell a clock time per the label style.
pub fn format_clock(hour: u32, minute: u32, style: LabelStyle) -> String {
    match style {
        LabelStyle::Hour24 => format!("{hour:02}:{minute:02}"),
        LabelStyle::Hour12 { uppercase } => {
            let h12 = match hour % 12 {
                0 => 12,
                h => h,
            };
            let suffix = match (hour >= 12, uppercase) {
                (false, false) => "am",
                (false, true) => "AM",
                (true, false) => "pm",
                (true, true) => "PM",
            };
            format!("{h12:02}:{minute:02} {suffix}")
        }
    }
}

/// The selection's (hour, minute, second), or midnight when nothing is
/// selected — an unselected panel highlights 00:00:00.
fn current_fields(selected: Option<DateValue>) -> (u32, u32, u32) {
    selected.map_or((0, 0, 0), |v| (v.hour(), v.minute(), v.second()))
}

/// The date the candidate times are anchored on: the selection, or today at
/// midnight.
fn base_date(cfg: &TimePanelConfig<'_>) -> DateValue {
    cfg.selected.unwrap_or_else(|| cfg.now.start_of_day())
}

/// Build one wheel column over `values`, substituting `patch` per candidate.
fn wheel_column(
    base: DateValue,
    values: impl Iterator<Item = u32>,
    current: u32,
    patch: impl Fn(u32) -> FieldPatch,
    disabled: &dyn DisabledTime,
) -> Result<Vec<WheelEntry>> {
    values
        .map(|value| {
            let candidate = base.set(patch(value))?;
            Ok(WheelEntry {
                value,
                label: format!("{value:02}"),
                actived: value == current,
                disabled: disabled.is_disabled(candidate),
            })
        })
        .collect()
}

/// Build the hour/minute/second wheels.
///
/// # Errors
///
/// Returns [`PickerError::InvalidStep`] when `minute_step` exceeds 60, or
/// [`PickerError::InvalidDate`] when a candidate time is not representable.
pub fn build_wheel(cfg: &TimePanelConfig<'_>) -> Result<Wheel> {
    if cfg.minute_step > 60 {
        return Err(PickerError::InvalidStep(format!(
            "minute step {} is not in 0..=60",
            cfg.minute_step
        )));
    }

    let base = base_date(cfg);
    let (cur_hour, cur_minute, cur_second) = current_fields(cfg.selected);

    let hours = wheel_column(
        base,
        0..24,
        cur_hour,
        |h| FieldPatch {
            hour: Some(h as i32),
            ..FieldPatch::default()
        },
        cfg.disabled,
    )?;

    let step = if cfg.minute_step == 0 { 1 } else { cfg.minute_step };
    let minutes = wheel_column(
        base,
        (0..60).step_by(step as usize),
        cur_minute,
        |m| FieldPatch {
            minute: Some(m as i32),
            ..FieldPatch::default()
        },
        cfg.disabled,
    )?;

    let seconds = if cfg.minute_step == 0 {
        Some(wheel_column(
            base,
            0..60,
            cur_second,
            |s| FieldPatch {
                second: Some(s as i32),
                ..FieldPatch::default()
            },
            cfg.disabled,
        )?)
    } else {
        None
    };

    Ok(Wheel {
        hours,
        minutes,
        seconds,
    })
}

/// Expand a [`TimeRangeSpec`] into slots: `floor((end - start) / step) + 1`
/// entries at `start + i * step` minutes. Unparsable or non-positive pieces
/// yield an empty list, not an error.
fn slots_from_range(spec: &TimeRangeSpec, cfg: &TimePanelConfig<'_>) -> Result<Vec<TimeSlot>> {
    let (Some(start), Some(end), Some(step)) = (
        parse_clock(&spec.start),
        parse_clock(&spec.end),
        parse_clock(&spec.step),
    ) else {
        return Ok(Vec::new());
    };
    // Saturating: parse_clock does not bound magnitudes, so keep absurd
    // spans from overflowing instead of panicking.
    let start_minutes = start.0.saturating_mul(60).saturating_add(start.1);
    let end_minutes = end.0.saturating_mul(60).saturating_add(end.1);
    let step_minutes = step.0.saturating_mul(60).saturating_add(step.1);
    if step_minutes == 0 || end_minutes < start_minutes {
        return Ok(Vec::new());
    }

    let base = base_date(cfg);
    let (cur_hour, cur_minute, _) = current_fields(cfg.selected);
    let len = (end_minutes - start_minutes) / step_minutes;

    let mut slots = Vec::with_capacity(len as usize + 1);
    for i in 0..=len {
        let total = start_minutes + i * step_minutes;
        let (hour, minute) = (total / 60, total % 60);
        let candidate = base.set(FieldPatch {
            hour: Some(hour as i32),
            minute: Some(minute as i32),
            second: Some(0),
            ..FieldPatch::default()
        })?;
        slots.push(TimeSlot {
            hour,
            minute,
            label: format_clock(hour, minute, cfg.label_style),
            actived: hour == cur_hour && minute == cur_minute,
            disabled: cfg.disabled.is_disabled(candidate),
        });
    }
    Ok(slots)
}

/// Build the time panel: slot list when configured and non-empty, wheel
/// otherwise.
///
/// # Errors
///
/// Returns [`PickerError::InvalidStep`] for an out-of-range minute step and
/// [`PickerError::InvalidDate`] for unrepresentable candidate times. Slot
/// configuration that merely fails to parse is not an error — it falls back
/// to the wheel.
pub fn build_time_panel(cfg: &TimePanelConfig<'_>) -> Result<TimePanel> {
    if let Some(options) = &cfg.options {
        let slots = match options {
            TimeOptions::Range(spec) => slots_from_range(spec, cfg)?,
            TimeOptions::Generator(generator) => generator.slots(),
        };
        if !slots.is_empty() {
            return Ok(TimePanel::Slots(slots));
        }
    }
    Ok(TimePanel::Wheel(build_wheel(cfg)?))
}
