use crate::{CalendarDate, ViewGranularity};

/// The value a host pushes into a [`crate::Datepicker`].
///
/// `Uncontrolled` leaves the selection to the picker. `Empty` is a controlled
/// "no date", which shows the placeholder label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ControlledValue {
    #[default]
    Uncontrolled,
    Empty,
    Date(CalendarDate),
}

impl ControlledValue {
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Uncontrolled | Self::Empty => None,
        }
    }
}

impl From<Option<CalendarDate>> for ControlledValue {
    fn from(value: Option<CalendarDate>) -> Self {
        value.map_or(Self::Empty, Self::Date)
    }
}

/// Everything a picker remembers between events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DatepickerState {
    /// Popup visibility. Ignored when inline.
    pub is_open: bool,

    pub view: ViewGranularity,

    /// Anchor of the displayed grid.
    pub view_date: CalendarDate,

    pub selected: Option<CalendarDate>,

    /// The default value clamped into the current bounds.
    pub initial: Option<CalendarDate>,

    /// Last value pushed by the host.
    pub controlled: ControlledValue,

    /// Set by [`crate::DatepickerHandle::focus`], cleared when the host takes it.
    pub focus_requested: bool,
}

impl DatepickerState {
    /// `selected` is expected to be in range already.
    pub(crate) fn new(
        selected: Option<CalendarDate>,
        initial: Option<CalendarDate>,
        controlled: ControlledValue,
        today: CalendarDate,
        is_open: bool,
    ) -> Self {
        Self {
            is_open,
            view: ViewGranularity::Days,
            view_date: selected.unwrap_or(today),
            selected,
            initial,
            controlled,
            focus_requested: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_date_falls_back_to_today() {
        let ymd = |d| CalendarDate::from_ymd(2024, 1, d).unwrap();

        let state = DatepickerState::new(
            Some(ymd(12)),
            Some(ymd(10)),
            ControlledValue::Date(ymd(12)),
            ymd(30),
            false,
        );
        assert_eq!(state.view_date, ymd(12));
        assert!(!state.focus_requested);

        let state = DatepickerState::new(None, None, ControlledValue::Empty, ymd(30), true);
        assert_eq!(state.selected, None);
        assert_eq!(state.view_date, ymd(30));
        assert_eq!(state.view, ViewGranularity::Days);
        assert!(state.is_open);
    }
}
