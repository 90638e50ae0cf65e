//! A headless datepicker.
//!
//! This crate holds everything a date picker widget needs except the drawing:
//! calendar arithmetic ([`date`]), locale-aware formatting ([`locale`]),
//! the Days → Months → Years → Decades navigation ([`ViewGranularity`]),
//! the cells of each grid ([`grid`]), and the selection controller
//! ([`Datepicker`]) that ties them together.
//!
//! A UI host owns one [`Datepicker`] per widget, feeds it pointer and focus
//! events, and renders [`Datepicker::grid`] however it likes.
//! See `egui_datepicker` for an [`egui`](https://docs.rs/egui) host.
//!
//! ```
//! use datepicker::{CalendarDate, Datepicker, DatepickerOptions, FixedClock};
//!
//! let today = CalendarDate::from_ymd(2024, 3, 14).unwrap();
//! let mut picker = Datepicker::with_clock(DatepickerOptions::default(), FixedClock(today));
//!
//! picker.focus_input();
//! assert!(picker.is_open());
//!
//! // Pick the 20th of March:
//! let cell = picker.grid().into_iter().find(|cell| cell.label == "20").unwrap();
//! picker.activate_cell(cell.index);
//! assert_eq!(picker.selected(), CalendarDate::from_ymd(2024, 3, 20).ok());
//! assert!(!picker.is_open(), "auto-hide closes the popup after a commit");
//! ```
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

pub mod date;
mod error;
pub mod grid;
pub mod locale;
mod options;
mod picker;
mod state;
pub mod theme;
mod view;

pub use crate::{
    date::{CalendarDate, OverflowPolicy, WeekStart},
    error::{DateError, LocaleError},
    grid::{CellAction, GridCell, GridContext},
    locale::{DateFormat, DateFormatter, Locale},
    options::{DatepickerOptions, TodayPolicy},
    picker::{
        ChangeCallback, Clock, Commit, Datepicker, DatepickerHandle, FixedClock, PointerTarget,
        SystemClock,
    },
    state::{ControlledValue, DatepickerState},
    theme::DatepickerTheme,
    view::ViewGranularity,
};
