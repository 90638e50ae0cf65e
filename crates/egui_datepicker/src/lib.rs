//! A date picker for [`egui`] built on the headless [`datepicker`] core.
//!
//! [`DatepickerInput`] draws a button showing the selected date. Clicking it
//! opens a popup with a header (prev, view title, next), the grid of the
//! current view, and a footer with Clear and Today.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod input;
mod popup;

pub use datepicker::{
    self, CalendarDate, Datepicker, DatepickerHandle, DatepickerOptions, TodayPolicy,
    ViewGranularity, WeekStart,
};

pub use crate::input::DatepickerInput;

use crate::input::PickerMemory;

/// Run `f` on the imperative handle of the picker stored under `id`.
///
/// Use the same `id` as [`DatepickerInput::id`]. Returns `None` if that
/// picker has not been shown yet.
///
/// A [`DatepickerHandle::focus`] request gives the input keyboard focus on
/// its next frame.
pub fn with_handle<R>(
    ctx: &egui::Context,
    id: egui::Id,
    f: impl FnOnce(&mut dyn DatepickerHandle) -> R,
) -> Option<R> {
    let mut memory = ctx.data_mut(|data| data.get_temp::<PickerMemory>(id))?;
    // Commits from the widget's own frames were already written back.
    let _ = memory.picker.take_commit();
    let result = f(&mut memory.picker);
    if let Some(commit) = memory.picker.take_commit() {
        memory.pending = Some(commit);
    }
    ctx.data_mut(|data| data.insert_temp(id, memory));
    ctx.request_repaint();
    Some(result)
}
