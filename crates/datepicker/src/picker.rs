use std::sync::Arc;

use crate::{
    CalendarDate, ControlledValue, DateFormat, DateFormatter, DatepickerOptions, DatepickerState,
    GridCell, GridContext, Locale, TodayPolicy, ViewGranularity,
    date::clamp_into_range,
    grid,
};

/// Where "today" comes from.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// The local date of the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        chrono::Local::now().date_naive().into()
    }
}

/// Always the same day. Handy for tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

/// Called with the new selection on every commit, including `None`.
pub type ChangeCallback = Arc<dyn Fn(Option<CalendarDate>) + Send + Sync>;

/// A committed selection, returned by the operations that commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Commit {
    pub date: Option<CalendarDate>,
}

/// What a pointer went down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    Popup,
    Outside,
}

/// The imperative surface a host exposes to its parent.
pub trait DatepickerHandle {
    /// Focus the input: move the grid to the selection and open the popup.
    fn focus(&mut self);

    /// Reset to the default value.
    fn clear(&mut self);
}

/// The selection controller of one datepicker widget.
///
/// Owns the [`DatepickerState`] and performs every transition on it. All
/// grids are computed on demand from the current state, so a mutation is
/// visible to the next [`Self::grid`] call.
#[derive(Clone)]
pub struct Datepicker {
    options: DatepickerOptions,
    state: DatepickerState,
    formatter: Arc<dyn DateFormatter + Send + Sync>,

    /// The formatter was set by the host and is kept across language changes.
    custom_formatter: bool,

    clock: Arc<dyn Clock + Send + Sync>,
    on_change: Option<ChangeCallback>,

    /// Set by every [`Self::select`], cleared by [`Self::take_commit`].
    last_commit: Option<Commit>,
}

impl std::fmt::Debug for Datepicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datepicker")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("custom_formatter", &self.custom_formatter)
            .field("on_change", &self.on_change.is_some())
            .field("last_commit", &self.last_commit)
            .finish_non_exhaustive()
    }
}

impl Datepicker {
    /// A picker using the system clock.
    pub fn new(options: DatepickerOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }

    pub fn with_clock(
        options: DatepickerOptions,
        clock: impl Clock + Send + Sync + 'static,
    ) -> Self {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(clock);
        let initial = options.clamped_default();
        let state = DatepickerState::new(
            initial,
            initial,
            ControlledValue::Uncontrolled,
            clock.today(),
            options.open,
        );
        Self {
            formatter: Arc::new(Locale::resolve_or_default(&options.language)),
            custom_formatter: false,
            options,
            state,
            clock,
            on_change: None,
            last_commit: None,
        }
    }

    /// Start out controlled by `value`.
    #[inline]
    pub fn controlled(mut self, value: impl Into<ControlledValue>) -> Self {
        let controlled = value.into();
        let selected = controlled
            .date()
            .map(|date| self.clamp(date))
            .or(self.state.initial);
        self.state = DatepickerState::new(
            selected,
            self.state.initial,
            controlled,
            self.clock.today(),
            self.state.is_open,
        );
        self
    }

    /// Replace the locale-based formatter.
    #[inline]
    pub fn formatter(mut self, formatter: impl DateFormatter + Send + Sync + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self.custom_formatter = true;
        self
    }

    /// Register the change callback.
    #[inline]
    pub fn on_change(
        mut self,
        on_change: impl Fn(Option<CalendarDate>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    // ------------------------------------------------------------------------
    // Accessors

    pub fn options(&self) -> &DatepickerOptions {
        &self.options
    }

    pub fn state(&self) -> &DatepickerState {
        &self.state
    }

    pub fn selected(&self) -> Option<CalendarDate> {
        self.state.selected
    }

    pub fn view(&self) -> ViewGranularity {
        self.state.view
    }

    pub fn view_date(&self) -> CalendarDate {
        self.state.view_date
    }

    /// Popup visibility as last set. See also [`Self::is_popup_visible`].
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Whether the calendar body should be drawn: always when inline.
    pub fn is_popup_visible(&self) -> bool {
        self.options.inline || self.state.is_open
    }

    // ------------------------------------------------------------------------
    // Grids

    pub fn grid_context(&self) -> GridContext<'_> {
        GridContext {
            view_date: self.state.view_date,
            selected: self.state.selected,
            min_date: self.options.min_date,
            max_date: self.options.max_date,
            week_start: self.options.week_start,
            overflow: self.options.overflow,
            formatter: self.formatter.as_ref(),
        }
    }

    /// The cells of the current view.
    pub fn grid(&self) -> Vec<GridCell> {
        grid::cells(self.state.view, &self.grid_context())
    }

    /// The weekday row above the day grid.
    pub fn weekday_header(&self) -> Vec<String> {
        grid::weekday_header(&self.grid_context())
    }

    /// Label of the header button.
    pub fn title(&self) -> String {
        self.state
            .view
            .title(self.state.view_date, self.formatter.as_ref())
    }

    /// Text for the input surface.
    ///
    /// An explicitly empty value shows the placeholder label, or nothing.
    pub fn display_value(&self) -> String {
        if self.state.controlled == ControlledValue::Empty {
            return self.options.label.clone().unwrap_or_default();
        }
        let date = self.state.selected.unwrap_or_else(|| self.clock.today());
        self.formatter.format_date(date, &DateFormat::default())
    }

    // ------------------------------------------------------------------------
    // Navigation

    pub fn prev_page(&mut self) {
        self.page(-1);
    }

    pub fn next_page(&mut self) {
        self.page(1);
    }

    fn page(&mut self, pages: i32) {
        let view = self.state.view;
        self.state.view_date = view.page(self.state.view_date, pages, self.options.overflow);
        log::trace!("{view:?} page {pages:+}: view date {}", self.state.view_date);
    }

    /// The header button: Days → Months → Years → Decades.
    pub fn drill_up(&mut self) {
        self.set_view(self.state.view.coarser());
    }

    pub fn set_view(&mut self, view: ViewGranularity) {
        if self.state.view != view {
            log::trace!("view {:?} -> {view:?}", self.state.view);
            self.state.view = view;
        }
    }

    pub fn set_view_date(&mut self, view_date: CalendarDate) {
        self.state.view_date = view_date;
    }

    pub fn open(&mut self) {
        self.state.is_open = true;
    }

    pub fn close(&mut self) {
        self.state.is_open = false;
    }

    // ------------------------------------------------------------------------
    // Commits

    /// Set the selection and notify the change callback.
    ///
    /// Closes the popup when auto-hide is on, the day view is shown and the
    /// picker is not inline.
    pub fn select(&mut self, date: Option<CalendarDate>) -> Commit {
        log::debug!("select {date:?}");
        self.state.selected = date;
        if let Some(on_change) = &self.on_change {
            on_change(date);
        }
        if self.options.auto_hide
            && self.state.view == ViewGranularity::Days
            && !self.options.inline
        {
            self.state.is_open = false;
        }
        let commit = Commit { date };
        self.last_commit = Some(commit);
        commit
    }

    /// The latest commit not taken yet.
    ///
    /// Lets a host learn about commits made through [`DatepickerHandle`],
    /// whose methods return nothing.
    pub fn take_commit(&mut self) -> Option<Commit> {
        self.last_commit.take()
    }

    /// Activate the cell at `index` of [`Self::grid`].
    ///
    /// Day cells commit; the others drill down. Disabled cells do nothing.
    pub fn activate_cell(&mut self, index: usize) -> Option<Commit> {
        let cell = self.grid().into_iter().nth(index)?;
        if cell.disabled {
            log::trace!("ignoring disabled cell {}", cell.date);
            return None;
        }
        match cell.action {
            grid::CellAction::Commit(date) => Some(self.select(Some(date))),
            grid::CellAction::DrillDown { view_date, view } => {
                self.state.view_date = view_date;
                self.set_view(view);
                None
            }
        }
    }

    /// Select the current date and show it.
    pub fn today(&mut self) -> Commit {
        let today = match self.options.today_policy {
            TodayPolicy::IgnoreRange => self.clock.today(),
            TodayPolicy::ClampToRange => self.clamp(self.clock.today()),
        };
        let commit = self.select(Some(today));
        self.state.view_date = today;
        commit
    }

    /// Reset to the clamped default value, which may be `None`.
    pub fn clear(&mut self) -> Commit {
        log::debug!("clear");
        let commit = self.select(self.state.initial);
        if let Some(default_value) = self.options.default_value {
            self.state.view_date = default_value;
        }
        commit
    }

    /// The footer Clear button: commit `None`, then fall back to the default.
    ///
    /// The callback sees `None`; the fallback does not notify again.
    pub fn clear_button(&mut self) -> Commit {
        let commit = self.select(None);
        self.reconcile();
        commit
    }

    // ------------------------------------------------------------------------
    // External changes

    /// Push the host's value. Does nothing if it did not change.
    pub fn set_value(&mut self, value: impl Into<ControlledValue>) {
        let value = value.into();
        if self.state.controlled == value {
            return;
        }
        log::debug!("external value {value:?}");
        self.state.controlled = value;
        if let Some(date) = value.date() {
            let date = self.clamp(date);
            if self.state.selected.map(|selected| self.clamp(selected)) != Some(date) {
                self.state.selected = Some(date);
            }
        }
        self.reconcile();
    }

    /// Change `min_date`/`max_date`, re-clamping the selection.
    pub fn set_bounds(&mut self, min_date: Option<CalendarDate>, max_date: Option<CalendarDate>) {
        if self.options.min_date == min_date && self.options.max_date == max_date {
            return;
        }
        log::debug!("bounds {min_date:?} ..= {max_date:?}");
        self.options.min_date = min_date;
        self.options.max_date = max_date;
        self.bounds_changed();
    }

    /// Replace all options. The state is kept and reconciled.
    pub fn set_options(&mut self, options: DatepickerOptions) {
        if options == self.options {
            return;
        }
        if !self.custom_formatter && options.language != self.options.language {
            self.formatter = Arc::new(Locale::resolve_or_default(&options.language));
        }
        let bounds_changed = options.min_date != self.options.min_date
            || options.max_date != self.options.max_date;
        let default_changed = options.default_value != self.options.default_value;
        self.options = options;
        if bounds_changed {
            self.bounds_changed();
        } else if default_changed {
            self.state.initial = self.options.clamped_default();
            self.reconcile();
        }
    }

    fn bounds_changed(&mut self) {
        self.state.initial = self.options.clamped_default();
        self.state.selected = self.state.selected.map(|selected| self.clamp(selected));
        self.reconcile();
    }

    /// Resync the selection with the controlled value, then fall back to the
    /// default when nothing is selected. Never notifies.
    fn reconcile(&mut self) {
        if let (Some(selected), Some(value)) = (self.state.selected, self.state.controlled.date()) {
            let value = self.clamp(value);
            if self.clamp(selected) != value {
                self.state.selected = Some(value);
            }
        }
        if self.state.selected.is_none() {
            self.state.selected = self.state.initial;
        }
    }

    fn clamp(&self, date: CalendarDate) -> CalendarDate {
        clamp_into_range(date, self.options.min_date, self.options.max_date)
    }

    // ------------------------------------------------------------------------
    // Focus and pointer

    /// The input gained focus: show the selection and open the popup.
    pub fn focus_input(&mut self) {
        if let Some(selected) = self.state.selected
            && selected != self.state.view_date
        {
            self.state.view_date = selected;
        }
        self.state.is_open = true;
    }

    /// A pointer went down somewhere. Outside the picker it closes the popup.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside && !self.options.inline && self.state.is_open {
            log::trace!("pointer down outside, closing");
            self.state.is_open = false;
        }
    }

    /// Consume a pending focus request from [`DatepickerHandle::focus`].
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.state.focus_requested)
    }
}

impl DatepickerHandle for Datepicker {
    fn focus(&mut self) {
        self.state.focus_requested = true;
        self.focus_input();
    }

    fn clear(&mut self) {
        let _ = Self::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    fn picker(options: DatepickerOptions) -> Datepicker {
        Datepicker::with_clock(options, FixedClock(ymd(2024, 3, 14)))
    }

    /// A picker whose callback records every value it sees.
    fn recording(
        options: DatepickerOptions,
    ) -> (Datepicker, Arc<Mutex<Vec<Option<CalendarDate>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let picker = picker(options).on_change(move |date| sink.lock().unwrap().push(date));
        (picker, calls)
    }

    fn bounded() -> DatepickerOptions {
        DatepickerOptions::default()
            .default_value(Some(ymd(2024, 1, 5)))
            .min_date(Some(ymd(2024, 1, 10)))
            .max_date(Some(ymd(2024, 1, 20)))
    }

    #[test]
    fn starts_on_the_clamped_default() {
        let picker = picker(bounded());
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 10)));
        assert_eq!(picker.view_date(), ymd(2024, 1, 10));
        assert_eq!(picker.view(), ViewGranularity::Days);
        assert!(!picker.is_open());
    }

    #[test]
    fn starts_on_today_without_default() {
        let picker = picker(DatepickerOptions::default());
        assert_eq!(picker.selected(), None);
        assert_eq!(picker.view_date(), ymd(2024, 3, 14));
        assert_eq!(picker.display_value(), "03/14/2024");
    }

    #[test]
    fn controlled_value_wins_over_default() {
        let picker = picker(bounded()).controlled(Some(ymd(2024, 1, 30)));
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 20)));
        assert_eq!(picker.view_date(), ymd(2024, 1, 20));
    }

    #[test]
    fn select_closes_only_in_day_view() {
        let (mut picker, calls) = recording(DatepickerOptions::default());
        picker.focus_input();
        picker.set_view(ViewGranularity::Months);
        let _ = picker.select(Some(ymd(2024, 3, 1)));
        assert!(picker.is_open());

        picker.set_view(ViewGranularity::Days);
        let commit = picker.select(Some(ymd(2024, 3, 2)));
        assert_eq!(commit.date, Some(ymd(2024, 3, 2)));
        assert!(!picker.is_open());
        assert_eq!(*calls.lock().unwrap(), [Some(ymd(2024, 3, 1)), Some(ymd(2024, 3, 2))]);
    }

    #[test]
    fn inline_and_no_auto_hide_stay_open() {
        let mut picker = self::picker(DatepickerOptions::default().auto_hide(false));
        picker.open();
        let _ = picker.select(Some(ymd(2024, 3, 2)));
        assert!(picker.is_open());

        let mut inline = self::picker(DatepickerOptions::default().inline(true));
        assert!(inline.is_popup_visible());
        inline.pointer_down(PointerTarget::Outside);
        assert!(inline.is_popup_visible());
    }

    #[test]
    fn drill_down_does_not_commit() {
        let (mut picker, calls) = recording(DatepickerOptions::default());
        picker.drill_up();
        picker.drill_up();
        assert_eq!(picker.view(), ViewGranularity::Years);

        // 2020 ..= 2031: index 6 is 2026.
        assert_eq!(picker.activate_cell(6), None);
        assert_eq!(picker.view(), ViewGranularity::Months);
        assert_eq!(picker.view_date(), ymd(2026, 3, 14));

        assert_eq!(picker.activate_cell(1), None);
        assert_eq!(picker.view(), ViewGranularity::Days);
        assert_eq!(picker.view_date(), ymd(2026, 2, 1));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn disabled_cells_are_ignored() {
        let (mut picker, calls) = recording(bounded());
        picker.open();
        let before = *picker.state();
        let disabled = picker.grid().into_iter().find(|cell| cell.disabled).unwrap();
        assert_eq!(picker.activate_cell(disabled.index), None);
        assert_eq!(picker.state(), &before);
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(picker.activate_cell(1000), None);
    }

    #[test]
    fn today_ignores_range_by_default() {
        let mut picker = picker(bounded());
        let commit = picker.today();
        assert_eq!(commit.date, Some(ymd(2024, 3, 14)));
        assert_eq!(picker.view_date(), ymd(2024, 3, 14));

        let mut picker = self::picker(bounded().today_policy(TodayPolicy::ClampToRange));
        assert_eq!(picker.today().date, Some(ymd(2024, 1, 20)));
        assert_eq!(picker.view_date(), ymd(2024, 1, 20));
    }

    #[test]
    fn clear_resets_to_default() {
        let (mut picker, calls) = recording(bounded());
        let _ = picker.today();
        picker.next_page();
        let commit = picker.clear();
        assert_eq!(commit.date, Some(ymd(2024, 1, 10)));
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 10)));
        assert_eq!(picker.view_date(), ymd(2024, 1, 5), "the raw default value");
        assert_eq!(calls.lock().unwrap().last(), Some(&Some(ymd(2024, 1, 10))));
    }

    #[test]
    fn clear_button_notifies_none_then_falls_back() {
        let (mut picker, calls) = recording(bounded());
        let commit = picker.clear_button();
        assert_eq!(commit.date, None);
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 10)));
        assert_eq!(*calls.lock().unwrap(), [None]);

        let (mut picker, _) = recording(DatepickerOptions::default());
        let _ = picker.select(Some(ymd(2024, 3, 3)));
        let _ = picker.clear_button();
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn external_value_is_clamped_and_synced() {
        let (mut picker, calls) = recording(bounded());
        picker.set_value(Some(ymd(2024, 1, 15)));
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 15)));

        picker.set_value(Some(ymd(2024, 2, 1)));
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 20)));

        picker.set_value(ControlledValue::Empty);
        assert_eq!(
            picker.selected(),
            Some(ymd(2024, 1, 20)),
            "an empty value keeps the selection"
        );
        assert!(calls.lock().unwrap().is_empty(), "external changes never notify");
    }

    #[test]
    fn new_bounds_reclamp_the_selection() {
        let mut picker = picker(DatepickerOptions::default());
        let _ = picker.select(Some(ymd(2024, 6, 1)));
        picker.set_bounds(None, Some(ymd(2024, 5, 1)));
        assert_eq!(picker.selected(), Some(ymd(2024, 5, 1)));
        picker.set_bounds(Some(ymd(2024, 5, 10)), None);
        assert_eq!(picker.selected(), Some(ymd(2024, 5, 10)));
    }

    #[test]
    fn placeholder_for_an_empty_value() {
        let picker = picker(DatepickerOptions::default().label("Pick a date"))
            .controlled(ControlledValue::Empty);
        assert_eq!(picker.display_value(), "Pick a date");

        let empty = self::picker(DatepickerOptions::default()).controlled(ControlledValue::Empty);
        assert_eq!(empty.display_value(), "", "no label means a blank input");
        assert_eq!(empty.selected(), Some(ymd(2024, 3, 14)));

        let uncontrolled = self::picker(DatepickerOptions::default().label("Pick a date"));
        assert_eq!(uncontrolled.display_value(), "03/14/2024");
    }

    #[test]
    fn focus_moves_to_the_selection() {
        let mut picker = picker(bounded());
        picker.next_page();
        picker.focus();
        assert!(picker.is_open());
        assert_eq!(picker.view_date(), ymd(2024, 1, 10));
        assert!(picker.take_focus_request());
        assert!(!picker.take_focus_request());

        picker.pointer_down(PointerTarget::Popup);
        assert!(picker.is_open());
        picker.pointer_down(PointerTarget::Outside);
        assert!(!picker.is_open());
    }

    #[test]
    fn handle_clear_delegates() {
        let mut picker = picker(bounded());
        let _ = picker.today();
        DatepickerHandle::clear(&mut picker);
        assert_eq!(picker.selected(), Some(ymd(2024, 1, 10)));
    }

    #[test]
    fn handle_clear_is_visible_as_a_commit() {
        let default = ymd(2024, 1, 1);
        let mut picker = picker(DatepickerOptions::default().default_value(Some(default)))
            .controlled(ControlledValue::Empty);
        assert_eq!(picker.selected(), Some(default));
        assert_eq!(picker.take_commit(), None, "construction never commits");

        DatepickerHandle::clear(&mut picker);
        assert_eq!(picker.selected(), Some(default), "the selection did not move");
        assert_eq!(picker.take_commit(), Some(Commit { date: Some(default) }));
        assert_eq!(picker.take_commit(), None);
    }

    #[test]
    fn changing_language_reformats() {
        let mut picker = picker(DatepickerOptions::default());
        assert_eq!(picker.title(), "March 2024");
        picker.set_options(DatepickerOptions::default().language("de"));
        assert_eq!(picker.title(), "März 2024");
        assert_eq!(picker.display_value(), "14.03.2024");
    }
}
