use chrono::NaiveDate;
use datepicker::{CalendarDate, Commit, Datepicker, DatepickerOptions, FixedClock, PointerTarget};
use egui::{Area, Button, Frame, Id, Key, Order, Response, Ui, Widget};

/// What a [`DatepickerInput`] keeps in egui memory between frames.
#[derive(Clone)]
pub(crate) struct PickerMemory {
    pub picker: Datepicker,

    /// A commit made through [`crate::with_handle`], not yet written back.
    pub pending: Option<Commit>,
}

/// Shows a date, and opens a calendar popup when clicked.
///
/// With `DatepickerOptions::inline` set, the calendar is drawn in place instead.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// # let mut date = None;
/// use egui_datepicker::{DatepickerInput, DatepickerOptions};
///
/// let response = ui.add(
///     DatepickerInput::new(&mut date).options(DatepickerOptions::default().label("Pick a date")),
/// );
/// if response.changed() {
///     // `date` holds the new selection.
/// }
/// # });
/// ```
pub struct DatepickerInput<'a> {
    selection: &'a mut Option<NaiveDate>,
    options: DatepickerOptions,
    id: Option<Id>,
    id_salt: Option<&'a str>,
    today: Option<NaiveDate>,
}

impl<'a> DatepickerInput<'a> {
    pub fn new(selection: &'a mut Option<NaiveDate>) -> Self {
        Self {
            selection,
            options: DatepickerOptions::default(),
            id: None,
            id_salt: None,
            today: None,
        }
    }

    #[inline]
    pub fn options(mut self, options: DatepickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Add id source.
    /// Must be set if multiple date pickers are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: &'a str) -> Self {
        self.id_salt = Some(id_salt);
        self
    }

    /// Use exactly this id for the picker state, e.g. to reach it with [`crate::with_handle`].
    #[inline]
    pub fn id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Pin "today" instead of reading the system clock.
    #[inline]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl Widget for DatepickerInput<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let id = self
            .id
            .unwrap_or_else(|| ui.make_persistent_id(self.id_salt));
        let value = self.selection.map(CalendarDate::from);

        let PickerMemory {
            mut picker,
            pending,
        } = ui
            .data_mut(|data| data.get_temp::<PickerMemory>(id))
            .unwrap_or_else(|| {
                let picker = match self.today {
                    Some(today) => {
                        Datepicker::with_clock(self.options.clone(), FixedClock(today.into()))
                    }
                    None => Datepicker::new(self.options.clone()),
                };
                PickerMemory {
                    picker: picker.controlled(value),
                    pending: None,
                }
            });
        picker.set_options(self.options);

        let mut changed = false;
        if let Some(commit) = pending {
            *self.selection = commit.date.map(NaiveDate::from);
            changed = true;
        }
        picker.set_value(self.selection.map(CalendarDate::from));

        let (mut response, commit) = if picker.options().inline {
            let inner = ui.vertical(|ui| crate::popup::show(ui, &mut picker));
            (inner.response, inner.inner)
        } else {
            show_input(ui, id, &mut picker)
        };

        if let Some(commit) = commit {
            log::debug!("datepicker {id:?} committed {:?}", commit.date);
            *self.selection = commit.date.map(NaiveDate::from);
            changed = true;
        }
        if changed {
            response.mark_changed();
        }

        ui.data_mut(|data| {
            data.insert_temp(
                id,
                PickerMemory {
                    picker,
                    pending: None,
                },
            );
        });
        response
    }
}

fn show_input(ui: &mut Ui, id: Id, picker: &mut Datepicker) -> (Response, Option<Commit>) {
    let response = ui.add(Button::new(picker.display_value()).selected(picker.is_open()));
    if response.clicked() {
        picker.focus_input();
    }
    if picker.take_focus_request() {
        response.request_focus();
    }

    if !picker.is_open() {
        return (response, None);
    }

    let area = Area::new(id.with("popup"))
        .kind(egui::UiKind::Picker)
        .order(Order::Foreground)
        .fixed_pos(response.rect.left_bottom())
        .show(ui.ctx(), |ui| {
            Frame::popup(ui.style())
                .show(ui, |ui| crate::popup::show(ui, picker))
                .inner
        });

    if !response.clicked() {
        if ui.input(|i| i.key_pressed(Key::Escape)) {
            picker.close();
        } else if area.response.clicked_elsewhere() {
            picker.pointer_down(PointerTarget::Outside);
        }
    }

    (response, area.inner)
}
