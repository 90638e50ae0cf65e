use datepicker::{Commit, Datepicker, ViewGranularity};
use egui::{Button, Grid, RichText, Ui};

/// Header, grid and footer of the calendar. Returns the commit, if any.
pub(crate) fn show(ui: &mut Ui, picker: &mut Datepicker) -> Option<Commit> {
    let mut commit = None;

    if let Some(title) = picker.options().title.clone() {
        ui.strong(title);
    }

    ui.horizontal(|ui| {
        if ui.button("<").clicked() {
            picker.prev_page();
        }
        if ui.button(picker.title()).clicked() {
            picker.drill_up();
        }
        if ui.button(">").clicked() {
            picker.next_page();
        }
    });

    let view = picker.view();
    let columns = view.columns();
    let cells = picker.grid();
    let mut clicked = None;

    Grid::new("datepicker_cells")
        .num_columns(columns)
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            if view == ViewGranularity::Days {
                for weekday in picker.weekday_header() {
                    ui.label(RichText::new(weekday).small());
                }
                ui.end_row();
            }

            for cell in &cells {
                let mut text = RichText::new(&cell.label);
                if cell.muted {
                    text = text.weak();
                }
                let button = Button::new(text).selected(cell.selected);
                if ui.add_enabled(!cell.disabled, button).clicked() {
                    clicked = Some(cell.index);
                }
                if (cell.index + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });

    if let Some(index) = clicked {
        commit = picker.activate_cell(index);
    }

    let options = picker.options();
    let (show_clear, show_today) = (options.show_clear_button, options.show_today_button);
    if show_clear || show_today {
        let clear_label = options.label_clear_button.clone();
        let today_label = options.label_today_button.clone();
        ui.horizontal(|ui| {
            if show_clear && ui.button(clear_label).clicked() {
                commit = Some(picker.clear_button());
            }
            if show_today && ui.button(today_label).clicked() {
                commit = Some(picker.today());
            }
        });
    }

    commit
}
