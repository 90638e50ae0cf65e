use chrono::NaiveDate;
use egui::Id;
use egui_datepicker::{DatepickerHandle as _, DatepickerInput, DatepickerOptions, with_handle};
use egui_kittest::Harness;
use kittest::Queryable as _;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[derive(Default)]
struct State {
    date: Option<NaiveDate>,
    changes: usize,
}

fn harness(options: DatepickerOptions, initial: Option<NaiveDate>) -> Harness<'static, State> {
    Harness::new_ui_state(
        move |ui, state: &mut State| {
            let response = ui.add(
                DatepickerInput::new(&mut state.date)
                    .id(Id::new("picker"))
                    .options(options.clone())
                    .today(ymd(2024, 3, 14)),
            );
            if response.changed() {
                state.changes += 1;
            }
            ui.add_space(300.0);
            ui.button("Elsewhere");
        },
        State {
            date: initial,
            changes: 0,
        },
    )
}

#[test]
fn pick_a_day() {
    let mut harness = harness(DatepickerOptions::default().label("Pick a date"), None);
    harness.run();

    harness.get_by_label("Pick a date").simulate_click();
    harness.run();
    assert!(harness.query_by_label("March 2024").is_some());

    harness.get_by_label("20").simulate_click();
    harness.run();

    assert_eq!(harness.state().date, Some(ymd(2024, 3, 20)));
    assert_eq!(harness.state().changes, 1);
    assert!(harness.query_by_label("March 2024").is_none(), "popup closes");
    assert!(harness.query_by_label("03/20/2024").is_some());
}

#[test]
fn today_button_ignores_bounds() {
    let options = DatepickerOptions::default()
        .min_date(Some(ymd(2024, 1, 10).into()))
        .max_date(Some(ymd(2024, 1, 20).into()));
    let mut harness = harness(options, Some(ymd(2024, 1, 15)));
    harness.run();

    harness.get_by_label("01/15/2024").simulate_click();
    harness.run();
    harness.get_by_label("Today").simulate_click();
    harness.run();

    assert_eq!(harness.state().date, Some(ymd(2024, 3, 14)));
}

#[test]
fn clear_button_empties_the_binding() {
    let options = DatepickerOptions::default().label("Pick a date");
    let mut harness = harness(options, Some(ymd(2024, 3, 5)));
    harness.run();

    harness.get_by_label("03/05/2024").simulate_click();
    harness.run();
    harness.get_by_label("Clear").simulate_click();
    harness.run();

    assert_eq!(harness.state().date, None);
    assert_eq!(harness.state().changes, 1);
    assert!(harness.query_by_label("Pick a date").is_some());
}

#[test]
fn navigating_views_does_not_commit() {
    let mut harness = harness(DatepickerOptions::default().inline(true), None);
    harness.run();

    harness.get_by_label("March 2024").simulate_click();
    harness.run();
    harness.get_by_label("2024").simulate_click();
    harness.run();
    harness.get_by_label("2020 - 2031").simulate_click();
    harness.run();
    assert!(harness.query_by_label("1990 - 2100").is_some());

    harness.get_by_label(">").simulate_click();
    harness.run();
    assert!(harness.query_by_label("2090 - 2200").is_some());

    assert_eq!(harness.state().date, None);
    assert_eq!(harness.state().changes, 0);
}

#[test]
fn click_elsewhere_closes() {
    let mut harness = harness(DatepickerOptions::default().label("Pick a date"), None);
    harness.run();

    harness.get_by_label("Pick a date").simulate_click();
    harness.run();
    assert!(harness.query_by_label("March 2024").is_some());

    harness.get_by_label("Elsewhere").click();
    harness.run();
    assert!(harness.query_by_label("March 2024").is_none());
    assert_eq!(harness.state().date, None);
}

#[test]
fn imperative_clear_writes_back() {
    let options = DatepickerOptions::default().default_value(Some(ymd(2024, 1, 1).into()));
    let mut harness = harness(options, Some(ymd(2024, 3, 5)));
    harness.run();

    let cleared = with_handle(&harness.ctx, Id::new("picker"), |handle| handle.clear());
    assert!(cleared.is_some());
    harness.run();

    assert_eq!(harness.state().date, Some(ymd(2024, 1, 1)));
    assert_eq!(harness.state().changes, 1);
}

#[test]
fn imperative_clear_fills_an_empty_binding() {
    let options = DatepickerOptions::default().default_value(Some(ymd(2024, 1, 1).into()));
    let mut harness = harness(options, None);
    harness.run();
    assert!(harness.query_by_label("01/01/2024").is_none(), "an empty binding shows no date");

    let cleared = with_handle(&harness.ctx, Id::new("picker"), |handle| handle.clear());
    assert!(cleared.is_some());
    harness.run();

    assert_eq!(harness.state().date, Some(ymd(2024, 1, 1)));
    assert_eq!(harness.state().changes, 1);
    assert!(harness.query_by_label("01/01/2024").is_some());
}
