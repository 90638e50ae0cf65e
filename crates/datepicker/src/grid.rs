//! The cells of each view.
//!
//! Every cell is computed from a [`GridContext`]: the view date, the selection,
//! the bounds and the formatting service. Nothing is cached between calls.

use crate::{
    CalendarDate, DateFormat, DateFormatter, OverflowPolicy, ViewGranularity, WeekStart,
    date::{
        add_days, first_display_day_of_month, is_date_in_decade, is_date_in_range, period_start,
        with_year,
    },
    locale::weekday_labels,
};

/// Number of cells in the day grid: six weeks.
pub const DAY_CELLS: usize = 42;

/// Number of cells in the month, year and decade grids.
pub const PERIOD_CELLS: usize = 12;

/// What the grids are computed from. Borrowed from a [`crate::Datepicker`].
#[derive(Clone, Copy)]
pub struct GridContext<'a> {
    pub view_date: CalendarDate,
    pub selected: Option<CalendarDate>,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub week_start: WeekStart,
    pub overflow: OverflowPolicy,
    pub formatter: &'a dyn DateFormatter,
}

impl std::fmt::Debug for GridContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridContext")
            .field("view_date", &self.view_date)
            .field("selected", &self.selected)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("week_start", &self.week_start)
            .field("overflow", &self.overflow)
            .finish_non_exhaustive()
    }
}

impl GridContext<'_> {
    fn in_range(&self, date: CalendarDate) -> bool {
        is_date_in_range(date, self.min_date, self.max_date)
    }
}

/// What activating a cell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAction {
    /// Select this date (day view).
    Commit(CalendarDate),

    /// Move the anchor and show a finer view.
    DrillDown {
        view_date: CalendarDate,
        view: ViewGranularity,
    },
}

/// One button of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// Position in the grid, row-major.
    pub index: usize,

    /// The date this cell stands for.
    pub date: CalendarDate,

    pub label: String,

    /// Contains the current selection.
    pub selected: bool,

    /// Outside `[min_date, max_date]`; activating it does nothing.
    pub disabled: bool,

    /// Outside the month or period the grid is centered on.
    pub muted: bool,

    pub action: CellAction,
}

/// The cells of `view`.
pub fn cells(view: ViewGranularity, ctx: &GridContext<'_>) -> Vec<GridCell> {
    match view {
        ViewGranularity::Days => days(ctx),
        ViewGranularity::Months => months(ctx),
        ViewGranularity::Years => years(ctx),
        ViewGranularity::Decades => decades(ctx),
    }
}

/// Weekday abbreviations above the day grid.
pub fn weekday_header(ctx: &GridContext<'_>) -> Vec<String> {
    weekday_labels(ctx.formatter, ctx.week_start)
}

/// Six weeks starting at the week-start on or before the first of the month.
pub fn days(ctx: &GridContext<'_>) -> Vec<GridCell> {
    let start = first_display_day_of_month(ctx.view_date, ctx.week_start);

    // Counts down on every 1st: 2 before the current month, 1 inside it, 0 after.
    let mut months_left = 2;

    (0..DAY_CELLS)
        .map(|index| {
            let date = add_days(start, index as i64);
            if date.day() == 1 {
                months_left -= 1;
            }
            GridCell {
                index,
                date,
                label: ctx.formatter.format_date(date, &DateFormat::DAY),
                selected: ctx.selected == Some(date),
                disabled: !ctx.in_range(date),
                muted: months_left != 1,
                action: CellAction::Commit(date),
            }
        })
        .collect()
}

/// January to December of the view year, each as the first of its month.
pub fn months(ctx: &GridContext<'_>) -> Vec<GridCell> {
    (0..PERIOD_CELLS)
        .filter_map(|index| {
            let date = CalendarDate::from_ymd(ctx.view_date.year(), index as u32 + 1, 1).ok()?;
            Some(GridCell {
                index,
                date,
                label: ctx.formatter.format_date(date, &DateFormat::MONTH_SHORT),
                selected: ctx.selected == Some(date),
                disabled: !ctx.in_range(date),
                muted: false,
                action: CellAction::DrillDown {
                    view_date: date,
                    view: ViewGranularity::Days,
                },
            })
        })
        .collect()
}

/// The decade of the view date followed by two more years.
pub fn years(ctx: &GridContext<'_>) -> Vec<GridCell> {
    let first = period_start(ctx.view_date.year(), 10);
    (0..PERIOD_CELLS)
        .map(|index| {
            let year = first + index as i32;
            let date = with_year(ctx.view_date, year, ctx.overflow);
            GridCell {
                index,
                date,
                label: year.to_string(),
                selected: ctx.selected.is_some_and(|selected| selected.year() == year),
                disabled: !ctx.in_range(date),
                muted: index >= 10,
                action: CellAction::DrillDown {
                    view_date: date,
                    view: ViewGranularity::Months,
                },
            }
        })
        .collect()
}

/// Ten-year buckets from the decade before the century to the one after it.
///
/// The cell date keeps the view date's year within its decade, so drilling
/// into `2010` from a view date in 2024 lands on 2014.
pub fn decades(ctx: &GridContext<'_>) -> Vec<GridCell> {
    let century = period_start(ctx.view_date.year(), 100);
    let offset = ctx.view_date.year().rem_euclid(10);
    (0..PERIOD_CELLS)
        .map(|index| {
            let decade = century - 10 + 10 * index as i32;
            let date = with_year(ctx.view_date, decade + offset, ctx.overflow);
            let first_day = CalendarDate::from_ymd(decade, 1, 1).unwrap_or(date);
            let ninth_year = CalendarDate::from_ymd(decade + 9, 1, 1).unwrap_or(date);
            GridCell {
                index,
                date,
                label: decade.to_string(),
                selected: ctx
                    .selected
                    .is_some_and(|selected| is_date_in_decade(selected, decade)),
                disabled: !ctx.in_range(first_day) && !ctx.in_range(ninth_year),
                muted: index == 0 || index == PERIOD_CELLS - 1,
                action: CellAction::DrillDown {
                    view_date: date,
                    view: ViewGranularity::Years,
                },
            }
        })
        .collect()
}
