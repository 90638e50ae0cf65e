use crate::{
    CalendarDate, DateFormat, DateFormatter, OverflowPolicy,
    date::{add_months_with, add_years_with, period_start},
};

/// Which calendar unit the grid enumerates.
///
/// Selecting a cell drills down to the next finer view; selecting a day commits.
/// The header button drills up until [`Self::Decades`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ViewGranularity {
    #[default]
    Days,
    Months,
    Years,
    Decades,
}

impl ViewGranularity {
    /// The view the header button leads to. `Decades` stays put.
    pub fn coarser(self) -> Self {
        match self {
            Self::Days => Self::Months,
            Self::Months => Self::Years,
            Self::Years | Self::Decades => Self::Decades,
        }
    }

    /// The view a cell click leads to, or `None` for `Days` (where a click commits).
    pub fn finer(self) -> Option<Self> {
        match self {
            Self::Days => None,
            Self::Months => Some(Self::Days),
            Self::Years => Some(Self::Months),
            Self::Decades => Some(Self::Years),
        }
    }

    /// Number of grid columns.
    pub fn columns(self) -> usize {
        match self {
            Self::Days => 7,
            Self::Months | Self::Years | Self::Decades => 4,
        }
    }

    /// `view_date` moved by `pages` prev/next steps:
    /// a month, a year, ten years or a hundred years per page.
    pub fn page(self, view_date: CalendarDate, pages: i32, policy: OverflowPolicy) -> CalendarDate {
        match self {
            Self::Days => add_months_with(view_date, pages, policy),
            Self::Months => add_years_with(view_date, pages, policy),
            Self::Years => add_years_with(view_date, pages.saturating_mul(10), policy),
            Self::Decades => add_years_with(view_date, pages.saturating_mul(100), policy),
        }
    }

    /// Label of the header button.
    pub fn title(self, view_date: CalendarDate, formatter: &dyn DateFormatter) -> String {
        match self {
            Self::Days => formatter.format_date(view_date, &DateFormat::MONTH_YEAR),
            Self::Months => formatter.format_date(view_date, &DateFormat::YEAR),
            Self::Years => {
                let first = period_start(view_date.year(), 10);
                format!("{first} - {}", first + 11)
            }
            Self::Decades => {
                let century = period_start(view_date.year(), 100);
                format!("{} - {}", century - 10, century + 100)
            }
        }
    }
}
