/// Failure to build a [`crate::CalendarDate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("{year}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("could not parse {0:?} as a date, expected YYYY-MM-DD")]
    Parse(String),
}

/// A locale tag that does not map to any known locale.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("unknown locale {0:?}")]
    Unknown(String),
}
