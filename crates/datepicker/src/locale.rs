//! Locale-aware date formatting.
//!
//! The picker only ever needs a handful of strings: the input text, the header
//! title, month names, weekday abbreviations and day numbers. [`DateFormatter`]
//! is the seam a host can replace; [`Locale`] is the built-in implementation
//! backed by chrono's locale tables.

use chrono::{NaiveDate, Weekday};

use crate::{CalendarDate, LocaleError, WeekStart};

/// How to render the day-of-month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DayStyle {
    /// `5`
    Numeric,

    /// `05`
    TwoDigit,
}

/// How to render the month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MonthStyle {
    /// `3`
    Numeric,

    /// `03`
    TwoDigit,

    /// `Mar`
    Short,

    /// `March`
    Long,
}

/// How to render the year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum YearStyle {
    /// `2024`
    Numeric,

    /// `24`
    TwoDigit,
}

/// Which fields of a date to format, and how. Absent fields are left out.
///
/// The default is a full numeric date (`03/05/2024` in `en`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DateFormat {
    pub day: Option<DayStyle>,
    pub month: Option<MonthStyle>,
    pub year: Option<YearStyle>,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            day: Some(DayStyle::TwoDigit),
            month: Some(MonthStyle::TwoDigit),
            year: Some(YearStyle::Numeric),
        }
    }
}

impl DateFormat {
    /// Day number only, as used in the day grid.
    pub const DAY: Self = Self {
        day: Some(DayStyle::Numeric),
        month: None,
        year: None,
    };

    /// Abbreviated month name, as used in the month grid.
    pub const MONTH_SHORT: Self = Self {
        day: None,
        month: Some(MonthStyle::Short),
        year: None,
    };

    /// Full month name and year, as used in the day view title.
    pub const MONTH_YEAR: Self = Self {
        day: None,
        month: Some(MonthStyle::Long),
        year: Some(YearStyle::Numeric),
    };

    /// Year only, as used in the month view title.
    pub const YEAR: Self = Self {
        day: None,
        month: None,
        year: Some(YearStyle::Numeric),
    };
}

/// Turns dates into display strings.
pub trait DateFormatter {
    /// Format the fields of `date` requested by `format`.
    fn format_date(&self, date: CalendarDate, format: &DateFormat) -> String;

    /// Abbreviated weekday name, e.g. `Mon`.
    fn weekday_short(&self, weekday: Weekday) -> String;
}

/// The seven weekday abbreviations of the day grid header, starting at `week_start`.
pub fn weekday_labels(formatter: &dyn DateFormatter, week_start: WeekStart) -> Vec<String> {
    week_start
        .week()
        .map(|weekday| formatter.weekday_short(weekday))
        .collect()
}

/// Format `date` in `language`, falling back to `en-US` for unknown tags.
pub fn format_date(language: &str, date: CalendarDate, format: &DateFormat) -> String {
    Locale::resolve_or_default(language).format_date(date, format)
}

// ----------------------------------------------------------------------------

/// Region used when a tag names only a language, like `"en"`.
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("ar", "SA"),
    ("cs", "CZ"),
    ("da", "DK"),
    ("el", "GR"),
    ("en", "US"),
    ("et", "EE"),
    ("fa", "IR"),
    ("he", "IL"),
    ("hi", "IN"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("ms", "MY"),
    ("nb", "NO"),
    ("pt", "BR"),
    ("sl", "SI"),
    ("sv", "SE"),
    ("uk", "UA"),
    ("vi", "VN"),
    ("zh", "CN"),
];

/// The region of a bare language tag: a listed default, else `fr` → `FR`.
fn default_region(language: &str) -> String {
    DEFAULT_REGIONS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map_or_else(|| language.to_ascii_uppercase(), |(_, region)| (*region).to_owned())
}

/// A resolved locale: language, region, and the chrono tables for names.
#[derive(Clone, Debug)]
pub struct Locale {
    language: String,
    region: String,
    names: chrono::Locale,
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && self.region == other.region
    }
}

impl Eq for Locale {}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            language: "en".to_owned(),
            region: "US".to_owned(),
            names: chrono::Locale::en_US,
        }
    }

    /// Resolve a tag such as `en`, `en-US`, `ko_KR` or `zh-Hant-TW`.
    ///
    /// Any language and region pair in chrono's locale tables is accepted.
    ///
    /// # Errors
    /// If chrono has no tables for the tag.
    pub fn resolve(tag: &str) -> Result<Self, LocaleError> {
        let unknown = || LocaleError::Unknown(tag.to_owned());

        let mut subtags = tag.trim().split(['-', '_']).filter(|s| !s.is_empty());
        let language = subtags.next().ok_or_else(unknown)?.to_ascii_lowercase();
        // Skip script subtags (`Hant`) and keep the first region-like one.
        let region = match subtags.find(|s| s.len() == 2) {
            Some(region) => region.to_ascii_uppercase(),
            None => default_region(&language),
        };

        let names = format!("{language}_{region}")
            .parse::<chrono::Locale>()
            .map_err(|_| unknown())?;
        Ok(Self {
            language,
            region,
            names,
        })
    }

    /// Like [`Self::resolve`], but falls back to `en-US` with a warning.
    pub fn resolve_or_default(tag: &str) -> Self {
        Self::resolve(tag).unwrap_or_else(|err| {
            log::warn!("{err}; falling back to en-US");
            Self::en_us()
        })
    }

    /// Lowercase language subtag, e.g. `en`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region subtag, e.g. `US`.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// `en-US` style tag.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.language, self.region)
    }

    fn name(&self, date: CalendarDate, pattern: &str) -> String {
        date.naive()
            .format_localized(pattern, self.names)
            .to_string()
            .trim()
            .to_owned()
    }

    fn format_numeric(&self, date: CalendarDate, format: &DateFormat) -> String {
        let layout = NumericLayout::of(&self.language, &self.region);
        let fields: Vec<(Field, String)> = layout
            .order
            .iter()
            .filter_map(|&field| Some((field, field_text(date, field, format)?)))
            .collect();

        match fields.as_slice() {
            [] => String::new(),
            [(field, text)] => format!("{text}{}", field_suffix(&self.language, *field)),
            _ => {
                let joined: Vec<&str> = fields.iter().map(|(_, text)| text.as_str()).collect();
                format!("{}{}", joined.join(layout.separator), layout.terminator)
            }
        }
    }

    fn format_with_month_name(
        &self,
        date: CalendarDate,
        format: &DateFormat,
        long: bool,
    ) -> String {
        let month = self.name(date, if long { "%B" } else { "%b" });
        let day = field_text(date, Field::Day, format);
        let year = field_text(date, Field::Year, format);
        let lang = self.language.as_str();

        match lang {
            "en" => match (day, year) {
                (Some(day), Some(year)) => format!("{month} {day}, {year}"),
                (Some(day), None) => format!("{month} {day}"),
                (None, Some(year)) => format!("{month} {year}"),
                (None, None) => month,
            },
            "ko" | "ja" | "zh" | "hu" => {
                let joiner = if lang == "ko" || lang == "hu" { " " } else { "" };
                [
                    year.map(|y| format!("{y}{}", field_suffix(lang, Field::Year))),
                    Some(month),
                    day.map(|d| format!("{d}{}", field_suffix(lang, Field::Day))),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(joiner)
            }
            _ => {
                let day_suffix = if matches!(lang, "de" | "da" | "nb" | "fi" | "cs") {
                    "."
                } else {
                    ""
                };
                [day.map(|d| format!("{d}{day_suffix}")), Some(month), year]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

impl DateFormatter for Locale {
    fn format_date(&self, date: CalendarDate, format: &DateFormat) -> String {
        let text = match format.month {
            Some(MonthStyle::Long) => self.format_with_month_name(date, format, true),
            Some(MonthStyle::Short) => self.format_with_month_name(date, format, false),
            Some(MonthStyle::Numeric | MonthStyle::TwoDigit) | None => {
                self.format_numeric(date, format)
            }
        };
        normalize_formatted(&text)
    }

    fn weekday_short(&self, weekday: Weekday) -> String {
        NaiveDate::from_isoywd_opt(2024, 1, weekday)
            .map(|date| self.name(date.into(), "%a"))
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Day,
    Month,
    Year,
}

/// Field order and punctuation of an all-numeric date.
struct NumericLayout {
    order: [Field; 3],
    separator: &'static str,
    terminator: &'static str,
}

impl NumericLayout {
    const fn new(order: [Field; 3], separator: &'static str, terminator: &'static str) -> Self {
        Self {
            order,
            separator,
            terminator,
        }
    }

    fn of(language: &str, region: &str) -> Self {
        use Field::{Day as D, Month as M, Year as Y};
        match language {
            "en" if region == "US" => Self::new([M, D, Y], "/", ""),
            "ko" | "hu" => Self::new([Y, M, D], ". ", "."),
            "ja" | "zh" => Self::new([Y, M, D], "/", ""),
            "sv" | "lt" => Self::new([Y, M, D], "-", ""),
            "nl" => Self::new([D, M, Y], "-", ""),
            "de" | "ru" | "pl" | "cs" | "fi" | "da" | "nb" | "tr" | "uk" | "ro" | "et" => {
                Self::new([D, M, Y], ".", "")
            }
            _ => Self::new([D, M, Y], "/", ""),
        }
    }
}

fn field_text(date: CalendarDate, field: Field, format: &DateFormat) -> Option<String> {
    Some(match field {
        Field::Day => match format.day? {
            DayStyle::Numeric => date.day().to_string(),
            DayStyle::TwoDigit => format!("{:02}", date.day()),
        },
        Field::Month => match format.month? {
            MonthStyle::TwoDigit => format!("{:02}", date.month()),
            MonthStyle::Numeric | MonthStyle::Short | MonthStyle::Long => date.month().to_string(),
        },
        Field::Year => match format.year? {
            YearStyle::Numeric => date.year().to_string(),
            YearStyle::TwoDigit => format!("{:02}", date.year().rem_euclid(100)),
        },
    })
}

/// Unit marker written after a lone field, e.g. `5일` in Korean.
fn field_suffix(language: &str, field: Field) -> &'static str {
    match (language, field) {
        ("ko", Field::Year) => "년",
        ("ko", Field::Month) => "월",
        ("ko", Field::Day) => "일",
        ("ja" | "zh", Field::Year) => "年",
        ("ja" | "zh", Field::Month) => "月",
        ("ja" | "zh", Field::Day) => "日",
        _ => "",
    }
}

// ----------------------------------------------------------------------------

/// Compatibility shim applied to every formatted date.
///
/// A Korean numeric date such as `2024. 01. 05.` becomes `2024-01-05`, and
/// output of three characters or less loses a single Korean day marker `일`,
/// so the day grid shows plain numbers.
pub fn normalize_formatted(text: &str) -> String {
    let text = korean_date_to_iso(text).unwrap_or_else(|| text.to_owned());
    if text.chars().count() <= 3 {
        text.replacen('일', "", 1).trim().to_owned()
    } else {
        text
    }
}

/// Finds `DDDD?<ws>DD?<ws>DD?` (any single char for `?`) anywhere in `text`.
fn korean_date_to_iso(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).find_map(|start| {
        let mut rest = &chars[start..];
        let year = take_digits(&mut rest, 4)?;
        take_separator(&mut rest)?;
        let month = take_digits(&mut rest, 2)?;
        take_separator(&mut rest)?;
        let day = take_digits(&mut rest, 2)?;
        rest.first()?;
        Some(format!("{year}-{month}-{day}"))
    })
}

fn take_digits(rest: &mut &[char], count: usize) -> Option<String> {
    let digits = rest.get(..count)?;
    if !digits.iter().all(char::is_ascii_digit) {
        return None;
    }
    *rest = &rest[count..];
    Some(digits.iter().collect())
}

/// One arbitrary character, then any whitespace.
fn take_separator(rest: &mut &[char]) -> Option<()> {
    let (_, tail) = rest.split_first()?;
    let skip = tail.iter().take_while(|c| c.is_whitespace()).count();
    *rest = &tail[skip..];
    Some(())
}
