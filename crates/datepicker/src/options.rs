use crate::{CalendarDate, DatepickerTheme, OverflowPolicy, WeekStart};

/// Whether the Today button respects `min_date`/`max_date`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TodayPolicy {
    /// Select today even when it lies outside the bounds.
    #[default]
    IgnoreRange,

    /// Select today clamped into the bounds.
    ClampToRange,
}

/// Configuration of a [`crate::Datepicker`].
///
/// ```
/// # use datepicker::{CalendarDate, DatepickerOptions, WeekStart};
/// let options = DatepickerOptions::default()
///     .min_date(CalendarDate::from_ymd(2024, 1, 10).ok())
///     .week_start(WeekStart::Monday)
///     .language("de");
/// assert!(options.auto_hide);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatepickerOptions {
    /// Shown above the popup header.
    pub title: Option<String>,

    /// Placeholder shown in the input when the controlled value is empty.
    pub label: Option<String>,

    pub default_value: Option<CalendarDate>,
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,

    /// Locale tag such as `en`, `en-US` or `ko_KR`.
    pub language: String,

    pub week_start: WeekStart,

    /// Draw the calendar in place, always visible, without an input.
    pub inline: bool,

    /// Open the popup on mount.
    pub open: bool,

    /// Close the popup after a day is picked.
    pub auto_hide: bool,

    pub show_clear_button: bool,
    pub label_clear_button: String,
    pub show_today_button: bool,
    pub label_today_button: String,

    pub overflow: OverflowPolicy,
    pub today_policy: TodayPolicy,
    pub theme: DatepickerTheme,
}

impl Default for DatepickerOptions {
    fn default() -> Self {
        Self {
            title: None,
            label: None,
            default_value: None,
            min_date: None,
            max_date: None,
            language: "en".to_owned(),
            week_start: WeekStart::Sunday,
            inline: false,
            open: false,
            auto_hide: true,
            show_clear_button: true,
            label_clear_button: "Clear".to_owned(),
            show_today_button: true,
            label_today_button: "Today".to_owned(),
            overflow: OverflowPolicy::Rollover,
            today_policy: TodayPolicy::IgnoreRange,
            theme: DatepickerTheme::default(),
        }
    }
}

impl DatepickerOptions {
    #[inline]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn default_value(mut self, default_value: Option<CalendarDate>) -> Self {
        self.default_value = default_value;
        self
    }

    #[inline]
    pub fn min_date(mut self, min_date: Option<CalendarDate>) -> Self {
        self.min_date = min_date;
        self
    }

    #[inline]
    pub fn max_date(mut self, max_date: Option<CalendarDate>) -> Self {
        self.max_date = max_date;
        self
    }

    #[inline]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[inline]
    pub fn week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    #[inline]
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    #[inline]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    #[inline]
    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    /// Show the Clear button in the footer (default: `true`).
    #[inline]
    pub fn show_clear_button(mut self, show: bool) -> Self {
        self.show_clear_button = show;
        self
    }

    #[inline]
    pub fn label_clear_button(mut self, label: impl Into<String>) -> Self {
        self.label_clear_button = label.into();
        self
    }

    /// Show the Today button in the footer (default: `true`).
    #[inline]
    pub fn show_today_button(mut self, show: bool) -> Self {
        self.show_today_button = show;
        self
    }

    #[inline]
    pub fn label_today_button(mut self, label: impl Into<String>) -> Self {
        self.label_today_button = label.into();
        self
    }

    #[inline]
    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    #[inline]
    pub fn today_policy(mut self, today_policy: TodayPolicy) -> Self {
        self.today_policy = today_policy;
        self
    }

    #[inline]
    pub fn theme(mut self, theme: DatepickerTheme) -> Self {
        self.theme = theme;
        self
    }

    /// The default value clamped into the bounds.
    pub fn clamped_default(&self) -> Option<CalendarDate> {
        self.default_value
            .map(|date| crate::date::clamp_into_range(date, self.min_date, self.max_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DatepickerOptions::default();
        assert_eq!(options.language, "en");
        assert_eq!(options.week_start, WeekStart::Sunday);
        assert!(options.auto_hide && !options.inline && !options.open);
        assert_eq!(options.label_clear_button, "Clear");
        assert_eq!(options.label_today_button, "Today");
        assert_eq!(options.clamped_default(), None);
    }

    #[test]
    fn default_value_is_clamped() {
        let ymd = |m, d| CalendarDate::from_ymd(2024, m, d).ok();
        let options = DatepickerOptions::default()
            .default_value(ymd(1, 5))
            .min_date(ymd(1, 10))
            .max_date(ymd(1, 20));
        assert_eq!(options.clamped_default(), ymd(1, 10));
    }
}
