//! The styling payload a host hands to the picker.
//!
//! Every field is an opaque class string: the picker never interprets them,
//! it only concatenates the ones that apply to a given element. Defaulting and
//! merging of themes is left to the host.

use crate::GridCell;

/// Join the non-empty parts with single spaces.
fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Class strings for every element of the picker.
///
/// Only class-based hosts apply this. The egui front-end draws with egui's own
/// visuals and ignores it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatepickerTheme {
    pub root: RootTheme,
    pub popup: PopupTheme,
    pub views: ViewsTheme,
}

impl DatepickerTheme {
    /// Classes of the element that holds one grid cell.
    pub fn cell_classes(&self, view: crate::ViewGranularity, cell: &GridCell) -> String {
        self.views.items(view).item.classes(cell)
    }

    /// Classes of the popup root.
    pub fn popup_classes(&self, inline: bool) -> String {
        self.popup.root.classes(inline)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RootTheme {
    pub base: String,
    pub input: String,
}

impl Default for RootTheme {
    fn default() -> Self {
        Self {
            base: "relative".to_owned(),
            input: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopupTheme {
    pub root: PopupRootTheme,
    pub header: HeaderTheme,
    pub view: BaseTheme,
    pub footer: FooterTheme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopupRootTheme {
    pub base: String,
    pub inline: String,
    pub inner: String,
}

impl Default for PopupRootTheme {
    fn default() -> Self {
        Self {
            base: "absolute top-10 z-50 block pt-2".to_owned(),
            inline: "relative top-0 z-auto".to_owned(),
            inner: "inline-block rounded-lg bg-white p-4 shadow-lg dark:bg-gray-700".to_owned(),
        }
    }
}

impl PopupRootTheme {
    pub fn classes(&self, inline: bool) -> String {
        join_classes([self.base.as_str(), if inline { self.inline.as_str() } else { "" }])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseTheme {
    pub base: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderTheme {
    pub base: String,
    pub title: String,
    pub selectors: SelectorsTheme,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorsTheme {
    pub base: String,
    pub button: SelectorButtonTheme,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorButtonTheme {
    pub base: String,
    pub prev: String,
    pub next: String,
    pub view: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FooterTheme {
    pub base: String,
    pub button: FooterButtonTheme,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FooterButtonTheme {
    pub base: String,
    pub today: String,
    pub clear: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewsTheme {
    pub days: DaysTheme,
    pub months: ItemsTheme,
    pub years: ItemsTheme,
    pub decades: ItemsTheme,
}

impl ViewsTheme {
    pub fn items(&self, view: crate::ViewGranularity) -> &ItemsTheme {
        match view {
            crate::ViewGranularity::Days => &self.days.items,
            crate::ViewGranularity::Months => &self.months,
            crate::ViewGranularity::Years => &self.years,
            crate::ViewGranularity::Decades => &self.decades,
        }
    }
}

/// The day view also has a weekday header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DaysTheme {
    pub header: DaysHeaderTheme,
    pub items: ItemsTheme,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DaysHeaderTheme {
    pub base: String,
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemsTheme {
    pub base: String,
    pub item: ItemTheme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemTheme {
    pub base: String,
    pub selected: String,
    pub disabled: String,

    /// Days outside the current month, years and decades outside the current period.
    pub muted: String,
}

impl Default for ItemTheme {
    fn default() -> Self {
        Self {
            base: "block flex-1 cursor-pointer rounded-lg border-0 text-center text-sm".to_owned(),
            selected: "bg-primary-700 text-white hover:bg-primary-600".to_owned(),
            disabled: "text-gray-500".to_owned(),
            muted: "dark:text-datepicker-dark text-datepicker".to_owned(),
        }
    }
}

impl ItemTheme {
    pub fn classes(&self, cell: &GridCell) -> String {
        join_classes([
            self.base.as_str(),
            if cell.selected { self.selected.as_str() } else { "" },
            if cell.disabled { self.disabled.as_str() } else { "" },
            if cell.muted { self.muted.as_str() } else { "" },
        ])
    }
}
