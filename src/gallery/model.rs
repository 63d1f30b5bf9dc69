use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::Size;

/// One filterable, sortable item of a gallery.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridItem {
    /// Stable identifier, unique within a gallery.
    pub id: String,
    /// Measured outer size (content, padding and border; margins excluded).
    #[serde(flatten)]
    pub size: Size,
    /// Categories the item belongs to.
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Values the gallery can be sorted by, keyed by sort key.
    #[serde(default)]
    pub sort_data: BTreeMap<String, String>,
    /// Searchable text content.
    #[serde(default)]
    pub text: String,
}

impl GridItem {
    /// An item with a size and no categories, sort data or text.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            size: Size::new(width, height),
            categories: BTreeSet::new(),
            sort_data: BTreeMap::new(),
            text: String::new(),
        }
    }

    /// Add a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Set the value used when sorting by `key`.
    pub fn with_sort_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.sort_data.insert(key.into(), value.into());
        self
    }

    /// Set the searchable text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Which categories are shown.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Every item.
    #[default]
    All,
    /// Items in this category.
    Category(String),
    /// Items in at least one of these categories.
    AnyOf(Vec<String>),
    /// Items in every one of these categories.
    AllOf(Vec<String>),
}

impl Filter {
    /// Whether `item` passes this filter.
    pub fn matches(&self, item: &GridItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => item.categories.contains(c),
            Filter::AnyOf(cs) => cs.iter().any(|c| item.categories.contains(c)),
            Filter::AllOf(cs) => cs.iter().all(|c| item.categories.contains(c)),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Compare two optional sort values.
///
/// Values fall into three ranks compared in order: missing, numeric, text. Numbers compare
/// with `total_cmp`, text lexically, so the result is a total order for any mix of values.
pub(crate) fn compare_sort_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    SortValue::of(a).cmp(&SortValue::of(b))
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Missing,
    Number(TotalF64),
    Text(&'a str),
}

impl<'a> SortValue<'a> {
    fn of(raw: Option<&'a str>) -> Self {
        match raw {
            None => SortValue::Missing,
            Some(s) => match s.trim().parse::<f64>() {
                Ok(n) => SortValue::Number(TotalF64(n)),
                Err(_) => SortValue::Text(s),
            },
        }
    }
}

struct TotalF64(f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/model.rs"]
mod tests;
