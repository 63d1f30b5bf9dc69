use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    apply::plan::StaggerOptions,
    foundation::core::{Size, validate_container_width, validate_item_sizes},
    foundation::error::{GridfitError, GridfitResult},
    gallery::model::{Filter, GridItem, SortOrder},
    gallery::ops::Gallery,
    layout::strategy::{LayoutKind, LayoutOptions},
    pack::tree::OversizePolicy,
};

/// Sort step applied when a document is turned into a gallery.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SortSpec {
    /// Sort key looked up in each item's `sort_data` (or `"index"`).
    pub key: String,
    /// Direction.
    #[serde(default)]
    pub order: SortOrder,
}

/// JSON-facing description of a gallery: container, layout settings, state and items.
///
/// ```json
/// {
///   "container_width": 300,
///   "layout": "packed",
///   "filter": { "category": "nature" },
///   "items": [{ "id": "a", "width": 100, "height": 50, "categories": ["nature"] }]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridDoc {
    /// Inner width of the container in pixels.
    pub container_width: f64,
    /// Layout to arrange with.
    #[serde(default)]
    pub layout: LayoutKind,
    /// Column count for the fixed-column layouts.
    #[serde(default)]
    pub columns: Option<usize>,
    /// Handling of items wider than the container.
    #[serde(default)]
    pub oversize: OversizePolicy,
    /// Category filter.
    #[serde(default)]
    pub filter: Filter,
    /// Text search term.
    #[serde(default)]
    pub search: Option<String>,
    /// Optional sort applied before shuffling.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Seed for a shuffle of the active items.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    /// Transition stagger settings.
    #[serde(default)]
    pub stagger: StaggerOptions,
    /// Whether plans should carry a pixel container height.
    #[serde(default = "default_resize_container")]
    pub resize_container: bool,
    /// Items in insertion order.
    pub items: Vec<GridItem>,
}

fn default_resize_container() -> bool {
    true
}

impl GridDoc {
    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GridfitResult<Self> {
        serde_json::from_reader(r).map_err(|e| GridfitError::serde(format!("parse grid JSON: {e}")))
    }

    /// Parse a document from a JSON string.
    pub fn from_json(s: &str) -> GridfitResult<Self> {
        serde_json::from_str(s).map_err(|e| GridfitError::serde(format!("parse grid JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> GridfitResult<Self> {
        let f = File::open(path).map_err(|e| {
            GridfitError::Other(
                anyhow::Error::new(e).context(format!("open grid JSON '{}'", path.display())),
            )
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> GridfitResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GridfitError::serde(e.to_string()))
    }

    /// Check dimensions and settings without building a gallery.
    pub fn validate(&self) -> GridfitResult<()> {
        validate_container_width(self.container_width)?;
        validate_item_sizes(&self.sizes())?;
        if self.columns == Some(0) {
            return Err(GridfitError::validation("columns must be > 0"));
        }
        if let Some(sort) = &self.sort {
            if sort.key.trim().is_empty() {
                return Err(GridfitError::validation("sort key must be non-empty"));
            }
        }
        Ok(())
    }

    /// Measured sizes of all items, in insertion order.
    pub fn sizes(&self) -> Vec<Size> {
        self.items.iter().map(|i| i.size).collect()
    }

    /// Layout options described by this document.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            columns: self.columns,
            oversize: self.oversize,
        }
    }

    /// Build a gallery and replay the document state: filter, search, sort, then shuffle.
    pub fn into_gallery(self) -> GridfitResult<Gallery> {
        self.validate()?;
        let opts = self.layout_options();

        let mut gallery = Gallery::new(self.container_width, self.items)?;
        gallery.set_layout(self.layout);
        gallery.set_layout_options(opts);
        gallery.set_stagger(self.stagger);
        gallery.set_resize_container(self.resize_container);
        gallery.filter(self.filter);
        if let Some(term) = &self.search {
            gallery.search(term);
        }
        if let Some(sort) = &self.sort {
            gallery.sort(&sort.key, sort.order);
        }
        if let Some(seed) = self.shuffle_seed {
            gallery.shuffle(seed);
        }
        Ok(gallery)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/doc.rs"]
mod tests;
