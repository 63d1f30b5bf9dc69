use std::collections::BTreeSet;

use crate::{
    apply::plan::{PlacementPlan, StaggerOptions},
    foundation::core::{Size, validate_container_width, validate_item_sizes},
    foundation::error::{GridfitError, GridfitResult},
    foundation::rng::Rng64,
    gallery::model::{Filter, GridItem, SortOrder, compare_sort_values},
    layout::strategy::{LayoutKind, LayoutOptions, compute_layout_with},
};

/// Sort key that orders items by insertion index instead of sort data.
pub const INDEX_SORT_KEY: &str = "index";

const SHUFFLE_ATTEMPTS: usize = 32;

/// A filterable, sortable set of items laid out inside a fixed-width container.
///
/// The gallery owns display order and filter state; every [`Gallery::arrange`] call runs a fresh
/// layout over the items that are currently filtered in.
#[derive(Clone, Debug)]
pub struct Gallery {
    items: Vec<GridItem>,
    order: Vec<usize>,
    search_text: Vec<String>,
    filter: Filter,
    search: String,
    container_width: f64,
    layout: LayoutKind,
    layout_opts: LayoutOptions,
    stagger: StaggerOptions,
    resize_container: bool,
}

impl Gallery {
    /// Create a gallery. Item ids must be unique and sizes valid.
    pub fn new(container_width: f64, items: Vec<GridItem>) -> GridfitResult<Self> {
        let container_width = validate_container_width(container_width)?;
        let sizes: Vec<Size> = items.iter().map(|i| i.size).collect();
        validate_item_sizes(&sizes)?;

        let mut seen = BTreeSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(GridfitError::validation("item id must be non-empty"));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(GridfitError::validation(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }

        Ok(Self {
            order: (0..items.len()).collect(),
            search_text: items.iter().map(|i| i.text.to_lowercase()).collect(),
            items,
            filter: Filter::All,
            search: String::new(),
            container_width,
            layout: LayoutKind::default(),
            layout_opts: LayoutOptions::default(),
            stagger: StaggerOptions::default(),
            resize_container: true,
        })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Items in display order, including filtered-out ones.
    pub fn ordered(&self) -> impl Iterator<Item = &GridItem> {
        self.order.iter().map(|&i| &self.items[i])
    }

    /// Filtered-in items in display order.
    pub fn active(&self) -> impl Iterator<Item = &GridItem> {
        self.order
            .iter()
            .filter(|&&i| self.is_active(i))
            .map(|&i| &self.items[i])
    }

    /// Current container width.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Current layout.
    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Current filter.
    pub fn current_filter(&self) -> &Filter {
        &self.filter
    }

    /// Switch layout.
    pub fn set_layout(&mut self, kind: LayoutKind) {
        self.layout = kind;
    }

    /// Replace layout options (column count, oversize policy).
    pub fn set_layout_options(&mut self, opts: LayoutOptions) {
        self.layout_opts = opts;
    }

    /// Replace stagger settings.
    pub fn set_stagger(&mut self, stagger: StaggerOptions) {
        self.stagger = stagger;
    }

    /// When `false`, plans report [`crate::ContainerHeight::Auto`].
    pub fn set_resize_container(&mut self, resize: bool) {
        self.resize_container = resize;
    }

    /// Change the container width, e.g. after a window resize.
    pub fn resize(&mut self, container_width: f64) -> GridfitResult<()> {
        self.container_width = validate_container_width(container_width)?;
        Ok(())
    }

    /// Show only items matching `filter`.
    pub fn filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Show only items whose text contains `term` (case-insensitive). Empty clears the search.
    pub fn search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
    }

    /// Stable sort of the display order by `sort_data[key]`, or by insertion index for
    /// [`INDEX_SORT_KEY`]. Items with equal values keep their relative order in both directions.
    pub fn sort(&mut self, key: &str, order: SortOrder) {
        let items = &self.items;
        if key == INDEX_SORT_KEY {
            self.order.sort_unstable();
            if order == SortOrder::Desc {
                self.order.reverse();
            }
            return;
        }
        self.order.sort_by(|&a, &b| {
            let ord = compare_sort_values(
                items[a].sort_data.get(key).map(String::as_str),
                items[b].sort_data.get(key).map(String::as_str),
            );
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    /// Shuffle the filtered-in items among their own slots of the display order.
    ///
    /// With two or more active items the resulting order always differs from the previous one.
    pub fn shuffle(&mut self, seed: u64) {
        let slots: Vec<usize> = (0..self.order.len())
            .filter(|&slot| self.is_active(self.order[slot]))
            .collect();
        if slots.len() < 2 {
            return;
        }

        let before: Vec<usize> = slots.iter().map(|&s| self.order[s]).collect();
        let mut rng = Rng64::new(seed);
        let mut shuffled = before.clone();
        for _ in 0..SHUFFLE_ATTEMPTS {
            rng.shuffle(&mut shuffled);
            if shuffled != before {
                break;
            }
        }
        if shuffled == before {
            shuffled.rotate_left(1);
        }

        for (&slot, idx) in slots.iter().zip(shuffled) {
            self.order[slot] = idx;
        }
        tracing::debug!(seed, active = slots.len(), "shuffled gallery");
    }

    /// Lay out the filtered-in items and build a plan covering every item.
    #[tracing::instrument(skip(self), fields(layout = %self.layout, width = self.container_width))]
    pub fn arrange(&self) -> GridfitResult<PlacementPlan> {
        let active: Vec<bool> = (0..self.items.len()).map(|i| self.is_active(i)).collect();
        let sizes: Vec<Size> = self
            .order
            .iter()
            .filter(|&&i| active[i])
            .map(|&i| self.items[i].size)
            .collect();

        let layout =
            compute_layout_with(self.layout, &sizes, self.container_width, &self.layout_opts)?;
        let plan = PlacementPlan::build(
            &self.items,
            &self.order,
            &active,
            self.layout,
            &layout,
            &self.stagger,
        )?;
        tracing::debug!(visible = sizes.len(), total = self.items.len(), "gallery arranged");

        Ok(if self.resize_container {
            plan
        } else {
            plan.without_height()
        })
    }

    fn is_active(&self, idx: usize) -> bool {
        self.filter.matches(&self.items[idx])
            && (self.search.is_empty() || self.search_text[idx].contains(&self.search))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/ops.rs"]
mod tests;
