//! gridfit is a layout engine for filterable item grids.
//!
//! Given an ordered list of measured items and the container width, it computes the top-left
//! offset of every item and the height the container should take. Nothing here touches a DOM
//! or a renderer; the caller measures items and applies the returned offsets.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: the caller supplies outer sizes (`kurbo::Size`) in display order.
//! 2. **Lay out**: [`compute_layout`] dispatches on [`LayoutKind`]; `packed` runs the
//!    binary-tree [`Packer`], the other five layouts are row/column arithmetic.
//! 3. **Plan** (optional): a [`Gallery`] filters, searches, sorts and shuffles items, lays out
//!    the visible ones and returns a [`PlacementPlan`] with staggered transition delays.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same input always yields the same output; shuffles are seeded.
//! - **Validate first**: malformed input is rejected before any packing state is touched.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod apply;
mod config;
mod foundation;
mod gallery;
mod layout;
mod pack;

pub use apply::plan::{DelayMode, Placement, PlacementPlan, StaggerOptions};
pub use config::doc::{GridDoc, SortSpec};
pub use foundation::core::{ContainerHeight, Point, Position, Rect, Size, Vec2};
pub use foundation::error::{GridfitError, GridfitResult};
pub use gallery::model::{Filter, GridItem, SortOrder};
pub use gallery::ops::{Gallery, INDEX_SORT_KEY};
pub use layout::strategy::{
    LayoutKind, LayoutOptions, LayoutResult, compute_layout, compute_layout_with,
};
pub use pack::tree::{NodeId, OversizePolicy, Packer, RectNode};
