use crate::{
    foundation::core::{ContainerHeight, Position},
    foundation::error::{GridfitError, GridfitResult},
    gallery::model::GridItem,
    layout::strategy::{LayoutKind, LayoutResult},
};

/// How transition start times are staggered across visible items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayMode {
    /// All items start together.
    Disabled,
    /// The k-th visible item waits `k * delay`.
    #[default]
    Progressive,
    /// Even visible items wait `delay`, odd ones start immediately.
    Alternate,
}

/// Stagger settings for a placement plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaggerOptions {
    /// Stagger pattern.
    #[serde(default)]
    pub mode: DelayMode,
    /// Base delay in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
}

impl StaggerOptions {
    /// Delay for the `k`-th visible item.
    pub fn delay_for(&self, k: usize) -> u64 {
        match self.mode {
            DelayMode::Disabled => 0,
            DelayMode::Progressive => self.delay_ms.saturating_mul(k as u64),
            DelayMode::Alternate if k % 2 == 0 => self.delay_ms,
            DelayMode::Alternate => 0,
        }
    }
}

/// What a renderer should do with one item.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Item id.
    pub id: String,
    /// Whether the item is filtered in.
    pub visible: bool,
    /// Target offset; `None` for hidden items.
    pub position: Option<Position>,
    /// Transition start delay in milliseconds.
    pub delay_ms: u64,
}

/// Renderer-facing result of arranging a gallery: every item in display order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlacementPlan {
    /// Layout the positions were computed with.
    pub layout: LayoutKind,
    /// Height to give the container.
    pub container_height: ContainerHeight,
    /// One entry per item, in display order.
    pub placements: Vec<Placement>,
}

impl PlacementPlan {
    /// Pair a layout computed over the active items with every item of the gallery.
    ///
    /// `order` is the display order (indices into `items`); `active[i]` says whether `items[i]`
    /// is filtered in. `layout` must hold exactly one position per active item, in display order.
    pub fn build(
        items: &[GridItem],
        order: &[usize],
        active: &[bool],
        kind: LayoutKind,
        layout: &LayoutResult,
        stagger: &StaggerOptions,
    ) -> GridfitResult<Self> {
        let active_count = order.iter().filter(|&&i| active[i]).count();
        if active_count != layout.len() {
            return Err(GridfitError::internal(format!(
                "layout has {} positions for {active_count} active items",
                layout.len()
            )));
        }

        let mut k = 0usize;
        let placements = order
            .iter()
            .map(|&i| {
                let item = &items[i];
                if !active[i] {
                    return Placement {
                        id: item.id.clone(),
                        visible: false,
                        position: None,
                        delay_ms: 0,
                    };
                }
                let placement = Placement {
                    id: item.id.clone(),
                    visible: true,
                    position: Some(layout.positions[k]),
                    delay_ms: stagger.delay_for(k),
                };
                k += 1;
                placement
            })
            .collect();

        Ok(Self {
            layout: kind,
            container_height: layout.height,
            placements,
        })
    }

    /// Replace the container height with [`ContainerHeight::Auto`].
    pub fn without_height(mut self) -> Self {
        self.container_height = ContainerHeight::Auto;
        self
    }

    /// Placements of filtered-in items, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.visible)
    }

    /// Placement for the item with `id`.
    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/apply/plan.rs"]
mod tests;
