use std::fmt;
use std::str::FromStr;

use crate::{
    foundation::core::{
        ContainerHeight, Position, Rect, Size, validate_container_width, validate_item_sizes,
    },
    foundation::error::{GridfitError, GridfitResult},
    pack::tree::{OversizePolicy, Packer},
};

/// The six placement algorithms a grid can be arranged with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    /// First-fit binary-tree packing of variable-sized items.
    Packed,
    /// One left-to-right row.
    Horizontal,
    /// One top-to-bottom column.
    Vertical,
    /// Equal-height items flowing in wrapped rows.
    SameHeight,
    /// Equal-width items stacked in fixed columns.
    SameWidth,
    /// Equal-size items on a regular grid.
    #[default]
    SameSize,
}

impl LayoutKind {
    /// Every layout, in declaration order.
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Packed,
        LayoutKind::Horizontal,
        LayoutKind::Vertical,
        LayoutKind::SameHeight,
        LayoutKind::SameWidth,
        LayoutKind::SameSize,
    ];

    /// Canonical layout name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Packed => "packed",
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Vertical => "vertical",
            LayoutKind::SameHeight => "sameHeight",
            LayoutKind::SameWidth => "sameWidth",
            LayoutKind::SameSize => "sameSize",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = GridfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| GridfitError::unknown_layout(s))
    }
}

/// Knobs shared by all layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutOptions {
    /// Column count for `sameWidth` / `sameSize`. Derived from the first item when unset.
    #[serde(default)]
    pub columns: Option<usize>,
    /// Handling of items wider than the container under `packed`.
    #[serde(default)]
    pub oversize: OversizePolicy,
}

/// Computed offsets, index aligned with the input items, plus the container height.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutResult {
    /// Top-left offset of each item.
    pub positions: Vec<Position>,
    /// Height the container should take.
    pub height: ContainerHeight,
}

impl LayoutResult {
    /// The empty layout: no positions, zero height.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no item was placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rectangles covered by `items` at their computed offsets.
    pub fn rects<'a>(&'a self, items: &'a [Size]) -> impl Iterator<Item = Rect> + 'a {
        self.positions
            .iter()
            .zip(items)
            .map(|(pos, size)| pos.rect(*size))
    }
}

/// Compute a layout with an optional column count and default options otherwise.
pub fn compute_layout(
    kind: LayoutKind,
    items: &[Size],
    container_width: f64,
    columns_hint: Option<usize>,
) -> GridfitResult<LayoutResult> {
    let opts = LayoutOptions {
        columns: columns_hint,
        ..LayoutOptions::default()
    };
    compute_layout_with(kind, items, container_width, &opts)
}

/// Compute final offsets for `items` under `kind` inside a container `container_width` wide.
///
/// Sizes are outer boxes (content, padding and border; margins excluded). Inputs are validated
/// up front; an empty item list is not an error and yields [`LayoutResult::empty`].
#[tracing::instrument(skip(items, opts), fields(count = items.len()))]
pub fn compute_layout_with(
    kind: LayoutKind,
    items: &[Size],
    container_width: f64,
    opts: &LayoutOptions,
) -> GridfitResult<LayoutResult> {
    let width = validate_container_width(container_width)?;
    validate_item_sizes(items)?;
    if opts.columns == Some(0) {
        return Err(GridfitError::invalid_dimension("column count must be > 0"));
    }

    let Some(first) = items.first().copied() else {
        return Ok(LayoutResult::empty());
    };

    let out = match kind {
        LayoutKind::Packed => packed(items, width, opts.oversize)?,
        LayoutKind::Horizontal => horizontal(items),
        LayoutKind::Vertical => vertical(items),
        LayoutKind::SameHeight => same_height(items, first, width),
        LayoutKind::SameWidth => same_width(items, first, column_count(items, first, width, opts)),
        LayoutKind::SameSize => same_size(items, first, column_count(items, first, width, opts)),
    };
    tracing::debug!(layout = %kind, height = ?out.height, "layout computed");
    Ok(out)
}

fn packed(items: &[Size], width: f64, oversize: OversizePolicy) -> GridfitResult<LayoutResult> {
    let mut packer = Packer::new(width)?.with_oversize_policy(oversize);
    let fits = packer.fit_all(items)?;
    Ok(LayoutResult {
        positions: fits.into_iter().map(Position::from).collect(),
        height: ContainerHeight::Px(packer.height()),
    })
}

fn horizontal(items: &[Size]) -> LayoutResult {
    let mut left = 0.0;
    let mut tallest = 0.0f64;
    let positions = items
        .iter()
        .map(|s| {
            let pos = Position::new(left, 0.0);
            left += s.width;
            tallest = tallest.max(s.height);
            pos
        })
        .collect();
    LayoutResult {
        positions,
        height: ContainerHeight::Px(tallest),
    }
}

fn vertical(items: &[Size]) -> LayoutResult {
    let mut top = 0.0;
    let positions = items
        .iter()
        .map(|s| {
            let pos = Position::new(0.0, top);
            top += s.height;
            pos
        })
        .collect();
    LayoutResult {
        positions,
        height: ContainerHeight::Px(top),
    }
}

fn same_height(items: &[Size], first: Size, width: f64) -> LayoutResult {
    let row_h = first.height;
    let mut positions = Vec::with_capacity(items.len());
    let (mut left, mut top, mut rows) = (0.0, 0.0, 1usize);

    for (idx, current) in items.iter().enumerate() {
        positions.push(Position::new(left, top));
        // Wrap is decided after placing `current`, by peeking at the item that follows it.
        let Some(peek) = items.get(idx + 1) else {
            break;
        };
        if left + current.width + peek.width > width {
            left = 0.0;
            top += row_h;
            rows += 1;
        } else {
            left += current.width;
        }
    }

    LayoutResult {
        positions,
        height: ContainerHeight::Px(rows as f64 * row_h),
    }
}

fn same_width(items: &[Size], first: Size, cols: usize) -> LayoutResult {
    let mut column_heights = vec![0.0f64; cols.min(items.len())];
    let positions = items
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let col = idx % cols;
            let pos = Position::new(col as f64 * first.width, column_heights[col]);
            column_heights[col] += s.height;
            pos
        })
        .collect();
    let tallest = column_heights.into_iter().fold(0.0, f64::max);
    LayoutResult {
        positions,
        height: ContainerHeight::Px(tallest),
    }
}

fn same_size(items: &[Size], first: Size, cols: usize) -> LayoutResult {
    let positions = items
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            Position::new(
                (idx % cols) as f64 * first.width,
                (idx / cols) as f64 * first.height,
            )
        })
        .collect();
    let rows = items.len().div_ceil(cols);
    LayoutResult {
        positions,
        height: ContainerHeight::Px(rows as f64 * first.height),
    }
}

/// Column count for the fixed-column layouts: the caller's hint, else `round(W / first.width)`.
fn column_count(items: &[Size], first: Size, width: f64, opts: &LayoutOptions) -> usize {
    if let Some(cols) = opts.columns {
        return cols;
    }
    let cols = (width / first.width).round();
    if !cols.is_finite() {
        // Zero-width items: everything shares one row.
        return items.len().max(1);
    }
    (cols as usize).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/strategy.rs"]
mod tests;
