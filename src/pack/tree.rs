use crate::foundation::core::{Point, Size, validate_container_width, validate_item_sizes};
use crate::foundation::error::{GridfitError, GridfitResult};

/// Index of a node in the packer arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A free or occupied region of the packing bin.
///
/// A `used` node has been split around a placed item (or is a growth root) and is only ever
/// traversed; its `right` and `down` children hold the remaining free space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectNode {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width of the region.
    pub w: f64,
    /// Height of the region.
    pub h: f64,
    /// Whether the region has been split or grown around.
    pub used: bool,
    /// Free space to the right of the placed item.
    pub right: Option<NodeId>,
    /// Free space below the placed item.
    pub down: Option<NodeId>,
}

impl RectNode {
    fn free(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            used: false,
            right: None,
            down: None,
        }
    }

    fn fits(&self, w: f64, h: f64) -> bool {
        w <= self.w && h <= self.h
    }
}

/// What to do with items wider than the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Fail with [`GridfitError::OversizedItem`] before packing.
    #[default]
    Reject,
    /// Pack the item as if it were exactly as wide as the container. It overhangs on the right.
    Clamp,
}

/// Binary-tree shelf packer bounded by a fixed container width.
///
/// Items are placed first-fit in the order given; when nothing fits, the bin grows downward by
/// the pending item's height. The tree lives in an arena that is rebuilt on every
/// [`Packer::fit_all`] call, so the root can be swapped for a larger one by reassigning an index.
#[derive(Clone, Debug)]
pub struct Packer {
    width: f64,
    oversize: OversizePolicy,
    nodes: Vec<RectNode>,
    root: NodeId,
}

impl Packer {
    /// Create a packer for a container of the given width.
    pub fn new(container_width: f64) -> GridfitResult<Self> {
        let width = validate_container_width(container_width)?;
        Ok(Self {
            width,
            oversize: OversizePolicy::default(),
            nodes: vec![RectNode::free(0.0, 0.0, width, 0.0)],
            root: NodeId(0),
        })
    }

    /// Replace the oversize policy.
    pub fn with_oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize = policy;
        self
    }

    /// Container width the packer never exceeds.
    pub fn container_width(&self) -> f64 {
        self.width
    }

    /// Current bin height. After [`Packer::fit_all`] this is the container height.
    pub fn height(&self) -> f64 {
        self.nodes[self.root.0].h
    }

    /// Current root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &RectNode {
        &self.nodes[id.0]
    }

    /// Number of nodes allocated by the last pass.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Pack `items` in order and return each item's top-left corner, index aligned with input.
    ///
    /// The root starts as tall as the first item. All inputs are validated before the tree is
    /// rebuilt; once packing starts it always runs to completion.
    #[tracing::instrument(skip(self, items), fields(count = items.len(), width = self.width))]
    pub fn fit_all(&mut self, items: &[Size]) -> GridfitResult<Vec<Point>> {
        validate_item_sizes(items)?;
        let widths = self.effective_widths(items)?;

        let first_h = items.first().map_or(0.0, |s| s.height);
        self.nodes.clear();
        self.nodes.push(RectNode::free(0.0, 0.0, self.width, first_h));
        self.root = NodeId(0);

        let mut fits = Vec::with_capacity(items.len());
        for (idx, (size, &w)) in items.iter().zip(&widths).enumerate() {
            let h = size.height;
            let fit = match self.find_node(self.root, w, h) {
                Some(node) => self.split_node(node, w, h),
                None => self.grow_down(w, h)?,
            };
            tracing::trace!(idx, x = fit.x, y = fit.y, "placed item");
            fits.push(fit);
        }
        Ok(fits)
    }

    fn effective_widths(&self, items: &[Size]) -> GridfitResult<Vec<f64>> {
        items
            .iter()
            .enumerate()
            .map(|(index, s)| {
                if s.width <= self.width {
                    return Ok(s.width);
                }
                match self.oversize {
                    OversizePolicy::Reject => Err(GridfitError::OversizedItem {
                        index,
                        width: s.width,
                        container_width: self.width,
                    }),
                    OversizePolicy::Clamp => Ok(self.width),
                }
            })
            .collect()
    }

    /// First unused node (pre-order: node, right subtree, down subtree) that can hold `w x h`.
    fn find_node(&self, from: NodeId, w: f64, h: f64) -> Option<NodeId> {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.used {
                // Right must be explored before down, so it goes on the stack last.
                stack.extend(node.down);
                stack.extend(node.right);
            } else if node.fits(w, h) {
                return Some(id);
            }
        }
        None
    }

    fn split_node(&mut self, id: NodeId, w: f64, h: f64) -> Point {
        let node = self.nodes[id.0];
        let down = self.push(RectNode::free(node.x, node.y + h, node.w, node.h - h));
        let right = self.push(RectNode::free(node.x + w, node.y, node.w - w, h));

        let node = &mut self.nodes[id.0];
        node.used = true;
        node.down = Some(down);
        node.right = Some(right);
        Point::new(node.x, node.y)
    }

    fn grow_down(&mut self, w: f64, h: f64) -> GridfitResult<Point> {
        let old_root = self.root;
        let old = self.nodes[old_root.0];
        tracing::debug!(from = old.h, to = old.h + h, "growing bin down");

        let down = self.push(RectNode::free(0.0, old.h, old.w, h));
        let root = self.push(RectNode {
            x: 0.0,
            y: 0.0,
            w: old.w,
            h: old.h + h,
            used: true,
            right: Some(old_root),
            down: Some(down),
        });
        self.root = root;

        match self.find_node(root, w, h) {
            Some(node) => Ok(self.split_node(node, w, h)),
            None => Err(GridfitError::internal(format!(
                "no free node after growing by {h} for a {w}x{h} item"
            ))),
        }
    }

    fn push(&mut self, node: RectNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pack/tree.rs"]
mod tests;
