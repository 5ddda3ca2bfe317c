//! Layout tree: window arrangement for split panes.
//!
//! The layout is a binary tree where each leaf names a window by its index in
//! the editor's window array and each internal node splits its area either
//! horizontally (stacked top/bottom) or vertically (side by side).
//!
//! ```text
//! Vertical
//! ├── Leaf(0)           ← left pane
//! └── Horizontal
//!     ├── Leaf(1)       ← top-right pane
//!     └── Leaf(2)       ← bottom-right pane
//! ```
//!
//! # Index discipline
//!
//! Leaves hold *positions* in the window array, not stable ids. When a window
//! is closed the array compacts, so the tree must be relabelled in the same
//! step: [`LayoutTree::close_leaf`] followed by
//! [`LayoutTree::reindex_after_close`]. The pair keeps the leaf set equal to
//! `0..windows.len()`.
//!
//! # States
//!
//! The tree starts empty (a single unsplit window needs no tree), becomes a
//! single leaf via [`LayoutTree::init_root`], and grows by
//! [`LayoutTree::split_leaf`].

use std::mem;

use thiserror::Error;
use tracing::trace;

/// A rectangle on screen: origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

/// How an internal node divides its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// First child on top, second on the bottom. No separator; the top
    /// window's status line is the visual boundary.
    Horizontal,
    /// First child on the left, second on the right, with a one-column `│`
    /// separator between them.
    Vertical,
}

/// Navigation direction for directional focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout already has a root")]
    AlreadyInitialized,
    #[error("layout is empty")]
    Empty,
    #[error("no leaf for window {0}")]
    MissingLeaf(usize),
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A window occupying the node's whole area.
    Leaf(usize),

    /// Two children sharing the area.
    Split {
        orientation: Orientation,
        first: Box<Self>,
        second: Box<Self>,
    },
}

impl Node {
    #[must_use]
    pub const fn leaf(index: usize) -> Self {
        Self::Leaf(index)
    }

    #[must_use]
    pub fn split(orientation: Orientation, first: Self, second: Self) -> Self {
        Self::Split {
            orientation,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    #[must_use]
    pub const fn is_leaf_for(&self, index: usize) -> bool {
        matches!(self, Self::Leaf(i) if *i == index)
    }

    // -- Queries ---------------------------------------------------------------

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            Self::Leaf(index) => out.push(*index),
            Self::Split { first, second, .. } => {
                first.collect_leaves(out);
                second.collect_leaves(out);
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    fn internal_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Split { first, second, .. } => {
                1 + first.internal_count() + second.internal_count()
            }
        }
    }

    fn find_leaf(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Leaf(i) if *i == index => Some(self),
            Self::Leaf(_) => None,
            Self::Split { first, second, .. } => {
                first.find_leaf(index).or_else(|| second.find_leaf(index))
            }
        }
    }

    // -- Mutations -------------------------------------------------------------

    fn split_leaf(&mut self, target: usize, orientation: Orientation, new_index: usize) -> bool {
        match self {
            Self::Leaf(index) if *index == target => {
                *self = Self::split(orientation, Self::Leaf(target), Self::Leaf(new_index));
                true
            }
            Self::Leaf(_) => false,
            Self::Split { first, second, .. } => {
                first.split_leaf(target, orientation, new_index)
                    || second.split_leaf(target, orientation, new_index)
            }
        }
    }

    /// Remove the leaf for `target` below this node, promoting its sibling
    /// into the parent's place.
    fn remove_leaf(&mut self, target: usize) -> bool {
        let promoted = match self {
            Self::Leaf(_) => return false,
            Self::Split { first, second, .. } => {
                if first.is_leaf_for(target) {
                    mem::replace(second.as_mut(), Self::Leaf(0))
                } else if second.is_leaf_for(target) {
                    mem::replace(first.as_mut(), Self::Leaf(0))
                } else {
                    return first.remove_leaf(target) || second.remove_leaf(target);
                }
            }
        };
        *self = promoted;
        true
    }

    /// Rebuild the subtree with every leaf index above `closed` lowered by one.
    fn reindexed(self, closed: usize) -> Self {
        match self {
            Self::Leaf(index) if index > closed => Self::Leaf(index - 1),
            Self::Leaf(index) => Self::Leaf(index),
            Self::Split {
                orientation,
                first,
                second,
            } => Self::split(
                orientation,
                first.reindexed(closed),
                second.reindexed(closed),
            ),
        }
    }

    // -- Geometry --------------------------------------------------------------

    /// Child areas for a split, or `None` when a vertical split is too
    /// narrow to hold two panes and a separator.
    fn child_areas(orientation: Orientation, area: Rect) -> Option<(Rect, Rect)> {
        match orientation {
            Orientation::Horizontal => {
                let top_h = area.h / 2;
                Some((
                    Rect::new(area.x, area.y, area.w, top_h),
                    Rect::new(area.x, area.y + top_h, area.w, area.h - top_h),
                ))
            }
            Orientation::Vertical => {
                if area.w < 3 {
                    return None;
                }
                let left_w = area.w / 2;
                let right_w = area.w - left_w - 1; // -1 for separator
                Some((
                    Rect::new(area.x, area.y, left_w, area.h),
                    Rect::new(area.x + left_w + 1, area.y, right_w, area.h),
                ))
            }
        }
    }

    fn layout_into(&self, area: Rect, out: &mut Vec<(usize, Rect)>) {
        match self {
            Self::Leaf(index) => out.push((*index, area)),
            Self::Split {
                orientation,
                first,
                second,
            } => match Self::child_areas(*orientation, area) {
                Some((a, b)) => {
                    first.layout_into(a, out);
                    second.layout_into(b, out);
                }
                // Too narrow: the whole area goes to the first child.
                None => first.layout_into(area, out),
            },
        }
    }

    fn separators_into(&self, area: Rect, out: &mut Vec<(u16, u16, u16)>) {
        let Self::Split {
            orientation,
            first,
            second,
        } = self
        else {
            return;
        };
        let Some((a, b)) = Self::child_areas(*orientation, area) else {
            return;
        };
        if *orientation == Orientation::Vertical {
            out.push((a.x + a.w, area.y, area.h));
        }
        first.separators_into(a, out);
        second.separators_into(b, out);
    }
}

// ---------------------------------------------------------------------------
// LayoutTree
// ---------------------------------------------------------------------------

/// The layout tree, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutTree {
    root: Option<Node>,
}

impl LayoutTree {
    /// An empty tree (one unsplit window needs no layout).
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Drop the whole tree.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Create a single-leaf tree. Only valid while empty.
    ///
    /// # Errors
    ///
    /// [`LayoutError::AlreadyInitialized`] if the tree has a root.
    pub fn init_root(&mut self, index: usize) -> Result<(), LayoutError> {
        if self.root.is_some() {
            return Err(LayoutError::AlreadyInitialized);
        }
        self.root = Some(Node::Leaf(index));
        Ok(())
    }

    /// Replace the leaf for `target` with a split whose first child is
    /// `target` and whose second child is `new_index`.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Empty`] on an empty tree, [`LayoutError::MissingLeaf`]
    /// if no leaf holds `target`. The tree is unchanged on error.
    pub fn split_leaf(
        &mut self,
        target: usize,
        orientation: Orientation,
        new_index: usize,
    ) -> Result<(), LayoutError> {
        let root = self.root.as_mut().ok_or(LayoutError::Empty)?;
        if root.split_leaf(target, orientation, new_index) {
            trace!(target, new_index, ?orientation, "layout leaf split");
            Ok(())
        } else {
            Err(LayoutError::MissingLeaf(target))
        }
    }

    /// Depth-first search for the leaf bound to `index`.
    #[must_use]
    pub fn find_leaf(&self, index: usize) -> Option<&Node> {
        self.root.as_ref()?.find_leaf(index)
    }

    /// Remove the leaf for `index`, promoting its sibling. Closing the only
    /// leaf empties the tree.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Empty`] on an empty tree, [`LayoutError::MissingLeaf`]
    /// if no leaf holds `index`. The tree is unchanged on error.
    pub fn close_leaf(&mut self, index: usize) -> Result<(), LayoutError> {
        let root = self.root.as_mut().ok_or(LayoutError::Empty)?;
        if root.is_leaf_for(index) {
            self.root = None;
            return Ok(());
        }
        if root.remove_leaf(index) {
            trace!(index, "layout leaf closed");
            Ok(())
        } else {
            Err(LayoutError::MissingLeaf(index))
        }
    }

    /// Lower every leaf index above `closed` by one, mirroring the window
    /// array shifting down after a removal.
    pub fn reindex_after_close(&mut self, closed: usize) {
        self.root = self.root.take().map(|root| root.reindexed(closed));
    }

    /// All leaf indices, depth-first, left to right.
    #[must_use]
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_leaves(&mut out);
        }
        out
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    #[must_use]
    pub fn internal_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::internal_count)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.find_leaf(index).is_some()
    }

    /// Screen rectangles for every leaf that gets space.
    ///
    /// Horizontal splits halve the height. Vertical splits halve the width
    /// and reserve one column for the separator; below three columns the
    /// second child gets nothing.
    #[must_use]
    pub fn layout(&self, area: Rect) -> Vec<(usize, Rect)> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.layout_into(area, &mut out);
        }
        out
    }

    /// `(x, y, height)` of every vertical `│` separator.
    #[must_use]
    pub fn separators(&self, area: Rect) -> Vec<(u16, u16, u16)> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.separators_into(area, &mut out);
        }
        out
    }

    /// The window in `dir` from `current`, nearest by center distance.
    #[must_use]
    pub fn neighbor(&self, current: usize, dir: Direction, area: Rect) -> Option<usize> {
        let rects = self.layout(area);
        let cur = rects.iter().find(|(index, _)| *index == current)?.1;

        let cur_mid_x = i32::from(cur.x) + i32::from(cur.w) / 2;
        let cur_mid_y = i32::from(cur.y) + i32::from(cur.h) / 2;

        rects
            .iter()
            .filter(|(index, _)| *index != current)
            .filter(|(_, r)| match dir {
                Direction::Left => r.x + r.w <= cur.x,
                Direction::Right => r.x >= cur.x + cur.w,
                Direction::Up => r.y + r.h <= cur.y,
                Direction::Down => r.y >= cur.y + cur.h,
            })
            .min_by_key(|(_, r)| {
                let dx = (i32::from(r.x) + i32::from(r.w) / 2 - cur_mid_x).abs();
                let dy = (i32::from(r.y) + i32::from(r.h) / 2 - cur_mid_y).abs();
                match dir {
                    Direction::Left | Direction::Right => (dx, dy),
                    Direction::Up | Direction::Down => (dy, dx),
                }
            })
            .map(|(index, _)| *index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AREA: Rect = Rect::new(0, 0, 80, 24);

    fn tree(root: Node) -> LayoutTree {
        LayoutTree { root: Some(root) }
    }

    /// Vertical(0, Horizontal(1, 2))
    fn three() -> LayoutTree {
        tree(Node::split(
            Orientation::Vertical,
            Node::leaf(0),
            Node::split(Orientation::Horizontal, Node::leaf(1), Node::leaf(2)),
        ))
    }

    // ── States ───────────────────────────────────────────────────────────

    #[test]
    fn starts_empty() {
        let t = LayoutTree::new();
        assert!(t.is_empty());
        assert_eq!(t.leaf_count(), 0);
        assert!(t.leaves().is_empty());
        assert!(t.layout(AREA).is_empty());
    }

    #[test]
    fn init_root_only_from_empty() {
        let mut t = LayoutTree::new();
        assert_eq!(t.init_root(0), Ok(()));
        assert_eq!(t.leaves(), vec![0]);
        assert_eq!(t.init_root(1), Err(LayoutError::AlreadyInitialized));
        assert_eq!(t.leaves(), vec![0]);
    }

    // ── split_leaf ───────────────────────────────────────────────────────

    #[test]
    fn split_puts_original_first() {
        let mut t = LayoutTree::new();
        t.init_root(0).unwrap();
        t.split_leaf(0, Orientation::Horizontal, 1).unwrap();
        assert_eq!(
            t.root(),
            Some(&Node::split(
                Orientation::Horizontal,
                Node::leaf(0),
                Node::leaf(1)
            ))
        );
    }

    #[test]
    fn split_nested_leaf() {
        let mut t = three();
        t.split_leaf(1, Orientation::Vertical, 3).unwrap();
        assert_eq!(t.leaves(), vec![0, 1, 3, 2]);
        assert_eq!(t.internal_count(), 3);
    }

    #[test]
    fn split_errors_leave_tree_alone() {
        let mut t = LayoutTree::new();
        assert_eq!(
            t.split_leaf(0, Orientation::Vertical, 1),
            Err(LayoutError::Empty)
        );
        let mut t = three();
        let before = t.clone();
        assert_eq!(
            t.split_leaf(9, Orientation::Vertical, 3),
            Err(LayoutError::MissingLeaf(9))
        );
        assert_eq!(t, before);
    }

    #[test]
    fn n_horizontal_splits_give_n_plus_one_unique_leaves() {
        let mut t = LayoutTree::new();
        t.init_root(0).unwrap();
        for n in 1..=6 {
            // Always split the newest window, as the editor does.
            t.split_leaf(n - 1, Orientation::Horizontal, n).unwrap();
        }
        let mut leaves = t.leaves();
        assert_eq!(leaves.len(), 7);
        leaves.sort_unstable();
        assert_eq!(leaves, (0..7).collect::<Vec<_>>());
    }

    // ── find_leaf ────────────────────────────────────────────────────────

    #[test]
    fn find_leaf_depth_first() {
        let t = three();
        assert_eq!(t.find_leaf(2), Some(&Node::Leaf(2)));
        assert_eq!(t.find_leaf(7), None);
        assert!(t.contains(0));
        assert!(!LayoutTree::new().contains(0));
    }

    // ── close_leaf / reindex ─────────────────────────────────────────────

    #[test]
    fn close_promotes_sibling_subtree() {
        let mut t = three();
        t.close_leaf(0).unwrap();
        assert_eq!(
            t.root(),
            Some(&Node::split(
                Orientation::Horizontal,
                Node::leaf(1),
                Node::leaf(2)
            ))
        );
    }

    #[test]
    fn close_nested_leaf() {
        let mut t = three();
        t.close_leaf(1).unwrap();
        assert_eq!(
            t.root(),
            Some(&Node::split(
                Orientation::Vertical,
                Node::leaf(0),
                Node::leaf(2)
            ))
        );
    }

    #[test]
    fn close_single_leaf_empties_tree() {
        let mut t = LayoutTree::new();
        t.init_root(4).unwrap();
        t.close_leaf(4).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn close_errors() {
        let mut t = LayoutTree::new();
        assert_eq!(t.close_leaf(0), Err(LayoutError::Empty));
        t.init_root(0).unwrap();
        assert_eq!(t.close_leaf(1), Err(LayoutError::MissingLeaf(1)));
        let mut t = three();
        assert_eq!(t.close_leaf(5), Err(LayoutError::MissingLeaf(5)));
        assert_eq!(t.leaf_count(), 3);
    }

    #[test]
    fn reindex_lowers_only_higher_indices() {
        let mut t = three();
        t.close_leaf(1).unwrap();
        t.reindex_after_close(1);
        assert_eq!(t.leaves(), vec![0, 1]);
    }

    #[test]
    fn close_any_leaf_relabels_contiguously() {
        for closed in 0..5 {
            let mut t = LayoutTree::new();
            t.init_root(0).unwrap();
            for n in 1..5 {
                t.split_leaf(n - 1, Orientation::Horizontal, n).unwrap();
            }
            t.close_leaf(closed).unwrap();
            t.reindex_after_close(closed);
            let mut leaves = t.leaves();
            leaves.sort_unstable();
            assert_eq!(leaves, vec![0, 1, 2, 3], "closed {closed}");
        }
    }

    // ── Geometry ─────────────────────────────────────────────────────────

    #[test]
    fn horizontal_layout_halves_height() {
        let t = tree(Node::split(
            Orientation::Horizontal,
            Node::leaf(0),
            Node::leaf(1),
        ));
        let rects = t.layout(Rect::new(0, 0, 80, 25));
        assert_eq!(
            rects,
            vec![
                (0, Rect::new(0, 0, 80, 12)),
                (1, Rect::new(0, 12, 80, 13)),
            ]
        );
        assert!(t.separators(AREA).is_empty());
    }

    #[test]
    fn vertical_layout_reserves_separator() {
        let t = tree(Node::split(Orientation::Vertical, Node::leaf(0), Node::leaf(1)));
        assert_eq!(
            t.layout(AREA),
            vec![(0, Rect::new(0, 0, 40, 24)), (1, Rect::new(41, 0, 39, 24))]
        );
        assert_eq!(t.separators(AREA), vec![(40, 0, 24)]);
    }

    #[test]
    fn narrow_vertical_gives_all_to_first() {
        let t = tree(Node::split(Orientation::Vertical, Node::leaf(0), Node::leaf(1)));
        let area = Rect::new(0, 0, 2, 10);
        assert_eq!(t.layout(area), vec![(0, area)]);
        assert!(t.separators(area).is_empty());
    }

    #[test]
    fn nested_layout_with_offset() {
        let t = three();
        let rects = t.layout(Rect::new(5, 1, 81, 24));
        assert_eq!(
            rects,
            vec![
                (0, Rect::new(5, 1, 40, 24)),
                (1, Rect::new(46, 1, 40, 12)),
                (2, Rect::new(46, 13, 40, 12)),
            ]
        );
    }

    // ── neighbor ─────────────────────────────────────────────────────────

    #[test]
    fn neighbor_nested() {
        let t = three();
        assert_eq!(t.neighbor(0, Direction::Right, AREA), Some(1));
        assert_eq!(t.neighbor(1, Direction::Left, AREA), Some(0));
        assert_eq!(t.neighbor(1, Direction::Down, AREA), Some(2));
        assert_eq!(t.neighbor(2, Direction::Up, AREA), Some(1));
        assert_eq!(t.neighbor(0, Direction::Left, AREA), None);
    }

    #[test]
    fn neighbor_single_or_missing() {
        let mut t = LayoutTree::new();
        assert_eq!(t.neighbor(0, Direction::Right, AREA), None);
        t.init_root(0).unwrap();
        assert_eq!(t.neighbor(0, Direction::Right, AREA), None);
        assert_eq!(three().neighbor(9, Direction::Right, AREA), None);
    }
}
