//! Container content regions, scrolling, and sizing modes
//!
//! A container positions children inside its content region, a sub-rectangle
//! of its bounds. The region defaults to the full bounds until explicitly
//! assigned; once assigned it is sticky and derived widgets recompute it
//! themselves in response to resizes. Scroll offsets subtract from child
//! absolute positions, and drawing of children is clipped to the region.

use crate::events::Property;
use crate::foundation::geometry::Rect;
use crate::foundation::math::Vec2;
use crate::ui::tree::{ControlKey, UiTree};

/// How a container derives its own width or height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Fixed: whatever was assigned explicitly
    #[default]
    Standard,
    /// Grow to fit the children's extent plus auto-size padding
    AutoSize,
    /// Grow to fill the remaining space in the parent's content region
    Fill,
}

/// Per-container layout state
#[derive(Debug)]
pub struct ContainerState {
    pub(crate) children: Vec<ControlKey>,
    pub(crate) content_region: Option<Rect>,
    pub(crate) horizontal_scroll: f32,
    pub(crate) vertical_scroll: f32,
    pub(crate) width_mode: SizingMode,
    pub(crate) height_mode: SizingMode,
    pub(crate) auto_size_padding: Vec2,
}

impl Default for ContainerState {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            content_region: None,
            horizontal_scroll: 0.0,
            vertical_scroll: 0.0,
            width_mode: SizingMode::Standard,
            height_mode: SizingMode::Standard,
            auto_size_padding: Vec2::zeros(),
        }
    }
}

impl UiTree {
    /// Content region of a container in its local space
    ///
    /// Falls back to the full bounds at (0,0) until a region has been
    /// explicitly assigned. Returns `None` for leaves and stale keys.
    pub fn content_region(&self, key: ControlKey) -> Option<Rect> {
        let node = self.nodes.get(key)?;
        node.container.as_ref()?;
        Some(node.resolved_content_region())
    }

    /// Assign an explicit content region
    ///
    /// The region is sticky: it survives subsequent resizes until reassigned.
    pub fn set_content_region(&mut self, key: ControlKey, region: Rect) {
        let Some(container) = self.nodes.get_mut(key).and_then(|n| n.container.as_mut()) else {
            log::warn!("content region write on a non-container control");
            return;
        };
        if container.content_region == Some(region) {
            return;
        }
        container.content_region = Some(region);
        self.pending.push(crate::events::UiEvent::PropertyChanged {
            control: key,
            property: Property::ContentRegion,
        });
        self.invalidate(key);
    }

    /// Current scroll offsets (horizontal, vertical)
    pub fn scroll_offset(&self, key: ControlKey) -> Vec2 {
        self.nodes.get(key).map_or_else(Vec2::zeros, |n| n.scroll_offset())
    }

    /// Set the horizontal scroll offset, clamped to the scrollable range
    pub fn set_horizontal_scroll(&mut self, key: ControlKey, offset: f32) {
        self.set_scroll(key, offset, true);
    }

    /// Set the vertical scroll offset, clamped to the scrollable range
    pub fn set_vertical_scroll(&mut self, key: ControlKey, offset: f32) {
        self.set_scroll(key, offset, false);
    }

    fn set_scroll(&mut self, key: ControlKey, offset: f32, horizontal: bool) {
        let Some(region) = self.content_region(key) else {
            log::warn!("scroll write on a non-container control");
            return;
        };
        let bounds = self.content_bounds(key);
        let range = if horizontal {
            (bounds.x - region.width).max(0.0)
        } else {
            (bounds.y - region.height).max(0.0)
        };
        let offset = offset.clamp(0.0, range);

        let Some(container) = self.nodes.get_mut(key).and_then(|n| n.container.as_mut()) else {
            return;
        };
        let slot = if horizontal {
            &mut container.horizontal_scroll
        } else {
            &mut container.vertical_scroll
        };
        if (*slot - offset).abs() < f32::EPSILON {
            return;
        }
        *slot = offset;
        self.pending.push(crate::events::UiEvent::PropertyChanged {
            control: key,
            property: Property::ScrollOffset,
        });
    }

    /// Configure how the container derives its width and height
    pub fn set_sizing_modes(&mut self, key: ControlKey, width: SizingMode, height: SizingMode) {
        let Some(container) = self.nodes.get_mut(key).and_then(|n| n.container.as_mut()) else {
            log::warn!("sizing mode write on a non-container control");
            return;
        };
        if container.width_mode == width && container.height_mode == height {
            return;
        }
        container.width_mode = width;
        container.height_mode = height;
        self.pending.push(crate::events::UiEvent::PropertyChanged {
            control: key,
            property: Property::SizingMode,
        });
    }

    /// Extra space added beyond the children's extent in AutoSize mode
    pub fn set_auto_size_padding(&mut self, key: ControlKey, padding: Vec2) {
        if let Some(container) = self.nodes.get_mut(key).and_then(|n| n.container.as_mut()) {
            container.auto_size_padding = padding;
        }
    }

    /// Rightmost/bottommost extent of the container's children
    ///
    /// Zero when the container has no children, so auto-sizing collapses to
    /// the padding alone.
    pub fn content_bounds(&self, key: ControlKey) -> Vec2 {
        let mut extent = Vec2::zeros();
        for &child in self.children(key) {
            if let Some(state) = self.state(child) {
                let bounds = state.bounds();
                extent.x = extent.x.max(bounds.right());
                extent.y = extent.y.max(bounds.bottom());
            }
        }
        extent
    }
}

/// Apply the AutoSize/Fill sizing pass for one control
///
/// Runs every update tick. Both derived modes size against the parent, so a
/// detached container keeps its explicit size untouched.
pub(crate) fn apply_sizing(tree: &mut UiTree, key: ControlKey) {
    let Some(node) = tree.nodes.get(key) else {
        return;
    };
    let Some(container) = node.container.as_ref() else {
        return;
    };
    let (width_mode, height_mode) = (container.width_mode, container.height_mode);
    if width_mode == SizingMode::Standard && height_mode == SizingMode::Standard {
        return;
    }
    let Some(parent) = node.state.parent else {
        return;
    };
    let auto_pad = container.auto_size_padding;
    let location = node.state.location;
    let mut size = node.state.size;

    let extent = tree.content_bounds(key);
    let parent_region = tree
        .content_region(parent)
        .unwrap_or_else(|| tree.state(parent).map_or(Rect::ZERO, |s| s.bounds()));

    size.x = match width_mode {
        SizingMode::Standard => size.x,
        SizingMode::AutoSize => extent.x + auto_pad.x,
        SizingMode::Fill => (parent_region.width - location.x).max(0.0),
    };
    size.y = match height_mode {
        SizingMode::Standard => size.y,
        SizingMode::AutoSize => extent.y + auto_pad.y,
        SizingMode::Fill => (parent_region.height - location.y).max(0.0),
    };
    tree.set_size(key, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::geometry::Rect;

    #[test]
    fn test_content_region_defaults_to_full_bounds() {
        let mut tree = UiTree::new();
        let key = tree.add_plain_container();
        tree.set_size(key, Vec2::new(300.0, 150.0));
        assert_eq!(
            tree.content_region(key),
            Some(Rect::new(0.0, 0.0, 300.0, 150.0))
        );
    }

    #[test]
    fn test_content_region_is_sticky_across_resize() {
        let mut tree = UiTree::new();
        let key = tree.add_plain_container();
        tree.set_size(key, Vec2::new(300.0, 150.0));
        tree.set_content_region(key, Rect::new(4.0, 20.0, 292.0, 126.0));

        tree.set_size(key, Vec2::new(500.0, 400.0));
        assert_eq!(
            tree.content_region(key),
            Some(Rect::new(4.0, 20.0, 292.0, 126.0))
        );
    }

    #[test]
    fn test_content_bounds_tracks_children_extent() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        assert_eq!(tree.content_bounds(container), Vec2::zeros());

        let a = tree.add_plain();
        tree.set_location(a, Vec2::new(10.0, 10.0));
        tree.set_size(a, Vec2::new(50.0, 20.0));
        tree.try_set_parent(a, Some(container)).unwrap();

        let b = tree.add_plain();
        tree.set_location(b, Vec2::new(0.0, 80.0));
        tree.set_size(b, Vec2::new(30.0, 30.0));
        tree.try_set_parent(b, Some(container)).unwrap();

        assert_eq!(tree.content_bounds(container), Vec2::new(60.0, 110.0));
    }

    #[test]
    fn test_auto_size_converges_after_one_tick() {
        let mut tree = UiTree::new();
        let parent = tree.add_plain_container();
        tree.set_size(parent, Vec2::new(500.0, 500.0));

        let auto = tree.add_plain_container();
        tree.set_sizing_modes(auto, SizingMode::AutoSize, SizingMode::AutoSize);
        tree.set_auto_size_padding(auto, Vec2::new(12.0, 8.0));
        tree.try_set_parent(auto, Some(parent)).unwrap();

        let child = tree.add_plain();
        tree.set_location(child, Vec2::new(20.0, 30.0));
        tree.set_size(child, Vec2::new(100.0, 40.0));
        tree.try_set_parent(child, Some(auto)).unwrap();

        apply_sizing(&mut tree, auto);
        assert_eq!(tree.state(auto).unwrap().size(), Vec2::new(132.0, 78.0));
    }

    #[test]
    fn test_auto_size_requires_parent() {
        let mut tree = UiTree::new();
        let auto = tree.add_plain_container();
        tree.set_sizing_modes(auto, SizingMode::AutoSize, SizingMode::AutoSize);
        tree.set_size(auto, Vec2::new(77.0, 33.0));

        apply_sizing(&mut tree, auto);
        assert_eq!(tree.state(auto).unwrap().size(), Vec2::new(77.0, 33.0));
    }

    #[test]
    fn test_fill_takes_remaining_parent_space() {
        let mut tree = UiTree::new();
        let parent = tree.add_plain_container();
        tree.set_size(parent, Vec2::new(400.0, 300.0));

        let fill = tree.add_plain_container();
        tree.set_location(fill, Vec2::new(150.0, 100.0));
        tree.set_sizing_modes(fill, SizingMode::Fill, SizingMode::Fill);
        tree.try_set_parent(fill, Some(parent)).unwrap();

        apply_sizing(&mut tree, fill);
        assert_eq!(tree.state(fill).unwrap().size(), Vec2::new(250.0, 200.0));
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        tree.set_size(container, Vec2::new(100.0, 100.0));

        let tall = tree.add_plain();
        tree.set_size(tall, Vec2::new(50.0, 240.0));
        tree.try_set_parent(tall, Some(container)).unwrap();

        tree.set_vertical_scroll(container, 500.0);
        assert_eq!(tree.scroll_offset(container).y, 140.0);

        tree.set_vertical_scroll(container, -20.0);
        assert_eq!(tree.scroll_offset(container).y, 0.0);

        // No horizontal overflow, so no horizontal scrolling
        tree.set_horizontal_scroll(container, 10.0);
        assert_eq!(tree.scroll_offset(container).x, 0.0);
    }
}
