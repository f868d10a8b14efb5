//! Tween scheduler for animated property changes
//!
//! Widgets never mutate animated properties directly; they hand the target
//! value to the [`Tweener`], which steps every active tween once per frame
//! and writes the interpolated value back through the tree's typed setters.
//! A tween whose target control was disposed is force-dropped on the next
//! step. Scheduling a tween for a (control, property) pair that already has
//! one replaces it, so repeated wheel input retargets smoothly instead of
//! stacking.

use slotmap::SlotMap;

use crate::foundation::math::{lerp, Vec2};
use crate::ui::tree::{ControlKey, UiTree};

slotmap::new_key_type! {
    /// Cancellable handle to a scheduled tween
    pub struct TweenKey;
}

/// Interpolation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant-rate interpolation
    #[default]
    Linear,
    /// Fast start, decelerating finish; the standard scrolling feel
    QuadOut,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
        }
    }
}

/// Which scalar property a tween drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenProperty {
    /// Control opacity
    Opacity,
    /// Location X within the parent
    LocationX,
    /// Location Y within the parent
    LocationY,
    /// Control width
    Width,
    /// Control height
    Height,
    /// Container horizontal scroll offset
    HorizontalScroll,
    /// Container vertical scroll offset
    VerticalScroll,
}

#[derive(Debug)]
struct Tween {
    target: ControlKey,
    property: TweenProperty,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

/// Scheduler stepping all active tweens once per frame
#[derive(Default)]
pub struct Tweener {
    tweens: SlotMap<TweenKey, Tween>,
}

impl Tweener {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tween from the property's current value to `to`
    ///
    /// Replaces any tween already driving the same property of the same
    /// control. Returns `None` when the target no longer exists.
    pub fn animate(
        &mut self,
        tree: &UiTree,
        target: ControlKey,
        property: TweenProperty,
        to: f32,
        duration: f32,
        easing: Easing,
    ) -> Option<TweenKey> {
        let from = current_value(tree, target, property)?;
        self.tweens
            .retain(|_, t| !(t.target == target && t.property == property));
        Some(self.tweens.insert(Tween {
            target,
            property,
            from,
            to,
            duration: duration.max(1e-4),
            elapsed: 0.0,
            easing,
        }))
    }

    /// Cancel a single tween; the property stays at its current value
    pub fn cancel(&mut self, key: TweenKey) {
        self.tweens.remove(key);
    }

    /// Cancel every tween driving a control
    pub fn cancel_for(&mut self, target: ControlKey) {
        self.tweens.retain(|_, t| t.target != target);
    }

    /// Whether a tween is still running
    pub fn is_active(&self, key: TweenKey) -> bool {
        self.tweens.contains_key(key)
    }

    /// Number of active tweens
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether no tweens are active
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Step all tweens by `dt` seconds, writing values through the tree
    pub fn update(&mut self, tree: &mut UiTree, dt: f32) {
        let mut finished = Vec::new();
        let keys: Vec<TweenKey> = self.tweens.keys().collect();
        for key in keys {
            let Some(tween) = self.tweens.get_mut(key) else {
                continue;
            };
            if !tree.contains(tween.target) {
                log::debug!("dropping tween for disposed control");
                finished.push(key);
                continue;
            }
            tween.elapsed += dt;
            let t = (tween.elapsed / tween.duration).min(1.0);
            let value = lerp(tween.from, tween.to, tween.easing.apply(t));
            let (target, property) = (tween.target, tween.property);
            if t >= 1.0 {
                finished.push(key);
            }
            apply_value(tree, target, property, value);
        }
        for key in finished {
            self.tweens.remove(key);
        }
    }
}

fn current_value(tree: &UiTree, target: ControlKey, property: TweenProperty) -> Option<f32> {
    let state = tree.state(target)?;
    Some(match property {
        TweenProperty::Opacity => state.opacity(),
        TweenProperty::LocationX => state.location().x,
        TweenProperty::LocationY => state.location().y,
        TweenProperty::Width => state.size().x,
        TweenProperty::Height => state.size().y,
        TweenProperty::HorizontalScroll => tree.scroll_offset(target).x,
        TweenProperty::VerticalScroll => tree.scroll_offset(target).y,
    })
}

fn apply_value(tree: &mut UiTree, target: ControlKey, property: TweenProperty, value: f32) {
    let Some(location) = tree.state(target).map(|s| s.location()) else {
        return;
    };
    match property {
        TweenProperty::Opacity => tree.set_opacity(target, value),
        TweenProperty::LocationX => tree.set_location(target, Vec2::new(value, location.y)),
        TweenProperty::LocationY => tree.set_location(target, Vec2::new(location.x, value)),
        TweenProperty::Width => tree.set_width(target, value),
        TweenProperty::Height => tree.set_height(target, value),
        TweenProperty::HorizontalScroll => tree.set_horizontal_scroll(target, value),
        TweenProperty::VerticalScroll => tree.set_vertical_scroll(target, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_tween_reaches_target() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        let mut tweener = Tweener::new();

        tweener
            .animate(&tree, key, TweenProperty::Opacity, 0.0, 1.0, Easing::Linear)
            .unwrap();

        tweener.update(&mut tree, 0.5);
        assert_relative_eq!(tree.state(key).unwrap().opacity(), 0.5);

        tweener.update(&mut tree, 0.5);
        assert_relative_eq!(tree.state(key).unwrap().opacity(), 0.0);
        assert!(tweener.is_empty());
    }

    #[test]
    fn test_retarget_replaces_existing_tween() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        let mut tweener = Tweener::new();

        let first = tweener
            .animate(&tree, key, TweenProperty::Width, 100.0, 1.0, Easing::Linear)
            .unwrap();
        let second = tweener
            .animate(&tree, key, TweenProperty::Width, 200.0, 1.0, Easing::Linear)
            .unwrap();

        assert!(!tweener.is_active(first));
        assert!(tweener.is_active(second));
        assert_eq!(tweener.len(), 1);

        tweener.update(&mut tree, 1.0);
        assert_relative_eq!(tree.state(key).unwrap().size().x, 200.0);
    }

    #[test]
    fn test_disposed_target_drops_tween() {
        let mut tree = UiTree::new();
        let key = tree.add_plain();
        let mut tweener = Tweener::new();
        tweener
            .animate(&tree, key, TweenProperty::Opacity, 0.0, 1.0, Easing::Linear)
            .unwrap();

        tree.dispose(key);
        tweener.update(&mut tree, 0.1);
        assert!(tweener.is_empty());
    }

    #[test]
    fn test_scroll_tween_clamps_through_setter() {
        let mut tree = UiTree::new();
        let container = tree.add_plain_container();
        tree.set_size(container, Vec2::new(100.0, 100.0));
        let tall = tree.add_plain();
        tree.set_size(tall, Vec2::new(50.0, 150.0));
        tree.try_set_parent(tall, Some(container)).unwrap();

        let mut tweener = Tweener::new();
        tweener
            .animate(
                &tree,
                container,
                TweenProperty::VerticalScroll,
                400.0,
                1.0,
                Easing::Linear,
            )
            .unwrap();
        tweener.update(&mut tree, 1.0);
        // The setter clamps to the scrollable range
        assert_relative_eq!(tree.scroll_offset(container).y, 50.0);
    }

    #[test]
    fn test_quad_out_decelerates() {
        assert_relative_eq!(Easing::QuadOut.apply(0.0), 0.0);
        assert_relative_eq!(Easing::QuadOut.apply(1.0), 1.0);
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }
}
