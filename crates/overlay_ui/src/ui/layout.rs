//! Invalidation and deferred layout recomputation
//!
//! Layout state is recomputed exactly when a dependency changes and no more
//! often. A control can suspend its subtree's layout while a burst of
//! property writes lands (initialization, bulk reflow); the suspend count is
//! reference-counted so scopes nest safely, and the recompute itself is
//! guarded against re-entrancy so a widget mutating its own geometry from
//! inside `recalculate_layout` cannot recurse into a second recompute.

use crate::ui::control::{LayoutCtx, LayoutState};
use crate::ui::tree::{ControlKey, UiTree};

impl UiTree {
    /// Mark a control's layout stale and immediately attempt a recompute
    ///
    /// If the control's layout is suspended (by itself or any ancestor) the
    /// recompute is deferred until the suspension lifts or the next update
    /// tick, whichever comes first.
    pub fn invalidate(&mut self, key: ControlKey) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        node.state.layout_state = LayoutState::Invalidated;
        self.try_recalculate(key);
    }

    /// Begin a suspend scope; layout recomputation defers until resumed
    ///
    /// Scopes are counted and nest freely. Prefer
    /// [`UiTree::with_layout_suspended`], which cannot leak a scope.
    pub fn suspend_layout(&mut self, key: ControlKey) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.state.suspend_count += 1;
        }
    }

    /// End a suspend scope
    ///
    /// When the outermost scope ends, a deferred invalidation fires naturally;
    /// passing `force` recalculates immediately even if nothing invalidated
    /// the control while it was suspended.
    pub fn resume_layout(&mut self, key: ControlKey, force: bool) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.state.suspend_count == 0 {
            log::warn!("resume_layout without a matching suspend_layout");
            return;
        }
        node.state.suspend_count -= 1;
        if node.state.suspend_count > 0 {
            return;
        }
        if force {
            node.state.layout_state = LayoutState::Invalidated;
            self.try_recalculate(key);
        } else if node.state.layout_state == LayoutState::Invalidated {
            self.try_recalculate(key);
        }
    }

    /// Run a closure with the control's layout suspended
    ///
    /// The scope is released on every exit path, so nesting is always
    /// well-formed. Property writes inside the closure defer their layout
    /// work; one recompute settles everything when the outermost scope ends.
    pub fn with_layout_suspended<R>(
        &mut self,
        key: ControlKey,
        f: impl FnOnce(&mut UiTree) -> R,
    ) -> R {
        self.suspend_layout(key);
        let result = f(self);
        self.resume_layout(key, false);
        result
    }

    /// Whether layout is suspended for this control, directly or through any
    /// ancestor's suspend scope
    pub fn is_layout_suspended(&self, key: ControlKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(node) if node.state.suspend_count > 0 => return true,
                Some(node) => current = node.state.parent,
                None => return false,
            }
        }
        false
    }

    /// Attempt the actual layout recompute
    ///
    /// Runs only for the first entrant (increment-then-check guards against
    /// re-entrant invalidation from inside the recompute), only while not
    /// suspended, and only when the state is actually stale.
    pub(crate) fn try_recalculate(&mut self, key: ControlKey) {
        {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            node.state.recalc_depth += 1;
            if node.state.recalc_depth > 1 {
                node.state.recalc_depth -= 1;
                return;
            }
        }

        if self.is_layout_suspended(key)
            || self
                .state(key)
                .map_or(true, |s| s.layout_state() != LayoutState::Invalidated)
        {
            if let Some(node) = self.nodes.get_mut(key) {
                node.state.recalc_depth -= 1;
            }
            return;
        }

        log::trace!("recalculating layout for {key:?}");
        if let Some(mut widget) = self.nodes.get_mut(key).and_then(|n| n.widget.take()) {
            let mut ctx = LayoutCtx { tree: self, key };
            widget.recalculate_layout(&mut ctx);
            if let Some(node) = self.nodes.get_mut(key) {
                node.widget = Some(widget);
            }
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.state.layout_state = LayoutState::Ready;
            node.state.recalc_depth -= 1;
        }
    }
}
