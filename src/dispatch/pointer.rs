//! Pointer input and click dispatch.
//!
//! A pointer-down is resolved to at most one node: the last enabled node whose hit test passes in
//! layered order. Later nodes are drawn on top of earlier ones, so the last match approximates the
//! topmost node under the pointer.

use std::collections::VecDeque;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Point,
    scene::{context::SceneContext, node::NodeId},
};

bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Alt / Option.
        const ALT = 1;
        /// Control.
        const CTRL = 1 << 1;
        /// Meta / Command / Super.
        const META = 1 << 2;
        /// Shift.
        const SHIFT = 1 << 3;
    }
}

/// Structured click payload delivered to the target node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Alt held.
    pub alt: bool,
    /// Control held.
    pub ctrl: bool,
    /// Meta held.
    pub meta: bool,
    /// Shift held.
    pub shift: bool,
    /// Button that changed state (0 = primary).
    pub button: u8,
    /// Bitmask of buttons held.
    pub buttons: u16,
}

impl ClickEvent {
    /// Payload for a pointer-down.
    pub fn from_pointer(modifiers: Modifiers, button: u8, buttons: u16) -> Self {
        Self {
            alt: modifiers.contains(Modifiers::ALT),
            ctrl: modifiers.contains(Modifiers::CTRL),
            meta: modifiers.contains(Modifiers::META),
            shift: modifiers.contains(Modifiers::SHIFT),
            button,
            buttons,
        }
    }
}

/// Pointer event kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Pointer moved; only updates the tracked position.
    Move,
    /// Button pressed; dispatched as a click.
    Down,
}

/// One pointer event in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Move or press.
    pub kind: PointerKind,
    /// Pointer position.
    pub position: Point,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Button that changed state (0 = primary).
    pub button: u8,
    /// Bitmask of buttons held.
    pub buttons: u16,
}

impl PointerEvent {
    /// Primary-button press at `position`.
    pub fn down(position: Point) -> Self {
        Self {
            kind: PointerKind::Down,
            position,
            modifiers: Modifiers::empty(),
            button: 0,
            buttons: 1,
        }
    }

    /// Move to `position` with no buttons held.
    pub fn moved(position: Point) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
            modifiers: Modifiers::empty(),
            button: 0,
            buttons: 0,
        }
    }

    /// Replace the held modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the changed button and the held-buttons mask.
    pub fn with_button(mut self, button: u8, buttons: u16) -> Self {
        self.button = button;
        self.buttons = buttons;
        self
    }

    /// Click payload carried by this event.
    pub fn click_payload(&self) -> ClickEvent {
        ClickEvent::from_pointer(self.modifiers, self.button, self.buttons)
    }
}

/// Source of pointer events for the host loop.
pub trait PointerSource {
    /// Events that arrived since the last poll, oldest first.
    fn poll(&mut self) -> Vec<PointerEvent>;
}

/// Replays a fixed list of events, one per poll.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPointer {
    pending: VecDeque<PointerEvent>,
}

impl ScriptedPointer {
    /// Queue `events` for delivery in order.
    pub fn new(events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            pending: events.into_iter().collect(),
        }
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl PointerSource for ScriptedPointer {
    fn poll(&mut self) -> Vec<PointerEvent> {
        self.pending.pop_front().into_iter().collect()
    }
}

/// Topmost enabled node containing `p`, if any.
pub fn hit_test(scene: &SceneContext, p: Point) -> Option<NodeId> {
    let mut target = None;
    // The visitor is infallible.
    let _ = scene.walk_layered(|node, _| {
        if node.contains_point(p) {
            target = Some(node.id());
        }
        Ok(())
    });
    target
}

/// Deliver `event` to the topmost node containing `p`. Returns the receiving node.
#[tracing::instrument(level = "debug", skip(scene, event))]
pub fn dispatch_click(scene: &mut SceneContext, p: Point, event: &ClickEvent) -> Option<NodeId> {
    let target = hit_test(scene, p)?;
    tracing::debug!(%target, ?event, "click");
    scene.click(target, event);
    Some(target)
}

/// Routes pointer events into a scene and remembers the last pointer position.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerDispatcher {
    position: Option<Point>,
    clicks: u64,
}

impl PointerDispatcher {
    /// Dispatcher with no known pointer position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Number of pointer-downs that reached a node.
    pub fn delivered_clicks(&self) -> u64 {
        self.clicks
    }

    /// Handle one event. Moves only update the tracked position; hover is not dispatched.
    pub fn handle(&mut self, scene: &mut SceneContext, event: &PointerEvent) -> Option<NodeId> {
        self.position = Some(event.position);
        match event.kind {
            PointerKind::Move => None,
            PointerKind::Down => {
                let target = dispatch_click(scene, event.position, &event.click_payload());
                if target.is_some() {
                    self.clicks += 1;
                }
                target
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/pointer.rs"]
mod tests;
