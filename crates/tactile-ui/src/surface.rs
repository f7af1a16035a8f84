//! Surface registry.
//!
//! A [`SurfaceTree`] is an arena of rectangular input surfaces, each
//! positioned relative to its parent. It stands in for the window hierarchy
//! of the content hosted by a pannable area: the area hit-tests it to find
//! the surface under a press and forwards synthetic events to it.
//!
//! Handles are generational. A [`SurfaceId`] whose surface was destroyed
//! never resolves again, even if the slot is reused, so callers can keep a
//! handle across a gesture and check [`SurfaceTree::is_alive`] before use.

use std::ops::BitOr;

use tactile_engine::coords::{Rect, Vec2};

// ── SurfaceId ─────────────────────────────────────────────────────────────

/// Generational handle into a [`SurfaceTree`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceId {
    index: u32,
    generation: u32,
}

// ── EventMask ─────────────────────────────────────────────────────────────

/// Set of input event kinds a surface listens to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct EventMask(u32);

impl EventMask {
    pub const NONE: EventMask = EventMask(0);
    pub const BUTTON_PRESS: EventMask = EventMask(1 << 0);
    pub const BUTTON_RELEASE: EventMask = EventMask(1 << 1);
    pub const POINTER_MOTION: EventMask = EventMask(1 << 2);
    pub const CROSSING: EventMask = EventMask(1 << 3);
    pub const SCROLL: EventMask = EventMask(1 << 4);
    pub const ALL: EventMask = EventMask(0x1f);

    #[inline]
    pub fn intersects(self, other: EventMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn contains(self, other: EventMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EventMask {
    type Output = EventMask;

    fn bitor(self, rhs: EventMask) -> EventMask {
        EventMask(self.0 | rhs.0)
    }
}

// ── Surface ───────────────────────────────────────────────────────────────

/// One node of the tree.
#[derive(Debug, Clone)]
pub struct Surface {
    pub label: String,
    /// Position and size relative to the parent surface.
    pub rect: Rect,
    pub visible: bool,
    pub events: EventMask,
    parent: Option<SurfaceId>,
    children: Vec<SurfaceId>,
}

impl Surface {
    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    /// Children in stacking order, bottom first.
    pub fn children(&self) -> &[SurfaceId] {
        &self.children
    }
}

struct Slot {
    generation: u32,
    surface: Option<Surface>,
}

// ── SurfaceTree ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SurfaceTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl SurfaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parentless surface.
    pub fn insert_root(&mut self, label: impl Into<String>, rect: Rect, events: EventMask) -> SurfaceId {
        self.alloc(Surface {
            label: label.into(),
            rect,
            visible: true,
            events,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Inserts a surface on top of `parent`'s existing children.
    ///
    /// # Panics
    /// If `parent` is not alive.
    pub fn add_child(
        &mut self,
        parent: SurfaceId,
        label: impl Into<String>,
        rect: Rect,
        events: EventMask,
    ) -> SurfaceId {
        assert!(self.is_alive(parent), "add_child: parent surface is not alive");
        let id = self.alloc(Surface {
            label: label.into(),
            rect,
            visible: true,
            events,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Destroys `id` and its whole subtree. Returns `false` if it was already gone.
    pub fn destroy(&mut self, id: SurfaceId) -> bool {
        let Some(surface) = self.take(id) else {
            return false;
        };
        if let Some(parent) = surface.parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut pending = surface.children;
        while let Some(child) = pending.pop() {
            if let Some(s) = self.take(child) {
                pending.extend(s.children);
            }
        }
        true
    }

    pub fn is_alive(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.surface.as_ref())
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.surface.as_mut())
    }

    pub fn size(&self, id: SurfaceId) -> Option<Vec2> {
        self.get(id).map(|s| s.rect.size)
    }

    pub fn set_rect(&mut self, id: SurfaceId, rect: Rect) {
        if let Some(s) = self.get_mut(id) {
            s.rect = rect;
        }
    }

    pub fn set_visible(&mut self, id: SurfaceId, visible: bool) {
        if let Some(s) = self.get_mut(id) {
            s.visible = visible;
        }
    }

    pub fn label(&self, id: SurfaceId) -> &str {
        self.get(id).map(|s| s.label.as_str()).unwrap_or("<destroyed>")
    }

    /// Returns `true` if `ancestor` is `id` or one of its parents.
    pub fn is_ancestor(&self, ancestor: SurfaceId, id: SurfaceId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.get(c).and_then(|s| s.parent);
        }
        false
    }

    /// Translates `point`, given in `from`'s coordinates, into `ancestor`'s.
    ///
    /// Returns `None` when `ancestor` is not on `from`'s parent chain.
    pub fn translate_to_ancestor(&self, from: SurfaceId, ancestor: SurfaceId, point: Vec2) -> Option<Vec2> {
        let mut cur = from;
        let mut p = point;
        while cur != ancestor {
            let s = self.get(cur)?;
            p += s.rect.origin;
            cur = s.parent?;
        }
        Some(p)
    }

    /// Finds the deepest surface under `point` (in `root`'s coordinates).
    ///
    /// Later siblings stack above earlier ones and win. A leaf surface only
    /// qualifies when its event mask intersects `mask`; a surface with
    /// children that yields no match is selected itself. Returns the surface
    /// together with `point` translated into its coordinates.
    pub fn topmost(&self, root: SurfaceId, point: Vec2, mask: EventMask) -> Option<(SurfaceId, Vec2)> {
        let surface = self.get(root)?;
        let size = surface.rect.size;
        if point.x < 0.0 || point.x >= size.x || point.y < 0.0 || point.y >= size.y {
            return None;
        }

        if surface.children.is_empty() {
            return Some((root, point));
        }

        let mut selected = None;
        for &child in &surface.children {
            let Some(c) = self.get(child) else { continue };
            if !c.visible || !c.rect.contains(point) {
                continue;
            }
            let local = point - c.rect.origin;
            if !c.children.is_empty() {
                selected = Some(self.topmost(child, local, mask).unwrap_or((child, local)));
            } else if c.events.intersects(mask) {
                selected = Some((child, local));
            }
        }
        selected
    }

    fn alloc(&mut self, surface: Surface) -> SurfaceId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.surface = Some(surface);
            return SurfaceId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, surface: Some(surface) });
        SurfaceId { index, generation: 0 }
    }

    fn take(&mut self, id: SurfaceId) -> Option<Surface> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let surface = slot.surface.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, w, h)
    }

    /// content(400x1000) -> [row0(0,0,400x100) -> button(10,10,50x50), row1(0,100,400x100)]
    fn sample() -> (SurfaceTree, SurfaceId, SurfaceId, SurfaceId, SurfaceId) {
        let mut t = SurfaceTree::new();
        let content = t.insert_root("content", rect(0.0, 0.0, 400.0, 1000.0), EventMask::ALL);
        let row0 = t.add_child(content, "row0", rect(0.0, 0.0, 400.0, 100.0), EventMask::NONE);
        let button = t.add_child(
            row0,
            "button",
            rect(10.0, 10.0, 50.0, 50.0),
            EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE,
        );
        let row1 = t.add_child(content, "row1", rect(0.0, 100.0, 400.0, 100.0), EventMask::BUTTON_PRESS);
        (t, content, row0, button, row1)
    }

    // ── topmost ───────────────────────────────────────────────────────────

    #[test]
    fn topmost_returns_deepest_match_with_local_coords() {
        let (t, content, _, button, _) = sample();
        let hit = t.topmost(content, Vec2::new(20.0, 30.0), EventMask::BUTTON_PRESS);
        assert_eq!(hit, Some((button, Vec2::new(10.0, 20.0))));
    }

    #[test]
    fn topmost_falls_back_to_parent_with_children() {
        let (t, content, row0, _, _) = sample();
        let hit = t.topmost(content, Vec2::new(300.0, 50.0), EventMask::BUTTON_PRESS);
        assert_eq!(hit, Some((row0, Vec2::new(300.0, 50.0))));
    }

    #[test]
    fn topmost_leaf_requires_mask() {
        let (t, content, _, _, row1) = sample();
        let hit = t.topmost(content, Vec2::new(5.0, 150.0), EventMask::BUTTON_RELEASE);
        assert_eq!(hit, None);
        let hit = t.topmost(content, Vec2::new(5.0, 150.0), EventMask::BUTTON_PRESS);
        assert_eq!(hit, Some((row1, Vec2::new(5.0, 50.0))));
    }

    #[test]
    fn topmost_outside_root_is_none() {
        let (t, content, ..) = sample();
        assert_eq!(t.topmost(content, Vec2::new(-1.0, 10.0), EventMask::ALL), None);
        assert_eq!(t.topmost(content, Vec2::new(10.0, 1000.0), EventMask::ALL), None);
    }

    #[test]
    fn topmost_skips_hidden_children() {
        let (mut t, content, _, _, row1) = sample();
        t.set_visible(row1, false);
        assert_eq!(t.topmost(content, Vec2::new(5.0, 150.0), EventMask::ALL), None);
    }

    #[test]
    fn later_sibling_wins_on_overlap() {
        let mut t = SurfaceTree::new();
        let root = t.insert_root("root", rect(0.0, 0.0, 100.0, 100.0), EventMask::ALL);
        let _below = t.add_child(root, "below", rect(0.0, 0.0, 100.0, 100.0), EventMask::ALL);
        let above = t.add_child(root, "above", rect(0.0, 0.0, 50.0, 50.0), EventMask::ALL);
        assert_eq!(t.topmost(root, Vec2::new(10.0, 10.0), EventMask::ALL).map(|h| h.0), Some(above));
    }

    // ── lifetime ──────────────────────────────────────────────────────────

    #[test]
    fn destroy_removes_subtree_and_invalidates_handles() {
        let (mut t, content, row0, button, _) = sample();
        assert!(t.destroy(row0));
        assert!(!t.is_alive(row0));
        assert!(!t.is_alive(button));
        assert_eq!(t.get(content).map(|s| s.children().len()), Some(1));
        assert!(!t.destroy(row0));
    }

    #[test]
    fn reused_slot_does_not_resolve_stale_handle() {
        let (mut t, content, _, button, _) = sample();
        t.destroy(button);
        let fresh = t.add_child(content, "fresh", rect(0.0, 0.0, 1.0, 1.0), EventMask::ALL);
        assert_ne!(fresh, button);
        assert!(!t.is_alive(button));
        assert_eq!(t.label(button), "<destroyed>");
        assert_eq!(t.label(fresh), "fresh");
    }

    // ── translate ─────────────────────────────────────────────────────────

    #[test]
    fn translate_accumulates_origins() {
        let (t, content, _, button, row1) = sample();
        assert_eq!(t.translate_to_ancestor(button, content, Vec2::zero()), Some(Vec2::new(10.0, 10.0)));
        assert_eq!(t.translate_to_ancestor(row1, button, Vec2::zero()), None);
        assert!(t.is_ancestor(content, button));
        assert!(!t.is_ancestor(row1, button));
    }
}
