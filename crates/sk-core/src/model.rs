//! Drawing item model.
//!
//! The drawing is an ordered list of items. List order is z-order (later
//! items paint over earlier ones) and also the hit-test tie-break (earlier
//! items win). Every mutating operation bumps the drawing's
//! [`ChangeVersion`]; recording rendered dimensions does not.

use crate::geometry::{Bounds, Point, Size};
use crate::id::ItemId;
use crate::version::{ChangeVersion, Versioned};
use serde::{Deserialize, Serialize};

// ─── Items ───────────────────────────────────────────────────────────────

/// The persisted shape of an item. Serializes as a plain record tagged by
/// `type`, e.g. `{"type":"square","x":40,"y":80,"w":100,"h":100}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Text {
        x: f32,
        y: f32,
        /// Font size in CSS pixels.
        size: f32,
        text: String,
    },
    Square {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

/// A drawable item plus its transient render/selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Footprint from the last render pass. `None` until first drawn.
    rendered: Option<Size>,
    selected: bool,
}

impl Item {
    fn new(id: ItemId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            rendered: None,
            selected: false,
        }
    }

    pub fn position(&self) -> Point {
        match self.kind {
            ItemKind::Text { x, y, .. } | ItemKind::Square { x, y, .. } => Point::new(x, y),
        }
    }

    /// Font size for text items.
    pub fn font_size(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Text { size, .. } => Some(size),
            ItemKind::Square { .. } => None,
        }
    }

    /// Nominal (constructor) size for squares. Text has no nominal size;
    /// its footprint depends on font metrics.
    pub fn nominal_size(&self) -> Option<Size> {
        match self.kind {
            ItemKind::Square { w, h, .. } => Some(Size::new(w, h)),
            ItemKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Text { text, .. } => Some(text),
            ItemKind::Square { .. } => None,
        }
    }

    pub fn rendered(&self) -> Option<Size> {
        self.rendered
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Body rectangle used for hit testing: position plus the last
    /// rendered footprint. `None` if the item was never rendered.
    pub fn body_bounds(&self) -> Option<Bounds> {
        self.rendered
            .map(|size| Bounds::from_origin_size(self.position(), size))
    }
}

/// Partial geometry update. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    /// Square width. Ignored for text.
    pub w: Option<f32>,
    /// Square height. Ignored for text.
    pub h: Option<f32>,
    /// Font size. Ignored for squares.
    pub size: Option<f32>,
}

impl GeometryPatch {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn dimensions(w: f32, h: f32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn font_size(size: f32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    fn apply(&self, kind: &mut ItemKind) {
        match kind {
            ItemKind::Text { x, y, size, .. } => {
                if let Some(v) = self.x {
                    *x = v;
                }
                if let Some(v) = self.y {
                    *y = v;
                }
                if let Some(v) = self.size {
                    *size = v;
                }
            }
            ItemKind::Square { x, y, w, h } => {
                if let Some(v) = self.x {
                    *x = v;
                }
                if let Some(v) = self.y {
                    *y = v;
                }
                if let Some(v) = self.w {
                    *w = v;
                }
                if let Some(v) = self.h {
                    *h = v;
                }
            }
        }
    }
}

// ─── Drawing ─────────────────────────────────────────────────────────────

/// The ordered item list owned by a drawing session.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    items: Vec<Item>,
    version: ChangeVersion,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text item.
    pub fn add_text(&mut self, x: f32, y: f32, size: f32, text: impl Into<String>) -> ItemId {
        let text = text.into();
        self.push(
            ItemId::with_prefix("text"),
            ItemKind::Text { x, y, size, text },
        )
    }

    /// Append a square item. `w` and `h` may differ, but a resize sets
    /// both sides from the starting width, squaring the item up.
    pub fn add_square(&mut self, x: f32, y: f32, w: f32, h: f32) -> ItemId {
        self.push(ItemId::with_prefix("square"), ItemKind::Square { x, y, w, h })
    }

    fn push(&mut self, id: ItemId, kind: ItemKind) -> ItemId {
        log::debug!("add {id} {kind:?}");
        self.items.push(Item::new(id, kind));
        self.version.bump();
        id
    }

    /// Select `id` and deselect everything else. `None` clears the
    /// selection. Returns `false` if `id` is not in the drawing (the
    /// selection is cleared in that case too).
    pub fn set_selected(&mut self, id: Option<ItemId>) -> bool {
        let mut found = id.is_none();
        for item in &mut self.items {
            item.selected = Some(item.id) == id;
            found |= item.selected;
        }
        log::debug!("select {id:?}");
        self.version.bump();
        found
    }

    /// Apply a geometry patch. Returns `false` for an unknown id.
    pub fn update_geometry(&mut self, id: ItemId, patch: GeometryPatch) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        patch.apply(&mut item.kind);
        self.version.bump();
        true
    }

    /// Replace the content of a text item. Returns `false` if `id` is
    /// unknown or not a text item.
    pub fn set_text(&mut self, id: ItemId, content: impl Into<String>) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let ItemKind::Text { text, .. } = &mut item.kind else {
            return false;
        };
        *text = content.into();
        self.version.bump();
        true
    }

    /// Record what the renderer actually drew. Does not bump the version:
    /// the renderer calls this on every pass.
    pub fn set_rendered(&mut self, id: ItemId, size: Size) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.rendered = Some(size);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// The selected item, if any.
    pub fn selected(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.selected)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ─── Serialization ───────────────────────────────────────────────────

    /// The item list as plain records, transient state stripped.
    pub fn records(&self) -> Vec<&ItemKind> {
        self.items.iter().map(|item| &item.kind).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records())
    }
}

impl Versioned for Drawing {
    fn version(&self) -> ChangeVersion {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_bumps_version_and_keeps_order() {
        let mut drawing = Drawing::new();
        let v0 = drawing.version();
        let a = drawing.add_text(0.0, 0.0, 12.0, "a");
        let b = drawing.add_square(1.0, 1.0, 5.0, 5.0);
        assert!(drawing.changed_since(v0));
        assert_eq!(drawing.index_of(a), Some(0));
        assert_eq!(drawing.index_of(b), Some(1));
    }

    #[test]
    fn set_rendered_does_not_bump_version() {
        let mut drawing = Drawing::new();
        let id = drawing.add_square(0.0, 0.0, 10.0, 10.0);
        let v = drawing.version();
        assert!(drawing.set_rendered(id, Size::new(10.0, 10.0)));
        assert!(!drawing.changed_since(v));
        assert_eq!(drawing.get(id).and_then(Item::rendered), Some(Size::new(10.0, 10.0)));
    }

    #[test]
    fn unrendered_item_has_no_body_bounds() {
        let mut drawing = Drawing::new();
        let id = drawing.add_text(5.0, 5.0, 20.0, "hello");
        assert_eq!(drawing.get(id).and_then(Item::body_bounds), None);
    }

    #[test]
    fn patch_ignores_fields_the_kind_lacks() {
        let mut drawing = Drawing::new();
        let text = drawing.add_text(0.0, 0.0, 10.0, "t");
        let square = drawing.add_square(0.0, 0.0, 10.0, 10.0);

        drawing.update_geometry(
            text,
            GeometryPatch {
                w: Some(99.0),
                size: Some(30.0),
                ..GeometryPatch::default()
            },
        );
        drawing.update_geometry(square, GeometryPatch::font_size(99.0));

        assert_eq!(
            drawing.get(text).map(|i| i.kind.clone()),
            Some(ItemKind::Text {
                x: 0.0,
                y: 0.0,
                size: 30.0,
                text: "t".into()
            })
        );
        assert_eq!(
            drawing.get(square).and_then(Item::nominal_size),
            Some(Size::new(10.0, 10.0))
        );
    }

    #[test]
    fn set_text_rejects_squares() {
        let mut drawing = Drawing::new();
        let square = drawing.add_square(0.0, 0.0, 10.0, 10.0);
        let v = drawing.version();
        assert!(!drawing.set_text(square, "nope"));
        assert!(!drawing.changed_since(v));
    }

    #[test]
    fn records_strip_transient_state() {
        let mut drawing = Drawing::new();
        let id = drawing.add_square(40.0, 80.0, 100.0, 100.0);
        drawing.add_text(20.0, 40.0, 24.0, "hi");
        drawing.set_rendered(id, Size::new(100.0, 100.0));
        drawing.set_selected(Some(id));

        let json = drawing.to_json().unwrap();
        assert_eq!(
            json,
            r#"[{"type":"square","x":40.0,"y":80.0,"w":100.0,"h":100.0},{"type":"text","x":20.0,"y":40.0,"size":24.0,"text":"hi"}]"#
        );
    }
}
