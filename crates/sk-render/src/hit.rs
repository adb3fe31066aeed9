//! Hit testing: point → item lookup.
//!
//! Two phases, each walking the list front-to-back in *list order*: the
//! earliest-added item wins, not the one painted on top. Bodies are tested
//! first across all items; resize handles only if no body matched.
//!
//! Bounds come from the last render pass, so hit testing lags geometry
//! changes by one frame. Items that were never rendered cannot be hit.

use sk_core::{Bounds, Drawing, Item, ItemId};

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ItemId,
    pub part: HitPart,
}

/// Body first, then resize handle.
pub fn hit_test(drawing: &Drawing, px: f32, py: f32, handle_size: f32) -> Option<Hit> {
    hit_body(drawing, px, py)
        .map(|id| Hit {
            id,
            part: HitPart::Body,
        })
        .or_else(|| {
            hit_handle(drawing, px, py, handle_size).map(|id| Hit {
                id,
                part: HitPart::Handle,
            })
        })
}

/// First item whose rendered body contains the point.
pub fn hit_body(drawing: &Drawing, px: f32, py: f32) -> Option<ItemId> {
    drawing
        .items()
        .iter()
        .find(|item| item.body_bounds().is_some_and(|b| b.contains(px, py)))
        .map(|item| item.id)
}

/// First item whose resize handle contains the point.
pub fn hit_handle(drawing: &Drawing, px: f32, py: f32, handle_size: f32) -> Option<ItemId> {
    drawing
        .items()
        .iter()
        .find(|item| handle_bounds(item, handle_size).is_some_and(|b| b.contains(px, py)))
        .map(|item| item.id)
}

/// Resize handle: a square centered on the body's bottom-right corner.
pub fn handle_bounds(item: &Item, handle_size: f32) -> Option<Bounds> {
    item.body_bounds()
        .map(|body| Bounds::centered_square(body.bottom_right(), handle_size))
}
