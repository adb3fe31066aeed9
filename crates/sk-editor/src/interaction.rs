//! Interaction state machine: gestures → item mutations.
//!
//! ## State transitions
//!
//! ```text
//! None -> None       tap on text (edit prompt), press (select / clear)
//! None -> Dragging   pan-start on an item body
//! None -> Resizing   pan-start on a resize handle only
//! Any  -> None       pan-end
//! ```
//!
//! Pan deltas are applied to the snapshot captured at pan-start, so the
//! final geometry depends only on the last sample, not on how many
//! samples arrived in between.

use crate::input::Gesture;
use sk_core::{Drawing, GeometryPatch, ItemId, Point, Size};
use sk_render::hit::{self, Hit, HitPart};

/// Synchronous text entry, e.g. `window.prompt`.
pub trait TextPrompt {
    /// Ask for replacement text, pre-filled with `current`. `None` means
    /// the user cancelled.
    fn prompt(&mut self, current: &str) -> Option<String>;
}

/// Current interaction mode. Snapshots hold the pre-gesture geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    None,
    Dragging {
        item: ItemId,
        start_x: f32,
        start_y: f32,
    },
    Resizing {
        item: ItemId,
        start_w: f32,
        start_h: f32,
        /// Font size for text items.
        start_size: Option<f32>,
    },
}

#[derive(Debug, Clone)]
pub struct Interaction {
    mode: Mode,
    handle_size: f32,
}

impl Interaction {
    pub fn new(handle_size: f32) -> Self {
        Self {
            mode: Mode::None,
            handle_size,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Dispatch one gesture against the drawing.
    pub fn handle(&mut self, drawing: &mut Drawing, gesture: Gesture, prompt: &mut dyn TextPrompt) {
        match gesture {
            Gesture::Tap { x, y } => self.on_tap(drawing, Point::new(x, y), prompt),
            Gesture::Press { x, y } => self.on_press(drawing, Point::new(x, y)),
            Gesture::PanStart { x, y } => self.on_pan_start(drawing, Point::new(x, y)),
            Gesture::Pan { dx, dy, .. } => self.on_pan(drawing, dx, dy),
            Gesture::PanEnd { .. } => self.on_pan_end(),
        }
    }

    fn hit(&self, drawing: &Drawing, at: Point) -> Option<Hit> {
        hit::hit_test(drawing, at.x, at.y, self.handle_size)
    }

    fn on_tap(&mut self, drawing: &mut Drawing, at: Point, prompt: &mut dyn TextPrompt) {
        if self.mode != Mode::None {
            return;
        }
        let Some(id) = hit::hit_body(drawing, at.x, at.y) else {
            return;
        };
        let Some(current) = drawing.get(id).and_then(|item| item.text()) else {
            return;
        };
        match prompt.prompt(current) {
            Some(text) => {
                log::debug!("edit {id}: {text:?}");
                drawing.set_text(id, text);
            }
            None => log::debug!("edit {id} cancelled"),
        }
    }

    /// Press only selects. Drag and resize start on pan-start.
    fn on_press(&mut self, drawing: &mut Drawing, at: Point) {
        if self.mode != Mode::None {
            return;
        }
        match self.hit(drawing, at) {
            None => {
                drawing.set_selected(None);
            }
            Some(Hit {
                id,
                part: HitPart::Body,
            }) => {
                drawing.set_selected(Some(id));
            }
            Some(Hit {
                id,
                part: HitPart::Handle,
            }) => log::debug!("press on resize handle of {id}"),
        }
    }

    fn on_pan_start(&mut self, drawing: &mut Drawing, at: Point) {
        if self.mode != Mode::None {
            log::warn!("pan-start while {:?}; previous gesture never ended", self.mode);
            self.mode = Mode::None;
        }
        let Some(Hit { id, part }) = self.hit(drawing, at) else {
            drawing.set_selected(None);
            return;
        };
        let Some(item) = drawing.get(id) else {
            return;
        };
        self.mode = match part {
            HitPart::Body => {
                let pos = item.position();
                Mode::Dragging {
                    item: id,
                    start_x: pos.x,
                    start_y: pos.y,
                }
            }
            HitPart::Handle => {
                let size = item
                    .nominal_size()
                    .or(item.rendered())
                    .unwrap_or(Size::default());
                Mode::Resizing {
                    item: id,
                    start_w: size.w,
                    start_h: size.h,
                    start_size: item.font_size(),
                }
            }
        };
        log::debug!("mode -> {:?}", self.mode);
        drawing.set_selected(Some(id));
    }

    fn on_pan(&mut self, drawing: &mut Drawing, dx: f32, dy: f32) {
        match self.mode {
            Mode::None => {}
            Mode::Dragging {
                item,
                start_x,
                start_y,
            } => {
                log::trace!("drag {item} by ({dx}, {dy})");
                drawing.update_geometry(item, GeometryPatch::position(start_x + dx, start_y + dy));
            }
            Mode::Resizing {
                item,
                start_w,
                start_size,
                ..
            } => {
                // Diagonal-dominant: the larger axis drives both dimensions.
                let grow = dx.max(dy);
                log::trace!("resize {item} by {grow}");
                let patch = match start_size {
                    Some(size) => GeometryPatch::font_size((size + grow).max(0.0)),
                    None => {
                        let side = (start_w + grow).max(0.0);
                        GeometryPatch::dimensions(side, side)
                    }
                };
                drawing.update_geometry(item, patch);
            }
        }
    }

    fn on_pan_end(&mut self) {
        if self.mode != Mode::None {
            log::debug!("mode -> None");
        }
        self.mode = Mode::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_core::ItemKind;

    struct NoPrompt;

    impl TextPrompt for NoPrompt {
        fn prompt(&mut self, _current: &str) -> Option<String> {
            panic!("prompt should not be shown");
        }
    }

    fn rendered_square(drawing: &mut Drawing, x: f32, y: f32, side: f32) -> ItemId {
        let id = drawing.add_square(x, y, side, side);
        drawing.set_rendered(id, Size::new(side, side));
        id
    }

    #[test]
    fn press_on_handle_keeps_mode_and_selection() {
        let mut drawing = Drawing::new();
        let id = rendered_square(&mut drawing, 0.0, 0.0, 50.0);
        drawing.set_selected(Some(id));
        let mut interaction = Interaction::new(12.0);

        interaction.handle(&mut drawing, Gesture::Press { x: 54.0, y: 54.0 }, &mut NoPrompt);

        assert_eq!(interaction.mode(), Mode::None);
        assert_eq!(drawing.selected().map(|i| i.id), Some(id));
    }

    #[test]
    fn pan_start_on_handle_enters_resizing() {
        let mut drawing = Drawing::new();
        let id = rendered_square(&mut drawing, 0.0, 0.0, 50.0);
        let mut interaction = Interaction::new(12.0);

        interaction.handle(&mut drawing, Gesture::PanStart { x: 55.0, y: 55.0 }, &mut NoPrompt);

        assert_eq!(
            interaction.mode(),
            Mode::Resizing {
                item: id,
                start_w: 50.0,
                start_h: 50.0,
                start_size: None
            }
        );
        assert!(drawing.get(id).unwrap().is_selected());
    }

    #[test]
    fn resize_clamps_at_zero() {
        let mut drawing = Drawing::new();
        let id = rendered_square(&mut drawing, 0.0, 0.0, 20.0);
        let mut interaction = Interaction::new(12.0);

        interaction.handle(&mut drawing, Gesture::PanStart { x: 22.0, y: 22.0 }, &mut NoPrompt);
        interaction.handle(
            &mut drawing,
            Gesture::Pan {
                x: 0.0,
                y: 0.0,
                dx: -80.0,
                dy: -50.0,
            },
            &mut NoPrompt,
        );

        assert_eq!(
            drawing.get(id).unwrap().kind,
            ItemKind::Square {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0
            }
        );
    }

    #[test]
    fn resize_squares_up_a_rectangle() {
        let mut drawing = Drawing::new();
        let id = drawing.add_square(0.0, 0.0, 100.0, 50.0);
        drawing.set_rendered(id, Size::new(100.0, 50.0));
        let mut interaction = Interaction::new(12.0);

        interaction.handle(&mut drawing, Gesture::PanStart { x: 104.0, y: 54.0 }, &mut NoPrompt);
        interaction.handle(
            &mut drawing,
            Gesture::Pan {
                x: 110.0,
                y: 55.0,
                dx: 10.0,
                dy: 5.0,
            },
            &mut NoPrompt,
        );

        assert_eq!(
            drawing.get(id).unwrap().kind,
            ItemKind::Square {
                x: 0.0,
                y: 0.0,
                w: 110.0,
                h: 110.0
            }
        );
    }

    #[test]
    fn pan_without_pan_start_is_ignored() {
        let mut drawing = Drawing::new();
        let id = rendered_square(&mut drawing, 0.0, 0.0, 20.0);
        let mut interaction = Interaction::new(12.0);
        let before = drawing.get(id).unwrap().kind.clone();

        interaction.handle(
            &mut drawing,
            Gesture::Pan {
                x: 5.0,
                y: 5.0,
                dx: 5.0,
                dy: 5.0,
            },
            &mut NoPrompt,
        );
        assert_eq!(drawing.get(id).unwrap().kind, before);
    }
}
