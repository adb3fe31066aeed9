//! Drawing → surface paint commands.
//!
//! Repaints the whole surface on every pass: tiled background, then each
//! item in list order, then the selection decoration. Each item painter
//! returns the footprint it actually covered and the pass writes it back
//! as the item's rendered dimensions, which is what hit testing reads.

use crate::hit::handle_bounds;
use crate::theme::CanvasTheme;
use kurbo::{Point, Rect};
use sk_core::{Bounds, Drawing, Item, ItemId, ItemKind, Size};

/// A 2D raster backend.
///
/// Text measurement must come from the backend: a text item's width is
/// only known once the backend has laid it out in the requested font.
pub trait Surface {
    type Error;

    /// Surface size in CSS pixels.
    fn size(&self) -> (f64, f64);

    /// Fill `area` with the theme's repeating background tile.
    fn fill_tiled_background(&mut self, area: Rect, theme: &CanvasTheme)
    -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);

    /// Draw `text` with its top-left corner at `origin` and return the
    /// advance width of the laid-out string.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &str,
        color: &str,
    ) -> Result<f64, Self::Error>;
}

/// Paint the drawing and record each item's rendered footprint.
pub fn paint_drawing<S: Surface>(
    surface: &mut S,
    drawing: &mut Drawing,
    theme: &CanvasTheme,
) -> Result<(), S::Error> {
    let (width, height) = surface.size();
    surface.fill_tiled_background(Rect::new(0.0, 0.0, width, height), theme)?;

    let mut footprints: Vec<(ItemId, Size)> = Vec::with_capacity(drawing.len());
    for item in drawing.items() {
        let size = match &item.kind {
            ItemKind::Text { x, y, size, text } => {
                draw_text(surface, *x, *y, *size, text, theme)?
            }
            ItemKind::Square { x, y, w, h } => draw_square(surface, *x, *y, *w, *h, theme),
        };
        footprints.push((item.id, size));
    }
    for (id, size) in footprints {
        drawing.set_rendered(id, size);
    }

    if let Some(item) = drawing.selected() {
        draw_selection(surface, item, theme);
    }
    Ok(())
}

// ─── Item painters ───────────────────────────────────────────────────────

fn draw_text<S: Surface>(
    surface: &mut S,
    x: f32,
    y: f32,
    size: f32,
    text: &str,
    theme: &CanvasTheme,
) -> Result<Size, S::Error> {
    log::trace!("TEXT {text:?} at ({x}, {y}) size {size}");
    let width = surface.fill_text(
        text,
        Point::new(x as f64, y as f64),
        &theme.font(size),
        &theme.text_color,
    )?;
    Ok(Size::new(width as f32, size))
}

fn draw_square<S: Surface>(
    surface: &mut S,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    theme: &CanvasTheme,
) -> Size {
    let rect = to_rect(Bounds::new(x, y, w, h));
    surface.fill_rect(rect, &theme.square_fill);
    surface.stroke_rect(rect, &theme.square_stroke, 1.0);
    Size::new(w, h)
}

// ─── Selection decoration ────────────────────────────────────────────────

/// Outline plus one live handle (bottom-right, same rect the hit test
/// uses) and inert marks on the other three corners.
fn draw_selection<S: Surface>(surface: &mut S, item: &Item, theme: &CanvasTheme) {
    let (Some(body), Some(handle)) = (item.body_bounds(), handle_bounds(item, theme.handle_size))
    else {
        return;
    };
    let outline = to_rect(body);
    surface.stroke_rect(outline, &theme.selection, 1.5);

    let handle = to_rect(handle);
    surface.fill_rect(handle, &theme.selection);
    surface.stroke_rect(handle, &theme.handle_fill, 1.0);

    let mark = theme.handle_size as f64 / 2.0;
    for corner in [
        Point::new(outline.x0, outline.y0),
        Point::new(outline.x1, outline.y0),
        Point::new(outline.x0, outline.y1),
    ] {
        let rect = Rect::from_center_size(corner, (mark, mark));
        surface.fill_rect(rect, &theme.handle_fill);
        surface.stroke_rect(rect, &theme.selection, 1.0);
    }
}

fn to_rect(b: Bounds) -> Rect {
    Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.width) as f64,
        (b.y + b.height) as f64,
    )
}
