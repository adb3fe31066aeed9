//! Canvas2D backend for the painter.
//!
//! Implements [`Surface`] on top of `CanvasRenderingContext2d`. Text is
//! drawn with a `top` baseline so an item's `(x, y)` is its top-left
//! corner, and its width comes from `measureText`.

use kurbo::{Point, Rect};
use sk_render::{CanvasTheme, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasPattern, CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Background tile pattern, rebuilt when the theme's tile changes.
    tile: Option<(TileKey, CanvasPattern)>,
}

#[derive(Debug, Clone, PartialEq)]
struct TileKey {
    bg: String,
    grid: String,
    size: f64,
}

impl TileKey {
    fn of(theme: &CanvasTheme) -> Self {
        Self {
            bg: theme.bg.clone(),
            grid: theme.grid.clone(),
            size: theme.tile_size,
        }
    }
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            tile: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn tile_pattern(&mut self, theme: &CanvasTheme) -> Result<Option<CanvasPattern>, JsValue> {
        let key = TileKey::of(theme);
        if let Some((cached, pattern)) = &self.tile {
            if *cached == key {
                return Ok(Some(pattern.clone()));
            }
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(None);
        };
        let tile: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let side = key.size.max(1.0);
        tile.set_width(side as u32);
        tile.set_height(side as u32);
        let tctx = context_2d(&tile)?;
        tctx.set_fill_style_str(&key.bg);
        tctx.fill_rect(0.0, 0.0, side, side);
        // Grid lines along the right and bottom edges of each tile.
        tctx.set_stroke_style_str(&key.grid);
        tctx.set_line_width(1.0);
        tctx.begin_path();
        tctx.move_to(side - 0.5, 0.0);
        tctx.line_to(side - 0.5, side);
        tctx.move_to(0.0, side - 0.5);
        tctx.line_to(side, side - 0.5);
        tctx.stroke();

        let pattern = self
            .ctx
            .create_pattern_with_html_canvas_element(&tile, "repeat")?;
        if let Some(pattern) = &pattern {
            log::debug!("background tile rebuilt ({side}px)");
            self.tile = Some((key, pattern.clone()));
        }
        Ok(pattern)
    }
}

impl Surface for Canvas2dSurface {
    type Error = JsValue;

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn fill_tiled_background(&mut self, area: Rect, theme: &CanvasTheme) -> Result<(), JsValue> {
        match self.tile_pattern(theme)? {
            Some(pattern) => self.ctx.set_fill_style_canvas_pattern(&pattern),
            None => self.ctx.set_fill_style_str(&theme.bg),
        }
        self.ctx
            .fill_rect(area.x0, area.y0, area.width(), area.height());
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx
            .stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &str,
        color: &str,
    ) -> Result<f64, JsValue> {
        self.ctx.set_font(font);
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, origin.x, origin.y)?;
        Ok(self.ctx.measure_text(text)?.width())
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
