//! Theme-dependent colors and sizes for the painter.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasTheme {
    /// Tile background color.
    pub bg: String,
    /// Tile grid line color.
    pub grid: String,
    /// Side of one background tile in CSS pixels.
    pub tile_size: f64,
    pub text_color: String,
    pub font_family: String,
    pub square_fill: String,
    pub square_stroke: String,
    pub selection: String,
    pub handle_fill: String,
    /// Side of the resize handle, for both drawing and hit testing.
    pub handle_size: f32,
}

impl CanvasTheme {
    /// Light theme: warm white paper with a faint grid.
    pub fn light() -> Self {
        Self {
            bg: "#F5F5F7".into(),
            grid: "rgba(0, 0, 0, 0.06)".into(),
            tile_size: 20.0,
            text_color: "#1C1C1E".into(),
            font_family: "Inter, sans-serif".into(),
            square_fill: "#CCCCD9".into(),
            square_stroke: "#86868B".into(),
            selection: "#4FC3F7".into(),
            handle_fill: "#FFFFFF".into(),
            handle_size: 12.0,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E".into(),
            grid: "rgba(255, 255, 255, 0.05)".into(),
            text_color: "#F5F5F7".into(),
            square_fill: "#3A3A3C".into(),
            square_stroke: "#98989D".into(),
            handle_fill: "#1C1C1E".into(),
            ..Self::light()
        }
    }

    /// CSS font shorthand for a text item of the given pixel size.
    pub fn font(&self, size: f32) -> String {
        format!("{size}px {}", self.font_family)
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_keeps_light_geometry() {
        let dark = CanvasTheme::dark();
        assert_eq!(dark.handle_size, CanvasTheme::light().handle_size);
        assert_ne!(dark.bg, CanvasTheme::light().bg);
    }

    #[test]
    fn partial_json_overrides() {
        let theme: CanvasTheme = serde_json::from_str(r#"{"handleSize": 20}"#).unwrap();
        assert_eq!(theme.handle_size, 20.0);
        assert_eq!(theme.bg, "#F5F5F7");
    }

    #[test]
    fn font_shorthand() {
        assert_eq!(CanvasTheme::light().font(24.0), "24px Inter, sans-serif");
    }
}
