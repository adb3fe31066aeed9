//! Placement defaults for the add-text / add-square commands.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemDefaults {
    pub text_x: f32,
    pub text_y: f32,
    pub text_size: f32,
    pub placeholder: String,
    pub square_x: f32,
    pub square_y: f32,
    pub square_side: f32,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            text_x: 20.0,
            text_y: 40.0,
            text_size: 24.0,
            placeholder: "Double tap to edit".into(),
            square_x: 40.0,
            square_y: 80.0,
            square_side: 100.0,
        }
    }
}
