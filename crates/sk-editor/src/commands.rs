//! Toolbox commands.
//!
//! The toolbox UI lives outside this crate; it raises named "add item"
//! requests which map onto [`Command`] and are placed using
//! [`ItemDefaults`].

use sk_core::{Drawing, ItemDefaults, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddText,
    AddSquare,
}

impl Command {
    /// Resolve a toolbox action name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "addText" | "add_text" | "text" => Some(Self::AddText),
            "addSquare" | "add_square" | "square" => Some(Self::AddSquare),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AddText => "addText",
            Self::AddSquare => "addSquare",
        }
    }

    /// Append the default item for this command.
    pub fn apply(self, drawing: &mut Drawing, defaults: &ItemDefaults) -> ItemId {
        match self {
            Self::AddText => drawing.add_text(
                defaults.text_x,
                defaults.text_y,
                defaults.text_size,
                defaults.placeholder.clone(),
            ),
            Self::AddSquare => drawing.add_square(
                defaults.square_x,
                defaults.square_y,
                defaults.square_side,
                defaults.square_side,
            ),
        }
    }
}
