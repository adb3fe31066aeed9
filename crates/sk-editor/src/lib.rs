pub mod commands;
pub mod config;
pub mod input;
pub mod interaction;
pub mod session;

pub use commands::Command;
pub use config::EditorConfig;
pub use input::{Gesture, GestureConfig, GestureRecognizer, PointerPhase, PointerSample, RawPointer};
pub use interaction::{Interaction, Mode, TextPrompt};
pub use session::Session;
