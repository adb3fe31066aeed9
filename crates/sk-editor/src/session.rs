//! Editing session: the single owner of the drawing.
//!
//! Handlers borrow the drawing for exactly one event. Each returns whether
//! the change version moved so the host can feed its redraw scheduler.

use crate::commands::Command;
use crate::config::EditorConfig;
use crate::input::{Gesture, GestureRecognizer, PointerSample};
use crate::interaction::{Interaction, Mode, TextPrompt};
use sk_core::{Drawing, ItemId, Versioned};
use sk_render::{Surface, paint_drawing};

pub struct Session {
    drawing: Drawing,
    interaction: Interaction,
    recognizer: GestureRecognizer,
    config: EditorConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            drawing: Drawing::new(),
            interaction: Interaction::new(config.theme.handle_size),
            recognizer: GestureRecognizer::new(config.gestures),
            config,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn execute(&mut self, command: Command) -> ItemId {
        command.apply(&mut self.drawing, &self.config.defaults)
    }

    pub fn add_text(&mut self) -> ItemId {
        self.execute(Command::AddText)
    }

    pub fn add_square(&mut self) -> ItemId {
        self.execute(Command::AddSquare)
    }

    /// Apply an already-recognized gesture.
    pub fn handle_gesture(&mut self, gesture: Gesture, prompt: &mut dyn TextPrompt) -> bool {
        let before = self.drawing.version();
        self.interaction.handle(&mut self.drawing, gesture, prompt);
        self.drawing.changed_since(before)
    }

    /// Run a raw pointer sample through the recognizer, then apply the
    /// gestures it produced in order.
    pub fn handle_pointer(&mut self, sample: PointerSample, prompt: &mut dyn TextPrompt) -> bool {
        let before = self.drawing.version();
        for gesture in self.recognizer.feed(sample) {
            self.interaction.handle(&mut self.drawing, gesture, prompt);
        }
        self.drawing.changed_since(before)
    }

    /// Press-timer hook: fires a pending press if the hold has elapsed.
    pub fn poll(&mut self, now_ms: f64, prompt: &mut dyn TextPrompt) -> bool {
        match self.recognizer.poll(now_ms) {
            Some(gesture) => self.handle_gesture(gesture, prompt),
            None => false,
        }
    }

    /// Full repaint; records rendered dimensions for hit testing.
    pub fn paint<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        paint_drawing(surface, &mut self.drawing, &self.config.theme)
    }
}
