//! WASM bridge for the sketch canvas. Exposes the editing session to
//! JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page wraps a
//! `<canvas>` in a [`SketchCanvas`] and forwards either raw DOM events
//! (which go through the built-in gesture recognizer) or gestures from its
//! own recognizer. Mutations never paint directly: they bump the drawing's
//! change version and the redraw lands on the next animation frame.

mod logger;
mod pointer;
mod render2d;

use render2d::Canvas2dSurface;
use sk_editor::{Command, EditorConfig, Gesture, PointerPhase, RawPointer, Session, TextPrompt};
use sk_render::{FrameRequester, RedrawScheduler, Schedule};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

/// Everything one canvas needs, borrowed by one event or frame at a time.
struct Host {
    session: Session,
    scheduler: RedrawScheduler,
    surface: Canvas2dSurface,
}

impl Host {
    /// Frame callback paint: settles the pending frame.
    fn redraw(&mut self) -> Result<(), JsValue> {
        self.scheduler.begin_frame(self.session.drawing());
        self.session.paint(&mut self.surface)
    }

    /// Paint outside the frame loop. A queued frame stays queued.
    fn paint_now(&mut self) -> Result<(), JsValue> {
        self.scheduler.mark_drawn(self.session.drawing());
        self.session.paint(&mut self.surface)
    }
}

type SharedHost = Rc<RefCell<Host>>;

/// The WASM-facing canvas controller.
#[wasm_bindgen]
pub struct SketchCanvas {
    host: SharedHost,
}

#[wasm_bindgen]
impl SketchCanvas {
    /// Attach to `canvas` with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<SketchCanvas, JsValue> {
        Self::attach(canvas, EditorConfig::default())
    }

    /// Attach with a JSON configuration (see `EditorConfig`). Missing
    /// fields keep their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas: HtmlCanvasElement, config: &str) -> Result<SketchCanvas, JsValue> {
        let config = EditorConfig::from_json(config).map_err(|e| JsValue::from_str(&e))?;
        Self::attach(canvas, config)
    }

    // ─── Toolbox ─────────────────────────────────────────────────────────

    pub fn add_text(&self) {
        self.run_command(Command::AddText);
    }

    pub fn add_square(&self) {
        self.run_command(Command::AddSquare);
    }

    /// Run a toolbox command by name (`addText`, `addSquare`). Returns
    /// `false` for an unknown name.
    pub fn execute(&self, name: &str) -> bool {
        match Command::from_name(name) {
            Some(command) => {
                self.run_command(command);
                true
            }
            None => {
                log::warn!("unknown command {name:?}");
                false
            }
        }
    }

    // ─── Recognized gestures ─────────────────────────────────────────────
    //
    // For hosts running their own recognizer. Coordinates are relative to
    // the canvas; pan deltas are cumulative from the gesture start.
    // Each returns `true` if the drawing changed.

    pub fn tap(&self, x: f32, y: f32) -> bool {
        self.apply_gesture(Gesture::Tap { x, y })
    }

    pub fn press(&self, x: f32, y: f32) -> bool {
        self.apply_gesture(Gesture::Press { x, y })
    }

    pub fn pan_start(&self, x: f32, y: f32) -> bool {
        self.apply_gesture(Gesture::PanStart { x, y })
    }

    pub fn pan(&self, x: f32, y: f32, dx: f32, dy: f32) -> bool {
        self.apply_gesture(Gesture::Pan { x, y, dx, dy })
    }

    pub fn pan_end(&self, x: f32, y: f32, dx: f32, dy: f32) -> bool {
        self.apply_gesture(Gesture::PanEnd { x, y, dx, dy })
    }

    // ─── Raw DOM events ──────────────────────────────────────────────────

    /// Feed a `mousedown`/`mousemove`/`mouseup`/`mouseleave` (or the
    /// pointer-event equivalents). Returns `true` if the drawing changed.
    pub fn handle_mouse_event(&self, event: &MouseEvent) -> bool {
        let Some(phase) = pointer::mouse_phase(&event.type_()) else {
            return false;
        };
        self.feed_pointer(&pointer::mouse_pointer(event), phase, event.time_stamp())
    }

    /// Feed a `touchstart`/`touchmove`/`touchend`/`touchcancel`. Default
    /// scrolling is suppressed for handled events.
    pub fn handle_touch_event(&self, event: &TouchEvent) -> bool {
        let Some(phase) = pointer::touch_phase(&event.type_(), event.touches().length()) else {
            return false;
        };
        event.prevent_default();
        self.feed_pointer(&pointer::touch_pointer(event), phase, event.time_stamp())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// The item list as plain JSON records, in drawing order.
    pub fn to_json(&self) -> String {
        match self.host.borrow().session.drawing().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("serialization error: {e}");
                String::new()
            }
        }
    }

    /// Index of the selected item, or `-1`.
    pub fn selected_index(&self) -> i32 {
        let host = self.host.borrow();
        let drawing = host.session.drawing();
        drawing
            .selected()
            .and_then(|item| drawing.index_of(item.id))
            .map_or(-1, |index| index as i32)
    }

    pub fn item_count(&self) -> usize {
        self.host.borrow().session.drawing().len()
    }

    /// Paint immediately, bypassing frame scheduling.
    pub fn render_now(&self) -> Result<(), JsValue> {
        self.host.borrow_mut().paint_now()
    }
}

impl SketchCanvas {
    fn attach(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<SketchCanvas, JsValue> {
        console_error_panic_hook_setup();
        logger::init(config.log_level);

        let host = Host {
            surface: Canvas2dSurface::new(canvas)?,
            session: Session::new(config),
            scheduler: RedrawScheduler::new(),
        };
        let this = SketchCanvas {
            host: Rc::new(RefCell::new(host)),
        };
        schedule_redraw(&this.host);
        Ok(this)
    }

    fn run_command(&self, command: Command) {
        let id = self.host.borrow_mut().session.execute(command);
        log::debug!("{} -> {id}", command.name());
        schedule_redraw(&self.host);
    }

    fn apply_gesture(&self, gesture: Gesture) -> bool {
        let changed = self
            .host
            .borrow_mut()
            .session
            .handle_gesture(gesture, &mut WindowPrompt);
        schedule_redraw(&self.host);
        changed
    }

    fn feed_pointer(&self, raw: &RawPointer, phase: PointerPhase, time_ms: f64) -> bool {
        let (changed, arm_press) = {
            let mut host = self.host.borrow_mut();
            let origin = pointer::surface_origin(host.surface.canvas());
            let Some(sample) = pointer::to_sample(raw, origin, phase, time_ms) else {
                return false;
            };
            let changed = host.session.handle_pointer(sample, &mut WindowPrompt);
            let arm_press = phase == PointerPhase::Down && host.session.recognizer().is_holding();
            (changed, arm_press)
        };
        if arm_press {
            arm_press_timer(&self.host);
        }
        schedule_redraw(&self.host);
        changed
    }
}

// ─── Redraw scheduling ───────────────────────────────────────────────────

/// `requestAnimationFrame` as a [`FrameRequester`].
struct AnimationFrames {
    host: SharedHost,
}

impl FrameRequester for AnimationFrames {
    type Error = JsValue;

    fn request_frame(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let host = Rc::clone(&self.host);
        let cb = Closure::once_into_js(move |_ts: f64| run_frame(&host));
        window.request_animation_frame(cb.unchecked_ref())?;
        Ok(())
    }
}

fn schedule_redraw(host: &SharedHost) {
    let Ok(mut guard) = host.try_borrow_mut() else {
        log::warn!("redraw requested while the canvas is busy");
        return;
    };
    let state = &mut *guard;
    let mut frames = AnimationFrames {
        host: Rc::clone(host),
    };
    if state.scheduler.observe(state.session.drawing(), &mut frames) == Schedule::RenderNow {
        if let Err(err) = state.redraw() {
            log::error!("redraw failed: {err:?}");
        }
    }
}

fn run_frame(host: &SharedHost) {
    let Ok(mut state) = host.try_borrow_mut() else {
        // An event handler is mid-flight; try again next frame.
        let mut frames = AnimationFrames {
            host: Rc::clone(host),
        };
        if let Err(err) = frames.request_frame() {
            log::error!("frame retry failed: {err:?}");
        }
        return;
    };
    if let Err(err) = state.redraw() {
        log::error!("redraw failed: {err:?}");
    }
}

/// Fire the recognizer's press once the hold time has passed, even if the
/// pointer never moves again.
fn arm_press_timer(host: &SharedHost) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let delay = host.borrow().session.config().gestures.press_ms;
    let host_for_cb = Rc::clone(host);
    let cb = Closure::once_into_js(move || {
        let Some(now) = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
        else {
            return;
        };
        let changed = match host_for_cb.try_borrow_mut() {
            Ok(mut state) => state.session.poll(now, &mut WindowPrompt),
            Err(_) => false,
        };
        if changed {
            schedule_redraw(&host_for_cb);
        }
    });
    // One extra millisecond so the timer never fires just short of the threshold.
    let timeout = delay.ceil() as i32 + 1;
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout)
    {
        log::warn!("press timer failed: {err:?}");
    }
}

// ─── Text entry ──────────────────────────────────────────────────────────

/// `window.prompt`, pre-filled with the current text.
struct WindowPrompt;

impl TextPrompt for WindowPrompt {
    fn prompt(&mut self, current: &str) -> Option<String> {
        let window = web_sys::window()?;
        window
            .prompt_with_message_and_default("Edit text", current)
            .unwrap_or_else(|err| {
                log::warn!("prompt failed: {err:?}");
                None
            })
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("SK WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
