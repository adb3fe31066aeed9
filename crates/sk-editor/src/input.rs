//! Input abstraction layer.
//!
//! Two steps turn platform events into gestures the interaction machine
//! understands:
//!
//! 1. [`RawPointer`] reduces any modality (mouse/pen pointer, touch
//!    contact list) to one surface-relative position per sample.
//! 2. [`GestureRecognizer`] turns a stream of positioned down/move/up
//!    samples into tap, press and pan gestures.
//!
//! Hosts that already run their own recognizer can skip step 2 and build
//! [`Gesture`] values directly.

use serde::Deserialize;
use sk_core::Point;
use smallvec::SmallVec;

// ─── Pointer normalization ───────────────────────────────────────────────

/// A raw pointer sample in client (viewport) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    /// Mouse, pen, or any single-pointer device.
    Single { client_x: f32, client_y: f32 },
    /// Touch: the active contact list. The first contact is canonical.
    Touch { contacts: SmallVec<[(f32, f32); 4]> },
}

impl RawPointer {
    /// Canonical position relative to the drawing surface whose top-left
    /// corner sits at `origin` in client coordinates. `None` for a touch
    /// sample without contacts.
    pub fn surface_position(&self, origin: Point) -> Option<Point> {
        let (cx, cy) = match self {
            Self::Single { client_x, client_y } => (*client_x, *client_y),
            Self::Touch { contacts } => *contacts.first()?,
        };
        Some(Point::new(cx - origin.x, cy - origin.y))
    }
}

// ─── Gestures ────────────────────────────────────────────────────────────

/// A recognized gesture. Positions are surface-relative; `dx`/`dy` are
/// cumulative from the start of the pan, never per-sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap { x: f32, y: f32 },
    Press { x: f32, y: f32 },
    PanStart { x: f32, y: f32 },
    Pan { x: f32, y: f32, dx: f32, dy: f32 },
    PanEnd { x: f32, y: f32, dx: f32, dy: f32 },
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One positioned pointer sample fed to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, at: Point, time_ms: f64) -> Self {
        Self {
            phase,
            x: at.x,
            y: at.y,
            time_ms,
        }
    }
}

/// Recognizer thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Hold time before a press fires.
    pub press_ms: f64,
    /// Movement that turns a hold into a pan.
    pub pan_threshold: f32,
    /// Longest down→up that still counts as a tap.
    pub tap_max_ms: f64,
    /// Longest gap between consecutive taps of one multi-tap.
    pub tap_interval_ms: f64,
    /// Farthest consecutive taps may land from each other.
    pub tap_radius: f32,
    /// Taps needed to emit [`Gesture::Tap`] (2 = double tap).
    pub tap_count: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            press_ms: 10.0,
            pan_threshold: 10.0,
            tap_max_ms: 250.0,
            tap_interval_ms: 300.0,
            tap_radius: 10.0,
            tap_count: 2,
        }
    }
}

pub type Gestures = SmallVec<[Gesture; 2]>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Track {
    Idle,
    Held {
        start: Point,
        since: f64,
        pressed: bool,
    },
    Panning {
        start: Point,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TapRun {
    at: Point,
    time_ms: f64,
    count: u32,
}

/// Turns pointer samples into gestures for a single pointer.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    track: Track,
    taps: Option<TapRun>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            track: Track::Idle,
            taps: None,
        }
    }

    /// Whether a pointer is currently down and not yet panning. Hosts use
    /// this to decide whether to arm a press timer.
    pub fn is_holding(&self) -> bool {
        matches!(self.track, Track::Held { pressed: false, .. })
    }

    pub fn feed(&mut self, sample: PointerSample) -> Gestures {
        let mut out = Gestures::new();
        let at = Point::new(sample.x, sample.y);

        match (sample.phase, self.track) {
            (PointerPhase::Down, Track::Idle) => {
                self.track = Track::Held {
                    start: at,
                    since: sample.time_ms,
                    pressed: false,
                };
            }
            // Extra contacts while a gesture is running behave like moves
            // of the canonical pointer.
            (PointerPhase::Down | PointerPhase::Move, Track::Held { start, .. }) => {
                let (dx, dy) = (at.x - start.x, at.y - start.y);
                if dx.hypot(dy) >= self.config.pan_threshold {
                    self.track = Track::Panning { start };
                    self.taps = None;
                    out.push(Gesture::PanStart {
                        x: start.x,
                        y: start.y,
                    });
                    out.push(Gesture::Pan {
                        x: at.x,
                        y: at.y,
                        dx,
                        dy,
                    });
                } else {
                    out.extend(self.poll(sample.time_ms));
                }
            }
            (PointerPhase::Down | PointerPhase::Move, Track::Panning { start }) => {
                out.push(Gesture::Pan {
                    x: at.x,
                    y: at.y,
                    dx: at.x - start.x,
                    dy: at.y - start.y,
                });
            }
            (PointerPhase::Move, Track::Idle) => {}
            (PointerPhase::Up, Track::Held { start, since, .. }) => {
                out.extend(self.poll(sample.time_ms));
                self.track = Track::Idle;
                if sample.time_ms - since <= self.config.tap_max_ms {
                    out.extend(self.register_tap(start, sample.time_ms));
                } else {
                    self.taps = None;
                }
            }
            (PointerPhase::Up | PointerPhase::Cancel, Track::Panning { start }) => {
                self.track = Track::Idle;
                out.push(Gesture::PanEnd {
                    x: at.x,
                    y: at.y,
                    dx: at.x - start.x,
                    dy: at.y - start.y,
                });
            }
            (PointerPhase::Cancel, _) => {
                self.track = Track::Idle;
                self.taps = None;
            }
            (PointerPhase::Up, Track::Idle) => {}
        }
        out
    }

    /// Fire a pending press once the hold time has elapsed. Call from a
    /// host timer armed on pointer down; samples call it implicitly.
    pub fn poll(&mut self, now_ms: f64) -> Option<Gesture> {
        let Track::Held {
            start,
            since,
            pressed,
        } = &mut self.track
        else {
            return None;
        };
        if *pressed || now_ms - *since < self.config.press_ms {
            return None;
        }
        *pressed = true;
        Some(Gesture::Press {
            x: start.x,
            y: start.y,
        })
    }

    fn register_tap(&mut self, at: Point, time_ms: f64) -> Option<Gesture> {
        let count = match self.taps {
            Some(run)
                if time_ms - run.time_ms <= self.config.tap_interval_ms
                    && (at.x - run.at.x).hypot(at.y - run.at.y) <= self.config.tap_radius =>
            {
                run.count + 1
            }
            _ => 1,
        };
        if count >= self.config.tap_count {
            self.taps = None;
            Some(Gesture::Tap { x: at.x, y: at.y })
        } else {
            self.taps = Some(TapRun { at, time_ms, count });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn sample(phase: PointerPhase, x: f32, y: f32, t: f64) -> PointerSample {
        PointerSample {
            phase,
            x,
            y,
            time_ms: t,
        }
    }

    #[test]
    fn touch_uses_first_contact() {
        let raw = RawPointer::Touch {
            contacts: smallvec![(110.0, 220.0), (400.0, 400.0)],
        };
        assert_eq!(
            raw.surface_position(Point::new(10.0, 20.0)),
            Some(Point::new(100.0, 200.0))
        );
        let empty = RawPointer::Touch {
            contacts: SmallVec::new(),
        };
        assert_eq!(empty.surface_position(Point::default()), None);
    }

    #[test]
    fn single_pointer_is_offset_by_origin() {
        let raw = RawPointer::Single {
            client_x: 50.0,
            client_y: 60.0,
        };
        assert_eq!(
            raw.surface_position(Point::new(50.0, 10.0)),
            Some(Point::new(0.0, 50.0))
        );
    }

    #[test]
    fn hold_fires_press_once() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.feed(sample(PointerPhase::Down, 5.0, 5.0, 0.0)).is_empty());
        assert!(rec.is_holding());
        assert_eq!(rec.poll(4.0), None);
        assert_eq!(rec.poll(12.0), Some(Gesture::Press { x: 5.0, y: 5.0 }));
        assert_eq!(rec.poll(20.0), None);
        assert!(!rec.is_holding());
    }

    #[test]
    fn pan_reports_cumulative_delta_from_down() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 100.0, 100.0, 0.0));
        let start = rec.feed(sample(PointerPhase::Move, 112.0, 100.0, 5.0));
        assert_eq!(
            start.as_slice(),
            &[
                Gesture::PanStart { x: 100.0, y: 100.0 },
                Gesture::Pan {
                    x: 112.0,
                    y: 100.0,
                    dx: 12.0,
                    dy: 0.0
                },
            ]
        );
        let next = rec.feed(sample(PointerPhase::Move, 120.0, 90.0, 10.0));
        assert_eq!(
            next.as_slice(),
            &[Gesture::Pan {
                x: 120.0,
                y: 90.0,
                dx: 20.0,
                dy: -10.0
            }]
        );
        let end = rec.feed(sample(PointerPhase::Up, 121.0, 90.0, 15.0));
        assert_eq!(
            end.as_slice(),
            &[Gesture::PanEnd {
                x: 121.0,
                y: 90.0,
                dx: 21.0,
                dy: -10.0
            }]
        );
    }

    #[test]
    fn small_jitter_does_not_pan() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 0.0, 0.0, 0.0));
        let out = rec.feed(sample(PointerPhase::Move, 3.0, 4.0, 2.0));
        assert!(out.is_empty());
    }

    #[test]
    fn double_tap_emits_tap() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 50.0, 50.0, 0.0));
        let first = rec.feed(sample(PointerPhase::Up, 50.0, 50.0, 5.0));
        assert!(first.is_empty());

        rec.feed(sample(PointerPhase::Down, 52.0, 51.0, 100.0));
        let second = rec.feed(sample(PointerPhase::Up, 52.0, 51.0, 104.0));
        assert_eq!(second.as_slice(), &[Gesture::Tap { x: 52.0, y: 51.0 }]);
    }

    #[test]
    fn slow_second_tap_starts_a_new_run() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 50.0, 50.0, 0.0));
        rec.feed(sample(PointerPhase::Up, 50.0, 50.0, 5.0));
        rec.feed(sample(PointerPhase::Down, 50.0, 50.0, 900.0));
        let out = rec.feed(sample(PointerPhase::Up, 50.0, 50.0, 905.0));
        assert!(!out.iter().any(|g| matches!(g, Gesture::Tap { .. })));
    }

    #[test]
    fn release_after_hold_emits_missed_press() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 7.0, 8.0, 0.0));
        let out = rec.feed(sample(PointerPhase::Up, 7.0, 8.0, 50.0));
        assert_eq!(out.as_slice(), &[Gesture::Press { x: 7.0, y: 8.0 }]);
    }

    #[test]
    fn cancel_mid_pan_ends_the_pan() {
        let mut rec = GestureRecognizer::default();
        rec.feed(sample(PointerPhase::Down, 0.0, 0.0, 0.0));
        rec.feed(sample(PointerPhase::Move, 30.0, 0.0, 1.0));
        let out = rec.feed(sample(PointerPhase::Cancel, 30.0, 0.0, 2.0));
        assert!(matches!(out.as_slice(), [Gesture::PanEnd { dx, .. }] if *dx == 30.0));
    }
}
