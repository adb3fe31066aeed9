//! DOM events → surface-relative pointer samples.

use sk_core::Point;
use sk_editor::{PointerPhase, PointerSample, RawPointer};
use smallvec::SmallVec;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent, TouchList};

/// Phase for a mouse or pointer event type. `None` for types the
/// recognizer has no use for.
pub fn mouse_phase(event_type: &str) -> Option<PointerPhase> {
    match event_type {
        "mousedown" | "pointerdown" => Some(PointerPhase::Down),
        "mousemove" | "pointermove" => Some(PointerPhase::Move),
        "mouseup" | "pointerup" => Some(PointerPhase::Up),
        "mouseleave" | "pointercancel" => Some(PointerPhase::Cancel),
        _ => None,
    }
}

/// Phase for a touch event type. `remaining` is the number of contacts
/// still down after the event: lifting one finger of several keeps the
/// gesture alive and reports the remaining first contact as a move.
pub fn touch_phase(event_type: &str, remaining: u32) -> Option<PointerPhase> {
    match event_type {
        "touchstart" => Some(PointerPhase::Down),
        "touchmove" => Some(PointerPhase::Move),
        "touchend" | "touchcancel" if remaining > 0 => Some(PointerPhase::Move),
        "touchend" => Some(PointerPhase::Up),
        "touchcancel" => Some(PointerPhase::Cancel),
        _ => None,
    }
}

pub fn mouse_pointer(event: &MouseEvent) -> RawPointer {
    RawPointer::Single {
        client_x: event.client_x() as f32,
        client_y: event.client_y() as f32,
    }
}

/// Active contacts, or the contacts that just lifted on `touchend`
/// (when `touches` is already empty).
pub fn touch_pointer(event: &TouchEvent) -> RawPointer {
    let mut contacts = contacts_of(&event.touches());
    if contacts.is_empty() {
        contacts = contacts_of(&event.changed_touches());
    }
    RawPointer::Touch { contacts }
}

fn contacts_of(list: &TouchList) -> SmallVec<[(f32, f32); 4]> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| (touch.client_x() as f32, touch.client_y() as f32))
        .collect()
}

/// Client-space position of the canvas' top-left corner.
pub fn surface_origin(canvas: &HtmlCanvasElement) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(rect.left() as f32, rect.top() as f32)
}

pub fn to_sample(
    raw: &RawPointer,
    origin: Point,
    phase: PointerPhase,
    time_ms: f64,
) -> Option<PointerSample> {
    raw.surface_position(origin)
        .map(|at| PointerSample::new(phase, at, time_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sk_editor::{Gesture, GestureRecognizer};
    use smallvec::smallvec;

    #[test]
    fn event_types_map_to_phases() {
        assert_eq!(mouse_phase("mousedown"), Some(PointerPhase::Down));
        assert_eq!(mouse_phase("pointermove"), Some(PointerPhase::Move));
        assert_eq!(mouse_phase("mouseleave"), Some(PointerPhase::Cancel));
        assert_eq!(mouse_phase("click"), None);
        assert_eq!(touch_phase("touchend", 0), Some(PointerPhase::Up));
        assert_eq!(touch_phase("touchcancel", 0), Some(PointerPhase::Cancel));
        assert_eq!(touch_phase("mousedown", 0), None);
    }

    #[test]
    fn lifting_one_of_several_fingers_is_a_move() {
        assert_eq!(touch_phase("touchend", 1), Some(PointerPhase::Move));
        assert_eq!(touch_phase("touchcancel", 2), Some(PointerPhase::Move));
        assert_eq!(touch_phase("touchstart", 2), Some(PointerPhase::Down));
    }

    #[test]
    fn pan_survives_a_second_finger_lifting() {
        let mut rec = GestureRecognizer::default();
        let mut feed = |event_type: &str, remaining: u32, x: f32, t: f64| {
            let phase = touch_phase(event_type, remaining).unwrap();
            rec.feed(PointerSample {
                phase,
                x,
                y: 0.0,
                time_ms: t,
            })
        };

        feed("touchstart", 1, 0.0, 0.0);
        feed("touchmove", 1, 30.0, 5.0);
        feed("touchstart", 2, 30.0, 6.0);
        let lift = feed("touchend", 1, 30.0, 7.0);
        assert!(!lift.iter().any(|g| matches!(g, Gesture::PanEnd { .. })));

        let moved = feed("touchmove", 1, 60.0, 8.0);
        assert_eq!(
            moved.as_slice(),
            &[Gesture::Pan {
                x: 60.0,
                y: 0.0,
                dx: 60.0,
                dy: 0.0
            }]
        );
        let end = feed("touchend", 0, 60.0, 9.0);
        assert!(matches!(end.as_slice(), [Gesture::PanEnd { dx, .. }] if *dx == 60.0));
    }

    #[test]
    fn sample_is_relative_to_canvas_origin() {
        let raw = RawPointer::Touch {
            contacts: smallvec![(130.0, 75.0), (10.0, 10.0)],
        };
        let sample = to_sample(&raw, Point::new(30.0, 25.0), PointerPhase::Move, 16.0);
        assert_eq!(
            sample,
            Some(PointerSample {
                phase: PointerPhase::Move,
                x: 100.0,
                y: 50.0,
                time_ms: 16.0,
            })
        );
    }

    #[test]
    fn touch_without_contacts_has_no_sample() {
        let raw = RawPointer::Touch {
            contacts: SmallVec::new(),
        };
        assert_eq!(to_sample(&raw, Point::default(), PointerPhase::Up, 0.0), None);
    }
}
