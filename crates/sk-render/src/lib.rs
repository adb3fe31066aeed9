pub mod frame;
pub mod hit;
pub mod paint;
pub mod theme;

pub use frame::{FrameRequester, RedrawScheduler, Schedule};
pub use hit::{Hit, HitPart, hit_test};
pub use paint::{Surface, paint_drawing};
pub use theme::CanvasTheme;
