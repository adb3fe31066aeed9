pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod version;

pub use config::ItemDefaults;
pub use geometry::{Bounds, Point, Size};
pub use id::ItemId;
pub use model::*;
pub use version::{ChangeVersion, Versioned};
