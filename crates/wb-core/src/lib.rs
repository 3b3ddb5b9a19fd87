pub mod error;
pub mod factory;
pub mod frame;
pub mod geometry;
pub mod id;
pub mod model;
pub mod normalize;

pub use error::ShapeError;
pub use factory::{create_shape, create_shape_named, default_style};
pub use frame::{is_inside, recompute_frame_children};
pub use id::ShapeId;
pub use model::*;
pub use normalize::{needs_normalize, normalize, normalize_all};
