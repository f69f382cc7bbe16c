pub use sqlstitch_core::*;

pub use sqlstitch_core::{named_params, params};
