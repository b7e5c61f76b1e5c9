mod models;
pub mod transitions;

pub use models::*;
pub use transitions::{next_status, resolve_status, StatusLink};
