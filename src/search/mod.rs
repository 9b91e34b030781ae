//! Search session and result set extension points.

pub mod extension;
pub mod session;

pub use extension::{MethodHandler, MethodRegistry};
pub use session::SearchSession;
