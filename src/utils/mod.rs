//! Utility modules
//!
//! Helpers shared by the body encoders and the submission functions.

pub mod cancel;
pub mod mime;

pub use cancel::{CancelHandle, run_cancellable};
