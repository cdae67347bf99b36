//! Request execution: body content and the HTTP layer.

pub mod content;
pub mod http;
