//! Core data types: form parameters and multipart parts.

pub mod parameters;
pub mod parts;

pub use parameters::{Parameters, ParametersBuilder};
pub use parts::{FormDataBuilder, PartData, PartSource};
