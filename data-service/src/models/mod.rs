pub mod document;

pub use document::{Document, IDENTITY_FIELD};
