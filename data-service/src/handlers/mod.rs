pub mod data;
pub mod health;
pub mod metrics;
pub mod welcome;

pub use data::{insert_document, list_documents};
pub use health::health_check;
pub use welcome::index;
