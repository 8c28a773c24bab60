pub mod form;
pub mod models;
pub mod schema;
pub mod uci;
pub mod validators;

// Re-export the main schema types for easier access
pub use models::Features;
pub use schema::{server_form, FormSchema};

// Re-export the engine and store types
pub use form::{check_document, Finding, FormError, SectionForm, ValidationError};
pub use uci::UciDocument;
