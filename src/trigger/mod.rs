// Trigger dispatch core: lifecycle notifications routed to handler methods
// The dispatcher is the only place that inspects (phase, operation)

pub mod record;
pub mod context;
pub mod handler;
pub mod dispatcher;
pub mod error;
pub mod toggle;
pub mod entry;

// Re-export core types
pub use record::*;
pub use context::*;
pub use handler::*;
pub use dispatcher::*;
pub use error::*;
pub use toggle::*;
pub use entry::*;
