//! Value objects representing immutable domain concepts.

pub mod purpose;
pub mod transport;

// Re-export commonly used types
pub use purpose::Purpose;
pub use transport::Transport;
