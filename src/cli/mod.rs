//! Command line interface: argument parsing, the interactive session and its
//! output, and the low-confidence review log.

pub mod args;
pub mod commands;
pub mod low_confidence;
pub mod output;
pub mod session;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use low_confidence::*;
pub use session::*;
