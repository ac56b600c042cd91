pub mod convert;
pub mod loader;
pub mod parser;
mod types;

// Re-exports
pub use {
    loader::{load, process_skl},
    parser::{Line, Parser, State},
    types::SklToLoad,
};
