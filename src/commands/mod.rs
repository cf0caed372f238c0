//! Command implementations for the linekit binary.

pub mod filter;
pub mod generate;
pub mod permute;
pub mod queens;
pub mod tsp;

pub use filter::FilterCommand;
pub use generate::{GenerateCommand, GenerateConfig, SizeSpec};
pub use permute::PermuteCommand;
pub use queens::QueensCommand;
pub use tsp::TspCommand;
