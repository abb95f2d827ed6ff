pub mod generation;
pub mod movies;
pub mod parser;
pub mod prompt;
pub mod recommendations;

pub use generation::{CohereGenerator, TextGenerator};
pub use movies::{MovieDatabase, TmdbClient};
