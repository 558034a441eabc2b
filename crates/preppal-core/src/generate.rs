pub mod error;
pub mod flashcards;
pub mod quiz;
pub mod summary;

pub use error::GenerateError;
