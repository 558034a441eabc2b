pub mod artifact;
pub mod convert;
pub mod flashcard;
pub mod login;
pub mod quiz;
pub mod status;
pub mod tokens;
pub mod upload;
pub mod user;
