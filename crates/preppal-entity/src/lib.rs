pub mod access_tokens;
pub mod artifact;
pub mod token_usage;
pub mod upload;
pub mod user;
