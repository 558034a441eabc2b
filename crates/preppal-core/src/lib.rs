pub mod captions;
pub mod chunk;
pub mod codec;
pub mod generate;
pub mod intake;
pub mod json_repair;
pub mod llm;
pub mod llm_config;
pub mod pdf;
pub mod status;
