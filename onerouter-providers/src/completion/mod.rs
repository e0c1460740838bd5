//! Text completion endpoint

mod converter;
mod model;
mod parser;
mod prompt;
mod settings;
mod stream;

pub use converter::CompletionConverter;
pub use model::CompletionModel;
pub use parser::{
    CompletionChoice, CompletionChunk, CompletionChunkChoice, CompletionChunkData,
    CompletionParser, CompletionResponse,
};
pub use prompt::{convert_to_completion_prompt, CompletionPrompt};
pub use settings::CompletionSettings;
pub use stream::{CompletionChunkHandler, CompletionStream};
