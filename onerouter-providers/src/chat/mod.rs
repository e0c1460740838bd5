//! Chat completions endpoint

mod converter;
mod model;
mod parser;
mod prompt;
mod settings;
mod stream;

pub use converter::ChatConverter;
pub use model::ChatModel;
pub use parser::{
    ChatChoice, ChatChunk, ChatChunkChoice, ChatChunkData, ChatDelta, ChatFunctionCall,
    ChatFunctionDelta, ChatParser, ChatResponse, ChatResponseMessage, ChatToolCall,
    ChatToolCallDelta,
};
pub use prompt::convert_to_chat_messages;
pub use settings::ChatSettings;
pub use stream::{ChatChunkHandler, ChatStream};
