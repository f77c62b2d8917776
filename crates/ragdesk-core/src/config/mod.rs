//! Backend configuration models.
//!
//! - `model`: System configuration served by the backend (`AppConfig` and its sections)
//! - `settings`: Settings owned locally by the chat and prompts panels

mod model;
mod settings;

pub use model::{
    AppConfig, ChromaDbConfig, CurrentConfig, EmbedderConfig, EmbedderType,
    HuggingFaceEmbedderConfig, OpenAiEmbedderConfig, PineconeDbConfig, QdrantDbConfig,
    UpdateAck, VectorDbConfig, VectorDbType,
};
pub use settings::{ChatProvider, ChatSettings, PromptSettings};
