use serde::{Deserialize, Serialize};

/// Chat model providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    #[default]
    OpenAi,
    Gemini,
    Local,
}

/// Settings of the chat panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub provider: ChatProvider,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Number of retrieved chunks passed as context
    pub rag_top_k: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            provider: ChatProvider::OpenAi,
            model_name: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            rag_top_k: 5,
        }
    }
}

/// Settings of the prompts panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSettings {
    pub system_prompt: String,
    /// Template wrapping retrieved chunks; `{context}` and `{question}` are substituted
    pub context_template: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful assistant. Answer using the provided documents \
                            and say so when they do not contain the answer."
                .to_string(),
            context_template: "Context:\n{context}\n\nQuestion: {question}".to_string(),
        }
    }
}

impl PromptSettings {
    /// Whether the context template carries both placeholders.
    pub fn is_template_complete(&self) -> bool {
        self.context_template.contains("{context}") && self.context_template.contains("{question}")
    }
}
