use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Embedding providers the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderType {
    OpenAi,
    HuggingFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiEmbedderConfig {
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model_name: String,
    #[serde(default)]
    pub organization: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_openai_timeout")]
    pub timeout: u32,
}

fn default_openai_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_openai_timeout() -> u32 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuggingFaceEmbedderConfig {
    #[serde(default = "default_huggingface_model")]
    pub model_name: String,
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default)]
    pub trust_remote_code: bool,
    #[serde(default)]
    pub cache_dir: Option<String>,
}

fn default_huggingface_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

impl Default for HuggingFaceEmbedderConfig {
    fn default() -> Self {
        Self {
            model_name: default_huggingface_model(),
            device: default_device(),
            trust_remote_code: false,
            cache_dir: None,
        }
    }
}

/// Embedder section of the system configuration.
///
/// Only the sub-section matching `kind` is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(rename = "type")]
    pub kind: EmbedderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiEmbedderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huggingface: Option<HuggingFaceEmbedderConfig>,
}

impl Default for EmbedderConfig {
    /// A local HuggingFace embedder, which needs no credentials.
    fn default() -> Self {
        Self {
            kind: EmbedderType::HuggingFace,
            openai: None,
            huggingface: Some(HuggingFaceEmbedderConfig::default()),
        }
    }
}

impl EmbedderConfig {
    /// Model name of the active provider, if its section is present.
    pub fn model_name(&self) -> Option<&str> {
        match self.kind {
            EmbedderType::OpenAi => self.openai.as_ref().map(|c| c.model_name.as_str()),
            EmbedderType::HuggingFace => self.huggingface.as_ref().map(|c| c.model_name.as_str()),
        }
    }
}

/// Vector stores the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorDbType {
    Pinecone,
    ChromaDb,
    Qdrant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PineconeDbConfig {
    pub api_key: String,
    pub environment: String,
    pub index_name: String,
    #[serde(default = "default_dimension")]
    pub dimension: u32,
    #[serde(default = "default_metric")]
    pub metric: String,
}

fn default_dimension() -> u32 {
    384
}

fn default_metric() -> String {
    "cosine".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaDbConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_chroma_port")]
    pub port: u16,
    #[serde(default = "default_collection")]
    pub collection_name: String,
    #[serde(default)]
    pub persist_directory: Option<String>,
}

impl Default for ChromaDbConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_chroma_port(),
            collection_name: default_collection(),
            persist_directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QdrantDbConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_qdrant_port")]
    pub port: u16,
    #[serde(default = "default_collection")]
    pub collection_name: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub https: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_chroma_port() -> u16 {
    8000
}

fn default_qdrant_port() -> u16 {
    6333
}

fn default_collection() -> String {
    "documents".to_string()
}

/// Vector database section of the system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDbConfig {
    #[serde(rename = "type")]
    pub kind: VectorDbType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinecone: Option<PineconeDbConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromadb: Option<ChromaDbConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qdrant: Option<QdrantDbConfig>,
}

impl Default for VectorDbConfig {
    /// A local ChromaDB instance.
    fn default() -> Self {
        Self {
            kind: VectorDbType::ChromaDb,
            pinecone: None,
            chromadb: Some(ChromaDbConfig::default()),
            qdrant: None,
        }
    }
}

impl VectorDbConfig {
    /// Collection (or index) name of the active store, if its section is present.
    pub fn collection_name(&self) -> Option<&str> {
        match self.kind {
            VectorDbType::Pinecone => self.pinecone.as_ref().map(|c| c.index_name.as_str()),
            VectorDbType::ChromaDb => self.chromadb.as_ref().map(|c| c.collection_name.as_str()),
            VectorDbType::Qdrant => self.qdrant.as_ref().map(|c| c.collection_name.as_str()),
        }
    }
}

/// System configuration as served by `GET /config/`.
///
/// Either section may be missing; panels fall back to their own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub embedder: Option<EmbedderConfig>,
    #[serde(default)]
    pub vector_db: Option<VectorDbConfig>,
    /// Max upload size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: u32,
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_chunk_size() -> u32 {
    1000
}

fn default_chunk_overlap() -> u32 {
    200
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            embedder: None,
            vector_db: None,
            max_file_size: default_max_file_size(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// Response of `GET /config/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CurrentConfig {
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub config: Option<AppConfig>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CurrentConfig {
    /// The configuration, if the backend reported one.
    pub fn into_config(self) -> Option<AppConfig> {
        if self.configured { self.config } else { None }
    }
}

/// Acknowledgement returned by configuration updates.
///
/// The backend attaches provider details (`embedder_info`, `stats`) that the
/// shell only displays, so they stay untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub embedder_info: Option<Value>,
    #[serde(default, alias = "vector_db_stats")]
    pub stats: Option<Value>,
}
