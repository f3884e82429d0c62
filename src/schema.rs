//! Model configuration schema.
//!
//! A [`Model`] is a closed tagged union over the configuration records the
//! application knows how to describe: chat completion, embedding, text to
//! speech, reranking and speech to text. The tag is the [`ModelKind`], which
//! is the inner dispatch key of the factory registry. Keeping the set closed
//! means the kinds a factory can recognize are statically enumerable rather
//! than discovered through runtime type inspection.

use serde::{Deserialize, Serialize};

/// The `ModelKind` uniquely tags each model configuration variant. It is used
/// to differentiate model configurations at runtime in code which is generic
/// over different kinds of models.
///
/// The `to_string` and `FromStr` forms appear in config files and error
/// messages and should remain stable.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub(crate) enum ModelKind {
    Chat,
    Embedding,
    Tts,
    Rerank,
    Stt,
}

/// Configuration for a chat completion model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChatModel {
    pub name: String,
    pub provider: String,
    pub max_output: u64,
    pub context_size: u64,
    /// Cost in dollars per prompt token.
    pub cost_prompt_token: f64,
    /// Cost in dollars per completion token.
    pub cost_completion_token: f64,
    #[serde(default)]
    pub stop: Option<String>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub frequency_penalty: f64,
    #[serde(default)]
    pub presence_penalty: f64,
}

/// Configuration for an embedding model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EmbeddingModel {
    pub name: String,
    pub provider: String,
    pub context_size: u64,
    /// Cost in dollars per input token.
    pub cost_token: f64,
    pub dimension: u64,
    /// The distance metric the embedding space was trained for.
    pub metric: String,
}

/// The voices a text-to-speech model can synthesize with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub(crate) enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

/// Configuration for a text-to-speech model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TtsModel {
    pub name: String,
    pub provider: String,
    /// Cost in dollars per synthesized character.
    pub cost_char: f64,
    pub voice: Voice,
}

/// Configuration for a reranking model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RerankModel {
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub cost_search: f64,
    #[serde(default)]
    pub cost_token: f64,
}

/// Configuration for a speech-to-text model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SttModel {
    pub name: String,
    pub provider: String,
    /// Cost in dollars per transcribed character.
    pub cost_char: f64,
}

/// A model configuration of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum Model {
    Chat(ChatModel),
    Embedding(EmbeddingModel),
    Tts(TtsModel),
    Rerank(RerankModel),
    Stt(SttModel),
}

impl Model {
    pub(crate) fn kind(&self) -> ModelKind {
        match self {
            Model::Chat(_) => ModelKind::Chat,
            Model::Embedding(_) => ModelKind::Embedding,
            Model::Tts(_) => ModelKind::Tts,
            Model::Rerank(_) => ModelKind::Rerank,
            Model::Stt(_) => ModelKind::Stt,
        }
    }

    pub(crate) fn name(&self) -> &str {
        match self {
            Model::Chat(m) => &m.name,
            Model::Embedding(m) => &m.name,
            Model::Tts(m) => &m.name,
            Model::Rerank(m) => &m.name,
            Model::Stt(m) => &m.name,
        }
    }

    pub(crate) fn provider(&self) -> &str {
        match self {
            Model::Chat(m) => &m.provider,
            Model::Embedding(m) => &m.provider,
            Model::Tts(m) => &m.provider,
            Model::Rerank(m) => &m.provider,
            Model::Stt(m) => &m.provider,
        }
    }

    /// The context window of the model, if the kind has one.
    pub(crate) fn context_size(&self) -> Option<u64> {
        match self {
            Model::Chat(m) => Some(m.context_size),
            Model::Embedding(m) => Some(m.context_size),
            Model::Tts(_) | Model::Rerank(_) | Model::Stt(_) => None,
        }
    }
}

/// The model catalog, grouped by kind. Embedded in the application config.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Catalog {
    #[serde(default)]
    pub chat: Vec<ChatModel>,
    #[serde(default)]
    pub embedding: Vec<EmbeddingModel>,
    #[serde(default)]
    pub tts: Vec<TtsModel>,
    #[serde(default)]
    pub rerank: Vec<RerankModel>,
    #[serde(default)]
    pub stt: Vec<SttModel>,
}

impl Catalog {
    /// All catalog entries, in kind order.
    pub(crate) fn models(&self) -> Vec<Model> {
        let mut models = Vec::new();

        models.extend(self.chat.iter().cloned().map(Model::Chat));
        models.extend(self.embedding.iter().cloned().map(Model::Embedding));
        models.extend(self.tts.iter().cloned().map(Model::Tts));
        models.extend(self.rerank.iter().cloned().map(Model::Rerank));
        models.extend(self.stt.iter().cloned().map(Model::Stt));

        models
    }

    /// Look up a catalog entry by model name. If two entries share a name,
    /// the one whose kind sorts first in kind order wins.
    pub(crate) fn find(&self, name: &str) -> Option<Model> {
        self.models().into_iter().find(|m| m.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const CATALOG: &'static str = r#"
[[chat]]
name = "gpt-4"
provider = "openai"
max_output = 4096
context_size = 8192
cost_prompt_token = 3e-5
cost_completion_token = 6e-5

[[embedding]]
name = "text-embedding-3-small"
provider = "openai"
context_size = 8191
cost_token = 2e-8
dimension = 1536
metric = "cosine"

[[tts]]
name = "tts-1"
provider = "openai"
cost_char = 1.5e-5
voice = "alloy"
"#;

    fn catalog() -> Catalog {
        toml::de::from_str(CATALOG).expect("catalog fixture failed to parse")
    }

    #[test]
    fn parses_catalog_with_defaults() {
        let catalog = catalog();

        assert_eq!(catalog.chat.len(), 1);
        assert_eq!(catalog.embedding.len(), 1);
        assert_eq!(catalog.tts.len(), 1);
        assert!(catalog.rerank.is_empty());
        assert!(catalog.stt.is_empty());

        let chat = &catalog.chat[0];
        assert_eq!(chat.name, "gpt-4");
        assert_eq!(chat.temperature, 0.0);
        assert!(chat.stop.is_none());
    }

    #[test]
    fn finds_models_by_name() {
        let catalog = catalog();

        let model = catalog.find("text-embedding-3-small").unwrap();
        assert_eq!(model.kind(), ModelKind::Embedding);
        assert_eq!(model.provider(), "openai");
        assert_eq!(model.context_size(), Some(8191));

        assert!(catalog.find("no-such-model").is_none());

        let tts = catalog.find("tts-1").unwrap();
        assert_eq!(tts.context_size(), None);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(ModelKind::Chat.to_string(), "chat");
        assert_eq!(ModelKind::Embedding.to_string(), "embedding");
        assert_eq!(ModelKind::from_str("tts").unwrap(), ModelKind::Tts);
        assert!(ModelKind::from_str("video").is_err());
    }
}
