use std::sync::Arc;

use super::registry::FactoryRegistry;
use crate::schema::{ChatModel, EmbeddingModel, Model, ModelKind};

/// The category the cost estimators are wired under.
pub(crate) const ESTIMATE_CATEGORY: &'static str = "estimate";

/// A constructed cost estimator for one catalog model.
pub(crate) trait CostEstimator {
    fn model_name(&self) -> &str;

    fn provider(&self) -> &str;

    /// Estimated cost in dollars for a request of the given size. Kinds
    /// without a completion phase ignore `completion_tokens`.
    fn estimate(&self, prompt_tokens: u64, completion_tokens: u64) -> f64;
}

struct ChatEstimator {
    model: ChatModel,
}

impl CostEstimator for ChatEstimator {
    fn model_name(&self) -> &str {
        &self.model.name
    }

    fn provider(&self) -> &str {
        &self.model.provider
    }

    fn estimate(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens as f64 * self.model.cost_prompt_token
            + completion_tokens as f64 * self.model.cost_completion_token
    }
}

struct EmbeddingEstimator {
    model: EmbeddingModel,
}

impl CostEstimator for EmbeddingEstimator {
    fn model_name(&self) -> &str {
        &self.model.name
    }

    fn provider(&self) -> &str {
        &self.model.provider
    }

    fn estimate(&self, prompt_tokens: u64, _completion_tokens: u64) -> f64 {
        prompt_tokens as f64 * self.model.cost_token
    }
}

/// Populate a registry with the estimator constructors.
///
/// The estimators accept the build flags, as every constructor must, but
/// have no behavior behind them: estimation is always synchronous and
/// persists nothing.
pub(crate) fn populated_registry() -> FactoryRegistry<Box<dyn CostEstimator>> {
    let registry = FactoryRegistry::new();

    registry.register(
        ESTIMATE_CATEGORY,
        ModelKind::Chat,
        Arc::new(|model, _flags| {
            let Model::Chat(model) = model else {
                unreachable!("constructor registered under the chat kind");
            };

            Box::new(ChatEstimator { model }) as Box<dyn CostEstimator>
        }),
    );

    registry.register(
        ESTIMATE_CATEGORY,
        ModelKind::Embedding,
        Arc::new(|model, _flags| {
            let Model::Embedding(model) = model else {
                unreachable!("constructor registered under the embedding kind");
            };

            Box::new(EmbeddingEstimator { model }) as Box<dyn CostEstimator>
        }),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{build, BuildFlags, CONSTRUCTIBLE_KINDS};

    fn chat_model() -> Model {
        Model::Chat(ChatModel {
            name: "gpt-4".to_string(),
            provider: "openai".to_string(),
            max_output: 4096,
            context_size: 8192,
            cost_prompt_token: 3e-5,
            cost_completion_token: 6e-5,
            stop: None,
            temperature: 0.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        })
    }

    fn embedding_model() -> Model {
        Model::Embedding(EmbeddingModel {
            name: "text-embedding-3-small".to_string(),
            provider: "openai".to_string(),
            context_size: 8191,
            cost_token: 2e-8,
            dimension: 1536,
            metric: "cosine".to_string(),
        })
    }

    #[test]
    fn every_constructible_kind_is_wired() {
        let registry = populated_registry();
        let registered = registry.registered(ESTIMATE_CATEGORY);

        for kind in CONSTRUCTIBLE_KINDS {
            assert!(registered.contains(&kind), "{} is not wired", kind);
        }
    }

    #[test]
    fn chat_estimates_cover_both_phases() {
        let registry = populated_registry();

        let estimator = build(
            &registry,
            chat_model(),
            ESTIMATE_CATEGORY,
            BuildFlags::default(),
        )
        .unwrap();

        assert_eq!(estimator.model_name(), "gpt-4");
        assert_eq!(estimator.provider(), "openai");

        let cost = estimator.estimate(1000, 500);
        assert!((cost - (1000.0 * 3e-5 + 500.0 * 6e-5)).abs() < 1e-12);
    }

    #[test]
    fn embedding_estimates_ignore_completion_tokens() {
        let registry = populated_registry();

        let estimator = build(
            &registry,
            embedding_model(),
            ESTIMATE_CATEGORY,
            BuildFlags::default(),
        )
        .unwrap();

        let cost = estimator.estimate(10_000, 500);
        assert!((cost - 10_000.0 * 2e-8).abs() < 1e-12);
    }
}
