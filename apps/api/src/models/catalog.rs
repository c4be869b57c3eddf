use serde::Serialize;

/// A hosted model the user can pick for an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Models offered by the selector, in display order. The first entry is the default.
pub const AI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "anthropic/claude-2",
        display_name: "Claude 2 (Anthropic)",
        description: "Advanced AI with strong reasoning capabilities",
    },
    ModelInfo {
        id: "openai/gpt-3.5-turbo",
        display_name: "GPT-3.5 Turbo (OpenAI)",
        description: "Balanced performance and cost",
    },
    ModelInfo {
        id: "google/palm-2",
        display_name: "PaLM 2 (Google)",
        description: "Versatile language model",
    },
    ModelInfo {
        id: "mistralai/mistral-small-3.2-24b-instruct:free",
        display_name: "Mistral Small 3.2 24b instruct (Mistral/Free)",
        description: "Versatile language model",
    },
    ModelInfo {
        id: "qwen/qwen2.5-vl-72b-instruct:free",
        display_name: "Qwen 2.5 VL 72b instruct (Qwen/Free)",
        description: "Versatile language model",
    },
];

pub fn default_model() -> &'static ModelInfo {
    &AI_MODELS[0]
}

/// Looks up a catalog entry by its OpenRouter id.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    AI_MODELS.iter().find(|m| m.id == id)
}
