use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use critiq_core::AiSettings;

use crate::RateError;

fn map_backend(provider: &str) -> Result<LLMBackend, RateError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(RateError::UnknownProvider(other.to_string())),
    }
}

/// Send one message to the configured model and return the reply text.
/// One call, one typed result — no retries, no streaming, no backoff.
pub async fn generate(
    settings: &AiSettings,
    message: &str,
    max_tokens: u32,
) -> Result<String, RateError> {
    let backend = map_backend(&settings.provider)?;

    let mut builder = LLMBuilder::new()
        .backend(backend)
        .model(&settings.model)
        .max_tokens(max_tokens);

    if !settings.api_key.is_empty() {
        builder = builder.api_key(&settings.api_key);
    }

    let llm = builder.build().map_err(|e| RateError::Build(e.to_string()))?;

    let messages = vec![ChatMessage::user().content(message).build()];

    let response = llm
        .chat(&messages)
        .await
        .map_err(|e| RateError::Transport(e.to_string()))?;

    match response.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RateError::EmptyReply),
    }
}
