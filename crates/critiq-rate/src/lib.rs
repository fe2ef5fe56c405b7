pub mod engine;
pub mod parse;
pub mod prompt;
mod rubric;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use critiq_core::{AiSettings, UseCase};

/// Token budget for the tiny connectivity check.
pub const CHECK_MAX_TOKENS: u32 = 50;
/// Token budget for a full prompt review.
pub const REVIEW_MAX_TOKENS: u32 = 300;

/// Outcome of interpreting the model's reply. `rating` is None when the reply
/// carried no usable `RATING:` marker; `commentary` then holds the full reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: Option<u8>,
    pub commentary: String,
}

impl Review {
    pub fn band(&self) -> Option<Band> {
        self.rating.map(Band::of)
    }
}

/// Advisory tone classification derived from the numeric rating. UI only —
/// it never alters the review data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    Excellent,
    GoodWithGaps,
    NeedsWork,
}

impl Band {
    /// Defined for valid ratings only; the parser guarantees 1-5.
    pub fn of(rating: u8) -> Band {
        match rating {
            r if r >= 4 => Band::Excellent,
            3 => Band::GoodWithGaps,
            _ => Band::NeedsWork,
        }
    }
}

#[derive(Debug, Error)]
pub enum RateError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("failed to build LLM client: {0}")]
    Build(String),
    #[error("chat request failed: {0}")]
    Transport(String),
    #[error("model returned an empty reply")]
    EmptyReply,
}

/// Review a user prompt via the configured model: assemble the evaluation
/// request, make one chat call, parse the star rating out of the reply.
pub async fn review_prompt(
    user_prompt: &str,
    use_case: UseCase,
    settings: &AiSettings,
) -> Result<Review, RateError> {
    let request = prompt::evaluation_request(user_prompt, use_case);

    eprintln!(
        "[critiq-rate] sending to {} ({})",
        settings.provider, settings.model
    );

    let raw = engine::generate(settings, &request, REVIEW_MAX_TOKENS).await?;
    Ok(parse::parse_review(&raw))
}

/// Tiny round-trip to confirm the provider, model, and key are usable.
pub async fn check_connection(settings: &AiSettings) -> Result<String, RateError> {
    engine::generate(settings, "Say hello in exactly 5 words", CHECK_MAX_TOKENS).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds() {
        assert_eq!(Band::of(5), Band::Excellent);
        assert_eq!(Band::of(4), Band::Excellent);
        assert_eq!(Band::of(3), Band::GoodWithGaps);
        assert_eq!(Band::of(2), Band::NeedsWork);
        assert_eq!(Band::of(1), Band::NeedsWork);
    }

    // The full cycle with a stubbed reply: request assembly on one side,
    // reply interpretation on the other. No network involved.
    #[test]
    fn request_and_stub_reply_round_trip() {
        let request = prompt::evaluation_request("write me a poem", UseCase::CreativeWriting);
        assert_eq!(request.matches("creative writing").count(), 2);
        assert_eq!(request.matches("write me a poem").count(), 1);

        let review = parse::parse_review("RATING: 3/5 stars\nKey improvements: add tone");
        assert_eq!(review.rating, Some(3));
        assert_eq!(review.band(), Some(Band::GoodWithGaps));
        assert_eq!(review.commentary, "Key improvements: add tone");
    }

    #[test]
    fn review_serializes_camel_case() {
        let review = Review {
            rating: Some(4),
            commentary: "solid".to_string(),
        };
        let json = serde_json::to_string(&review).unwrap();
        assert_eq!(json, r#"{"rating":4,"commentary":"solid"}"#);
        assert_eq!(
            serde_json::to_string(&Band::GoodWithGaps).unwrap(),
            r#""goodWithGaps""#
        );
    }
}
