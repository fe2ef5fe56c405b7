use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use critiq_core::{AiSettings, UseCase};
use critiq_rate::{parse, Band, Review};

#[derive(Parser)]
#[command(
    name = "critiq",
    version,
    about = "Rate and improve AI prompts with an LLM reviewer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Review a prompt (reads stdin when no argument is given)
    Rate {
        /// The prompt to review
        prompt: Option<String>,
        /// Use case, e.g. general, creative-writing, code-generation
        #[arg(long, default_value = "general")]
        use_case: String,
        /// Emit the review as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Send a tiny request to confirm API connectivity
    Check,
    /// List the available use cases and their tips
    UseCases,
    /// Show or update the stored AI settings (~/.critiq/settings.json)
    Settings {
        /// Provider, e.g. anthropic, openai, ollama
        #[arg(long)]
        provider: Option<String>,
        /// Model identifier, e.g. claude-3-haiku-20240307
        #[arg(long)]
        model: Option<String>,
        /// API key to store (an empty value keeps the existing key)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Rate {
            prompt,
            use_case,
            json,
        } => rate(prompt, &use_case, json).await,
        Command::Check => check().await,
        Command::UseCases => {
            list_use_cases();
            ExitCode::SUCCESS
        }
        Command::Settings {
            provider,
            model,
            api_key,
        } => settings(provider, model, api_key),
    }
}

fn settings(provider: Option<String>, model: Option<String>, api_key: Option<String>) -> ExitCode {
    // Start from the file as stored, never from an env-injected key, so the
    // environment credential is not persisted as a side effect.
    let mut settings = critiq_core::stored_settings();
    let updating = provider.is_some() || model.is_some() || api_key.is_some();

    if let Some(p) = provider {
        settings.provider = p;
    }
    if let Some(m) = model {
        settings.model = m;
    }
    // Empty key means "keep existing"
    if let Some(k) = api_key {
        if !k.is_empty() {
            settings.api_key = k;
        }
    }

    if updating {
        if let Err(e) = critiq_core::write_settings(&settings) {
            eprintln!("error: failed to write settings: {e}");
            return ExitCode::FAILURE;
        }
    }

    // Mask the key — only report whether one is usable
    println!("provider: {}", settings.provider);
    println!("model: {}", settings.model);
    println!(
        "api key: {}",
        if settings.api_key.is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    println!(
        "configured: {}",
        critiq_core::ai_configured(&critiq_core::read_settings())
    );
    ExitCode::SUCCESS
}

async fn rate(prompt: Option<String>, use_case_key: &str, json: bool) -> ExitCode {
    let Some(use_case) = UseCase::from_key(use_case_key) else {
        eprintln!("error: unknown use case '{use_case_key}'");
        eprintln!("valid use cases: {}", valid_keys());
        return ExitCode::from(2);
    };

    let prompt = match prompt {
        Some(p) => p,
        None => {
            let mut buf = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
                eprintln!("error: failed to read prompt from stdin: {e}");
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    if prompt.trim().is_empty() {
        eprintln!("error: enter a prompt first");
        return ExitCode::from(2);
    }

    let Some(settings) = configured_settings() else {
        return ExitCode::from(2);
    };

    match critiq_rate::review_prompt(&prompt, use_case, &settings).await {
        Ok(review) => {
            render(&review, json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn check() -> ExitCode {
    let Some(settings) = configured_settings() else {
        return ExitCode::from(2);
    };

    match critiq_rate::check_connection(&settings).await {
        Ok(reply) => {
            println!("connected: {}", reply.trim());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: connection failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn list_use_cases() {
    for uc in UseCase::ALL {
        println!("{} — {}", uc.label(), uc.description());
        for tip in uc.tips() {
            println!("    - {tip}");
        }
    }
}

/// Load settings and refuse to proceed without usable credentials.
fn configured_settings() -> Option<AiSettings> {
    let settings = critiq_core::read_settings();
    if critiq_core::ai_configured(&settings) {
        return Some(settings);
    }
    eprintln!("error: no API credentials configured");
    if let Some(var) = critiq_core::api_key_env(&settings.provider) {
        eprintln!(
            "set {var} or add an apiKey to {}",
            critiq_core::config_dir().join("settings.json").display()
        );
    }
    None
}

fn render(review: &Review, json: bool) {
    if json {
        let value = serde_json::json!({
            "rating": review.rating,
            "band": review.band(),
            "commentary": review.commentary,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    match review.rating {
        Some(rating) => {
            println!("{} ({rating}/5 stars)", parse::stars(rating));
            println!("{}", advice(Band::of(rating)));
            if !review.commentary.is_empty() {
                println!();
                println!("{}", review.commentary);
            }
        }
        None => {
            eprintln!("warning: no rating found in the model's reply");
            println!("{}", review.commentary);
        }
    }
}

fn advice(band: Band) -> &'static str {
    match band {
        Band::Excellent => "Excellent prompt! Any suggestions are minor optimizations.",
        Band::GoodWithGaps => "Good foundation with clear improvement opportunities.",
        Band::NeedsWork => "This prompt needs significant improvements to work reliably.",
    }
}

fn valid_keys() -> String {
    UseCase::ALL
        .iter()
        .map(|uc| uc.label().to_lowercase().replace(' ', "-"))
        .collect::<Vec<_>>()
        .join(", ")
}
