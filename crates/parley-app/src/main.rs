//! parley: a terminal conversation bridging Dialogflow (understanding) and
//! Voiceflow (dialogue).

mod cli;
mod console;
mod conversation;

use std::process::ExitCode;

use parley_bridge::{
    DialogflowClient, DialogflowConfig, DialogueBridge, IntentResolver, VoiceflowClient,
    VoiceflowConfig,
};
use parley_config::Secrets;
use tracing_subscriber::EnvFilter;

use crate::console::StdConsole;
use crate::conversation::ConversationLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "parley=warn";

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    parley_config::load_dotenv();

    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("parley v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("parley: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with the conversation.
fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("parley: ignoring invalid --log-level {directive:?}: {e}");
            EnvFilter::new(DEFAULT_LOG_DIRECTIVE)
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &cli::Args) -> parley_common::Result<()> {
    let config = parley_config::load_config(args.config.as_deref())?;
    let secrets = Secrets::from_env()?;
    tracing::debug!(?config, ?secrets, "Configuration loaded");

    let nlu = DialogflowClient::new(DialogflowConfig::from_settings(
        &config.nlu,
        secrets.credentials,
    ))?;
    let dialogue = VoiceflowClient::new(VoiceflowConfig::from_settings(
        &config.dialogue,
        secrets.api_key,
    ))?;

    let project_id = nlu.project_id().to_string();
    let resolver = IntentResolver::new(Box::new(nlu), project_id);
    let bridge = DialogueBridge::new(Box::new(dialogue));

    let mut conversation = ConversationLoop::new(resolver, bridge, StdConsole::new())
        .with_texts(config.conversation)
        .with_language_code(config.nlu.language_code);

    let session = conversation.run().await?;
    tracing::info!(session = %session, "Conversation finished");
    Ok(())
}
