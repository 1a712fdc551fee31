use clap::Parser;
use recycle_assist::domain::ports::ConfigProvider;
use recycle_assist::utils::{logger, validation::Validate};
use recycle_assist::{AssistError, AssistantEngine, ChatSession, CliConfig, KeywordSelector};
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Assistant failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<(), AssistError> {
    // Errors before this point are only reported on stderr by main.
    let config = cli.resolve()?;

    if config.json_logs() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);
    config.validate()?;

    let catalog = Arc::new(config.load_catalog()?);
    tracing::info!(
        "✅ Catalog ready: {} categories, {} providers",
        catalog.len(),
        catalog.providers().len()
    );

    let session = ChatSession::new(KeywordSelector::new(catalog), config.welcome_message());
    let mut stdout = tokio::io::stdout();

    let session = match &cli.message {
        Some(message) => {
            // One-shot mode answers immediately.
            let mut engine = AssistantEngine::new(session, config.assistant_name());
            if !engine.exchange(message, &mut stdout).await? {
                tracing::warn!("Message was blank, nothing to answer");
            }
            engine.into_session()
        }
        None => {
            let mut engine = AssistantEngine::new(session, config.assistant_name())
                .with_thinking_delay(config.thinking_delay());
            let stdin = BufReader::new(tokio::io::stdin());
            engine.run(stdin, &mut stdout).await?;
            engine.into_session()
        }
    };
    stdout.flush().await?;

    if let Some(path) = &cli.transcript {
        tokio::fs::write(path, session.transcript_json()?).await?;
        tracing::info!("📁 Transcript saved to: {}", path);
    }

    Ok(())
}
