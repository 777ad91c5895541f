//! Command execution: wires the engines together and prints results.

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use mentor_engine::{AnalysisEngine, ChatEngine, EngineError};
use mentor_gateway::{CompletionGateway, GatewayError, HuggingFaceClient};
use mentor_history::HistoryStack;
use mentor_models::{ChatSession, LanguageScope, Notification};
use mentor_notify::NotificationHub;

use crate::cli::{infer_language, Commands};

/// Errors surfaced to the CLI user.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// The path that failed.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The language could not be determined from the file extension.
    #[error("could not determine language for {0}; pass --language")]
    UnknownLanguage(String),

    /// Gateway configuration or health-check failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Engine validation failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Result serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Execute a parsed subcommand.
pub async fn execute(command: Commands) -> Result<()> {
    let gateway: Arc<dyn CompletionGateway> = Arc::new(HuggingFaceClient::from_env()?);
    let history = Arc::new(Mutex::new(HistoryStack::new()));
    let notifier = Arc::new(NotificationHub::new());
    let notifications = notifier.subscribe();

    let result = run(command, gateway, history, notifier).await;

    // Notifications are a side channel; surface them on stderr regardless
    // of how the command itself went.
    drain_notifications(&notifications);

    result
}

async fn run(
    command: Commands,
    gateway: Arc<dyn CompletionGateway>,
    history: Arc<Mutex<HistoryStack>>,
    notifier: Arc<NotificationHub>,
) -> Result<()> {
    match command {
        Commands::Analyze { file, language, json } => {
            let code = read_source(&file)?;
            let language = resolve_language(&file, language)?;
            let engine = AnalysisEngine::new(gateway, history, notifier);

            let result = engine.analyze(&code, &language).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_analysis(&result);
            }
        }

        Commands::Generate { description, language } => {
            let engine = ChatEngine::new(gateway, history, notifier);
            let code = engine.generate_code(&description, &language).await;
            println!("{code}");
        }

        Commands::Ask { message, code, language } => {
            let scope = match &code {
                Some(path) => {
                    let source = read_source(path)?;
                    let language = resolve_language(path, language)?;
                    history
                        .lock()
                        .expect("history lock poisoned")
                        .push(&source);
                    LanguageScope::Language(language)
                }
                None => LanguageScope::General,
            };

            let engine = ChatEngine::new(gateway, history, notifier);
            let mut session = ChatSession::with_scope(scope);

            let reply = engine.send_turn(&mut session, &message).await?;
            println!("{reply}");
        }

        Commands::Fix { file, issue, language } => {
            let code = read_source(&file)?;
            let language = resolve_language(&file, language)?;
            let engine = AnalysisEngine::new(gateway, history, notifier);

            let fixed = engine.fix(&code, &issue, &language).await;
            println!("{fixed}");
        }

        Commands::Enhance { file, language } => {
            let code = read_source(&file)?;
            let language = resolve_language(&file, language)?;
            let engine = AnalysisEngine::new(gateway, history, notifier);

            let enhanced = engine.enhance(&code, &language).await;
            println!("{enhanced}");
        }

        Commands::Health => {
            gateway.health_check().await?;
            println!("Inference endpoint is reachable.");
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CommandError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}

fn resolve_language(path: &Path, explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(language) => Ok(language),
        None => infer_language(path)
            .map(str::to_string)
            .ok_or_else(|| CommandError::UnknownLanguage(path.display().to_string())),
    }
}

fn print_analysis(result: &mentor_models::AnalysisResult) {
    println!("Syntax findings:");
    for finding in &result.syntax_errors {
        println!("  - {finding}");
    }
    println!("\nLogic findings:");
    for finding in &result.logical_errors {
        println!("  - {finding}");
    }
    println!("\nOptimized code:\n{}", result.optimized_code);
    println!("\nExplanation:\n{}", result.explanation);
    println!("\n(source: {})", result.source);
}

fn drain_notifications(notifications: &Receiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        eprintln!("[{}] {}", notification.severity, notification.message);
    }
}
