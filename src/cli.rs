use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    log_warn,
    scan::{commands, ScanView},
    views, AppState,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Parser)]
#[command(name = "letsdog", version, about = "Identify a dog's breed from a photo and recall past scans")]
pub struct Cli {
    /// Directory holding settings and stored scans.
    #[arg(long, env = "LETSDOG_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one photo and store the result.
    Scan { file: PathBuf },
    /// Show a stored scan by its identifier.
    Recall { id: String },
    /// List stored scans, newest first.
    History,
    /// Update settings.json.
    Config {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        temperature: Option<f64>,
    },
}

pub async fn execute(command: Command, state: &AppState) -> Result<ExitCode> {
    match command {
        Command::Scan { file } => Ok(match commands::scan_image(state, &file).await {
            Ok(scan) => {
                println!("{}", views::result::render(&scan));
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        }),
        Command::Recall { id } => Ok(match commands::recall_scan(state, &id).await {
            Ok(scan) => {
                println!("{}", views::result::render(&scan));
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        }),
        Command::History => {
            print_history(state).await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config {
            api_key,
            model,
            endpoint,
            temperature,
        } => {
            let mut settings = state.settings.current();
            if api_key.is_some() {
                settings.api_key = api_key;
            }
            if let Some(model) = model {
                settings.model = model;
            }
            if let Some(endpoint) = endpoint {
                settings.endpoint = endpoint;
            }
            if let Some(temperature) = temperature {
                settings.temperature = temperature;
            }
            state.settings.update(settings)?;
            println!("Settings saved to {}", state.settings.path().display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn print_history(state: &AppState) {
    match commands::list_scans(state).await {
        Ok(scans) if scans.is_empty() => println!("No stored scans."),
        Ok(scans) => {
            for scan in scans {
                let when = scan
                    .created_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "#{}  {:<16}  {:<28} {}%",
                    scan.id, when, scan.analysis.breed_label, scan.analysis.certainty
                );
            }
        }
        Err(message) => eprintln!("{message}"),
    }
}

/// One line of interactive input, interpreted against the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Scan(PathBuf),
    OpenRecall,
    RecallId(String),
    Cancel,
    Close,
    Home,
    Dismiss,
    History,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_input(line: &str, view: ScanView) -> SessionInput {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match (word, view) {
        ("quit" | "exit", _) => SessionInput::Quit,
        ("home", _) => SessionInput::Home,
        ("recall", _) => SessionInput::OpenRecall,
        ("cancel", ScanView::Recall) => SessionInput::Cancel,
        // In the recall form every other line is an identifier, verbatim.
        (_, ScanView::Recall) => SessionInput::RecallId(line.to_string()),
        ("", _) => SessionInput::Empty,
        ("scan", _) if !rest.is_empty() => SessionInput::Scan(PathBuf::from(rest)),
        ("close", _) => SessionInput::Close,
        ("ok" | "dismiss", _) => SessionInput::Dismiss,
        ("history", _) => SessionInput::History,
        _ => SessionInput::Unknown(trimmed.to_string()),
    }
}

/// Interactive session. Views are re-rendered from the controller's update
/// channel, so a running scan never blocks input.
pub async fn interactive(state: &AppState) -> Result<ExitCode> {
    let controller = state.controller.clone();

    let mut updates = controller.subscribe();
    println!("{}", views::render(&updates.borrow_and_update()));
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = views::render(&updates.borrow_and_update());
            println!("{text}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let view = controller.snapshot().await.view;
        match parse_input(&line, view) {
            SessionInput::Quit => break,
            SessionInput::Empty => {}
            SessionInput::Scan(path) => {
                let controller = controller.clone();
                tokio::spawn(async move {
                    // Failures are already reflected in the rendered notice.
                    let _ = controller.scan_file(&path).await;
                });
            }
            SessionInput::OpenRecall => controller.open_recall().await,
            SessionInput::RecallId(id) => {
                // Not-found and storage failures are rendered by the view.
                if let Err(err) = controller.set_recall_input(id).await {
                    eprintln!("{err}");
                } else {
                    let _ = controller.submit_recall().await;
                }
            }
            SessionInput::Cancel => {
                if let Err(err) = controller.cancel_recall().await {
                    eprintln!("{err}");
                }
            }
            SessionInput::Close => {
                if let Err(err) = controller.close_result().await {
                    eprintln!("{err}");
                }
            }
            SessionInput::Home => controller.go_home().await,
            SessionInput::Dismiss => controller.dismiss_notice().await,
            SessionInput::History => print_history(state).await,
            SessionInput::Unknown(text) => {
                log_warn!("Unknown input '{}' in {} view", text, view);
                eprintln!("Unknown command: {text}");
            }
        }
    }

    renderer.abort();
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_outside_recall() {
        assert_eq!(
            parse_input("scan  photos/rex.jpg ", ScanView::Home),
            SessionInput::Scan(PathBuf::from("photos/rex.jpg"))
        );
        assert_eq!(parse_input("recall", ScanView::Result), SessionInput::OpenRecall);
        assert_eq!(parse_input("close", ScanView::Result), SessionInput::Close);
        assert_eq!(parse_input("   ", ScanView::Home), SessionInput::Empty);
        assert_eq!(
            parse_input("scan", ScanView::Home),
            SessionInput::Unknown("scan".into())
        );
    }

    #[test]
    fn recall_view_treats_lines_as_identifiers() {
        assert_eq!(
            parse_input(" 123 ", ScanView::Recall),
            SessionInput::RecallId(" 123 ".into())
        );
        assert_eq!(parse_input("cancel", ScanView::Recall), SessionInput::Cancel);
        assert_eq!(parse_input("quit", ScanView::Recall), SessionInput::Quit);
        assert_eq!(parse_input("", ScanView::Recall), SessionInput::RecallId("".into()));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["letsdog", "--data-dir", "/tmp/x", "recall", "042"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Command::Recall { id }) if id == "042"));

        let cli = Cli::try_parse_from(["letsdog"]).unwrap();
        assert!(cli.command.is_none());
    }
}
