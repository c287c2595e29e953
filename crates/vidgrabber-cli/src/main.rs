use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use vidgrabber_core::{
    ClientConfig, ControlState, CopyLinkButton, CopyOutcome, FileStorage, FormatList, HttpClient,
    MessageKind, ProtocolVariant, ResultsRenderer, ResultsView, StatusMessage,
    SubmissionController, SubmitOutcome, SubmitView, SystemClipboard,
};

mod logging;

/// CLI wrapper for ProtocolVariant (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliVariant {
    TwoStep,
    DirectDownload,
}

impl From<CliVariant> for ProtocolVariant {
    fn from(cli: CliVariant) -> Self {
        match cli {
            CliVariant::TwoStep => ProtocolVariant::TwoStep,
            CliVariant::DirectDownload => ProtocolVariant::DirectDownload,
        }
    }
}

#[derive(Parser)]
#[command(name = "vidgrabber")]
#[command(about = "Send video URLs to a VidGrabber backend and list the formats it finds")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Backend contract (overrides the config file)
    #[arg(long, global = true, value_enum)]
    variant: Option<CliVariant>,

    /// Config file (default: <config dir>/vidgrabber/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a video URL
    Submit {
        /// Video page URL
        url: String,
    },
    /// Show the formats cached by the last successful submission
    Results,
    /// Copy the URL of a listed format to the clipboard
    Copy {
        /// 1-based position in the `results` listing
        index: usize,
    },
}

/// Prints status messages; the "button" only exists in the log
struct TerminalView;

impl SubmitView for TerminalView {
    fn set_control(&mut self, state: &ControlState) {
        tracing::debug!("submit control: enabled={} label={:?}", state.enabled, state.label);
    }

    fn show_message(&mut self, message: &StatusMessage) {
        match message.kind {
            MessageKind::Error => eprintln!("{}", message.text),
            MessageKind::Info | MessageKind::Success => println!("{}", message.text),
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::load_or_default()?,
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(variant) = cli.variant {
        config.variant = variant.into();
    }
    Ok(config)
}

async fn run_submit(config: &ClientConfig, url: &str) -> Result<bool> {
    let controller = SubmissionController::new(
        HttpClient::with_config(config)?,
        FileStorage::default_location(),
        config.variant,
    );

    let outcome = controller.submit(url, &mut TerminalView).await;
    match outcome {
        SubmitOutcome::Navigate { .. } => {
            print!("{}", ResultsRenderer::new().render_cached(controller.storage()));
            Ok(true)
        }
        SubmitOutcome::DownloadStarted { saved_to, .. } => {
            if let Some(path) = saved_to {
                println!("Saved to {}", path.display());
            }
            Ok(true)
        }
        SubmitOutcome::Rejected { .. } | SubmitOutcome::Failed { .. } => Ok(false),
    }
}

fn run_results() -> bool {
    let view = ResultsRenderer::new().render_cached(&FileStorage::default_location());
    print!("{}", view);
    matches!(view, ResultsView::Video(_))
}

fn run_copy(index: usize) -> Result<bool> {
    let view = ResultsRenderer::new().render_cached(&FileStorage::default_location());
    let items = match &view {
        ResultsView::Video(video) => match &video.formats {
            FormatList::Items(items) => items,
            FormatList::Empty => bail!("no formats to copy"),
        },
        other => bail!("{}", other.notice().unwrap_or_default()),
    };

    let Some(item) = index.checked_sub(1).and_then(|i| items.get(i)) else {
        bail!("no format #{} (have {})", index, items.len());
    };
    if item.url.is_empty() {
        bail!("format #{} has no link", index);
    }

    let mut button = CopyLinkButton::new();
    match button.press(&mut SystemClipboard, &item.url) {
        CopyOutcome::Copied => {
            println!("{} {}", button.label(), item.url);
            Ok(true)
        }
        CopyOutcome::Failed { alert } => {
            eprintln!("{}", alert);
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Submit { url } => match load_config(&cli) {
            Ok(config) => run_submit(&config, url).await,
            Err(e) => Err(e),
        },
        Command::Results => Ok(run_results()),
        Command::Copy { index } => run_copy(*index),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("vidgrabber error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
