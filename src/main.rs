//! gdrive_download CLI - Download a shared Google Drive file.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gdrive_download::config::DOWNLOAD_URL;
use gdrive_download::{
    extract_id, ArchiveStatus, DownloadError, DownloadOutcome, DownloadRequest, Downloader,
    DownloaderConfig, ErrorPolicy,
};

/// Download a publicly shared file from Google Drive.
#[derive(Parser)]
#[command(name = "gdrive_download")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File share link or ID.
    file: String,

    /// Destination path. Defaults to the name sent by the server, in the current directory.
    dest: Option<PathBuf>,

    /// Download again even if the destination already exists.
    #[arg(long)]
    overwrite: bool,

    /// Extract the file into the destination directory if it is a zip archive.
    #[arg(long)]
    unzip: bool,

    /// Print the downloaded size while transferring.
    #[arg(long)]
    show_size: bool,

    /// Fail on remote errors and invalid archives instead of warning.
    #[arg(long, env = "GDRIVE_DOWNLOAD_STRICT")]
    strict: bool,

    /// Export endpoint to download from.
    #[arg(long, env = "GDRIVE_DOWNLOAD_ENDPOINT", default_value = DOWNLOAD_URL, hide = true)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            if let Some(cancelled @ DownloadError::Cancelled { .. }) =
                e.downcast_ref::<DownloadError>()
            {
                eprintln!("{}", cancelled);
                return ExitCode::from(130);
            }
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_id =
        extract_id(&cli.file).with_context(|| format!("Invalid file URL or ID: {}", cli.file))?;

    let config = DownloaderConfig {
        endpoint: cli.endpoint,
        policy: ErrorPolicy::from_strict(cli.strict),
        ..DownloaderConfig::default()
    };
    let downloader = Downloader::new(config).context("Failed to create HTTP client")?;

    let mut request = DownloadRequest::new(&file_id)
        .overwrite(cli.overwrite)
        .unzip(cli.unzip)
        .show_progress(cli.show_size);
    request.dest_path = cli.dest;

    print!("Downloading {}... ", file_id);
    if cli.show_size {
        println!();
    }
    std::io::stdout().flush()?;

    let outcome = downloader.download_with_cancel(&request, ctrl_c()).await?;

    match outcome {
        DownloadOutcome::Completed {
            path,
            bytes,
            archive,
        } => {
            println!("Done.");
            println!("Saved {} to: {:?}", gdrive_download::format_size(bytes), path);
            if let ArchiveStatus::Extracted { entries } = archive {
                println!("Unzipped {} entries.", entries);
            }
        }
        DownloadOutcome::RemoteRejected { status, reason } => {
            println!("FAILED ({} {})", status, reason);
        }
    }

    Ok(())
}

async fn ctrl_c() {
    // Without a signal handler there is nothing to wait for
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
