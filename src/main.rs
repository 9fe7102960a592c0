use anyhow::{Result, bail};
use clap::Parser;
use pagescript::parse_file;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pagescript",
    about = "Validate pagescript script files without executing them",
    version
)]
struct Args {
    /// Script files to check
    #[arg(required = true)]
    scripts: Vec<PathBuf>,

    /// How many files to check concurrently
    #[arg(short, long, default_value_t = 4)]
    jobs: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));

    // One task per file; a bad script fails its own task and nothing else.
    let mut handles = Vec::new();
    for path in args.scripts {
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return false;
            };
            match parse_file(&path) {
                Ok(commands) => {
                    tracing::info!(
                        file = %path.display(),
                        commands = commands.len(),
                        "script ok"
                    );
                    true
                }
                Err(err) => {
                    tracing::error!(file = %path.display(), error = %format!("{err:#}"), "script invalid");
                    false
                }
            }
        }));
    }

    let mut failed = 0usize;
    for handle in handles {
        if !handle.await? {
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} script(s) failed validation");
    }
    Ok(())
}
