use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use voucher_sweep::application::checker::VoucherChecker;
use voucher_sweep::application::runner::{RunExit, SweepRunner};
use voucher_sweep::config::{
    Config, DEFAULT_ENDPOINT, DEFAULT_ORIGIN, DEFAULT_TENANT_ID, DelayWindow, RetryPolicy,
    SiteProfile, USER_AGENT,
};
use voucher_sweep::domain::credentials::Credentials;
use voucher_sweep::domain::ports::{ValidLogBox, VoucherApiBox};
use voucher_sweep::infrastructure::http::HttpVoucherApi;
use voucher_sweep::interfaces::text::valid_log::FileValidLog;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cookie store exported from a logged-in browser session (JSON)
    #[arg(long, default_value = "cookies.json")]
    cookies: PathBuf,

    /// Candidate codes, one per line; re-read every cycle
    #[arg(long, default_value = "coupons.txt")]
    coupons: PathBuf,

    /// File that valid codes are appended to
    #[arg(long, default_value = "coupanlelo.txt")]
    output: PathBuf,

    /// Apply-voucher endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Origin sent with every request; the referer is derived from it
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    #[arg(long, default_value = DEFAULT_TENANT_ID)]
    tenant_id: String,

    /// Minimum pause after each code, in seconds
    #[arg(long, default_value_t = 12)]
    delay_min: u64,

    /// Maximum pause after each code, in seconds
    #[arg(long, default_value_t = 12)]
    delay_max: u64,

    /// Minimum backoff after a failed attempt, in seconds
    #[arg(long, default_value_t = 10)]
    backoff_min: u64,

    /// Maximum backoff after a failed attempt, in seconds
    #[arg(long, default_value_t = 20)]
    backoff_max: u64,

    /// Pause between cycles, in seconds
    #[arg(long, default_value_t = 60)]
    cycle_pause: u64,

    /// Request timeout, in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Attempts per code before it is counted as an error
    #[arg(long, default_value_t = 2)]
    attempts: u32,

    /// Stop after this many cycles (runs forever if omitted)
    #[arg(long)]
    cycles: Option<u64>,
}

impl Cli {
    fn into_config(self) -> voucher_sweep::error::Result<Config> {
        Ok(Config {
            cookies_path: self.cookies,
            coupons_path: self.coupons,
            output_path: self.output,
            endpoint: self.endpoint,
            site: SiteProfile {
                origin: self.origin,
                tenant_id: self.tenant_id,
                user_agent: USER_AGENT.to_string(),
            },
            request_timeout: Duration::from_secs(self.timeout),
            retry: RetryPolicy::new(
                self.attempts,
                DelayWindow::new(self.backoff_min, self.backoff_max)?,
            )?,
            code_delay: DelayWindow::new(self.delay_min, self.delay_max)?,
            cycle_pause: Duration::from_secs(self.cycle_pause),
            max_cycles: self.cycles,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let config = Cli::parse().into_config().into_diagnostic()?;

    info!("Loading cookies from {}", config.cookies_path.display());
    let credentials = Credentials::load(&config.cookies_path).into_diagnostic()?;

    let api: VoucherApiBox = Box::new(
        HttpVoucherApi::new(&config, &credentials.cookie_header()).into_diagnostic()?,
    );
    let log: ValidLogBox = Box::new(FileValidLog::new(&config.output_path));
    let runner = SweepRunner::new(&config, VoucherChecker::new(api, log, config.retry));
    info!("Ready, {} cookies loaded", credentials.cookies().len());

    tokio::select! {
        exit = runner.run() => match exit.into_diagnostic()? {
            RunExit::Blocked => warn!("Blocked by the endpoint, program stopped"),
            RunExit::CycleLimit => info!("Cycle limit reached"),
        },
        _ = shutdown_signal() => {}
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Cannot listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
