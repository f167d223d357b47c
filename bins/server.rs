use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// In-memory password card manager HTTP server.
#[derive(Debug, Parser)]
#[command(name = "server", version, about)]
struct Cli {
    /// Web server port (overrides config.toml and SERVER_PORT)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Bind host (overrides config.toml and SERVER_HOST)
    #[arg(long)]
    host: Option<String>,
}

fn init_logging() {
    // load .env before the subscriber reads RUST_LOG / LOG_FORMAT
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");
}

fn load_config(cli: &Cli) -> anyhow::Result<configs::AppConfig> {
    let mut cfg = configs::AppConfig::load_and_validate()?;
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if let Some(host) = &cli.host {
        cfg.server.host = host.clone();
    }
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(
                service = "server",
                event = "config_invalid",
                error = %e,
                "invalid configuration"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "server",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        port = cfg.server.port,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "server service starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                service = "server",
                event = "run_failed",
                error = %e,
                "server::run returned error"
            );
            std::process::ExitCode::FAILURE
        }
    }
}
