mod cli;
mod commands;
mod demo;
mod launch;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use webshim_common::ShimError;
use webshim_config::ShimConfig;
use webshim_webview::{DefaultAdapter, WebView};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- webshim crashed ---");
        if let Some(location) = info.location() {
            eprintln!("at {location}");
        }
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

fn load_config(args: &cli::Args) -> Result<ShimConfig, ShimError> {
    let config = match &args.config {
        Some(path) => {
            let config = webshim_config::load_from_path(path)?;
            webshim_config::validation::validate(&config)?;
            config
        }
        None => webshim_config::load_config()?,
    };
    Ok(config)
}

/// `directives` is a comma-separated filter list; unparsable entries are skipped.
fn init_logging(directives: &str) {
    let filter = directives
        .split(',')
        .filter_map(|d| d.trim().parse().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_capabilities() -> Result<(), ShimError> {
    let report = launch::capability_report::<DefaultAdapter>();
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|e| ShimError::Other(e.to_string()))?
    );
    Ok(())
}

fn run(config: &ShimConfig) -> Result<(), ShimError> {
    let webview: WebView<launch::AppState, DefaultAdapter> = launch::launch(config)?;
    launch::spawn_ticker(webview.handle(), launch::TICK_INTERVAL)?;

    tracing::info!("Entering event loop");
    let state = webview.run()?;
    tracing::info!(
        ticks = state.ticks,
        commands = state.commands,
        "Shutdown complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();

    // Logging depends on the config, so load it first and report afterwards.
    let loaded = load_config(&args);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => ShimConfig::default(),
    };
    args.apply_to(&mut config);
    init_logging(&config.logging.directive());

    tracing::info!("webshim v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    if let Err(e) = loaded {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let result = if args.capabilities {
        print_capabilities()
    } else {
        run(&config)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
