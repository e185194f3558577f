use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{HolonetConfig, Overrides};
use holonet_fetch::HttpTransport;
use holonet_model::ResourceKind;
use holonet_view::{InteractionSource, SearchCoordinator};
use log::info;
use repl::Flow;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

mod config;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "holonet")]
#[command(about = "Search people and vehicles from a Star Wars API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (api_base, image_base, request_timeout_ms, user_agent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root (overrides HOLONET_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Character image root (overrides HOLONET_IMAGE_BASE)
    #[arg(long, global = true)]
    image_base: Option<String>,

    /// Per-request timeout in milliseconds (overrides HOLONET_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser (default)
    Browse,

    /// Run one query against every view and print the results
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Query text; empty lists everything
    #[arg(default_value = "")]
    query: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if let Some(Commands::Search(args)) = &cli.command {
        if args.json {
            cli.quiet = true;
        }
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper connection chatter is only useful when debugging
    if !cli.verbose {
        builder.filter_module("hyper", log::LevelFilter::Warn);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    let overrides = Overrides {
        api_base: cli.api_base.clone(),
        image_base: cli.image_base.clone(),
        timeout_ms: cli.timeout_ms,
    };
    let config = HolonetConfig::load(cli.config.as_deref(), &overrides)?;
    let mut browser = build_browser(&config)?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => run_browse(&mut browser).await?,
        Commands::Search(args) => run_search(&mut browser, &args).await?,
    }

    Ok(())
}

fn build_browser(config: &HolonetConfig) -> Result<SearchCoordinator> {
    let transport = HttpTransport::new(&config.transport_config())
        .context("Failed to build HTTP client")?;
    info!(
        "using {} (timeout {}ms)",
        config.api_base, config.request_timeout_ms
    );
    let mut browser = SearchCoordinator::standard(
        &config.api_base,
        Some(config.image_base.as_str()),
        Arc::new(transport),
        InteractionSource::new(),
    );
    for kind in ResourceKind::ALL {
        browser
            .view_mut(kind)?
            .attach_boundary(render::overlay_region(kind));
    }
    Ok(browser)
}

async fn run_search(browser: &mut SearchCoordinator, args: &SearchArgs) -> Result<()> {
    browser.set_query(&args.query);
    browser.settle().await;

    let states = browser.states();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&states)?);
    } else {
        print!("{}", render::render_all(&states));
    }
    Ok(())
}

async fn run_browse(browser: &mut SearchCoordinator) -> Result<()> {
    browser.start();
    browser.settle().await;
    println!("{}", render::render_all(&browser.states()));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("holonet> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match repl::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        };
        match repl::execute(browser, command).await {
            Ok(Flow::Redraw) => println!("{}", render::render_all(&browser.states())),
            Ok(Flow::Help) => println!("{}", repl::HELP),
            Ok(Flow::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }
    Ok(())
}
