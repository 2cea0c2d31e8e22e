/// Duet Server - chat-driven two-track playback
use clap::{Parser, Subcommand};
use duet_core::{resolve, AudioCommand};
use duet_server::{
    config::ServerConfig, create_router, state::AppState, ChatSession, ConsoleChannelFactory,
};
use std::{net::SocketAddr, path::PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "duet-server")]
#[command(about = "Duet chat and audio server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the instruction for a command (track1, track2, combine, stop)
    Resolve {
        /// Command name
        command: String,
    },
    /// Chat in the terminal with console playback
    Chat {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "duet_server=info,duet_assistant=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Resolve { command } => {
            resolve_command(&command)?;
        }
        Commands::Chat { config } => {
            chat(config).await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Duet Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::from_settings(&config.assistant)?;

    if let Some(dir) = &config.server.static_dir {
        tracing::info!("Serving static files from {:?}", dir);
    }

    // Build router
    let app = create_router(app_state, config.server.static_dir.clone());

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn resolve_command(name: &str) -> anyhow::Result<()> {
    let command: AudioCommand = name.parse()?;
    println!("{}", serde_json::to_string_pretty(&resolve(command))?);
    Ok(())
}

async fn chat(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    let state = AppState::from_settings(&config.assistant)?;
    let Some(arbitrator) = state.arbitrator else {
        anyhow::bail!(duet_assistant::MISSING_API_KEY_MESSAGE);
    };

    let factory = ConsoleChannelFactory::new(config.server.static_dir.clone());
    let mut session = ChatSession::new(arbitrator, factory);

    println!("Say \"track 1\", \"track 2\" or \"combine\". /stop stops playback, /quit exits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/stop" => {
                session.stop();
                continue;
            }
            _ => {}
        }

        if let Some(outcome) = session.send(&line).await {
            println!("{}", outcome.reply);
            if let Some(now_playing) = outcome.state.now_playing() {
                println!("  [{}]", now_playing);
            }
            if let Some(advisory) = outcome.advisory {
                println!("  ! {}", advisory);
            }
        }
    }

    session.close();
    Ok(())
}
