use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use community_hub::domain::ViewerRole;
use community_hub::presentation::views::{
    donation_summaries, render_donations, render_events, render_media, render_members,
    render_posts, render_relief_funds,
};
use community_hub::shared::config::normalize_base_url;
use community_hub::shared::logging;
use community_hub::{AppConfig, CommunityStore, HttpCommunityApi};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "community-hub")]
#[command(about = "Community hub viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API origin (overrides COMMUNITY_HUB_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Viewer role (admin, member, guest)
    #[arg(long, global = true, default_value = "guest")]
    role: ViewerRole,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Posts with their comments
    Feed,
    /// Upcoming events
    Events,
    /// Photo and video gallery
    Media,
    /// Member directory (admin or member)
    Members,
    /// Donation records with paid/unpaid summary (admin or member)
    Donations,
    /// Relief fund appeals
    Funds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config.api.base_url = normalize_base_url(base_url)?;
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    logging::init(&config.logging);

    info!(
        "Starting community-hub v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let role = cli.role;
    match cli.command {
        Commands::Members if !role.can_view_membership() => {
            bail!("the {role} role cannot view the member directory")
        }
        Commands::Donations if !role.can_view_donations() => {
            bail!("the {role} role cannot view donation records")
        }
        _ => {}
    }

    let api = Arc::new(HttpCommunityApi::new(&config.api)?);
    let store = CommunityStore::new(api);
    store.set_role(role).await;

    // 一部の読み込みが失敗しても取得できた分は表示する
    if let Err(err) = store.refresh().await {
        warn!(error = %err, "some collections could not be loaded");
    }

    let output = match cli.command {
        Commands::Feed => render_posts(&store.posts().await),
        Commands::Events => render_events(&store.events().await),
        Commands::Media => render_media(&store.media().await),
        Commands::Members => render_members(&store.members().await),
        Commands::Donations => {
            let rows = donation_summaries(&store.donations().await, &store.members().await);
            render_donations(&rows)
        }
        Commands::Funds => render_relief_funds(&store.relief_funds().await),
    };
    print!("{output}");

    Ok(())
}
