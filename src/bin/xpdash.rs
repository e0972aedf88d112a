use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use xp_dashboard::auth::TokenStore;
use xp_dashboard::config::{DEFAULT_ENDPOINT, DEFAULT_EXCLUDE};
use xp_dashboard::summary::{ProfileSummary, format_amount};
use xp_dashboard::{Client, Dashboard, DashboardConfig, UserProfile};
use xp_dashboard::{render, storage};

#[derive(Parser, Debug)]
#[command(
    name = "xpdash",
    version,
    about = "Fetch your progress from the GraphQL endpoint and render an XP dashboard"
)]
struct Cli {
    #[command(flatten)]
    conn: ConnArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct ConnArgs {
    /// GraphQL endpoint URL.
    #[arg(long, global = true, env = "XPDASH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// JWT to use instead of the stored one.
    #[arg(long, global = true, env = "XPDASH_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Where the token is stored (default: <config dir>/xpdash/token).
    #[arg(long, global = true, env = "XPDASH_TOKEN_FILE")]
    token_file: Option<PathBuf>,
    /// Regex of object paths left out of the XP charts.
    #[arg(long, global = true, default_value = DEFAULT_EXCLUDE)]
    exclude: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a JWT for later requests.
    Login {
        /// The token (three dot-separated segments).
        #[arg(value_name = "JWT")]
        jwt: String,
    },
    /// Forget the stored JWT.
    Logout,
    /// Fetch the profile and print the headline numbers.
    Show,
    /// Render the dashboard page (and optionally chart images and exports).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output HTML page.
    #[arg(long, default_value = "dashboard.html")]
    out: PathBuf,
    /// Render from a saved profile JSON instead of fetching.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Also write the charts as an image (.svg or .png).
    #[arg(long)]
    charts: Option<PathBuf>,
    /// Width of the chart image (default 1200).
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// Height of the chart image (default 400).
    #[arg(long, default_value_t = 400)]
    height: u32,
    /// Save the fetched profile as JSON.
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Save the joined XP series as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = match &cli.conn.token_file {
        Some(p) => TokenStore::at(p),
        None => TokenStore::default_location()?,
    };
    match &cli.cmd {
        Command::Login { jwt } => {
            store.save(jwt)?;
            eprintln!("Token saved to {}", store.path().display());
            Ok(())
        }
        Command::Logout => {
            store.clear()?;
            eprintln!("Logged out");
            Ok(())
        }
        Command::Show => cmd_show(&cli.conn, &store),
        Command::Render(args) => cmd_render(&cli.conn, &store, args),
    }
}

fn config_for(conn: &ConnArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::with_exclude(&conn.exclude)?;
    config.endpoint = conn.endpoint.clone();
    Ok(config)
}

/// Fetch with the explicit token, else the stored one. A stored token the endpoint rejects is
/// cleared so the next run asks for a fresh login.
fn fetch(conn: &ConnArgs, store: &TokenStore, config: &DashboardConfig) -> Result<UserProfile> {
    let client = Client::new(config.endpoint.clone())?;
    if let Some(token) = &conn.token {
        return client.fetch_profile(token, config.exclude.as_str());
    }
    let Some(token) = store.load()? else {
        bail!("not logged in; run `xpdash login <JWT>` or set XPDASH_TOKEN");
    };
    match client.fetch_profile(&token, config.exclude.as_str()) {
        Ok(p) => Ok(p),
        Err(e) => {
            warn!("fetch with stored token failed, removing it: {e:#}");
            store.clear()?;
            Err(e)
        }
    }
}

fn cmd_show(conn: &ConnArgs, store: &TokenStore) -> Result<()> {
    let config = config_for(conn)?;
    let profile = fetch(conn, store, &config)?;
    let s = ProfileSummary::from_profile(&profile);
    println!("User: {}", s.login);
    println!("Audit ratio: {}", s.audit_ratio_text());
    println!("Received: {} MB  Given: {} MB", s.received_mb_text(), s.given_mb_text());
    if let Some(n) = s.audit_count {
        println!("Audits done: {n}");
    }
    println!("Total XP: {} KB over {} projects", s.total_xp_kb(), s.project_count);
    for (name, level) in &s.skills {
        println!("  {name}: {}", format_amount(*level));
    }
    Ok(())
}

fn cmd_render(conn: &ConnArgs, store: &TokenStore, args: &RenderArgs) -> Result<()> {
    let config = config_for(conn)?;
    let profile = match &args.input {
        Some(path) => storage::load_profile_json(path)?,
        None => fetch(conn, store, &config)?,
    };

    if let Some(path) = &args.dump {
        storage::save_profile_json(&profile, path)?;
        eprintln!("Saved profile to {}", path.display());
    }

    let dashboard = Dashboard::build(&profile, &config)?;

    if let Some(path) = &args.csv {
        storage::save_series_csv(dashboard.series.samples(), path)?;
        eprintln!("Saved {} samples to {}", dashboard.series.len(), path.display());
    }

    let page = render::render_page(&dashboard);
    std::fs::write(&args.out, page).with_context(|| format!("write {}", args.out.display()))?;
    info!("rendered dashboard for {}", dashboard.summary.login);
    eprintln!("Wrote dashboard to {}", args.out.display());

    if let Some(path) = &args.charts {
        render::save_charts(&dashboard, path, args.width, args.height)?;
        eprintln!("Wrote charts to {}", path.display());
    }
    Ok(())
}
