//! Command line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use juke_app::usecases::world::DEFAULT_ONLINE_LIMIT;
use juke_core::catalog::CatalogKind;
use juke_core::world::DEFAULT_GLOBE_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "juke", version, about = "Juke client: session, profiles, catalog, playback and world")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "JUKE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and JUKE_BACKEND_URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Directory holding the session file and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        username: String,
        #[arg(long, env = "JUKE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (does not sign in)
    Register {
        username: String,
        email: String,
        #[arg(long, env = "JUKE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Sign out locally and revoke the token
    Logout,
    /// Print the session state
    Status {
        /// Keep printing every change until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Confirm a registration from the emailed link
    Verify {
        user_id: String,
        timestamp: String,
        signature: String,
    },
    /// Send the verification email again
    Resend { email: String },
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Onboarding(OnboardingCommand),
    /// Search artists, albums or tracks
    Catalog { kind: CatalogKind, query: String },
    /// List featured genres
    Genres,
    #[command(subcommand)]
    Playback(PlaybackAction),
    #[command(subcommand)]
    World(WorldCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// The signed-in user's profile
    Me,
    Show { username: String },
    Search { query: String },
    /// PATCH the signed-in user's profile with a JSON object
    Update {
        #[arg(long)]
        data: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OnboardingCommand {
    Complete(OnboardingArgs),
}

#[derive(Args, Debug)]
pub struct OnboardingArgs {
    #[arg(long = "genre", required = true)]
    pub genres: Vec<String>,
    #[arg(long = "hated-genre")]
    pub hated_genres: Vec<String>,
    /// Spotify artist id
    #[arg(long = "artist")]
    pub artists: Vec<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, requires_all = ["lat", "lng"])]
    pub city: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Extra answer stored under custom_data, as key=value
    #[arg(long = "extra", value_parser = parse_key_value)]
    pub extras: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
pub enum PlaybackAction {
    Play(PlayArgs),
    Pause(ControlArgs),
    Next(ControlArgs),
    Previous(ControlArgs),
    State {
        #[arg(long)]
        provider: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    pub control: ControlArgs,
    #[arg(long)]
    pub track_uri: Option<String>,
    #[arg(long)]
    pub context_uri: Option<String>,
    #[arg(long)]
    pub position_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ControlArgs {
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub device_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum WorldCommand {
    /// Points on the globe
    Globe {
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, default_value_t = DEFAULT_GLOBE_LIMIT)]
        limit: u32,
        /// Bounding box as min_lat,max_lat,min_lng,max_lng
        #[arg(long, value_parser = parse_bounds, allow_hyphen_values = true)]
        bounds: Option<[f64; 4]>,
    },
    /// Users online right now
    Online {
        #[arg(long, default_value_t = DEFAULT_ONLINE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_bounds(raw: &str) -> Result<[f64; 4], String> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate `{}`: {e}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    <[f64; 4]>::try_from(values).map_err(|values| {
        format!(
            "expected min_lat,max_lat,min_lng,max_lng, got {} values",
            values.len()
        )
    })
}
