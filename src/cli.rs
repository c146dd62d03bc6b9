use clap::{Args, Parser, Subcommand};
use peakcision::catalog::{Ability, EquipmentCategory, Terrain};
use peakcision::finder::{EquipmentSort, TieBreak};
use peakcision::roi::{SENSITIVITY_MAX, SENSITIVITY_MIN};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peakcision")]
#[command(about = "Ski resort finder, gear matcher and buy-vs-rent planner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to <config dir>/peakcision/config.toml)
    #[arg(short, long, global = true, env = "PEAKCISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resorts against your filters
    Resorts(ResortArgs),

    /// Match skis, boots and bindings
    Equipment(EquipmentArgs),

    /// Project the cost of owning gear against renting it
    Roi(RoiArgs),

    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Serve the catalog, planner and preferences over HTTP
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
pub struct ResortArgs {
    /// Free text search on name and region
    #[arg(short, long)]
    pub query: Option<String>,

    /// Region or state (defaults to the stored default region)
    #[arg(long)]
    pub region: Option<String>,

    /// Pass type, "None" for resorts without a multi-resort pass
    #[arg(long)]
    pub pass: Option<String>,

    /// Day ticket budget ceiling
    #[arg(long)]
    pub budget: Option<f64>,

    /// Travel time ceiling in hours
    #[arg(long)]
    pub max_travel: Option<f64>,

    #[arg(long)]
    pub ability: Option<Ability>,

    /// Comma separated terrain preferences
    #[arg(long, value_delimiter = ',')]
    pub terrain: Vec<Terrain>,

    /// Weight of snowfall, 0 to 1
    #[arg(long)]
    pub powder_bias: Option<f64>,

    /// Tolerance for crowds, 0 to 1
    #[arg(long)]
    pub crowd_tolerance: Option<f64>,

    /// Order of equal scores (input-order or id)
    #[arg(long, value_enum, default_value = "input-order")]
    pub tie_break: TieBreakArg,

    /// Resort ids to show side by side
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EquipmentArgs {
    /// Free text search on name
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long)]
    pub category: Option<EquipmentCategory>,

    #[arg(long)]
    pub ability: Option<Ability>,

    /// Comma separated terrain preferences
    #[arg(long, value_delimiter = ',')]
    pub terrain: Vec<Terrain>,

    /// Target ski length in cm
    #[arg(long)]
    pub length: Option<f64>,

    /// Price ceiling
    #[arg(long)]
    pub budget: Option<f64>,

    /// Best match, price or rating
    #[arg(long, default_value = "best")]
    pub sort: EquipmentSort,

    /// Item ids to show side by side
    #[arg(long, value_delimiter = ',')]
    pub compare: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RoiArgs {
    #[arg(long, default_value_t = 12.0)]
    pub days: f64,

    #[arg(long, default_value_t = 5)]
    pub seasons: i64,

    /// Upfront gear cost
    #[arg(long, default_value_t = 1600.0)]
    pub gear_cost: f64,

    /// Expected resale value, percent of gear cost
    #[arg(long, default_value_t = 35.0)]
    pub resale: f64,

    /// Maintenance per season
    #[arg(long, default_value_t = 120.0)]
    pub maintenance: f64,

    #[arg(long, default_value_t = 55.0)]
    pub rental_per_day: f64,

    /// Pass cost per season
    #[arg(long, default_value_t = 850.0)]
    pub pass_cost: f64,

    #[arg(long, default_value_t = 40.0)]
    pub travel_per_day: f64,

    /// Discount rate in percent
    #[arg(long, default_value_t = 8.0)]
    pub discount: f64,

    /// Days sensitivity in percent, -50 to 50
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true, value_parser = parse_sensitivity)]
    pub sensitivity: f64,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the stored preferences
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change one preference, e.g. `prefs set theme dark`
    Set { key: String, value: String },
    /// Restore the defaults
    Reset,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum TieBreakArg {
    InputOrder,
    Id,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::InputOrder => TieBreak::InputOrder,
            TieBreakArg::Id => TieBreak::Id,
        }
    }
}

fn parse_sensitivity(value: &str) -> Result<f64, String> {
    let percent: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (SENSITIVITY_MIN..=SENSITIVITY_MAX).contains(&percent) {
        Ok(percent)
    } else {
        Err(format!(
            "sensitivity must be between {SENSITIVITY_MIN} and {SENSITIVITY_MAX}"
        ))
    }
}
