//! Command line definitions for `st`.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "st", version, about = "SpaceTraders client with a local cache")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API token (falls back to ST_TOKEN, then the AGENT_TOKEN file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to the TOML config file, created with defaults if missing
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    /// Increase log output (-v progress, -vv cache detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Agent information
    #[command(subcommand)]
    Agent(AgentCommand),

    /// Ship listing and actions
    #[command(subcommand)]
    Ships(ShipsCommand),

    /// Contract listing and actions
    #[command(subcommand)]
    Contracts(ContractsCommand),

    /// Waypoints, markets and shipyards
    #[command(subcommand)]
    Systems(SystemsCommand),

    /// Local cache maintenance
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Show the agent
    Info,
}

/// Ship arguments accept a symbol or a 0-based index into the ship list
/// sorted by symbol.
#[derive(Subcommand, Debug)]
pub enum ShipsCommand {
    /// List all ships
    List,
    /// Move a ship into orbit
    Orbit { ship: String },
    /// Dock a ship
    Dock { ship: String },
    /// Navigate a ship to a waypoint
    Navigate { ship: String, waypoint: String },
    /// Extract resources at the ship's waypoint
    Extract {
        ship: String,
        /// Survey JSON (one entry printed by `ships survey`) to target a deposit
        #[arg(long)]
        survey: Option<String>,
    },
    /// Survey the ship's waypoint
    Survey { ship: String },
    /// Refine raw materials into a good
    Refine { ship: String, produce: String },
    /// Refuel at the current market
    Refuel {
        ship: String,
        /// Units to buy (fills the tank when omitted)
        #[arg(long)]
        units: Option<i32>,
    },
    /// Set the flight mode
    FlightMode {
        ship: String,
        #[arg(value_parser = ["CRUISE", "BURN", "DRIFT", "STEALTH"], ignore_case = true)]
        mode: String,
    },
    /// Jettison cargo
    Jettison {
        ship: String,
        trade_symbol: String,
        units: i32,
    },
    /// Sell cargo at the current market
    Sell {
        ship: String,
        trade_symbol: String,
        units: i32,
    },
    /// Buy a ship at a shipyard
    Purchase { waypoint: String, ship_type: String },
}

#[derive(Subcommand, Debug)]
pub enum ContractsCommand {
    /// List all contracts
    List,
    /// Negotiate a new contract with a ship at a faction HQ
    Negotiate { ship: String },
    /// Accept a contract
    Accept { contract_id: String },
    /// Deliver cargo towards a contract
    Deliver {
        contract_id: String,
        ship: String,
        trade_symbol: String,
        units: i32,
    },
    /// Fulfill a contract
    Fulfill { contract_id: String },
}

#[derive(Subcommand, Debug)]
pub enum SystemsCommand {
    /// List waypoints, optionally only those with every given trait
    Waypoints {
        /// System symbol (defaults to the agent's home system)
        #[arg(long)]
        system: Option<String>,
        /// Required trait, e.g. MARKETPLACE (repeatable)
        #[arg(long = "trait", value_name = "TRAIT")]
        traits: Vec<String>,
    },
    /// Show the market at a waypoint
    Market { waypoint: String },
    /// Show the shipyard at a waypoint
    Shipyard { waypoint: String },
    /// Goods bought and sold across a system's marketplaces
    Goods {
        #[arg(long)]
        system: Option<String>,
        /// Only markets buying this good
        #[arg(long, value_name = "GOOD")]
        buys: Option<String>,
        /// Only markets selling this good
        #[arg(long, value_name = "GOOD")]
        sells: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Delete the cache file
    Clear,
}
