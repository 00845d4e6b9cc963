// SpaceTraders CLI - Main Entry Point
// Cached access to agent, ships, contracts and systems

mod cli;

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};

use cli::{AgentCommand, CacheCommand, Cli, Command, ContractsCommand, ShipsCommand, SystemsCommand};
use spacetraders_cache::error::{ShipLookupError, TokenError};
use spacetraders_cache::models::{system_symbol_of, Survey};
use spacetraders_cache::{
    load_agent_token, logging, ApiError, CachedClient, ConfigError, FetchMode, SpaceTradersClient,
    SpaceTradersConfig,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Ship(ShipLookupError),
    #[error("failed to clear cache: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("invalid survey JSON: {0}")]
    Survey(serde_json::Error),
}

impl From<ShipLookupError> for CliError {
    fn from(err: ShipLookupError) -> Self {
        match err {
            ShipLookupError::Api(api) => CliError::Api(api),
            other => CliError::Ship(other),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(1)
        }
    }
}

fn report(err: &CliError) {
    eprintln!("Error: {}", err);
    if let CliError::Api(api) = err {
        if let Some(payload) = api.payload() {
            let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
            eprintln!("{}", rendered);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = SpaceTradersConfig::load_or_create(&cli.config)?;
    config.validate()?;
    config.log_summary();

    // Clearing the cache needs neither a token nor the network
    if let Command::Cache(CacheCommand::Clear) = cli.command {
        let store = spacetraders_cache::CacheStore::new(&config.cache.path);
        if store.clear()? {
            info!(path = %config.cache.path, "Cache cleared");
            println!("Cache cleared: {}", config.cache.path);
        } else {
            println!("No cache at {}", config.cache.path);
        }
        return Ok(());
    }

    let token = load_agent_token(cli.token.as_deref())?;
    let client = SpaceTradersClient::new(&token, &config)?;
    let cached = CachedClient::from_config(client, &config);
    debug!(cache = %config.cache.path, "Client ready");

    match cli.command {
        Command::Agent(AgentCommand::Info) => print_json(&cached.get_agent_info().await?),
        Command::Ships(command) => run_ships(&cached, command).await,
        Command::Contracts(command) => run_contracts(&cached, command).await,
        Command::Systems(command) => run_systems(&cached, command).await,
        Command::Cache(CacheCommand::Clear) => Ok(()),
    }
}

async fn run_ships(cached: &CachedClient, command: ShipsCommand) -> Result<(), CliError> {
    match command {
        ShipsCommand::List => print_json(&cached.list_ships().await?),
        ShipsCommand::Orbit { ship } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.orbit_ship(&ship).await?)
        }
        ShipsCommand::Dock { ship } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.dock_ship(&ship).await?)
        }
        ShipsCommand::Navigate { ship, waypoint } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.navigate_ship(&ship, &waypoint).await?)
        }
        ShipsCommand::Extract { ship, survey } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            match survey {
                Some(survey) => {
                    let survey: Survey = serde_json::from_str(&survey).map_err(CliError::Survey)?;
                    print_json(&cached.extract_with_survey(&ship, &survey).await?)
                }
                None => print_json(&cached.extract_resources(&ship).await?),
            }
        }
        ShipsCommand::Survey { ship } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.create_survey(&ship).await?.surveys)
        }
        ShipsCommand::Refine { ship, produce } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.refine_materials(&ship, &produce.to_ascii_uppercase()).await?)
        }
        ShipsCommand::Refuel { ship, units } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.refuel_ship(&ship, units).await?)
        }
        ShipsCommand::FlightMode { ship, mode } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.set_flight_mode(&ship, &mode.to_ascii_uppercase()).await?)
        }
        ShipsCommand::Jettison { ship, trade_symbol, units } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.jettison_cargo(&ship, &trade_symbol, units).await?)
        }
        ShipsCommand::Sell { ship, trade_symbol, units } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.sell_cargo(&ship, &trade_symbol, units).await?)
        }
        ShipsCommand::Purchase { waypoint, ship_type } => {
            print_json(&cached.purchase_ship(&ship_type, &waypoint).await?)
        }
    }
}

async fn run_contracts(cached: &CachedClient, command: ContractsCommand) -> Result<(), CliError> {
    match command {
        ContractsCommand::List => print_json(&cached.list_contracts().await?),
        ContractsCommand::Negotiate { ship } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(&cached.negotiate_contract(&ship).await?)
        }
        ContractsCommand::Accept { contract_id } => print_json(&cached.accept_contract(&contract_id).await?),
        ContractsCommand::Deliver {
            contract_id,
            ship,
            trade_symbol,
            units,
        } => {
            let ship = cached.resolve_ship_symbol(&ship).await?;
            print_json(
                &cached
                    .deliver_contract(&contract_id, &ship, &trade_symbol, units)
                    .await?,
            )
        }
        ContractsCommand::Fulfill { contract_id } => print_json(&cached.fulfill_contract(&contract_id).await?),
    }
}

async fn run_systems(cached: &CachedClient, command: SystemsCommand) -> Result<(), CliError> {
    match command {
        SystemsCommand::Waypoints { system, traits } => {
            let system = match system {
                Some(system) => system,
                None => cached.default_system().await?,
            };
            print_json(&cached.list_waypoints(&system, &traits).await?)
        }
        SystemsCommand::Market { waypoint } => {
            let system = system_symbol_of(&waypoint);
            print_json(&cached.get_market(&system, &waypoint, FetchMode::Refresh).await?)
        }
        SystemsCommand::Shipyard { waypoint } => {
            let system = system_symbol_of(&waypoint);
            print_json(&cached.get_shipyard(&system, &waypoint, FetchMode::Refresh).await?)
        }
        SystemsCommand::Goods { system, buys, sells } => {
            let system = match system {
                Some(system) => system,
                None => cached.default_system().await?,
            };
            let goods = cached.list_system_goods(&system).await?;
            if buys.is_none() && sells.is_none() {
                print_json(&goods)
            } else {
                print_json(&goods.markets_trading(buys.as_deref(), sells.as_deref()))
            }
        }
    }
}
