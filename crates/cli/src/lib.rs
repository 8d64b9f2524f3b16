pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stockline_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "stockline",
    about = "Stockline operator CLI",
    long_about = "Operate Stockline inventory and delivery data: seed demo fixtures, inspect \
                  stock levels, place restock orders, and track deliveries.",
    after_help = "Examples:\n  stockline seed --data-dir ./data\n  stockline inventory --store 12\n  stockline recommend"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a stockline.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding inventory.json and deliveries.json")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Write the demo inventory and delivery fixtures to the data files")]
    Seed,
    #[command(about = "Show one store's inventory, or a single item when --sku is given")]
    Inventory {
        #[arg(long, help = "Store identifier, e.g. 12")]
        store: String,
        #[arg(long, help = "Item SKU, e.g. SKU1001")]
        sku: Option<String>,
    },
    #[command(about = "List every item at or below its minimum threshold, across all stores")]
    LowStock,
    #[command(about = "Adjust an item's stock by a signed quantity")]
    Adjust {
        #[arg(long, help = "Store identifier")]
        store: String,
        #[arg(long, help = "Item SKU")]
        sku: String,
        #[arg(long, allow_hyphen_values = true, help = "Signed change, e.g. 25 or -10")]
        delta: i64,
        #[arg(long, default_value = "manual adjustment", help = "Reason recorded in the log")]
        reason: String,
    },
    #[command(about = "List deliveries, optionally filtered by store and/or status")]
    Deliveries {
        #[arg(long, help = "Store identifier")]
        store: Option<String>,
        #[arg(long, help = "Status filter, e.g. in_transit")]
        status: Option<String>,
    },
    #[command(about = "Place a restock delivery order for an item")]
    Order {
        #[arg(long, help = "Store identifier")]
        store: String,
        #[arg(long, help = "Item SKU")]
        sku: String,
        #[arg(long, help = "Units to order")]
        quantity: u32,
        #[arg(long, help = "Schedule next-day instead of standard three-day delivery")]
        urgent: bool,
    },
    #[command(about = "Set a delivery's status, stamping the arrival date on delivered")]
    SetStatus {
        #[arg(long, help = "Delivery identifier, e.g. DEL-001")]
        delivery: String,
        #[arg(long, help = "New status, e.g. delivered")]
        status: String,
    },
    #[command(about = "Recommend restock orders for every low-stock item")]
    Recommend,
    #[command(about = "List the tool names exposed to the conversational front-end")]
    Tools,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides { data_dir: cli.data_dir.clone(), ..ConfigOverrides::default() },
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration issue: {error}");
            return ExitCode::from(2);
        }
    };

    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to initialize async runtime: {error}");
            return ExitCode::from(3);
        }
    };

    let result = runtime.block_on(execute(cli.command, &config));
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

pub async fn execute(command: Command, config: &AppConfig) -> commands::CommandResult {
    let services = commands::services(config);

    match command {
        Command::Seed => commands::seed::run(config).await,
        Command::Inventory { store, sku } => commands::inventory::run(&services, store, sku).await,
        Command::LowStock => commands::low_stock::run(&services).await,
        Command::Adjust { store, sku, delta, reason } => {
            commands::adjust::run(&services, store, sku, delta, &reason).await
        }
        Command::Deliveries { store, status } => {
            commands::deliveries::run(&services, store, status).await
        }
        Command::Order { store, sku, quantity, urgent } => {
            commands::order::run(&services, store, sku, quantity, urgent).await
        }
        Command::SetStatus { delivery, status } => {
            commands::set_status::run(&services, delivery, &status).await
        }
        Command::Recommend => commands::recommend::run(&services).await,
        Command::Tools => commands::tools::run(&services),
    }
}

fn init_logging(config: &AppConfig) {
    use stockline_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
