use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
#[cfg(not(feature = "storage-rocksdb"))]
use tracing::warn;
use vending_engine::application::engine::VendingMachine;
use vending_engine::domain::ports::LedgerStoreBox;
use vending_engine::infrastructure::in_memory::InMemoryLedgerStore;
#[cfg(feature = "storage-rocksdb")]
use vending_engine::infrastructure::rocksdb::RocksDBStore;
use vending_engine::interfaces::csv::coin_reader::CoinReader;
use vending_engine::interfaces::csv::command_reader::{Command, CommandReader};
use vending_engine::interfaces::csv::ledger_writer::LedgerWriter;
use vending_engine::interfaces::csv::stock_reader::StockReader;
use vending_engine::logging::{LogFormat, init_logging};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "VENDING_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Machine name used in logs
    #[arg(long, env = "VENDING_MACHINE_NAME", default_value = "vending_machine")]
    name: String,

    /// Stock CSV (code, name, cost, quantity) loaded before the command runs
    #[arg(long)]
    stock: Option<PathBuf>,

    /// Coin CSV (denomination, quantity) loaded before the command runs
    #[arg(long)]
    coins: Option<PathBuf>,

    /// Default log filter; RUST_LOG takes precedence
    #[arg(long, env = "VENDING_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stock ledger as CSV
    ShowStock,
    /// Print the coin inventory as CSV
    ShowChange,
    /// Play a session script (action, value) against the machine
    Run {
        /// Session script CSV
        script: PathBuf,
    },
}

fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedgerStore::new()))
        }
        None => Ok(Box::new(InMemoryLedgerStore::new())),
    }
}

async fn load_stock(machine: &VendingMachine, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for row in StockReader::new(file).products() {
        match row {
            Ok(product) => {
                if let Err(e) = machine.stock_row(product).await {
                    eprintln!("Error stocking row: {}", e);
                }
            }
            Err(e) => eprintln!("Error reading stock row: {}", e),
        }
    }
    Ok(())
}

async fn load_coins(machine: &VendingMachine, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for row in CoinReader::new(file).coins() {
        match row {
            Ok(coin) => {
                if let Err(e) = machine.restock_change(coin).await {
                    eprintln!("Error restocking coins: {}", e);
                }
            }
            Err(e) => eprintln!("Error reading coin row: {}", e),
        }
    }
    Ok(())
}

async fn run_script(machine: &VendingMachine, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for command in CommandReader::new(file).commands() {
        let command = match command {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error reading command: {}", e);
                continue;
            }
        };
        let line = match command {
            Command::Select(code) => machine
                .select_product(&code)
                .await
                .map(|cost| format!("Selected {}, please insert £{}", code, cost)),
            Command::Insert(coin) => machine
                .insert_money(coin)
                .await
                .map(|outcome| outcome.to_string()),
            Command::Cancel => Ok(machine.cancel_transaction().await),
            Command::Return => Ok(machine.return_money().await),
            Command::Balance => Ok(format!("Balance: £{}", machine.return_balance().await)),
        };
        match line {
            Ok(line) => println!("{}", line),
            Err(e) if e.is_not_found() => eprintln!("Unavailable: {}", e),
            Err(e) => eprintln!("Error processing command: {}", e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let store = open_store(cli.db_path)?;
    let machine = VendingMachine::new(cli.name, store);

    if let Some(path) = &cli.stock {
        load_stock(&machine, path).await?;
    }
    if let Some(path) = &cli.coins {
        load_coins(&machine, path).await?;
    }

    match cli.command {
        Commands::ShowStock => {
            let products = machine.list_stock().await.into_diagnostic()?;
            let stdout = io::stdout();
            LedgerWriter::new(stdout.lock())
                .write_products(products)
                .into_diagnostic()?;
        }
        Commands::ShowChange => {
            let coins = machine.list_change().await.into_diagnostic()?;
            let stdout = io::stdout();
            LedgerWriter::new(stdout.lock())
                .write_coins(coins)
                .into_diagnostic()?;
        }
        Commands::Run { script } => run_script(&machine, &script).await?,
    }

    Ok(())
}
