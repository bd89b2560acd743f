use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use rentsim::{App, ClientConfig, ExportTarget, init_logging};
use rentsim_core::model::{OperatingMode, RoomType, SimulationInputs};

#[derive(Parser, Debug)]
#[command(name = "rentsim")]
#[command(about = "Rental profitability simulator")]
struct Args {
    /// Path to the data directory (default: ~/.rentsim/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Base URL of the market data service
    #[arg(long, global = true)]
    server: Option<String>,

    /// Use the built-in market tables instead of the service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation and print the result
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Export the report, to PATH or into the configured report directory
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
    /// Suggest known cities matching a query
    Suggest { query: String },
    /// Live session: edit inputs line by line and watch the result update
    Watch {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Write the configuration file with the current settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// Purchase price in euros (50 000 to 1 000 000)
    #[arg(long, default_value_t = 200_000.0)]
    price: f64,

    /// Surface in square metres (10 to 200)
    #[arg(long, default_value_t = 50.0)]
    surface: f64,

    /// studio, t2, t3 or t4
    #[arg(long, default_value = "t2")]
    rooms: RoomType,

    /// long-term or short-term
    #[arg(long, default_value = "long-term")]
    mode: OperatingMode,

    #[arg(long, default_value = "Paris")]
    city: String,
}

impl From<InputArgs> for SimulationInputs {
    fn from(args: InputArgs) -> Self {
        SimulationInputs::new(args.price, args.surface, args.rooms, args.mode, args.city)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rentsim")
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut config = ClientConfig::load_or_default(&data_dir);
    if let Some(server) = args.server {
        config.server_url = server;
    }
    config.offline |= args.offline;

    let app = App::new(data_dir, config);

    match args.command {
        Command::Simulate { inputs, export } => {
            let export = export.map(|path| match path {
                Some(path) => ExportTarget::File(path),
                None => ExportTarget::ReportDir,
            });
            print!("{}", app.simulate(inputs.into(), export).await?);
        }
        Command::Suggest { query } => print!("{}", app.suggest(&query)),
        Command::Watch { inputs } => app.watch(inputs.into()).await?,
        Command::InitConfig { force } => {
            let path = app.init_config(force)?;
            println!("Configuration written to {}", path.display());
        }
    }

    tracing::info!("rentsim exiting");
    Ok(())
}
