use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use mt_quat_lib::batch::convert_folder;

mod cancel_listener;
mod compare;
mod view_config;

#[derive(Parser)]
#[command(name = "MT Quat")]
#[command(bin_name = "mt-quat")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Convert(ConvertArgs),
    Compare(CompareArgs),
}

#[derive(clap::Args)]
#[command(about = "Append quaternion columns to every ?_MT_*.txt export in a folder")]
struct ConvertArgs {
    #[arg(help = "Folder to search for MT exports")]
    folder: PathBuf,
}

fn interval_parser(s: &str) -> Result<Duration, String> {
    let seconds = s.parse::<f64>().map_err(|e| e.to_string())?;
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

fn stride_parser(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("stride must be at least 1".into()),
        Ok(stride) => Ok(stride),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(clap::Args)]
#[command(about = "Play back matrix and quaternion orientation side by side")]
pub struct CompareArgs {
    #[arg(help = "Path to the CSV (or raw .txt) export")]
    pub csv: PathBuf,

    #[arg(long, default_value = "0.5", value_parser = interval_parser, help = "Seconds between frames")]
    pub interval: Duration,

    #[arg(long, default_value_t = 0, help = "First row to show")]
    pub start: usize,

    #[arg(long, default_value = "100", value_parser = stride_parser, help = "Rows to advance per frame")]
    pub skip: usize,

    #[arg(long, help = "JSON file with view settings")]
    pub view: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let args = Cli::parse();

    match args.command {
        Commands::Convert(args) => {
            let folder = args.folder;
            convert_folder(&folder)?;
        }
        Commands::Compare(args) => {
            compare::compare(args).await?;
        }
    }
    Ok(())
}
