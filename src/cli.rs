use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::errors::{AppError, AppResult};
use crate::loader::KaggleConnector;
use crate::models::DatasetKind;
use crate::parser::write_parquet;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Number of rows printed after a load.
const PREVIEW_ROWS: usize = 5;

/// What the command line asked for, after argument parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Download {
        dataset: String,
        path: Option<PathBuf>,
        unzip: bool,
        env_path: Option<PathBuf>,
    },
    Load {
        kind: DatasetKind,
        file: Option<PathBuf>,
        dataset: Option<String>,
        save: Option<PathBuf>,
        env_path: Option<PathBuf>,
    },
    Toml {
        config: PathBuf,
    },
}

fn env_arg() -> Arg<'static> {
    Arg::new("env")
        .long("env")
        .help("Secrets file with kaggle_username and kaggle_key (defaults to the crate's .env)")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

/// Builds the `kaggle-connector` command tree.
pub fn build_command() -> Command<'static> {
    Command::new("kaggle-connector")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("download")
                .about("Download a Kaggle dataset archive")
                .after_help("Example:\n  kaggle-connector download vijayuv/onlineretail -p online_retail_data")
                .arg(
                    Arg::new("dataset")
                        .help("Dataset identifier (owner/name)")
                        .required(true)
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .help("Destination directory (defaults to datasets/<owner>/<name>)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("no_unzip")
                        .long("no-unzip")
                        .help("Keep the ZIP archive instead of extracting it")
                        .action(ArgAction::SetTrue),
                )
                .arg(env_arg()),
        )
        .subcommand(
            Command::new("load")
                .about("Load a named dataset and print a preview")
                .after_help("Example:\n  kaggle-connector load nba-players --save data/nba.parquet")
                .arg(
                    Arg::new("kind")
                        .help("Dataset: 'online-retail' (retail, or) or 'nba-players' (nba, players)")
                        .required(true)
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .help("Local CSV file to parse instead of downloading")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("dataset")
                        .short('d')
                        .long("dataset")
                        .help("Override the dataset identifier (owner/name)")
                        .value_parser(clap::value_parser!(String))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Write the loaded table to this Parquet file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(env_arg()),
        )
        .subcommand(
            Command::new("toml")
                .about("Run a load described by a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

/// Maps parsed arguments to an [`Action`]. `Ok(None)` means no subcommand.
pub fn parse_action(matches: &ArgMatches) -> AppResult<Option<Action>> {
    let action = match matches.subcommand() {
        Some(("download", sub)) => Action::Download {
            dataset: sub
                .get_one::<String>("dataset")
                .cloned()
                .ok_or_else(|| AppError::InvalidInput("dataset is required".into()))?,
            path: sub.get_one::<PathBuf>("path").cloned(),
            unzip: !sub.get_one::<bool>("no_unzip").copied().unwrap_or(false),
            env_path: sub.get_one::<PathBuf>("env").cloned(),
        },
        Some(("load", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .ok_or_else(|| AppError::InvalidInput("dataset kind is required".into()))?
                .parse::<DatasetKind>()?;
            Action::Load {
                kind,
                file: sub.get_one::<PathBuf>("file").cloned(),
                dataset: sub.get_one::<String>("dataset").cloned(),
                save: sub.get_one::<PathBuf>("save").cloned(),
                env_path: sub.get_one::<PathBuf>("env").cloned(),
            }
        }
        Some(("toml", sub)) => Action::Toml {
            config: sub
                .get_one::<PathBuf>("config")
                .cloned()
                .ok_or_else(|| AppError::InvalidInput("config path is required".into()))?,
        },
        _ => return Ok(None),
    };
    Ok(Some(action))
}

/// Parses command-line arguments and runs the requested subcommand.
///
/// - `download`: fetch (and by default extract) one dataset archive
/// - `load`: load a named dataset, print its shape and first rows, optionally save as Parquet
/// - `toml`: same as `load`, with every option read from a TOML file
///
/// Prints help when no subcommand is given.
pub async fn cli() -> AppResult<()> {
    let mut cmd_for_help = build_command();
    let matches = build_command().get_matches();

    match parse_action(&matches)? {
        Some(action) => run(action).await,
        None => cmd_for_help
            .print_help()
            .map_err(|e| AppError::IoError(format!("Failed to print help: {e}"))),
    }
}

/// Executes a parsed [`Action`].
pub async fn run(action: Action) -> AppResult<()> {
    match action {
        Action::Download {
            dataset,
            path,
            unzip,
            env_path,
        } => {
            let connector = KaggleConnector::new(env_path.as_deref())?;
            let dest = connector
                .download_dataset(&dataset, path.as_deref(), unzip)
                .await?;
            info!(
                dataset = dataset.as_str(),
                dest = %dest.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "default location".into()),
                unzip,
                "Dataset downloaded"
            );
        }
        Action::Load {
            kind,
            file,
            dataset,
            save,
            env_path,
        } => {
            let config = ResolvedConfig {
                env_path,
                ..ResolvedConfig::default()
            };
            run_load(&config, kind, file, dataset, save).await?;
        }
        Action::Toml { config } => {
            let file_config = ResolvedConfigFile::from_toml_file(&config)?;
            let kind = file_config.dataset.parse::<DatasetKind>()?;
            run_load(
                &file_config.resolved,
                kind,
                file_config.file,
                file_config.dataset_id,
                file_config.save_parquet,
            )
            .await?;
        }
    }
    Ok(())
}

async fn run_load(
    config: &ResolvedConfig,
    kind: DatasetKind,
    file: Option<PathBuf>,
    dataset: Option<String>,
    save: Option<PathBuf>,
) -> AppResult<()> {
    let connector = KaggleConnector::from_config(config)?;
    let mut df = connector
        .load_dataset(kind, file.as_deref(), dataset.as_deref())
        .await?;

    println!(
        "{}: {} rows x {} columns",
        kind.display_name(),
        df.height(),
        df.width()
    );
    println!("{}", df.head(Some(PREVIEW_ROWS)));

    if let Some(path) = save {
        write_parquet(&mut df, &path)?;
    }
    Ok(())
}
