//! `daily` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and resolve the storage root and target date.
//! - Delegate every read/write to `daily_core`.
//! - Map failures to `error: ...` on stderr and exit code 1.

use chrono::{Days, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use daily_core::config::{config_path, default_log_dir};
use daily_core::{
    default_log_level, init_logging, load_config, render_cheat_sheet, resolve_storage_root,
    write_default_config, CheatSheet, ConfigError, DailyRepository, DailyService,
    FsDailyRepository, LogLevel, RepoError, SectionKind, TagFilter,
};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "daily", version, about = "Log daily standup notes and print a cheat sheet")]
struct Cli {
    /// Directory holding daily files (overrides the config file)
    #[arg(long, global = true, env = "DAILY_DIR", value_name = "DIR")]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log work you completed
    Did(LogArgs),
    /// Log work you plan to do today
    Plan(LogArgs),
    /// Log a blocker
    Block(LogArgs),
    /// Log a meeting
    Meeting(LogArgs),
    /// Append a line to Quick Notes
    Note(NoteArgs),
    /// Print the standup cheat sheet
    Cheat(CheatArgs),
    /// Print the path of a daily file
    Path(DateArgs),
    /// Write the default config file
    Init,
}

#[derive(Args)]
struct LogArgs {
    #[arg(required = true, value_name = "TEXT")]
    text: Vec<String>,
    /// Comma-separated tags, e.g. `cicd,aws`
    #[arg(short, long, value_name = "TAGS")]
    tags: Option<String>,
    /// Target date (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
}

#[derive(Args)]
struct NoteArgs {
    #[arg(required = true, value_name = "TEXT")]
    text: Vec<String>,
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
}

#[derive(Args)]
struct DateArgs {
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
}

#[derive(Args)]
struct CheatArgs {
    /// Only show entries carrying one of these comma-separated tags
    #[arg(short, long, value_name = "TAGS")]
    tags: Option<String>,
    /// Use today's file instead of yesterday's
    #[arg(long, conflicts_with = "date")]
    today: bool,
    /// Use the file of this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,
    /// Number of days ending at the target date to include
    #[arg(long, default_value_t = 1)]
    days: u32,
    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug)]
enum CliError {
    HomeDirUnavailable,
    Repo(RepoError),
    Config(ConfigError),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(
                f,
                "could not determine the home directory; set HOME to locate ~/.daily"
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "failed to encode JSON: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HomeDirUnavailable => None,
            Self::Repo(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli, Local::now().date_naive()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, today: NaiveDate) -> Result<(), CliError> {
    let home_dir = require_home(dirs::home_dir())?;
    let home = home_dir.as_path();
    start_logging(home);

    if let Command::Init = cli.command {
        let path = config_path(home);
        if write_default_config(home)? {
            println!("Created {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    let root = storage_root(cli.dir.as_deref(), home);
    let service = DailyService::new(FsDailyRepository::new(root));

    match cli.command {
        Command::Did(args) => log_entry(&service, SectionKind::Yesterday, args, today),
        Command::Plan(args) => log_entry(&service, SectionKind::Today, args, today),
        Command::Block(args) => log_entry(&service, SectionKind::Blockers, args, today),
        Command::Meeting(args) => log_entry(&service, SectionKind::Meetings, args, today),
        Command::Note(args) => {
            let date = args.date.unwrap_or(today);
            service.add_note(date, &args.text.join(" "))?;
            println!(
                "Added to Quick Notes in {}",
                service.repo().resolve_path(date).display()
            );
            Ok(())
        }
        Command::Cheat(args) => cheat(&service, args, today),
        Command::Path(args) => {
            let date = args.date.unwrap_or(today);
            println!("{}", service.repo().resolve_path(date).display());
            Ok(())
        }
        Command::Init => Ok(()),
    }
}

fn log_entry(
    service: &DailyService<FsDailyRepository>,
    kind: SectionKind,
    args: LogArgs,
    today: NaiveDate,
) -> Result<(), CliError> {
    let date = args.date.unwrap_or(today);
    let tags = args.tags.unwrap_or_default();
    service.log_entry(date, kind, &args.text.join(" "), &[tags])?;
    println!(
        "Added to {} in {}",
        kind.name(),
        service.repo().resolve_path(date).display()
    );
    Ok(())
}

fn cheat(
    service: &DailyService<FsDailyRepository>,
    args: CheatArgs,
    today: NaiveDate,
) -> Result<(), CliError> {
    let target = match (args.date, args.today) {
        (Some(date), _) => date,
        (None, true) => today,
        (None, false) => today.checked_sub_days(Days::new(1)).unwrap_or(today),
    };
    let filter = TagFilter::from_list(args.tags.as_deref().unwrap_or(""));

    let sheets: Vec<CheatSheet> = if args.days > 1 {
        service.recent_cheat_sheets(target, args.days, &filter)?
    } else {
        vec![service.cheat_sheet(target, &filter)?]
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sheets)?);
        return Ok(());
    }

    let blocks: Vec<String> = sheets
        .iter()
        .map(|sheet| {
            if sheets.len() > 1 {
                format!("== {} ==\n{}", sheet.date, render_cheat_sheet(sheet))
            } else {
                render_cheat_sheet(sheet)
            }
        })
        .collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn require_home(found: Option<PathBuf>) -> Result<PathBuf, CliError> {
    found
        .filter(|home| !home.as_os_str().is_empty())
        .ok_or(CliError::HomeDirUnavailable)
}

fn storage_root(override_dir: Option<&Path>, home: &Path) -> PathBuf {
    let path = config_path(home);
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: ignoring config file: {err}");
            None
        }
    };
    let (root, source) = resolve_storage_root(override_dir, config.as_ref(), home);
    info!(
        "event=storage_root module=cli status=ok source={} root={}",
        source.as_str(),
        root.display()
    );
    root
}

fn start_logging(home: &Path) {
    let level = match std::env::var("DAILY_LOG") {
        Ok(value) => value.parse::<LogLevel>().unwrap_or_else(|err| {
            eprintln!("warning: {err}");
            default_log_level()
        }),
        Err(_) => default_log_level(),
    };
    if let Err(err) = init_logging(level, &default_log_dir(home)) {
        eprintln!("warning: logging disabled: {err}");
    }
}
