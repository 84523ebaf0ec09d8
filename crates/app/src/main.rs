use std::fmt;

use roadmap_core::model::{LAST_DAY, TaskId};
use services::{AdvanceWeekError, AppServices, Clock};

mod render;

const DEFAULT_DB_URL: &str = "sqlite://roadmap.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    MissingTaskId,
    InvalidDay { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::MissingTaskId => write!(f, "toggle requires a task id"),
            ArgsError::InvalidDay { raw } => write!(f, "invalid --day value (expected 1-7): {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  roadmap [--db <sqlite_url>] [command]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status [--json]       Show week progress (default)");
    eprintln!("  tasks [--day <1-7>]   List tasks for a day (default: today, else day 1)");
    eprintln!("  toggle <task-id>      Mark a task done or not done");
    eprintln!("  advance               Move to the next week once every task is done");
    eprintln!("  reset                 Start over from week 1");
    eprintln!("  clear                 Delete saved progress");
    eprintln!("  export                Print the saved progress record");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ROADMAP_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Status { json: bool },
    Tasks { day: Option<u8> },
    Toggle(TaskId),
    Advance,
    Reset,
    Clear,
    Export,
}

#[derive(Debug)]
struct Args {
    db_url: String,
    command: Command,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = normalize_sqlite_url(
            std::env::var("ROADMAP_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string()),
        );
        let mut command_name: Option<String> = None;
        let mut positional: Vec<String> = Vec::new();
        let mut json = false;
        let mut day: Option<u8> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--day" => {
                    let value = require_value(&mut args, "--day")?;
                    day = Some(parse_day(&value)?);
                }
                "--json" => json = true,
                "--help" | "-h" => return Ok(None),
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if command_name.is_none() => command_name = Some(arg),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match command_name.as_deref().unwrap_or("status") {
            "status" => Command::Status { json },
            "tasks" => Command::Tasks { day },
            "toggle" => {
                let raw = positional.next().ok_or(ArgsError::MissingTaskId)?;
                Command::Toggle(TaskId::new(raw.trim()))
            }
            "advance" => Command::Advance,
            "reset" => Command::Reset,
            "clear" => Command::Clear,
            "export" => Command::Export,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };
        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Some(Self { db_url, command }))
    }
}

fn parse_day(raw: &str) -> Result<u8, ArgsError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|day| (1..=LAST_DAY).contains(day))
        .ok_or_else(|| ArgsError::InvalidDay {
            raw: raw.to_owned(),
        })
}

fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    prepare_sqlite_file(&parsed.db_url)?;
    log::debug!("opening progress database at {}", parsed.db_url);
    let mut app = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;

    match parsed.command {
        Command::Status { json } => {
            let view = app.dashboard();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::status(&view));
            }
        }
        Command::Tasks { day } => {
            let view = app.dashboard();
            let day = day.or(view.today).unwrap_or(1);
            print!("{}", render::day_tasks(&view, day));
        }
        Command::Toggle(task_id) => {
            let before = app.store().state().clone();
            let after = app.store_mut().toggle(task_id.clone()).await;
            if *after == before {
                eprintln!("no task with id {task_id} in the current week");
            } else {
                print!("{}", render::status(&app.dashboard()));
            }
        }
        Command::Advance => match app.store_mut().advance_if_complete().await {
            Ok(_) => print!("{}", render::status(&app.dashboard())),
            Err(AdvanceWeekError::WeekIncomplete { completed, total }) => {
                println!(
                    "Finish every task of this week first: {completed}/{total} done."
                );
            }
            Err(err) => return Err(err.into()),
        },
        Command::Reset => {
            app.store_mut().reset().await;
            print!("{}", render::status(&app.dashboard()));
        }
        Command::Clear => {
            app.store_mut().clear().await;
            println!("Saved progress cleared.");
        }
        Command::Export => match app.saved_blob().await? {
            Some(blob) => println!("{blob}"),
            None => eprintln!("no saved progress"),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
