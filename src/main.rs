// Interpreter Roster
// Command-line entry point

use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;

use interpreter_roster::models::event::{EventId, EventStatus};
use interpreter_roster::models::interpreter::InterpreterId;
use interpreter_roster::models::settings::AppConfig;
use interpreter_roster::services::persistence::SqliteStore;
use interpreter_roster::services::planner::{Planner, RosterView};
use interpreter_roster::services::settings::{
    resolve_cache_path, resolve_database_path, SettingsService,
};
use interpreter_roster::utils::date::{format_day, parse_month, short_label};

const USAGE: &str = "usage: interpreter-roster [events | roster <event-id> | availability <interpreter-id> <YYYY-MM> | activity]";

enum Command {
    Events,
    Roster(EventId),
    Availability(InterpreterId, String),
    Activity,
}

fn parse_command(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Events),
        [cmd] if cmd == "events" => Ok(Command::Events),
        [cmd] if cmd == "activity" => Ok(Command::Activity),
        [cmd, event] if cmd == "roster" => Ok(Command::Roster(EventId::new(event.as_str()))),
        [cmd, interpreter, month] if cmd == "availability" => Ok(Command::Availability(
            InterpreterId::new(interpreter.as_str()),
            month.clone(),
        )),
        _ => bail!("{}", USAGE),
    }
}

fn main() -> ExitCode {
    let settings = SettingsService::from_project_dirs();
    let (config, config_error) = match settings.as_ref().map(SettingsService::get) {
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (AppConfig::default(), Some(err)),
        None => (AppConfig::default(), None),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    if let Some(err) = config_error {
        log::warn!("Failed to load settings: {:#}, using defaults", err);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let result = parse_command(&args).and_then(|command| {
        let mut planner = open_planner(&config)?;
        let outcome = run(command, &mut planner);
        for warning in planner.take_warnings() {
            eprintln!("warning: {}", warning);
        }
        outcome
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn open_planner(config: &AppConfig) -> Result<Planner> {
    let db_path = resolve_database_path(config);
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let db_path = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Database path is not valid UTF-8: {}", db_path.display()))?;
    log::info!("Opening roster database at {}", db_path);
    let store = SqliteStore::open(db_path)?;

    Ok(Planner::open(Box::new(store), config, resolve_cache_path(config)))
}

fn run(command: Command, planner: &mut Planner) -> Result<()> {
    match command {
        Command::Events => print_events(planner),
        Command::Roster(event_id) => {
            if !planner.select_event(&event_id) {
                bail!("Unknown event {}", event_id);
            }
            let view = planner
                .roster_view()
                .ok_or_else(|| anyhow!("No roster for event {}", event_id))?;
            print_roster(&view);
        }
        Command::Availability(interpreter_id, month) => {
            let (from, to) = parse_month(&month)
                .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", month))?;
            let interpreter = planner
                .interpreter(&interpreter_id)
                .ok_or_else(|| anyhow!("Unknown interpreter {}", interpreter_id))?;
            println!("{} ({})", interpreter.full_name, month);
            for (day, highlight) in planner.availability(&interpreter_id, from, to) {
                println!("{}  {}", format_day(day), highlight.css_class().unwrap_or("-"));
            }
        }
        Command::Activity => {
            for entry in planner.recent_activity() {
                println!(
                    "{}  {:<10} {:<22} {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.user,
                    entry.action,
                    entry.details
                );
            }
        }
    }
    Ok(())
}

fn print_events(planner: &Planner) {
    let today = Local::now().date_naive();
    for event in planner.upcoming_events(today) {
        let (state, location) = match event.status() {
            EventStatus::FullyAssigned(location) => ("fully assigned", location),
            EventStatus::Open(location) => ("open", location),
        };
        println!(
            "{}  {} - {}  {} @ {}  {}/{} {}",
            event.id,
            format_day(event.start),
            format_day(event.last_day()),
            event.title,
            location,
            event.interpreter_ids.len(),
            event.interpreters_needed,
            state
        );
    }
}

fn print_roster(view: &RosterView) {
    println!("{} @ {}", view.title, view.location);

    let days: Vec<String> = view.days.iter().map(|day| short_label(*day)).collect();
    let group_header = if view.group_column { format!("{:<12}", "Group") } else { String::new() };
    println!("{}{:<4}{:<20}{:<16}{}", group_header, "#", "Name", "Position", days.join(" "));

    for (row, entry) in view.rows.iter().enumerate() {
        let group_cell = if view.group_column {
            let label = match view.band_at(row) {
                Some(band) if band.first_row == row => band.name.as_str(),
                Some(_) => "|",
                None => "",
            };
            format!("{:<12}", label)
        } else {
            String::new()
        };
        let marks: Vec<&str> = entry
            .working_days
            .iter()
            .map(|working| if *working { "X" } else { "." })
            .collect();
        println!(
            "{}{:<4}{:<20}{:<16}{}",
            group_cell,
            entry.number,
            entry.full_name,
            entry.position,
            marks.join(" ")
        );
    }
}
