mod client;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use planboard_core::view::CalendarView;
use planboard_core::{Color, DateClick, EventId, EventTime};

use commands::Context;
use commands::edit::EditArgs;
use commands::new::NewArgs;

#[derive(Parser)]
#[command(name = "planboard")]
#[command(about = "Browse and edit the events on your calendar server")]
struct Cli {
    /// Events server base URL (overrides config.toml)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the agenda for the current view
    List {
        /// month, week or list (remembered for next time)
        #[arg(short, long)]
        view: Option<CalendarView>,

        /// Show the range containing this date (YYYY-MM-DD)
        #[arg(short, long, value_parser = commands::parse_date)]
        date: Option<NaiveDate>,
    },
    /// Show one event
    Show { id: String },
    /// Create an event
    New {
        title: Option<String>,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long, value_parser = commands::parse_date)]
        date: Option<NaiveDate>,

        /// Pre-fill from a day or time slot (e.g. "2025-03-20T15:00")
        #[arg(long)]
        at: Option<DateClick>,

        /// Start time (HH:MM); makes the event timed
        #[arg(short, long, value_parser = commands::parse_time)]
        time: Option<NaiveTime>,

        /// End time (HH:MM); earlier than the start means the next day
        #[arg(short, long, value_parser = commands::parse_time)]
        end: Option<NaiveTime>,

        /// Category name (event, deadline, meeting, reminder, personal) or #rrggbb
        #[arg(short, long)]
        category: Option<Color>,

        #[arg(long, conflicts_with_all = ["time", "end"])]
        all_day: bool,
    },
    /// Change an event's fields (prompts for everything when no flags are given)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, value_parser = commands::parse_date)]
        date: Option<NaiveDate>,

        #[arg(short, long, value_parser = commands::parse_time)]
        time: Option<NaiveTime>,

        #[arg(short, long, value_parser = commands::parse_time)]
        end: Option<NaiveTime>,

        #[arg(short, long)]
        category: Option<Color>,

        #[arg(long, conflicts_with_all = ["timed", "time", "end"])]
        all_day: bool,

        #[arg(long)]
        timed: bool,
    },
    /// Reschedule an event, keeping its length
    Move {
        id: String,

        /// New start: a date keeps the time of day, or a full "YYYY-MM-DDTHH:MM"
        #[arg(long, conflicts_with = "by", required_unless_present = "by")]
        to: Option<EventTime>,

        /// Shift by a duration, e.g. "1day", "90m"
        #[arg(long)]
        by: Option<humantime::Duration>,

        /// With --by, shift into the past
        #[arg(long, requires = "by")]
        earlier: bool,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Events starting today or tomorrow
    Upcoming,
    /// Show or change display preferences
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current preferences
    Show,
    /// Set a preference, e.g. `settings set timeFormat 24`
    Set { key: String, value: String },
    /// Print config and preference file locations
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut ctx = Context::load(cli.server)?;
    log::debug!("Using events server {}", ctx.config.server_url);

    match cli.command {
        Commands::List { view, date } => commands::list::run(&mut ctx, view, date).await,
        Commands::Show { id } => commands::show::run(&ctx, EventId::new(id)).await,
        Commands::New {
            title,
            date,
            at,
            time,
            end,
            category,
            all_day,
        } => {
            let args = NewArgs {
                title,
                date,
                at,
                time,
                end,
                category,
                all_day,
            };
            commands::new::run(&ctx, args).await
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            end,
            category,
            all_day,
            timed,
        } => {
            let all_day = match (all_day, timed) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let args = EditArgs {
                title,
                date,
                time,
                end,
                category,
                all_day,
            };
            commands::edit::run(&ctx, EventId::new(id), args).await
        }
        Commands::Move {
            id,
            to,
            by,
            earlier,
        } => {
            let movement = commands::reschedule::resolve_move(to, by, earlier)?;
            commands::reschedule::run(&ctx, EventId::new(id), movement).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&ctx, EventId::new(id), yes).await,
        Commands::Upcoming => commands::upcoming::run(&ctx).await,
        Commands::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => commands::settings::show(&ctx),
            SettingsAction::Set { key, value } => commands::settings::set(&mut ctx, &key, &value),
            SettingsAction::Path => commands::settings::paths(&ctx),
        },
    }
}
