use anyhow::{Context as _, Result};
use chrono::{Duration, Local};
use owo_colors::OwoColorize;
use planboard_core::format::describe_when;
use planboard_core::{EventId, EventMove, EventTime};

use super::Context;

/// Convert `--to` / `--by` into a move.
pub fn resolve_move(
    to: Option<EventTime>,
    by: Option<humantime::Duration>,
    earlier: bool,
) -> Result<EventMove> {
    match (to, by) {
        (Some(to), None) => Ok(EventMove::To(to)),
        (None, Some(by)) => {
            let delta = Duration::from_std(*by).context("Duration too large")?;
            Ok(EventMove::By(if earlier { -delta } else { delta }))
        }
        _ => anyhow::bail!("Specify exactly one of --to or --by"),
    }
}

pub async fn run(ctx: &Context, id: EventId, movement: EventMove) -> Result<()> {
    let mut session = ctx.open_session().await?;
    session.move_event(&id, movement, &Local).await?;

    let event = session.find(&id)?;
    let when = describe_when(event, ctx.prefs.date_format, ctx.prefs.time_format, &Local);
    println!("{} {}", format!("  Moved: {}", event.title).yellow(), when.dimmed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_duration_can_go_backwards() {
        let by: humantime::Duration = "2h".parse().unwrap();
        assert_eq!(
            resolve_move(None, Some(by), true).unwrap(),
            EventMove::By(Duration::hours(-2))
        );
    }

    #[test]
    fn to_takes_a_date_or_datetime() {
        let to = EventTime::parse("2025-03-22").unwrap();
        assert_eq!(resolve_move(Some(to), None, false).unwrap(), EventMove::To(to));
    }

    #[test]
    fn needs_exactly_one_target() {
        assert!(resolve_move(None, None, false).is_err());
    }
}
