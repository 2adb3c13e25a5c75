use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use planboard_core::upcoming::{Due, upcoming_alerts};

use super::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let today = Local::now().date_naive();

    let alerts = upcoming_alerts(session.events(), today, &Local);
    if alerts.is_empty() {
        println!("{}", ctx.palette().muted("Nothing today or tomorrow"));
        return Ok(());
    }

    for alert in &alerts {
        match alert.due {
            Due::Today => println!("  {}", alert.to_string().yellow()),
            Due::Tomorrow => println!("  {}", alert),
        }
    }

    Ok(())
}
