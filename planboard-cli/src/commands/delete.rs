use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use planboard_core::EventId;

use super::Context;

pub async fn run(ctx: &Context, id: EventId, yes: bool) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let title = session.find(&id)?.title.clone();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete this event? ({})", title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", ctx.palette().muted("  Kept"));
            return Ok(());
        }
    }

    session.delete_event(&id).await?;
    println!("{}", format!("  Deleted: {}", title).red());

    Ok(())
}
