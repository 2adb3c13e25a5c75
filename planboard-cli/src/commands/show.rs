use anyhow::Result;
use planboard_core::EventId;

use super::Context;
use crate::render::event_details;

pub async fn run(ctx: &Context, id: EventId) -> Result<()> {
    let session = ctx.open_session().await?;
    let event = session.find(&id)?;

    println!("{}", event_details(event, &ctx.prefs, ctx.palette()));

    Ok(())
}
