use anyhow::Result;
use owo_colors::OwoColorize;
use planboard_core::config::ClientConfig;
use planboard_core::prefs::PrefKey;
use planboard_core::PreferenceStore;

use super::Context;

pub fn show(ctx: &Context) -> Result<()> {
    let palette = ctx.palette();

    println!("{}", palette.heading("Preferences"));
    for key in PrefKey::ALL {
        let value = ctx.prefs.get(key);
        if ctx.store.get(key.as_str()).is_some() {
            println!("  {:<12} {}", key.as_str(), value);
        } else {
            println!("  {:<12} {} {}", key.as_str(), value, palette.muted("(default)"));
        }
    }

    println!();
    println!("{}", palette.heading("Server"));
    println!("  {}", ctx.config.server_url);

    Ok(())
}

pub fn set(ctx: &mut Context, key: &str, value: &str) -> Result<()> {
    let key: PrefKey = key.parse()?;
    ctx.prefs.set(key, value)?;

    let stored = ctx.prefs.get(key);
    ctx.store.set(key.as_str(), &stored)?;

    println!("{}", format!("  {} = {}", key, stored).green());
    Ok(())
}

pub fn paths(ctx: &Context) -> Result<()> {
    let config_path = ClientConfig::config_path()?;

    println!("{}", ctx.palette().heading("Paths"));
    println!("  Config:       {}", config_path.display());
    println!("  Preferences:  {}", ctx.store.path().display());

    Ok(())
}
