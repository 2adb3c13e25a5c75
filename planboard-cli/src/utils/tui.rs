use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Prompt the user with retry on parse errors.
pub fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(input.trim()) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Like `prompt_with_retry`, but an empty answer keeps `current`
/// (or skips, when there is nothing current).
pub fn prompt_optional<T, F>(prompt: &str, current: Option<String>, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(current) = &current {
            input = input.default(current.clone());
        }

        let answer = input.interact_text()?;
        if answer.trim().is_empty() {
            return Ok(None);
        }

        match parse(answer.trim()) {
            Ok(result) => return Ok(Some(result)),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
