use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use cityweather_core::{Config, WeatherProvider, WeatherQuery, provider_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use log::info;

use crate::output::{render_json, render_text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Bartin" or "New York".
        city: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until an empty line or Esc.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let (output, ok) = show(provider.as_ref(), &city, json).await?;

                println!("{output}");
                Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Interactive => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                interactive(provider.as_ref()).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key);
    let path = config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

/// Look up one city and render it. The flag is false when the lookup failed.
pub async fn show(
    provider: &dyn WeatherProvider,
    city: &str,
    json: bool,
) -> anyhow::Result<(String, bool)> {
    let query = WeatherQuery::new(city)?;
    let (result, shown) = provider.present(&query).await;

    if let Err(reason) = &result {
        info!("Lookup for '{}' failed: {reason:?}", query.city());
    }

    let output = if json { render_json(&shown)? } else { render_text(&result, &shown) };
    Ok((output, result.is_ok()))
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    loop {
        let answer = Text::new("Enter city name:")
            .with_placeholder("Bartin")
            .prompt_skippable();

        let city = match answer {
            Ok(Some(city)) if !city.trim().is_empty() => city,
            Ok(_) | Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        let (output, _) = show(provider, &city, false).await?;
        println!("{output}\n");
    }
}
