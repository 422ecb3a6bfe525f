use anyhow::{Context, Result};
use cityweather_core::{Presentation, WeatherResult};

/// Human-readable block for one lookup.
///
/// A heading with the resolved location and observation time is added when
/// the API supplied them.
pub fn render_text(result: &WeatherResult, shown: &Presentation) -> String {
    let mut lines = Vec::new();

    if let Ok(weather) = result {
        let heading = match (&weather.location_name, weather.observed_at) {
            (Some(name), Some(at)) => Some(format!("{name} (as of {} UTC)", at.format("%H:%M"))),
            (Some(name), None) => Some(name.clone()),
            (None, Some(at)) => Some(format!("As of {} UTC", at.format("%H:%M"))),
            (None, None) => None,
        };
        lines.extend(heading);
    }

    lines.push(shown.temperature.clone());
    if !shown.emoji.is_empty() {
        lines.push(shown.emoji.clone());
    }
    if !shown.description.is_empty() {
        lines.push(shown.description.clone());
    }

    lines.join("\n")
}

pub fn render_json(shown: &Presentation) -> Result<String> {
    serde_json::to_string_pretty(shown).context("Failed to serialize weather as JSON")
}
