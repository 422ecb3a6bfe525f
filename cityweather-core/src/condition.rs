//! OpenWeather condition codes and their display glyphs.
//!
//! See <https://openweathermap.org/weather-conditions> for the code groups.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionGroup {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    VolcanicAsh,
    Squall,
    Tornado,
    Clear,
    Clouds,
}

impl ConditionGroup {
    /// Group a condition code, or `None` if the code is not in any known range.
    pub fn from_code(code: i64) -> Option<Self> {
        let group = match code {
            200..=232 => ConditionGroup::Thunderstorm,
            300..=321 => ConditionGroup::Drizzle,
            500..=531 => ConditionGroup::Rain,
            600..=622 => ConditionGroup::Snow,
            701..=741 => ConditionGroup::Atmosphere,
            762 => ConditionGroup::VolcanicAsh,
            771 => ConditionGroup::Squall,
            781 => ConditionGroup::Tornado,
            800 => ConditionGroup::Clear,
            801..=804 => ConditionGroup::Clouds,
            _ => return None,
        };

        Some(group)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ConditionGroup::Thunderstorm => "⛈",
            ConditionGroup::Drizzle => "🌦",
            ConditionGroup::Rain => "🌧",
            ConditionGroup::Snow => "❄",
            ConditionGroup::Atmosphere => "🌫",
            ConditionGroup::VolcanicAsh => "🌋",
            ConditionGroup::Squall => "💨",
            ConditionGroup::Tornado => "🌪",
            ConditionGroup::Clear => "☀",
            ConditionGroup::Clouds => "☁",
        }
    }
}

/// Emoji for a condition code; empty for codes outside every group.
pub fn emoji_for(code: i64) -> &'static str {
    ConditionGroup::from_code(code).map_or("", |group| group.emoji())
}
