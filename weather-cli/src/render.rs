use weather_core::WeatherRecord;

use crate::localization::{Locale, weather_emoji};

const RULE_WIDTH: usize = 50;

/// Human-readable report for one record.
pub fn render_report(record: &WeatherRecord, locale: Locale) -> String {
    let l = locale.labels();
    let rule = "=".repeat(RULE_WIDTH);

    let mut place = record.city.clone();
    if !record.country.is_empty() {
        place.push_str(", ");
        place.push_str(&record.country);
    }

    [
        rule.clone(),
        format!("📍 {}: {place}", l.city),
        format!("🌡️  {}: {}°C", l.temperature, record.temperature_c),
        format!("🤔 {}: {}°C", l.feels_like, record.feels_like_c),
        format!(
            "{} {}: {}",
            weather_emoji(&record.description),
            l.description,
            locale.describe(&record.description)
        ),
        format!("💧 {}: {}%", l.humidity, record.humidity_pct),
        format!("💨 {}: {} {}", l.wind, record.wind_kmph, l.wind_unit),
        format!("⬇️  {}: {} {}", l.pressure, record.pressure_mbar, l.pressure_unit),
        rule,
    ]
    .join("\n")
}

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
