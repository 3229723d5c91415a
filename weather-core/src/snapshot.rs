//! Pure checks and conversions over provider-shaped payloads.
//!
//! Expected shape (`format=j1`):
//! `{ current_condition: [{ temp_C, FeelsLikeC, weatherDesc: [{value}], humidity,
//! windspeedKmph, pressure }], nearest_area: [{ areaName: [{value}], country?: [{value}] }] }`

use serde_json::Value;

use crate::{WeatherError, WeatherRecord, WeatherSnapshot};

const CURRENT_CONDITION: &str = "current_condition";
const NEAREST_AREA: &str = "nearest_area";

/// Whether `nearest_area` is present and non-empty.
///
/// The provider answers unknown locations with 200 and an empty area list,
/// so this runs before the full shape check. Any empty value (`[]`, `{}`,
/// `""`, `0`, `false`, `null`) counts as absent.
pub fn has_nearest_area(payload: &Value) -> bool {
    match payload.get(NEAREST_AREA) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

/// Structural check of everything [`extract_record`] relies on.
///
/// Never fails: any deviation is reported as `false`.
pub fn is_valid_snapshot(payload: &Value) -> bool {
    if !payload.is_object() {
        return false;
    }

    let (Some(current), Some(area)) =
        (first_entry(payload, CURRENT_CONDITION), first_entry(payload, NEAREST_AREA))
    else {
        return false;
    };

    let has_temperature = current.get("temp_C").is_some_and(|v| !v.is_null());

    has_temperature
        && first_value(current, "weatherDesc").is_some()
        && first_value(area, "areaName").is_some()
}

/// Builds a [`WeatherRecord`] from a snapshot that already passed [`is_valid_snapshot`].
///
/// Numeric fields arrive string-encoded; one that doesn't parse as an integer
/// yields [`WeatherError::MalformedData`].
pub fn extract_record(snapshot: &WeatherSnapshot) -> Result<WeatherRecord, WeatherError> {
    let payload = snapshot.as_value();

    let current = first_entry(payload, CURRENT_CONDITION)
        .ok_or_else(|| WeatherError::malformed("missing current conditions"))?;
    let area = first_entry(payload, NEAREST_AREA)
        .ok_or_else(|| WeatherError::malformed("missing nearest area"))?;

    let city = first_value(area, "areaName")
        .ok_or_else(|| WeatherError::malformed("missing area name"))?;
    let description = first_value(current, "weatherDesc")
        .ok_or_else(|| WeatherError::malformed("missing weather description"))?;

    Ok(WeatherRecord {
        city: city.to_string(),
        country: first_value(area, "country").unwrap_or_default().to_string(),
        temperature_c: int_field(current, "temp_C")?,
        feels_like_c: int_field(current, "FeelsLikeC")?,
        description: description.to_string(),
        humidity_pct: int_field(current, "humidity")?,
        wind_kmph: int_field(current, "windspeedKmph")?,
        pressure_mbar: int_field(current, "pressure")?,
    })
}

/// First element of a list field, if it is a mapping.
fn first_entry<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    value.get(field)?.as_array()?.first().filter(|entry| entry.is_object())
}

/// Non-empty `value` of the first `[{ "value": ... }]` element.
fn first_value<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    first_entry(value, field)?.get("value")?.as_str().filter(|s| !s.is_empty())
}

fn int_field(value: &Value, field: &str) -> Result<i32, WeatherError> {
    let parsed = match value.get(field) {
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };

    parsed.ok_or_else(|| {
        let raw = display(value.get(field));
        WeatherError::malformed(format!("field `{field}` is not an integer: {raw}"))
    })
}

fn display(value: Option<&Value>) -> String {
    value.map_or_else(|| "<missing>".to_string(), Value::to_string)
}
