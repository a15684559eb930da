//! Validation utilities for submissions and lab results

use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidationErrors;

use crate::models::{NewCollection, NewLabResult};

// ============================================================================
// Field checks
// ============================================================================

/// Validate a percentage is within 0-100
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate a moisture display value such as "8.5%" or "8.5"
pub fn validate_moisture(moisture: &str) -> Result<(), &'static str> {
    let number = moisture.trim().trim_end_matches('%').trim();
    let value = Decimal::from_str(number).map_err(|_| "Moisture must be a number")?;
    validate_percentage(value).map_err(|_| "Moisture must be between 0 and 100%")
}

/// Validate latitude/longitude display strings
pub fn validate_coordinates(latitude: &str, longitude: &str) -> Result<(), &'static str> {
    let lat = Decimal::from_str(latitude.trim()).map_err(|_| "Latitude must be a number")?;
    let lon = Decimal::from_str(longitude.trim()).map_err(|_| "Longitude must be a number")?;
    if lat < Decimal::from(-90) || lat > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if lon < Decimal::from(-180) || lon > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Parse a quantity display string into kilograms.
///
/// Accepts "10kg", "5 kg", "2.5 KG", "500 g" and bare numbers (taken as kg).
/// Returns `None` for anything else.
pub fn parse_quantity_kg(quantity: &str) -> Option<Decimal> {
    let trimmed = quantity.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value = Decimal::from_str(number).ok()?;

    match unit.trim().to_ascii_lowercase().as_str() {
        "" | "kg" | "kgs" => Some(value),
        "g" | "gm" | "grams" => Some(value / Decimal::from(1000)),
        "t" | "ton" | "tonnes" => Some(value * Decimal::from(1000)),
        _ => None,
    }
}

// ============================================================================
// Input checks
// ============================================================================

/// Cross-field checks for a submission beyond the derive rules
pub fn validate_new_collection(input: &NewCollection) -> Result<(), String> {
    use validator::Validate;

    input
        .validate()
        .map_err(|e| describe_validation_errors(&e))?;

    if let Some(moisture) = input.moisture.as_deref().filter(|m| !m.trim().is_empty()) {
        validate_moisture(moisture).map_err(str::to_string)?;
    }
    match (input.latitude.as_deref(), input.longitude.as_deref()) {
        (Some(lat), Some(lon)) => validate_coordinates(lat, lon).map_err(str::to_string)?,
        (None, None) => {}
        _ => return Err("Latitude and longitude must be provided together".to_string()),
    }
    Ok(())
}

pub fn validate_new_lab_result(input: &NewLabResult) -> Result<(), String> {
    use validator::Validate;

    input
        .validate()
        .map_err(|e| describe_validation_errors(&e))?;

    for value in [input.moisture_percent, input.purity_percent].into_iter().flatten() {
        validate_percentage(value).map_err(str::to_string)?;
    }
    Ok(())
}

/// Flatten `validator` errors into one user-facing sentence
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
