//! Validation and sanitization rules for geographic input.
//!
//! Every rule is a pure function: no I/O, no shared state. Services call them
//! before accepting any coordinate or radius, so a
//! [`LocationValidationError`] is always reported before a side effect.

use crate::location::domain::{Coordinate, LocationValidationError};

/// Smallest accepted geofence radius in metres.
pub const MIN_RADIUS_METERS: f64 = 1.0;

/// Largest accepted geofence radius in metres.
pub const MAX_RADIUS_METERS: f64 = 10_000.0;

/// Returns whether `value` is a finite latitude within `[-90, 90]`.
#[must_use]
pub const fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && value >= -90.0 && value <= 90.0
}

/// Returns whether `value` is a finite longitude within `[-180, 180]`.
#[must_use]
pub const fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && value >= -180.0 && value <= 180.0
}

/// Returns whether both components of `coordinate` are valid.
#[must_use]
pub const fn is_valid_coordinate(coordinate: &Coordinate) -> bool {
    is_valid_latitude(coordinate.latitude()) && is_valid_longitude(coordinate.longitude())
}

/// Returns whether `value` is a finite radius within `[1, 10000]` metres.
#[must_use]
pub const fn is_valid_radius(value: f64) -> bool {
    value.is_finite() && value >= MIN_RADIUS_METERS && value <= MAX_RADIUS_METERS
}

/// Returns the reason `coordinate` cannot be accepted, if any.
///
/// Latitude is checked before longitude; `None` input reports
/// [`LocationValidationError::Missing`].
#[must_use]
pub const fn coordinate_validation_error(
    coordinate: Option<&Coordinate>,
) -> Option<LocationValidationError> {
    let Some(value) = coordinate else {
        return Some(LocationValidationError::Missing);
    };
    if !is_valid_latitude(value.latitude()) {
        return Some(LocationValidationError::InvalidLatitude(value.latitude()));
    }
    if !is_valid_longitude(value.longitude()) {
        return Some(LocationValidationError::InvalidLongitude(value.longitude()));
    }
    None
}

/// Returns [`LocationValidationError::InvalidRadius`] when `radius_meters`
/// is out of range.
#[must_use]
pub const fn radius_validation_error(radius_meters: f64) -> Option<LocationValidationError> {
    if is_valid_radius(radius_meters) {
        None
    } else {
        Some(LocationValidationError::InvalidRadius(radius_meters))
    }
}

/// Normalizes free-text address input before geocoding.
///
/// Characters other than word characters, whitespace, commas, periods and
/// hyphens are removed, then whitespace runs collapse to one space and the
/// ends are trimmed. The result is stable under repeated application.
#[must_use]
pub fn sanitize_address_text(text: &str) -> String {
    let kept: String = text.chars().filter(|ch| is_address_char(*ch)).collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_address_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '_' | ',' | '.' | '-')
}

/// Returns whether `text` is a raw `<number>,<number>` pair.
///
/// Each number may carry a sign and a decimal part; whitespace is allowed
/// around the comma and at the ends.
#[must_use]
pub fn looks_like_coordinate_pair(text: &str) -> bool {
    text.trim()
        .split_once(',')
        .is_some_and(|(first, second)| is_decimal(first.trim()) && is_decimal(second.trim()))
}

/// Accepts `[+-]digits[.digits]`, `[+-]digits.` and `[+-].digits`.
fn is_decimal(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());

    (!whole.is_empty() || !fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}
