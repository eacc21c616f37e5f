//! Restaurant field rules: length limits, fixed-point ranges, phone format.
//!
//! The `validate_*` functions have the signature `validator` expects for
//! `#[validate(custom(function = ...))]` so write DTOs can reference them
//! directly.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a restaurant or branch name.
pub const MAX_NAME_LEN: u64 = 100;

/// Maximum length of an address or feature line.
pub const MAX_ADDRESS_LEN: u64 = 255;

/// Maximum length of a lookup name (cuisine type, category).
pub const MAX_LOOKUP_NAME_LEN: u64 = 20;

/// Maximum length of a region or tag name.
pub const MAX_LABEL_LEN: u64 = 50;

/// Maximum length of a stored phone number (E.164 plus the leading `+`).
pub const MAX_PHONE_LEN: u64 = 16;

/// Decimal places stored for ratings.
pub const RATING_SCALE: u32 = 2;

/// Decimal places stored for latitude / longitude.
pub const COORDINATE_SCALE: u32 = 12;

/// E.164: a `+`, a non-zero country code digit, up to 15 digits in total.
const E164_PATTERN: &str = r"^\+[1-9][0-9]{1,14}$";

static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(E164_PATTERN).expect("valid regex"));

/// Highest rating that fits `NUMERIC(3,2)`.
pub fn max_rating() -> Decimal {
    Decimal::new(999, RATING_SCALE)
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Phone numbers are stored in E.164 form, e.g. `+821012345678`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if E164_RE.is_match(phone) {
        Ok(())
    } else {
        Err(error(
            "phone_e164",
            format!("'{phone}' is not an E.164 phone number"),
        ))
    }
}

/// Ratings lie in `[0, 9.99]` with at most two decimal places.
pub fn validate_rating(rating: &Decimal) -> Result<(), ValidationError> {
    if *rating < Decimal::ZERO || *rating > max_rating() {
        return Err(error("rating_range", "rating must be between 0 and 9.99"));
    }
    if rating.scale() > RATING_SCALE {
        return Err(error(
            "rating_scale",
            "rating must have at most 2 decimal places",
        ));
    }
    Ok(())
}

pub fn validate_latitude(latitude: &Decimal) -> Result<(), ValidationError> {
    validate_coordinate(latitude, 90, "latitude")
}

pub fn validate_longitude(longitude: &Decimal) -> Result<(), ValidationError> {
    validate_coordinate(longitude, 180, "longitude")
}

fn validate_coordinate(value: &Decimal, bound: i64, field: &str) -> Result<(), ValidationError> {
    let bound = Decimal::from(bound);
    if *value < -bound || *value > bound {
        return Err(error(
            "coordinate_range",
            format!("{field} must be between -{bound} and {bound}"),
        ));
    }
    if value.scale() > COORDINATE_SCALE {
        return Err(error(
            "coordinate_scale",
            format!("{field} must have at most {COORDINATE_SCALE} decimal places"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Human-readable restaurant name: `"{name} {branch}"` for branches,
/// otherwise the plain name.
pub fn display_name(name: &str, branch_name: Option<&str>) -> String {
    match branch_name.map(str::trim).filter(|b| !b.is_empty()) {
        Some(branch) => format!("{name} {branch}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn e164_phone_numbers() {
        assert!(validate_phone("+821012345678").is_ok());
        assert!(validate_phone("+12025550123").is_ok());
        assert!(validate_phone("01012345678").is_err());
        assert!(validate_phone("+0123").is_err());
        assert!(validate_phone("+82-10-1234-5678").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(&Decimal::ZERO).is_ok());
        assert!(validate_rating(&Decimal::new(450, 2)).is_ok());
        assert!(validate_rating(&Decimal::new(999, 2)).is_ok());
        assert!(validate_rating(&Decimal::new(1000, 2)).is_err());
        assert!(validate_rating(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn rating_scale() {
        assert!(validate_rating(&Decimal::new(45, 1)).is_ok());
        let err = validate_rating(&Decimal::new(4555, 3)).unwrap_err();
        assert_eq!(err.code, "rating_scale");
    }

    #[test]
    fn coordinates() {
        assert!(validate_latitude(&Decimal::new(37_566_535_000_000, 12)).is_ok());
        assert!(validate_longitude(&Decimal::new(126_977_969_000_000, 12)).is_ok());
        assert!(validate_latitude(&Decimal::new(91, 0)).is_err());
        assert!(validate_longitude(&Decimal::new(-181, 0)).is_err());

        let too_precise = Decimal::new(1, 13);
        assert_eq!(
            validate_latitude(&too_precise).unwrap_err().code,
            "coordinate_scale"
        );
    }

    #[test]
    fn display_name_with_and_without_branch() {
        assert_eq!(display_name("Bonsteak", Some("Gangnam")), "Bonsteak Gangnam");
        assert_eq!(display_name("Bonsteak", None), "Bonsteak");
        assert_eq!(display_name("Bonsteak", Some("  ")), "Bonsteak");
    }
}
