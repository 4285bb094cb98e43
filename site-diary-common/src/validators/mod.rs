use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_SHORT_TEXT_LEN: usize = 255;
pub const MAX_LONG_TEXT_LEN: usize = 10_000;
pub const MAX_EMAIL_LEN: usize = 320;

#[derive(Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        match &self {
            Validity::Valid => true,
            Validity::Invalid(_) => false,
        }
    }

    pub fn into_result(self) -> Result<(), String> {
        match self {
            Validity::Valid => Ok(()),
            Validity::Invalid(msg) => Err(msg),
        }
    }
}

/// Numbers arrive from forms either as JSON numbers or as the text typed into the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// `Ok(None)` for blank text.
    pub fn to_f64(&self) -> Result<Option<f64>, String> {
        let number = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }

                text.parse::<f64>()
                    .map_err(|_| format!("'{text}' is not a number."))?
            }
        };

        if !number.is_finite() {
            return Err(String::from("Number must be finite."));
        }

        Ok(Some(number))
    }
}

pub fn required_text(value: &str, field_name: &str, max_len: usize) -> Result<String, String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(format!("{field_name} is required"));
    }

    if value.chars().count() > max_len {
        return Err(format!(
            "{field_name} cannot be longer than {max_len} characters"
        ));
    }

    Ok(String::from(value))
}

/// Trims, and maps an empty result to `None`.
pub fn optional_text(
    value: Option<&str>,
    field_name: &str,
    max_len: usize,
) -> Result<Option<String>, String> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    if value.chars().count() > max_len {
        return Err(format!(
            "{field_name} cannot be longer than {max_len} characters"
        ));
    }

    Ok(Some(String::from(value)))
}

pub fn validate_not_future(date: NaiveDate, today: NaiveDate) -> Validity {
    if date > today {
        return Validity::Invalid(String::from("Diary date cannot be in the future."));
    }

    Validity::Valid
}

pub fn validate_email_address(email: &str) -> Validity {
    if email.chars().count() > MAX_EMAIL_LEN {
        return Validity::Invalid(String::from("Email address is too long."));
    }

    for c in email.chars() {
        if c == ' ' || !c.is_ascii() {
            return Validity::Invalid(String::from(
                "Email address cannot contain spaces or non-ASCII characters.",
            ));
        }
    }

    if email.contains("@.") {
        return Validity::Invalid(String::from(
            "Domain name in email address cannot begin with a period.",
        ));
    }

    let (username, domain) = match email.split_once('@') {
        Some(s) => s,
        None => {
            return Validity::Invalid(String::from("Email address must contain an at symbol (@)."))
        }
    };

    if username.is_empty() || domain.len() < 3 {
        return Validity::Invalid(String::from("Email username or domain name is too short."));
    }

    if domain.contains('@') || !domain.contains('.') {
        return Validity::Invalid(String::from(
            "Email address must have only one at symbol (@) and the domain must contain a period.",
        ));
    }

    if domain.ends_with('.') {
        return Validity::Invalid(String::from("Email address cannot end with a period."));
    }

    Validity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_address() {
        // Valid
        const NORMAL: &str = "test@example.com";
        const WITH_DOT_IN_USERNAME: &str = "site.manager@example.com";
        const MULTIPLE_DOT_DOMAIN: &str = "email@example.co.nz";
        const PLUS_IN_USERNAME: &str = "firstname+lastname@example.com";
        const IP_DOMAIN: &str = "email@123.123.123.123";
        const DASH_IN_DOMAIN: &str = "email@example-one.com";

        assert!(validate_email_address(NORMAL).is_valid());
        assert!(validate_email_address(WITH_DOT_IN_USERNAME).is_valid());
        assert!(validate_email_address(MULTIPLE_DOT_DOMAIN).is_valid());
        assert!(validate_email_address(PLUS_IN_USERNAME).is_valid());
        assert!(validate_email_address(IP_DOMAIN).is_valid());
        assert!(validate_email_address(DASH_IN_DOMAIN).is_valid());

        // Invalid
        let too_long = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));

        const WITH_SPACE: &str = "te st@example.com";
        const NON_ASCII_CHAR: &str = "tést@example.com";
        const MULTIPLE_AT: &str = "test@exam.com@ple.com";
        const NO_AT: &str = "testexample.com";
        const DOMAIN_DOT_ADJACENT_TO_AT: &str = "test@.com";
        const DOT_LAST_CHAR: &str = "test@example.com.";
        const NO_USERNAME: &str = "@example.com";

        assert!(!validate_email_address(&too_long).is_valid());
        assert!(!validate_email_address(WITH_SPACE).is_valid());
        assert!(!validate_email_address(NON_ASCII_CHAR).is_valid());
        assert!(!validate_email_address(MULTIPLE_AT).is_valid());
        assert!(!validate_email_address(NO_AT).is_valid());
        assert!(!validate_email_address(DOMAIN_DOT_ADJACENT_TO_AT).is_valid());
        assert!(!validate_email_address(DOT_LAST_CHAR).is_valid());
        assert!(!validate_email_address(NO_USERNAME).is_valid());
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            required_text("  Jo  ", "Visitor name", 10),
            Ok(String::from("Jo"))
        );
        assert_eq!(
            required_text("   ", "Visitor name", 10),
            Err(String::from("Visitor name is required"))
        );
        assert!(required_text("abcdefghijk", "Visitor name", 10).is_err());
        assert!(required_text("  abcdefghij  ", "Visitor name", 10).is_ok());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(None, "Company", 10), Ok(None));
        assert_eq!(optional_text(Some(""), "Company", 10), Ok(None));
        assert_eq!(optional_text(Some(" \t "), "Company", 10), Ok(None));
        assert_eq!(
            optional_text(Some(" Acme "), "Company", 10),
            Ok(Some(String::from("Acme")))
        );
        assert!(optional_text(Some("abcdefghijk"), "Company", 10).is_err());
    }

    #[test]
    fn number_input_accepts_numbers_and_numeric_text() {
        assert_eq!(NumberInput::Number(4.5).to_f64(), Ok(Some(4.5)));
        assert_eq!(NumberInput::Text(String::from(" 12 ")).to_f64(), Ok(Some(12.0)));
        assert_eq!(NumberInput::Text(String::from("-3.25")).to_f64(), Ok(Some(-3.25)));
        assert_eq!(NumberInput::Text(String::new()).to_f64(), Ok(None));
        assert!(NumberInput::Text(String::from("twelve")).to_f64().is_err());
        assert!(NumberInput::Text(String::from("NaN")).to_f64().is_err());
        assert!(NumberInput::Text(String::from("inf")).to_f64().is_err());
    }

    #[test]
    fn number_input_deserializes_from_either_json_type() {
        let n: NumberInput = serde_json::from_str("7").unwrap();
        assert_eq!(n, NumberInput::Number(7.0));

        let t: NumberInput = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(t, NumberInput::Text(String::from("7")));
    }

    #[test]
    fn dates_after_today_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        assert!(validate_not_future(today, today).is_valid());
        assert!(validate_not_future(today.pred_opt().unwrap(), today).is_valid());
        assert_eq!(
            validate_not_future(today.succ_opt().unwrap(), today),
            Validity::Invalid(String::from("Diary date cannot be in the future."))
        );
    }

    #[test]
    fn validity_converts_to_result() {
        assert_eq!(Validity::Valid.into_result(), Ok(()));
        assert_eq!(
            Validity::Invalid(String::from("bad")).into_result(),
            Err(String::from("bad"))
        );
    }
}
