use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{5,}$").unwrap());

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_username(u: &String) -> Result<(), ValidationError> {
    if !USERNAME_REGEX.is_match(u) {
        return Err(ValidationError::new("")
            .with_message("Letters, numbers and '_'. Minimum 5 characters".into()));
    }
    Ok(())
}

pub fn validate_comment_text(text: &String) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("").with_message("Comment text cannot be empty".into()));
    }
    Ok(())
}
