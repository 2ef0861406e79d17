use crate::error::ApiError;

/// Pull a required string field out of a request body, rejecting absent
/// or blank values.
pub fn require_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation_error(format!("{} is required", field))),
    }
}

/// Minimal shape check for email addresses.
pub fn validate_email_format(email: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ApiError::validation_error("Invalid email format"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_fields_are_rejected() {
        assert!(require_field(None, "name").is_err());
        assert!(require_field(Some(""), "name").is_err());
        assert!(require_field(Some("   "), "name").is_err());
        assert_eq!(require_field(Some("Field1"), "name").unwrap(), "Field1");
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email_format("a@x.com").is_ok());
        assert!(validate_email_format("a.b@x.co.uk").is_ok());
        assert!(validate_email_format("plainaddress").is_err());
        assert!(validate_email_format("@x.com").is_err());
        assert!(validate_email_format("a@").is_err());
        assert!(validate_email_format("a@nodot").is_err());
    }
}
