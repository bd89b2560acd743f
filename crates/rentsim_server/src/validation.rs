use rentsim_core::model::ContactRequest;

use crate::error::{ApiError, ApiResult};

/// Validate a contact form submission.
///
/// `name`, `email` and `message` must be non-blank and `consent` must be
/// given; every missing item is reported at once.
pub fn validate_contact(req: &ContactRequest) -> ApiResult<()> {
    let mut missing = Vec::new();
    if req.name.trim().is_empty() {
        missing.push("name");
    }
    if req.email.trim().is_empty() {
        missing.push("email");
    }
    if req.message.trim().is_empty() {
        missing.push("message");
    }
    if !req.consent {
        missing.push("consent");
    }
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }

    validate_email(&req.email)?;

    if req.message.len() > 5_000 {
        return Err(ApiError::ValidationError {
            field: "message".to_string(),
            message: "Message cannot exceed 5,000 characters".to_string(),
        });
    }

    Ok(())
}

/// Loose email check: exactly one `@` with something on both sides
pub fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(ApiError::ValidationError {
            field: "email".to_string(),
            message: "Email address is not valid".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "Camille".to_string(),
            email: "camille@example.com".to_string(),
            phone: None,
            city: Some("Vincennes".to_string()),
            message: "Call me back about a studio".to_string(),
            consent: true,
        }
    }

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact(&valid_request()).is_ok());

        let mut req = valid_request();
        req.name = "   ".to_string();
        assert!(matches!(
            validate_contact(&req),
            Err(ApiError::MissingFields(fields)) if fields == vec!["name"]
        ));

        let mut req = valid_request();
        req.consent = false;
        req.message.clear();
        assert!(matches!(
            validate_contact(&req),
            Err(ApiError::MissingFields(fields)) if fields == vec!["message", "consent"]
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_message_length() {
        let mut req = valid_request();
        req.message = "a".repeat(5_001);
        assert!(validate_contact(&req).is_err());
    }
}
