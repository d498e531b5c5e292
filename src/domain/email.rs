//! Email address validation and normalization.
//!
//! Given a raw string, returns the canonical form that is stored and compared
//! for uniqueness: surrounding whitespace removed, domain lowercased, local
//! part kept as typed.

use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("The email address is not valid. It must have exactly one @-sign.")]
    AtSign,

    #[error("There must be something before the @-sign.")]
    MissingLocalPart,

    #[error("There must be something after the @-sign.")]
    MissingDomain,

    #[error("The part after the @-sign is not valid. It should have a period.")]
    DomainWithoutPeriod,

    #[error("The email address is not valid.")]
    Invalid,
}

pub fn normalize_email(raw: &str) -> Result<String, EmailError> {
    let trimmed = raw.trim();

    let mut parts = trimmed.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EmailError::AtSign);
    };

    if local.is_empty() {
        return Err(EmailError::MissingLocalPart);
    }
    if domain.is_empty() {
        return Err(EmailError::MissingDomain);
    }

    let domain = domain.to_lowercase();
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(EmailError::DomainWithoutPeriod);
    }

    let normalized = format!("{local}@{domain}");
    if !normalized.validate_email() {
        return Err(EmailError::Invalid);
    }

    Ok(normalized)
}
