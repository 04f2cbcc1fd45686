//! Pure input rules for the optimization form.
//!
//! Every rule is total: it returns `Ok` or a `ValidationError` carrying the
//! message shown next to the form, and never panics. Rules are order-sensitive,
//! so a later field is never judged valid on its own.

use crate::api::RequestPayload;
use crate::config::ValidationBounds;
use crate::form::FormState;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Validated<T> = Result<T, ValidationError>;

/// Parses a raw field value as a whole number.
fn parse_whole(raw: &str, label: &str) -> Validated<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{} is required", label)));
    }
    trimmed.parse::<i64>().map_err(|_| {
        ValidationError(format!(
            "{} must be a whole number, got '{}'",
            label, trimmed
        ))
    })
}

fn parse_positive(raw: &str, label: &str) -> Validated<u32> {
    let n = parse_whole(raw, label)?;
    if n <= 0 {
        return Err(ValidationError(format!(
            "{} must be greater than 0, got {}",
            label, n
        )));
    }
    u32::try_from(n).map_err(|_| ValidationError(format!("{} is too large: {}", label, n)))
}

pub fn validate_customer_count(raw: &str, bounds: &ValidationBounds) -> Validated<u32> {
    let n = parse_whole(raw, "Number of customers")?;
    if !bounds.contains(n) {
        return Err(ValidationError(format!(
            "Number of customers must be between {} and {}, got {}",
            bounds.min_customers, bounds.max_customers, n
        )));
    }
    // contains() keeps n inside a u32 range
    Ok(n as u32)
}

pub fn validate_fc_candidate_count(raw: &str, customer_count_valid: bool) -> Validated<u32> {
    if !customer_count_valid {
        return Err(ValidationError::new("Enter a valid number of customers first"));
    }
    parse_positive(raw, "Number of FC candidates")
}

/// `fc_candidate_count` is `None` while the candidate field is not yet valid.
pub fn validate_k(raw: &str, fc_candidate_count: Option<u32>) -> Validated<u32> {
    let Some(candidates) = fc_candidate_count else {
        return Err(ValidationError::new("Enter a valid number of FC candidates first"));
    };
    let k = parse_positive(raw, "k (FCs to open)")?;
    if k > candidates {
        return Err(ValidationError(format!(
            "k ({}) cannot be greater than the number of FC candidates ({})",
            k, candidates
        )));
    }
    Ok(k)
}

/// Authoritative submit-time check. Re-runs every rule regardless of what the
/// entry gates accepted and derives the payload on success.
pub fn validate_submission(
    state: &FormState,
    bounds: &ValidationBounds,
) -> Validated<RequestPayload> {
    let num_customers = validate_customer_count(&state.num_customers, bounds)?;
    let num_fc_candidates = validate_fc_candidate_count(&state.num_fc_candidates, true)?;
    let k = validate_k(&state.k, Some(num_fc_candidates))?;

    Ok(RequestPayload {
        num_customers,
        num_fc_candidates,
        k,
    })
}
