use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ts_rs::TS;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Result of submitting the promotional email form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case", tag = "status")]
#[ts(export)]
pub enum SignupOutcome {
    Accepted { email: String },
    Rejected,
}

/// The form clears its input only on success.
pub fn submit_signup(input: &str) -> SignupOutcome {
    let email = input.trim();
    if is_valid_email(email) {
        SignupOutcome::Accepted {
            email: email.to_string(),
        }
    } else {
        SignupOutcome::Rejected
    }
}
