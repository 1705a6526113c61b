//! Contact and newsletter forms. Nothing is sent anywhere: submission waits
//! a fixed delay and fails at random so the UI states can be shown.

use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use web_sys::js_sys::Math;

pub const MIN_MESSAGE_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("Something went wrong on our side. Please try again.")]
    Simulated,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Failed(SubmitError),
}

pub fn validate_email(email: &str) -> Result<(), SubmitError> {
    let email = email.trim();
    let (local, domain) = email
        .split_once('@')
        .ok_or(SubmitError::Invalid("Please enter a valid email address."))?;
    let domain_ok = domain
        .split('.')
        .filter(|part| !part.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok || email.contains(char::is_whitespace) || domain.contains('@') {
        return Err(SubmitError::Invalid("Please enter a valid email address."));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.name.trim().is_empty() {
            return Err(SubmitError::Invalid("Please tell us your name."));
        }
        validate_email(&self.email)?;
        let len = self.message.trim().chars().count();
        if len < MIN_MESSAGE_LEN {
            return Err(SubmitError::Invalid("Your message is a little short, tell us a bit more."));
        }
        if len > MAX_MESSAGE_LEN {
            return Err(SubmitError::Invalid("Please keep your message under 2000 characters."));
        }
        Ok(())
    }
}

/// `roll` is uniform in `[0, 1)`.
pub fn roll_fails(roll: f64, failure_rate: f64) -> bool {
    roll < failure_rate.clamp(0.0, 1.0)
}

pub async fn simulate_submission(delay_ms: u32, failure_rate: f64) -> Result<(), SubmitError> {
    TimeoutFuture::new(delay_ms).await;
    if roll_fails(Math::random(), failure_rate) {
        log::warn!("Simulated submission failure");
        return Err(SubmitError::Simulated);
    }
    log::info!("Simulated submission accepted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("  ana.lee+news@mail.example.co.uk ").is_ok());
        for bad in ["", "ana", "ana@", "@example.com", "ana@example", "ana@.com", "ana@example.", "a na@example.com", "a@b@c.com"] {
            assert!(validate_email(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn contact_form_checks_each_field() {
        let mut form = ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            company: String::new(),
            message: "We would like a demo for our research team.".into(),
        };
        assert_eq!(form.validate(), Ok(()));

        form.message = "Hi".into();
        assert!(matches!(form.validate(), Err(SubmitError::Invalid(_))));

        form.message = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(form.validate().is_err());

        form.message = "We would like a demo for our research team.".into();
        form.name = "  ".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn failure_injection() {
        assert!(roll_fails(0.05, 0.1));
        assert!(!roll_fails(0.1, 0.1));
        assert!(!roll_fails(0.0, 0.0));
        assert!(roll_fails(0.999, 1.0));
    }
}
