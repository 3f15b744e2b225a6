use thiserror::Error;

/// A form failed a client-side check; no request was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Please fill in all required fields.")]
    MissingRequiredFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please agree to the Terms of Service.")]
    TermsNotAccepted,

    #[error("Could not read '{0}' as a date and time (use YYYY-MM-DD HH:MM).")]
    InvalidDateTime(String),

    #[error("End time must be after start time.")]
    EndBeforeStart,

    #[error("Select a problem first.")]
    NoProblemSelected,

    #[error("Write some code before submitting.")]
    EmptyCode,
}

impl ValidationError {
    /// Short heading for the notification.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields | ValidationError::MissingRequiredFields => {
                "Missing Information"
            }
            ValidationError::InvalidEmail => "Invalid Email",
            ValidationError::PasswordMismatch => "Password Mismatch",
            ValidationError::TermsNotAccepted => "Terms Required",
            ValidationError::InvalidDateTime(_) | ValidationError::EndBeforeStart => {
                "Invalid Time"
            }
            ValidationError::NoProblemSelected | ValidationError::EmptyCode => "Nothing to Submit",
        }
    }
}
