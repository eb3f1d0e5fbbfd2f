use thiserror::Error;

/// Why a candidate answer was not accepted for a field.
///
/// Always recoverable: the controller re-asks the same field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field cannot be empty")]
    Empty,

    #[error("That doesn't look like a valid email address")]
    InvalidEmail,

    #[error("A phone number needs at least {required} digits (found {found})")]
    TooFewDigits { required: usize, found: usize },

    #[error("Years of experience must be a whole number")]
    NotANumber,

    #[error("Years of experience cannot be less than {min}")]
    BelowMinimum { min: u8 },

    #[error("Years of experience cannot be more than {max}")]
    AboveMaximum { max: u8 },

    #[error("Please list at least one technology")]
    NoTechnologies,
}
