use http::StatusCode;
use thiserror::Error;

/// Failure talking to the CortaAI backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Session expired or missing, please log in again")]
    Unauthorized,
    #[error("Request failed ({status}): {message}")]
    Status { status: StatusCode, message: String },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Whether the user can reasonably try the same action again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(_) => "Could not reach the server. Try again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Field of a draft booking that still needs a value before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Barber,
    Date,
    Services,
    Slot,
}

impl MissingField {
    pub fn label(&self) -> &'static str {
        match self {
            MissingField::Barber => "barber",
            MissingField::Date => "date",
            MissingField::Services => "services",
            MissingField::Slot => "time",
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Please choose: {}", join_labels(.missing))]
    Incomplete { missing: Vec<MissingField> },
    #[error("Could not build the appointment time from {0:?}")]
    InvalidDateTime(String),
    #[error("Time slot {0} is not available for the current selection")]
    UnknownSlot(String),
    #[error("Service is not offered by this barbershop")]
    UnknownService,
    #[error("Barber does not work at this barbershop")]
    UnknownBarber,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl BookingError {
    /// Backend failures can be retried; validation errors need user input first.
    pub fn is_retryable(&self) -> bool {
        match self {
            BookingError::Api(e) => e.is_retryable(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            BookingError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

fn join_labels(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(MissingField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session data is corrupted: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Browser storage unavailable: {0}")]
    Storage(String),
}
