use thiserror::Error;

use crate::api::ApiError;
use crate::roster::FormError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No meet is open")]
    NoMeetSelected,

    #[error("No event is selected")]
    NoEventSelected,

    #[error(transparent)]
    Validation(#[from] FormError),
}

impl EditorError {
    /// Text for the blocking notification.
    pub fn user_message(&self) -> String {
        match self {
            EditorError::Api(e) => e.user_message(),
            EditorError::NoMeetSelected => "Open a meet first.".to_string(),
            EditorError::NoEventSelected => "Click an event first.".to_string(),
            EditorError::Validation(e) => e.to_string(),
        }
    }
}
