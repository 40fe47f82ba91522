//! # Error Classifier
//!
//! Maps a failed call to a stable code, resolves the code to a localized
//! message, and publishes that message to the global banner. Classification
//! is ordered; the first matching rule wins:
//!
//! 1. transport failure without an HTTP status → `network-error`
//! 2. HTTP 404 → `not-found`
//! 3. HTTP ≥ 500 → `server-error`
//! 4. any other HTTP status → `unexpected-api-error` (auto-dismissing banner)
//! 5. a provider error carrying its own code → that code
//!
//! Anything else is `default`. The classifier never swallows a failure:
//! callers get an [`AppError::Api`] back to propagate.

use std::sync::Arc;

use lib_core::Locale;

use crate::app::state::GlobalState;
use crate::core::error::{AppError, IdentityError, TransportError};
use crate::services::api::messages::{self, DEFAULT_CODE};

/// Stable classification codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Network,
    NotFound,
    Server,
    UnexpectedApi,
    /// Code supplied by an external provider (e.g. `auth/invalid-custom-token`)
    Provider(String),
    Default,
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Network => "network-error",
            ErrorCode::NotFound => "not-found",
            ErrorCode::Server => "server-error",
            ErrorCode::UnexpectedApi => "unexpected-api-error",
            ErrorCode::Provider(code) => code,
            ErrorCode::Default => DEFAULT_CODE,
        }
    }

    /// Only the generic API error clears itself from the banner.
    pub fn auto_dismiss(&self) -> bool {
        matches!(self, ErrorCode::UnexpectedApi)
    }
}

/// Unclassified failure handed to the classifier.
#[derive(Debug, Clone)]
pub enum RawError {
    Transport(TransportError),
    Identity(IdentityError),
    Other(String),
}

impl From<TransportError> for RawError {
    fn from(err: TransportError) -> Self {
        RawError::Transport(err)
    }
}

impl From<IdentityError> for RawError {
    fn from(err: IdentityError) -> Self {
        RawError::Identity(err)
    }
}

/// Classification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<ClassifiedError> for AppError {
    fn from(err: ClassifiedError) -> Self {
        AppError::Api {
            code: err.code.as_str().to_string(),
            message: err.message,
        }
    }
}

/// Pure classification rule, without side effects.
pub fn classify_code(raw: &RawError) -> ErrorCode {
    match raw {
        RawError::Transport(err) => match err.status() {
            None => ErrorCode::Network,
            Some(404) => ErrorCode::NotFound,
            Some(status) if status >= 500 => ErrorCode::Server,
            Some(_) => ErrorCode::UnexpectedApi,
        },
        RawError::Identity(err) if !err.code.trim().is_empty() => {
            ErrorCode::Provider(err.code.clone())
        }
        RawError::Identity(_) | RawError::Other(_) => ErrorCode::Default,
    }
}

/// Classifier bound to the global banner and the configured locale.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    state: Arc<GlobalState>,
    locale: Locale,
}

impl ErrorClassifier {
    pub fn new(state: Arc<GlobalState>, locale: Locale) -> Self {
        Self { state, locale }
    }

    pub fn state(&self) -> &Arc<GlobalState> {
        &self.state
    }

    /// Classify, publish the message once, and return the classification.
    pub fn classify(&self, raw: &RawError) -> ClassifiedError {
        let code = classify_code(raw);
        let message = messages::lookup(self.locale, code.as_str()).to_string();

        tracing::warn!(
            code = %code.as_str(),
            raw = ?raw,
            "Request failed"
        );

        self.state.publish_error(message.clone(), code.auto_dismiss());
        ClassifiedError { code, message }
    }

    /// Classify and convert straight into the error callers propagate.
    pub fn fail(&self, raw: impl Into<RawError>) -> AppError {
        self.classify(&raw.into()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(code: u16) -> RawError {
        RawError::Transport(TransportError::Status {
            status: code,
            body: String::new(),
        })
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(
            classify_code(&RawError::Transport(TransportError::Network("refused".into()))),
            ErrorCode::Network
        );
        assert_eq!(classify_code(&status(404)), ErrorCode::NotFound);
        assert_eq!(classify_code(&status(500)), ErrorCode::Server);
        assert_eq!(classify_code(&status(503)), ErrorCode::Server);
        assert_eq!(classify_code(&status(400)), ErrorCode::UnexpectedApi);
        assert_eq!(classify_code(&status(401)), ErrorCode::UnexpectedApi);
        assert_eq!(
            classify_code(&RawError::Transport(TransportError::Decode {
                status: 200,
                reason: "eof".into()
            })),
            ErrorCode::UnexpectedApi
        );
        assert_eq!(
            classify_code(&RawError::Identity(IdentityError::new(
                "auth/invalid-custom-token",
                "bad"
            ))),
            ErrorCode::Provider("auth/invalid-custom-token".to_string())
        );
        assert_eq!(classify_code(&RawError::Other("?".into())), ErrorCode::Default);
    }

    #[tokio::test]
    async fn test_not_found_published_once() {
        let state = Arc::new(GlobalState::new(Duration::from_secs(3)));
        let mut view = state.subscribe();
        view.borrow_and_update();

        let classifier = ErrorClassifier::new(Arc::clone(&state), Locale::En);
        let classified = classifier.classify(&status(404));

        assert_eq!(classified.code, ErrorCode::NotFound);
        assert_eq!(classified.message, "The requested resource was not found.");
        assert!(view.has_changed().unwrap());
        assert_eq!(
            view.borrow_and_update().error.as_deref(),
            Some("The requested resource was not found.")
        );
        assert!(!view.has_changed().unwrap(), "published exactly once");
    }

    #[test]
    fn test_unknown_provider_code_uses_default_message() {
        let state = Arc::new(GlobalState::new(Duration::from_secs(3)));
        let classifier = ErrorClassifier::new(Arc::clone(&state), Locale::Es);

        let err = classifier.fail(IdentityError::new("auth/unheard-of", "?"));
        assert_eq!(
            err,
            AppError::Api {
                code: "auth/unheard-of".to_string(),
                message: "Ocurrió un error inesperado.".to_string(),
            }
        );
        assert_eq!(state.error().as_deref(), Some("Ocurrió un error inesperado."));
    }
}
