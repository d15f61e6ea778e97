//! Data models and structures
//!
//! Defines the per-submission input, the solve outcome, and the runtime
//! configuration read from the environment.

use crate::{Error, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Marker that string-only callers use to tell a failure from a solution.
pub const ERROR_PREFIX: &str = "An error occurred: ";

pub const INVALID_IMAGE_MESSAGE: &str = "Please upload a valid image file (PNG, JPG, WEBP).";

/// Binary image blob paired with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImageInput {
    /// Rejects anything whose MIME type is not `image/*`.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            return Err(Error::Validation(INVALID_IMAGE_MESSAGE.to_string()));
        }
        Ok(Self { mime_type, bytes })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// One user submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemInput {
    pub text: String,
    pub image: Option<ImageInput>,
}

impl ProblemInput {
    pub fn new(text: impl Into<String>, image: Option<ImageInput>) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Configuration,
    FileRead,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

impl SolveResult {
    pub fn success(text: impl Into<String>) -> Self {
        SolveResult::Success { text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SolveResult::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SolveResult::Success { .. } => None,
            SolveResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Flattens the result for display layers that only understand strings.
    ///
    /// Failures carry [`ERROR_PREFIX`]; solutions are returned verbatim.
    pub fn into_display_string(self) -> String {
        match self {
            SolveResult::Success { text } => text,
            SolveResult::Failure { message, .. } => format!("{}{}", ERROR_PREFIX, message),
        }
    }
}

impl From<Error> for SolveResult {
    fn from(err: Error) -> Self {
        SolveResult::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// True when a flattened result string denotes a failure.
pub fn is_error_string(s: &str) -> bool {
    s.starts_with(ERROR_PREFIX)
}

// Configuration
#[derive(Clone)]
pub struct Config {
    /// Checked when a solve runs, not at load time.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with_timeout(None)
    }

    /// Like [`Config::from_env`]; a given timeout wins and
    /// `SOLVER_TIMEOUT_SECS` is not read at all.
    pub fn from_env_with_timeout(timeout: Option<Duration>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok(), timeout)
    }

    fn from_lookup<F>(lookup: F, timeout: Option<Duration>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match (timeout, non_blank("SOLVER_TIMEOUT_SECS")) {
            (Some(timeout), _) => Some(timeout),
            (None, Some(raw)) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Configuration(format!(
                        "SOLVER_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Configuration(
                        "SOLVER_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            (None, None) => None,
        };

        Ok(Self {
            api_key: non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY")),
            model: non_blank("SOLVER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }

    /// The credential, or a configuration error when it is missing or blank.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "API key not configured: set GEMINI_API_KEY or API_KEY".to_string(),
                )
            })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
