// Side channel for decode failures that were recovered with the fallback document.
use std::error::Error as StdError;
use std::sync::Mutex;

use tracing::warn;

use crate::core::error::{Error, ErrorKind};

/// What a reporter learns about a recovered decode failure. Carries the
/// input length but never the input itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub cause: Option<String>,
    pub input_len: usize,
}

impl DecodeFailure {
    pub fn from_error(err: &Error, input_len: usize) -> Self {
        Self {
            kind: err.kind(),
            message: err.message().unwrap_or("sections could not be decoded").to_string(),
            cause: err.source().map(|source| source.to_string()),
            input_len,
        }
    }
}

pub trait FailureReporter {
    fn report(&self, failure: &DecodeFailure);
}

/// Logs failures at `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, failure: &DecodeFailure) {
        warn!(
            kind = ?failure.kind,
            input_len = failure.input_len,
            cause = failure.cause.as_deref().unwrap_or(""),
            "{}; using fallback document",
            failure.message
        );
    }
}

/// Keeps failures in memory so the caller can surface them later.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<DecodeFailure>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<DecodeFailure> {
        match self.failures.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.failures.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureReporter for CollectingReporter {
    fn report(&self, failure: &DecodeFailure) {
        match self.failures.lock() {
            Ok(mut guard) => guard.push(failure.clone()),
            Err(poisoned) => poisoned.into_inner().push(failure.clone()),
        }
    }
}
