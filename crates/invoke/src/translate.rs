//! Error translation
//!
//! Raw call boundary failures mention host-internal detail: call sites in
//! parentheses and the synthetic wrapper class. The translator rewrites them
//! into caller-facing [`FunctionalTypeError`]s:
//!
//! 1. Drop every parenthesized fragment (nested ones included)
//! 2. Replace [`WRAPPER_MARKER`] with a neutral placeholder
//! 3. Collapse whitespace runs into single spaces and trim
//!
//! The raw error is kept as the cause of the translated one.

use crate::closure::WRAPPER_MARKER;
use crate::config::DEFAULT_WRAPPER_PLACEHOLDER;
use contracts_core::{CallError, FunctionalTypeError};
use tracing::debug;

/// Rewrites raw type mismatches into normalized errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTranslator {
    placeholder: String,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPER_PLACEHOLDER)
    }
}

impl ErrorTranslator {
    /// Create a translator with the given wrapper placeholder
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Placeholder substituted for the wrapper marker
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Translate a raw failure, keeping it as the cause
    pub fn translate(&self, raw: CallError) -> FunctionalTypeError {
        let message = self.normalize(&raw.to_string());
        debug!(target: "closures::translate", raw = %raw, translated = %message, "Translated call error");
        FunctionalTypeError::with_cause(message, raw)
    }

    /// Clean a raw message
    pub fn normalize(&self, message: &str) -> String {
        strip_parenthesized(message)
            .replace(WRAPPER_MARKER, &self.placeholder)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Remove every `( ... )` fragment
///
/// Unbalanced closing parentheses are dropped; an unclosed opening one drops
/// the rest of the message.
fn strip_parenthesized(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut depth = 0usize;
    for c in message.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
