// SPDX-License-Identifier: Apache-2.0

use gotong_core::Locale;
use serde::Serialize;

use crate::forms::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A banner shown once after a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn from_outcome(success: bool, text: impl Into<String>) -> Self {
        if success {
            Self::success(text)
        } else {
            Self::error(text)
        }
    }

    #[must_use]
    pub fn from_validation(err: ValidationError, locale: Locale) -> Self {
        Self::error(err.message().text(locale))
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, AlertKind::Success)
    }
}
