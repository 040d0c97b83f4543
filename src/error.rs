// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! Every fallible operation in the crate returns one of four error kinds:
//!
//! | Type | Raised when |
//! |------|-------------|
//! | [`ValidationError`] | a value object violates one of its invariants |
//! | [`ConversionError`] | Julian Day arithmetic gets out-of-domain input |
//! | [`FormatError`] | a format token receives an out-of-range component |
//! | [`InvalidArgument`] | a required input is missing |
//!
//! [`Error`] wraps all of them for callers that do not care which layer
//! rejected the input.

use thiserror::Error;

/// A structural invariant of a value object was violated.
///
/// Carries the offending field name, its value rendered as text, and a
/// short reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} = {value}: {reason}")]
pub struct ValidationError {
    /// Name of the field that failed validation.
    pub field: &'static str,
    /// The rejected value.
    pub value: String,
    /// Why the value was rejected.
    pub reason: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        let err = Self {
            field,
            value: value.to_string(),
            reason,
        };
        log::debug!("validation rejected: {err}");
        err
    }
}

/// Julian Day arithmetic received input it cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("{what} is not a finite number")]
    NonFinite { what: &'static str },

    #[error("{what} = {value} is outside the representable range")]
    OutOfRange { what: &'static str, value: String },

    #[error("Julian Day Number has not been initialized")]
    NotInitialized,

    #[error("rendered value {0:?} has no decimal point")]
    MissingDecimalPoint(String),

    #[error("{requested} fractional digits requested, configured maximum is {max}")]
    PrecisionExceeded { requested: u32, max: u32 },

    #[error("cannot parse {0:?} as a floating point number")]
    Parse(String),

    #[error(transparent)]
    InvalidDate(#[from] ValidationError),
}

impl ConversionError {
    pub(crate) fn out_of_range(what: &'static str, value: impl ToString) -> Self {
        let err = Self::OutOfRange {
            what,
            value: value.to_string(),
        };
        log::debug!("conversion rejected: {err}");
        err
    }
}

/// A format token received a component outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("format token {token:?} cannot render {field} = {value}")]
pub struct FormatError {
    pub token: String,
    pub field: &'static str,
    pub value: i64,
}

/// A required argument was missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required argument `{0}`")]
pub struct InvalidArgument(pub &'static str);

/// Umbrella error for the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// Result alias defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
