// afib-core
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the common error type.

use alloc::boxed::Box;
use core::fmt;
use core::ops::Deref;
use core::result;

#[cfg(not(feature = "std"))]
use core::error::Error as StdError;
#[cfg(feature = "std")]
use std::error::Error as StdError;

/// `Error` enumerates everything that can go wrong driving the detector. Nothing in the
/// per-sample hot path returns an error: only record-scoped setup and the record driver can fail.
#[derive(Debug)]
pub enum Error {
    /// A configuration value was invalid (e.g. a zero-length record buffer was requested).
    InvalidConfig(&'static str),
    /// A growable per-record buffer could not be allocated; the record is abandoned.
    AllocationFailed,
    /// A record produced no RR intervals at all.
    EmptyRecord,
    /// An unsupported combination of driver inputs was encountered (e.g. mismatched streams).
    Unsupported(&'static str),
    /// Transparent wrapper for an error from a collaborator (e.g. the record/annotation source
    /// a driver reads from), preserved as the `source()` of this error.
    Source(Box<dyn StdError + 'static>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Error::AllocationFailed => write!(f, "allocation failed for record buffers"),
            Error::EmptyRecord => write!(f, "record contained no RR intervals"),
            Error::Unsupported(feature) => write!(f, "unsupported: {}", feature),
            Error::Source(ref err) => write!(f, "collaborator error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Source(ref err) => Some(err.deref()),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an invalid-configuration error.
pub fn invalid_config_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::InvalidConfig(desc))
}

/// Convenience function to create an empty-record error.
pub fn empty_record_error<T>() -> Result<T> {
    Err(Error::EmptyRecord)
}

/// Convenience function to create an allocation-failure error.
pub fn allocation_error<T>() -> Result<T> {
    Err(Error::AllocationFailed)
}

/// Convenience function to create an unsupported-feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}

/// Wraps a collaborator's error (e.g. an I/O error from a record source) as the `source` of an
/// [`Error::Source`].
pub fn source_error<T>(err: impl StdError + 'static) -> Result<T> {
    Err(Error::Source(Box::new(err)))
}
