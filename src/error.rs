// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// Every failure the engine can report.
///
/// "No match" is not an error anywhere in this crate, it is always
/// expressed as `Ok(None)`, `Ok(false)` or an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The pattern was rejected by the compiler. `offset` is the byte offset
    /// into the pattern where the problem was detected.
    #[error("compilation failed at offset {offset}: {message} (code {code})")]
    Compile {
        code: i32,
        offset: usize,
        message: String,
    },

    /// The engine failed while matching (bad offset, resource limit, ...).
    #[error("matching error {code}: {message}")]
    Match { code: i32, message: String },

    /// The substitution primitive failed for a reason other than
    /// insufficient output capacity.
    #[error("substitute error {code}: {message}")]
    Substitute { code: i32, message: String },

    /// The output buffer could not be grown any further.
    #[error("substitute output exceeds the largest buffer that can be allocated ({capacity} bytes)")]
    CapacityExhausted { capacity: usize },

    /// A match whose start lies after its end, e.g. `\K` used inside an
    /// assertion. The global match stream is abandoned when this happens.
    #[error("match start {start} is after its end {end}, run abandoned")]
    BackwardMatch { start: usize, end: usize },

    /// Querying information about a compiled pattern failed.
    #[error("pattern info error {code}: {message}")]
    Info { code: i32, message: String },

    /// A session operation was invoked before any pattern was compiled
    /// into it (or after its last compile failed).
    #[error("no pattern has been compiled into the session")]
    EmptySession,
}

impl Error {
    /// The numeric engine error code, when the failure came from the engine.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Compile { code, .. }
            | Error::Match { code, .. }
            | Error::Substitute { code, .. }
            | Error::Info { code, .. } => Some(*code),
            Error::CapacityExhausted { .. } | Error::BackwardMatch { .. } | Error::EmptySession => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Error;

    #[test]
    fn test_error_display() {
        let e = Error::Compile {
            code: 114,
            offset: 3,
            message: "missing closing parenthesis".to_owned(),
        };
        assert_eq!(
            e.to_string(),
            "compilation failed at offset 3: missing closing parenthesis (code 114)"
        );

        let e = Error::BackwardMatch { start: 2, end: 1 };
        assert_eq!(e.to_string(), "match start 2 is after its end 1, run abandoned");
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            Error::Match {
                code: -36,
                message: String::new()
            }
            .code(),
            Some(-36)
        );
        assert_eq!(Error::EmptySession.code(), None);
        assert_eq!(Error::CapacityExhausted { capacity: 8 }.code(), None);
    }
}
