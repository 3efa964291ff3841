// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::debug;
use pcre2_sys::{PCRE2_ERROR_NOMEMORY, PCRE2_SUBSTITUTE_GLOBAL, PCRE2_SUBSTITUTE_OVERFLOW_LENGTH};

use crate::{error::Error, ffi::error_message, pattern::CompiledPattern};

const MAX_OUTPUT_CAPACITY: usize = isize::MAX as usize;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SubstituteMode {
    /// Replace the left-most match only.
    First,

    /// Replace every non-overlapping match.
    Global,
}

/// Output storage for the substitution primitive.
///
/// The primitive either fits its output into the buffer or reports that the
/// buffer is too small, in which case the buffer is doubled and the whole
/// substitution is run again.
pub(crate) struct OutputBuffer {
    bytes: Vec<u8>,
    max_capacity: usize,
}

impl OutputBuffer {
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        // a zero sized buffer would never grow
        let capacity = initial_capacity.max(1).min(max_capacity.max(1));
        OutputBuffer {
            bytes: vec![0; capacity],
            max_capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn grow(&mut self) -> Result<(), Error> {
        let capacity = self
            .capacity()
            .checked_mul(2)
            .filter(|capacity| *capacity <= self.max_capacity)
            .ok_or(Error::CapacityExhausted {
                capacity: self.capacity(),
            })?;

        self.bytes.resize(capacity, 0);
        Ok(())
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The first `written` bytes, up to the first NUL.
    pub fn into_string(mut self, written: usize) -> String {
        self.bytes.truncate(written);
        if let Some(nul) = self.bytes.iter().position(|&b| b == 0) {
            self.bytes.truncate(nul);
        }

        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

impl CompiledPattern {
    /// Replaces the first or every match of the pattern in `subject` by
    /// the expansion of `replacement`.
    ///
    /// The replacement may refer to groups as `$1`, `${1}` or `${name}`,
    /// and `$$` is a literal dollar sign. When there is no match the
    /// subject is returned unchanged.
    ///
    /// The output ends at its first NUL byte, so a subject or replacement
    /// containing NUL cannot round-trip.
    pub fn substitute(
        &self,
        replacement: &str,
        subject: &str,
        mode: SubstituteMode,
    ) -> Result<String, Error> {
        let options = match mode {
            SubstituteMode::First => PCRE2_SUBSTITUTE_OVERFLOW_LENGTH,
            SubstituteMode::Global => PCRE2_SUBSTITUTE_OVERFLOW_LENGTH | PCRE2_SUBSTITUTE_GLOBAL,
        };

        let mut buffer = OutputBuffer::new(subject.len(), MAX_OUTPUT_CAPACITY);

        loop {
            match self.code().substitute(
                subject.as_bytes(),
                replacement.as_bytes(),
                options,
                buffer.as_mut_slice(),
            ) {
                Ok((_, written)) => return Ok(buffer.into_string(written)),
                Err(PCRE2_ERROR_NOMEMORY) => {
                    buffer.grow()?;
                    debug!(
                        "substitute output buffer grown to {} bytes, pattern: {}",
                        buffer.capacity(),
                        self
                    );
                }
                Err(code) => {
                    return Err(Error::Substitute {
                        code,
                        message: error_message(code),
                    })
                }
            }
        }
    }
}

/// Compiles `pattern` and substitutes with it.
pub fn substitute(
    pattern: &str,
    replacement: &str,
    subject: &str,
    mode: SubstituteMode,
) -> Result<String, Error> {
    CompiledPattern::new(pattern)?.substitute(replacement, subject, mode)
}
