// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::{
    error::Error,
    ffi::MatchData,
    pattern::CompiledPattern,
    process::{exec, MatchOptions, MatchResult},
};

/// Iterator over the successive non-overlapping matches of a pattern,
/// in the manner of Perl's `/g`.
///
/// An empty match is followed by an anchored attempt at the same offset that
/// must not be empty; if that fails the scan moves on by one character (a
/// whole code point in UTF mode, both bytes of a `\r\n` when the newline
/// convention admits CRLF).
///
/// The stream ends after the first error, including a match whose start is
/// after its end.
pub struct Matches<'p, 's> {
    pattern: &'p CompiledPattern,
    subject: &'s [u8],
    match_data: Option<MatchData>,

    // 0 means unbounded
    limit: usize,
    emitted: usize,

    started: bool,
    finished: bool,

    // the offset for the next attempt, i.e. the end of the previous match,
    // or a position after a failed non-empty retry.
    next_offset: usize,
    previous_empty: bool,
    previous_start_char: usize,
}

impl<'p, 's> Matches<'p, 's> {
    pub fn new(pattern: &'p CompiledPattern, subject: &'s [u8]) -> Self {
        Matches {
            pattern,
            subject,
            match_data: None,
            limit: 0,
            emitted: 0,
            started: false,
            finished: false,
            next_offset: 0,
            previous_empty: false,
            previous_start_char: 0,
        }
    }

    /// Stops after `limit` matches, `0` means no limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn subject(&self) -> &'s [u8] {
        self.subject
    }

    fn attempt(&mut self, offset: usize, options: MatchOptions) -> Result<Option<MatchResult>, Error> {
        // allocated on the first attempt and reused for the rest of the scan
        let mut match_data = match self.match_data.take() {
            Some(match_data) => match_data,
            None => MatchData::for_code(self.pattern.code())?,
        };

        let result = exec(self.pattern, &mut match_data, self.subject, offset, options);
        self.match_data = Some(match_data);
        result
    }

    fn accept(&mut self, result: MatchResult) -> Result<MatchResult, Error> {
        let result = result.ensure_forward()?;

        self.emitted += 1;
        self.next_offset = result.end();
        self.previous_empty = result.is_empty();
        self.previous_start_char = result.start_char();

        Ok(result)
    }

    fn fail(&mut self, e: Error) -> Option<Result<MatchResult, Error>> {
        self.finished = true;
        Some(Err(e))
    }

    /// Moves forward one character from `offset` after a failed non-empty
    /// retry there.
    fn step_over(&self, offset: usize) -> usize {
        let subject = self.subject;

        if self.pattern.newline().admits_crlf()
            && offset + 1 < subject.len()
            && subject[offset] == b'\r'
            && subject[offset + 1] == b'\n'
        {
            return offset + 2;
        }

        let next = offset + 1;
        if self.pattern.is_utf() {
            skip_continuation_bytes(subject, next)
        } else {
            next
        }
    }
}

impl Iterator for Matches<'_, '_> {
    type Item = Result<MatchResult, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.limit != 0 && self.emitted >= self.limit {
            self.finished = true;
            return None;
        }

        if !self.started {
            self.started = true;

            return match self.attempt(0, MatchOptions::NONE) {
                Ok(Some(result)) => match self.accept(result) {
                    Ok(result) => Some(Ok(result)),
                    Err(e) => self.fail(e),
                },
                Ok(None) => {
                    self.finished = true;
                    None
                }
                Err(e) => self.fail(e),
            };
        }

        loop {
            let mut offset = self.next_offset;
            let mut options = MatchOptions::NONE;

            if self.previous_empty {
                if offset == self.subject.len() {
                    self.finished = true;
                    return None;
                }

                options = MatchOptions::ANCHORED | MatchOptions::NOTEMPTY_ATSTART;
            } else if self.previous_start_char >= offset {
                // a non-empty match that ends where it started scanning,
                // possible with `\K` in a lookbehind, would repeat forever.
                if self.previous_start_char >= self.subject.len() {
                    self.finished = true;
                    return None;
                }

                offset = self.previous_start_char + 1;
                if self.pattern.is_utf() {
                    offset = skip_continuation_bytes(self.subject, offset);
                }
            }

            match self.attempt(offset, options) {
                Ok(Some(result)) => {
                    return match self.accept(result) {
                        Ok(result) => Some(Ok(result)),
                        Err(e) => self.fail(e),
                    };
                }
                Ok(None) if options.is_empty() => {
                    self.finished = true;
                    return None;
                }
                Ok(None) => {
                    // no non-empty alternative to the previous empty match
                    self.next_offset = self.step_over(offset);
                    self.previous_empty = false;
                    trace!("no non-empty match at {}, resuming at {}", offset, self.next_offset);
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}

/// Advances `offset` until it is on a UTF-8 code point boundary (or the end
/// of the subject).
pub(crate) fn skip_continuation_bytes(subject: &[u8], mut offset: usize) -> usize {
    while offset < subject.len() && subject[offset] & 0xc0 == 0x80 {
        offset += 1;
    }
    offset
}

impl CompiledPattern {
    /// All matches in `subject`, see `Matches`.
    pub fn find_iter<'p, 's>(&'p self, subject: &'s [u8]) -> Matches<'p, 's> {
        Matches::new(self, subject)
    }
}

/// Collects at most `limit` matches (`0` = all).
///
/// A fatal error discards the matches found so far.
pub fn find_matches(
    pattern: &CompiledPattern,
    subject: &[u8],
    limit: usize,
) -> Result<Vec<MatchResult>, Error> {
    Matches::new(pattern, subject).with_limit(limit).collect()
}
