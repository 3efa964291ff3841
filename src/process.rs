// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::{BitOr, Range};

use pcre2_sys::{PCRE2_ANCHORED, PCRE2_NOTEMPTY_ATSTART};

use crate::{
    error::Error,
    ffi::{MatchData, UNSET},
    pattern::CompiledPattern,
};

/// Extra options for a single match attempt.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MatchOptions(u32);

impl MatchOptions {
    pub const NONE: MatchOptions = MatchOptions(0);

    /// Only try to match at the start offset.
    pub const ANCHORED: MatchOptions = MatchOptions(PCRE2_ANCHORED);

    /// An empty match at the start offset is not a valid match.
    pub const NOTEMPTY_ATSTART: MatchOptions = MatchOptions(PCRE2_NOTEMPTY_ATSTART);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: MatchOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for MatchOptions {
    type Output = MatchOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        MatchOptions(self.0 | rhs.0)
    }
}

/// One successful match attempt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MatchResult {
    // the whole-match offsets as reported, `start` may exceed `end`
    // when `\K` is used inside an assertion.
    start: usize,
    end: usize,

    // index 0 is the whole match, `None` for a group that did not
    // participate in the match.
    groups: Vec<Option<Range<usize>>>,

    // where the engine actually started this match attempt
    start_char: usize,
}

impl MatchResult {
    pub fn new(
        start: usize,
        end: usize,
        groups: Vec<Option<Range<usize>>>,
        start_char: usize,
    ) -> Self {
        MatchResult {
            start,
            end,
            groups,
            start_char,
        }
    }

    fn from_match_data(match_data: &MatchData, pairs: usize, group_count: usize) -> Self {
        let ovector = match_data.ovector();
        let group_count = group_count.min(ovector.len() / 2);

        let groups = (0..group_count)
            .map(|idx| {
                if idx >= pairs {
                    return None;
                }

                let (start, end) = (ovector[idx * 2], ovector[idx * 2 + 1]);
                if start == UNSET || end == UNSET {
                    None
                } else {
                    Some(start..end)
                }
            })
            .collect();

        MatchResult {
            start: ovector[0],
            end: ovector[1],
            groups,
            start_char: match_data.start_char(),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The offset the engine was at when it started this match, which is
    /// before `start()` when `\K` moved the reported start forward.
    pub fn start_char(&self) -> usize {
        self.start_char
    }

    /// Whether the match starts after it ends.
    pub fn is_backward(&self) -> bool {
        self.start > self.end
    }

    /// Total number of spans, including the whole match at index 0.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    pub fn groups(&self) -> &[Option<Range<usize>>] {
        &self.groups
    }

    /// Rejects a backward match, every consumer of match results treats
    /// that as fatal.
    pub fn ensure_forward(self) -> Result<Self, Error> {
        if self.is_backward() {
            Err(Error::BackwardMatch {
                start: self.start,
                end: self.end,
            })
        } else {
            Ok(self)
        }
    }
}

/// Finds the next match of `pattern` in `subject`, starting the search at
/// `start_offset`.
///
/// Returns `Ok(None)` when there is no match. An error means the engine
/// could not run the match, e.g. `start_offset` is past the end of the
/// subject, or in UTF mode not at a character boundary.
pub fn match_at(
    pattern: &CompiledPattern,
    subject: &[u8],
    start_offset: usize,
    options: MatchOptions,
) -> Result<Option<MatchResult>, Error> {
    let mut match_data = MatchData::for_code(pattern.code())?;
    exec(pattern, &mut match_data, subject, start_offset, options)
}

/// Same as `match_at` but reusing a match data block.
pub(crate) fn exec(
    pattern: &CompiledPattern,
    match_data: &mut MatchData,
    subject: &[u8],
    start_offset: usize,
    options: MatchOptions,
) -> Result<Option<MatchResult>, Error> {
    match match_data.exec(pattern.code(), subject, start_offset, options.bits())? {
        Some(pairs) => Ok(Some(MatchResult::from_match_data(
            match_data,
            pairs,
            pattern.capture_count() + 1,
        ))),
        None => Ok(None),
    }
}

impl CompiledPattern {
    pub fn match_at(
        &self,
        subject: &[u8],
        start_offset: usize,
        options: MatchOptions,
    ) -> Result<Option<MatchResult>, Error> {
        match_at(self, subject, start_offset, options)
    }

    /// The first match in the whole subject.
    pub fn find(&self, subject: &[u8]) -> Result<Option<MatchResult>, Error> {
        match_at(self, subject, 0, MatchOptions::NONE)
    }

    pub fn is_match(&self, subject: &[u8]) -> Result<bool, Error> {
        Ok(self.find(subject)?.is_some())
    }
}
