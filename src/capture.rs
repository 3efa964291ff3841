// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::{Deref, Range};

use crate::process::MatchResult;

/// The strings a host receives for one match.
///
/// - no capture groups: the whole match;
/// - one capture group: only that group;
/// - more groups: every group in order, without the whole match.
///
/// A group that did not participate is an empty string, so the length only
/// depends on the pattern.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct CaptureList(Vec<String>);

impl CaptureList {
    pub fn project(result: &MatchResult, subject: &[u8]) -> Self {
        let group_count = result.group_count();

        let indices = if group_count <= 1 {
            0..1
        } else {
            1..group_count
        };

        let items = indices
            .map(|idx| span_text(subject, result.group(idx)))
            .collect();

        CaptureList(items)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for CaptureList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<CaptureList> for Vec<String> {
    fn from(list: CaptureList) -> Self {
        list.0
    }
}

impl IntoIterator for CaptureList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// in non-UTF mode a span may cut a multi-byte character, such bytes are
// replaced with U+FFFD.
fn span_text(subject: &[u8], span: Option<Range<usize>>) -> String {
    span.and_then(|range| subject.get(range))
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{pattern::compile, process::MatchResult};

    use super::CaptureList;

    fn capture(pattern: &str, subject: &str) -> Vec<String> {
        let pattern = compile(pattern).unwrap();
        let result = pattern.find(subject.as_bytes()).unwrap().unwrap();
        CaptureList::project(&result, subject.as_bytes()).into_vec()
    }

    #[test]
    fn test_no_group() {
        assert_eq!(capture("b+", "abba"), vec!["bb"]);
        assert_eq!(capture("^a", "abcd"), vec!["a"]);
    }

    #[test]
    fn test_one_group() {
        // the whole match is dropped
        assert_eq!(capture("x(b+)y", "axbbya"), vec!["bb"]);
    }

    #[test]
    fn test_many_groups() {
        assert_eq!(
            capture("^([ab]*s)\\s*(.+?)$", "abbas kaviar"),
            vec!["abbas", "kaviar"]
        );
        assert_eq!(
            capture("(\\d{4})-(\\d{2})-(\\d{2})", "on 2025-04-22."),
            vec!["2025", "04", "22"]
        );
    }

    #[test]
    fn test_unset_groups() {
        // arity stays fixed by the pattern
        assert_eq!(capture("(a)|(b)|(c)", "b"), vec!["", "b", ""]);
        assert_eq!(capture("x(y)?", "x"), vec![""]);
        assert_eq!(capture("(a)(b)?", "a"), vec!["a", ""]);
    }

    #[test]
    fn test_empty_match() {
        assert_eq!(capture("a*", "bbb"), vec![""]);
    }

    #[test]
    fn test_project_raw_result() {
        let subject = "hello world".as_bytes();
        let result = MatchResult::new(0, 11, vec![Some(0..11), Some(0..5), None], 0);
        let list = CaptureList::project(&result, subject);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], "hello");
        assert_eq!(list.as_slice()[1], "");

        // spans outside the subject project as empty strings
        let result = MatchResult::new(0, 20, vec![Some(0..20)], 0);
        assert_eq!(CaptureList::project(&result, subject).into_vec(), vec![""]);
    }
}
