// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! Operations exposed to the host runtime.
//!
//! The host sees "no match" and "something went wrong" the same way (a
//! `false`, `None` or empty list), the failure itself goes to the log.

use log::{error, warn};

use crate::{
    capture::CaptureList,
    error::Error,
    matches::find_matches,
    pattern::CompiledPattern,
    session::Session,
    substitute::SubstituteMode,
};

fn report(operation: &str, pattern: &str, e: &Error) {
    match e {
        Error::Compile { .. } => warn!("{}: pattern \"{}\" rejected, {}", operation, pattern, e),
        _ => error!("{}: pattern \"{}\" failed, {}", operation, pattern, e),
    }
}

fn first_captures(pattern: &CompiledPattern, subject: &str) -> Result<Option<CaptureList>, Error> {
    match pattern.find(subject.as_bytes())? {
        Some(result) => {
            let result = result.ensure_forward()?;
            Ok(Some(CaptureList::project(&result, subject.as_bytes())))
        }
        None => Ok(None),
    }
}

/// Whether `pattern` matches anywhere in `subject`.
pub fn regex_test(pattern: &str, subject: &str) -> bool {
    let result = CompiledPattern::new(pattern).and_then(|p| p.is_match(subject.as_bytes()));

    result.unwrap_or_else(|e| {
        report("regex_test", pattern, &e);
        false
    })
}

/// The projected captures of the first match, see `CaptureList`.
pub fn regex_capture(pattern: &str, subject: &str) -> Option<CaptureList> {
    let result = CompiledPattern::new(pattern).and_then(|p| first_captures(&p, subject));

    result.unwrap_or_else(|e| {
        report("regex_capture", pattern, &e);
        None
    })
}

/// Compiles `pattern` into the session, replacing whatever was there.
pub fn regex_compile_global(session: &mut Session, pattern: &str) -> Result<(), Error> {
    session.compile(pattern).inspect_err(|e| {
        report("regex_compile_global", pattern, e);
    })
}

pub fn regex_match_global(session: &Session, subject: &str) -> bool {
    session.is_match(subject).unwrap_or_else(|e| {
        report("regex_match_global", session_source(session), &e);
        false
    })
}

pub fn regex_match_capture_global(session: &Session, subject: &str) -> Option<CaptureList> {
    session.captures(subject).unwrap_or_else(|e| {
        report("regex_match_capture_global", session_source(session), &e);
        None
    })
}

fn session_source(session: &Session) -> &str {
    session.pattern().map_or("", |p| p.as_str())
}

pub fn regex_replace(
    pattern: &str,
    replacement: &str,
    subject: &str,
    mode: SubstituteMode,
) -> Result<String, Error> {
    CompiledPattern::new(pattern)
        .and_then(|p| p.substitute(replacement, subject, mode))
        .inspect_err(|e| {
            report("regex_replace", pattern, e);
        })
}

pub fn regex_replace_first(pattern: &str, replacement: &str, subject: &str) -> Result<String, Error> {
    regex_replace(pattern, replacement, subject, SubstituteMode::First)
}

pub fn regex_replace_all(pattern: &str, replacement: &str, subject: &str) -> Result<String, Error> {
    regex_replace(pattern, replacement, subject, SubstituteMode::Global)
}

/// The projected captures of at most `max_matches` successive matches
/// (`0` = all of them).
///
/// On any failure the list is empty, matches found before the failure are
/// not returned.
pub fn regex_find_matches(pattern: &str, subject: &str, max_matches: usize) -> Vec<CaptureList> {
    let result = CompiledPattern::new(pattern)
        .and_then(|p| find_matches(&p, subject.as_bytes(), max_matches));

    match result {
        Ok(results) => results
            .iter()
            .map(|result| CaptureList::project(result, subject.as_bytes()))
            .collect(),
        Err(e) => {
            report("regex_find_matches", pattern, &e);
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{error::Error, session::Session, substitute::SubstituteMode};

    use super::{
        regex_capture, regex_compile_global, regex_find_matches, regex_match_capture_global,
        regex_match_global, regex_replace, regex_replace_all, regex_replace_first, regex_test,
    };

    fn lists(pattern: &str, subject: &str, max_matches: usize) -> Vec<Vec<String>> {
        regex_find_matches(pattern, subject, max_matches)
            .into_iter()
            .map(|list| list.into_vec())
            .collect()
    }

    #[test]
    fn test_regex_test() {
        assert!(regex_test("^a", "abcd"));
        assert!(!regex_test("^b", "abcd"));
        assert!(regex_test("", ""));

        // invalid patterns are a plain `false`
        assert!(!regex_test("a(", "a("));
    }

    #[test]
    fn test_regex_test_agrees_with_find_matches() {
        let cases = [
            ("^a", "abcd"),
            ("b+", "abba"),
            ("z", "abba"),
            ("a*", ""),
            ("(?m)^x$", "a\nx\nb"),
            ("(", "("),
        ];

        for (pattern, subject) in cases {
            assert_eq!(
                regex_test(pattern, subject),
                !regex_find_matches(pattern, subject, 1).is_empty(),
                "pattern: {}, subject: {}",
                pattern,
                subject
            );
        }
    }

    #[test]
    fn test_regex_capture() {
        assert_eq!(
            regex_capture("^([ab]*s)\\s*(.+?)$", "abbas kaviar").map(|c| c.into_vec()),
            Some(vec!["abbas".to_owned(), "kaviar".to_owned()])
        );
        assert_eq!(
            regex_capture("b+", "abba").map(|c| c.into_vec()),
            Some(vec!["bb".to_owned()])
        );
        assert_eq!(regex_capture("z", "abba"), None);
        assert_eq!(regex_capture("[", "abba"), None);
    }

    #[test]
    fn test_regex_global() {
        let mut session = Session::new();

        // nothing compiled yet
        assert!(!regex_match_global(&session, "abc"));
        assert_eq!(regex_match_capture_global(&session, "abc"), None);

        regex_compile_global(&mut session, "(\\d+)").unwrap();
        assert!(regex_match_global(&session, "abc123"));
        assert!(!regex_match_global(&session, "abc"));
        assert_eq!(
            regex_match_capture_global(&session, "abc123").map(|c| c.into_vec()),
            Some(vec!["123".to_owned()])
        );

        let result = regex_compile_global(&mut session, "(\\d+");
        assert!(matches!(result, Err(Error::Compile { .. })));
        assert!(!regex_match_global(&session, "abc123"));
    }

    #[test]
    fn test_regex_replace() {
        assert_eq!(regex_replace_all("a", "X", "banana").unwrap(), "bXnXnX");
        assert_eq!(regex_replace_first("a", "X", "banana").unwrap(), "bXnana");

        // zero matches leave the subject unchanged
        for mode in [SubstituteMode::First, SubstituteMode::Global] {
            assert_eq!(regex_replace("q", "X", "banana", mode).unwrap(), "banana");
        }

        // expanding replacement
        let long = "0123456789".repeat(10);
        assert_eq!(
            regex_replace_all(".", &long, "abc").unwrap(),
            long.repeat(3)
        );

        assert!(matches!(
            regex_replace_all("(", "X", "banana"),
            Err(Error::Compile { .. })
        ));
    }

    #[test]
    fn test_regex_find_matches() {
        assert_eq!(
            lists("a", "banana", 0),
            vec![vec!["a"], vec!["a"], vec!["a"]]
        );
        assert_eq!(lists("a", "banana", 2), vec![vec!["a"], vec!["a"]]);

        assert_eq!(
            lists("(\\w)=(\\d)", "a=1 b=2", 0),
            vec![vec!["a", "1"], vec!["b", "2"]]
        );

        assert_eq!(lists("a*", "ba", 0), vec![vec![""], vec!["a"], vec![""]]);

        // invalid pattern
        assert_eq!(lists("(", "banana", 0), Vec::<Vec<String>>::new());
    }

    #[test]
    fn test_regex_find_matches_empty_count() {
        // one empty match at each of the len + 1 positions, plus the
        // non-empty runs between them
        let subject = "baab";
        let all = lists("a*", subject, 0);
        let empties = all.iter().filter(|list| list[0].is_empty()).count();
        assert_eq!(empties, 3);
        assert_eq!(all, vec![vec![""], vec!["aa"], vec![""], vec![""]]);

        let subject = "bbbb";
        assert_eq!(lists("a*", subject, 0).len(), subject.len() + 1);
    }
}
