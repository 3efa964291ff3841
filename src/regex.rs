// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::{Index, Range};

use crate::{
    error::Error,
    matches::Matches,
    pattern::{CompiledPattern, PatternOptions},
    process::MatchResult,
    substitute::SubstituteMode,
};

/// A compiled regular expression for matching Rust strings.
///
/// `Regex::new` compiles in UTF mode, so every reported span lies on a
/// character boundary of the text.
pub struct Regex {
    pub pattern: CompiledPattern,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_options(pattern, &PatternOptions::default().utf(true))
    }

    pub fn with_options(pattern: &str, options: &PatternOptions) -> Result<Self, Error> {
        let pattern = CompiledPattern::with_options(pattern, options)?;
        Ok(Regex { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// The number of groups, including the implicit group 0.
    pub fn captures_len(&self) -> usize {
        self.pattern.capture_count() + 1
    }

    pub fn capture_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.pattern.capture_names().iter().map(|name| name.as_deref())
    }

    pub fn is_match(&self, text: &str) -> Result<bool, Error> {
        self.pattern.is_match(text.as_bytes())
    }

    pub fn find<'a, 'b>(&'a self, text: &'b str) -> Result<Option<Match<'a, 'b>>, Error> {
        let result = match self.pattern.find(text.as_bytes())? {
            Some(result) => result.ensure_forward()?,
            None => return Ok(None),
        };

        Ok(Some(self.new_match(text, 0, result.range())))
    }

    pub fn find_iter<'a, 'b>(&'a self, text: &'b str) -> FindMatches<'a, 'b> {
        FindMatches {
            regex: self,
            text,
            matches: self.pattern.find_iter(text.as_bytes()),
        }
    }

    pub fn captures<'a, 'b>(&'a self, text: &'b str) -> Result<Option<Captures<'a, 'b>>, Error> {
        let result = match self.pattern.find(text.as_bytes())? {
            Some(result) => result.ensure_forward()?,
            None => return Ok(None),
        };

        Ok(Some(self.new_captures(text, &result)))
    }

    pub fn captures_iter<'a, 'b>(&'a self, text: &'b str) -> CaptureMatches<'a, 'b> {
        CaptureMatches {
            regex: self,
            text,
            matches: self.pattern.find_iter(text.as_bytes()),
        }
    }

    /// Replaces the left-most match, see `CompiledPattern::substitute` for
    /// the replacement syntax.
    pub fn replace(&self, text: &str, replacement: &str) -> Result<String, Error> {
        self.pattern
            .substitute(replacement, text, SubstituteMode::First)
    }

    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, Error> {
        self.pattern
            .substitute(replacement, text, SubstituteMode::Global)
    }

    fn new_match<'a, 'b>(&'a self, text: &'b str, index: usize, range: Range<usize>) -> Match<'a, 'b> {
        let name = self
            .pattern
            .capture_names()
            .get(index)
            .and_then(|name| name.as_deref());

        // `\C` can still split a character in UTF mode
        let value = text.get(range.clone()).unwrap_or_default();

        Match::new(range.start, range.end, name, value)
    }

    fn new_captures<'a, 'b>(&'a self, text: &'b str, result: &MatchResult) -> Captures<'a, 'b> {
        let matches = result
            .groups()
            .iter()
            .enumerate()
            .map(|(idx, span)| {
                span.as_ref()
                    .map(|range| self.new_match(text, idx, range.clone()))
            })
            .collect();

        Captures { matches }
    }
}

pub struct CaptureMatches<'a, 'b> {
    regex: &'a Regex,
    text: &'b str,
    matches: Matches<'a, 'b>,
}

impl<'a, 'b> Iterator for CaptureMatches<'a, 'b> {
    type Item = Result<Captures<'a, 'b>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.matches.next()?;
        Some(result.map(|result| self.regex.new_captures(self.text, &result)))
    }
}

pub struct FindMatches<'a, 'b> {
    regex: &'a Regex,
    text: &'b str,
    matches: Matches<'a, 'b>,
}

impl<'a, 'b> Iterator for FindMatches<'a, 'b> {
    type Item = Result<Match<'a, 'b>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.matches.next()?;
        Some(result.map(|result| self.regex.new_match(self.text, 0, result.range())))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Captures<'a, 'b> {
    // `None` for a group that did not participate in the match
    pub matches: Vec<Option<Match<'a, 'b>>>,
}

impl<'b> Captures<'_, 'b> {
    // the following methods are intended to
    // be compatible with the 'Captures' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Captures.html

    pub fn get(&self, index: usize) -> Option<&Match<'_, '_>> {
        self.matches.get(index).and_then(|item| item.as_ref())
    }

    pub fn name(&self, name: &str) -> Option<&Match<'_, '_>> {
        self.matches
            .iter()
            .flatten()
            .find(|item| item.name == Some(name))
    }

    // e.g.
    //
    // ```
    //   let c = re.captures("...").unwrap().unwrap();
    //   let (whole, [one, two, three]) = c.extract();
    // ```
    //
    // groups that did not participate are empty strings.
    pub fn extract<const N: usize>(&self) -> (&'b str, [&'b str; N]) {
        let value_of = |idx: usize| {
            self.matches
                .get(idx)
                .and_then(|item| item.as_ref())
                .map_or("", |item| item.value)
        };

        let mut items: [&str; N] = [""; N];
        for (idx, item) in items.iter_mut().enumerate() {
            *item = value_of(idx + 1);
        }
        (value_of(0), items)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<usize> for Captures<'_, '_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| {
                panic!(
                    "Capture group {} did not participate in the match or is out of range (groups: {}).",
                    index,
                    self.len()
                )
            })
            .as_str()
    }
}

impl Index<&str> for Captures<'_, '_> {
    type Output = str;

    fn index(&self, name: &str) -> &Self::Output {
        self.name(name)
            .unwrap_or_else(|| panic!("Cannot find the capture group named \"{}\".", name))
            .as_str()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Match<'a, 'b> {
    pub start: usize, // byte offset in the text (value included)
    pub end: usize,   // byte offset in the text (value excluded)
    pub name: Option<&'a str>,
    pub value: &'b str,
}

impl<'a, 'b> Match<'a, 'b> {
    pub fn new(start: usize, end: usize, name: Option<&'a str>, value: &'b str) -> Self {
        Match {
            start,
            end,
            name,
            value,
        }
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    pub fn as_str(&self) -> &'b str {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::pattern::PatternOptions;

    use super::{Captures, Match, Regex};

    fn new_match(start: usize, end: usize, value: &str) -> Match<'_, '_> {
        Match::new(start, end, None, value)
    }

    fn new_captures<'a, 'b>(
        mes: &'a [Option<(
            /*start:*/ usize,
            /*end:*/ usize,
            /*name:*/ Option<&'a str>,
            /*value:*/ &'b str,
        )>],
    ) -> Captures<'a, 'b> {
        let matches: Vec<Option<Match>> = mes
            .iter()
            .map(|item| item.map(|item| Match::new(item.0, item.1, item.2, item.3)))
            .collect();

        Captures { matches }
    }

    #[test]
    fn test_find_char() {
        let re = Regex::new("a").unwrap();

        // exists in the middle and at the end of the text
        let mut matches = re.find_iter("babbaa").map(|m| m.unwrap());
        assert_eq!(matches.next(), Some(new_match(1, 2, "a")));
        assert_eq!(matches.next(), Some(new_match(4, 5, "a")));
        assert_eq!(matches.next(), Some(new_match(5, 6, "a")));
        assert_eq!(matches.next(), None);

        // exists in the middle and at the beginning of the text
        let mut matches = re.find_iter("abaabb").map(|m| m.unwrap());
        assert_eq!(matches.next(), Some(new_match(0, 1, "a")));
        assert_eq!(matches.next(), Some(new_match(2, 3, "a")));
        assert_eq!(matches.next(), Some(new_match(3, 4, "a")));
        assert_eq!(matches.next(), None);

        // non-existent
        assert!(re.find_iter("xyz").next().is_none());
        assert_eq!(re.find("xyz").unwrap(), None);
    }

    #[test]
    fn test_find_char_with_utf8() {
        let re = Regex::new("文").unwrap();
        let mut matches = re.find_iter("abc中文字符文字🌏人文").map(|m| m.unwrap());

        assert_eq!(matches.next(), Some(new_match(6, 9, "文")));
        assert_eq!(matches.next(), Some(new_match(15, 18, "文")));
        assert_eq!(matches.next(), Some(new_match(28, 31, "文")));
        assert_eq!(matches.next(), None);

        // a single `.` is a whole character in UTF mode
        let re = Regex::new(".").unwrap();
        let values: Vec<&str> = re
            .find_iter("a🌏b")
            .map(|m| m.unwrap().as_str())
            .collect();
        assert_eq!(values, vec!["a", "🌏", "b"]);
    }

    #[test]
    fn test_find_empty() {
        let re = Regex::new("a*").unwrap();
        let values: Vec<(usize, usize)> = re
            .find_iter("ba")
            .map(|m| {
                let m = m.unwrap();
                (m.start(), m.end())
            })
            .collect();
        assert_eq!(values, vec![(0, 0), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_is_match() {
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
        assert!(re.is_match("2025-04-22").unwrap());
        assert!(!re.is_match("04-22").unwrap());
    }

    #[test]
    fn test_captures() {
        let re = Regex::new(r#"(0x|0o|0b)(\d+)"#).unwrap();
        let text = "abc0x23def0o456xyz";

        let mut matches = re.captures_iter(text).map(|c| c.unwrap());

        assert_eq!(
            matches.next(),
            Some(new_captures(&[
                Some((3, 7, None, "0x23")),
                Some((3, 5, None, "0x")),
                Some((5, 7, None, "23"))
            ]))
        );

        assert_eq!(
            matches.next(),
            Some(new_captures(&[
                Some((10, 15, None, "0o456")),
                Some((10, 12, None, "0o")),
                Some((12, 15, None, "456"))
            ]))
        );

        assert_eq!(matches.next(), None);
    }

    #[test]
    fn test_captures_named() {
        let re = Regex::new(r#"(?<prefix>0x|0o|0b)(?<number>\d+)"#).unwrap();
        let text = "abc0x23def0o456xyz";

        assert_eq!(re.captures_len(), 3);
        assert_eq!(
            re.capture_names().collect::<Vec<_>>(),
            vec![None, Some("prefix"), Some("number")]
        );

        let one = re.captures(text).unwrap().unwrap();
        assert_eq!(one.len(), 3);

        // test 'Captures::get'
        assert_eq!(one.get(0).unwrap().as_str(), "0x23");
        assert_eq!(one.get(1).unwrap().as_str(), "0x");
        assert_eq!(one.get(2).unwrap().as_str(), "23");
        assert_eq!(one.get(3), None);

        // test Captures number index trait
        assert_eq!(&one[0], "0x23");
        assert_eq!(&one[1], "0x");
        assert_eq!(&one[2], "23");

        // test 'Captures::name'
        assert_eq!(one.name("prefix").unwrap().as_str(), "0x");
        assert_eq!(one.name("number").unwrap().as_str(), "23");
        assert_eq!(one.name("suffix"), None);

        // test Captures str index trait
        assert_eq!(&one["prefix"], "0x");
        assert_eq!(&one["number"], "23");

        // test 'Captures::extract()'
        assert_eq!(("0x23", ["0x", "23"]), one.extract());
    }

    #[test]
    fn test_captures_unset_group() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        let one = re.captures("xb").unwrap().unwrap();

        assert_eq!(
            one,
            new_captures(&[Some((1, 2, None, "b")), None, Some((1, 2, None, "b"))])
        );
        assert_eq!(one.get(1), None);
        assert_eq!(("b", ["", "b"]), one.extract());
    }

    #[test]
    #[should_panic]
    fn test_captures_index_unset_group() {
        let re = Regex::new(r"(a)|(b)").unwrap();
        let one = re.captures("xb").unwrap().unwrap();
        let _ = &one[1];
    }

    #[test]
    fn test_backreference() {
        let re = Regex::new(r#"<(?<tag_name>\w+)>.+</\k<tag_name>>"#).unwrap();
        let text = "zero<div>one<div>two</div>three</div>four";

        assert_eq!(
            re.captures(text).unwrap(),
            Some(new_captures(&[
                Some((4, 37, None, "<div>one<div>two</div>three</div>")),
                Some((5, 8, Some("tag_name"), "div"))
            ]))
        );

        // backreference + lazy
        let re = Regex::new(r#"<(?<tag_name>\w+)>.+?</\k<tag_name>>"#).unwrap();
        assert_eq!(
            re.captures(text).unwrap(),
            Some(new_captures(&[
                Some((4, 26, None, "<div>one<div>two</div>")),
                Some((5, 8, Some("tag_name"), "div"))
            ]))
        );
    }

    #[test]
    fn test_replace() {
        let re = Regex::new("a").unwrap();
        assert_eq!(re.replace("banana", "X").unwrap(), "bXnana");
        assert_eq!(re.replace_all("banana", "X").unwrap(), "bXnXnX");

        let re = Regex::new(r"#(?<hex>[\da-f]{6})").unwrap();
        assert_eq!(
            re.replace_all("color #ffbb33 and #bbdd99.", "0x${hex}").unwrap(),
            "color 0xffbb33 and 0xbbdd99."
        );
    }

    #[test]
    fn test_options() {
        let options = PatternOptions::new().caseless(true).utf(true);
        let re = Regex::with_options("abc", &options).unwrap();
        assert_eq!(re.as_str(), "abc");
        assert_eq!(re.find("xABCx").unwrap(), Some(new_match(1, 4, "ABC")));

        let options = PatternOptions::new().multi_line(true);
        let re = Regex::with_options("^\\w+$", &options).unwrap();
        let values: Vec<&str> = re
            .find_iter("one\ntwo\nthree")
            .map(|m| m.unwrap().as_str())
            .collect();
        assert_eq!(values, vec!["one", "two", "three"]);
    }
}
