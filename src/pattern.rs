// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::{Debug, Display};

use pcre2_sys::{
    PCRE2_CASELESS, PCRE2_DOTALL, PCRE2_EXTENDED, PCRE2_EXTRA_ALLOW_LOOKAROUND_BSK,
    PCRE2_MULTILINE, PCRE2_NEWLINE_ANY, PCRE2_NEWLINE_ANYCRLF, PCRE2_NEWLINE_CR,
    PCRE2_NEWLINE_CRLF, PCRE2_NEWLINE_LF, PCRE2_NEWLINE_NUL, PCRE2_UCP, PCRE2_UTF,
};

use crate::{
    error::Error,
    ffi::{Code, CompileContext},
};

/// The character sequence(s) recognized as a line terminator.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Newline {
    Cr,
    Lf,
    CrLf,
    Any,
    AnyCrLf,
    Nul,
}

impl Newline {
    fn to_raw(self) -> u32 {
        match self {
            Newline::Cr => PCRE2_NEWLINE_CR,
            Newline::Lf => PCRE2_NEWLINE_LF,
            Newline::CrLf => PCRE2_NEWLINE_CRLF,
            Newline::Any => PCRE2_NEWLINE_ANY,
            Newline::AnyCrLf => PCRE2_NEWLINE_ANYCRLF,
            Newline::Nul => PCRE2_NEWLINE_NUL,
        }
    }

    fn from_raw(value: u32) -> Option<Self> {
        let newline = match value {
            PCRE2_NEWLINE_CR => Newline::Cr,
            PCRE2_NEWLINE_LF => Newline::Lf,
            PCRE2_NEWLINE_CRLF => Newline::CrLf,
            PCRE2_NEWLINE_ANY => Newline::Any,
            PCRE2_NEWLINE_ANYCRLF => Newline::AnyCrLf,
            PCRE2_NEWLINE_NUL => Newline::Nul,
            _ => return None,
        };
        Some(newline)
    }

    /// Whether a `\r\n` pair counts as one line terminator.
    pub fn admits_crlf(self) -> bool {
        matches!(self, Newline::Any | Newline::CrLf | Newline::AnyCrLf)
    }
}

impl Display for Newline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Newline::Cr => f.write_str("CR"),
            Newline::Lf => f.write_str("LF"),
            Newline::CrLf => f.write_str("CRLF"),
            Newline::Any => f.write_str("ANY"),
            Newline::AnyCrLf => f.write_str("ANYCRLF"),
            Newline::Nul => f.write_str("NUL"),
        }
    }
}

/// Compile-time options.
///
/// Everything is off by default, which is the same as compiling with no
/// option bits at all. Options can still be switched on from inside the
/// pattern, e.g. `(*UTF)`, `(*CRLF)` or `(?i)`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PatternOptions {
    pub caseless: bool,
    pub multi_line: bool,
    pub dotall: bool,
    pub extended: bool,
    pub utf: bool,
    pub ucp: bool,

    // accept `\K` inside lookaround assertions, which can produce a match
    // whose start is after its end.
    pub allow_lookaround_bsk: bool,

    // `None` keeps the library default
    pub newline: Option<Newline>,
}

impl PatternOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caseless(mut self, yes: bool) -> Self {
        self.caseless = yes;
        self
    }

    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    pub fn dotall(mut self, yes: bool) -> Self {
        self.dotall = yes;
        self
    }

    pub fn extended(mut self, yes: bool) -> Self {
        self.extended = yes;
        self
    }

    pub fn utf(mut self, yes: bool) -> Self {
        self.utf = yes;
        self
    }

    /// Use Unicode properties for `\d`, `\w` etc. Implies nothing about
    /// UTF mode, which has to be enabled separately.
    pub fn ucp(mut self, yes: bool) -> Self {
        self.ucp = yes;
        self
    }

    /// Permits `\K` in lookarounds (rejected by default since PCRE2 10.38).
    pub fn allow_lookaround_bsk(mut self, yes: bool) -> Self {
        self.allow_lookaround_bsk = yes;
        self
    }

    pub fn newline(mut self, newline: Newline) -> Self {
        self.newline = Some(newline);
        self
    }

    fn to_raw(&self) -> u32 {
        let mut flags = 0;
        for (enabled, flag) in [
            (self.caseless, PCRE2_CASELESS),
            (self.multi_line, PCRE2_MULTILINE),
            (self.dotall, PCRE2_DOTALL),
            (self.extended, PCRE2_EXTENDED),
            (self.utf, PCRE2_UTF),
            (self.ucp, PCRE2_UCP),
        ] {
            if enabled {
                flags |= flag;
            }
        }
        flags
    }
}

/// An immutable compiled pattern.
///
/// It can be shared between threads and matched concurrently, every match
/// call owns its own match data.
pub struct CompiledPattern {
    code: Code,
    source: String,
    options: PatternOptions,
    utf: bool,
    newline: Newline,
    capture_names: Vec<Option<String>>,
}

impl CompiledPattern {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_options(pattern, &PatternOptions::default())
    }

    pub fn with_options(pattern: &str, options: &PatternOptions) -> Result<Self, Error> {
        let mut context = CompileContext::new()?;
        if let Some(newline) = options.newline {
            context.set_newline(newline.to_raw())?;
        }
        if options.allow_lookaround_bsk {
            context.set_extra_options(PCRE2_EXTRA_ALLOW_LOOKAROUND_BSK)?;
        }

        let code = Code::compile(pattern, options.to_raw(), &mut context)?;

        // query the effective settings, the pattern itself may have changed
        // them with a leading `(*UTF)`, `(*CRLF)`, etc.
        let utf = code.all_options()? & PCRE2_UTF != 0;
        let newline = Newline::from_raw(code.newline()?).unwrap_or(Newline::Lf);
        let capture_names = code.capture_names()?;

        Ok(CompiledPattern {
            code,
            source: pattern.to_owned(),
            options: options.clone(),
            utf,
            newline,
            capture_names,
        })
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    pub fn is_utf(&self) -> bool {
        self.utf
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// The number of explicit capture groups, not counting the whole match.
    pub fn capture_count(&self) -> usize {
        self.capture_names.len() - 1
    }

    /// Group names indexed by group number. Index 0 is the whole match and
    /// is never named.
    pub fn capture_names(&self) -> &[Option<String>] {
        &self.capture_names
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.capture_names
            .iter()
            .position(|item| item.as_deref() == Some(name))
    }

    pub(crate) fn code(&self) -> &Code {
        &self.code
    }
}

impl Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("utf", &self.utf)
            .field("newline", &self.newline)
            .field("capture_names", &self.capture_names)
            .finish()
    }
}

impl Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compiles a pattern with the default options.
pub fn compile(pattern: &str) -> Result<CompiledPattern, Error> {
    CompiledPattern::new(pattern)
}
