// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod ffi;

pub mod bridge;
pub mod capture;
pub mod error;
pub mod matches;
pub mod pattern;
pub mod process;
pub mod regex;
pub mod session;
pub mod substitute;

pub use capture::CaptureList;
pub use error::Error;
pub use matches::{find_matches, Matches};
pub use pattern::{compile, CompiledPattern, Newline, PatternOptions};
pub use process::{match_at, MatchOptions, MatchResult};
pub use regex::{CaptureMatches, Captures, FindMatches, Match, Regex};
pub use session::Session;
pub use substitute::{substitute, SubstituteMode};
