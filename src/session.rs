// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::debug;

use crate::{capture::CaptureList, error::Error, pattern::CompiledPattern};

/// Holds one compiled pattern for repeated matching against different
/// subjects.
///
/// Compiling a new pattern always drops the previous one, a failed compile
/// leaves the session empty.
#[derive(Debug, Default)]
pub struct Session {
    slot: Option<CompiledPattern>,
}

impl Session {
    pub fn new() -> Self {
        Session { slot: None }
    }

    pub fn compile(&mut self, pattern: &str) -> Result<(), Error> {
        if let Some(previous) = self.slot.take() {
            debug!("session pattern released: {}", previous);
        }

        self.slot = Some(CompiledPattern::new(pattern)?);
        Ok(())
    }

    pub fn pattern(&self) -> Option<&CompiledPattern> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_match(&self, subject: &str) -> Result<bool, Error> {
        self.current()?.is_match(subject.as_bytes())
    }

    /// The projected captures of the first match, see `CaptureList`.
    pub fn captures(&self, subject: &str) -> Result<Option<CaptureList>, Error> {
        let pattern = self.current()?;

        match pattern.find(subject.as_bytes())? {
            Some(result) => {
                let result = result.ensure_forward()?;
                Ok(Some(CaptureList::project(&result, subject.as_bytes())))
            }
            None => Ok(None),
        }
    }

    fn current(&self) -> Result<&CompiledPattern, Error> {
        self.slot.as_ref().ok_or(Error::EmptySession)
    }
}
