// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! Owning handles over the native PCRE2 objects.
//!
//! Everything `unsafe` in the crate lives in this module. Each handle frees
//! its native object in `Drop`, so every exit path (including errors and the
//! substitution retry loop) releases what it allocated.

use std::ffi::c_void;
use std::ptr::{self, NonNull};
use std::slice;

use pcre2_sys::*;

use crate::error::Error;

/// Value of an ovector entry whose group did not participate in the match.
pub(crate) const UNSET: usize = usize::MAX;

/// Returns the human readable message for a PCRE2 error code.
pub(crate) fn error_message(code: i32) -> String {
    let mut buffer = [0u8; 256];
    let rc = unsafe { pcre2_get_error_message_8(code, buffer.as_mut_ptr(), buffer.len()) };

    if rc < 0 {
        // the only failures are an unknown code and a truncated message,
        // the buffer is large enough for every message PCRE2 has.
        return format!("unknown error code {}", code);
    }

    String::from_utf8_lossy(&buffer[..rc as usize]).into_owned()
}

// Slices derived from an empty `Vec` or `String` carry a dangling pointer,
// hand the library a real (static) one instead.
fn non_dangling(bytes: &[u8]) -> &[u8] {
    if bytes.is_empty() {
        b""
    } else {
        bytes
    }
}

pub(crate) struct CompileContext {
    context: NonNull<pcre2_compile_context_8>,
}

impl CompileContext {
    pub fn new() -> Result<Self, Error> {
        let raw = unsafe { pcre2_compile_context_create_8(ptr::null_mut()) };
        NonNull::new(raw)
            .map(|context| CompileContext { context })
            .ok_or_else(|| Error::Compile {
                code: PCRE2_ERROR_NOMEMORY,
                offset: 0,
                message: error_message(PCRE2_ERROR_NOMEMORY),
            })
    }

    pub fn set_newline(&mut self, value: u32) -> Result<(), Error> {
        let rc = unsafe { pcre2_set_newline_8(self.context.as_ptr(), value) };
        if rc == 0 {
            Ok(())
        } else {
            Err(Error::Compile {
                code: rc,
                offset: 0,
                message: error_message(rc),
            })
        }
    }

    /// Sets the `PCRE2_EXTRA_*` option bits.
    pub fn set_extra_options(&mut self, value: u32) -> Result<(), Error> {
        let rc = unsafe { pcre2_set_compile_extra_options_8(self.context.as_ptr(), value) };
        if rc == 0 {
            Ok(())
        } else {
            Err(Error::Compile {
                code: rc,
                offset: 0,
                message: error_message(rc),
            })
        }
    }

    fn as_mut_ptr(&mut self) -> *mut pcre2_compile_context_8 {
        self.context.as_ptr()
    }
}

impl Drop for CompileContext {
    fn drop(&mut self) {
        unsafe { pcre2_compile_context_free_8(self.context.as_ptr()) }
    }
}

/// A compiled pattern.
pub(crate) struct Code {
    code: NonNull<pcre2_code_8>,
}

// A compiled pattern is never mutated after `pcre2_compile` returns (JIT is
// not used), PCRE2 documents it as safe to share between threads.
unsafe impl Send for Code {}
unsafe impl Sync for Code {}

impl Code {
    pub fn compile(pattern: &str, options: u32, context: &mut CompileContext) -> Result<Self, Error> {
        let pattern = non_dangling(pattern.as_bytes());
        let mut error_code: i32 = 0;
        let mut error_offset: usize = 0;

        let raw = unsafe {
            pcre2_compile_8(
                pattern.as_ptr(),
                pattern.len(),
                options,
                &mut error_code,
                &mut error_offset,
                context.as_mut_ptr(),
            )
        };

        NonNull::new(raw)
            .map(|code| Code { code })
            .ok_or_else(|| Error::Compile {
                code: error_code,
                offset: error_offset,
                message: error_message(error_code),
            })
    }

    pub fn as_ptr(&self) -> *const pcre2_code_8 {
        self.code.as_ptr()
    }

    fn info(&self, what: u32, where_: *mut c_void) -> Result<(), Error> {
        let rc = unsafe { pcre2_pattern_info_8(self.as_ptr(), what, where_) };
        if rc < 0 {
            Err(Error::Info {
                code: rc,
                message: error_message(rc),
            })
        } else {
            Ok(())
        }
    }

    fn info_u32(&self, what: u32) -> Result<u32, Error> {
        let mut value: u32 = 0;
        self.info(what, &mut value as *mut u32 as *mut c_void)?;
        Ok(value)
    }

    /// The final option bits, including those set by `(*UTF)` and friends
    /// at the start of the pattern.
    pub fn all_options(&self) -> Result<u32, Error> {
        self.info_u32(PCRE2_INFO_ALLOPTIONS)
    }

    /// One of the `PCRE2_NEWLINE_*` values.
    pub fn newline(&self) -> Result<u32, Error> {
        self.info_u32(PCRE2_INFO_NEWLINE)
    }

    pub fn capture_count(&self) -> Result<usize, Error> {
        Ok(self.info_u32(PCRE2_INFO_CAPTURECOUNT)? as usize)
    }

    /// Group names indexed by group number, index 0 (the whole match) is
    /// always `None`.
    pub fn capture_names(&self) -> Result<Vec<Option<String>>, Error> {
        let mut names = vec![None; self.capture_count()? + 1];

        let name_count = self.info_u32(PCRE2_INFO_NAMECOUNT)? as usize;
        if name_count == 0 {
            return Ok(names);
        }

        let entry_size = self.info_u32(PCRE2_INFO_NAMEENTRYSIZE)? as usize;
        let mut table_ptr: *const u8 = ptr::null();
        self.info(
            PCRE2_INFO_NAMETABLE,
            &mut table_ptr as *mut *const u8 as *mut c_void,
        )?;

        if table_ptr.is_null() || entry_size < 3 {
            return Ok(names);
        }

        // the table is owned by the compiled code and lives as long as `self`
        let table = unsafe { slice::from_raw_parts(table_ptr, name_count * entry_size) };

        // in the 8-bit library each entry is the group number (two bytes,
        // most significant first) followed by the NUL terminated name.
        for entry in table.chunks_exact(entry_size) {
            let group = ((entry[0] as usize) << 8) | entry[1] as usize;
            let name = &entry[2..];
            let name = match name.iter().position(|&b| b == 0) {
                Some(end) => &name[..end],
                None => name,
            };

            if let Some(slot) = names.get_mut(group) {
                *slot = Some(String::from_utf8_lossy(name).into_owned());
            }
        }

        Ok(names)
    }

    /// Runs the native substitution into `output`.
    ///
    /// Returns the number of replacements and the written length, or the
    /// raw (negative) return code. `PCRE2_ERROR_NOMEMORY` means `output`
    /// is too small.
    pub fn substitute(
        &self,
        subject: &[u8],
        replacement: &[u8],
        options: u32,
        output: &mut [u8],
    ) -> Result<(usize, usize), i32> {
        let subject = non_dangling(subject);
        let replacement = non_dangling(replacement);
        let mut output_length = output.len();

        let rc = unsafe {
            pcre2_substitute_8(
                self.as_ptr(),
                subject.as_ptr(),
                subject.len(),
                0,
                options,
                ptr::null_mut(),
                ptr::null_mut(),
                replacement.as_ptr(),
                replacement.len(),
                output.as_mut_ptr(),
                &mut output_length,
            )
        };

        if rc < 0 {
            Err(rc)
        } else {
            Ok((rc as usize, output_length.min(output.len())))
        }
    }
}

impl Drop for Code {
    fn drop(&mut self) {
        unsafe { pcre2_code_free_8(self.code.as_ptr()) }
    }
}

/// The block that receives the offsets of one match attempt.
pub(crate) struct MatchData {
    data: NonNull<pcre2_match_data_8>,
    ovector: *const usize,
    pairs: usize,
}

impl MatchData {
    /// Creates a block sized for every capture group of `code`, so a
    /// successful match never reports "ovector too small".
    pub fn for_code(code: &Code) -> Result<Self, Error> {
        let raw = unsafe { pcre2_match_data_create_from_pattern_8(code.as_ptr(), ptr::null_mut()) };
        let data = NonNull::new(raw).ok_or_else(|| Error::Match {
            code: PCRE2_ERROR_NOMEMORY,
            message: error_message(PCRE2_ERROR_NOMEMORY),
        })?;

        let ovector = unsafe { pcre2_get_ovector_pointer_8(data.as_ptr()) } as *const usize;
        let pairs = unsafe { pcre2_get_ovector_count_8(data.as_ptr()) } as usize;

        Ok(MatchData {
            data,
            ovector,
            pairs,
        })
    }

    /// Returns `Ok(Some(n))` on a match, where the first `n` ovector pairs
    /// are meaningful, and `Ok(None)` when there is no match.
    pub fn exec(
        &mut self,
        code: &Code,
        subject: &[u8],
        start_offset: usize,
        options: u32,
    ) -> Result<Option<usize>, Error> {
        let subject = non_dangling(subject);
        let rc = unsafe {
            pcre2_match_8(
                code.as_ptr(),
                subject.as_ptr(),
                subject.len(),
                start_offset,
                options,
                self.data.as_ptr(),
                ptr::null_mut(),
            )
        };

        if rc == PCRE2_ERROR_NOMATCH {
            Ok(None)
        } else if rc > 0 {
            Ok(Some((rc as usize).min(self.pairs)))
        } else if rc == 0 {
            // ovector too small, cannot happen with a block sized from
            // the pattern; every pair is filled in that case.
            Ok(Some(self.pairs))
        } else {
            Err(Error::Match {
                code: rc,
                message: error_message(rc),
            })
        }
    }

    pub fn ovector(&self) -> &[usize] {
        unsafe { slice::from_raw_parts(self.ovector, self.pairs * 2) }
    }

    /// The offset at which the last successful match actually started
    /// scanning, which can differ from the reported start when `\K` is used.
    pub fn start_char(&self) -> usize {
        unsafe { pcre2_get_startchar_8(self.data.as_ptr()) }
    }
}

impl Drop for MatchData {
    fn drop(&mut self) {
        unsafe { pcre2_match_data_free_8(self.data.as_ptr()) }
    }
}
