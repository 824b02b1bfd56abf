/*
 * boundary.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Rawmime, a streaming MIME parser.
 *
 * Rawmime is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Rawmime is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Rawmime.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Multipart delimiter lines (RFC 2046 section 5.1.1).

use regex::bytes::Regex;

use crate::mime::conditioner::line_boundary;

/// One delimiter line found in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoundaryMatch {
    /// Start of the delimiter, including the line break before `--`.
    pub(crate) start: usize,
    /// End of the delimiter line, including its line break.
    pub(crate) end: usize,
    /// The delimiter began at the start of the buffer, so the line break
    /// before it was in an earlier buffer.
    pub(crate) at_line_start: bool,
    /// `--boundary--`: no more sections follow.
    pub(crate) closing: bool,
}

/// Finds `--boundary` lines, optionally closed with `--`, with trailing
/// spaces or tabs allowed. The boundary is matched literally.
#[derive(Debug, Clone)]
pub(crate) struct BoundaryMatcher {
    pattern: Regex,
}

impl BoundaryMatcher {
    /// `boundary` is a binary string; chars above U+007F stand for single octets.
    pub(crate) fn new(boundary: &str) -> Result<Self, regex::Error> {
        let mut literal = String::with_capacity(boundary.len() * 2);
        for c in boundary.chars() {
            if c.is_ascii() {
                literal.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            } else {
                literal.push_str(&format!("(?-u:\\x{:02X})", c as u32 & 0xff));
            }
        }
        let pattern = Regex::new(&format!(
            r"(\r\n|[\r\n]|^)--{}(--)?[ \t]*(?:\r\n|[\r\n]|$)",
            literal
        ))?;
        Ok(Self { pattern })
    }

    pub(crate) fn find(&self, data: &[u8]) -> Option<BoundaryMatch> {
        let caps = self.pattern.captures(data)?;
        let whole = caps.get(0)?;
        Some(BoundaryMatch {
            start: whole.start(),
            end: whole.end(),
            at_line_start: caps.get(1).is_some_and(|m| m.is_empty()),
            closing: caps.get(2).is_some(),
        })
    }
}

/// How much of a section's pending data can be passed on while more may
/// follow: everything up to the last line break that is not the final one,
/// since the final line break belongs to a delimiter if one comes next.
pub(crate) fn hold_back(data: &[u8]) -> usize {
    let mut end = data.len();
    if end > 0 && data[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && data[end - 1] == b'\r' {
        end -= 1;
    }
    line_boundary(&data[..end])
}

/// Drop one trailing CRLF, LF or CR.
pub(crate) fn trim_line_ending(data: &mut Vec<u8>) {
    if data.last() == Some(&b'\n') {
        data.pop();
    }
    if data.last() == Some(&b'\r') {
        data.pop();
    }
}
