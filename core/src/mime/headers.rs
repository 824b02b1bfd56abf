/*
 * headers.rs
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

//! Header block splitting: end-of-headers detection and the field multi-map.

use indexmap::IndexMap;

use crate::mime::charset::binary_string;

/// The fields of one header block, in order of first appearance.
///
/// Names are lower-case. Values are trimmed binary strings (one char per
/// octet); a line without a colon has a `None` value. Repeated fields keep
/// every value in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: IndexMap<String, Vec<Option<String>>>,
    raw: Vec<u8>,
}

impl HeaderMap {
    /// Split a raw header block (without the blank line that ends it).
    ///
    /// Lines are broken at CRLF, LF or a lone CR, except where the next line
    /// starts with a space or tab (folding). A first line starting with
    /// `From ` is an mbox separator and is dropped, from the fields and from
    /// the raw text. With `strip_continuations`, CR and LF are removed from
    /// folded values.
    pub fn parse(block: &[u8], strip_continuations: bool) -> Self {
        let mut lines = split_lines(block);
        let mut raw_start = 0;
        if lines.first().is_some_and(|&(start, end)| block[start..end].starts_with(b"From ")) {
            lines.remove(0);
            raw_start = lines.first().map_or(block.len(), |&(start, _)| start);
        }

        let mut fields: IndexMap<String, Vec<Option<String>>> = IndexMap::new();
        for (start, end) in lines {
            let line = &block[start..end];
            let (name, value) = match line.iter().position(|&b| b == b':') {
                Some(colon) => {
                    let value = line[colon + 1..].trim_ascii();
                    let value = if strip_continuations {
                        value
                            .iter()
                            .copied()
                            .filter(|&b| b != b'\r' && b != b'\n')
                            .collect::<Vec<u8>>()
                    } else {
                        value.to_vec()
                    };
                    (&line[..colon], Some(binary_string(&value)))
                }
                None => (line, None),
            };
            let name = binary_string(name.trim_ascii()).to_ascii_lowercase();
            if name.is_empty() {
                continue;
            }
            fields.entry(name).or_default().push(value);
        }

        Self {
            fields,
            raw: block[raw_start..].to_vec(),
        }
    }

    /// First non-null value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())?
            .iter()
            .find_map(|v| v.as_deref())
    }

    /// Every value of `name`, in order; `None` for lines without a colon.
    pub fn get_all(&self, name: &str) -> &[Option<String>] {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    /// Field names with their values, in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The header block as received, minus any mbox `From ` line.
    pub fn raw_header_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn raw_header_text(&self) -> String {
        binary_string(&self.raw)
    }
}

/// (start, end) of each logical header line. The last piece is always included.
fn split_lines(block: &[u8]) -> Vec<(usize, usize)> {
    let folded = |i: usize| matches!(block.get(i), Some(b' ' | b'\t'));
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < block.len() {
        let terminator = match block[i] {
            b'\r' if block.get(i + 1) == Some(&b'\n') => {
                if folded(i + 2) {
                    0
                } else {
                    2
                }
            }
            b'\r' if !folded(i + 1) => 1,
            b'\n' if !folded(i + 1) => 1,
            _ => 0,
        };
        if terminator == 0 {
            i += 1;
        } else {
            lines.push((start, i));
            i += terminator;
            start = i;
        }
    }
    lines.push((start, block.len()));
    lines
}

/// Locate the blank line ending a header block in `data`, searching from `from`.
///
/// Returns the (start, end) of the delimiter. A line terminator at the very
/// start means there are no headers. Otherwise the delimiter is the first
/// doubled terminator: CRLF CRLF, LF LF or CR CR.
pub(crate) fn find_header_end(data: &[u8], from: usize) -> Option<(usize, usize)> {
    if from == 0 {
        match data {
            [b'\r', b'\n', ..] => return Some((0, 2)),
            [b'\r' | b'\n', ..] => return Some((0, 1)),
            _ => {}
        }
    }
    (from..data.len()).find_map(|i| {
        let rest = &data[i..];
        if rest.starts_with(b"\r\n\r\n") {
            Some((i, i + 4))
        } else if rest.starts_with(b"\n\n") || rest.starts_with(b"\r\r") {
            Some((i, i + 2))
        } else {
            None
        }
    })
}
