/*
 * part_id.rs
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

//! Part numbering.
//!
//! The outermost message is `""`. Sections of a multipart body are numbered
//! from 1 and joined with `.` (IMAP style, `"1.2"`). The body of a
//! message/rfc822-like part is its number followed by `$` (`"1$"`), which has
//! no IMAP equivalent.

/// Number of the `index`th section (from 1) of the multipart part `parent`.
pub fn child_part_id(parent: &str, index: u32) -> String {
    if parent.is_empty() {
        index.to_string()
    } else {
        format!("{}.{}", parent, index)
    }
}

/// Number of the enclosed message of the message/* part `parent`.
pub fn message_body_id(parent: &str) -> String {
    format!("{}$", parent)
}

/// True when `part` is `root` or lies below it.
///
/// `"1"` contains `"1.2"` and `"1$"` but not `"10"`.
pub fn is_within(root: &str, part: &str) -> bool {
    if !part.starts_with(root) {
        return false;
    }
    match part.as_bytes().get(root.len()) {
        None => true,
        Some(&c) => root.is_empty() || c == b'.' || c == b'$',
    }
}
