/*
 * conditioner.rs
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

//! Re-chunks input so that everything passed on ends at a line boundary.

use bytes::BytesMut;

/// Offset just past the last line terminator in `buf`, or 0 if there is none.
///
/// A `\r` in the last position is not a terminator yet: the next byte may be
/// the `\n` of a CRLF.
pub(crate) fn line_boundary(buf: &[u8]) -> usize {
    let Some(last) = buf.len().checked_sub(1) else {
        return 0;
    };
    let cr = buf[..last].iter().rposition(|&b| b == b'\r');
    let lf = buf.iter().rposition(|&b| b == b'\n');
    match cr.max(lf) {
        Some(i) => i + 1,
        None => 0,
    }
}

/// Holds back the incomplete last line of the input.
#[derive(Debug, Default)]
pub(crate) struct PacketConditioner {
    held: BytesMut,
}

impl PacketConditioner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a chunk. Returns the complete lines now available, if any.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Option<BytesMut> {
        if chunk.is_empty() {
            return None;
        }
        self.held.extend_from_slice(chunk);
        match line_boundary(&self.held) {
            0 => None,
            at => Some(self.held.split_to(at)),
        }
    }

    /// Release whatever is held, complete line or not.
    pub(crate) fn finish(&mut self) -> Option<BytesMut> {
        if self.held.is_empty() {
            None
        } else {
            Some(self.held.split())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(line_boundary(b""), 0);
        assert_eq!(line_boundary(b"abc"), 0);
        assert_eq!(line_boundary(b"ab\ncd"), 3);
        assert_eq!(line_boundary(b"ab\r\ncd"), 4);
        assert_eq!(line_boundary(b"ab\r\n"), 4);
        assert_eq!(line_boundary(b"ab\rcd"), 3);
        assert_eq!(line_boundary(b"\r"), 0);
        assert_eq!(line_boundary(b"ab\nc\r"), 3);
        assert_eq!(line_boundary(b"\r\r"), 1);
    }

    #[test]
    fn holds_partial_lines() {
        let mut c = PacketConditioner::new();
        assert!(c.push(b"Subject: hel").is_none());
        assert_eq!(&c.push(b"lo\r\nTo").unwrap()[..], b"Subject: hello\r\n");
        assert!(c.push(b"").is_none());
        assert!(c.push(b": x\r").is_none());
        assert_eq!(&c.push(b"\n").unwrap()[..], b"To: x\r\n");
        assert!(c.finish().is_none());
    }

    #[test]
    fn trailing_cr_waits_for_next_byte() {
        let mut c = PacketConditioner::new();
        assert!(c.push(b"abc\r").is_none());
        assert_eq!(&c.push(b"def").unwrap()[..], b"abc\r");
        assert_eq!(&c.finish().unwrap()[..], b"def");
    }

    #[test]
    fn finish_flushes_unterminated_tail() {
        let mut c = PacketConditioner::new();
        assert!(c.push(b"no newline").is_none());
        assert_eq!(&c.finish().unwrap()[..], b"no newline");
        assert!(c.finish().is_none());
    }
}
