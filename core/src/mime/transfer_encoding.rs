/*
 * transfer_encoding.rs
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

//! Content-Transfer-Encoding decoding of streamed bodies.

use crate::mime::base64;
use crate::mime::headers::HeaderMap;
use crate::mime::quoted_printable;

/// A Content-Transfer-Encoding that needs undoing. 7bit, 8bit, binary and
/// unknown encodings pass through unchanged and have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDecoding {
    QuotedPrintable,
    Base64,
}

impl TransferDecoding {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("quoted-printable") {
            Some(Self::QuotedPrintable)
        } else if value.eq_ignore_ascii_case("base64") {
            Some(Self::Base64)
        } else {
            None
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get("content-transfer-encoding")
            .and_then(Self::parse)
    }

    /// Decode one piece. Returns (decoded, leftover); the leftover must be
    /// prepended to the next piece. `more` is false on the last piece.
    pub fn decode(self, src: &[u8], more: bool) -> (Vec<u8>, Vec<u8>) {
        match self {
            Self::QuotedPrintable => (quoted_printable::decode(src), Vec::new()),
            Self::Base64 => base64::decode(src, more),
        }
    }
}

/// A transfer decoding plus the input it has not consumed yet.
#[derive(Debug, Default)]
pub(crate) struct StreamDecoder {
    decoding: Option<TransferDecoding>,
    saved: Vec<u8>,
}

impl StreamDecoder {
    pub(crate) fn new(decoding: Option<TransferDecoding>) -> Self {
        Self {
            decoding,
            saved: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, src: &[u8]) -> Vec<u8> {
        let Some(decoding) = self.decoding else {
            return src.to_vec();
        };
        self.saved.extend_from_slice(src);
        let (out, rest) = decoding.decode(&self.saved, true);
        self.saved = rest;
        out
    }

    /// Decode whatever is still held back.
    pub(crate) fn finish(&mut self) -> Vec<u8> {
        match self.decoding {
            Some(decoding) if !self.saved.is_empty() => {
                decoding.decode(&std::mem::take(&mut self.saved), false).0
            }
            _ => Vec::new(),
        }
    }
}
