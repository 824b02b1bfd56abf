/*
 * charset.rs
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

//! Body output representations and charset conversion.

use bytes::Bytes;
use encoding_rs::{CoderResult, Decoder, Encoding};

use crate::mime::content_type::ContentType;
use crate::mime::options::{ParserOptions, StringFormat};

/// Body data handed to `MimeEmitter::deliver_part_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartData {
    /// Octets, for `StringFormat::TypedArray`.
    Bytes(Bytes),
    /// One char per octet (U+0000..=U+00FF).
    BinaryString(String),
    /// Text decoded from the part's charset.
    Text(String),
}

impl PartData {
    /// Length in octets (`Bytes`, `BinaryString`) or UTF-8 bytes (`Text`).
    pub fn len(&self) -> usize {
        match self {
            PartData::Bytes(b) => b.len(),
            PartData::BinaryString(s) => s.chars().count(),
            PartData::Text(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PartData::Bytes(b) => b.is_empty(),
            PartData::BinaryString(s) | PartData::Text(s) => s.is_empty(),
        }
    }

    /// Octets of `Bytes` and `BinaryString` data; UTF-8 of `Text`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PartData::Bytes(b) => b.to_vec(),
            PartData::BinaryString(s) => binary_string_bytes(s),
            PartData::Text(s) => s.as_bytes().to_vec(),
        }
    }
}

/// Octets to a string with one char per octet.
pub fn binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`binary_string`]. Chars above U+00FF keep their low byte.
pub fn binary_string_bytes(s: &str) -> Vec<u8> {
    s.chars().map(|c| c as u32 as u8).collect()
}

/// Streaming charset decoder; bytes split mid-character decode correctly across calls.
pub struct TextDecoder {
    inner: Decoder,
}

impl TextDecoder {
    /// Decoder for a charset label (WHATWG label set). `None` for unknown labels.
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(|encoding| Self {
            inner: encoding.new_decoder_with_bom_removal(),
        })
    }

    pub fn encoding_name(&self) -> &'static str {
        self.inner.encoding().name()
    }

    /// Decode `src`. With `last`, buffered partial input is flushed (as U+FFFD) and
    /// the decoder must not be used again.
    pub fn decode(&mut self, src: &[u8], last: bool) -> String {
        let capacity = self
            .inner
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len().saturating_mul(3).saturating_add(16));
        let mut out = String::with_capacity(capacity);
        let (result, _, _) = self.inner.decode_to_string(src, &mut out, last);
        debug_assert_eq!(result, CoderResult::InputEmpty);
        out
    }
}

impl std::fmt::Debug for TextDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextDecoder")
            .field("encoding", &self.encoding_name())
            .finish()
    }
}

/// Coercion of a leaf part's body bytes into the requested representation.
#[derive(Debug)]
pub(crate) enum Output {
    Bytes,
    BinaryString,
    Text(TextDecoder),
}

impl Output {
    /// Representation without charset conversion.
    pub(crate) fn plain(format: StringFormat) -> Self {
        match format {
            StringFormat::TypedArray => Output::Bytes,
            StringFormat::BinaryString | StringFormat::Unicode => Output::BinaryString,
        }
    }

    /// Representation for a leaf part of type `content_type`.
    ///
    /// Charset precedence: forced `charset`, then the part's charset parameter,
    /// then `charset`. An empty result leaves the data unconverted.
    pub(crate) fn for_part(options: &ParserOptions, content_type: &ContentType) -> Self {
        if options.string_format != StringFormat::Unicode {
            return Self::plain(options.string_format);
        }
        if !content_type.is_primary_type("text") && !options.force_charset {
            return Output::BinaryString;
        }
        let charset = if options.force_charset {
            options.charset.as_str()
        } else {
            content_type
                .get_parameter("charset")
                .unwrap_or(options.charset.as_str())
        };
        if charset.trim().is_empty() {
            return Output::BinaryString;
        }
        match TextDecoder::for_label(charset) {
            Some(decoder) => Output::Text(decoder),
            None => {
                log::warn!("unsupported charset {:?}; delivering body unconverted", charset);
                Output::BinaryString
            }
        }
    }

    /// `more` is false for the last call of a part.
    pub(crate) fn coerce(&mut self, data: Vec<u8>, more: bool) -> PartData {
        match self {
            Output::Bytes => PartData::Bytes(Bytes::from(data)),
            Output::BinaryString => PartData::BinaryString(binary_string(&data)),
            Output::Text(decoder) => PartData::Text(decoder.decode(&data, !more)),
        }
    }
}
