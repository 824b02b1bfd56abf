/*
 * rfc2047.rs
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

//! RFC 2047 encoded-word decoding (e.g. =?charset?q?text?=) and 8-bit header
//! values. Header values arrive as binary strings; these turn them into text.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::mime::base64;
use crate::mime::charset::{binary_string_bytes, TextDecoder};
use crate::mime::quoted_printable;

static ENCODED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\?[^?]*\?[BQbq]\?[^?]*\?=").expect("encoded-word pattern"));

/// Charset decoder shared by adjacent encoded words in the same charset, so a
/// multibyte character split across two words still decodes.
#[derive(Default)]
struct WordDecoder {
    charset: String,
    decoder: Option<TextDecoder>,
}

impl WordDecoder {
    fn flush(&mut self) -> String {
        self.charset.clear();
        match self.decoder.take() {
            Some(mut decoder) => decoder.decode(&[], true),
            None => String::new(),
        }
    }

    /// Decode one `=?charset?enc?text?=` word; `None` leaves it literal.
    fn decode_word(&mut self, word: &str, out: &mut String) -> Option<()> {
        let pieces: Vec<&str> = word.split('?').collect();
        let [_, charset, encoding, text, "="] = pieces[..] else {
            return None;
        };
        // RFC 2231 allows charset*language.
        let charset = charset.split('*').next().unwrap_or("");
        let octets = match encoding {
            "B" | "b" => {
                if !text.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')) {
                    return None;
                }
                // Some mailers add one '=' too many.
                let text = match text.strip_suffix('=') {
                    Some(shorter) if text.len() % 4 == 1 => shorter,
                    _ => text,
                };
                base64::decode(text.as_bytes(), false).0
            }
            "Q" | "q" => quoted_printable::decode(&binary_string_bytes(&text.replace('_', " "))),
            _ => return None,
        };

        if !charset.eq_ignore_ascii_case(&self.charset) {
            out.push_str(&self.flush());
        }
        if self.decoder.is_none() {
            self.decoder = Some(TextDecoder::for_label(charset)?);
            self.charset = charset.to_string();
        }
        let decoder = self.decoder.as_mut()?;
        out.push_str(&decoder.decode(&octets, false));
        Some(())
    }
}

/// Expand RFC 2047 encoded-words in a header value.
///
/// Whitespace between encoded words is dropped. Words that do not decode
/// (bad base64, unknown charset) are kept as written. Text outside encoded
/// words is copied unchanged.
pub fn decode_encoded_words(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut words = WordDecoder::default();
    let mut pos = 0;
    for m in ENCODED_WORD.find_iter(value) {
        literal(&value[pos..m.start()], &mut out, &mut words);
        if words.decode_word(m.as_str(), &mut out).is_none() {
            out.push_str(&words.flush());
            out.push_str(m.as_str());
        }
        pos = m.end();
    }
    literal(&value[pos..], &mut out, &mut words);
    out.push_str(&words.flush());
    out
}

/// Text between encoded words. Whitespace only is dropped; anything else ends
/// the current run of words.
fn literal(text: &str, out: &mut String, words: &mut WordDecoder) {
    if text.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')) {
        return;
    }
    out.push_str(&words.flush());
    out.push_str(text);
}

/// Turn a binary-string header value into text.
///
/// Values without octets above 0x7F are returned unchanged. Otherwise the
/// octets are read as UTF-8; when `fallback_charset` names a non-UTF charset,
/// invalid UTF-8 is read in that charset instead of being replaced.
pub fn convert_header_to_unicode(value: &str, fallback_charset: &str) -> String {
    if value.chars().all(|c| c.is_ascii() || c as u32 > 0xff) {
        return value.to_string();
    }
    let octets = binary_string_bytes(value);
    let fallback = fallback_charset.trim();
    let has_fallback = !fallback.is_empty() && !fallback.to_ascii_lowercase().starts_with("utf");
    if has_fallback {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(&octets) {
            return text.into_owned();
        }
        if let Some(encoding) = Encoding::for_label(fallback.as_bytes()) {
            return encoding.decode_with_bom_removal(&octets).0.into_owned();
        }
        log::warn!("unknown fallback charset {:?} for header value", fallback);
    }
    UTF_8.decode_with_bom_removal(&octets).0.into_owned()
}
