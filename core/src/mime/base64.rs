/*
 * base64.rs
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

//! Base64 decoder for Content-Transfer-Encoding (RFC 2045), fed in pieces.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[inline]
fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

/// Decode base64 from `src`. Returns (decoded, leftover).
///
/// Characters outside the alphabet are dropped first. Only whole 4-char quanta
/// are decoded; with `more` the incomplete tail is returned as leftover for the
/// caller to prepend to the next piece, otherwise it is discarded.
pub fn decode(src: &[u8], more: bool) -> (Vec<u8>, Vec<u8>) {
    let clean: Vec<u8> = src.iter().copied().filter(|&b| is_base64_char(b)).collect();
    let whole = clean.len() - clean.len() % 4;
    let leftover = if more {
        clean[whole..].to_vec()
    } else {
        Vec::new()
    };
    (decode_quanta(&clean[..whole]), leftover)
}

fn decode_quanta(quanta: &[u8]) -> Vec<u8> {
    match LENIENT.decode(quanta) {
        Ok(out) => out,
        // Padding inside the data (concatenated encodings) or a stray '=':
        // decode quantum by quantum, skipping the ones that make no sense.
        Err(_) => quanta
            .chunks(4)
            .filter_map(|q| LENIENT.decode(q).ok())
            .flatten()
            .collect(),
    }
}
