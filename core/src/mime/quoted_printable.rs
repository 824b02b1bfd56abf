/*
 * quoted_printable.rs
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

//! Quoted-Printable decoder for Content-Transfer-Encoding (RFC 2045).

const INVALID: u8 = 0xff;

const HEX_DECODE: [u8; 256] = {
    let mut t = [INVALID; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i;
        i += 1;
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = 10 + i;
        t[(b'a' + i) as usize] = 10 + i;
        i += 1;
    }
    t
};

/// Decode quoted-printable. Stateless: callers hand in whole lines.
///
/// `=XX` (either case) becomes the octet; `=` followed only by spaces/tabs and a
/// line break, or by nothing, is a soft line break and vanishes. Any other `=` is
/// kept as is.
pub fn decode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;
    while pos < src.len() {
        let b = src[pos];
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }
        if let (Some(&h1), Some(&h2)) = (src.get(pos + 1), src.get(pos + 2)) {
            let (v1, v2) = (HEX_DECODE[h1 as usize], HEX_DECODE[h2 as usize]);
            if v1 != INVALID && v2 != INVALID {
                out.push((v1 << 4) | v2);
                pos += 3;
                continue;
            }
        }
        let mut end = pos + 1;
        while matches!(src.get(end), Some(b' ' | b'\t')) {
            end += 1;
        }
        match src.get(end) {
            None => pos = end,
            Some(b'\r') if src.get(end + 1) == Some(&b'\n') => pos = end + 2,
            Some(b'\r' | b'\n') => pos = end + 1,
            Some(_) => {
                out.push(b);
                pos += 1;
            }
        }
    }
    out
}
