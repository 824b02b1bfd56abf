/*
 * chunking.rs
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

//! The events for a message must not depend on how its bytes are split
//! between deliver_data() calls.

mod common;

use common::{normalize, parse, parse_chunked};
use proptest::prelude::*;
use rawmime_core::mime::{BodyFormat, ParserOptions, StringFormat};

const CORPUS: &[&[u8]] = &[
    b"Subject: hi\r\nTo: a@example.com\r\n\r\nline one\r\nline two\r\n",
    b"From x@example.com Thu Jan  1 00:00:00 1970\nSubject: mbox\n\nbody\n",
    b"Subject: cr only\r\rbody\rmore",
    b"Content-Type: multipart/mixed; boundary=\"b1\"\r\n\r\n\
preamble\r\n\
--b1\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
Content-Transfer-Encoding: quoted-printable\r\n\
\r\n\
caf=C3=A9 au lait, soft=\r\n\
break\r\n\
--b1\r\n\
Content-Type: message/rfc822\r\n\
Content-Transfer-Encoding: base64\r\n\
\r\n\
U3ViamVjdDogaW5uZXINCkNvbnRlbnQtVHlwZTogbXVsdGlwYXJ0L2FsdGVybmF0aXZlOyBi\r\n\
b3VuZGFyeT1iMg0KDQotLWIyDQoNCm9uZQ0KLS1iMg0KQ29udGVudC1UeXBlOiB0ZXh0L2h0\r\n\
bWwNCg0KPGI+dHdvPC9iPg0KLS1iMi0tDQo=\r\n\
--b1\r\n\
Content-Type: application/octet-stream\r\n\
Content-Transfer-Encoding: base64\r\n\
\r\n\
AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=\r\n\
--b1--\r\n\
epilogue\r\n",
    b"Content-Type: multipart/digest; boundary=d\n\n--d\n\nSubject: one\n\nfirst\n--d\n\nSubject: two\n\nsecond\n--d--\n",
    b"Content-Type: multipart/mixed; boundary=z\r\n\r\n--z\r\n\r\nunterminated\r\n--z",
];

fn all_options() -> Vec<ParserOptions> {
    vec![
        ParserOptions::default(),
        ParserOptions {
            body_format: BodyFormat::Decode,
            string_format: StringFormat::Unicode,
            ..ParserOptions::default()
        },
        ParserOptions {
            body_format: BodyFormat::Decode,
            string_format: StringFormat::TypedArray,
            ..ParserOptions::default()
        },
        ParserOptions {
            prune_at: "2".to_string(),
            body_format: BodyFormat::Raw,
            ..ParserOptions::default()
        },
    ]
}

#[test]
fn byte_at_a_time() {
    for input in CORPUS {
        for options in all_options() {
            let sizes = vec![1; input.len()];
            assert_eq!(
                normalize(parse_chunked(input, &sizes, options.clone())),
                normalize(parse(input, options)),
                "{}",
                String::from_utf8_lossy(input)
            );
        }
    }
}

proptest! {
    #[test]
    fn any_chunking(
        index in 0..CORPUS.len(),
        sizes in proptest::collection::vec(1usize..64, 0..32),
    ) {
        let input = CORPUS[index];
        for options in all_options() {
            prop_assert_eq!(
                normalize(parse_chunked(input, &sizes, options.clone())),
                normalize(parse(input, options))
            );
        }
    }
}
