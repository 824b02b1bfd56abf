/*
 * parameter.rs
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

//! `;`-separated `name=value` parameter lists (RFC 2045, RFC 2231).

use std::collections::BTreeMap;

use encoding_rs::Encoding;
use indexmap::IndexMap;
use percent_encoding::percent_decode;

use crate::mime::charset::{binary_string, binary_string_bytes};

/// A header parameter (name and value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Semicolon,
    Equals,
    Word(String),
}

/// Split on `;` and `=`, honouring quoted strings. Whitespace separates words.
/// A backslash escapes the next character; inside quotes the escape is removed.
fn tokenize(value: &str) -> Vec<Token> {
    let chars: Vec<char> = value.chars().collect();
    let mut tokens = Vec::new();
    let mut word: Option<usize> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            word.get_or_insert(i);
            i += 2;
            continue;
        }
        match c {
            ' ' | '\t' | '\r' | '\n' | ';' | '=' | '"' => {
                if let Some(start) = word.take() {
                    tokens.push(Token::Word(chars[start..i].iter().collect()));
                }
            }
            _ => {
                word.get_or_insert(i);
            }
        }
        match c {
            ';' => tokens.push(Token::Semicolon),
            '=' => tokens.push(Token::Equals),
            '"' => {
                let mut text = String::new();
                let mut j = i + 1;
                while j < chars.len() && chars[j] != '"' {
                    if chars[j] == '\\' {
                        j += 1;
                    }
                    if let Some(&c) = chars.get(j) {
                        text.push(c);
                    }
                    j += 1;
                }
                tokens.push(Token::Word(text));
                i = j;
            }
            _ => {}
        }
        i += 1;
    }
    if let Some(start) = word {
        tokens.push(Token::Word(chars[start..].iter().collect()));
    }
    tokens
}

/// Pieces of an RFC 2231 `name*0`, `name*1`, ... parameter.
#[derive(Debug, Default)]
struct Continuation {
    poisoned: bool,
    encoded: Option<bool>,
    pieces: BTreeMap<u32, String>,
}

impl Continuation {
    /// Pieces 0, 1, ... concatenated up to the first missing index.
    fn joined(&self) -> String {
        let mut out = String::new();
        for (expected, (&index, piece)) in (0u32..).zip(self.pieces.iter()) {
            if index != expected {
                break;
            }
            out.push_str(piece);
        }
        out
    }
}

/// Decode an RFC 2231 `charset'language'text` value. `None` when the charset
/// is missing or unknown, or the text is not valid in it.
fn decode_rfc2231_value(value: &str) -> Option<String> {
    let first = value.find('\'');
    let second = first.and_then(|q| value[q + 1..].find('\'').map(|i| q + 1 + i));
    let charset = first.map_or("", |q| &value[..q]);
    let text = match second.or(first) {
        Some(q) => &value[q + 1..],
        None => value,
    };
    let encoding = Encoding::for_label(charset.trim().as_bytes())?;
    encoding
        .decode_without_bom_handling_and_without_replacement(&binary_string_bytes(text))
        .map(|s| s.into_owned())
}

/// Split a header value of the form `token [; name=value]*`.
///
/// Returns the leading token (first word before any `;`) and the parameters
/// in order. Names are returned as written. The first plain `name=value`
/// wins; RFC 2231 continuations replace it. With `decode_rfc2231`, starred
/// values are %-unescaped and charset-decoded, and `name*=` values take
/// precedence over everything. Without it, an encoded continuation is
/// returned under `name*` still encoded.
pub fn extract_parameters(value: &str, decode_rfc2231: bool) -> (String, Vec<Parameter>) {
    let (start, rest) = match value.find(';') {
        Some(semi) => (&value[..semi], &value[semi..]),
        None => (value, ""),
    };
    let start = start
        .trim()
        .split(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .next()
        .unwrap_or("")
        .to_string();

    let mut matches: Vec<(String, String)> = Vec::new();
    let mut name = String::new();
    let mut in_name = true;
    for token in tokenize(rest) {
        match token {
            Token::Semicolon => {
                if !name.is_empty() && !in_name {
                    matches.push((std::mem::take(&mut name), String::new()));
                }
                name.clear();
                in_name = true;
            }
            Token::Equals => in_name = false,
            Token::Word(word) if in_name && name.is_empty() => name = word,
            Token::Word(word) if !in_name && !name.is_empty() => {
                let word = if decode_rfc2231 && name.contains('*') {
                    binary_string(&percent_decode(&binary_string_bytes(&word)).collect::<Vec<u8>>())
                } else {
                    word
                };
                matches.push((std::mem::take(&mut name), word));
            }
            Token::Word(_) => {
                if in_name {
                    name.clear();
                }
            }
        }
    }
    if !name.is_empty() && !in_name {
        matches.push((name, String::new()));
    }

    let mut simple: IndexMap<String, String> = IndexMap::new();
    let mut charset_values: IndexMap<String, String> = IndexMap::new();
    let mut continuations: IndexMap<String, Continuation> = IndexMap::new();
    for (name, value) in matches {
        let Some(star) = name.find('*') else {
            simple.entry(name).or_insert(value);
            continue;
        };
        if star == name.len() - 1 {
            charset_values.entry(name[..star].to_string()).or_insert(value);
            continue;
        }
        let entry = continuations.entry(name[..star].to_string()).or_default();
        if entry.poisoned {
            continue;
        }
        let encoded = name.ends_with('*');
        let number = &name[star + 1..name.len() - usize::from(encoded)];
        if number == "0" {
            entry.encoded = Some(encoded);
        } else if number.starts_with('0') || !number.bytes().all(|b| b.is_ascii_digit()) {
            entry.poisoned = true;
            continue;
        }
        let Ok(index) = number.parse::<u32>() else {
            entry.poisoned = true;
            continue;
        };
        if entry.pieces.contains_key(&index) {
            entry.poisoned = true;
            continue;
        }
        entry.pieces.insert(index, value);
    }

    let mut values = simple;
    for (mut name, continuation) in continuations {
        let Some(encoded) = continuation.encoded else {
            continue;
        };
        let mut value = continuation.joined();
        if encoded && decode_rfc2231 {
            match decode_rfc2231_value(&value) {
                Some(decoded) => value = decoded,
                None => continue,
            }
        } else if encoded {
            name.push('*');
        }
        values.insert(name, value);
    }
    if decode_rfc2231 {
        for (name, value) in charset_values {
            if let Some(decoded) = decode_rfc2231_value(&value) {
                values.insert(name, decoded);
            }
        }
    }

    let parameters = values
        .into_iter()
        .map(|(name, value)| Parameter::new(name, value))
        .collect();
    (start, parameters)
}
