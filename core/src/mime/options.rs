/*
 * options.rs
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

//! Parser options. Fixed at construction; nested parts read them by reference.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::mime::error::{Error, Result};
use crate::mime::handler::EmitError;
use crate::mime::part_id::is_within;

/// Receives errors returned by emitter callbacks.
pub type ErrorHandler = Arc<dyn Fn(&EmitError) + Send + Sync>;

/// How part bodies are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// No body data is delivered.
    None,
    /// The body of the `prune_at` part is delivered untouched, without type dispatch.
    Raw,
    /// Bodies are delivered without undoing the Content-Transfer-Encoding.
    #[default]
    NoDecode,
    /// Quoted-printable and base64 bodies are decoded.
    Decode,
}

impl FromStr for BodyFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "raw" => Ok(Self::Raw),
            "nodecode" => Ok(Self::NoDecode),
            "decode" => Ok(Self::Decode),
            _ => Err(Error::invalid_option("bodyFormat", s)),
        }
    }
}

/// Representation of delivered body data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringFormat {
    /// A string with one char per octet.
    #[default]
    BinaryString,
    /// Text decoded from the part's charset where one applies.
    Unicode,
    /// Raw octets.
    TypedArray,
}

impl FromStr for StringFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binaryString" => Ok(Self::BinaryString),
            "unicode" => Ok(Self::Unicode),
            "typedArray" => Ok(Self::TypedArray),
            _ => Err(Error::invalid_option("stringFormat", s)),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserOptions {
    /// Only parts at or below this part number are reported.
    pub prune_at: String,
    pub body_format: BodyFormat,
    /// Remove the line breaks of folded header values.
    pub strip_continuations: bool,
    pub string_format: StringFormat,
    /// Charset used when a text part declares none, or for every part when forced.
    pub charset: String,
    pub force_charset: bool,
    #[serde(skip, default = "swallow_errors")]
    pub on_error: ErrorHandler,
}

fn swallow_errors() -> ErrorHandler {
    Arc::new(|_| {})
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            prune_at: String::new(),
            body_format: BodyFormat::default(),
            strip_continuations: true,
            string_format: StringFormat::default(),
            charset: String::new(),
            force_charset: false,
            on_error: swallow_errors(),
        }
    }
}

impl ParserOptions {
    /// Read options from a JSON object using the camelCase option names.
    /// Unknown keys (including `onError`, which cannot be data) are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EmitError) + Send + Sync + 'static,
    {
        self.on_error = Arc::new(handler);
        self
    }

    /// True when events for `part` fall outside `prune_at` and are not reported.
    pub fn will_ignore_part(&self, part: &str) -> bool {
        !is_within(&self.prune_at, part)
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("prune_at", &self.prune_at)
            .field("body_format", &self.body_format)
            .field("strip_continuations", &self.strip_continuations)
            .field("string_format", &self.string_format)
            .field("charset", &self.charset)
            .field("force_charset", &self.force_charset)
            .finish_non_exhaustive()
    }
}
