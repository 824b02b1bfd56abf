/*
 * content_type.rs
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

//! Content-Type header (RFC 2045).

use std::collections::HashMap;

use super::headers::HeaderMap;
use super::parameter::{extract_parameters, Parameter};

/// Default type of a part without a Content-Type header.
pub const TEXT_PLAIN: &str = "text/plain";

/// Default type of the sections of a multipart/digest.
pub const MESSAGE_RFC822: &str = "message/rfc822";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    primary_type: String,
    sub_type: String,
    parameter_map: HashMap<String, String>,
}

impl ContentType {
    pub fn new(
        primary_type: impl Into<String>,
        sub_type: impl Into<String>,
        parameters: Option<Vec<Parameter>>,
    ) -> Self {
        let primary_type = primary_type.into().to_ascii_lowercase();
        let sub_type = sub_type.into().to_ascii_lowercase();
        let mut parameter_map = HashMap::new();
        for param in parameters.unwrap_or_default() {
            parameter_map
                .entry(param.get_name().to_ascii_lowercase())
                .or_insert_with(|| param.get_value().to_string());
        }
        Self {
            primary_type,
            sub_type,
            parameter_map,
        }
    }

    pub fn text_plain() -> Self {
        Self::new("text", "plain", None)
    }

    /// Content-Type of a part, or of `default` when the header is absent.
    pub fn from_headers(headers: &HeaderMap, default: &str) -> Self {
        parse_content_type(headers.get("content-type").unwrap_or(default))
    }

    pub fn get_primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn get_sub_type(&self) -> &str {
        &self.sub_type
    }

    /// `type/subtype`, lower-case.
    pub fn mime_type(&self) -> String {
        format!("{}/{}", self.primary_type, self.sub_type)
    }

    pub fn is_primary_type(&self, t: &str) -> bool {
        self.primary_type.eq_ignore_ascii_case(t)
    }

    pub fn is_sub_type(&self, t: &str) -> bool {
        self.sub_type.eq_ignore_ascii_case(t)
    }

    pub fn is_mime_type(&self, primary: &str, sub: &str) -> bool {
        self.is_primary_type(primary) && self.is_sub_type(sub)
    }

    pub fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameter_map.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter_map.contains_key(&name.to_ascii_lowercase())
    }

    /// True for the message types that wrap a complete header/body message.
    pub fn is_encapsulated_message(&self) -> bool {
        self.is_primary_type("message")
            && (self.is_sub_type("rfc822") || self.is_sub_type("news") || self.is_sub_type("global"))
    }
}

/// Parse a Content-Type header value.
///
/// Never fails: a value whose first word is not `type/subtype` is treated as
/// `text/plain` without parameters. RFC 2231 continuations are joined but
/// not charset-decoded.
pub fn parse_content_type(value: &str) -> ContentType {
    let (mime_type, parameters) = extract_parameters(value, false);
    let mut pieces = mime_type.split('/');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(primary), Some(sub), None) => ContentType::new(primary, sub, Some(parameters)),
        _ => ContentType::text_plain(),
    }
}
