/*
 * mod.rs
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

//! Event-driven streaming MIME parsing (push/emitter model, line-bounded buffering).

pub mod base64;
mod boundary;
mod charset;
mod conditioner;
mod content_type;
mod error;
mod handler;
mod headers;
mod options;
mod parameter;
mod parser;
mod part;
mod part_id;
pub mod quoted_printable;
mod rfc2047;
mod transfer_encoding;

pub use charset::{binary_string, binary_string_bytes, PartData, TextDecoder};
pub use content_type::{parse_content_type, ContentType, MESSAGE_RFC822, TEXT_PLAIN};
pub use error::{Error, Result};
pub use handler::{EmitError, MimeEmitter};
pub use headers::HeaderMap;
pub use options::{BodyFormat, ErrorHandler, ParserOptions, StringFormat};
pub use parameter::{extract_parameters, Parameter};
pub use parser::MimeParser;
pub use part::MAX_NESTING_DEPTH;
pub use part_id::{child_part_id, is_within, message_body_id};
pub use rfc2047::{convert_header_to_unicode, decode_encoded_words};
pub use transfer_encoding::TransferDecoding;

