/*
 * lib.rs
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

//! Rawmime core: streaming MIME message parsing.
//!
//! Bytes go in through [`mime::MimeParser::deliver_data`] in chunks of any
//! size; parts come out as [`mime::MimeEmitter`] callbacks, numbered IMAP
//! style (`""`, `"1"`, `"1.2"`, `"1$"` for the body of an attached message).

pub mod mime;
