/*
 * error.rs
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

//! Parser configuration and driver errors.

/// Result alias for parser configuration and driving.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the parser itself. Malformed MIME never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option was given a value outside its allowed set.
    #[error("invalid value {value:?} for parser option {name}")]
    InvalidOption { name: &'static str, value: String },

    /// A JSON option document could not be read.
    #[error("invalid parser configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Data or end-of-input was delivered after end-of-input.
    #[error("message already finished; reset the parser before delivering more data")]
    Finished,
}

impl Error {
    pub(crate) fn invalid_option(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            value: value.into(),
        }
    }
}
