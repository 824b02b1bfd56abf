/*
 * handler.rs
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

//! Emitter trait: receives parsing events (message, part start, body data, part end).

use crate::mime::charset::PartData;
use crate::mime::headers::HeaderMap;
use crate::mime::options::ParserOptions;

/// Receiver of parse events (push model). Every method is optional.
///
/// Events arrive in document order: `start_part` before any of that part's data,
/// data in byte order, and a child's whole start/data/end sequence before the
/// next sibling starts. An `Err` from any callback goes to the configured error
/// handler; parsing continues.
pub trait MimeEmitter {
    /// Called once, before anything else.
    fn start_message(&mut self) -> Result<(), EmitError> {
        Ok(())
    }

    /// Called once per part, once its headers are known.
    fn start_part(&mut self, _part: &str, _headers: &HeaderMap) -> Result<(), EmitError> {
        Ok(())
    }

    /// Body data of a leaf part, zero or more times.
    fn deliver_part_data(&mut self, _part: &str, _data: PartData) -> Result<(), EmitError> {
        Ok(())
    }

    /// Called once per part, after its data and all of its descendants.
    fn end_part(&mut self, _part: &str) -> Result<(), EmitError> {
        Ok(())
    }

    /// Called once, after the top-level part has ended.
    fn end_message(&mut self) -> Result<(), EmitError> {
        Ok(())
    }
}

impl<E: MimeEmitter + ?Sized> MimeEmitter for &mut E {
    fn start_message(&mut self) -> Result<(), EmitError> {
        (**self).start_message()
    }

    fn start_part(&mut self, part: &str, headers: &HeaderMap) -> Result<(), EmitError> {
        (**self).start_part(part, headers)
    }

    fn deliver_part_data(&mut self, part: &str, data: PartData) -> Result<(), EmitError> {
        (**self).deliver_part_data(part, data)
    }

    fn end_part(&mut self, part: &str) -> Result<(), EmitError> {
        (**self).end_part(part)
    }

    fn end_message(&mut self) -> Result<(), EmitError> {
        (**self).end_message()
    }
}

/// Failure reported by an emitter callback.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl EmitError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

/// The one place emitter callbacks are invoked: applies pruning and routes
/// callback failures to the error handler.
pub(crate) struct EmitterSink<'a, E: ?Sized> {
    emitter: &'a mut E,
    pub(crate) options: &'a ParserOptions,
}

impl<'a, E: MimeEmitter + ?Sized> EmitterSink<'a, E> {
    pub(crate) fn new(emitter: &'a mut E, options: &'a ParserOptions) -> Self {
        Self { emitter, options }
    }

    pub(crate) fn start_message(&mut self) {
        let result = self.emitter.start_message();
        self.report("start_message", "", result);
    }

    pub(crate) fn start_part(&mut self, part: &str, headers: &HeaderMap) {
        if self.options.will_ignore_part(part) {
            return;
        }
        let result = self.emitter.start_part(part, headers);
        self.report("start_part", part, result);
    }

    pub(crate) fn deliver_part_data(&mut self, part: &str, data: PartData) {
        if self.options.will_ignore_part(part) {
            return;
        }
        let result = self.emitter.deliver_part_data(part, data);
        self.report("deliver_part_data", part, result);
    }

    pub(crate) fn end_part(&mut self, part: &str) {
        if self.options.will_ignore_part(part) {
            return;
        }
        let result = self.emitter.end_part(part);
        self.report("end_part", part, result);
    }

    pub(crate) fn end_message(&mut self) {
        let result = self.emitter.end_message();
        self.report("end_message", "", result);
    }

    fn report(&self, callback: &str, part: &str, result: Result<(), EmitError>) {
        if let Err(e) = result {
            log::debug!("emitter {} failed for part {:?}: {}", callback, part, e);
            (self.options.on_error)(&e);
        }
    }
}
