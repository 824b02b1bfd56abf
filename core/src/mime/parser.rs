/*
 * parser.rs
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

//! MIME parser: push chunks with deliver_data(), finish with deliver_eof().

use crate::mime::conditioner::PacketConditioner;
use crate::mime::content_type::TEXT_PLAIN;
use crate::mime::error::{Error, Result};
use crate::mime::handler::{EmitterSink, MimeEmitter};
use crate::mime::options::ParserOptions;
use crate::mime::part::PartParser;

/// Root part number.
const ROOT: &str = "";

/// Event-driven MIME parser. Feed data via deliver_data(); the emitter gets callbacks.
///
/// Chunks may be split anywhere; the events are the same however the input
/// is cut. Only the incomplete last line and a little per-part state is held
/// between calls.
pub struct MimeParser<E> {
    emitter: E,
    options: ParserOptions,
    conditioner: PacketConditioner,
    /// `None` once end of input has been delivered.
    root: Option<PartParser>,
    started: bool,
}

impl<E: MimeEmitter> MimeParser<E> {
    pub fn new(emitter: E) -> Self {
        Self::with_options(emitter, ParserOptions::default())
    }

    pub fn with_options(emitter: E, options: ParserOptions) -> Self {
        Self {
            emitter,
            options,
            conditioner: PacketConditioner::new(),
            root: Some(PartParser::new(TEXT_PLAIN, 0)),
            started: false,
        }
    }

    /// Parse the next chunk of the message. Empty chunks are ignored.
    ///
    /// Fails only with [`Error::Finished`] after [`deliver_eof`](Self::deliver_eof).
    pub fn deliver_data(&mut self, chunk: &[u8]) -> Result<()> {
        let Some(root) = self.root.as_mut() else {
            return Err(Error::Finished);
        };
        let Some(lines) = self.conditioner.push(chunk) else {
            return Ok(());
        };
        log::trace!("dispatching {} bytes", lines.len());
        let mut sink = EmitterSink::new(&mut self.emitter, &self.options);
        if !self.started {
            self.started = true;
            sink.start_message();
        }
        root.dispatch(ROOT, &lines, &mut sink);
        Ok(())
    }

    /// Signal end of input: flush held data and end every open part.
    pub fn deliver_eof(&mut self) -> Result<()> {
        let Some(mut root) = self.root.take() else {
            return Err(Error::Finished);
        };
        let mut sink = EmitterSink::new(&mut self.emitter, &self.options);
        if !self.started {
            self.started = true;
            sink.start_message();
        }
        if let Some(rest) = self.conditioner.finish() {
            root.dispatch(ROOT, &rest, &mut sink);
        }
        root.finish(ROOT, &mut sink);
        sink.end_message();
        Ok(())
    }

    /// Discard all state so that a new message can be parsed.
    pub fn reset(&mut self) {
        self.conditioner = PacketConditioner::new();
        self.root = Some(PartParser::new(TEXT_PLAIN, 0));
        self.started = false;
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn into_inner(self) -> E {
        self.emitter
    }
}
