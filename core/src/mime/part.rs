/*
 * part.rs
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

//! Per-part state machine: header block, then one body mode chosen from the
//! part's Content-Type. Nested parts get their own `PartParser`.

use crate::mime::boundary::{hold_back, trim_line_ending, BoundaryMatch, BoundaryMatcher};
use crate::mime::charset::Output;
use crate::mime::conditioner::PacketConditioner;
use crate::mime::content_type::{ContentType, MESSAGE_RFC822, TEXT_PLAIN};
use crate::mime::handler::{EmitterSink, MimeEmitter};
use crate::mime::headers::{find_header_end, HeaderMap};
use crate::mime::options::{BodyFormat, ParserOptions};
use crate::mime::part_id::{child_part_id, message_body_id};
use crate::mime::transfer_encoding::{StreamDecoder, TransferDecoding};

/// Deepest nesting of multipart and message parts that is parsed. Parts
/// below it are delivered as leaves: each level costs stack.
pub const MAX_NESTING_DEPTH: usize = 100;

/// State of one part. Input must arrive in buffers that start at a line start.
#[derive(Debug)]
pub(crate) struct PartParser {
    mode: Mode,
    /// Content-Type assumed when the part has none.
    default_type: &'static str,
    /// Number of enclosing multipart and message parts.
    depth: usize,
}

#[derive(Debug)]
enum Mode {
    /// Accumulating the header block.
    Headers(Vec<u8>),
    /// Body dropped.
    Discard,
    /// Leaf body delivered to the emitter.
    Emit { decoder: StreamDecoder, output: Output },
    /// message/rfc822 and friends: the body is a message of its own.
    Message {
        child: Child,
        decoder: StreamDecoder,
        lines: PacketConditioner,
    },
    Multipart(Multipart),
}

#[derive(Debug)]
struct Child {
    parser: Box<PartParser>,
    part: String,
}

impl Child {
    fn new(part: String, default_type: &'static str, depth: usize) -> Self {
        Self {
            parser: Box::new(PartParser::new(default_type, depth)),
            part,
        }
    }

    fn dispatch<E: MimeEmitter + ?Sized>(&mut self, data: &[u8], sink: &mut EmitterSink<'_, E>) {
        self.parser.dispatch(&self.part, data, sink);
    }

    fn finish<E: MimeEmitter + ?Sized>(self, sink: &mut EmitterSink<'_, E>) {
        (*self.parser).finish(&self.part, sink);
    }
}

impl PartParser {
    pub(crate) fn new(default_type: &'static str, depth: usize) -> Self {
        Self {
            mode: Mode::Headers(Vec::new()),
            default_type,
            depth,
        }
    }

    pub(crate) fn dispatch<E: MimeEmitter + ?Sized>(
        &mut self,
        part: &str,
        data: &[u8],
        sink: &mut EmitterSink<'_, E>,
    ) {
        match &mut self.mode {
            Mode::Headers(pending) => {
                let from = pending.len().saturating_sub(3);
                pending.extend_from_slice(data);
                let Some((start, end)) = find_header_end(pending, from) else {
                    return;
                };
                let block = std::mem::take(pending);
                let headers = HeaderMap::parse(&block[..start], sink.options.strip_continuations);
                sink.start_part(part, &headers);
                self.mode = body_mode(part, &headers, self.default_type, self.depth, sink.options);
                let body = &block[end..];
                if !body.is_empty() {
                    self.dispatch(part, body, sink);
                }
            }
            Mode::Discard => {}
            Mode::Emit { decoder, output } => {
                if !delivers_body(part, sink.options) {
                    return;
                }
                let data = output.coerce(decoder.push(data), true);
                if !data.is_empty() {
                    sink.deliver_part_data(part, data);
                }
            }
            Mode::Message {
                child,
                decoder,
                lines,
            } => {
                if let Some(buf) = lines.push(&decoder.push(data)) {
                    child.dispatch(&buf, sink);
                }
            }
            Mode::Multipart(multipart) => multipart.dispatch(part, data, sink),
        }
    }

    /// End of this part's input: flush what is held, end descendants, then
    /// report the end of the part itself.
    pub(crate) fn finish<E: MimeEmitter + ?Sized>(self, part: &str, sink: &mut EmitterSink<'_, E>) {
        match self.mode {
            Mode::Headers(pending) => {
                log::warn!("input ended inside the header block of part {:?}", part);
                let headers = HeaderMap::parse(&pending, sink.options.strip_continuations);
                sink.start_part(part, &headers);
            }
            Mode::Discard => {}
            Mode::Emit {
                mut decoder,
                mut output,
            } => {
                if delivers_body(part, sink.options) {
                    let data = output.coerce(decoder.finish(), false);
                    if !data.is_empty() {
                        sink.deliver_part_data(part, data);
                    }
                }
            }
            Mode::Message {
                mut child,
                mut decoder,
                mut lines,
            } => {
                if let Some(buf) = lines.push(&decoder.finish()) {
                    child.dispatch(&buf, sink);
                }
                if let Some(buf) = lines.finish() {
                    child.dispatch(&buf, sink);
                }
                child.finish(sink);
            }
            Mode::Multipart(multipart) => multipart.finish(sink),
        }
        sink.end_part(part);
    }
}

fn delivers_body(part: &str, options: &ParserOptions) -> bool {
    options.body_format != BodyFormat::None && !options.will_ignore_part(part)
}

/// Choose how the body of `part` is handled, once its headers are known.
fn body_mode(
    part: &str,
    headers: &HeaderMap,
    default_type: &'static str,
    depth: usize,
    options: &ParserOptions,
) -> Mode {
    if options.body_format == BodyFormat::Raw && part == options.prune_at {
        log::debug!("part {:?}: raw body", part);
        return Mode::Emit {
            decoder: StreamDecoder::new(None),
            output: Output::plain(options.string_format),
        };
    }

    let content_type = ContentType::from_headers(headers, default_type);
    let nests = content_type.is_primary_type("multipart") || content_type.is_encapsulated_message();
    if nests && depth >= MAX_NESTING_DEPTH {
        log::warn!(
            "part {:?}: {} nested more than {} deep; body delivered as a leaf",
            part,
            content_type.mime_type(),
            MAX_NESTING_DEPTH
        );
        return Mode::Emit {
            decoder: StreamDecoder::new(None),
            output: Output::plain(options.string_format),
        };
    }

    if content_type.is_primary_type("multipart") {
        let Some(boundary) = content_type.get_parameter("boundary") else {
            log::warn!("part {:?}: {} without boundary; body discarded", part, content_type.mime_type());
            return Mode::Discard;
        };
        return match BoundaryMatcher::new(boundary) {
            Ok(matcher) => {
                log::debug!("part {:?}: {} with boundary {:?}", part, content_type.mime_type(), boundary);
                let child_default = if content_type.is_sub_type("digest") {
                    MESSAGE_RFC822
                } else {
                    TEXT_PLAIN
                };
                Mode::Multipart(Multipart::new(matcher, child_default, depth + 1))
            }
            Err(e) => {
                log::warn!("part {:?}: unusable boundary {:?}: {}; body discarded", part, boundary, e);
                Mode::Discard
            }
        };
    }

    // Encapsulated messages are decoded whatever the body format: the headers
    // inside must be readable.
    let decoding = TransferDecoding::from_headers(headers);
    if content_type.is_encapsulated_message() {
        log::debug!("part {:?}: {} encapsulated message", part, content_type.mime_type());
        return Mode::Message {
            child: Child::new(message_body_id(part), TEXT_PLAIN, depth + 1),
            decoder: StreamDecoder::new(decoding),
            lines: PacketConditioner::new(),
        };
    }

    let decoding = decoding.filter(|_| options.body_format == BodyFormat::Decode);
    log::debug!("part {:?}: {} leaf, decoding {:?}", part, content_type.mime_type(), decoding);
    Mode::Emit {
        decoder: StreamDecoder::new(decoding),
        output: Output::for_part(options, &content_type),
    }
}

/// Body of a multipart part: sections between delimiter lines, each handed
/// to its own child parser. Preamble and epilogue are dropped.
#[derive(Debug)]
struct Multipart {
    /// `None` once the closing delimiter has been seen.
    matcher: Option<BoundaryMatcher>,
    child_default: &'static str,
    /// Depth of the sections.
    depth: usize,
    /// Section being filled; `None` in the preamble and epilogue.
    current: Option<Child>,
    count: u32,
    /// Section data not yet passed on: it may end in the line break that
    /// belongs to the next delimiter.
    saved: Vec<u8>,
}

impl Multipart {
    fn new(matcher: BoundaryMatcher, child_default: &'static str, depth: usize) -> Self {
        Self {
            matcher: Some(matcher),
            child_default,
            depth,
            current: None,
            count: 0,
            saved: Vec::new(),
        }
    }

    fn dispatch<E: MimeEmitter + ?Sized>(&mut self, part: &str, mut data: &[u8], sink: &mut EmitterSink<'_, E>) {
        while !data.is_empty() {
            let Some(found) = self.matcher.as_ref().and_then(|m| m.find(data)) else {
                self.forward(data, sink);
                return;
            };
            if found.start > 0 {
                self.forward(&data[..found.start], sink);
            }
            self.split(part, found, sink);
            data = &data[found.end..];
        }
    }

    fn forward<E: MimeEmitter + ?Sized>(&mut self, data: &[u8], sink: &mut EmitterSink<'_, E>) {
        let Some(child) = self.current.as_mut() else {
            return;
        };
        self.saved.extend_from_slice(data);
        let ready = hold_back(&self.saved);
        if ready > 0 {
            let rest = self.saved.split_off(ready);
            let ready = std::mem::replace(&mut self.saved, rest);
            child.dispatch(&ready, sink);
        }
    }

    /// A delimiter line: end the current section and start the next, unless
    /// the delimiter was the closing one.
    fn split<E: MimeEmitter + ?Sized>(&mut self, part: &str, found: BoundaryMatch, sink: &mut EmitterSink<'_, E>) {
        let mut saved = std::mem::take(&mut self.saved);
        if let Some(mut child) = self.current.take() {
            if found.at_line_start {
                trim_line_ending(&mut saved);
            }
            if !saved.is_empty() {
                child.dispatch(&saved, sink);
            }
            child.finish(sink);
        }
        if found.closing {
            self.matcher = None;
        } else {
            self.count += 1;
            self.current = Some(Child::new(
                child_part_id(part, self.count),
                self.child_default,
                self.depth,
            ));
        }
    }

    /// Input ended, possibly without a closing delimiter. Whatever the open
    /// section holds is passed on in full.
    fn finish<E: MimeEmitter + ?Sized>(mut self, sink: &mut EmitterSink<'_, E>) {
        if let Some(mut child) = self.current.take() {
            if !self.saved.is_empty() {
                child.dispatch(&self.saved, sink);
            }
            child.finish(sink);
        }
    }
}
