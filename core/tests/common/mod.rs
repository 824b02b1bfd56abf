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

//! Shared helpers for the integration tests: an emitter that records events.

#![allow(dead_code)]

use rawmime_core::mime::{EmitError, HeaderMap, MimeEmitter, MimeParser, ParserOptions, PartData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartMessage,
    StartPart(String, HeaderMap),
    Data(String, PartData),
    EndPart(String),
    EndMessage,
}

/// MimeEmitter that records all events for inspection.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl MimeEmitter for Recorder {
    fn start_message(&mut self) -> Result<(), EmitError> {
        self.events.push(Event::StartMessage);
        Ok(())
    }

    fn start_part(&mut self, part: &str, headers: &HeaderMap) -> Result<(), EmitError> {
        self.events.push(Event::StartPart(part.to_string(), headers.clone()));
        Ok(())
    }

    fn deliver_part_data(&mut self, part: &str, data: PartData) -> Result<(), EmitError> {
        self.events.push(Event::Data(part.to_string(), data));
        Ok(())
    }

    fn end_part(&mut self, part: &str) -> Result<(), EmitError> {
        self.events.push(Event::EndPart(part.to_string()));
        Ok(())
    }

    fn end_message(&mut self) -> Result<(), EmitError> {
        self.events.push(Event::EndMessage);
        Ok(())
    }
}

/// Merge runs of data events for the same part, so that event lists from
/// differently chunked input compare equal.
pub fn normalize(events: Vec<Event>) -> Vec<Event> {
    let mut out: Vec<Event> = Vec::with_capacity(events.len());
    for event in events {
        if let (Some(Event::Data(last_part, last)), Event::Data(part, data)) = (out.last_mut(), &event) {
            if last_part == part {
                if let Some(merged) = concat(last, data) {
                    *last = merged;
                    continue;
                }
            }
        }
        out.push(event);
    }
    out
}

fn concat(a: &PartData, b: &PartData) -> Option<PartData> {
    match (a, b) {
        (PartData::Bytes(a), PartData::Bytes(b)) => Some(PartData::Bytes([&a[..], &b[..]].concat().into())),
        (PartData::BinaryString(a), PartData::BinaryString(b)) => Some(PartData::BinaryString(format!("{}{}", a, b))),
        (PartData::Text(a), PartData::Text(b)) => Some(PartData::Text(format!("{}{}", a, b))),
        _ => None,
    }
}

/// Parse `input` delivered in pieces of the given sizes (the rest in one piece).
pub fn parse_chunked(input: &[u8], sizes: &[usize], options: ParserOptions) -> Vec<Event> {
    let mut parser = MimeParser::with_options(Recorder::default(), options);
    let mut rest = input;
    for &size in sizes {
        let n = size.min(rest.len());
        let (chunk, tail) = rest.split_at(n);
        parser.deliver_data(chunk).unwrap();
        rest = tail;
    }
    parser.deliver_data(rest).unwrap();
    parser.deliver_eof().unwrap();
    parser.into_inner().events
}

pub fn parse(input: &[u8], options: ParserOptions) -> Vec<Event> {
    parse_chunked(input, &[], options)
}

/// Event skeleton: kind and part number, data as a string of octets or text.
pub fn outline(events: &[Event]) -> Vec<String> {
    normalize(events.to_vec())
        .iter()
        .map(|e| match e {
            Event::StartMessage => "startMessage".to_string(),
            Event::StartPart(part, _) => format!("startPart {}", part),
            Event::Data(part, PartData::Text(text)) => format!("data {} {}", part, text),
            Event::Data(part, data) => format!("data {} {}", part, String::from_utf8_lossy(&data.to_bytes())),
            Event::EndPart(part) => format!("endPart {}", part),
            Event::EndMessage => "endMessage".to_string(),
        })
        .collect()
}

pub fn headers_of<'a>(events: &'a [Event], part: &str) -> &'a HeaderMap {
    events
        .iter()
        .find_map(|e| match e {
            Event::StartPart(p, headers) if p == part => Some(headers),
            _ => None,
        })
        .unwrap()
}
