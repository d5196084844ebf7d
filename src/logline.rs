/*
 * Copyright 2025 The MITRE Corporation

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
 */
use chrono::{NaiveDate, NaiveTime};
use nom::bytes::complete::{is_a, take, take_while1};
use nom::character::complete::char;
use nom::combinator::rest;
use nom::error::{context, VerboseError};
use nom::sequence::{delimited, tuple};
use nom::IResult;

/// This type helps us use custom verbose errors
pub type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// Log levels are written padded to five columns, e.g. "WARN " or "ERROR"
pub const LOG_LEVEL_WIDTH: usize = 5;

/// One structured line from an efiSeek analysis log
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// The raw fixed-width level field, padding included
    pub log_level: String,
    pub module: String,
    pub message: String,
}

/// Parse a word token. Word tokens can only contain alphanumeric or _
pub(crate) fn word_token(input: &str) -> Res<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// This is the type of the raw fields of a log line, before date and time validation
type LineFields<'a> = (
    &'a str, // Date
    &'a str, // Time
    &'a str, // Log level
    &'a str, // Module
    &'a str, // Message
);

/// Parse the fixed line template: `DATE TIME LEVEL (MODULE) MESSAGE`
fn line_fields(input: &str) -> Res<&str, LineFields> {
    let (leftover, (date, _, time, _, level, _, module, _, message)) = tuple((
        context("date", is_a("0123456789-")),
        char(' '),
        context("time", is_a("0123456789:.")),
        char(' '),
        context("log level", take(LOG_LEVEL_WIDTH)),
        char(' '),
        context("module", delimited(char('('), word_token, char(')'))),
        char(' '),
        context("message", rest),
    ))(input)?;
    Ok((leftover, (date, time, level, module, message)))
}

/// Parses a single raw log line into a `LogLine`.
///  Returns `None` on any template mismatch; most lines of an analysis log are
///  unstructured and skipping them is the ordinary outcome, not an error.
pub fn parse_log_line(line: &str) -> Option<LogLine> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let (_, (date, time, level, module, message)) = line_fields(line).ok()?;

    // The line template mandates two trailing spaces after the message
    let message = message.strip_suffix("  ")?;

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f").ok()?;

    Some(LogLine {
        date,
        time,
        log_level: level.to_string(),
        module: module.to_string(),
        message: message.to_string(),
    })
}
