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
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, hex_digit1};
use nom::combinator::{all_consuming, map_res, opt};
use nom::error::context;
use nom::sequence::{delimited, preceded, tuple};
use serde::{Deserialize, Serialize};

use crate::logline::{word_token, LogLine, Res};

/// Module name the efiSeek Ghidra plugin logs under
const EFISEEK_MODULE: &str = "EfiSeek";
/// The diagnostics only ever appear at warning level
const WARN_LEVEL: &str = "WARN ";

/// A security finding extracted from a single warning message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A call from SMM into code outside SMRAM
    SmmCallout {
        func_name: String,
        func_addr: u64,
        addr: u64,
    },
    /// A GetVariable call pattern that can overflow its destination buffer
    GetVariableOverflow {
        func_name: String,
        func_addr: u64,
        addr1: u64,
        addr2: u64,
    },
}

/// Parse a hex address, with or without a leading 0x
fn hex_addr(input: &str) -> Res<&str, u64> {
    map_res(preceded(opt(tag("0x")), hex_digit1), |digits: &str| {
        u64::from_str_radix(digits, 16)
    })(input)
}

/// Parse `{func_name}({func_addr})`, the location every diagnostic points at
fn function_site(input: &str) -> Res<&str, (&str, u64)> {
    tuple((
        context("function name", word_token),
        context(
            "function address",
            delimited(char('('), hex_addr, char(')')),
        ),
    ))(input)
}

/// Parse a GetVariable overflow message in its entirety
fn parse_overflow(input: &str) -> Res<&str, Diagnostic> {
    let (leftover, (_, (func_name, func_addr), _, addr1, _, addr2)) =
        all_consuming(tuple((
            tag("Potential GetVariable overflow detected at "),
            function_site,
            tag(" : "),
            context("first address", hex_addr),
            tag(" and "),
            context("second address", hex_addr),
        )))(input)?;
    Ok((
        leftover,
        Diagnostic::GetVariableOverflow {
            func_name: func_name.to_string(),
            func_addr,
            addr1,
            addr2,
        },
    ))
}

/// Parse an SMM callout message in its entirety
fn parse_callout(input: &str) -> Res<&str, Diagnostic> {
    let (leftover, (_, (func_name, func_addr), _, addr)) = all_consuming(tuple((
        tag("Potential SMM callout detected at "),
        function_site,
        tag(" : "),
        context("callout address", hex_addr),
    )))(input)?;
    Ok((
        leftover,
        Diagnostic::SmmCallout {
            func_name: func_name.to_string(),
            func_addr,
            addr,
        },
    ))
}

/// Matches a parsed log line against the known diagnostic templates.
///  Returns at most one `Diagnostic`; the overflow template is tried first and
///  the first match wins. Lines from other modules or at other levels never
///  produce a diagnostic.
pub fn match_diagnostic(line: &LogLine) -> Option<Diagnostic> {
    if line.module != EFISEEK_MODULE {
        return None;
    }
    if line.log_level != WARN_LEVEL {
        return None;
    }

    // Debug side channel: every EfiSeek warning is echoed, matching or not
    eprintln!("{}", line.message);

    let result: Res<&str, Diagnostic> = context(
        "diagnostic",
        alt((parse_overflow, parse_callout)),
    )(line.message.as_str());
    match result {
        Ok((_, diagnostic)) => Some(diagnostic),
        Err(_) => None,
    }
}
