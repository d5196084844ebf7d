/**
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
use efiseek_report::{match_diagnostic, Diagnostic, LogLine};

#[test]
fn callout_match() {
    let line = warn_line("EfiSeek", "Potential SMM callout detected at MyFunc(0x1000) : 0x2000");
    let diagnostic = match_diagnostic(&line).expect("callout should match");
    assert_eq!(
        diagnostic,
        Diagnostic::SmmCallout {
            func_name: "MyFunc".to_string(),
            func_addr: 0x1000,
            addr: 0x2000,
        }
    );
}

#[test]
fn overflow_match() {
    let line = warn_line(
        "EfiSeek",
        "Potential GetVariable overflow detected at SmiHandler(0x8004a0) : 0xfe10 and 0xfe30",
    );
    let diagnostic = match_diagnostic(&line).expect("overflow should match");
    assert_eq!(
        diagnostic,
        Diagnostic::GetVariableOverflow {
            func_name: "SmiHandler".to_string(),
            func_addr: 0x8004a0,
            addr1: 0xfe10,
            addr2: 0xfe30,
        }
    );
}

#[test]
fn overflow_is_never_classified_as_callout() {
    let line = warn_line(
        "EfiSeek",
        "Potential GetVariable overflow detected at F(0x1) : 0x2 and 0x3",
    );
    match match_diagnostic(&line) {
        Some(Diagnostic::GetVariableOverflow { .. }) => {}
        other => panic!("expected an overflow diagnostic, got {:?}", other),
    }
}

#[test]
fn other_module_skipped() {
    let line = warn_line("Loader", "Potential SMM callout detected at MyFunc(0x1000) : 0x2000");
    assert!(match_diagnostic(&line).is_none());
}

#[test]
fn other_level_skipped() {
    let mut line = warn_line("EfiSeek", "Potential SMM callout detected at MyFunc(0x1000) : 0x2000");
    line.log_level = "INFO ".to_string();
    assert!(match_diagnostic(&line).is_none());
}

#[test]
fn unpadded_level_skipped() {
    let mut line = warn_line("EfiSeek", "Potential SMM callout detected at MyFunc(0x1000) : 0x2000");
    line.log_level = "WARN".to_string();
    assert!(match_diagnostic(&line).is_none());
}

#[test]
fn addresses_without_prefix() {
    let line = warn_line("EfiSeek", "Potential SMM callout detected at Sub(00401000) : 0000fe10");
    let diagnostic = match_diagnostic(&line).expect("unprefixed hex should match");
    assert_eq!(
        diagnostic,
        Diagnostic::SmmCallout {
            func_name: "Sub".to_string(),
            func_addr: 0x401000,
            addr: 0xfe10,
        }
    );
}

#[test]
fn uppercase_hex_digits() {
    let line = warn_line("EfiSeek", "Potential SMM callout detected at F(0xDEAD) : 0xBEEF");
    let diagnostic = match_diagnostic(&line).expect("uppercase hex should match");
    assert_eq!(
        diagnostic,
        Diagnostic::SmmCallout {
            func_name: "F".to_string(),
            func_addr: 0xdead,
            addr: 0xbeef,
        }
    );
}

#[test]
fn trailing_garbage_rejected() {
    let line = warn_line(
        "EfiSeek",
        "Potential SMM callout detected at MyFunc(0x1000) : 0x2000 extra",
    );
    assert!(match_diagnostic(&line).is_none());
}

#[test]
fn non_hex_address_rejected() {
    let line = warn_line("EfiSeek", "Potential SMM callout detected at MyFunc(0xZZZZ) : 0x2000");
    assert!(match_diagnostic(&line).is_none());
}

#[test]
fn unrelated_warning_skipped() {
    let line = warn_line("EfiSeek", "could not resolve protocol GUID");
    assert!(match_diagnostic(&line).is_none());
}

/// helper to build a WARN-level line without going through the line parser
fn warn_line(module: &str, message: &str) -> LogLine {
    LogLine {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        log_level: "WARN ".to_string(),
        module: module.to_string(),
        message: message.to_string(),
    }
}
