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
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::errors::ReportError;

/// Title carried on the report's root element
pub const REPORT_TITLE: &str = "Ghidra efiSeek Static SMM Analysis";

/// One failed test case. Every case in the report is a failure by
///  construction; there is no passing variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    /// The raw log message the diagnostic was extracted from
    pub system_err: String,
}

impl TestCase {
    /// Build a test case from a matched diagnostic and the message it came from
    pub fn from_diagnostic(diagnostic: &Diagnostic, message: &str) -> Self {
        match diagnostic {
            Diagnostic::SmmCallout {
                func_addr, addr, ..
            } => TestCase {
                name: format!("Potential SMM Callout : {:#x}", addr),
                classname: format!("{:#x}", func_addr),
                system_err: message.to_string(),
            },
            Diagnostic::GetVariableOverflow {
                func_addr,
                addr1,
                addr2,
                ..
            } => TestCase {
                name: format!(
                    "Potential SMM GetVariable Overflow : {:#x} and {:#x}",
                    addr1, addr2
                ),
                classname: format!("{:#x}", func_addr),
                system_err: message.to_string(),
            },
        }
    }
}

/// The single suite a run accumulates cases into, named after the input file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        TestSuite {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a case. Cases keep input-line encounter order.
    pub fn add_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// The whole report document: a title and exactly one suite
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub suite: TestSuite,
}

impl Report {
    pub fn new(title: impl Into<String>, suite: TestSuite) -> Self {
        Report {
            title: title.into(),
            suite,
        }
    }

    /// Serializes the report as JUnit XML. Output is deterministic: the same
    ///  report always serializes to the same bytes.
    pub fn write_into<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("testsuites");
        root.push_attribute(("name", self.title.as_str()));
        xml.write_event(Event::Start(root))?;

        let mut suite = BytesStart::new("testsuite");
        suite.push_attribute(("name", self.suite.name.as_str()));
        let count = self.suite.len().to_string();
        suite.push_attribute(("tests", count.as_str()));
        // every case is an error, so the counts coincide
        suite.push_attribute(("errors", count.as_str()));
        xml.write_event(Event::Start(suite))?;

        for case in &self.suite.cases {
            let mut testcase = BytesStart::new("testcase");
            testcase.push_attribute(("name", case.name.as_str()));
            testcase.push_attribute(("classname", case.classname.as_str()));
            xml.write_event(Event::Start(testcase))?;

            xml.write_event(Event::Empty(BytesStart::new("error")))?;

            xml.write_event(Event::Start(BytesStart::new("system-err")))?;
            xml.write_event(Event::Text(BytesText::new(case.system_err.as_str())))?;
            xml.write_event(Event::End(BytesEnd::new("system-err")))?;

            xml.write_event(Event::End(BytesEnd::new("testcase")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("testsuite")))?;
        xml.write_event(Event::End(BytesEnd::new("testsuites")))?;

        Ok(())
    }

    /// Writes the report to `path`, overwriting any existing file.
    ///  The write happens exactly once, after the whole input was consumed.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_into(&mut writer)?;
        writer.flush().map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
