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

use std::io;

use thiserror::Error;

/// Errors produced while writing the report document.
///  Lines that fail to parse or to match a diagnostic template are not errors
///  anywhere in this crate; they are skipped.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("could not write report to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize report: {0}")]
    Xml(#[from] quick_xml::Error),
}
