use anyhow::{bail, Result};
use efiseek_report::{match_diagnostic, parse_log_line, Report, TestCase, TestSuite, REPORT_TITLE};
use std::{fs, path::PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "gen_report")]
struct GenReport {
    /// Log file captured from a Ghidra efiSeek analysis run
    #[structopt(parse(from_os_str))]
    input_file: PathBuf,
    /// Path the JUnit XML report is written to
    #[structopt(parse(from_os_str))]
    output_file: PathBuf,
}

fn main() -> Result<()> {
    let GenReport {
        input_file,
        output_file,
    } = GenReport::from_args();
    let file_contents = match fs::read_to_string(&input_file) {
        Ok(c) => c,
        Err(e) => bail!("Could not read file {}. Error: {}", input_file.display(), e),
    };

    // TODO: use the analyzed binary's name for the suite name
    let mut suite = TestSuite::new(input_file.display().to_string());
    for line in file_contents.lines() {
        if let Some(log_line) = parse_log_line(line) {
            if let Some(diagnostic) = match_diagnostic(&log_line) {
                suite.add_case(TestCase::from_diagnostic(&diagnostic, &log_line.message));
            }
        }
    }

    let report = Report::new(REPORT_TITLE, suite);
    report.write_to_file(&output_file)?;
    Ok(())
}
