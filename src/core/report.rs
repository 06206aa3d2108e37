use crate::domain::models::{ConcatConfig, FileBody};
use log::debug;
use std::io::{self, Write};

pub const REPORT_TITLE: &str = "FILE CONCATENATION REPORT";
pub const RULE_WIDTH: usize = 80;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn write_preamble<W: Write>(out: &mut W, config: &ConcatConfig) -> io::Result<()> {
    debug!("Writing report preamble for {}", config.root_path);
    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "Root Directory: {}", config.root_path)?;
    writeln!(out, "Excluded Directories: {}", config.excluded_dirs.join(", "))?;
    writeln!(out, "File Extensions: {}", config.extensions.join(", "))?;
    write!(out, "{}\n\n", rule())
}

pub fn write_file_header<W: Write>(out: &mut W, relative_path: &str) -> io::Result<()> {
    writeln!(out, "File: {}", relative_path)
}

/// Contents (or placeholder) of one file followed by the block separator.
pub fn write_file_body<W: Write>(
    out: &mut W,
    relative_path: &str,
    body: &FileBody,
) -> io::Result<()> {
    match body {
        FileBody::Text(contents) => out.write_all(contents.as_bytes())?,
        FileBody::Undecodable => writeln!(
            out,
            "Error: Unable to read {} - file may be binary or encoded.",
            relative_path
        )?,
        FileBody::Unreadable(reason) => {
            writeln!(out, "Error: Unable to read {} - {}", relative_path, reason)?
        }
    }

    write!(out, "\n\n{}\n\n", rule())
}
