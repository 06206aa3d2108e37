use crate::core::report::{write_file_body, write_file_header, write_preamble};
use crate::domain::models::{ConcatConfig, FileBody};
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};

/// Sequential sink for one report. The underlying writer is dropped (and the
/// file closed) whenever the `ReportWriter` goes out of scope.
pub struct ReportWriter<W: Write> {
    inner: W,
    target: String,
}

impl ReportWriter<BufWriter<File>> {
    pub fn create(path: &str) -> anyhow::Result<Self> {
        debug!("Creating output file: {}", path);
        let file =
            File::create(path).with_context(|| format!("Failed to create output file {}", path))?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, target: impl Into<String>) -> Self {
        Self {
            inner,
            target: target.into(),
        }
    }

    pub fn write_preamble(&mut self, config: &ConcatConfig) -> anyhow::Result<()> {
        write_preamble(&mut self.inner, config)
            .with_context(|| format!("Failed to write report preamble to {}", self.target))
    }

    /// Headers go out before the file is read, so a run aborted by a read
    /// error still names the file it stopped on.
    pub fn write_header(&mut self, relative_path: &str) -> anyhow::Result<()> {
        write_file_header(&mut self.inner, relative_path).with_context(|| {
            format!(
                "Failed to write header for {} to {}",
                relative_path, self.target
            )
        })
    }

    pub fn write_body(&mut self, relative_path: &str, body: &FileBody) -> anyhow::Result<()> {
        write_file_body(&mut self.inner, relative_path, body)
            .with_context(|| format!("Failed to write {} to {}", relative_path, self.target))
    }

    /// Flushes buffered output and hands back the underlying writer.
    pub fn finish(mut self) -> anyhow::Result<W> {
        self.inner
            .flush()
            .with_context(|| format!("Failed to flush output to {}", self.target))?;
        info!("Flushed report to {}", self.target);
        Ok(self.inner)
    }
}

pub fn print_completion(output_path: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let colored = stdout.is_terminal();

    if colored {
        stdout.execute(SetForegroundColor(Color::Green))?;
    }
    writeln!(
        stdout,
        "Concatenation complete. Output written to {}",
        output_path
    )?;
    if colored {
        stdout.execute(ResetColor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::rule;
    use std::fs;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_report_writer_in_memory() {
        let config = ConcatConfig::new("web", "out.txt");
        let mut writer = ReportWriter::new(Vec::new(), "memory");

        writer.write_preamble(&config).unwrap();
        writer.write_header("index.html").unwrap();
        writer
            .write_body("index.html", &FileBody::Text("<p>hi</p>".to_string()))
            .unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(output.starts_with("FILE CONCATENATION REPORT\nRoot Directory: web\n"));
        assert!(output.ends_with(&format!(
            "{}\n\nFile: index.html\n<p>hi</p>\n\n{}\n\n",
            rule(),
            rule()
        )));
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "stale content that must disappear").unwrap();
        let path = temp_file.path().to_string_lossy().to_string();

        let writer = ReportWriter::create(&path).unwrap();
        writer.finish().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_create_fails_for_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no/such/dir/out.txt");

        let result = ReportWriter::create(&path.to_string_lossy());
        assert!(result.is_err());
    }
}
