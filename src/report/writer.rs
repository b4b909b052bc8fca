//! Markdown serialization of file records.

use std::io::{self, Write};

use crate::types::FileRecord;

/// Appends one block per documented file:
///
/// ```text
/// # File <name> (<type>)
///  - **<key>** : <value>
///
/// ```
pub struct MarkdownWriter<W: Write> {
    out: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_record(&mut self, file_name: &str, record: &FileRecord) -> io::Result<()> {
        writeln!(self.out, "# File {} ({})", file_name, record.file_type)?;
        for (key, value) in record.entries() {
            writeln!(self.out, " - **{key}** : {value}")?;
        }
        writeln!(self.out)
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
