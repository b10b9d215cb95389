//! Tabular export.
//!
//! The per-step schema is fixed: header row first, then one row per step
//! with columns `cohesion, separation, alignment_variance, clusters`
//! followed by one count column per connectivity state.

use crate::error::{IoError, Result};
use flockwise_core::StatsHistory;
use flockwise_data::StatsSnapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streams statistics rows to any writer, one row per step.
pub struct StatsCsvWriter<W: Write> {
    writer: W,
    columns: usize,
    rows: usize,
}

impl<W: Write> StatsCsvWriter<W> {
    /// Writes the header immediately.
    pub fn new(mut writer: W, state_labels: &[&str]) -> Result<Self> {
        let header = StatsSnapshot::tabular_header(state_labels);
        writeln!(writer, "{}", header.join(","))?;
        Ok(Self {
            writer,
            columns: header.len(),
            rows: 0,
        })
    }

    pub fn write_snapshot(&mut self, snapshot: &StatsSnapshot) -> Result<()> {
        let row = snapshot.tabular_row();
        if row.len() != self.columns {
            return Err(IoError::validation(format!(
                "step {} has {} columns, header has {}",
                snapshot.step,
                row.len(),
                self.columns
            )));
        }
        writeln!(self.writer, "{}", row.join(","))?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Writes a whole history to `path`, replacing any existing file.
pub fn write_stats_csv(
    path: impl AsRef<Path>,
    history: &StatsHistory,
    state_labels: &[&str],
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| IoError::from(e).with_context(format!("creating {}", path.display())))?;
    let mut csv = StatsCsvWriter::new(BufWriter::new(file), state_labels)?;
    for snapshot in history {
        csv.write_snapshot(snapshot)?;
    }
    let rows = csv.rows_written();
    csv.finish()?;
    tracing::info!(path = %path.display(), rows, "Statistics exported");
    Ok(())
}

/// Renders a history as CSV text.
pub fn stats_to_csv_string(history: &StatsHistory, state_labels: &[&str]) -> Result<String> {
    let mut csv = StatsCsvWriter::new(Vec::new(), state_labels)?;
    for snapshot in history {
        csv.write_snapshot(snapshot)?;
    }
    String::from_utf8(csv.finish()?).map_err(|e| IoError::validation(e.to_string()))
}

/// Writes an arbitrary table with a header; every row must match its width.
pub fn write_table<W, I>(mut writer: W, header: &[&str], rows: I) -> Result<W>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    writeln!(writer, "{}", header.join(","))?;
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != header.len() {
            return Err(IoError::validation(format!(
                "row {i} has {} columns, header has {}",
                row.len(),
                header.len()
            )));
        }
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    Ok(writer)
}
