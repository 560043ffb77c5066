//! Line-oriented fit progress log.
//!
//! When verbosity is positive, each fit writes its progress lines, keyed
//! by a run name, to a freshly created log file and mirrors them through
//! the `log` crate. At verbosity zero the logger is a no-op and opens no
//! file.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::Result;

/// Progress sink for one `fit` call.
pub(crate) struct FitLog {
    run: String,
    file: Option<BufWriter<File>>,
}

impl FitLog {
    /// Open the log target named by `path` when `verbosity > 0`.
    ///
    /// The target is truncated: each fit writes one logfile, replacing
    /// whatever a previous fit left under the same name.
    pub(crate) fn new(verbosity: u32, path: &str, run: &str) -> Result<Self> {
        let file = if verbosity > 0 {
            Some(BufWriter::new(File::create(path)?))
        } else {
            None
        };
        Ok(Self {
            run: run.to_string(),
            file,
        })
    }

    /// A logger that drops everything, for stages run outside a fit.
    pub(crate) fn disabled() -> Self {
        Self {
            run: String::new(),
            file: None,
        }
    }

    /// Emit one progress line.
    pub(crate) fn line(&mut self, msg: &str) -> Result<()> {
        if let Some(file) = &mut self.file {
            writeln!(file, "[{}] {}", self.run, msg)?;
            log::info!(target: "kmedo", "[{}] {}", self.run, msg);
        } else {
            log::debug!(target: "kmedo", "{}", msg);
        }
        Ok(())
    }

    /// Flush any buffered lines.
    pub(crate) fn finish(&mut self) -> Result<()> {
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}
