//! Simple log file writer with timestamps

use crate::analysis::AnalysisResult;
use crate::utils::Utils;
use crate::Result;
use chrono::{Local, Utc};
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Longest file name echoed into the log
const MAX_NAME_CHARS: usize = 64;

#[derive(Clone)]
pub struct LogFile {
    inner: Arc<LogFileInner>,
}

struct LogFileInner {
    path: PathBuf,
    state: Mutex<LogState>,
    start: Instant,
    output_to_console: bool,
}

struct LogState {
    writer: BufWriter<File>,
    last_seconds: f32,
    analyses: usize,
    failures: usize,
}

impl LogFile {
    /// Open a log file; without a path one is created in the temp directory
    pub fn new(path: Option<&Path>, output_to_console: bool) -> Result<Self> {
        let path = match path {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => env::temp_dir().join(Utils::date_time_filename("stl-quote_", ".log")),
        };

        let writer = BufWriter::new(File::create(&path)?);

        let inner = LogFileInner {
            path: path.clone(),
            state: Mutex::new(LogState {
                writer,
                last_seconds: 0.0,
                analyses: 0,
                failures: 0,
            }),
            start: Instant::now(),
            output_to_console,
        };

        let log = Self {
            inner: Arc::new(inner),
        };

        log.log(format!("Opened {}", path.display()))?;
        log.log("\n----------------------------------------\n")?;
        log.log_time()?;
        log.log(format!(
            "stl-quote {} on {}/{}",
            env!("CARGO_PKG_VERSION"),
            env::consts::OS,
            env::consts::ARCH
        ))?;
        log.log("\n----------------------------------------\n")?;

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn log(&self, message: impl AsRef<str>) -> Result<()> {
        self.inner.log_lines(message.as_ref())
    }

    pub fn log_time(&self) -> Result<()> {
        let utc = Utc::now();
        let local = Local::now();
        self.log(format!(
            "Current time (UTC): {}",
            utc.format("%Y-%m-%d %H:%M:%S (UTC)")
        ))?;
        self.log(format!(
            "Current local time: {}",
            local.format("%Y-%m-%d %H:%M:%S (%z)")
        ))?;
        Ok(())
    }

    /// Record a completed analysis for `file_name`
    pub fn log_analysis(&self, file_name: &str, result: &AnalysisResult) -> Result<()> {
        self.inner.with_state(|state| state.analyses += 1);
        self.log(format!(
            "Analyzed {}: {}",
            Utils::shorten(file_name, MAX_NAME_CHARS),
            result.summary()
        ))
    }

    /// Record an upload that could not be priced automatically
    pub fn log_failure(&self, file_name: &str, error: &crate::Error) -> Result<()> {
        self.inner.with_state(|state| state.failures += 1);
        self.log(format!(
            "Analysis failed for {}: {}",
            Utils::shorten(file_name, MAX_NAME_CHARS),
            error
        ))
    }
}

impl LogFileInner {
    fn with_state<T>(&self, f: impl FnOnce(&mut LogState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    fn log_lines(&self, message: &str) -> Result<()> {
        let seconds = self.start.elapsed().as_secs_f32();
        let echo = self.output_to_console;

        self.with_state(|state| -> Result<()> {
            let prefix = format!("{:7.0}s {:6.1}+ ", seconds, seconds - state.last_seconds);
            state.last_seconds = seconds;

            for line in message.split('\n') {
                if echo {
                    println!("{prefix}{line}");
                }
                writeln!(state.writer, "{prefix}{line}")?;
            }
            state.writer.flush()?;
            Ok(())
        })
    }
}

impl Drop for LogFileInner {
    fn drop(&mut self) {
        let (analyses, failures) = self.with_state(|state| (state.analyses, state.failures));
        let _ = self.log_lines("\n----------------------------------------\n");
        let _ = self.log_lines(&format!(
            "Quoted {} upload(s), {} fell back to manual pricing.",
            analyses, failures
        ));
        let _ = self.log_lines(&format!(
            "Log closed at {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S (UTC)")
        ));
    }
}
