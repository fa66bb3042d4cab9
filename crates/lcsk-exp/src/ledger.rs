use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use lcsk_core::errors::{ErrorInfo, LcskError};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::plan::ParamPair;
use crate::stats::StatsOutput;

/// Header written by [`Ledger::init`]. Existing ledgers may order these differently.
pub const LEDGER_COLUMNS: [&str; 6] = ["N", "K", "LCSK", "MP_CREATED", "MP_MAX_ALIVE", "FILENAME"];

/// Set of pairs already recorded in the ledger.
pub type DoneSet = BTreeSet<ParamPair>;

/// One completed measurement. Stats are kept as the strings the binary printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    /// Total sequence length.
    #[serde(rename = "N")]
    pub n: String,
    #[serde(rename = "K", deserialize_with = "deserialize_k")]
    pub k: u32,
    #[serde(rename = "LCSK")]
    pub lcsk: String,
    #[serde(rename = "MP_CREATED")]
    pub mp_created: String,
    #[serde(rename = "MP_MAX_ALIVE")]
    pub mp_max_alive: String,
    #[serde(rename = "FILENAME")]
    pub filename: String,
}

// Same leniency as `Ledger::done_set`: padding around K is accepted.
fn deserialize_k<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.trim().parse::<u32>().map_err(serde::de::Error::custom)
}

impl LogRow {
    /// Builds the row recorded for `pair` from the binary's output.
    pub fn from_stats(pair: &ParamPair, stats: StatsOutput) -> Self {
        Self {
            n: stats.n,
            k: pair.k,
            lcsk: stats.lcsk,
            mp_created: stats.mp_created,
            mp_max_alive: stats.mp_max_alive,
            filename: pair.filename.clone(),
        }
    }

    /// The idempotency key of this row.
    pub fn pair(&self) -> ParamPair {
        ParamPair::new(self.k, self.filename.clone())
    }

    fn field(&self, column: &str) -> Option<String> {
        match column {
            "N" => Some(self.n.clone()),
            "K" => Some(self.k.to_string()),
            "LCSK" => Some(self.lcsk.clone()),
            "MP_CREATED" => Some(self.mp_created.clone()),
            "MP_MAX_ALIVE" => Some(self.mp_max_alive.clone()),
            "FILENAME" => Some(self.filename.clone()),
            _ => None,
        }
    }
}

/// CSV file of completed measurements, one row per `(K, FILENAME)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Handle on the ledger at `path`; nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the ledger with the default header. Returns `false` and leaves
    /// the file untouched when it already exists.
    pub fn init(&self) -> Result<bool, LcskError> {
        if self.path.exists() {
            return Ok(false);
        }
        ensure_parent(&self.path)?;
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|err| self.io_error("ledger-create", "failed to create ledger", err))?;
        let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
        writer
            .write_record(LEDGER_COLUMNS)
            .map_err(|err| self.csv_error("ledger-write-header", err))?;
        writer
            .flush()
            .map_err(|err| self.io_error("ledger-flush", "failed to flush ledger", err))?;
        Ok(true)
    }

    /// Field names in file order.
    pub fn header(&self) -> Result<Vec<String>, LcskError> {
        let mut reader = self.open_reader()?;
        let headers = reader
            .headers()
            .map_err(|err| self.csv_error("ledger-read", err))?;
        Ok(headers.iter().map(|name| name.to_string()).collect())
    }

    /// Reads every row and collects the `(K, FILENAME)` pairs.
    pub fn done_set(&self) -> Result<DoneSet, LcskError> {
        let mut reader = self.open_reader()?;
        let headers = reader
            .headers()
            .map_err(|err| self.csv_error("ledger-read", err))?
            .clone();
        let k_idx = self.column_index(&headers, "K")?;
        let file_idx = self.column_index(&headers, "FILENAME")?;

        let mut done = DoneSet::new();
        for result in reader.records() {
            let record = result.map_err(|err| self.csv_error("ledger-record", err))?;
            let raw_k = record.get(k_idx).unwrap_or_default();
            let k = raw_k.trim().parse::<u32>().map_err(|err| {
                LcskError::Ledger(
                    ErrorInfo::new("ledger-k-parse", "K column is not an integer")
                        .with_context("path", self.path.display().to_string())
                        .with_context("line", record_line(&record))
                        .with_context("value", raw_k)
                        .with_hint(err.to_string()),
                )
            })?;
            let filename = record.get(file_idx).unwrap_or_default();
            done.insert(ParamPair::new(k, filename));
        }
        Ok(done)
    }

    /// Every row in file order.
    pub fn rows(&self) -> Result<Vec<LogRow>, LcskError> {
        let mut reader = self.open_reader()?;
        let mut rows = Vec::new();
        for result in reader.deserialize::<LogRow>() {
            rows.push(result.map_err(|err| self.csv_error("ledger-record", err))?);
        }
        Ok(rows)
    }

    /// Appends one row in the ledger's own column order and flushes it.
    /// Rows already in the file are never rewritten.
    pub fn append(&self, row: &LogRow) -> Result<(), LcskError> {
        let header = self.header()?;
        let missing: Vec<&str> = LEDGER_COLUMNS
            .iter()
            .copied()
            .filter(|column| !header.iter().any(|name| name == column))
            .collect();
        if !missing.is_empty() {
            return Err(LcskError::Ledger(
                ErrorInfo::new("ledger-header", "ledger header cannot hold a result row")
                    .with_context("path", self.path.display().to_string())
                    .with_context("missing", missing.join(",")),
            ));
        }
        let record: Vec<String> = header
            .iter()
            .map(|column| row.field(column).unwrap_or_default())
            .collect();

        let needs_terminator = !ends_with_newline(&self.path)
            .map_err(|err| self.io_error("ledger-read", "failed to inspect ledger", err))?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| self.io_error("ledger-append", "failed to open ledger", err))?;
        if needs_terminator {
            file.write_all(b"\n")
                .map_err(|err| self.io_error("ledger-append", "failed to append to ledger", err))?;
        }
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer
            .write_record(&record)
            .map_err(|err| self.csv_error("ledger-append", err))?;
        writer
            .flush()
            .map_err(|err| self.io_error("ledger-flush", "failed to flush ledger", err))?;
        debug!(path = %self.path.display(), k = row.k, filename = %row.filename, "row appended");
        Ok(())
    }

    fn open_reader(&self) -> Result<csv::Reader<File>, LcskError> {
        if !self.path.exists() {
            return Err(LcskError::Ledger(
                ErrorInfo::new("ledger-missing", "ledger file does not exist")
                    .with_context("path", self.path.display().to_string())
                    .with_hint("create it with a header row first (`lcsk-run init`)"),
            ));
        }
        ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|err| self.csv_error("ledger-read", err))
    }

    fn column_index(&self, headers: &StringRecord, column: &str) -> Result<usize, LcskError> {
        headers.iter().position(|name| name == column).ok_or_else(|| {
            LcskError::Ledger(
                ErrorInfo::new("ledger-header", "ledger header is missing a column")
                    .with_context("path", self.path.display().to_string())
                    .with_context("column", column),
            )
        })
    }

    fn csv_error(&self, code: &str, err: csv::Error) -> LcskError {
        LcskError::Ledger(
            ErrorInfo::new(code, "CSV ledger failure")
                .with_context("path", self.path.display().to_string())
                .with_hint(err.to_string()),
        )
    }

    fn io_error(&self, code: &str, message: &str, err: std::io::Error) -> LcskError {
        LcskError::Ledger(
            ErrorInfo::new(code, message)
                .with_context("path", self.path.display().to_string())
                .with_hint(err.to_string()),
        )
    }
}

fn ends_with_newline(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn record_line(record: &StringRecord) -> String {
    record
        .position()
        .map(|pos| pos.line().to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn ensure_parent(path: &Path) -> Result<(), LcskError> {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(parent).map_err(|err| {
            LcskError::Ledger(
                ErrorInfo::new("ledger-create", "failed to create ledger directory")
                    .with_context("path", parent.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?
    }
    Ok(())
}
