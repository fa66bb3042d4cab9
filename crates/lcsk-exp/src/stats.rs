use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use lcsk_core::errors::{ErrorInfo, LcskError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::plan::ParamPair;

/// The four tokens printed by the stats binary, in print order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Total sequence length.
    pub n: String,
    /// LCSk++ length.
    pub lcsk: String,
    /// Match pair objects created.
    pub mp_created: String,
    /// Peak number of match pair objects alive at once.
    pub mp_max_alive: String,
}

impl StatsOutput {
    /// Splits stdout on single spaces after stripping surrounding whitespace.
    /// Exactly four tokens are accepted; their contents are not checked.
    pub fn parse(stdout: &str) -> Result<Self, LcskError> {
        let tokens: Vec<&str> = stdout.trim().split(' ').collect();
        match tokens.as_slice() {
            [n, lcsk, mp_created, mp_max_alive] => Ok(Self {
                n: n.to_string(),
                lcsk: lcsk.to_string(),
                mp_created: mp_created.to_string(),
                mp_max_alive: mp_max_alive.to_string(),
            }),
            _ => Err(LcskError::Stats(
                ErrorInfo::new("stats-shape", "stats output is not four space separated tokens")
                    .with_context("tokens", tokens.len().to_string())
                    .with_context("stdout", stdout.trim_end()),
            )),
        }
    }
}

/// Produces the statistics for one pair.
pub trait StatsSource {
    /// Computes the four statistics for `pair`, blocking until they are ready.
    fn compute(&mut self, pair: &ParamPair) -> Result<StatsOutput, LcskError>;
}

/// Runs `<binary> <k> <filename>` and blocks until it exits. There is no
/// timeout: a hung binary stalls the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalStats {
    binary: PathBuf,
    workdir: Option<PathBuf>,
}

impl ExternalStats {
    /// Invokes `binary` from the runner's own working directory.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            workdir: None,
        }
    }

    /// Runs the binary from `workdir` instead, so relative FASTA paths resolve there.
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, pair: &ParamPair) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg(pair.k.to_string())
            .arg(&pair.filename)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }
        command
    }

    fn failure(&self, pair: &ParamPair, code: &str, message: &str) -> ErrorInfo {
        ErrorInfo::new(code, message)
            .with_context("binary", self.binary.display().to_string())
            .with_context("k", pair.k.to_string())
            .with_context("filename", pair.filename.clone())
    }
}

impl StatsSource for ExternalStats {
    fn compute(&mut self, pair: &ParamPair) -> Result<StatsOutput, LcskError> {
        debug!(binary = %self.binary.display(), k = pair.k, filename = %pair.filename, "invoking stats binary");
        let output = self.command(pair).output().map_err(|err| {
            LcskError::Stats(
                self.failure(pair, "stats-spawn", "failed to launch stats binary")
                    .with_hint(err.to_string()),
            )
        })?;
        if !output.status.success() {
            let exit = output
                .status
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(LcskError::Stats(
                self.failure(pair, "stats-exit", "stats binary exited unsuccessfully")
                    .with_context("exit", exit),
            ));
        }
        let stdout = String::from_utf8(output.stdout).map_err(|err| {
            LcskError::Stats(
                self.failure(pair, "stats-utf8", "stats output is not valid UTF-8")
                    .with_hint(err.to_string()),
            )
        })?;
        StatsOutput::parse(&stdout).map_err(|err| match err {
            LcskError::Stats(info) => LcskError::Stats(
                info.with_context("k", pair.k.to_string())
                    .with_context("filename", pair.filename.clone()),
            ),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_tokens_in_print_order() {
        let stats = StatsOutput::parse("100 50 10 3\n").expect("parse");
        assert_eq!(stats.n, "100");
        assert_eq!(stats.lcsk, "50");
        assert_eq!(stats.mp_created, "10");
        assert_eq!(stats.mp_max_alive, "3");
    }

    #[test]
    fn tokens_are_not_interpreted() {
        let stats = StatsOutput::parse("  a b c d  ").expect("parse");
        assert_eq!(stats.n, "a");
        assert_eq!(stats.mp_max_alive, "d");
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        for stdout in ["100 50 10", "100 50 10 3 7", "", "100  50 10 3"] {
            let err = StatsOutput::parse(stdout).unwrap_err();
            assert_eq!(err.code(), "stats-shape", "stdout {stdout:?}");
        }
    }

    #[test]
    fn command_carries_pair_arguments() {
        let stats = ExternalStats::new("./stats_fasta").with_workdir("/data");
        let command = stats.command(&ParamPair::new(12, "chr1.fa"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["12", "chr1.fa"]);
        assert_eq!(command.get_program(), "./stats_fasta");
        assert_eq!(command.get_current_dir(), Some(Path::new("/data")));
    }
}
