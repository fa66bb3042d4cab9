use std::error::Error;
use std::process::Command;

use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit JSON with the git commit and rustc version alongside the crate version.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    git_commit: String,
    rustc: String,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&gather_info())?);
    Ok(())
}

fn gather_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        git_commit: tool_output("git", &["rev-parse", "HEAD"]),
        rustc: tool_output("rustc", &["--version"]),
    }
}

/// First line of a tool's stdout, or "unknown" when it is missing or fails.
fn tool_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "unknown".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_unknown() {
        assert_eq!(tool_output("lcsk-no-such-tool", &[]), "unknown");
    }
}
