#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use lcsk_exp::{run_plan, ExperimentPlan, ExternalStats, Ledger, ParamPair, StatsSource};
use tempfile::tempdir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod");
    path
}

#[test]
fn binary_receives_k_and_filename() {
    let dir = tempdir().expect("tmp dir");
    let script = write_script(
        dir.path(),
        "stats_fasta",
        r#"echo "input.size()=$1" >&2
echo "$1$1 $1 7 $2""#,
    );
    let mut stats = ExternalStats::new(&script);

    let output = stats.compute(&ParamPair::new(4, "x.fa")).expect("compute");
    assert_eq!(output.n, "44");
    assert_eq!(output.lcsk, "4");
    assert_eq!(output.mp_created, "7");
    assert_eq!(output.mp_max_alive, "x.fa");
}

#[test]
fn workdir_resolves_relative_inputs() {
    let dir = tempdir().expect("tmp dir");
    let script = write_script(
        dir.path(),
        "stats_fasta",
        r#"n=$(wc -c < "$2" | tr -d ' ')
echo "$n 1 2 3""#,
    );
    fs::write(dir.path().join("seq.fa"), "ACGT").expect("fasta");
    let mut stats = ExternalStats::new(&script).with_workdir(dir.path());

    let output = stats.compute(&ParamPair::new(2, "seq.fa")).expect("compute");
    assert_eq!(output.n, "4");
}

#[test]
fn non_zero_exit_is_reported() {
    let dir = tempdir().expect("tmp dir");
    let script = write_script(dir.path(), "stats_fasta", "echo '1 2 3 4'\nexit 3");
    let mut stats = ExternalStats::new(&script);

    let err = stats.compute(&ParamPair::new(9, "a.fa")).unwrap_err();
    assert_eq!(err.code(), "stats-exit");
    assert_eq!(err.info().context.get("exit").map(String::as_str), Some("3"));
    assert_eq!(err.info().context.get("k").map(String::as_str), Some("9"));
}

#[test]
fn missing_binary_fails_to_spawn() {
    let dir = tempdir().expect("tmp dir");
    let mut stats = ExternalStats::new(dir.path().join("does_not_exist"));
    let err = stats.compute(&ParamPair::new(2, "a.fa")).unwrap_err();
    assert_eq!(err.code(), "stats-spawn");
}

#[test]
fn end_to_end_run_against_script() {
    let dir = tempdir().expect("tmp dir");
    let script = write_script(dir.path(), "stats_fasta", r#"echo "100 $1 10 3""#);
    let ledger = Ledger::new(dir.path().join("ratios_hg.csv"));
    ledger.init().expect("init");
    let plan = ExperimentPlan {
        k_min: 2,
        k_max: 3,
        filenames: vec!["a.fa".into()],
    };

    let summary = run_plan(&plan, &ledger, &mut ExternalStats::new(&script)).expect("run");
    assert_eq!(summary.completed, 2);

    let text = fs::read_to_string(ledger.path()).expect("read");
    assert_eq!(
        text,
        "N,K,LCSK,MP_CREATED,MP_MAX_ALIVE,FILENAME\n100,3,3,10,3,a.fa\n100,2,2,10,3,a.fa\n"
    );
}

#[test]
fn failing_script_leaves_ledger_untouched() {
    let dir = tempdir().expect("tmp dir");
    let script = write_script(
        dir.path(),
        "stats_fasta",
        r#"if [ "$1" = "2" ]; then exit 1; fi
echo "1 1 1 1""#,
    );
    let ledger = Ledger::new(dir.path().join("ratios_hg.csv"));
    ledger.init().expect("init");
    let plan = ExperimentPlan {
        k_min: 2,
        k_max: 3,
        filenames: vec!["a.fa".into()],
    };

    let err = run_plan(&plan, &ledger, &mut ExternalStats::new(&script)).unwrap_err();
    assert_eq!(err.code(), "stats-exit");
    let done = ledger.done_set().expect("done");
    assert_eq!(done.into_iter().collect::<Vec<_>>(), vec![ParamPair::new(3, "a.fa")]);
}
