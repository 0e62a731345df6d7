use std::path::Path;
use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

fn pathfix(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pathfix").expect("failed to locate pathfix binary");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

fn generate_fixture(dir: &TempDir) {
    let status = pathfix(dir.path())
        .args(["generate-fixture", "fixture", "--depth", "4", "--folders", "2"])
        .status()
        .expect("failed to execute pathfix generate-fixture");
    assert!(status.success(), "pathfix generate-fixture failed");
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let mut cmd = Command::cargo_bin("pathfix").expect("failed to locate pathfix binary");
            let output = cmd.arg("--version").output().expect("failed to run pathfix");
            black_box(output);
        });
    });
}

fn bench_cli_scan(c: &mut Criterion) {
    let dir = TempDir::new().expect("failed to create temp dir");
    generate_fixture(&dir);

    c.bench_function("cli_scan_json", |b| {
        b.iter(|| {
            let output = pathfix(dir.path())
                .args(["--format", "json", "scan", "fixture"])
                .output()
                .expect("failed to execute pathfix scan");
            black_box(output);
        });
    });
}

fn bench_cli_remediate(c: &mut Criterion) {
    c.bench_function("cli_remediate", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().expect("failed to create temp dir");
                generate_fixture(&dir);
                dir
            },
            |dir| {
                let status = pathfix(dir.path())
                    .args(["--quiet", "remediate", "fixture"])
                    .status()
                    .expect("failed to execute pathfix remediate");
                black_box(status.success());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    cli_benches,
    bench_cli_startup,
    bench_cli_scan,
    bench_cli_remediate
);
criterion_main!(cli_benches);
