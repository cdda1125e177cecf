// Benchmarks for laying out the repository list
//
// Benchmark groups:
//   - layout: column widths and available width (10, 100, 1000 repositories)
//   - render_print: full print-mode rendering, plain and colored
//   - view: one interactive frame for a 24-line terminal
//
// Run examples:
//   cargo bench --bench layout                 # All benchmarks
//   cargo bench --bench layout render_print    # Print mode only

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lz::git::{FileStatus, Repo, RepoStatus};
use lz::status::view::{self, Model};
use lz::status::{Entry, LayoutConfig, Snapshot, flatten, render_print};
use lz::styling::Theme;
use std::hint::black_box;

const NOW: i64 = 1_700_000_000;

/// `count` repositories, every third one dirty with a handful of files.
fn synthetic_snapshot(count: usize) -> Snapshot {
    let entries = (0..count)
        .map(|i| {
            let mut status = RepoStatus {
                branch: if i % 4 == 0 {
                    format!("feature/long-branch-name-{i}")
                } else {
                    "main".to_string()
                },
                tag: if i % 5 == 0 { format!("v{i}.0") } else { String::new() },
                ahead: i % 3,
                behind: i % 7,
                stash_count: i % 2,
                has_upstream: i % 6 != 0,
                last_commit: Some(NOW - (i as i64) * 3_600),
                ..RepoStatus::default()
            };
            if i % 3 == 0 {
                status = status.with_files(vec![
                    FileStatus::new(" M", format!("src/module_{i}/lib.rs")),
                    FileStatus::new("??", "notes.md"),
                    FileStatus::new("R ", "src/old_name.rs -> src/renamed/new_name.rs"),
                    FileStatus::new("A ", format!("deeply/nested/path/to/file_{i}.rs")),
                ]);
            }
            Entry::new(Repo::new(format!("repo-{i:04}"), format!("/src/repo-{i}")), status)
        })
        .collect();
    Snapshot::new(entries, NOW)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for count in [10, 100, 1000] {
        let snapshot = synthetic_snapshot(count);
        let rows = flatten(&snapshot.entries);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| LayoutConfig::calculate(black_box(&snapshot), black_box(&rows), 120, 0));
        });
    }

    group.finish();
}

fn bench_render_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_print");
    let snapshot = synthetic_snapshot(100);

    for (label, theme) in [("plain", Theme::plain()), ("colored", Theme::colored())] {
        group.bench_function(label, |b| {
            b.iter(|| render_print(black_box(&snapshot), 120, &theme));
        });
    }

    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let model = Model::new(synthetic_snapshot(1000), 120, 24);
    let theme = Theme::colored();

    c.bench_function("view/frame", |b| {
        b.iter(|| view::render(black_box(&model), &theme));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(5))
        .warm_up_time(std::time::Duration::from_secs(1));
    targets = bench_layout, bench_render_print, bench_view
}
criterion_main!(benches);
