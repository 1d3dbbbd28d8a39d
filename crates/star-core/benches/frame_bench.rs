use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use star_core::{plan_pages, ChartMode, FrameRenderer, Profile, RepoMeta, Series, StarRecord, Theme};

fn build_series(n: u64) -> Series {
    let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default();
    let records = (0..n)
        .map(|i| StarRecord::new(start + Days::new(i * 7), i * i / 3 + i))
        .collect();
    Series::new(records).expect("ascending dates")
}

fn bench_frames(c: &mut Criterion) {
    let renderer = FrameRenderer::new(RepoMeta::new("octo/bench"), Theme::light());
    let mut group = c.benchmark_group("render_frame");
    for &n in &[31u64, 300] {
        let series = build_series(n);
        for profile in [Profile::Video, Profile::Gif] {
            group.bench_function(format!("{profile:?}_{n}"), |b| {
                let mut p = 0.0;
                b.iter(|| {
                    p = if p >= 1.0 { 0.0 } else { p + 0.01 };
                    black_box(renderer.render(&series, p, ChartMode::Date, profile.canvas(), profile));
                });
            });
        }
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    c.bench_function("plan_pages_400k", |b| b.iter(|| black_box(plan_pages(black_box(400_000), 100, 30))));
}

criterion_group!(benches, bench_frames, bench_plan);
criterion_main!(benches);
