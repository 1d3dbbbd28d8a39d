// File: crates/star-core/tests/frame.rs
// Purpose: Pure frame rendering; reveal schedules, determinism, and layout sanity.

use chrono::NaiveDate;
use star_core::format::counter_label;
use star_core::{CanvasSize, ChartMode, DrawOp, FrameRenderer, Profile, RepoMeta, Series, StarRecord, Theme};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample() -> Series {
    Series::new(vec![
        StarRecord::new(day(2020, 1, 1), 0),
        StarRecord::new(day(2020, 6, 1), 50),
        StarRecord::new(day(2021, 1, 1), 500),
    ])
    .unwrap()
}

fn renderer() -> FrameRenderer {
    let mut meta = RepoMeta::new("octo/stars");
    meta.language = "Rust".into();
    meta.created_at = Some(day(2019, 4, 2));
    FrameRenderer::new(meta, Theme::light())
}

#[test]
fn progress_zero_shows_first_record_only() {
    let s = sample();
    for profile in [Profile::Video, Profile::Gif] {
        let f = renderer().render(&s, 0.0, ChartMode::Date, profile.canvas(), profile);
        assert_eq!(f.reveal.visible_count, 1, "{profile:?}");
        assert_eq!(f.reveal.label_count(), 0);
        assert_eq!(f.markers().count(), 1);
        assert!(f.texts().any(|t| t == "0 stars"));
        assert!(!f.ops.iter().any(|op| matches!(op, DrawOp::Polyline { .. })));
    }
}

#[test]
fn progress_one_shows_everything() {
    let s = sample();
    for profile in [Profile::Video, Profile::Gif] {
        let f = renderer().render(&s, 1.0, ChartMode::Timeline, profile.canvas(), profile);
        assert_eq!(f.reveal.visible_count, 3);
        assert_eq!(f.reveal.label_count(), 500);
        assert_eq!(f.markers().count(), 3);
        assert!(f.texts().any(|t| t == counter_label(500)));
    }
}

#[test]
fn identical_inputs_give_identical_frames() {
    let s = sample();
    let r = renderer();
    for p in [0.0, 0.33, 0.5, 0.999, 1.0] {
        let a = r.render(&s, p, ChartMode::Date, CanvasSize::gif(), Profile::Gif);
        let b = r.clone().render(&s, p, ChartMode::Date, CanvasSize::gif(), Profile::Gif);
        assert_eq!(a, b);
    }
}

#[test]
fn video_steps_through_records() {
    let s = sample();
    let at = |p| Profile::Video.reveal(&s, p);
    assert_eq!(at(0.5).visible_count, 1);
    assert_eq!(at(0.7).visible_count, 2);
    assert_eq!(at(0.7).displayed_count, 50.0);
    assert_eq!(at(f64::NAN).visible_count, 1);
    assert_eq!(at(7.0).visible_count, 3);
}

#[test]
fn gif_holds_then_interpolates() {
    let s = sample();
    let hold = Profile::Gif.reveal(&s, 0.05);
    assert_eq!((hold.visible_count, hold.displayed_count), (1, 0.0));

    // A quarter of the way through the reveal sits halfway between the first two records.
    let mid = Profile::Gif.reveal(&s, 0.1 + 0.25 * 0.9);
    assert_eq!(mid.visible_count, 1);
    assert!((mid.displayed_count - 25.0).abs() < 1e-6, "{mid:?}");
    assert_eq!(mid.label_count(), 25);

    let late = Profile::Gif.reveal(&s, 0.9);
    assert_eq!(late.visible_count, 3);
    assert_eq!(late.displayed_count, 500.0);
}

#[test]
fn markers_land_inside_the_plot() {
    let s = sample();
    for canvas in [CanvasSize::video(), CanvasSize::gif()] {
        let plot = FrameRenderer::plot_rect(canvas);
        let f = renderer().render(&s, 1.0, ChartMode::Date, canvas, Profile::Video);
        let pts: Vec<_> = f.markers().collect();
        for m in &pts {
            assert!(m.x >= plot.left - 0.01 && m.x <= plot.right + 0.01, "{m:?} outside {plot:?}");
            assert!(m.y >= plot.top - 0.01 && m.y <= plot.bottom + 0.01, "{m:?} outside {plot:?}");
        }
        assert!((pts[0].x - plot.left).abs() < 0.01);
        assert!((pts[0].y - plot.bottom).abs() < 0.01);
        assert!((pts[2].x - plot.right).abs() < 0.01);
        assert!((pts[2].y - plot.top).abs() < 0.01);
    }
}

#[test]
fn static_text_is_present() {
    let f = renderer().render(&sample(), 0.5, ChartMode::Date, CanvasSize::video(), Profile::Video);
    let texts: Vec<&str> = f.texts().collect();
    assert!(texts.contains(&"octo/stars"));
    assert!(texts.contains(&"Star Growth History"));
    assert!(texts.contains(&"Rust \u{2022} Created 2019"));
    assert!(texts.contains(&"Jan 2020"));
    assert!(texts.contains(&"Jan 2021"));
    assert_eq!(f.size, CanvasSize::video());
}

#[test]
fn timeline_axis_labels_elapsed_time() {
    let f = renderer().render(&sample(), 1.0, ChartMode::Timeline, CanvasSize::gif(), Profile::Gif);
    let texts: Vec<&str> = f.texts().collect();
    assert!(texts.contains(&"0d"));
    assert!(texts.contains(&"1y"));
}
