// File: crates/star-render-skia/tests/raster.rs
// Purpose: Replaying frames onto a raster surface and reading pixels back.

use chrono::NaiveDate;
use star_core::{CanvasSize, ChartMode, FrameRenderer, Profile, RepoMeta, Series, StarRecord, Theme};
use star_render_skia::{render_png, RasterError, SkiaRenderer};

fn sample() -> Series {
    let d = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
    Series::new(vec![
        StarRecord::new(d(2020, 1), 0),
        StarRecord::new(d(2020, 7), 120),
        StarRecord::new(d(2021, 3), 900),
    ])
    .unwrap()
}

fn px(buf: &[u8], width: i32, x: i32, y: i32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn close(got: [u8; 4], want: [u8; 4], tol: u8) -> bool {
    got.iter().zip(want.iter()).all(|(a, b)| a.abs_diff(*b) <= tol)
}

#[test]
fn rgba_buffer_is_tightly_packed() {
    let canvas = CanvasSize::new(320, 240);
    let frame = FrameRenderer::new(RepoMeta::new("octo/raster"), Theme::light())
        .render(&sample(), 1.0, ChartMode::Date, canvas, Profile::Gif);
    let mut r = SkiaRenderer::new(canvas).unwrap().with_text(false);
    let buf = r.render_rgba8(&frame).unwrap();
    assert_eq!(buf.len(), 320 * 240 * 4);
    assert!(buf.chunks_exact(4).all(|p| p[3] == 255), "background should be opaque");
}

#[test]
fn background_and_markers_use_theme_colors() {
    let canvas = CanvasSize::new(640, 480);
    let theme = Theme::light();
    let renderer = FrameRenderer::new(RepoMeta::new("octo/raster"), theme);
    let frame = renderer.render(&sample(), 1.0, ChartMode::Date, canvas, Profile::Video);
    let mut r = SkiaRenderer::new(canvas).unwrap().with_text(false);
    let buf = r.render_rgba8(&frame).unwrap();

    let bg = theme.background_start;
    assert!(close(px(&buf, 640, 0, 0), [bg.r, bg.g, bg.b, 255], 4));

    let last = frame.markers().last().unwrap();
    let m = theme.marker;
    let got = px(&buf, 640, last.x.floor() as i32, last.y.floor() as i32 + 1);
    assert!(close(got, [m.r, m.g, m.b, 255], 24), "marker pixel {got:?}");
}

#[test]
fn empty_canvas_is_surface_unavailable() {
    match SkiaRenderer::new(CanvasSize::new(0, 0)) {
        Err(RasterError::SurfaceUnavailable { width: 0, height: 0 }) => {}
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("zero-sized surface should not be created"),
    }
}

#[test]
fn frame_size_must_match_surface() {
    let frame = FrameRenderer::new(RepoMeta::new("octo/raster"), Theme::dark())
        .render(&sample(), 0.5, ChartMode::Timeline, CanvasSize::gif(), Profile::Gif);
    let mut r = SkiaRenderer::new(CanvasSize::new(100, 100)).unwrap();
    assert!(matches!(r.paint(&frame), Err(RasterError::SizeMismatch { .. })));
}

#[test]
fn png_poster_has_signature() {
    let frame = FrameRenderer::new(RepoMeta::new("octo/raster"), Theme::light())
        .render(&sample(), 1.0, ChartMode::Date, CanvasSize::new(400, 300), Profile::Video);
    let bytes = render_png(&frame).unwrap();
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (400, 300));
}
