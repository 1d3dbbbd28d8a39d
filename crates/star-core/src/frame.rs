// File: crates/star-core/src/frame.rs
// Summary: Pure frame renderer; turns (series, progress, mode, canvas, profile) into a display list.
// Notes:
// - No clock, randomness, or backend state is consulted; identical inputs give
//   identical `Frame`s.
// - Backends (Skia raster) only replay `DrawOp`s; they never re-derive layout.

use serde::Serialize;

use crate::format;
use crate::geometry::{PointF, RectF};
use crate::grid::band_dividers;
use crate::mapper::{ChartMode, SeriesBounds};
use crate::scale::PlotScale;
use crate::theme::{Rgba, Theme};
use crate::types::{CanvasSize, Insets, RepoMeta, Series};

/// Reveal schedule (and default resolution) of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Profile {
    /// Step reveal; the counter jumps from record to record.
    Video,
    /// 10% hold on the first record, then a reveal with an interpolated counter.
    Gif,
}

/// Share of a GIF spent holding on the first record.
pub const GIF_HOLD: f64 = 0.1;

/// How much of the series a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Reveal {
    /// Number of leading records drawn; `1..=n`.
    pub visible_count: usize,
    /// Counter value; fractional while a GIF interpolates between records.
    pub displayed_count: f64,
}

impl Reveal {
    /// Counter value as shown in the label.
    pub fn label_count(&self) -> u64 {
        self.displayed_count.round().max(0.0) as u64
    }
}

impl Profile {
    pub fn canvas(self) -> CanvasSize {
        match self {
            Profile::Video => CanvasSize::video(),
            Profile::Gif => CanvasSize::gif(),
        }
    }

    pub fn reveal(self, series: &Series, progress: f64) -> Reveal {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let records = series.records();
        let n = records.len();
        let count_at = |i: usize| records[i].count as f64;
        match self {
            Profile::Video => {
                let visible = ((n as f64 * progress).floor() as usize).clamp(1, n);
                Reveal { visible_count: visible, displayed_count: count_at(visible - 1) }
            }
            Profile::Gif if progress < GIF_HOLD => Reveal { visible_count: 1, displayed_count: count_at(0) },
            Profile::Gif => {
                let p = (progress - GIF_HOLD) / (1.0 - GIF_HOLD);
                let visible = ((n as f64 * p).ceil() as usize).clamp(1, n);
                if visible >= n {
                    return Reveal { visible_count: n, displayed_count: count_at(n - 1) };
                }
                let f = (n - 1) as f64 * p;
                let lower = f.floor() as usize;
                let upper = (lower + 1).min(n - 1);
                let frac = f - lower as f64;
                let shown = count_at(lower) + (count_at(upper) - count_at(lower)) * frac;
                Reveal { visible_count: visible, displayed_count: shown }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Two-stop linear gradient between pixel positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Gradient {
    pub from: PointF,
    pub to: PointF,
    pub start: Rgba,
    pub end: Rgba,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DrawOp {
    Clear(Rgba),
    GradientRect { rect: RectF, gradient: Gradient },
    FillRect { rect: RectF, color: Rgba },
    StrokeRect { rect: RectF, color: Rgba, width: f32 },
    Line { from: PointF, to: PointF, color: Rgba, width: f32 },
    /// Open polyline with round caps and joins.
    Polyline { points: Vec<PointF>, width: f32, gradient: Gradient },
    /// Filled disc with a ring stroke.
    Marker { center: PointF, radius: f32, fill: Rgba, ring: Rgba, ring_width: f32 },
    /// `origin.y` is the baseline.
    Text { text: String, origin: PointF, size: f32, color: Rgba, bold: bool, align: TextAlign },
}

/// One drawable frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub size: CanvasSize,
    pub reveal: Reveal,
    pub ops: Vec<DrawOp>,
}

impl Frame {
    /// Marker centers, in draw order.
    pub fn markers(&self) -> impl Iterator<Item = PointF> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Marker { center, .. } => Some(*center),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

const GRID_BANDS: usize = 10;
const Y_TICKS: usize = 5;

/// Renders frames for one subject. Holds only static inputs.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    pub meta: RepoMeta,
    pub theme: Theme,
    pub subtitle: String,
}

impl FrameRenderer {
    pub fn new(meta: RepoMeta, theme: Theme) -> Self {
        Self { meta, theme, subtitle: "Star Growth History".to_string() }
    }

    /// Plot rectangle for a canvas.
    pub fn plot_rect(canvas: CanvasSize) -> RectF {
        let insets = Insets::for_canvas(canvas);
        RectF::from_ltrb(
            insets.left,
            insets.top,
            canvas.width as f32 - insets.right,
            canvas.height as f32 - insets.bottom,
        )
    }

    /// The scale a canvas uses for `series`. Interactive views call this too.
    pub fn plot_scale(series: &Series, mode: ChartMode, canvas: CanvasSize) -> PlotScale {
        PlotScale::new(Self::plot_rect(canvas), mode, SeriesBounds::of(series))
    }

    pub fn render(&self, series: &Series, progress: f64, mode: ChartMode, canvas: CanvasSize, profile: Profile) -> Frame {
        let reveal = profile.reveal(series, progress);
        let scale = Self::plot_scale(series, mode, canvas);
        let w = canvas.width as f32;
        let h = canvas.height as f32;
        // Layout units are authored against a 1080px-tall canvas.
        let u = h / 1080.0;
        let t = &self.theme;

        let mut ops = Vec::with_capacity(32 + 2 * reveal.visible_count);

        // Background
        ops.push(DrawOp::Clear(t.canvas));
        ops.push(DrawOp::GradientRect {
            rect: RectF::from_ltwh(0.0, 0.0, w, h),
            gradient: Gradient { from: PointF::new(0.0, 0.0), to: PointF::new(w, h), start: t.background_start, end: t.background_end },
        });

        // Title block
        ops.push(text(&self.meta.repo, (w / 2.0, 120.0 * u), 72.0 * u, t.title, true, TextAlign::Center));
        ops.push(text(&self.subtitle, (w / 2.0, 180.0 * u), 36.0 * u, t.subtitle, false, TextAlign::Center));

        self.push_plot_frame(&mut ops, &scale, u);
        self.push_axis_labels(&mut ops, &scale, u);
        self.push_data(&mut ops, series, &scale, reveal, u);

        // Counter + static context
        ops.push(text(&format::counter_label(reveal.label_count()), (w / 2.0, h - 150.0 * u), 64.0 * u, t.counter, true, TextAlign::Center));
        if let Some(info) = format::info_line(&self.meta.language, self.meta.created_at) {
            ops.push(text(&info, (w / 2.0, h - 80.0 * u), 32.0 * u, t.info, false, TextAlign::Center));
        }

        Frame { size: canvas, reveal, ops }
    }

    fn push_plot_frame(&self, ops: &mut Vec<DrawOp>, scale: &PlotScale, u: f32) {
        let plot = scale.plot;
        ops.push(DrawOp::FillRect { rect: plot, color: self.theme.panel });
        ops.push(DrawOp::StrokeRect { rect: plot, color: self.theme.panel_border, width: 2.0 * u });
        for y in band_dividers(plot.top as f64, plot.bottom as f64, GRID_BANDS) {
            let y = y as f32;
            ops.push(DrawOp::Line {
                from: PointF::new(plot.left, y),
                to: PointF::new(plot.right, y),
                color: self.theme.grid,
                width: 1.0 * u,
            });
        }
    }

    fn push_axis_labels(&self, ops: &mut Vec<DrawOp>, scale: &PlotScale, u: f32) {
        let plot = scale.plot;
        let size = 20.0 * u;
        let color = self.theme.tick_label;

        let max = scale.bounds.max_count;
        for i in 0..Y_TICKS {
            let value = max as f64 * i as f64 / (Y_TICKS - 1) as f64;
            let y = scale.count_px(value) + size * 0.35;
            ops.push(text(&format::compact(value.round() as u64), (plot.left - 12.0 * u, y), size, color, false, TextAlign::Right));
        }

        let (start, end) = match scale.mode {
            ChartMode::Date => (format::month_year(scale.bounds.first), format::month_year(scale.bounds.last)),
            ChartMode::Timeline => (format::elapsed_days(0), format::elapsed_days(scale.bounds.span_days())),
        };
        let y = plot.bottom + 32.0 * u;
        ops.push(text(&start, (plot.left, y), size, color, false, TextAlign::Left));
        if scale.bounds.span_days() > 0 {
            ops.push(text(&end, (plot.right, y), size, color, false, TextAlign::Right));
        }
    }

    fn push_data(&self, ops: &mut Vec<DrawOp>, series: &Series, scale: &PlotScale, reveal: Reveal, u: f32) {
        let t = &self.theme;
        let points: Vec<PointF> = series.records()[..reveal.visible_count].iter().map(|r| scale.record_px(r)).collect();

        if points.len() > 1 {
            let plot = scale.plot;
            ops.push(DrawOp::Polyline {
                points: points.clone(),
                width: 6.0 * u,
                gradient: Gradient { from: PointF::new(plot.left, 0.0), to: PointF::new(plot.right, 0.0), start: t.line_start, end: t.line_end },
            });
        }
        for center in points {
            ops.push(DrawOp::Marker { center, radius: 8.0 * u, fill: t.marker, ring: t.marker_ring, ring_width: 3.0 * u });
        }
    }
}

fn text(s: &str, origin: (f32, f32), size: f32, color: Rgba, bold: bool, align: TextAlign) -> DrawOp {
    DrawOp::Text { text: s.to_string(), origin: origin.into(), size, color, bold, align }
}
