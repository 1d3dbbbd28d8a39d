// File: crates/star-render-skia/src/lib.rs
// Summary: Skia CPU raster backend. Replays star-core display lists onto an owned surface.

use skia_safe as skia;
use thiserror::Error;

use star_core::frame::Gradient;
use star_core::geometry::{PointF, RectF};
use star_core::{CanvasSize, DrawOp, Frame, Rgba};

pub mod text;

pub use text::TextShaper;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to create {width}x{height} raster surface")]
    SurfaceUnavailable { width: i32, height: i32 },
    #[error("frame is {got:?} but surface is {want:?}")]
    SizeMismatch { got: CanvasSize, want: CanvasSize },
    #[error("pixel readback failed")]
    ReadbackFailed,
    #[error("encode PNG failed")]
    EncodeFailed,
}

/// Owns one raster surface. One export job holds one renderer exclusively.
pub struct SkiaRenderer {
    surface: skia::Surface,
    shaper: TextShaper,
    size: CanvasSize,
    draw_text: bool,
}

impl SkiaRenderer {
    pub fn new(size: CanvasSize) -> Result<Self, RasterError> {
        let surface = skia::surfaces::raster_n32_premul((size.width, size.height))
            .ok_or(RasterError::SurfaceUnavailable { width: size.width, height: size.height })?;
        tracing::debug!(width = size.width, height = size.height, "allocated raster surface");
        Ok(Self { surface, shaper: TextShaper::new(), size, draw_text: true })
    }

    /// Skip text ops (font availability differs across hosts; snapshots turn this off).
    pub fn with_text(mut self, draw_text: bool) -> Self {
        self.draw_text = draw_text;
        self
    }

    pub fn paint(&mut self, frame: &Frame) -> Result<(), RasterError> {
        if frame.size != self.size {
            return Err(RasterError::SizeMismatch { got: frame.size, want: self.size });
        }
        let canvas = self.surface.canvas();
        for op in &frame.ops {
            paint_op(canvas, &self.shaper, op, self.draw_text);
        }
        Ok(())
    }

    /// Current surface contents as tightly packed, unpremultiplied RGBA8.
    pub fn read_rgba8(&mut self) -> Result<Vec<u8>, RasterError> {
        let (w, h) = (self.size.width, self.size.height);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut px = vec![0u8; row_bytes * h as usize];
        if !self.surface.read_pixels(&info, &mut px, row_bytes, (0, 0)) {
            return Err(RasterError::ReadbackFailed);
        }
        Ok(px)
    }

    /// Paint then read back.
    pub fn render_rgba8(&mut self, frame: &Frame) -> Result<Vec<u8>, RasterError> {
        self.paint(frame)?;
        self.read_rgba8()
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>, RasterError> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RasterError::EncodeFailed)?;
        Ok(data.as_bytes().to_vec())
    }
}

/// Render one frame to PNG bytes on a throwaway surface.
pub fn render_png(frame: &Frame) -> Result<Vec<u8>, RasterError> {
    let mut r = SkiaRenderer::new(frame.size)?;
    r.paint(frame)?;
    r.encode_png()
}

// ---- helpers ----------------------------------------------------------------

#[inline]
fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

#[inline]
fn point(p: PointF) -> skia::Point {
    skia::Point::new(p.x, p.y)
}

#[inline]
fn rect(r: RectF) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn gradient_shader(g: &Gradient) -> Option<skia::Shader> {
    let colors = [color(g.start), color(g.end)];
    skia::Shader::linear_gradient(
        (point(g.from), point(g.to)),
        &colors[..],
        None::<&[f32]>,
        skia::TileMode::Clamp,
        None,
        None,
    )
}

fn solid(c: Rgba, style: skia::paint::Style, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(style);
    paint.set_stroke_width(width);
    paint.set_color(color(c));
    paint
}

fn paint_op(canvas: &skia::Canvas, shaper: &TextShaper, op: &DrawOp, draw_text: bool) {
    use skia::paint::Style;

    match op {
        DrawOp::Clear(c) => {
            canvas.clear(color(*c));
        }
        DrawOp::GradientRect { rect: r, gradient } => {
            let mut paint = solid(gradient.start, Style::Fill, 0.0);
            if let Some(shader) = gradient_shader(gradient) {
                paint.set_shader(shader);
            }
            canvas.draw_rect(rect(*r), &paint);
        }
        DrawOp::FillRect { rect: r, color: c } => {
            canvas.draw_rect(rect(*r), &solid(*c, Style::Fill, 0.0));
        }
        DrawOp::StrokeRect { rect: r, color: c, width } => {
            canvas.draw_rect(rect(*r), &solid(*c, Style::Stroke, *width));
        }
        DrawOp::Line { from, to, color: c, width } => {
            canvas.draw_line(point(*from), point(*to), &solid(*c, Style::Stroke, *width));
        }
        DrawOp::Polyline { points, width, gradient } => {
            let Some((first, rest)) = points.split_first() else { return };
            let mut path = skia::Path::new();
            path.move_to(point(*first));
            for p in rest {
                path.line_to(point(*p));
            }
            let mut stroke = solid(gradient.start, Style::Stroke, *width);
            stroke.set_stroke_cap(skia::paint::Cap::Round);
            stroke.set_stroke_join(skia::paint::Join::Round);
            if let Some(shader) = gradient_shader(gradient) {
                stroke.set_shader(shader);
            }
            canvas.draw_path(&path, &stroke);
        }
        DrawOp::Marker { center, radius, fill, ring, ring_width } => {
            canvas.draw_circle(point(*center), *radius, &solid(*fill, Style::Fill, 0.0));
            canvas.draw_circle(point(*center), *radius, &solid(*ring, Style::Stroke, *ring_width));
        }
        DrawOp::Text { text, origin, size, color: c, bold, align } => {
            if draw_text {
                shaper.draw(canvas, text, origin.x, origin.y, *size, color(*c), *bold, *align);
            }
        }
    }
}
