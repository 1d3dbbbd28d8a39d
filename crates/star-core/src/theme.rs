// File: crates/star-core/src/theme.rs
// Summary: Light/Dark theming for frame colors (backend-neutral RGBA).

use serde::Serialize;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a } }
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    /// `0xRRGGBB`, opaque.
    pub const fn hex(v: u32) -> Self {
        Self::rgb(((v >> 16) & 0xff) as u8, ((v >> 8) & 0xff) as u8, (v & 0xff) as u8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub canvas: Rgba,
    pub background_start: Rgba,
    pub background_end: Rgba,
    pub panel: Rgba,
    pub panel_border: Rgba,
    pub grid: Rgba,
    pub title: Rgba,
    pub subtitle: Rgba,
    pub tick_label: Rgba,
    pub line_start: Rgba,
    pub line_end: Rgba,
    pub marker: Rgba,
    pub marker_ring: Rgba,
    pub counter: Rgba,
    pub info: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            canvas: Rgba::hex(0xffffff),
            background_start: Rgba::hex(0xf8fafc), // slate-50
            background_end: Rgba::hex(0xe2e8f0),   // slate-200
            panel: Rgba::hex(0xffffff),
            panel_border: Rgba::hex(0xe2e8f0),
            grid: Rgba::hex(0xf1f5f9),
            title: Rgba::hex(0x1e293b),
            subtitle: Rgba::hex(0x64748b),
            tick_label: Rgba::hex(0x94a3b8),
            line_start: Rgba::hex(0x3b82f6), // blue
            line_end: Rgba::hex(0x8b5cf6),   // violet
            marker: Rgba::hex(0x3b82f6),
            marker_ring: Rgba::hex(0xffffff),
            counter: Rgba::hex(0x1e293b),
            info: Rgba::hex(0x64748b),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            canvas: Rgba::from_argb(255, 18, 18, 20),
            background_start: Rgba::from_argb(255, 18, 18, 20),
            background_end: Rgba::from_argb(255, 30, 30, 38),
            panel: Rgba::from_argb(255, 24, 24, 28),
            panel_border: Rgba::from_argb(255, 60, 60, 70),
            grid: Rgba::from_argb(255, 40, 40, 45),
            title: Rgba::from_argb(255, 235, 235, 245),
            subtitle: Rgba::from_argb(255, 150, 150, 160),
            tick_label: Rgba::from_argb(255, 120, 120, 130),
            line_start: Rgba::from_argb(255, 64, 160, 255),
            line_end: Rgba::from_argb(255, 167, 139, 250),
            marker: Rgba::from_argb(255, 64, 160, 255),
            marker_ring: Rgba::from_argb(255, 18, 18, 20),
            counter: Rgba::from_argb(255, 235, 235, 245),
            info: Rgba::from_argb(255, 150, 150, 160),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_default()
}
