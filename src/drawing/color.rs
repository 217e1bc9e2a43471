//! Drawable colors.
//!
//! A [`Color`] is a packed 32-bit ARGB integer: `(a << 24) | (r << 16) |
//! (g << 8) | b`, with alpha scaled from a `[0, 1]` float to `[0, 255]`.
//! The channel accessors are shift-and-mask views over the packed value, so
//! a `Color` is always 4 bytes and trivially `Copy`.
//!
//! Interpolation works component-wise in one of three color spaces (RGB,
//! HSL, HSV); each interpolated channel is rounded to the nearest integer
//! before repacking.
//!
//! The `from_random_*` constructors take `Option` components: `Some` pins a
//! component, `None` draws it uniformly.

use rand::RngExt;

// =============================================================================
// ColorSpace
// =============================================================================

/// The color space used by [`Color::interpolate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Interpolate via RGB channels.
    #[default]
    Rgb,
    /// Interpolate via HSL components.
    Hsl,
    /// Interpolate via HSV components.
    Hsv,
}

// =============================================================================
// Color
// =============================================================================

/// A drawable color, packed as 32-bit ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    value: u32,
}

impl Color {
    /// Create a color from a packed ARGB value.
    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    /// The packed ARGB value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Create a color from an alpha float in `[0, 1]` and 8-bit RGB.
    pub fn from_argb(a: f32, r: u8, g: u8, b: u8) -> Self {
        let a = (a.clamp(0.0, 1.0) * 255.0).round() as u32;
        Self::new((a << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create an opaque color from 8-bit RGB.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(1.0, r, g, b)
    }

    /// Create a color from alpha, hue in `[0, 360)`, saturation and
    /// lightness in `[0, 1]`.
    pub fn from_ahsl(a: f32, h: f32, s: f32, l: f32) -> Self {
        let (r, g, b) = hsl_to_rgb(h as f64, s as f64, l as f64);
        Self::from_argb(a, r, g, b)
    }

    /// Create an opaque color from HSL components.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        Self::from_ahsl(1.0, h, s, l)
    }

    /// Create a color from alpha, hue in `[0, 360)`, saturation and
    /// brightness in `[0, 1]`.
    pub fn from_ahsv(a: f32, h: f32, s: f32, v: f32) -> Self {
        let (r, g, b) = hsv_to_rgb(h as f64, s as f64, v as f64);
        Self::from_argb(a, r, g, b)
    }

    /// Create an opaque color from HSV components.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        Self::from_ahsv(1.0, h, s, v)
    }

    /// A uniformly random color, including alpha.
    ///
    /// Often garish; [`Color::from_random_hsv`] with pinned saturation and
    /// brightness gives more usable palettes.
    pub fn from_random() -> Self {
        Self::new(rand::rng().random::<u32>())
    }

    /// A partially random ARGB color: `Some` pins a component, `None` draws
    /// it uniformly.
    pub fn from_random_argb(a: Option<f32>, r: Option<u8>, g: Option<u8>, b: Option<u8>) -> Self {
        let mut rng = rand::rng();
        Self::from_argb(
            a.unwrap_or_else(|| rng.random()),
            r.unwrap_or_else(|| rng.random()),
            g.unwrap_or_else(|| rng.random()),
            b.unwrap_or_else(|| rng.random()),
        )
    }

    /// An opaque partially random RGB color.
    pub fn from_random_rgb(r: Option<u8>, g: Option<u8>, b: Option<u8>) -> Self {
        Self::from_random_argb(Some(1.0), r, g, b)
    }

    /// A partially random AHSL color: hue drawn in `[0, 360)`, the rest in
    /// `[0, 1)`.
    pub fn from_random_ahsl(a: Option<f32>, h: Option<f32>, s: Option<f32>, l: Option<f32>) -> Self {
        let mut rng = rand::rng();
        Self::from_ahsl(
            a.unwrap_or_else(|| rng.random()),
            h.unwrap_or_else(|| rng.random_range(0.0..360.0)),
            s.unwrap_or_else(|| rng.random()),
            l.unwrap_or_else(|| rng.random()),
        )
    }

    /// An opaque partially random HSL color.
    pub fn from_random_hsl(h: Option<f32>, s: Option<f32>, l: Option<f32>) -> Self {
        Self::from_random_ahsl(Some(1.0), h, s, l)
    }

    /// A partially random AHSV color: hue drawn in `[0, 360)`, the rest in
    /// `[0, 1)`.
    pub fn from_random_ahsv(a: Option<f32>, h: Option<f32>, s: Option<f32>, v: Option<f32>) -> Self {
        let mut rng = rand::rng();
        Self::from_ahsv(
            a.unwrap_or_else(|| rng.random()),
            h.unwrap_or_else(|| rng.random_range(0.0..360.0)),
            s.unwrap_or_else(|| rng.random()),
            v.unwrap_or_else(|| rng.random()),
        )
    }

    /// An opaque partially random HSV color.
    pub fn from_random_hsv(h: Option<f32>, s: Option<f32>, v: Option<f32>) -> Self {
        Self::from_random_ahsv(Some(1.0), h, s, v)
    }

    /// Alpha in `[0, 1]`.
    #[inline]
    pub fn a(self) -> f32 {
        (self.value >> 24 & 0xFF) as f32 / 255.0
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.value >> 16 & 0xFF) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.value >> 8 & 0xFF) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.value & 0xFF) as u8
    }

    /// Linear interpolation between two colors at point `p` in `[0, 1]`.
    ///
    /// Components are interpolated in the requested color space; alpha is
    /// interpolated linearly in every space. `p` is clamped, and the
    /// endpoints return `c1`/`c2` exactly.
    pub fn interpolate(c1: Self, c2: Self, p: f32, space: ColorSpace) -> Self {
        if p <= 0.0 {
            return c1;
        }
        if p >= 1.0 {
            return c2;
        }

        let p = p as f64;
        let a = lerp(c1.a() as f64, c2.a() as f64, p) as f32;

        match space {
            ColorSpace::Rgb => Self::from_argb(
                a,
                lerp(c1.r() as f64, c2.r() as f64, p).round() as u8,
                lerp(c1.g() as f64, c2.g() as f64, p).round() as u8,
                lerp(c1.b() as f64, c2.b() as f64, p).round() as u8,
            ),
            ColorSpace::Hsl => {
                let (h1, s1, l1) = rgb_to_hsl(c1.r(), c1.g(), c1.b());
                let (h2, s2, l2) = rgb_to_hsl(c2.r(), c2.g(), c2.b());
                Self::from_ahsl(
                    a,
                    lerp(h1, h2, p) as f32,
                    lerp(s1, s2, p) as f32,
                    lerp(l1, l2, p) as f32,
                )
            }
            ColorSpace::Hsv => {
                let (h1, s1, v1) = rgb_to_hsv(c1.r(), c1.g(), c1.b());
                let (h2, s2, v2) = rgb_to_hsv(c2.r(), c2.g(), c2.b());
                Self::from_ahsv(
                    a,
                    lerp(h1, h2, p) as f32,
                    lerp(s1, s2, p) as f32,
                    lerp(v1, v2, p) as f32,
                )
            }
        }
    }
}

// =============================================================================
// Color space conversions
// =============================================================================

#[inline]
fn lerp(a: f64, b: f64, p: f64) -> f64 {
    a + (b - a) * p
}

/// RGB to (hue degrees, saturation, lightness).
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    (hue_of(r, g, b, max, delta), s, l)
}

/// (hue degrees, saturation, lightness) to RGB.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;
    pack_hue(h, c, m)
}

/// RGB to (hue degrees, saturation, value).
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return (0.0, 0.0, max);
    }

    (hue_of(r, g, b, max, delta), delta / max, max)
}

/// (hue degrees, saturation, value) to RGB.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let c = v * s;
    let m = v - c;
    pack_hue(h, c, m)
}

/// Hue angle in degrees for normalized channels.
fn hue_of(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h * 60.0
}

/// Expand (hue, chroma, match) into rounded 8-bit RGB.
fn pack_hue(h: f64, c: f64, m: f64) -> (u8, u8, u8) {
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    )
}
