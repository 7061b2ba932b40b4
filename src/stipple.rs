//! Stippled texture generator.
//!
//! Fills a canvas with a flat base color, then scatters a few thousand small
//! discs whose colors are jittered around the base. The result reads as a
//! mottled, noise-like surface once mapped onto geometry.

use crate::error::Error;
use crate::types::{BaseColor, Canvas, Dot};
use image::Rgba;
use rand::Rng;
use std::ops::Range;

pub const DEFAULT_SIZE: u32 = 512;
pub const DEFAULT_DOT_COUNT: usize = 4000;
pub const DEFAULT_RADIUS: Range<f32> = 3.0..6.0;
pub const DEFAULT_JITTER: f32 = 0.02;

/// Scale from a normalized channel to dot intensity. Dots use 256, the
/// background uses 255 (see `BaseColor::to_rgba8`).
const DOT_SCALE: f32 = 256.0;

/// Knobs for one generation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct StippleParams {
    pub dot_count: usize,
    /// Radius range in pixels, sampled as [start, end).
    pub radius: Range<f32>,
    /// Per-channel jitter half-width; noise is sampled from [-jitter, jitter).
    /// Zero means every dot takes the exact base color.
    pub jitter: f32,
}

impl Default for StippleParams {
    fn default() -> Self {
        Self {
            dot_count: DEFAULT_DOT_COUNT,
            radius: DEFAULT_RADIUS,
            jitter: DEFAULT_JITTER,
        }
    }
}

/// Uniform in [min, max). Degenerate or reversed ranges never panic:
/// min == max gives min, max < min samples (max, min].
#[inline]
fn range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.r#gen::<f32>()
}

impl Dot {
    /// Sample one dot. Draw order from `rng`: x, y, radius, then r/g/b jitter.
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        base: BaseColor,
        width: u32,
        height: u32,
        params: &StippleParams,
    ) -> Self {
        let x = range(rng, 0.0, width as f32);
        let y = range(rng, 0.0, height as f32);
        let radius = range(rng, params.radius.start, params.radius.end);

        let mut fill = base.channels();
        for c in &mut fill {
            let noise = range(rng, -params.jitter, params.jitter);
            *c = (*c + noise) * DOT_SCALE;
        }

        Self { x, y, radius, fill }
    }
}

/// Generate a texture using the thread-local RNG and default params.
/// Two calls with the same inputs give similar-looking but different pixels.
pub fn generate(color: BaseColor, width: u32, height: u32) -> Result<Canvas, Error> {
    generate_with_rng(
        &mut rand::thread_rng(),
        color,
        width,
        height,
        &StippleParams::default(),
    )
}

/// Generate a texture from an injected random source.
/// With a seeded RNG the output is reproducible pixel for pixel.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    color: BaseColor,
    width: u32,
    height: u32,
    params: &StippleParams,
) -> Result<Canvas, Error> {
    tracing::debug!(width, height, dots = params.dot_count, ?color, "generating stipple texture");

    let mut canvas = Canvas::allocate(width, height).inspect_err(|e| {
        tracing::warn!(width, height, error = %e, "no surface for stipple texture");
    })?;

    /* 1) Flat background.
       Visual: the whole texture is the base color. */
    let background = color.to_rgba8();
    for px in canvas.image_mut().pixels_mut() {
        *px = background;
    }

    /* 2) Scatter dots on top; later ones overwrite earlier ones.
       Visual: small speckles a shade lighter/darker than the base. */
    for _ in 0..params.dot_count {
        let dot = Dot::sample(rng, color, width, height, params);
        fill_disc(&mut canvas, dot.x, dot.y, dot.radius, dot.to_rgba8());
    }

    tracing::debug!(width, height, "stipple texture done");
    Ok(canvas)
}

/// Draw a solid disc centered at (cx,cy). A pixel is covered when its center
/// lies within `radius`. Anything off-canvas is clipped.
pub fn fill_disc(canvas: &mut Canvas, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    if radius.is_nan() || radius <= 0.0 {
        return;
    }
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let r2 = radius * radius;

    // Scan just the bounding box, clamped to the canvas
    let x0 = ((cx - radius).floor() as i64).max(0);
    let x1 = ((cx + radius).ceil() as i64).min(w - 1);
    let y0 = ((cy - radius).floor() as i64).max(0);
    let y1 = ((cy + radius).ceil() as i64).min(h - 1);

    let img = canvas.image_mut();
    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - cy;
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
