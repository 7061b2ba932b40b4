// Core types shared by the generator, the preview window and the CLI.

use crate::error::Error;
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::str::FromStr;

/// Base color of a texture, one normalized f32 per channel.
/// Channels are expected in [0,1] but anything finite is accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BaseColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Solid fill used for the background: round(c * 255), clamped.
    /// Visual: (1,0,0) becomes pure red 255,0,0.
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let q = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba([q(self.r), q(self.g), q(self.b), 255])
    }
}

impl FromStr for BaseColor {
    type Err = Error;

    /// Accepts `r,g,b` floats (`1,0,0`, `0.2, 0.5, 0.1`) or hex `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(Error::InvalidColor(format!("expected #rrggbb, got '{s}'")));
            }
            let mut ch = [0.0f32; 3];
            for (i, c) in ch.iter_mut().enumerate() {
                let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                    .map_err(|e| Error::InvalidColor(format!("'{s}': {e}")))?;
                *c = byte as f32 / 255.0;
            }
            return Ok(Self::new(ch[0], ch[1], ch[2]));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidColor(format!(
                "expected 3 comma-separated channels, got '{s}'"
            )));
        }
        let mut ch = [0.0f32; 3];
        for (c, part) in ch.iter_mut().zip(&parts) {
            let v: f32 = part
                .parse()
                .map_err(|e| Error::InvalidColor(format!("'{part}': {e}")))?;
            if !v.is_finite() {
                return Err(Error::InvalidColor(format!("channel '{part}' is not finite")));
            }
            *c = v;
        }
        Ok(Self::new(ch[0], ch[1], ch[2]))
    }
}

/// One stipple dot, sampled and drawn immediately, never kept.
#[derive(Clone, Copy, Debug)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// (base + jitter) * 256 per channel, NOT clamped; may leave 0..=255.
    pub fill: [f32; 3],
}

impl Dot {
    /// Quantize the raw fill for an 8-bit raster (round, then clamp).
    pub fn to_rgba8(&self) -> Rgba<u8> {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        Rgba([q(self.fill[0]), q(self.fill[1]), q(self.fill[2]), 255])
    }
}

/// The generated texture. Owned by the caller once returned.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a zeroed width x height RGBA surface, or fail loudly.
    /// Never hands back a partial buffer.
    pub fn allocate(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceUnavailable(format!(
                "{width}x{height} surface has no pixels"
            )));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                Error::SurfaceUnavailable(format!("{width}x{height} RGBA size overflows"))
            })?;

        let mut raw: Vec<u8> = Vec::new();
        raw.try_reserve_exact(len)
            .map_err(|e| Error::SurfaceUnavailable(format!("{width}x{height}: {e}")))?;
        raw.resize(len, 0);

        let image = RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
            Error::SurfaceUnavailable(format!("{width}x{height}: buffer size mismatch"))
        })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA at (x,y). Panics if out of bounds, like `image::ImageBuffer`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Write to disk; format is picked from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.image.save(path.as_ref())?;
        Ok(())
    }

    /// Pack every pixel as 0x00RRGGBB for the preview window (alpha dropped).
    pub fn to_frame_buffer(&self) -> FrameBuffer {
        let (w, h) = self.image.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for pixel in self.image.pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            out.push((r << 16) | (g << 8) | b);
        }
        FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels: out,
        }
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}
