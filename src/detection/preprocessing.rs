use image::{Rgb, RgbImage};

/// Scale pixel brightness by `factor`, producing a new image.
///
/// Factor 1.0 is the identity; values are clamped at 255. Callers keep
/// `factor` inside [0.5, 2.0] (the slider range); out-of-range input is a
/// contract violation, not a checked error.
pub fn enhance_brightness(img: &RgbImage, factor: f32) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let scaled = pixel.0.map(|c| (c as f32 * factor).round().clamp(0.0, 255.0) as u8);
        out.put_pixel(x, y, Rgb(scaled));
    }
    out
}

/// Swap the first and third channel of every pixel (RGB↔BGR).
///
/// Pure and total; applying it twice reproduces the input exactly.
pub fn swap_channels(img: &RgbImage) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        out.put_pixel(x, y, Rgb([b, g, r]));
    }
    out
}

/// A pixel buffer already in the channel order the detector consumes.
///
/// The detector is fed BGR, so the conversion lives at the preprocessing
/// boundary and the type keeps RGB buffers from reaching inference directly.
#[derive(Debug, Clone)]
pub struct BgrImage {
    buf: RgbImage,
}

impl BgrImage {
    pub fn from_rgb(img: &RgbImage) -> Self {
        Self {
            buf: swap_channels(img),
        }
    }

    pub fn to_rgb(&self) -> RgbImage {
        swap_channels(&self.buf)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buf.dimensions()
    }

    /// The raw buffer; channels are stored B, G, R.
    pub fn buffer(&self) -> &RgbImage {
        &self.buf
    }
}
