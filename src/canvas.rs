use std::path::Path;

use image::RgbImage;
use tracing::debug;

use crate::{error::Result, material::Color};

/// Anything a render can be written into.
///
/// Channels arrive unclamped; squeezing them into a displayable range is up
/// to the sink.
pub trait ImageSink {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    fn set_pixel(&mut self, x: u32, y: u32, r: f64, g: f64, b: f64);
}

/// A floating-point RGB framebuffer.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
}

impl Canvas {
    /// A black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::black())
    }

    /// A canvas filled with `background`, which shows wherever nothing is drawn.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Convert to 8-bit RGB, clamping every channel to `0..=1`.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            self.pixels[y as usize * self.width as usize + x as usize].into()
        })
    }

    /// Save as an image file, with the format picked from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb_image().save(path)?;
        debug!(path = %path.display(), "saved canvas");
        Ok(())
    }
}

impl ImageSink for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Out of range pixels are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, r: f64, g: f64, b: f64) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Color::new(r, g, b);
        }
    }
}

impl ImageSink for RgbImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn set_pixel(&mut self, x: u32, y: u32, r: f64, g: f64, b: f64) {
        self.put_pixel(x, y, Color::new(r, g, b).into());
    }
}
