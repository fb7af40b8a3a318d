/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single raster image
//!
//! A raster is represented as
//!
//! - an interleaved RGBA8 pixel sequence
//!     - row major, top to bottom
//!         - with a known width and height
//!
//! And that's how we represent images.
//!
//! Operators take a buffer by shared reference and return a freshly
//! allocated buffer, they never mutate their input. In-place passes are
//! only ever run on an operator's own scratch copy.
use crate::errors::RasterErrors;

/// Number of samples per pixel, RGBA8
pub const CHANNELS: usize = 4;

/// A single RGBA8 image
///
/// Invariant: `pixels.len() == width * height * 4`, enforced on
/// construction and preserved by every accessor.
#[derive(Clone, Eq, PartialEq)]
pub struct RasterBuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl RasterBuffer {
    /// Create a buffer with every sample, alpha included, set to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> RasterBuffer {
        RasterBuffer {
            width,
            height,
            pixels: vec![0; width * height * CHANNELS]
        }
    }

    /// Create a buffer filled with a single RGBA color
    #[must_use]
    pub fn fill(width: usize, height: usize, color: [u8; CHANNELS]) -> RasterBuffer {
        let mut pixels = vec![0; width * height * CHANNELS];

        for pix in pixels.chunks_exact_mut(CHANNELS) {
            pix.copy_from_slice(&color);
        }
        RasterBuffer {
            width,
            height,
            pixels
        }
    }

    /// Create a buffer by calling `func` for every `(x, y)` coordinate,
    /// letting it fill in the RGBA quadruple for that position
    pub fn from_fn<F>(width: usize, height: usize, mut func: F) -> RasterBuffer
    where
        F: FnMut(usize, usize, &mut [u8; CHANNELS])
    {
        let mut pixels = vec![0; width * height * CHANNELS];

        for (y, row) in pixels.chunks_exact_mut(width * CHANNELS).enumerate() {
            for (x, pix) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let mut rgba = [0; CHANNELS];
                func(x, y, &mut rgba);
                pix.copy_from_slice(&rgba);
            }
        }
        RasterBuffer {
            width,
            height,
            pixels
        }
    }

    /// Wrap an existing pixel sequence, e.g. one handed over by an
    /// external decoder.
    ///
    /// # Errors
    /// Returns [`RasterErrors::DimensionsMismatch`] when the slice length
    /// does not equal `width * height * 4`.
    pub fn from_pixels(
        width: usize, height: usize, pixels: Vec<u8>
    ) -> Result<RasterBuffer, RasterErrors> {
        let expected = width * height * CHANNELS;

        if pixels.len() != expected {
            return Err(RasterErrors::DimensionsMismatch(expected, pixels.len()));
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels
        })
    }

    /// Get image dimensions as a tuple of (width, height)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the interleaved RGBA8 samples
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Return a mutable view into the interleaved RGBA8 samples
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer, returning the pixel sequence for hand-off
    /// to an external encoder
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Fetch the RGBA quadruple at `(x, y)`
    ///
    /// # Panics
    /// When `x >= width` or `y >= height`
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");

        let offset = (y * self.width + x) * CHANNELS;
        let mut rgba = [0; CHANNELS];

        rgba.copy_from_slice(&self.pixels[offset..offset + CHANNELS]);
        rgba
    }

    /// De-interleave a single channel (0=R, 1=G, 2=B, 3=A) into its own
    /// contiguous plane
    ///
    /// # Panics
    /// When `channel >= 4`
    #[must_use]
    pub fn plane(&self, channel: usize) -> Vec<u8> {
        assert!(channel < CHANNELS, "channel out of bounds");

        self.pixels
            .iter()
            .skip(channel)
            .step_by(CHANNELS)
            .copied()
            .collect()
    }

    /// Interleave a contiguous plane back into a single channel
    ///
    /// # Panics
    /// When `channel >= 4` or `plane.len() != width * height`
    pub fn set_plane(&mut self, channel: usize, plane: &[u8]) {
        assert!(channel < CHANNELS, "channel out of bounds");
        assert_eq!(
            plane.len(),
            self.width * self.height,
            "plane length does not match dimensions"
        );

        for (dst, src) in self
            .pixels
            .iter_mut()
            .skip(channel)
            .step_by(CHANNELS)
            .zip(plane)
        {
            *dst = *src;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::RasterBuffer;

    #[test]
    fn from_pixels_validates_length() {
        assert!(RasterBuffer::from_pixels(2, 2, vec![0; 16]).is_ok());
        assert!(RasterBuffer::from_pixels(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn pixel_lookup() {
        let image = RasterBuffer::from_fn(3, 2, |x, y, pix| {
            pix[0] = x as u8;
            pix[1] = y as u8;
            pix[3] = 255;
        });
        assert_eq!(image.pixel(2, 1), [2, 1, 0, 255]);
    }

    #[test]
    fn plane_round_trip() {
        let mut image = RasterBuffer::fill(4, 4, [1, 2, 3, 4]);
        let green = image.plane(1);

        assert!(green.iter().all(|x| *x == 2));

        image.set_plane(1, &[9; 16]);
        assert_eq!(image.pixel(0, 0), [1, 9, 3, 4]);
    }
}
