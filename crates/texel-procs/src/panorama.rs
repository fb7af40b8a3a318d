/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Panoramic environment strip synthesis
//!
//! Expands a texture into a wide canvas suitable for wrapping around a
//! cylinder or sphere:
//!
//! 1. Scale the source to the canvas height, preserving aspect ratio.
//! 2. Center the scaled copy and fill the rest of the canvas by
//!    mirror-tiling it, each repetition horizontally flipped relative
//!    to its neighbor so the strip has no vertical seams.
//! 3. Scale RGB intensity and optionally soften with a box blur, so the
//!    strip reads as ambient lighting rather than literal texture.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

use crate::box_blur::box_blur_plane;
use crate::resize::bilinear_rgba;

/// Synthesize a mirror-tiled panorama strip from a texture
///
/// `intensity` multiplies the color channels (negative values clamp to
/// zero), `blur_radius` softens the result after tiling.
pub struct Panorama {
    width:       usize,
    height:      usize,
    intensity:   f32,
    blur_radius: usize
}

impl Panorama {
    #[must_use]
    pub fn new(width: usize, height: usize, intensity: f32, blur_radius: usize) -> Panorama {
        Panorama {
            width,
            height,
            intensity,
            blur_radius
        }
    }
}

impl OperationsTrait for Panorama {
    fn name(&self) -> &'static str {
        "panorama synthesis"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterErrors::InvalidDimensions(self.width, self.height));
        }

        let (in_width, in_height) = image.dimensions();

        // fit the source to the canvas height, keeping aspect ratio
        let scale = self.height as f32 / in_height as f32;
        let scaled_width = ((in_width as f32 * scale).round() as usize).max(1);

        let scaled = if (scaled_width, self.height) == (in_width, in_height) {
            image.clone()
        } else {
            bilinear_rgba(image, scaled_width, self.height)
        };

        let mut out = RasterBuffer::new(self.width, self.height);

        // center the first copy, tile outward with alternating flips.
        // The mapping is a ping-pong over a period of two widths, so
        // adjacent copies share their boundary column and no seam shows.
        let x0 = (self.width as isize - scaled_width as isize) / 2;
        let period = (2 * scaled_width) as isize;
        let src = scaled.pixels();
        let dst = out.pixels_mut();

        for y in 0..self.height {
            let src_row = y * scaled_width * 4;
            let dst_row = y * self.width * 4;

            for x in 0..self.width {
                let mut t = (x as isize - x0).rem_euclid(period) as usize;
                if t >= scaled_width {
                    t = 2 * scaled_width - 1 - t;
                }

                let src_offset = src_row + t * 4;
                let dst_offset = dst_row + x * 4;

                dst[dst_offset..dst_offset + 4].copy_from_slice(&src[src_offset..src_offset + 4]);
            }
        }

        let intensity = self.intensity.max(0.0);

        if (intensity - 1.0).abs() > f32::EPSILON {
            for pix in out.pixels_mut().chunks_exact_mut(4) {
                for channel in pix.iter_mut().take(3) {
                    *channel = (f32::from(*channel) * intensity).round().clamp(0.0, 255.0) as u8;
                }
            }
        }

        if self.blur_radius > 0 {
            let mut scratch = vec![0_u8; self.width * self.height];

            for channel in 0..3 {
                let mut plane = out.plane(channel);

                box_blur_plane(&mut plane, &mut scratch, self.width, self.height, self.blur_radius);
                out.set_plane(channel, &plane);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use texel_core::buffer::RasterBuffer;
    use texel_core::traits::OperationsTrait;

    use crate::panorama::Panorama;

    #[test]
    fn zero_canvas_is_rejected() {
        let image = RasterBuffer::fill(4, 4, [10, 20, 30, 255]);

        assert!(Panorama::new(0, 4, 1.0, 0).execute(&image).is_err());
        assert!(Panorama::new(4, 0, 1.0, 0).execute(&image).is_err());
    }

    // a same-size canvas with neutral intensity and no blur is identity
    #[test]
    fn same_size_neutral_settings_are_identity() {
        let image = RasterBuffer::from_fn(6, 6, |x, y, pix| {
            pix[0] = (x * 40) as u8;
            pix[1] = (y * 40) as u8;
            pix[3] = 255;
        });
        let out = Panorama::new(6, 6, 1.0, 0).execute(&image).unwrap();

        assert!(out == image);
    }

    #[test]
    fn tiling_mirrors_around_the_center_copy() {
        // 2 wide source: columns A B. On an 8 wide canvas the center
        // copy sits at x = 3..=4, its neighbors are flipped, and every
        // copy boundary repeats the shared column
        let image = RasterBuffer::from_fn(2, 1, |x, _, pix| {
            pix[0] = if x == 0 { 10 } else { 200 };
            pix[3] = 255;
        });
        let out = Panorama::new(8, 1, 1.0, 0).execute(&image).unwrap();

        let row: Vec<u8> = (0..8).map(|x| out.pixel(x, 0)[0]).collect();
        assert_eq!(row, vec![200, 200, 10, 10, 200, 200, 10, 10]);
    }

    #[test]
    fn adjacent_copies_share_boundary_columns() {
        let image = RasterBuffer::from_fn(5, 3, |x, y, pix| {
            pix[0] = (x * 50) as u8;
            pix[1] = (y * 80) as u8;
            pix[3] = 255;
        });
        let out = Panorama::new(25, 3, 1.0, 0).execute(&image).unwrap();

        // center copy spans 10..=14; its mirror to the right starts at 15
        for y in 0..3 {
            assert_eq!(out.pixel(14, y), out.pixel(15, y));
            assert_eq!(out.pixel(10, y), out.pixel(9, y));
        }
    }

    #[test]
    fn intensity_scales_color_but_not_alpha() {
        let image = RasterBuffer::fill(4, 4, [100, 50, 200, 255]);
        let out = Panorama::new(4, 4, 0.5, 0).execute(&image).unwrap();

        assert!(out.pixels().chunks_exact(4).all(|p| p == [50, 25, 100, 255]));
    }

    #[test]
    fn negative_intensity_clamps_to_black() {
        let image = RasterBuffer::fill(4, 4, [100, 50, 200, 255]);
        let out = Panorama::new(4, 4, -3.0, 0).execute(&image).unwrap();

        assert!(out.pixels().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn source_is_scaled_to_canvas_height() {
        let image = RasterBuffer::fill(3, 9, [60, 70, 80, 255]);
        let out = Panorama::new(10, 3, 1.0, 0).execute(&image).unwrap();

        // flat input stays flat through scaling, tiling and no blur
        assert_eq!(out.dimensions(), (10, 3));
        assert!(out.pixels().chunks_exact(4).all(|p| p == [60, 70, 80, 255]));
    }
}
