/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel edge-magnitude preprocessor
//!
//! Reduces the image to BT.601 luminance and writes the Sobel gradient
//! magnitude into RGB. The one-pixel border is left at zero, the 3x3
//! window has no full support there and a black ring is less misleading
//! than replicated-edge gradients.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

use crate::sobel::{SOBEL_X, SOBEL_Y};

/// Produce a grayscale edge map of the image
///
/// Typically run as a pre-pass before [`NormalMap`](crate::normal_map::NormalMap)
/// or as a mask input for blending filters.
#[derive(Default)]
pub struct EdgeMap;

impl EdgeMap {
    #[must_use]
    pub fn new() -> EdgeMap {
        EdgeMap
    }
}

impl OperationsTrait for EdgeMap {
    fn name(&self) -> &'static str {
        "sobel edge map"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let (width, height) = image.dimensions();

        let luma: Vec<f32> = image
            .pixels()
            .chunks_exact(4)
            .map(|pix| {
                0.299 * f32::from(pix[0]) + 0.587 * f32::from(pix[1]) + 0.114 * f32::from(pix[2])
            })
            .collect();

        let mut out = RasterBuffer::new(width, height);

        if width < 3 || height < 3 {
            // no interior, the map is all zero
            return Ok(out);
        }

        let dst = out.pixels_mut();

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let mut gx = 0.0_f32;
                let mut gy = 0.0_f32;

                for ky in 0..3 {
                    for kx in 0..3 {
                        let value = luma[(y + ky - 1) * width + (x + kx - 1)];

                        gx += value * SOBEL_X[ky * 3 + kx];
                        gy += value * SOBEL_Y[ky * 3 + kx];
                    }
                }

                let magnitude = (gx * gx + gy * gy).sqrt().min(255.0).round() as u8;
                let offset = (y * width + x) * 4;

                dst[offset] = magnitude;
                dst[offset + 1] = magnitude;
                dst[offset + 2] = magnitude;
                dst[offset + 3] = 255;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use texel_core::buffer::RasterBuffer;
    use texel_core::traits::OperationsTrait;

    use crate::edge_map::EdgeMap;

    #[test]
    fn flat_image_has_no_edges() {
        let image = RasterBuffer::fill(8, 8, [90, 120, 40, 255]);
        let out = EdgeMap::new().execute(&image).unwrap();

        for y in 1..7 {
            for x in 1..7 {
                assert_eq!(out.pixel(x, y), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn border_ring_is_left_black() {
        let image = RasterBuffer::fill(6, 6, [255, 255, 255, 255]);
        let out = EdgeMap::new().execute(&image).unwrap();

        for x in 0..6 {
            assert_eq!(out.pixel(x, 0), [0, 0, 0, 0]);
            assert_eq!(out.pixel(x, 5), [0, 0, 0, 0]);
        }
        for y in 0..6 {
            assert_eq!(out.pixel(0, y), [0, 0, 0, 0]);
            assert_eq!(out.pixel(5, y), [0, 0, 0, 0]);
        }
    }

    #[test]
    fn vertical_step_lights_up_the_boundary() {
        let image = RasterBuffer::from_fn(8, 8, |x, _, pix| {
            let v = if x < 4 { 0 } else { 255 };
            pix[0] = v;
            pix[1] = v;
            pix[2] = v;
            pix[3] = 255;
        });
        let out = EdgeMap::new().execute(&image).unwrap();

        // the step between columns 3 and 4 saturates the magnitude
        assert_eq!(out.pixel(3, 4), [255, 255, 255, 255]);
        assert_eq!(out.pixel(4, 4), [255, 255, 255, 255]);
        // far from the step the gradient is zero
        assert_eq!(out.pixel(1, 4), [0, 0, 0, 255]);
        assert_eq!(out.pixel(6, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn tiny_images_come_back_all_zero() {
        let image = RasterBuffer::fill(2, 5, [200, 10, 30, 255]);
        let out = EdgeMap::new().execute(&image).unwrap();

        assert_eq!(out.dimensions(), (2, 5));
        assert!(out.pixels().iter().all(|x| *x == 0));
    }
}
