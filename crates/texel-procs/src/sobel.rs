/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
//!
//! This operation calculates the gradient of the image,
//! which represents how quickly pixel values change from
//! one point to another in both the horizontal and vertical directions.
//!
//! The magnitude and direction of the gradient is what the normal-map
//! synthesizer and the edge-detection preprocessor are built on.
use crate::pad::pad_replicate;

/// Gx matrix
/// ```text
///   -1, 0, 1,
///   -2, 0, 2,
///   -1, 0, 1
/// ```
#[rustfmt::skip]
pub const SOBEL_X: [f32; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0
];

/// Gy matrix
/// ```text
/// -1,-2,-1,
///  0, 0, 0,
///  1, 2, 1
/// ```
#[rustfmt::skip]
pub const SOBEL_Y: [f32; 9] = [
    -1.0, -2.0, -1.0,
     0.0,  0.0,  0.0,
     1.0,  2.0,  1.0
];

/// Compute the horizontal and vertical Sobel derivative pair of a single
/// plane
///
/// Window samples outside the plane clamp to the nearest edge pixel, so
/// the gradient fields cover every pixel including the border ring.
///
/// # Arguments
/// - plane: A contiguous single-channel plane, e.g. a luminance field
/// - width: Width of the plane
/// - height: Height of the plane
///
/// # Returns
/// The `(gx, gy)` scalar gradient fields, each `width * height` long
#[must_use]
pub fn sobel_gradients(plane: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let padded = pad_replicate(plane, width, height, 1);
    let padded_w = width + 2;

    let mut gx = vec![0.0_f32; width * height];
    let mut gy = vec![0.0_f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let mut window = [0.0_f32; 9];
            let mut i = 0;

            for ky in 0..3 {
                let offset = (y + ky) * padded_w + x;
                window[i..i + 3].copy_from_slice(&padded[offset..offset + 3]);
                i += 3;
            }

            let (mut sum_x, mut sum_y) = (0.0_f32, 0.0_f32);

            for ((pix, wx), wy) in window.iter().zip(&SOBEL_X).zip(&SOBEL_Y) {
                sum_x += pix * wx;
                sum_y += pix * wy;
            }

            gx[y * width + x] = sum_x;
            gy[y * width + x] = sum_y;
        }
    }

    (gx, gy)
}
