/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Edge-clamp border padding
//!
//! Convolution windows need pixels outside the image; the policy for
//! every convolution here is to clamp out-of-range coordinates to the
//! nearest edge pixel. Padding the plane once up front keeps the inner
//! loops free of per-pixel bounds checks.

/// Pad a single plane by `radius` rows and columns on every side,
/// replicating the edge pixels into the new border
///
/// ```text
///  a,b,c
///  d,e,f
/// ```
/// becomes, for `radius = 1`
/// ```text
/// a a,b,c c
/// a a,b,c c
/// d d,e,f f
/// d d,e,f f
/// ```
///
/// # Panics
/// When `pixels.len() != width * height` or the plane is empty
pub fn pad_replicate<T: Copy + Default>(
    pixels: &[T], width: usize, height: usize, radius: usize
) -> Vec<T> {
    assert_eq!(pixels.len(), width * height, "plane length mismatch");
    assert!(width > 0 && height > 0, "cannot pad an empty plane");

    let padded_w = width + radius * 2;
    let padded_h = height + radius * 2;

    let mut out_pixels = vec![T::default(); padded_h * padded_w];

    let start = radius;
    let end = padded_w - radius;

    // top border rows replicate the first image row
    let first_row = &pixels[0..width];
    for out in out_pixels.chunks_exact_mut(padded_w).take(radius) {
        out[0..start].fill(first_row[0]);
        out[start..end].copy_from_slice(first_row);
        out[end..].fill(first_row[width - 1]);
    }

    // middle rows
    for (out, in_pix) in out_pixels
        .chunks_exact_mut(padded_w)
        .skip(radius)
        .take(height)
        .zip(pixels.chunks_exact(width))
    {
        out[0..start].fill(in_pix[0]);
        out[start..end].copy_from_slice(in_pix);
        out[end..].fill(in_pix[width - 1]);
    }

    // bottom border rows replicate the last image row
    let last_row = &pixels[(height - 1) * width..];
    for out in out_pixels.rchunks_exact_mut(padded_w).take(radius) {
        out[0..start].fill(last_row[0]);
        out[start..end].copy_from_slice(last_row);
        out[end..].fill(last_row[width - 1]);
    }

    out_pixels
}

#[cfg(test)]
mod tests {
    use crate::pad::pad_replicate;

    #[test]
    fn replicate_corners() {
        let plane: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let padded = pad_replicate(&plane, 3, 2, 1);

        assert_eq!(padded.len(), 5 * 4);
        // corners take the nearest image pixel
        assert_eq!(padded[0], 1);
        assert_eq!(padded[4], 3);
        assert_eq!(*padded.last().unwrap(), 6);
        // center is untouched
        assert_eq!(padded[5 + 1], 1);
        assert_eq!(padded[5 + 3], 3);
    }

    #[test]
    fn zero_radius_is_identity() {
        let plane: Vec<u8> = vec![7, 8, 9, 10];
        assert_eq!(pad_replicate(&plane, 2, 2, 0), plane);
    }
}
