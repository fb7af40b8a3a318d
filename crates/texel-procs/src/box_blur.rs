/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable box blur
//!
//! A box blur is the average of the pixels in a `(2r+1)` window
//!
//! ```text
//! pix[x,y] = (pix[x-r,y] + ... + pix[x,y] + ... + pix[x+r,y]) / (2r+1)
//! ```
//!
//! run once along rows and once along columns. Each pass keeps a
//! sliding accumulator, so the cost is independent of the radius.
//! Samples outside the plane clamp to the nearest edge pixel.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

/// Blur the color channels of an image, leaving alpha untouched
///
/// Radius 0 is a no-op.
pub struct BoxBlur {
    radius: usize
}

impl BoxBlur {
    #[must_use]
    pub fn new(radius: usize) -> BoxBlur {
        BoxBlur { radius }
    }
}

impl OperationsTrait for BoxBlur {
    fn name(&self) -> &'static str {
        "box blur"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let (width, height) = image.dimensions();
        let mut out = image.clone();

        if self.radius == 0 {
            return Ok(out);
        }

        let mut scratch = vec![0_u8; width * height];

        for channel in 0..3 {
            let mut plane = image.plane(channel);

            box_blur_plane(&mut plane, &mut scratch, width, height, self.radius);
            out.set_plane(channel, &plane);
        }

        Ok(out)
    }
}

/// Blur a single plane in place, using `scratch` for the intermediate
/// row pass
///
/// # Panics
/// When the plane or scratch length does not match `width * height`
pub fn box_blur_plane(
    in_out: &mut [u8], scratch: &mut [u8], width: usize, height: usize, radius: usize
) {
    assert_eq!(in_out.len(), width * height, "plane length mismatch");
    assert_eq!(scratch.len(), width * height, "scratch length mismatch");

    if radius == 0 || width == 0 || height == 0 {
        return;
    }

    blur_rows(in_out, scratch, width, height, radius);
    blur_columns(scratch, in_out, width, height, radius);
}

fn blur_rows(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;

    for (in_row, out_row) in src
        .chunks_exact(width)
        .zip(dst.chunks_exact_mut(width))
        .take(height)
    {
        // seed the accumulator with the clamped window around x = 0
        let mut acc = u32::from(in_row[0]) * (radius as u32 + 1);
        for i in 1..=radius {
            acc += u32::from(in_row[i.min(width - 1)]);
        }

        for (x, out) in out_row.iter_mut().enumerate() {
            *out = (acc / window) as u8;

            let entering = in_row[(x + radius + 1).min(width - 1)];
            let leaving = in_row[x.saturating_sub(radius)];

            acc += u32::from(entering);
            acc -= u32::from(leaving);
        }
    }
}

fn blur_columns(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (2 * radius + 1) as u32;

    for x in 0..width {
        let mut acc = u32::from(src[x]) * (radius as u32 + 1);
        for i in 1..=radius {
            acc += u32::from(src[i.min(height - 1) * width + x]);
        }

        for y in 0..height {
            dst[y * width + x] = (acc / window) as u8;

            let entering = src[(y + radius + 1).min(height - 1) * width + x];
            let leaving = src[y.saturating_sub(radius) * width + x];

            acc += u32::from(entering);
            acc -= u32::from(leaving);
        }
    }
}
