/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tangent-space normal map synthesis
//!
//! Treats a luminance buffer as a height field, takes its Sobel
//! derivative pair and encodes the normalized `(gx, gy, dz)` surface
//! vectors into RGB, the usual tangent-space convention where a flat
//! region encodes as `(128, 128, 255)`.
//!
//! Input is expected to be grayscale (the red channel is read as the
//! height value); run [`ToneTransform::grayscale`](crate::tone::ToneTransform::grayscale)
//! as a pre-pass when feeding color images.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

use crate::sobel::sobel_gradients;

/// Strengths at or below zero clamp here instead of failing, the
/// parameter is slider-facing
const MIN_STRENGTH: f32 = 1e-4;

/// Synthesize a tangent-space normal map from a luminance buffer
///
/// `strength` controls the height-to-slope ratio, larger values
/// exaggerate surface detail. The normalization runs in `f64`; with
/// 16M-pixel gradients the accumulated `f32` error is visible as
/// banding in smooth regions.
pub struct NormalMap {
    strength: f32
}

impl NormalMap {
    #[must_use]
    pub fn new(strength: f32) -> NormalMap {
        NormalMap { strength }
    }
}

impl OperationsTrait for NormalMap {
    fn name(&self) -> &'static str {
        "normal map synthesis"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let (width, height) = image.dimensions();

        let luma: Vec<f32> = image.plane(0).iter().map(|x| f32::from(*x)).collect();
        let (gx, gy) = sobel_gradients(&luma, width, height);

        let strength = f64::from(self.strength.max(MIN_STRENGTH));
        let dz = 255.0 / strength;

        let mut out = RasterBuffer::new(width, height);

        for ((pix, gx), gy) in out
            .pixels_mut()
            .chunks_exact_mut(4)
            .zip(&gx)
            .zip(&gy)
        {
            let x = f64::from(*gx);
            let y = f64::from(*gy);

            let length = (x * x + y * y + dz * dz).sqrt();

            pix[0] = encode_component(x / length);
            pix[1] = encode_component(y / length);
            pix[2] = encode_component(dz / length);
            pix[3] = 255;
        }

        Ok(out)
    }
}

/// Map a unit vector component from `-1..=1` to `0..=255`
fn encode_component(component: f64) -> u8 {
    ((component * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8
}
