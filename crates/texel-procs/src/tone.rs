/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grayscale reduction and tone remapping
//!
//! One parameterized transform replaces the per-tool grayscale, invert,
//! contrast and level code paths: displacement, roughness and specular
//! map generation are all this operator with different [`ToneParams`].
//!
//! The contrast algorithm is from
//! <https://www.dfstudios.co.uk/articles/programming/image-programming-algorithms/image-processing-algorithms-part-5-contrast-adjustment/>
//!
//! First step is to calculate a contrast correlation factor
//!
//! ```text
//! f = 259(c+255)/(255(259-c))
//! ```
//! `c` is the desired level of contrast, `f` is the constant correlation
//! factor, the adjustment itself is then
//! ```text
//! R' = f(R-128)+128
//! ```
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

/// Tone adjustment parameters
///
/// Every field is independent, `None`/`false` means identity for that
/// stage. Stages apply in declaration order after the unconditional
/// grayscale reduction.
#[derive(Copy, Clone, Debug, Default)]
pub struct ToneParams {
    /// Contrast correction level, clamped to `-255..=255`
    pub contrast: Option<f32>,
    /// Invert every color channel after grayscale reduction
    pub invert:   bool,
    /// Linear level remap amount in `0..=1`, values of `0.5` and above
    /// clamp just below `0.5` so the remap window never collapses
    pub level:    Option<f32>,
    /// Center of the normalization window on the `0..=1` scale
    pub mean:     Option<f32>,
    /// Width of the normalization window on the `0..=1` scale
    pub range:    Option<f32>
}

/// Reduce an image to its channel-average grayscale and apply tone
/// adjustments
///
/// The grayscale reduction is unconditional: identity parameters return
/// the grayscale-reduced input, not the original. Alpha is preserved
/// unchanged throughout.
pub struct ToneTransform {
    params: ToneParams
}

impl ToneTransform {
    #[must_use]
    pub fn new(params: ToneParams) -> ToneTransform {
        ToneTransform { params }
    }

    /// Plain grayscale reduction with no further adjustment
    #[must_use]
    pub fn grayscale() -> ToneTransform {
        ToneTransform {
            params: ToneParams::default()
        }
    }
}

impl OperationsTrait for ToneTransform {
    fn name(&self) -> &'static str {
        "tone transform"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let mut out = image.clone();
        let data = out.pixels_mut();

        grayscale_avg(data);

        if self.params.invert {
            invert_rgb(data);
        }
        if let Some(contrast) = self.params.contrast {
            contrast_rgb(data, contrast);
        }
        if let Some(level) = self.params.level {
            level_rgb(data, level);
        }
        if self.params.mean.is_some() || self.params.range.is_some() {
            window_rgb(
                data,
                self.params.mean.unwrap_or(0.5),
                self.params.range.unwrap_or(1.0)
            );
        }

        Ok(out)
    }
}

/// Replace each RGB triple with its rounded channel average, leaving
/// alpha untouched
pub fn grayscale_avg(data: &mut [u8]) {
    for pix in data.chunks_exact_mut(4) {
        let sum = f32::from(pix[0]) + f32::from(pix[1]) + f32::from(pix[2]);
        let avg = (sum / 3.0).round() as u8;

        pix[0] = avg;
        pix[1] = avg;
        pix[2] = avg;
    }
}

/// Invert the color channels, `pixel = 255 - pixel`, leaving alpha
/// untouched
pub fn invert_rgb(data: &mut [u8]) {
    for pix in data.chunks_exact_mut(4) {
        pix[0] = u8::MAX - pix[0];
        pix[1] = u8::MAX - pix[1];
        pix[2] = u8::MAX - pix[2];
    }
}

/// Apply the contrast correction factor to the color channels
///
/// See the module docs for the formula
pub fn contrast_rgb(data: &mut [u8], contrast: f32) {
    // keep the denominator away from zero
    let contrast = contrast.clamp(-255.0, 255.0);
    let factor = (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast));

    for pix in data.chunks_exact_mut(4) {
        for channel in &mut pix[0..3] {
            let float_pix = f32::from(*channel);
            let new_val = ((factor * (float_pix - 128.0)) + 128.0).clamp(0.0, 255.0);
            *channel = new_val as u8;
        }
    }
}

/// Linearly remap the color channels so `level * 255` maps to 0 and
/// `255 - level * 255` maps to 255
pub fn level_rgb(data: &mut [u8], level: f32) {
    // level >= 0.5 collapses the window, clamp it just below
    let level = level.clamp(0.0, 0.499);
    let min = level * 255.0;
    let max = 255.0 - min;
    let scale = 255.0 / (max - min);

    for pix in data.chunks_exact_mut(4) {
        for channel in &mut pix[0..3] {
            let new_val = ((f32::from(*channel) - min) * scale).clamp(0.0, 255.0);
            *channel = new_val as u8;
        }
    }
}

/// Normalize the color channels into the window
/// `[mean - range/2, mean + range/2]` given on the `0..=1` scale
///
/// A degenerate window (`range` of zero) thresholds at the mean rather
/// than dividing by zero.
pub fn window_rgb(data: &mut [u8], mean: f32, range: f32) {
    let mean = mean.clamp(0.0, 1.0);
    let range = range.clamp(0.0, 1.0);

    let lo = (mean - range * 0.5) * 255.0;
    let hi = (mean + range * 0.5) * 255.0;

    if (hi - lo) < 0.5 {
        let threshold = mean * 255.0;
        for pix in data.chunks_exact_mut(4) {
            for channel in &mut pix[0..3] {
                *channel = if f32::from(*channel) < threshold { 0 } else { 255 };
            }
        }
        return;
    }

    let scale = 255.0 / (hi - lo);

    for pix in data.chunks_exact_mut(4) {
        for channel in &mut pix[0..3] {
            let new_val = ((f32::from(*channel) - lo) * scale).clamp(0.0, 255.0);
            *channel = new_val as u8;
        }
    }
}
