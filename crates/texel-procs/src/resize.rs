/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilinear image scaling
//!
//! Used by the panorama synthesizer to fill its canvas height and by
//! the palette sampler to bound its working resolution. Interpolation
//! runs per channel in `f32`, alpha included.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

/// Resize an image to new dimensions with bilinear interpolation
pub struct Resize {
    width:  usize,
    height: usize
}

impl Resize {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Resize {
        Resize { width, height }
    }
}

impl OperationsTrait for Resize {
    fn name(&self) -> &'static str {
        "bilinear resize"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterErrors::InvalidDimensions(self.width, self.height));
        }
        Ok(bilinear_rgba(image, self.width, self.height))
    }
}

/// Bilinear interpolation of an interleaved RGBA buffer
///
/// Callers guarantee non-zero output dimensions.
pub(crate) fn bilinear_rgba(image: &RasterBuffer, out_width: usize, out_height: usize) -> RasterBuffer {
    let (in_width, in_height) = image.dimensions();
    let src = image.pixels();

    let w_ratio = in_width as f32 / out_width as f32;
    let h_ratio = in_height as f32 / out_height as f32;

    let mut out = RasterBuffer::new(out_width, out_height);
    let dst = out.pixels_mut();

    for y in 0..out_height {
        let new_y = y as f32 * h_ratio;
        let y0 = (new_y.floor() as usize).min(in_height - 1);
        let y1 = (y0 + 1).min(in_height - 1);
        let b = (new_y - y0 as f32).clamp(0.0, 1.0);

        for x in 0..out_width {
            let new_x = x as f32 * w_ratio;
            let x0 = (new_x.floor() as usize).min(in_width - 1);
            let x1 = (x0 + 1).min(in_width - 1);
            let a = (new_x - x0 as f32).clamp(0.0, 1.0);

            let i00 = (y0 * in_width + x0) * 4;
            let i10 = (y0 * in_width + x1) * 4;
            let i01 = (y1 * in_width + x0) * 4;
            let i11 = (y1 * in_width + x1) * 4;

            let offset = (y * out_width + x) * 4;

            for channel in 0..4 {
                let p00 = f32::from(src[i00 + channel]);
                let p10 = f32::from(src[i10 + channel]);
                let p01 = f32::from(src[i01 + channel]);
                let p11 = f32::from(src[i11 + channel]);

                let interpolated = p00 * (1.0 - a) * (1.0 - b)
                    + p10 * a * (1.0 - b)
                    + p01 * (1.0 - a) * b
                    + p11 * a * b;

                dst[offset + channel] = interpolated.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use texel_core::buffer::RasterBuffer;
    use texel_core::traits::OperationsTrait;

    use crate::resize::Resize;

    #[test]
    fn same_size_is_identity() {
        let image = RasterBuffer::from_fn(9, 9, |x, y, pix| {
            pix[0] = (x * 20) as u8;
            pix[1] = (y * 20) as u8;
            pix[3] = 255;
        });
        let out = Resize::new(9, 9).execute(&image).unwrap();

        assert!(out == image);
    }

    #[test]
    fn flat_image_stays_flat_at_any_scale() {
        let image = RasterBuffer::fill(10, 10, [33, 66, 99, 255]);

        for (w, h) in [(3, 3), (20, 20), (1, 17)] {
            let out = Resize::new(w, h).execute(&image).unwrap();

            assert_eq!(out.dimensions(), (w, h));
            assert!(out.pixels().chunks_exact(4).all(|p| p == [33, 66, 99, 255]));
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let image = RasterBuffer::fill(4, 4, [0, 0, 0, 255]);
        assert!(Resize::new(0, 4).execute(&image).is_err());
    }
}
