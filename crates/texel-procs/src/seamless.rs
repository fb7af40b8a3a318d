/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Seamless tile synthesis
//!
//! Makes a texture wrap cleanly in both directions in two steps:
//!
//! 1. Quadrant swap: rotate the image by half its width and half its
//!    height. The original edges meet at the center, where the
//!    discontinuity can be blended away, and the original center (which
//!    wraps trivially) becomes the new edges.
//! 2. Cross-edge blend: mix each of the first `blend` rows with its
//!    mirror row using a smoothstep ramp, writing the blended value to
//!    both rows, then the same for columns. Both members of a pair end
//!    up identical, so `pixel(x, 0) == pixel(x, height-1)` and
//!    `pixel(0, y) == pixel(width-1, y)` hold exactly after the pass.
//!
//! The alpha channel is intentionally excluded from the blend and keeps
//! its swapped source values; downstream tools rely on transparency
//! surviving untouched.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
use texel_core::traits::OperationsTrait;

/// Cubic easing used for the blend ramp
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Turn a texture into a seamlessly tileable one
///
/// `blend_percent` is the fraction of the shorter image dimension used
/// as the blend width, in `0..=50`. Zero is legal and performs the
/// quadrant swap with no blending.
pub struct SeamlessTile {
    blend_percent: f32
}

impl SeamlessTile {
    #[must_use]
    pub fn new(blend_percent: f32) -> SeamlessTile {
        SeamlessTile { blend_percent }
    }
}

impl OperationsTrait for SeamlessTile {
    fn name(&self) -> &'static str {
        "seamless tile"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let percent = self.blend_percent;

        if !(0.0..=50.0).contains(&percent) {
            return Err(RasterErrors::InvalidParameter(
                "blend percent must be within 0..=50",
                percent
            ));
        }

        let (width, height) = image.dimensions();
        let mut out = image.clone();

        // quadrant swap: left/right halves, then top/bottom halves
        let row_bytes = width * 4;
        let x_shift = (width / 2) * 4;

        for row in out.pixels_mut().chunks_exact_mut(row_bytes) {
            row.rotate_left(x_shift);
        }
        out.pixels_mut().rotate_left((height / 2) * row_bytes);

        let blend = ((width.min(height) as f32) * percent / 100.0).floor() as usize;

        if blend > 0 {
            let data = out.pixels_mut();

            // rows against their vertical mirror
            for y in 0..blend {
                let t = smoothstep(y as f32 / blend as f32);

                for x in 0..width {
                    let top = (y * width + x) * 4;
                    let bottom = ((height - 1 - y) * width + x) * 4;

                    blend_pair(data, top, bottom, t);
                }
            }

            // columns against their horizontal mirror
            for x in 0..blend {
                let t = smoothstep(x as f32 / blend as f32);

                for y in 0..height {
                    let left = (y * width + x) * 4;
                    let right = (y * width + (width - 1 - x)) * 4;

                    blend_pair(data, left, right, t);
                }
            }
        }

        Ok(out)
    }
}

/// Mix the RGB channels of two pixels with weight `t` and write the
/// result to both positions, leaving alpha alone
fn blend_pair(data: &mut [u8], near: usize, far: usize, t: f32) {
    for channel in 0..3 {
        let a = f32::from(data[near + channel]);
        let b = f32::from(data[far + channel]);
        let mixed = (a * (1.0 - t) + b * t) as u8;

        data[near + channel] = mixed;
        data[far + channel] = mixed;
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use texel_core::buffer::RasterBuffer;
    use texel_core::traits::OperationsTrait;

    use crate::seamless::SeamlessTile;

    fn random_image(width: usize, height: usize, seed: u64) -> RasterBuffer {
        let mut pixels = vec![0_u8; width * height * 4];
        nanorand::WyRand::new_seed(seed).fill(&mut pixels);

        // uniform alpha, the blend leaves alpha at source values
        for pix in pixels.chunks_exact_mut(4) {
            pix[3] = 255;
        }
        RasterBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        let image = random_image(8, 8, 1);

        assert!(SeamlessTile::new(-1.0).execute(&image).is_err());
        assert!(SeamlessTile::new(50.5).execute(&image).is_err());
        assert!(SeamlessTile::new(f32::NAN).execute(&image).is_err());
    }

    // the defining property of a tileable texture: opposite edges match
    #[test]
    fn edges_wrap_exactly() {
        let image = random_image(17, 23, 2);
        let out = SeamlessTile::new(30.0).execute(&image).unwrap();
        let (width, height) = out.dimensions();

        for x in 0..width {
            assert_eq!(out.pixel(x, 0), out.pixel(x, height - 1));
        }
        for y in 0..height {
            assert_eq!(out.pixel(0, y), out.pixel(width - 1, y));
        }
    }

    // both ends of the blend ramp must agree, not just the outermost edge
    #[test]
    fn blend_ramp_pairs_agree() {
        let image = random_image(20, 20, 3);
        let out = SeamlessTile::new(25.0).execute(&image).unwrap();
        let (width, height) = out.dimensions();
        let blend = 5;

        for y in 0..blend {
            for x in 0..width {
                assert_eq!(out.pixel(x, y), out.pixel(x, height - 1 - y));
            }
        }
        for x in 0..blend {
            for y in 0..height {
                assert_eq!(out.pixel(x, y), out.pixel(width - 1 - x, y));
            }
        }
    }

    // 4x4 at 50% gives blend = 2, every row/column pair participates
    #[test]
    fn full_blend_covers_every_pair() {
        let image = random_image(4, 4, 4);
        let out = SeamlessTile::new(50.0).execute(&image).unwrap();

        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), out.pixel(x, 3 - y));
            }
        }
        for x in 0..2 {
            for y in 0..4 {
                assert_eq!(out.pixel(x, y), out.pixel(3 - x, y));
            }
        }
    }

    // zero percent still performs the quadrant swap
    #[test]
    fn zero_blend_still_swaps() {
        let image = RasterBuffer::from_fn(4, 4, |x, y, pix| {
            pix[0] = (y * 4 + x) as u8;
            pix[3] = 255;
        });
        let out = SeamlessTile::new(0.0).execute(&image).unwrap();

        // former center pixel (2,2) moves to the origin
        assert_eq!(out.pixel(0, 0)[0], 2 * 4 + 2);
    }

    #[test]
    fn alpha_survives_the_blend() {
        let image = random_image(8, 8, 5);
        let out = SeamlessTile::new(50.0).execute(&image).unwrap();

        assert!(out.plane(3).iter().all(|x| *x == 255));
    }
}
