/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 2D convolution on images
//!
//! This filter adds support for common image convolving with odd-sized
//! square kernels, e.g. 3x3 blur, sharpen and edge-detection matrices.
//!
//! The intermediate calculations are carried in `f32`, out-of-range
//! window samples clamp to the nearest edge pixel and every output
//! sample clamps to `0..=255`.
//!
//! The convolution runs over the R, G and B planes independently, the
//! alpha plane is passed through unmodified.
use texel_core::buffer::RasterBuffer;
use texel_core::errors::RasterErrors;
#[cfg(feature = "threads")]
use texel_core::log::trace;
use texel_core::traits::OperationsTrait;

use crate::pad::pad_replicate;
use crate::sobel::{SOBEL_X, SOBEL_Y};

/// An odd-sized square convolution matrix with a normalization divisor
///
/// The divisor is the sum of the weights, or `1.0` when the weights sum
/// to zero, which keeps high-pass kernels like the Sobel pair from
/// dividing by zero.
#[derive(Clone, Debug)]
pub struct Kernel {
    weights: Vec<f32>,
    size:    usize,
    divisor: f32
}

impl Kernel {
    /// Create a new kernel from a `size * size` weight matrix
    ///
    /// # Errors
    /// [`RasterErrors::InvalidKernel`] when `size` is zero or even, or
    /// when the weight count does not match `size * size`.
    pub fn new(weights: Vec<f32>, size: usize) -> Result<Kernel, RasterErrors> {
        if size == 0 || size % 2 == 0 {
            return Err(RasterErrors::InvalidKernel(
                "kernel size must be odd and greater than zero"
            ));
        }
        if weights.len() != size * size {
            return Err(RasterErrors::InvalidKernel(
                "weight count does not match kernel size"
            ));
        }

        let sum: f32 = weights.iter().sum();
        let divisor = if sum.abs() < f32::EPSILON { 1.0 } else { sum };

        Ok(Kernel {
            weights,
            size,
            divisor
        })
    }

    /// The 1x1 identity kernel
    #[must_use]
    pub fn identity() -> Kernel {
        Kernel {
            weights: vec![1.0],
            size:    1,
            divisor: 1.0
        }
    }

    /// The horizontal Sobel derivative matrix
    ///
    /// ```text
    ///   -1, 0, 1,
    ///   -2, 0, 2,
    ///   -1, 0, 1
    /// ```
    #[must_use]
    pub fn sobel_x() -> Kernel {
        Kernel {
            weights: SOBEL_X.to_vec(),
            size:    3,
            divisor: 1.0
        }
    }

    /// The vertical Sobel derivative matrix, the transpose of
    /// [`sobel_x`](Kernel::sobel_x)
    #[must_use]
    pub fn sobel_y() -> Kernel {
        Kernel {
            weights: SOBEL_Y.to_vec(),
            size:    3,
            divisor: 1.0
        }
    }

    /// Build a blur or sharpen kernel from a single signed strength value
    ///
    /// - `strength > 0` produces a box blur of roughly that diameter
    /// - `strength < 0` produces a sharpen kernel of roughly that diameter
    ///   (all `-1` with the center replaced by the weight count)
    /// - `|strength| < 0.1` produces the identity kernel
    ///
    /// The diameter is rounded to the next odd integer so the result
    /// always satisfies the odd-size invariant.
    #[must_use]
    pub fn from_strength(strength: f32) -> Kernel {
        if strength.abs() < 0.1 {
            return Kernel::identity();
        }

        let size = (strength.abs().round() as usize) | 1;
        let count = size * size;

        if strength > 0.0 {
            Kernel {
                weights: vec![1.0; count],
                size,
                divisor: count as f32
            }
        } else {
            let mut weights = vec![-1.0; count];
            weights[count / 2] = count as f32;

            // -1 everywhere except the center sums to exactly 1
            Kernel {
                weights,
                size,
                divisor: 1.0
            }
        }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn radius(&self) -> usize {
        self.size / 2
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub const fn divisor(&self) -> f32 {
        self.divisor
    }
}

/// Convolve an image
///
/// # Alpha channel
/// - Alpha channel is ignored
///
/// # Example
/// - Convolve with a 3x3 sharpening matrix
///
/// ```
/// use texel_core::buffer::RasterBuffer;
/// use texel_core::errors::RasterErrors;
/// use texel_core::traits::OperationsTrait;
/// use texel_procs::convolve::{Convolve, Kernel};
/// let weights = vec![ 0.0, -1.0,  0.0,
///                    -1.0,  5.0, -1.0,
///                     0.0, -1.0,  0.0];
/// let kernel = Kernel::new(weights, 3)?;
/// let image = RasterBuffer::fill(100, 100, [128, 128, 128, 255]);
/// let sharpened = Convolve::new(kernel).execute(&image)?;
/// # Ok::<(), RasterErrors>(())
/// ```
pub struct Convolve {
    kernel: Kernel
}

impl Convolve {
    #[must_use]
    pub fn new(kernel: Kernel) -> Convolve {
        Convolve { kernel }
    }
}

impl OperationsTrait for Convolve {
    fn name(&self) -> &'static str {
        "2D convolution"
    }

    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let (width, height) = image.dimensions();
        let mut out = image.clone();

        #[cfg(feature = "threads")]
        let planes: Vec<Vec<u8>> = {
            trace!("Running convolve in multithreaded mode");

            std::thread::scope(|s| {
                let handles: Vec<_> = (0..3)
                    .map(|channel| {
                        s.spawn(move || {
                            let plane = image.plane(channel);
                            let mut out_plane = vec![0_u8; width * height];

                            convolve_plane(&plane, &mut out_plane, width, height, &self.kernel);
                            out_plane
                        })
                    })
                    .collect();

                handles.into_iter().map(|x| x.join().unwrap()).collect()
            })
        };

        #[cfg(not(feature = "threads"))]
        let planes: Vec<Vec<u8>> = (0..3)
            .map(|channel| {
                let plane = image.plane(channel);
                let mut out_plane = vec![0_u8; width * height];

                convolve_plane(&plane, &mut out_plane, width, height, &self.kernel);
                out_plane
            })
            .collect();

        for (channel, plane) in planes.iter().enumerate() {
            out.set_plane(channel, plane);
        }

        Ok(out)
    }
}

/// Convolve a single plane, reading every window sample from the padded
/// copy of the input so output writes never feed back into the pass
pub fn convolve_plane(
    in_plane: &[u8], out_plane: &mut [u8], width: usize, height: usize, kernel: &Kernel
) {
    let radius = kernel.radius();
    let size = kernel.size();
    let weights = kernel.weights();
    let divisor = kernel.divisor();

    let padded = pad_replicate(in_plane, width, height, radius);
    let padded_w = width + radius * 2;

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0_f32;
            let mut i = 0;

            for ky in 0..size {
                let offset = (y + ky) * padded_w + x;
                let in_slice = &padded[offset..offset + size];

                for pix in in_slice {
                    sum += f32::from(*pix) * weights[i];
                    i += 1;
                }
            }

            out_plane[y * width + x] = ((sum / divisor).round()).clamp(0.0, 255.0) as u8;
        }
    }
}


#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use nanorand::Rng;

    use crate::convolve::{convolve_plane, Kernel};

    #[bench]
    fn bench_convolve_3x3(b: &mut test::Bencher) {
        let width = 800;
        let height = 800;

        let mut pixels = vec![0_u8; width * height];
        let mut out_pixels = vec![0; width * height];

        nanorand::WyRand::new().fill(&mut pixels);

        let kernel = Kernel::from_strength(3.0);

        b.iter(|| convolve_plane(&pixels, &mut out_pixels, width, height, &kernel));
    }
}
