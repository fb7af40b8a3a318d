/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dominant-color extraction via k-means clustering
//!
//! Clusters RGB samples around `k` centroids by squared Euclidean
//! distance and returns the centroids in index order. Initialization
//! draws uniformly from the sample set with replacement; duplicate
//! initial centroids are allowed and separate or collapse naturally
//! during iteration.
//!
//! Initialization is the only randomness in the whole crate. Callers
//! needing reproducible palettes thread an explicit seed through
//! [`PaletteExtractor::with_seed`].
use nanorand::{Rng, WyRand};
use texel_core::buffer::RasterBuffer;
use texel_core::color::{Palette, Rgb};

use crate::resize::bilinear_rgba;

/// Centroids moving less than this far (Euclidean, in the 0..255 RGB
/// cube) between iterations count as converged
const CONVERGENCE_DISTANCE: f64 = 1.0;

/// Images wider than this are downscaled before sampling, palette
/// extraction does not need full resolution
const MAX_WORKING_WIDTH: usize = 400;

/// K-means palette extractor
///
/// ```
/// use texel_core::color::Rgb;
/// use texel_procs::palette::PaletteExtractor;
/// let samples = vec![Rgb::new(10, 10, 10); 50];
/// let palette = PaletteExtractor::new(1, 20).with_seed(99).extract(&samples);
/// assert_eq!(palette, vec![Rgb::new(10, 10, 10)]);
/// ```
pub struct PaletteExtractor {
    colors:         usize,
    max_iterations: usize,
    seed:           Option<u64>
}

impl PaletteExtractor {
    /// Create an extractor producing `colors` centroids, iterating at
    /// most `max_iterations` times
    ///
    /// Both values are clamped to at least 1. Asking for more colors
    /// than the sample set has distinct values is legal and simply
    /// produces duplicate centroids.
    #[must_use]
    pub fn new(colors: usize, max_iterations: usize) -> PaletteExtractor {
        PaletteExtractor {
            colors:         colors.max(1),
            max_iterations: max_iterations.max(1),
            seed:           None
        }
    }

    /// Seed centroid initialization for reproducible output
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> PaletteExtractor {
        self.seed = Some(seed);
        self
    }

    /// Cluster the samples and return the centroids in index order
    ///
    /// An empty sample set returns an empty palette, callers can show
    /// "no palette" instead of handling an error.
    #[must_use]
    pub fn extract(&self, samples: &[Rgb]) -> Palette {
        if samples.is_empty() {
            return Palette::new();
        }

        let mut rng = match self.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new()
        };

        let k = self.colors;

        let mut centroids: Vec<[f64; 3]> = (0..k)
            .map(|_| {
                let sample = samples[rng.generate_range(0..samples.len())];
                [
                    f64::from(sample.r),
                    f64::from(sample.g),
                    f64::from(sample.b)
                ]
            })
            .collect();

        let mut assignments = vec![0_usize; samples.len()];

        for _ in 0..self.max_iterations {
            // assign each sample to its nearest centroid, first-found
            // minimum so the result is deterministic for a fixed
            // centroid order
            for (sample, slot) in samples.iter().zip(assignments.iter_mut()) {
                let mut best = 0;
                let mut best_distance = f64::INFINITY;

                for (index, centroid) in centroids.iter().enumerate() {
                    let distance = distance_squared(centroid, *sample);

                    if distance < best_distance {
                        best_distance = distance;
                        best = index;
                    }
                }
                *slot = best;
            }

            // recompute each centroid as the mean of its cluster
            let mut sums = vec![[0.0_f64; 3]; k];
            let mut counts = vec![0_usize; k];

            for (sample, slot) in samples.iter().zip(&assignments) {
                sums[*slot][0] += f64::from(sample.r);
                sums[*slot][1] += f64::from(sample.g);
                sums[*slot][2] += f64::from(sample.b);
                counts[*slot] += 1;
            }

            let mut converged = true;

            for ((centroid, sum), count) in centroids.iter_mut().zip(&sums).zip(&counts) {
                if *count == 0 {
                    // an empty cluster keeps its previous position,
                    // dropping or reseeding it would change k
                    continue;
                }

                let scale = 1.0 / (*count as f64);
                let next = [sum[0] * scale, sum[1] * scale, sum[2] * scale];

                let dx = next[0] - centroid[0];
                let dy = next[1] - centroid[1];
                let dz = next[2] - centroid[2];

                if (dx * dx + dy * dy + dz * dz).sqrt() >= CONVERGENCE_DISTANCE {
                    converged = false;
                }
                *centroid = next;
            }

            if converged {
                break;
            }
        }

        centroids
            .iter()
            .map(|c| {
                Rgb::new(
                    c[0].round().clamp(0.0, 255.0) as u8,
                    c[1].round().clamp(0.0, 255.0) as u8,
                    c[2].round().clamp(0.0, 255.0) as u8
                )
            })
            .collect()
    }
}

fn distance_squared(centroid: &[f64; 3], sample: Rgb) -> f64 {
    let dr = f64::from(sample.r) - centroid[0];
    let dg = f64::from(sample.g) - centroid[1];
    let db = f64::from(sample.b) - centroid[2];

    dr * dr + dg * dg + db * db
}

/// Flatten an image into an RGB sample list for clustering
///
/// Wide images are first downscaled to a bounded working width, then
/// every `stride`-th pixel is taken in scan order. Alpha is dropped,
/// fully transparent pixels still contribute their color.
#[must_use]
pub fn sample_pixels(image: &RasterBuffer, stride: usize) -> Vec<Rgb> {
    let stride = stride.max(1);
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let scaled;
    let source = if width > MAX_WORKING_WIDTH {
        let scale = MAX_WORKING_WIDTH as f32 / width as f32;
        let new_height = ((height as f32 * scale).round() as usize).max(1);

        scaled = bilinear_rgba(image, MAX_WORKING_WIDTH, new_height);
        &scaled
    } else {
        image
    };

    source
        .pixels()
        .chunks_exact(4)
        .step_by(stride)
        .map(|pix| Rgb::new(pix[0], pix[1], pix[2]))
        .collect()
}

#[cfg(test)]
mod tests {
    use texel_core::buffer::RasterBuffer;
    use texel_core::color::Rgb;

    use crate::palette::{sample_pixels, PaletteExtractor};

    // empty input must return an empty palette, not an error halt
    #[test]
    fn empty_samples_give_empty_palette() {
        let palette = PaletteExtractor::new(3, 20).extract(&[]);
        assert!(palette.is_empty());
    }

    // k = 1 converges on the arithmetic mean of all samples
    #[test]
    fn single_cluster_is_the_mean() {
        let samples = vec![
            Rgb::new(0, 0, 0),
            Rgb::new(100, 40, 20),
            Rgb::new(200, 80, 40),
        ];
        let palette = PaletteExtractor::new(1, 20).with_seed(1).extract(&samples);

        assert_eq!(palette, vec![Rgb::new(100, 40, 20)]);
    }

    // two distinct colors in equal counts with k = 2 converge to those
    // colors regardless of which samples seeded the centroids
    #[test]
    fn two_colors_separate() {
        let mut samples = vec![Rgb::new(255, 0, 0); 40];
        samples.extend(vec![Rgb::new(0, 0, 255); 40]);

        for seed in 0..8 {
            let mut palette = PaletteExtractor::new(2, 50).with_seed(seed).extract(&samples);
            palette.sort_by_key(|c| c.r);

            // even duplicate initial draws separate: the loner centroid
            // reclaims its exact color on the following iteration
            assert_eq!(palette, vec![Rgb::new(0, 0, 255), Rgb::new(255, 0, 0)]);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let samples: Vec<Rgb> = (0..=255_u8).map(|v| Rgb::new(v, v / 2, v / 3)).collect();

        let first = PaletteExtractor::new(4, 30).with_seed(77).extract(&samples);
        let second = PaletteExtractor::new(4, 30).with_seed(77).extract(&samples);

        assert_eq!(first, second);
    }

    #[test]
    fn oversized_k_duplicates_centroids() {
        let samples = vec![Rgb::new(9, 9, 9); 10];
        let palette = PaletteExtractor::new(5, 10).with_seed(5).extract(&samples);

        assert_eq!(palette.len(), 5);
        assert!(palette.iter().all(|c| *c == Rgb::new(9, 9, 9)));
    }

    #[test]
    fn sampling_respects_stride() {
        let image = RasterBuffer::fill(10, 10, [5, 6, 7, 255]);
        let samples = sample_pixels(&image, 4);

        assert_eq!(samples.len(), 25);
        assert!(samples.iter().all(|s| *s == Rgb::new(5, 6, 7)));
    }

    #[test]
    fn sampling_downscales_wide_images() {
        let image = RasterBuffer::fill(800, 10, [1, 2, 3, 255]);
        let samples = sample_pixels(&image, 1);

        // bounded to the working width, 800x10 becomes 400x5
        assert_eq!(samples.len(), 400 * 5);
    }
}
