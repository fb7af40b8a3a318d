/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for the `texel` texture tools
//!
//! This implements the pixel-level transformations shared across the
//! texture tool family: tone remapping, convolution, normal-map synthesis,
//! palette extraction, seamless tiling, panoramic mirror-tiling and an
//! edge-detection preprocessor for vector tracing hand-off.
//!
//! Every operator implements the `OperationsTrait` defined by `texel-core`.
//!
//! # Example
//! - Reduce an image to grayscale and invert it
//! ```
//! use texel_core::buffer::RasterBuffer;
//! use texel_core::traits::OperationsTrait;
//! use texel_procs::tone::{ToneParams, ToneTransform};
//! let image = RasterBuffer::fill(100, 100, [64, 128, 192, 255]);
//! let params = ToneParams { invert: true, ..ToneParams::default() };
//! // execute the filter
//! let inverted = ToneTransform::new(params).execute(&image)?;
//! # Ok::<(), texel_core::errors::RasterErrors>(())
//! ```

// Benchmark support needs nightly
#![cfg_attr(feature = "benchmarks", feature(test))]
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

pub mod box_blur;
pub mod convolve;
pub mod edge_map;
pub mod normal_map;
pub mod pad;
pub mod palette;
pub mod panorama;
pub mod resize;
pub mod seamless;
pub mod sobel;
pub mod tone;
