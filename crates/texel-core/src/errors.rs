/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during raster operations
use std::fmt::{Debug, Formatter};

/// All possible errors raster operators can return.
///
/// Every variant is a local, recoverable condition; no operator
/// is fatal to the hosting process. Channel values outside `0..=255`
/// are never an error, they are silently clamped at every pixel write.
pub enum RasterErrors {
    /// Width or height of a buffer or canvas is zero
    InvalidDimensions(usize, usize),
    /// A parameter fell outside its documented range.
    ///
    /// Carries a static reason and the offending value
    InvalidParameter(&'static str, f32),
    /// A convolution kernel is malformed, e.g. an even or zero size
    InvalidKernel(&'static str),
    /// A pixel slice length does not match `width * height * 4`
    DimensionsMismatch(usize, usize)
}

impl Debug for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions(width, height) => {
                writeln!(f, "Invalid dimensions, width={width}, height={height}")
            }
            Self::InvalidParameter(reason, value) => {
                writeln!(f, "Invalid parameter ({value}): {reason}")
            }
            Self::InvalidKernel(reason) => {
                writeln!(f, "Invalid kernel: {reason}")
            }
            Self::DimensionsMismatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} pixel bytes but found {found}"
                )
            }
        }
    }
}
