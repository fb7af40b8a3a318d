/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The operator seam
//!
//! Every raster-to-raster operator is a small parameter struct
//! implementing [`OperationsTrait`]. Callers hold the struct, tweak its
//! parameters and call [`execute`](OperationsTrait::execute) again; the
//! operators keep no state between calls, so re-running with new
//! parameters always recomputes from the pristine source buffer.
use crate::buffer::RasterBuffer;
use crate::errors::RasterErrors;
use crate::log::trace;

/// An image operation, a pure function from one raster buffer to a new one
pub trait OperationsTrait {
    /// The name of this operation, used for logging and error reporting
    fn name(&self) -> &'static str;

    /// Run the operation proper.
    ///
    /// Implementations may assume non-zero dimensions, [`execute`](Self::execute)
    /// has already rejected degenerate buffers.
    fn execute_impl(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors>;

    /// Validate the input and run the operation
    ///
    /// # Errors
    /// [`RasterErrors::InvalidDimensions`] when the buffer has a zero
    /// width or height, plus whatever the operation itself reports.
    fn execute(&self, image: &RasterBuffer) -> Result<RasterBuffer, RasterErrors> {
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(RasterErrors::InvalidDimensions(width, height));
        }
        trace!("Running operation {}", self.name());

        self.execute_impl(image)
    }
}
