/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! RGB color triples and palettes
//!
//! Palettes keep their insertion order, index `i` is the `i`-th cluster
//! centroid produced by the quantizer, they are never re-sorted by any
//! visual metric.

/// A single 8-bit RGB triple
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

/// An ordered sequence of colors, insertion order = centroid index
pub type Palette = Vec<Rgb>;

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` hex string, the palette encoding
    /// exposed at the caller boundary
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgb;

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::new(255, 0, 10).to_hex(), "#ff000a");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
    }
}
