/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives shared by the `texel` family of crates
//!
//! This crate provides the small set of types every operator crate agrees on
//!
//! - An interleaved RGBA8 raster buffer, the common currency passed between
//!   image operators
//! - RGB color triples and palettes with hex formatting at the boundary
//! - The error taxonomy for raster operations
//! - The `OperationsTrait` seam that operator crates implement
//! - A logging shim that forwards to the `log` crate when the `log` feature
//!   is enabled and compiles to nothing otherwise
//!
//! The crate deliberately contains no image algorithms; those live in
//! `texel-procs`.
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod buffer;
pub mod color;
pub mod errors;
pub mod log;
pub mod traits;
