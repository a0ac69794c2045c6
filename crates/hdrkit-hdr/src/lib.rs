/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A RADIANCE HDR decoder
//!
//! # Features
//! - Minimal interface, few dependencies
//! - New style run length encoded and flat bodies
//! - All eight scanline orientations
//! - No unsafe
//!
//! # Usage notes
//! The decoder returns data in `&[f32]` types with the exponent already added to the numbers
//! it does not return raw data nor does it expose the ability to do so.
//!
//! # Metadata
//! - Radiance images usually store metadata in key value pairs.
//!
//! During decoding, we extract this metadata from the headers into an ordered list which we provide
//! via the `metadata` method, the decoder only interprets `FORMAT` and `EXPOSURE`,
//! it is the caller's work to make sense of the rest.
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
extern crate core;
pub extern crate hdrkit_core;
pub use decoder::HdrDecoder;
pub use errors::HdrDecodeErrors;
pub use header::{PixelFormat, RadianceHeader};
pub use resolution::Resolution;

mod decoder;
mod errors;
pub mod header;
mod orientation;
pub mod resolution;
