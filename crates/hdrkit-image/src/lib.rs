/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An HDR image library
//!
//! This crate ties the hdrkit decoders and encoders together around a single
//! [`Image`](crate::image::Image) type holding linear `f32` samples.
//!
//! # Features
//! - `exr`: Decode OpenEXR files through the [exr](https://docs.rs/exr) crate
//! - `log`: Route decoder traces and warnings to the `log` crate
//! - `serde-support`: Serialize colorspaces and decoder options
//!
//! # Example
//! ```no_run
//! use hdrkit_image::image::Image;
//!
//! let mut image = Image::open("memorial.hdr").unwrap();
//! image.substitute_non_finite(Some(0.0), Some(f32::MAX));
//! image.save("memorial.pfm").unwrap();
//! ```
#![forbid(unsafe_code)]

pub mod codecs;
pub mod errors;
pub mod image;
pub mod traits;
