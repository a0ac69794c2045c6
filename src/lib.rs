/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Read and write HDR images and tone map them for display
//!
//! This crate re-exports the workspace crates
//!
//! - [`hdrkit_core`]: byte readers and writers, decoder options, colorspaces
//! - [`hdrkit_hdr`]: Radiance (`.hdr`) decoder
//! - [`hdrkit_pfm`]: Portable floatmap (`.pfm`) decoder and encoder
//! - [`hdrkit_image`]: the [`Image`](hdrkit_image::image::Image) type and format dispatch
//! - [`hdrkit_tonemap`]: luminance statistics, tone curves and operators
//!
//! # Example
//! Tone map an in memory image and write it as PFM
//! ```
//! use hdrkit::hdrkit_core::colorspace::ColorSpace;
//! use hdrkit::hdrkit_image::codecs::ImageFormat;
//! use hdrkit::hdrkit_image::image::Image;
//! use hdrkit::hdrkit_tonemap::operators::reinhard_tmo;
//! use hdrkit::hdrkit_tonemap::traits::ToneOperation;
//!
//! let image = Image::fill(4.0, 8, 8, ColorSpace::RGB).unwrap();
//! let ldr = reinhard_tmo(0.0, f32::INFINITY).apply(&image).unwrap();
//! let bytes = ldr.write_to_vec(ImageFormat::Pfm).unwrap();
//! assert!(bytes.starts_with(b"PF\n8 8\n"));
//! ```
#![forbid(unsafe_code)]

pub use hdrkit_core;
pub use hdrkit_hdr;
pub use hdrkit_image;
pub use hdrkit_pfm;
pub use hdrkit_tonemap;
