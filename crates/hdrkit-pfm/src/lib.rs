/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A Portable FloatMap (PFM) decoder and encoder
//!
//! PFM stores raw 32 bit floats after a three token text header
//!
//! ```text
//! PF
//! <width> <height>
//! <scale>
//! ```
//! where the sign of the scale gives the byte order of the body, negative
//! for little endian and positive for big endian.
//!
//! # Supported variants
//! - Decoding: colour (`PF`) images in either byte order
//! - Encoding: colour (`PF`) images, always little endian
//!
//! Greyscale (`Pf`) files are recognized and rejected.
#![forbid(unsafe_code)]
#![macro_use]
extern crate alloc;
pub extern crate hdrkit_core;

pub use decoder::{ByteEndian, PfmDecoder};
pub use encoder::PfmEncoder;
pub use errors::{PfmDecodeErrors, PfmEncodeErrors};

mod decoder;
mod encoder;
mod errors;
