/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::convert::From;
use core::fmt::{Debug, Display, Formatter};

use hdrkit_core::bytestream::ByteIoError;

/// HDR decoding errors
pub enum HdrDecodeErrors {
    /// First line is neither `#?RADIANCE` nor `#?RGBE`
    InvalidSignature,
    /// The `FORMAT` variable is missing or names an unsupported pixel format
    InvalidFormat(String),
    /// The resolution line could not be understood
    InvalidResolution(String),
    /// The file ended early or a run length record is malformed
    Corrupt(String),
    /// Too large dimensions for a given dimension
    TooLargeDimensions(&'static str, usize, usize),
    /// The output array is too small to contain the whole
    /// image
    TooSmallOutputArray(usize, usize),
    IoErrors(ByteIoError)
}

impl Debug for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            HdrDecodeErrors::InvalidSignature => {
                writeln!(
                    f,
                    "Invalid signature, file does not start with #?RADIANCE or #?RGBE"
                )
            }
            HdrDecodeErrors::InvalidFormat(format) => {
                writeln!(
                    f,
                    "Invalid pixel format {format:?}, expected 32-bit_rle_rgbe or 32-bit_rle_xyze"
                )
            }
            HdrDecodeErrors::InvalidResolution(line) => {
                writeln!(f, "Invalid resolution string {line:?}")
            }
            HdrDecodeErrors::Corrupt(reason) => {
                writeln!(f, "Corrupt image: {reason}")
            }
            HdrDecodeErrors::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            HdrDecodeErrors::TooSmallOutputArray(expected, found) => {
                writeln!(f, "Too small of an output array, expected array of at least length {} but found {}", expected, found)
            }
            HdrDecodeErrors::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ByteIoError> for HdrDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        HdrDecodeErrors::IoErrors(value)
    }
}

impl Display for HdrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for HdrDecodeErrors {}
