/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use hdrkit_core::bytestream::ByteIoError;

/// PFM decoding errors
pub enum PfmDecodeErrors {
    /// The magic line or the scale line is not valid
    InvalidHeader(String),
    /// A valid PFM variant this decoder does not handle, i.e greyscale `Pf`
    UnsupportedVariant(String),
    /// Width or height is zero or not a number
    InvalidDimensions(String),
    /// The body holds fewer floats than the header promised
    Corrupt(String),
    /// Too large dimensions for a given dimension
    TooLargeDimensions(&'static str, usize, usize),
    IoErrors(ByteIoError)
}

impl Debug for PfmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidHeader(reason) => {
                writeln!(f, "Invalid header, reason: {reason}")
            }
            Self::UnsupportedVariant(variant) => {
                writeln!(
                    f,
                    "Unsupported PFM variant {variant}, only colour (PF) images are supported"
                )
            }
            Self::InvalidDimensions(reason) => {
                writeln!(f, "Invalid dimensions, reason: {reason}")
            }
            Self::Corrupt(reason) => {
                writeln!(f, "Corrupt image: {reason}")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ByteIoError> for PfmDecodeErrors {
    fn from(value: ByteIoError) -> Self {
        PfmDecodeErrors::IoErrors(value)
    }
}

impl Display for PfmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PfmDecodeErrors {}

/// PFM encoding errors
pub enum PfmEncodeErrors {
    /// The input size was expected to be of a certain size but isn't
    WrongInputSize(usize, usize),
    /// Width or height is zero
    ZeroDimensions(usize, usize),
    /// Generic message
    Static(&'static str),
    IoErrors(ByteIoError)
}

impl Debug for PfmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PfmEncodeErrors::WrongInputSize(expected, found) => {
                writeln!(f, "Input array length {found} doesn't match {expected}")
            }
            PfmEncodeErrors::ZeroDimensions(width, height) => {
                writeln!(f, "Cannot encode an image of {width}x{height} pixels")
            }
            PfmEncodeErrors::Static(err) => writeln!(f, "{}", err),
            PfmEncodeErrors::IoErrors(err) => writeln!(f, "I/O error {:?}", err)
        }
    }
}

impl From<&'static str> for PfmEncodeErrors {
    fn from(value: &'static str) -> Self {
        PfmEncodeErrors::Static(value)
    }
}

impl From<ByteIoError> for PfmEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        PfmEncodeErrors::IoErrors(value)
    }
}

impl Display for PfmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PfmEncodeErrors {}
