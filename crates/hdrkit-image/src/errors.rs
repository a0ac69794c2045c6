/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use hdrkit_core::bytestream::ByteIoError;
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_hdr::HdrDecodeErrors;
use hdrkit_pfm::{PfmDecodeErrors, PfmEncodeErrors};

use crate::codecs::ImageFormat;

/// All possible image errors that can occur.
///
/// This is the grandfather of image errors and contains
/// all decoding, processing and encoding errors possible
pub enum ImageErrors {
    /// A Radiance file could not be decoded
    HdrDecodeErrors(HdrDecodeErrors),
    /// A PFM file could not be decoded
    PfmDecodeErrors(PfmDecodeErrors),
    /// An image could not be written as PFM
    PfmEncodeErrors(PfmEncodeErrors),
    /// Decoding failed in a decoder without a dedicated error type
    ImageDecodeErrors(String),
    /// The format is not one of the HDR formats we understand
    FormatNotSupported(ImageFormat),
    /// The format can be read but not written
    NoEncoderForFormat(ImageFormat),
    /// Support for the format was not compiled in
    FormatNotIncluded(ImageFormat),
    /// A valid file of a known format that we cannot represent,
    /// e.g an OpenEXR file without RGB channels
    UnsupportedVariant(String),
    /// The operation or encoder does not accept images in this colorspace
    UnsupportedColorspace(ColorSpace, &'static str, &'static [ColorSpace]),
    /// Buffer length does not match image dimensions, expected, found
    DimensionsMisMatch(usize, usize),
    /// Width or height is zero, or two images have different shapes
    InvalidDimensions(String),
    IoError(std::io::Error),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HdrDecodeErrors(err) => writeln!(f, "hdr: {err:?}"),
            Self::PfmDecodeErrors(err) => writeln!(f, "pfm: {err:?}"),
            Self::PfmEncodeErrors(err) => writeln!(f, "pfm encoding: {err:?}"),
            Self::ImageDecodeErrors(err) => writeln!(f, "{err}"),
            Self::FormatNotSupported(format) => {
                writeln!(f, "The format {format:?} is not a supported HDR format")
            }
            Self::NoEncoderForFormat(format) => {
                writeln!(f, "No encoder present for format {format:?}")
            }
            Self::FormatNotIncluded(format) => {
                writeln!(
                    f,
                    "Support for {format:?} was not included, enable its feature to read it"
                )
            }
            Self::UnsupportedVariant(reason) => {
                writeln!(f, "Unsupported image variant: {reason}")
            }
            Self::UnsupportedColorspace(present, operation, supported) => {
                writeln!(
                    f,
                    "Unsupported colorspace {present:?}, for the operation {operation}\nSupported colorspaces are {supported:?}"
                )
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} but found {found}"
                )
            }
            Self::InvalidDimensions(reason) => {
                writeln!(f, "Invalid dimensions: {reason}")
            }
            Self::IoError(err) => writeln!(f, "I/O error: {err:?}"),
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

impl From<HdrDecodeErrors> for ImageErrors {
    fn from(value: HdrDecodeErrors) -> Self {
        Self::HdrDecodeErrors(value)
    }
}

impl From<PfmDecodeErrors> for ImageErrors {
    fn from(value: PfmDecodeErrors) -> Self {
        Self::PfmDecodeErrors(value)
    }
}

impl From<PfmEncodeErrors> for ImageErrors {
    fn from(value: PfmEncodeErrors) -> Self {
        Self::PfmEncodeErrors(value)
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}

impl From<ByteIoError> for ImageErrors {
    fn from(value: ByteIoError) -> Self {
        Self::ImageDecodeErrors(format!("{value:?}"))
    }
}

impl From<&'static str> for ImageErrors {
    fn from(value: &'static str) -> Self {
        Self::GenericStr(value)
    }
}

impl From<String> for ImageErrors {
    fn from(value: String) -> Self {
        Self::GenericString(value)
    }
}
