/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance information header
//!
//! The header is a sequence of newline terminated text lines,
//! starting with a signature and ending with an empty line.
//!
//! ```text
//! #?RADIANCE
//! # a comment
//! FORMAT=32-bit_rle_rgbe
//! EXPOSURE=1.0
//!
//! ```
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hdrkit_core::bytestream::{ByteReader, ByteReaderTrait};
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::log::{trace, warn};

use crate::errors::HdrDecodeErrors;

const SIGNATURES: [&[u8]; 2] = [b"#?RADIANCE\n", b"#?RGBE\n"];

/// Pixel encodings a Radiance file may declare in its `FORMAT` variable
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    /// `32-bit_rle_rgbe`, shared exponent red, green and blue
    Rgbe,
    /// `32-bit_rle_xyze`, shared exponent CIE XYZ
    Xyze
}

impl PixelFormat {
    fn from_variable(value: &str) -> Option<PixelFormat> {
        match value {
            "32-bit_rle_rgbe" => Some(PixelFormat::Rgbe),
            "32-bit_rle_xyze" => Some(PixelFormat::Xyze),
            _ => None
        }
    }

    /// The value written in the `FORMAT` variable for this format
    pub const fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Rgbe => "32-bit_rle_rgbe",
            PixelFormat::Xyze => "32-bit_rle_xyze"
        }
    }

    /// Colorspace of the decoded pixels
    pub const fn colorspace(self) -> ColorSpace {
        match self {
            PixelFormat::Rgbe => ColorSpace::RGB,
            PixelFormat::Xyze => ColorSpace::XYZ
        }
    }
}

/// A parsed Radiance header
///
/// Variables are kept verbatim and in order of first appearance,
/// including ones the decoder does not understand.
#[derive(Clone, Debug)]
pub struct RadianceHeader {
    signature:  String,
    variables:  Vec<(String, String)>,
    format:     PixelFormat,
    exposure:   Option<f32>,
    header_end: u64
}

impl RadianceHeader {
    /// Parse the header from the current position of `reader`
    ///
    /// On success the reader is positioned at the start of the resolution line.
    pub fn parse<T: ByteReaderTrait>(
        reader: &mut ByteReader<T>
    ) -> Result<RadianceHeader, HdrDecodeErrors> {
        let mut line = Vec::with_capacity(128);

        reader.read_line_into(b'\n', &mut line)?;

        if !SIGNATURES.contains(&line.as_slice()) {
            return Err(HdrDecodeErrors::InvalidSignature);
        }
        // drop the trailing newline
        let signature = String::from_utf8_lossy(&line[..line.len() - 1]).to_string();

        let mut variables: Vec<(String, String)> = Vec::new();

        loop {
            let size = reader.read_line_into(b'\n', &mut line)?;

            if size == 0 {
                return Err(HdrDecodeErrors::Corrupt(
                    "End of file before the end of the header".to_string()
                ));
            }
            if line == b"\n" {
                break;
            }
            if line.starts_with(b"#") {
                // comment
                continue;
            }
            // key value, it should be lossy to avoid failure when the key is not valid
            // utf-8
            let text = String::from_utf8_lossy(&line);

            if let Some((key, value)) = text.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                if key.is_empty() {
                    continue;
                }
                match variables.iter_mut().find(|(k, _)| k == key) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => variables.push((key.to_string(), value.to_string()))
                }
            }
        }
        trace!("Header variables: {:?}", variables);

        let format = match variables.iter().find(|(k, _)| k == "FORMAT") {
            Some((_, value)) => PixelFormat::from_variable(value)
                .ok_or_else(|| HdrDecodeErrors::InvalidFormat(value.clone()))?,
            None => return Err(HdrDecodeErrors::InvalidFormat("<missing>".to_string()))
        };

        let exposure = variables
            .iter()
            .find(|(k, _)| k == "EXPOSURE")
            .and_then(|(_, value)| match value.parse::<f32>() {
                Ok(exposure) => Some(exposure),
                Err(_) => {
                    warn!("Ignoring malformed EXPOSURE value {:?}", value);
                    None
                }
            });

        let header_end = reader.position()?;

        Ok(RadianceHeader {
            signature,
            variables,
            format,
            exposure,
            header_end
        })
    }

    /// The signature without the leading `#?`, i.e `RADIANCE` or `RGBE`
    pub fn signature(&self) -> &str {
        self.signature.trim_start_matches("#?")
    }

    /// All `KEY=VALUE` variables in order of appearance
    pub fn variables(&self) -> &[(String, String)] {
        &self.variables
    }

    /// Look up a single variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// The `EXPOSURE` variable, if present and numeric
    pub const fn exposure(&self) -> Option<f32> {
        self.exposure
    }

    /// Stream offset immediately after the empty line ending the header
    pub const fn header_end(&self) -> u64 {
        self.header_end
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.format.colorspace()
    }
}
