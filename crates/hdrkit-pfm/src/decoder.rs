/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use hdrkit_core::bytestream::{ByteReader, ByteReaderTrait};
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::log::{trace, warn};
use hdrkit_core::options::DecoderOptions;

use crate::errors::PfmDecodeErrors;

/// Header tokens are short numbers, anything longer is garbage
const MAX_TOKEN_LENGTH: usize = 64;

/// Byte order of the floats in a PFM body
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ByteEndian {
    /// Little endian, declared by a negative scale
    LE,
    /// Big endian, declared by a positive scale
    BE
}

/// A PFM decoder
///
/// The decoder handles colour (`PF`) images in either byte order,
/// rows are returned in the order they are stored.
pub struct PfmDecoder<T: ByteReaderTrait> {
    reader:          ByteReader<T>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    scale:           f32,
    endian:          ByteEndian,
    decoded_headers: bool
}

impl<T> PfmDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new pfm decoder with default options
    ///
    /// # Arguments
    /// - data: PFM encoded pixels
    ///
    /// # Example
    /// ```
    /// use hdrkit_core::bytestream::ByteCursor;
    /// use hdrkit_pfm::PfmDecoder;
    /// let mut decoder = PfmDecoder::new(ByteCursor::new(b"NOT VALID PFM"));
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(data: T) -> PfmDecoder<T> {
        PfmDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new PFM decoder with the specified options
    pub fn new_with_options(data: T, options: DecoderOptions) -> PfmDecoder<T> {
        PfmDecoder {
            reader: ByteReader::new(data),
            options,
            width: 0,
            height: 0,
            scale: 0.0,
            endian: ByteEndian::LE,
            decoded_headers: false
        }
    }

    /// Read the next whitespace delimited header token
    ///
    /// The whitespace byte ending the token is consumed
    fn read_token(&mut self) -> Result<String, PfmDecodeErrors> {
        self.reader
            .skip_until_false(|byte| byte.is_ascii_whitespace())?;

        let mut token = Vec::with_capacity(8);

        while !self.reader.eof()? {
            let byte = self.reader.get_u8_err()?;

            if byte.is_ascii_whitespace() {
                break;
            }
            token.push(byte);

            if token.len() > MAX_TOKEN_LENGTH {
                return Err(PfmDecodeErrors::InvalidHeader(format!(
                    "Header token longer than {MAX_TOKEN_LENGTH} bytes"
                )));
            }
        }
        Ok(String::from_utf8_lossy(&token).to_string())
    }

    fn read_dimension(&mut self, name: &'static str) -> Result<usize, PfmDecodeErrors> {
        let token = self.read_token()?;

        match token.parse::<usize>() {
            Ok(0) => Err(PfmDecodeErrors::InvalidDimensions(format!("{name} is zero"))),
            Ok(value) => Ok(value),
            Err(_) => Err(PfmDecodeErrors::InvalidDimensions(format!(
                "{name} {token:?} is not a positive integer"
            )))
        }
    }

    /// Read PFM headers and store them in internal state
    ///
    /// Return Err on Error otherwise return nothing,
    pub fn decode_headers(&mut self) -> Result<(), PfmDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let magic = self.read_token()?;

        match magic.as_str() {
            "PF" => (),
            "Pf" => return Err(PfmDecodeErrors::UnsupportedVariant(magic)),
            _ => {
                return Err(PfmDecodeErrors::InvalidHeader(format!(
                    "Expected PF as the magic bytes but found {magic:?}"
                )))
            }
        }
        let width = self.read_dimension("width")?;
        let height = self.read_dimension("height")?;

        if width > self.options.get_max_width() {
            return Err(PfmDecodeErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                width
            ));
        }
        if height > self.options.get_max_height() {
            return Err(PfmDecodeErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                height
            ));
        }

        let scale_token = self.read_token()?;

        let scale = scale_token.parse::<f32>().map_err(|_| {
            PfmDecodeErrors::InvalidHeader(format!("Scale {scale_token:?} is not a number"))
        })?;

        if scale == 0.0 || scale.is_nan() {
            return Err(PfmDecodeErrors::InvalidHeader(format!(
                "Scale {scale_token:?} has no sign to derive the byte order from"
            )));
        }
        self.endian = if scale < 0.0 {
            ByteEndian::LE
        } else {
            ByteEndian::BE
        };

        trace!("Width: {}, height: {}", width, height);
        trace!("Scale: {}, byte order: {:?}", scale, self.endian);

        self.width = width;
        self.height = height;
        self.scale = scale;
        self.decoded_headers = true;

        Ok(())
    }

    /// Return image dimensions or none if headers aren't decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the image colorspace or none if
    /// headers aren't decoded
    pub const fn get_colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(ColorSpace::RGB)
        } else {
            None
        }
    }

    /// Byte order of the body, derived from the sign of the scale
    pub const fn endianness(&self) -> Option<ByteEndian> {
        if self.decoded_headers {
            Some(self.endian)
        } else {
            None
        }
    }

    /// The scale value written in the header
    ///
    /// Only its sign is interpreted, the magnitude is reported as is
    pub const fn scale(&self) -> Option<f32> {
        if self.decoded_headers {
            Some(self.scale)
        } else {
            None
        }
    }

    /// Return the number of floats needed to hold the decoded image
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width.checked_mul(self.height)?.checked_mul(3)
        } else {
            None
        }
    }

    /// Decode a PFM image returning floats in row major, channel minor order
    pub fn decode(&mut self) -> Result<Vec<f32>, PfmDecodeErrors> {
        self.decode_headers()?;

        let size = self
            .output_buffer_size()
            .ok_or(PfmDecodeErrors::TooLargeDimensions(
                "output buffer",
                usize::MAX,
                usize::MAX
            ))?;

        let byte_count = size.checked_mul(4).ok_or(PfmDecodeErrors::TooLargeDimensions(
            "output buffer",
            usize::MAX,
            usize::MAX
        ))?;

        if self.reader.remaining_len()? < byte_count as u64 {
            return Err(PfmDecodeErrors::Corrupt(format!(
                "Expected {size} floats in the body but the file is shorter"
            )));
        }
        let mut bytes = vec![0_u8; byte_count];

        match self.reader.read_exact_bytes(&mut bytes) {
            Ok(()) => (),
            Err(e) if e.is_eof() => {
                return Err(PfmDecodeErrors::Corrupt(format!(
                    "Expected {size} floats in the body but the file is shorter"
                )))
            }
            Err(e) => return Err(PfmDecodeErrors::IoErrors(e))
        }

        if !self.reader.eof()? {
            warn!("Ignoring trailing bytes after the PFM body");
        }

        let pixels = match self.endian {
            ByteEndian::LE => bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            ByteEndian::BE => bytes
                .chunks_exact(4)
                .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        };
        Ok(pixels)
    }
}
