/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PFM encoder

use alloc::format;

use hdrkit_core::bytestream::{ByteWriter, ByteWriterTrait};
use hdrkit_core::log::trace;

use crate::errors::PfmEncodeErrors;

/// A simple PFM encoder
///
/// Data is expected to be in `f32` and its size should be
/// `width*height*3`.
///
/// Images are always written as little endian colour (`PF`) files with a
/// scale of `-1.0`, so decoding the output gives back the exact same floats.
pub struct PfmEncoder<'a> {
    data:   &'a [f32],
    width:  usize,
    height: usize
}

impl<'a> PfmEncoder<'a> {
    /// Create a new PFM encoder context that can encode
    /// the provided data
    ///
    /// # Arguments
    ///  - `data`: RGB floats to encode, row major
    ///  - `width`, `height`: Image dimensions
    pub fn new(data: &'a [f32], width: usize, height: usize) -> PfmEncoder<'a> {
        Self {
            data,
            width,
            height
        }
    }

    /// Exact number of bytes [`encode`](Self::encode) will write
    pub fn expected_buffer_size(&self) -> Option<usize> {
        let header = format!("PF\n{} {}\n-1.0\n", self.width, self.height);

        self.width
            .checked_mul(self.height)?
            .checked_mul(3 * 4)?
            .checked_add(header.len())
    }

    /// Encode into a sink
    ///
    /// # Returns
    /// - Ok(usize):  The number of bytes written into out
    /// - Err(PfmEncodeErrors): An error if something occurred
    ///
    /// # Examples
    /// - Encode a black image of 10x10
    ///```
    /// use hdrkit_pfm::PfmEncoder;
    /// let w = 10;
    /// let h = 10;
    /// let data = vec![0.0_f32;w*h*3];
    /// let encoder = PfmEncoder::new(&data,w,h);
    /// let mut output = Vec::with_capacity(encoder.expected_buffer_size().unwrap());
    /// let size = encoder.encode(&mut output).unwrap();
    /// assert_eq!(size, output.len());
    ///```
    pub fn encode<T: ByteWriterTrait>(&self, out: T) -> Result<usize, PfmEncodeErrors> {
        if self.width == 0 || self.height == 0 {
            return Err(PfmEncodeErrors::ZeroDimensions(self.width, self.height));
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(PfmEncodeErrors::Static("overflow detected"))?
            .checked_mul(3)
            .ok_or(PfmEncodeErrors::Static("overflow detected"))?;

        let found = self.data.len();

        if expected != found {
            return Err(PfmEncodeErrors::WrongInputSize(expected, found));
        }
        let mut writer = ByteWriter::new(out);

        if let Some(size) = self.expected_buffer_size() {
            writer.reserve(size)?;
        }
        let header = format!("PF\n{} {}\n-1.0\n", self.width, self.height);

        writer.write_all(header.as_bytes())?;

        for value in self.data {
            writer.write_f32_le(*value)?;
        }
        writer.flush()?;

        trace!("Wrote {} bytes", writer.bytes_written());

        Ok(writer.bytes_written())
    }
}
