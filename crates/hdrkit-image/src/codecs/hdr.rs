/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Radiance HDR decoding support
use hdrkit_core::bytestream::ByteReaderTrait;
use hdrkit_core::colorspace::ColorSpace;
pub use hdrkit_hdr::{HdrDecodeErrors, HdrDecoder, PixelFormat, RadianceHeader, Resolution};

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

impl<T> DecoderTrait for HdrDecoder<T>
where
    T: ByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let pixels = self.decode()?;
        let (width, height) = self
            .dimensions()
            .ok_or(ImageErrors::GenericStr("hdr: dimensions missing after decoding"))?;
        let colorspace = self.get_colorspace().unwrap_or(ColorSpace::RGB);

        Image::new(pixels, width, height, colorspace)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions()
    }

    fn out_colorspace(&self) -> Option<ColorSpace> {
        self.get_colorspace()
    }

    fn name(&self) -> &'static str {
        "HDR decoder"
    }

    fn read_headers(&mut self) -> Result<(usize, usize), ImageErrors> {
        self.decode_headers()?;

        self.dimensions()
            .ok_or(ImageErrors::GenericStr("hdr: dimensions missing after header"))
    }
}
