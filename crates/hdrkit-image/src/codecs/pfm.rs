/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable floatmap decoding and encoding support
use hdrkit_core::bytestream::{ByteReaderTrait, ByteWriterTrait};
use hdrkit_core::colorspace::ColorSpace;
pub use hdrkit_pfm::{ByteEndian, PfmDecodeErrors, PfmDecoder, PfmEncodeErrors, PfmEncoder};

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::{DecoderTrait, EncoderTrait};

impl<T> DecoderTrait for PfmDecoder<T>
where
    T: ByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let pixels = self.decode()?;
        let (width, height) = self
            .dimensions()
            .ok_or(ImageErrors::GenericStr("pfm: dimensions missing after decoding"))?;

        Image::new(pixels, width, height, ColorSpace::RGB)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions()
    }

    fn out_colorspace(&self) -> Option<ColorSpace> {
        self.get_colorspace()
    }

    fn name(&self) -> &'static str {
        "PFM decoder"
    }

    fn read_headers(&mut self) -> Result<(usize, usize), ImageErrors> {
        self.decode_headers()?;

        self.dimensions()
            .ok_or(ImageErrors::GenericStr("pfm: dimensions missing after header"))
    }
}

/// Writes RGB images as little endian PFM files
#[derive(Copy, Clone, Debug, Default)]
pub struct PfmImageEncoder;

impl PfmImageEncoder {
    pub fn new() -> PfmImageEncoder {
        PfmImageEncoder
    }
}

impl EncoderTrait for PfmImageEncoder {
    fn name(&self) -> &'static str {
        "PFM encoder"
    }

    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImageErrors> {
        let (width, height) = image.dimensions();

        let written = PfmEncoder::new(image.data(), width, height).encode(sink)?;

        Ok(written)
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::RGB]
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Pfm
    }
}
