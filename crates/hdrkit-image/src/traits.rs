/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Common traits implemented by image decoders and encoders
use hdrkit_core::bytestream::ByteWriterTrait;
use hdrkit_core::colorspace::ColorSpace;

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::image::Image;

/// Encapsulates an image decoder.
///
/// All supported image decoders must implement this class
pub trait DecoderTrait {
    /// Decode a buffer already in memory
    ///
    /// The buffer to be decoded is the one passed
    /// to the decoder when initializing the decoder
    ///
    /// # Returns
    /// - Image -> Pixels decoded from the image as interleaved `f32` samples
    ///
    /// # Errors
    ///  - Any image decoding errors will be propagated to the caller.
    fn decode(&mut self) -> Result<Image, ImageErrors>;

    /// Get width and height of the image
    ///
    /// # Returns
    /// - Some(width,height)
    /// - None -> If image hasn't been decoded and we can't extract
    ///  the width and height.
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Get the colorspace that the decoded pixels are in
    ///
    /// # Returns
    /// - Some(colorspace) after headers were decoded
    /// - None otherwise
    fn out_colorspace(&self) -> Option<ColorSpace>;

    /// Get the name of the decoder
    fn name(&self) -> &'static str;

    /// Decode headers only, returning the image dimensions
    fn read_headers(&mut self) -> Result<(usize, usize), ImageErrors>;
}

/// This encapsulates an image encoder
///
/// All supported image encoders must implement this class
pub trait EncoderTrait {
    /// Get the name of the encoder
    fn name(&self) -> &'static str;

    /// Encode and write to a file
    ///
    /// The image is guaranteed to be in a supported colorspace
    /// when this is called
    fn encode_inner<T: ByteWriterTrait>(
        &mut self, image: &Image, sink: T
    ) -> Result<usize, ImageErrors>;

    /// Return all colorspaces supported by this encoder.
    fn supported_colorspaces(&self) -> &'static [ColorSpace];

    /// Returns the common format the encoder produces
    fn format(&self) -> ImageFormat;

    /// Encode the image returning the number of bytes written
    ///
    /// # Errors
    /// [`ImageErrors::UnsupportedColorspace`] if the encoder cannot
    /// represent the image colorspace
    fn encode<T: ByteWriterTrait>(&mut self, image: &Image, sink: T) -> Result<usize, ImageErrors> {
        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(
                colorspace,
                self.name(),
                self.supported_colorspaces()
            ));
        }
        self.encode_inner(image, sink)
    }
}
