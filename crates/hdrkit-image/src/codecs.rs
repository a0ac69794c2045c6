/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs the library understands
//!
//! Formats are chosen from the file extension, there is no sniffing of
//! the file contents.
//!
//! | Format   | Extension | Decode | Encode |
//! |----------|-----------|--------|--------|
//! | Radiance | `.hdr`    | yes    | no     |
//! | PFM      | `.pfm`    | yes    | yes    |
//! | OpenEXR  | `.exr`    | with the `exr` feature | no |
use std::path::Path;

use hdrkit_core::bytestream::{ByteCursor, ByteReaderTrait, ByteWriterTrait};
use hdrkit_core::log::trace;
use hdrkit_core::options::DecoderOptions;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::{DecoderTrait, EncoderTrait};

pub mod hdr;
pub mod openexr;
pub mod pfm;

/// Extensions of all files we treat as HDR images, lowercase
pub const HDR_IMG_EXTENSIONS: [&str; 3] = ["hdr", "exr", "pfm"];

/// All supported image formats
///
/// This enum contains supported image formats, either
/// encoders or decoders for a particular image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Radiance RGBE/XYZE files
    Radiance,
    /// Portable floatmap
    Pfm,
    /// OpenEXR, decoded by the `exr` crate
    OpenExr,
    /// Any unknown format
    Unknown
}

impl ImageFormat {
    /// Return the format for a file extension
    ///
    /// The comparison ignores case and a leading dot,
    /// unknown extensions return [`ImageFormat::Unknown`]
    ///
    /// # Example
    /// ```
    /// use hdrkit_image::codecs::ImageFormat;
    /// assert_eq!(ImageFormat::from_extension(".HDR"), ImageFormat::Radiance);
    /// assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Unknown);
    /// ```
    pub fn from_extension(extension: &str) -> ImageFormat {
        let extension = extension.trim_start_matches('.');

        if extension.eq_ignore_ascii_case("hdr") {
            ImageFormat::Radiance
        } else if extension.eq_ignore_ascii_case("pfm") {
            ImageFormat::Pfm
        } else if extension.eq_ignore_ascii_case("exr") {
            ImageFormat::OpenExr
        } else {
            ImageFormat::Unknown
        }
    }

    /// Return the format for a path based on its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImageFormat {
        match path.as_ref().extension() {
            Some(ext) => ImageFormat::from_extension(&ext.to_string_lossy()),
            None => ImageFormat::Unknown
        }
    }

    /// Return true if the path names one of the HDR image types
    ///
    /// This is independent of which decoders were compiled in
    pub fn is_hdr_extension<P: AsRef<Path>>(path: P) -> bool {
        ImageFormat::from_path(path) != ImageFormat::Unknown
    }

    /// Return true if a decoder for this format is compiled in
    pub fn has_decoder(self) -> bool {
        match self {
            ImageFormat::Radiance | ImageFormat::Pfm => true,
            ImageFormat::OpenExr => cfg!(feature = "exr"),
            ImageFormat::Unknown => false
        }
    }

    /// Return true if images can be written in this format
    pub fn has_encoder(self) -> bool {
        matches!(self, ImageFormat::Pfm)
    }

    pub fn decoder<'a, T>(&self, data: T) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        T: ByteReaderTrait + 'a
    {
        self.decoder_with_options(data, DecoderOptions::default())
    }

    /// Create a decoder for this format reading from `data`
    ///
    /// # Errors
    /// - [`ImageErrors::FormatNotIncluded`] for OpenEXR without the `exr` feature
    /// - [`ImageErrors::FormatNotSupported`] for unknown formats
    pub fn decoder_with_options<'a, T>(
        &self, data: T, options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        T: ByteReaderTrait + 'a
    {
        match self {
            ImageFormat::Radiance => Ok(Box::new(hdr::HdrDecoder::new_with_options(
                data, options
            ))),
            ImageFormat::Pfm => Ok(Box::new(pfm::PfmDecoder::new_with_options(
                data, options
            ))),
            ImageFormat::OpenExr => {
                #[cfg(feature = "exr")]
                {
                    Ok(Box::new(openexr::ExrDecoder::new_with_options(data, options)))
                }
                #[cfg(not(feature = "exr"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::FormatNotIncluded(*self))
                }
            }
            ImageFormat::Unknown => Err(ImageErrors::FormatNotSupported(*self))
        }
    }

    /// Encode an image in this format writing to `sink`
    ///
    /// # Returns
    /// Number of bytes written
    pub fn encode<T: ByteWriterTrait>(&self, image: &Image, sink: T) -> Result<usize, ImageErrors> {
        match self {
            ImageFormat::Pfm => pfm::PfmImageEncoder::new().encode(image, sink),
            ImageFormat::Radiance | ImageFormat::OpenExr => {
                Err(ImageErrors::NoEncoderForFormat(*self))
            }
            ImageFormat::Unknown => Err(ImageErrors::FormatNotSupported(*self))
        }
    }
}

impl Image {
    /// Open an encoded file choosing the decoder from its extension
    ///
    /// # Example
    /// ```no_run
    /// use hdrkit_image::image::Image;
    /// let image = Image::open("memorial.hdr").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Image, ImageErrors> {
        Self::open_with_options(file, DecoderOptions::default())
    }

    /// Open an encoded file with the specified decoder options
    ///
    /// # Example
    ///  -  Decode a truncated Radiance file keeping whatever scanlines are present
    ///
    /// ```no_run
    /// use hdrkit_core::options::DecoderOptions;
    /// use hdrkit_image::image::Image;
    /// let options = DecoderOptions::default().set_strict_mode(false);
    /// let image = Image::open_with_options("/a/file.hdr",options).unwrap();
    /// ```
    pub fn open_with_options<P: AsRef<Path>>(
        file: P, options: DecoderOptions
    ) -> Result<Image, ImageErrors> {
        let format = ImageFormat::from_path(file.as_ref());

        if format == ImageFormat::Unknown {
            return Err(ImageErrors::FormatNotSupported(format));
        }
        trace!("Opening {:?} as {:?}", file.as_ref(), format);

        let reader = std::io::BufReader::new(std::fs::File::open(file)?);
        Self::read(reader, format, options)
    }

    /// Decode an image of a known format from a byte source
    ///
    /// # Example
    /// ```
    /// use hdrkit_core::bytestream::ByteCursor;
    /// use hdrkit_core::options::DecoderOptions;
    /// use hdrkit_image::codecs::ImageFormat;
    /// use hdrkit_image::image::Image;
    ///
    /// let mut pfm = b"PF\n1 1\n-1.0\n".to_vec();
    /// pfm.extend_from_slice(&[0; 12]);
    /// let image = Image::read(ByteCursor::new(pfm), ImageFormat::Pfm, DecoderOptions::default()).unwrap();
    /// assert_eq!(image.dimensions(), (1, 1));
    /// ```
    pub fn read<T>(src: T, format: ImageFormat, options: DecoderOptions) -> Result<Image, ImageErrors>
    where
        T: ByteReaderTrait
    {
        let mut decoder = format.decoder_with_options(src, options)?;
        decoder.decode()
    }

    /// Decode an image of a known format already in memory
    pub fn read_bytes(bytes: &[u8], format: ImageFormat) -> Result<Image, ImageErrors> {
        Self::read(ByteCursor::new(bytes), format, DecoderOptions::default())
    }

    /// Save an image, choosing the format from the file extension
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ImageErrors> {
        let format = ImageFormat::from_path(file.as_ref());

        if format == ImageFormat::Unknown {
            let msg = format!("No encoder for file {:?}", file.as_ref());
            return Err(ImageErrors::GenericString(msg));
        }
        self.save_to(file, format)
    }

    /// Save an image using a specified format to a file
    ///
    /// The file is created if missing and truncated otherwise
    pub fn save_to<P: AsRef<Path>>(&self, file: P, format: ImageFormat) -> Result<(), ImageErrors> {
        if !format.has_encoder() {
            return Err(ImageErrors::NoEncoderForFormat(format));
        }
        // open a file for which we will write directly to
        let mut file = std::io::BufWriter::new(
            std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(file)?
        );
        format.encode(self, &mut file)?;
        Ok(())
    }

    /// Encode an image returning a vector containing the result
    /// of the encoding
    ///
    /// # Example
    /// ```
    /// use hdrkit_core::colorspace::ColorSpace;
    /// use hdrkit_image::codecs::ImageFormat;
    /// use hdrkit_image::image::Image;
    ///
    /// let image = Image::fill(0.5, 2, 2, ColorSpace::RGB).unwrap();
    /// let bytes = image.write_to_vec(ImageFormat::Pfm).unwrap();
    /// assert!(bytes.starts_with(b"PF\n2 2\n-1.0\n"));
    /// ```
    pub fn write_to_vec(&self, format: ImageFormat) -> Result<Vec<u8>, ImageErrors> {
        if format.has_encoder() {
            let mut sink = vec![];
            format.encode(self, &mut sink)?;
            Ok(sink)
        } else {
            Err(ImageErrors::NoEncoderForFormat(format))
        }
    }
}

#[cfg(test)]
mod tests {
    use hdrkit_core::bytestream::ByteCursor;
    use hdrkit_core::colorspace::ColorSpace;
    use hdrkit_core::options::DecoderOptions;

    use crate::codecs::ImageFormat;
    use crate::errors::ImageErrors;
    use crate::image::Image;

    #[test]
    fn extension_dispatch() {
        assert_eq!(ImageFormat::from_extension("hdr"), ImageFormat::Radiance);
        assert_eq!(ImageFormat::from_extension(".Pfm"), ImageFormat::Pfm);
        assert_eq!(ImageFormat::from_extension("EXR"), ImageFormat::OpenExr);
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_path("a/b/c.hdr"), ImageFormat::Radiance);
        assert_eq!(ImageFormat::from_path("no_extension"), ImageFormat::Unknown);

        assert!(ImageFormat::is_hdr_extension("image.hdr"));
        assert!(!ImageFormat::is_hdr_extension("image.hrd"));
    }

    #[test]
    fn unknown_formats_are_rejected() {
        assert!(matches!(
            Image::read_bytes(b"", ImageFormat::Unknown),
            Err(ImageErrors::FormatNotSupported(ImageFormat::Unknown))
        ));
        let image = Image::fill(1.0, 1, 1, ColorSpace::RGB).unwrap();
        assert!(matches!(
            image.write_to_vec(ImageFormat::Radiance),
            Err(ImageErrors::NoEncoderForFormat(ImageFormat::Radiance))
        ));
    }

    #[cfg(not(feature = "exr"))]
    #[test]
    fn exr_without_feature() {
        assert!(!ImageFormat::OpenExr.has_decoder());
        assert!(matches!(
            Image::read_bytes(b"", ImageFormat::OpenExr),
            Err(ImageErrors::FormatNotIncluded(ImageFormat::OpenExr))
        ));
    }

    #[test]
    fn pfm_round_trip_through_image() {
        let data: Vec<f32> = (0..24).map(|x| x as f32 * 0.25 - 2.0).collect();
        let image = Image::new(data, 4, 2, ColorSpace::RGB).unwrap();

        let bytes = image.write_to_vec(ImageFormat::Pfm).unwrap();
        let decoded = Image::read(
            ByteCursor::new(bytes),
            ImageFormat::Pfm,
            DecoderOptions::default()
        )
        .unwrap();

        assert_eq!(decoded, image);
    }

    #[test]
    fn pfm_encoder_rejects_luma() {
        let image = Image::fill(1.0, 2, 2, ColorSpace::Luma).unwrap();
        assert!(matches!(
            image.write_to_vec(ImageFormat::Pfm),
            Err(ImageErrors::UnsupportedColorspace(ColorSpace::Luma, _, _))
        ));
    }

    #[test]
    fn radiance_flat_body() {
        let mut data = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 2\n".to_vec();
        data.extend_from_slice(&[128, 64, 0, 129, 0, 0, 0, 0]);

        let image = Image::read_bytes(&data, ImageFormat::Radiance).unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.colorspace(), ColorSpace::RGB);
        assert_eq!(image.data(), &[1.0, 0.5, 0.0, 0.0, 0.0, 0.0]);
    }
}
