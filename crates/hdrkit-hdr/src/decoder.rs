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

use crate::errors::HdrDecodeErrors;
use crate::header::RadianceHeader;
use crate::orientation::{flop, transpose, vertical_flip};
use crate::resolution::Resolution;

/// Marker starting every new style run length encoded scanline
const RLE_MARKER: [u8; 2] = [0x02, 0x02];

/// A simple radiance HDR decoder
///
/// # Accessing metadata
///
/// Radiance files may contain metadata in it's headers as key value pairs,
/// we keep them in the parsed [`RadianceHeader`] and expose them
/// in order of appearance via [`metadata`](Self::metadata).
///
/// The decoder does not interpret any variable other than `FORMAT` and `EXPOSURE`.
/// In particular the `EXPOSURE` value is reported but never applied to pixels.
pub struct HdrDecoder<T: ByteReaderTrait> {
    buf:             ByteReader<T>,
    options:         DecoderOptions,
    header:          Option<RadianceHeader>,
    resolution:      Option<Resolution>,
    decoded_headers: bool
}

impl<T> HdrDecoder<T>
where
    T: ByteReaderTrait
{
    /// Create a new HDR decoder
    ///
    /// # Arguments
    ///
    /// * `data`: Raw HDR file contents
    ///
    /// returns: HdrDecoder
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hdrkit_hdr::HdrDecoder;
    /// // read hdr file to memory
    /// let file_data = std::io::BufReader::new(std::fs::File::open("sample.hdr").unwrap());
    /// let decoder = HdrDecoder::new(file_data);
    /// ```
    pub fn new(data: T) -> HdrDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new HDR decoder with the specified options
    ///
    /// # Arguments
    ///
    /// * `data`: Raw HDR file contents
    /// * `options`: Decoder options that influence how decoding occurs
    ///
    /// returns: HdrDecoder
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::io::BufReader;
    /// use hdrkit_core::options::DecoderOptions;
    /// use hdrkit_hdr::HdrDecoder;
    /// let file_data = std::fs::File::open("sample.hdr").unwrap();
    /// // set that the decoder does not decode images greater than
    /// // 50 px width
    /// let options = DecoderOptions::default().set_max_width(50);
    /// // use the options set
    /// let decoder = HdrDecoder::new_with_options(BufReader::new(file_data),options);
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> HdrDecoder<T> {
        HdrDecoder {
            buf: ByteReader::new(data),
            options,
            header: None,
            resolution: None,
            decoded_headers: false
        }
    }

    /// Get key value metadata found in the header, in order of appearance
    ///
    /// In case the key or value contains non-valid UTF-8, the
    /// characters are replaced with [REPLACEMENT_CHARACTER](core::char::REPLACEMENT_CHARACTER)
    ///
    /// Empty if the headers haven't been decoded
    pub fn metadata(&self) -> &[(String, String)] {
        match &self.header {
            Some(header) => header.variables(),
            None => &[]
        }
    }

    /// The parsed information header
    pub const fn header(&self) -> Option<&RadianceHeader> {
        self.header.as_ref()
    }

    /// The parsed resolution line
    pub const fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Decode headers for the HDR image
    ///
    /// This parses the information header and the resolution line.
    /// The struct is modified in place and data can be
    /// extracted from appropriate getters.
    pub fn decode_headers(&mut self) -> Result<(), HdrDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let header = RadianceHeader::parse(&mut self.buf)?;

        let mut line = Vec::with_capacity(32);

        if self.buf.read_line_into(b'\n', &mut line)? == 0 {
            return Err(HdrDecodeErrors::Corrupt(
                "End of file before the resolution line".to_string()
            ));
        }
        let resolution = Resolution::parse(&String::from_utf8_lossy(&line))?;

        if resolution.height() > self.options.get_max_height() {
            return Err(HdrDecodeErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                resolution.height()
            ));
        }

        if resolution.width() > self.options.get_max_width() {
            return Err(HdrDecodeErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                resolution.width()
            ));
        }

        trace!("Format: {}", header.format().as_str());
        trace!("Width: {}", resolution.width());
        trace!("Height: {}", resolution.height());

        if !resolution.is_standard() {
            trace!(
                "Non standard orientation, flip_lr:{} flip_ud:{} rotated:{}",
                resolution.flip_lr(),
                resolution.flip_ud(),
                resolution.rotated()
            );
        }

        self.header = Some(header);
        self.resolution = Some(resolution);
        self.decoded_headers = true;

        Ok(())
    }

    /// Get image dimensions as a tuple of width and height
    /// or `None` if the image hasn't been decoded.
    ///
    /// # Returns
    /// - `Some(width,height)`: Image dimensions
    /// -  None : The image headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.resolution.map(|r| (r.width(), r.height()))
    }

    /// Return the input colorspace of the image
    ///
    /// `RGB` for `32-bit_rle_rgbe` files and `XYZ` for `32-bit_rle_xyze` ones
    ///
    /// # Returns
    /// -`Some(Colorspace)`: Input colorspace
    /// - None : Indicates the headers weren't decoded
    pub fn get_colorspace(&self) -> Option<ColorSpace> {
        self.header.as_ref().map(|h| h.colorspace())
    }

    /// Decode HDR file return a vector containing decoded
    /// coefficients
    ///
    /// # Returns
    /// - `Ok(Vec<f32>)`: The actual decoded coefficients
    /// - `Err(HdrDecodeErrors)`: Indicates an unrecoverable
    ///  error occurred during decoding.
    pub fn decode(&mut self) -> Result<Vec<f32>, HdrDecodeErrors> {
        self.decode_headers()?;

        let size = self.output_buffer_size().ok_or(HdrDecodeErrors::TooLargeDimensions(
            "output buffer",
            usize::MAX,
            usize::MAX
        ))?;
        self.body_layout()?;

        let mut buffer = vec![0.0f32; size];

        self.decode_into(&mut buffer)?;

        Ok(buffer)
    }

    /// Return the number of floats required to hold a decoded image frame
    ///
    /// # Returns
    ///  - `Some(usize)`: Minimum size for a buffer needed to decode the image
    ///  - `None`: Indicates the image headers were not decoded or
    /// `width*height*colorspace` calculation  overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        let (width, height) = self.dimensions()?;
        width.checked_mul(height)?.checked_mul(3)
    }

    /// Decode into a pre-allocated buffer
    ///
    /// It is an error if the buffer size is smaller than
    /// [`output_buffer_size()`](Self::output_buffer_size)
    ///
    /// If the buffer is bigger than expected, we ignore the end padding bytes
    ///
    /// # Example
    ///
    /// - Read  headers and then alloc a buffer big enough to hold the image
    ///
    /// ```no_run
    /// use hdrkit_core::bytestream::ByteCursor;
    /// use hdrkit_hdr::HdrDecoder;
    /// let mut decoder = HdrDecoder::new(ByteCursor::new(&[]));
    /// // before we get output, we must decode the headers to get width
    /// // height, and input colorspace
    /// decoder.decode_headers().unwrap();
    ///
    /// let mut out = vec![0.0;decoder.output_buffer_size().unwrap()];
    /// // write into out
    /// decoder.decode_into(&mut out).unwrap();
    /// ```
    pub fn decode_into(&mut self, buffer: &mut [f32]) -> Result<(), HdrDecodeErrors> {
        self.decode_headers()?;

        let resolution = self
            .resolution
            .ok_or(HdrDecodeErrors::Corrupt("Missing resolution".to_string()))?;

        let output_size = self.output_buffer_size().ok_or(HdrDecodeErrors::TooLargeDimensions(
            "output buffer",
            usize::MAX,
            usize::MAX
        ))?;

        if buffer.len() < output_size {
            return Err(HdrDecodeErrors::TooSmallOutputArray(
                output_size,
                buffer.len()
            ));
        }
        let count = resolution.scanline_count();
        let length = resolution.scanline_length();
        let (is_rle, raw_size) = self.body_layout()?;

        // R,G,B,E for every pixel in file order
        let mut raw = vec![0_u8; raw_size];

        let decoded = if is_rle {
            trace!("Run length encoded body");
            self.decode_rle(&mut raw, count, length)?
        } else {
            trace!("Flat body");
            self.decode_flat(&mut raw, count)?
        };

        if decoded < count {
            if self.options.get_strict_mode() {
                return Err(HdrDecodeErrors::Corrupt(format!(
                    "Expected {count} scanlines but only {decoded} could be decoded"
                )));
            }
            warn!(
                "Expected {} scanlines but only {} could be decoded, filling the rest with zeroes",
                count,
                decoded
            );
        }

        let output = &mut buffer[..output_size];

        if resolution.rotated() {
            let mut file_order = vec![0.0_f32; output_size];
            convert_scanline(&raw, &mut file_order);
            // file order has `count` rows of `length` pixels, i.e width rows of height pixels
            transpose(&file_order, output, count, length, 3);
        } else {
            convert_scanline(&raw, output);
        }

        if resolution.flip_ud() {
            vertical_flip(output, resolution.width(), 3);
        }
        if resolution.flip_lr() {
            flop(output, resolution.width(), 3);
        }

        Ok(())
    }

    /// Check the body against the declared resolution before anything is allocated
    ///
    /// Returns whether the body is run length encoded and the number of
    /// RGBE bytes it expands to.
    fn body_layout(&mut self) -> Result<(bool, usize), HdrDecodeErrors> {
        let resolution = self
            .resolution
            .ok_or(HdrDecodeErrors::Corrupt("Missing resolution".to_string()))?;

        let count = resolution.scanline_count();
        let length = resolution.scanline_length();

        let raw_size = count
            .checked_mul(length)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(HdrDecodeErrors::TooLargeDimensions(
                "body",
                usize::MAX,
                usize::MAX
            ))?;

        let is_rle = match self.buf.peek_at(0, 2) {
            Ok(bytes) => bytes == RLE_MARKER,
            Err(_) => false
        };
        let available = self.buf.remaining_len()?;

        if is_rle {
            // marker, width and at least one two byte run per 127 pixels of every plane
            let scanline_min = 4 + 8 * length.div_ceil(127);
            let body_min = count.saturating_mul(scanline_min) as u64;

            if self.options.get_strict_mode() && available < body_min {
                return Err(HdrDecodeErrors::Corrupt(format!(
                    "Run length encoded body has {available} bytes, at least {body_min} are needed"
                )));
            }
        } else if available < raw_size as u64 {
            return Err(HdrDecodeErrors::Corrupt(format!(
                "Flat body is shorter than the expected {raw_size} bytes"
            )));
        }
        Ok((is_rle, raw_size))
    }

    /// Read a body stored as plain RGBE quads
    ///
    /// Unlike run length encoded bodies, a short flat body is never recovered from.
    fn decode_flat(&mut self, raw: &mut [u8], count: usize) -> Result<usize, HdrDecodeErrors> {
        match self.buf.read_exact_bytes(raw) {
            Ok(()) => Ok(count),
            Err(e) if e.is_eof() => Err(HdrDecodeErrors::Corrupt(format!(
                "Flat body is shorter than the expected {} bytes",
                raw.len()
            ))),
            Err(e) => Err(HdrDecodeErrors::IoErrors(e))
        }
    }

    /// Decode new style run length encoded scanlines into `raw`
    ///
    /// Returns the number of complete scanlines decoded.
    fn decode_rle(
        &mut self, raw: &mut [u8], count: usize, length: usize
    ) -> Result<usize, HdrDecodeErrors> {
        let mut decoded = 0;

        for scanline in raw.chunks_exact_mut(length * 4).take(count) {
            match self.decode_rle_scanline(scanline, length) {
                Ok(true) => decoded += 1,
                Ok(false) => break,
                Err(HdrDecodeErrors::IoErrors(e)) if e.is_eof() => {
                    // partially decoded planes must not leak into the output
                    scanline.fill(0);
                    break;
                }
                Err(e) => return Err(e)
            }
        }
        Ok(decoded)
    }

    /// Decode a single scanline
    ///
    /// Returns `false` when the scanline does not start with
    /// the run length marker.
    fn decode_rle_scanline(
        &mut self, scanline: &mut [u8], length: usize
    ) -> Result<bool, HdrDecodeErrors> {
        let marker = self.buf.read_fixed_bytes_or_error::<2>()?;

        if marker != RLE_MARKER {
            trace!("Scanline marker {:?} ends run length data", marker);
            return Ok(false);
        }
        let declared = usize::from(self.buf.get_u16_be_err()?);

        if declared != length {
            warn!(
                "Scanline width {} does not match the image width {}, using the image width",
                declared,
                length
            );
        }
        let mut literal = [0_u8; 128];

        for plane in 0..4 {
            let mut x = 0;

            while x < length {
                let info = usize::from(self.buf.get_u8_err()?);

                if info <= 128 {
                    if x + info > length {
                        return Err(run_overflow(plane, x, info, length));
                    }
                    let run = &mut literal[..info];
                    self.buf.read_exact_bytes(run)?;

                    for (pixel, value) in scanline[x * 4..(x + info) * 4]
                        .chunks_exact_mut(4)
                        .zip(run.iter())
                    {
                        pixel[plane] = *value;
                    }
                    x += info;
                } else {
                    let run = info - 128;

                    if x + run > length {
                        return Err(run_overflow(plane, x, run, length));
                    }
                    let value = self.buf.get_u8_err()?;

                    for pixel in scanline[x * 4..(x + run) * 4].chunks_exact_mut(4) {
                        pixel[plane] = value;
                    }
                    x += run;
                }
            }
        }
        Ok(true)
    }
}

fn run_overflow(plane: usize, x: usize, run: usize, length: usize) -> HdrDecodeErrors {
    HdrDecodeErrors::Corrupt(format!(
        "Run of {run} at position {x} of plane {plane} overflows scanline of length {length}"
    ))
}

/// Convert RGBE quads to linear floats
///
/// A zero exponent always gives black regardless of the mantissas
pub(crate) fn convert_scanline(in_scanline: &[u8], out_scanline: &mut [f32]) {
    for (rgbe, out) in in_scanline
        .chunks_exact(4)
        .zip(out_scanline.chunks_exact_mut(3))
    {
        if rgbe[3] == 0 {
            out[0..3].fill(0.0);
        } else {
            let scale = 2f32.powi(i32::from(rgbe[3]) - 128);

            out[0] = (f32::from(rgbe[0]) / 256.0) * scale;
            out[1] = (f32::from(rgbe[1]) / 256.0) * scale;
            out[2] = (f32::from(rgbe[2]) / 256.0) * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use hdrkit_core::bytestream::ByteCursor;
    use hdrkit_core::colorspace::ColorSpace;
    use hdrkit_core::options::DecoderOptions;

    use crate::decoder::convert_scanline;
    use crate::errors::HdrDecodeErrors;
    use crate::HdrDecoder;

    fn header(resolution: &str) -> Vec<u8> {
        let mut data = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n".to_vec();
        data.extend_from_slice(resolution.as_bytes());
        data
    }

    /// Encode one scanline using only literal runs
    fn rle_scanline(pixels: &[[u8; 4]]) -> Vec<u8> {
        let mut out = vec![2, 2, (pixels.len() >> 8) as u8, pixels.len() as u8];
        for plane in 0..4 {
            for chunk in pixels.chunks(128) {
                out.push(chunk.len() as u8);
                out.extend(chunk.iter().map(|p| p[plane]));
            }
        }
        out
    }

    #[test]
    fn rgbe_conversion() {
        let mut out = [1.0; 6];
        convert_scanline(&[255, 255, 255, 128, 9, 9, 9, 0], &mut out);

        assert_eq!(out[..3], [255.0 / 256.0; 3]);
        assert_eq!(out[3..], [0.0; 3]);

        convert_scanline(&[128, 64, 0, 130], &mut out);
        assert_eq!(out[..3], [2.0, 1.0, 0.0]);
    }

    #[test]
    fn decode_flat_body() {
        let mut data = header("-Y 1 +X 2\n");
        // first pixel is not 0x02 0x02 so this is a flat file
        data.extend_from_slice(&[128, 0, 0, 129, 0, 128, 0, 129]);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        let pixels = decoder.decode().unwrap();

        assert_eq!(decoder.dimensions(), Some((2, 1)));
        assert_eq!(decoder.get_colorspace(), Some(ColorSpace::RGB));
        assert_eq!(pixels, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn decode_rle_body_with_repeat_runs() {
        let mut data = header("-Y 2 +X 8\n");
        // scanline 1: every plane is a single repeat run
        data.extend_from_slice(&[2, 2, 0, 8]);
        data.extend_from_slice(&[128 + 8, 64, 128 + 8, 128, 128 + 8, 0, 128 + 8, 129]);
        // scanline 2: literal runs
        let pixels = [[128_u8, 128, 128, 128]; 8];
        data.extend(rle_scanline(&pixels));

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        let out = decoder.decode().unwrap();

        assert_eq!(out.len(), 2 * 8 * 3);
        for pixel in out[..24].chunks_exact(3) {
            assert_eq!(pixel, [0.5, 1.0, 0.0]);
        }
        for pixel in out[24..].chunks_exact(3) {
            assert_eq!(pixel, [0.5, 0.5, 0.5]);
        }
    }

    #[test]
    fn rle_run_overflow_is_corrupt() {
        let mut data = header("-Y 1 +X 8\n");
        data.extend_from_slice(&[2, 2, 0, 8, 128 + 9, 1]);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::Corrupt(_))));
    }

    #[test]
    fn truncated_rle_strict_and_lenient() {
        let mut data = header("-Y 2 +X 8\n");
        data.extend(rle_scanline(&[[128, 128, 128, 129]; 8]));
        // second scanline is cut in the middle
        data.extend_from_slice(&rle_scanline(&[[1, 1, 1, 129]; 8])[..10]);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data.clone()));
        assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::Corrupt(_))));

        let options = DecoderOptions::default().set_strict_mode(false);
        let mut decoder = HdrDecoder::new_with_options(ByteCursor::new(data), options);
        let out = decoder.decode().unwrap();

        assert!(out[..24].iter().all(|x| *x == 1.0));
        assert!(out[24..].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn scanline_width_mismatch_uses_image_width() {
        let mut data = header("-Y 1 +X 8\n");
        let mut scanline = rle_scanline(&[[128, 0, 0, 129]; 8]);
        scanline[3] = 9;
        data.extend(scanline);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        let out = decoder.decode().unwrap();
        assert_eq!(out.len(), 24);
        assert_eq!(out[..3], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn short_flat_body_is_corrupt() {
        let mut data = header("-Y 2 +X 2\n");
        data.extend_from_slice(&[1, 1, 1, 128]);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::Corrupt(_))));
    }

    #[test]
    fn flipped_and_rotated_files() {
        // pixels p(v) encode the value v in the red channel
        let p = |v: u8| [v, 0, 0, 136];
        let red = |out: &[f32]| -> Vec<f32> { out.chunks_exact(3).map(|c| c[0]).collect() };

        // stored bottom to top, right to left
        let mut data = header("+Y 2 -X 2\n");
        for v in [1, 2, 3, 4] {
            data.extend_from_slice(&p(v));
        }
        let out = HdrDecoder::new(ByteCursor::new(data)).decode().unwrap();
        assert_eq!(red(&out), [4.0, 3.0, 2.0, 1.0]);

        // scanlines run down columns
        let mut data = header("+X 2 -Y 3\n");
        for v in [1, 2, 3, 4, 5, 6] {
            data.extend_from_slice(&p(v));
        }
        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        let out = decoder.decode().unwrap();
        assert_eq!(decoder.dimensions(), Some((2, 3)));
        assert_eq!(red(&out), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn too_large_and_too_small() {
        let data = header("-Y 10 +X 100\n");
        let options = DecoderOptions::default().set_max_width(50);
        let mut decoder = HdrDecoder::new_with_options(ByteCursor::new(data.clone()), options);
        assert!(matches!(
            decoder.decode_headers(),
            Err(HdrDecodeErrors::TooLargeDimensions("width", 50, 100))
        ));

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        let mut out = [0.0; 10];
        assert!(matches!(
            decoder.decode_into(&mut out),
            Err(HdrDecodeErrors::TooSmallOutputArray(3000, 10))
        ));
    }

    #[test]
    fn huge_declared_bodies_fail_before_allocating() {
        let options = DecoderOptions::default()
            .set_max_width(usize::MAX)
            .set_max_height(usize::MAX);

        // flat body of a few bytes claiming billions of pixels
        let mut data = header("-Y 100000 +X 100000\n");
        data.extend_from_slice(&[128, 64, 0, 130]);
        let mut decoder = HdrDecoder::new_with_options(ByteCursor::new(data), options);
        assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::Corrupt(_))));

        let mut data = header("-Y 100000 +X 100000\n");
        data.extend(rle_scanline(&[[1, 1, 1, 129]; 8]));
        let mut decoder = HdrDecoder::new_with_options(ByteCursor::new(data), options);
        assert!(matches!(decoder.decode(), Err(HdrDecodeErrors::Corrupt(_))));
    }

    #[test]
    fn metadata_is_exposed() {
        let mut data = b"#?RGBE\nFORMAT=32-bit_rle_xyze\nEXPOSURE=0.5\n\n-Y 1 +X 1\n".to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);

        let mut decoder = HdrDecoder::new(ByteCursor::new(data));
        decoder.decode_headers().unwrap();

        assert_eq!(decoder.get_colorspace(), Some(ColorSpace::XYZ));
        assert_eq!(decoder.metadata().len(), 2);
        assert_eq!(decoder.header().unwrap().exposure(), Some(0.5));
        assert_eq!(decoder.decode().unwrap(), [0.0, 0.0, 0.0]);
    }
}
