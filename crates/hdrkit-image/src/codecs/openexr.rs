/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "exr")]
//! OpenEXR decoding support
//!
//! Decoding is delegated to the [exr](https://docs.rs/exr) crate. We read the
//! first flat layer at its largest resolution level and pick channels by name:
//!
//! - `R`, `G`, `B` are copied as is, alpha is dropped
//! - `Y`, `BY`, `RY` are upsampled to full resolution and converted back to RGB
//!   with the BT.709 luminance weights
//! - a lone `Y` is replicated to three channels
//!
//! Any other channel layout is rejected.
use std::io::Cursor;

use exr::image::{AnyChannel, AnyChannels, FlatSamples};
use exr::meta::MetaData;
use exr::prelude::{read, ReadChannels, ReadLayers};
use hdrkit_core::bytestream::ByteReaderTrait;
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::log::trace;
use hdrkit_core::options::DecoderOptions;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

/// BT.709 luminance weights, red green blue
const LUMINANCE_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// An OpenEXR decoder producing RGB `f32` images
pub struct ExrDecoder<T: ByteReaderTrait> {
    source:     T,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>,
    bytes:      Vec<u8>,
    pixels:     Option<Vec<f32>>
}

impl<T> ExrDecoder<T>
where
    T: ByteReaderTrait
{
    pub fn new(source: T) -> ExrDecoder<T> {
        ExrDecoder::new_with_options(source, DecoderOptions::default())
    }

    pub fn new_with_options(source: T, options: DecoderOptions) -> ExrDecoder<T> {
        ExrDecoder {
            source,
            options,
            dimensions: None,
            bytes: Vec::new(),
            pixels: None
        }
    }

    /// Read the file headers and check the layer size against the options
    ///
    /// No pixel data is touched here.
    fn decode_headers(&mut self) -> Result<(), ImageErrors> {
        if self.dimensions.is_some() {
            return Ok(());
        }
        self.source.read_remaining(&mut self.bytes)?;

        let meta = MetaData::read_from_buffered(Cursor::new(self.bytes.as_slice()), false)
            .map_err(to_image_err)?;

        let header = meta
            .headers
            .iter()
            .find(|header| !header.deep)
            .ok_or_else(|| ImageErrors::UnsupportedVariant("exr: no flat layer".to_string()))?;

        let (width, height) = (header.layer_size.width(), header.layer_size.height());

        trace!("EXR layer dimensions: {}x{}", width, height);

        if width > self.options.get_max_width() {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "exr: width {width} exceeds the limit {}",
                self.options.get_max_width()
            )));
        }
        if height > self.options.get_max_height() {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "exr: height {height} exceeds the limit {}",
                self.options.get_max_height()
            )));
        }
        self.dimensions = Some((width, height));

        Ok(())
    }

    fn decode_pixels(&mut self) -> Result<Vec<f32>, ImageErrors> {
        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .all_channels()
            .first_valid_layer()
            .all_attributes()
            .from_buffered(Cursor::new(self.bytes.as_slice()))
            .map_err(to_image_err)?;

        let layer = image.layer_data;
        let (width, height) = (layer.size.width(), layer.size.height());

        if self.dimensions != Some((width, height)) {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "exr: layer is {width}x{height}, header said {:?}",
                self.dimensions
            )));
        }
        channels_to_rgb(&layer.channel_data, width, height)
    }
}

impl<T> DecoderTrait for ExrDecoder<T>
where
    T: ByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        self.decode_headers()?;

        let (width, height) = self
            .dimensions
            .ok_or(ImageErrors::GenericStr("exr: no decoded layer"))?;

        if self.pixels.is_none() {
            let pixels = self.decode_pixels()?;
            self.bytes = Vec::new();
            self.pixels = Some(pixels);
        }
        let pixels = self
            .pixels
            .clone()
            .ok_or(ImageErrors::GenericStr("exr: no decoded layer"))?;

        Image::new(pixels, width, height, ColorSpace::RGB)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_colorspace(&self) -> Option<ColorSpace> {
        self.dimensions.map(|_| ColorSpace::RGB)
    }

    fn name(&self) -> &'static str {
        "EXR decoder"
    }

    fn read_headers(&mut self) -> Result<(usize, usize), ImageErrors> {
        self.decode_headers()?;

        self.dimensions()
            .ok_or(ImageErrors::GenericStr("exr: no decoded layer"))
    }
}

fn find_channel<'a>(
    channels: &'a AnyChannels<FlatSamples>, name: &str
) -> Option<&'a AnyChannel<FlatSamples>> {
    channels.list.iter().find(|channel| channel.name.eq(name))
}

/// Turn the channels of a layer into interleaved RGB
fn channels_to_rgb(
    channels: &AnyChannels<FlatSamples>, width: usize, height: usize
) -> Result<Vec<f32>, ImageErrors> {
    let lookup = |name| find_channel(channels, name);

    if let (Some(r), Some(g), Some(b)) = (lookup("R"), lookup("G"), lookup("B")) {
        trace!("EXR layout: RGB");

        let planes = [
            full_plane(r, width, height)?,
            full_plane(g, width, height)?,
            full_plane(b, width, height)?
        ];
        return Ok(interleave(&planes));
    }
    if let (Some(y), Some(by), Some(ry)) = (lookup("Y"), lookup("BY"), lookup("RY")) {
        trace!("EXR layout: luminance/chroma");

        let y = full_plane(y, width, height)?;
        let by = full_plane(by, width, height)?;
        let ry = full_plane(ry, width, height)?;

        return Ok(ycbcr_to_rgb(&y, &by, &ry));
    }
    if let Some(y) = lookup("Y") {
        trace!("EXR layout: luminance only");

        let y = full_plane(y, width, height)?;
        return Ok(y.iter().flat_map(|&v| [v, v, v]).collect());
    }

    let names: Vec<String> = channels
        .list
        .iter()
        .map(|channel| channel.name.to_string())
        .collect();

    Err(ImageErrors::UnsupportedVariant(format!(
        "exr: unsupported channel layout {names:?}"
    )))
}

/// Samples of a channel at full layer resolution
///
/// Subsampled channels are upsampled with linear interpolation
fn full_plane(
    channel: &AnyChannel<FlatSamples>, width: usize, height: usize
) -> Result<Vec<f32>, ImageErrors> {
    let samples: Vec<f32> = channel.sample_data.values_as_f32().collect();

    let x_sampling = channel.sampling.0.max(1);
    let y_sampling = channel.sampling.1.max(1);
    let (sub_width, sub_height) = ((width / x_sampling).max(1), (height / y_sampling).max(1));

    if samples.len() != sub_width * sub_height {
        return Err(ImageErrors::ImageDecodeErrors(format!(
            "exr: channel {} has {} samples, expected {}x{}",
            channel.name,
            samples.len(),
            sub_width,
            sub_height
        )));
    }
    if (sub_width, sub_height) == (width, height) {
        return Ok(samples);
    }
    Ok(resize_linear(&samples, sub_width, sub_height, width, height))
}

/// Bilinear resize of a single plane, sample centers aligned
pub(crate) fn resize_linear(
    plane: &[f32], src_width: usize, src_height: usize, width: usize, height: usize
) -> Vec<f32> {
    // source coordinate and the weight of the following sample
    let source_position = |dst: usize, src_len: usize, dst_len: usize| {
        let position = (dst as f32 + 0.5) * src_len as f32 / dst_len as f32 - 0.5;
        let position = position.clamp(0.0, (src_len - 1) as f32);
        let low = position.floor() as usize;

        (low, (low + 1).min(src_len - 1), position - low as f32)
    };
    let columns: Vec<_> = (0..width)
        .map(|x| source_position(x, src_width, width))
        .collect();

    let mut out = Vec::with_capacity(width * height);

    for y in 0..height {
        let (y0, y1, fy) = source_position(y, src_height, height);
        let top = &plane[y0 * src_width..(y0 + 1) * src_width];
        let bottom = &plane[y1 * src_width..(y1 + 1) * src_width];

        for &(x0, x1, fx) in &columns {
            let upper = top[x0] + (top[x1] - top[x0]) * fx;
            let lower = bottom[x0] + (bottom[x1] - bottom[x0]) * fx;
            out.push(upper + (lower - upper) * fy);
        }
    }
    out
}

/// Undo the `RY = (R - Y) / Y`, `BY = (B - Y) / Y` chroma encoding
fn ycbcr_to_rgb(y: &[f32], by: &[f32], ry: &[f32]) -> Vec<f32> {
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;

    y.iter()
        .zip(by.iter().zip(ry))
        .flat_map(|(&y, (&by, &ry))| {
            let r = ry * y + y;
            let b = by * y + y;
            let g = (y - wr * r - wb * b) / wg;
            [r, g, b]
        })
        .collect()
}

fn interleave(planes: &[Vec<f32>; 3]) -> Vec<f32> {
    planes[0]
        .iter()
        .zip(planes[1].iter().zip(&planes[2]))
        .flat_map(|(&r, (&g, &b))| [r, g, b])
        .collect()
}

fn to_image_err(error: exr::error::Error) -> ImageErrors {
    match error {
        exr::error::Error::NotSupported(reason) => {
            ImageErrors::UnsupportedVariant(format!("exr: {reason}"))
        }
        other => ImageErrors::ImageDecodeErrors(format!("exr: {other}"))
    }
}
