/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Cursor;

use exr::image::{AnyChannel, AnyChannels, FlatSamples};
use exr::prelude::WritableImage;
use hdrkit_core::bytestream::ByteCursor;
use hdrkit_core::options::DecoderOptions;
use hdrkit_image::codecs::openexr::ExrDecoder;
use hdrkit_image::codecs::ImageFormat;
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;
use hdrkit_image::traits::DecoderTrait;
use nanorand::Rng;

use crate::hash;

/// Write a single layer file with the given `f32` channels
fn exr_file(width: usize, height: usize, channels: Vec<(&str, Vec<f32>)>) -> Vec<u8> {
    let list = channels
        .into_iter()
        .map(|(name, samples)| AnyChannel::new(name, FlatSamples::F32(samples)))
        .collect();
    let image = exr::image::Image::from_channels((width, height), AnyChannels::sort(list));

    let mut bytes = Cursor::new(Vec::new());
    image.write().to_buffered(&mut bytes).unwrap();
    bytes.into_inner()
}

fn random_plane(seed: u64, count: usize) -> Vec<f32> {
    let mut rand = nanorand::WyRand::new_seed(seed);
    (0..count)
        .map(|_| rand.generate_range(1_u32..4000) as f32 / 1000.0)
        .collect()
}

#[test]
fn rgb_layers_decode_and_drop_alpha() {
    let (r, g, b) = (random_plane(1, 12), random_plane(2, 12), random_plane(3, 12));
    let file = exr_file(
        4,
        3,
        vec![("A", vec![1.0; 12]), ("B", b.clone()), ("G", g.clone()), ("R", r.clone())]
    );
    let image = Image::read_bytes(&file, ImageFormat::OpenExr).unwrap();

    let expected: Vec<f32> = (0..12).flat_map(|i| [r[i], g[i], b[i]]).collect();

    assert_eq!(image.dimensions(), (4, 3));
    assert_eq!(hash(image.data()), hash(&expected));
}

#[test]
fn luminance_only_files_are_replicated() {
    let y = random_plane(4, 6);
    let file = exr_file(3, 2, vec![("Y", y.clone())]);

    let image = Image::read_bytes(&file, ImageFormat::OpenExr).unwrap();

    for (pixel, &luminance) in image.data().chunks_exact(3).zip(&y) {
        assert_eq!(pixel, &[luminance; 3]);
    }
}

#[test]
fn luminance_chroma_files_convert_back_to_rgb() {
    let (r, g, b) = (random_plane(5, 8), random_plane(6, 8), random_plane(7, 8));
    let y: Vec<f32> = (0..8)
        .map(|i| 0.2126 * r[i] + 0.7152 * g[i] + 0.0722 * b[i])
        .collect();
    let ry: Vec<f32> = (0..8).map(|i| (r[i] - y[i]) / y[i]).collect();
    let by: Vec<f32> = (0..8).map(|i| (b[i] - y[i]) / y[i]).collect();

    let file = exr_file(4, 2, vec![("BY", by), ("RY", ry), ("Y", y)]);
    let image = Image::read_bytes(&file, ImageFormat::OpenExr).unwrap();

    for (i, pixel) in image.data().chunks_exact(3).enumerate() {
        assert!((pixel[0] - r[i]).abs() < 1e-3, "red at {i}");
        assert!((pixel[1] - g[i]).abs() < 1e-3, "green at {i}");
        assert!((pixel[2] - b[i]).abs() < 1e-3, "blue at {i}");
    }
}

#[test]
fn unknown_channel_layouts_are_rejected() {
    let file = exr_file(2, 2, vec![("Z", vec![1.0; 4])]);

    assert!(matches!(
        Image::read_bytes(&file, ImageFormat::OpenExr),
        Err(ImageErrors::UnsupportedVariant(_))
    ));
}

#[test]
fn decoding_twice_gives_the_same_image() {
    let file = exr_file(2, 2, vec![("Y", random_plane(8, 4))]);
    let mut decoder = ExrDecoder::new(ByteCursor::new(file));

    let first = decoder.decode().unwrap();
    let second = decoder.decode().unwrap();

    assert_eq!(first.dimensions(), (2, 2));
    assert_eq!(hash(first.data()), hash(second.data()));
}

#[test]
fn size_limits_are_checked_from_the_header() {
    let file = exr_file(8, 2, vec![("Y", vec![0.5; 16])]);
    let options = DecoderOptions::default().set_max_width(4);
    let mut decoder = ExrDecoder::new_with_options(ByteCursor::new(file), options);

    assert!(matches!(
        decoder.read_headers(),
        Err(ImageErrors::ImageDecodeErrors(_))
    ));
    assert_eq!(decoder.dimensions(), None);
}
