/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hdrkit_core::bytestream::ByteCursor;
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_image::codecs::ImageFormat;
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;
use hdrkit_pfm::{ByteEndian, PfmDecoder};
use nanorand::Rng;

use crate::{hash, scratch_path};

fn random_image(seed: u64, width: usize, height: usize) -> Image {
    let mut rand = nanorand::WyRand::new_seed(seed);
    let data = (0..width * height * 3)
        .map(|_| f32::from_bits(rand.generate_range(0_u32..0x7F00_0000)))
        .collect();
    Image::new(data, width, height, ColorSpace::RGB).unwrap()
}

#[test]
fn save_and_open_is_bit_exact() {
    let image = random_image(0xF10A7, 31, 17);
    let path = scratch_path("round-trip.pfm");

    image.save(&path).unwrap();
    let reopened = Image::open(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reopened.dimensions(), (31, 17));
    assert_eq!(hash(reopened.data()), hash(image.data()));
}

#[test]
fn big_endian_files_match_little_endian_ones() {
    let image = random_image(3, 4, 3);

    let mut little = b"PF\n4 3\n-1.0\n".to_vec();
    let mut big = b"PF\n4 3\n1.0\n".to_vec();
    for value in image.data() {
        little.extend_from_slice(&value.to_le_bytes());
        big.extend_from_slice(&value.to_be_bytes());
    }
    let mut decoder = PfmDecoder::new(ByteCursor::new(big));
    let from_big = decoder.decode().unwrap();
    let from_little = Image::read_bytes(&little, ImageFormat::Pfm).unwrap();

    assert_eq!(decoder.endianness(), Some(ByteEndian::BE));
    assert_eq!(hash(&from_big), hash(from_little.data()));
}

#[test]
fn non_finite_values_survive_and_can_be_substituted() {
    let data = vec![f32::NAN, f32::INFINITY, 1.0];
    let image = Image::new(data, 1, 1, ColorSpace::RGB).unwrap();

    let bytes = image.write_to_vec(ImageFormat::Pfm).unwrap();
    let mut decoded = Image::read_bytes(&bytes, ImageFormat::Pfm).unwrap();

    assert!(decoded.data()[0].is_nan());
    assert!(decoded.data()[1].is_infinite());

    decoded.substitute_non_finite(Some(0.0), Some(65504.0));
    assert_eq!(decoded.data(), &[0.0, 65504.0, 1.0]);
}

#[test]
fn radiance_cannot_be_written() {
    let image = random_image(1, 2, 2);
    let path = scratch_path("never-written.hdr");

    assert!(matches!(
        image.save(&path),
        Err(ImageErrors::NoEncoderForFormat(ImageFormat::Radiance))
    ));
    assert!(!path.exists());
}
