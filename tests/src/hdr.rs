/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use hdrkit_core::bytestream::ByteCursor;
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::options::DecoderOptions;
use hdrkit_hdr::{HdrDecodeErrors, HdrDecoder};
use hdrkit_image::codecs::ImageFormat;
use hdrkit_image::image::Image;

use crate::{hash, radiance_file, random_rgbe, rgbe_to_f32, scratch_path};

fn scanlines(seed: u64, width: usize, height: usize) -> Vec<Vec<[u8; 4]>> {
    let mut quads = random_rgbe(seed, width * height);
    // a flat body must not start with the run length marker
    quads[0] = [1, 1, 1, 128];
    // long repeats exercise repeat runs
    for quad in quads.iter_mut().skip(width).take(width / 2) {
        *quad = [7, 7, 7, 129];
    }
    quads.chunks(width).map(|c| c.to_vec()).collect()
}

fn expected(lines: &[Vec<[u8; 4]>]) -> Vec<f32> {
    lines
        .iter()
        .flatten()
        .flat_map(|q| rgbe_to_f32(*q))
        .collect()
}

#[test]
fn rle_and_flat_bodies_agree() {
    let (width, height) = (67, 13);
    let lines = scanlines(0xC0FFEE, width, height);
    let resolution = format!("-Y {height} +X {width}");

    let rle = radiance_file(&resolution, &lines, true);
    let flat = radiance_file(&resolution, &lines, false);

    let mut rle_decoder = HdrDecoder::new(ByteCursor::new(rle));
    let mut flat_decoder = HdrDecoder::new(ByteCursor::new(flat));

    let rle_pixels = rle_decoder.decode().unwrap();
    let flat_pixels = flat_decoder.decode().unwrap();

    assert_eq!(rle_decoder.dimensions(), Some((width, height)));
    assert_eq!(rle_decoder.get_colorspace(), Some(ColorSpace::RGB));
    assert_eq!(hash(&rle_pixels), hash(&flat_pixels));
    assert_eq!(hash(&rle_pixels), hash(&expected(&lines)));

    let header = rle_decoder.header().unwrap();
    assert_eq!(header.exposure(), Some(1.0));
    assert_eq!(header.get("FORMAT"), Some("32-bit_rle_rgbe"));
}

#[test]
fn file_and_memory_routes_agree() {
    let (width, height) = (40, 9);
    let lines = scanlines(17, width, height);
    let file = radiance_file(&format!("-Y {height} +X {width}"), &lines, true);

    let path = scratch_path("memory.hdr");
    std::fs::write(&path, &file).unwrap();

    let from_file = Image::open(&path).unwrap();
    let from_memory = Image::read_bytes(&file, ImageFormat::Radiance).unwrap();

    std::fs::remove_file(&path).unwrap();

    assert_eq!(from_file.dimensions(), (width, height));
    assert_eq!(hash(from_file.data()), hash(from_memory.data()));
}

#[test]
fn bottom_up_files_are_flipped() {
    let (width, height) = (12, 5);
    let lines = scanlines(99, width, height);

    let top_down = radiance_file(&format!("-Y {height} +X {width}"), &lines, true);
    let mut reversed = lines.clone();
    reversed.reverse();
    let bottom_up = radiance_file(&format!("+Y {height} +X {width}"), &reversed, true);

    let a = Image::read_bytes(&top_down, ImageFormat::Radiance).unwrap();
    let b = Image::read_bytes(&bottom_up, ImageFormat::Radiance).unwrap();

    assert_eq!(a, b);
}

#[test]
fn truncated_files() {
    let (width, height) = (32, 8);
    let lines = scanlines(5, width, height);
    let mut file = radiance_file(&format!("-Y {height} +X {width}"), &lines, true);
    // drop most of the last scanline
    file.truncate(file.len() - 40);

    let strict = HdrDecoder::new(ByteCursor::new(file.clone())).decode();
    assert!(matches!(strict, Err(HdrDecodeErrors::Corrupt(_))));

    let options = DecoderOptions::default().set_strict_mode(false);
    let lenient = HdrDecoder::new_with_options(ByteCursor::new(file), options)
        .decode()
        .unwrap();

    let expected = expected(&lines);
    let row = width * 3;
    assert_eq!(&lenient[..row * 7], &expected[..row * 7]);
    assert!(lenient[row * 7..].iter().all(|x| *x == 0.0));
}
