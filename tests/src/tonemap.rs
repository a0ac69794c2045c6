/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::Path;

use hdrkit_core::colorspace::ColorSpace;
use hdrkit_image::codecs::ImageFormat;
use hdrkit_image::image::Image;
use hdrkit_tonemap::curves::{eilertsen_curve, kinoshita_curve, reinhard_curve};
use hdrkit_tonemap::exposure::DEFAULT_EPS;
use hdrkit_tonemap::kinoshita::KinoshitaItmo;
use hdrkit_tonemap::luminance::get_luminance;
use hdrkit_tonemap::operators::{eilertsen_tmo, reinhard_tmo, RangeMode, ToneOperator};
use hdrkit_tonemap::stats::geometric_mean;
use hdrkit_tonemap::traits::ToneOperation;
use nanorand::Rng;

use crate::{radiance_file, random_rgbe, CurveEntry};

fn run_curve(entry: &CurveEntry) -> Vec<f32> {
    let input = Image::from_f32(&entry.input, entry.input.len(), 1, ColorSpace::Luma).unwrap();

    let output = match entry.curve.as_str() {
        "reinhard" => {
            let white = entry.params.first().copied().unwrap_or(f32::INFINITY);
            reinhard_curve(&input, &input, white).unwrap()
        }
        "eilertsen" => eilertsen_curve(&input, entry.params[0], entry.params[1]),
        "kinoshita" => kinoshita_curve(&input, entry.params[0]),
        other => panic!("Unknown curve {other} in {}", entry.name)
    };
    output.into_data()
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_curves() {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/curves.json");

    let json_file = read(file).unwrap();

    let entries: Vec<CurveEntry> = serde_json::from_slice(&json_file).unwrap();

    let mut error = false;
    let mut failed = Vec::new();

    for entry in &entries {
        let found = run_curve(entry);

        let matches = found.len() == entry.expected.len()
            && found.iter().zip(&entry.expected).all(|(a, b)| {
                (a - b).abs() <= entry.tolerance || (a.is_infinite() && a == b)
            });

        if !matches {
            error = true;
            failed.push(entry.name.clone());
            eprintln!(
                "Mismatch for {}\nExpected {:?} but found {:?}\nConfig:{:#?}\n",
                entry.name, entry.expected, found, entry
            );
        }
    }
    if error {
        panic!("Errors found during curve tests\n {:#?}", failed);
    }
}

fn decoded_scene() -> Image {
    let (width, height) = (48, 24);
    let quads = random_rgbe(2024, width * height);
    let lines: Vec<Vec<[u8; 4]>> = quads.chunks(width).map(|c| c.to_vec()).collect();
    let file = radiance_file(&format!("-Y {height} +X {width}"), &lines, true);

    Image::read_bytes(&file, ImageFormat::Radiance).unwrap()
}

#[test]
fn reinhard_pipeline_on_decoded_image() {
    let hdr = decoded_scene();
    let tmo = ToneOperator::Compose(vec![
        reinhard_tmo(0.0, f32::INFINITY),
        ToneOperator::NormalizeRange(RangeMode::Color),
    ]);
    let ldr = tmo.apply(&hdr).unwrap();

    assert_eq!(ldr.dimensions(), hdr.dimensions());
    assert!(ldr.data().iter().all(|x| (0.0..=1.0).contains(x)));
    // black pixels stay black
    for (input, output) in hdr.data().chunks_exact(3).zip(ldr.data().chunks_exact(3)) {
        if input == [0.0; 3] {
            assert_eq!(output, [0.0; 3]);
        }
    }
}

#[test]
fn eilertsen_pipeline_keeps_input() {
    let hdr = decoded_scene();
    let copy = hdr.clone();
    let ldr = eilertsen_tmo(1.0, 0.9, 0.6).apply(&hdr).unwrap();

    assert_eq!(hdr, copy);
    assert!(ldr.data().iter().all(|x| x.is_finite() && *x >= 0.0));
}

/// A colour scene without black pixels, zeros would pin the
/// geometric mean to `eps`
fn lit_scene(seed: u64) -> Image {
    let mut rand = nanorand::WyRand::new_seed(seed);
    let data = (0..32 * 16 * 3)
        .map(|_| rand.generate_range(1_u32..4096) as f32 / 256.0)
        .collect();
    Image::new(data, 32, 16, ColorSpace::RGB).unwrap()
}

#[test]
fn inverse_tone_mapping_restores_exposure() {
    let hdr = lit_scene(77);
    let ldr = reinhard_tmo(0.0, f32::INFINITY).apply(&hdr).unwrap();

    let hdr_gmean = geometric_mean(get_luminance(&hdr).unwrap().data(), Some(DEFAULT_EPS));
    let itmo = KinoshitaItmo::new(Some(0.18), Some(hdr_gmean as f32), DEFAULT_EPS);
    let restored = itmo.apply(&ldr).unwrap();

    let restored_gmean = geometric_mean(
        get_luminance(&restored).unwrap().data(),
        Some(DEFAULT_EPS)
    );
    assert!((restored_gmean / hdr_gmean - 1.0).abs() < 1e-3);
}
