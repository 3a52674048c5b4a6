mod common;

use common::fixtures::{patterned_image, solid_image};
use skinscan::detection::preprocessing::{self, BgrImage};

#[test]
fn brightness_factor_one_is_identity() {
    let img = patterned_image(16, 16);
    let out = preprocessing::enhance_brightness(&img, 1.0);
    assert_eq!(out, img);
}

#[test]
fn brightness_scales_and_clamps() {
    let img = solid_image(4, 4, [100, 10, 200]);
    let out = preprocessing::enhance_brightness(&img, 2.0);
    assert_eq!(out.get_pixel(0, 0).0, [200, 20, 255]);
}

#[test]
fn brightness_darkens() {
    let img = solid_image(4, 4, [100, 50, 21]);
    let out = preprocessing::enhance_brightness(&img, 0.5);
    assert_eq!(out.get_pixel(0, 0).0, [50, 25, 11]);
}

#[test]
fn brightness_leaves_the_input_untouched() {
    let img = solid_image(2, 2, [10, 20, 30]);
    let _ = preprocessing::enhance_brightness(&img, 2.0);
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
}

#[test]
fn channel_swap_reverses_r_and_b() {
    let img = solid_image(2, 2, [1, 2, 3]);
    let swapped = preprocessing::swap_channels(&img);
    assert_eq!(swapped.get_pixel(0, 0).0, [3, 2, 1]);
}

#[test]
fn channel_swap_is_its_own_inverse() {
    let img = patterned_image(9, 7);
    let twice = preprocessing::swap_channels(&preprocessing::swap_channels(&img));
    assert_eq!(twice, img);
}

#[test]
fn bgr_round_trip_is_exact() {
    let img = patterned_image(12, 5);
    let bgr = BgrImage::from_rgb(&img);
    assert_eq!(bgr.to_rgb(), img);
}
