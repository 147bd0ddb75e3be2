// Host-side tests for pose to CSS conversion.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use motion_core::tween::{pose, Prop};
use style::*;

#[test]
fn identity_pose_clears_the_transform() {
    assert_eq!(transform_css(&[], 1000.0), "none");
    let rest = pose(&[(Prop::Y, 0.0), (Prop::Scale, 1.0), (Prop::RotationY, 0.0)]);
    assert_eq!(transform_css(&rest, 1000.0), "none");
}

#[test]
fn background_layer_translates_then_scales() {
    let p = pose(&[(Prop::Y, -7.5), (Prop::Scale, 1.015), (Prop::RotationY, 0.0)]);
    assert_eq!(
        transform_css(&p, 1000.0),
        "translate3d(0px, -7.5px, 0) scale(1.015)"
    );
}

#[test]
fn rotation_gets_perspective_first() {
    let p = pose(&[(Prop::Y, -40.0), (Prop::RotationY, 6.0)]);
    assert_eq!(
        transform_css(&p, 1000.0),
        "perspective(1000px) translate3d(0px, -40px, 0) rotateY(6deg)"
    );
}

#[test]
fn opacity_is_clamped_and_optional() {
    assert_eq!(opacity_css(&pose(&[(Prop::Y, 3.0)])), None);
    assert_eq!(opacity_css(&pose(&[(Prop::Opacity, 0.25)])).as_deref(), Some("0.25"));
    assert_eq!(opacity_css(&pose(&[(Prop::Opacity, 1.2)])).as_deref(), Some("1"));
    assert_eq!(opacity_css(&pose(&[(Prop::Opacity, -0.0001)])).as_deref(), Some("0"));
}
