// Pose to CSS conversion.
// Kept free of `web_sys` so it can be exercised by host-side tests.

use motion_core::tween::{pose_get, Prop};

/// CSS `transform` for a pose, or `"none"` when it is the identity.
pub fn transform_css(pose: &[(Prop, f32)], perspective_px: f32) -> String {
    let x = pose_get(pose, Prop::X).unwrap_or(0.0);
    let y = pose_get(pose, Prop::Y).unwrap_or(0.0);
    let scale = pose_get(pose, Prop::Scale).unwrap_or(1.0);
    let rot = pose_get(pose, Prop::RotationY).unwrap_or(0.0);

    let mut parts: Vec<String> = Vec::with_capacity(4);
    if rot != 0.0 {
        parts.push(format!("perspective({}px)", fmt_num(perspective_px)));
    }
    if x != 0.0 || y != 0.0 {
        parts.push(format!("translate3d({}px, {}px, 0)", fmt_num(x), fmt_num(y)));
    }
    if scale != 1.0 {
        parts.push(format!("scale({})", fmt_num(scale)));
    }
    if rot != 0.0 {
        parts.push(format!("rotateY({}deg)", fmt_num(rot)));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}

/// CSS `opacity` value, if the pose sets one.
pub fn opacity_css(pose: &[(Prop, f32)]) -> Option<String> {
    pose_get(pose, Prop::Opacity).map(|o| fmt_num(o.clamp(0.0, 1.0)))
}

// four decimals is below a device pixel and keeps style churn down
fn fmt_num(v: f32) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
