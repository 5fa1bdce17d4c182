use image::{imageops, RgbaImage};
use tracing::{debug, span, Level};

pub use assets::OverlayAssets;
use resize::resize_to_width;

use crate::pipeline::{Detection, FaceLandmarks, Landmark};

mod assets;
mod resize;

/// Stamps gopher eyes and mouths over every face with usable landmarks.
/// Two full sweeps, eyes for all faces before any mouth, so output stays
/// deterministic even when overlays from adjacent faces overlap.
pub fn decorate(canvas: &mut RgbaImage, detection: &Detection, assets: &OverlayAssets) {
    let span = span!(Level::INFO, "decorate");
    let _guard = span.enter();

    for face in &detection.faces {
        place_eyes(canvas, face, assets);
    }
    for face in &detection.faces {
        place_mouth(canvas, face, assets);
    }
}

fn place_eyes(canvas: &mut RgbaImage, face: &FaceLandmarks, assets: &OverlayAssets) {
    // both eye centers or nothing; a lone gopher eye looks worse than none
    let (Some(left), Some(right)) = (face.get(Landmark::LeftEye), face.get(Landmark::RightEye))
    else {
        debug!("face missing an eye landmark, skipping eyes");
        return;
    };

    // interocular distance sets the overlay scale
    let size = (left.x - right.x).abs().round() as u32;
    if size == 0 {
        return;
    }
    let eye = resize_to_width(&assets.eye, size);

    for center in [left, right] {
        let x = center.x as i64 - i64::from(size / 2);
        let y = center.y as i64 - i64::from(size / 2);
        imageops::overlay(canvas, &eye, x, y);
    }
}

fn place_mouth(canvas: &mut RgbaImage, face: &FaceLandmarks, assets: &OverlayAssets) {
    let (Some(nose), Some(mouth_left), Some(mouth_right)) = (
        face.get(Landmark::NoseTip),
        face.get(Landmark::MouthLeft),
        face.get(Landmark::MouthRight),
    ) else {
        debug!("face missing a mouth landmark, skipping mouth");
        return;
    };

    let size = (mouth_right.x - mouth_left.x).abs().round() as u32;
    if size == 0 {
        return;
    }
    let mouth = resize_to_width(&assets.mouth, size);

    // centered on the nose tip horizontally, hanging below it vertically
    let x = nose.x as i64 - i64::from(mouth.width() / 2);
    let y = nose.y as i64;
    imageops::overlay(canvas, &mouth, x, y);
}
