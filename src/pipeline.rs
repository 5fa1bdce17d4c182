use image::{imageops, DynamicImage, RgbaImage};
use tracing::debug;

pub use detection::{FaceDetector, VisionClient};

use crate::codec::{self, Format};
use crate::compositor::{self, OverlayAssets};
use crate::error::Result;

mod detection;
mod landmarks;

/// One landmark position in source-image coordinates. The service reports a
/// z-depth too; compositing only ever reads x and y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    LeftEye,
    RightEye,
    NoseTip,
    MouthLeft,
    MouthRight,
}

/// Landmark positions reported for a single face. A `None` field is a
/// landmark the service never returned, which is not the same thing as a
/// landmark sitting at the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceLandmarks {
    pub left_eye: Option<Point>,
    pub right_eye: Option<Point>,
    pub nose_tip: Option<Point>,
    pub mouth_left: Option<Point>,
    pub mouth_right: Option<Point>,
}

impl FaceLandmarks {
    pub fn get(&self, name: Landmark) -> Option<Point> {
        match name {
            Landmark::LeftEye => self.left_eye,
            Landmark::RightEye => self.right_eye,
            Landmark::NoseTip => self.nose_tip,
            Landmark::MouthLeft => self.mouth_left,
            Landmark::MouthRight => self.mouth_right,
        }
    }

    pub fn set(&mut self, name: Landmark, position: Point) {
        let slot = match name {
            Landmark::LeftEye => &mut self.left_eye,
            Landmark::RightEye => &mut self.right_eye,
            Landmark::NoseTip => &mut self.nose_tip,
            Landmark::MouthLeft => &mut self.mouth_left,
            Landmark::MouthRight => &mut self.mouth_right,
        };
        *slot = Some(position);
    }
}

/// Faces in the order the detection service returned them.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    pub faces: Vec<FaceLandmarks>,
}

pub struct Pipeline<D> {
    detector: D,
    assets: OverlayAssets,
}

impl<D: FaceDetector> Pipeline<D> {
    pub fn new(detector: D, assets: OverlayAssets) -> Pipeline<D> {
        Pipeline { detector, assets }
    }

    /// Runs the full decode -> detect -> composite -> encode sequence.
    /// Returns the decorated image re-encoded in the input's own format.
    pub async fn run(&self, input: &[u8]) -> Result<(Vec<u8>, Format)> {
        let (img, format) = codec::decode(input)?;
        debug!(
            ?format,
            width = img.width(),
            height = img.height(),
            "decoded source image"
        );

        let encoded = codec::encode(&img, format)?;
        let detection = self.detector.detect(&encoded).await?;
        debug!(faces = detection.faces.len(), "detection complete");

        let mut canvas = RgbaImage::new(img.width(), img.height());
        imageops::overlay(&mut canvas, &img.to_rgba8(), 0, 0);

        compositor::decorate(&mut canvas, &detection, &self.assets);

        let out = codec::encode(&DynamicImage::ImageRgba8(canvas), format)?;
        Ok((out, format))
    }
}
