use serde::Deserialize;
use tracing::debug;

use super::{Detection, FaceLandmarks, Landmark, Point};
use crate::error::{Error, Result};

/// Wire shape of the annotate response, trimmed to what compositing reads.
#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<DetectResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectResponse {
    #[serde(default, rename = "faceAnnotations")]
    face_annotations: Vec<FaceAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct FaceAnnotation {
    #[serde(default)]
    landmarks: Vec<NamedPosition>,
}

#[derive(Debug, Deserialize)]
struct NamedPosition {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    position: Position,
}

#[derive(Debug, Default, Deserialize)]
struct Position {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    z: f32,
}

fn landmark_from_wire(name: &str) -> Option<Landmark> {
    match name {
        "LEFT_EYE" => Some(Landmark::LeftEye),
        "RIGHT_EYE" => Some(Landmark::RightEye),
        "NOSE_TIP" => Some(Landmark::NoseTip),
        "MOUTH_LEFT" => Some(Landmark::MouthLeft),
        "MOUTH_RIGHT" => Some(Landmark::MouthRight),
        _ => None,
    }
}

impl From<FaceAnnotation> for FaceLandmarks {
    fn from(annotation: FaceAnnotation) -> FaceLandmarks {
        let mut face = FaceLandmarks::default();
        for entry in annotation.landmarks {
            // the service reports dozens of landmark kinds; only five matter here
            let Some(name) = landmark_from_wire(&entry.kind) else {
                continue;
            };
            face.set(
                name,
                Point {
                    x: entry.position.x,
                    y: entry.position.y,
                    z: entry.position.z,
                },
            );
        }
        face
    }
}

/// Flattens the batch-shaped response down to the one detection the request
/// asked for. A populated error status on that response fails the request.
pub fn into_detection(response: AnnotateResponse) -> Result<Detection> {
    let first = response.responses.into_iter().next().unwrap_or_default();

    if let Some(status) = first.error {
        return Err(Error::ServiceError(format!(
            "{} (code {})",
            status.message, status.code
        )));
    }

    debug!(faces = first.face_annotations.len(), "parsed annotate response");
    Ok(Detection {
        faces: first.face_annotations.into_iter().map(Into::into).collect(),
    })
}
