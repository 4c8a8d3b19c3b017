use serde::{Deserialize, Serialize};

/// One `[x, y, confidence]` triple, in COCO-17 order within a frame.
pub type RawKeypoint = [f64; 3];

/// A frame as stored in a keypoint recording: the estimator's output,
/// captured ahead of time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Capture time in seconds.
    pub t: f64,
    /// `None` (or `null` on disk) when no person was detected.
    #[serde(default)]
    pub keypoints: Option<Vec<RawKeypoint>>,
}

impl RecordedFrame {
    pub fn new(t: f64, keypoints: Option<Vec<RawKeypoint>>) -> Self {
        Self { t, keypoints }
    }
}
