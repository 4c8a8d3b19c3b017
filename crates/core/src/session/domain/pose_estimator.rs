use crate::shared::body_keypoints::BodyKeypoints;

/// Turns a frame into the keypoints of the (single) person on it.
///
/// `Ok(None)` means nobody was found, which is an ordinary outcome: the
/// session treats it as "no pose matched" for that frame. Errors are
/// reserved for broken infrastructure and end the session.
pub trait PoseEstimator<F>: Send {
    fn estimate(&mut self, frame: &F) -> Result<Option<BodyKeypoints>, Box<dyn std::error::Error>>;
}
