/// One frame from a [`FrameSource`], stamped with its capture time.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedFrame<F> {
    /// Position in the stream, starting at 0.
    pub index: usize,
    /// Capture time in seconds. Must not decrease along the stream.
    pub timestamp: f64,
    pub frame: F,
}

/// Supplies frames to a hold session.
///
/// The frame payload is opaque to the session; only the paired
/// [`PoseEstimator`](crate::session::domain::pose_estimator::PoseEstimator)
/// looks inside it. Camera capture and video decoding live behind this
/// trait, outside this crate.
pub trait FrameSource: Send {
    type Frame;

    /// Returns an iterator over frames in capture order. The session ends
    /// when the iterator does.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TimedFrame<Self::Frame>, Box<dyn std::error::Error>>> + '_>;
}
