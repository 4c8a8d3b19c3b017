use crate::recording::domain::recorded_frame::RecordedFrame;
use crate::session::domain::pose_estimator::PoseEstimator;
use crate::shared::body_keypoints::BodyKeypoints;
use crate::shared::point::Point2D;

/// Hands recorded keypoints to the session as if they had just been
/// estimated.
///
/// Joints below `min_confidence` are reported as missing (moved to the
/// origin), so any angle that needs them fails to match.
pub struct RecordedPoseEstimator {
    min_confidence: f64,
}

impl RecordedPoseEstimator {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    fn to_point(&self, [x, y, confidence]: [f64; 3]) -> Point2D {
        if confidence < self.min_confidence {
            Point2D::ORIGIN
        } else {
            Point2D::new(x, y)
        }
    }
}

impl Default for RecordedPoseEstimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl PoseEstimator<RecordedFrame> for RecordedPoseEstimator {
    fn estimate(
        &mut self,
        frame: &RecordedFrame,
    ) -> Result<Option<BodyKeypoints>, Box<dyn std::error::Error>> {
        let Some(raw) = frame.keypoints.as_deref() else {
            return Ok(None);
        };

        let points: Vec<Point2D> = raw.iter().map(|&kp| self.to_point(kp)).collect();
        let keypoints = BodyKeypoints::from_coco(&points);
        if keypoints.is_none() {
            log::warn!(
                "Frame at {:.3}s has only {} keypoints, treating as no person",
                frame.t,
                raw.len()
            );
        }
        Ok(keypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::{COCO_KEYPOINT_COUNT, COCO_LEFT_ELBOW, COCO_RIGHT_HIP};

    fn coco_frame(confidence: f64) -> RecordedFrame {
        let keypoints = (0..COCO_KEYPOINT_COUNT)
            .map(|i| [10.0 + i as f64, 20.0 + i as f64, confidence])
            .collect();
        RecordedFrame::new(0.0, Some(keypoints))
    }

    #[test]
    fn test_no_person() {
        let mut estimator = RecordedPoseEstimator::default();
        let result = estimator.estimate(&RecordedFrame::new(0.0, None)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_picks_coco_joints() {
        let mut estimator = RecordedPoseEstimator::default();
        let kp = estimator.estimate(&coco_frame(0.9)).unwrap().unwrap();
        let elbow = COCO_LEFT_ELBOW as f64;
        assert_eq!(kp.left_elbow, Point2D::new(10.0 + elbow, 20.0 + elbow));
        let hip = COCO_RIGHT_HIP as f64;
        assert_eq!(kp.right_hip, Point2D::new(10.0 + hip, 20.0 + hip));
    }

    #[test]
    fn test_low_confidence_joints_become_missing() {
        let mut frame = coco_frame(0.9);
        if let Some(kps) = frame.keypoints.as_mut() {
            kps[COCO_LEFT_ELBOW][2] = 0.2;
        }

        let mut estimator = RecordedPoseEstimator::new(0.5);
        let kp = estimator.estimate(&frame).unwrap().unwrap();
        assert!(kp.left_elbow.is_missing());
        assert!(!kp.left_shoulder.is_missing());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut estimator = RecordedPoseEstimator::new(0.5);
        let kp = estimator.estimate(&coco_frame(0.5)).unwrap().unwrap();
        assert!(!kp.left_wrist.is_missing());
    }

    #[test]
    fn test_default_keeps_everything() {
        let mut estimator = RecordedPoseEstimator::default();
        let kp = estimator.estimate(&coco_frame(0.0)).unwrap().unwrap();
        assert!(kp.has_visible());
    }

    #[test]
    fn test_short_array_is_no_person() {
        let frame = RecordedFrame::new(1.0, Some(vec![[1.0, 1.0, 1.0]; COCO_RIGHT_HIP]));
        let mut estimator = RecordedPoseEstimator::default();
        assert!(estimator.estimate(&frame).unwrap().is_none());
    }
}
