use crate::shared::constants::{
    COCO_LEFT_ELBOW, COCO_LEFT_HIP, COCO_LEFT_SHOULDER, COCO_LEFT_WRIST, COCO_RIGHT_ELBOW,
    COCO_RIGHT_HIP, COCO_RIGHT_SHOULDER, COCO_RIGHT_WRIST,
};
use crate::shared::point::Point2D;

/// The upper-body joints the pose classifier works from, for one person
/// on one frame.
///
/// Joints the estimator could not locate are left at the origin; the
/// classifier treats any angle built on them as unmatched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyKeypoints {
    pub left_shoulder: Point2D,
    pub left_elbow: Point2D,
    pub left_wrist: Point2D,
    pub left_hip: Point2D,
    pub right_shoulder: Point2D,
    pub right_elbow: Point2D,
    pub right_wrist: Point2D,
    pub right_hip: Point2D,
}

impl BodyKeypoints {
    /// Picks the eight joints out of a COCO-17 ordered keypoint list.
    ///
    /// Returns `None` when the list is too short to contain the hips.
    pub fn from_coco(points: &[Point2D]) -> Option<Self> {
        if points.len() <= COCO_RIGHT_HIP {
            return None;
        }
        Some(Self {
            left_shoulder: points[COCO_LEFT_SHOULDER],
            left_elbow: points[COCO_LEFT_ELBOW],
            left_wrist: points[COCO_LEFT_WRIST],
            left_hip: points[COCO_LEFT_HIP],
            right_shoulder: points[COCO_RIGHT_SHOULDER],
            right_elbow: points[COCO_RIGHT_ELBOW],
            right_wrist: points[COCO_RIGHT_WRIST],
            right_hip: points[COCO_RIGHT_HIP],
        })
    }

    pub fn has_visible(&self) -> bool {
        self.joints().iter().any(|p| !p.is_missing())
    }

    fn joints(&self) -> [Point2D; 8] {
        [
            self.left_shoulder,
            self.left_elbow,
            self.left_wrist,
            self.left_hip,
            self.right_shoulder,
            self.right_elbow,
            self.right_wrist,
            self.right_hip,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::COCO_KEYPOINT_COUNT;

    fn coco_skeleton() -> Vec<Point2D> {
        (0..COCO_KEYPOINT_COUNT)
            .map(|i| Point2D::new(i as f64 * 10.0 + 1.0, i as f64 * 10.0 + 2.0))
            .collect()
    }

    #[test]
    fn test_from_coco_maps_indices() {
        let kp = BodyKeypoints::from_coco(&coco_skeleton()).unwrap();
        assert_eq!(kp.left_shoulder, Point2D::new(51.0, 52.0));
        assert_eq!(kp.right_shoulder, Point2D::new(61.0, 62.0));
        assert_eq!(kp.left_elbow, Point2D::new(71.0, 72.0));
        assert_eq!(kp.right_elbow, Point2D::new(81.0, 82.0));
        assert_eq!(kp.left_wrist, Point2D::new(91.0, 92.0));
        assert_eq!(kp.right_wrist, Point2D::new(101.0, 102.0));
        assert_eq!(kp.left_hip, Point2D::new(111.0, 112.0));
        assert_eq!(kp.right_hip, Point2D::new(121.0, 122.0));
    }

    #[test]
    fn test_from_coco_accepts_exactly_thirteen_points() {
        let points = &coco_skeleton()[..13];
        assert!(BodyKeypoints::from_coco(points).is_some());
    }

    #[test]
    fn test_from_coco_too_short_returns_none() {
        let points = &coco_skeleton()[..12];
        assert!(BodyKeypoints::from_coco(points).is_none());
        assert!(BodyKeypoints::from_coco(&[]).is_none());
    }

    #[test]
    fn test_default_has_no_visible_joints() {
        assert!(!BodyKeypoints::default().has_visible());
    }

    #[test]
    fn test_single_joint_is_visible() {
        let kp = BodyKeypoints {
            right_wrist: Point2D::new(300.0, 200.0),
            ..Default::default()
        };
        assert!(kp.has_visible());
    }
}
