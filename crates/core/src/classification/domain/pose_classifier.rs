use std::collections::BTreeMap;

use crate::classification::domain::geometry::{checked_angle_at_vertex, distance, in_tolerance};
use crate::classification::domain::pose_definition::{
    default_definitions, JointAngle, PoseDefinition, PoseId,
};
use crate::shared::body_keypoints::BodyKeypoints;
use crate::shared::point::Point2D;

/// Joint angles and shoulder span measured on one frame.
///
/// A field is `None` when one of its joints is missing or its rays have
/// zero length; every pose window on it then fails.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointAngles {
    pub left_armpit: Option<f64>,
    pub left_elbow: Option<f64>,
    pub right_armpit: Option<f64>,
    pub right_elbow: Option<f64>,
    pub shoulder_distance: Option<f64>,
}

impl JointAngles {
    pub fn measure(kp: &BodyKeypoints) -> Self {
        Self {
            left_armpit: joint_angle(kp.left_hip, kp.left_shoulder, kp.left_elbow),
            left_elbow: joint_angle(kp.left_shoulder, kp.left_elbow, kp.left_wrist),
            right_armpit: joint_angle(kp.right_hip, kp.right_shoulder, kp.right_elbow),
            right_elbow: joint_angle(kp.right_shoulder, kp.right_elbow, kp.right_wrist),
            shoulder_distance: (!kp.left_shoulder.is_missing() && !kp.right_shoulder.is_missing())
                .then(|| distance(kp.left_shoulder, kp.right_shoulder)),
        }
    }

    pub fn get(&self, angle: JointAngle) -> Option<f64> {
        match angle {
            JointAngle::LeftArmpit => self.left_armpit,
            JointAngle::LeftElbow => self.left_elbow,
            JointAngle::RightArmpit => self.right_armpit,
            JointAngle::RightElbow => self.right_elbow,
        }
    }
}

fn joint_angle(a: Point2D, vertex: Point2D, c: Point2D) -> Option<f64> {
    if a.is_missing() || vertex.is_missing() || c.is_missing() {
        return None;
    }
    checked_angle_at_vertex(a, vertex, c)
}

impl PoseDefinition {
    pub fn matches(&self, angles: &JointAngles) -> bool {
        if let Some(max) = self.max_shoulder_distance {
            match angles.shoulder_distance {
                Some(d) if d < max => {}
                _ => return false,
            }
        }
        self.angles.iter().all(|t| {
            angles
                .get(t.angle)
                .is_some_and(|actual| in_tolerance(actual, t.target_deg, t.tolerance_deg))
        })
    }
}

/// Per-frame match flags, one per pose the classifier knows.
///
/// Poses are independent: any number may match on the same frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoseMatches {
    flags: BTreeMap<PoseId, bool>,
}

impl PoseMatches {
    /// `false` for poses that matched nothing or were never evaluated.
    pub fn get(&self, pose: PoseId) -> bool {
        self.flags.get(&pose).copied().unwrap_or(false)
    }

    pub fn matched(&self) -> impl Iterator<Item = PoseId> + '_ {
        self.flags
            .iter()
            .filter(|(_, hit)| **hit)
            .map(|(&pose, _)| pose)
    }

    pub fn any(&self) -> bool {
        self.flags.values().any(|&hit| hit)
    }

    fn set(&mut self, pose: PoseId, hit: bool) {
        let entry = self.flags.entry(pose).or_insert(false);
        *entry = *entry || hit;
    }
}

/// Tolerance-window pose classifier.
///
/// Stateless apart from its definition table; the same keypoints always
/// give the same matches. A pose listed more than once matches when any
/// of its definitions does.
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    definitions: Vec<PoseDefinition>,
}

impl PoseClassifier {
    pub fn new(definitions: Vec<PoseDefinition>) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &[PoseDefinition] {
        &self.definitions
    }

    pub fn definition(&self, pose: PoseId) -> Option<&PoseDefinition> {
        self.definitions.iter().find(|d| d.pose == pose)
    }

    pub fn classify(&self, keypoints: &BodyKeypoints) -> PoseMatches {
        let angles = JointAngles::measure(keypoints);
        log::trace!("{angles:?}");
        self.classify_angles(&angles)
    }

    pub fn classify_angles(&self, angles: &JointAngles) -> PoseMatches {
        let mut matches = PoseMatches::default();
        for def in &self.definitions {
            matches.set(def.pose, def.matches(angles));
        }
        matches
    }

    /// `None` means no person on the frame: every pose is unmatched.
    pub fn classify_optional(&self, keypoints: Option<&BodyKeypoints>) -> PoseMatches {
        match keypoints {
            Some(kp) => self.classify(kp),
            None => self.classify_angles(&JointAngles::default()),
        }
    }
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::new(default_definitions())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::shared::body_keypoints::BodyKeypoints;
    use crate::shared::point::Point2D;

    const LIMB: f64 = 100.0;

    fn polar(origin: Point2D, bearing_deg: f64, len: f64) -> Point2D {
        let r = bearing_deg.to_radians();
        Point2D::new(origin.x + len * r.cos(), origin.y + len * r.sin())
    }

    /// Builds a skeleton (image coordinates, y down) whose four joint angles
    /// are exactly the given values, with shoulders `shoulder_span` apart.
    pub fn skeleton(
        left_armpit: f64,
        left_elbow: f64,
        right_armpit: f64,
        right_elbow: f64,
        shoulder_span: f64,
    ) -> BodyKeypoints {
        let left_shoulder = Point2D::new(300.0, 200.0);
        let right_shoulder = Point2D::new(300.0 + shoulder_span, 200.0);

        // Hips straight below the shoulders (bearing 90°).
        let left_hip = polar(left_shoulder, 90.0, 2.0 * LIMB);
        let right_hip = polar(right_shoulder, 90.0, 2.0 * LIMB);

        // Left arm swings toward -x, right arm toward +x.
        let l_upper = 90.0 + left_armpit;
        let left_elbow_pt = polar(left_shoulder, l_upper, LIMB);
        let left_wrist = polar(left_elbow_pt, l_upper + 180.0 + left_elbow, LIMB);

        let r_upper = 90.0 - right_armpit;
        let right_elbow_pt = polar(right_shoulder, r_upper, LIMB);
        let right_wrist = polar(right_elbow_pt, r_upper + 180.0 - right_elbow, LIMB);

        BodyKeypoints {
            left_shoulder,
            left_elbow: left_elbow_pt,
            left_wrist,
            left_hip,
            right_shoulder,
            right_elbow: right_elbow_pt,
            right_wrist,
            right_hip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::skeleton;
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const WIDE: f64 = 200.0;
    const NARROW: f64 = 80.0;

    #[test]
    fn test_skeleton_helper_reproduces_angles() {
        let angles = JointAngles::measure(&skeleton(30.0, 160.0, 45.0, 120.0, WIDE));
        assert_relative_eq!(angles.left_armpit.unwrap(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(angles.left_elbow.unwrap(), 160.0, epsilon = 1e-9);
        assert_relative_eq!(angles.right_armpit.unwrap(), 45.0, epsilon = 1e-9);
        assert_relative_eq!(angles.right_elbow.unwrap(), 120.0, epsilon = 1e-9);
        assert_relative_eq!(angles.shoulder_distance.unwrap(), WIDE, epsilon = 1e-9);
    }

    #[test]
    fn test_shoulder_rolls_only() {
        let classifier = PoseClassifier::default();
        let matches = classifier.classify(&skeleton(30.0, 160.0, 30.0, 160.0, WIDE));

        assert!(matches.get(PoseId::ShoulderRolls));
        assert!(!matches.get(PoseId::SeatedTwist));
        assert!(!matches.get(PoseId::LeftCrescent));
        assert!(!matches.get(PoseId::RightCrescent));
        assert_eq!(matches.matched().collect::<Vec<_>>(), vec![PoseId::ShoulderRolls]);
    }

    #[rstest]
    #[case::seated_twist(PoseId::SeatedTwist, [20.0, 140.0, 10.0, 130.0], NARROW)]
    #[case::left_crescent(PoseId::LeftCrescent, [140.0, 120.0, 175.0, 140.0], WIDE)]
    #[case::right_crescent(PoseId::RightCrescent, [175.0, 160.0, 170.0, 140.0], WIDE)]
    fn test_each_pose_matches_its_centre(
        #[case] pose: PoseId,
        #[case] a: [f64; 4],
        #[case] span: f64,
    ) {
        let classifier = PoseClassifier::default();
        let matches = classifier.classify(&skeleton(a[0], a[1], a[2], a[3], span));
        assert!(matches.get(pose), "{pose} should match");
    }

    #[test]
    fn test_seated_twist_requires_close_shoulders() {
        let classifier = PoseClassifier::default();
        let twist = [20.0, 140.0, 10.0, 130.0];
        let wide = classifier.classify(&skeleton(twist[0], twist[1], twist[2], twist[3], WIDE));
        assert!(!wide.get(PoseId::SeatedTwist));
    }

    #[test]
    fn test_shoulder_distance_bound_is_strict() {
        let def = PoseDefinition::default_for(PoseId::SeatedTwist);
        let mut angles = JointAngles {
            left_armpit: Some(20.0),
            left_elbow: Some(140.0),
            right_armpit: Some(10.0),
            right_elbow: Some(130.0),
            shoulder_distance: Some(99.999),
        };
        assert!(def.matches(&angles));
        angles.shoulder_distance = Some(100.0);
        assert!(!def.matches(&angles));
        angles.shoulder_distance = None;
        assert!(!def.matches(&angles));
    }

    #[test]
    fn test_poses_can_match_simultaneously() {
        // Values inside both the Seated Twist and Shoulder Rolls windows.
        let classifier = PoseClassifier::default();
        let matches = classifier.classify(&skeleton(25.0, 150.0, 20.0, 150.0, NARROW));
        assert!(matches.get(PoseId::SeatedTwist));
        assert!(matches.get(PoseId::ShoulderRolls));
    }

    #[test]
    fn test_all_zero_keypoints_match_nothing() {
        let classifier = PoseClassifier::default();
        let matches = classifier.classify(&BodyKeypoints::default());
        assert!(!matches.any());
    }

    #[test]
    fn test_missing_single_joint_breaks_dependent_poses() {
        let classifier = PoseClassifier::default();
        let mut kp = skeleton(30.0, 160.0, 30.0, 160.0, WIDE);
        kp.left_wrist = Point2D::ORIGIN;
        let matches = classifier.classify(&kp);
        assert!(!matches.get(PoseId::ShoulderRolls));
    }

    #[test]
    fn test_collapsed_arm_matches_nothing() {
        let classifier = PoseClassifier::default();
        let mut kp = skeleton(30.0, 160.0, 30.0, 160.0, WIDE);
        kp.right_elbow = kp.right_shoulder;
        let angles = JointAngles::measure(&kp);
        assert!(angles.right_armpit.is_none());
        assert!(angles.right_elbow.is_none());
        assert!(!classifier.classify(&kp).any());
    }

    #[test]
    fn test_no_person_is_all_false() {
        let classifier = PoseClassifier::default();
        let matches = classifier.classify_optional(None);
        for &pose in PoseId::ALL {
            assert!(!matches.get(pose));
        }
    }

    #[test]
    fn test_custom_definitions_override_defaults() {
        use crate::classification::domain::pose_definition::AngleTarget;

        let classifier = PoseClassifier::new(vec![PoseDefinition::new(
            PoseId::ShoulderRolls,
            vec![AngleTarget::new(JointAngle::LeftElbow, 90.0, 5.0)],
        )]);
        let bent = classifier.classify(&skeleton(30.0, 92.0, 30.0, 160.0, WIDE));
        let straight = classifier.classify(&skeleton(30.0, 160.0, 30.0, 160.0, WIDE));

        assert!(bent.get(PoseId::ShoulderRolls));
        assert!(!straight.get(PoseId::ShoulderRolls));
        assert!(classifier.definition(PoseId::SeatedTwist).is_none());
    }

    #[test]
    fn test_unevaluated_pose_reads_false() {
        let classifier = PoseClassifier::new(vec![]);
        let matches = classifier.classify(&skeleton(30.0, 160.0, 30.0, 160.0, WIDE));
        assert!(!matches.get(PoseId::ShoulderRolls));
    }
}
