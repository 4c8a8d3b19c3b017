use serde::{Deserialize, Serialize};

/// The poses the classifier knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseId {
    SeatedTwist,
    ShoulderRolls,
    LeftCrescent,
    RightCrescent,
}

impl PoseId {
    pub const ALL: &[PoseId] = &[
        PoseId::SeatedTwist,
        PoseId::ShoulderRolls,
        PoseId::LeftCrescent,
        PoseId::RightCrescent,
    ];

    /// Human-readable name, used as the hold tracker's label.
    pub fn display_name(&self) -> &'static str {
        match self {
            PoseId::SeatedTwist => "Seated Twist",
            PoseId::ShoulderRolls => "Shoulder Rolls",
            PoseId::LeftCrescent => "Left Crescent",
            PoseId::RightCrescent => "Right Crescent",
        }
    }
}

impl std::fmt::Display for PoseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}

/// The four joint angles measured on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointAngle {
    /// Hip–shoulder–elbow, left side.
    LeftArmpit,
    /// Shoulder–elbow–wrist, left side.
    LeftElbow,
    RightArmpit,
    RightElbow,
}

/// One `target ± tolerance` window on a joint angle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleTarget {
    pub angle: JointAngle,
    pub target_deg: f64,
    pub tolerance_deg: f64,
}

impl AngleTarget {
    pub fn new(angle: JointAngle, target_deg: f64, tolerance_deg: f64) -> Self {
        Self {
            angle,
            target_deg,
            tolerance_deg,
        }
    }
}

/// Angle windows (and optional shoulder-distance bound) that together
/// define one pose. A pose matches when every window holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseDefinition {
    pub pose: PoseId,
    pub angles: Vec<AngleTarget>,
    /// Strict upper bound on shoulder-to-shoulder distance, in image units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shoulder_distance: Option<f64>,
}

impl PoseDefinition {
    pub fn new(pose: PoseId, angles: Vec<AngleTarget>) -> Self {
        Self {
            pose,
            angles,
            max_shoulder_distance: None,
        }
    }

    pub fn with_max_shoulder_distance(mut self, max: f64) -> Self {
        self.max_shoulder_distance = Some(max);
        self
    }

    /// Built-in definition for `pose`.
    pub fn default_for(pose: PoseId) -> Self {
        use JointAngle::*;

        let windows = |l_armpit: (f64, f64),
                       l_elbow: (f64, f64),
                       r_armpit: (f64, f64),
                       r_elbow: (f64, f64)| {
            vec![
                AngleTarget::new(LeftArmpit, l_armpit.0, l_armpit.1),
                AngleTarget::new(LeftElbow, l_elbow.0, l_elbow.1),
                AngleTarget::new(RightArmpit, r_armpit.0, r_armpit.1),
                AngleTarget::new(RightElbow, r_elbow.0, r_elbow.1),
            ]
        };

        match pose {
            PoseId::SeatedTwist => Self::new(
                pose,
                windows((20.0, 20.0), (140.0, 30.0), (10.0, 20.0), (130.0, 30.0)),
            )
            .with_max_shoulder_distance(100.0),
            PoseId::ShoulderRolls => Self::new(
                pose,
                windows((30.0, 20.0), (160.0, 30.0), (30.0, 20.0), (160.0, 30.0)),
            ),
            PoseId::LeftCrescent => Self::new(
                pose,
                windows((140.0, 30.0), (120.0, 40.0), (180.0, 30.0), (140.0, 40.0)),
            ),
            PoseId::RightCrescent => Self::new(
                pose,
                windows((180.0, 30.0), (160.0, 40.0), (170.0, 30.0), (140.0, 40.0)),
            ),
        }
    }
}

/// The shipped definition table, one entry per [`PoseId`].
pub fn default_definitions() -> Vec<PoseDefinition> {
    PoseId::ALL
        .iter()
        .map(|&pose| PoseDefinition::default_for(pose))
        .collect()
}
