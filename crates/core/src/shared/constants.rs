/// Seconds a hold survives without a positive detection before it resets.
pub const DEFAULT_GRACE_PERIOD_SECS: f64 = 2.0;

/// Number of keypoints in a COCO-17 skeleton (YOLO-pose, MoveNet, ...).
pub const COCO_KEYPOINT_COUNT: usize = 17;

pub const COCO_LEFT_SHOULDER: usize = 5;
pub const COCO_RIGHT_SHOULDER: usize = 6;
pub const COCO_LEFT_ELBOW: usize = 7;
pub const COCO_RIGHT_ELBOW: usize = 8;
pub const COCO_LEFT_WRIST: usize = 9;
pub const COCO_RIGHT_WRIST: usize = 10;
pub const COCO_LEFT_HIP: usize = 11;
pub const COCO_RIGHT_HIP: usize = 12;

pub const SEATED_TWIST_HOLD_SECS: f64 = 120.0;
pub const SHOULDER_ROLLS_HOLD_SECS: f64 = 20.0;
pub const CRESCENT_HOLD_SECS: f64 = 15.0;

pub const CONFIG_DIR_NAME: &str = "PoseCoach";
pub const ROUTINE_FILE_NAME: &str = "routine.json";
