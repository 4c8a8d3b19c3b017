pub mod keypoint_recording_reader;
pub mod recorded_pose_estimator;
