pub mod shared {
    pub mod body_keypoints;
    pub mod constants;
    pub mod point;
}

pub mod classification {
    pub mod domain {
        pub mod geometry;
        pub mod pose_classifier;
        pub mod pose_definition;
    }
}

pub mod hold {
    pub mod domain {
        pub mod hold_status;
        pub mod hold_tracker;
    }
}

pub mod session {
    pub mod domain {
        pub mod frame_source;
        pub mod pose_estimator;
        pub mod status_renderer;
    }
    pub mod hold_session;
    pub mod session_logger;
}

pub mod config {
    pub mod routine_config;
}

pub mod recording {
    pub mod domain {
        pub mod recorded_frame;
    }
    pub mod infrastructure;
}
