use thiserror::Error;

use crate::classification::domain::pose_classifier::PoseClassifier;
use crate::classification::domain::pose_definition::PoseId;
use crate::hold::domain::hold_status::HoldStatus;
use crate::hold::domain::hold_tracker::{HoldState, HoldTracker};
use crate::session::domain::frame_source::FrameSource;
use crate::session::domain::pose_estimator::PoseEstimator;
use crate::session::domain::status_renderer::StatusRenderer;
use crate::session::session_logger::{NullSessionLogger, SessionLogger};
use crate::shared::body_keypoints::BodyKeypoints;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to read frame: {0}")]
    FrameSource(#[source] Box<dyn std::error::Error>),
    #[error("pose estimation failed on frame {frame}: {source}")]
    Estimator {
        frame: usize,
        #[source]
        source: Box<dyn std::error::Error>,
    },
    #[error("failed to render frame {frame}: {source}")]
    Renderer {
        frame: usize,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

/// A tracker's status on one frame, tagged with the pose it tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseStatus {
    pub pose: PoseId,
    pub status: HoldStatus,
}

/// What happened over one [`HoldSession::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub frames: usize,
    pub frames_without_person: usize,
    /// Poses that finished during this run, with the frame time they did.
    pub completed: Vec<(PoseId, f64)>,
    pub first_timestamp: Option<f64>,
    pub last_timestamp: Option<f64>,
    /// The run ended because every pose was done, not because frames ran out.
    pub stopped_early: bool,
}

/// Frame loop for one coaching routine: classify → update every tracker →
/// render.
///
/// Runs on a single thread. Each frame is fully processed, every tracker
/// updated exactly once in routine order, before the next frame is pulled.
pub struct HoldSession {
    classifier: PoseClassifier,
    trackers: Vec<(PoseId, HoldTracker)>,
    stop_when_complete: bool,
    logger: Box<dyn SessionLogger>,
}

impl HoldSession {
    pub fn new(classifier: PoseClassifier, trackers: Vec<(PoseId, HoldTracker)>) -> Self {
        Self {
            classifier,
            trackers,
            stop_when_complete: false,
            logger: Box::new(NullSessionLogger),
        }
    }

    pub fn with_stop_when_complete(mut self, stop: bool) -> Self {
        self.stop_when_complete = stop;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn classifier(&self) -> &PoseClassifier {
        &self.classifier
    }

    pub fn trackers(&self) -> impl Iterator<Item = (PoseId, &HoldTracker)> {
        self.trackers.iter().map(|(pose, t)| (*pose, t))
    }

    pub fn tracker(&self, pose: PoseId) -> Option<&HoldTracker> {
        self.trackers
            .iter()
            .find(|(p, _)| *p == pose)
            .map(|(_, t)| t)
    }

    /// `true` once every tracker in the routine is done.
    pub fn is_complete(&self) -> bool {
        !self.trackers.is_empty() && self.trackers.iter().all(|(_, t)| t.is_completed())
    }

    /// Processes one frame. `None` keypoints means no person was found.
    pub fn process(&mut self, now: f64, keypoints: Option<&BodyKeypoints>) -> Vec<PoseStatus> {
        let matches = self.classifier.classify_optional(keypoints);

        let mut statuses = Vec::with_capacity(self.trackers.len());
        for (pose, tracker) in &mut self.trackers {
            let was_done = tracker.state() == HoldState::Done;
            let status = tracker.update(matches.get(*pose), now);
            if !was_done && tracker.is_completed() {
                self.logger.pose_completed(*pose, now);
            }
            statuses.push(PoseStatus {
                pose: *pose,
                status,
            });
        }
        statuses
    }

    /// Drives the session until the source runs dry, or until the routine is
    /// complete when `stop_when_complete` is set.
    pub fn run<S, E, R>(
        &mut self,
        source: &mut S,
        estimator: &mut E,
        renderer: &mut R,
    ) -> Result<SessionSummary, SessionError>
    where
        S: FrameSource + ?Sized,
        E: PoseEstimator<S::Frame> + ?Sized,
        R: StatusRenderer + ?Sized,
    {
        let mut summary = SessionSummary::default();

        for item in source.frames() {
            let timed = item.map_err(SessionError::FrameSource)?;

            let keypoints =
                estimator
                    .estimate(&timed.frame)
                    .map_err(|source| SessionError::Estimator {
                        frame: timed.index,
                        source,
                    })?;
            if keypoints.is_none() {
                summary.frames_without_person += 1;
            }

            let done_before: Vec<bool> =
                self.trackers.iter().map(|(_, t)| t.is_completed()).collect();
            let statuses = self.process(timed.timestamp, keypoints.as_ref());
            for ((pose, tracker), was_done) in self.trackers.iter().zip(done_before) {
                if !was_done && tracker.is_completed() {
                    summary.completed.push((*pose, timed.timestamp));
                }
            }

            renderer
                .render(timed.index, timed.timestamp, &statuses)
                .map_err(|source| SessionError::Renderer {
                    frame: timed.index,
                    source,
                })?;

            summary.frames += 1;
            summary.first_timestamp.get_or_insert(timed.timestamp);
            summary.last_timestamp = Some(timed.timestamp);
            self.logger.progress(summary.frames);

            if self.stop_when_complete && self.is_complete() {
                self.logger.info("All poses held, ending session");
                summary.stopped_early = true;
                break;
            }
        }

        self.logger.summary(&summary);
        Ok(summary)
    }

    /// Re-arms every tracker, e.g. when the user restarts the routine.
    pub fn reset(&mut self) {
        for (_, tracker) in &mut self.trackers {
            tracker.reset();
        }
        self.logger.info("Session reset");
    }
}
