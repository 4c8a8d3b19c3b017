use crate::classification::domain::pose_definition::PoseId;
use crate::session::hold_session::SessionSummary;

/// Observer for session-level events.
///
/// Keeps the session loop free of output concerns; the CLI reports through
/// the `log` crate, tests and embedders can stay silent.
pub trait SessionLogger: Send {
    /// Report how many frames have been processed so far.
    fn progress(&mut self, frames: usize);

    /// A pose's hold finished on the frame stamped `timestamp`.
    fn pose_completed(&mut self, pose: PoseId, timestamp: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session report. Default: no-op.
    fn summary(&self, _summary: &SessionSummary) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn progress(&mut self, _frames: usize) {}
    fn pose_completed(&mut self, _pose: PoseId, _timestamp: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` facade.
///
/// Progress is throttled to every `throttle_frames` frames so a 30 fps
/// stream does not flood the output.
pub struct LogSessionLogger {
    throttle_frames: usize,
    completions: Vec<(PoseId, f64)>,
    messages: Vec<String>,
}

impl LogSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            completions: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn completions(&self) -> &[(PoseId, f64)] {
        &self.completions
    }

    /// Returns the formatted report, or `None` if no frame was processed.
    pub fn summary_string(&self, summary: &SessionSummary) -> Option<String> {
        if summary.frames == 0 {
            return None;
        }

        let mut lines = Vec::new();
        let span = match (summary.first_timestamp, summary.last_timestamp) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        };
        lines.push(format!(
            "Session summary ({} frames, {span:.1}s):",
            summary.frames
        ));
        lines.push(format!(
            "  frames without a person: {}",
            summary.frames_without_person
        ));
        if summary.completed.is_empty() {
            lines.push("  no pose completed".to_string());
        }
        for (pose, at) in &summary.completed {
            lines.push(format!("  {pose:16} done at {at:.1}s"));
        }
        if summary.stopped_early {
            lines.push("  stopped: routine complete".to_string());
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogSessionLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl SessionLogger for LogSessionLogger {
    fn progress(&mut self, frames: usize) {
        if frames % self.throttle_frames == 0 {
            log::debug!("Processed {frames} frames");
        }
    }

    fn pose_completed(&mut self, pose: PoseId, timestamp: f64) {
        self.completions.push((pose, timestamp));
        log::info!("{pose} completed at {timestamp:.1}s");
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self, summary: &SessionSummary) {
        if let Some(text) = self.summary_string(summary) {
            log::info!("\n\n{text}");
        }
    }
}
