use std::collections::HashMap;
use std::io::Write;

use pose_coach_core::classification::domain::pose_definition::PoseId;
use pose_coach_core::session::domain::status_renderer::StatusRenderer;
use pose_coach_core::session::hold_session::PoseStatus;

/// Prints a line each time a pose's status text changes.
///
/// Idle poses ("Waiting for ...") are only printed with `show_all`.
pub struct ConsoleStatusRenderer<W: Write + Send> {
    out: W,
    show_all: bool,
    last_text: HashMap<PoseId, String>,
}

impl<W: Write + Send> ConsoleStatusRenderer<W> {
    pub fn new(out: W, show_all: bool) -> Self {
        Self {
            out,
            show_all,
            last_text: HashMap::new(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> StatusRenderer for ConsoleStatusRenderer<W> {
    fn render(
        &mut self,
        _frame_index: usize,
        timestamp: f64,
        statuses: &[PoseStatus],
    ) -> Result<(), Box<dyn std::error::Error>> {
        for PoseStatus { pose, status } in statuses {
            // Hidden transitions still count, so a restarted countdown prints again.
            if self.last_text.get(pose) == Some(&status.text) {
                continue;
            }
            self.last_text.insert(*pose, status.text.clone());

            if status.visible || self.show_all {
                writeln!(
                    self.out,
                    "[{timestamp:8.2}s] {:<7} {}",
                    status.color.to_string(),
                    status.text
                )?;
            }
        }
        Ok(())
    }
}
