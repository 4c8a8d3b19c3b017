use crate::session::hold_session::PoseStatus;

/// Presents per-frame hold statuses (overlay, console, GUI...).
pub trait StatusRenderer: Send {
    fn render(
        &mut self,
        frame_index: usize,
        timestamp: f64,
        statuses: &[PoseStatus],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
