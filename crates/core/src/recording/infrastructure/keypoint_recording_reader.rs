use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::recording::domain::recorded_frame::RecordedFrame;
use crate::session::domain::frame_source::{FrameSource, TimedFrame};

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to open recording {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Replays a JSON-lines keypoint recording as a [`FrameSource`].
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub struct KeypointRecordingReader {
    input: Box<dyn BufRead + Send>,
    line: usize,
    index: usize,
}

impl KeypointRecordingReader {
    pub fn open(path: &Path) -> Result<Self, RecordingError> {
        let file = File::open(path).map_err(|source| RecordingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Replaying keypoints from {}", path.display());
        Ok(Self::from_reader(Box::new(BufReader::new(file))))
    }

    pub fn from_reader(input: Box<dyn BufRead + Send>) -> Self {
        Self {
            input,
            line: 0,
            index: 0,
        }
    }

    fn next_frame(&mut self) -> Option<Result<TimedFrame<RecordedFrame>, RecordingError>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            match self.input.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) if buf.trim().is_empty() => continue,
                Ok(_) => break,
                Err(source) => {
                    return Some(Err(RecordingError::Read {
                        line: self.line,
                        source,
                    }))
                }
            }
        }

        let frame: RecordedFrame = match serde_json::from_str(buf.trim()) {
            Ok(frame) => frame,
            Err(source) => {
                return Some(Err(RecordingError::Parse {
                    line: self.line,
                    source,
                }))
            }
        };

        let timed = TimedFrame {
            index: self.index,
            timestamp: frame.t,
            frame,
        };
        self.index += 1;
        Some(Ok(timed))
    }
}

impl FrameSource for KeypointRecordingReader {
    type Frame = RecordedFrame;

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<TimedFrame<RecordedFrame>, Box<dyn std::error::Error>>> + '_>
    {
        Box::new(std::iter::from_fn(move || {
            self.next_frame()
                .map(|r| r.map_err(|e| Box::new(e) as Box<dyn std::error::Error>))
        }))
    }
}
