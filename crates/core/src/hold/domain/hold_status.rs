/// Symbolic display color; RGB values are the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    /// Grey.
    Waiting,
    /// Yellow.
    Counting,
    /// Green.
    Done,
}

impl StatusColor {
    /// Suggested RGB triple for renderers without their own palette.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            StatusColor::Waiting => (100, 100, 100),
            StatusColor::Counting => (255, 255, 0),
            StatusColor::Done => (0, 255, 0),
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusColor::Waiting => write!(f, "grey"),
            StatusColor::Counting => write!(f, "yellow"),
            StatusColor::Done => write!(f, "green"),
        }
    }
}

/// What a hold tracker reports after one update.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldStatus {
    pub text: String,
    pub color: StatusColor,
    /// `true` while a hold is running or finished; idle poses are
    /// usually left off screen.
    pub visible: bool,
}

impl HoldStatus {
    pub fn waiting(name: &str) -> Self {
        Self {
            text: format!("Waiting for {name}..."),
            color: StatusColor::Waiting,
            visible: false,
        }
    }

    pub fn counting(name: &str, remaining_secs: f64) -> Self {
        Self {
            text: format!("{name}: {}s", remaining_secs.floor() as u64),
            color: StatusColor::Counting,
            visible: true,
        }
    }

    pub fn done(name: &str) -> Self {
        Self {
            text: format!("{name}: DONE!"),
            color: StatusColor::Done,
            visible: true,
        }
    }
}
