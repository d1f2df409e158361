/// Crawl state definitions for a single comic run
///
/// A run starts `Running` and ends in exactly one terminal state.
use std::fmt;

/// Represents the current state of a comic crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    // ===== Active States =====
    /// The pagination loop is still following next links
    Running,

    // ===== Terminal States =====
    /// The archive ended naturally (no next link)
    Done,

    /// The run stopped on a fetch failure or a structural error
    Aborted,
}

impl CrawlState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns true if the run ended by natural exhaustion of next links
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// Only `Running -> Done` and `Running -> Aborted` are allowed; terminal
    /// states never change again.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Done) | (Self::Running, Self::Aborted)
        )
    }

    /// Returns the lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
