/// Append-only log of the page titles visited during one run
///
/// The number of recorded pages doubles as the sequence index used to prefix
/// file names, so callers receive the index from `record` and pass it on
/// explicitly instead of reading the history again.
#[derive(Debug, Clone, Default)]
pub struct History {
    titles: Vec<String>,
}

impl History {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visited page title and returns its sequence index
    ///
    /// The first recorded page gets index 1.
    pub fn record(&mut self, title: impl Into<String>) -> u32 {
        self.titles.push(title.into());
        self.titles.len() as u32
    }

    /// Number of pages recorded so far
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Titles in visit order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title of the most recently recorded page
    pub fn last(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}
