use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Wraps an indicatif progress bar that starts hidden and can be displayed on
/// demand, so library code can always tick it.
pub struct Bar {
    /// The ProgressBar from indicatif.
    pub pbar: ProgressBar,
}

impl Bar {
    /// Creates the Bar struct with a size and prefix for the bar.
    /// The returned Bar is hidden.
    pub fn new(len: u64, prefix: String) -> Self {
        let progress_bar = ProgressBar::hidden();
        progress_bar.set_length(len);
        progress_bar.set_prefix(prefix);
        let style = ProgressStyle::default_bar()
            .template("{prefix}[{bar:40}] [{elapsed_precise}] {percent:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        progress_bar.set_style(style);
        Self { pbar: progress_bar }
    }

    /// Displays a hidden Bar.
    pub fn display(&self) {
        self.pbar.set_draw_target(ProgressDrawTarget::stderr())
    }

    /// Creates a Bar and sets it to be displayed.
    pub fn visible(len: u64, prefix: String) -> Self {
        let bar = Self::new(len, prefix);
        bar.display();
        bar
    }

    /// Creates a Bar that is displayed only when `show` is set.
    pub fn maybe_visible(show: bool, len: u64, prefix: String) -> Self {
        if show {
            Self::visible(len, prefix)
        } else {
            Self::new(len, prefix)
        }
    }

    /// Changes the length of the bar.
    pub fn set_length(&self, len: u64) {
        self.pbar.set_length(len);
    }

    /// tick the progress bar
    pub fn tick(&self) {
        self.pbar.inc(1);
    }

    /// tick the progress bar by `n` steps
    pub fn tick_by(&self, n: u64) {
        self.pbar.inc(n);
    }

    /// The number of ticks so far.
    pub fn position(&self) -> u64 {
        self.pbar.position()
    }
}

impl Drop for Bar {
    /// make sure we clear bars when the object is dropped
    fn drop(&mut self) {
        if !self.pbar.is_finished() {
            self.pbar.finish_and_clear();
        }
    }
}
