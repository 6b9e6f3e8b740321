/// Observer for a report run.
///
/// `advance` is called once per entity, after it was placed (or skipped), with the number
/// of entities handled so far and the total.
pub trait ProgressSink {
    /// Called once before the first entity.
    fn begin(&mut self, _total: usize) {}
    /// Called after each entity.
    fn advance(&mut self, done: usize, total: usize);
    /// Called once after the last entity, before the document is finalized.
    fn end(&mut self) {}
}

/// Ignores all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&mut self, _done: usize, _total: usize) {}
}

/// Emits progress as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn begin(&mut self, total: usize) {
        tracing::info!(total, "composing tiles");
    }

    fn advance(&mut self, done: usize, total: usize) {
        tracing::info!(done, total, "tile done");
    }
}

/// Forwards progress to a closure.
pub struct FnProgress<F>(pub F);

impl<F: FnMut(usize, usize)> ProgressSink for FnProgress<F> {
    fn advance(&mut self, done: usize, total: usize) {
        (self.0)(done, total)
    }
}

/// Records every call, for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingProgress {
    /// `total` passed to `begin`, if it was called.
    pub total: Option<usize>,
    /// `(done, total)` pairs in call order.
    pub steps: Vec<(usize, usize)>,
    /// Whether `end` was called.
    pub ended: bool,
}

impl ProgressSink for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
        self.steps.clear();
        self.ended = false;
    }

    fn advance(&mut self, done: usize, total: usize) {
        self.steps.push((done, total));
    }

    fn end(&mut self) {
        self.ended = true;
    }
}
