//! Result sinks - where rules report verdicts

use std::sync::{PoisonError, RwLock};

use crate::verdict::Verdict;

/// Receives the verdict of a rule check
///
/// Rules report exactly once per successful `is_transfer_valid` call.
pub trait ResultSink: Send + Sync {
    fn report(&self, verdict: Verdict);
}

/// In-memory sink keeping the last reported verdict
#[derive(Debug, Default)]
pub struct VerdictRecorder {
    state: RwLock<RecorderState>,
}

#[derive(Debug, Default)]
struct RecorderState {
    last: Option<Verdict>,
    reports: usize,
}

impl VerdictRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported verdict, if any
    pub fn last(&self) -> Option<Verdict> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last
    }

    /// Number of reports received
    pub fn reports(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .reports
    }
}

impl ResultSink for VerdictRecorder {
    fn report(&self, verdict: Verdict) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.last = Some(verdict);
        state.reports += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_recorder() {
        let recorder = VerdictRecorder::new();
        assert_eq!(recorder.last(), None);
        assert_eq!(recorder.reports(), 0);
    }

    #[test]
    fn test_recorder_keeps_last() {
        let recorder = VerdictRecorder::new();

        recorder.report(Verdict::approved());
        recorder.report(Verdict::rejected(3));

        assert_eq!(recorder.last(), Some(Verdict::rejected(3)));
        assert_eq!(recorder.reports(), 2);
    }
}
