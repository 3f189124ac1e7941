//! Save debouncing for the watched document.
//!
//! Editors rarely save with a single write: some truncate and write in
//! chunks, others write a temp file and rename it over the original. All
//! events for the document within the debounce window collapse into one
//! pending change, so one save triggers one re-read.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// What happened to the watched document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FsEventKind {
    Created,
    Modified,
    Removed,
}

impl FsEventKind {
    /// Fold a newer event into a pending one.
    ///
    /// Returns `None` when the pair cancels out: a file created and removed
    /// again within one window never needs a re-read.
    fn then(self, next: Self) -> Option<Self> {
        use FsEventKind::{Created, Modified, Removed};

        match (self, next) {
            (Created, Removed) => None,
            (Created, Created | Modified) | (Modified, Created) => Some(Created),
            (Modified, Modified) => Some(Modified),
            // Rename-over and delete-then-recreate both end with the file present.
            (Removed, Created) => Some(Modified),
            (_, Removed) | (Removed, Modified) => Some(Removed),
        }
    }
}

#[derive(Debug)]
struct Pending {
    kind: FsEventKind,
    deadline: Instant,
}

/// Debouncer for a single watched file.
pub(crate) struct EventDebouncer {
    pending: Mutex<Option<Pending>>,
    window: Duration,
}

impl EventDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            window,
        }
    }

    /// Record an event for the document and restart the window.
    pub fn record(&self, kind: FsEventKind) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let folded = match pending.as_ref() {
            Some(existing) => existing.kind.then(kind),
            None => Some(kind),
        };
        *pending = folded.map(|kind| Pending {
            kind,
            deadline: Instant::now() + self.window,
        });
    }

    /// Take the pending change once its window has passed.
    pub fn take_ready(&self) -> Option<FsEventKind> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.as_ref()?.deadline > Instant::now() {
            return None;
        }
        pending.take().map(|p| p.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    const WINDOW: Duration = Duration::from_millis(10);

    fn settle() {
        thread::sleep(WINDOW + Duration::from_millis(5));
    }

    #[test]
    fn test_nothing_pending() {
        let debouncer = EventDebouncer::new(WINDOW);
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_burst_of_saves_is_one_change() {
        let debouncer = EventDebouncer::new(WINDOW);
        for _ in 0..5 {
            debouncer.record(FsEventKind::Modified);
        }
        assert_eq!(debouncer.take_ready(), None);

        settle();
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Modified));
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_rename_over_document_is_a_modification() {
        let debouncer = EventDebouncer::new(WINDOW);
        debouncer.record(FsEventKind::Modified);
        debouncer.record(FsEventKind::Removed);
        debouncer.record(FsEventKind::Created);

        settle();
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Modified));
    }

    #[test]
    fn test_delete_then_recreate_in_later_windows() {
        let debouncer = EventDebouncer::new(WINDOW);
        debouncer.record(FsEventKind::Removed);
        settle();
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Removed));

        debouncer.record(FsEventKind::Created);
        debouncer.record(FsEventKind::Modified);
        settle();
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Created));
    }

    #[test]
    fn test_delete_wins_over_earlier_writes() {
        let debouncer = EventDebouncer::new(WINDOW);
        debouncer.record(FsEventKind::Modified);
        debouncer.record(FsEventKind::Removed);
        debouncer.record(FsEventKind::Modified);

        settle();
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Removed));
    }

    #[test]
    fn test_created_then_removed_cancels() {
        let debouncer = EventDebouncer::new(WINDOW);
        debouncer.record(FsEventKind::Created);
        debouncer.record(FsEventKind::Removed);

        settle();
        assert_eq!(debouncer.take_ready(), None);
    }

    #[test]
    fn test_each_event_restarts_window() {
        let debouncer = EventDebouncer::new(Duration::from_millis(30));
        debouncer.record(FsEventKind::Modified);
        thread::sleep(Duration::from_millis(20));
        debouncer.record(FsEventKind::Modified);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), None);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.take_ready(), Some(FsEventKind::Modified));
    }
}
