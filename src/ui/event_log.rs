//! Bounded log of recent runner events, shown in the info panel.

use std::collections::VecDeque;

use crate::core::events::RunnerEvent;

pub const EVENT_LOG_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogEntry {
    pub message: String,
    /// Crashes and records stand out.
    pub is_highlight: bool,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add_entry(&mut self, message: String, is_highlight: bool) {
        if self.capacity == 0 {
            return;
        }
        // Keep only the most recent entries
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(EventLogEntry {
            message,
            is_highlight,
        });
    }

    /// Log an event if it has a message.
    pub fn record(&mut self, event: &RunnerEvent) {
        if let Some(message) = event.message() {
            let is_highlight = matches!(
                event,
                RunnerEvent::Crashed { .. } | RunnerEvent::NewHighScore { .. }
            );
            self.add_entry(message, is_highlight);
        }
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundId;
    use crate::entities::obstacle::ObstacleKind;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.add_entry(format!("entry {}", i), false);
        }
        let messages: Vec<&str> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_record_skips_sounds_and_highlights_crashes() {
        let mut log = EventLog::default();
        log.record(&RunnerEvent::Sound(SoundId::Hit));
        assert!(log.is_empty());

        log.record(&RunnerEvent::Crashed {
            distance: 12,
            obstacle: ObstacleKind::CactusSmall,
        });
        log.record(&RunnerEvent::Paused);
        let entries: Vec<&EventLogEntry> = log.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_highlight);
        assert!(!entries[1].is_highlight);
    }
}
