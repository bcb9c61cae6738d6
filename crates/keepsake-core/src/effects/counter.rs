//! Elapsed-time counter
//!
//! Shows how long it has been since a fixed start moment as
//! days / hours / minutes / seconds. Nothing is stored between ticks; each
//! render recomputes from the start timestamp and the current time.

use chrono::NaiveDateTime;

use crate::dom::{Document, NodeId};

/// Time since the start, split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    /// Split `now - start`. A `now` before `start` counts as zero.
    pub fn between(start: NaiveDateTime, now: NaiveDateTime) -> Self {
        let total = (now - start).num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Display strings: days as-is, the rest zero-padded to two digits
    pub fn fields(&self) -> [String; 4] {
        [
            self.days.to_string(),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

/// The four display nodes of the counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterDisplay {
    pub days: NodeId,
    pub hours: NodeId,
    pub minutes: NodeId,
    pub seconds: NodeId,
}

impl CounterDisplay {
    /// Locate `#days`, `#hours`, `#minutes` and `#seconds`
    pub fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            days: doc.get_by_id("days")?,
            hours: doc.get_by_id("hours")?,
            minutes: doc.get_by_id("minutes")?,
            seconds: doc.get_by_id("seconds")?,
        })
    }
}

/// Counter bound to its display and start time
#[derive(Debug, Clone)]
pub struct Counter {
    start: NaiveDateTime,
    display: CounterDisplay,
}

impl Counter {
    pub fn new(start: NaiveDateTime, display: CounterDisplay) -> Self {
        Self { start, display }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Recompute and write the four fields
    pub fn render(&self, doc: &mut Document, now: NaiveDateTime) -> Elapsed {
        let elapsed = Elapsed::between(self.start, now);
        let [days, hours, minutes, seconds] = elapsed.fields();
        doc.set_text(self.display.days, days);
        doc.set_text(self.display.hours, hours);
        doc.set_text(self.display.minutes, minutes);
        doc.set_text(self.display.seconds, seconds);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_decomposition() {
        let now = start()
            + Duration::days(3)
            + Duration::hours(4)
            + Duration::minutes(5)
            + Duration::seconds(6);
        let e = Elapsed::between(start(), now);
        assert_eq!(
            e,
            Elapsed {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
        assert_eq!(e.fields(), ["3", "04", "05", "06"].map(String::from));
    }

    #[test]
    fn test_before_start_is_zero() {
        let e = Elapsed::between(start(), start() - Duration::hours(1));
        assert_eq!(e, Elapsed::default());
        assert_eq!(e.fields(), ["0", "00", "00", "00"].map(String::from));
    }

    #[test]
    fn test_large_day_count_unpadded() {
        let e = Elapsed::between(start(), start() + Duration::days(1234) + Duration::seconds(59));
        assert_eq!(e.fields()[0], "1234");
        assert_eq!(e.fields()[3], "59");
        assert_eq!(e.total_seconds(), 1234 * 86_400 + 59);
    }

    #[test]
    fn test_render_writes_display() {
        let mut doc = Document::new();
        let root = doc.root();
        for name in ["days", "hours", "minutes", "seconds"] {
            let id = doc.append_element(root, Tag::Span, &[]);
            doc.set_element_id(id, name);
        }
        let display = CounterDisplay::find(&doc).unwrap();
        let counter = Counter::new(start(), display);

        counter.render(&mut doc, start() + Duration::seconds(3_661));
        assert_eq!(doc.text(display.days), Some("0"));
        assert_eq!(doc.text(display.hours), Some("01"));
        assert_eq!(doc.text(display.minutes), Some("01"));
        assert_eq!(doc.text(display.seconds), Some("01"));
    }

    #[test]
    fn test_display_needs_all_four() {
        let mut doc = Document::new();
        let root = doc.root();
        for name in ["days", "hours", "minutes"] {
            let id = doc.append_element(root, Tag::Span, &[]);
            doc.set_element_id(id, name);
        }
        assert!(CounterDisplay::find(&doc).is_none());
    }
}
