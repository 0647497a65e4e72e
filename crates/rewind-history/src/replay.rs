use rewind_diff::{apply_diff, Diff, Direction};
use rewind_types::Value;
use tracing::debug;

/// Time-travel cursor over a sequence of recorded diffs.
///
/// `position` counts how many entries the current state reflects. A new
/// timeline starts at the end: the state it is given is the one reached
/// after every entry.
#[derive(Clone, Debug)]
pub struct Timeline {
    state: Value,
    entries: Vec<Diff>,
    position: usize,
}

impl Timeline {
    pub fn new(current: Value, entries: Vec<Diff>) -> Self {
        let position = entries.len();
        Self {
            state: current,
            entries,
            position,
        }
    }

    /// The state at the current position.
    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of entries on the timeline.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_step_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Undo the latest applied entry. Returns `false` at the start.
    pub fn step_back(&mut self) -> bool {
        if !self.can_step_back() {
            return false;
        }
        self.position -= 1;
        self.state = apply_diff(
            &self.state,
            Some(&self.entries[self.position]),
            Direction::Backward,
        );
        debug!(position = self.position, "timeline stepped back");
        true
    }

    /// Re-apply the next entry. Returns `false` at the end.
    pub fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.state = apply_diff(
            &self.state,
            Some(&self.entries[self.position]),
            Direction::Forward,
        );
        self.position += 1;
        debug!(position = self.position, "timeline stepped forward");
        true
    }

    /// Move to `position`, clamped to the timeline length. Returns the
    /// position reached.
    pub fn seek(&mut self, position: usize) -> usize {
        let target = position.min(self.entries.len());
        while self.position > target && self.step_back() {}
        while self.position < target && self.step_forward() {}
        self.position
    }

    /// Append a new entry at the end. Only valid when the cursor is at the
    /// end; otherwise the entry is rejected and `false` returned.
    pub fn push(&mut self, diff: Diff) -> bool {
        if self.can_step_forward() {
            return false;
        }
        self.state = apply_diff(&self.state, Some(&diff), Direction::Forward);
        self.entries.push(diff);
        self.position = self.entries.len();
        true
    }

    /// Consume the timeline, returning the state at the current position.
    pub fn into_state(self) -> Value {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use rewind_diff::diff;
    use serde_json::json;

    use super::*;

    fn states() -> Vec<Value> {
        vec![
            Value::from(json!({"count": 0})),
            Value::from(json!({"count": 1})),
            Value::from(json!({"count": 1, "label": "one"})),
            Value::from(json!({"count": 2, "label": "two"})),
        ]
    }

    fn timeline() -> (Vec<Value>, Timeline) {
        let s = states();
        let entries = s
            .windows(2)
            .map(|w| diff(&w[0], &w[1]).unwrap())
            .collect();
        let timeline = Timeline::new(s[3].clone(), entries);
        (s, timeline)
    }

    #[test]
    fn starts_at_end() {
        let (s, t) = timeline();
        assert_eq!(t.position(), 3);
        assert_eq!(t.len(), 3);
        assert_eq!(t.state(), &s[3]);
        assert!(!t.can_step_forward());
        assert!(t.can_step_back());
    }

    #[test]
    fn back_twice_then_forward() {
        let (s, mut t) = timeline();

        assert!(t.step_back());
        assert!(t.step_back());
        assert_eq!(t.state(), &s[1]);

        assert!(t.step_forward());
        assert_eq!(t.state(), &s[2]);
    }

    #[test]
    fn steps_past_ends_are_rejected() {
        let (s, mut t) = timeline();
        assert!(!t.step_forward());
        assert_eq!(t.state(), &s[3]);

        assert_eq!(t.seek(0), 0);
        assert_eq!(t.state(), &s[0]);
        assert!(!t.step_back());
        assert_eq!(t.state(), &s[0]);
    }

    #[test]
    fn seek_moves_both_ways_and_clamps() {
        let (s, mut t) = timeline();
        assert_eq!(t.seek(1), 1);
        assert_eq!(t.state(), &s[1]);
        assert_eq!(t.seek(99), 3);
        assert_eq!(t.state(), &s[3]);
    }

    #[test]
    fn push_only_at_end() {
        let (_, mut t) = timeline();
        let next = Value::from(json!({"count": 3, "label": "two"}));
        let d = diff(t.state(), &next).unwrap();

        t.step_back();
        assert!(!t.push(d.clone()));

        t.step_forward();
        assert!(t.push(d));
        assert_eq!(t.len(), 4);
        assert_eq!(t.into_state(), next);
    }

    #[test]
    fn empty_timeline_holds_state() {
        let mut t = Timeline::new(Value::from(5), Vec::new());
        assert!(t.is_empty());
        assert!(!t.step_back());
        assert_eq!(t.state(), &Value::from(5));
    }
}
