//! Selection state machine for the interactive picker
//!
//! One piece of state, `Selection`, moves from `Browsing` to a terminal phase
//! (`Committed` or `Aborted`). Once terminal, events are ignored.

use crate::classify::{Buckets, Section};
use crate::domain::Module;
use std::collections::BTreeSet;

/// Input events understood by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    MoveUp,
    MoveDown,
    Toggle,
    Commit,
    Abort,
}

impl Event {
    /// Map a key name to an event
    ///
    /// Recognised names: `up`/`k`, `down`/`j`, `space`/` `, `enter`, `q`/`ctrl+c`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "up" | "k" => Some(Event::MoveUp),
            "down" | "j" => Some(Event::MoveDown),
            " " | "space" => Some(Event::Toggle),
            "enter" => Some(Event::Commit),
            "q" | "ctrl+c" => Some(Event::Abort),
            _ => None,
        }
    }
}

/// Where the state machine is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Committed,
    Aborted,
}

/// Picker state over the classified modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    choices: Vec<Module>,
    direct_end: usize,
    indirect_end: usize,
    cursor: usize,
    selected: BTreeSet<usize>,
    phase: Phase,
}

impl Selection {
    /// Lay out choices as direct, then indirect, then transitive
    pub fn new(buckets: Buckets) -> Self {
        let direct_end = buckets.direct.len();
        let indirect_end = direct_end + buckets.indirect.len();
        Self::from_parts(buckets.into_vec(), direct_end, indirect_end)
    }

    /// Build from a flat list and its two section offsets
    ///
    /// Offsets are clamped so that `direct_end <= indirect_end <= choices.len()`.
    pub fn from_parts(choices: Vec<Module>, direct_end: usize, indirect_end: usize) -> Self {
        let indirect_end = indirect_end.min(choices.len());
        let direct_end = direct_end.min(indirect_end);
        Self {
            choices,
            direct_end,
            indirect_end,
            cursor: 0,
            selected: BTreeSet::new(),
            phase: Phase::Browsing,
        }
    }

    /// Pre-select indices (builder pattern); out-of-range values are kept as-is
    pub fn with_selected(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.selected.extend(indices);
        self
    }

    /// Force the cursor to a position without clamping
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Apply one event; a no-op once the picker has finished
    pub fn apply(&mut self, event: Event) {
        if self.phase != Phase::Browsing {
            return;
        }
        match event {
            Event::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            Event::MoveDown => {
                if let Some(last) = self.choices.len().checked_sub(1) {
                    self.cursor = self.cursor.saturating_add(1).min(last);
                }
            }
            Event::Toggle => {
                if self.cursor < self.choices.len() && !self.selected.remove(&self.cursor) {
                    self.selected.insert(self.cursor);
                }
            }
            Event::Commit => self.phase = Phase::Committed,
            Event::Abort => self.phase = Phase::Aborted,
        }
    }

    pub fn choices(&self) -> &[Module] {
        &self.choices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase != Phase::Browsing
    }

    pub fn direct_end(&self) -> usize {
        self.direct_end
    }

    pub fn indirect_end(&self) -> usize {
        self.indirect_end
    }

    /// Section the choice at `index` belongs to
    pub fn section_at(&self, index: usize) -> Section {
        if index < self.direct_end {
            Section::Direct
        } else if index < self.indirect_end {
            Section::Indirect
        } else {
            Section::Transitive
        }
    }

    /// The section that begins at `index`, if any
    pub fn section_start(&self, index: usize) -> Option<Section> {
        if index >= self.choices.len() {
            return None;
        }
        let section = self.section_at(index);
        let starts = match section {
            Section::Direct => index == 0,
            Section::Indirect => index == self.direct_end,
            Section::Transitive => index == self.indirect_end,
        };
        starts.then_some(section)
    }

    /// Modules to update: the valid selected indices in list order
    ///
    /// Empty unless the picker was committed. Indices beyond the list are dropped.
    pub fn committed(&self) -> Vec<Module> {
        if self.phase != Phase::Committed {
            return Vec::new();
        }
        self.selected
            .iter()
            .filter_map(|&i| self.choices.get(i).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str) -> Module {
        Module::new(name, "1.0.0", true, "direct").with_update_version("1.1.0")
    }

    fn two() -> Selection {
        Selection::from_parts(vec![module("a"), module("b")], 1, 2)
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Event::from_key_name("k"), Some(Event::MoveUp));
        assert_eq!(Event::from_key_name("down"), Some(Event::MoveDown));
        assert_eq!(Event::from_key_name(" "), Some(Event::Toggle));
        assert_eq!(Event::from_key_name("space"), Some(Event::Toggle));
        assert_eq!(Event::from_key_name("enter"), Some(Event::Commit));
        assert_eq!(Event::from_key_name("ctrl+c"), Some(Event::Abort));
        assert_eq!(Event::from_key_name("x"), None);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut s = two();
        s.apply(Event::MoveUp);
        assert_eq!(s.cursor(), 0);
        s.apply(Event::MoveDown);
        s.apply(Event::MoveDown);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_move_down_on_empty_list() {
        let mut s = Selection::from_parts(Vec::new(), 0, 0);
        s.apply(Event::MoveDown);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_toggle_flips() {
        let mut s = two();
        s.apply(Event::Toggle);
        assert!(s.is_selected(0));
        s.apply(Event::Toggle);
        assert!(!s.is_selected(0));
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let mut s = two();
        s.set_cursor(999);
        let before = s.clone();
        s.apply(Event::Toggle);
        assert_eq!(s, before);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_commit_drops_stale_indices() {
        let mut s = two().with_selected([0, 999]);
        s.apply(Event::Commit);
        let names: Vec<String> = s.committed().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_abort_discards_selection() {
        let mut s = two().with_selected([0, 1]);
        s.apply(Event::Abort);
        assert_eq!(s.phase(), Phase::Aborted);
        assert!(s.committed().is_empty());
    }

    #[test]
    fn test_terminal_phase_ignores_events() {
        let mut s = two();
        s.apply(Event::Commit);
        s.apply(Event::Toggle);
        s.apply(Event::Abort);
        assert_eq!(s.phase(), Phase::Committed);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_sections() {
        let buckets = Buckets::new(vec![module("a")], Vec::new(), vec![module("t1"), module("t2")]);
        let s = Selection::new(buckets);
        assert_eq!(s.direct_end(), 1);
        assert_eq!(s.indirect_end(), 1);
        assert_eq!(s.section_start(0), Some(Section::Direct));
        assert_eq!(s.section_start(1), Some(Section::Transitive));
        assert_eq!(s.section_start(2), None);
        assert_eq!(s.section_at(2), Section::Transitive);
    }

    #[test]
    fn test_section_start_skips_empty_direct() {
        let s = Selection::from_parts(vec![module("dev")], 0, 1);
        assert_eq!(s.section_start(0), Some(Section::Indirect));
    }
}
