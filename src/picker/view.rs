//! Pure rendering of the picker state

use crate::classify::{delta_of, Section};
use crate::domain::SectionLabels;
use crate::output::{format_update, name_width, relative_age, RowOptions};
use crate::picker::Selection;
use colored::Colorize;

const PROMPT: &str = "Which packages would you like to update?";
const HELP: &str = "Press <space> to select, <enter> to update, <q> to quit.";

/// Rendering options for the picker
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Insert version-delta sub-headings
    pub group: bool,
    /// Section headings
    pub labels: SectionLabels,
    /// Row switches (time, color, reference time)
    pub row: RowOptions,
}

impl ViewOptions {
    pub fn new(labels: SectionLabels, row: RowOptions) -> Self {
        Self {
            group: false,
            labels,
            row,
        }
    }

    pub fn with_group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::new(SectionLabels::default(), RowOptions::default())
    }
}

fn section_heading(section: Section, opts: &ViewOptions) -> String {
    let label = match section {
        Section::Direct => &opts.labels.direct,
        Section::Indirect => &opts.labels.indirect,
        Section::Transitive => &opts.labels.transitive,
    };
    match (opts.row.color, section) {
        (false, _) => label.clone(),
        (true, Section::Direct) => label.as_str().bold().cyan().to_string(),
        (true, _) => label.as_str().bold().dimmed().to_string(),
    }
}

/// Full frame for the current state; empty once the picker has finished
pub fn render(state: &Selection, opts: &ViewOptions) -> String {
    if state.is_done() {
        return String::new();
    }
    let color = opts.row.color;
    let width = name_width(state.choices());

    let mut out = format!("{}\n\n", PROMPT);
    let mut prev_group: Option<&'static str> = None;

    for (i, choice) in state.choices().iter().enumerate() {
        if let Some(section) = state.section_start(i) {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&section_heading(section, opts));
            out.push('\n');
            prev_group = None;
        }

        if opts.group {
            let delta = delta_of(choice);
            if prev_group != Some(delta.label()) {
                out.push('\n');
                out.push_str(&if color {
                    delta.colored_label()
                } else {
                    delta.label().to_string()
                });
                out.push('\n');
                prev_group = Some(delta.label());
            }
        }

        let cursor = match (state.cursor() == i, color) {
            (true, true) => "❯ ".cyan().to_string(),
            (true, false) => "❯ ".to_string(),
            (false, _) => "  ".to_string(),
        };
        let checkbox = match (state.is_selected(i), color) {
            (true, true) => "◉".green().to_string(),
            (true, false) => "◉".to_string(),
            (false, true) => "◯".dimmed().to_string(),
            (false, false) => "◯".to_string(),
        };

        let candidate = choice.update_version().unwrap_or_default();
        let mut row = format_update(&choice.name, &choice.version, candidate, width, color);
        if opts.row.show_time {
            if let Some(age) = relative_age(choice.update_time(), opts.row.now) {
                row.push_str("  ");
                row.push_str(&if color { age.dimmed().to_string() } else { age });
            }
        }

        out.push_str(&format!("{}{} {}\n", cursor, checkbox, row));
    }

    out.push('\n');
    out.push_str(HELP);
    out.push('\n');
    out
}
