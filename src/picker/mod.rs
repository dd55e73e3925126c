//! Interactive selection of updates
//!
//! This module provides:
//! - `Selection`, the state machine over the classified modules
//! - `view::render`, a pure projection of that state to a text frame
//! - `drive`, the cooperative loop pulling events and redrawing after each one
//! - `TerminalPicker`, the crossterm front end
//!
//! Nothing here applies updates; the caller takes `Selection::committed`.

mod state;
mod terminal;
mod view;

pub use state::{Event, Phase, Selection};
pub use terminal::TerminalPicker;
pub use view::{render, ViewOptions};

use std::collections::VecDeque;
use std::io;

/// Something that lets the user choose updates
pub trait Picker {
    /// Run the picker to completion and return the final state
    fn pick(&mut self, state: Selection, view: &ViewOptions) -> io::Result<Selection>;
}

/// Source of picker events; `None` means the stream ended
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Destination for rendered frames
pub trait Screen {
    fn draw(&mut self, frame: &str) -> io::Result<()>;
}

/// Feed events into `state` until it finishes, redrawing after every transition
///
/// The end of the event stream counts as abort.
pub fn drive(
    mut state: Selection,
    source: &mut dyn EventSource,
    screen: &mut dyn Screen,
    view: &ViewOptions,
) -> io::Result<Selection> {
    screen.draw(&render(&state, view))?;
    while !state.is_done() {
        let event = source.next_event()?.unwrap_or(Event::Abort);
        state.apply(event);
        screen.draw(&render(&state, view))?;
    }
    Ok(state)
}

/// Replays a fixed list of events
#[derive(Debug, Default, Clone)]
pub struct ReplaySource {
    events: VecDeque<Event>,
}

impl ReplaySource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ReplaySource {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.events.pop_front())
    }
}

/// Keeps every drawn frame in memory
#[derive(Debug, Default, Clone)]
pub struct FrameBuffer {
    pub frames: Vec<String>,
}

impl Screen for FrameBuffer {
    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }
}

/// Picker driven by a scripted event list, for non-terminal use
#[derive(Debug, Default, Clone)]
pub struct ScriptedPicker {
    source: ReplaySource,
    screen: FrameBuffer,
}

impl ScriptedPicker {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            source: ReplaySource::new(events),
            screen: FrameBuffer::default(),
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> &[String] {
        &self.screen.frames
    }
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, state: Selection, view: &ViewOptions) -> io::Result<Selection> {
        drive(state, &mut self.source, &mut self.screen, view)
    }
}
