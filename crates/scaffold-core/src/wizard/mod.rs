//! Wizard navigation, independent of any terminal
//!
//! The [`Navigator`] owns the [`Configuration`](crate::project::Configuration)
//! while the wizard runs. Callers feed it [`Input`]s, draw whatever [`View`] it
//! reports, and stop when it returns something other than [`Flow::Continue`].

pub mod navigator;
pub mod step;

pub use navigator::{facets, Facet, Navigator, StepKind};
pub use step::{Choice, MultiChoice, SingleChoice, TextInput};

/// Abstract user input, already translated from key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Toggle,
    Confirm,
    Quit,
    Char(char),
    Backspace,
    Left,
    Right,
    Tick,
    Resize,
}

/// What the caller should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Leave without building; the active step was not committed
    Quit,
    /// The summary's Build entry was confirmed
    Build,
}

/// Where a step returns to once confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Continuation {
    /// Carry on with the next step of the first pass
    #[default]
    Forward,
    /// Go back to the summary with this entry highlighted
    Summary { cursor: usize },
}

/// One line of a choice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem<'a> {
    pub label: &'a str,
    /// `Some` for multi-choice lists
    pub checked: Option<bool>,
}

/// Everything needed to draw the active step
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Choice {
        header: &'a str,
        items: Vec<ViewItem<'a>>,
        cursor: usize,
        help: &'static str,
        footer: Option<String>,
    },
    Text {
        header: &'a str,
        value: &'a str,
        placeholder: &'a str,
        /// Cursor position in characters
        cursor: usize,
        help: &'static str,
    },
}

pub const SINGLE_CHOICE_HELP: &str = "(press enter to continue, q to quit)";
pub const MULTI_CHOICE_HELP: &str = "(press space to select, enter to continue, q to quit)";
pub const TEXT_HELP: &str = "(esc to quit)";
