//! Per-screen view state: single choice, multi choice and free text

use super::Input;

/// Rows skipped by page up/down
pub const PAGE: usize = 5;

/// Longest accepted text entry, in characters
pub const TEXT_LIMIT: usize = 200;

/// A labelled value offered by a choice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Cursor after a navigation input, clamped to `[0, len)`
fn move_cursor(cursor: usize, len: usize, input: Input) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    let moved = match input {
        Input::Up => cursor.saturating_sub(1),
        Input::Down => (cursor + 1).min(last),
        Input::PageUp => cursor.saturating_sub(PAGE),
        Input::PageDown => (cursor + PAGE).min(last),
        Input::Home => 0,
        Input::End => last,
        _ => return None,
    };
    Some(moved)
}

/// Pick exactly one value
#[derive(Debug, Clone)]
pub struct SingleChoice<T> {
    header: &'static str,
    choices: Vec<Choice<T>>,
    cursor: usize,
}

impl<T> SingleChoice<T> {
    pub fn new(header: &'static str, choices: Vec<Choice<T>>) -> Self {
        Self {
            header,
            choices,
            cursor: 0,
        }
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor.min(self.choices.len().saturating_sub(1));
        self
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn choices(&self) -> &[Choice<T>] {
        &self.choices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&T> {
        self.choices.get(self.cursor).map(|c| &c.value)
    }

    /// Applies a navigation input; returns false for anything else
    pub fn handle(&mut self, input: Input) -> bool {
        match move_cursor(self.cursor, self.choices.len(), input) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }
}

impl<T: PartialEq> SingleChoice<T> {
    /// Opens on `value` when it is one of the choices
    pub fn with_cursor_on(self, value: &T) -> Self {
        match self.choices.iter().position(|c| &c.value == value) {
            Some(cursor) => self.with_cursor(cursor),
            None => self,
        }
    }
}

/// Toggle any number of values
#[derive(Debug, Clone)]
pub struct MultiChoice<T> {
    header: &'static str,
    choices: Vec<Choice<T>>,
    checked: Vec<bool>,
    cursor: usize,
}

impl<T> MultiChoice<T> {
    pub fn new(header: &'static str, choices: Vec<Choice<T>>) -> Self {
        let checked = vec![false; choices.len()];
        Self {
            header,
            choices,
            checked,
            cursor: 0,
        }
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn choices(&self) -> &[Choice<T>] {
        &self.choices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self) {
        if let Some(flag) = self.checked.get_mut(self.cursor) {
            *flag = !*flag;
        }
    }

    /// Checked values in list order
    pub fn selected(&self) -> Vec<&T> {
        self.choices
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(c, _)| &c.value)
            .collect()
    }

    pub fn handle(&mut self, input: Input) -> bool {
        if input == Input::Toggle {
            self.toggle();
            return true;
        }
        match move_cursor(self.cursor, self.choices.len(), input) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }
}

/// Single-line text entry with a movable cursor
#[derive(Debug, Clone)]
pub struct TextInput {
    header: &'static str,
    placeholder: String,
    value: String,
    /// Position in characters, not bytes
    cursor: usize,
}

impl TextInput {
    pub fn new(header: &'static str, placeholder: impl Into<String>) -> Self {
        Self {
            header,
            placeholder: placeholder.into(),
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        if c.is_control() || self.value.chars().count() >= TEXT_LIMIT {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Char(c) => self.insert(c),
            Input::Backspace => self.backspace(),
            Input::Left => self.cursor = self.cursor.saturating_sub(1),
            Input::Right => self.cursor = (self.cursor + 1).min(self.value.chars().count()),
            Input::Home => self.cursor = 0,
            Input::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }
}
