//! Focus-tracked text entry for the screen forms.
//!
//! Each screen owns a [`Form`]: a vertical list of [`TextField`]s with
//! exactly one focused at a time. Key routing is plain push/pop on the
//! focused field; there is no cursor movement within a field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any printable character.
    Text,
    /// ASCII digits only (agency, account number, phone, PIN).
    Digits,
    /// ASCII digits plus at most one dot (transaction amount).
    Decimal,
}

/// A single text entry field.
#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub kind: FieldKind,
    /// Render the value as bullets (passwords).
    pub masked: bool,
}

impl TextField {
    pub fn text(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            kind: FieldKind::Text,
            masked: false,
        }
    }

    pub fn digits(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            kind: FieldKind::Digits,
            ..Self::text(label, placeholder)
        }
    }

    pub fn decimal(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            kind: FieldKind::Decimal,
            ..Self::text(label, placeholder)
        }
    }

    pub fn password(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label, placeholder)
        }
    }

    /// Value as rendered: bullets when masked.
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Digits => c.is_ascii_digit(),
            FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !self.value.contains('.')),
        }
    }
}

/// A vertical list of fields with one focused at a time.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        &self.fields[index].value
    }

    pub fn clear(&mut self, index: usize) {
        self.fields[index].value.clear();
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Routes a key into the form. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
                true
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if field.accepts(c) {
                        field.value.push(c);
                    }
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_form() -> Form {
        Form::new(vec![
            TextField::digits("Agency", "e.g. 0001"),
            TextField::password("Password", ""),
        ])
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = sample_form();
        form.handle_key(key(KeyCode::Char('0')));
        form.handle_key(key(KeyCode::Char('1')));
        assert_eq!(form.value(0), "01");
        assert!(form.value(1).is_empty());
    }

    #[test]
    fn test_digits_field_rejects_letters() {
        let mut form = sample_form();
        form.handle_key(key(KeyCode::Char('a')));
        form.handle_key(key(KeyCode::Char('7')));
        assert_eq!(form.value(0), "7");
    }

    #[test]
    fn test_tab_cycles_focus_and_wraps() {
        let mut form = sample_form();
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, 1);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, 0);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_decimal_field_accepts_single_dot() {
        let mut form = Form::new(vec![TextField::decimal("Amount", "0.00")]);
        for c in "12.5.0".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.value(0), "12.50");
    }

    #[test]
    fn test_masked_field_displays_bullets() {
        let mut form = sample_form();
        form.focus = 1;
        form.handle_key(key(KeyCode::Char('h')));
        form.handle_key(key(KeyCode::Char('i')));
        assert_eq!(form.fields[1].value, "hi");
        assert_eq!(form.fields[1].display_value(), "••");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut form = sample_form();
        form.handle_key(key(KeyCode::Char('9')));
        form.handle_key(key(KeyCode::Backspace));
        assert!(form.value(0).is_empty());
        // Backspace on an empty field is a no-op
        form.handle_key(key(KeyCode::Backspace));
        assert!(form.value(0).is_empty());
    }
}
