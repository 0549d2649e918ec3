use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest name the prompt accepts
pub const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// The buffer changed or the key was swallowed
    Edited,
    /// Enter was pressed with this name
    Submit(String),
    Quit,
}

/// Line editor for the new-highscore name
#[derive(Debug, Default, Clone)]
pub struct NamePrompt {
    buffer: String,
}

impl NamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> PromptAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PromptAction::Quit;
        }

        match key.code {
            KeyCode::Enter => PromptAction::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptAction::Edited
            }
            KeyCode::Char(c) if !c.is_control() && self.buffer.chars().count() < MAX_NAME_LEN => {
                self.buffer.push(c);
                PromptAction::Edited
            }
            _ => PromptAction::Edited,
        }
    }
}
