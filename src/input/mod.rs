pub mod handler;
pub mod prompt;

pub use handler::{InputHandler, KeyAction};
pub use prompt::{NamePrompt, PromptAction};
