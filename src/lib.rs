//! Wortblitz: a German → English vocabulary game for the terminal.
//!
//! The game logic (`session`, `selection`, `timer`) has no terminal
//! dependencies; `ui` and `input` are the ratatui/crossterm glue.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod selection;
pub mod session;
pub mod timer;
pub mod ui;
pub mod vocabulary;

pub use error::{ConfigError, VocabularyError};
pub use selection::SelectionPolicy;
pub use session::{Feedback, GameSession, Phase, TickOutcome, Verdict};
pub use timer::CountdownTimer;
pub use vocabulary::{VocabularyEntry, WordStore};
