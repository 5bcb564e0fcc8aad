// ============================================
// src/session.rs
// Game state machine: menu -> playing -> game over
// ============================================

use std::fmt;

use chrono::{DateTime, Local};

use crate::selection::{SeenWords, SelectionPolicy};
use crate::vocabulary::{VocabularyEntry, WordStore};

/// Points for a correct answer
pub const REWARD: u32 = 10;
/// Default length of a round in seconds (3 minutes)
pub const DEFAULT_ROUND_SECONDS: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Result of judging one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Message shown after an answer, until the player moves on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { german: String, english: String },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "✓ Richtig!"),
            Feedback::Incorrect { german, english } => write!(f, "✗ {german} = {english}"),
        }
    }
}

/// What a timer tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, or paused on feedback
    Ignored,
    /// One second gone, this many left
    Counted(u32),
    /// Time ran out; the game is over
    Expired,
}

/// One play-through. Owns all mutable game state and borrows the word pool.
pub struct GameSession<'a> {
    store: &'a WordStore,
    selector: SelectionPolicy,
    round_seconds: u32,

    phase: Phase,
    score: u32,
    time_remaining: u32,
    current_word: Option<&'a VocabularyEntry>,
    seen_words: SeenWords<'a>,
    answer: String,
    feedback: Option<Feedback>,

    paused: bool,          // timer stopped while feedback is on screen
    pending_advance: bool, // waiting for "Next"

    answered: u32,
    correct: u32,
    started_at: Option<DateTime<Local>>,
    finished_at: Option<DateTime<Local>>,
}

impl<'a> GameSession<'a> {
    /// A fresh session sitting in the menu
    pub fn new(store: &'a WordStore, selector: SelectionPolicy, round_seconds: u32) -> Self {
        Self {
            store,
            selector,
            round_seconds,
            phase: Phase::Menu,
            score: 0,
            time_remaining: round_seconds,
            current_word: None,
            seen_words: SeenWords::new(),
            answer: String::new(),
            feedback: None,
            paused: false,
            pending_advance: false,
            answered: 0,
            correct: 0,
            started_at: None,
            finished_at: None,
        }
    }

    // --------------------------------------------------
    // Read access for the UI
    // --------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn round_seconds(&self) -> u32 {
        self.round_seconds
    }

    pub fn current_word(&self) -> Option<&'a VocabularyEntry> {
        self.current_word
    }

    pub fn seen_words(&self) -> &SeenWords<'a> {
        &self.seen_words
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending_advance(&self) -> bool {
        self.pending_advance
    }

    /// Answers judged this game
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Answers judged correct this game
    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Local>> {
        self.finished_at
    }

    pub fn store(&self) -> &'a WordStore {
        self.store
    }

    // --------------------------------------------------
    // Transitions
    // --------------------------------------------------

    /// Menu / GameOver -> Playing, with everything reset
    pub fn start_game(&mut self) {
        if self.phase == Phase::Playing {
            return;
        }

        self.clear_round();
        self.phase = Phase::Playing;
        self.started_at = Some(Local::now());
        self.current_word = Some(self.selector.pick_next(self.store, &mut self.seen_words));

        tracing::info!(
            round_seconds = self.round_seconds,
            pool = self.store.len(),
            "game started"
        );
    }

    /// Back to the menu from anywhere, dropping the current game
    pub fn return_to_menu(&mut self) {
        if self.phase == Phase::Playing {
            tracing::info!(score = self.score, "game abandoned");
        }
        self.clear_round();
        self.phase = Phase::Menu;
    }

    /// Add a character to the answer field
    pub fn type_char(&mut self, c: char) {
        if self.accepts_input() && !c.is_control() {
            self.answer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.answer.pop();
        }
    }

    /// Submit whatever is in the answer field
    pub fn submit(&mut self) -> Option<Verdict> {
        let text = self.answer.clone();
        self.submit_answer(&text)
    }

    /// Judge `text` against the current word.
    ///
    /// Does nothing (returns `None`) for blank text, outside of play, or
    /// while the previous answer's feedback is still waiting for "Next".
    /// Otherwise scores it, shows feedback and pauses the clock.
    pub fn submit_answer(&mut self, text: &str) -> Option<Verdict> {
        if !self.accepts_input() || text.trim().is_empty() {
            return None;
        }
        let word = self.current_word?;

        let verdict = if word.accepts(text) {
            self.score += REWARD;
            self.correct += 1;
            self.feedback = Some(Feedback::Correct);
            Verdict::Correct
        } else {
            self.feedback = Some(Feedback::Incorrect {
                german: word.german.clone(),
                english: word.english.clone(),
            });
            Verdict::Incorrect
        };

        self.answer = text.to_string();
        self.answered += 1;
        self.paused = true;
        self.pending_advance = true;

        tracing::debug!(german = %word.german, answer = text.trim(), ?verdict, "answer judged");
        Some(verdict)
    }

    /// "Next": retire the current word and draw another one
    pub fn confirm_advance(&mut self) {
        if self.phase != Phase::Playing || !self.pending_advance {
            return;
        }

        if let Some(word) = self.current_word {
            self.seen_words.insert(word.german.as_str());
        }
        self.answer.clear();
        self.feedback = None;
        self.pending_advance = false;
        self.paused = false;
        self.current_word = Some(self.selector.pick_next(self.store, &mut self.seen_words));
    }

    /// One second of play time. Only counts while playing and not paused.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing || self.paused {
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return TickOutcome::Counted(self.time_remaining);
        }

        self.phase = Phase::GameOver;
        self.finished_at = Some(Local::now());
        tracing::info!(
            score = self.score,
            answered = self.answered,
            correct = self.correct,
            "game over"
        );
        TickOutcome::Expired
    }

    // --------------------------------------------------
    // Helpers
    // --------------------------------------------------

    fn accepts_input(&self) -> bool {
        self.phase == Phase::Playing && !self.pending_advance
    }

    fn clear_round(&mut self) {
        self.score = 0;
        self.time_remaining = self.round_seconds;
        self.current_word = None;
        self.seen_words.clear();
        self.answer.clear();
        self.feedback = None;
        self.paused = false;
        self.pending_advance = false;
        self.answered = 0;
        self.correct = 0;
        self.started_at = None;
        self.finished_at = None;
    }
}
