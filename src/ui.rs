// ============================================
// src/ui.rs
// Drawing: one screen per phase
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::session::{GameSession, Phase};
use crate::vocabulary::{FREQUENCY_BOXES, Frequency, VocabularyEntry};

pub fn draw(f: &mut Frame, session: &GameSession) {
    let size = f.area();
    let block = Block::default().borders(Borders::ALL).title("Wortblitz");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    match session.phase() {
        Phase::Menu => draw_menu(f, inner_area, session),
        Phase::Playing => draw_playing(f, inner_area, session),
        Phase::GameOver => draw_game_over(f, inner_area, session),
    }
}

// --------------------------------------------------
// Menu
// --------------------------------------------------

fn draw_menu(f: &mut Frame, area: Rect, session: &GameSession) {
    let store = session.store();
    let minutes = session.round_seconds() / 60;
    let seconds = session.round_seconds() % 60;
    let clock = if seconds == 0 {
        format!("{minutes} minutes timer")
    } else {
        format!("{minutes}:{seconds:02} timer")
    };

    let lines = vec![
        Line::from(""),
        Line::from("German Vocab").style(Style::default().fg(Color::Cyan).bold()),
        Line::from("B1-B2 Level Practice").style(Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::from("How to play:").style(Style::default().bold()),
        Line::from("• Translate German to English"),
        Line::from(format!("• {clock}")),
        Line::from("• Type and press Enter"),
        Line::from(""),
        Line::from(format!(
            "{} words in {} categories",
            store.len(),
            store.categories().len()
        ))
        .style(Style::default().fg(Color::DarkGray)),
        Line::from(""),
        Line::from("[Enter] Start Game    [Esc] Quit").style(Style::default().fg(Color::Yellow)),
    ];

    f.render_widget(Paragraph::new(lines).centered(), area);
}

// --------------------------------------------------
// Playing
// --------------------------------------------------

fn draw_playing(f: &mut Frame, area: Rect, session: &GameSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] timer gauge + score
            Constraint::Length(1), // [1] spacer
            Constraint::Length(1), // [2] German word
            Constraint::Length(1), // [3] "Translate to English" + category
            Constraint::Length(2), // [4] example sentence
            Constraint::Length(1), // [5] frequency
            Constraint::Length(1), // [6] spacer
            Constraint::Length(1), // [7] answer
            Constraint::Length(1), // [8] feedback
            Constraint::Min(1),    // [9] breakdown / connected words / hints
        ])
        .split(area);

    draw_header(f, chunks[0], session);

    let Some(word) = session.current_word() else {
        return;
    };

    f.render_widget(
        Paragraph::new(word.german.as_str())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(format!("Translate to English · {}", word.category))
            .style(Style::default().fg(Color::Gray))
            .centered(),
        chunks[3],
    );

    if let Some(example) = &word.example {
        f.render_widget(
            Paragraph::new(format!("Example: \"{example}\""))
                .style(Style::default().fg(Color::DarkGray).italic())
                .wrap(Wrap { trim: true })
                .centered(),
            chunks[4],
        );
    }

    f.render_widget(
        Paragraph::new(frequency_line(word.frequency)).centered(),
        chunks[5],
    );

    f.render_widget(Paragraph::new(answer_line(session)).centered(), chunks[7]);

    if let Some(feedback) = session.feedback() {
        let color = if feedback.is_correct() {
            Color::Green
        } else {
            Color::Red
        };
        f.render_widget(
            Paragraph::new(feedback.to_string())
                .style(Style::default().fg(color).bold())
                .centered(),
            chunks[8],
        );
    }

    let mut lines = Vec::new();
    if session.pending_advance() {
        lines.extend(word_details(word));
        lines.push(Line::from(""));
        lines.push(
            Line::from("[Enter] Next    [Esc] Menu").style(Style::default().fg(Color::Yellow)),
        );
    } else {
        lines.push(
            Line::from("[Enter] Submit    [Esc] Menu").style(Style::default().fg(Color::DarkGray)),
        );
    }
    f.render_widget(Paragraph::new(lines).centered(), chunks[9]);
}

fn draw_header(f: &mut Frame, area: Rect, session: &GameSession) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(14)])
        .split(area);

    let ratio = if session.round_seconds() > 0 {
        (session.time_remaining() as f64 / session.round_seconds() as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // the clock stops while feedback is on screen
    let label = if session.is_paused() {
        format!("⏱ {}s (paused)", session.time_remaining())
    } else {
        format!("⏱ {}s", session.time_remaining())
    };
    let gauge_color = if session.time_remaining() <= 10 {
        Color::Red
    } else {
        Color::Magenta
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, columns[0]);

    f.render_widget(
        Paragraph::new(format!("Score: {}", session.score()))
            .style(Style::default().fg(Color::Yellow).bold())
            .right_aligned(),
        columns[1],
    );
}

fn frequency_line(frequency: Frequency) -> Line<'static> {
    let filled = frequency.filled_boxes();
    let mut spans = vec![Span::styled(
        "Word frequency: rarely ",
        Style::default().fg(Color::DarkGray),
    )];
    for i in 0..FREQUENCY_BOXES {
        let (glyph, color) = if i < filled {
            ("■", Color::Cyan)
        } else {
            ("□", Color::DarkGray)
        };
        spans.push(Span::styled(glyph, Style::default().fg(color)));
    }
    spans.push(Span::styled(" frequently", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

fn answer_line(session: &GameSession) -> Line<'static> {
    let mut spans = vec![Span::styled("> ", Style::default().fg(Color::Gray))];
    if session.answer().is_empty() && !session.pending_advance() {
        spans.push(Span::styled(
            "Type your answer...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            session.answer().to_string(),
            Style::default().fg(Color::White),
        ));
    }
    if !session.pending_advance() {
        // fake cursor (real one is hidden)
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }
    Line::from(spans)
}

/// Breakdown and related words, shown once the answer is judged
fn word_details(word: &VocabularyEntry) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(parts) = &word.decomposition {
        lines.push(Line::from("Word Breakdown:").style(Style::default().bold()));
        for part in parts {
            lines.push(Line::from(vec![
                Span::styled(part.part.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(" → "),
                Span::styled(part.meaning.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
    }

    if !word.connected_words.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from("Connected Words:").style(Style::default().bold()));
        lines.push(
            Line::from(word.connected_words.join(" · ")).style(Style::default().fg(Color::Cyan)),
        );
    }

    lines
}

// --------------------------------------------------
// Game over
// --------------------------------------------------

fn draw_game_over(f: &mut Frame, area: Rect, session: &GameSession) {
    let mut lines = vec![
        Line::from(""),
        Line::from("Game Over!").style(Style::default().fg(Color::Magenta).bold()),
        Line::from(""),
        Line::from(session.score().to_string()).style(Style::default().fg(Color::Yellow).bold()),
        Line::from("Final Score").style(Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::from(format!(
            "{} of {} answers correct",
            session.correct(),
            session.answered()
        )),
    ];

    if let (Some(start), Some(end)) = (session.started_at(), session.finished_at()) {
        lines.push(
            Line::from(format!(
                "Played {} – {}",
                start.format("%H:%M:%S"),
                end.format("%H:%M:%S")
            ))
            .style(Style::default().fg(Color::DarkGray)),
        );
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from("[Enter] Play Again    [M] Menu    [Esc] Quit")
            .style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(Paragraph::new(lines).centered(), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionPolicy;
    use crate::vocabulary::WordStore;
    use ratatui::backend::TestBackend;

    fn store() -> WordStore {
        WordStore::from_json(
            r#"{"Alltag": [{
                "german": "Kühlschrank", "english": "fridge",
                "example": "Die Milch steht im Kühlschrank.",
                "decomposition": ["kühl", "Schrank"],
                "decompositionMeaning": ["cool", "cupboard"],
                "connectedWords": ["kühlen"]
            }]}"#,
        )
        .unwrap()
    }

    fn render(session: &GameSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_menu_screen() {
        let store = store();
        let session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        let screen = render(&session);
        assert!(screen.contains("German Vocab"));
        assert!(screen.contains("3 minutes timer"));
        assert!(screen.contains("1 words in 1 categories"));
    }

    #[test]
    fn test_details_only_after_answer() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 180);
        session.start_game();

        let screen = render(&session);
        assert!(screen.contains("Kühlschrank"));
        assert!(screen.contains("180s"));
        assert!(!screen.contains("Word Breakdown"));

        session.submit_answer("freezer");
        let screen = render(&session);
        assert!(screen.contains("Kühlschrank = fridge"));
        assert!(screen.contains("Word Breakdown"));
        assert!(screen.contains("cupboard"));
        assert!(screen.contains("Connected Words"));
        assert!(screen.contains("paused"));
    }

    #[test]
    fn test_game_over_screen() {
        let store = store();
        let mut session = GameSession::new(&store, SelectionPolicy::new(Some(1)), 1);
        session.start_game();
        session.tick();

        let screen = render(&session);
        assert!(screen.contains("Game Over!"));
        assert!(screen.contains("Final Score"));
        assert!(screen.contains("0 of 0 answers correct"));
    }
}
