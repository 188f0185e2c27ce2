use crate::sample::{SAMPLE_DURATION_SECONDS, SAMPLE_TRANSCRIPT};
use crate::scoring::{CriterionResult, OverallResult, Scorer};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Transcript,
    Duration,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Transcript => Focus::Duration,
            Focus::Duration => Focus::Results,
            Focus::Results => Focus::Transcript,
        }
    }
}

pub struct App {
    pub scorer: Scorer,
    pub transcript: String,
    pub duration_input: String,
    pub focus: Focus,
    pub result: Option<OverallResult>,
    pub table_state: ratatui::widgets::TableState,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            transcript: String::new(),
            duration_input: String::new(),
            focus: Focus::Transcript,
            result: None,
            table_state: ratatui::widgets::TableState::default(),
            flash_message: None,
            should_quit: false,
            theme: ThemeColors::dark(),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Append a typed character to the focused input field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Transcript => self.transcript.push(c),
            Focus::Duration => {
                if c.is_ascii_alphanumeric() || c == '.' || c == ' ' {
                    self.duration_input.push(c);
                }
            }
            Focus::Results => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Transcript => {
                self.transcript.pop();
            }
            Focus::Duration => {
                self.duration_input.pop();
            }
            Focus::Results => {}
        }
    }

    pub fn load_sample(&mut self) {
        self.transcript = SAMPLE_TRANSCRIPT.to_string();
        self.duration_input = format!("{}", SAMPLE_DURATION_SECONDS);
        self.show_flash("Loaded sample transcript".to_string());
    }

    /// Score the current transcript. An empty transcript or a bad duration
    /// only produces a flash message.
    pub fn score(&mut self) {
        if self.transcript.trim().is_empty() {
            self.show_flash("Error: transcript is empty".to_string());
            return;
        }
        let duration = match crate::input::parse_duration_seconds(&self.duration_input) {
            Ok(seconds) => seconds,
            Err(e) => {
                self.show_flash(format!("Error: {}", e));
                return;
            }
        };

        let result = self.scorer.calculate_final_score(&self.transcript, duration);
        self.show_flash(format!(
            "Scored: {}/{}",
            result.overall_score, result.max_overall_score
        ));
        self.result = Some(result);
        self.table_state.select(Some(0));
        self.focus = Focus::Results;
    }

    fn criteria(&self) -> &[CriterionResult] {
        self.result
            .as_ref()
            .map(|r| r.per_criterion_scores.as_slice())
            .unwrap_or(&[])
    }

    pub fn next_row(&mut self) {
        let len = self.criteria().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.criteria().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_criterion(&self) -> Option<&CriterionResult> {
        self.table_state
            .selected()
            .and_then(|i| self.criteria().get(i))
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }
}
