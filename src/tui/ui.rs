use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, Wrap};

use crate::output::format_details;
use crate::scoring::tokenize;
use crate::tui::app::{App, Focus};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Panels(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let panels = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_title(frame, chunks[0], app);
    render_form(frame, panels[0], app);
    render_results(frame, panels[1], app);
    render_status_bar(frame, chunks[2], app);
}

fn panel<'a>(title: &'a str, focused: bool, theme: &ThemeColors) -> Block<'a> {
    let color = if focused {
        theme.border_focused
    } else {
        theme.border_unfocused
    };
    Block::bordered()
        .title(title)
        .border_style(Style::default().fg(color))
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "Speech Rubric",
        Style::default().fg(app.theme.title_color).bold(),
    )];

    let words = tokenize(&app.transcript).len();
    let info = format!("{} words", words);
    let padding = (area.width as usize).saturating_sub("Speech Rubric".len() + info.len());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(info, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).split(area);

    let transcript_focused = app.focus == Focus::Transcript;
    let mut text = app.transcript.clone();
    if transcript_focused {
        text.push('|');
    }

    let block = panel(" Transcript ", transcript_focused, &app.theme);
    let inner = block.inner(chunks[0]);
    let lines = wrap_lines(&text, inner.width as usize);
    // Keep the last line (and the cursor) in view
    let offset = lines.len().saturating_sub(inner.height as usize);
    let transcript = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .block(block);
    frame.render_widget(transcript, chunks[0]);

    let duration_focused = app.focus == Focus::Duration;
    let line = if app.duration_input.is_empty() && !duration_focused {
        Line::from(Span::styled(
            "estimate from word count",
            Style::default().fg(app.theme.muted),
        ))
    } else {
        let cursor = if duration_focused { "|" } else { "" };
        Line::from(format!("{}{}", app.duration_input, cursor))
    };
    let duration = Paragraph::new(line).block(panel(
        " Duration (seconds or 1m 5s) ",
        duration_focused,
        &app.theme,
    ));
    frame.render_widget(duration, chunks[1]);
}

fn render_results(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel(" Results ", app.focus == Focus::Results, &app.theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(result) = app.result.clone() else {
        let hint = Paragraph::new("Ctrl-R or F5 to score, Ctrl-L for the sample")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        frame.render_widget(hint, inner);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),  // Overall + assessment
        Constraint::Length(10), // Criterion table
        Constraint::Fill(1),    // Selected criterion details
    ])
    .split(inner);

    let theme = &app.theme;
    let overall_color = theme.score_color(result.overall_score, result.max_overall_score);
    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Overall: "),
            Span::styled(
                format!("{}/{}", result.overall_score, result.max_overall_score),
                Style::default().fg(overall_color).bold(),
            ),
        ]),
        Line::from(Span::styled(
            result.assessment().message(),
            Style::default().fg(theme.muted),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(summary, chunks[0]);

    let rows: Vec<Row> = result
        .per_criterion_scores
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            let color = theme.score_color(r.score, r.max_score);
            let mut score_spans = vec![Span::styled(
                format!("{:>2}/{:<2} ", r.score, r.max_score),
                Style::default().fg(color),
            )];
            score_spans.extend(score_bar(r.score, r.max_score, 10, theme).spans);

            let name = if r.note.is_some() {
                format!("{}*", r.criterion)
            } else {
                r.criterion.to_string()
            };

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![Cell::from(name), Cell::from(Line::from(score_spans))]).style(row_style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(16)])
        .header(
            Row::new(vec!["Criterion", "Score"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);
    frame.render_stateful_widget(table, chunks[1], &mut app.table_state);

    if let Some(selected) = app.selected_criterion() {
        let muted = Style::default().fg(app.theme.muted);
        let mut lines = vec![Line::from(selected.feedback.clone()), Line::from("")];
        lines.extend(
            format_details(&selected.details)
                .into_iter()
                .map(|d| Line::from(Span::styled(d, muted))),
        );
        if let Some(note) = &selected.note {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("* {}", note),
                Style::default().fg(app.theme.score_mid),
            )));
        }
        let details = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(format!(" {} ", selected.criterion)));
        frame.render_widget(details, chunks[2]);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.focus {
            Focus::Results => &[
                ("j/k", ":nav "),
                ("Tab", ":field "),
                ("^R", ":score "),
                ("^L", ":sample "),
                ("Esc", ":quit"),
            ],
            Focus::Transcript | Focus::Duration => &[
                ("Tab", ":field "),
                ("^R/F5", ":score "),
                ("^L", ":sample "),
                ("Esc", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Hard-wrap `text` at `width` characters, keeping explicit line breaks.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.split('\n')
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                vec![String::new()]
            } else {
                chars
                    .chunks(width)
                    .map(|chunk| chunk.iter().collect::<String>())
                    .collect()
            }
        })
        .collect()
}

fn score_bar(score: u32, max_score: u32, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0 {
        (score as f64 / max_score as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme.score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RubricConfig;
    use crate::scoring::Scorer;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_scored_sample() {
        let mut app = App::new(Scorer::new(&RubricConfig::default()).unwrap());
        app.load_sample();
        app.score();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Overall: 86/100"));
        assert!(text.contains("Key word Presence"));
        assert!(text.contains("Grammar Errors*"));
        assert!(text.contains("wpm: 154.62"));
    }

    #[test]
    fn test_draw_small_terminal() {
        let mut app = App::new(Scorer::new(&RubricConfig::default()).unwrap());
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }

    #[test]
    fn test_title_counts_tokens() {
        let mut app = App::new(Scorer::new(&RubricConfig::default()).unwrap());
        app.transcript = "I'm here ...".to_string();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        assert!(buffer_text(&terminal).lines().next().unwrap().ends_with("3 words"));
    }

    #[test]
    fn test_long_transcript_keeps_cursor_visible() {
        let mut app = App::new(Scorer::new(&RubricConfig::default()).unwrap());
        let body = (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>();
        app.transcript = format!("{}\nLASTWORD", body.join("\n"));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("LASTWORD|"));
        assert!(!text.contains("line 0"));
    }

    #[test]
    fn test_wrap_lines() {
        assert_eq!(wrap_lines("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_lines("ab\n\ncd", 4), vec!["ab", "", "cd"]);
        assert_eq!(wrap_lines("", 4), vec![""]);
    }

    #[test]
    fn test_score_bar_widths() {
        let theme = ThemeColors::dark();
        assert_eq!(score_bar(5, 10, 10, &theme).width(), 10);
        assert_eq!(score_bar(0, 0, 8, &theme).width(), 8);
    }
}
