use crate::session::{CookView, TimerPhase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Full-screen cook-mode view: step header, step body, timer, progress dots.
pub fn draw_cook(area: Rect, f: &mut Frame, view: &CookView, recipe_title: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Step {} / {}", view.current_index + 1, view.total_steps),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(recipe_title.to_string(), Style::default().fg(Color::Gray)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Cook mode"));
    f.render_widget(header, chunks[0]);

    let mut body: Vec<Line> = vec![Line::from("")];
    if let Some(title) = view.step.title.as_deref() {
        body.push(Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        body.push(Line::from(""));
    }
    body.push(Line::from(Span::raw(view.step.description.clone())));
    let step_block = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(step_block, chunks[1]);

    f.render_widget(timer_line(view), chunks[2]);

    let mut footer = vec![Line::from(progress_spans(
        view.current_index,
        view.total_steps,
    ))];
    footer.push(Line::from(Span::styled(
        "→/space next   ← back   t start/pause   r reset   1-9 jump   esc done",
        Style::default().fg(Color::Gray),
    )));
    let footer_block = Paragraph::new(footer)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer_block, chunks[3]);
}

fn timer_line(view: &CookView) -> Paragraph<'static> {
    let line = match (view.timer.phase, view.timer.remaining) {
        (TimerPhase::Idle, _) => Line::from(Span::styled(
            "no timer on this step",
            Style::default().fg(Color::Gray),
        )),
        (phase, Some(remaining)) => {
            let clock_style = match phase {
                TimerPhase::Expired => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                TimerPhase::Running => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default().fg(Color::Yellow),
            };
            let label = match phase {
                TimerPhase::Ready => "  press t to start",
                TimerPhase::Running => "  running",
                TimerPhase::Paused => "  paused",
                TimerPhase::Expired => "  done!",
                TimerPhase::Idle => "",
            };
            Line::from(vec![
                Span::styled(format_clock(remaining), clock_style),
                Span::styled(label, Style::default().fg(Color::Gray)),
            ])
        }
        // Non-idle phases always carry a remaining value.
        (_, None) => Line::from(""),
    };
    Paragraph::new(vec![line])
        .centered()
        .block(Block::default().borders(Borders::ALL).title("Timer"))
}

/// Progress dots: filled for done, wide for current, hollow for upcoming.
fn progress_spans(current: usize, total: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(total * 2);
    for i in 0..total {
        let (glyph, style) = if i == current {
            ("●●", Style::default().fg(Color::Yellow))
        } else if i < current {
            ("●", Style::default().fg(Color::Gray))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(glyph, style));
        if i + 1 < total {
            spans.push(Span::raw(" "));
        }
    }
    spans
}

/// Countdown rendered as `m:ss`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(90), "1:30");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn progress_marks_done_current_and_upcoming() {
        let spans = progress_spans(1, 3);
        let glyphs: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(glyphs, vec!["●", " ", "●●", " ", "○"]);
    }
}
