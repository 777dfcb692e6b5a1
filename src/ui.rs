use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::feedback::Tone;
use crate::quiz::Phase;

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.quiz().phase() {
            Phase::Active => render_question(self, area, buf),
            Phase::Complete => render_completion(self, area, buf),
        }
    }
}

fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(2), // progress + score
                Constraint::Length(2), // question prompt
                Constraint::Length(3), // activity text
                Constraint::Length(6), // the four options
                Constraint::Length(2), // feedback
                Constraint::Min(1),    // instructions
            ]
            .as_ref(),
        )
        .split(area);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(app.progress_line(), dim_style),
        Span::raw("   "),
        Span::styled(app.score_line(), dim_style),
    ]))
    .alignment(Alignment::Center);
    status.render(chunks[1], buf);

    let prompt = Paragraph::new(Span::styled(app.prompt_line(), italic_style))
        .alignment(Alignment::Center);
    prompt.render(chunks[2], buf);

    if let Some(text) = app.item_text() {
        let item = Paragraph::new(Span::styled(text.to_string(), bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        item.render(chunks[3], buf);
    }

    let option_lines: Vec<Line> = app
        .options()
        .iter()
        .map(|(key, title)| {
            Line::from(vec![
                Span::styled(format!("({key}) "), dim_style),
                Span::raw(title.to_string()),
            ])
        })
        .collect();
    let options = Paragraph::new(option_lines).alignment(Alignment::Center);
    options.render(chunks[4], buf);

    if let Some(feedback) = app.feedback() {
        let tone_style = match feedback.tone {
            Tone::Success => Style::default().patch(bold_style).fg(Color::Green),
            Tone::Error => Style::default().patch(bold_style).fg(Color::Red),
        };
        let line = Paragraph::new(Span::styled(feedback.message.clone(), tone_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        line.render(chunks[5], buf);
    }

    let instructions = Paragraph::new(Span::styled(
        app.instructions_line(),
        Style::default().patch(dim_style).patch(italic_style),
    ))
    .alignment(Alignment::Center);
    instructions.render(chunks[6], buf);
}

fn render_completion(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height / 3),
                Constraint::Length(2), // title
                Constraint::Length(2), // summary
                Constraint::Min(1),    // instructions
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        app.completion_title(),
        Style::default().patch(bold_style).fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    title.render(chunks[1], buf);

    let summary = Paragraph::new(Span::styled(app.completion_summary_line(), bold_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    summary.render(chunks[2], buf);

    let instructions = Paragraph::new(Span::styled(
        app.instructions_line(),
        Style::default().patch(dim_style).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    instructions.render(chunks[3], buf);
}
