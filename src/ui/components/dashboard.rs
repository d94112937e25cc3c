use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// Result screen shown once a run is finished.
pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    pub best_velocity: Option<f64>,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a SessionResult, best_velocity: Option<f64>, theme: &'a Theme) -> Self {
        Self {
            result,
            best_velocity,
            theme,
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            (
                t!("result.velocity").to_string(),
                t!(
                    "result.velocity_value",
                    velocity = format!("{:.0}", self.result.velocity)
                )
                .to_string(),
            ),
            (
                t!("result.keystrokes").to_string(),
                self.result.correct_keystrokes.to_string(),
            ),
            (
                t!("result.errors").to_string(),
                self.result.errors.to_string(),
            ),
            (
                t!("result.ratio").to_string(),
                format!("{:.1}%", self.result.error_ratio_percent),
            ),
            (t!("result.lines").to_string(), self.result.lines.to_string()),
        ];
        if let Some(best) = self.best_velocity {
            rows.push((
                t!("result.best").to_string(),
                t!("result.velocity_value", velocity = format!("{best:.0}")).to_string(),
            ));
        }
        rows
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("result.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.rows();
        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let lines: Vec<Line> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, (label, value))| {
                let value_style = match idx {
                    0 => Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                    2 if self.result.errors == 0 => Style::default().fg(colors.success()),
                    2 => Style::default().fg(colors.error()),
                    _ => Style::default().fg(colors.fg()),
                };
                Line::from(vec![
                    Span::styled(
                        format!("  {label:<label_width$}  "),
                        Style::default().fg(colors.text_pending()),
                    ),
                    Span::styled(value, value_style),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .render(layout[1], buf);
    }
}
