use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::host::InfoSnapshot;
use crate::ui::theme::Theme;

/// Errors, error ratio and correct keystrokes of the running session.
pub struct InfoBar<'a> {
    pub info: InfoSnapshot,
    pub theme: &'a Theme,
}

impl<'a> InfoBar<'a> {
    pub fn new(info: InfoSnapshot, theme: &'a Theme) -> Self {
        Self { info, theme }
    }

    pub fn entries(&self) -> [String; 3] {
        [
            t!("info.errors", count = self.info.errors).to_string(),
            t!(
                "info.ratio",
                ratio = format!("{:.1}", self.info.error_ratio_percent())
            )
            .to_string(),
            t!("info.keystrokes", count = self.info.keystrokes).to_string(),
        ]
    }
}

impl Widget for InfoBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", t!("app.title")),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let error_color = if self.info.errors == 0 {
            colors.success()
        } else {
            colors.error()
        };
        let [errors, ratio, keystrokes] = self.entries();
        let line = Line::from(vec![
            Span::styled(format!(" {errors}"), Style::default().fg(error_color)),
            Span::styled(format!("   {ratio}"), Style::default().fg(colors.fg())),
            Span::styled(format!("   {keystrokes}"), Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
