use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::display::LineDisplay;
use crate::ui::theme::Theme;

/// The practice line: typed prefix in green, pending wrong input in red,
/// then the rest of the line. `slide` shifts the line right while a new one
/// slides in.
pub struct TypingLine<'a> {
    display: &'a LineDisplay,
    theme: &'a Theme,
    slide: f64,
}

impl<'a> TypingLine<'a> {
    pub fn new(display: &'a LineDisplay, theme: &'a Theme, slide: f64) -> Self {
        Self {
            display,
            theme,
            slide: slide.clamp(0.0, 1.0),
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let colors = &self.theme.colors;
        let mut spans = Vec::with_capacity(3);
        if !self.display.green.is_empty() {
            spans.push(Span::styled(
                self.display.green.as_str(),
                Style::default().fg(colors.text_correct()),
            ));
        }
        if !self.display.red.is_empty() {
            spans.push(Span::styled(
                self.display.red.as_str(),
                Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }
        let mut chars = self.display.normal.chars();
        if let Some(first) = chars.next() {
            // the next char to type is emphasized only when no error is pending
            let first_style = if self.display.red.is_empty() {
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(colors.text_pending())
            };
            spans.push(Span::styled(first.to_string(), first_style));
            spans.push(Span::styled(
                chars.as_str(),
                Style::default().fg(colors.text_pending()),
            ));
        }
        spans
    }
}

impl Widget for TypingLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let offset = (self.slide * inner.width as f64) as u16;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .split(inner);
        let row = rows[1];
        let target = Rect::new(
            row.x + 1 + offset.min(row.width),
            row.y,
            row.width.saturating_sub(1 + offset),
            row.height,
        );
        Paragraph::new(Line::from(self.spans())).render(target, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::host::Renderer;

    fn row_text(buf: &Buffer, area: Rect, y: u16) -> String {
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_spans_follow_green_red_normal() {
        let theme = Theme::default();
        let mut display = LineDisplay::new();
        display.set_green_text("ab");
        display.set_red_text("x");
        display.set_normal_text("cd");
        let line = TypingLine::new(&display, &theme, 0.0);
        let contents: Vec<String> = line.spans().iter().map(|s| s.content.to_string()).collect();
        assert_eq!(contents, vec!["ab", "x", "c", "d"]);
    }

    #[test]
    fn test_render_places_line_in_middle_row() {
        let theme = Theme::default();
        let mut display = LineDisplay::new();
        display.set_green_text("he");
        display.set_normal_text("llo");
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        TypingLine::new(&display, &theme, 0.0).render(area, &mut buf);
        assert!(row_text(&buf, area, 2).contains("hello"));
    }

    #[test]
    fn test_slide_shifts_line_right() {
        let theme = Theme::default();
        let mut display = LineDisplay::new();
        display.set_normal_text("abc");
        let area = Rect::new(0, 0, 22, 3);
        let mut buf = Buffer::empty(area);
        TypingLine::new(&display, &theme, 0.5).render(area, &mut buf);
        let text = row_text(&buf, area, 1);
        assert!(text.find("abc").unwrap() > 5);
    }
}
