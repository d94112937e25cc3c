use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

/// Single-row bar with the label centered over it.
pub struct ProgressBar<'a> {
    pub label: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: impl Into<String>, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.into(),
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (self.ratio * area.width as f64) as u16;
        for x in area.x..area.x + area.width {
            let style = if x < area.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, area.y)].set_style(style);
        }

        let label_width = self.label.chars().count() as u16;
        let label_x = area.x + (area.width.saturating_sub(label_width)) / 2;
        buf.set_stringn(
            label_x,
            area.y,
            &self.label,
            area.width as usize,
            Style::default().fg(colors.fg()),
        );
    }
}
