use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};
use rust_i18n::t;

use crate::keyboard::display::key_label;
use crate::keyboard::highlight::KeyHighlights;
use crate::keyboard::model::KeyId;
use crate::ui::theme::Theme;

const KEY_WIDTH: u16 = 4;
const NAMED_KEYS: [KeyId; 5] = [
    KeyId::Tab,
    KeyId::Shift,
    KeyId::Space,
    KeyId::Backspace,
    KeyId::Enter,
];

pub struct KeyboardDiagram<'a> {
    pub keys: &'a KeyHighlights,
    pub theme: &'a Theme,
    pub show_assignment: bool,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(keys: &'a KeyHighlights, theme: &'a Theme, show_assignment: bool) -> Self {
        Self {
            keys,
            theme,
            show_assignment,
        }
    }

    fn key_style(&self, id: KeyId) -> Style {
        let colors = &self.theme.colors;
        if self.keys.is_highlighted(id) {
            Style::default()
                .fg(colors.bg())
                .bg(colors.highlighted_key())
                .add_modifier(Modifier::BOLD)
        } else if self.show_assignment {
            let finger = self.keys.model.finger_for_key(id).finger;
            Style::default().fg(colors.bg()).bg(colors.finger(finger))
        } else {
            Style::default().fg(colors.key_fg())
        }
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("keyboard.title")))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let model = &self.keys.model;
        let rows = model.rows.len() as u16;
        if inner.height < rows + 1 || inner.width < 30 {
            return;
        }

        let right = inner.x + inner.width;
        for (row_idx, row) in model.rows.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            let offset = row_idx as u16 * 2;
            for (col_idx, key) in row.iter().enumerate() {
                let x = inner.x + offset + col_idx as u16 * KEY_WIDTH;
                if x + KEY_WIDTH > right {
                    break;
                }
                let id = KeyId::Grid {
                    row: row_idx,
                    col: col_idx,
                };
                buf.set_string(x, y, format!(" {} ", key.base), self.key_style(id));
            }
        }

        let y = inner.y + rows;
        let mut x = inner.x;
        for id in NAMED_KEYS {
            let label = format!(" {} ", key_label(id));
            let width = label.chars().count() as u16;
            if x + width > right {
                break;
            }
            buf.set_string(x, y, &label, self.key_style(id));
            x += width + 1;
        }
    }
}
