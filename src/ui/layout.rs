use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows the keyboard diagram needs: four character rows, the named-key row
/// and the border.
pub const KEYBOARD_HEIGHT: u16 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Full,    // keyboard and progress bar
    Compact, // typing line, info and progress only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.height >= 18 && area.width >= 60 {
            LayoutTier::Full
        } else {
            LayoutTier::Compact
        }
    }

    pub fn show_keyboard(&self) -> bool {
        *self == LayoutTier::Full
    }
}

pub struct AppLayout {
    pub info: Rect,
    pub line: Rect,
    pub keyboard: Option<Rect>,
    pub progress: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);
        let keyboard_height = if tier.show_keyboard() {
            KEYBOARD_HEIGHT
        } else {
            0
        };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(keyboard_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            info: vertical[0],
            line: vertical[1],
            keyboard: tier.show_keyboard().then_some(vertical[2]),
            progress: vertical[3],
            footer: vertical[4],
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let target_w = width.min(area.width);
    let target_h = height.min(area.height);
    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);
    Rect::new(left, top, target_w, target_h)
}
