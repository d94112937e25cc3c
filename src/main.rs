use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};

use keyline::app::{App, AppScreen};
use keyline::config::{Config, Locale};
use keyline::engine::filter::TextPolicy;
use keyline::event::EventHandler;
use keyline::logging;
use keyline::source::LoadRequest;
use keyline::store::json_store::JsonStore;
use keyline::ui::components::dashboard::Dashboard;
use keyline::ui::components::info_bar::InfoBar;
use keyline::ui::components::keyboard_diagram::KeyboardDiagram;
use keyline::ui::components::progress_bar::ProgressBar;
use keyline::ui::components::typing_line::TypingLine;
use keyline::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "keyline", version, about = "Line-by-line typing trainer for the terminal")]
struct Cli {
    #[arg(long, help = "Interface and text language (en, de)")]
    locale: Option<String>,

    #[arg(short, long, help = "Keyboard layout (qwerty, qwertz)")]
    layout: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Maximum characters per line")]
    line_length: Option<usize>,

    #[arg(short, long, help = "Practice the text of this file instead of Wikipedia")]
    file: Option<PathBuf>,

    #[arg(long, help = "Reject user text outside the length bounds or with untypeable characters")]
    strict: bool,

    #[arg(long, help = "Color keys by finger instead of following the text")]
    show_assignment: bool,

    #[arg(long, help = "Write the effective settings to the config file")]
    save_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(name) = &self.locale {
            match Locale::from_name(name) {
                Some(locale) => config.locale = locale,
                None => warn!(locale = %name, "unknown locale, keeping configured one"),
            }
        }
        if let Some(layout) = &self.layout {
            config.keyboard_layout = Some(layout.clone());
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(length) = self.line_length {
            config.max_line_length = length;
        }
        if self.strict {
            config.user_text_policy = TextPolicy::Strict;
        }
        if self.show_assignment {
            config.show_assignment = true;
        }
        config.normalize();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "config unreadable, using defaults");
        Config::default()
    });
    cli.apply(&mut config);
    if cli.save_config {
        if let Err(err) = config.save() {
            warn!(error = %err, "could not save config");
        }
    }
    rust_i18n::set_locale(config.locale.as_str());
    info!(locale = config.locale.as_str(), layout = config.layout_name(), "starting");

    let store = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            warn!(error = %err, "result history disabled");
            None
        }
    };
    let request = match &cli.file {
        Some(path) => LoadRequest::File(path.clone()),
        None => LoadRequest::Wikipedia,
    };
    let mut app = App::new(config, store, request);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));
    app.attach_loader(events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;
        app.handle_event(events.next()?);
        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg())),
        area,
    );

    match app.screen {
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Result => render_result(frame, app),
    }

    let layout = AppLayout::new(area);
    let hints: Vec<String> = app.hints();
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let footer = pack_hint_lines(&hint_refs, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(footer, Style::default().fg(colors.text_pending()))),
        layout.footer,
    );
}

fn render_practice(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let display = &app.frontend.display;
    let colors = &app.theme.colors;

    frame.render_widget(InfoBar::new(display.info, &app.theme), layout.info);

    if let Some(status) = app.status_text() {
        let line = Line::from(Span::styled(
            status,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(
            Paragraph::new(line).block(Block::bordered().border_style(Style::default().fg(colors.border()))),
            layout.line,
        );
    } else {
        let slide = display.slide_remaining(Instant::now());
        frame.render_widget(TypingLine::new(display, &app.theme, slide), layout.line);
    }

    if let Some(keyboard_area) = layout.keyboard {
        frame.render_widget(
            KeyboardDiagram::new(&app.frontend.keys, &app.theme, app.config.show_assignment),
            keyboard_area,
        );
    }

    frame.render_widget(
        ProgressBar::new(app.progress_label(), display.progress_ratio(), &app.theme),
        layout.progress,
    );
}

fn render_result(frame: &mut Frame, app: &App) {
    let Some(result) = app.frontend.results.last.as_ref() else {
        return;
    };
    let area = centered_rect(48, 12, frame.area());
    frame.render_widget(
        Dashboard::new(result, app.frontend.results.best_velocity, &app.theme),
        area,
    );
}
