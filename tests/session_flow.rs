use keyline::app::{App, AppScreen};
use keyline::config::Config;
use keyline::session::host::Timer;
use keyline::session::input::Key;
use keyline::session::typing::SessionState;
use keyline::source::{LoadRequest, LoadedText};
use keyline::store::json_store::JsonStore;
use tempfile::TempDir;

fn loaded(lines: &[&str]) -> LoadedText {
    LoadedText {
        lines: lines.iter().map(|l| l.to_string()).collect(),
        title: None,
        placeholder: false,
    }
}

fn app_with_store(dir: &TempDir, lines: &[&str]) -> App {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut app = App::new(Config::default(), Some(store), LoadRequest::Wikipedia);
    app.on_sequence_loaded(app.load_generation(), loaded(lines));
    app
}

fn type_keys(app: &mut App, keys: &[Key]) {
    for &key in keys {
        app.type_key(key);
    }
}

#[test]
fn clean_run_records_result_in_history() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with_store(&dir, &["hi", "ok"]);

    app.type_key(Key::Shift);
    assert_eq!(app.session.state(), SessionState::Running);
    type_keys(
        &mut app,
        &[Key::Char('h'), Key::Char('i'), Key::Char('o'), Key::Char('k')],
    );

    assert_eq!(app.session.state(), SessionState::Finished);
    assert_eq!(app.screen, AppScreen::Result);
    let result = app.frontend.results.last.clone().unwrap();
    assert_eq!(result.correct_keystrokes, 4);
    assert_eq!(result.errors, 0);
    assert_eq!(result.error_ratio_percent, 0.0);
    assert_eq!(result.lines, 2);

    let history = JsonStore::with_base_dir(dir.path().to_path_buf())
        .unwrap()
        .load_history();
    assert_eq!(history.results.len(), 1);
    assert_eq!(history.results[0].correct_keystrokes, 4);
}

#[test]
fn run_with_one_corrected_error() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with_store(&dir, &["hi", "ok"]);

    app.type_key(Key::Char('q'));
    type_keys(
        &mut app,
        &[
            Key::Char('h'),
            Key::Char('x'),
            Key::Backspace,
            Key::Char('i'),
            Key::Char('o'),
            Key::Char('k'),
        ],
    );

    let result = app.frontend.results.last.clone().unwrap();
    assert_eq!(result.correct_keystrokes, 4);
    assert_eq!(result.errors, 1);
    assert_eq!(result.error_ratio_percent, 25.0);
    assert_eq!(app.session.sequence().errors().len(), 1);
    assert_eq!(app.session.sequence().errors()[0].expected, 'i');
}

#[test]
fn latched_error_blocks_progress_until_cleared() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with_store(&dir, &["ab"]);
    app.type_key(Key::Char(' '));

    type_keys(&mut app, &[Key::Char('x'), Key::Char('a'), Key::Char('b')]);
    assert_eq!(app.session.state(), SessionState::Running);
    assert_eq!(app.session.remaining_text(), "ab");
    assert_eq!(app.frontend.display.red, "xab");

    type_keys(&mut app, &[Key::Backspace, Key::Backspace, Key::Backspace]);
    assert!(!app.session.in_error());
    type_keys(&mut app, &[Key::Char('a'), Key::Char('b')]);
    assert_eq!(app.session.state(), SessionState::Finished);
    assert_eq!(app.frontend.results.last.as_ref().unwrap().errors, 1);
}

#[test]
fn spaces_and_titles_are_typed_through_glyphs() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with_store(&dir, &["Go\n", "a b"]);
    assert_eq!(app.session.sequence().lines(), &["Go⏎", "a␣b"]);

    app.type_key(Key::Char('G'));
    type_keys(
        &mut app,
        &[
            Key::Char('G'),
            Key::Char('o'),
            Key::Enter,
            Key::Char('a'),
            Key::Char(' '),
            Key::Char('b'),
        ],
    );
    assert_eq!(app.session.state(), SessionState::Finished);
    assert_eq!(app.frontend.timer.keystrokes(), 6);
}

#[test]
fn restart_after_finish_allows_another_run() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with_store(&dir, &["a"]);
    type_keys(&mut app, &[Key::Char('a'), Key::Char('a')]);
    assert_eq!(app.screen, AppScreen::Result);

    app.restart();
    type_keys(&mut app, &[Key::Char('a'), Key::Char('a')]);
    let history = JsonStore::with_base_dir(dir.path().to_path_buf())
        .unwrap()
        .load_history();
    assert_eq!(history.results.len(), 2);
    assert!(app.frontend.results.best_velocity.is_some());
}
