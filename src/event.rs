use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::source::LoadedText;

pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste: user-supplied practice text.
    Paste(String),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    /// Lines produced by the loader thread, stamped with the request's
    /// generation.
    SequenceLoaded { generation: u64, text: LoadedText },
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                        Ok(Event::Paste(text)) => Some(AppEvent::Paste(text)),
                        Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(event) = forwarded {
                        if input_tx.send(event).is_err() {
                            return;
                        }
                    }
                } else if input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    /// Handle for producers other than the input poller.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
