//! Terminal input
//!
//! A dedicated thread blocks on terminal events and forwards them as
//! [`HostEvent`]s, so the simulation never waits on I/O. Only key presses
//! are forwarded: holding a key relies on the terminal's own key repeat.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::HostEvent;
use crate::sim::{Command, Direction};

/// Translate a terminal event into a host event
pub fn map_event(event: &Event) -> Option<HostEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(cols, rows) => Some(HostEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<HostEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(HostEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(HostEvent::Quit);
        }
        _ => return None,
    };
    Some(HostEvent::Command(command))
}

/// Spawn the input thread. It exits when the receiver is dropped or the
/// terminal stops delivering events.
pub fn spawn_input_thread(tx: Sender<HostEvent>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        let Some(host_event) = map_event(&ev) else {
                            continue;
                        };
                        if tx.send(host_event).is_err() {
                            break; // session over
                        }
                    }
                    Err(err) => {
                        log::warn!("Terminal input failed: {err}");
                        break;
                    }
                }
            }
        })
}
