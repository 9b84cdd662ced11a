//! Input dispatch: overlays first, then global keys, then the scrubber.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use stockscrub_core::scrubber::ScrubKey;
use stockscrub_core::Ticker;

use crate::app::{AppState, ErrorCategory, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::TickerPrompt => {
            handle_ticker_prompt(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('t') => {
            app.prompt_input.clear();
            app.overlay = Overlay::TickerPrompt;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    // 3. Scrubber keys.
    if let Some(scrub) = scrub_key(key.code) {
        app.scrubber.handle_key(scrub);
    } else if let KeyCode::Char(c @ '1'..='5') = key.code {
        let index = i64::from(c as u8 - b'1');
        app.scrubber.set_selection(index);
    }
}

/// Map a terminal key to a scrubber key.
pub fn scrub_key(code: KeyCode) -> Option<ScrubKey> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(ScrubKey::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(ScrubKey::Right),
        KeyCode::Home | KeyCode::Char('g') => Some(ScrubKey::Home),
        KeyCode::End | KeyCode::Char('G') => Some(ScrubKey::End),
        _ => None,
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_ticker_prompt(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.prompt_input.clear();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.prompt_input);
            app.overlay = Overlay::None;
            if input.trim().is_empty() {
                return;
            }
            match Ticker::parse(&input) {
                Ok(ticker) => {
                    app.request_week(ticker);
                }
                Err(e) => app.push_error(ErrorCategory::Input, e.to_string(), input),
            }
        }
        KeyCode::Backspace => {
            app.prompt_input.pop();
        }
        KeyCode::Char(c) => {
            app.prompt_input.push(c);
        }
        _ => {}
    }
}

/// Handle a mouse event against the track from the last layout.
///
/// Presses only count on the track row. Once the handle is captured, drags
/// anywhere on screen move it and a release anywhere ends the drag.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.overlay != Overlay::None {
        return;
    }
    let track = app.layout.track;
    let offset = f64::from(mouse.column) - f64::from(track.x);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == track.y && track.height > 0 {
                app.scrubber.pointer_down(offset);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.scrubber.pointer_move(offset);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.scrubber.pointer_up();
        }
        _ => {}
    }
}
