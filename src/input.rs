//! Keyboard input for the runner screen.
//!
//! Maps crossterm key events to UI-agnostic [`RunnerInput`] values and hands
//! them to the session.

use crate::runner::{process_input, InputEffect, RunnerInput, RunnerSession};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Unified key -> RunnerInput mapping.
pub fn map_key(key: KeyEvent) -> RunnerInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return RunnerInput::Quit;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => RunnerInput::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => RunnerInput::MoveRight,
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') => RunnerInput::ToggleSettings,
        KeyCode::Char('r') | KeyCode::Char('R') => RunnerInput::Restart,
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => RunnerInput::ClaimReward,
        KeyCode::Char('q') | KeyCode::Char('Q') => RunnerInput::Quit,
        _ => RunnerInput::Other,
    }
}

/// Main dispatcher for runner screen input.
///
/// Key releases and repeats are ignored so a held key moves one lane.
pub fn handle_game_input(key: KeyEvent, session: &mut RunnerSession) -> InputEffect {
    if key.kind != KeyEventKind::Press {
        return InputEffect::Ignored;
    }
    process_input(session, map_key(key))
}
