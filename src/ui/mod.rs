pub mod game_common;
pub mod runner_scene;

use crate::runner::RunnerSession;
use ratatui::Frame;

/// Draw one frame of the terminal front end.
pub fn draw_ui(frame: &mut Frame, session: &RunnerSession, notice: Option<&str>) {
    let area = frame.size();
    runner_scene::render_runner_scene(frame, area, session, notice);
}
