//! Lane runner UI rendering.
//!
//! Uses a cell buffer for per-character color control. Depth maps to rows
//! (far at the top) and lanes spread out toward the bottom for a simple
//! perspective.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar, spinner_char,
};
use crate::core::constants::{
    DESPAWN_DEPTH, LANE_COUNT, LANE_OFFSETS, PLAYER_DEPTH, SPAWN_DEPTH, SPEED_CAP,
};
use crate::runner::{Lane, RunnerSession, SessionPhase};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PLAYER_CHAR: char = '▲';
const OBSTACLE_CHAR: char = '█';
const LANE_MARK: char = '┊';

/// Horizontal scale at the far edge relative to the near edge.
const FAR_SCALE: f64 = 0.25;

/// Render the lane runner. `notice` is a one-line message for the status
/// bar, e.g. a failed reward claim.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession,
    notice: Option<&str>,
) {
    let layout = create_game_layout(frame, area, " Lane Runner ", Color::LightCyan, 12, 20);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session, notice);
    render_info_panel(frame, layout.info_panel, session);

    match session.phase() {
        SessionPhase::Loading => render_loading(frame, layout.content),
        SessionPhase::Paused => render_settings(frame, layout.content),
        SessionPhase::GameOver { reward_claimed } => {
            render_game_over(frame, layout.content, session, reward_claimed)
        }
        SessionPhase::Running | SessionPhase::Closed => {}
    }
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

/// Fraction of the way from the far edge to the near edge.
fn depth_fraction(depth: f64) -> f64 {
    ((depth - SPAWN_DEPTH) / (DESPAWN_DEPTH - SPAWN_DEPTH)).clamp(0.0, 1.0)
}

fn depth_to_row(depth: f64, height: usize) -> usize {
    let last = height.saturating_sub(1) as f64;
    (depth_fraction(depth) * last).round() as usize
}

/// Column for a lane at a given depth.
fn lane_column(lane: Lane, depth: f64, width: usize) -> usize {
    let half = width as f64 / 2.0;
    let max_offset = LANE_OFFSETS[LANE_COUNT - 1];
    let scale = FAR_SCALE + (1.0 - FAR_SCALE) * depth_fraction(depth);
    let spread = half * 2.0 / 3.0;
    let x = half + lane.offset() / max_offset * spread * scale;
    (x.round() as usize).min(width.saturating_sub(1))
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &RunnerSession) {
    if area.height < 4 || area.width < 12 {
        return;
    }

    let width = area.width as usize;
    let height = area.height as usize;
    let mut buffer = vec![vec![Cell::default(); width]; height];

    // Lane dividers, halfway between lane centres.
    for (row_idx, row) in buffer.iter_mut().enumerate() {
        let depth = SPAWN_DEPTH
            + (DESPAWN_DEPTH - SPAWN_DEPTH) * row_idx as f64 / (height - 1).max(1) as f64;
        for pair in Lane::ALL.windows(2) {
            let a = lane_column(pair[0], depth, width);
            let b = lane_column(pair[1], depth, width);
            let col = (a + b) / 2;
            row[col] = Cell {
                ch: LANE_MARK,
                fg: Color::Rgb(60, 60, 80),
            };
        }
    }

    let obstacle_color = |depth: f64| {
        if depth >= PLAYER_DEPTH - 3.0 {
            Color::LightRed
        } else {
            Color::Rgb(180, 120, 90)
        }
    };

    for obstacle in session.obstacles().iter() {
        let row = depth_to_row(obstacle.depth, height);
        let col = lane_column(obstacle.lane, obstacle.depth, width);
        let cell = Cell {
            ch: OBSTACLE_CHAR,
            fg: obstacle_color(obstacle.depth),
        };
        buffer[row][col] = cell;
        if col + 1 < width && depth_fraction(obstacle.depth) > 0.5 {
            buffer[row][col + 1] = cell;
        }
    }

    let player = session.player();
    let player_row = depth_to_row(PLAYER_DEPTH, height);
    let player_col = lane_column(player.lane, PLAYER_DEPTH, width);
    buffer[player_row][player_col] = Cell {
        ch: PLAYER_CHAR,
        fg: player_color(session),
    };

    for (row_idx, row) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row {
            if cell.fg != current_fg && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg),
                ));
            }
            current_fg = cell.fg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

/// Player tint from the equipped "body" cosmetic, if it carries a hex color.
fn player_color(session: &RunnerSession) -> Color {
    session
        .assets()
        .get("body")
        .and_then(|asset| asset.color.as_deref())
        .and_then(parse_hex_color)
        .unwrap_or(Color::LightYellow)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession,
    notice: Option<&str>,
) {
    if let Some(message) = notice {
        render_status_bar(frame, area, message, Color::LightRed, &[("[Enter]", "Retry")]);
        return;
    }

    match session.phase() {
        SessionPhase::Loading => render_status_bar(frame, area, "Loading...", Color::DarkGray, &[]),
        SessionPhase::Running => render_status_bar(
            frame,
            area,
            "Dodge!",
            Color::LightCyan,
            &[("[←/a]", "Left"), ("[→/d]", "Right"), ("[Esc]", "Settings")],
        ),
        SessionPhase::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[Esc]", "Resume"), ("[r]", "Restart"), ("[q]", "Quit")],
        ),
        SessionPhase::GameOver { reward_claimed } => {
            let claim = if reward_claimed { "Claimed" } else { "Claim" };
            render_status_bar(
                frame,
                area,
                "Game over",
                Color::LightRed,
                &[("[Enter]", claim), ("[r]", "Restart"), ("[q]", "Quit")],
            )
        }
        SessionPhase::Closed => {}
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &RunnerSession) {
    let inner = render_info_panel_frame(frame, area);
    let player = session.player();
    let speed_pct = (player.speed / SPEED_CAP * 100.0).round() as u32;

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![label("Score: "), value(player.score.to_string())]),
        Line::from(vec![label("Level: "), value(player.level.to_string())]),
        Line::from(vec![label("Speed: "), value(format!("{}%", speed_pct))]),
        Line::from(vec![label("Coins: "), value(player.coins_accrued.to_string())]),
        Line::from(""),
        Line::from(vec![
            label("Spawn: "),
            value(format!("{}ms", player.spawn_interval_ms())),
        ]),
        Line::from(vec![
            label("Field: "),
            value(session.obstacles().len().to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let lines = vec![Line::from(Span::styled(
        format!("{} Loading equipped assets...", spinner_char()),
        Style::default().fg(Color::White),
    ))];
    render_modal(frame, area, " Lane Runner ", Color::LightCyan, lines, &[]);
}

fn render_settings(frame: &mut Frame, area: Rect) {
    let lines = vec![Line::from(Span::styled(
        "Game paused",
        Style::default().fg(Color::White),
    ))];
    render_modal(
        frame,
        area,
        " Settings ",
        Color::Yellow,
        lines,
        &[("[Esc]", "Resume"), ("[r]", "Restart"), ("[q]", "Menu")],
    );
}

fn render_game_over(frame: &mut Frame, area: Rect, session: &RunnerSession, claimed: bool) {
    let player = session.player();
    let policy = session.policy();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Passed {} obstacles, reached level {}", player.score, player.level),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "+{} coins  +{} XP",
                player.coins_accrued, policy.xp_per_session
            ),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if claimed {
        lines.push(Line::from(Span::styled(
            "Rewards claimed",
            Style::default().fg(Color::Green),
        )));
    }

    let claim = if claimed { "Done" } else { "Claim" };
    render_modal(
        frame,
        area,
        " Game Over ",
        Color::LightRed,
        lines,
        &[("[Enter]", claim), ("[r]", "Restart"), ("[q]", "Menu")],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_rows_span_field() {
        assert_eq!(depth_to_row(SPAWN_DEPTH, 21), 0);
        assert_eq!(depth_to_row(DESPAWN_DEPTH, 21), 20);
        assert_eq!(depth_to_row(0.0, 21), 10);
        assert_eq!(depth_to_row(100.0, 21), 20);
    }

    #[test]
    fn test_lanes_ordered_left_to_right() {
        for depth in [SPAWN_DEPTH, 0.0, PLAYER_DEPTH] {
            let left = lane_column(Lane::LEFT, depth, 60);
            let center = lane_column(Lane::CENTER, depth, 60);
            let right = lane_column(Lane::RIGHT, depth, 60);
            assert!(left < center && center < right, "depth {}", depth);
        }
    }

    #[test]
    fn test_lanes_spread_toward_player() {
        let far = lane_column(Lane::RIGHT, SPAWN_DEPTH, 60) - lane_column(Lane::LEFT, SPAWN_DEPTH, 60);
        let near = lane_column(Lane::RIGHT, PLAYER_DEPTH, 60) - lane_column(Lane::LEFT, PLAYER_DEPTH, 60);
        assert!(near > far);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }
}
