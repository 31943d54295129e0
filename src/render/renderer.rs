use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Axis, DeadSnakePolicy, SimulationState, Vec3};
use crate::metrics::GameMetrics;

const SNAKE_COLORS: [Color; 7] = [
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::Red,
    Color::Rgb(255, 128, 0),
    Color::Yellow,
];

/// Front-end settings shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub cells: usize,
    pub move_interval_ms: u64,
    pub boost: bool,
    pub demo: bool,
    pub started: bool,
}

/// What a projected cell shows; later variants win
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Glyph {
    Empty,
    Food,
    /// Dead body that still blocks moves
    Wreck,
    Body(usize),
    Head(usize),
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &SimulationState,
        metrics: &GameMetrics,
        hud: &Hud,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Arena views
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, hud);
        frame.render_widget(stats, chunks[0]);

        if state.all_dead() {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, chunks[1]);
        } else {
            let views = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let front = self.render_projection(state, Axis::Y, " Front (x, y) ");
            frame.render_widget(front, views[0]);
            let top = self.render_projection(state, Axis::Z, " Top (x, z) ");
            frame.render_widget(top, views[1]);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Find what to draw for every cell of the plane spanned by x and `row_axis`
    fn project(state: &SimulationState, row_axis: Axis) -> Vec<Vec<Glyph>> {
        let arena = state.rules.arena;
        let m = arena.max_cell_index();
        let side = arena.cells_per_axis();
        let mut grid = vec![vec![Glyph::Empty; side]; side];

        let mut mark = |pos: Vec3, glyph: Glyph| {
            let col = arena.cell_index(pos.x) + m;
            let row = arena.cell_index(pos.get(row_axis)) + m;
            if (0..side as i32).contains(&col) && (0..side as i32).contains(&row) {
                let cell = &mut grid[row as usize][col as usize];
                *cell = (*cell).max(glyph);
            }
        };

        for food in state.food.iter() {
            mark(*food, Glyph::Food);
        }
        if state.rules.dead_snake_policy == DeadSnakePolicy::Obstacle {
            for snake in state.snakes.iter().filter(|s| !s.alive) {
                for segment in &snake.body {
                    mark(*segment, Glyph::Wreck);
                }
            }
        }
        for snake in state.live_snakes() {
            for segment in snake.body_segments() {
                mark(*segment, Glyph::Body(snake.id));
            }
            mark(snake.head(), Glyph::Head(snake.id));
        }

        grid
    }

    fn render_projection(
        &self,
        state: &SimulationState,
        row_axis: Axis,
        title: &str,
    ) -> Paragraph<'_> {
        // Row 0 is -y (up) or -z (away), so it prints first
        let lines: Vec<Line> = Self::project(state, row_axis)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|glyph| match glyph {
                        Glyph::Head(id) => Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Self::snake_color(id))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Glyph::Body(id) => {
                            Span::styled("□ ", Style::default().fg(Self::snake_color(id)))
                        }
                        Glyph::Wreck => {
                            Span::styled("▪ ", Style::default().fg(Color::DarkGray))
                        }
                        Glyph::Food => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Glyph::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title.to_string()),
            )
            .alignment(Alignment::Center)
    }

    fn snake_color(id: usize) -> Color {
        SNAKE_COLORS[id % SNAKE_COLORS.len()]
    }

    fn render_stats(
        &self,
        state: &SimulationState,
        metrics: &GameMetrics,
        hud: &Hud,
    ) -> Paragraph<'_> {
        let player_length = state
            .player()
            .filter(|s| s.alive)
            .map(|s| s.len().to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut spans = vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                player_length,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Snakes: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", state.live_snakes().count(), state.snakes.len()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Cells: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.cells.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Move: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}ms", hud.move_interval_ms), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if hud.boost {
            spans.push(Span::styled("  BOOST", Style::default().fg(Color::Magenta)));
        }
        if hud.demo {
            spans.push(Span::styled("  DEMO", Style::default().fg(Color::Cyan)));
        }
        if !hud.started {
            spans.push(Span::styled(
                "  press a direction to start",
                Style::default().fg(Color::Gray),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &SimulationState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Food eaten: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.food_eaten.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.best_length.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("W/S", Style::default().fg(Color::Cyan)),
            Span::raw(" depth | "),
            Span::styled("F", Style::default().fg(Color::Cyan)),
            Span::raw(" boost | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" demo | "),
            Span::styled("+/- [/] N/M", Style::default().fg(Color::Cyan)),
            Span::raw(" cells, speed, snakes | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
