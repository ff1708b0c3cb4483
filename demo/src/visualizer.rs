//! The interactive route-finding model: node selection, a paced replay of
//! the beam search rounds, and the final route.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use beamroute_search::{
    BeamConfig, BeamSearch, Candidate, Error, Graph, NodeId, Outcome, Path, SearchEvent,
};
use beamroute_ui::{
    Color, Effect, Grid, Key, Model, MouseAction, Msg, Point, Style, geom,
};

use crate::layout::{Layout, REFERENCE_LAYOUT};

pub const WIDTH: i32 = 80;
pub const HEIGHT: i32 = 24;
pub const TITLE: &str = "Route Finding using Beam Search";

const INFO_SELECT: &str = "Click (or press 1-7) to choose START and GOAL nodes.";
const INFO_KEYS: &str = "SPACE run Beam Search | R reset | +/- beam width | ESC quit";

// Colours
const COL_TEXT: Color = Color::from_rgb(230, 230, 230);
const COL_BLACK: Color = Color::from_rgb(0, 0, 0);
const COL_EDGE: Color = Color::from_rgb(120, 120, 120);
const COL_COST: Color = Color::from_rgb(200, 200, 200);
const COL_PATH: Color = Color::from_rgb(60, 130, 250);
const COL_ON_PATH: Color = Color::from_rgb(0, 200, 0);
const COL_START: Color = Color::from_rgb(60, 130, 250);
const COL_GOAL: Color = Color::from_rgb(220, 60, 60);
const COL_EXPLORED: Color = Color::from_rgb(240, 150, 150);
const COL_NODE: Color = Color::from_rgb(250, 230, 90);

/// Settings for a [`Visualizer`], normally built from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub beam_width: usize,
    /// How long each frontier path stays highlighted during a run.
    pub step_delay: Duration,
    pub max_rounds: Option<usize>,
    pub start: Option<String>,
    pub goal: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            beam_width: BeamConfig::DEFAULT_WIDTH,
            step_delay: Duration::from_millis(600),
            max_rounds: None,
            start: None,
            goal: None,
        }
    }
}

impl DemoConfig {
    pub fn beam_config(&self) -> BeamConfig {
        BeamConfig {
            beam_width: self.beam_width,
            max_rounds: self.max_rounds,
        }
    }
}

/// A search being replayed on screen.
struct Run {
    search: BeamSearch<Rc<Graph>>,
    /// Frontier paths of the current round still waiting to be shown.
    queue: VecDeque<Path>,
    shown: Option<Path>,
    explored: Vec<NodeId>,
}

/// The visualizer model. Owns all UI state: the selected endpoints, the
/// caption, and the search replay in progress.
pub struct Visualizer {
    graph: Rc<Graph>,
    layout: Layout,
    config: DemoConfig,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    route: Option<Path>,
    caption: String,
    run: Option<Run>,
    round: usize,
    frontier: Vec<Candidate>,
}

impl Visualizer {
    /// A visualizer over the reference graph.
    pub fn new(config: DemoConfig) -> Result<Self, Error> {
        Self::with_graph(Rc::new(Graph::reference()), &REFERENCE_LAYOUT, config)
    }

    /// A visualizer over `graph`, placed with `table`. Preselected endpoints
    /// in `config` must name nodes of the graph.
    pub fn with_graph(
        graph: Rc<Graph>,
        table: &[(&str, Point)],
        config: DemoConfig,
    ) -> Result<Self, Error> {
        if config.beam_width < 1 {
            return Err(Error::InvalidWidth(config.beam_width));
        }
        let layout = Layout::new(&graph, table)?;
        let start = config.start.as_deref().map(|l| graph.node(l)).transpose()?;
        let goal = config.goal.as_deref().map(|l| graph.node(l)).transpose()?;
        Ok(Self {
            graph,
            layout,
            config,
            start,
            goal,
            route: None,
            caption: TITLE.to_owned(),
            run: None,
            round: 0,
            frontier: Vec::new(),
        })
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    pub fn beam_width(&self) -> usize {
        self.config.beam_width
    }

    pub fn route(&self) -> Option<&Path> {
        self.route.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// The frontier path currently highlighted by a run.
    pub fn shown_path(&self) -> Option<&Path> {
        self.run.as_ref().and_then(|r| r.shown.as_ref())
    }

    fn label(&self, node: NodeId) -> &str {
        self.graph.label(node).unwrap_or("?")
    }

    fn select(&mut self, node: NodeId) {
        if self.run.is_some() {
            return;
        }
        if self.start.is_none() {
            self.start = Some(node);
            self.caption = format!("Start Node Selected: {}", self.label(node));
        } else if self.goal.is_none() {
            self.goal = Some(node);
            self.caption = format!("Goal Node Selected: {}", self.label(node));
        }
    }

    fn reset(&mut self) {
        self.start = None;
        self.goal = None;
        self.route = None;
        self.run = None;
        self.round = 0;
        self.frontier.clear();
        self.caption = TITLE.to_owned();
    }

    fn change_width(&mut self, delta: isize) {
        if self.run.is_some() {
            return;
        }
        self.config.beam_width = self.config.beam_width.saturating_add_signed(delta).max(1);
        log::debug!("beam width set to {}", self.config.beam_width);
    }

    fn begin_run(&mut self) -> Option<Effect> {
        if self.run.is_some() {
            return None;
        }
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return None;
        };

        match BeamSearch::new(Rc::clone(&self.graph), start, goal, self.config.beam_config()) {
            Ok(search) => {
                log::info!(
                    "running beam search {} -> {} (width {})",
                    self.label(start),
                    self.label(goal),
                    self.config.beam_width
                );
                self.caption = "Running Beam Search...".to_owned();
                self.route = None;
                self.run = Some(Run {
                    search,
                    queue: VecDeque::new(),
                    shown: None,
                    explored: Vec::new(),
                });
                self.advance()
            }
            Err(e) => {
                log::warn!("cannot start search: {e}");
                self.caption = format!("Cannot run: {e}");
                None
            }
        }
    }

    /// Show the next frontier path, pulling the next round from the search
    /// when the current one has been shown in full.
    fn advance(&mut self) -> Option<Effect> {
        let delay = self.config.step_delay;
        let run = self.run.as_mut()?;

        // Every path of a round is shown before the round is expanded, even
        // when an earlier one already reaches the goal.
        if let Some(path) = run.queue.pop_front() {
            run.shown = Some(path);
            return Some(Effect::Tick(delay));
        }

        match run.search.next() {
            Some(SearchEvent::Round(snap)) => {
                run.queue = snap.frontier.iter().map(|c| c.path.clone()).collect();
                run.shown = run.queue.pop_front();
                run.explored = snap.explored;
                self.round = snap.round;
                self.frontier = snap.frontier;
                Some(Effect::Tick(delay))
            }
            Some(SearchEvent::Finished(outcome)) => {
                self.finish(outcome);
                None
            }
            None => {
                self.finish(Outcome::NoRoute);
                None
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.run = None;
        self.frontier.clear();
        self.caption = match outcome.path() {
            Some(path) => format!("Route Found: {}", self.graph.format_path(path)),
            None => "No Route Found".to_owned(),
        };
        self.route = outcome.into_path();
        log::info!("{}", self.caption);
    }

    fn node_color(&self, node: NodeId, highlighted: Option<&Path>, explored: &[NodeId]) -> Color {
        if highlighted.is_some_and(|p| p.contains(node)) {
            COL_ON_PATH
        } else if self.start == Some(node) {
            COL_START
        } else if self.goal == Some(node) {
            COL_GOAL
        } else if explored.contains(&node) {
            COL_EXPLORED
        } else {
            COL_NODE
        }
    }

    fn draw_edges(&self, grid: &mut Grid, highlighted: Option<&Path>) {
        let plain = Style::default().with_fg(COL_EDGE);
        for (from, edge) in self.graph.edges() {
            let (a, b) = (self.layout.center(from), self.layout.center(edge.to));
            for p in geom::line(a, b) {
                grid.print(p, "·", plain);
            }
        }

        if let Some(path) = highlighted {
            let bold = Style::default().with_fg(COL_PATH).bold();
            for (from, to) in path.steps() {
                for p in geom::line(self.layout.center(from), self.layout.center(to)) {
                    grid.print(p, "•", bold);
                }
            }
        }

        let cost_style = Style::default().with_fg(COL_COST).bold();
        for (from, edge) in self.graph.edges() {
            let mid = self.layout.center(from).midpoint(self.layout.center(edge.to));
            grid.print(mid, &edge.cost.to_string(), cost_style);
        }
    }

    fn draw_status(&self, grid: &mut Grid, explored: &[NodeId]) {
        let text = Style::default().with_fg(COL_TEXT);
        let mut status = format!(" Beam width: {}", self.config.beam_width);
        if self.round > 0 {
            status.push_str(&format!("   Round: {}", self.round));
        }
        grid.print(Point::new(0, HEIGHT - 3), &status, text.bold());

        if !self.frontier.is_empty() {
            let entries: Vec<String> = self
                .frontier
                .iter()
                .map(|c| format!("[{}]={}", self.graph.format_path(&c.path), c.score))
                .collect();
            grid.print(
                Point::new(0, HEIGHT - 2),
                &format!(" Frontier: {}", entries.join("  ")),
                text,
            );
        }
        if !explored.is_empty() {
            let names: Vec<&str> = explored.iter().map(|&n| self.label(n)).collect();
            grid.print(
                Point::new(0, HEIGHT - 1),
                &format!(" Explored: {}", names.join(", ")),
                text,
            );
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::Tick => self.advance(),

            Msg::KeyDown { key } => match key {
                Key::Escape | Key::Char('q') => Some(Effect::End),
                Key::Char('r') | Key::Char('R') => {
                    self.reset();
                    None
                }
                Key::Space | Key::Enter => self.begin_run(),
                Key::Char('+') | Key::Char('=') => {
                    self.change_width(1);
                    None
                }
                Key::Char('-') => {
                    self.change_width(-1);
                    None
                }
                Key::Char(c) => {
                    if let Some(d) = c.to_digit(10) {
                        let idx = d as usize;
                        if idx >= 1 && idx <= self.graph.len() {
                            self.select(NodeId(idx as u32 - 1));
                        }
                    }
                    None
                }
                _ => None,
            },

            Msg::Mouse {
                action: MouseAction::Main,
                pos,
            } => {
                if let Some(node) = self.layout.hit(pos) {
                    self.select(node);
                }
                None
            }

            _ => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        let text = Style::default().with_fg(COL_TEXT);
        grid.print(Point::new(1, 0), &self.caption, text.bold());
        grid.print(Point::new(1, 1), INFO_SELECT, text);
        grid.print(Point::new(1, 2), INFO_KEYS, text);

        let (highlighted, explored): (Option<&Path>, &[NodeId]) = match &self.run {
            Some(run) => (run.shown.as_ref(), run.explored.as_slice()),
            None => (self.route.as_ref(), &[][..]),
        };

        self.draw_edges(grid, highlighted);

        for node in self.graph.nodes() {
            let bg = self.node_color(node, highlighted, explored);
            let style = Style::default().with_fg(COL_BLACK).with_bg(bg).bold();
            grid.print(self.layout.badge_origin(node), &self.layout.badge(node), style);
        }

        self.draw_status(grid, explored);
    }
}
