//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Msg::Tick`] once `delay` has elapsed. A newer request
    /// replaces a pending one. Input keeps flowing while the timer runs.
    Tick(Duration),
    /// Multiple effects applied in order.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait briefly for input and send any resulting messages through `tx`.
    /// Must return promptly so timers can fire; should stop early once
    /// `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Write the changed cells to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the back-end. Called on every exit path once `init` succeeded.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    timer: Option<Instant>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            timer: None,
        }
    }

    /// Give back the model and driver once the loop is over.
    pub fn into_parts(self) -> (M, D) {
        (self.model, self.driver)
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`].
    ///
    /// 1. Initialises the driver and sends `Msg::Init` to the model.
    /// 2. Loops: drain messages → update → draw → diff → flush, fire the
    ///    pending timer if it is due, poll the driver.
    /// 3. Closes the driver, also when an error ends the loop.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev = Grid::new(self.width, self.height);
        let mut curr = Grid::new(self.width, self.height);

        while !ctx.is_done() {
            self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;
            if ctx.is_done() {
                break;
            }

            if let Some(deadline) = self.timer {
                if Instant::now() >= deadline {
                    self.timer = None;
                    tx.send(Msg::Tick).ok();
                    continue;
                }
            }

            self.driver.poll_msgs(&ctx, &tx)?;
        }

        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Grid,
        curr: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                log::debug!("screen resized to {width}x{height}");
                // Force a full redraw on the next flush.
                *prev = Grid::new(0, 0);
            }
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            curr.fill(Default::default());
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.clone_from(curr);
        }

        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Tick(delay) => {
                self.timer = Some(Instant::now() + delay);
                false
            }
            Effect::Batch(effects) => {
                for e in effects {
                    if self.handle_effect(e, ctx) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::grid::Cell;
    use crate::messages::Key;
    use crate::style::Style;
    use std::collections::VecDeque;

    /// Counts keys and ticks; a tick is requested on every `t`, quits on `q`.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        ticks: usize,
        seen: Vec<Msg>,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            self.seen.push(msg.clone());
            match msg {
                Msg::KeyDown { key: Key::Char('q') } => Some(Effect::End),
                Msg::KeyDown { key: Key::Char('t') } => {
                    self.keys += 1;
                    Some(Effect::Batch(vec![Effect::Tick(Duration::ZERO)]))
                }
                Msg::KeyDown { .. } => {
                    self.keys += 1;
                    None
                }
                Msg::Tick => {
                    self.ticks += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            let text = format!("{}", self.keys);
            grid.print(Point::ZERO, &text, Style::default());
        }
    }

    /// Feeds one scripted batch of messages per poll and records frames.
    #[derive(Default)]
    struct Scripted {
        script: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: &Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            match self.script.pop_front() {
                Some(batch) => {
                    for m in batch {
                        tx.send(m).ok();
                    }
                    Ok(())
                }
                None => Err("script exhausted".into()),
            }
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn run(script: Vec<Vec<Msg>>) -> (Counter, Scripted, bool) {
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver: Scripted {
                script: script.into(),
                ..Scripted::default()
            },
            width: 4,
            height: 1,
        });
        let ok = app.run().is_ok();
        let (model, driver) = app.into_parts();
        (model, driver, ok)
    }

    #[test]
    fn init_then_keys_then_end() {
        let (model, driver, ok) = run(vec![
            vec![Msg::key(Key::Char('a')), Msg::key(Key::Char('b'))],
            vec![Msg::key(Key::Char('q'))],
        ]);
        assert!(ok);
        assert_eq!(model.seen.first(), Some(&Msg::Init));
        assert_eq!(model.keys, 2);
        assert!(driver.closed);
        // "0" after Init, then "2" after the first batch.
        let last = driver.frames.last().unwrap();
        assert_eq!(last.cells[0].cell, Cell::new('2', Style::default()));
    }

    #[test]
    fn tick_is_delivered_after_request() {
        let (model, _driver, ok) = run(vec![
            vec![Msg::key(Key::Char('t'))],
            vec![],
            vec![Msg::key(Key::Char('q'))],
        ]);
        assert!(ok);
        assert_eq!(model.ticks, 1);
        let tick_pos = model.seen.iter().position(|m| *m == Msg::Tick).unwrap();
        let t_pos = model
            .seen
            .iter()
            .position(|m| *m == Msg::key(Key::Char('t')))
            .unwrap();
        assert!(tick_pos > t_pos);
    }

    #[test]
    fn driver_error_still_closes() {
        let (_model, driver, ok) = run(vec![vec![Msg::key(Key::Char('a'))]]);
        assert!(!ok);
        assert!(driver.closed);
    }
}
