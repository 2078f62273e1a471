use crate::command::Command;
use crate::consts;
use crate::game::{Direction, Phase, Session, StartError, Ticker};
use crate::scores::{PendingSave, ScoreSink};
use crate::startup::{StartupAction, StartupScreen};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;

/// The terminal game client: routes keyboard input and timer ticks to the
/// current [`Session`] and hands finished games to a [`ScoreSink`]
#[derive(Debug)]
pub(crate) struct App<S, R = rand::rngs::ThreadRng> {
    session: Session<R>,
    startup: StartupScreen,
    sink: S,
    /// Present exactly while the game is running.  Arrow keys steer the
    /// snake only while it exists.
    ticker: Option<Ticker>,
    /// The submission of the last game's score, until its outcome arrives
    pending: Option<PendingSave>,
    quitting: bool,
}

impl<S: ScoreSink, R: Rng> App<S, R> {
    pub(crate) fn new(sink: S, rng: R, player_name: Option<&str>) -> App<S, R> {
        App {
            session: Session::new(rng),
            startup: StartupScreen::new(player_name.unwrap_or_default()),
            sink,
            ticker: None,
            pending: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        if self.pending.is_some() {
            tracing::info!("quitting before the score submission finished");
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Some(wait) = self.ticker.as_ref().map(Ticker::remaining) {
            if wait.is_zero() || !poll(wait)? {
                self.on_timer();
            } else {
                self.handle_event(read()?);
            }
        } else if self.pending.is_some() {
            if poll(consts::SAVE_POLL_PERIOD)? {
                self.handle_event(read()?);
            }
            self.poll_save();
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn on_timer(&mut self) {
        if self.ticker.as_mut().is_some_and(Ticker::fire) {
            self.advance();
        }
    }

    /// Move the game forward one tick, submitting the score if that ended it
    fn advance(&mut self) {
        if let Some(entry) = self.session.tick() {
            tracing::info!(name = %entry.name, score = entry.score, "game over");
            self.pending = Some(self.sink.submit(entry));
        }
        self.sync_ticker();
    }

    /// Take in the outcome of the score submission if it has arrived
    fn poll_save(&mut self) {
        let Some(outcome) = self.pending.as_mut().and_then(PendingSave::try_outcome) else {
            return;
        };
        self.pending = None;
        self.session.record_save(outcome.is_ok());
    }

    /// Start or stop the tick timer so that it runs exactly while the game
    /// does
    fn sync_ticker(&mut self) {
        let running = self.session.phase() == Phase::Running;
        if running && self.ticker.is_none() {
            tracing::debug!("starting tick timer");
            self.ticker = Some(Ticker::start(consts::TICK_PERIOD));
        } else if !running && self.ticker.is_some() {
            tracing::debug!("stopping tick timer");
            self.ticker = None;
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Some(ev) = event.as_key_press_event() else {
            return;
        };
        match self.session.phase() {
            Phase::NotStarted => match self.startup.handle_key(ev) {
                Some(StartupAction::Start) => self.start_game(),
                Some(StartupAction::Quit) => self.quit(),
                None => (),
            },
            Phase::Running => match Command::from_key_event(ev) {
                Some(Command::Quit) => self.quit(),
                Some(Command::Up) => self.steer(Direction::Up),
                Some(Command::Down) => self.steer(Direction::Down),
                Some(Command::Left) => self.steer(Direction::Left),
                Some(Command::Right) => self.steer(Direction::Right),
                _ => (),
            },
            Phase::GameOver => match Command::from_key_event(ev) {
                Some(Command::Quit | Command::Q) => self.quit(),
                Some(Command::R | Command::Enter) => self.play_again(),
                _ => (),
            },
        }
    }

    fn start_game(&mut self) {
        match self.session.start(self.startup.name()) {
            Ok(()) => {
                tracing::info!(player = self.session.player(), "game started");
                self.sync_ticker();
            }
            Err(StartError::EmptyName) => self.startup.reject(),
            Err(StartError::AlreadyStarted) => (),
        }
    }

    fn steer(&mut self, direction: Direction) {
        if self.ticker.is_some() {
            let _ = self.session.turn(direction);
        }
    }

    fn play_again(&mut self) {
        // An unfinished submission is abandoned; its result no longer has
        // anywhere to go.
        self.pending = None;
        self.session.reset();
        self.startup = StartupScreen::new(self.session.player());
        self.sync_ticker();
    }

    fn quit(&mut self) {
        self.ticker = None;
        self.quitting = true;
    }
}

impl<S, R> App<S, R> {
    fn draw(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if self.session.phase() == Phase::NotStarted {
            frame.render_widget(&self.startup, area);
            frame.set_cursor_position(self.startup.cursor_position(area));
        } else {
            frame.render_widget(&self.session, area);
        }
    }
}
