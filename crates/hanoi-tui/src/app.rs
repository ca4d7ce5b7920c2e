use crate::animations::WinScreen;
use crate::theme::{Theme, ThemeKind};
use crossterm::event::{KeyCode, KeyEvent};
use hanoi_core::{
    AutoSolve, ClickOutcome, GameState, Move, Peg, Solver, MAX_DISKS, MIN_DISKS,
};
use std::time::{Duration, Instant};
use tracing::debug;

/// Pause between the winning move and the celebration
const WIN_DELAY: Duration = Duration::from_millis(500);

/// Ticks a peg wobbles after a rejected move
const SHAKE_TICKS: u32 = 4;

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win celebration screen
    Win,
}

/// Startup options taken from the command line
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub disks: usize,
    /// Time between auto-solve moves
    pub auto_interval: Duration,
    pub theme: ThemeKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            disks: MIN_DISKS as usize,
            auto_interval: Duration::from_millis(600),
            theme: ThemeKind::Dark,
        }
    }
}

/// The main application state
pub struct App {
    /// Current puzzle
    pub game: GameState,
    /// Keyboard cursor
    pub cursor: Peg,
    /// Color theme
    pub theme: Theme,
    /// Suggested next move, shown until the board changes
    pub hint: Option<Move>,
    /// Message to display
    pub message: Option<String>,
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Win screen animation
    pub win_screen: WinScreen,
    /// Peg that just refused a move, with ticks left to wobble
    pub shake: Option<(Peg, u32)>,
    /// Column span `[start, end)` of each peg, filled in by the renderer
    pub peg_spans: [(u16, u16); 3],
    /// Row span `[start, end)` of the board, filled in by the renderer
    pub board_rows: (u16, u16),
    auto: Option<AutoSolve>,
    auto_interval: Duration,
    last_auto_step: Instant,
    win_pending: Option<Instant>,
    win_delay: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            game: GameState::new(config.disks),
            cursor: Peg::Left,
            theme: Theme::from_kind(config.theme),
            hint: None,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            win_screen: WinScreen::new(),
            shake: None,
            peg_spans: [(0, 0); 3],
            board_rows: (0, 0),
            auto: None,
            auto_interval: config.auto_interval,
            last_auto_step: Instant::now(),
            win_pending: None,
            win_delay: WIN_DELAY,
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33), // 30 FPS for animations
            ScreenState::Playing if self.auto.is_some() => Duration::from_millis(50),
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Whether the auto-solver is driving the board
    pub fn is_auto_solving(&self) -> bool {
        self.auto.is_some()
    }

    /// Moves the auto-solver still has to play
    pub fn auto_remaining(&self) -> Option<u64> {
        self.auto.as_ref().map(AutoSolve::remaining)
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if let Some((peg, ticks)) = self.shake {
            self.shake = if ticks > 1 { Some((peg, ticks - 1)) } else { None };
        }

        match self.screen_state {
            ScreenState::Win => self.win_screen.update(),
            ScreenState::Playing => {
                self.step_auto_solve();

                if let Some(since) = self.win_pending {
                    if since.elapsed() >= self.win_delay {
                        self.win_pending = None;
                        self.screen_state = ScreenState::Win;
                        self.win_screen.reset();
                    }
                }
            }
        }
    }

    fn step_auto_solve(&mut self) {
        let Some(auto) = self.auto.as_mut() else {
            return;
        };
        if self.last_auto_step.elapsed() < self.auto_interval {
            return;
        }
        self.last_auto_step = Instant::now();

        match auto.step(&mut self.game) {
            Some(outcome) => {
                if outcome.won {
                    self.auto = None;
                    self.win_pending = Some(Instant::now());
                }
            }
            None => self.auto = None,
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Char('r') => {
                self.new_game(self.game.disk_count() as usize);
            }
            KeyCode::Esc => {
                // Back to the finished tower
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            KeyCode::Char(c @ '1'..='3') => {
                if let Some(peg) = c.to_digit(10).and_then(|d| Peg::from_index(d as usize - 1)) {
                    self.click_peg(peg);
                }
            }

            KeyCode::Left | KeyCode::Char('h') => self.cursor = self.cursor.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.cursor = self.cursor.next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.click_peg(self.cursor),

            KeyCode::Esc => {
                if let Some(peg) = self.game.deselect() {
                    debug!(%peg, "selection cleared");
                }
            }

            KeyCode::Char('a') => self.toggle_auto_solve(),
            KeyCode::Char('?') => self.show_hint(),

            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.new_game(self.game.disk_count() as usize);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_disks(1),
            KeyCode::Char('-') | KeyCode::Char('_') => self.change_disks(-1),

            KeyCode::Char('t') => {
                self.theme = Theme::from_kind(self.theme.kind.next());
                self.show_message(&format!("Theme: {}", self.theme.kind.name()));
            }

            _ => {}
        }
        AppAction::Continue
    }

    /// Handle a left click at a terminal cell
    pub fn handle_mouse(&mut self, column: u16, row: u16) {
        if self.screen_state != ScreenState::Playing {
            return;
        }
        let (top, bottom) = self.board_rows;
        if row < top || row >= bottom {
            return;
        }

        let hit = self
            .peg_spans
            .iter()
            .position(|&(start, end)| column >= start && column < end)
            .and_then(Peg::from_index);
        if let Some(peg) = hit {
            self.click_peg(peg);
        }
    }

    /// Route a click on `peg` to the game and turn the outcome into feedback
    pub fn click_peg(&mut self, peg: Peg) {
        self.cursor = peg;

        if self.win_pending.is_some() {
            return;
        }
        if self.auto.is_some() {
            self.show_message("Auto-solving... press 'a' to stop");
            return;
        }

        match self.game.click(peg) {
            ClickOutcome::Ignored | ClickOutcome::Selected(_) | ClickOutcome::Deselected(_) => {}
            ClickOutcome::Moved(outcome) => {
                self.hint = None;
                if outcome.won {
                    self.win_pending = Some(Instant::now());
                }
            }
            ClickOutcome::Rejected(err) => {
                self.shake = Some((peg, SHAKE_TICKS));
                self.show_message(&err.to_string());
            }
        }
    }

    fn toggle_auto_solve(&mut self) {
        if let Some(auto) = self.auto.take() {
            auto.cancel(&mut self.game);
            self.show_message("Auto-solve stopped");
            return;
        }

        self.win_pending = None;
        if let Some(auto) = AutoSolve::begin(&mut self.game) {
            self.auto = Some(auto);
            self.hint = None;
            self.shake = None;
            self.last_auto_step = Instant::now();
            self.show_message(&format!(
                "Auto-solving {} disks in {} moves",
                self.game.disk_count(),
                self.game.min_moves()
            ));
        }
    }

    fn show_hint(&mut self) {
        if self.auto.is_some() {
            return;
        }
        match Solver::new().hint(&self.game) {
            Some(mv) => {
                self.hint = Some(mv);
                self.show_message(&format!("Hint: move {}", mv));
            }
            None => self.show_message("Already solved!"),
        }
    }

    /// Start over with `disks` disks, cancelling anything in flight
    pub fn new_game(&mut self, disks: usize) {
        if let Some(auto) = self.auto.take() {
            auto.cancel(&mut self.game);
        }
        self.game.reset(disks);
        self.cursor = Peg::Left;
        self.hint = None;
        self.shake = None;
        self.win_pending = None;
        self.screen_state = ScreenState::Playing;
        self.show_message(&format!(
            "New game: {} disks, {} moves minimum",
            self.game.disk_count(),
            self.game.min_moves()
        ));
    }

    fn change_disks(&mut self, delta: i32) {
        let wanted = self.game.disk_count() as i32 + delta;
        if wanted < MIN_DISKS as i32 || wanted > MAX_DISKS as i32 {
            self.show_message(&format!(
                "Disks must be between {} and {}",
                MIN_DISKS, MAX_DISKS
            ));
            return;
        }
        self.new_game(wanted as usize);
    }
}
