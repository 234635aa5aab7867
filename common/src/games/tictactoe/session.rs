use std::time::{Duration, Instant};

use crate::games::SessionRng;
use crate::log;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::{DEFAULT_BOARD_SIZE, TicTacToeGameState};
use super::types::{Difficulty, GameStatus, Mark, Position, WinningLine};

/// The computer always plays second.
pub const AI_MARK: Mark = Mark::O;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchSettings {
    pub board_size: usize,
    pub difficulty: Difficulty,
    pub ai_enabled: bool,
    pub ai_delay: Duration,
    pub reset_delay: Duration,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            difficulty: Difficulty::default(),
            ai_enabled: true,
            ai_delay: Duration::from_millis(500),
            reset_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHuman,
    AiPending { due: Instant },
    Finished { status: GameStatus, reset_at: Instant },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MovePlaced {
        mark: Mark,
        position: Position,
        by_ai: bool,
    },
    AiThinking {
        due: Instant,
    },
    GameOver {
        status: GameStatus,
        winning_line: Option<WinningLine>,
    },
    Reset,
}

/// One human-vs-computer match driven by caller-supplied timestamps.
///
/// Between a successful human move and the AI's reply the session is locked
/// and further human moves are rejected. A finished match stays finished
/// until the scheduled reset fires or [`MatchSession::reset`] is called.
pub struct MatchSession {
    state: TicTacToeGameState,
    difficulty: Difficulty,
    ai_enabled: bool,
    ai_delay: Duration,
    reset_delay: Duration,
    phase: Phase,
    rng: SessionRng,
}

impl MatchSession {
    pub fn new(settings: &MatchSettings, rng: SessionRng) -> Self {
        log!(
            "Starting {}x{} match, difficulty {}, AI {}, seed {}",
            settings.board_size,
            settings.board_size,
            settings.difficulty,
            if settings.ai_enabled { "on" } else { "off" },
            rng.seed()
        );

        Self {
            state: TicTacToeGameState::new(settings.board_size),
            difficulty: settings.difficulty,
            ai_enabled: settings.ai_enabled,
            ai_delay: settings.ai_delay,
            reset_delay: settings.reset_delay,
            phase: Phase::AwaitingHuman,
            rng,
        }
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn current_mark(&self) -> Mark {
        self.state.current_mark()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            log!("AI difficulty changed to {}", difficulty);
            self.difficulty = difficulty;
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Turning the AI on while it is O's turn schedules the AI reply;
    /// turning it off cancels a pending reply and hands O to a human.
    pub fn set_ai_enabled(&mut self, enabled: bool, now: Instant) {
        if self.ai_enabled == enabled {
            return;
        }
        self.ai_enabled = enabled;
        log!("AI opponent {}", if enabled { "enabled" } else { "disabled" });

        match self.phase {
            Phase::AiPending { .. } if !enabled => self.phase = Phase::AwaitingHuman,
            Phase::AwaitingHuman if enabled && self.state.current_mark() == AI_MARK => {
                self.phase = Phase::AiPending {
                    due: now + self.ai_delay,
                };
            }
            _ => {}
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::AiPending { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// Whether a human may place a mark right now.
    pub fn accepts_human_move(&self) -> bool {
        self.phase == Phase::AwaitingHuman
            && !(self.ai_enabled && self.state.current_mark() == AI_MARK)
    }

    pub fn human_move(
        &mut self,
        row: usize,
        col: usize,
        now: Instant,
    ) -> Result<Vec<SessionEvent>, String> {
        match self.phase {
            Phase::AiPending { .. } => return Err("Waiting for the AI to move".to_string()),
            Phase::Finished { .. } => return Err("Game is already over".to_string()),
            Phase::AwaitingHuman => {}
        }

        if !self.accepts_human_move() {
            return Err("Not your turn".to_string());
        }

        let mark = self.state.current_mark();
        self.state.apply_move(row, col)?;

        let mut events = vec![SessionEvent::MovePlaced {
            mark,
            position: Position::new(row, col),
            by_ai: false,
        }];
        self.after_move(now, &mut events);
        Ok(events)
    }

    /// Fires whichever timed transition is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        match self.phase {
            Phase::AiPending { due } if now >= due => self.play_ai_turn(now, &mut events),
            Phase::Finished { reset_at, .. } if now >= reset_at => {
                self.reset();
                events.push(SessionEvent::Reset);
            }
            _ => {}
        }

        events
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.phase = Phase::AwaitingHuman;
        log!("Match reset");
    }

    fn play_ai_turn(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        self.phase = Phase::AwaitingHuman;

        let input = BotInput::from_game_state(&self.state);
        let Some(pos) = calculate_move(self.difficulty, input, &mut self.rng) else {
            log!("AI found no move to play");
            return;
        };

        let mark = self.state.current_mark();
        if let Err(e) = self.state.apply_move(pos.row, pos.col) {
            log!("AI failed to place mark at {}: {}", pos, e);
            return;
        }

        log!("AI ({}) played {} at {}", self.difficulty, mark, pos);
        events.push(SessionEvent::MovePlaced {
            mark,
            position: pos,
            by_ai: true,
        });
        self.after_move(now, events);
    }

    fn after_move(&mut self, now: Instant, events: &mut Vec<SessionEvent>) {
        let status = self.state.status();

        if status.is_terminal() {
            log!("Game over: {:?}", status);
            self.phase = Phase::Finished {
                status,
                reset_at: now + self.reset_delay,
            };
            events.push(SessionEvent::GameOver {
                status,
                winning_line: self.state.winning_line(),
            });
        } else if self.ai_enabled && self.state.current_mark() == AI_MARK {
            let due = now + self.ai_delay;
            self.phase = Phase::AiPending { due };
            events.push(SessionEvent::AiThinking { due });
        } else {
            self.phase = Phase::AwaitingHuman;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(difficulty: Difficulty, ai_enabled: bool) -> MatchSettings {
        MatchSettings {
            difficulty,
            ai_enabled,
            ..MatchSettings::default()
        }
    }

    fn create_session(difficulty: Difficulty) -> MatchSession {
        MatchSession::new(&settings(difficulty, true), SessionRng::new(42))
    }

    fn count_game_over(events: &[SessionEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_human_move_schedules_ai_turn() {
        let mut session = create_session(Difficulty::Easy);
        let t0 = Instant::now();

        let events = session.human_move(1, 1, t0).unwrap();
        let due = t0 + Duration::from_millis(500);
        assert_eq!(
            events,
            vec![
                SessionEvent::MovePlaced {
                    mark: Mark::X,
                    position: Position::new(1, 1),
                    by_ai: false,
                },
                SessionEvent::AiThinking { due },
            ]
        );
        assert!(session.is_locked());
        assert_eq!(session.phase(), Phase::AiPending { due });
    }

    #[test]
    fn test_turn_lock_rejects_second_human_move() {
        let mut session = create_session(Difficulty::Easy);
        let t0 = Instant::now();
        session.human_move(1, 1, t0).unwrap();

        let before = session.state().clone();
        assert_eq!(
            session.human_move(0, 0, t0 + Duration::from_millis(100)),
            Err("Waiting for the AI to move".to_string())
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_ai_moves_only_once_due() {
        let mut session = create_session(Difficulty::Easy);
        let t0 = Instant::now();
        session.human_move(1, 1, t0).unwrap();

        assert!(session.tick(t0 + Duration::from_millis(499)).is_empty());
        assert!(session.is_locked());

        let events = session.tick(t0 + Duration::from_millis(500));
        assert_eq!(
            events,
            vec![SessionEvent::MovePlaced {
                mark: Mark::O,
                position: Position::new(0, 0),
                by_ai: true,
            }]
        );
        assert!(!session.is_locked());
        assert_eq!(session.current_mark(), Mark::X);
        assert!(session.accepts_human_move());
    }

    #[test]
    fn test_illegal_human_move_keeps_session_unlocked() {
        let mut session = create_session(Difficulty::Easy);
        let t0 = Instant::now();
        assert_eq!(
            session.human_move(5, 5, t0),
            Err("Position out of bounds".to_string())
        );
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert_eq!(session.current_mark(), Mark::X);
    }

    #[test]
    fn test_win_is_reported_once_and_resets_later() {
        // X takes row 1 while the Easy AI answers (0, 0) and (0, 1).
        let mut session = create_session(Difficulty::Easy);
        let mut now = Instant::now();
        let mut game_over = 0;

        for (row, col) in [(1, 0), (1, 1), (1, 2)] {
            let events = session.human_move(row, col, now).unwrap();
            game_over += count_game_over(&events);
            if session.is_locked() {
                now += Duration::from_millis(600);
                game_over += count_game_over(&session.tick(now));
            }
        }

        assert_eq!(game_over, 1);
        assert_eq!(session.status(), GameStatus::XWon);
        assert!(session.is_finished());
        assert_eq!(
            session.human_move(2, 2, now),
            Err("Game is already over".to_string())
        );

        assert!(session.tick(now + Duration::from_millis(999)).is_empty());
        let events = session.tick(now + Duration::from_millis(1000));
        assert_eq!(events, vec![SessionEvent::Reset]);
        assert_eq!(session.state(), &TicTacToeGameState::new(3));
        assert_eq!(session.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_game_over_carries_winning_line() {
        let mut session = create_session(Difficulty::Easy);
        let mut now = Instant::now();
        let mut last = Vec::new();

        for (row, col) in [(1, 0), (1, 1), (1, 2)] {
            last = session.human_move(row, col, now).unwrap();
            now += Duration::from_millis(600);
            session.tick(now);
        }

        let Some(SessionEvent::GameOver { status, winning_line }) = last.last() else {
            panic!("expected game over, got {:?}", last);
        };
        assert_eq!(*status, GameStatus::XWon);
        let line = winning_line.as_ref().unwrap();
        assert_eq!(
            line.cells,
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_hot_seat_without_ai() {
        let mut session = MatchSession::new(&settings(Difficulty::Hard, false), SessionRng::new(1));
        let t0 = Instant::now();

        session.human_move(0, 0, t0).unwrap();
        assert!(!session.is_locked());
        assert_eq!(session.current_mark(), Mark::O);

        let events = session.human_move(1, 1, t0).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(session.state().cell(1, 1), Some(Mark::O));
        assert!(session.tick(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_enabling_ai_on_its_turn_schedules_reply() {
        let mut session = MatchSession::new(&settings(Difficulty::Easy, false), SessionRng::new(1));
        let t0 = Instant::now();
        session.human_move(1, 1, t0).unwrap();
        assert!(!session.is_locked());

        session.set_ai_enabled(true, t0);
        assert!(session.is_locked());
        assert!(!session.accepts_human_move());

        session.set_ai_enabled(false, t0);
        assert!(!session.is_locked());
        assert!(session.accepts_human_move());
    }

    #[test]
    fn test_manual_reset_clears_pending_ai_turn() {
        let mut session = create_session(Difficulty::Medium);
        let t0 = Instant::now();
        session.human_move(0, 0, t0).unwrap();
        assert!(session.is_locked());

        session.reset();
        assert!(!session.is_locked());
        assert!(session.tick(t0 + Duration::from_secs(5)).is_empty());
        assert_eq!(session.state(), &TicTacToeGameState::new(3));
    }

    #[test]
    fn test_difficulty_change_applies_to_next_ai_move() {
        let mut session = create_session(Difficulty::Easy);
        let t0 = Instant::now();
        session.human_move(0, 0, t0).unwrap();
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.difficulty(), Difficulty::Hard);

        let events = session.tick(t0 + Duration::from_secs(1));
        // Easy would answer (0, 1); the minimax reply to a corner is the centre.
        assert_eq!(
            events,
            vec![SessionEvent::MovePlaced {
                mark: Mark::O,
                position: Position::new(1, 1),
                by_ai: true,
            }]
        );
    }

    #[test]
    fn test_draw_is_reported_without_winner() {
        let mut session = MatchSession::new(&settings(Difficulty::Easy, false), SessionRng::new(1));
        let t0 = Instant::now();
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)];
        let mut events = Vec::new();
        for (row, col) in moves {
            events = session.human_move(row, col, t0).unwrap();
        }
        assert_eq!(
            events.last(),
            Some(&SessionEvent::GameOver {
                status: GameStatus::Draw,
                winning_line: None,
            })
        );
    }
}
