use std::time::{Duration, Instant};

use eframe::egui;
use ttt_common::config::Validate;
use ttt_common::games::tictactoe::SessionEvent;
use ttt_common::{Difficulty, GameStatus, Mark, MatchSession, Phase, Position, SessionRng, Stats, log};

use crate::animation::{Flash, TileFades, thinking_text};
use crate::config::{Config, ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use crate::sound::SoundPlayer;
use super::board::{BoardView, to_color32};

const REPAINT_INTERVAL: Duration = Duration::from_millis(50);

type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub struct TicTacToeApp {
    config: Config,
    config_manager: ClientConfigManager,
    /// False when the config file on disk failed to load; it is left untouched.
    persist_config: bool,
    session: MatchSession,
    sound: SoundPlayer,
    stats: Stats,
    fades: TileFades,
    flash: Option<Flash>,
    thinking_since: Option<Instant>,
}

impl TicTacToeApp {
    pub fn new(
        config: Config,
        config_manager: ClientConfigManager,
        persist_config: bool,
        stats: Stats,
    ) -> Self {
        let session = MatchSession::new(&config.match_settings(), SessionRng::from_random());
        let sound = SoundPlayer::new(config.sound_enabled);
        Self {
            config,
            config_manager,
            persist_config,
            session,
            sound,
            stats,
            fades: TileFades::default(),
            flash: None,
            thinking_since: None,
        }
    }

    fn handle_events(&mut self, events: Vec<SessionEvent>, now: Instant) {
        for event in events {
            self.sound.play_for(&event);
            match event {
                SessionEvent::MovePlaced { position, by_ai, .. } => {
                    self.fades.place(position, now);
                    if by_ai {
                        self.thinking_since = None;
                    }
                }
                SessionEvent::AiThinking { .. } => {
                    self.thinking_since = Some(now);
                }
                SessionEvent::GameOver { status, winning_line } => {
                    self.thinking_since = None;
                    self.flash = Some(match winning_line {
                        Some(line) => Flash::WinningLine {
                            cells: line.cells,
                            started: now,
                        },
                        None => Flash::Draw { started: now },
                    });
                    if let Some(winner) = status.winner() {
                        self.record_win(winner);
                    }
                }
                SessionEvent::Reset => {
                    self.fades.clear();
                    self.flash = None;
                    self.thinking_since = None;
                }
            }
        }
    }

    fn record_win(&mut self, mark: Mark) {
        self.stats.record_win(mark);
        if let Err(e) = self.stats.save(&self.config.stats_file) {
            log!("Failed to save stats: {}", e);
        }
    }

    fn on_cell_clicked(&mut self, pos: Position, now: Instant) {
        match self.session.human_move(pos.row, pos.col, now) {
            Ok(events) => self.handle_events(events, now),
            Err(e) => log!("Move at {} rejected: {}", pos, e),
        }
    }

    fn reset_game(&mut self, now: Instant) {
        self.session.reset();
        self.handle_events(vec![SessionEvent::Reset], now);
    }

    fn change_theme(&mut self, name: String) {
        if self.config.theme != name {
            log!("Theme changed to {}", name);
            self.config.theme = name;
            self.save_config();
        }
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.session.set_difficulty(difficulty);
        if self.config.difficulty != difficulty {
            self.config.difficulty = difficulty;
            self.save_config();
        }
    }

    fn set_ai_enabled(&mut self, enabled: bool, now: Instant) {
        self.session.set_ai_enabled(enabled, now);
        self.thinking_since = self.session.is_locked().then_some(now);
        self.config.ai_enabled = enabled;
        self.save_config();
    }

    fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound = SoundPlayer::new(enabled);
        self.config.sound_enabled = enabled;
        self.save_config();
    }

    fn save_config(&self) {
        if !self.persist_config {
            log!(
                "Not saving settings: config file {} failed to load and is left as is",
                self.config_manager.path().display()
            );
            return;
        }
        if let Err(e) = self
            .config
            .validate()
            .and_then(|_| self.config_manager.set_config(&self.config))
        {
            log!("Failed to save config: {}", e);
        }
    }

    fn needs_repaint(&self, now: Instant) -> bool {
        self.session.phase() != Phase::AwaitingHuman
            || self.fades.is_running(now)
            || self.flash.as_ref().is_some_and(|f| f.is_running(now))
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, now: Instant) {
        ui.horizontal(|ui| {
            ui.menu_button("Game", |ui| {
                if ui.button("Reset Game").clicked() {
                    self.reset_game(now);
                }
                let mut sound_enabled = self.config.sound_enabled;
                if ui.checkbox(&mut sound_enabled, "Sound").changed() {
                    self.set_sound_enabled(sound_enabled);
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Theme", |ui| {
                let names: Vec<String> = self.config.themes.keys().cloned().collect();
                for name in names {
                    let selected = self.config.theme == name;
                    if ui.selectable_label(selected, &name).clicked() {
                        self.change_theme(name);
                    }
                }
            });

            ui.menu_button("AI Level", |ui| {
                for difficulty in Difficulty::ALL {
                    let allowed = difficulty != Difficulty::Hard || self.config.hard_allowed();
                    let selected = self.session.difficulty() == difficulty;
                    ui.add_enabled_ui(allowed, |ui| {
                        if ui.selectable_label(selected, difficulty.label()).clicked() {
                            self.change_difficulty(difficulty);
                        }
                    });
                }

                ui.separator();

                let mut ai_enabled = self.session.ai_enabled();
                if ui.checkbox(&mut ai_enabled, "Play against AI").changed() {
                    self.set_ai_enabled(ai_enabled, now);
                }
            });
        });
    }

    fn render_status_bar(&self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(status_text(&self.session, self.thinking_since, now))
                    .size(16.0)
                    .color(egui::Color32::WHITE),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "X: {}  O: {}",
                        self.stats.wins(Mark::X),
                        self.stats.wins(Mark::O)
                    ))
                    .color(egui::Color32::LIGHT_GRAY),
                );
            });
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui, now: Instant) {
        let Some(theme) = self.config.active_theme() else {
            ui.label("No theme configured");
            return;
        };

        let view = BoardView {
            state: self.session.state(),
            theme,
            fades: &self.fades,
            flash: self.flash.as_ref(),
            interactive: self.session.accepts_human_move(),
        };

        let clicked = ui.vertical_centered(|ui| view.show(ui, now)).inner;

        if let Some(pos) = clicked {
            self.on_cell_clicked(pos, now);
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let events = self.session.tick(now);
        self.handle_events(events, now);

        let background = self
            .config
            .active_theme()
            .map(|t| to_color32(t.background))
            .unwrap_or(egui::Color32::from_gray(0x33));

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui, ctx, now);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(egui::Color32::from_gray(0x22)))
            .show(ctx, |ui| {
                self.render_status_bar(ui, now);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(background))
            .show(ctx, |ui| {
                self.render_board(ui, now);
            });

        if self.needs_repaint(now) {
            ctx.request_repaint_after(REPAINT_INTERVAL);
        }
    }
}

pub fn status_text(session: &MatchSession, thinking_since: Option<Instant>, now: Instant) -> String {
    match session.phase() {
        Phase::AiPending { .. } => thinking_text(thinking_since.unwrap_or(now), now),
        Phase::Finished { status, .. } => match status {
            GameStatus::XWon => "X wins!".to_string(),
            GameStatus::OWon => "O wins!".to_string(),
            GameStatus::Draw => "Draw!".to_string(),
            GameStatus::InProgress => format!("{}'s turn", session.current_mark()),
        },
        Phase::AwaitingHuman => format!("{}'s turn", session.current_mark()),
    }
}
