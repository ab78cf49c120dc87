//! Burger Brawl entry point
//!
//! Headless exhibition match: a scripted player bot races the rival for a few
//! stages, with events logged and progress persisted to a JSON file. Stands
//! in for the real presentation layer.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use burger_brawl::consts::{BASE_GRABS_PER_SEC, SIM_DT};
use burger_brawl::sim::{GameEvent, GameSession, Lane};
use burger_brawl::{KeyValueStore, Progress, Tuning};

/// How many ingredient taps per second the demo player manages
const BOT_TAPS_PER_SEC: f32 = 2.5;
/// Stages the exhibition plays before calling it a night
const MAX_STAGES: u32 = 3;

/// JSON-file key-value store standing in for platform storage.
struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    fn open(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn flush(&self) {
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("Could not write {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("Could not encode store: {e}"),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let _ = self.entries.insert(key.to_string(), value.to_string());
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB41);

    let mut store = FileStore::open(PathBuf::from("burger-brawl-store.json"));
    let tuning = Tuning::load(&store);
    let mut progress = Progress::load(&store);

    log::info!("Burger Brawl exhibition starting (seed {seed})");
    let mut session = GameSession::new(seed, tuning, progress.best_stage);
    if let Err(e) = session.start_game(1) {
        log::error!("Bad tuning: {e}");
        return;
    }

    let mut opponent_acc = 0.0f32;
    let mut bot_acc = 0.0f32;

    'rounds: loop {
        session.tick(SIM_DT);

        // Rival cadence, derived from its current speed multiplier
        opponent_acc += SIM_DT * session.opponent().speed() * BASE_GRABS_PER_SEC;
        while opponent_acc >= 1.0 {
            opponent_acc -= 1.0;
            let _ = session.opponent_step();
        }

        // The bot reads its order slip and taps at a steady rate
        bot_acc += SIM_DT * BOT_TAPS_PER_SEC;
        while bot_acc >= 1.0 {
            bot_acc -= 1.0;
            let Some(head) = session.queues().peek_head(Lane::Player) else {
                break;
            };
            let order = head.order.clone();
            let placed = session.tray().len();
            if placed < order.len() {
                session.append_ingredient(order.ingredients()[placed]);
            }
            if session.tray().len() == order.len() {
                session.serve();
            }
        }

        // Swing the hammer once the rival pulls ahead
        if session.round().opponent_score > session.round().player_score + 1 {
            session.use_hammer();
        }

        for event in session.take_events() {
            match event {
                GameEvent::ServeSuccess { ticket } => {
                    log::info!("Player served order {ticket:?}")
                }
                GameEvent::ServeFailed => log::info!("Player fumbled a serve"),
                GameEvent::OpponentServed { ticket } => {
                    log::info!("Rival served order {ticket:?}")
                }
                GameEvent::Taunt => log::info!("Rival: \"Is that all you've got?\""),
                GameEvent::TauntMilestone => log::info!("Rival: \"Three more on the board!\""),
                GameEvent::Sabotaged { ticket } => {
                    log::info!("Rival hid order slip {ticket:?}")
                }
                GameEvent::HammerUsed => log::info!("Player swings the hammer"),
                GameEvent::OpponentPaused => log::info!("Rival frozen"),
                GameEvent::OpponentResumed => log::info!("Rival back to work"),
                GameEvent::StageUnlocked { stage } => {
                    if progress.record_stage(stage) {
                        progress.save(&mut store);
                    }
                }
                GameEvent::RoundEnded {
                    stage,
                    player_score,
                    opponent_score,
                } => {
                    log::info!(
                        "Stage {stage} final: player {player_score} - rival {opponent_score}"
                    );
                    let player_won = player_score >= opponent_score;
                    if player_won && stage < MAX_STAGES {
                        if let Err(e) = session.advance_stage() {
                            log::error!("Could not advance stage: {e}");
                            break 'rounds;
                        }
                    } else {
                        break 'rounds;
                    }
                }
            }
        }
    }

    store.flush();
    log::info!(
        "Exhibition over. Best stage unlocked: {}",
        session.best_stage()
    );
}
