#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use truco_rs::agents::{AgentTable, PlayerAgent, ScriptedAgent};
use truco_rs::cards::Card;
use truco_rs::engine::HandView;
use truco_rs::negotiation::RaiseResponse;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a test-writer subscriber once; `TEST_LOG` or `RUST_LOG` pick the level.
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_test_writer().without_time().try_init().ok();
}

pub fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

pub fn table(one: ScriptedAgent, two: ScriptedAgent) -> AgentTable {
    AgentTable::with_agents(Box::new(one), Box::new(two))
}

/// Something an agent was asked or told, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    WantsToRaise { stake: u32 },
    Respond { stake: u32, proposed: Option<u32> },
    Choose { card_to_beat: Option<Card> },
    OpponentPlayed(Card),
}

/// Wraps a scripted agent and records every call into a shared log.
pub struct Recording {
    inner: ScriptedAgent,
    log: Rc<RefCell<Vec<Call>>>,
}

impl Recording {
    pub fn new(inner: ScriptedAgent) -> (Self, Rc<RefCell<Vec<Call>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { inner, log: Rc::clone(&log) }, log)
    }
}

impl PlayerAgent for Recording {
    fn choose_card(&mut self, view: &HandView<'_>) -> Card {
        self.log.borrow_mut().push(Call::Choose { card_to_beat: view.card_to_beat });
        self.inner.choose_card(view)
    }

    fn respond_to_raise(&mut self, view: &HandView<'_>) -> RaiseResponse {
        self.log.borrow_mut().push(Call::Respond { stake: view.stake, proposed: view.proposed });
        self.inner.respond_to_raise(view)
    }

    fn wants_to_raise(&mut self, view: &HandView<'_>) -> bool {
        self.log.borrow_mut().push(Call::WantsToRaise { stake: view.stake });
        self.inner.wants_to_raise(view)
    }

    fn on_opponent_play(&mut self, card: Card) {
        self.log.borrow_mut().push(Call::OpponentPlayed(card));
        self.inner.on_opponent_play(card);
    }
}
