//! Combat session lifecycle
//!
//! `CombatDirector` is the single public entry point: it enforces the
//! one-active-session rule, builds combatants from their sources, and
//! owns the session until teardown. The completion callback is the only
//! channel through which the outcome reaches the surrounding game.

pub mod events;
pub mod hooks;
pub mod scheduler;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Rank, TechniqueCatalog};
use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::error::{CombatError, Result};
use crate::core::types::Tick;
use crate::model::archetypes::{resolve_archetype, OpponentArchetype};
use crate::model::battlefield::Battlefield;
use crate::model::combatant::Combatant;
use crate::model::stats::CharacterSheet;

pub use events::{CombatEvent, CombatEventKind, LogStyle};
pub use hooks::{CombatHooks, NullHooks};

/// One technique use, recorded for phase detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub technique: String,
    pub rank: Rank,
    pub tick: Tick,
}

/// How an opponent is supplied to `start_combat`
#[derive(Debug, Clone)]
pub enum OpponentSpec {
    /// Resolve by archetype name: disk first, then the built-in roster
    Named(String),
    /// Fully built combat-ready data
    Custom(OpponentArchetype),
}

pub type CompletionCallback = Box<dyn FnOnce(bool) + Send>;

/// All state for one running combat
pub struct CombatSession {
    pub active: bool,
    pub tick: Tick,
    pub battlefield: Battlefield,
    /// Player first, then opponents in supplied order
    pub combatants: Vec<Combatant>,
    pub usage: Vec<UsageRecord>,
    pub events: Vec<CombatEvent>,
    pub rng: StdRng,
    pub catalog: TechniqueCatalog,
    /// Set at teardown: true iff every opponent fell
    pub outcome: Option<bool>,
    on_end: Option<CompletionCallback>,
}

impl CombatSession {
    /// Build a session directly, player first at long range.
    ///
    /// `CombatDirector::start_combat` is the guarded entry point; direct
    /// construction serves tests and headless tooling that drive
    /// `run_tick` themselves.
    pub fn build(
        player: &CharacterSheet,
        opponents: &[OpponentSpec],
        seed: u64,
    ) -> Result<CombatSession> {
        if opponents.is_empty() {
            return Err(CombatError::NoOpponents);
        }
        let catalog = TechniqueCatalog::new();
        let mut combatants = vec![Combatant::from_player(player, &catalog)?];
        for spec in opponents {
            let archetype = match spec {
                OpponentSpec::Named(name) => resolve_archetype(name)?,
                OpponentSpec::Custom(archetype) => archetype.clone(),
            };
            combatants.push(Combatant::from_archetype(&archetype, &catalog)?);
        }
        Ok(CombatSession {
            active: true,
            tick: 0,
            battlefield: Battlefield::new(),
            combatants,
            usage: Vec::new(),
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            catalog,
            outcome: None,
            on_end: None,
        })
    }

    pub fn set_callback(&mut self, on_end: impl FnOnce(bool) + Send + 'static) {
        self.on_end = Some(Box::new(on_end));
    }

    pub fn player(&self) -> &Combatant {
        &self.combatants[0]
    }

    pub fn high_rank_used(&self) -> bool {
        self.usage.iter().any(|record| record.rank.is_high())
    }

    /// Log an event and mirror it to the narrative sink
    pub fn emit(
        &mut self,
        hooks: &mut dyn CombatHooks,
        kind: CombatEventKind,
        text: impl Into<String>,
    ) {
        let text = text.into();
        hooks.narrate(kind.style(), &text);
        self.events.push(CombatEvent {
            tick: self.tick,
            kind,
            text,
        });
    }

    pub(crate) fn take_callback(&mut self) -> Option<CompletionCallback> {
        self.on_end.take()
    }
}

/// Owns the (at most one) active combat session
#[derive(Default)]
pub struct CombatDirector {
    session: Option<CombatSession>,
}

impl CombatDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.active)
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    /// Begin a combat session. Rejected while one is already active.
    pub fn start_combat(
        &mut self,
        player: &CharacterSheet,
        opponents: &[OpponentSpec],
        seed: u64,
        hooks: &mut dyn CombatHooks,
        on_end: impl FnOnce(bool) + Send + 'static,
    ) -> Result<()> {
        if self.is_active() {
            tracing::warn!("combat start rejected: a session is already active");
            return Err(CombatError::SessionAlreadyActive);
        }

        let mut session = CombatSession::build(player, opponents, seed)?;
        session.set_callback(on_end);

        hooks.set_combat_mode(true);
        let roster: Vec<&str> = session.combatants[1..]
            .iter()
            .map(|combatant| combatant.name.as_str())
            .collect();
        let text = format!("=== Combat begins: {} ===", roster.join(", "));
        session.emit(hooks, CombatEventKind::CombatStarted, text);
        hooks.state_changed();

        self.session = Some(session);
        Ok(())
    }

    /// Advance one tick. Returns whether the session is still active.
    pub fn run_tick(&mut self, hooks: &mut dyn CombatHooks) -> bool {
        match self.session.as_mut() {
            Some(session) if session.active => {
                scheduler::run_tick(session, hooks);
                session.active
            }
            _ => false,
        }
    }

    /// Drive ticks on the real-time interval until the session ends.
    /// All simulation logic is synchronous; this layer is only pacing.
    pub async fn run(&mut self, hooks: &mut dyn CombatHooks) -> Option<bool> {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        while self.is_active() {
            interval.tick().await;
            self.run_tick(hooks);
        }
        self.session.as_ref().and_then(|session| session.outcome)
    }

    /// Synchronously halt an active session, running full teardown
    pub fn force_stop(&mut self, hooks: &mut dyn CombatHooks) {
        if let Some(session) = self.session.as_mut() {
            if session.active {
                scheduler::end_combat(session, hooks);
            }
        }
    }
}
