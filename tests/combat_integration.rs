//! Scenario-level integration tests for the combat engine

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shinobi_combat::catalog::{ItemKind, Rank, GUARD, STRIKE};
use shinobi_combat::decision::{choose_action, CombatPhase};
use shinobi_combat::model::archetypes::OpponentArchetype;
use shinobi_combat::model::battlefield::RangeBand;
use shinobi_combat::model::combatant::pair_mut;
use shinobi_combat::model::posture::Posture;
use shinobi_combat::model::stats::{CharacterSheet, ResourcePool, StatBlock};
use shinobi_combat::model::tags::{AreaTag, TAG_DESPERATE};
use shinobi_combat::resolution::{resolve_action, ResolutionFlags};
use shinobi_combat::session::scheduler;
use shinobi_combat::session::{
    CombatDirector, CombatHooks, CombatSession, LogStyle, NullHooks, OpponentSpec,
};

/// Hooks that record every collaborator call for inspection
#[derive(Default)]
struct RecordingHooks {
    lines: Vec<(LogStyle, String)>,
    injuries: Vec<String>,
    synced_vitals: Option<(f32, f32, f32)>,
    mode_flags: Vec<bool>,
}

impl CombatHooks for RecordingHooks {
    fn item_count(&self, _item: ItemKind) -> u32 {
        u32::MAX
    }

    fn consume_item(&mut self, _item: ItemKind, _count: u32) -> bool {
        true
    }

    fn apply_injury(&mut self, injury: &str) {
        self.injuries.push(injury.to_string());
    }

    fn narrate(&mut self, style: LogStyle, text: &str) {
        self.lines.push((style, text.to_string()));
    }

    fn state_changed(&mut self) {}

    fn set_combat_mode(&mut self, in_combat: bool) {
        self.mode_flags.push(in_combat);
    }

    fn sync_player_vitals(&mut self, health: f32, chakra: f32, stamina: f32) {
        self.synced_vitals = Some((health, chakra, stamina));
    }
}

/// An opponent with stats identical to the default player block
fn sparring_partner() -> OpponentArchetype {
    OpponentArchetype {
        name: "Sparring Partner".to_string(),
        stats: StatBlock::default(),
        health: 100.0,
        chakra: 100.0,
        stamina: 100.0,
        known_jutsu: Default::default(),
        taijutsu_level: 0,
        hand_seal_level: 0,
        resolve: 50.0,
        aggression: 50.0,
    }
}

fn sparring_session(seed: u64) -> CombatSession {
    let sheet = CharacterSheet::new("Player", StatBlock::default());
    CombatSession::build(
        &sheet,
        &[OpponentSpec::Custom(sparring_partner())],
        seed,
    )
    .unwrap()
}

#[test]
fn scenario_a_strike_damage_is_power_plus_half_strength() {
    let mut session = sparring_session(7);
    session.battlefield.range = RangeBand::Engaged;
    session.combatants[1].posture = Posture::Mobile;
    let strike = session.catalog.get(STRIKE).unwrap();
    let before = session.combatants[1].vitals.health.current();

    // Equal agility and perception: the evasion differential is zero, so
    // the hit is guaranteed
    let mut hooks = NullHooks;
    resolve_action(
        &mut session,
        &mut hooks,
        0,
        Some(1),
        strike,
        ResolutionFlags::default(),
    );

    let after = session.combatants[1].vitals.health.current();
    let expected = (15.0 + StatBlock::default().strength * 0.5).round();
    assert_eq!(before - after, expected);
}

#[test]
fn scenario_a_damage_floors_at_zero_health() {
    let mut session = sparring_session(7);
    session.battlefield.range = RangeBand::Engaged;
    session.combatants[1].vitals.health.damage(95.0);
    let strike = session.catalog.get(STRIKE).unwrap();

    let mut hooks = NullHooks;
    resolve_action(
        &mut session,
        &mut hooks,
        0,
        Some(1),
        strike,
        ResolutionFlags::default(),
    );

    assert_eq!(session.combatants[1].vitals.health.current(), 0.0);
}

#[test]
fn scenario_b_guard_restores_stamina_and_resolve() {
    let mut session = sparring_session(7);
    session.combatants[0].vitals.stamina.spend(50.0);
    let guard = session.catalog.get(GUARD).unwrap();

    let mut hooks = NullHooks;
    resolve_action(
        &mut session,
        &mut hooks,
        0,
        Some(1),
        guard,
        ResolutionFlags::default(),
    );

    let player = session.player();
    // 10% of max stamina back, +3 resolve
    assert_eq!(player.vitals.stamina.current(), 60.0);
    assert_eq!(player.resolve, 53.0);
    // Guarding touches nobody else
    assert_eq!(session.combatants[1].vitals.health.current(), 100.0);
}

#[test]
fn scenario_b_guard_restore_caps_at_max() {
    let mut session = sparring_session(7);
    session.combatants[0].vitals.stamina.spend(4.0);
    session.combatants[0].resolve = 99.0;
    let guard = session.catalog.get(GUARD).unwrap();

    let mut hooks = NullHooks;
    resolve_action(
        &mut session,
        &mut hooks,
        0,
        Some(1),
        guard,
        ResolutionFlags::default(),
    );

    let player = session.player();
    assert_eq!(player.vitals.stamina.current(), 100.0);
    assert_eq!(player.resolve, 100.0);
}

#[test]
fn scenario_c_outranked_attack_never_hurts_through_barrier() {
    // Shuriken (rank E) against a C-rank wall: nullified on every roll
    for seed in 0..25 {
        let mut session = sparring_session(seed);
        session.battlefield.range = RangeBand::Mid;
        session
            .battlefield
            .apply_tag(AreaTag::new("Water Wall", 10).with_rank(Rank::C));
        let shuriken = session.catalog.get("Shuriken Throw").unwrap();

        let mut hooks = NullHooks;
        resolve_action(
            &mut session,
            &mut hooks,
            0,
            Some(1),
            shuriken,
            ResolutionFlags::default(),
        );

        assert_eq!(session.combatants[1].vitals.health.current(), 100.0);
        assert!(session.battlefield.has("Water Wall"));
    }
}

#[test]
fn scenario_d_desperation_multiplies_outgoing_damage() {
    let mut session = sparring_session(7);
    session.battlefield.range = RangeBand::Engaged;
    // Health ratio 0.25: below the desperation threshold
    session.combatants[0].vitals.health.damage(75.0);
    let strike = session.catalog.get(STRIKE).unwrap();
    let before = session.combatants[1].vitals.health.current();

    let mut hooks = NullHooks;
    resolve_action(
        &mut session,
        &mut hooks,
        0,
        Some(1),
        strike,
        ResolutionFlags::default(),
    );

    let after = session.combatants[1].vitals.health.current();
    let expected = ((15.0 + StatBlock::default().strength * 0.5) * 1.25).round();
    assert_eq!(before - after, expected);
}

#[test]
fn scenario_d_desperation_tag_applied_exactly_once() {
    let mut session = sparring_session(7);
    session.combatants[0].vitals.health.damage(75.0);
    let hooks = NullHooks;
    let mut rng = StdRng::seed_from_u64(3);

    let catalog = session.catalog.clone();
    let battlefield = session.battlefield.clone();
    let (actor, target) = pair_mut(&mut session.combatants, 0, 1);

    let first = choose_action(
        &catalog,
        actor,
        target,
        &battlefield,
        CombatPhase::Climax,
        &mut rng,
        &hooks,
    );
    assert!(first.entered_desperation);

    let second = choose_action(
        &catalog,
        actor,
        target,
        &battlefield,
        CombatPhase::Climax,
        &mut rng,
        &hooks,
    );
    assert!(!second.entered_desperation);
    assert_eq!(
        actor.tags.iter().filter(|tag| tag.name == TAG_DESPERATE).count(),
        1
    );
}

#[test]
fn scenario_e_player_death_ends_combat_next_tick_callback_once() {
    let mut session = sparring_session(7);
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_inner = Arc::clone(&calls);
    let last_victory = Arc::new(AtomicUsize::new(99));
    let victory_inner = Arc::clone(&last_victory);
    session.set_callback(move |victory| {
        calls_inner.fetch_add(1, Ordering::SeqCst);
        victory_inner.store(victory as usize, Ordering::SeqCst);
    });
    session.combatants[0].vitals.health.damage(1000.0);

    let mut hooks = RecordingHooks::default();
    scheduler::run_tick(&mut session, &mut hooks);

    assert!(!session.active);
    assert_eq!(session.outcome, Some(false));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last_victory.load(Ordering::SeqCst), 0);
    assert_eq!(hooks.injuries, vec!["Knocked Unconscious".to_string()]);

    // Further ticks are inert and the callback never refires
    scheduler::run_tick(&mut session, &mut hooks);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(hooks.injuries.len(), 1);
}

#[test]
fn victory_fires_callback_with_true() {
    let mut session = sparring_session(7);
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_inner = Arc::clone(&calls);
    session.set_callback(move |victory| {
        assert!(victory);
        calls_inner.fetch_add(1, Ordering::SeqCst);
    });
    session.combatants[1].vitals.health.damage(1000.0);

    let mut hooks = RecordingHooks::default();
    scheduler::run_tick(&mut session, &mut hooks);

    assert!(!session.active);
    assert_eq!(session.outcome, Some(true));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // No injury on victory
    assert!(hooks.injuries.is_empty());
}

fn run_seeded_duel(seed: u64) -> (Vec<String>, Vec<(f32, f32, f32)>) {
    let mut sheet = CharacterSheet::new("Player", StatBlock::default());
    sheet.taijutsu_level = 10;
    let sheet = sheet
        .with_jutsu("Fire Bolt", 3)
        .with_jutsu("Substitution Technique", 2);
    let mut session = CombatSession::build(
        &sheet,
        &[OpponentSpec::Custom(OpponentArchetype::rogue_genin())],
        seed,
    )
    .unwrap();

    let mut hooks = NullHooks;
    for _ in 0..800 {
        if !session.active {
            break;
        }
        scheduler::run_tick(&mut session, &mut hooks);
    }

    let texts = session.events.iter().map(|event| event.text.clone()).collect();
    let finals = session
        .combatants
        .iter()
        .map(|combatant| {
            (
                combatant.vitals.health.current(),
                combatant.vitals.chakra.current(),
                combatant.vitals.stamina.current(),
            )
        })
        .collect();
    (texts, finals)
}

#[test]
fn identical_seeds_produce_identical_duels() {
    let (events_a, finals_a) = run_seeded_duel(20260804);
    let (events_b, finals_b) = run_seeded_duel(20260804);
    assert_eq!(events_a, events_b);
    assert_eq!(finals_a, finals_b);
}

#[test]
fn seeded_duel_reaches_a_terminal_state() {
    let mut session = sparring_session(42);
    let mut hooks = NullHooks;
    for _ in 0..800 {
        if !session.active {
            break;
        }
        scheduler::run_tick(&mut session, &mut hooks);
    }
    assert!(!session.active, "duel failed to reach a terminal state");
    assert!(session.outcome.is_some());
}

#[test]
fn round_trip_vitals_written_back_within_caps() {
    let mut director = CombatDirector::new();
    let mut hooks = RecordingHooks::default();
    let sheet = CharacterSheet::new("Player", StatBlock::default());
    director
        .start_combat(
            &sheet,
            &[OpponentSpec::Custom(sparring_partner())],
            11,
            &mut hooks,
            |_| {},
        )
        .unwrap();

    for _ in 0..800 {
        if !director.run_tick(&mut hooks) {
            break;
        }
    }

    let session = director.session().unwrap();
    assert!(!session.active);
    let player = session.player();
    let (health, chakra, stamina) = hooks.synced_vitals.expect("vitals were written back");
    assert_eq!(health, player.vitals.health.current());
    assert_eq!(chakra, player.vitals.chakra.current());
    assert_eq!(stamina, player.vitals.stamina.current());
    assert!(health <= sheet.vitals.health.max());
    assert!(chakra <= sheet.vitals.chakra.max());
    assert!(stamina <= sheet.vitals.stamina.max());
    // Combat mode flipped on at start and off at teardown
    assert_eq!(hooks.mode_flags, vec![true, false]);
}

#[test]
fn area_tag_names_stay_unique_through_a_duel() {
    let mut session = sparring_session(99);
    session
        .battlefield
        .apply_tag(AreaTag::new("Hidden Mist", 30));
    // A second application of the same name is ignored
    assert!(!session
        .battlefield
        .apply_tag(AreaTag::new("Hidden Mist", 5)));

    let mut hooks = NullHooks;
    for _ in 0..100 {
        if !session.active {
            break;
        }
        scheduler::run_tick(&mut session, &mut hooks);
        let mut names: Vec<&str> = session
            .battlefield
            .area_tags
            .iter()
            .filter(|tag| tag.owner.is_none())
            .map(|tag| tag.name.as_str())
            .collect();
        names.sort_unstable();
        let len_before = names.len();
        names.dedup();
        assert_eq!(names.len(), len_before, "duplicate un-owned area tag");
    }
}

#[test]
fn area_tag_expiry_logs_exactly_once() {
    let mut session = sparring_session(5);
    session.battlefield.apply_tag(AreaTag::new("Hidden Mist", 2));
    let mut hooks = RecordingHooks::default();

    for _ in 0..6 {
        scheduler::run_tick(&mut session, &mut hooks);
    }

    let expiries = hooks
        .lines
        .iter()
        .filter(|(_, text)| text.contains("fades from the battlefield"))
        .count();
    assert_eq!(expiries, 1);
}

proptest! {
    /// No sequence of damage/restore/spend operations can push a vital
    /// outside [0, max]
    #[test]
    fn vitals_never_leave_bounds(
        ops in prop::collection::vec((0u8..3u8, 0.0f32..500.0f32), 0..100)
    ) {
        let mut pool = ResourcePool::full(100.0);
        for (op, amount) in ops {
            match op {
                0 => pool.damage(amount),
                1 => pool.restore(amount),
                _ => pool.spend(amount),
            }
            prop_assert!(pool.current() >= 0.0);
            prop_assert!(pool.current() <= pool.max());
        }
    }
}
