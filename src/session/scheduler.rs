//! Tick scheduler - the synchronous heart of the simulation
//!
//! Per tick: area tags decay, personal tags decay, terminal check, then
//! combatants process in list order. The first resolved action ends the
//! tick; that pacing rule keeps exchanges readable in the narrative log.

use rand::Rng;

use crate::core::constants::{
    ACTION_GAUGE_AGILITY_DIVISOR, ACTION_GAUGE_THRESHOLD, CLONE_DECOY_CHANCE,
    INCAPACITATION_INJURY,
};
use crate::decision::{self, legality, phase};
use crate::model::combatant::pair_mut;
use crate::model::tags::{TAG_AIRBORNE, TAG_ILLUSORY_CLONES};
use crate::resolution::{resolve_action, ResolutionFlags};
use crate::session::events::CombatEventKind;
use crate::session::hooks::CombatHooks;
use crate::session::CombatSession;

/// Advance the session by one tick
pub fn run_tick(session: &mut CombatSession, hooks: &mut dyn CombatHooks) {
    if !session.active {
        return;
    }
    session.tick += 1;

    // Area effects burn down first, with an expiry notice
    for expired in session.battlefield.decay() {
        let text = format!("{} fades from the battlefield.", expired.name);
        session.emit(
            hooks,
            CombatEventKind::AreaTagExpired { tag: expired.name },
            text,
        );
    }

    // Personal tags expire silently
    for combatant in &mut session.combatants {
        combatant.decay_tags();
    }

    // A combatant downed mid-tick cannot act again, but is not undone
    if terminal(session) {
        end_combat(session, hooks);
        return;
    }

    for idx in 0..session.combatants.len() {
        if !session.combatants[idx].is_alive() {
            continue;
        }

        // Mid-cast combatants count down instead of acting
        if session.combatants[idx].cast.is_some() {
            if tick_cast(session, hooks, idx) {
                break;
            }
            continue;
        }

        // Airborne combatants cannot act
        if session.combatants[idx].has_tag(TAG_AIRBORNE) {
            continue;
        }

        // Gauge accrual; the action fires at the threshold
        {
            let combatant = &mut session.combatants[idx];
            combatant.gauge += combatant.stats.agility / ACTION_GAUGE_AGILITY_DIVISOR;
            if combatant.gauge < ACTION_GAUGE_THRESHOLD {
                continue;
            }
            combatant.gauge -= ACTION_GAUGE_THRESHOLD;
        }

        let Some(target_idx) = opposing_target(session, idx) else {
            continue;
        };

        let health_ratio = phase::aggregate_health_ratio(&session.combatants);
        let combat_phase = phase::detect(health_ratio, session.tick, session.high_rank_used());

        let decision = {
            let (actor, target) = pair_mut(&mut session.combatants, idx, target_idx);
            decision::choose_action(
                &session.catalog,
                actor,
                target,
                &session.battlefield,
                combat_phase,
                &mut session.rng,
                &*hooks,
            )
        };

        if decision.entered_desperation {
            let actor = session.combatants[idx].name.clone();
            let text = format!("{} fights like a cornered animal!", actor);
            session.emit(hooks, CombatEventKind::Desperation { actor }, text);
        }

        // A screen of clones may soak the attack before it ever lands
        if decision.technique.is_offensive() && session.battlefield.has(TAG_ILLUSORY_CLONES) {
            let roll: f32 = session.rng.gen();
            if roll < CLONE_DECOY_CHANCE {
                strike_decoy(session, hooks, idx, decision.technique);
                break;
            }
        }

        resolve_action(
            session,
            hooks,
            idx,
            Some(target_idx),
            decision.technique,
            ResolutionFlags::default(),
        );
        // One resolved action per tick globally
        break;
    }
}

/// Count a cast down; returns true when it resolved (consuming the tick's
/// action slot)
fn tick_cast(session: &mut CombatSession, hooks: &mut dyn CombatHooks, idx: usize) -> bool {
    let remaining = {
        let Some(cast) = session.combatants[idx].cast.as_mut() else {
            return false;
        };
        cast.ticks_remaining = cast.ticks_remaining.saturating_sub(1);
        cast.ticks_remaining
    };

    if remaining > 0 {
        let combatant = &session.combatants[idx];
        let (actor, technique) = match combatant.cast.as_ref() {
            Some(cast) => (combatant.name.clone(), cast.technique.clone()),
            None => return false,
        };
        let text = format!("{} is still weaving signs for {}...", actor, technique);
        session.emit(
            hooks,
            CombatEventKind::StillCasting { actor, technique },
            text,
        );
        return false;
    }

    let Some(cast) = session.combatants[idx].cast.take() else {
        return false;
    };
    let technique = session.catalog.get(&cast.technique).unwrap_or_else(|| {
        tracing::error!(
            technique = %cast.technique,
            "unknown technique at cast resolution; substituting Guard"
        );
        session.catalog.guard()
    });
    let target_idx = cast
        .target
        .and_then(|id| session.combatants.iter().position(|c| c.id == id));
    resolve_action(
        session,
        hooks,
        idx,
        target_idx,
        technique,
        ResolutionFlags::cast_completion(),
    );
    true
}

/// Costs are paid, but the blow lands on an illusion
fn strike_decoy(
    session: &mut CombatSession,
    hooks: &mut dyn CombatHooks,
    idx: usize,
    technique: &'static crate::catalog::Technique,
) {
    let actor_name;
    {
        let actor = &mut session.combatants[idx];
        let stamina = legality::stamina_cost(technique, actor);
        actor.vitals.stamina.spend(stamina);
        actor.vitals.chakra.spend(technique.chakra_cost as f32);
        actor_name = actor.name.clone();
    }

    let mut spent = false;
    if let Some(tag) = session.battlefield.find_mut(TAG_ILLUSORY_CLONES) {
        tag.remaining = tag.remaining.saturating_sub(1);
        spent = tag.remaining == 0;
    }
    if spent {
        session.battlefield.remove(TAG_ILLUSORY_CLONES);
    }

    let text = format!(
        "{}'s {} tears through a clone - it bursts into smoke!",
        actor_name, technique.name
    );
    session.emit(
        hooks,
        CombatEventKind::DecoyStruck { actor: actor_name },
        text,
    );
    hooks.state_changed();
}

/// Player downed, or every opposing combatant downed
fn terminal(session: &CombatSession) -> bool {
    let player_down = !session.player().is_alive();
    let foes_down = !session
        .combatants
        .iter()
        .any(|combatant| !combatant.is_player && combatant.is_alive());
    player_down || foes_down
}

/// First living combatant on the other side, list order
fn opposing_target(session: &CombatSession, idx: usize) -> Option<usize> {
    let is_player = session.combatants[idx].is_player;
    session
        .combatants
        .iter()
        .position(|combatant| combatant.is_player != is_player && combatant.is_alive())
}

/// Tear the session down: outcome, injury, vitals write-back, banner,
/// callback (exactly once), mode flag restore
pub fn end_combat(session: &mut CombatSession, hooks: &mut dyn CombatHooks) {
    session.active = false;
    let victory = !session
        .combatants
        .iter()
        .any(|combatant| !combatant.is_player && combatant.is_alive());
    session.outcome = Some(victory);

    if victory {
        let text = "The last opponent falls. Victory!".to_string();
        session.emit(hooks, CombatEventKind::Victory, text);
    } else {
        hooks.apply_injury(INCAPACITATION_INJURY);
        let text = format!("{} collapses. Defeat...", session.player().name);
        session.emit(hooks, CombatEventKind::Defeat, text);
    }

    {
        let player = session.player();
        hooks.sync_player_vitals(
            player.vitals.health.current(),
            player.vitals.chakra.current(),
            player.vitals.stamina.current(),
        );
    }

    let text = format!("=== Combat ends after {} ticks ===", session.tick);
    session.emit(hooks, CombatEventKind::CombatEnded, text);

    if let Some(callback) = session.take_callback() {
        callback(victory);
    }
    hooks.set_combat_mode(false);
    hooks.state_changed();
}
