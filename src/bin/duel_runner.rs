//! Headless duel runner
//!
//! Runs one seeded player-vs-archetype duel to completion without
//! real-time pacing and prints a JSON (or text) result.

use clap::Parser;
use serde::Serialize;
use shinobi_combat::catalog::ItemKind;
use shinobi_combat::model::stats::{CharacterSheet, StatBlock};
use shinobi_combat::session::{
    CombatDirector, CombatHooks, LogStyle, OpponentSpec,
};

#[derive(Parser, Debug)]
#[command(name = "duel_runner")]
#[command(about = "Run a headless seeded duel and print the outcome")]
struct Args {
    /// Opponent archetype (data/opponents/{name}.toml or built-in)
    #[arg(long, default_value = "bandit")]
    opponent: String,

    /// Maximum ticks before the run is cut off
    #[arg(long, default_value_t = 1000)]
    max_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the narrative log to stderr as the duel runs
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct DuelResult {
    victory: Option<bool>,
    ticks: u64,
    player_health: f32,
    player_chakra: f32,
    player_stamina: f32,
    events: usize,
    opponent: String,
    seed: u64,
}

/// Stderr narrative, bottomless pouches, no persistent character
struct RunnerHooks {
    verbose: bool,
}

impl CombatHooks for RunnerHooks {
    fn item_count(&self, _item: ItemKind) -> u32 {
        u32::MAX
    }

    fn consume_item(&mut self, _item: ItemKind, _count: u32) -> bool {
        true
    }

    fn apply_injury(&mut self, injury: &str) {
        if self.verbose {
            eprintln!("[injury] {}", injury);
        }
    }

    fn narrate(&mut self, style: LogStyle, text: &str) {
        if self.verbose {
            eprintln!("[{:?}] {}", style, text);
        }
    }

    fn state_changed(&mut self) {}

    fn set_combat_mode(&mut self, _in_combat: bool) {}

    fn sync_player_vitals(&mut self, _health: f32, _chakra: f32, _stamina: f32) {}
}

fn stock_player() -> CharacterSheet {
    let mut sheet = CharacterSheet::new(
        "Wanderer",
        StatBlock {
            strength: 12.0,
            agility: 12.0,
            stamina: 11.0,
            chakra_pool: 12.0,
            intellect: 11.0,
            perception: 11.0,
            willpower: 10.0,
        },
    );
    sheet.taijutsu_level = 8;
    sheet.hand_seal_level = 20;
    sheet
        .with_jutsu("Fire Bolt", 3)
        .with_jutsu("Flame Wave", 2)
        .with_jutsu("Water Wall", 2)
        .with_jutsu("Substitution Technique", 3)
        .with_jutsu("Illusory Clones", 2)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut hooks = RunnerHooks {
        verbose: args.verbose,
    };
    let mut director = CombatDirector::new();
    if let Err(error) = director.start_combat(
        &stock_player(),
        &[OpponentSpec::Named(args.opponent.clone())],
        seed,
        &mut hooks,
        |_| {},
    ) {
        eprintln!("failed to start combat: {}", error);
        std::process::exit(1);
    }

    let mut ticks = 0;
    while ticks < args.max_ticks && director.run_tick(&mut hooks) {
        ticks += 1;
    }

    let session = director.session().expect("session was started");
    let player = session.player();
    let result = DuelResult {
        victory: session.outcome,
        ticks: session.tick,
        player_health: player.vitals.health.current(),
        player_chakra: player.vitals.chakra.current(),
        player_stamina: player.vitals.stamina.current(),
        events: session.events.len(),
        opponent: args.opponent,
        seed,
    };

    if args.format == "text" {
        match result.victory {
            Some(true) => println!("Victory in {} ticks", result.ticks),
            Some(false) => println!("Defeat in {} ticks", result.ticks),
            None => println!("Cut off after {} ticks", result.ticks),
        }
        println!(
            "Player: {:.0} health, {:.0} chakra, {:.0} stamina",
            result.player_health, result.player_chakra, result.player_stamina
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("result serializes")
        );
    }
}
