use anyhow::{Result, bail, ensure};
use clap::Parser;
use nemesis_core::pathfinding::manhattan;
use nemesis_core::prediction::PredictionModel;
use nemesis_core::{Direction, GameConfig, GameSession, HistoryStore, MemoryHistory, PlayerAction};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 50)]
    games: u32,
    #[arg(short, long, default_value_t = 300)]
    turns: u32,
    #[arg(long)]
    single_agent: bool,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

// Biased east and south so sessions drift across the board instead of idling.
const ACTIONS: [PlayerAction; 7] = [
    PlayerAction::Move(Direction::North),
    PlayerAction::Move(Direction::South),
    PlayerAction::Move(Direction::South),
    PlayerAction::Move(Direction::West),
    PlayerAction::Move(Direction::East),
    PlayerAction::Move(Direction::East),
    PlayerAction::PlaceTrap,
];

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig { dual_agents: !args.single_agent, ..GameConfig::default() };

    println!(
        "Starting fuzz harness on seed {} for {} games of at most {} turns...",
        args.seed, args.games, args.turns
    );
    let mut store = MemoryHistory::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for game in 0..u64::from(args.games) {
        let map_seed = args.seed.wrapping_add(game);
        let model = PredictionModel::build(&store.load(), config.markov_order);
        let mut session = GameSession::new(config.clone(), map_seed, &model)?;
        let records_before = store.load().len();

        while !session.status().is_terminal() {
            let action = if session.turn() > args.turns {
                PlayerAction::Quit
            } else {
                choose(&mut rng, &ACTIONS)
            };
            let before = session.state().clone();
            session.apply_action(action, &mut store)?;
            let state = session.state();

            for agent in state.agents() {
                ensure!(
                    state.grid.is_walkable(agent.pos),
                    "map {map_seed}: agent {:?} stands on a wall at {:?}",
                    agent.id,
                    agent.pos
                );
            }
            for (old, new) in before.agents().zip(state.agents()) {
                ensure!(
                    manhattan(old.pos, new.pos) <= 2,
                    "map {map_seed}: agent {:?} jumped from {:?} to {:?}",
                    new.id,
                    old.pos,
                    new.pos
                );
            }
            if let Some(secondary) = &state.secondary {
                ensure!(
                    secondary.pos != state.primary.pos,
                    "map {map_seed}: agents share cell {:?}",
                    secondary.pos
                );
            }
            ensure!(
                manhattan(before.player, state.player) <= 1,
                "map {map_seed}: player teleported from {:?} to {:?}",
                before.player,
                state.player
            );
            let placed = config.trap_budget - state.traps_remaining;
            ensure!(
                state.traps.len() as u32 <= placed,
                "map {map_seed}: {} armed traps but only {placed} placed",
                state.traps.len()
            );
        }

        let written = store.load().len() - records_before;
        if written != 1 {
            bail!("map {map_seed}: session ended with {written} history records");
        }
        println!(
            "game {:>3} map {map_seed}: {:?} on turn {}",
            game + 1,
            session.status(),
            session.turn()
        );
    }

    println!("Fuzzing completed successfully. {} sessions recorded.", store.load().len());
    Ok(())
}
