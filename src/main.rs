use anyhow::Context;
use clap::Parser;
use pinfleet::{Api, Board, FieldState, Game, MemoryStore, Move, Status, BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play an automated game between two randomly placed fleets.
    Demo {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Print every shot as it is resolved.
        #[arg(long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    pinfleet::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed, verbose } => demo(seed, verbose),
    }
}

fn demo(seed: Option<u64>, verbose: bool) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut api = Api::new(MemoryStore::new());
    api.new_player("alice")?;
    let bob = api.new_player("bob")?;

    let mut game = api.new_game("alice")?;
    game.join(bob)?;
    game.auto_setup("alice", &mut rng)?;
    game.auto_setup("bob", &mut rng)?;
    game.start("alice")?;

    while game.status() == Status::Playing {
        let mover = game.player_to_move().to_string();
        let (x, y) = random_target(&game, &mover, &mut rng)?;
        let result = game.make_move(Move {
            player: mover.clone(),
            x,
            y,
            hit: false,
        })?;
        if verbose {
            println!("{mover} fires at ({x}, {y}): {result:?}");
        }
    }
    api.update_game(&game)?;

    for name in ["alice", "bob"] {
        let board = game.board(name).context("board missing")?;
        println!("\n{name} ({:?}):", game.status_for(name));
        print_ships(board);
        print_shots(board);
    }

    let winner = match game.status_for("alice") {
        Status::Won => Some("alice"),
        Status::Lost => Some("bob"),
        _ => None,
    };
    let summary = json!({
        "game": game.id(),
        "moves": game.history().len(),
        "winner": winner,
    });
    println!("\n{}", serde_json::to_string(&summary)?);
    Ok(())
}

/// A uniformly random cell this player has not fired at yet.
fn random_target(game: &Game, player: &str, rng: &mut SmallRng) -> anyhow::Result<(i32, i32)> {
    let board = game.board(player).context("board missing")?;
    loop {
        let x = rng.random_range(0..BOARD_SIZE);
        let y = rng.random_range(0..BOARD_SIZE);
        if board.shots_map().get(x, y) == FieldState::Empty {
            return Ok((x, y));
        }
    }
}

fn print_ships(board: &Board) {
    print_grid("ships", |x, y| match board.ships_map().get(x, y) {
        FieldState::Pin => 'O',
        FieldState::Hit => 'X',
        _ => '.',
    });
    println!("    Legend: O=Pin  X=Hit  .=Water");
}

fn print_shots(board: &Board) {
    print_grid("shots", |x, y| match board.shots_map().get(x, y) {
        FieldState::Hit => 'X',
        FieldState::Miss => 'o',
        _ => '.',
    });
    println!("    Legend: X=Hit  o=Miss  .=Untried");
}

fn print_grid(title: &str, cell: impl Fn(i32, i32) -> char) {
    println!("    ╔═══════════════════════╗ {title}");
    print!("    ║  ");
    for x in 0..BOARD_SIZE {
        print!(" {}", (b'A' + x as u8) as char);
    }
    println!(" ║");
    println!("    ╠═══════════════════════╣");
    for y in 0..BOARD_SIZE {
        print!("    ║ {:2}", y + 1);
        for x in 0..BOARD_SIZE {
            print!(" {}", cell(x, y));
        }
        println!(" ║");
    }
    println!("    ╚═══════════════════════╝");
}
