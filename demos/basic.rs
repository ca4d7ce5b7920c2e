//! Basic example of using the Tower of Hanoi engine

use hanoi_core::{AutoSolve, ClickOutcome, GameState, Peg, Solver};

fn print_pegs(game: &GameState) {
    for peg in Peg::ALL {
        println!("  peg {}: {:?}", peg, game.peg(peg));
    }
}

fn main() {
    // Start a four-disk game
    let mut game = GameState::new(4);
    println!(
        "New game with {} disks (optimal: {} moves)\n",
        game.disk_count(),
        game.min_moves()
    );
    print_pegs(&game);

    // Manual play goes through clicks, like a pointer would
    println!("\nClicking peg 1, then peg 2...");
    game.click(Peg::Left);
    if let ClickOutcome::Moved(outcome) = game.click(Peg::Middle) {
        println!("Moved disk {} from {} to {}", outcome.disk, outcome.from, outcome.to);
    }

    // An illegal click sequence is rejected and the selection cleared
    game.click(Peg::Left);
    if let ClickOutcome::Rejected(err) = game.click(Peg::Middle) {
        println!("Rejected: {}", err);
    }

    // Ask for a hint from the current position
    if let Some(hint) = Solver::new().hint(&game) {
        println!("Hint: move {}", hint);
    }

    // Let the auto-solver take over from the start position
    println!("\nAuto-solving...");
    if let Some(mut auto) = AutoSolve::begin(&mut game) {
        while let Some(outcome) = auto.step(&mut game) {
            println!(
                "  #{:>2}: disk {} {} -> {}",
                game.move_count(),
                outcome.disk,
                outcome.from,
                outcome.to
            );
        }
    }

    println!("\nSolved: {}", game.check_win());
    print_pegs(&game);

    // The solution is just an iterator; it can be consumed anywhere
    let three: Vec<String> = Solver::new()
        .solve(3, Peg::Left, Peg::Right, Peg::Middle)
        .map(|mv| mv.to_string())
        .collect();
    println!("\nThree-disk solution: {}", three.join(", "));
}
