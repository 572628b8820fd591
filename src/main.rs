use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::*;

mod display;
use display::*;

fn main() -> Result<()> {
    // library diagnostics go to stderr, silent unless RUST_LOG asks for them
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    if ask_yes_no(&stdin, "Run a computer tournament instead of a game? y/n: ")? {
        return run_tournament(&stdin);
    }

    let yellow = ask_player(&stdin, Stone::Yellow)?;
    let red = ask_player(&stdin, Stone::Red)?;

    let mut state = new_game();
    let mut searcher = Searcher::new();

    // game loop
    loop {
        display(&state)?;

        match state.status() {
            Status::InProgress => {}
            Status::Won(stone) => {
                println!("{} wins after {} turns!", stone.name(), state.turns());
                break;
            }
            Status::Drawn => {
                println!("Draw!");
                break;
            }
        }

        let player = state.current_player();
        println!("Current player: {}", player.name());
        println!("Evaluation score for current player: {}", evaluate(&state));

        let config = if player == Stone::Yellow { yellow } else { red };
        let column = match config {
            // AI player
            Some(config) => {
                println!("AI ({}) is thinking...", config);
                stdout().flush()?;

                // slow down play if both players are AI
                if yellow.is_some() && red.is_some() {
                    std::thread::sleep(std::time::Duration::from_secs(1));
                }

                let column = searcher
                    .choose(&state, config)
                    .ok_or_else(|| anyhow!("AI found no move in a running game"))?;
                println!("AI plays column {}", column + 1);
                column
            }
            // human player
            None => {
                let input = prompt(&stdin, "Move input > ")?;
                match input.parse::<usize>() {
                    Ok(column) if column >= 1 => column - 1,
                    _ => {
                        println!("Invalid number: {}", input);
                        continue;
                    }
                }
            }
        };

        if let Err(err) = state.place(column) {
            match err {
                IllegalAction::OutOfRange { width, .. } => println!(
                    "Invalid move, column {} out of range. Columns must be between 1 and {}",
                    column + 1,
                    width
                ),
                IllegalAction::ColumnFull(_) => {
                    println!("Invalid move, column {} full", column + 1)
                }
            }
            // try the move again
            continue;
        }
    }
    Ok(())
}

fn run_tournament(stdin: &Stdin) -> Result<()> {
    let yellow = ask_config(stdin, Stone::Yellow)?;
    let red = ask_config(stdin, Stone::Red)?;

    let games = loop {
        let input = prompt(stdin, "Number of games > ")?;
        match input.parse::<usize>() {
            Ok(games) if games > 0 => break games,
            _ => println!("Invalid number: {}", input),
        }
    };

    let stats = Tournament::new(yellow, red, games).with_progress().run()?;
    println!("Yellow: {}, Red: {}\n", yellow, red);
    println!("{}", stats);
    Ok(())
}

fn ask_player(stdin: &Stdin, player: Stone) -> Result<Option<BotConfig>> {
    let question = format!("Is {} AI controlled? y/n: ", player.name());
    if ask_yes_no(stdin, &question)? {
        Ok(Some(ask_config(stdin, player)?))
    } else {
        Ok(None)
    }
}

fn ask_config(stdin: &Stdin, player: Stone) -> Result<BotConfig> {
    loop {
        let question = format!(
            "Search mode for {} (random, minimax[:depth], minimax-alphabeta[:depth]) [{}]: ",
            player.name(),
            BotConfig::default()
        );
        let input = prompt(stdin, &question)?;
        if input.is_empty() {
            return Ok(BotConfig::default());
        }
        match input.parse::<BotConfig>() {
            Ok(config) => return Ok(config),
            Err(err) => println!("{}", err),
        }
    }
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        match prompt(stdin, question)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn prompt(stdin: &Stdin, text: &str) -> Result<String> {
    print!("{}", text);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_string())
}
