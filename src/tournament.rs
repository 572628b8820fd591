//! Computer vs computer matches and their statistics

use anyhow::{anyhow, Result};
use indicatif::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use std::fmt;
use std::time::Instant;

use crate::{BotConfig, GameState, Heuristic, Searcher, Stone, HEIGHT, WIDTH};

/// The result of one finished match
#[derive(Clone, Debug, PartialEq)]
pub struct MatchRecord {
    pub yellow: BotConfig,
    pub red: BotConfig,
    /// `None` for a draw
    pub winner: Option<Stone>,
    /// Total stones played by both players
    pub turns: usize,
    /// Columns played, in order, starting with Yellow's first move
    pub moves: Vec<usize>,
}

/// Plays one game between two computer players on the standard board
///
/// Yellow moves first. All tie breaks of both players are drawn from `rng`.
pub fn play_match<R: Rng>(yellow: BotConfig, red: BotConfig, rng: R) -> Result<MatchRecord> {
    let mut searcher = Searcher::with_parts(Heuristic, rng);
    let mut state = GameState::default();
    let mut moves = Vec::with_capacity(WIDTH * HEIGHT);

    while !state.is_terminal() {
        let config = if state.current_player() == Stone::Yellow {
            yellow
        } else {
            red
        };
        let column = searcher
            .choose(&state, config)
            .ok_or_else(|| anyhow!("no move found in a running game"))?;
        state = state.generate_successor(column)?;
        moves.push(column);
    }

    Ok(MatchRecord {
        yellow,
        red,
        winner: state.winner(),
        turns: state.turns(),
        moves,
    })
}

/// A series of independent matches between the same two players
///
/// Matches run in parallel, each on its own random source. With a seed set
/// the whole series is reproducible.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub yellow: BotConfig,
    pub red: BotConfig,
    pub games: usize,
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Tournament {
    pub fn new(yellow: BotConfig, red: BotConfig, games: usize) -> Self {
        Self {
            yellow,
            red,
            games,
            seed: None,
            show_progress: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Plays every match and returns the records in match order
    pub fn play(&self) -> Result<Vec<MatchRecord>> {
        let start = Instant::now();
        let seed = self.seed.unwrap_or_else(rand::random);
        tracing::info!(
            yellow = %self.yellow,
            red = %self.red,
            games = self.games,
            seed,
            "tournament started"
        );

        let progress = if self.show_progress {
            ProgressBar::new(self.games as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing matches: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let records = (0..self.games)
            .into_par_iter()
            .map(|game| {
                let rng = StdRng::seed_from_u64(seed.wrapping_add(game as u64));
                let record = play_match(self.yellow, self.red, rng);
                progress.inc(1);
                record
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish_and_clear();

        tracing::info!(
            games = records.len(),
            elapsed_s = start.elapsed().as_secs_f64(),
            "tournament finished"
        );
        Ok(records)
    }

    /// Plays every match and summarises the results
    pub fn run(&self) -> Result<TournamentStats> {
        Ok(TournamentStats::from_records(&self.play()?))
    }
}

/// Win, loss and length statistics over a set of matches
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TournamentStats {
    pub games: usize,
    pub yellow_wins: usize,
    pub red_wins: usize,
    pub draws: usize,
    pub total_turns: usize,
}

impl TournamentStats {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.games += 1;
            stats.total_turns += record.turns;
            match record.winner {
                Some(Stone::Yellow) => stats.yellow_wins += 1,
                Some(Stone::Red) => stats.red_wins += 1,
                _ => stats.draws += 1,
            }
        }
        stats
    }

    pub fn wins(&self, player: Stone) -> usize {
        match player {
            Stone::Yellow => self.yellow_wins,
            Stone::Red => self.red_wins,
            Stone::Empty => 0,
        }
    }

    pub fn losses(&self, player: Stone) -> usize {
        match player {
            Stone::Empty => 0,
            _ => self.wins(player.opponent()),
        }
    }

    /// Fraction of all games won by `player`, 0 when no games were played
    pub fn win_ratio(&self, player: Stone) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(player) as f64 / self.games as f64
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }
}

impl fmt::Display for TournamentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Player | Wins | Losses | Draws | Win-Ratio | Avg. Turns |")?;
        writeln!(f, "+--------+------+--------+-------+-----------+------------+")?;
        for &player in [Stone::Yellow, Stone::Red].iter() {
            writeln!(
                f,
                "| {:<6} | {:<4} | {:<6} | {:<5} | {:<8.0}% | {:<10.1} |",
                player.name(),
                self.wins(player),
                self.losses(player),
                self.draws,
                self.win_ratio(player) * 100.0,
                self.average_turns()
            )?;
        }
        Ok(())
    }
}
