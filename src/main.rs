//! Lane Duel - command line front end
//!
//! `duel play` pits a human on stdin against an AI opponent, `duel simulate`
//! runs AI-vs-AI batches and `duel cards` lists the card database.

use clap::{Parser, Subcommand, ValueEnum};
use lane_duel::{
    config::RulesConfig,
    core::{Card, Difficulty, Player, Seat},
    error::ActionError,
    game::{
        AiController, GameController, GameEndReason, GameLogger, GameLoop, GameStateView, HumanInput,
        OutputFormat, PlayIntent, SeatDriver, VerbosityLevel,
    },
    loader::{create_ai_opponent, starter_deck, CardDatabase, DeckList, PlayerSnapshot},
    tournament::{run_simulation, SimulationConfig},
    zones::Field,
    Result,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Lane Duel - a three-lane card battler", long_about = None)]
struct Cli {
    /// Card database (JSON); defaults to the bundled set
    #[arg(long, global = true, value_name = "CARDS_JSON")]
    cards: Option<PathBuf>,

    /// Rules configuration (JSON); defaults to the standard rules
    #[arg(long, global = true, value_name = "CONFIG_JSON")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match against the AI from the terminal
    Play {
        /// Opponent difficulty (easy, normal, hard)
        #[arg(long, short = 'd', default_value = "normal")]
        difficulty: Difficulty,

        /// Player save file; created on first run
        #[arg(long, default_value = "data/player_data.json")]
        save: PathBuf,

        /// Play with this deck list instead of the saved deck
        #[arg(long, value_name = "DECK_FILE")]
        deck: Option<PathBuf>,

        /// Name for a new player
        #[arg(long, default_value = "Player")]
        name: String,

        /// Set random seed for deterministic testing
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityLevel,

        /// Log format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Run AI-vs-AI matches and report statistics
    Simulate {
        /// Number of matches
        #[arg(long, short = 'n', default_value = "100")]
        games: usize,

        /// Difficulty of the AI in the first seat
        #[arg(long, default_value = "normal")]
        player: Difficulty,

        /// Difficulty of the AI in the second seat
        #[arg(long, default_value = "normal")]
        opponent: Difficulty,

        /// Base seed; each match derives its own
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the card database
    Cards {
        /// Only show one rarity
        #[arg(long)]
        rarity: Option<lane_duel::core::Rarity>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let db = match &cli.cards {
        Some(path) => CardDatabase::load_from_file(path)?,
        None => CardDatabase::builtin()?,
    };
    let rules = match &cli.config {
        Some(path) => RulesConfig::load_from_file(path)?,
        None => RulesConfig::default(),
    };

    match cli.command {
        Commands::Play {
            difficulty,
            save,
            deck,
            name,
            seed,
            verbosity,
            format,
        } => run_play(&db, rules, difficulty, &save, deck, name, seed, verbosity, format.into()),
        Commands::Simulate {
            games,
            player,
            opponent,
            seed,
            json,
        } => {
            let config = SimulationConfig {
                games,
                player_difficulty: player,
                opponent_difficulty: opponent,
                seed,
                rules,
            };
            println!("=== Lane Duel - Simulation ({player} vs {opponent}, seed {seed}) ===\n");
            let stats = run_simulation(&db, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{stats}");
            }
            Ok(())
        }
        Commands::Cards { rarity } => {
            for (id, def) in db.iter_sorted() {
                if rarity.map_or(true, |r| r == def.rarity) {
                    println!(
                        "{:<16} {:<18} {:<9} cost {}  atk {}  hp {}",
                        id.as_str(),
                        def.name,
                        def.rarity.as_str(),
                        def.cost,
                        def.attack,
                        def.hp
                    );
                }
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_play(
    db: &CardDatabase,
    rules: RulesConfig,
    difficulty: Difficulty,
    save: &Path,
    deck: Option<PathBuf>,
    name: String,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    format: OutputFormat,
) -> Result<()> {
    rules.validate()?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha12Rng::seed_from_u64(seed);

    let mut player = if PlayerSnapshot::exists(save) {
        PlayerSnapshot::load_from_file(save)?.restore(db)
    } else {
        Player::with_rules(name, starter_deck(db, &mut rng), &rules)
    };
    if let Some(path) = deck {
        player.deck = DeckList::load_from_file(path)?.build_strict(db)?;
    }
    for issue in player.deck.validate(&rules) {
        eprintln!("Warning: {issue}");
    }
    let snapshot = PlayerSnapshot::from_player(&player);

    let opponent = create_ai_opponent(db, difficulty, &rules, &mut rng);
    let ai = AiController::for_difficulty(difficulty, &mut rng);

    let mut logger = GameLogger::with_verbosity(verbosity);
    logger.set_output_format(format);
    let mut controller = GameController::new(player, opponent, rules, seed).with_logger(logger);

    println!(
        "=== Lane Duel - {} vs {} (seed {seed}) ===",
        controller.state().player().name,
        controller.state().opponent().name
    );
    println!("Commands: `play <card> <lane>`, `end`, `help`\n");

    let mut input = StdinInput::default();
    let result = {
        let mut game_loop = GameLoop::new(&mut controller);
        game_loop.run_match(&mut SeatDriver::Human(&mut input), &mut SeatDriver::Ai(ai))?
    };

    match result.end_reason {
        GameEndReason::PlayerDeath(Seat::Player) => {
            println!("\nVictory! +{} credits", result.credits_awarded);
        }
        GameEndReason::PlayerDeath(Seat::Opponent) => println!("\nDefeat."),
        GameEndReason::Draw => println!("\nDraw."),
        GameEndReason::TurnLimit | GameEndReason::Manual => {
            println!("\nNo winner after {} turns.", result.turns_played)
        }
    }

    // Save the pre-match deck; only credits change from a match
    let mut snapshot = snapshot;
    snapshot.credits = controller.state().player().credits;
    snapshot.save_to_file(save)?;
    println!("Progress saved to {}", save.display());
    Ok(())
}

/// Human input read from stdin
#[derive(Default)]
struct StdinInput {
    eof: bool,
}

impl StdinInput {
    fn render(view: &GameStateView) {
        println!();
        println!(
            "Turn {} | You: {} hp, {} energy, {} in deck | Opponent: {} hp",
            view.turn_number(),
            view.health(),
            view.energy(),
            view.deck_size(),
            view.opponent_health()
        );
        println!("  Opponent field: {}", render_field(view.opponent_field()));
        println!("  Your field:     {}", render_field(view.field()));
        println!("  Hand:");
        for (i, card) in view.hand().iter().enumerate() {
            let marker = if card.cost <= view.energy() { ' ' } else { 'x' };
            println!("   {marker}{}. {}", i + 1, render_card(card));
        }
    }

    fn read_line(&mut self) -> Option<String> {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.eof = true;
                None
            }
            Ok(_) => Some(line),
        }
    }
}

fn render_card(card: &Card) -> String {
    format!("{} ({}) cost {} atk {} hp {}", card.name, card.rarity, card.cost, card.attack, card.hp)
}

fn render_field(field: &Field) -> String {
    field
        .slots()
        .iter()
        .enumerate()
        .map(|(lane, slot)| match slot {
            Some(card) => format!("[{}: {} {}/{}]", lane + 1, card.name, card.attack, card.hp),
            None => format!("[{}: empty]", lane + 1),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse `play <card> <lane>` with 1-based numbers
fn parse_play(args: &[&str]) -> Option<PlayIntent> {
    let hand_index = args.first()?.parse::<usize>().ok()?.checked_sub(1)?;
    let field_index = args.get(1)?.parse::<usize>().ok()?.checked_sub(1)?;
    Some(PlayIntent::Play {
        hand_index,
        field_index,
    })
}

impl HumanInput for StdinInput {
    fn choose_play(&mut self, view: &GameStateView) -> PlayIntent {
        if self.eof {
            return PlayIntent::EndPhase;
        }
        Self::render(view);

        loop {
            let Some(line) = self.read_line() else {
                return PlayIntent::EndPhase;
            };
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                ["end"] | ["e"] => return PlayIntent::EndPhase,
                ["play" | "p", args @ ..] => match parse_play(args) {
                    Some(intent) => return intent,
                    None => println!("Usage: play <card> <lane>  (e.g. `play 2 1`)"),
                },
                ["help"] | ["h"] | [] => {
                    println!("  play <card> <lane>  place a card from your hand (numbers as shown)");
                    println!("  end                 finish your play phase and attack");
                }
                _ => println!("Unknown command; type `help`"),
            }
        }
    }

    fn on_rejected(&mut self, _view: &GameStateView, error: &ActionError) {
        println!("  Can't do that: {error}");
    }

    fn on_game_end(&mut self, view: &GameStateView, won: bool) {
        let outcome = if won { "won" } else { "did not win" };
        println!("\nYou {outcome} with {} health left.", view.health());
    }
}
