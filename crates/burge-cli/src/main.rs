//! Command-line front end for the burge investigator engine.
//!
//! Each invocation runs one command against one owner's record.

mod commands;

use std::path::PathBuf;
use std::process;

use burge_mechanics::Difficulty;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "burge",
    about = "burge: percentile investigator sheets, checks, sessions and advancement",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding character records
    #[arg(
        short,
        long,
        global = true,
        env = "BURGE_CHARACTER_DIR",
        default_value = "data/characters"
    )]
    dir: PathBuf,

    /// Owner whose character the command acts on
    #[arg(long, global = true, env = "BURGE_OWNER", default_value = "default")]
    owner: String,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new investigator
    Create {
        /// Investigator name
        name: String,

        /// Occupation
        #[arg(long)]
        occupation: Option<String>,
    },

    /// Show the character sheet
    Sheet,

    /// Set all eight characteristics: STR CON DEX SIZ POW APP INT EDU
    Stats {
        /// Eight values, 1-99 each
        #[arg(num_args = 8, required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },

    /// Set a characteristic or resource (e.g. `STR 55`, `hp -3`, `san -1d6`, `mp max`)
    Set {
        /// Characteristic (STR..EDU) or resource (hp, mp, san, luck, xp)
        key: String,

        /// Absolute value, +/- delta, `max`, or +/- dice
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set a skill value
    Skill {
        /// Skill name or alias
        name: String,

        /// Value, 0-99
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// List stored skills
    Skills,

    /// Roll a check against a skill or characteristic
    Roll {
        /// Skill name, alias, or characteristic (STR..EDU)
        target: String,

        /// Bonus/penalty dice, e.g. `+1` or `-2`
        #[arg(allow_hyphen_values = true)]
        modifier: Option<String>,

        /// regular, hard or extreme
        #[arg(long, default_value = "regular")]
        difficulty: Difficulty,
    },

    /// Roll arbitrary dice, e.g. `3d6`, `1d100+5`, `2d20kh1`
    Dice {
        /// Dice notation
        notation: String,
    },

    /// Mark a skill for advancement
    Check {
        /// Skill name or alias
        name: String,
    },

    /// Roll advancement for every checked skill
    Advance,

    /// Spend XP to raise an eligible skill
    Spend {
        /// Skill name or alias
        name: String,

        /// Points to add
        #[arg(default_value = "1")]
        amount: i32,
    },

    /// Save the session: version the record and archive pending changes
    Save {
        /// Session note
        #[arg(trailing_var_arg = true)]
        note: Vec<String>,
    },

    /// Show saved sessions, newest first
    History {
        /// Number of sessions to show
        #[arg(short, long, default_value = "5")]
        count: usize,
    },

    /// Set, clear or toggle the major wound condition
    Wound {
        /// on, off, or toggle
        #[arg(default_value = "toggle")]
        state: String,
    },

    /// Import a Dhole's House JSON export
    Import {
        /// Path to the exported file
        file: PathBuf,
    },

    /// Export to Dhole's House JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete the character; run again with `confirm` within the window
    Delete {
        /// Confirmation word
        token: Option<String>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burge=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let ctx = Context::new(cli.dir, cli.owner, cli.seed);

    let result = match cli.command {
        Commands::Create { name, occupation } => {
            commands::sheet::create(&ctx, &name, occupation.as_deref())
        }
        Commands::Sheet => commands::sheet::show(&ctx),
        Commands::Stats { values } => commands::sheet::stats(&ctx, &values),
        Commands::Set { key, value } => commands::sheet::set(&ctx, &key, &value),
        Commands::Skill { name, value } => commands::sheet::skill(&ctx, &name, value),
        Commands::Skills => commands::sheet::skills(&ctx),
        Commands::Roll {
            target,
            modifier,
            difficulty,
        } => commands::roll::check(&ctx, &target, modifier.as_deref(), difficulty),
        Commands::Dice { notation } => commands::roll::dice(&ctx, &notation),
        Commands::Check { name } => commands::session::check(&ctx, &name),
        Commands::Advance => commands::session::advance(&ctx),
        Commands::Spend { name, amount } => commands::session::spend(&ctx, &name, amount),
        Commands::Save { note } => commands::session::save(&ctx, &note.join(" ")),
        Commands::History { count } => commands::session::history(&ctx, count),
        Commands::Wound { state } => commands::sheet::wound(&ctx, &state),
        Commands::Import { file } => commands::transfer::import(&ctx, &file),
        Commands::Export { output } => commands::transfer::export(&ctx, output.as_deref()),
        Commands::Delete { token } => commands::delete::run(&ctx, token.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
