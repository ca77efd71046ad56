mod driver;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use fable_core::{ALL_CATEGORIES, Category, SentenceGenerator};
use fable_stats::{DriverConfig, FileLexicon};

use driver::{best_candidate, punctuate};

#[derive(Parser)]
#[command(name = "fable", about = "Dependency-grammar sentence synthesizer")]
struct Cli {
    /// Data directory with statistics and lexicon files
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a sentence around an English word
    Tell {
        /// Word the sentence must contain
        word: String,
    },

    /// Build a sentence from a part-of-speech tag
    Pos {
        /// Universal Dependencies tag, e.g. NOUN or VERB
        category: String,
    },

    /// Show statistics and lexicon summary
    Stats {
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data
        .clone()
        .or_else(|| std::env::var("FABLE_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn make_rng(cli: &Cli) -> SmallRng {
    match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Tell { word } => cmd_tell(&cli, word),
        Commands::Pos { category } => cmd_pos(&cli, category),
        Commands::Stats { json } => cmd_stats(&cli, *json),
    }
}

struct Loaded {
    tables: fable_core::StatisticsTables,
    lexicon: FileLexicon,
    config: DriverConfig,
}

fn load(cli: &Cli) -> Result<Loaded> {
    let dir = data_dir(cli);
    let tables = fable_stats::load_tables(&dir)
        .with_context(|| format!("failed to load statistics from {}", dir.display()))?;
    let lexicon = FileLexicon::load(&dir)
        .with_context(|| format!("failed to load lexicon from {}", dir.display()))?;
    let config = DriverConfig::load(&dir)
        .with_context(|| format!("failed to load fable.toml from {}", dir.display()))?;
    Ok(Loaded {
        tables,
        lexicon,
        config,
    })
}

fn report(sentence: &fable_core::Sentence, verbose: bool) {
    println!("{}", punctuate(sentence));
    if verbose {
        let tags: Vec<&str> = sentence.categories.iter().map(Category::as_str).collect();
        eprintln!("--- categories: {} ---", tags.join(" "));
        eprintln!("--- score: {:.4} ---", sentence.score);
    }
}

fn cmd_tell(cli: &Cli, word: &str) -> Result<()> {
    let loaded = load(cli)?;
    let Some(category) = loaded.lexicon.category_of(word) else {
        bail!("don't know the word '{word}'; try another one");
    };

    let generator = SentenceGenerator::new(&loaded.tables, &loaded.lexicon);
    let mut rng = make_rng(cli);
    let Some(mut sentence) = best_candidate(
        &generator,
        category,
        Some(category),
        loaded.config.tell.into(),
        &mut rng,
    ) else {
        bail!("no sentence found for '{word}'; try another word");
    };
    sentence.substitute_first(category, word);
    report(&sentence, cli.verbose);
    Ok(())
}

fn cmd_pos(cli: &Cli, category: &str) -> Result<()> {
    let parsed = Category::from_name(&category.to_uppercase());
    if parsed.is_none() {
        let tags: Vec<&str> = ALL_CATEGORIES.iter().map(Category::as_str).collect();
        bail!("unknown tag '{category}'; expected one of: {}", tags.join(", "));
    }

    let loaded = load(cli)?;
    let generator = SentenceGenerator::new(&loaded.tables, &loaded.lexicon);
    let mut rng = make_rng(cli);
    let Some(sentence) = best_candidate(
        &generator,
        parsed,
        None,
        loaded.config.pos.into(),
        &mut rng,
    ) else {
        bail!("no sentence found from tag '{category}'; try another tag");
    };
    report(&sentence, cli.verbose);
    Ok(())
}

#[derive(Serialize)]
struct StatsSummary {
    categories: usize,
    relations: usize,
    words: usize,
}

fn cmd_stats(cli: &Cli, json: bool) -> Result<()> {
    let loaded = load(cli)?;
    let summary = StatsSummary {
        categories: loaded.tables.categories().count(),
        relations: loaded.tables.relations().count(),
        words: loaded.lexicon.word_count(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("categories: {}", summary.categories);
        println!("relations:  {}", summary.relations);
        println!("words:      {}", summary.words);
    }
    Ok(())
}
