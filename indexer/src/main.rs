use anyhow::{Context, Result};
use chat_core::corpus::load_corpus;
use chat_core::persist::{load_index, save_index, IndexPaths};
use chat_core::{build, respond, BuildConfig, IdfScheme, MatchConfig, StopWords, TfScheme, TokenizerConfig, WeightingConfig, DEFAULT_FALLBACK, DEFAULT_THRESHOLD};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the TF-IDF reply index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Idf {
    /// ln((1 + N) / (1 + df)) + 1
    Smooth,
    /// ln(N / df)
    Raw,
}

#[derive(Clone, Copy, ValueEnum)]
enum StopList {
    English,
    None,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a JSON/JSONL corpus file or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long, default_value = "./data/orbitx.json")]
        input: String,
        /// Output index directory
        #[arg(long, default_value = "./index")]
        output: String,
        #[arg(long, value_enum, default_value_t = Idf::Smooth)]
        idf: Idf,
        /// Use 1 + ln(tf) instead of raw term counts
        #[arg(long, default_value_t = false)]
        sublinear_tf: bool,
        /// Stem terms with the English Snowball stemmer
        #[arg(long, default_value_t = false)]
        stem: bool,
        #[arg(long, value_enum, default_value_t = StopList::English)]
        stop_words: StopList,
        /// File with one stop word per line; replaces --stop-words
        #[arg(long)]
        stop_words_file: Option<String>,
    },
    /// Answer one query against a built index
    Query {
        #[arg(long, default_value = "./index")]
        index: String,
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f32,
        text: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, idf, sublinear_tf, stem, stop_words, stop_words_file } => {
            let stop_words = match stop_words_file {
                Some(path) => {
                    let text = std::fs::read_to_string(&path).with_context(|| format!("reading stop words from {path}"))?;
                    StopWords::custom(text.lines())
                }
                None => match stop_words {
                    StopList::English => StopWords::English,
                    StopList::None => StopWords::None,
                },
            };
            let config = BuildConfig {
                tokenizer: TokenizerConfig { stop_words, stem },
                weighting: WeightingConfig {
                    idf: match idf {
                        Idf::Smooth => IdfScheme::Smooth,
                        Idf::Raw => IdfScheme::Raw,
                    },
                    tf: if sublinear_tf { TfScheme::Sublinear } else { TfScheme::Raw },
                },
            };
            build_index(&input, &output, &config)
        }
        Commands::Query { index, threshold, text } => query_index(&index, threshold, &text),
    }
}

fn build_index(input: &str, output: &str, config: &BuildConfig) -> Result<()> {
    let corpus = load_corpus(input)?;
    tracing::info!(num_docs = corpus.len(), input, "ingested documents");

    let index = build(&corpus, config).with_context(|| format!("building index from {input}"))?;
    save_index(&IndexPaths::new(output), &index)?;

    tracing::info!(output, "index build complete");
    Ok(())
}

fn query_index(dir: &str, threshold: f32, text: &str) -> Result<()> {
    let index = load_index(&IndexPaths::new(dir))?
        .with_context(|| format!("no index in {dir}; run `indexer build` first"))?;
    let config = MatchConfig::new(threshold, DEFAULT_FALLBACK)?;
    let reply = respond(&index, text, &config);
    match reply.matched {
        Some(m) => tracing::info!(doc = m.doc, score = m.score, "matched"),
        None => tracing::info!("no confident match, using fallback"),
    }
    println!("{}", reply.text);
    Ok(())
}
