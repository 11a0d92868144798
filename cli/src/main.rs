use anyhow::Result;
use bibdex_core::{
    persist, tokenizer, Collection, IndexOptions, InvertedIndex, QueryEngine, QueryResult,
    StopwordSet,
};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

const EXIT_SENTINEL: &str = "ZZEND";

#[derive(Parser)]
#[command(name = "bibdex")]
#[command(about = "Build a positional inverted index over a bibliographic collection and look up terms", long_about = None)]
struct Args {
    /// Collection file in .I/.T/.W marker format
    collection: PathBuf,
    /// Stopword list, one lowercase word per line
    #[arg(long, default_value = "common_words")]
    common_words: PathBuf,
    /// Remove stopwords at document and index level
    #[arg(long, default_value_t = false)]
    stopwords: bool,
    /// Stem terms at indexing and query time
    #[arg(long, default_value_t = false)]
    stemming: bool,
    /// Dictionary output file
    #[arg(long, default_value = "dictionary.txt")]
    dictionary: PathBuf,
    /// Postings output file
    #[arg(long, default_value = "postings.txt")]
    postings: PathBuf,
    /// Print one JSON object per query instead of plain text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let options = IndexOptions {
        stopwords_on: args.stopwords,
        stemming_on: args.stemming,
    };
    let stopwords = if args.stopwords {
        Some(StopwordSet::load(&args.common_words)?)
    } else {
        None
    };

    println!("Welcome to the inverted index term lookup system.");
    println!("Enter '{EXIT_SENTINEL}' to exit the program.");
    println!("Please wait while the index is created.");

    let started = Instant::now();
    let collection = Collection::load(&args.collection, &options, stopwords.as_ref())?;
    let index = InvertedIndex::build(&collection, &options, stopwords.as_ref());
    persist::write_dictionary(&index, &args.dictionary)?;
    persist::write_postings(&index, &collection, &args.postings)?;
    tracing::info!(
        documents = collection.len(),
        terms = index.num_terms(),
        took_s = started.elapsed().as_secs_f64(),
        "index ready"
    );
    let mut engine = QueryEngine::new(collection, index);

    println!("Please enter a term below to search the index:");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == EXIT_SENTINEL {
            break;
        }
        let term = tokenizer::normalize_query_term(input, &options);
        let result = engine.lookup(&term)?;
        if args.json {
            println!("{}", serde_json::to_string(&result)?);
        } else {
            print_result(&result);
        }
    }

    println!(
        "Average query time is: {} seconds.",
        engine.average_query_time().as_secs_f64()
    );
    Ok(())
}

fn print_result(result: &QueryResult) {
    if result.hits.is_empty() {
        println!("Term not found.");
        println!();
    } else {
        for hit in &result.hits {
            println!();
            println!("Term: {}", result.term);
            println!("Document ID: {}", hit.doc_id);
            println!("Title: {}", hit.title);
            println!("Frequency: {}", hit.frequency);
            println!("Occurs in position(s):");
            println!(
                "{}",
                hit.positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!();
        }
        println!("{} occurs in {} document(s).", result.term, result.hits.len());
    }
    println!("Query took {} seconds.", result.took_s);
    println!();
}
