use chrono::prelude::*;
use std::error::Error;
use std::{
    io::Write,
    path::Path,
    time::{Instant, SystemTime},
};

use delspell::dictionary::{load_dictionary, DictionaryFormat};
use delspell::index::{build_index, DictionaryEntry, IndexConfig};
use delspell::speller::suggestion::Suggestion;
use delspell::speller::{Speller, SpellerConfig};
use delspell::tokenizer::normalize;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use structopt::clap::{App, AppSettings, Arg};

static CFG: SpellerConfig = SpellerConfig::default();

fn load_words(
    path: &str,
    max_words: Option<usize>,
) -> Result<Vec<(String, String)>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(rdr
        .records()
        .filter_map(Result::ok)
        .filter_map(|r| {
            r.get(0)
                .and_then(|x| r.get(1).map(|y| (x.to_string(), y.to_string())))
        })
        .take(max_words.unwrap_or(std::usize::MAX))
        .collect())
}

/// Suggestions hold normalized terms, so the expected word is compared the same way.
fn hit_position(suggestions: &[Suggestion], expected: &str) -> Option<usize> {
    let expected = normalize(expected);
    suggestions.iter().position(|x| x.value == expected)
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let ms = self.secs * 1000 + (self.subsec_nanos as u64 / 1_000_000);
        write!(f, "{}ms", ms)
    }
}

impl From<std::time::Duration> for Time {
    fn from(d: std::time::Duration) -> Time {
        Time {
            secs: d.as_secs(),
            subsec_nanos: d.subsec_nanos(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AccuracyResult<'a> {
    input: &'a str,
    expected: &'a str,
    distance: usize,
    suggestions: Vec<Suggestion>,
    position: Option<usize>,
    time: Time,
}

#[derive(Debug, Serialize)]
struct DictionaryInfo<'a> {
    path: &'a str,
    terms: usize,
    skipped: usize,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    dictionary: DictionaryInfo<'a>,
    config: &'a SpellerConfig,
    summary: Summary,
    results: Vec<AccuracyResult<'a>>,
    start_timestamp: Time,
    total_time: Time,
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    first_position: u32,
    top_five: u32,
    any_position: u32,
    no_suggestions: u32,
    only_wrong: u32,
    slowest_lookup: Time,
    fastest_lookup: Time,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let percent =
            |v: u32| -> String { format!("{:.2}%", v as f32 / self.total_words as f32 * 100f32) };

        write!(
            f,
            "[#1] {} [^5] {} [any] {} [none] {} [wrong] {} [fast] {} [slow] {}",
            percent(self.first_position),
            percent(self.top_five),
            percent(self.any_position),
            percent(self.no_suggestions),
            percent(self.only_wrong),
            self.fastest_lookup,
            self.slowest_lookup
        )
    }
}

impl Summary {
    fn new<'a>(results: &[AccuracyResult<'a>]) -> Summary {
        let mut summary = Summary::default();

        results.iter().for_each(|result| {
            summary.total_words += 1;

            if let Some(position) = result.position {
                summary.any_position += 1;

                if position == 0 {
                    summary.first_position += 1;
                }

                if position < 5 {
                    summary.top_five += 1;
                }
            } else if result.suggestions.is_empty() {
                summary.no_suggestions += 1;
            } else {
                summary.only_wrong += 1;
            }
        });

        if let Some(v) = results.iter().map(|x| x.time).max() {
            summary.slowest_lookup = v;
        }
        if let Some(v) = results.iter().map(|x| x.time).min() {
            summary.fastest_lookup = v;
        }

        summary
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let matches = App::new("delspell-accuracy")
        .setting(AppSettings::ArgRequiredElseHelp)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accuracy testing for delspell.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .takes_value(true)
                .help("Provide JSON config file to override test defaults"),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("The 'input -> expected' list in tab-delimited value file (TSV)"),
        )
        .arg(
            Arg::with_name("dictionary")
                .value_name("DICTIONARY")
                .help("Use the given 'term count' frequency dictionary"),
        )
        .arg(
            Arg::with_name("json-output")
                .short("o")
                .value_name("JSON-OUTPUT")
                .help("The file path for the JSON report output"),
        )
        .arg(
            Arg::with_name("tsv-output")
                .short("t")
                .value_name("TSV-OUTPUT")
                .help("The file path for the TSV line append"),
        )
        .arg(
            Arg::with_name("max-words")
                .short("w")
                .takes_value(true)
                .help("Truncate typos list to max number of words specified"),
        )
        .get_matches();

    let cfg: SpellerConfig = match matches.value_of("config") {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(file)?
        }
        None => CFG.clone(),
    };

    let dictionary_path = match matches.value_of("dictionary") {
        Some(path) => path,
        None => {
            eprintln!("No dictionary found for given path; aborting.");
            std::process::exit(1);
        }
    };

    let entries = load_dictionary(Path::new(dictionary_path), &DictionaryFormat::default())?;
    let build = build_index(
        entries.into_iter().map(DictionaryEntry::into_pair),
        IndexConfig {
            max_edit_distance: cfg.max_edit_distance,
        },
    )?;
    let index = build.index;

    let words = match matches.value_of("words") {
        Some(path) => load_words(
            path,
            matches
                .value_of("max-words")
                .and_then(|x| x.parse::<usize>().ok()),
        )?,
        None => {
            eprintln!("No word list for given path; aborting.");
            std::process::exit(1);
        }
    };

    if words.is_empty() {
        eprintln!("Word list is empty; aborting.");
        std::process::exit(1);
    }

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|(input, expected)| {
            let now = Instant::now();
            let suggestions = index.suggest_with_config(input, &cfg);
            let time = Time::from(now.elapsed());

            let position = hit_position(&suggestions, expected);

            let distance = strsim::levenshtein(input, expected);
            AccuracyResult {
                input,
                expected,
                distance,
                time,
                suggestions,
                position,
            }
        })
        .collect::<Vec<_>>();

    let total_time = Time::from(start_time.elapsed());
    let start_timestamp = Time::from(SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?);

    let summary = Summary::new(&results);
    println!("{}", summary);

    if let Some(path) = matches.value_of("json-output") {
        let output = std::fs::File::create(path)?;
        let report = Report {
            dictionary: DictionaryInfo {
                path: dictionary_path,
                terms: index.len(),
                skipped: build.report.skipped_count(),
            },
            config: &cfg,
            summary,
            results,
            start_timestamp,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    } else if let Some(path) = matches.value_of("tsv-output") {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let md = output.metadata()?;
        if md.len() == 0 {
            // new file, write headers:
            output.write_all(b"date\tdictionary\ttop1\ttop5\tworse\tno suggs\twrong suggs\n")?;
        }
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            Local::now().to_rfc3339(),
            dictionary_path,
            summary.first_position,
            summary.top_five,
            summary.any_position,
            summary.no_suggestions,
            summary.only_wrong
        )?;
    };

    println!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestions() -> Vec<Suggestion> {
        vec![
            Suggestion::new("hello".into(), 1, 100),
            Suggestion::new("help".into(), 1, 50),
        ]
    }

    #[test]
    fn expected_word_is_normalized() {
        assert_eq!(hit_position(&suggestions(), "help"), Some(1));
        assert_eq!(hit_position(&suggestions(), "Hello"), Some(0));
        assert_eq!(hit_position(&suggestions(), "Help!"), Some(1));
        assert_eq!(hit_position(&suggestions(), "world"), None);
    }
}
