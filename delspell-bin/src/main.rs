use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use gumdrop::Options;
use serde::Serialize;

use delspell::corrector::{correct_with_config, Correction, CorrectorConfig};
use delspell::dictionary::{load_dictionary, DictionaryFormat};
use delspell::index::{build_index, DeletionIndex, DictionaryEntry, IndexConfig};
use delspell::speller::suggestion::Suggestion;
use delspell::speller::{Speller, SpellerConfig, Verbosity};
use delspell::tokenizer::{normalize, Tokenize};

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        for sugg in suggestions {
            println!("{}\t\t{}\t{}", sugg.value, sugg.distance, sugg.frequency);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        if let Some(last) = self.results.last_mut() {
            last.suggestions = suggestions.to_vec();
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn run(
    speller: &dyn Speller,
    words: Vec<String>,
    writer: &mut dyn OutputWriter,
    is_always_suggesting: bool,
    suggest_cfg: &SpellerConfig,
) {
    for word in words {
        let is_correct = speller.is_correct(&word);
        writer.write_correction(&word, is_correct);

        if is_always_suggesting || !is_correct {
            let suggestions = speller.suggest_with_config(&word, suggest_cfg);
            writer.write_suggestions(&word, &suggestions);
        }
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "get suggestions for provided input")]
    Suggest(SuggestArgs),

    #[options(help = "correct provided text token by token")]
    Correct(CorrectArgs),

    #[options(help = "print input in whitespace-tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "dictionary file with one term and count per line", required)]
    dictionary: PathBuf,

    #[options(no_short, help = "zero-based column of the term (default 0)")]
    term_column: Option<usize>,

    #[options(no_short, help = "zero-based column of the count (default 1)")]
    count_column: Option<usize>,

    #[options(no_short, help = "column separator character (default space)")]
    separator: Option<char>,

    #[options(no_short, help = "edit distance precomputed for the dictionary (default 2)")]
    max_dictionary_distance: Option<usize>,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(short = "m", help = "maximum edit distance of suggestions")]
    max_distance: Option<usize>,

    #[options(short = "v", help = "which suggestions to show: top, closest or all")]
    verbosity: Option<Verbosity>,

    #[options(help = "maximum number of results")]
    nbest: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct CorrectArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "dictionary file with one term and count per line", required)]
    dictionary: PathBuf,

    #[options(no_short, help = "zero-based column of the term (default 0)")]
    term_column: Option<usize>,

    #[options(no_short, help = "zero-based column of the count (default 1)")]
    count_column: Option<usize>,

    #[options(no_short, help = "column separator character (default space)")]
    separator: Option<char>,

    #[options(no_short, help = "edit distance precomputed for the dictionary (default 2)")]
    max_dictionary_distance: Option<usize>,

    #[options(short = "m", help = "maximum edit distance of corrections")]
    max_distance: Option<usize>,

    #[options(
        no_short,
        long = "preserve-surface",
        help = "keep punctuation and casing of corrected tokens"
    )]
    preserve_surface: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be corrected")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show lookup keys instead of tokens")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn dictionary_format(
    term_column: Option<usize>,
    count_column: Option<usize>,
    separator: Option<char>,
) -> anyhow::Result<DictionaryFormat> {
    let mut format = DictionaryFormat::default();

    if let Some(v) = term_column {
        format.term_index = v;
    }

    if let Some(v) = count_column {
        format.count_index = v;
    }

    if let Some(v) = separator {
        if !v.is_ascii() {
            bail!("Separator must be a single ASCII character, got {:?}", v);
        }
        format.separator = v as u8;
    }

    Ok(format)
}

fn load_index(
    path: &Path,
    format: &DictionaryFormat,
    max_dictionary_distance: Option<usize>,
) -> anyhow::Result<DeletionIndex> {
    let mut config = IndexConfig::default();
    if let Some(v) = max_dictionary_distance {
        config.max_edit_distance = v;
    }

    let entries = load_dictionary(path, format)?;
    let build = build_index(entries.into_iter().map(DictionaryEntry::into_pair), config)
        .with_context(|| format!("Failed to build index from {}", path.display()))?;

    for skipped in build.report.skipped.iter() {
        log::debug!("entry {} skipped: {}", skipped.position, skipped.error);
    }

    if build.report.skipped_count() > 0 {
        log::warn!(
            "{} of {} dictionary entries were skipped",
            build.report.skipped_count(),
            build.report.entries
        );
    }

    Ok(build.index)
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    for (index, token) in inputs.token_indices() {
        if args.is_words_only {
            println!("{:>4}: \"{}\"", index, normalize(token));
        } else {
            println!("{:>4}: \"{}\"", index, token);
        }
    }

    Ok(())
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut suggest_cfg = SpellerConfig::default();

    if let Some(v) = args.max_distance {
        suggest_cfg.max_edit_distance = v;
    }

    if let Some(v) = args.verbosity {
        suggest_cfg.verbosity = v;
    }

    if let Some(v) = args.nbest {
        if v == 0 {
            suggest_cfg.n_best = None;
        } else {
            suggest_cfg.n_best = Some(v);
        }
    }

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let words = if args.inputs.is_empty() {
        read_stdin()?
            .trim()
            .split('\n')
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
            .collect()
    } else {
        args.inputs
    };

    let format = dictionary_format(args.term_column, args.count_column, args.separator)?;
    let index = load_index(&args.dictionary, &format, args.max_dictionary_distance)?;

    run(
        &index,
        words,
        &mut *writer,
        args.always_suggest,
        &suggest_cfg,
    );

    writer.finish()
}

fn print_correction(correction: &Correction) {
    println!("Corrected text:");
    println!("{}", correction.text);
    println!();

    if correction.is_unchanged() {
        println!("No corrections were needed.");
        return;
    }

    println!("Corrections made:");
    let mut record = correction.record.iter().collect::<Vec<_>>();
    record.sort();
    for (original, corrected) in record {
        println!("'{}' -> '{}'", original, corrected);
    }
}

fn correct(args: CorrectArgs) -> anyhow::Result<()> {
    let mut config = CorrectorConfig::default();
    config.preserve_surface = args.preserve_surface;

    if let Some(v) = args.max_distance {
        config.max_edit_distance = v;
    }

    let text = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    let format = dictionary_format(args.term_column, args.count_column, args.separator)?;
    let index = load_index(&args.dictionary, &format, args.max_dictionary_distance)?;

    let correction = correct_with_config(&index, &text, &config);

    if args.use_json {
        println!("{}", serde_json::to_string_pretty(&correction)?);
    } else {
        print_correction(&correction);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => {
            eprintln!("{}", Args::usage());
            if let Some(commands) = Args::command_list() {
                eprintln!("\nAvailable commands:\n{}", commands);
            }
            Ok(())
        }
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Correct(args)) => correct(args),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
