// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use ppat::app_config::{self, Config};
use ppat::app_controller::{Controller, Lookup};
use ppat::file_utils::FileManager;
use ppat::TransliterationRecord;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read names from a `> ` prompt (default command)
    Interactive,

    /// Transliterate the given names and exit
    Translate {
        /// Names to transliterate
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,

        /// Language codes (default: all loaded languages)
        #[arg(short, long, num_args = 1..)]
        languages: Vec<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transliterate a word list, one name per line
    Batch {
        /// Word list file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write the results as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language codes (default: all loaded languages)
        #[arg(short, long, num_args = 1..)]
        languages: Vec<String>,
    },

    /// List the loaded rule languages
    Languages,

    /// Compile a rule file or directory and report errors
    Check {
        /// Rule file or directory (default: the configured rules directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Generate shell completions for ppat
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// PPAT - Places & People Automate Translator
///
/// Transliterates personal and place names into Chinese characters with
/// per-language phonetic rule files.
#[derive(Parser, Debug)]
#[command(name = "ppat")]
#[command(version)]
#[command(about = "Rule-based transliteration of names into Chinese")]
#[command(long_about = "PPAT turns names into phoneme sequences and transliterates them into Chinese
characters with per-language rule files, for personal names and place names.

EXAMPLES:
    ppat                                   # Interactive prompt
    ppat translate Mike                    # All languages
    ppat translate Mike Seattle -l en      # English rules only
    ppat translate Mike --json             # JSON records
    ppat batch names.txt -o names.json     # Word list
    ppat check data/rule/en.rule           # Validate a rule file
    ppat completions bash > ppat.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Rules directory (overrides the configuration)
    #[arg(long, global = true)]
    rules_dir: Option<PathBuf>,

    /// Index directory (overrides the configuration)
    #[arg(long, global = true)]
    index_dir: Option<PathBuf>,

    /// Pronouncing dictionary (overrides the configuration)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ppat", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(Commands::Check { path }) = &cli.command {
        let path = path.clone().unwrap_or_else(|| config.rules_dir.clone());
        return run_check(config, path);
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        None | Some(Commands::Interactive) => run_interactive(&controller),
        Some(Commands::Translate { words, languages, json }) => run_translate(&controller, &words, &languages, json),
        Some(Commands::Batch { input, output, languages }) => run_batch(&controller, input, output, &languages).await,
        Some(Commands::Languages) => {
            print_languages(&controller);
            Ok(())
        }
        Some(Commands::Check { .. }) | Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load or create the configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)
        .with_context(|| format!("Failed to load config file: {}", cli.config_path))?;

    if let Some(rules_dir) = &cli.rules_dir {
        config.rules_dir = rules_dir.clone();
    }
    if let Some(index_dir) = &cli.index_dir {
        config.index_dir = index_dir.clone();
    }
    if let Some(dictionary) = &cli.dictionary {
        config.phonetic_dictionary = Some(dictionary.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_check(config: Config, path: PathBuf) -> Result<()> {
    // Checking must not depend on the rules directory being healthy
    let registry = ppat::languages::builtin_registry(std::sync::Arc::new(
        ppat::phonetics::PhoneticDictionary::new(),
    ));
    let controller = Controller::from_parts(config, registry, ppat::RuleSet::new(), ppat::index::IndexTranslator::new());
    let report = controller.check(&path)?;

    for rule in report.rules.iter() {
        info!("OK  {} ({})", rule.language_code(), rule.language_name());
    }
    for failure in &report.failures {
        error!("{}", failure);
    }

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} rule file(s) failed to compile", report.failures.len()))
    }
}

fn print_languages(controller: &Controller) {
    println!("Code\tLanguage\tISO name");
    for language in controller.languages() {
        println!(
            "{}\t{}\t{}",
            language.code,
            language.name,
            language.iso_name.as_deref().unwrap_or("-")
        );
    }
}

fn print_records(records: &[TransliterationRecord]) {
    println!("Keyword\tLanguage\tCategory\tChinese");
    for record in records {
        println!("{}\t{}\t{}\t{}", record.keyword, record.language, record.category, record.chinese);
    }
}

fn print_lookup(lookup: &Lookup) {
    println!("Result:\n===================================================");
    println!("From dictionary:");
    print_records(&lookup.index);
    println!("---------------------------------------------------");
    println!("From rule:");
    println!("Keyword\tLanguage\tCategory\tChinese");
    for outcome in &lookup.rules {
        match &outcome.result {
            Ok(records) => {
                for record in records {
                    println!("{}\t{}\t{}\t{}", record.keyword, record.language, record.category, record.chinese);
                }
            }
            Err(e) => println!("ERROR ({}): {}", outcome.language_code, e),
        }
    }
    println!("===================================================");
}

/// Split a prompt line into the word and the `-l` language codes
fn parse_prompt_line(line: &str) -> (String, Vec<String>) {
    let mut tokens = line.split_whitespace();
    let word: Vec<&str> = tokens.by_ref().take_while(|token| *token != "-l").collect();
    (word.join(" "), tokens.map(str::to_string).collect())
}

fn run_interactive(controller: &Controller) -> Result<()> {
    println!("!!!Welcome to Places & People Automate Translator!!!");
    println!("Usage:");
    println!("    Type names and hit ENTER to get transliterations.");
    println!("    Use option \"-l\" to specify language codes. Available codes are:\n");
    for language in controller.languages() {
        println!("\t{}\t{}", language.code, language.name);
    }
    println!("\n    Default is ALL language codes.");
    println!("    Use Ctrl+D to quit.\n");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read from stdin")?;
        let (word, languages) = parse_prompt_line(&line);
        if word.is_empty() {
            continue;
        }

        match controller.lookup(&word, &languages) {
            Ok(lookup) => print_lookup(&lookup),
            Err(e) => println!("ERROR: {}", e),
        }
    }
    println!();
    Ok(())
}

fn run_translate(controller: &Controller, words: &[String], languages: &[String], json: bool) -> Result<()> {
    let mut all_records = Vec::new();
    for word in words {
        all_records.extend(controller.translate(word, languages)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all_records)?);
    } else {
        print_records(&all_records);
    }
    Ok(())
}

async fn run_batch(controller: &Controller, input: PathBuf, output: Option<PathBuf>, languages: &[String]) -> Result<()> {
    let words = FileManager::read_word_list(&input)?;
    if words.is_empty() {
        return Err(anyhow!("No words in {:?}", input));
    }

    let outcomes = controller.run_batch(&words, languages, output.is_some()).await?;
    let reports: Vec<_> = outcomes.iter().map(|outcome| outcome.to_report()).collect();
    let json = serde_json::to_string_pretty(&reports)?;

    match output {
        Some(path) => {
            FileManager::write_to_file(&path, &json)?;
            info!("Success: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
