//! Tidytext CLI - fixes punctuation spacing and letter case in prose files.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use similar::TextDiff;
use walkdir::WalkDir;

use tidytext::casing::{CommonLexicon, Culture, LexiconConfig, TitleLexicon};
use tidytext::config::{Config, ConfigError};
use tidytext::{CaseMode, Options, tidy_with_lexicons};

/// File extensions picked up when a directory is given.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

/// A prose normalizer that fixes punctuation spacing and applies sentence or
/// AP title case without breaking URLs, emails, paths, numbers, or code.
#[derive(Parser, Debug)]
#[command(name = "tidytext")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input files or directories.  Directories are searched for .txt and
    /// .md files.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write tidied output back to the input file(s).
    #[arg(short, long)]
    write: bool,

    /// Check if files are already tidy (exit 1 if not).
    #[arg(short, long)]
    check: bool,

    /// Print a unified diff of the changes instead of the output.
    #[arg(long)]
    diff: bool,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Path to the configuration file (default: search for .tidytext.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Letter case to apply: none, upper, lower, sentence, or title.
    #[arg(long, value_name = "MODE")]
    case: Option<CaseMode>,

    /// Casing culture: invariant or turkic.
    #[arg(long, value_name = "CULTURE")]
    culture: Option<Culture>,

    /// Do not fix the spacing around punctuation.
    #[arg(long)]
    no_spacing: bool,

    /// Space colons like sentence punctuation.
    #[arg(long)]
    colon: bool,

    /// Trim whitespace at both ends of the text.
    #[arg(long)]
    trim: bool,

    /// Replace runs of spaces with a single space.
    #[arg(long)]
    collapse_spaces: bool,

    /// Reduce consecutive blank lines to one.
    #[arg(long)]
    collapse_blank_lines: bool,

    /// Join all lines by removing every line break.
    #[arg(long)]
    remove_line_breaks: bool,

    /// Print the effective lexicon as a TOML [lexicon] table and exit.
    #[arg(long)]
    print_lexicon: bool,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Apply command line flags on top of the configured options.
    fn apply_overrides(&self, options: &mut Options) {
        if let Some(case) = self.case {
            options.case = case;
        }
        if let Some(culture) = self.culture {
            options.culture = culture;
            options.sentence_case.culture = culture;
            options.title_case.culture = culture;
        }
        if self.no_spacing {
            options.fix_spacing = false;
        }
        options.colon_as_sentence_punct |= self.colon;
        options.trim |= self.trim;
        options.collapse_spaces |= self.collapse_spaces;
        options.collapse_blank_lines |= self.collapse_blank_lines;
        options.remove_line_breaks |= self.remove_line_breaks;
    }
}

/// Wrapper so that `--print-lexicon` emits a `[lexicon]` table.
#[derive(Serialize)]
struct LexiconDump {
    lexicon: LexiconConfig,
}

/// The result of tidying one file.
struct Outcome {
    path: PathBuf,
    input: String,
    output: String,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Load the configuration given with `--config`, or discover one from the
/// working directory.  Returns the directory include patterns are relative
/// to.
fn load_config(args: &Args, cwd: &Path) -> Result<(PathBuf, Config), ConfigError> {
    let found = match &args.config {
        Some(path) => Some((path.clone(), Config::from_file(path)?)),
        None => Config::discover(cwd)?,
    };
    Ok(match found {
        Some((path, config)) => {
            let base_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (base_dir, config)
        }
        None => (cwd.to_path_buf(), Config::default()),
    })
}

/// Expand directories into the text files below them, keeping files as is.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            let is_text = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
            if entry.file_type().is_file() && is_text {
                files.push(entry.into_path());
            }
        }
    }
    log::debug!(
        "Expanded {} path(s) into {} file(s)",
        paths.len(),
        files.len()
    );
    Ok(files)
}

fn unified_diff(name: &str, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error reading current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let (base_dir, config) = match load_config(&args, &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut options = config.to_options();
    args.apply_overrides(&mut options);
    log::debug!("Options: {:?}", options);

    let (common, title) = match config.lexicons() {
        Ok(lexicons) => lexicons,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.print_lexicon {
        let dump = LexiconDump {
            lexicon: LexiconConfig::from_lexicons(&common, &title),
        };
        return match toml::to_string_pretty(&dump) {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing lexicon: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let files = if args.stdin {
        Vec::new()
    } else if args.files.is_empty() {
        match config.collect_files(&base_dir) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match expand_paths(&args.files) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    if args.stdin || (args.files.is_empty() && files.is_empty()) {
        return run_stdin(&args, &options, &common, &title);
    }
    run_files(&args, &files, &options, &common, &title)
}

fn run_stdin(
    args: &Args,
    options: &Options,
    common: &CommonLexicon,
    title: &TitleLexicon,
) -> ExitCode {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let output = tidy_with_lexicons(&input, options, common, title);
    let changed = input != output;
    if args.diff {
        print!("{}", unified_diff("<stdin>", &input, &output));
    } else if !args.check {
        print!("{}", output);
    }
    if args.check && changed {
        eprintln!("<stdin>: not tidy");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_files(
    args: &Args,
    files: &[PathBuf],
    options: &Options,
    common: &CommonLexicon,
    title: &TitleLexicon,
) -> ExitCode {
    log::info!("Tidying {} file(s)", files.len());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| -> Result<Outcome, String> {
            let input = fs::read_to_string(path)
                .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
            let output = tidy_with_lexicons(&input, options, common, title);
            Ok(Outcome {
                path: path.clone(),
                input,
                output,
            })
        })
        .collect();

    let mut failed = false;
    let mut all_tidy = true;
    for result in results {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(message) => {
                eprintln!("{}", message);
                failed = true;
                continue;
            }
        };
        let changed = outcome.input != outcome.output;
        let name = outcome.path.display().to_string();

        if args.diff && changed {
            print!("{}", unified_diff(&name, &outcome.input, &outcome.output));
        }
        if args.check {
            if changed {
                eprintln!("{}: not tidy", name);
                all_tidy = false;
            }
        } else if args.write {
            if changed {
                if let Err(e) = fs::write(&outcome.path, &outcome.output) {
                    eprintln!("Error writing {}: {}", name, e);
                    failed = true;
                } else {
                    log::info!("Tidied {}", name);
                }
            }
        } else if !args.diff {
            print!("{}", outcome.output);
        }
    }

    if failed || (args.check && !all_tidy) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
