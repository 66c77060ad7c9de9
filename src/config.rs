// SPDX-FileCopyrightText: 2025 Hong Minhee <https://hongminhee.org/>
// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support for Tidytext.
//!
//! This module provides functionality for loading and parsing configuration
//! files (`.tidytext.toml`) that control which transformations run and how
//! the casing converters behave.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::casing::{
    CommonLexicon, Culture, LexiconConfig, LexiconError, SentenceCaseOptions, TitleCaseOptions,
    TitleLexicon,
};
use crate::{CaseMode, Options};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".tidytext.toml";

/// Configuration for Tidytext.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Glob patterns for files to include (default: empty, meaning all files
    /// must be specified on command line).
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: empty).
    pub exclude: Vec<String>,

    /// Whitespace cleanup options.
    pub whitespace: WhitespaceConfig,

    /// Punctuation spacing options.
    pub punctuation: PunctuationConfig,

    /// Letter case options.
    pub case: CaseConfig,

    /// Sentence case converter options.
    pub sentence_case: SentenceCaseOptions,

    /// Title case converter options.
    pub title_case: TitleCaseOptions,

    /// Additions to the built-in lexicons.
    pub lexicon: LexiconConfig,
}

/// Whitespace cleanup options.  Everything is off by default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WhitespaceConfig {
    /// Trim whitespace at both ends of the text.
    pub trim: bool,

    /// Trim whitespace at the start of the text.
    pub trim_start: bool,

    /// Trim whitespace at the end of the text.
    pub trim_end: bool,

    /// Replace runs of two or more spaces with one.
    pub collapse_spaces: bool,

    /// Reduce consecutive blank lines to a single blank line.
    pub collapse_blank_lines: bool,

    /// Delete every line break.
    pub remove_line_breaks: bool,
}

/// Punctuation spacing options.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PunctuationConfig {
    /// Normalize the spacing around punctuation (default: true).
    pub fix_spacing: bool,

    /// Space colons like sentence punctuation (default: false).
    pub colon_as_sentence_punct: bool,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            fix_spacing: true,
            colon_as_sentence_punct: false,
        }
    }
}

/// Letter case options.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaseConfig {
    /// One of `none`, `upper`, `lower`, `sentence`, or `title` (default:
    /// `none`).
    pub mode: CaseMode,

    /// `invariant` or `turkic` (default: `invariant`).
    pub culture: Culture,
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Discover and load configuration by searching up the directory tree.
    ///
    /// Starting from `start_dir`, searches for `.tidytext.toml` in each parent
    /// directory until the filesystem root is reached. Returns `None` if no
    /// configuration file is found.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                log::debug!("Loading configuration from {}", config_path.display());
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !current.pop() {
                break;
            }
        }
        log::debug!(
            "No {} found above {}",
            CONFIG_FILE_NAME,
            start_dir.display()
        );
        Ok(None)
    }

    /// Collect files matching the include patterns, excluding those matching
    /// exclude patterns.
    ///
    /// The `base_dir` is used as the starting point for glob pattern matching.
    /// Returns an empty list if no include patterns are configured.
    pub fn collect_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        use glob::{MatchOptions, glob_with};

        if self.include.is_empty() {
            return Ok(Vec::new());
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };

        let mut files = Vec::new();
        for pattern in &self.include {
            let full_pattern = base_dir.join(pattern);
            let matches = glob_with(&full_pattern.to_string_lossy(), options)
                .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;
            for entry in matches {
                let path = entry.map_err(ConfigError::GlobIo)?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();

        if !self.exclude.is_empty() {
            let mut exclude_patterns = Vec::with_capacity(self.exclude.len());
            for pattern in &self.exclude {
                let full_pattern = base_dir.join(pattern);
                let compiled = glob::Pattern::new(&full_pattern.to_string_lossy())
                    .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;
                exclude_patterns.push(compiled);
            }
            files.retain(|path| {
                let path_str = path.to_string_lossy();
                !exclude_patterns
                    .iter()
                    .any(|pattern| pattern.matches(&path_str))
            });
        }

        log::debug!("Collected {} file(s) from include patterns", files.len());
        Ok(files)
    }

    /// Build pipeline options from this configuration.
    pub fn to_options(&self) -> Options {
        let ws = &self.whitespace;
        Options {
            trim: ws.trim,
            trim_start: ws.trim_start,
            trim_end: ws.trim_end,
            collapse_spaces: ws.collapse_spaces,
            collapse_blank_lines: ws.collapse_blank_lines,
            remove_line_breaks: ws.remove_line_breaks,
            fix_spacing: self.punctuation.fix_spacing,
            colon_as_sentence_punct: self.punctuation.colon_as_sentence_punct,
            case: self.case.mode,
            culture: self.case.culture,
            sentence_case: SentenceCaseOptions {
                culture: self.case.culture,
                ..self.sentence_case
            },
            title_case: TitleCaseOptions {
                culture: self.case.culture,
                ..self.title_case
            },
        }
    }

    /// Build the lexicons: the built-in ones extended with the `[lexicon]`
    /// table.
    pub fn lexicons(&self) -> Result<(CommonLexicon, TitleLexicon), ConfigError> {
        if self.lexicon.is_empty() {
            return Ok((
                CommonLexicon::builtin().clone(),
                TitleLexicon::builtin().clone(),
            ));
        }
        let common = CommonLexicon::extended(&self.lexicon).map_err(ConfigError::Lexicon)?;
        let title = TitleLexicon::extended(&self.lexicon).map_err(ConfigError::Lexicon)?;
        Ok((common, title))
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    Io(PathBuf, std::io::Error),
    /// Error parsing the TOML configuration.
    Parse(PathBuf, toml::de::Error),
    /// Error parsing a glob pattern.
    Glob(String, glob::PatternError),
    /// I/O error during glob iteration.
    GlobIo(glob::GlobError),
    /// Invalid entry in the `[lexicon]` table.
    Lexicon(LexiconError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, err) => {
                write!(f, "failed to read {}: {}", path.display(), err)
            }
            ConfigError::Parse(path, err) => {
                write!(f, "failed to parse {}: {}", path.display(), err)
            }
            ConfigError::Glob(pattern, err) => {
                write!(f, "invalid glob pattern '{}': {}", pattern, err)
            }
            ConfigError::GlobIo(err) => {
                write!(f, "error reading file: {}", err)
            }
            ConfigError::Lexicon(err) => {
                write!(f, "invalid lexicon: {}", err)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
            ConfigError::Glob(_, err) => Some(err),
            ConfigError::GlobIo(err) => Some(err),
            ConfigError::Lexicon(err) => Some(err),
        }
    }
}
