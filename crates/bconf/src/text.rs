//! Loader for the bconf text format.
//!
//! The format is line oriented:
//!
//! ```text
//! # full-line comment
//! node.1=foo
//!     some.node.3.a=a     <- leading spaces/tabs are ignored
//! include conf/extra.conf
//! ```
//!
//! Every significant line is either an `include <path>` directive or a
//! `key.path=value` assignment. The value is everything after the first `=`,
//! taken verbatim: no trimming, quoting or escapes. Lines are applied in
//! order, so a later assignment to the same path wins, and an included file
//! is applied at the point where its directive appears.
//!
//! # Key design decisions
//!
//! - **Scanner vs. parser**: `ConfLines` only strips indentation and drops
//!   blank and comment lines; classification happens in `Directive::parse`.
//!   Line numbers are counted by the scanner so they stay correct across
//!   skipped lines.
//! - **Include depth**: nesting is bounded by
//!   [`LoadOptions::max_include_depth`], which turns a self-including file into
//!   an error instead of unbounded recursion.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{BconfError, Result};
use crate::tree::Bconf;

/// Default bound on include nesting.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Settings for loading text configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// How many levels of `include` may nest below the file being loaded.
    /// Zero rejects every include.
    pub max_include_depth: usize,
    /// Directory that relative include paths are resolved against. When
    /// unset they are opened relative to the process working directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            base_dir: None,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, include: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if include.is_relative() => dir.join(include),
            _ => include.to_path_buf(),
        }
    }
}

/// Iterator over the significant lines of a bconf stream.
///
/// Yields `(line_number, text)` with leading spaces and tabs removed, and
/// skips empty lines and lines starting with `#`. A trailing `\r` is treated
/// as part of the line ending.
struct ConfLines<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> ConfLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for ConfLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line += 1;

            let raw = self.buf.strip_suffix('\n').unwrap_or(self.buf.as_str());
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let text = raw.trim_start_matches([' ', '\t']);
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return Some(Ok((self.line, text.to_string())));
        }
    }
}

/// A classified significant line.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    Include(&'a str),
    Assign { key: &'a str, value: &'a str },
}

impl<'a> Directive<'a> {
    fn parse(text: &'a str, line: usize) -> Result<Self> {
        if let Some(rest) = text.strip_prefix("include") {
            // `include` must be a whole token; `includes.x=1` is an assignment.
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let path = rest.trim_start();
                if path.is_empty() {
                    return Err(BconfError::MissingIncludePath {
                        line,
                        text: text.to_string(),
                    });
                }
                return Ok(Directive::Include(path));
            }
        }

        let (key, value) = text
            .split_once('=')
            .ok_or_else(|| BconfError::MalformedLine {
                line,
                text: text.to_string(),
            })?;
        Ok(Directive::Assign { key, value })
    }
}

/// One load operation: the options plus the recursion that includes need.
struct Loader<'o> {
    options: &'o LoadOptions,
}

impl Loader<'_> {
    fn load_file(&self, tree: &mut Bconf, path: &Path, depth: usize) -> Result<()> {
        debug!(path = %path.display(), depth, "loading bconf file");
        let file = File::open(path).map_err(|source| BconfError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_reader(tree, BufReader::new(file), depth)
    }

    fn load_reader<R: BufRead>(&self, tree: &mut Bconf, reader: R, depth: usize) -> Result<()> {
        for item in ConfLines::new(reader) {
            let (line, text) = item?;
            match Directive::parse(&text, line)? {
                Directive::Include(include) => {
                    let path = self.options.resolve(Path::new(include));
                    if depth >= self.options.max_include_depth {
                        return Err(BconfError::IncludeDepth {
                            path,
                            limit: self.options.max_include_depth,
                        });
                    }
                    self.load_file(tree, &path, depth + 1)?;
                }
                Directive::Assign { key, value } => {
                    trace!(key, line, "bconf assignment");
                    let segments: Vec<&str> = key.split('.').collect();
                    tree.add_value(&segments, value)?;
                }
            }
        }
        Ok(())
    }
}

impl Bconf {
    /// Populate this tree from a bconf text file.
    pub fn load_conf_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load_conf_file_with(path, &LoadOptions::default())
    }

    /// Populate this tree from a bconf text file using explicit options.
    pub fn load_conf_file_with(&mut self, path: impl AsRef<Path>, options: &LoadOptions) -> Result<()> {
        Loader { options }.load_file(self, path.as_ref(), 0)
    }

    /// Populate this tree from a reader producing bconf text.
    ///
    /// On error the tree keeps every assignment applied before the failing
    /// line.
    pub fn load_conf_data<R: Read>(&mut self, reader: R) -> Result<()> {
        self.load_conf_data_with(reader, &LoadOptions::default())
    }

    pub fn load_conf_data_with<R: Read>(&mut self, reader: R, options: &LoadOptions) -> Result<()> {
        Loader { options }.load_reader(self, BufReader::new(reader), 0)
    }

    /// Populate this tree from bconf text held in memory.
    pub fn load_conf_str(&mut self, text: &str) -> Result<()> {
        self.load_conf_data(text.as_bytes())
    }
}
