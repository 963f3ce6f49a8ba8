//! Line-oriented text rewriting
//!
//! A [RewriteRule] pairs a regular expression with a replacement. Rules are
//! applied to one line at a time through [rewrite_line], and whole documents
//! go through [rewrite_text], which keeps every line terminator in place.
//!
//! Everything works on bytes. A line no rule matches comes out byte-identical,
//! whatever its encoding.
//!
//! Three rules drive a release:
//!
//! - [RewriteRule::version]: `<prefix>1.2.3` becomes `<prefix><new version>`
//! - [RewriteRule::copyright_year]: `2019 <holder>` becomes `<year> <holder>`
//! - [RewriteRule::repository_link]: `git => "ssh://user@host/scanning/x.git"`
//!   becomes `git => "<public base>/x.git"`
//!
//! Matching is purely textual. Any version-shaped substring in a matched line
//! is rewritten, wherever it appears.

pub mod file;

pub use file::{plan_file, replace_atomically, rewrite_file, sibling_path, FileOutcome};

use std::borrow::Cow;

use regex::bytes::{NoExpand, Regex};

use crate::error::Result;

#[derive(Debug, Clone)]
enum Replacement {
    /// Inserted as-is, `$` has no special meaning
    Literal(String),
    /// May reference capture groups (`${1}`)
    Template(String),
}

/// A search pattern and what to put in place of each match.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: Replacement,
}

impl RewriteRule {
    /// Rule with a literal replacement.
    pub fn literal(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(RewriteRule {
            pattern: Regex::new(pattern)?,
            replacement: Replacement::Literal(replacement.into()),
        })
    }

    /// Rule whose replacement may reference capture groups.
    pub fn template(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(RewriteRule {
            pattern: Regex::new(pattern)?,
            replacement: Replacement::Template(replacement.into()),
        })
    }

    /// `<prefix>\d+\.\d+\.\d+` replaced by `<prefix><new_version>`.
    ///
    /// The prefix is matched literally. The new version is not validated.
    pub fn version(prefix: &str, new_version: &str) -> Result<Self> {
        let pattern = format!(r"{}[0-9]+\.[0-9]+\.[0-9]+", regex::escape(prefix));
        Self::literal(&pattern, format!("{}{}", prefix, new_version))
    }

    /// `<four digits> <holder>` replaced by `<year> <holder>`.
    pub fn copyright_year(holder: &str, year: i32) -> Result<Self> {
        let pattern = format!(r"[0-9]{{4}} {}", regex::escape(holder));
        Self::literal(&pattern, format!("{} {}", year, holder))
    }

    /// Points a podspec `:git => "ssh://<user>@<host>/scanning/..."` source at `public_base`.
    ///
    /// Everything up to `git => "` and everything after `/scanning` is kept.
    pub fn repository_link(public_base: &str) -> Result<Self> {
        let base = public_base.replace('$', "$$");
        Self::template(
            // (?-u): `.` must also step over bytes that are not UTF-8
            r#"(?-u)(.*git => ")(ssh://[^@"\s]+@[^/"\s]+/scanning)(.*)"#,
            format!("${{1}}{}${{3}}", base),
        )
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.pattern.is_match(line)
    }

    /// Replaces every match on `line`.
    pub fn apply<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        match &self.replacement {
            Replacement::Literal(text) => {
                self.pattern.replace_all(line, NoExpand(text.as_bytes()))
            }
            Replacement::Template(text) => self.pattern.replace_all(line, text.as_bytes()),
        }
    }
}

/// Version token then copyright year, the order a release applies them in.
pub fn release_rules(
    version_prefix: &str,
    new_version: &str,
    copyright_holder: &str,
    year: i32,
) -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::version(version_prefix, new_version)?,
        RewriteRule::copyright_year(copyright_holder, year)?,
    ])
}

/// Applies `rules` to a single line (without its terminator), in order.
pub fn rewrite_line(line: &[u8], rules: &[RewriteRule]) -> Vec<u8> {
    let mut current = line.to_vec();
    for rule in rules {
        current = rule.apply(&current).into_owned();
    }
    current
}

/// Rewrites every line of `content`, keeping `\n` / `\r\n` terminators as they were.
pub fn rewrite_text(content: &[u8], rules: &[RewriteRule]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    for (body, terminator) in split_lines(content) {
        out.extend_from_slice(&rewrite_line(body, rules));
        out.extend_from_slice(terminator);
    }
    out
}

/// Splits `content` into `(body, terminator)` pairs. The last line may have no terminator.
pub(crate) fn split_lines(content: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    content
        .split_inclusive(|&b| b == b'\n')
        .map(split_terminator)
}

fn split_terminator(line: &[u8]) -> (&[u8], &[u8]) {
    if let Some(body) = line.strip_suffix(b"\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix(b"\n") {
        (body, &line[body.len()..])
    } else {
        (line, &[])
    }
}
