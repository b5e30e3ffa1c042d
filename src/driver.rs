// src/driver.rs

//! Whole spec file processing
//!
//! Splits a spec file into blocks and routes each one:
//!
//! - the leading comment header (copyright, license notice) is copied
//!   verbatim when a blank line separates it from the tags,
//! - the main preamble and every `%package` block go through [`Preamble`],
//! - all other sections (`%description`, `%prep`, `%files`, scriptlets,
//!   `%changelog`, ...) are copied verbatim.

use crate::error::Result;
use crate::preamble::Preamble;
use crate::rules;
use crate::sink::LineSink;
use crate::tables::ConversionTables;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^%(?:package|description|prep|build|install|check|clean|files|changelog|pre|post|preun|postun|pretrans|posttrans|preuntrans|postuntrans|verifyscript|triggerprein|triggerin|triggerun|triggerpostun|filetriggerin|filetriggerun|filetriggerpostun|transfiletriggerin|transfiletriggerun|transfiletriggerpostun|generate_buildrequires|conf|sourcelist|patchlist)\b",
    )
    .expect("section marker pattern is valid")
});

static PACKAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%package\b").expect("package marker pattern is valid"));

/// Block currently receiving lines
enum Block<'s, S: LineSink> {
    Preamble(Preamble<&'s mut S>),
    Verbatim(&'s mut S),
}

impl<'s, S: LineSink> Block<'s, S> {
    fn add(&mut self, line: &str) -> Result<()> {
        match self {
            Block::Preamble(preamble) => preamble.add(line),
            Block::Verbatim(sink) => {
                sink.append(line);
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<&'s mut S> {
        match self {
            Block::Preamble(preamble) => preamble.finish(),
            Block::Verbatim(sink) => {
                sink.flush()?;
                Ok(sink)
            }
        }
    }
}

/// Whether `line` starts a new spec file section
pub fn is_section_marker(line: &str) -> bool {
    SECTION_MARKER.is_match(line)
}

/// Number of leading lines forming the verbatim comment header
///
/// The header is the run of comment and blank lines before the first tag,
/// up to and including the last blank line of that run. Comments directly
/// above the first tag belong to the preamble.
pub fn header_length(lines: &[&str]) -> usize {
    let first_body = lines
        .iter()
        .position(|line| !line.trim().is_empty() && !rules::is_comment(line))
        .unwrap_or(lines.len());

    lines[..first_body]
        .iter()
        .rposition(|line| line.trim().is_empty())
        .map_or(0, |blank| blank + 1)
}

/// Clean a whole spec file, sending every output line to `sink`
pub fn clean_spec_into<S: LineSink>(
    text: &str,
    tables: &Arc<ConversionTables>,
    sink: &mut S,
) -> Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    let header = header_length(&lines);

    for line in &lines[..header] {
        sink.append(line);
    }

    let mut block = Block::Preamble(Preamble::new(Arc::clone(tables), sink));
    let mut sections = 1;

    for line in &lines[header..] {
        if !is_section_marker(line) {
            block.add(line)?;
            continue;
        }

        let sink = block.finish()?;
        sections += 1;
        block = if PACKAGE_MARKER.is_match(line) {
            let mut package = Preamble::package(Arc::clone(tables), sink);
            package.add(line)?;
            Block::Preamble(package)
        } else {
            sink.append(line);
            Block::Verbatim(sink)
        };
    }

    block.finish()?;
    debug!(
        "Processed {} lines ({} header, {} sections)",
        lines.len(),
        header,
        sections
    );
    Ok(())
}

/// Clean a whole spec file and return the result as text
pub fn clean_spec(text: &str, tables: &Arc<ConversionTables>) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();
    clean_spec_into(text, tables, &mut lines)?;

    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}
