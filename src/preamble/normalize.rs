// src/preamble/normalize.rs

//! Value rewriting for preamble tags
//!
//! - License expressions are tokenized on `and` / `or` / parentheses and
//!   each token is run through the license alias table.
//! - Dependency lists are split into one token per dependency, the version
//!   operators get uniform spacing, `%{version}-%{release}` becomes
//!   `%{version}`, and packages known to the pkg-config table are replaced
//!   by their `pkgconfig(...)` equivalents.

use crate::tables::ConversionTables;
use regex::Regex;
use std::sync::LazyLock;

/// Column where tag values start (`BuildRequires:  ` is the longest common key)
pub const KEY_WIDTH: usize = 16;

/// Marker found in library-query dependency tokens
pub const PKGCONFIG_MARKER: &str = "pkgconfig(";

static LICENSE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(|\)| and | or ").expect("license split pattern is valid"));

/// A whole value made only of `name [op version]` tokens, comma or space separated
static DEPENDENCY_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s*[^\s,<>=]+(?:\s*(?:<=|>=|<|>|=)\s*[^\s,<>=][^\s,]*)?\s*,?)+\s*$")
        .expect("dependency list pattern is valid")
});

static DEPENDENCY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s,<>=]+(?:\s*(?:<=|>=|<|>|=)\s*[^\s,<>=][^\s,]*)?")
        .expect("dependency token pattern is valid")
});

static OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]=?|=").expect("operator pattern is valid"));

static SHARED_LIBRARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\.so(?:\.\d+)*$").expect("shared library pattern is valid")
});

/// Build a `Key:  value` line with the value aligned on [`KEY_WIDTH`]
pub fn format_line(key: &str, value: &str) -> String {
    let head = format!("{}:", key);
    let line = if head.len() >= KEY_WIDTH {
        format!("{} {}", head, value)
    } else {
        format!("{:<width$}{}", head, value, width = KEY_WIDTH)
    };
    line.trim_end().to_string()
}

/// Collapse runs of whitespace to one space and trim both ends
pub fn strip_useless_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalize a license expression
///
/// `GPL-2.0ORlater and (MITORsim)` style shorthands are spelled out, each
/// license token is replaced by its alias when the table knows it, and the
/// expression is rejoined with single spaces and tight parentheses.
pub fn fix_license(value: &str, tables: &ConversionTables) -> String {
    // Operators must be space-delimited for the split, whatever the input spacing
    let value = strip_useless_spaces(&value.replace('(', " ( ").replace(')', " ) "));
    let value = value.as_str();

    let mut pieces = Vec::new();
    let mut last = 0;
    for delimiter in LICENSE_SPLIT.find_iter(value) {
        pieces.push(&value[last..delimiter.start()]);
        pieces.push(delimiter.as_str());
        last = delimiter.end();
    }
    pieces.push(&value[last..]);

    let tokens: Vec<String> = pieces
        .into_iter()
        .map(strip_useless_spaces)
        .filter(|token| !token.is_empty())
        .map(|token| canonical_license(&token, tables))
        .collect();

    tokens.join(" ").replace("( ", "(").replace(" )", ")")
}

fn canonical_license(token: &str, tables: &ConversionTables) -> String {
    let token = token
        .replace("ORlater", " or later")
        .replace("ORsim", " or similar");
    let token = strip_useless_spaces(&token);

    if let Some(alias) = tables.license_alias(&token) {
        return alias.to_string();
    }

    for suffix in [" or later", " or similar"] {
        if let Some(base) = token.strip_suffix(suffix)
            && let Some(alias) = tables.license_alias(base)
        {
            return format!("{}{}", alias, suffix);
        }
    }

    token
}

/// Split a dependency value into canonical, sorted dependency tokens
///
/// Values that do not look like a plain dependency list (rich boolean
/// dependencies, macros containing spaces, dangling operators) are returned
/// unchanged as a single token.
pub fn fix_package_list(value: &str, tables: &ConversionTables) -> Vec<String> {
    let value = value.trim();
    if !is_plain_dependency_list(value) {
        return vec![value.to_string()];
    }

    let mut expanded = Vec::new();
    for token in DEPENDENCY_TOKEN.find_iter(value) {
        let token = token
            .as_str()
            .replace("%{version}-%{release}", "%{version}")
            .replace("%version-%release", "%version");
        let token: String = token.split_whitespace().collect();
        let token = OPERATOR.replace_all(&token, " ${0} ").into_owned();
        expanded.extend(pkgname_to_pkgconfig(&token, tables));
    }
    expanded.sort();

    expanded
}

fn is_plain_dependency_list(value: &str) -> bool {
    if value.starts_with('(') || !DEPENDENCY_LIST.is_match(value) {
        return false;
    }
    DEPENDENCY_TOKEN.find_iter(value).all(|token| {
        let token = token.as_str();
        token.matches('{').count() == token.matches('}').count()
            && token.matches('(').count() == token.matches(')').count()
    })
}

/// Replace a dependency by its pkg-config modules, keeping the qualifier
fn pkgname_to_pkgconfig(token: &str, tables: &ConversionTables) -> Vec<String> {
    let Some(name) = token.split_whitespace().next() else {
        return vec![token.to_string()];
    };
    let qualifier = &token[name.len()..];

    let modules = tables.pkgconfig_modules(name).or_else(|| {
        SHARED_LIBRARY
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|base| tables.pkgconfig_modules(base.as_str()))
    });

    match modules {
        Some(modules) => modules
            .iter()
            .map(|module| format!("{}{}){}", PKGCONFIG_MARKER, module, qualifier))
            .collect(),
        None => vec![token.to_string()],
    }
}
