// src/rules.rs

//! Line classification for spec file preambles
//!
//! A raw preamble line is matched against an ordered table of rules. The
//! first rule whose pattern matches decides the [`LineKind`], and its
//! extractor pulls the interesting captures out of the line. Order matters:
//! structural lines (conditionals, comments) are checked before tags, and
//! tags with special handling before the generic `Tag: value` rules.
//!
//! All tag patterns are case-insensitive, matching what rpmbuild accepts.

use crate::preamble::Category;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// What a preamble line is, with borrowed captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `%if`, `%ifarch`, `%else`, `%endif`, ...
    Conditional,
    /// `# ...`
    Comment,
    /// `%{!?foo: %global foo bar}` style one-line macro definitions
    InlineMacro,
    /// `%define` / `%global` / `%undefine` statements
    Definition,
    Source { number: &'a str, value: &'a str },
    Patch { number: &'a str, value: &'a str },
    PreReq { value: &'a str },
    /// `Requires(post): ...`; `phase` includes the parentheses
    RequiresPhase { phase: &'a str, value: &'a str },
    Provides { value: &'a str },
    Obsoletes { value: &'a str },
    BuildRoot,
    License { value: &'a str },
    Release,
    /// `Summary(de): ...`; `language` includes the parentheses
    SummaryLocalized { language: &'a str, value: &'a str },
    /// Obsolete tag that is dropped from the output
    Deprecated(&'static str),
    /// Plain `Tag: value` line
    Tag { category: Category, value: &'a str },
    /// Nothing matched
    Unknown,
}

type Extract = for<'a> fn(&Captures<'a>) -> LineKind<'a>;

struct Rule {
    pattern: Regex,
    extract: Extract,
}

impl Rule {
    fn new(pattern: &str, extract: Extract) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("preamble rule patterns are valid"),
            extract,
        }
    }
}

fn group<'a>(caps: &Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str().trim())
}

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#").expect("comment pattern is valid"));

/// Ordered rule table; the first match wins
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            r"(?i)^\s*%(?:if|ifarch|ifnarch|ifos|ifnos|elif|elifarch|elifos|else|endif)\b",
            |_| LineKind::Conditional,
        ),
        Rule::new(r"^\s*#", |_| LineKind::Comment),
        Rule::new(r"^\s*%\{[^}]*%(?:define|global)\s", |_| LineKind::InlineMacro),
        Rule::new(r"(?i)^\s*%(?:define|global|undefine)\s", |_| LineKind::Definition),
        Rule::new(r"(?i)^Source(\d*):\s*(.*)", |c| LineKind::Source {
            number: group(c, 1),
            value: group(c, 2),
        }),
        Rule::new(r"(?i)^Patch(\d*):\s*(.*)", |c| LineKind::Patch {
            number: group(c, 1),
            value: group(c, 2),
        }),
        Rule::new(r"(?i)^PreReq:\s*(.*)", |c| LineKind::PreReq { value: group(c, 1) }),
        Rule::new(r"(?i)^Requires(\([^)]+\)):\s*(.*)", |c| LineKind::RequiresPhase {
            phase: group(c, 1),
            value: group(c, 2),
        }),
        Rule::new(r"(?i)^Provides:\s*(.*)", |c| LineKind::Provides { value: group(c, 1) }),
        Rule::new(r"(?i)^Obsoletes:\s*(.*)", |c| LineKind::Obsoletes { value: group(c, 1) }),
        Rule::new(r"(?i)^\s*BuildRoot:", |_| LineKind::BuildRoot),
        Rule::new(r"(?i)^License:\s*(.*)", |c| LineKind::License { value: group(c, 1) }),
        Rule::new(r"(?i)^Release:", |_| LineKind::Release),
        Rule::new(r"(?i)^Summary(\(\S+\)):\s*(.*)", |c| LineKind::SummaryLocalized {
            language: group(c, 1),
            value: group(c, 2),
        }),
        // Deprecated tags
        Rule::new(r"(?i)^Vendor:", |_| LineKind::Deprecated("vendor")),
        Rule::new(r"(?i)^\s*AutoReqProv:\s*on\s*$", |_| LineKind::Deprecated("autoreqprov")),
        Rule::new(r"(?i)^\s*Epoch:", |_| LineKind::Deprecated("epoch")),
        // Plain tags, value is the first capture
        Rule::new(r"(?i)^Name:\s*(.*)", |c| tag(Category::Name, c)),
        Rule::new(r"(?i)^Version:\s*(.*)", |c| tag(Category::Version, c)),
        Rule::new(r"(?i)^Summary:\s*(.*)", |c| tag(Category::Summary, c)),
        Rule::new(r"(?i)^Url:\s*(.*)", |c| tag(Category::Url, c)),
        Rule::new(r"(?i)^Group:\s*(.*)", |c| tag(Category::Group, c)),
        Rule::new(r"(?i)^BuildRequires:\s*(.*)", |c| tag(Category::BuildRequires, c)),
        Rule::new(r"(?i)^Requires:\s*(.*)", |c| tag(Category::Requires, c)),
        Rule::new(r"(?i)^Recommends:\s*(.*)", |c| tag(Category::Recommends, c)),
        Rule::new(r"(?i)^Suggests:\s*(.*)", |c| tag(Category::Suggests, c)),
        Rule::new(r"(?i)^Supplements:\s*(.*)", |c| tag(Category::Supplements, c)),
        Rule::new(r"(?i)^\s*BuildArch(?:itectures)?:\s*(.*)", |c| {
            tag(Category::BuildArch, c)
        }),
    ]
});

fn tag<'a>(category: Category, caps: &Captures<'a>) -> LineKind<'a> {
    LineKind::Tag {
        category,
        value: group(caps, 1),
    }
}

/// Classify a single (already cleaned up) preamble line
pub fn classify(line: &str) -> LineKind<'_> {
    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(line) {
            return (rule.extract)(&caps);
        }
    }
    LineKind::Unknown
}

/// Whether `line` is a comment line
pub fn is_comment(line: &str) -> bool {
    COMMENT.is_match(line)
}
