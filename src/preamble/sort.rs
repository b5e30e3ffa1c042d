// src/preamble/sort.rs

//! Ordering of groups within a category

use super::category::SortOrder;
use super::group::Group;
use super::normalize::PKGCONFIG_MARKER;
use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:Source|Patch)(\d*):").expect("numbered tag pattern is valid")
});

/// Key derived from a group's substantive line
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Numeric suffix of `SourceN:` / `PatchN:`; no suffix is 0
    Index(u64),
    /// Line text prefixed with `0` for plain tokens, `1` for pkgconfig() ones
    Token(String),
}

impl SortKey {
    pub fn for_line(order: SortOrder, line: &str) -> Option<Self> {
        match order {
            SortOrder::Unsorted => None,
            SortOrder::Keyword => {
                // Only digits are captured, so a parse failure is an overflow
                let index = NUMBERED_TAG
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|digits| digits.as_str())
                    .filter(|digits| !digits.is_empty())
                    .map_or(0, |digits| digits.parse().unwrap_or(u64::MAX));
                Some(Self::Index(index))
            }
            SortOrder::PackageTokens => {
                let priority = if line.contains(PKGCONFIG_MARKER) { '1' } else { '0' };
                Some(Self::Token(format!("{}{}", priority, line)))
            }
        }
    }
}

/// Stable in-place sort of a category's groups
pub fn sort_groups(order: SortOrder, groups: &mut [Group]) {
    if order == SortOrder::Unsorted {
        return;
    }
    // sort_by_cached_key is stable, ties keep insertion order
    groups.sort_by_cached_key(|group| SortKey::for_line(order, group.line()));
}
