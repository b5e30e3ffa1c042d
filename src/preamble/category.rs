// src/preamble/category.rs

//! Preamble categories
//!
//! Every substantive preamble line lands in exactly one category. The
//! declaration order of [`Category`] is the order in which categories are
//! written back out, so moving a variant changes the canonical form.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Semantic bucket for a preamble line, in canonical emission order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// `%define` / `%global` statements, kept verbatim
    Definitions,
    Name,
    Version,
    Release,
    License,
    Summary,
    /// `Summary(de):` and friends
    SummaryLocalized,
    Url,
    Group,
    Source,
    Patch,
    BuildRequires,
    Requires,
    PreReq,
    /// `Requires(pre)`, `Requires(post)`, ...
    RequiresPhase,
    Recommends,
    Suggests,
    Supplements,
    /// Provides and Obsoletes share one bucket so they stay interleaved
    ProvidesObsoletes,
    BuildRoot,
    BuildArch,
    /// Anything unrecognized, in original order
    Misc,
}

/// How groups inside a category are ordered when the paragraph closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep insertion order
    Unsorted,
    /// Order by line text, `pkgconfig(...)` tokens last
    PackageTokens,
    /// Order by the numeric suffix of the tag (`Patch12` -> 12)
    Keyword,
}

impl Category {
    /// Canonical tag key for categories that have exactly one
    ///
    /// Categories whose key depends on the line (localized summaries,
    /// provides/obsoletes, phased requires) or that are emitted verbatim
    /// return `None`; committing a value to them needs an explicit key.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Name => Some("Name"),
            Self::Version => Some("Version"),
            Self::Release => Some("Release"),
            Self::License => Some("License"),
            Self::Summary => Some("Summary"),
            Self::Url => Some("Url"),
            Self::Group => Some("Group"),
            Self::Source => Some("Source"),
            Self::Patch => Some("Patch"),
            Self::BuildRequires => Some("BuildRequires"),
            Self::Requires => Some("Requires"),
            Self::PreReq => Some("PreReq"),
            Self::Recommends => Some("Recommends"),
            Self::Suggests => Some("Suggests"),
            Self::Supplements => Some("Supplements"),
            Self::BuildRoot => Some("BuildRoot"),
            Self::BuildArch => Some("BuildArch"),
            Self::Definitions
            | Self::SummaryLocalized
            | Self::RequiresPhase
            | Self::ProvidesObsoletes
            | Self::Misc => None,
        }
    }

    /// Ordering applied to this category's groups at paragraph close
    pub fn sort_order(&self) -> SortOrder {
        match self {
            Self::BuildRequires
            | Self::Requires
            | Self::PreReq
            | Self::RequiresPhase
            | Self::Recommends
            | Self::Suggests
            | Self::Supplements => SortOrder::PackageTokens,
            Self::Source | Self::Patch => SortOrder::Keyword,
            _ => SortOrder::Unsorted,
        }
    }

    /// Whether values in this category are dependency lists to split and convert
    pub fn has_package_tokens(&self) -> bool {
        self.sort_order() == SortOrder::PackageTokens || *self == Self::ProvidesObsoletes
    }
}
