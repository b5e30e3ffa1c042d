// src/preamble/mod.rs

//! Preamble canonicalization
//!
//! The preamble is the tag block at the top of a spec file (and of every
//! `%package` sub-package). It is reordered and normalized using three
//! nested notions:
//!
//! - A **paragraph** is a run of lines between conditional directives
//!   (`%if`, `%else`, `%endif`, ...). Lines never move across a paragraph
//!   boundary, so conditionals keep guarding the same tags.
//! - A **category** is a bucket of lines about one topic (name, license,
//!   build requirements, ...). Categories are written in a fixed order.
//! - A **group** is a substantive line plus the comments and inline macro
//!   definitions directly above it. Groups move as a unit, so comments stay
//!   attached to the line they describe.
//!
//! # Example
//!
//! ```
//! use spec_cleaner::{ConversionTables, Preamble};
//! use std::sync::Arc;
//!
//! let mut preamble = Preamble::new(Arc::new(ConversionTables::default()), Vec::new());
//! for line in ["Requires: zlib", "Version: 1.0", "Name: foo"] {
//!     preamble.add(line).unwrap();
//! }
//! let lines = preamble.finish().unwrap();
//! assert_eq!(lines[0], "Name:           foo");
//! assert_eq!(lines[2], "Requires:       zlib");
//! ```

mod category;
mod group;
mod normalize;
mod sort;

pub use category::{Category, SortOrder};
pub use group::{Group, GroupBuffer};
pub use normalize::{
    KEY_WIDTH, PKGCONFIG_MARKER, fix_license, fix_package_list, format_line, strip_useless_spaces,
};
pub use sort::{SortKey, sort_groups};

use crate::error::{Error, Result};
use crate::rules::{self, LineKind};
use crate::sink::LineSink;
use crate::tables::ConversionTables;
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

/// Injected above patches that carry no explanatory comment
pub const PATCH_MISSING_TAG: &str =
    "# PATCH-MISSING-TAG -- See http://wiki.opensuse.org/openSUSE:Packaging_Patches_guidelines";

/// Injected above PreReq / Requires(phase) lines, which need a human look
pub const PREREQ_REVIEW: &str = "# FIXME: use proper Requires(pre/post/preun/...)";

/// The only BuildRoot value ever written
pub const BUILDROOT_VALUE: &str = "%{_tmppath}/%{name}-%{version}-build";

/// Release numbers are managed by the build service
pub const RELEASE_VALUE: &str = "0";

/// One reorderable unit of a preamble
#[derive(Debug, Default)]
pub struct Paragraph {
    categories: BTreeMap<Category, Vec<Group>>,
    pending: GroupBuffer,
    /// Most recent comment or committed line, for lookback rules
    last_line: Option<String>,
}

impl Paragraph {
    /// Queue an attachment line for the next substantive line
    pub fn attach(&mut self, line: &str) {
        self.pending.push(line);
        self.last_line = Some(line.to_string());
    }

    /// Commit a substantive line, wrapping any pending attachments with it
    pub fn push(&mut self, category: Category, line: String) {
        self.last_line = Some(line.clone());
        let group = self.pending.commit(line);
        self.categories.entry(category).or_default().push(group);
    }

    pub fn groups(&self, category: Category) -> &[Group] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    fn last_line_is_comment(&self) -> bool {
        self.last_line.as_deref().is_some_and(rules::is_comment)
    }

    /// Sort every category and flatten the paragraph in canonical order
    ///
    /// Attachments that never got a substantive line come last.
    pub fn into_lines(self) -> Vec<String> {
        let Paragraph {
            mut categories,
            pending,
            ..
        } = self;

        let mut lines = Vec::new();
        for category in Category::iter() {
            let Some(mut groups) = categories.remove(&category) else {
                continue;
            };
            sort_groups(category.sort_order(), &mut groups);
            for group in groups {
                lines.extend(group.into_lines());
            }
        }
        lines.extend(pending.into_lines());
        lines
    }
}

/// Which kind of preamble block is being cleaned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The main preamble at the top of the spec file
    Main,
    /// A `%package` block; its first line is passed through untouched
    Package,
}

/// Line-at-a-time preamble canonicalizer
pub struct Preamble<S: LineSink> {
    tables: Arc<ConversionTables>,
    sink: S,
    kind: SectionKind,
    paragraph: Paragraph,
    lines_seen: usize,
}

impl<S: LineSink> Preamble<S> {
    /// Engine for the main preamble
    pub fn new(tables: Arc<ConversionTables>, sink: S) -> Self {
        Self::with_kind(SectionKind::Main, tables, sink)
    }

    /// Engine for a `%package` sub-package block
    pub fn package(tables: Arc<ConversionTables>, sink: S) -> Self {
        Self::with_kind(SectionKind::Package, tables, sink)
    }

    pub fn with_kind(kind: SectionKind, tables: Arc<ConversionTables>, sink: S) -> Self {
        Self {
            tables,
            sink,
            kind,
            paragraph: Paragraph::default(),
            lines_seen: 0,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Paragraph currently being collected
    pub fn paragraph(&self) -> &Paragraph {
        &self.paragraph
    }

    /// Feed the next input line
    pub fn add(&mut self, line: &str) -> Result<()> {
        self.lines_seen += 1;

        // The %package line names the sub-package, keep it as written
        if self.kind == SectionKind::Package && self.lines_seen == 1 {
            self.sink.append(line);
            return Ok(());
        }

        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }

        match rules::classify(line) {
            LineKind::Conditional => {
                // The directive stays at the end of the paragraph it closes
                self.paragraph.attach(line);
                self.close_paragraph(false)?;
                self.paragraph.last_line = Some(line.to_string());
            }
            LineKind::Comment | LineKind::InlineMacro => self.paragraph.attach(line),
            LineKind::Definition => self
                .paragraph
                .push(Category::Definitions, line.to_string()),
            LineKind::Source { number, value } => {
                let key = format!("Source{}", number);
                self.add_value(Category::Source, value, Some(key), None)?;
            }
            LineKind::Patch { number, value } => {
                if !self.paragraph.last_line_is_comment() {
                    self.paragraph.pending.push(PATCH_MISSING_TAG);
                }
                let key = format!("Patch{}", number);
                self.add_value(Category::Patch, value, Some(key), None)?;
            }
            LineKind::PreReq { value } => {
                self.add_value(Category::PreReq, value, None, Some(PREREQ_REVIEW))?;
            }
            LineKind::RequiresPhase { phase, value } => {
                let key = format!("Requires{}", phase);
                self.add_value(Category::RequiresPhase, value, Some(key), Some(PREREQ_REVIEW))?;
            }
            LineKind::Provides { value } => {
                let key = "Provides".to_string();
                self.add_value(Category::ProvidesObsoletes, value, Some(key), None)?;
            }
            LineKind::Obsoletes { value } => {
                let key = "Obsoletes".to_string();
                self.add_value(Category::ProvidesObsoletes, value, Some(key), None)?;
            }
            LineKind::BuildRoot => {
                if self.paragraph.groups(Category::BuildRoot).is_empty() {
                    self.add_value(Category::BuildRoot, BUILDROOT_VALUE, None, None)?;
                } else {
                    trace!("Dropping duplicate BuildRoot: {}", line);
                }
            }
            LineKind::License { value } => {
                let value = fix_license(value, &self.tables);
                self.add_value(Category::License, &value, None, None)?;
            }
            LineKind::Release => {
                self.add_value(Category::Release, RELEASE_VALUE, None, None)?;
            }
            LineKind::SummaryLocalized { language, value } => {
                let key = format!("Summary{}", language);
                self.add_value(Category::SummaryLocalized, value, Some(key), None)?;
            }
            LineKind::Deprecated(tag) => {
                trace!("Dropping deprecated {} line: {}", tag, line);
            }
            LineKind::Tag { category, value } => {
                self.add_value(category, value, None, None)?;
            }
            LineKind::Unknown => self.paragraph.push(Category::Misc, line.to_string()),
        }

        Ok(())
    }

    /// Close the last paragraph, end the block with a blank line and
    /// return the sink
    pub fn finish(mut self) -> Result<S> {
        self.close_paragraph(true)?;
        Ok(self.sink)
    }

    /// Commit `value` as one or more `key: value` lines in `category`
    ///
    /// `key` overrides the category's own tag key. `marker` is a comment
    /// placed above every produced line unless it is already there.
    fn add_value(
        &mut self,
        category: Category,
        value: &str,
        key: Option<String>,
        marker: Option<&str>,
    ) -> Result<()> {
        let key = match key {
            Some(key) => key,
            None => category
                .key()
                .ok_or_else(|| Error::UnhandledCategory(category.to_string()))?
                .to_string(),
        };

        let values = if category.has_package_tokens() {
            fix_package_list(value, &self.tables)
        } else {
            vec![value.to_string()]
        };

        for value in values {
            if let Some(marker) = marker {
                self.paragraph.pending.push_once(marker);
            }
            self.paragraph.push(category, format_line(&key, &value));
        }

        Ok(())
    }

    fn close_paragraph(&mut self, end_of_block: bool) -> Result<()> {
        let paragraph = std::mem::take(&mut self.paragraph);
        debug!(
            groups = paragraph.group_count(),
            end_of_block, "Closing preamble paragraph"
        );

        for line in paragraph.into_lines() {
            self.sink.append(&line);
        }
        if end_of_block {
            self.sink.append("");
        }
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Arc<ConversionTables> {
        Arc::new(ConversionTables::from_strs(
            "First line\nFoo-1.0\tFoo\nBar-2.0\tBar\n",
            "libfoo: foo\nlibbar: bar1 bar2\n",
        ))
    }

    fn clean(input: &[&str]) -> Vec<String> {
        let mut preamble = Preamble::new(tables(), Vec::new());
        for line in input {
            preamble.add(line).unwrap();
        }
        preamble.finish().unwrap()
    }

    #[derive(Default)]
    struct CountingSink {
        lines: Vec<String>,
        flushes: usize,
    }

    impl LineSink for CountingSink {
        fn append(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_reorders_categories() {
        let output = clean(&[
            "Requires: zlib",
            "License: MIT",
            "Version: 1.0",
            "Name: foo",
        ]);
        assert_eq!(
            output,
            vec![
                "Name:           foo",
                "Version:        1.0",
                "License:        MIT",
                "Requires:       zlib",
                "",
            ]
        );
    }

    #[test]
    fn test_comment_stays_attached() {
        let output = clean(&["Requires: zlib", "# the name", "Name: foo"]);
        assert_eq!(
            output,
            vec!["# the name", "Name:           foo", "Requires:       zlib", ""]
        );
    }

    #[test]
    fn test_blank_lines_dropped() {
        let output = clean(&["Name: foo", "", "   ", "", "Version: 2"]);
        assert_eq!(output, vec!["Name:           foo", "Version:        2", ""]);
    }

    #[test]
    fn test_definitions_come_first() {
        let output = clean(&["Name: foo", "%define _name bar"]);
        assert_eq!(output, vec!["%define _name bar", "Name:           foo", ""]);
    }

    #[test]
    fn test_inline_macro_is_attachment() {
        let output = clean(&[
            "Requires: python",
            "%{!?py_ver: %global py_ver 3}",
            "Name: foo",
        ]);
        assert_eq!(output[0], "%{!?py_ver: %global py_ver 3}");
        assert_eq!(output[1], "Name:           foo");
    }

    #[test]
    fn test_source_numbering() {
        let output = clean(&["Source1: bar.tar.gz", "Source: foo.tar.gz"]);
        assert_eq!(
            output,
            vec!["Source:         foo.tar.gz", "Source1:        bar.tar.gz", ""]
        );
    }

    #[test]
    fn test_patch_missing_tag() {
        let output = clean(&["Patch1: b.patch", "# PATCH-FIX-UPSTREAM a.patch", "Patch0: a.patch"]);
        assert_eq!(
            output,
            vec![
                "# PATCH-FIX-UPSTREAM a.patch",
                "Patch0:         a.patch",
                PATCH_MISSING_TAG,
                "Patch1:         b.patch",
                "",
            ]
        );
    }

    #[test]
    fn test_prereq_gets_review_marker() {
        let output = clean(&["PreReq: sh, coreutils"]);
        assert_eq!(
            output,
            vec![
                PREREQ_REVIEW,
                "PreReq:         coreutils",
                PREREQ_REVIEW,
                "PreReq:         sh",
                "",
            ]
        );
    }

    #[test]
    fn test_requires_phase() {
        let output = clean(&["Requires(post): shadow", "Requires(pre): coreutils"]);
        assert_eq!(
            output,
            vec![
                PREREQ_REVIEW,
                "Requires(post): shadow",
                PREREQ_REVIEW,
                "Requires(pre):  coreutils",
                "",
            ]
        );
    }

    #[test]
    fn test_provides_obsoletes_interleave() {
        let output = clean(&["Obsoletes: old-b", "Provides: b", "Obsoletes: old-a"]);
        assert_eq!(
            output,
            vec![
                "Obsoletes:      old-b",
                "Provides:       b",
                "Obsoletes:      old-a",
                "",
            ]
        );
    }

    #[test]
    fn test_buildroot_emitted_once() {
        let output = clean(&["BuildRoot: /var/tmp/foo", "BuildRoot: %{_tmppath}/x"]);
        assert_eq!(
            output,
            vec!["BuildRoot:      %{_tmppath}/%{name}-%{version}-build", ""]
        );
    }

    #[test]
    fn test_release_forced_to_zero() {
        assert_eq!(clean(&["Release: 42.1"]), vec!["Release:        0", ""]);
    }

    #[test]
    fn test_summary_localized() {
        let output = clean(&["Summary(de): Ein Paket", "Summary: A package"]);
        assert_eq!(
            output,
            vec!["Summary:        A package", "Summary(de):    Ein Paket", ""]
        );
    }

    #[test]
    fn test_license_normalized() {
        let output = clean(&["License: FooORlater and (BarORsim)"]);
        assert_eq!(
            output,
            vec!["License:        Foo-1.0 or later and (Bar-2.0 or similar)", ""]
        );
    }

    #[test]
    fn test_deprecated_lines_vanish() {
        let output = clean(&[
            "Name: foo",
            "# vendor comment",
            "Vendor: Someone",
            "Epoch: 1",
            "AutoReqProv: on",
            "Version: 1",
        ]);
        assert_eq!(
            output,
            vec![
                "Name:           foo",
                "# vendor comment",
                "Version:        1",
                "",
            ]
        );
    }

    #[test]
    fn test_unknown_lines_keep_order() {
        let output = clean(&["ExclusiveArch: x86_64", "Name: foo", "AutoReqProv: off"]);
        assert_eq!(
            output,
            vec![
                "Name:           foo",
                "ExclusiveArch: x86_64",
                "AutoReqProv: off",
                "",
            ]
        );
    }

    #[test]
    fn test_conditional_closes_paragraph() {
        let output = clean(&[
            "BuildRequires: zlib",
            "%if 0%{?suse_version}",
            "BuildRequires: b",
            "BuildRequires: a",
            "%endif",
            "BuildRequires: c",
        ]);
        assert_eq!(
            output,
            vec![
                "BuildRequires:  zlib",
                "%if 0%{?suse_version}",
                "BuildRequires:  a",
                "BuildRequires:  b",
                "%endif",
                "BuildRequires:  c",
                "",
            ]
        );
    }

    #[test]
    fn test_trailing_comments_last() {
        let output = clean(&["# dangling", "Name: foo", "# at the end"]);
        assert_eq!(
            output,
            vec!["# dangling", "Name:           foo", "# at the end", ""]
        );
    }

    #[test]
    fn test_package_first_line_passthrough() {
        let mut preamble = Preamble::package(tables(), Vec::new());
        assert_eq!(preamble.kind(), SectionKind::Package);
        preamble.add("%package   devel").unwrap();
        preamble.add("Requires: %{name} = %{version}-%{release}").unwrap();
        preamble.add("Summary: Development files").unwrap();
        let output = preamble.finish().unwrap();
        assert_eq!(
            output,
            vec![
                "%package   devel",
                "Summary:        Development files",
                "Requires:       %{name} = %{version}",
                "",
            ]
        );
    }

    #[test]
    fn test_flush_once_per_paragraph() {
        let mut sink = CountingSink::default();
        let mut preamble = Preamble::new(tables(), &mut sink);
        for line in ["Name: foo", "%if 1", "Requires: a", "%endif", "Version: 1"] {
            preamble.add(line).unwrap();
        }
        preamble.finish().unwrap();
        assert_eq!(sink.flushes, 3);
        assert_eq!(sink.lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_paragraph_state() {
        let mut preamble = Preamble::new(tables(), Vec::new());
        preamble.add("# comment").unwrap();
        preamble.add("Requires: libbar").unwrap();
        let groups = preamble.paragraph().groups(Category::Requires);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].attachments(), &["# comment".to_string()]);
        assert_eq!(groups[0].line(), "Requires:       pkgconfig(bar1)");
        assert!(groups[1].attachments().is_empty());
        assert_eq!(preamble.paragraph().group_count(), 2);
    }

    #[test]
    fn test_unhandled_category_is_an_error() {
        let mut preamble = Preamble::new(tables(), Vec::new());
        let result = preamble.add_value(Category::ProvidesObsoletes, "foo", None, None);
        assert!(matches!(result, Err(Error::UnhandledCategory(_))));
    }

    #[test]
    fn test_output_is_a_fixed_point() {
        let input = [
            "Requires: libfoo.so.1 >= 2, libbar",
            "PreReq: sh",
            "Patch: fix.patch",
            "Name: foo",
            "%if 0%{?is_opensuse}",
            "Recommends: b a",
            "%endif",
        ];
        let once = clean(&input);
        let refs: Vec<&str> = once.iter().map(String::as_str).collect();
        let twice = clean(&refs);
        assert_eq!(once, twice);
    }
}
