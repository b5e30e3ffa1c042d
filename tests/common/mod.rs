// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use spec_cleaner::{Category, ConversionTables, LineKind, Preamble, classify};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// License alias table used by the integration tests
pub const LICENSES: &str = "\
First line
Foo-1.0\tFoo
Bar-2.0\tBar
GPL-2.0+\tGPLv2+
";

/// pkg-config conversion table used by the integration tests
pub const PKGCONFIG: &str = "\
libfoo: foo
libbar: bar1 bar2
glib2-devel: glib-2.0 gobject-2.0
";

/// Write both tables to disk and load them the way the CLI does.
///
/// Returns (TempDir, tables) - keep the TempDir alive while using paths.
pub fn load_tables() -> (TempDir, Arc<ConversionTables>) {
    let dir = tempfile::tempdir().unwrap();
    let licenses = dir.path().join("licenses_changes.txt");
    let pkgconfig = dir.path().join("pkgconfig_conversions.txt");
    fs::write(&licenses, LICENSES).unwrap();
    fs::write(&pkgconfig, PKGCONFIG).unwrap();

    let tables = ConversionTables::load(Some(licenses.as_path()), Some(pkgconfig.as_path())).unwrap();
    (dir, Arc::new(tables))
}

/// Run a main preamble through the engine
pub fn clean_lines(tables: &Arc<ConversionTables>, input: &[&str]) -> Vec<String> {
    let mut preamble = Preamble::new(Arc::clone(tables), Vec::new());
    for line in input {
        preamble.add(line).unwrap();
    }
    preamble.finish().unwrap()
}

/// Category a canonical output line belongs to, `None` for attachments
/// and conditional directives
pub fn category_of(line: &str) -> Option<Category> {
    match classify(line) {
        LineKind::Definition => Some(Category::Definitions),
        LineKind::Source { .. } => Some(Category::Source),
        LineKind::Patch { .. } => Some(Category::Patch),
        LineKind::PreReq { .. } => Some(Category::PreReq),
        LineKind::RequiresPhase { .. } => Some(Category::RequiresPhase),
        LineKind::Provides { .. } | LineKind::Obsoletes { .. } => {
            Some(Category::ProvidesObsoletes)
        }
        LineKind::BuildRoot => Some(Category::BuildRoot),
        LineKind::License { .. } => Some(Category::License),
        LineKind::Release => Some(Category::Release),
        LineKind::SummaryLocalized { .. } => Some(Category::SummaryLocalized),
        LineKind::Tag { category, .. } => Some(category),
        LineKind::Unknown => Some(Category::Misc),
        LineKind::Conditional
        | LineKind::Comment
        | LineKind::InlineMacro
        | LineKind::Deprecated(_) => None,
    }
}
