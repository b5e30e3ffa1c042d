// src/tables.rs

//! Conversion tables used while normalizing preamble values
//!
//! Two flat text resources feed the engine:
//!
//! - `licenses_changes.txt`: a header line, then `canonical<TAB>deprecated`
//!   pairs. Lookups go from the deprecated spelling to the canonical one.
//! - `pkgconfig_conversions.txt`: `name: pc1 pc2 ...` lines mapping a
//!   package (usually a `-devel` package or library) to the pkg-config
//!   modules that replace it in dependency lists.
//!
//! Tables are loaded once and never mutated afterwards, so one instance can
//! be shared between any number of documents.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Default file name of the license alias table
pub const LICENSES_FILE: &str = "licenses_changes.txt";

/// Default file name of the pkg-config conversion table
pub const PKGCONFIG_FILE: &str = "pkgconfig_conversions.txt";

/// Read-only lookup tables for license and package-name rewriting
#[derive(Debug, Clone, Default)]
pub struct ConversionTables {
    /// deprecated license token -> canonical token
    licenses: HashMap<String, String>,
    /// package name -> pkg-config module names, in table order
    pkgconfig: HashMap<String, Vec<String>>,
}

impl ConversionTables {
    pub fn new(licenses: HashMap<String, String>, pkgconfig: HashMap<String, Vec<String>>) -> Self {
        Self {
            licenses,
            pkgconfig,
        }
    }

    /// Build tables from the text of both resources
    pub fn from_strs(licenses: &str, pkgconfig: &str) -> Self {
        Self::new(parse_licenses(licenses), parse_pkgconfig(pkgconfig))
    }

    /// Load tables from files; a `None` path yields an empty table
    pub fn load(licenses: Option<&Path>, pkgconfig: Option<&Path>) -> Result<Self> {
        let licenses = match licenses {
            Some(path) => parse_licenses(&read_table(path)?),
            None => HashMap::new(),
        };
        let pkgconfig = match pkgconfig {
            Some(path) => parse_pkgconfig(&read_table(path)?),
            None => HashMap::new(),
        };

        debug!(
            "Loaded {} license aliases and {} pkg-config conversions",
            licenses.len(),
            pkgconfig.len()
        );

        Ok(Self::new(licenses, pkgconfig))
    }

    /// Canonical spelling for a deprecated license token
    pub fn license_alias(&self, token: &str) -> Option<&str> {
        self.licenses.get(token).map(|s| s.as_str())
    }

    /// pkg-config modules replacing a package name
    pub fn pkgconfig_modules(&self, package: &str) -> Option<&[String]> {
        self.pkgconfig.get(package).map(|v| v.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty() && self.pkgconfig.is_empty()
    }
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!(
            "Failed to read conversion table {}: {}",
            path.display(),
            e
        ))
    })
}

/// Parse the license alias resource
///
/// The first line is a header and is always skipped.
pub fn parse_licenses(content: &str) -> HashMap<String, String> {
    let mut licenses = HashMap::new();

    for (number, line) in content.lines().enumerate().skip(1) {
        if line.is_empty() {
            continue;
        }
        match line.split('\t').collect::<Vec<_>>().as_slice() {
            [canonical, deprecated] => {
                licenses.insert((*deprecated).to_string(), (*canonical).to_string());
            }
            _ => warn!("Skipping malformed license table line {}: {:?}", number + 1, line),
        }
    }

    licenses
}

/// Parse the pkg-config conversion resource
pub fn parse_pkgconfig(content: &str) -> HashMap<String, Vec<String>> {
    let mut pkgconfig = HashMap::new();

    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once(": ") {
            Some((name, modules)) if !name.is_empty() => {
                let modules: Vec<String> = modules.split_whitespace().map(String::from).collect();
                if modules.is_empty() {
                    warn!("Skipping pkg-config table line {} without modules", number + 1);
                    continue;
                }
                pkgconfig.insert(name.to_string(), modules);
            }
            _ => warn!("Skipping malformed pkg-config table line {}: {:?}", number + 1, line),
        }
    }

    pkgconfig
}
