// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The source and spectral-line catalogues.
//!
//! Both tables are read once at startup and passed around immutably. All
//! lookups are exact string matches; a typo must fail loudly rather than
//! point a reduction at the wrong source or transition.

mod error;
mod read;

pub(crate) use error::CatalogueError;
pub(crate) use read::{read_line_catalogue, read_source_catalogue};

use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

lazy_static::lazy_static! {
    pub(crate) static ref SOURCE_CATALOGUE_TYPES_COMMA_SEPARATED: String = {
        use strum::IntoEnumIterator;
        SourceCatalogueType::iter().join(", ")
    };
}

/// Supported on-disk formats for the source catalogue, named by extension.
#[derive(Debug, Display, EnumIter, EnumString)]
pub(crate) enum SourceCatalogueType {
    #[strum(serialize = "csv")]
    Csv,
    #[strum(serialize = "toml")]
    Toml,
}

/// One target region of the observing programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Source {
    /// Source identifier in the 30-m archive. May carry a trailing `*`,
    /// which the interpreter expands itself.
    pub(crate) source_30m: String,
    /// Source name stamped into the output products.
    pub(crate) source_out: String,
    /// Right ascension of the phase centre \[degrees\].
    pub(crate) ra: f64,
    /// Declination of the phase centre \[degrees\].
    pub(crate) dec: f64,
    /// Systemic LSR velocity \[km/s\].
    pub(crate) vlsr: f64,
}

/// An [`IndexMap`] of source names for keys and [`Source`] structs for
/// values, in catalogue order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct SourceCatalogue(IndexMap<String, Source>);

impl SourceCatalogue {
    /// Exact-match lookup, falling back to a unique case-insensitive match
    /// so `b5` finds `B5`. An unknown name, or one that several keys match
    /// when ignoring case, is an error carrying every valid key; nothing is
    /// ever guessed.
    pub(crate) fn get_source(&self, name: &str) -> Result<&Source, CatalogueError> {
        if let Some(source) = self.0.get(name) {
            return Ok(source);
        }

        let mut matches = self
            .0
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, source)| source);
        match (matches.next(), matches.next()) {
            (Some(source), None) => Ok(source),
            _ => Err(CatalogueError::SourceNotFound {
                name: name.to_string(),
                valid: self.0.keys().join(", "),
            }),
        }
    }
}

impl Deref for SourceCatalogue {
    type Target = IndexMap<String, Source>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SourceCatalogue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<IndexMap<String, Source>> for SourceCatalogue {
    fn from(map: IndexMap<String, Source>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Source)> for SourceCatalogue {
    fn from_iter<T: IntoIterator<Item = (String, Source)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One spectral-line transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Line {
    /// Molecule name, e.g. `N2Hp`. The first lookup key.
    pub(crate) name: String,
    /// File-name-safe quantum number, e.g. `1-0`.
    pub(crate) qn: String,
    /// Rest frequency \[GHz\].
    pub(crate) freq_ghz: f64,
    /// Line name written into the reduced spectra, e.g. `N2H+(1-0)`.
    pub(crate) name_str: String,
    /// Quantum-number string as users type it. The second lookup key.
    pub(crate) qn_str: String,
    /// Id of the spectral window covering this transition, e.g. `L09`.
    pub(crate) lid: String,
    /// Half-width of the uv-table extraction range \[km/s\].
    pub(crate) vel_width: f64,
    /// Half-width of the 30-m extraction range \[km/s\].
    pub(crate) vel_width_30m: f64,
    /// Half-width of the 30-m baseline window \[km/s\].
    pub(crate) vel_width_base_30m: f64,
}

impl Line {
    /// The rest frequency the way the interpreters want it.
    pub(crate) fn freq_mhz(&self) -> f64 {
        self.freq_ghz * 1e3
    }
}

/// All catalogued transitions, in catalogue order. Molecule names repeat
/// when multiple transitions of the same species are covered.
#[derive(Debug, Clone, Default)]
pub(crate) struct LineCatalogue(Vec<Line>);

impl LineCatalogue {
    /// Exact-match lookup on the molecule name and, when given, the
    /// quantum-number string. Omitting the quantum number is only valid
    /// when the molecule has a single catalogue entry.
    pub(crate) fn get_line(&self, name: &str, qn: Option<&str>) -> Result<&Line, CatalogueError> {
        let named: Vec<&Line> = self.0.iter().filter(|line| line.name == name).collect();
        if named.is_empty() {
            return Err(CatalogueError::LineNotFound {
                name: name.to_string(),
                valid: self.0.iter().map(|line| line.name.as_str()).unique().join(", "),
            });
        }

        match qn {
            None => match named.as_slice() {
                [only] => Ok(only),
                _ => Err(CatalogueError::AmbiguousLine {
                    name: name.to_string(),
                    qns: named.iter().map(|line| line.qn_str.as_str()).join(", "),
                }),
            },

            Some(qn) => named
                .iter()
                .find(|line| line.qn_str == qn)
                .copied()
                .ok_or_else(|| CatalogueError::QnNotFound {
                    name: name.to_string(),
                    qn: qn.to_string(),
                    valid: named.iter().map(|line| line.qn_str.as_str()).join(", "),
                }),
        }
    }
}

impl Deref for LineCatalogue {
    type Target = Vec<Line>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LineCatalogue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Line>> for LineCatalogue {
    fn from(lines: Vec<Line>) -> Self {
        Self(lines)
    }
}

impl FromIterator<Line> for LineCatalogue {
    fn from_iter<T: IntoIterator<Item = Line>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
