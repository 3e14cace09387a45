// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading catalogue files.
//!
//! The line catalogue is always csv. The source catalogue may be csv or
//! toml; the file extension decides which decoder runs.

use std::{collections::HashSet, path::Path, str::FromStr};

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;

use super::{
    CatalogueError, Line, LineCatalogue, Source, SourceCatalogue, SourceCatalogueType,
    SOURCE_CATALOGUE_TYPES_COMMA_SEPARATED,
};
use crate::sexagesimal::{parse_dec, parse_ra};

/// Total number of columns in the line catalogue. Only a subset is consumed
/// here; the rest belong to the survey bookkeeping.
const LINE_CATALOGUE_COLUMNS: usize = 15;

// Positions of the consumed line-catalogue columns.
const COL_NAME: usize = 0;
const COL_QN: usize = 1;
const COL_FREQ: usize = 2;
const COL_NAME_STR: usize = 3;
const COL_QN_STR: usize = 4;
const COL_LID: usize = 9;
const COL_VEL_WIDTH: usize = 10;
const COL_VEL_WIDTH_30M: usize = 13;
const COL_VEL_WIDTH_BASE_30M: usize = 14;

/// Number of columns in the csv flavour of the source catalogue.
const SOURCE_CATALOGUE_COLUMNS: usize = 6;

/// Read a source catalogue, dispatching on the file extension.
pub(crate) fn read_source_catalogue(path: &Path) -> Result<SourceCatalogue, CatalogueError> {
    debug!("Attempting to read source catalogue {}", path.display());
    if !path.exists() {
        return Err(CatalogueError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    let sources = match ext.as_deref().and_then(|e| SourceCatalogueType::from_str(e).ok()) {
        Some(SourceCatalogueType::Csv) => source_catalogue_from_csv(path)?,
        Some(SourceCatalogueType::Toml) => source_catalogue_from_toml(path)?,
        None => {
            return Err(CatalogueError::UnrecognisedExtension {
                path: path.display().to_string(),
                valid: SOURCE_CATALOGUE_TYPES_COMMA_SEPARATED.clone(),
            })
        }
    };

    if sources.is_empty() {
        return Err(CatalogueError::Empty {
            path: path.display().to_string(),
        });
    }
    debug!("Found {} sources", sources.len());
    Ok(sources)
}

fn source_catalogue_from_csv(path: &Path) -> Result<SourceCatalogue, CatalogueError> {
    let mut reader = csv_reader(path)?;

    let mut sources = IndexMap::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|err| CatalogueError::Csv {
            path: path.display().to_string(),
            err: Box::new(err),
        })?;
        let record_num = i as u64 + 1;
        if record.len() != SOURCE_CATALOGUE_COLUMNS {
            return Err(CatalogueError::WrongFieldCount {
                path: path.display().to_string(),
                record: record_num,
                expected: SOURCE_CATALOGUE_COLUMNS,
                found: record.len(),
            });
        }

        let name = record[0].to_string();
        trace!("Source record {record_num}: {name}");
        let coord_err = |err| CatalogueError::Coordinate {
            path: path.display().to_string(),
            name: name.clone(),
            err,
        };
        let source = Source {
            source_30m: record[1].to_string(),
            source_out: record[2].to_string(),
            ra: parse_ra(&record[3]).map_err(&coord_err)?,
            dec: parse_dec(&record[4]).map_err(&coord_err)?,
            vlsr: parse_f64(path, record_num, "vlsr", &record[5])?,
        };
        if sources.insert(name.clone(), source).is_some() {
            return Err(CatalogueError::DuplicateSource {
                path: path.display().to_string(),
                name,
            });
        }
    }

    Ok(sources.into())
}

/// ra and dec may be sexagesimal strings or plain decimal degrees.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlCoord {
    Degrees(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct TomlSource {
    source_30m: String,
    source_out: String,
    ra: TomlCoord,
    dec: TomlCoord,
    vlsr: f64,
}

fn source_catalogue_from_toml(path: &Path) -> Result<SourceCatalogue, CatalogueError> {
    let contents = std::fs::read_to_string(path)?;
    let raw: IndexMap<String, TomlSource> =
        toml::from_str(&contents).map_err(|err| CatalogueError::Toml {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    let mut sources = IndexMap::new();
    for (name, raw_source) in raw {
        let coord_err = |err| CatalogueError::Coordinate {
            path: path.display().to_string(),
            name: name.clone(),
            err,
        };
        let ra = match raw_source.ra {
            TomlCoord::Degrees(d) => d,
            TomlCoord::Text(s) => parse_ra(&s).map_err(&coord_err)?,
        };
        let dec = match raw_source.dec {
            TomlCoord::Degrees(d) => d,
            TomlCoord::Text(s) => parse_dec(&s).map_err(&coord_err)?,
        };
        sources.insert(
            name,
            Source {
                source_30m: raw_source.source_30m,
                source_out: raw_source.source_out,
                ra,
                dec,
                vlsr: raw_source.vlsr,
            },
        );
    }

    Ok(sources.into())
}

/// Read the line catalogue (always csv).
pub(crate) fn read_line_catalogue(path: &Path) -> Result<LineCatalogue, CatalogueError> {
    debug!("Attempting to read line catalogue {}", path.display());
    if !path.exists() {
        return Err(CatalogueError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv_reader(path)?;
    let mut lines: Vec<Line> = vec![];
    let mut seen = HashSet::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|err| CatalogueError::Csv {
            path: path.display().to_string(),
            err: Box::new(err),
        })?;
        let record_num = i as u64 + 1;
        if record.len() != LINE_CATALOGUE_COLUMNS {
            return Err(CatalogueError::WrongFieldCount {
                path: path.display().to_string(),
                record: record_num,
                expected: LINE_CATALOGUE_COLUMNS,
                found: record.len(),
            });
        }

        trace!("Line record {record_num}: {}", &record[COL_NAME]);
        let line = Line {
            name: record[COL_NAME].to_string(),
            qn: record[COL_QN].to_string(),
            freq_ghz: parse_f64(path, record_num, "frequency", &record[COL_FREQ])?,
            name_str: record[COL_NAME_STR].to_string(),
            qn_str: record[COL_QN_STR].to_string(),
            lid: record[COL_LID].to_string(),
            vel_width: parse_f64(path, record_num, "vel_width", &record[COL_VEL_WIDTH])?,
            vel_width_30m: parse_f64(
                path,
                record_num,
                "vel_width_30m",
                &record[COL_VEL_WIDTH_30M],
            )?,
            vel_width_base_30m: parse_f64(
                path,
                record_num,
                "vel_width_base_30m",
                &record[COL_VEL_WIDTH_BASE_30M],
            )?,
        };
        // A (name, quantum number) key must stay unique or lookups would
        // silently pick one of the rows.
        if !seen.insert((line.name.clone(), line.qn_str.clone())) {
            return Err(CatalogueError::DuplicateLine {
                path: path.display().to_string(),
                name: line.name,
                qn: line.qn_str,
            });
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return Err(CatalogueError::Empty {
            path: path.display().to_string(),
        });
    }
    debug!("Found {} line entries", lines.len());
    Ok(lines.into())
}

fn csv_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, CatalogueError> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|err| CatalogueError::Csv {
            path: path.display().to_string(),
            err: Box::new(err),
        })
}

fn parse_f64(
    path: &Path,
    record: u64,
    column: &'static str,
    value: &str,
) -> Result<f64, CatalogueError> {
    value.parse().map_err(|_| CatalogueError::ParseFloat {
        path: path.display().to_string(),
        record,
        column,
        value: value.to_string(),
    })
}
