// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate parsing for the source catalogue.
//!
//! Right ascensions may be colon-separated hours (`3:47:41.59`) and
//! declinations colon-separated degrees (`+32:51:43.6`). Anything without a
//! colon is taken to be decimal degrees. Both parsers return degrees.

use thiserror::Error;

/// Parse a right ascension, either `hh:mm:ss.s` or decimal degrees.
pub(crate) fn parse_ra(s: &str) -> Result<f64, SexagesimalError> {
    match parse_colon_form(s)? {
        Some(hours) => Ok(hours * 15.0),
        None => parse_decimal(s),
    }
}

/// Parse a declination, either `[+-]dd:mm:ss.s` or decimal degrees.
pub(crate) fn parse_dec(s: &str) -> Result<f64, SexagesimalError> {
    match parse_colon_form(s)? {
        Some(degrees) => Ok(degrees),
        None => parse_decimal(s),
    }
}

fn parse_decimal(s: &str) -> Result<f64, SexagesimalError> {
    s.trim().parse().map_err(|_| SexagesimalError::Unrecognised {
        coord: s.to_string(),
    })
}

/// Parse `[+-]A:B:C` into a signed decimal value of the leading unit, or
/// `None` when the string contains no colon.
fn parse_colon_form(s: &str) -> Result<Option<f64>, SexagesimalError> {
    let trimmed = s.trim();
    if !trimmed.contains(':') {
        return Ok(None);
    }

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let fields: Vec<&str> = unsigned.split(':').collect();
    let &[whole, minutes, seconds] = fields.as_slice() else {
        return Err(SexagesimalError::Unrecognised {
            coord: s.to_string(),
        });
    };
    let parse = |field: &str| -> Result<f64, SexagesimalError> {
        field.trim().parse().map_err(|_| SexagesimalError::Unrecognised {
            coord: s.to_string(),
        })
    };
    let whole = parse(whole)?;
    let minutes = parse(minutes)?;
    let seconds = parse(seconds)?;
    if whole < 0.0 || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(SexagesimalError::BadField {
            coord: s.to_string(),
        });
    }

    Ok(Some(sign * (whole + minutes / 60.0 + seconds / 3600.0)))
}

#[derive(Error, Debug)]
pub(crate) enum SexagesimalError {
    #[error("Couldn't parse {coord:?} as a sexagesimal or decimal coordinate")]
    Unrecognised { coord: String },

    #[error("Coordinate {coord:?} has a minutes or seconds field outside [0, 60)")]
    BadField { coord: String },
}
