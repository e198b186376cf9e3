// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::error::{PlotError, Result};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// Headroom above the largest count, shared by all plots.

pub const YMAX_EXT: f64 = 1.02;

// Cell values that mean "no count", as written by the usual data frame tools.  These load as NaN.

pub const MISSING_COUNTS: [&str; 11] = [
    "", "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "<NA>", "NULL", "null",
];

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Tetramer binding category of a TCR.  Only these three are plotted; the order of `ALL` is the
/// order in which plots are made.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tetramer {
    TetNeg,
    TetMid,
    TetPos,
}

impl Tetramer {
    pub const ALL: [Tetramer; 3] = [Tetramer::TetNeg, Tetramer::TetMid, Tetramer::TetPos];

    pub fn name(self) -> &'static str {
        match self {
            Tetramer::TetNeg => "TetNeg",
            Tetramer::TetMid => "TetMid",
            Tetramer::TetPos => "TetPos",
        }
    }

    // Plot color as (r, g, b): blue, orange, red.

    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Tetramer::TetNeg => (0, 0, 255),
            Tetramer::TetMid => (255, 165, 0),
            Tetramer::TetPos => (255, 0, 0),
        }
    }
}

impl fmt::Display for Tetramer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tetramer {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Tetramer::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unrecognized tetramer category '{}'", s))
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// One row of the input table.  The label is kept as text because rows having a label other than
/// the three known categories are allowed; they just never get plotted.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TcrRecord {
    pub tetramer: String,
    #[serde(rename = "nCells", deserialize_with = "de_count")]
    pub n_cells: f64,
}

// A count is a number or one of MISSING_COUNTS, which becomes NaN.

fn de_count<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    let s = String::deserialize(d)?;
    let s = s.trim();
    if MISSING_COUNTS.contains(&s) {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("can't parse nCells value '{}'", s)))
}

// Order by count, with missing (NaN) counts after everything else, whatever their sign bit.

fn cmp_counts(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

impl TcrRecord {
    pub fn new(tetramer: &str, n_cells: f64) -> TcrRecord {
        TcrRecord {
            tetramer: tetramer.to_string(),
            n_cells,
        }
    }

    pub fn is(&self, tetramer: Tetramer) -> bool {
        self.tetramer == tetramer.name()
    }
}

/// All records, sorted once by increasing nCells.  Ties keep their input order, and records with a
/// missing count come last.  There is no way to mutate the records after construction.

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TcrRecord>,
}

impl Dataset {
    pub fn new(mut records: Vec<TcrRecord>) -> Dataset {
        records.sort_by(|a, b| cmp_counts(a.n_cells, b.n_cells));
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TcrRecord] {
        &self.records
    }

    // Records of one category, in sorted order.

    pub fn select(&self, tetramer: Tetramer) -> impl Iterator<Item = &TcrRecord> + '_ {
        self.records.iter().filter(move |r| r.is(tetramer))
    }

    pub fn unrecognized(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.tetramer.parse::<Tetramer>().is_err())
            .count()
    }

    // Records whose count is missing.  They are never drawn and don't affect the maximum.

    pub fn missing(&self) -> usize {
        self.records.iter().filter(|r| r.n_cells.is_nan()).count()
    }

    // Since the records are sorted, the maximum is the last one that has a count.

    pub fn max_ncells(&self) -> Result<f64> {
        if self.records.is_empty() {
            return Err(PlotError::EmptyData(
                "the dataset has no rows, so there is no maximum nCells".to_string(),
            ));
        }
        match self.records.iter().rev().find(|r| !r.n_cells.is_nan()) {
            Some(r) if !r.n_cells.is_finite() => Err(PlotError::BadCount(format!(
                "{} for a {} TCR",
                r.n_cells, r.tetramer
            ))),
            Some(r) => Ok(r.n_cells),
            None => Err(PlotError::EmptyData(format!(
                "all {} rows are missing nCells, so there is no maximum",
                self.records.len()
            ))),
        }
    }

    // Fails if the bound itself overflows, which can happen to a finite maximum near f64::MAX.

    pub fn ymax(&self) -> Result<f64> {
        let max = self.max_ncells()?;
        let ymax = max * YMAX_EXT;
        if !ymax.is_finite() {
            return Err(PlotError::BadCount(format!(
                "{} is too large to leave room above it on the y axis",
                max
            )));
        }
        Ok(ymax)
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓
