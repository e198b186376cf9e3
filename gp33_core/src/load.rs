// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Load the processed GP33 TCR table.  The file is comma-separated with a header row.  Only the
// tetramer and nCells columns are used; any others are ignored.

use crate::defs::{Dataset, TcrRecord, Tetramer};
use crate::error::{PlotError, Result};
use log::{info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 2] = ["tetramer", "nCells"];

pub fn load_dataset(data_path: &Path) -> Result<Dataset> {
    let f = File::open(data_path).map_err(|source| PlotError::Input {
        path: data_path.to_path_buf(),
        source,
    })?;
    let data = read_records(f, data_path)?;
    info!("loaded {} records from {}", data.len(), data_path.display());
    let unrecognized = data.unrecognized();
    if unrecognized > 0 {
        warn!(
            "{} records have a tetramer category other than {}, {} or {} and will not be plotted",
            unrecognized,
            Tetramer::TetNeg,
            Tetramer::TetMid,
            Tetramer::TetPos
        );
    }
    let missing = data.missing();
    if missing > 0 {
        warn!("{} records have no nCells value and will not be drawn", missing);
    }
    Ok(data)
}

// Parse records from any reader.  The path is only used in error messages.

pub fn read_records<R: Read>(r: R, data_path: &Path) -> Result<Dataset> {
    let csv_err = |source| PlotError::Csv {
        path: data_path.to_path_buf(),
        source,
    };
    let mut rdr = csv::Reader::from_reader(r);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    for col in REQUIRED_COLUMNS.iter() {
        if !headers.iter().any(|h| h == *col) {
            return Err(PlotError::MissingColumn {
                path: data_path.to_path_buf(),
                column: col.to_string(),
            });
        }
    }
    let mut records = Vec::<TcrRecord>::new();
    for rec in rdr.deserialize::<TcrRecord>() {
        records.push(rec.map_err(csv_err)?);
    }
    Ok(Dataset::new(records))
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_str(csv: &str) -> Result<Dataset> {
        read_records(csv.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let d = load_str(
            "cdr3,tetramer,nCells,clonotype\n\
             CASSL,TetNeg,5,c1\n\
             CASRD,TetPos,10,c2\n\
             CASGG,TetNeg,2,c3\n",
        )
        .unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.records()[0], TcrRecord::new("TetNeg", 2.0));
        assert_eq!(d.records()[2], TcrRecord::new("TetPos", 10.0));
    }

    #[test]
    fn test_fractional_counts() {
        let d = load_str("tetramer,nCells\nTetMid,3.0\nTetMid,1.5\n").unwrap();
        assert_eq!(d.max_ncells().unwrap(), 3.0);
    }

    #[test]
    fn test_missing_column() {
        match load_str("tetramer,cells\nTetNeg,5\n") {
            Err(PlotError::MissingColumn { column, .. }) => assert_eq!(column, "nCells"),
            other => panic!("expected missing column, got {:?}", other),
        }
        match load_str("nCells\n5\n") {
            Err(PlotError::MissingColumn { column, .. }) => assert_eq!(column, "tetramer"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_count() {
        let e = load_str("tetramer,nCells\nTetNeg,many\n").unwrap_err();
        assert!(matches!(e, PlotError::Csv { .. }));
    }

    #[test]
    fn test_missing_counts_are_loaded_as_nan() {
        for missing in ["", "NaN", "NA", " nan "].iter() {
            let csv = format!("tetramer,nCells\nTetNeg,5\nTetPos,{}\nTetNeg,2\n", missing);
            let d = load_str(&csv).unwrap();
            assert_eq!(d.len(), 3);
            assert_eq!(d.missing(), 1);
            assert_eq!(d.records()[0], TcrRecord::new("TetNeg", 2.0));
            assert_eq!(d.records()[1], TcrRecord::new("TetNeg", 5.0));
            assert_eq!(d.records()[2].tetramer, "TetPos");
            assert!(d.records()[2].n_cells.is_nan());
            assert!((d.ymax().unwrap() - 5.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_only_missing_counts_is_no_data() {
        let d = load_str("tetramer,nCells\nTetPos,\nTetNeg,NaN\n").unwrap();
        assert_eq!(d.len(), 2);
        assert!(matches!(d.max_ncells(), Err(PlotError::EmptyData(_))));
    }

    #[test]
    fn test_header_only_gives_empty_dataset() {
        let d = load_str("tetramer,nCells\n").unwrap();
        assert!(d.is_empty());
        assert!(matches!(d.max_ncells(), Err(PlotError::EmptyData(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gp33.csv");
        fs::write(&path, "tetramer,nCells\nUnknown,8\nTetPos,1\n").unwrap();
        let d = load_dataset(&path).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.unrecognized(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let e = load_dataset(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(e, PlotError::Input { .. }));
        assert!(e.to_string().contains("absent.csv"));
    }
}
