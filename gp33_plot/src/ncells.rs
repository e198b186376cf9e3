// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Plot the number of cells for each GP33 TCR, one plot per tetramer category.  Within a category,
// TCRs are placed left to right in order of increasing nCells, and all plots share the same
// y axis so they can be compared by eye.

use crate::pdf::PdfConverter;
use crate::scatter::ScatterPlot;
use gp33_core::defs::{Dataset, Tetramer};
use gp33_core::error::{PlotError, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const XVAR: &str = "TCR Index";
pub const YVAR: &str = "nCells";

pub fn ncells_filename(tetramer: Tetramer) -> String {
    format!("{}_nCells.pdf", tetramer.name())
}

pub fn ncells_title(tetramer: Tetramer) -> String {
    format!("Number of Cells for {} TCR Sequences", tetramer.name())
}

// Records with a missing count get no point.  They sort last, so the remaining points still have
// x values 0..n.

pub fn ncells_plot(data: &Dataset, tetramer: Tetramer, ymax: f64) -> ScatterPlot {
    let points = data
        .select(tetramer)
        .enumerate()
        .filter(|(_, r)| !r.n_cells.is_nan())
        .map(|(i, r)| (i as f64, r.n_cells))
        .collect::<Vec<_>>();
    ScatterPlot {
        title: ncells_title(tetramer),
        xvar: XVAR.to_string(),
        yvar: YVAR.to_string(),
        label: tetramer.name().to_string(),
        color: tetramer.color(),
        points,
        ylow: 0.0,
        yhigh: ymax,
    }
}

// The three plots, in the order of Tetramer::ALL.  Fails if the dataset is empty.

pub fn ncells_plots(data: &Dataset) -> Result<Vec<ScatterPlot>> {
    let ymax = data.ymax()?;
    debug!("shared y axis is [0, {}]", ymax);
    Ok(Tetramer::ALL
        .iter()
        .map(|t| ncells_plot(data, *t, ymax))
        .collect())
}

// Render the plots and write them to save_dir, replacing existing files.  Returns the paths
// written, in the order of Tetramer::ALL.  Nothing is written if the dataset is empty.

pub fn plot_ncells(data: &Dataset, save_dir: &Path) -> Result<Vec<PathBuf>> {
    let plots = ncells_plots(data)?;
    let pdf = PdfConverter::new();
    let mut paths = Vec::<PathBuf>::new();
    for (tetramer, plot) in Tetramer::ALL.iter().zip(plots.iter()) {
        if plot.points.is_empty() {
            warn!("there are no {} TCRs with a count, so its plot will be empty", tetramer);
        }
        let bytes = pdf.convert(&plot.to_svg()?)?;
        let path = save_dir.join(ncells_filename(*tetramer));
        fs::write(&path, &bytes).map_err(|source| PlotError::Output {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}: {}", path.display(), plot.summary());
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp33_core::defs::TcrRecord;

    fn example() -> Dataset {
        Dataset::new(vec![
            TcrRecord::new("TetNeg", 5.0),
            TcrRecord::new("TetPos", 10.0),
            TcrRecord::new("TetNeg", 2.0),
        ])
    }

    #[test]
    fn test_ncells_plots() {
        let plots = ncells_plots(&example()).unwrap();
        assert_eq!(plots.len(), 3);
        let (neg, mid, pos) = (&plots[0], &plots[1], &plots[2]);
        assert_eq!(neg.label, "TetNeg");
        assert_eq!(neg.points, vec![(0.0, 2.0), (1.0, 5.0)]);
        assert_eq!(neg.color, (0, 0, 255));
        assert!(mid.points.is_empty());
        assert_eq!(mid.color, (255, 165, 0));
        assert_eq!(pos.points, vec![(0.0, 10.0)]);
        assert_eq!(pos.title, "Number of Cells for TetPos TCR Sequences");
        for p in plots.iter() {
            assert_eq!(p.ylow, 0.0);
            assert!((p.yhigh - 10.2).abs() < 1e-9);
            assert_eq!(p.xvar, "TCR Index");
            assert_eq!(p.yvar, "nCells");
        }
    }

    #[test]
    fn test_each_record_in_at_most_one_plot() {
        let data = Dataset::new(vec![
            TcrRecord::new("TetMid", 7.0),
            TcrRecord::new("Unknown", 50.0),
            TcrRecord::new("TetMid", 1.0),
            TcrRecord::new("TetPos", 3.0),
            TcrRecord::new("TetNeg", 3.0),
            TcrRecord::new("TetMid", 3.0),
        ]);
        let plots = ncells_plots(&data).unwrap();
        let total: usize = plots.iter().map(|p| p.points.len()).sum();
        assert_eq!(total, data.len() - data.unrecognized());

        // x values are 0..n within each plot.

        for p in plots.iter() {
            let xs = p.points.iter().map(|q| q.0).collect::<Vec<_>>();
            let expected = (0..p.points.len()).map(|i| i as f64).collect::<Vec<_>>();
            assert_eq!(xs, expected);
        }
        assert_eq!(plots[1].points, vec![(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)]);
        assert!((plots[0].yhigh - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_counts_are_not_drawn() {
        let data = Dataset::new(vec![
            TcrRecord::new("TetNeg", 5.0),
            TcrRecord::new("TetPos", f64::NAN),
            TcrRecord::new("TetNeg", 2.0),
            TcrRecord::new("TetPos", 1.0),
        ]);
        let plots = ncells_plots(&data).unwrap();
        assert_eq!(plots[0].points, vec![(0.0, 2.0), (1.0, 5.0)]);
        assert_eq!(plots[2].points, vec![(0.0, 1.0)]);
        for p in plots.iter() {
            assert!((p.yhigh - 5.1).abs() < 1e-9);
        }
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(plot_ncells(&data, dir.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_large_counts_keep_full_precision() {
        let data = Dataset::new(vec![
            TcrRecord::new("TetMid", 16_777_217.0),
            TcrRecord::new("TetMid", 4.0e38),
        ]);
        let plots = ncells_plots(&data).unwrap();
        assert_eq!(plots[1].points, vec![(0.0, 16_777_217.0), (1.0, 4.0e38)]);
        assert!(plots[1].yhigh.is_finite());
        assert!((plots[1].yhigh / 4.08e38 - 1.0).abs() < 1e-12);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(plot_ncells(&data, dir.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let e = plot_ncells(&Dataset::new(Vec::new()), dir.path()).unwrap_err();
        assert!(matches!(e, PlotError::EmptyData(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_plot_ncells_writes_three_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = plot_ncells(&example(), dir.path()).unwrap();
        let names = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["TetNeg_nCells.pdf", "TetMid_nCells.pdf", "TetPos_nCells.pdf"]
        );
        for p in paths.iter() {
            assert!(fs::read(p).unwrap().starts_with(b"%PDF"));
        }

        // A second run replaces the files rather than adding to them.

        plot_ncells(&example(), dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    // Object headers ("12 0 obj") in file order.

    fn pdf_objects(pdf: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(pdf)
            .lines()
            .filter(|l| l.ends_with(" obj"))
            .map(|l| l.to_string())
            .collect()
    }

    // svg2pdf writes resource dictionaries in hash order, so two runs need not give the same
    // bytes.  They do give the same objects, the same length, and the same bytes up to order.

    #[test]
    fn test_reruns_give_equivalent_pdfs() {
        let (dir1, dir2) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());
        let paths1 = plot_ncells(&example(), dir1.path()).unwrap();
        let paths2 = plot_ncells(&example(), dir2.path()).unwrap();
        for (p1, p2) in paths1.iter().zip(paths2.iter()) {
            let (mut pdf1, mut pdf2) = (fs::read(p1).unwrap(), fs::read(p2).unwrap());
            assert_eq!(pdf1.len(), pdf2.len(), "{}", p1.display());
            let objects = pdf_objects(&pdf1);
            assert!(!objects.is_empty());
            assert_eq!(objects, pdf_objects(&pdf2));
            pdf1.sort_unstable();
            pdf2.sort_unstable();
            assert_eq!(pdf1, pdf2);
        }
    }

    #[test]
    fn test_unwritable_save_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_created");
        let e = plot_ncells(&example(), &missing).unwrap_err();
        assert!(matches!(e, PlotError::Output { .. }));
    }
}
