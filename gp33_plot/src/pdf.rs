// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Convert an SVG string to a PDF document.  The SVG is parsed by usvg, which converts text to
// outlines using the fonts it can find, then svg2pdf writes the PDF.
//
// Plotters names the generic "sans-serif" family in the SVG it writes.  fontdb maps that to Arial
// unless told otherwise, and Arial is often absent on Linux, in which case all text would
// silently vanish.  So we point sans-serif at the first of a few common families that is
// actually installed.

use gp33_core::error::{PlotError, Result};
use log::{debug, warn};
use std::sync::Arc;
use svg2pdf::usvg;
use svg2pdf::usvg::fontdb;
use svg2pdf::{ConversionOptions, PageOptions};

const SANS_FAMILIES: [&str; 5] = [
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Helvetica",
    "Noto Sans",
];

pub struct PdfConverter {
    options: usvg::Options<'static>,
}

impl Default for PdfConverter {
    fn default() -> Self {
        PdfConverter::new()
    }
}

impl PdfConverter {
    // Loading system fonts is slow, so a converter should be made once and reused.

    pub fn new() -> PdfConverter {
        PdfConverter::with_fontdb(load_fonts())
    }

    pub fn with_fontdb(fontdb: fontdb::Database) -> PdfConverter {
        PdfConverter {
            options: usvg::Options {
                fontdb: Arc::new(fontdb),
                ..usvg::Options::default()
            },
        }
    }

    pub fn convert(&self, svg: &str) -> Result<Vec<u8>> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| PlotError::Pdf(format!("can't parse SVG: {}", e)))?;
        svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
            .map_err(|e| PlotError::Pdf(format!("{:?}", e)))
    }
}

fn has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(name, _)| name == family))
}

fn load_fonts() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    debug!("loaded {} font faces", db.len());
    match SANS_FAMILIES.iter().find(|f| has_family(&db, f)) {
        Some(family) => {
            debug!("using {} for sans-serif text", family);
            db.set_sans_serif_family(*family);
        }
        None => warn!("no sans-serif font found, plot text will be missing from PDF output"),
    }
    db
}
