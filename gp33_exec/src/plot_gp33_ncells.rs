// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::args::NcellsArgs;
use gp33_core::error::Result;
use gp33_core::load::load_dataset;
use gp33_plot::ncells::plot_ncells;
use std::path::PathBuf;

// Load, sort, and write one nCells plot per tetramer category.  Assumes process_args has been
// called.

pub fn plot_gp33_ncells(args: &NcellsArgs) -> Result<Vec<PathBuf>> {
    let data = load_dataset(&args.data_path)?;
    plot_ncells(&data, &args.save_dir)
}
