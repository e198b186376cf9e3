// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use clap::Parser;
use gp33_core::error::{PlotError, Result};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Plots the number of cells for each TCR for GP33.
#[derive(Debug, Clone, Parser)]
#[command(name = "plot_gp33_ncells", version)]
pub struct NcellsArgs {
    /// Path to CSV file containing processed TCR data for GP33.
    #[arg(long = "data_path", value_name = "PATH")]
    pub data_path: PathBuf,

    /// Path to directory where plots of cell counts will be saved.
    #[arg(long = "save_dir", value_name = "PATH")]
    pub save_dir: PathBuf,
}

impl NcellsArgs {
    // Create save_dir, and any missing parents.  Must be called once after parsing.

    pub fn process_args(&self) -> Result<()> {
        fs::create_dir_all(&self.save_dir).map_err(|source| PlotError::Output {
            path: self.save_dir.clone(),
            source,
        })?;
        debug!("save_dir {} is ready", self.save_dir.display());
        Ok(())
    }
}
