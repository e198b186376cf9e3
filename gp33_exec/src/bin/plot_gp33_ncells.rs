// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Plots the number of cells for each TCR for GP33.
//
// Usage: plot_gp33_ncells --data_path <csv> --save_dir <dir>
//
// Writes TetNeg_nCells.pdf, TetMid_nCells.pdf and TetPos_nCells.pdf to save_dir.  Set RUST_LOG
// to change how much is logged (default info).

use clap::Parser;
use gp33_exec::args::NcellsArgs;
use gp33_exec::plot_gp33_ncells::plot_gp33_ncells;
use log::info;
use pretty_trace::*;

fn main() {
    PrettyTrace::new().on();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = NcellsArgs::parse();
    let res = args.process_args().and_then(|_| plot_gp33_ncells(&args));
    match res {
        Ok(paths) => {
            info!("wrote {} plots to {}", paths.len(), args.save_dir.display());
        }
        Err(e) => {
            eprintln!("\n{}\n", e);
            std::process::exit(1);
        }
    }
}
