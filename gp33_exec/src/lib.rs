// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod args;
pub mod plot_gp33_ncells;
