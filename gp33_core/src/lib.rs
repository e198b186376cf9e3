// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod defs;
pub mod error;
pub mod load;

pub use defs::{Dataset, TcrRecord, Tetramer};
pub use error::{PlotError, Result};
