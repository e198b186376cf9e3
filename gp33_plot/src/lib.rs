// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod ncells;
pub mod pdf;
pub mod scatter;
pub mod ticks;
