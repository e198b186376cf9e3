// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.
//
// A single-series scatter plot, rendered to SVG with plotters.  The plot is described by a
// ScatterPlot value, which carries everything needed to draw it, so that the content of a plot
// can be checked without looking at the rendered output.
//
// Tick label precision is not left to plotters.  We compute our own approximation to the ticks
// plotters will choose, and use it to set the number of decimal places and the width of the
// y label area.

use crate::ticks::{precision, ticks};
use gp33_core::error::{PlotError, Result};
use itertools::Itertools;
use plotters::prelude::*;
use std::ops::Range;

// Possibly universal constants.

pub const XSIZE: u32 = 800;
pub const YSIZE: u32 = 600;
const MARGIN: u32 = 25;
const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 30;
const TIC_FONT_SIZE: u32 = 20;
const AXIS_TICKS: usize = 5;
const POINT_SIZE: u32 = 4;
const RANGE_EXT: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub xvar: String,
    pub yvar: String,
    // legend entry for the series
    pub label: String,
    pub color: (u8, u8, u8),
    pub points: Vec<(f64, f64)>,
    pub ylow: f64,
    pub yhigh: f64,
}

impl ScatterPlot {
    // The x range covers 0..n-1, extended a little on both sides.  An empty plot gets the range
    // it would have with two points.

    pub fn x_range(&self) -> Range<f64> {
        let xmax = self
            .points
            .iter()
            .map(|p| p.0)
            .fold(0.0_f64, f64::max)
            .max(1.0);
        -RANGE_EXT * xmax..xmax * (1.0 + RANGE_EXT)
    }

    // A zero-height y range can't be drawn; widen it to 1.

    pub fn y_range(&self) -> Range<f64> {
        let mut yhigh = self.yhigh;
        if !(yhigh > self.ylow) {
            yhigh = self.ylow + 1.0;
        }
        self.ylow..yhigh
    }

    pub fn to_svg(&self) -> Result<String> {
        let render_err = |e: String| PlotError::Render(format!("{}: {}", self.title, e));
        let (xr, yr) = (self.x_range(), self.y_range());
        if ![xr.start, xr.end, yr.start, yr.end].iter().all(|v| v.is_finite()) {
            return Err(render_err(format!(
                "axis range {:?} x {:?} is not finite",
                xr, yr
            )));
        }

        // Determine precision for axes ticks.

        let x_ticks = ticks(xr.start, xr.end, AXIS_TICKS);
        let y_ticks = ticks(yr.start, yr.end, AXIS_TICKS);
        let x_precision = x_ticks.first().map_or(0, |t| precision(t));
        let y_precision = y_ticks.first().map_or(0, |t| precision(t));

        // Determine the area sizes for the axis labels.  The y side has to hold the widest tick
        // label, at about 0.6 font size per character, plus room for the axis description.

        let x_label_area_size = (2.5 * TIC_FONT_SIZE as f32).round() as u32;
        let max_ytick_len = y_ticks.iter().map(|t| t.len()).max().unwrap_or(1);
        let y_label_area_size = (max_ytick_len as f32 * TIC_FONT_SIZE as f32 * 0.6
            + TIC_FONT_SIZE as f32 * 1.5)
            .ceil() as u32;

        // Make the plot.  The backend writes into svg when root goes out of scope.

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (XSIZE, YSIZE)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;
            let root = root.margin(MARGIN, MARGIN, MARGIN, MARGIN);
            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, (FONT, TITLE_FONT_SIZE).into_font())
                .x_label_area_size(x_label_area_size)
                .y_label_area_size(y_label_area_size)
                .build_cartesian_2d(xr, yr)
                .map_err(|e| render_err(e.to_string()))?;
            chart
                .configure_mesh()
                .label_style((FONT, TIC_FONT_SIZE).into_font())
                .x_labels(AXIS_TICKS)
                .y_labels(AXIS_TICKS)
                .x_label_formatter(&|x| format!("{:.1$}", x, x_precision))
                .y_label_formatter(&|y| format!("{:.1$}", y, y_precision))
                .x_desc(self.xvar.as_str())
                .y_desc(self.yvar.as_str())
                .draw()
                .map_err(|e| render_err(e.to_string()))?;
            let color = RGBColor(self.color.0, self.color.1, self.color.2);
            chart
                .draw_series(PointSeries::of_element(
                    self.points.iter().copied(),
                    POINT_SIZE,
                    &color,
                    &|c, s, st| EmptyElement::at(c) + Circle::new((0, 0), s, st.filled()),
                ))
                .map_err(|e| render_err(e.to_string()))?
                .label(self.label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font((FONT, TIC_FONT_SIZE).into_font())
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(|e| render_err(e.to_string()))?;
            root.present().map_err(|e| render_err(e.to_string()))?;
        }
        Ok(svg)
    }

    // Compact description, for logging.

    pub fn summary(&self) -> String {
        format!(
            "{} ({} points, y in [{}, {}]; first {})",
            self.label,
            self.points.len(),
            self.ylow,
            self.yhigh,
            self.points
                .iter()
                .take(3)
                .map(|p| format!("({}, {})", p.0, p.1))
                .format(", ")
        )
    }
}
