use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostPlotError {
    #[error("failed to render cost plot: {0}")]
    Render(String),
}

/// One line on the cost chart: a label and the per-month values.
pub struct CostSeries {
    pub label: String,
    pub values: Vec<f64>,
}

const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(30, 122, 204),
    RGBColor(204, 122, 30),
    RGBColor(46, 160, 67),
    RGBColor(148, 63, 204),
    RGBColor(204, 30, 70),
];

/// Renders the monthly cost series as a multi-line PNG chart. Nothing is
/// written when every series is empty.
pub fn write_cost_plot_png(
    output_path: &str,
    caption: &str,
    series: &[CostSeries],
) -> Result<(), CostPlotError> {
    let months = series
        .iter()
        .map(|entry| entry.values.len())
        .max()
        .unwrap_or(0);
    if months == 0 {
        return Ok(());
    }
    let max_cost = series
        .iter()
        .flat_map(|entry| entry.values.iter())
        .fold(0.0_f64, |best, value| best.max(*value));
    let y_max = if max_cost > 0.0 { max_cost * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| CostPlotError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(1..months as i32 + 1, 0.0..y_max)
        .map_err(|e| CostPlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Monthly cost")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| CostPlotError::Render(e.to_string()))?;

    for (index, entry) in series.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                entry
                    .values
                    .iter()
                    .enumerate()
                    .map(|(month, value)| (month as i32 + 1, *value)),
                color.stroke_width(2),
            ))
            .map_err(|e| CostPlotError::Render(e.to_string()))?
            .label(entry.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| CostPlotError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| CostPlotError::Render(e.to_string()))?;
    Ok(())
}
