use crate::core::position::{PositionPoint, cumulative_positions};
use crate::store::Ledger;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

fn to_utc(point: &PositionPoint) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(point.timestamp, Utc)
}

/// Time and amount bounds covering every series, padded so single points and
/// flat lines still get a drawable range.
fn chart_bounds(
    series: &BTreeMap<String, Vec<PositionPoint>>,
) -> Option<((DateTime<Utc>, DateTime<Utc>), (f64, f64))> {
    let points = series.values().flatten();
    let x_min = points.clone().map(to_utc).min()?;
    let x_max = points.clone().map(to_utc).max()?;
    let y_min = points
        .clone()
        .map(|p| p.cumulative_amount)
        .fold(0.0, f64::min);
    let y_max = points.map(|p| p.cumulative_amount).fold(0.0, f64::max);

    let (x_min, x_max) = if x_min == x_max {
        (x_min - Duration::days(1), x_max + Duration::days(1))
    } else {
        (x_min, x_max)
    };
    let padding = (y_max - y_min).max(1e-8) * 0.1;

    Some(((x_min, x_max), (y_min - padding, y_max + padding)))
}

/// Renders one line per coin with its cumulative amount over time as a PNG.
pub fn render_chart(
    series: &BTreeMap<String, Vec<PositionPoint>>,
    output: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    let ((x_min, x_max), (y_min, y_max)) =
        chart_bounds(series).ok_or_else(|| anyhow!("Nothing to plot"))?;

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to fill canvas: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Crypto Investment Value Over Time",
            ("sans-serif", 30.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("Failed to build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Cumulative Amount")
        .draw()
        .map_err(|e| anyhow!("Failed to draw mesh: {e}"))?;

    for (idx, (coin_id, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let coords: Vec<(DateTime<Utc>, f64)> = points
            .iter()
            .map(|p| (to_utc(p), p.cumulative_amount))
            .collect();

        chart
            .draw_series(LineSeries::new(coords.clone(), color.stroke_width(2)))
            .map_err(|e| anyhow!("Failed to draw series for {coin_id}: {e}"))?
            .label(coin_id.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

        chart
            .draw_series(coords.into_iter().map(|c| Circle::new(c, 3, color.filled())))
            .map_err(|e| anyhow!("Failed to draw markers for {coin_id}: {e}"))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw legend: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("Failed to write chart to {}: {e}", output.display()))?;
    Ok(())
}

pub fn run(ledger: &Ledger, output: &Path, width: u32, height: u32) -> Result<()> {
    let transactions = ledger.query_all()?;
    let series = cumulative_positions(&transactions);
    if series.is_empty() {
        println!("No transactions recorded, nothing to chart.");
        return Ok(());
    }

    debug!(coins = series.len(), "Rendering position chart");
    render_chart(&series, output, width, height)?;
    println!("Saved chart of {} coins to {}", series.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, amount: f64) -> PositionPoint {
        PositionPoint {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            cumulative_amount: amount,
        }
    }

    #[test]
    fn test_chart_bounds_cover_all_series() {
        let mut series = BTreeMap::new();
        series.insert("bitcoin".to_string(), vec![point(2, 1.0), point(5, 4.0)]);
        series.insert("ethereum".to_string(), vec![point(1, -1.0)]);

        let ((x_min, x_max), (y_min, y_max)) = chart_bounds(&series).unwrap();

        assert_eq!(x_min, to_utc(&point(1, 0.0)));
        assert_eq!(x_max, to_utc(&point(5, 0.0)));
        assert!((y_min - -1.5).abs() < 1e-9);
        assert!((y_max - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_chart_bounds_single_point() {
        let mut series = BTreeMap::new();
        series.insert("bitcoin".to_string(), vec![point(3, 2.0)]);

        let ((x_min, x_max), (y_min, y_max)) = chart_bounds(&series).unwrap();

        assert_eq!(x_max - x_min, Duration::days(2));
        assert!(y_min < 0.0);
        assert!(y_max > 2.0);
    }

    #[test]
    fn test_chart_bounds_empty() {
        assert!(chart_bounds(&BTreeMap::new()).is_none());
    }

    #[test]
    fn test_run_without_transactions_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chart.png");
        let ledger = Ledger::open_in_memory().unwrap();

        run(&ledger, &output, 800, 600).unwrap();
        assert!(!output.exists());
    }
}
