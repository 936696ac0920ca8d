// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::{ScenarioComparison, SensitivityPoint, SimulationResult};
use crate::simulation::evaluator::CostBreakdown;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One raw Monte Carlo sample, as exported to CSV.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecord<'a> {
    pub trial: usize,
    pub scenario: &'a str,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentRecord {
    pub component: &'static str,
    pub value: f64,
}

/// Rows of a cost breakdown table, total last.
pub fn breakdown_rows(breakdown: &CostBreakdown) -> Vec<ComponentRecord> {
    vec![
        ComponentRecord { component: "Transport", value: breakdown.transport },
        ComponentRecord { component: "Inventory", value: breakdown.inventory },
        ComponentRecord { component: "Fixed", value: breakdown.fixed },
        ComponentRecord { component: "Total", value: breakdown.total() },
    ]
}

/// Writes every trial of `result` as `trial,scenario,total_cost`.
pub fn write_samples<W: Write>(writer: W, result: &SimulationResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (trial, cost) in result.samples.iter().enumerate() {
        wtr.serialize(SampleRecord {
            trial: trial + 1,
            scenario: &result.scenario,
            total_cost: *cost,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a deterministic cost breakdown as `component,value`.
pub fn write_breakdown<W: Write>(writer: W, breakdown: &CostBreakdown) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in breakdown_rows(breakdown) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a sensitivity sweep as `service_level,z_score,mean_cost`.
pub fn write_sweep<W: Write>(writer: W, sweep: &[SensitivityPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in sweep {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Saves the raw samples of `result` to `file_path`.
pub fn export_samples(file_path: &Path, result: &SimulationResult) -> Result<()> {
    let file = std::fs::File::create(file_path)?;
    write_samples(file, result)?;
    info!(
        rows = result.samples.len(),
        path = %file_path.display(),
        "Exported simulation samples"
    );
    Ok(())
}

pub fn export_breakdown(file_path: &Path, breakdown: &CostBreakdown) -> Result<()> {
    let file = std::fs::File::create(file_path)?;
    write_breakdown(file, breakdown)?;
    info!(path = %file_path.display(), "Exported cost breakdown");
    Ok(())
}

pub fn export_sweep(file_path: &Path, sweep: &[SensitivityPoint]) -> Result<()> {
    let file = std::fs::File::create(file_path)?;
    write_sweep(file, sweep)?;
    info!(rows = sweep.len(), path = %file_path.display(), "Exported sensitivity sweep");
    Ok(())
}

/// Formats an amount as Brazilian reais: `R$ 1.234.567,89`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let frac_part = cents % 100;

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part:02}")
}

/// Renders a breakdown as an aligned text table.
pub fn render_breakdown(breakdown: &CostBreakdown) -> String {
    breakdown_rows(breakdown)
        .iter()
        .map(|row| format!("  {:<10} {:>22}\n", row.component, format_brl(row.value)))
        .collect()
}

/// Renders every scenario's distribution, cheapest first, then the recommendation.
pub fn render_comparison(comparison: &ScenarioComparison) -> String {
    let mut ranked: Vec<&SimulationResult> = comparison.results().iter().collect();
    ranked.sort_by(|a, b| a.summary.mean.total_cmp(&b.summary.mean));

    let mut out = String::new();
    for (rank, result) in ranked.iter().enumerate() {
        let s = &result.summary;
        out.push_str(&format!("{}. {}\n", rank + 1, result.scenario));
        out.push_str(&format!(
            "   Mean: {} ± {} | Median: {}\n",
            format_brl(s.mean),
            format_brl(s.std_dev),
            format_brl(s.percentile_50)
        ));
        out.push_str(&format!(
            "   Range: [{}, {}] | 10th-90th: [{}, {}]\n",
            format_brl(s.min),
            format_brl(s.max),
            format_brl(s.percentile_10),
            format_brl(s.percentile_90)
        ));
    }

    let best = comparison.best();
    out.push_str(&format!(
        "\nRecommended: {} (mean {} at {:.1}% service level, z = {:.3})\n",
        best.scenario,
        format_brl(best.summary.mean),
        best.service_level,
        best.z_score
    ));
    out
}
