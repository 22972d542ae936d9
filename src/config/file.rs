use super::{CalculatorConfig, ConfigError, ConfigResult, validate_config};
use crate::reference::{ReferenceJob, ReferenceTable};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub fn save_config_to_json<P: AsRef<Path>>(
    config: &CalculatorConfig,
    path: P,
) -> ConfigResult<()> {
    validate_config(config)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<CalculatorConfig> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config: CalculatorConfig = serde_json::from_reader(file)?;
    validate_config(&config)?;
    log::info!(
        "loaded calculator config from {} ({} team members, {} presets)",
        path.display(),
        config.roster.len(),
        config.presets.presets().len()
    );
    Ok(config)
}

#[derive(Default, Serialize, Deserialize)]
struct ReferenceCsvRecord {
    job: String,
    revenue: String,
    costs: String,
}

impl From<&ReferenceJob> for ReferenceCsvRecord {
    fn from(job: &ReferenceJob) -> Self {
        Self {
            job: job.job.clone(),
            revenue: job.revenue.to_string(),
            costs: job.costs.to_string(),
        }
    }
}

impl ReferenceCsvRecord {
    fn into_job(self, line: usize) -> ConfigResult<ReferenceJob> {
        if self.job.trim().is_empty() {
            return Err(ConfigError::InvalidData(format!(
                "row {line}: job name must not be empty"
            )));
        }
        let revenue = parse_amount(&self.revenue, "revenue", line)?;
        let costs = parse_amount(&self.costs, "costs", line)?;
        Ok(ReferenceJob::new(self.job.trim(), revenue, costs))
    }
}

fn parse_amount(value: &str, column: &str, line: usize) -> ConfigResult<f64> {
    let parsed = value.trim().replace(',', "").parse::<f64>().map_err(|_| {
        ConfigError::InvalidData(format!("row {line}: invalid {column} '{value}'"))
    })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(ConfigError::InvalidData(format!(
            "row {line}: {column} must be a non-negative number (got {value})"
        )));
    }
    Ok(parsed)
}

pub fn save_reference_to_csv<P: AsRef<Path>>(
    table: &ReferenceTable,
    path: P,
) -> ConfigResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for job in table.jobs()? {
        writer.serialize(ReferenceCsvRecord::from(&job))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_reference_from_csv<P: AsRef<Path>>(path: P) -> ConfigResult<ReferenceTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut jobs = Vec::new();
    for (idx, record) in reader.deserialize::<ReferenceCsvRecord>().enumerate() {
        jobs.push(record?.into_job(idx + 1)?);
    }
    Ok(ReferenceTable::from_jobs(&jobs)?)
}
