use crate::error::{GrowWiseError, Result};
use crate::models::{ConditionField, Dataset, TrainingExample};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads the crop training CSV.
///
/// Expects a header row with at least `temperature, humidity, ph, rainfall, crop`.
/// Column order is free and extra columns are ignored.
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn from_path(path: &Path) -> Result<Dataset> {
        if !path.exists() {
            return Err(GrowWiseError::Config(format!(
                "Dataset not found at {:?}. Set dataset.path in config or pass --dataset.",
                path
            )));
        }

        let file = File::open(path)?;
        let dataset = Self::from_reader(file).map_err(|e| match e {
            GrowWiseError::EmptyDataset(_) => {
                GrowWiseError::EmptyDataset(path.display().to_string())
            }
            other => other,
        })?;

        tracing::info!(
            "Loaded {} training examples ({} crops) from {}",
            dataset.len(),
            dataset.labels().len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Dataset> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let dataset = Self::read_all(reader)?;
        if dataset.is_empty() {
            return Err(GrowWiseError::EmptyDataset("<reader>".into()));
        }
        Ok(dataset)
    }

    fn read_all<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
        let mut examples = Vec::new();

        for (i, result) in reader.deserialize::<TrainingExample>().enumerate() {
            // Header is line 1
            let line = i + 2;
            let example = result?;
            Self::validate(&example, line)?;
            examples.push(example);
        }

        Ok(Dataset::new(examples))
    }

    fn validate(example: &TrainingExample, line: usize) -> Result<()> {
        let conditions = example.conditions();
        for field in ConditionField::all() {
            if !conditions.get(*field).is_finite() {
                return Err(GrowWiseError::InvalidData(format!(
                    "line {}: {} is not a finite number",
                    line,
                    field.column()
                )));
            }
        }

        if example.crop.is_empty() {
            return Err(GrowWiseError::InvalidData(format!(
                "line {}: crop label is empty",
                line
            )));
        }

        Ok(())
    }
}
