use super::fertilizer;
use super::tree::{DecisionTreeClassifier, TreeParams};
use crate::error::Result;
use crate::models::{Conditions, Dataset, Recommendation, FEATURE_COUNT};

/// Trained crop classifier plus fertilizer lookup.
///
/// Built once at startup and never mutated; screens and subcommands only
/// borrow it.
#[derive(Debug, Clone)]
pub struct Recommender {
    model: DecisionTreeClassifier,
    n_examples: usize,
    training_accuracy: f64,
}

#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub n_examples: usize,
    pub crops: Vec<String>,
    pub depth: usize,
    pub n_leaves: usize,
    pub training_accuracy: f64,
}

impl Recommender {
    pub fn train(dataset: &Dataset, params: &TreeParams) -> Result<Self> {
        let samples: Vec<[f64; FEATURE_COUNT]> = dataset
            .examples
            .iter()
            .map(|e| e.conditions().features())
            .collect();
        let labels: Vec<&str> = dataset.examples.iter().map(|e| e.crop.as_str()).collect();

        let model = DecisionTreeClassifier::fit(&samples, &labels, params)?;
        let training_accuracy = model.score(&samples, &labels);

        tracing::info!(
            "Trained decision tree: {} crops, depth {}, {} leaves, training accuracy {:.1}%",
            model.classes().len(),
            model.depth(),
            model.n_leaves(),
            training_accuracy * 100.0
        );

        Ok(Self {
            model,
            n_examples: dataset.len(),
            training_accuracy,
        })
    }

    /// Crop label predicted for the given conditions.
    pub fn predict_crop(&self, conditions: &Conditions) -> &str {
        self.model.predict(&conditions.features())
    }

    pub fn recommend(&self, conditions: &Conditions) -> Recommendation {
        let crop = self.predict_crop(conditions);
        let advice = fertilizer::fertilizer_for(crop);
        tracing::debug!(?conditions, crop, "Recommendation computed");
        Recommendation::new(*conditions, crop, advice)
    }

    pub fn crops(&self) -> &[String] {
        self.model.classes()
    }

    /// Crops the model can predict that fall back to the default advice.
    pub fn uncovered_crops(&self) -> Vec<&str> {
        self.crops()
            .iter()
            .map(String::as_str)
            .filter(|c| !fertilizer::has_entry(c))
            .collect()
    }

    /// Fertilizer table entries the model can never predict.
    pub fn unused_table_entries(&self) -> Vec<&'static str> {
        fertilizer::known_crops()
            .filter(|known| !self.crops().iter().any(|c| c.eq_ignore_ascii_case(known)))
            .collect()
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            n_examples: self.n_examples,
            crops: self.crops().to_vec(),
            depth: self.model.depth(),
            n_leaves: self.model.n_leaves(),
            training_accuracy: self.training_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConditionField, TrainingExample};

    fn example(t: f64, h: f64, ph: f64, r: f64, crop: &str) -> TrainingExample {
        TrainingExample::new(Conditions::new(t, h, ph, r), crop)
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            example(24.0, 82.0, 6.4, 230.0, "rice"),
            example(25.0, 85.0, 6.2, 250.0, "rice"),
            example(20.0, 55.0, 6.8, 80.0, "wheat"),
            example(18.0, 50.0, 6.9, 70.0, "wheat"),
            example(33.0, 45.0, 7.2, 60.0, "cotton"),
            example(35.0, 40.0, 7.0, 55.0, "cotton"),
            example(22.0, 75.0, 5.0, 180.0, "tea"),
            example(21.0, 78.0, 4.8, 190.0, "tea"),
            example(27.0, 65.0, 6.0, 120.0, "jute"),
        ])
    }

    fn recommender() -> Recommender {
        Recommender::train(&dataset(), &TreeParams::default()).unwrap()
    }

    #[test]
    fn recommends_training_crop_with_advice() {
        let rec = recommender().recommend(&Conditions::new(24.5, 83.0, 6.3, 240.0));
        assert_eq!(rec.crop, "rice");
        assert_eq!(rec.advice, "Urea (N), DAP (P), MOP (K)");
        assert_eq!(rec.display_crop(), "RICE");
    }

    #[test]
    fn every_form_input_maps_into_label_set() {
        let r = recommender();
        let labels = dataset();
        let labels = labels.labels();
        let mut c = Conditions::default();
        for field in ConditionField::all() {
            let (min, max) = field.range();
            for value in [min, (min + max) / 2.0, max] {
                c.set(*field, value);
                let crop = r.predict_crop(&c);
                assert!(labels.contains(crop), "{} not in training labels", crop);
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let r = recommender();
        let c = Conditions::new(31.0, 50.0, 7.1, 65.0);
        let first = r.recommend(&c);
        for _ in 0..10 {
            assert_eq!(r.recommend(&c), first);
        }
    }

    #[test]
    fn crop_without_entry_gets_default_and_is_flagged() {
        let r = recommender();
        assert_eq!(r.uncovered_crops(), vec!["jute"]);
        let rec = r.recommend(&Conditions::new(27.0, 65.0, 6.0, 120.0));
        assert_eq!(rec.crop, "jute");
        assert_eq!(rec.advice, "Balanced NPK recommended");
    }

    #[test]
    fn table_entries_without_training_data() {
        let unused = recommender().unused_table_entries();
        assert_eq!(
            unused,
            vec!["maize", "sugarcane", "barley", "millet", "coffee", "pulses"]
        );
    }

    #[test]
    fn summary_reports_model_shape() {
        let summary = recommender().summary();
        assert_eq!(summary.n_examples, 9);
        assert_eq!(summary.crops.len(), 5);
        assert_eq!(summary.training_accuracy, 1.0);
        assert!(summary.n_leaves >= 5);
    }

    #[test]
    fn empty_dataset_fails_fast() {
        assert!(Recommender::train(&Dataset::default(), &TreeParams::default()).is_err());
    }
}
