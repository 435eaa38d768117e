//! Per-class classification report.

use std::fmt;

use ndarray::{Array1, Array2};

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of true samples of this class.
    pub support: u64,
}

/// Unweighted or support-weighted mean over classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageReport {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassReport>,
    pub accuracy: f64,
    pub macro_avg: AverageReport,
    pub weighted_avg: AverageReport,
    pub support: u64,
}

impl ClassificationReport {
    /// Compare `predicted` against `truth`. Class indices beyond
    /// `class_names` are reported as `class_<i>`. Undefined ratios (no
    /// predictions or no samples for a class) are reported as 0.
    pub fn new(class_names: &[String], truth: &Array1<usize>, predicted: &Array1<usize>) -> Self {
        let n_classes = truth
            .iter()
            .chain(predicted.iter())
            .max()
            .map_or(0, |max| max + 1)
            .max(class_names.len());

        //                                     prediction   label
        //                                         |          |
        //                                         v          v
        let mut confusion_matrix = Array2::<u64>::zeros((n_classes, n_classes));
        for (label, prediction) in truth.iter().zip(predicted.iter()) {
            confusion_matrix[(*prediction, *label)] += 1;
        }

        let n_examples = confusion_matrix.sum();
        let classes: Vec<ClassReport> = (0..n_classes)
            .map(|class| {
                let true_positives = confusion_matrix[(class, class)];
                let predicted_total = confusion_matrix.row(class).sum();
                let support = confusion_matrix.column(class).sum();
                let precision = ratio(true_positives, predicted_total);
                let recall = ratio(true_positives, support);
                let f1_score = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassReport {
                    name: class_names
                        .get(class)
                        .cloned()
                        .unwrap_or_else(|| format!("class_{class}")),
                    precision,
                    recall,
                    f1_score,
                    support,
                }
            })
            .collect();

        let accuracy = ratio(confusion_matrix.diag().sum(), n_examples);
        let n = classes.len().max(1) as f64;
        let macro_avg = AverageReport {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1_score: classes.iter().map(|c| c.f1_score).sum::<f64>() / n,
        };
        let weight = |value: fn(&ClassReport) -> f64| {
            if n_examples == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| value(c) * c.support as f64)
                    .sum::<f64>()
                    / n_examples as f64
            }
        };
        let weighted_avg = AverageReport {
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1_score: weight(|c| c.f1_score),
        };

        Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
            support: n_examples,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.name.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                class.name, class.precision, class.recall, class.f1_score, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        for (label, avg) in [("macro avg", self.macro_avg), ("weighted avg", self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, avg.precision, avg.recall, avg.f1_score, self.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names() -> Vec<String> {
        vec!["cat".to_string(), "dog".to_string()]
    }

    #[test]
    fn perfect_predictions() {
        let truth = array![0, 1, 1, 0];
        let report = ClassificationReport::new(&names(), &truth, &truth);
        assert_eq!(report.accuracy, 1.0);
        assert!(report.classes.iter().all(|c| c.f1_score == 1.0));
        assert_eq!(report.support, 4);
    }

    #[test]
    fn binary_metrics() {
        // 8 cats, 5 dogs; 5 cats and 3 dogs correct
        let truth = array![0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        let predicted = array![0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0];
        let report = ClassificationReport::new(&names(), &truth, &predicted);

        let cat = &report.classes[0];
        assert_eq!(cat.support, 8);
        assert!((cat.precision - 5.0 / 7.0).abs() < 1e-12);
        assert!((cat.recall - 5.0 / 8.0).abs() < 1e-12);

        let dog = &report.classes[1];
        assert_eq!(dog.support, 5);
        assert!((dog.precision - 0.5).abs() < 1e-12);
        assert!((dog.recall - 0.6).abs() < 1e-12);

        assert!((report.accuracy - 8.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn class_never_predicted_has_zero_precision() {
        let truth = array![0, 1];
        let predicted = array![0, 0];
        let report = ClassificationReport::new(&names(), &truth, &predicted);
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1_score, 0.0);
    }

    #[test]
    fn display_lists_every_class() {
        let truth = array![0, 1];
        let text = ClassificationReport::new(&names(), &truth, &truth).to_string();
        assert!(text.contains("cat"));
        assert!(text.contains("dog"));
        assert!(text.contains("weighted avg"));
    }
}
