//! Validation report construction from a finished test run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::survey::find_question;

pub const TEST_TYPE: &str = "digital_twin_validation";

/// One human-vs-twin answer comparison as submitted by the validation page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Comparison {
    pub question_id: String,
    pub human_answer: Option<String>,
    pub predicted_answer: Option<String>,
    pub is_match: bool,
    pub confidence: f64,
    pub reasoning: String,
}

/// A completed test run with every default already applied.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    pub test_session_id: String,
    pub profile_id: String,
    pub model_version: String,
    pub comparisons: Vec<Comparison>,
    pub accuracy_percentage: f64,
    pub total_questions: i32,
    pub correct_answers: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    pub test_session_id: String,
    pub timestamp: String,
    pub profile_version: String,
    pub llm_model: String,
    pub test_type: String,
    pub total_questions: i32,
    pub questions_answered: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    pub overall_accuracy: f64,
    pub correct_predictions: i32,
    pub total_questions: i32,
    pub accuracy_rate: f64,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestQuestion {
    pub question_id: String,
    pub category: String,
    pub question_text: String,
    pub available_options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedResult {
    pub question_id: String,
    pub human_answer: Option<String>,
    pub digital_twin_prediction: Option<String>,
    pub is_match: bool,
    pub prediction_confidence: f64,
    pub prediction_reasoning: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub test_metadata: TestMetadata,
    pub accuracy_metrics: AccuracyMetrics,
    pub test_questions: Vec<TestQuestion>,
    pub detailed_results: Vec<DetailedResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub accuracy: String,
    pub correct: String,
    pub profile_tested: String,
    pub model_used: String,
}

pub fn build_report(run: &ValidationRun, now: DateTime<Utc>) -> ValidationReport {
    let accuracy_rate = if run.total_questions > 0 {
        run.accuracy_percentage / 100.0
    } else {
        0.0
    };

    let average_confidence = if run.comparisons.is_empty() {
        0.0
    } else {
        run.comparisons.iter().map(|c| c.confidence).sum::<f64>() / run.comparisons.len() as f64
    };

    let mut test_questions = Vec::new();
    let mut detailed_results = Vec::with_capacity(run.comparisons.len());

    for comparison in &run.comparisons {
        let question = find_question(&comparison.question_id);
        let category = question
            .as_ref()
            .map(|q| q.category.clone())
            .unwrap_or_else(|| "unknown".to_string());

        if let Some(q) = question {
            test_questions.push(TestQuestion {
                question_id: q.id,
                category: q.category,
                question_text: q.question,
                available_options: q.options,
            });
        }

        detailed_results.push(DetailedResult {
            question_id: comparison.question_id.clone(),
            human_answer: comparison.human_answer.clone(),
            digital_twin_prediction: comparison.predicted_answer.clone(),
            is_match: comparison.is_match,
            prediction_confidence: comparison.confidence,
            prediction_reasoning: comparison.reasoning.clone(),
            category,
        });
    }

    ValidationReport {
        test_metadata: TestMetadata {
            test_session_id: run.test_session_id.clone(),
            timestamp: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            profile_version: run.profile_id.clone(),
            llm_model: run.model_version.clone(),
            test_type: TEST_TYPE.to_string(),
            total_questions: run.total_questions,
            questions_answered: run.comparisons.len(),
        },
        accuracy_metrics: AccuracyMetrics {
            overall_accuracy: run.accuracy_percentage,
            correct_predictions: run.correct_answers,
            total_questions: run.total_questions,
            accuracy_rate,
            average_confidence,
        },
        test_questions,
        detailed_results,
    }
}

pub fn summarize(run: &ValidationRun) -> RunSummary {
    RunSummary {
        accuracy: format!("{}%", run.accuracy_percentage),
        correct: format!("{}/{}", run.correct_answers, run.total_questions),
        profile_tested: run.profile_id.clone(),
        model_used: run.model_version.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comparison(id: &str, is_match: bool, confidence: f64) -> Comparison {
        Comparison {
            question_id: id.to_string(),
            human_answer: Some("A".to_string()),
            predicted_answer: Some(if is_match { "A" } else { "B" }.to_string()),
            is_match,
            confidence,
            reasoning: "because".to_string(),
        }
    }

    fn run(comparisons: Vec<Comparison>, pct: f64, total: i32, correct: i32) -> ValidationRun {
        ValidationRun {
            test_session_id: "test_1".to_string(),
            profile_id: "rachita_v3".to_string(),
            model_version: "model-x".to_string(),
            comparisons,
            accuracy_percentage: pct,
            total_questions: total,
            correct_answers: correct,
        }
    }

    #[test]
    fn test_report_metrics() {
        let r = run(
            vec![
                comparison("routine_complexity", true, 0.8),
                comparison("aging_attitude", false, 0.6),
            ],
            50.0,
            2,
            1,
        );
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let report = build_report(&r, now);

        assert_eq!(report.test_metadata.timestamp, "2025-03-01 12:30:00 UTC");
        assert_eq!(report.test_metadata.test_type, TEST_TYPE);
        assert_eq!(report.test_metadata.questions_answered, 2);
        assert!((report.accuracy_metrics.accuracy_rate - 0.5).abs() < 1e-9);
        assert!((report.accuracy_metrics.average_confidence - 0.7).abs() < 1e-9);
        assert_eq!(report.test_questions.len(), 2);
        assert_eq!(report.test_questions[0].category, "Usage Patterns");
        assert_eq!(report.detailed_results[1].category, "Core Attitudes");
    }

    #[test]
    fn test_unknown_question_is_categorized_unknown() {
        let r = run(vec![comparison("made_up", true, 0.9)], 100.0, 1, 1);
        let report = build_report(&r, Utc::now());
        assert!(report.test_questions.is_empty());
        assert_eq!(report.detailed_results[0].category, "unknown");
    }

    #[test]
    fn test_zero_totals() {
        let r = run(vec![], 75.0, 0, 0);
        let report = build_report(&r, Utc::now());
        assert_eq!(report.accuracy_metrics.accuracy_rate, 0.0);
        assert_eq!(report.accuracy_metrics.average_confidence, 0.0);
    }

    #[test]
    fn test_summary_format() {
        let s = summarize(&run(vec![], 80.0, 10, 8));
        assert_eq!(s.accuracy, "80%");
        assert_eq!(s.correct, "8/10");
        assert_eq!(s.profile_tested, "rachita_v3");

        let s = summarize(&run(vec![], 66.7, 3, 2));
        assert_eq!(s.accuracy, "66.7%");
    }

    #[test]
    fn test_comparison_defaults() {
        let c: Comparison = serde_json::from_str(r#"{"question_id": "x"}"#).unwrap();
        assert!(!c.is_match);
        assert_eq!(c.confidence, 0.0);
        assert!(c.human_answer.is_none());
    }
}
