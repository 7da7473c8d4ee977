//! Survey template input checks.

use serde::Deserialize;
use serde_json::Value;

use crate::validation::survey::SurveyQuestion;

#[derive(Debug, Deserialize)]
pub struct CreateSurveyRequest {
    pub survey_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_accuracy: Option<f64>,
    pub questions: Option<Vec<SurveyQuestionInput>>,
}

#[derive(Debug, Deserialize)]
pub struct SurveyQuestionInput {
    pub id: Option<String>,
    pub category: Option<String>,
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
}

/// A survey that passed every check, ready to insert.
#[derive(Debug, Clone)]
pub struct NewSurvey {
    pub survey_name: String,
    pub title: String,
    pub description: String,
    pub target_accuracy: f64,
    pub questions: Vec<SurveyQuestion>,
}

impl NewSurvey {
    pub fn questions_json(&self) -> Value {
        serde_json::to_value(&self.questions).unwrap_or(Value::Array(Vec::new()))
    }
}

/// Checks fields in order and reports the first problem found.
pub fn validate_survey(request: CreateSurveyRequest) -> Result<NewSurvey, String> {
    let survey_name = required(request.survey_name, "survey_name")?;
    let title = required(request.title, "title")?;
    let description = request.description.ok_or_else(|| missing("description"))?;
    let target_accuracy = request.target_accuracy.ok_or_else(|| missing("target_accuracy"))?;
    let inputs = request.questions.ok_or_else(|| missing("questions"))?;

    if inputs.is_empty() {
        return Err("Survey must have at least one question".to_string());
    }

    let questions = inputs
        .into_iter()
        .enumerate()
        .map(|(i, q)| validate_question(i + 1, q))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewSurvey {
        survey_name,
        title,
        description,
        target_accuracy,
        questions,
    })
}

fn validate_question(number: usize, input: SurveyQuestionInput) -> Result<SurveyQuestion, String> {
    let field = |value: Option<String>, name: &str| {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| format!("Question {number} missing required field: {name}"))
    };

    let id = field(input.id, "id")?;
    let category = field(input.category, "category")?;
    let question = field(input.question, "question")?;
    let options = input
        .options
        .ok_or_else(|| format!("Question {number} missing required field: options"))?;

    if options.len() < 2 {
        return Err(format!("Question {number} must have at least 2 options"));
    }

    Ok(SurveyQuestion {
        id,
        category,
        question,
        options,
    })
}

fn required(value: Option<String>, name: &str) -> Result<String, String> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| missing(name))
}

fn missing(name: &str) -> String {
    format!("Missing required field: {name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> CreateSurveyRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "survey_name": "sunscreen_habits",
            "title": "Sunscreen Habits",
            "description": "How people use SPF",
            "target_accuracy": 0.7,
            "questions": [{
                "id": "spf_daily",
                "category": "Usage Patterns",
                "question": "Do you wear sunscreen daily?",
                "options": ["Yes", "No"]
            }]
        })
    }

    #[test]
    fn test_valid_survey() {
        let survey = validate_survey(parse(valid_body())).unwrap();
        assert_eq!(survey.survey_name, "sunscreen_habits");
        assert_eq!(survey.questions.len(), 1);
        assert_eq!(survey.questions_json()[0]["id"], "spf_daily");
    }

    #[test]
    fn test_missing_top_level_field() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("target_accuracy");
        assert_eq!(
            validate_survey(parse(body)).unwrap_err(),
            "Missing required field: target_accuracy"
        );
    }

    #[test]
    fn test_fields_checked_in_order() {
        let err = validate_survey(parse(json!({"questions": []}))).unwrap_err();
        assert_eq!(err, "Missing required field: survey_name");
    }

    #[test]
    fn test_empty_questions() {
        let mut body = valid_body();
        body["questions"] = json!([]);
        assert_eq!(
            validate_survey(parse(body)).unwrap_err(),
            "Survey must have at least one question"
        );
    }

    #[test]
    fn test_question_missing_field() {
        let mut body = valid_body();
        let first = body["questions"][0].clone();
        body["questions"] = json!([
            first,
            {"id": "q2", "question": "?", "options": ["a", "b"]}
        ]);
        assert_eq!(
            validate_survey(parse(body)).unwrap_err(),
            "Question 2 missing required field: category"
        );
    }

    #[test]
    fn test_question_needs_two_options() {
        let mut body = valid_body();
        body["questions"][0]["options"] = json!(["Only one"]);
        assert_eq!(
            validate_survey(parse(body)).unwrap_err(),
            "Question 1 must have at least 2 options"
        );
    }
}
