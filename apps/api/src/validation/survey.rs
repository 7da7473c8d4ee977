//! The built-in skincare validation survey.

use serde::{Deserialize, Serialize};

pub const SURVEY_NAME: &str = "validation_survey_1";
pub const SURVEY_TITLE: &str = "Skincare Attitudes & Usage Validation Study";
pub const SURVEY_DESCRIPTION: &str = "Comprehensive validation questions to test digital twin \
accuracy in predicting skincare behaviors and attitudes";
pub const TARGET_ACCURACY: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub id: String,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSurvey {
    pub survey_name: String,
    pub survey_title: String,
    pub description: String,
    pub target_accuracy: f64,
    pub questions: Vec<SurveyQuestion>,
}

struct QuestionDef {
    id: &'static str,
    category: &'static str,
    question: &'static str,
    options: &'static [&'static str],
}

impl QuestionDef {
    fn to_question(&self) -> SurveyQuestion {
        SurveyQuestion {
            id: self.id.to_string(),
            category: self.category.to_string(),
            question: self.question.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

const QUESTIONS: [QuestionDef; 10] = [
    QuestionDef {
        id: "routine_complexity",
        category: "Usage Patterns",
        question: "How many skincare products do you typically use in your daily routine?",
        options: &[
            "1-2 products (cleanser, moisturizer)",
            "3-5 products (cleanser, toner, serum, moisturizer, sunscreen)",
            "6-8 products (multi-step routine with treatments)",
            "9+ products (extensive Korean-style routine)",
        ],
    },
    QuestionDef {
        id: "purchase_decision_driver",
        category: "Decision Making",
        question: "What most influences your skincare purchase decisions?",
        options: &[
            "Friend and family recommendations",
            "Online reviews and ratings",
            "Scientific research and ingredient lists",
            "Dermatologist or expert advice",
            "Brand reputation and marketing",
            "Price and value for money",
        ],
    },
    QuestionDef {
        id: "wellness_priority",
        category: "Core Attitudes",
        question: "How important is the connection between overall health and skin health to you?",
        options: &[
            "Extremely important - I see them as completely connected",
            "Very important - I consider both when making choices",
            "Moderately important - somewhat related",
            "Not very important - I treat them separately",
        ],
    },
    QuestionDef {
        id: "research_approach",
        category: "Decision Making",
        question: "How do you typically research new skincare products before buying?",
        options: &[
            "I don't research much - I go with recommendations",
            "Quick online search and review check",
            "Moderate research - compare ingredients and reviews",
            "Extensive research - studies, expert opinions, ingredient analysis",
        ],
    },
    QuestionDef {
        id: "aging_attitude",
        category: "Core Attitudes",
        question: "What's your approach to aging and skincare?",
        options: &[
            "Prevention-focused - start early to prevent issues",
            "Treatment-focused - address problems as they appear",
            "Acceptance-focused - minimal intervention, natural aging",
            "Enhancement-focused - actively improve skin appearance",
        ],
    },
    QuestionDef {
        id: "routine_flexibility",
        category: "Usage Patterns",
        question: "How consistent are you with your skincare routine?",
        options: &[
            "Very consistent - same routine every day",
            "Mostly consistent - occasional skips when busy",
            "Flexible - adjust based on skin needs and time",
            "Inconsistent - often forget or skip steps",
        ],
    },
    QuestionDef {
        id: "ingredient_knowledge",
        category: "Decision Making",
        question: "How familiar are you with skincare ingredients and their benefits?",
        options: &[
            "Very familiar - I know most active ingredients",
            "Moderately familiar - I know key ingredients like retinol, niacinamide",
            "Basic knowledge - I know some common ingredients",
            "Not familiar - I don't focus on specific ingredients",
        ],
    },
    QuestionDef {
        id: "time_investment",
        category: "Usage Patterns",
        question: "How much time do you prefer to spend on your skincare routine?",
        options: &[
            "Less than 5 minutes total (quick and simple)",
            "5-10 minutes total (efficient but thorough)",
            "10-20 minutes total (relaxing self-care time)",
            "20+ minutes total (comprehensive ritual)",
        ],
    },
    QuestionDef {
        id: "problem_solving",
        category: "Core Attitudes",
        question: "When you have a skin concern, what's your typical approach?",
        options: &[
            "Ask friends who have similar issues",
            "Research online and try popular solutions",
            "Consult a dermatologist or skincare professional",
            "Try to address it through lifestyle changes (diet, exercise, sleep)",
        ],
    },
    QuestionDef {
        id: "price_sensitivity",
        category: "Decision Making",
        question: "How does price influence your skincare purchases?",
        options: &[
            "Price is not a major factor - quality matters most",
            "I prefer mid-range products - balance of quality and value",
            "I'm price-conscious but will splurge on proven ingredients",
            "Price is very important - I look for budget-friendly options",
        ],
    },
];

/// The full survey with all ten questions.
pub fn builtin_survey() -> ValidationSurvey {
    ValidationSurvey {
        questions: QUESTIONS.iter().map(QuestionDef::to_question).collect(),
        ..survey_header()
    }
}

/// Survey metadata with an empty question list, served by `/api/surveys`
/// when the template table cannot be read.
pub fn survey_header() -> ValidationSurvey {
    ValidationSurvey {
        survey_name: SURVEY_NAME.to_string(),
        survey_title: SURVEY_TITLE.to_string(),
        description: SURVEY_DESCRIPTION.to_string(),
        target_accuracy: TARGET_ACCURACY,
        questions: Vec::new(),
    }
}

pub fn find_question(question_id: &str) -> Option<SurveyQuestion> {
    QUESTIONS
        .iter()
        .find(|q| q.id == question_id)
        .map(QuestionDef::to_question)
}
