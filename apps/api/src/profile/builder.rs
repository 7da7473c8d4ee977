//! Converts questionnaire completions (interview transcripts reduced to
//! question/response pairs) into structured [`NewProfileData`].
//!
//! Field extraction is a keyword lookup: for each target field a list of
//! keywords is tried in order, and the first response whose question id or
//! question text contains the keyword (case-insensitive) supplies the value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::data::{
    BeautyCategoryData, BeautyRoutine, CategoryData, CentrepieceData, Demographics,
    FacialMoisturizerAttitudes, FacialMoisturizerProductData, InformationSourcesMessaging,
    Lifestyle, MediaCulture, MoisturizerUsage, NewProfileData, Personality, ProductData,
    ShoppingBehaviors, SkinHairType, ValuesBeliefs,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub question_id: String,
    pub question_text: String,
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireType {
    Centrepiece,
    Category,
    Product,
}

impl QuestionnaireType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionnaireType::Centrepiece => "centrepiece",
            QuestionnaireType::Category => "category",
            QuestionnaireType::Product => "product",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "centrepiece" => Some(QuestionnaireType::Centrepiece),
            "category" => Some(QuestionnaireType::Category),
            "product" => Some(QuestionnaireType::Product),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionData {
    #[serde(default)]
    pub responses: Vec<InterviewResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireCompletion {
    pub questionnaire_type: QuestionnaireType,
    pub questionnaire_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub completion_data: CompletionData,
}

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid questionnaire type for {expected} data: got {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Category name is required for category questionnaires")]
    MissingCategory,
}

pub struct ProfileDataBuilder {
    profile: NewProfileData,
}

impl Default for ProfileDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileDataBuilder {
    pub fn new() -> Self {
        Self {
            profile: NewProfileData {
                centrepiece: None,
                categories: Some(BTreeMap::new()),
                products: Some(BTreeMap::new()),
            },
        }
    }

    pub fn add_centrepiece_data(
        &mut self,
        completion: &QuestionnaireCompletion,
    ) -> Result<(), BuildError> {
        expect_type(completion, QuestionnaireType::Centrepiece)?;

        let responses = &completion.completion_data.responses;
        self.profile.centrepiece = Some(CentrepieceData {
            demographics: Some(extract_demographics(responses)),
            lifestyle: Some(extract_lifestyle(responses)),
            media_culture: Some(extract_media_culture(responses)),
            personality: Some(extract_personality(responses)),
            values_beliefs: Some(extract_values_beliefs(responses)),
        });
        Ok(())
    }

    pub fn add_category_data(
        &mut self,
        completion: &QuestionnaireCompletion,
    ) -> Result<(), BuildError> {
        expect_type(completion, QuestionnaireType::Category)?;

        let category = completion
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(BuildError::MissingCategory)?;

        let responses = &completion.completion_data.responses;
        let (key, data) = match category.to_lowercase().as_str() {
            "beauty" => (
                "beauty".to_string(),
                CategoryData::Beauty(extract_beauty(responses)),
            ),
            // No dedicated schema yet for these two.
            known @ ("fitness" | "nutrition") => (
                known.to_string(),
                CategoryData::Generic(extract_generic(responses)),
            ),
            _ => (
                category.to_string(),
                CategoryData::Generic(extract_generic(responses)),
            ),
        };

        self.profile
            .categories
            .get_or_insert_with(BTreeMap::new)
            .insert(key, data);
        Ok(())
    }

    pub fn add_product_data(
        &mut self,
        completion: &QuestionnaireCompletion,
    ) -> Result<(), BuildError> {
        expect_type(completion, QuestionnaireType::Product)?;

        let responses = &completion.completion_data.responses;
        let name = completion.questionnaire_name.as_str();
        let (key, data) = match name.to_lowercase().as_str() {
            "facial_moisturizer" | "moisturizer" => (
                "facial_moisturizer".to_string(),
                ProductData::FacialMoisturizer(extract_moisturizer(responses)),
            ),
            "sunscreen" => (
                "sunscreen".to_string(),
                ProductData::Generic(extract_generic(responses)),
            ),
            _ => (
                name.to_string(),
                ProductData::Generic(extract_generic(responses)),
            ),
        };

        self.profile
            .products
            .get_or_insert_with(BTreeMap::new)
            .insert(key, data);
        Ok(())
    }

    /// Dispatches a completion to the matching `add_*` method by its type.
    pub fn add_completion(&mut self, completion: &QuestionnaireCompletion) -> Result<(), BuildError> {
        match completion.questionnaire_type {
            QuestionnaireType::Centrepiece => self.add_centrepiece_data(completion),
            QuestionnaireType::Category => self.add_category_data(completion),
            QuestionnaireType::Product => self.add_product_data(completion),
        }
    }

    pub fn into_profile_data(self) -> NewProfileData {
        self.profile
    }
}

/// Builds profile data from several completions in order. Later completions
/// of the same category or product replace earlier ones.
pub fn build_profile_data_from_completions(
    completions: &[QuestionnaireCompletion],
) -> Result<NewProfileData, BuildError> {
    let mut builder = ProfileDataBuilder::new();
    for completion in completions {
        builder.add_completion(completion)?;
    }
    Ok(builder.into_profile_data())
}

/// Best-effort conversion of a legacy flat profile into the new layout.
/// Only `demographics.age_range` carries over; personality and values start
/// empty.
pub fn migrate_legacy_profile_data(legacy: &Map<String, Value>) -> NewProfileData {
    let has_centrepiece_source = ["demographics", "core_attitudes", "decision_psychology"]
        .iter()
        .any(|k| legacy.get(*k).is_some_and(is_truthy));

    if !has_centrepiece_source {
        return NewProfileData::default();
    }

    let age_range = legacy
        .get("demographics")
        .and_then(|d| d.get("age_range"))
        .and_then(|v| v.as_str())
        .map(String::from);

    NewProfileData {
        centrepiece: Some(CentrepieceData {
            demographics: Some(Demographics {
                age_range,
                ..Default::default()
            }),
            personality: Some(Personality::default()),
            values_beliefs: Some(ValuesBeliefs::default()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn expect_type(
    completion: &QuestionnaireCompletion,
    expected: QuestionnaireType,
) -> Result<(), BuildError> {
    if completion.questionnaire_type != expected {
        return Err(BuildError::WrongType {
            expected: expected.as_str(),
            found: completion.questionnaire_type.as_str(),
        });
    }
    Ok(())
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the response for the first keyword that matches any question.
/// Keyword order decides precedence, not response order.
pub fn find_response(responses: &[InterviewResponse], keywords: &[&str]) -> Option<String> {
    keywords.iter().find_map(|keyword| {
        let keyword = keyword.to_lowercase();
        responses
            .iter()
            .find(|r| {
                r.question_id.to_lowercase().contains(&keyword)
                    || r.question_text.to_lowercase().contains(&keyword)
            })
            .map(|r| r.response.clone())
    })
}

/// Parses a leading base-10 integer the way `parseInt(value, 10)` does:
/// leading whitespace and a sign are allowed, trailing text is ignored.
pub fn parse_number(value: Option<&str>) -> Option<i64> {
    let s = value?.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let n: i64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}

fn extract_generic(responses: &[InterviewResponse]) -> BTreeMap<String, Value> {
    responses
        .iter()
        .map(|r| (r.question_id.clone(), Value::String(r.response.clone())))
        .collect()
}

fn extract_demographics(r: &[InterviewResponse]) -> Demographics {
    Demographics {
        name: find_response(r, &["name", "your_name"]),
        age: parse_number(find_response(r, &["age", "how_old"]).as_deref()),
        age_range: find_response(r, &["age_range", "age_group"]),
        gender: find_response(r, &["gender", "gender_identity"]),
        country: find_response(r, &["country", "location", "where_live"]),
        state: find_response(r, &["state", "province"]),
        city: find_response(r, &["city", "town"]),
        education_level: find_response(r, &["education", "education_level", "school"]),
        employment: find_response(r, &["employment", "job", "work", "occupation"]),
        income: find_response(r, &["income", "salary", "earnings"]),
    }
}

fn extract_lifestyle(r: &[InterviewResponse]) -> Lifestyle {
    Lifestyle {
        daily_life_work: find_response(r, &["daily_life", "weekday", "work_life", "average_day"]),
        activity_wellness: find_response(
            r,
            &["activity", "wellness", "exercise", "fitness", "mental_health"],
        ),
        interests_hobbies: find_response(r, &["interests", "hobbies", "favorite_activities"]),
        weekend_life: find_response(r, &["weekend", "weekend_life", "free_time"]),
    }
}

fn extract_media_culture(r: &[InterviewResponse]) -> MediaCulture {
    MediaCulture {
        news_information: find_response(r, &["news", "information", "media_consumption"]),
        social_media_use: find_response(r, &["social_media", "platforms", "social_platforms"]),
        tv_movies_sports: find_response(r, &["tv", "movies", "sports", "entertainment"]),
        music: find_response(r, &["music", "concerts", "festivals"]),
        celebrities_influences: find_response(
            r,
            &["celebrities", "influences", "public_figures"],
        ),
    }
}

fn extract_personality(r: &[InterviewResponse]) -> Personality {
    Personality {
        self_description: find_response(
            r,
            &["self_description", "describe_yourself", "personality"],
        ),
        misunderstood: find_response(r, &["misunderstood", "misunderstand", "dont_know_about"]),
        curiosity_openness: find_response(
            r,
            &["curiosity", "openness", "explore_new", "new_experiences"],
        ),
        structure_vs_spontaneity: find_response(
            r,
            &["structure", "spontaneity", "plans", "flow"],
        ),
        social_energy: find_response(r, &["social_energy", "energized", "people", "alone_time"]),
        stress_challenge: find_response(
            r,
            &["stress", "challenge", "handle_stress", "stressful"],
        ),
        signature_strengths: find_response(r, &["strengths", "personal_strengths", "rely_on"]),
    }
}

fn extract_values_beliefs(r: &[InterviewResponse]) -> ValuesBeliefs {
    ValuesBeliefs {
        core_values: find_response(
            r,
            &["values", "core_values", "important", "family_health"],
        ),
        influence_advice: find_response(r, &["advice", "trust", "influence"]),
        cultural_political_engagement: find_response(
            r,
            &["politics", "current_events", "political", "social_issues"],
        ),
        aspirations_worldview: find_response(
            r,
            &["aspirations", "worldview", "positive_change", "change_world"],
        ),
        decision_priorities: find_response(
            r,
            &["decisions", "decision_priorities", "big_decisions"],
        ),
    }
}

fn extract_beauty(r: &[InterviewResponse]) -> BeautyCategoryData {
    BeautyCategoryData {
        skin_hair_type: Some(SkinHairType {
            skin_type: find_response(r, &["skin_type", "describe_skin", "skin"]),
            skin_concerns: find_response(r, &["skin_concerns", "skin_goals", "skin_issues"]),
            hair_type: find_response(r, &["hair_type", "describe_hair", "hair"]),
            hair_concerns: find_response(r, &["hair_concerns", "hair_goals", "hair_issues"]),
        }),
        routine: Some(BeautyRoutine {
            morning_routine: find_response(r, &["morning_routine", "morning", "am_routine"]),
            evening_routine: find_response(r, &["evening_routine", "night", "pm_routine"]),
            time_on_routine: find_response(r, &["time_routine", "time_spend", "routine_time"]),
            extra_products_in_routine: find_response(
                r,
                &["extra_products", "weekly", "masks", "treatments"],
            ),
            changes_based_on_seasonality: find_response(
                r,
                &["seasonality", "seasons", "climate"],
            ),
            hero_product: find_response(
                r,
                &["hero_product", "most_important", "essential_product"],
            ),
            beauty_routine_frustrations: find_response(
                r,
                &["frustrations", "hassle", "routine_problems"],
            ),
            self_care_perception: find_response(
                r,
                &["self_care", "maintenance", "look_forward"],
            ),
            beauty_routine_motivation: find_response(
                r,
                &["motivation", "role", "feeling_good", "creativity"],
            ),
            product_experimentation: find_response(
                r,
                &["experimentation", "stick_same", "trying_new"],
            ),
            buyer_type: find_response(r, &["buyer_type", "budget", "premium", "mix"]),
            engagement_with_beauty: find_response(
                r,
                &["engagement", "follow_brands", "tutorials", "reviews"],
            ),
        }),
    }
}

fn extract_moisturizer(r: &[InterviewResponse]) -> FacialMoisturizerProductData {
    FacialMoisturizerProductData {
        facial_moisturizer_attitudes: Some(FacialMoisturizerAttitudes {
            benefits_sought: find_response(r, &["benefits_sought", "look_for", "attributes"]),
            most_important_benefit: find_response(
                r,
                &["most_important", "single_benefit", "deliver"],
            ),
            sustainable_values: find_response(r, &["sustainable", "clean", "natural", "vegan"]),
            ingredients_seeking: find_response(
                r,
                &["ingredients_seeking", "specific_ingredients", "look_for"],
            ),
            ingredients_avoided: find_response(
                r,
                &["ingredients_avoided", "avoid", "distrust"],
            ),
            dermatologist_recommended: find_response(
                r,
                &["dermatologist", "recommended", "important"],
            ),
            moisturizer_frustrations: find_response(r, &["frustrations", "challenges", "face"]),
        }),
        moisturizer_usage: Some(MoisturizerUsage {
            current_product_usage: find_response(
                r,
                &["current_product", "using_right_now", "brand"],
            ),
            current_product_satisfaction: find_response(
                r,
                &["satisfaction", "like_dislike", "frustrates"],
            ),
            brand_awareness: find_response(r, &["brand_awareness", "other_brands", "aware_of"]),
            brand_consideration: find_response(
                r,
                &["brand_consideration", "open_considering", "future"],
            ),
            past_usage: find_response(r, &["past_usage", "used_past", "brands_used"]),
            switching_triggers: find_response(
                r,
                &["switching", "triggers", "motivates", "try_new"],
            ),
        }),
        shopping_behaviors: Some(ShoppingBehaviors {
            online_vs_instore_shopping: find_response(
                r,
                &["online_instore", "shop", "websites", "stores"],
            ),
            purchase_frequency: find_response(
                r,
                &["frequency", "how_often", "purchase", "typical_year"],
            ),
            budget_price_point: find_response(
                r,
                &["budget", "price_point", "spend", "affordable"],
            ),
            premium_cues: find_response(r, &["premium", "worth_paying", "feel_premium"]),
            deal_sensitivity: find_response(r, &["deals", "sales", "discounts", "promotions"]),
            packaging_presentation: find_response(
                r,
                &["packaging", "presentation", "notice_first", "stands_out"],
            ),
            brand_attributes: find_response(
                r,
                &["brand_attributes", "trusting", "reliable", "want_buy"],
            ),
        }),
        information_sources_messaging: Some(InformationSourcesMessaging {
            information_searching: find_response(
                r,
                &["information_searching", "online_search", "ingredients", "reviews"],
            ),
            general_information_sources: find_response(
                r,
                &["information_sources", "look_for", "stay_up_date"],
            ),
            ideal_product: find_response(r, &["ideal_product", "perfect", "design", "qualities"]),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resp(id: &str, text: &str, answer: &str) -> InterviewResponse {
        InterviewResponse {
            question_id: id.to_string(),
            question_text: text.to_string(),
            response: answer.to_string(),
        }
    }

    fn completion(
        kind: QuestionnaireType,
        name: &str,
        category: Option<&str>,
        responses: Vec<InterviewResponse>,
    ) -> QuestionnaireCompletion {
        QuestionnaireCompletion {
            questionnaire_type: kind,
            questionnaire_name: name.to_string(),
            category: category.map(String::from),
            completion_data: CompletionData {
                responses,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_find_response_matches_id_case_insensitive() {
        let r = vec![resp("Q_CITY", "Where?", "Leeds")];
        assert_eq!(find_response(&r, &["city"]).as_deref(), Some("Leeds"));
    }

    #[test]
    fn test_find_response_matches_question_text() {
        let r = vec![resp("q1", "Which Town do you live in?", "York")];
        assert_eq!(find_response(&r, &["city", "town"]).as_deref(), Some("York"));
    }

    #[test]
    fn test_find_response_keyword_order_beats_response_order() {
        let r = vec![
            resp("q_location", "Where are you based?", "UK"),
            resp("q_country", "Which country?", "United Kingdom"),
        ];
        // "country" is tried before "location", so the second response wins.
        assert_eq!(
            find_response(&r, &["country", "location"]).as_deref(),
            Some("United Kingdom")
        );
    }

    #[test]
    fn test_find_response_first_matching_response_wins() {
        let r = vec![
            resp("music_1", "", "jazz"),
            resp("music_2", "", "techno"),
        ];
        assert_eq!(find_response(&r, &["music"]).as_deref(), Some("jazz"));
    }

    #[test]
    fn test_find_response_none() {
        let r = vec![resp("q1", "Favourite colour?", "blue")];
        assert_eq!(find_response(&r, &["income", "salary"]), None);
    }

    #[test]
    fn test_parse_number_like_parse_int() {
        assert_eq!(parse_number(Some("34")), Some(34));
        assert_eq!(parse_number(Some("  29 years old")), Some(29));
        assert_eq!(parse_number(Some("-5")), Some(-5));
        assert_eq!(parse_number(Some("about 30")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_centrepiece_extraction() {
        let c = completion(
            QuestionnaireType::Centrepiece,
            "centrepiece",
            None,
            vec![
                resp("your_name", "What is your name?", "Rachita"),
                resp("how_old", "How old are you?", "31"),
                resp("weekend_plans", "What do your weekends look like?", "Hiking"),
                resp("stress_q", "How do you handle stress?", "Yoga"),
            ],
        );
        let mut b = ProfileDataBuilder::new();
        b.add_centrepiece_data(&c).unwrap();
        let centrepiece = b.into_profile_data().centrepiece.unwrap();
        let demo = centrepiece.demographics.unwrap();
        assert_eq!(demo.name.as_deref(), Some("Rachita"));
        assert_eq!(demo.age, Some(31));
        assert_eq!(
            centrepiece.lifestyle.unwrap().weekend_life.as_deref(),
            Some("Hiking")
        );
        assert_eq!(
            centrepiece.personality.unwrap().stress_challenge.as_deref(),
            Some("Yoga")
        );
    }

    #[test]
    fn test_centrepiece_rejects_wrong_type() {
        let c = completion(QuestionnaireType::Product, "moisturizer", None, vec![]);
        let err = ProfileDataBuilder::new().add_centrepiece_data(&c).unwrap_err();
        assert_eq!(
            err,
            BuildError::WrongType {
                expected: "centrepiece",
                found: "product"
            }
        );
    }

    #[test]
    fn test_category_requires_name() {
        let c = completion(QuestionnaireType::Category, "beauty_q", None, vec![]);
        assert_eq!(
            ProfileDataBuilder::new().add_category_data(&c).unwrap_err(),
            BuildError::MissingCategory
        );
    }

    #[test]
    fn test_beauty_category_uses_typed_extractor() {
        let c = completion(
            QuestionnaireType::Category,
            "beauty_deep_dive",
            Some("Beauty"),
            vec![
                resp("morning_routine", "Walk me through your mornings", "Cleanser, SPF"),
                resp("hero", "What is your hero_product?", "Vitamin C serum"),
            ],
        );
        let mut b = ProfileDataBuilder::new();
        b.add_category_data(&c).unwrap();
        let categories = b.into_profile_data().categories.unwrap();
        let Some(CategoryData::Beauty(beauty)) = categories.get("beauty") else {
            panic!("expected beauty category");
        };
        let routine = beauty.routine.clone().unwrap();
        assert_eq!(routine.morning_routine.as_deref(), Some("Cleanser, SPF"));
        assert_eq!(routine.hero_product.as_deref(), Some("Vitamin C serum"));
    }

    #[test]
    fn test_known_category_lowercased_unknown_kept_verbatim() {
        let mut b = ProfileDataBuilder::new();
        b.add_category_data(&completion(
            QuestionnaireType::Category,
            "fit",
            Some("FITNESS"),
            vec![resp("workout", "", "running")],
        ))
        .unwrap();
        b.add_category_data(&completion(
            QuestionnaireType::Category,
            "career",
            Some("Career"),
            vec![resp("work_style", "", "remote")],
        ))
        .unwrap();
        let categories = b.into_profile_data().categories.unwrap();
        assert!(categories.contains_key("fitness"));
        assert!(categories.contains_key("Career"));
        assert_eq!(
            categories.get("Career"),
            Some(&CategoryData::Generic(BTreeMap::from([(
                "work_style".to_string(),
                json!("remote")
            )])))
        );
    }

    #[test]
    fn test_moisturizer_aliases() {
        let mut b = ProfileDataBuilder::new();
        b.add_product_data(&completion(
            QuestionnaireType::Product,
            "Moisturizer",
            None,
            vec![resp("deals_q", "Do you wait for sales?", "Always")],
        ))
        .unwrap();
        let products = b.into_profile_data().products.unwrap();
        let Some(ProductData::FacialMoisturizer(m)) = products.get("facial_moisturizer") else {
            panic!("expected facial moisturizer");
        };
        assert_eq!(
            m.shopping_behaviors.clone().unwrap().deal_sensitivity.as_deref(),
            Some("Always")
        );
    }

    #[test]
    fn test_generic_product_last_duplicate_wins() {
        let mut b = ProfileDataBuilder::new();
        b.add_product_data(&completion(
            QuestionnaireType::Product,
            "cleanser",
            None,
            vec![resp("q1", "", "first"), resp("q1", "", "second")],
        ))
        .unwrap();
        let products = b.into_profile_data().products.unwrap();
        assert_eq!(
            products.get("cleanser"),
            Some(&ProductData::Generic(BTreeMap::from([(
                "q1".to_string(),
                json!("second")
            )])))
        );
    }

    #[test]
    fn test_build_from_completions_dispatches_all() {
        let completions = vec![
            completion(
                QuestionnaireType::Centrepiece,
                "centrepiece",
                None,
                vec![resp("gender", "", "female")],
            ),
            completion(QuestionnaireType::Category, "b", Some("beauty"), vec![]),
            completion(QuestionnaireType::Product, "sunscreen", None, vec![]),
        ];
        let data = build_profile_data_from_completions(&completions).unwrap();
        assert!(data.centrepiece.is_some());
        assert!(data.categories.unwrap().contains_key("beauty"));
        assert!(data.products.unwrap().contains_key("sunscreen"));
    }

    #[test]
    fn test_completion_deserializes_from_json() {
        let c: QuestionnaireCompletion = serde_json::from_value(json!({
            "questionnaire_type": "product",
            "questionnaire_name": "facial_moisturizer",
            "completion_data": {
                "responses": [
                    { "question_id": "q1", "question_text": "Brand?", "response": "CeraVe" }
                ],
                "session_id": "abc"
            }
        }))
        .unwrap();
        assert_eq!(c.questionnaire_type, QuestionnaireType::Product);
        assert_eq!(c.completion_data.responses.len(), 1);
    }

    #[test]
    fn test_migrate_legacy_copies_age_range() {
        let legacy = json!({
            "demographics": { "age_range": "25-34", "gender": "female" },
            "core_attitudes": {}
        });
        let migrated = migrate_legacy_profile_data(legacy.as_object().unwrap());
        let centrepiece = migrated.centrepiece.unwrap();
        assert_eq!(
            centrepiece.demographics.unwrap().age_range.as_deref(),
            Some("25-34")
        );
        assert_eq!(centrepiece.personality, Some(Personality::default()));
        assert!(centrepiece.lifestyle.is_none());
    }

    #[test]
    fn test_migrate_legacy_without_sources_is_empty() {
        let legacy = json!({ "risk_tolerance": { "level": "low" } });
        assert_eq!(
            migrate_legacy_profile_data(legacy.as_object().unwrap()),
            NewProfileData::default()
        );
    }
}
