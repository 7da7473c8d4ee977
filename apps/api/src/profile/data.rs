//! Profile data shapes stored in `profile_versions.profile_data`.
//!
//! Two formats coexist: the structured centrepiece/category/product layout
//! produced by [`ProfileDataBuilder`](super::builder::ProfileDataBuilder), and
//! the flat legacy layout written by the first profile extractor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Centrepiece
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_life_work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_wellness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests_hobbies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_life: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaCulture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv_movies_sports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebrities_influences: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub misunderstood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curiosity_openness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_vs_spontaneity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_energy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_strengths: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesBeliefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_values: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_political_engagement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspirations_worldview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_priorities: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentrepieceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Lifestyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_culture: Option<MediaCulture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_beliefs: Option<ValuesBeliefs>,
}

// ────────────────────────────────────────────────────────────────────────────
// Beauty category
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinHairType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_concerns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_concerns: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeautyRoutine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning_routine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_routine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_on_routine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_products_in_routine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes_based_on_seasonality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beauty_routine_frustrations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_care_perception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beauty_routine_motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_experimentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_with_beauty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeautyCategoryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_hair_type: Option<SkinHairType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<BeautyRoutine>,
}

// ────────────────────────────────────────────────────────────────────────────
// Facial moisturizer product
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacialMoisturizerAttitudes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_sought: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_important_benefit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainable_values: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_seeking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_avoided: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dermatologist_recommended: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisturizer_frustrations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoisturizerUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_product_usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_product_satisfaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_awareness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_consideration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switching_triggers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingBehaviors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_vs_instore_shopping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_price_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_cues: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_sensitivity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging_presentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_attributes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationSourcesMessaging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_searching: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_information_sources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_product: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacialMoisturizerProductData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facial_moisturizer_attitudes: Option<FacialMoisturizerAttitudes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisturizer_usage: Option<MoisturizerUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_behaviors: Option<ShoppingBehaviors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_sources_messaging: Option<InformationSourcesMessaging>,
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level shapes
// ────────────────────────────────────────────────────────────────────────────

/// A category module. Categories without a dedicated schema keep the raw
/// `question_id → response` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryData {
    Beauty(BeautyCategoryData),
    Generic(BTreeMap<String, Value>),
}

/// A product module. Products without a dedicated schema keep the raw
/// `question_id → response` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductData {
    FacialMoisturizer(FacialMoisturizerProductData),
    Generic(BTreeMap<String, Value>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProfileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centrepiece: Option<CentrepieceData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, CategoryData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<BTreeMap<String, ProductData>>,
}

#[derive(Debug, Error)]
pub enum ProfileShapeError {
    #[error("Invalid profile data structure")]
    NotAnObject,
}

/// Either profile layout, distinguished by [`ProfileData::classify`].
///
/// Both variants keep the stored object as-is, including keys and value types
/// the typed layout does not cover.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileData {
    New(Map<String, Value>),
    Legacy(Map<String, Value>),
}

const NEW_FORMAT_KEYS: [&str; 3] = ["centrepiece", "categories", "products"];

impl ProfileData {
    /// Decides the layout of a stored `profile_data` value.
    ///
    /// An object carrying any of `centrepiece`, `categories`, `products` is the
    /// new layout; so is an object wrapping another object under
    /// `profile_data` (the wrapped object is what gets kept). Every other
    /// object is legacy.
    pub fn classify(value: &Value) -> Result<Self, ProfileShapeError> {
        let obj = value.as_object().ok_or(ProfileShapeError::NotAnObject)?;

        if NEW_FORMAT_KEYS.iter().any(|k| obj.contains_key(*k)) {
            return Ok(ProfileData::New(obj.clone()));
        }

        if let Some(Value::Object(inner)) = obj.get("profile_data") {
            return Ok(ProfileData::New(inner.clone()));
        }

        Ok(ProfileData::Legacy(obj.clone()))
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            ProfileData::New(_) => "new",
            ProfileData::Legacy(_) => "legacy",
        }
    }
}
