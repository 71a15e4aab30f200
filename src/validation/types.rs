use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::generator::types::UsernameResponse;

/// `action` field of the length and complexity endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Generate,
    Check,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LengthCheckResponse {
    pub username: String,
    pub valid_length: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComplexityCheckResponse {
    pub username: String,
    pub complexity_ok: bool,
}

/// Either a freshly generated username or the result of a check
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ActionResponse<C> {
    Generated(UsernameResponse),
    Checked(C),
}

/// `{username, contains_special: false}` for clean names,
/// `{original, alternative, contains_special: true}` otherwise
#[derive(Debug, Serialize, Deserialize)]
pub struct SpecialCharactersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    pub contains_special: bool,
}

/// Same layout as [`SpecialCharactersResponse`], keyed on `inappropriate`
#[derive(Debug, Serialize, Deserialize)]
pub struct InappropriateWordsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    pub inappropriate: bool,
    /// Blacklist patterns that matched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomUsernameResponse {
    pub username: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub new_username: String,
    pub existing_username: String,
    pub similar: bool,
    pub similarity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimilarityQuery {
    pub new_username: Option<String>,
    pub existing_username: Option<String>,
}
