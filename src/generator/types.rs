use serde::{Deserialize, Serialize};

/// Response carrying a single username
#[derive(Debug, Serialize, Deserialize)]
pub struct UsernameResponse {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub username: String,
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HobbySuggestionsResponse {
    pub hobby: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarSuggestionsResponse {
    pub original: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VariationResponse {
    pub base: String,
    pub variations: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FirstNameQuery {
    pub first_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsQuery {
    pub first_name: Option<String>,
    pub favorite_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HobbyQuery {
    pub hobby: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhraseQuery {
    pub phrase: Option<String>,
    /// `true` in any case enables the numeric suffix
    pub unique: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrefixQuery {
    pub prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuffixQuery {
    pub suffix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LengthQuery {
    pub length: Option<String>,
}
