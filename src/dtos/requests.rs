use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::poll::CreatePollData;

#[allow(non_snake_case)]
#[derive(Deserialize, Clone, Debug)]
pub struct RegisterDTO {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
    pub firstName: Option<String>,
    pub lastName: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoginDTO {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[allow(non_snake_case)]
#[derive(Deserialize, Clone, Debug)]
pub struct CreatePollDTO {
    pub pollData: Option<CreatePollData>,
    pub creatorId: Option<String>,
}

#[allow(non_snake_case)]
#[derive(Deserialize, Clone, Debug)]
pub struct VoteDTO {
    #[serde(default, deserialize_with = "id_list")]
    pub optionIds: Option<Vec<String>>,
    pub userId: Option<String>,
}

/// Anything other than an array of strings reads as "no ids given".
fn id_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => None,
    };
    Ok(ids)
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ResultQueryParams {
    pub live: Option<bool>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CredentialCheckDTO {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
