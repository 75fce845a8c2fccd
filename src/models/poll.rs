use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// References the creating identity's id
    pub creator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Identity>,
    pub options: Vec<PollOption>,
    pub is_active: bool,
    pub allow_multiple_votes: bool, //Not enforced by voting
    pub require_auth: bool,         //Checked by eligibility only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_votes: u32,
    /// Latest caller's vote; one shared marker per poll
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<UserVote>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: String,
    /// References the owning poll's id
    pub poll_id: String,
    pub text: String,
    pub votes: Vec<Vote>,
    pub vote_count: u32,
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub poll_id: String,
    pub option_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserVote {
    pub option_ids: Vec<String>,
    pub voted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollData {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub allow_multiple_votes: bool,
    #[serde(default)]
    pub require_auth: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Per-option counts and shares of one poll at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PollTally {
    pub poll_id: String,
    pub title: String,
    pub is_active: bool,
    pub total_votes: u32,
    pub options: Vec<OptionTally>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionTally {
    pub option_id: String,
    pub text: String,
    pub votes: u32,
    pub percentage: f64,
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Poll {
    /// Recomputes every option's count from its vote list, then the poll total.
    pub fn recount(&mut self) {
        for option in self.options.iter_mut() {
            option.vote_count = option.votes.len() as u32;
        }
        self.total_votes = self.options.iter().map(|o| o.vote_count).sum();
    }

    /// Shares are percentages rounded to one decimal; all zero while nobody has voted.
    pub fn tally(&self) -> PollTally {
        let options = self
            .options
            .iter()
            .map(|option| {
                let percentage = if self.total_votes > 0 {
                    let share = f64::from(option.vote_count) * 100.0 / f64::from(self.total_votes);
                    (share * 10.0).round() / 10.0
                } else {
                    0.0
                };
                OptionTally {
                    option_id: option.id.clone(),
                    text: option.text.clone(),
                    votes: option.vote_count,
                    percentage,
                }
            })
            .collect();

        PollTally {
            poll_id: self.id.clone(),
            title: self.title.clone(),
            is_active: self.is_active,
            total_votes: self.total_votes,
            options,
        }
    }
}

impl Vote {
    pub fn new(poll_id: &str, option_id: &str, user_id: Option<String>) -> Self {
        Vote {
            id: new_id(),
            poll_id: poll_id.to_string(),
            option_id: option_id.to_string(),
            user_id,
            voter_ip: None,
            created_at: Utc::now(),
        }
    }
}
