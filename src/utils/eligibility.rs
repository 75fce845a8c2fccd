use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::poll::Poll;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteEligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl VoteEligibility {
    fn denied(reason: &'static str) -> Self {
        VoteEligibility {
            allowed: false,
            reason: Some(reason),
        }
    }
}

pub fn is_poll_expired(poll: &Poll) -> bool {
    is_expired_at(poll, Utc::now())
}

fn is_expired_at(poll: &Poll, now: DateTime<Utc>) -> bool {
    poll.expires_at.is_some_and(|expires_at| expires_at <= now)
}

/// First failing check wins. Only the poll's single embedded user vote is
/// consulted, so "already voted" reflects the latest caller on this poll.
pub fn can_vote(poll: &Poll, is_authenticated: bool) -> VoteEligibility {
    if !poll.is_active {
        return VoteEligibility::denied("Poll is closed");
    }
    if is_poll_expired(poll) {
        return VoteEligibility::denied("Poll has expired");
    }
    if poll.require_auth && !is_authenticated {
        return VoteEligibility::denied("Authentication required");
    }
    if poll
        .user_vote
        .as_ref()
        .is_some_and(|vote| !vote.option_ids.is_empty())
    {
        return VoteEligibility::denied("You have already voted");
    }
    VoteEligibility {
        allowed: true,
        reason: None,
    }
}

pub fn generate_poll_url(origin: Option<&str>, poll_id: &str) -> String {
    match origin {
        Some(origin) => format!("{}/polls/{}", origin.trim_end_matches('/'), poll_id),
        None => format!("/polls/{}", poll_id),
    }
}
