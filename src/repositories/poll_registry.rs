use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::{
    config::latency::{pause, Latency},
    error::PollsError,
    models::{
        identity::Identity,
        poll::{new_id, CreatePollData, Poll, PollOption, PollTally, UserVote, Vote},
    },
};

/// Registry entry. `id` and `creator_id` never change after creation, so
/// lookups and creator filters don't need the poll's lock.
struct PollSlot {
    id: String,
    creator_id: String,
    poll: Arc<Mutex<Poll>>,
}

/// Owns every poll, newest first. Each poll sits behind its own mutex and
/// votes apply their read-modify-write while holding it.
pub struct PollRegistry {
    polls: RwLock<Vec<PollSlot>>,
    latency: Latency,
}

impl PollRegistry {
    pub fn new(latency: Latency) -> Self {
        Self {
            polls: RwLock::new(Vec::new()),
            latency,
        }
    }

    /// Registry preloaded with the two demo polls.
    pub fn with_demo_polls(latency: Latency) -> Self {
        let polls = demo_polls()
            .into_iter()
            .map(|poll| PollSlot {
                id: poll.id.clone(),
                creator_id: poll.creator_id.clone(),
                poll: Arc::new(Mutex::new(poll)),
            })
            .collect();
        Self {
            polls: RwLock::new(polls),
            latency,
        }
    }

    async fn find(&self, poll_id: &str) -> Option<Arc<Mutex<Poll>>> {
        self.polls
            .read()
            .await
            .iter()
            .find(|slot| slot.id == poll_id)
            .map(|slot| slot.poll.clone())
    }

    async fn snapshot<'a>(slots: impl Iterator<Item = &'a PollSlot>) -> Vec<Poll> {
        join_all(slots.map(|slot| async move { slot.poll.lock().await.clone() })).await
    }

    pub async fn list_all(&self) -> Vec<Poll> {
        pause(self.latency.list).await;
        let polls = self.polls.read().await;
        Self::snapshot(polls.iter()).await
    }

    pub async fn get_by_id(&self, poll_id: &str) -> Option<Poll> {
        pause(self.latency.get).await;
        let poll = self.find(poll_id).await?;
        let poll = poll.lock().await.clone();
        Some(poll)
    }

    pub async fn list_by_creator(&self, creator_id: &str) -> Vec<Poll> {
        pause(self.latency.by_creator).await;
        let polls = self.polls.read().await;
        Self::snapshot(polls.iter().filter(|slot| slot.creator_id == creator_id)).await
    }

    /// Option count is not checked here; callers validate input first.
    /// `creator` is embedded only when it is the identity named by `creator_id`.
    pub async fn create(
        &self,
        data: CreatePollData,
        creator_id: &str,
        creator: Option<Identity>,
    ) -> Poll {
        pause(self.latency.create).await;

        let poll_id = new_id();
        let now = Utc::now();
        let options = data
            .options
            .iter()
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(index, text)| PollOption {
                id: new_id(),
                poll_id: poll_id.clone(),
                text: text.clone(),
                votes: Vec::new(),
                vote_count: 0,
                order: index as u32 + 1,
            })
            .collect();

        let poll = Poll {
            id: poll_id.clone(),
            title: data.title,
            description: data.description,
            creator_id: creator_id.to_string(),
            creator: creator.filter(|identity| identity.id == creator_id),
            options,
            is_active: true,
            allow_multiple_votes: data.allow_multiple_votes,
            require_auth: data.require_auth,
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
            total_votes: 0,
            user_vote: None,
        };

        self.polls.write().await.insert(
            0,
            PollSlot {
                id: poll_id.clone(),
                creator_id: creator_id.to_string(),
                poll: Arc::new(Mutex::new(poll.clone())),
            },
        );

        info!(
            "Created poll {} with {} options for creator {}",
            poll_id,
            poll.options.len(),
            creator_id
        );
        poll
    }

    /// Replaces the voter's earlier votes on the poll with one vote per known
    /// option id. An absent voter id only matches other anonymous votes.
    pub async fn vote(
        &self,
        poll_id: &str,
        option_ids: &[String],
        voter_id: Option<&str>,
    ) -> Result<(), PollsError> {
        pause(self.latency.vote).await;

        let poll = self.find(poll_id).await.ok_or_else(|| {
            warn!("Vote on unknown poll {}", poll_id);
            PollsError::PollNotFound
        })?;
        let mut poll = poll.lock().await;

        if !poll.is_active {
            warn!("Vote on closed poll {}", poll_id);
            return Err(PollsError::PollClosed);
        }

        for option in poll.options.iter_mut() {
            option
                .votes
                .retain(|vote| vote.user_id.as_deref() != voter_id);
        }

        for option_id in option_ids {
            if let Some(option) = poll.options.iter_mut().find(|o| &o.id == option_id) {
                option.votes.push(Vote::new(
                    poll_id,
                    option_id,
                    voter_id.map(str::to_string),
                ));
            }
        }

        poll.recount();
        poll.user_vote = Some(UserVote {
            option_ids: option_ids.to_vec(),
            voted_at: Utc::now(),
        });

        info!(
            "Recorded vote on poll {} ({} total votes)",
            poll_id, poll.total_votes
        );
        Ok(())
    }

    pub async fn close(&self, poll_id: &str) {
        pause(self.latency.close).await;
        if let Some(poll) = self.find(poll_id).await {
            let mut poll = poll.lock().await;
            poll.is_active = false;
            poll.updated_at = Utc::now();
            info!("Closed poll {}", poll_id);
        }
    }

    pub async fn results(&self, poll_id: &str) -> Option<PollTally> {
        let poll = self.find(poll_id).await?;
        let poll = poll.lock().await;
        Some(poll.tally())
    }
}

fn demo_poll(
    id: &str,
    title: &str,
    description: &str,
    age: Duration,
    flags: (bool, bool),
    options: &[(&str, &str, u32)],
) -> Poll {
    let now = Utc::now();
    let options = options
        .iter()
        .enumerate()
        .map(|(index, (option_id, text, count))| PollOption {
            id: option_id.to_string(),
            poll_id: id.to_string(),
            text: text.to_string(),
            votes: (0..*count)
                .map(|n| Vote::new(id, option_id, Some(format!("seed-{option_id}-{n}"))))
                .collect(),
            vote_count: 0,
            order: index as u32 + 1,
        })
        .collect();

    let mut poll = Poll {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        creator_id: String::from("1"),
        creator: Some(Identity::demo()),
        options,
        is_active: true,
        allow_multiple_votes: flags.0,
        require_auth: flags.1,
        expires_at: None,
        created_at: now - age,
        updated_at: now,
        total_votes: 0,
        user_vote: None,
    };
    poll.recount();
    poll
}

fn demo_polls() -> Vec<Poll> {
    vec![
        demo_poll(
            "1",
            "What's your favorite programming language?",
            "Help us understand the community's preferences",
            Duration::days(1),
            (false, false),
            &[
                ("1", "JavaScript", 25),
                ("2", "Python", 30),
                ("3", "TypeScript", 20),
                ("4", "Go", 15),
            ],
        ),
        demo_poll(
            "2",
            "Best time for team meetings?",
            "Let's find a time that works for everyone",
            Duration::hours(1),
            (true, true),
            &[("5", "9:00 AM", 12), ("6", "2:00 PM", 18), ("7", "4:00 PM", 8)],
        ),
    ]
}
