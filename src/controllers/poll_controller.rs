use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query},
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Response, Sse,
    },
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use futures::{stream, Stream, StreamExt};
use tokio_stream::wrappers::IntervalStream;
use tower_sessions::Session;

use crate::{
    config::startup::AppState,
    dtos::{
        requests::{CreatePollDTO, ResultQueryParams, VoteDTO},
        responses::{ApiSuccess, EligibilityDTO, PollResultsDTO},
    },
    error::{AppError, PollsError},
    models::{identity::Identity, poll::Poll},
    repositories::{account_directory::AccountDirectory, poll_registry::PollRegistry},
    utils::eligibility::{can_vote, generate_poll_url},
};

//*GET:: api/polls
pub async fn get_all_polls(
    Extension(app_state): Extension<AppState>,
) -> Result<ApiSuccess<Vec<Poll>>, AppError> {
    let polls = app_state.polls.list_all().await;
    Ok(ApiSuccess::ok(polls))
}

//*GET:: api/polls/poll_id
pub async fn get_poll_by_id(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
) -> Result<ApiSuccess<Poll>, AppError> {
    let poll = app_state
        .polls
        .get_by_id(&poll_id)
        .await
        .ok_or(PollsError::PollNotFound)?;
    Ok(ApiSuccess::ok(poll))
}

//?POST:: api/polls
pub async fn create_new_poll(
    Extension(app_state): Extension<AppState>,
    session: Session,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePollDTO>, AppError>,
) -> Result<ApiSuccess<Poll>, AppError> {
    let (poll_data, creator_id) = match (payload.pollData, payload.creatorId) {
        (Some(poll_data), Some(creator_id)) if !creator_id.is_empty() => (poll_data, creator_id),
        _ => return Err(AppError::Validation(String::from("Missing required fields"))),
    };

    if poll_data.title.trim().is_empty() {
        return Err(AppError::Validation(String::from("Title is required")));
    }
    let valid_options = poll_data
        .options
        .iter()
        .filter(|option| !option.trim().is_empty())
        .count();
    if valid_options < 2 {
        return Err(AppError::Validation(String::from(
            "At least 2 options are required",
        )));
    }

    // Embedded as `creator` only when the caller is the named creator
    let caller = AccountDirectory::new(session, app_state.settings.latency())
        .current_identity()
        .await?;
    let poll = app_state.polls.create(poll_data, &creator_id, caller).await;
    Ok(ApiSuccess::created(poll).with_message("Poll created successfully"))
}

//?POST:: api/polls/poll_id/vote
pub async fn cast_vote(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<VoteDTO>, AppError>,
) -> Result<ApiSuccess<()>, AppError> {
    let option_ids = payload
        .optionIds
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| AppError::Validation(String::from("Option IDs are required")))?;

    app_state
        .polls
        .vote(&poll_id, &option_ids, payload.userId.as_deref())
        .await
        .map_err(AppError::VoteRejected)?;

    Ok(ApiSuccess::message_only("Vote recorded successfully"))
}

//?POST:: api/polls/poll_id/close
pub async fn close_poll_by_id(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
) -> Result<ApiSuccess<()>, AppError> {
    app_state.polls.close(&poll_id).await;
    Ok(ApiSuccess::message_only("Poll closed successfully"))
}

//*GET:: api/polls/poll_id/can-vote
pub async fn can_user_vote(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
    session: Session,
) -> Result<ApiSuccess<EligibilityDTO>, AppError> {
    let poll = app_state
        .polls
        .get_by_id(&poll_id)
        .await
        .ok_or(PollsError::PollNotFound)?;

    let is_authenticated = AccountDirectory::new(session, app_state.settings.latency())
        .is_authenticated()
        .await?;
    let eligibility = can_vote(&poll, is_authenticated);

    Ok(ApiSuccess::ok(EligibilityDTO {
        can_vote: eligibility.allowed,
        reason: eligibility.reason.map(String::from),
        share_url: generate_poll_url(app_state.settings.public_origin.as_deref(), &poll.id),
    }))
}

//*GET:: api/polls/creator/creator_id
pub async fn get_polls_by_creator(
    Extension(app_state): Extension<AppState>,
    Path(creator_id): Path<String>,
) -> Result<ApiSuccess<Vec<Poll>>, AppError> {
    let polls = app_state.polls.list_by_creator(&creator_id).await;
    Ok(ApiSuccess::ok(polls))
}

//*GET:: api/polls/manage
pub async fn manage_all_polls(
    Extension(app_state): Extension<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<Vec<Poll>>, AppError> {
    let polls = app_state.polls.list_by_creator(&identity.id).await;
    Ok(ApiSuccess::ok(polls).with_message("User polls fetched successfully"))
}

//*GET:: api/polls/poll_id/results
pub async fn get_poll_result(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
    Query(filters): Query<ResultQueryParams>,
) -> Result<Response, AppError> {
    let results = app_state
        .polls
        .results(&poll_id)
        .await
        .ok_or(PollsError::PollNotFound)?;

    //* Live results -> stream the tally of the given poll_id
    if let Some(true) = filters.live {
        Ok(start_sse(app_state.polls.clone(), poll_id).into_response())
    } else {
        Ok(ApiSuccess::ok(PollResultsDTO::from(results)).into_response())
    }
}

pub fn start_sse(
    polls: Arc<PollRegistry>,
    poll_id: String,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(live_results(polls, poll_id)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive-text"),
    )
}

/// One `poll-update` per second. Once the poll is gone a single `error`
/// event is sent and the stream ends.
pub fn live_results(
    polls: Arc<PollRegistry>,
    poll_id: String,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let ticks = IntervalStream::new(tokio::time::interval(Duration::from_secs(1)));

    stream::unfold(Some(ticks), move |ticks| {
        let polls = polls.clone();
        let poll_id = poll_id.clone();

        async move {
            let mut ticks = ticks?;
            ticks.next().await?;

            match polls.results(&poll_id).await {
                Some(tally) => {
                    let event = Event::default()
                        .event("poll-update")
                        .json_data(PollResultsDTO::from(tally))
                        .unwrap_or_else(|_| {
                            Event::default()
                                .event("error")
                                .data("Error serializing poll results")
                        });
                    Some((Ok::<_, Infallible>(event), Some(ticks)))
                }
                None => {
                    let event = Event::default().event("error").data("Poll not found");
                    Some((Ok::<_, Infallible>(event), None))
                }
            }
        }
    })
}
