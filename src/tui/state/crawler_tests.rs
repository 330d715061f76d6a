//! Tests for the crawler phase machine and new-review detection.

use chrono::{NaiveDate, NaiveDateTime};
use rstest::{fixture, rstest};

use super::{CrawlerPhase, CrawlerViewState, FETCH_FAILED_BANNER};
use crate::api::models::CrawlerAction;
use crate::api::models::test_support::{review_titled, review_with_id, status_update};
use crate::tui::state::SessionId;

fn at(seconds: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|date| date.and_hms_opt(12, 0, seconds))
        .expect("valid timestamp")
}

#[fixture]
fn state() -> CrawlerViewState {
    CrawlerViewState::new(SessionId::new(1))
}

#[rstest]
fn starts_loading(state: CrawlerViewState) {
    assert_eq!(state.phase(), CrawlerPhase::Loading);
    assert!(state.status().is_none());
}

#[rstest]
#[case::stopped(false, CrawlerPhase::IdleStopped)]
#[case::running(true, CrawlerPhase::IdleRunning)]
fn first_snapshot_settles_idle(
    mut state: CrawlerViewState,
    #[case] running: bool,
    #[case] expected: CrawlerPhase,
) {
    state.apply_snapshot(status_update(running, vec![]), at(0));

    assert_eq!(state.phase(), expected);
    assert_eq!(state.last_updated(), Some(at(0)));
}

#[rstest]
fn first_failure_enters_error_then_recovers(mut state: CrawlerViewState) {
    state.record_fetch_failure();
    assert_eq!(state.phase(), CrawlerPhase::Error);
    assert_eq!(state.banner(), Some(FETCH_FAILED_BANNER));

    state.apply_snapshot(status_update(true, vec![]), at(5));

    assert_eq!(state.phase(), CrawlerPhase::IdleRunning);
    assert_eq!(state.banner(), None);
}

#[rstest]
fn later_failure_keeps_snapshot(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(true, vec![review_titled("A")]), at(0));

    state.record_fetch_failure();

    assert_eq!(state.phase(), CrawlerPhase::IdleRunning);
    assert_eq!(state.banner(), Some(FETCH_FAILED_BANNER));
    assert_eq!(
        state.status().map(|status| status.new_reviews.len()),
        Some(1)
    );
}

#[rstest]
fn toggle_ignored_while_loading(mut state: CrawlerViewState) {
    assert_eq!(state.begin_toggle(), None);
    assert_eq!(state.phase(), CrawlerPhase::Loading);
}

#[rstest]
fn toggle_ignored_while_toggling(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(false, vec![]), at(0));

    assert_eq!(state.begin_toggle(), Some(CrawlerAction::Start));
    assert_eq!(state.begin_toggle(), None);
    assert_eq!(state.phase(), CrawlerPhase::Toggling);
}

#[rstest]
#[case::stopped_starts(false, CrawlerAction::Start)]
#[case::running_stops(true, CrawlerAction::Stop)]
fn toggle_picks_action_from_running_flag(
    mut state: CrawlerViewState,
    #[case] running: bool,
    #[case] expected: CrawlerAction,
) {
    state.apply_snapshot(status_update(running, vec![]), at(0));

    assert_eq!(state.begin_toggle(), Some(expected));
    assert_eq!(state.pending_action(), Some(expected));
}

#[rstest]
fn toggle_is_allowed_from_error(mut state: CrawlerViewState) {
    state.record_fetch_failure();

    assert_eq!(state.begin_toggle(), Some(CrawlerAction::Start));
}

#[rstest]
fn poll_during_toggle_keeps_toggling(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(false, vec![]), at(0));
    state.begin_toggle();

    state.apply_snapshot(status_update(false, vec![review_titled("A")]), at(1));

    assert_eq!(state.phase(), CrawlerPhase::Toggling);
    assert_eq!(state.new_review_count(), 1);
}

#[rstest]
fn successful_toggle_adopts_payload_and_supersedes_polls(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(false, vec![]), at(0));
    let in_flight = state.tracker_mut().issue();
    state.begin_toggle();

    state.finish_toggle(status_update(true, vec![]), at(1));

    assert_eq!(state.phase(), CrawlerPhase::IdleRunning);
    assert!(state.is_running());
    assert!(!state.tracker().is_current(in_flight));
    assert_eq!(state.pending_action(), None);
}

#[rstest]
fn failed_toggle_restores_previous_phase(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(true, vec![]), at(0));
    state.begin_toggle();

    state.fail_toggle(CrawlerAction::Stop);

    assert_eq!(state.phase(), CrawlerPhase::IdleRunning);
    assert_eq!(
        state.banner(),
        Some("Failed to stop the crawler. Please try again later.")
    );
}

#[rstest]
fn first_snapshot_marks_everything_new(mut state: CrawlerViewState) {
    state.apply_snapshot(
        status_update(true, vec![review_titled("A"), review_titled("B")]),
        at(0),
    );

    assert_eq!(state.new_review_count(), 2);
}

#[rstest]
fn same_payload_twice_has_no_new_reviews(mut state: CrawlerViewState) {
    let reviews = vec![review_titled("A"), review_titled("B")];
    state.apply_snapshot(status_update(true, reviews.clone()), at(0));

    state.apply_snapshot(status_update(true, reviews), at(5));

    assert_eq!(state.new_review_count(), 0);
}

#[rstest]
fn only_unseen_reviews_are_new(mut state: CrawlerViewState) {
    state.apply_snapshot(status_update(true, vec![review_with_id(1, "A", "AI")]), at(0));

    state.apply_snapshot(
        status_update(
            true,
            vec![review_with_id(1, "A", "AI"), review_with_id(2, "A", "AI")],
        ),
        at(5),
    );

    let flags: Vec<bool> = state
        .reviews_newest_first()
        .map(|review| state.is_new(review))
        .collect();
    assert_eq!(flags, vec![true, false], "id wins over the shared title");
}

#[rstest]
fn reviews_are_listed_newest_first(mut state: CrawlerViewState) {
    state.apply_snapshot(
        status_update(true, vec![review_titled("A"), review_titled("B")]),
        at(0),
    );

    let titles: Vec<&str> = state
        .reviews_newest_first()
        .map(|review| review.display_title())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}
