//! Review-session controller scenarios: fixed/endless modes, exhaustion,
//! failure handling, mid-review shelving and stale-response discarding.

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use tokio::sync::Notify;

use common::{http_error, pending_card, question, verdict, MockApi};
use lianxi_engine::error::EngineError;
use lianxi_engine::models::{QuizType, ReviewMode};
use lianxi_engine::pool::CardPool;
use lianxi_engine::session::{ReviewPhase, ReviewSessionController};

fn controller(api: &Arc<MockApi>) -> ReviewSessionController<MockApi> {
    ReviewSessionController::new(Arc::clone(api), CardPool::new())
}

#[tokio::test]
async fn fixed_review_completes_at_count() {
    let api = MockApi::new();
    for id in 1..=3 {
        api.push_quiz(Ok(Some(question(id))));
    }
    api.push_answer(Ok(verdict(true)));
    api.push_answer(Ok(verdict(false)));
    api.push_answer(Ok(verdict(true)));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(3), None).await;

    for _ in 0..3 {
        assert_eq!(ctrl.phase(), ReviewPhase::AwaitingAnswer);
        ctrl.submit_answer("cat").await.unwrap();
        assert_eq!(ctrl.phase(), ReviewPhase::ShowingResult);
        ctrl.next_question().await.unwrap();
    }

    assert_eq!(ctrl.phase(), ReviewPhase::Finished);
    let summary = ctrl.summary().unwrap();
    assert_eq!(summary.answered, 3);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.percent, 67);
    // Exactly three fetches: the fixed count is checked before fetching.
    assert_eq!(api.quiz_fetch_count(), 3);

    let session = ctrl.session().unwrap();
    assert_eq!(session.seen, vec![1, 2, 3]);
}

#[tokio::test]
async fn fixed_review_sends_growing_exclusion_set() {
    let api = MockApi::new();
    for id in 1..=3 {
        api.push_quiz(Ok(Some(question(id))));
    }

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(5), None).await;
    ctrl.submit_answer("cat").await.unwrap();
    ctrl.next_question().await.unwrap();
    ctrl.submit_answer("cat").await.unwrap();
    ctrl.next_question().await.unwrap();

    let excludes = api.quiz_excludes.lock().clone();
    assert_eq!(excludes, vec![vec![], vec![1], vec![1, 2]]);
}

#[tokio::test]
async fn pool_exhaustion_finishes_instead_of_erroring() {
    // Fixed(10) over a pool of exactly three cards.
    let api = MockApi::new();
    for id in 1..=3 {
        api.push_quiz(Ok(Some(question(id))));
    }
    api.push_quiz(Ok(None));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(10), None).await;
    for _ in 0..3 {
        ctrl.submit_answer("cat").await.unwrap();
        ctrl.next_question().await.unwrap();
    }

    assert_eq!(ctrl.phase(), ReviewPhase::Finished);
    let session = ctrl.session().unwrap();
    assert_eq!(session.answered, 3);
    assert_eq!(session.seen, vec![1, 2, 3]);
    // The exhausted fetch carried the full exclusion set.
    assert_eq!(api.quiz_excludes.lock().last().unwrap(), &vec![1, 2, 3]);
}

#[tokio::test]
async fn endless_mode_sends_no_exclusion_and_permits_repeats() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));
    api.push_quiz(Ok(Some(question(1))));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Endless, None).await;
    ctrl.submit_answer("cat").await.unwrap();
    ctrl.next_question().await.unwrap();
    ctrl.submit_answer("cat").await.unwrap();

    let session = ctrl.session().unwrap();
    assert_eq!(session.seen, vec![1, 1]);
    let excludes = api.quiz_excludes.lock().clone();
    assert!(excludes.iter().all(|e| e.is_empty()));
}

#[tokio::test]
async fn pinned_quiz_direction_rides_every_fetch() {
    let api = MockApi::new();
    for id in 1..=2 {
        api.push_quiz(Ok(Some(question(id))));
    }

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(5), Some(QuizType::EnToZh)).await;
    ctrl.submit_answer("cat").await.unwrap();
    ctrl.next_question().await.unwrap();

    let types = api.quiz_types.lock().clone();
    assert_eq!(types, vec![Some(QuizType::EnToZh); 2]);
    assert_eq!(
        ctrl.session().unwrap().quiz_type,
        Some(QuizType::EnToZh)
    );
}

#[tokio::test]
async fn unpinned_session_lets_the_service_choose() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(5), None).await;

    assert_eq!(api.quiz_types.lock().clone(), vec![None]);
}

#[tokio::test]
async fn submission_failure_leaves_question_answerable() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));
    api.push_answer(Err(http_error("boom")));
    api.push_answer(Ok(verdict(true)));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(1), None).await;

    let err = ctrl.submit_answer("cat").await.unwrap_err();
    assert!(matches!(err, EngineError::Api(_)));
    assert_eq!(ctrl.phase(), ReviewPhase::AwaitingAnswer);
    let session = ctrl.session().unwrap();
    assert_eq!(session.answered, 0);
    assert!(session.seen.is_empty());

    // Resubmission goes through.
    ctrl.submit_answer("cat").await.unwrap();
    assert_eq!(ctrl.phase(), ReviewPhase::ShowingResult);
    assert_eq!(ctrl.session().unwrap().answered, 1);
}

#[tokio::test]
async fn quiz_fetch_failure_finishes_the_session() {
    let api = MockApi::new();
    api.push_quiz(Err(http_error("down")));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(5), None).await;

    assert_eq!(ctrl.phase(), ReviewPhase::Finished);
    assert_eq!(ctrl.summary().unwrap().answered, 0);
}

#[tokio::test]
async fn double_submit_is_a_phase_error() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));

    let ctrl = controller(&api);
    ctrl.start(ReviewMode::Fixed(2), None).await;
    ctrl.submit_answer("cat").await.unwrap();

    // The choice is final: no second submission for the same question.
    let err = ctrl.submit_answer("dog").await.unwrap_err();
    assert!(matches!(err, EngineError::Phase { .. }));
    assert_eq!(ctrl.session().unwrap().answered, 1);
}

#[tokio::test]
async fn deactivate_shelves_card_and_advances() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));
    api.push_quiz(Ok(Some(question(2))));

    let pool = CardPool::new();
    pool.insert(pending_card(1));
    pool.insert(pending_card(2));
    let ctrl = ReviewSessionController::new(Arc::clone(&api), pool.clone());

    ctrl.start(ReviewMode::Fixed(5), None).await;
    ctrl.deactivate_during_review(1).await.unwrap();

    // PATCH active=false went out and the pool reflects it.
    let patches = api.patches.lock().clone();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].0, 1);
    assert_eq!(patches[0].1.active, Some(false));
    assert!(!pool.get(1).unwrap().active);

    // Skipping is not answering.
    let session = ctrl.session().unwrap();
    assert_eq!(session.answered, 0);
    assert!(session.seen.is_empty());
    assert_eq!(session.current.as_ref().unwrap().card_id, 2);
}

#[tokio::test]
async fn stale_quiz_response_is_discarded_after_end() {
    let api = MockApi::new();
    api.push_quiz(Ok(Some(question(1))));
    api.push_quiz(Ok(Some(question(2))));

    let ctrl = Arc::new(controller(&api));
    ctrl.start(ReviewMode::Fixed(5), None).await;
    ctrl.submit_answer("cat").await.unwrap();

    // Hold the next fetch in flight.
    let gate = Arc::new(Notify::new());
    *api.quiz_gate.lock() = Some(Arc::clone(&gate));

    let advancing = {
        let ctrl = Arc::clone(&ctrl);
        tokio::spawn(async move { ctrl.next_question().await })
    };
    while api.quiz_fetch_count() < 2 {
        tokio::task::yield_now().await;
    }

    // The user quits while the fetch is pending; its response must not
    // resurrect the session.
    ctrl.end();
    gate.notify_one();
    advancing.await.unwrap().unwrap();

    assert_eq!(ctrl.phase(), ReviewPhase::Idle);
    assert!(ctrl.session().is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn fixed_session_accounting_invariants(
        verdicts in proptest::collection::vec(any::<bool>(), 1..20),
        n in 1u32..20,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            let api = MockApi::new();
            for (i, &correct) in verdicts.iter().enumerate() {
                api.push_quiz(Ok(Some(question(i as i64 + 1))));
                api.push_answer(Ok(verdict(correct)));
            }
            api.push_quiz(Ok(None));

            let ctrl = controller(&api);
            ctrl.start(ReviewMode::Fixed(n), None).await;
            while ctrl.phase() == ReviewPhase::AwaitingAnswer {
                ctrl.submit_answer("cat").await.unwrap();
                ctrl.next_question().await.unwrap();
            }

            let session = ctrl.session().unwrap();
            prop_assert!(session.correct <= session.answered);
            prop_assert!(session.answered <= n);

            let mut seen = session.seen.clone();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), session.seen.len());
            Ok(())
        })?;
    }
}
