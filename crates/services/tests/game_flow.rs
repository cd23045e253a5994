use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use mathblast_core::model::{Mode, RewardTier, Submission};
use mathblast_core::time::fixed_clock;
use services::GameLoopService;
use storage::repository::InMemoryStore;

fn service() -> GameLoopService {
    GameLoopService::new(fixed_clock(), Arc::new(InMemoryStore::new()))
}

#[tokio::test]
async fn full_addition_run_records_progress_and_rewards() {
    let service = service();
    let mut session = service.start_session(Mode::Addition);
    let mut rng = StdRng::seed_from_u64(42);

    let mut last = None;
    for _ in 0..5 {
        session.next_question(&mut rng).unwrap();
        let correct = session.current_question().unwrap().correct_submission();
        last = Some(
            service
                .answer_current(&mut session, &correct)
                .await
                .unwrap(),
        );
    }

    let answer = last.unwrap();
    assert_eq!(answer.outcome.score, 5);
    assert_eq!(answer.outcome.reward, Some(RewardTier::Sticker));

    // Every correct answer added the running score: 1 + 2 + 3 + 4 + 5.
    assert_eq!(answer.progress.best(Mode::Addition), 5);
    assert_eq!(answer.progress.total_score(), 15);
    assert_eq!(answer.progress.rewards(), 1);
    assert_eq!(answer.progress.stars_for(Mode::Addition), 1);

    // The persisted snapshot agrees with what the caller saw.
    let reloaded = service.progress().load().await;
    assert_eq!(reloaded, answer.progress);
}

#[tokio::test]
async fn wrong_answers_do_not_touch_progress() {
    let service = service();
    let mut session = service.start_session(Mode::Counting);
    let mut rng = StdRng::seed_from_u64(7);

    session.next_question(&mut rng).unwrap();
    let answer = service
        .answer_current(&mut session, &Submission::Number(1000))
        .await
        .unwrap();

    assert!(!answer.outcome.correct);
    assert_eq!(answer.progress.total_score(), 0);
    assert!(session.current_question().is_some());
}

#[tokio::test]
async fn trophy_run_bumps_rewards_twice() {
    let service = service();
    let mut session = service.start_session(Mode::Shapes);
    let mut rng = StdRng::seed_from_u64(3);

    let mut last = None;
    for _ in 0..10 {
        session.next_question(&mut rng).unwrap();
        let correct = session.current_question().unwrap().correct_submission();
        last = Some(
            service
                .answer_current(&mut session, &correct)
                .await
                .unwrap(),
        );
    }

    let answer = last.unwrap();
    assert_eq!(answer.outcome.reward, Some(RewardTier::Trophy));
    // One reward at score 5, another at score 10.
    assert_eq!(answer.progress.rewards(), 2);
    assert_eq!(answer.progress.best(Mode::Shapes), 10);
}

#[tokio::test]
async fn reset_clears_a_played_profile() {
    let service = service();
    let mut session = service.start_session(Mode::Patterns);
    let mut rng = StdRng::seed_from_u64(9);

    session.next_question(&mut rng).unwrap();
    let correct = session.current_question().unwrap().correct_submission();
    service
        .answer_current(&mut session, &correct)
        .await
        .unwrap();
    assert_eq!(service.progress().load().await.total_score(), 1);

    service.progress().reset().await;
    assert_eq!(service.progress().load().await.total_score(), 0);
}
