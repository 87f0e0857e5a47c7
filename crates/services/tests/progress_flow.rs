use chrono::NaiveDate;
use lift_core::model::{ExerciseId, SetEntry, UserId};
use rust_decimal::Decimal;
use services::{AppServices, Clock, ProgressError, ProgressQuery, WorkoutDraft};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn set(exercise_id: ExerciseId, n: u32, weight: i64, reps: u32) -> SetEntry {
    SetEntry::new(exercise_id, n, Some(Decimal::from(weight)), Some(reps), None).unwrap()
}

async fn bench_history(app: &AppServices, user: UserId) -> ExerciseId {
    let bench = app
        .exercises()
        .create_exercise("Bench Press")
        .await
        .unwrap()
        .id();
    let workouts = app.workouts();
    workouts
        .log_workout(
            user,
            WorkoutDraft::new(date(2024, 1, 1), "Chest day")
                .with_sets(vec![set(bench, 1, 135, 10), set(bench, 2, 185, 8)]),
        )
        .await
        .unwrap();
    workouts
        .log_workout(
            user,
            WorkoutDraft::new(date(2024, 1, 3), "Chest day").with_sets(vec![set(bench, 1, 205, 5)]),
        )
        .await
        .unwrap();
    bench
}

#[tokio::test]
async fn all_time_progress_matches_worked_example() {
    let app = AppServices::in_memory(Clock::fixed_on(date(2024, 1, 10)));
    let user = UserId::new(1);
    let bench = bench_history(&app, user).await;

    let result = app
        .progress()
        .get_exercise_progress(&ProgressQuery::new(bench, user).with_time_range("alltime"))
        .await
        .unwrap();

    assert_eq!(result.exercise_name, "Bench Press");
    let points: Vec<_> = result
        .points
        .iter()
        .map(|p| (p.date, p.weight, p.reps, p.volume))
        .collect();
    assert_eq!(
        points,
        vec![
            (date(2024, 1, 1), Some(Decimal::from(185)), Some(8), Decimal::from(1480)),
            (date(2024, 1, 3), Some(Decimal::from(205)), Some(5), Decimal::from(1025)),
        ]
    );

    let max_weight = result.stats.max_weight.unwrap();
    assert_eq!(
        (max_weight.weight, max_weight.reps, max_weight.date),
        (Decimal::from(205), Some(5), date(2024, 1, 3))
    );
    let max_reps = result.stats.max_reps.unwrap();
    assert_eq!(
        (max_reps.reps, max_reps.weight, max_reps.date),
        (10, Some(Decimal::from(135)), date(2024, 1, 1))
    );
    let max_volume = result.stats.max_volume.unwrap();
    assert_eq!(
        (max_volume.volume, max_volume.weight, max_volume.reps, max_volume.date),
        (Decimal::from(1480), Decimal::from(185), 8, date(2024, 1, 1))
    );
}

#[tokio::test]
async fn explicit_dates_narrow_series_and_records() {
    let app = AppServices::in_memory(Clock::fixed_on(date(2024, 1, 10)));
    let user = UserId::new(1);
    let bench = bench_history(&app, user).await;

    let result = app
        .progress()
        .get_exercise_progress(
            &ProgressQuery::new(bench, user)
                .with_dates(Some(date(2024, 1, 2)), Some(date(2024, 1, 3))),
        )
        .await
        .unwrap();

    assert_eq!(result.points.len(), 1);
    assert_eq!(result.stats.max_reps.unwrap().reps, 5);
    assert_eq!(result.stats.max_volume.unwrap().volume, Decimal::from(1025));
}

#[tokio::test]
async fn history_of_other_users_is_invisible() {
    let app = AppServices::in_memory(Clock::fixed_on(date(2024, 1, 10)));
    let bench = bench_history(&app, UserId::new(1)).await;

    let result = app
        .progress()
        .get_exercise_progress(&ProgressQuery::new(bench, UserId::new(2)))
        .await
        .unwrap();

    assert_eq!(result.exercise_name, "Bench Press");
    assert!(result.points.is_empty());
    assert!(result.stats.is_empty());
}

#[tokio::test]
async fn stale_history_falls_outside_default_window() {
    let app = AppServices::in_memory(Clock::fixed_on(date(2024, 6, 1)));
    let user = UserId::new(1);
    let bench = bench_history(&app, user).await;

    let result = app
        .progress()
        .get_exercise_progress(&ProgressQuery::new(bench, user).with_time_range("bogus"))
        .await
        .unwrap();
    assert!(result.points.is_empty());
    assert!(result.stats.max_weight.is_none());
}

#[tokio::test]
async fn unknown_exercise_is_not_found() {
    let app = AppServices::in_memory(Clock::fixed_on(date(2024, 1, 10)));
    let err = app
        .progress()
        .get_exercise_progress(&ProgressQuery::new(ExerciseId::new(404), UserId::new(1)))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ProgressError::ExerciseNotFound(id) if id == ExerciseId::new(404)));
}
