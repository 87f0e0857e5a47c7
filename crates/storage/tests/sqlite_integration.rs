use chrono::{NaiveDate, NaiveTime};
use lift_core::model::{CardioEntry, ExerciseId, NewWorkout, SetEntry, UserId};
use rust_decimal::Decimal;
use storage::repository::{
    CardioCatalog, DateWindow, ExerciseCatalog, NewWorkoutRecord, SetRepository, StorageError,
    WorkoutRepository,
};
use storage::sqlite::SqliteRepository;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(exercise_id: ExerciseId, n: u32, weight: Option<Decimal>, reps: Option<u32>) -> SetEntry {
    SetEntry::new(exercise_id, n, weight, reps, None).unwrap()
}

fn new_workout(user: u64, day: NaiveDate) -> NewWorkout {
    NewWorkout::new(UserId::new(user), day, "Upper", Some("felt strong".into()), day).unwrap()
}

fn workout(user: u64, day: NaiveDate, sets: Vec<SetEntry>) -> NewWorkoutRecord {
    NewWorkoutRecord::new(new_workout(user, day), sets, Vec::new())
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrips_sets_with_exact_decimals() {
    let repo = connect("memdb_roundtrip").await;
    let bench = repo.insert_exercise("Bench Press").await.unwrap();
    let squat = repo.insert_exercise("Squat").await.unwrap();
    assert_eq!(repo.exercise_name(bench).await.unwrap(), "Bench Press");

    repo.insert_workout(workout(
        1,
        date(2024, 1, 3),
        vec![
            entry(bench, 2, Some(Decimal::new(2050, 1)), Some(5)),
            entry(bench, 1, Some(Decimal::new(1025, 1)), None),
            entry(squat, 1, Some(Decimal::from(225)), Some(5)),
        ],
    ))
    .await
    .unwrap();
    repo.insert_workout(workout(
        1,
        date(2024, 1, 1),
        vec![entry(bench, 1, None, Some(12))],
    ))
    .await
    .unwrap();
    repo.insert_workout(workout(
        2,
        date(2024, 1, 2),
        vec![entry(bench, 1, Some(Decimal::from(315)), Some(1))],
    ))
    .await
    .unwrap();

    let sets = repo
        .fetch_sets(bench, UserId::new(1), DateWindow::all())
        .await
        .unwrap();
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0].date, date(2024, 1, 1));
    assert_eq!(sets[0].weight, None);
    assert_eq!(sets[0].reps, Some(12));
    assert_eq!(sets[1].set_number, 1);
    assert_eq!(sets[1].weight, Some(Decimal::new(1025, 1)));
    assert_eq!(sets[1].reps, None);
    assert_eq!(sets[2].weight, Some(Decimal::new(205, 0)));

    let windowed = repo
        .fetch_sets(
            bench,
            UserId::new(1),
            DateWindow::between(date(2024, 1, 2), date(2024, 1, 3)),
        )
        .await
        .unwrap();
    assert_eq!(windowed.len(), 2);
    assert!(windowed.iter().all(|s| s.date == date(2024, 1, 3)));
}

#[tokio::test]
async fn sqlite_reports_missing_exercise_and_conflicts() {
    let repo = connect("memdb_errors").await;

    let err = repo
        .fetch_sets(ExerciseId::new(77), UserId::new(1), DateWindow::all())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
    assert!(matches!(
        repo.exercise_name(ExerciseId::new(77)).await.unwrap_err(),
        StorageError::NotFound
    ));

    let bench = repo.insert_exercise("Bench Press").await.unwrap();
    assert!(matches!(
        repo.insert_exercise("Bench Press").await.unwrap_err(),
        StorageError::Conflict
    ));

    let dup = workout(
        1,
        date(2024, 1, 1),
        vec![
            entry(bench, 1, Some(Decimal::from(100)), Some(5)),
            entry(bench, 1, Some(Decimal::from(110)), Some(5)),
        ],
    );
    assert!(matches!(
        repo.insert_workout(dup).await.unwrap_err(),
        StorageError::Conflict
    ));

    let unknown = workout(
        1,
        date(2024, 1, 1),
        vec![entry(ExerciseId::new(500), 1, None, Some(5))],
    );
    assert!(matches!(
        repo.insert_workout(unknown).await.unwrap_err(),
        StorageError::NotFound
    ));

    // Both failed inserts rolled back their workout rows.
    assert!(repo.list_workouts(UserId::new(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_history_lists_newest_first_and_delete_cascades() {
    let repo = connect("memdb_history").await;
    let row = repo.insert_exercise("Barbell Row").await.unwrap();
    let curl = repo.insert_exercise("Curl").await.unwrap();

    let names: Vec<_> = repo
        .list_exercises()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Barbell Row", "Curl"]);

    let first = repo
        .insert_workout(workout(
            1,
            date(2024, 3, 1),
            vec![
                entry(row, 1, Some(Decimal::from(135)), Some(8)),
                entry(curl, 1, Some(Decimal::from(30)), Some(12)),
            ],
        ))
        .await
        .unwrap();
    let second = repo
        .insert_workout(workout(1, date(2024, 3, 5), vec![]))
        .await
        .unwrap();

    let history = repo.list_workouts(UserId::new(1)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second);
    assert_eq!(history[0].set_count, 0);
    assert_eq!(history[1].id, first);
    assert_eq!(history[1].set_count, 2);

    assert!(matches!(
        repo.delete_workout(UserId::new(2), first).await.unwrap_err(),
        StorageError::NotFound
    ));
    repo.delete_workout(UserId::new(1), first).await.unwrap();

    let sets = repo
        .fetch_sets(row, UserId::new(1), DateWindow::all())
        .await
        .unwrap();
    assert!(sets.is_empty());
}

#[tokio::test]
async fn sqlite_details_carry_times_cardio_and_single_deletes() {
    let repo = connect("memdb_details").await;
    let bench = repo.insert_exercise("Bench Press").await.unwrap();
    let rowing = repo.insert_activity("Rowing").await.unwrap();
    let bike = repo.insert_activity("Bike").await.unwrap();
    assert!(matches!(
        repo.insert_activity(" Rowing").await.unwrap_err(),
        StorageError::Conflict
    ));
    let names: Vec<_> = repo
        .list_activities()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Bike", "Rowing"]);

    let enter = NaiveTime::from_hms_opt(6, 15, 0);
    let leave = NaiveTime::from_hms_opt(7, 30, 0);
    let id = repo
        .insert_workout(NewWorkoutRecord::new(
            new_workout(1, date(2024, 4, 2)).with_times(enter, leave),
            vec![
                entry(bench, 2, Some(Decimal::new(1875, 1)), Some(3)),
                entry(bench, 1, Some(Decimal::from(175)), Some(5)),
            ],
            vec![
                CardioEntry::new(rowing, Some(10), Some(Decimal::new(2, 0)), None).unwrap(),
                CardioEntry::new(bike, None, Some(Decimal::new(1250, 2)), Some("hills".into()))
                    .unwrap(),
            ],
        ))
        .await
        .unwrap();

    let summary = &repo.list_workouts(UserId::new(1)).await.unwrap()[0];
    assert_eq!((summary.set_count, summary.cardio_count), (2, 2));

    let details = repo.workout_details(UserId::new(1), id).await.unwrap();
    assert_eq!(details.workout.title(), "Upper");
    assert_eq!(details.workout.time_enter(), enter);
    assert_eq!(details.workout.time_leave(), leave);
    let sets: Vec<_> = details
        .sets
        .iter()
        .map(|s| (s.exercise_name.as_str(), s.set_number, s.weight))
        .collect();
    assert_eq!(
        sets,
        vec![
            ("Bench Press", 2, Some(Decimal::new(1875, 1))),
            ("Bench Press", 1, Some(Decimal::from(175))),
        ]
    );
    assert_eq!(details.cardio[0].activity_name, "Rowing");
    assert_eq!(details.cardio[1].duration_minutes, None);
    assert_eq!(details.cardio[1].distance, Some(Decimal::new(125, 1)));
    assert_eq!(details.cardio[1].notes.as_deref(), Some("hills"));

    assert!(matches!(
        repo.workout_details(UserId::new(2), id).await.unwrap_err(),
        StorageError::NotFound
    ));

    let heavy = details.sets[0].id;
    assert!(matches!(
        repo.delete_set(UserId::new(2), heavy).await.unwrap_err(),
        StorageError::NotFound
    ));
    repo.delete_set(UserId::new(1), heavy).await.unwrap();
    repo.delete_cardio_session(UserId::new(1), details.cardio[0].id)
        .await
        .unwrap();
    assert!(matches!(
        repo.delete_cardio_session(UserId::new(1), details.cardio[0].id)
            .await
            .unwrap_err(),
        StorageError::NotFound
    ));

    let details = repo.workout_details(UserId::new(1), id).await.unwrap();
    assert_eq!(details.sets.len(), 1);
    assert_eq!(details.sets[0].set_number, 1);
    assert_eq!(details.cardio.len(), 1);
    assert_eq!(details.cardio[0].activity_name, "Bike");
}
