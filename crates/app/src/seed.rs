use chrono::{Days, NaiveDate, NaiveTime};
use lift_core::model::{CardioActivityId, CardioEntry, ExerciseId, SetEntry, UserId, WorkoutId};
use rust_decimal::Decimal;
use services::{AppServices, CardioServiceError, ExerciseServiceError, WorkoutDraft, WorkoutServiceError};

pub(crate) const EXERCISES: [&str; 4] = ["Bench Press", "Squat", "Deadlift", "Pull Up"];
pub(crate) const ACTIVITIES: [&str; 2] = ["Rowing", "Treadmill"];

#[derive(Debug, thiserror::Error)]
pub(crate) enum SeedError {
    #[error(transparent)]
    Exercise(#[from] ExerciseServiceError),
    #[error(transparent)]
    Cardio(#[from] CardioServiceError),
    #[error(transparent)]
    Workout(#[from] WorkoutServiceError),
    #[error(transparent)]
    Invalid(#[from] lift_core::Error),
}

async fn ensure_exercise(app: &AppServices, name: &str) -> Result<ExerciseId, SeedError> {
    let exercises = app.exercises();
    if let Some(id) = exercises.find_by_name(name).await? {
        return Ok(id);
    }
    Ok(exercises.create_exercise(name).await?.id())
}

async fn ensure_activity(app: &AppServices, name: &str) -> Result<CardioActivityId, SeedError> {
    let cardio = app.cardio();
    if let Some(found) = cardio.find_by_name(name).await? {
        return Ok(found.id());
    }
    Ok(cardio.create_activity(name).await?.id())
}

fn sample_draft(
    exercises: &[ExerciseId],
    activities: &[CardioActivityId],
    session: u32,
    date: NaiveDate,
) -> Result<WorkoutDraft, lift_core::Error> {
    let bump = Decimal::from(session) * Decimal::new(25, 1);
    let mut sets = Vec::new();
    for (idx, (&exercise_id, base)) in exercises.iter().zip([135_i64, 185, 225, 0]).enumerate() {
        for n in 1..=3_u32 {
            // Bodyweight movements carry no weight.
            let weight = (base > 0)
                .then(|| Decimal::from(base) + bump + Decimal::from(i64::from(n) * 10));
            let reps = 10_u32
                .saturating_sub(n)
                .saturating_sub(u32::try_from(idx).unwrap_or(0))
                .max(1);
            sets.push(SetEntry::new(exercise_id, n, weight, Some(reps), None)?);
        }
    }

    // Cardio on every other session, alternating activities.
    let activity = activities
        .get((session / 2) as usize % activities.len().max(1))
        .copied();
    let cardio = match activity {
        Some(activity) if session % 2 == 0 => {
            let distance = Decimal::new(200 + i64::from(session) * 5, 2);
            vec![CardioEntry::new(activity, Some(15), Some(distance), None)?]
        }
        _ => Vec::new(),
    };

    Ok(WorkoutDraft::new(date, format!("Full body #{}", session + 1))
        .with_times(NaiveTime::from_hms_opt(18, 0, 0), NaiveTime::from_hms_opt(19, 15, 0))
        .with_sets(sets)
        .with_cardio(cardio))
}

/// Fills the catalogs and appends `count` workouts for `user_id`, every third
/// day, oldest first, ending at `today`.
pub(crate) async fn seed(
    app: &AppServices,
    user_id: UserId,
    count: u32,
    today: NaiveDate,
) -> Result<Vec<WorkoutId>, SeedError> {
    let mut exercises = Vec::with_capacity(EXERCISES.len());
    for name in EXERCISES {
        exercises.push(ensure_exercise(app, name).await?);
    }
    let mut activities = Vec::with_capacity(ACTIVITIES.len());
    for name in ACTIVITIES {
        activities.push(ensure_activity(app, name).await?);
    }

    let workouts = app.workouts();
    let mut logged = Vec::with_capacity(count as usize);
    for i in 0..count {
        let days_ago = u64::from(count - 1 - i) * 3;
        let date = today
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(NaiveDate::MIN);
        let draft = sample_draft(&exercises, &activities, i, date)?;
        let id = workouts.log_workout(user_id, draft).await?;
        tracing::debug!(workout_id = %id, %date, "seeded workout");
        logged.push(id);
    }

    tracing::info!(
        exercises = exercises.len(),
        activities = activities.len(),
        workouts = logged.len(),
        %user_id,
        "seed complete"
    );
    Ok(logged)
}
