mod cardio;
mod exercise;
mod ids;
mod progress;
mod set;
mod workout;

pub use ids::{
    CardioActivityId, CardioSessionId, ExerciseId, ParseIdError, SetId, UserId, WorkoutId,
};

pub use cardio::{
    CardioActivity, CardioEntry, CardioError, CardioSession, MAX_ACTIVITY_NAME_CHARS,
    normalize_activity_name,
};
pub use exercise::{Exercise, ExerciseError, MAX_EXERCISE_NAME_CHARS, normalize_exercise_name};
pub use progress::{
    DailyPoint, MaxRepsRecord, MaxVolumeRecord, MaxWeightRecord, ProgressResult, ProgressStats,
};
pub use set::{LoggedSet, volume_of};
pub use workout::{NewWorkout, SetEntry, Workout, WorkoutDetails, WorkoutError, WorkoutSet};
