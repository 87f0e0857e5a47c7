#![forbid(unsafe_code)]

pub mod app_services;
pub mod cardio_service;
pub mod error;
pub mod exercise_service;
pub mod progress_service;
pub mod workout_service;

pub use lift_core::Clock;

pub use app_services::AppServices;
pub use cardio_service::CardioService;
pub use error::{
    AppServicesError, CardioServiceError, ExerciseServiceError, ProgressError, WorkoutServiceError,
};
pub use exercise_service::ExerciseService;
pub use progress_service::{ProgressQuery, ProgressService};
pub use workout_service::{WorkoutDraft, WorkoutService};
