use std::fmt;
use std::io::Read as _;

use chrono::NaiveDate;
use lift_core::model::{CardioSessionId, ExerciseId, SetId, UserId, WorkoutId};
use services::{AppServices, Clock, ProgressQuery, WorkoutDraft};

mod seed;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { command: &'static str, flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidId { flag: &'static str, raw: String },
    InvalidCount { raw: String },
    InvalidDate { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { command, flag } => write!(f, "{command} requires {flag}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --workouts value: {raw}"),
            ArgsError::InvalidDate { flag, raw } => {
                write!(f, "invalid {flag} value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_id<T: std::str::FromStr>(flag: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidId { flag, raw })
}

fn require<T>(value: Option<T>, command: &'static str, flag: &'static str) -> Result<T, ArgsError> {
    value.ok_or(ArgsError::MissingFlag { command, flag })
}

fn parse_date(flag: &'static str, raw: String) -> Result<NaiveDate, ArgsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ArgsError::InvalidDate { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- progress --exercise-id <id> [--start YYYY-MM-DD] [--end YYYY-MM-DD] [--range <token>]");
    eprintln!("  cargo run -p app -- exercises | cardio");
    eprintln!("  cargo run -p app -- add-exercise --name <name>");
    eprintln!("  cargo run -p app -- add-cardio --name <name>");
    eprintln!("  cargo run -p app -- history");
    eprintln!("  cargo run -p app -- show --workout-id <id>");
    eprintln!("  cargo run -p app -- log --file <path|->");
    eprintln!("  cargo run -p app -- delete --workout-id <id>");
    eprintln!("  cargo run -p app -- delete-set --set-id <id>");
    eprintln!("  cargo run -p app -- delete-cardio --session-id <id>");
    eprintln!("  cargo run -p app -- seed [--workouts <n>]");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://dev.sqlite3)");
    eprintln!("  --user-id <id>            Whose workouts to read or change (default: 1)");
    eprintln!("  --today <YYYY-MM-DD>      Fixed current date instead of the UTC clock");
    eprintln!();
    eprintln!("Range tokens: 1month, 3months, 6months, 9months, 1year, alltime (others mean 3months)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LIFT_DB_URL, LIFT_USER_ID, LIFT_WORKOUTS, LIFT_LOG (falls back to RUST_LOG)");
    eprintln!();
    eprintln!("A logged workout is JSON: {{\"date\", \"title\", \"notes\", \"time_enter\",");
    eprintln!("  \"time_leave\", \"sets\": [..], \"cardio\": [..]}}");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Progress,
    Exercises,
    AddExercise,
    Cardio,
    AddCardio,
    History,
    Show,
    Log,
    Delete,
    DeleteSet,
    DeleteCardio,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "progress" => Some(Self::Progress),
            "exercises" => Some(Self::Exercises),
            "add-exercise" => Some(Self::AddExercise),
            "cardio" => Some(Self::Cardio),
            "add-cardio" => Some(Self::AddCardio),
            "history" => Some(Self::History),
            "show" => Some(Self::Show),
            "log" => Some(Self::Log),
            "delete" => Some(Self::Delete),
            "delete-set" => Some(Self::DeleteSet),
            "delete-cardio" => Some(Self::DeleteCardio),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    user_id: UserId,
    exercise_id: Option<ExerciseId>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    range: Option<String>,
    today: Option<NaiveDate>,
    workout_id: Option<WorkoutId>,
    set_id: Option<SetId>,
    session_id: Option<CardioSessionId>,
    name: Option<String>,
    file: Option<String>,
    workouts: u32,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LIFT_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("dev.sqlite3".into()), normalize_sqlite_url);
        let mut user_id = std::env::var("LIFT_USER_ID")
            .ok()
            .and_then(|value| value.parse::<UserId>().ok())
            .unwrap_or_else(|| UserId::new(1));
        let mut workouts = std::env::var("LIFT_WORKOUTS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(12);
        let mut exercise_id = None;
        let mut start = None;
        let mut end = None;
        let mut range = None;
        let mut today = None;
        let mut workout_id = None;
        let mut set_id = None;
        let mut session_id = None;
        let mut name = None;
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user-id" => user_id = parse_id("--user-id", require_value(args, "--user-id")?)?,
                "--exercise-id" => {
                    let value = require_value(args, "--exercise-id")?;
                    exercise_id = Some(parse_id("--exercise-id", value)?);
                }
                "--workout-id" => {
                    let value = require_value(args, "--workout-id")?;
                    workout_id = Some(parse_id("--workout-id", value)?);
                }
                "--set-id" => set_id = Some(parse_id("--set-id", require_value(args, "--set-id")?)?),
                "--session-id" => {
                    let value = require_value(args, "--session-id")?;
                    session_id = Some(parse_id("--session-id", value)?);
                }
                "--start" => start = Some(parse_date("--start", require_value(args, "--start")?)?),
                "--end" => end = Some(parse_date("--end", require_value(args, "--end")?)?),
                "--range" => range = Some(require_value(args, "--range")?),
                "--today" => today = Some(parse_date("--today", require_value(args, "--today")?)?),
                "--name" => name = Some(require_value(args, "--name")?),
                "--file" => file = Some(require_value(args, "--file")?),
                "--workouts" => {
                    let value = require_value(args, "--workouts")?;
                    workouts = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            exercise_id,
            start,
            end,
            range,
            today,
            workout_id,
            set_id,
            session_id,
            name,
            file,
            workouts,
        })
    }

    fn clock(&self) -> Clock {
        self.today.map_or_else(Clock::default_clock, Clock::fixed_on)
    }

    fn progress_query(&self) -> Result<ProgressQuery, ArgsError> {
        let exercise_id = require(self.exercise_id, "progress", "--exercise-id")?;
        let mut query =
            ProgressQuery::new(exercise_id, self.user_id).with_dates(self.start, self.end);
        if let Some(token) = &self.range {
            query = query.with_time_range(token.as_str());
        }
        Ok(query)
    }
}

/// Reads a workout draft as JSON from a file, or from stdin for `-`.
fn load_draft(source: &str) -> Result<WorkoutDraft, Box<dyn std::error::Error>> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("LIFT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!(%filter, "log filter");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            let err = ArgsError::UnknownCommand(first.clone());
            eprintln!("{err}");
            print_usage();
            err
        })?,
    };

    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // Open + migrate SQLite at startup; services stay storage-agnostic.
    prepare_sqlite_file(&parsed.db_url)?;
    let clock = parsed.clock();
    let app = AppServices::new_sqlite(&parsed.db_url, clock).await?;
    let user_id = parsed.user_id;

    let rendered = match cmd {
        Command::Progress => {
            let query = parsed.progress_query()?;
            let result = app.progress().get_exercise_progress(&query).await?;
            serde_json::to_string_pretty(&result)?
        }
        Command::Exercises => {
            let exercises = app.exercises().list_exercises().await?;
            serde_json::to_string_pretty(&exercises)?
        }
        Command::AddExercise => {
            let name = require(parsed.name.as_deref(), "add-exercise", "--name")?;
            let exercise = app.exercises().create_exercise(name).await?;
            serde_json::to_string_pretty(&exercise)?
        }
        Command::Cardio => {
            let activities = app.cardio().list_activities().await?;
            serde_json::to_string_pretty(&activities)?
        }
        Command::AddCardio => {
            let name = require(parsed.name.as_deref(), "add-cardio", "--name")?;
            let activity = app.cardio().create_activity(name).await?;
            serde_json::to_string_pretty(&activity)?
        }
        Command::History => {
            let history = app.workouts().history(user_id).await?;
            serde_json::to_string_pretty(&history)?
        }
        Command::Show => {
            let workout_id = require(parsed.workout_id, "show", "--workout-id")?;
            let details = app.workouts().workout_details(user_id, workout_id).await?;
            serde_json::to_string_pretty(&details)?
        }
        Command::Log => {
            let source = require(parsed.file.as_deref(), "log", "--file")?;
            let draft = load_draft(source)?;
            let workout_id = app.workouts().log_workout(user_id, draft).await?;
            serde_json::json!({ "workout_id": workout_id }).to_string()
        }
        Command::Delete => {
            let workout_id = require(parsed.workout_id, "delete", "--workout-id")?;
            app.workouts().delete_workout(user_id, workout_id).await?;
            serde_json::json!({ "deleted_workout": workout_id }).to_string()
        }
        Command::DeleteSet => {
            let set_id = require(parsed.set_id, "delete-set", "--set-id")?;
            app.workouts().delete_set(user_id, set_id).await?;
            serde_json::json!({ "deleted_set": set_id }).to_string()
        }
        Command::DeleteCardio => {
            let session_id = require(parsed.session_id, "delete-cardio", "--session-id")?;
            app.workouts().delete_cardio_session(user_id, session_id).await?;
            serde_json::json!({ "deleted_cardio_session": session_id }).to_string()
        }
        Command::Seed => {
            let ids = seed::seed(&app, user_id, parsed.workouts, clock.today()).await?;
            serde_json::json!({ "seeded_workouts": ids }).to_string()
        }
    };
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn progress_flags_build_query() {
        let args = parse(&[
            "--exercise-id",
            "7",
            "--user-id",
            "3",
            "--start",
            "2024-01-01",
            "--end",
            "2024-02-01",
            "--range",
            "6months",
        ])
        .unwrap();
        let query = args.progress_query().unwrap();
        assert_eq!(query.exercise_id, ExerciseId::new(7));
        assert_eq!(query.user_id, UserId::new(3));
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(query.time_range.as_deref(), Some("6months"));
    }

    #[test]
    fn progress_without_exercise_is_rejected() {
        let args = parse(&["--user-id", "1"]).unwrap();
        assert!(matches!(
            args.progress_query(),
            Err(ArgsError::MissingFlag { command: "progress", flag: "--exercise-id" })
        ));
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            parse(&["--start", "01/02/2024"]),
            Err(ArgsError::InvalidDate { flag: "--start", .. })
        ));
        assert!(matches!(
            parse(&["--exercise-id"]),
            Err(ArgsError::MissingValue { flag: "--exercise-id" })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(
            parse(&["--set-id", "x1"]),
            Err(ArgsError::InvalidId { flag: "--set-id", .. })
        ));
        assert!(matches!(
            parse(&["--workouts", "-3"]),
            Err(ArgsError::InvalidCount { .. })
        ));
    }

    #[test]
    fn every_subcommand_is_recognised() {
        for (arg, cmd) in [
            ("log", Command::Log),
            ("show", Command::Show),
            ("delete", Command::Delete),
            ("delete-set", Command::DeleteSet),
            ("delete-cardio", Command::DeleteCardio),
            ("cardio", Command::Cardio),
            ("add-cardio", Command::AddCardio),
            ("add-exercise", Command::AddExercise),
            ("seed", Command::Seed),
        ] {
            assert_eq!(Command::from_arg(arg), Some(cmd));
        }
        assert_eq!(Command::from_arg("Log"), None);
    }

    #[test]
    fn workout_flags_and_fixed_today() {
        let args = parse(&[
            "--workout-id",
            "4",
            "--set-id",
            "11",
            "--session-id",
            "2",
            "--workouts",
            "5",
            "--today",
            "2024-06-15",
        ])
        .unwrap();
        assert_eq!(args.workout_id, Some(WorkoutId::new(4)));
        assert_eq!(args.set_id, Some(SetId::new(11)));
        assert_eq!(args.session_id, Some(CardioSessionId::new(2)));
        assert_eq!(args.workouts, 5);
        assert_eq!(args.clock().today(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert!(matches!(
            require(parse(&[]).unwrap().file, "log", "--file"),
            Err(ArgsError::MissingFlag { command: "log", flag: "--file" })
        ));
    }

    #[tokio::test]
    async fn logged_draft_file_reaches_the_workout_service() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let app = AppServices::in_memory(Clock::fixed_on(today));
        let bench = app.exercises().create_exercise("Bench Press").await.unwrap();
        let rowing = app.cardio().create_activity("Rowing").await.unwrap();

        let path = std::env::temp_dir().join(format!("lift-draft-{}.json", std::process::id()));
        let json = serde_json::json!({
            "date": "2024-06-14",
            "title": "Push",
            "time_enter": "18:00:00",
            "time_leave": "19:05:00",
            "sets": [
                {"exercise_id": bench.id(), "set_number": 1, "weight": "100.5", "reps": 5, "notes": null}
            ],
            "cardio": [
                {"activity_id": rowing.id(), "duration_minutes": 10, "distance": "2.5", "notes": null}
            ]
        });
        std::fs::write(&path, json.to_string()).unwrap();
        let draft = load_draft(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        let user = UserId::new(1);
        let id = app.workouts().log_workout(user, draft).await.unwrap();
        let details = app.workouts().workout_details(user, id).await.unwrap();
        assert_eq!(details.sets[0].exercise_name, "Bench Press");
        assert_eq!(details.cardio[0].activity_name, "Rowing");

        app.workouts().delete_set(user, details.sets[0].id).await.unwrap();
        app.workouts().delete_workout(user, id).await.unwrap();
        assert!(app.workouts().history(user).await.unwrap().is_empty());
    }

    #[test]
    fn malformed_draft_is_an_error() {
        let path = std::env::temp_dir().join(format!("lift-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"title": "no date"}"#).unwrap();
        assert!(load_draft(path.to_str().unwrap()).is_err());
        std::fs::remove_file(&path).unwrap();
        assert!(load_draft("/nonexistent/lift/draft.json").is_err());
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/lift.db".into()),
            "sqlite:///tmp/lift.db"
        );
        assert!(normalize_sqlite_url("lift.db".into()).starts_with("sqlite:///"));
    }
}
