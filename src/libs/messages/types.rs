/// Every user-facing line the application prints.
///
/// Text lives in `display.rs`; call sites only pick a variant and pass
/// the values to interpolate.
#[derive(Debug, Clone)]
pub enum Message {
    // === STORAGE MESSAGES ===
    SchemaStepFailed(String, String), // step, error
    SeedFailed(String),
    ExercisesSeeded(usize),
    DatabaseOpened(String),
    QueryFailed(String),

    // === WORKOUT MESSAGES ===
    WorkoutStarted(i64, String), // id, date
    WorkoutResumed(i64, String), // id, date
    WorkoutDiscarded(i64),
    WorkoutKept(i64, usize), // id, set count
    WorkoutDeleted(i64),
    ConfirmDeleteWorkout(i64),
    EmptyWorkoutsCleaned(usize),
    WorkoutHistoryHeader,
    NoWorkoutsFound,
    WorkoutSetsHeader(i64, String), // id, date
    NoSetsLogged(i64),

    // === SET MESSAGES ===
    SetLogged(i64, f64, i64), // set id, weight, reps
    SetUpdated(i64),
    SetDeleted(i64),
    LastSet(String, f64, i64, String), // exercise, weight, reps, date
    NoPreviousSet(String),

    // === EXERCISE MESSAGES ===
    ExerciseAdded(String, i64),
    ExerciseNotFound(String),
    ExercisesHeader,
    NoExercisesFound,

    // === STATS MESSAGES ===
    PersonalBestsHeader,
    NoPersonalBests,
    ProgressHeader(String),
    NotEnoughProgressData,

    // === ROUTINE MESSAGES ===
    RoutineSaved(String, usize), // name, exercise count
    RoutineApplied(String, usize, i64), // name, placeholder count, workout
    RoutineDeleted(String),
    ConfirmDeleteRoutine(String),
    RoutinesHeader,
    RoutineHeader(String),
    NoRoutinesFound,

    // === BACKUP MESSAGES ===
    BackupExported(String),
    ExportFailed(String),
    BackupImported {
        exercises: usize,
        workouts: usize,
        sets: usize,
        routines: usize,
    },
    ImportFailed(String),
    ImportCancelled,
    PromptBackupPath,
    ConfirmImport,
    ConfirmClear,
    DataCleared,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
