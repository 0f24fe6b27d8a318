#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
    use ironvault::db::{
        db::Db,
        exercises::Exercises,
        sets::Sets,
        workouts::{Finish, Workouts},
    };
    use ironvault::libs::error::VaultError;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct WorkoutTestContext {
        _temp_dir: TempDir,
        db: Db,
        bench: i64,
    }

    impl TestContext for WorkoutTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("ironvault.db")).unwrap();
            let bench = Exercises::new(&db).find_by_name("Bench Press").unwrap().unwrap().id;
            WorkoutTestContext {
                _temp_dir: temp_dir,
                db,
                bench,
            }
        }
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_create_stores_iso_date(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 5).unwrap();

        let workout = workouts.create(Some("heavy day"), Some(at)).unwrap();
        let fetched = workouts.get(workout.id).unwrap().unwrap();
        assert_eq!(fetched.date, "2026-03-14T18:30:05.000Z");
        assert_eq!(fetched.note.as_deref(), Some("heavy day"));

        let blank = workouts.create(Some(""), Some(at)).unwrap();
        assert_eq!(workouts.get(blank.id).unwrap().unwrap().note, None);
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_create_on_past_day(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        let workout = workouts.create_on(day, None).unwrap();
        assert_eq!(workout.local_day(), Some(day));
        assert_eq!(workout.day_label(), "2025-12-31");
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_resume_or_start_today(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let now = Local::now();

        let (first, created) = workouts.resume_or_start(now).unwrap();
        assert!(created);

        let (again, created) = workouts.resume_or_start(now).unwrap();
        assert!(!created);
        assert_eq!(again.id, first.id);
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_resume_or_start_after_older_session(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let now = Local::now();
        let old = workouts.create(None, Some(now.with_timezone(&Utc) - Duration::days(2))).unwrap();

        let (workout, created) = workouts.resume_or_start(now).unwrap();
        assert!(created);
        assert_ne!(workout.id, old.id);
        assert_eq!(workouts.latest().unwrap().unwrap().id, workout.id);
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_latest_is_by_date_not_insertion(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let recent = workouts.create(None, Some(Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap())).unwrap();
        workouts.create_on(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(), None).unwrap();

        assert_eq!(workouts.latest().unwrap().unwrap().id, recent.id);
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_finish_discards_abandoned_workout(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let workout = workouts.create(None, None).unwrap();

        assert_eq!(workouts.finish(workout.id).unwrap(), Finish::Discarded);
        assert!(workouts.get(workout.id).unwrap().is_none());
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_finish_keeps_workout_with_note_or_sets(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);

        let noted = workouts.create(Some("rest day"), None).unwrap();
        assert_eq!(workouts.finish(noted.id).unwrap(), Finish::Kept { sets: 0 });

        let trained = workouts.create(None, None).unwrap();
        Sets::new(&ctx.db).add(trained.id, ctx.bench, 80.0, 5).unwrap();
        assert_eq!(workouts.finish(trained.id).unwrap(), Finish::Kept { sets: 1 });
        assert!(workouts.get(trained.id).unwrap().is_some());
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_emptied_workout_survives_until_cleanup(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let sets = Sets::new(&ctx.db);

        let workout = workouts.create(None, None).unwrap();
        let set = sets.add(workout.id, ctx.bench, 60.0, 10).unwrap();
        sets.delete(set).unwrap();

        // Removing the last set does not trigger housekeeping.
        assert!(workouts.get(workout.id).unwrap().is_some());

        assert_eq!(workouts.cleanup_empty().unwrap(), 1);
        assert!(workouts.get(workout.id).unwrap().is_none());
    }

    #[test_context(WorkoutTestContext)]
    #[test]
    fn test_delete_removes_sets(ctx: &mut WorkoutTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let sets = Sets::new(&ctx.db);

        let workout = workouts.create(None, None).unwrap();
        sets.add(workout.id, ctx.bench, 60.0, 10).unwrap();
        sets.add(workout.id, ctx.bench, 65.0, 8).unwrap();

        workouts.delete(workout.id).unwrap();
        assert!(workouts.get(workout.id).unwrap().is_none());
        assert_eq!(sets.count_for_workout(workout.id).unwrap(), 0);

        let err = workouts.delete(workout.id).unwrap_err();
        assert_eq!(err.downcast_ref::<VaultError>(), Some(&VaultError::not_found("workout", workout.id)));
    }
}
