#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use ironvault::db::{db::Db, exercises::Exercises, routines::Routines, sets::Sets, stats::Stats, workouts::Workouts};
    use ironvault::libs::backup::Backup;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct HousekeepingTestContext {
        _temp_dir: TempDir,
        db: Db,
        plank: i64,
    }

    impl TestContext for HousekeepingTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("ironvault.db")).unwrap();
            let plank = Exercises::new(&db).find_by_name("Plank").unwrap().unwrap().id;
            HousekeepingTestContext {
                _temp_dir: temp_dir,
                db,
                plank,
            }
        }
    }

    #[test_context(HousekeepingTestContext)]
    #[test]
    fn test_cleanup_removes_only_abandoned_workouts(ctx: &mut HousekeepingTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let sets = Sets::new(&ctx.db);
        let long_ago = Utc::now() - Duration::days(400);

        let abandoned = workouts.create(None, None).unwrap();
        let blank_note = workouts.create(Some(""), None).unwrap();
        let rest_day = workouts.create(Some("rest day"), Some(long_ago)).unwrap();
        let trained = workouts.create(None, Some(long_ago)).unwrap();
        sets.add(trained.id, ctx.plank, 0.0, 60).unwrap();

        assert_eq!(workouts.cleanup_empty().unwrap(), 2);
        assert!(workouts.get(abandoned.id).unwrap().is_none());
        assert!(workouts.get(blank_note.id).unwrap().is_none());
        assert!(workouts.get(rest_day.id).unwrap().is_some());
        assert!(workouts.get(trained.id).unwrap().is_some());

        // Idempotent
        assert_eq!(workouts.cleanup_empty().unwrap(), 0);
        assert!(workouts.get(rest_day.id).unwrap().is_some());
    }

    #[test_context(HousekeepingTestContext)]
    #[test]
    fn test_placeholder_sets_protect_a_workout(ctx: &mut HousekeepingTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let routines = Routines::new(&ctx.db);

        let source = workouts.create(None, None).unwrap();
        Sets::new(&ctx.db).add(source.id, ctx.plank, 0.0, 45).unwrap();
        let core = routines.create_from_workout(source.id, "Core").unwrap();

        let planned = workouts.create(None, None).unwrap();
        routines.apply_to_workout(core.id, planned.id).unwrap();

        assert_eq!(workouts.cleanup_empty().unwrap(), 0);
        assert!(workouts.get(planned.id).unwrap().is_some());
    }

    #[test_context(HousekeepingTestContext)]
    #[test]
    fn test_orphaned_sets_do_not_disable_cleanup(ctx: &mut HousekeepingTestContext) {
        let workouts = Workouts::new(&ctx.db);
        ctx.db
            .conn()
            .execute(
                "INSERT INTO sets (workout_id, exercise_id, weight_kg, reps) VALUES (NULL, ?1, 10, 1)",
                [ctx.plank],
            )
            .unwrap();

        let abandoned = workouts.create(None, None).unwrap();
        assert_eq!(workouts.cleanup_empty().unwrap(), 1);
        assert!(workouts.get(abandoned.id).unwrap().is_none());
    }

    #[test_context(HousekeepingTestContext)]
    #[test]
    fn test_orphaned_sets_skipped_by_history_and_backup(ctx: &mut HousekeepingTestContext) {
        let workouts = Workouts::new(&ctx.db);
        let trained = workouts.create(Some("core"), None).unwrap();
        let kept = Sets::new(&ctx.db).add(trained.id, ctx.plank, 10.0, 60).unwrap();
        ctx.db
            .conn()
            .execute(
                "INSERT INTO sets (workout_id, exercise_id, weight_kg, reps) VALUES (NULL, ?1, 10, 1)",
                [ctx.plank],
            )
            .unwrap();

        let summaries = Stats::new(&ctx.db).workout_summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].workout.id, trained.id);
        assert_eq!(summaries[0].total_volume, Some(600.0));
        assert_eq!(summaries[0].exercise_names, vec!["Plank"]);

        let document = Backup::new(&ctx.db).snapshot().unwrap();
        assert_eq!(document.sets.len(), 1);
        assert_eq!(document.sets[0].id, kept);

        // The skipped row does not block a restore of the snapshot.
        let json = serde_json::to_string(&document).unwrap();
        let summary = Backup::new(&ctx.db).import_str(&json).unwrap();
        assert_eq!(summary.sets, 1);
    }
}
