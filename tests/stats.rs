#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ironvault::db::{db::Db, exercises::Exercises, sets::Sets, stats::Stats, workouts::Workouts};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StatsTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("ironvault.db")).unwrap();
            StatsTestContext { _temp_dir: temp_dir, db }
        }
    }

    impl StatsTestContext {
        fn exercise(&self, name: &str) -> i64 {
            Exercises::new(&self.db).find_by_name(name).unwrap().unwrap().id
        }

        fn workout_on(&self, day: u32) -> i64 {
            let at = Utc.with_ymd_and_hms(2026, 4, day, 17, 0, 0).unwrap();
            Workouts::new(&self.db).create(None, Some(at)).unwrap().id
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_volume_is_sum_of_weight_times_reps(ctx: &mut StatsTestContext) {
        let bench = ctx.exercise("Bench Press");
        let row = ctx.exercise("Bent Over Row");
        let sets = Sets::new(&ctx.db);

        let trained = ctx.workout_on(1);
        sets.add(trained, bench, 60.0, 8).unwrap();
        sets.add(trained, row, 62.5, 6).unwrap();
        sets.add(trained, bench, 70.0, 5).unwrap();
        let empty = ctx.workout_on(2);

        let summaries = Stats::new(&ctx.db).workout_summaries().unwrap();
        assert_eq!(summaries.len(), 2);

        // Most recent first
        assert_eq!(summaries[0].workout.id, empty);
        assert_eq!(summaries[0].total_volume, None);
        assert!(summaries[0].exercise_names.is_empty());

        let summary = &summaries[1];
        assert_eq!(summary.workout.id, trained);
        assert_eq!(summary.total_volume, Some(60.0 * 8.0 + 62.5 * 6.0 + 70.0 * 5.0));
        assert_eq!(summary.exercise_names, vec!["Bench Press", "Bent Over Row"]);
        assert_eq!(summary.body_parts, vec!["Chest", "Back"]);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_uncategorized_exercises_add_no_body_part(ctx: &mut StatsTestContext) {
        let carry = Exercises::new(&ctx.db).add("Farmer Carry", None).unwrap();
        let workout = ctx.workout_on(3);
        Sets::new(&ctx.db).add(workout, carry, 40.0, 1).unwrap();

        let summaries = Stats::new(&ctx.db).workout_summaries().unwrap();
        assert_eq!(summaries[0].exercise_names, vec!["Farmer Carry"]);
        assert!(summaries[0].body_parts.is_empty());
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_personal_best_takes_reps_at_max_weight(ctx: &mut StatsTestContext) {
        let bench = ctx.exercise("Bench Press");
        let squat = ctx.exercise("Squat");
        let sets = Sets::new(&ctx.db);

        let monday = ctx.workout_on(6);
        sets.add(monday, bench, 100.0, 3).unwrap();
        sets.add(monday, bench, 90.0, 10).unwrap();
        let thursday = ctx.workout_on(9);
        sets.add(thursday, bench, 100.0, 5).unwrap();
        sets.add(thursday, bench, 80.0, 12).unwrap();
        sets.add(thursday, squat, 140.0, 2).unwrap();

        let bests = Stats::new(&ctx.db).personal_bests().unwrap();
        assert_eq!(bests.len(), 2);

        assert_eq!(bests[0].exercise_name, "Bench Press");
        assert_eq!(bests[0].max_weight, 100.0);
        assert_eq!(bests[0].best_reps, 5);

        assert_eq!(bests[1].exercise_name, "Squat");
        assert_eq!(bests[1].exercise_id, squat);
        assert_eq!(bests[1].max_weight, 140.0);
        assert_eq!(bests[1].best_reps, 2);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_progress_has_one_point_per_date(ctx: &mut StatsTestContext) {
        let deadlift = ctx.exercise("Deadlift");
        let sets = Sets::new(&ctx.db);

        let later = ctx.workout_on(20);
        sets.add(later, deadlift, 100.0, 5).unwrap();
        let earlier = ctx.workout_on(13);
        sets.add(earlier, deadlift, 80.0, 5).unwrap();
        sets.add(earlier, deadlift, 80.0, 8).unwrap();
        sets.add(earlier, deadlift, 70.0, 10).unwrap();

        let points = Stats::new(&ctx.db).exercise_progress(deadlift).unwrap();
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].date, "2026-04-13T17:00:00.000Z");
        assert_eq!(points[0].max_weight, 80.0);
        assert_eq!(points[0].reps, 8);
        assert_eq!(points[0].one_rep_max, 101.0);

        assert_eq!(points[1].max_weight, 100.0);
        assert_eq!(points[1].one_rep_max, 117.0);

        assert!(Stats::new(&ctx.db).exercise_progress(ctx.exercise("Plank")).unwrap().is_empty());
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_last_set_follows_workout_date(ctx: &mut StatsTestContext) {
        let press = ctx.exercise("Overhead Press");
        let sets = Sets::new(&ctx.db);
        let stats = Stats::new(&ctx.db);

        assert!(stats.last_set_for_exercise(press).unwrap().is_none());

        let recent = ctx.workout_on(25);
        sets.add(recent, press, 50.0, 6).unwrap();
        let last_in_recent = sets.add(recent, press, 52.5, 4).unwrap();
        // Logged afterwards, but for an older session.
        let backfilled = ctx.workout_on(2);
        sets.add(backfilled, press, 45.0, 8).unwrap();

        let last = stats.last_set_for_exercise(press).unwrap().unwrap();
        assert_eq!(last.set.id, last_in_recent);
        assert_eq!(last.set.weight_kg, 52.5);
        assert_eq!(last.date, "2026-04-25T17:00:00.000Z");
    }
}
