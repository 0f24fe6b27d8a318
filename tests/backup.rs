#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use ironvault::db::{db::Db, exercises::Exercises, routines::Routines, sets::Sets, workouts::Workouts};
    use ironvault::libs::backup::{Backup, BackupDocument, BackupPicker, FilePicker, FileShare, ShareTarget};
    use ironvault::libs::body_part::BodyPart;
    use ironvault::libs::error::VaultError;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct BackupTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for BackupTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("ironvault.db")).unwrap();
            BackupTestContext { temp_dir, db }
        }
    }

    impl BackupTestContext {
        fn backup_path(&self) -> PathBuf {
            self.temp_dir.path().join("exports").join("ironvault_backup.json")
        }

        /// Two workouts with sets, a custom exercise and a routine.
        fn populate(&self) {
            let exercises = Exercises::new(&self.db);
            let squat = exercises.find_by_name("Squat").unwrap().unwrap().id;
            let thrust = exercises.add("Hip Thrust", Some(BodyPart::Legs)).unwrap();

            let workouts = Workouts::new(&self.db);
            let legs = workouts
                .create(Some("felt strong"), Some(Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()))
                .unwrap();
            let sets = Sets::new(&self.db);
            sets.add(legs.id, squat, 120.0, 5).unwrap();
            sets.add(legs.id, thrust, 62.5, 10).unwrap();

            let next = workouts.create(None, Some(Utc.with_ymd_and_hms(2026, 6, 4, 8, 0, 0).unwrap())).unwrap();
            sets.add(next.id, squat, 125.0, 3).unwrap();

            Routines::new(&self.db).create_from_workout(legs.id, "Legs").unwrap();
        }

        /// Current contents, without the export timestamp.
        fn contents(&self) -> BackupDocument {
            let mut document = Backup::new(&self.db).snapshot().unwrap();
            document.exported_at.clear();
            document
        }
    }

    struct CancelledPicker;

    impl BackupPicker for CancelledPicker {
        fn pick(&self) -> Result<Option<String>> {
            Ok(None)
        }
    }

    struct FailingShare;

    impl ShareTarget for FailingShare {
        fn share(&self, _path: &Path, _contents: &str) -> Result<()> {
            Err(anyhow::anyhow!("share sheet unavailable"))
        }
    }

    fn vault_error(err: &anyhow::Error) -> Option<&VaultError> {
        err.downcast_ref::<VaultError>()
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_export_then_import_restores_everything(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();
        let backup = Backup::new(&ctx.db);

        backup.export(&FileShare, &ctx.backup_path()).unwrap();
        assert!(ctx.backup_path().exists());

        // Diverge from the backup.
        Exercises::new(&ctx.db).add("Sled Push", None).unwrap();
        Workouts::new(&ctx.db).create(Some("extra"), None).unwrap();
        let first_set = before.sets[0].id;
        Sets::new(&ctx.db).delete(first_set).unwrap();

        let summary = backup.import(&FilePicker::new(ctx.backup_path())).unwrap().unwrap();
        assert_eq!(summary.exercises, 30);
        assert_eq!(summary.workouts, 2);
        assert_eq!(summary.sets, 3);
        assert_eq!(summary.routines, 1);

        assert_eq!(ctx.contents(), before);
        assert!(Exercises::new(&ctx.db).find_by_name("Sled Push").unwrap().is_none());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_export_document_shape(ctx: &mut BackupTestContext) {
        ctx.populate();
        Backup::new(&ctx.db).export(&FileShare, &ctx.backup_path()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(ctx.backup_path()).unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert!(json["exportedAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(json["exercises"].as_array().unwrap().len(), 30);
        assert_eq!(json["workouts"][0]["note"], "felt strong");
        assert_eq!(json["sets"][1]["weight_kg"], 62.5);
        assert_eq!(json["routines"][0]["name"], "Legs");
        assert_eq!(json["routineExercises"].as_array().unwrap().len(), 2);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_export_reports_share_failure(ctx: &mut BackupTestContext) {
        ctx.populate();

        let err = Backup::new(&ctx.db).export(&FailingShare, &ctx.backup_path()).unwrap_err();
        assert_eq!(err.to_string(), "share sheet unavailable");
        assert!(!ctx.backup_path().exists());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_export_reports_unwritable_path(ctx: &mut BackupTestContext) {
        ctx.populate();
        let blocker = ctx.temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let target = blocker.join("ironvault_backup.json");
        assert!(Backup::new(&ctx.db).export(&FileShare, &target).is_err());
        assert!(!target.exists());
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_missing_section_changes_nothing(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();

        let err = Backup::new(&ctx.db)
            .import_str(r#"{"version":1,"exportedAt":"2026-06-05T00:00:00.000Z","exercises":[],"sets":[]}"#)
            .unwrap_err();
        assert_eq!(vault_error(&err), Some(&VaultError::MissingSection("workouts")));
        assert_eq!(ctx.contents(), before);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_dangling_reference_is_rejected(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();

        let json = r#"{
            "version": 1,
            "exportedAt": "2026-06-05T00:00:00.000Z",
            "exercises": [{"id": 1, "name": "Squat", "target_body_part": "Legs"}],
            "workouts": [{"id": 1, "date": "2026-06-01T08:00:00.000Z", "note": null}],
            "sets": [{"id": 1, "workout_id": 7, "exercise_id": 1, "weight_kg": 100.0, "reps": 5}]
        }"#;
        let err = Backup::new(&ctx.db).import_str(json).unwrap_err();
        assert_eq!(
            vault_error(&err),
            Some(&VaultError::DanglingReference {
                section: "sets",
                id: 1,
                target: "workout",
                target_id: 7,
            })
        );
        assert_eq!(ctx.contents(), before);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_malformed_json_changes_nothing(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();

        let err = Backup::new(&ctx.db).import_str("{ not json").unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
        assert_eq!(ctx.contents(), before);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_failed_insert_rolls_back(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();

        // Passes validation, but the duplicate primary key fails mid-import.
        let json = r#"{
            "version": 1,
            "exercises": [{"id": 1, "name": "Squat"}, {"id": 1, "name": "Squat again"}],
            "workouts": [],
            "sets": []
        }"#;
        assert!(Backup::new(&ctx.db).import_str(json).is_err());
        assert_eq!(ctx.contents(), before);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_cancelled_pick_changes_nothing(ctx: &mut BackupTestContext) {
        ctx.populate();
        let before = ctx.contents();

        assert_eq!(Backup::new(&ctx.db).import(&CancelledPicker).unwrap(), None);
        assert_eq!(ctx.contents(), before);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_backup_without_routines_clears_them(ctx: &mut BackupTestContext) {
        ctx.populate();

        let json = r#"{
            "version": 1,
            "exportedAt": "2025-01-01T00:00:00.000Z",
            "exercises": [{"id": 3, "name": "Bench Press", "target_body_part": "Chest"}],
            "workouts": [{"id": 10, "date": "2025-01-01T07:00:00.000Z", "note": "new year"}],
            "sets": [{"id": 20, "workout_id": 10, "exercise_id": 3, "weight_kg": 70.0, "reps": 8}]
        }"#;
        let summary = Backup::new(&ctx.db).import_str(json).unwrap();
        assert_eq!(summary.routines, 0);

        let contents = ctx.contents();
        assert_eq!(contents.exercises.len(), 1);
        assert_eq!(contents.sets[0].id, 20);
        assert_eq!(contents.sets[0].workout_id, 10);
        assert!(contents.routines.is_empty());
        assert!(contents.routine_exercises.is_empty());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_clear_wipes_and_reseeds(ctx: &mut BackupTestContext) {
        ctx.populate();

        let report = Backup::new(&ctx.db).clear().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.seeded, 29);

        let contents = ctx.contents();
        assert_eq!(contents.exercises.len(), 29);
        assert!(contents.workouts.is_empty());
        assert!(contents.sets.is_empty());
        assert!(contents.routines.is_empty());
        assert!(contents.routine_exercises.is_empty());
        assert!(Exercises::new(&ctx.db).find_by_name("Hip Thrust").unwrap().is_none());
    }
}
