use speculate2::speculate;

speculate! {
    use enrollment_core::models::*;
    use enrollment_core::{Database, Error};
    use uuid::Uuid;

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_test_student(db: &Database, first: &str, last: &str) -> Student {
        db.create_student(CreateStudentInput {
            first_name: first.into(),
            last_name: last.into(),
        })
        .expect("Failed to insert student")
    }

    fn create_test_course(db: &Database, name: &str, credits: i32) -> Course {
        db.create_course(CreateCourseInput {
            name: name.into(),
            credits,
        })
        .expect("Failed to insert course")
    }

    fn enroll(db: &Database, student: &Student, course: &Course) -> Enrollment {
        db.create_enrollment(CreateEnrollmentInput {
            student_id: student.id,
            course_id: course.id,
        })
        .expect("Failed to enroll student")
    }

    describe "students" {
        it "finds a student by id" {
            let db = setup_db();
            let ada = create_test_student(&db, "Ada", "Lovelace");
            create_test_student(&db, "Alan", "Turing");

            let found = db.get_student(ada.id).unwrap();
            assert_eq!(found, Some(ada));
        }

        it "returns None for an unknown id" {
            let db = setup_db();
            create_test_student(&db, "Ada", "Lovelace");

            assert!(db.get_student(Uuid::new_v4()).unwrap().is_none());
        }

        it "generates a distinct id per insert" {
            let db = setup_db();
            let first = create_test_student(&db, "Ada", "Lovelace");
            let second = create_test_student(&db, "Ada", "Lovelace");

            assert_ne!(first.id, second.id);
        }
    }

    describe "courses" {
        it "lists every inserted course in insertion order" {
            let db = setup_db();
            let algorithms = create_test_course(&db, "Algorithms", 4);
            let databases = create_test_course(&db, "Databases", 3);

            let courses = db.get_all_courses().unwrap();
            assert_eq!(courses, vec![algorithms, databases]);
        }

        it "returns an empty list when no courses exist" {
            let db = setup_db();
            assert!(db.get_all_courses().unwrap().is_empty());
        }

        describe "update_course" {
            it "leaves credits unchanged when only the name is supplied" {
                let db = setup_db();
                let course = create_test_course(&db, "Algorithms", 4);

                let updated = db
                    .update_course(course.id, UpdateCourseInput {
                        name: Patch::Value("Advanced Algorithms".into()),
                        ..Default::default()
                    })
                    .unwrap()
                    .unwrap();

                assert_eq!(updated.name, "Advanced Algorithms");
                assert_eq!(updated.credits, 4);
            }

            it "leaves the name unchanged when only credits are supplied" {
                let db = setup_db();
                let course = create_test_course(&db, "Algorithms", 4);

                let updated = db
                    .update_course(course.id, UpdateCourseInput {
                        credits: Patch::Value(6),
                        ..Default::default()
                    })
                    .unwrap()
                    .unwrap();

                assert_eq!(updated.name, "Algorithms");
                assert_eq!(updated.credits, 6);
                assert_eq!(db.get_course(course.id).unwrap(), Some(updated));
            }

            it "returns the stored course when nothing is supplied" {
                let db = setup_db();
                let course = create_test_course(&db, "Algorithms", 4);

                let updated = db.update_course(course.id, UpdateCourseInput::default()).unwrap();
                assert_eq!(updated, Some(course));
            }

            it "returns None for an unknown course" {
                let db = setup_db();

                let updated = db
                    .update_course(Uuid::new_v4(), UpdateCourseInput {
                        name: Patch::Value("Ghost".into()),
                        ..Default::default()
                    })
                    .unwrap();
                assert!(updated.is_none());

                let untouched = db.update_course(Uuid::new_v4(), UpdateCourseInput::default()).unwrap();
                assert!(untouched.is_none());
            }

            it "rejects null for a required column" {
                let db = setup_db();
                let course = create_test_course(&db, "Algorithms", 4);

                let result = db.update_course(course.id, UpdateCourseInput {
                    name: Patch::Null,
                    ..Default::default()
                });

                assert!(matches!(result, Err(Error::InvalidInput(_))));
                assert_eq!(db.get_course(course.id).unwrap(), Some(course));
            }

            it "rejects null before checking that the course exists" {
                let db = setup_db();

                let result = db.update_course(Uuid::new_v4(), UpdateCourseInput {
                    credits: Patch::Null,
                    ..Default::default()
                });

                assert!(matches!(result, Err(Error::InvalidInput(_))));
            }
        }
    }

    describe "enrollments" {
        it "stamps the enrollment with the time of the call" {
            let db = setup_db();
            let student = create_test_student(&db, "Ada", "Lovelace");
            let course = create_test_course(&db, "Algorithms", 4);

            let before = chrono::Utc::now();
            let enrollment = enroll(&db, &student, &course);
            let after = chrono::Utc::now();

            assert_eq!(enrollment.student_id, student.id);
            assert_eq!(enrollment.course_id, course.id);
            assert!(enrollment.enrollment_date >= before);
            assert!(enrollment.enrollment_date <= after);
        }

        it "rejects an unknown student" {
            let db = setup_db();
            let course = create_test_course(&db, "Algorithms", 4);

            let result = db.create_enrollment(CreateEnrollmentInput {
                student_id: Uuid::new_v4(),
                course_id: course.id,
            });

            assert!(matches!(result, Err(Error::ConstraintViolation(_))));
            assert!(db.get_course_roster(course.id).unwrap().1.is_empty());
        }

        it "rejects an unknown course" {
            let db = setup_db();
            let student = create_test_student(&db, "Ada", "Lovelace");

            let result = db.create_enrollment(CreateEnrollmentInput {
                student_id: student.id,
                course_id: Uuid::new_v4(),
            });

            assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        }

        describe "get_course_roster" {
            it "returns the course and its enrolled students" {
                let db = setup_db();
                let ada = create_test_student(&db, "Ada", "Lovelace");
                let alan = create_test_student(&db, "Alan", "Turing");
                let grace = create_test_student(&db, "Grace", "Hopper");
                let algorithms = create_test_course(&db, "Algorithms", 4);
                let databases = create_test_course(&db, "Databases", 3);

                enroll(&db, &ada, &algorithms);
                enroll(&db, &alan, &algorithms);
                enroll(&db, &grace, &databases);

                let roster = db.get_course_roster(algorithms.id).unwrap();
                assert_eq!(roster.course(), Some(&algorithms));

                let names: Vec<_> = roster.students().map(|s| s.first_name.as_str()).collect();
                assert_eq!(names, vec!["Ada", "Alan"]);
            }

            it "lists one row per enrollment, duplicates included" {
                let db = setup_db();
                let ada = create_test_student(&db, "Ada", "Lovelace");
                let course = create_test_course(&db, "Algorithms", 4);

                enroll(&db, &ada, &course);
                enroll(&db, &ada, &course);

                assert_eq!(db.get_course_roster(course.id).unwrap().1.len(), 2);
            }

            it "yields no course and no rows for an unknown id" {
                let db = setup_db();

                let roster = db.get_course_roster(Uuid::new_v4()).unwrap();
                assert_eq!(roster, CourseRoster(None, vec![]));
            }
        }

        describe "delete_enrollments" {
            it "removes every row for the pair" {
                let db = setup_db();
                let ada = create_test_student(&db, "Ada", "Lovelace");
                let alan = create_test_student(&db, "Alan", "Turing");
                let course = create_test_course(&db, "Algorithms", 4);

                enroll(&db, &ada, &course);
                enroll(&db, &ada, &course);
                enroll(&db, &alan, &course);

                let deleted = db.delete_enrollments(ada.id, course.id).unwrap();
                assert_eq!(deleted, BatchCount { count: 2 });

                let remaining: Vec<_> = db
                    .get_course_roster(course.id)
                    .unwrap()
                    .students()
                    .map(|s| s.id)
                    .collect();
                assert_eq!(remaining, vec![alan.id]);
            }

            it "reports zero when nothing matches" {
                let db = setup_db();

                let deleted = db.delete_enrollments(Uuid::new_v4(), Uuid::new_v4()).unwrap();
                assert_eq!(deleted.count, 0);
            }
        }
    }

    describe "opening a database file" {
        it "creates missing directories and keeps data across reopen" {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("enrollment.db");

            let course = {
                let db = Database::open(&path).unwrap();
                db.migrate().unwrap();
                create_test_course(&db, "Algorithms", 4)
            };

            let db = Database::open(&path).unwrap();
            db.migrate().unwrap();
            assert_eq!(db.get_all_courses().unwrap(), vec![course]);
            assert!(db.ping());
        }
    }
}
