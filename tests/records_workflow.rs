use student_records::config::Config;
use student_records::model::{Department, Role};
use student_records::records::{NewStudent, Records, Session, StudentUpdate};
use student_records::store;
use student_records::{RecordsError, ValidationError};
use std::fs;
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, Records) {
    let dir = tempdir().expect("temp dir");
    let config = Config::with_data_dir(dir.path());
    store::initialize(&config).expect("initialize data dir");
    (dir, Records::new(config))
}

fn alice() -> NewStudent {
    NewStudent {
        id: "ST1001".into(),
        name: "Alice Smith".into(),
        department: "cs".into(),
        semester: "3".into(),
        password: "Passw0rd!".into(),
        confirm_password: "Passw0rd!".into(),
    }
}

#[test]
fn registered_student_is_stored_with_uppercase_department() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    let student = records.student("ST1001").unwrap();
    assert_eq!(student.name, "Alice Smith");
    assert_eq!(student.department, Department::Cs);
    assert_eq!(student.semester, "3");
    assert_eq!(student.password, "Passw0rd!");
    assert!(student.courses.is_empty());

    let raw = fs::read_to_string(records.config().students_file()).unwrap();
    assert_eq!(raw, "ST1001,Alice Smith,CS,3,Passw0rd!,\n");
}

#[test]
fn duplicate_student_id_is_rejected() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    let mut again = alice();
    again.name = "Someone Else".into();
    assert!(matches!(
        records.register_student(&again),
        Err(RecordsError::StudentExists)
    ));

    // even with otherwise invalid fields the duplicate is what gets reported
    let mut bad = alice();
    bad.semester = "12".into();
    assert!(matches!(
        records.register_student(&bad),
        Err(RecordsError::StudentExists)
    ));
    assert_eq!(records.view_students().len(), 1);
}

#[test]
fn registration_reports_first_invalid_field() {
    let (_dir, records) = setup();

    let mut new = alice();
    new.department = "Physics".into();
    assert!(matches!(
        records.register_student(&new),
        Err(RecordsError::Validation(ValidationError::Department))
    ));

    let mut new = alice();
    new.confirm_password = "Passw0rd?".into();
    assert!(matches!(
        records.register_student(&new),
        Err(RecordsError::PasswordMismatch)
    ));
    assert!(records.view_students().is_empty());
}

#[test]
fn default_admin_can_log_in_and_register_another() {
    let (_dir, records) = setup();
    assert_eq!(
        records.login(Role::Admin, "admin", "Admin123!").unwrap(),
        Session::Admin("admin".into())
    );
    assert!(matches!(
        records.login(Role::Admin, "admin", "wrong"),
        Err(RecordsError::InvalidCredentials(Role::Admin))
    ));

    records.register_admin("registrar", "Regis7er!", "Regis7er!").unwrap();
    assert!(matches!(
        records.register_admin("registrar", "Regis7er!", "Regis7er!"),
        Err(RecordsError::UsernameTaken)
    ));
    assert!(records.login(Role::Admin, "registrar", "Regis7er!").is_ok());

    let raw = fs::read_to_string(records.config().admin_file()).unwrap();
    assert_eq!(raw, "admin,Admin123!\nregistrar,Regis7er!\n");
}

#[test]
fn student_login_returns_the_id() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    assert_eq!(
        records.login(Role::Student, "ST1001", "Passw0rd!").unwrap(),
        Session::Student("ST1001".into())
    );
    assert!(matches!(
        records.login(Role::Student, "ST1001", "passw0rd!"),
        Err(RecordsError::InvalidCredentials(Role::Student))
    ));
    assert!(matches!(
        records.login(Role::Student, "st1001", "Passw0rd!"),
        Err(RecordsError::Validation(ValidationError::StudentIdCharset))
    ));
}

#[test]
fn update_applies_only_supplied_fields() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    let update = StudentUpdate {
        name: Some("Alice Jones".into()),
        department: Some(String::new()),
        semester: Some("4".into()),
        ..Default::default()
    };
    let student = records.update_student("ST1001", &update).unwrap();
    assert_eq!(student.name, "Alice Jones");
    assert_eq!(student.department, Department::Cs);
    assert_eq!(student.semester, "4");
    assert_eq!(student.password, "Passw0rd!");
    assert_eq!(records.student("ST1001").unwrap(), student);
}

#[test]
fn failed_update_changes_nothing() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    let before = fs::read_to_string(records.config().students_file()).unwrap();

    // valid name, invalid semester
    let update = StudentUpdate {
        name: Some("Alice Jones".into()),
        semester: Some("9".into()),
        ..Default::default()
    };
    assert!(matches!(
        records.update_student("ST1001", &update),
        Err(RecordsError::Validation(ValidationError::SemesterRange))
    ));

    // valid fields, mismatched password confirmation
    let update = StudentUpdate {
        department: Some("ee".into()),
        password: Some("N3wPass!".into()),
        confirm_password: Some("N3wPass?".into()),
        ..Default::default()
    };
    assert!(matches!(
        records.update_student("ST1001", &update),
        Err(RecordsError::PasswordMismatch)
    ));

    let after = fs::read_to_string(records.config().students_file()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_unknown_student_fails() {
    let (_dir, records) = setup();
    assert!(matches!(
        records.update_student("ST9999", &StudentUpdate::default()),
        Err(RecordsError::StudentNotFound)
    ));
}

#[test]
fn enrollment_is_append_only_and_unique() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    records.enroll_student("ST1001", "CS101").unwrap();
    records.enroll_student("ST1001", "MTH200").unwrap();
    assert!(matches!(
        records.enroll_student("ST1001", "CS101"),
        Err(RecordsError::AlreadyEnrolled(course)) if course == "CS101"
    ));
    assert!(matches!(
        records.enroll_student("ST1001", "cs102"),
        Err(RecordsError::Validation(ValidationError::CourseCode))
    ));
    assert!(matches!(
        records.enroll_student("ST2002", "CS101"),
        Err(RecordsError::StudentNotFound)
    ));

    assert_eq!(
        records.student_courses("ST1001").unwrap(),
        vec!["CS101".to_string(), "MTH200".to_string()]
    );
}

#[test]
fn marks_require_enrollment() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    assert!(matches!(
        records.enter_marks("ST1001", "CS101", "85"),
        Err(RecordsError::NotEnrolled(_))
    ));
    let raw = fs::read_to_string(records.config().marks_file()).unwrap();
    assert!(raw.is_empty());
}

#[test]
fn marks_are_range_checked_and_overwritten() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    records.enroll_student("ST1001", "CS101").unwrap();

    assert!(matches!(
        records.enter_marks("ST1001", "CS101", "101"),
        Err(RecordsError::Validation(ValidationError::MarksRange))
    ));
    assert!(matches!(
        records.enter_marks("ST1001", "CS101", "lots"),
        Err(RecordsError::Validation(ValidationError::MarksNotNumber))
    ));

    assert_eq!(records.enter_marks("ST1001", "CS101", "40").unwrap(), 40.0);
    assert_eq!(records.enter_marks("ST1001", "CS101", "72.5").unwrap(), 72.5);

    let raw = fs::read_to_string(records.config().marks_file()).unwrap();
    assert_eq!(raw, "ST1001,CS101,72.5\n");
}

#[test]
fn delete_cascades_to_marks() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    let mut bob = alice();
    bob.id = "ST1002".into();
    bob.name = "Bob Brown".into();
    records.register_student(&bob).unwrap();

    for id in ["ST1001", "ST1002"] {
        records.enroll_student(id, "CS101").unwrap();
        records.enter_marks(id, "CS101", "70").unwrap();
    }

    assert_eq!(records.delete_student("ST1001").unwrap(), 1);
    assert!(matches!(
        records.generate_report_card("ST1001"),
        Err(RecordsError::StudentNotFound)
    ));
    assert!(matches!(
        records.delete_student("ST1001"),
        Err(RecordsError::StudentNotFound)
    ));

    let marks = store::load_marks(&records.config().marks_file()).data;
    assert_eq!(marks.score("ST1001", "CS101"), None);
    assert_eq!(marks.score("ST1002", "CS101"), Some(70.0));
}

#[test]
fn report_card_scenario() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    records.enroll_student("ST1001", "CS101").unwrap();
    records.enter_marks("ST1001", "CS101", "85").unwrap();

    let report = records.generate_report_card("ST1001").unwrap();
    let text = report.card.to_string();
    assert!(text.contains("Course: CS101, Marks: 85.0, Grade: A\n"));
    assert!(text.ends_with("Percentage: 85.00%\n"));
    assert!(text.starts_with("Report Card for Alice Smith (ID: ST1001)\nDepartment: CS\nSemester: 3\n"));

    assert_eq!(report.path, records.config().report_file("ST1001"));
    assert_eq!(fs::read_to_string(&report.path).unwrap(), text);
}

#[test]
fn report_card_is_regenerated_in_place() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    records.enroll_student("ST1001", "CS101").unwrap();
    records.enroll_student("ST1001", "EE205").unwrap();
    records.generate_report_card("ST1001").unwrap();

    records.enter_marks("ST1001", "CS101", "90").unwrap();
    records.enter_marks("ST1001", "EE205", "49").unwrap();
    let report = records.generate_report_card("ST1001").unwrap();

    let written = fs::read_to_string(&report.path).unwrap();
    assert!(written.contains("Course: CS101, Marks: 90.0, Grade: A+\n"));
    assert!(written.contains("Course: EE205, Marks: 49.0, Grade: F\n"));
    assert!(written.contains("Percentage: 69.50%\n"));
    assert_eq!(written.matches("Report Card for").count(), 1);
}

#[test]
fn report_card_rejects_malformed_id() {
    let (_dir, records) = setup();
    assert!(matches!(
        records.generate_report_card("x"),
        Err(RecordsError::Validation(ValidationError::StudentIdTooShort))
    ));
}

#[test]
fn grades_view_defaults_missing_marks() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();
    records.enroll_student("ST1001", "CS101").unwrap();
    records.enroll_student("ST1001", "EE205").unwrap();
    records.enter_marks("ST1001", "EE205", "55").unwrap();

    let lines: Vec<String> = records
        .student_grades("ST1001")
        .unwrap()
        .iter()
        .map(|r| r.to_string())
        .collect();
    assert_eq!(
        lines,
        vec![
            "Course: CS101, Marks: 0, Grade: F".to_string(),
            "Course: EE205, Marks: 55.0, Grade: D".to_string(),
        ]
    );
    assert!(!records.config().report_file("ST1001").exists());
}

#[test]
fn semester_is_kept_as_entered() {
    let (_dir, records) = setup();
    let mut new = alice();
    new.semester = "03".into();
    records.register_student(&new).unwrap();
    assert_eq!(records.student("ST1001").unwrap().semester, "03");

    let update = StudentUpdate {
        semester: Some("05".into()),
        ..Default::default()
    };
    records.update_student("ST1001", &update).unwrap();
    let raw = fs::read_to_string(records.config().students_file()).unwrap();
    assert_eq!(raw, "ST1001,Alice Smith,CS,05,Passw0rd!,\n");
}

#[test]
fn unreadable_student_row_outlives_other_registrations() {
    let (_dir, records) = setup();
    fs::write(records.config().students_file(), "ST0001,Bob,XX,3,Passw0rd!,\n").unwrap();

    records.register_student(&alice()).unwrap();
    records.enroll_student("ST1001", "CS101").unwrap();

    let raw = fs::read_to_string(records.config().students_file()).unwrap();
    assert_eq!(
        raw,
        "ST1001,Alice Smith,CS,3,Passw0rd!,CS101\nST0001,Bob,XX,3,Passw0rd!,\n"
    );
}

#[test]
fn admin_login_checks_username_format_first() {
    let (_dir, records) = setup();
    assert!(matches!(
        records.login(Role::Admin, "ab", "Admin123!"),
        Err(RecordsError::Validation(ValidationError::UsernameTooShort))
    ));
    assert!(matches!(
        records.login(Role::Admin, "ad-min", "Admin123!"),
        Err(RecordsError::Validation(ValidationError::UsernameCharset))
    ));
}

#[test]
fn password_change_replaces_the_old_password() {
    let (_dir, records) = setup();
    records.register_student(&alice()).unwrap();

    let update = StudentUpdate {
        password: Some("N3wPass!".into()),
        confirm_password: Some("N3wPass!".into()),
        ..Default::default()
    };
    let student = records.update_student("ST1001", &update).unwrap();
    assert_eq!(student.password, "N3wPass!");

    assert_eq!(
        records.login(Role::Student, "ST1001", "N3wPass!").unwrap(),
        Session::Student("ST1001".into())
    );
    assert!(matches!(
        records.login(Role::Student, "ST1001", "Passw0rd!"),
        Err(RecordsError::InvalidCredentials(Role::Student))
    ));
}
