// Field validators. Each one is a pure function over the raw text the user
// typed; the typed value is returned when the field carries one.

use crate::error::ValidationError;
use crate::model::Department;
use regex::Regex;
use std::sync::OnceLock;

const SPECIAL_CHARS: &str = "!@#$%^&*";

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern"))
}

fn student_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9]+$").expect("student id pattern"))
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z ]+$").expect("name pattern"))
}

fn course_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2,3}[0-9]{3}$").expect("course code pattern"))
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len < 3 {
        return Err(ValidationError::UsernameTooShort);
    }
    if len > 20 {
        return Err(ValidationError::UsernameTooLong);
    }
    if !username_re().is_match(username) {
        return Err(ValidationError::UsernameCharset);
    }
    Ok(())
}

/// 6-20 characters with at least one uppercase letter, one digit and one
/// of `!@#$%^&*`. Rules are checked in that order.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < 6 {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > 20 {
        return Err(ValidationError::PasswordTooLong);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordNoUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordNoDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::PasswordNoSpecial);
    }
    Ok(())
}

pub fn validate_student_id(student_id: &str) -> Result<(), ValidationError> {
    let len = student_id.chars().count();
    if len < 4 {
        return Err(ValidationError::StudentIdTooShort);
    }
    if len > 10 {
        return Err(ValidationError::StudentIdTooLong);
    }
    if !student_id_re().is_match(student_id) {
        return Err(ValidationError::StudentIdCharset);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < 2 {
        return Err(ValidationError::NameTooShort);
    }
    if len > 50 {
        return Err(ValidationError::NameTooLong);
    }
    if !name_re().is_match(name) {
        return Err(ValidationError::NameCharset);
    }
    Ok(())
}

pub fn validate_department(dept: &str) -> Result<Department, ValidationError> {
    Department::parse(dept).ok_or(ValidationError::Department)
}

pub fn validate_semester(sem: &str) -> Result<u8, ValidationError> {
    let value: i64 = sem
        .trim()
        .parse()
        .map_err(|_| ValidationError::SemesterNotNumber)?;
    if !(1..=8).contains(&value) {
        return Err(ValidationError::SemesterRange);
    }
    Ok(value as u8)
}

pub fn validate_course_code(course: &str) -> Result<(), ValidationError> {
    if course_code_re().is_match(course) {
        Ok(())
    } else {
        Err(ValidationError::CourseCode)
    }
}

/// Parses a score and checks it lies in `[0, 100]`. NaN is out of range.
pub fn validate_marks(marks: &str) -> Result<f64, ValidationError> {
    let value: f64 = marks
        .trim()
        .parse()
        .map_err(|_| ValidationError::MarksNotNumber)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::MarksRange);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert_eq!(validate_username("ab"), Err(ValidationError::UsernameTooShort));
        assert_eq!(
            validate_username("a_very_long_username_x"),
            Err(ValidationError::UsernameTooLong)
        );
        assert_eq!(validate_username("bad-name"), Err(ValidationError::UsernameCharset));
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("Admin_2").is_ok());
        assert!(validate_username("a2345678901234567890").is_ok());
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(validate_password("Ab1!"), Err(ValidationError::PasswordTooShort));
        assert_eq!(
            validate_password("Abcdefghij1234567890!"),
            Err(ValidationError::PasswordTooLong)
        );
        assert_eq!(validate_password("passw0rd!"), Err(ValidationError::PasswordNoUppercase));
        assert_eq!(validate_password("Password!"), Err(ValidationError::PasswordNoDigit));
        assert_eq!(validate_password("Passw0rd"), Err(ValidationError::PasswordNoSpecial));
        assert!(validate_password("Passw0rd!").is_ok());
        assert!(validate_password("Admin123!").is_ok());
    }

    #[test]
    fn password_reason_names_the_special_characters() {
        let err = validate_password("Passw0rd").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must contain at least one special character (!@#$%^&*)"
        );
    }

    #[test]
    fn student_id_rules() {
        assert_eq!(validate_student_id("ST1"), Err(ValidationError::StudentIdTooShort));
        assert_eq!(
            validate_student_id("ST123456789"),
            Err(ValidationError::StudentIdTooLong)
        );
        assert_eq!(validate_student_id("st1001"), Err(ValidationError::StudentIdCharset));
        assert!(validate_student_id("ST1001").is_ok());
        assert!(validate_student_id("1234").is_ok());
    }

    #[test]
    fn name_rules() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name(&"a".repeat(51)), Err(ValidationError::NameTooLong));
        assert_eq!(validate_name("Alice 2"), Err(ValidationError::NameCharset));
        assert_eq!(validate_name("O'Neil"), Err(ValidationError::NameCharset));
        assert!(validate_name("Alice Smith").is_ok());
    }

    #[test]
    fn department_and_semester() {
        assert_eq!(validate_department("ee"), Ok(Department::Ee));
        assert_eq!(validate_department("Physics"), Err(ValidationError::Department));
        assert_eq!(validate_semester("1"), Ok(1));
        assert_eq!(validate_semester("8"), Ok(8));
        assert_eq!(validate_semester("0"), Err(ValidationError::SemesterRange));
        assert_eq!(validate_semester("9"), Err(ValidationError::SemesterRange));
        assert_eq!(validate_semester("three"), Err(ValidationError::SemesterNotNumber));
        assert_eq!(validate_semester(""), Err(ValidationError::SemesterNotNumber));
    }

    #[test]
    fn course_codes() {
        for ok in ["CS101", "MTH999", "EE000"] {
            assert!(validate_course_code(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["C101", "CSEE101", "cs101", "CS10", "CS1011", "CS 101", ""] {
            assert_eq!(validate_course_code(bad), Err(ValidationError::CourseCode), "{bad}");
        }
    }

    #[test]
    fn marks_range_is_inclusive() {
        assert_eq!(validate_marks("0"), Ok(0.0));
        assert_eq!(validate_marks("100"), Ok(100.0));
        assert_eq!(validate_marks("72.5"), Ok(72.5));
        assert_eq!(validate_marks("100.1"), Err(ValidationError::MarksRange));
        assert_eq!(validate_marks("-1"), Err(ValidationError::MarksRange));
        assert_eq!(validate_marks("nan"), Err(ValidationError::MarksRange));
        assert_eq!(validate_marks("eighty"), Err(ValidationError::MarksNotNumber));
    }
}
