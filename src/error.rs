// Error types shared by the library. `ValidationError` carries the
// human-readable reason a single field was rejected; `RecordsError` wraps
// it together with the business-rule and I/O failures of the operations.

use crate::model::Role;

/// Reason a single input field was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,
    #[error("Username cannot exceed 20 characters")]
    UsernameTooLong,
    #[error("Username can only contain letters, numbers, and underscores")]
    UsernameCharset,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Password cannot exceed 20 characters")]
    PasswordTooLong,
    #[error("Password must contain at least one uppercase letter")]
    PasswordNoUppercase,
    #[error("Password must contain at least one number")]
    PasswordNoDigit,
    #[error("Password must contain at least one special character (!@#$%^&*)")]
    PasswordNoSpecial,

    #[error("Student ID must be at least 4 characters long")]
    StudentIdTooShort,
    #[error("Student ID cannot exceed 10 characters")]
    StudentIdTooLong,
    #[error("Student ID can only contain uppercase letters and numbers")]
    StudentIdCharset,

    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Name cannot exceed 50 characters")]
    NameTooLong,
    #[error("Name can only contain letters and spaces")]
    NameCharset,

    #[error("Department must be one of: CS, EE, ME, CE, IT")]
    Department,

    #[error("Semester must be between 1 and 8")]
    SemesterRange,
    #[error("Semester must be a number")]
    SemesterNotNumber,

    #[error("Invalid course code format! Use format like CS101")]
    CourseCode,

    #[error("Marks must be between 0 and 100")]
    MarksRange,
    #[error("Invalid marks input! Must be a number")]
    MarksNotNumber,
}

/// Failure of a records operation. Nothing is persisted when one of these
/// is returned, except for `Io`/`Csv` raised by the final save itself.
#[derive(thiserror::Error, Debug)]
pub enum RecordsError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Student ID already exists")]
    StudentExists,
    #[error("Student not found")]
    StudentNotFound,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Student already enrolled in {0}")]
    AlreadyEnrolled(String),
    #[error("Student not enrolled in {0}")]
    NotEnrolled(String),
    #[error("Invalid {0} credentials")]
    InvalidCredentials(Role),
    #[error("File access failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write records: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
