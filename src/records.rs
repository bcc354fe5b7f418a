// Domain operations. Every call loads the stores it needs, validates its
// input, checks the business rule, mutates the in-memory copy and saves.
// Nothing is written unless every check passed.

use crate::config::Config;
use crate::error::RecordsError;
use crate::model::{AdminAccount, MarkBook, Role, Student};
use crate::report::{course_results, CourseResult, ReportCard};
use crate::store::{self, LoadResult};
use crate::validate::{
    validate_course_code, validate_department, validate_marks, validate_name, validate_password,
    validate_semester, validate_student_id, validate_username,
};
use log::{info, warn};
use std::path::PathBuf;

/// Fields for a new student as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub id: String,
    pub name: String,
    pub department: String,
    pub semester: String,
    pub password: String,
    pub confirm_password: String,
}

/// Replacement values for an existing student. Empty or missing fields
/// keep their current value.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Admin(String),
    Student(String),
}

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub card: ReportCard,
    pub path: PathBuf,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Entry point to the stored records under one data directory.
#[derive(Debug, Clone)]
pub struct Records {
    config: Config,
}

impl Records {
    pub fn new(config: Config) -> Self {
        Records { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn admins(&self) -> Vec<AdminAccount> {
        let LoadResult {
            data,
            used_fallback,
        } = store::load_admins(&self.config.admin_file());
        if used_fallback {
            warn!("admin accounts replaced by the default account");
        }
        data
    }

    fn students(&self) -> Vec<Student> {
        store::load_students(&self.config.students_file()).data
    }

    fn marks(&self) -> MarkBook {
        store::load_marks(&self.config.marks_file()).data
    }

    /// Look up an existing student after checking the id format.
    fn find<'a>(students: &'a mut [Student], id: &str) -> Result<&'a mut Student, RecordsError> {
        validate_student_id(id)?;
        students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RecordsError::StudentNotFound)
    }

    pub fn register_admin(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), RecordsError> {
        let mut admins = self.admins();
        validate_username(username)?;
        if admins.iter().any(|a| a.username == username) {
            return Err(RecordsError::UsernameTaken);
        }
        validate_password(password)?;
        if password != confirm_password {
            return Err(RecordsError::PasswordMismatch);
        }

        admins.push(AdminAccount::new(username, password));
        store::save_admins(&self.config.admin_file(), &admins)?;
        info!("registered admin {}", username);
        Ok(())
    }

    pub fn register_student(&self, new: &NewStudent) -> Result<Student, RecordsError> {
        let mut students = self.students();
        validate_student_id(&new.id)?;
        if students.iter().any(|s| s.id == new.id) {
            return Err(RecordsError::StudentExists);
        }
        validate_name(&new.name)?;
        let department = validate_department(&new.department)?;
        validate_semester(&new.semester)?;
        validate_password(&new.password)?;
        if new.password != new.confirm_password {
            return Err(RecordsError::PasswordMismatch);
        }

        let student = Student {
            id: new.id.clone(),
            name: new.name.clone(),
            department,
            semester: new.semester.clone(),
            password: new.password.clone(),
            courses: Vec::new(),
        };
        students.push(student.clone());
        store::save_students(&self.config.students_file(), &students)?;
        info!("registered student {}", student.id);
        Ok(student)
    }

    /// Check credentials for `role`. `user` is the admin username or the
    /// student id.
    pub fn login(&self, role: Role, user: &str, password: &str) -> Result<Session, RecordsError> {
        let accepted = match role {
            Role::Admin => {
                validate_username(user)?;
                self.admins()
                    .iter()
                    .any(|a| a.username == user && a.password == password)
            }
            Role::Student => {
                validate_student_id(user)?;
                self.students()
                    .iter()
                    .any(|s| s.id == user && s.password == password)
            }
        };
        if !accepted {
            warn!("{} login failed for {}", role, user);
            return Err(RecordsError::InvalidCredentials(role));
        }
        info!("{} {} logged in", role, user);
        Ok(match role {
            Role::Admin => Session::Admin(user.to_string()),
            Role::Student => Session::Student(user.to_string()),
        })
    }

    /// All supplied fields are validated before any of them is applied.
    pub fn update_student(&self, id: &str, update: &StudentUpdate) -> Result<Student, RecordsError> {
        let mut students = self.students();
        let student = Self::find(&mut students, id)?;

        let name = supplied(&update.name);
        if let Some(name) = name {
            validate_name(name)?;
        }
        let department = supplied(&update.department)
            .map(validate_department)
            .transpose()?;
        let semester = supplied(&update.semester);
        if let Some(semester) = semester {
            validate_semester(semester)?;
        }
        let password = supplied(&update.password);
        if let Some(password) = password {
            validate_password(password)?;
            if Some(password) != update.confirm_password.as_deref() {
                return Err(RecordsError::PasswordMismatch);
            }
        }

        if let Some(name) = name {
            student.name = name.to_string();
        }
        if let Some(department) = department {
            student.department = department;
        }
        if let Some(semester) = semester {
            student.semester = semester.to_string();
        }
        if let Some(password) = password {
            student.password = password.to_string();
        }
        let updated = student.clone();

        store::save_students(&self.config.students_file(), &students)?;
        info!("updated student {}", id);
        Ok(updated)
    }

    /// Remove a student and every mark recorded for them. Returns the
    /// number of mark records dropped.
    pub fn delete_student(&self, id: &str) -> Result<usize, RecordsError> {
        let mut students = self.students();
        Self::find(&mut students, id)?;
        students.retain(|s| s.id != id);
        store::save_students(&self.config.students_file(), &students)?;

        let mut marks = self.marks();
        let removed = marks.remove_student(id);
        if removed > 0 {
            store::save_marks(&self.config.marks_file(), &marks)?;
        }
        info!("deleted student {} and {} mark record(s)", id, removed);
        Ok(removed)
    }

    pub fn enroll_student(&self, id: &str, course: &str) -> Result<(), RecordsError> {
        let mut students = self.students();
        let student = Self::find(&mut students, id)?;
        validate_course_code(course)?;
        if !student.enroll(course) {
            return Err(RecordsError::AlreadyEnrolled(course.to_string()));
        }

        store::save_students(&self.config.students_file(), &students)?;
        info!("enrolled {} in {}", id, course);
        Ok(())
    }

    /// Record `score` for an enrolled course, replacing any earlier mark.
    pub fn enter_marks(&self, id: &str, course: &str, score: &str) -> Result<f64, RecordsError> {
        let mut students = self.students();
        let student = Self::find(&mut students, id)?;
        validate_course_code(course)?;
        if !student.is_enrolled(course) {
            return Err(RecordsError::NotEnrolled(course.to_string()));
        }
        let score = validate_marks(score)?;

        let mut marks = self.marks();
        marks.set(id, course, score);
        store::save_marks(&self.config.marks_file(), &marks)?;
        info!("recorded {} for {} in {}", score, id, course);
        Ok(score)
    }

    pub fn view_students(&self) -> Vec<Student> {
        self.students()
    }

    pub fn student(&self, id: &str) -> Result<Student, RecordsError> {
        let mut students = self.students();
        Self::find(&mut students, id).map(|s| s.clone())
    }

    pub fn student_courses(&self, id: &str) -> Result<Vec<String>, RecordsError> {
        self.student(id).map(|s| s.courses)
    }

    pub fn student_grades(&self, id: &str) -> Result<Vec<CourseResult>, RecordsError> {
        let student = self.student(id)?;
        Ok(course_results(&student, &self.marks()))
    }

    /// Build the report card for `id` and write it to the report directory.
    pub fn generate_report_card(&self, id: &str) -> Result<GeneratedReport, RecordsError> {
        let student = self.student(id)?;
        let card = ReportCard::build(&student, &self.marks());
        let path = card.write_to(&self.config.report_dir())?;
        info!("wrote report card for {} to {}", id, path.display());
        Ok(GeneratedReport { card, path })
    }
}
