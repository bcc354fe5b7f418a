// Record types held by the three stores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Student => f.write_str("student"),
        }
    }
}

/// One line of `admin.txt`. Field order matches the file layout so the
/// struct can be written and read positionally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
}

impl AdminAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Cs,
    Ee,
    Me,
    Ce,
    It,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Cs,
        Department::Ee,
        Department::Me,
        Department::Ce,
        Department::It,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Cs => "CS",
            Department::Ee => "EE",
            Department::Me => "ME",
            Department::Ce => "CE",
            Department::It => "IT",
        }
    }

    /// Case-insensitive lookup of a department code.
    pub fn parse(code: &str) -> Option<Self> {
        let upper = code.to_uppercase();
        Self::ALL.into_iter().find(|d| d.as_str() == upper)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub department: Department,
    /// Semester as entered, already checked to be 1-8.
    pub semester: String,
    pub password: String,
    /// Course codes in enrollment order, no duplicates.
    pub courses: Vec<String>,
}

impl Student {
    pub fn is_enrolled(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }

    /// Appends `course` unless already present. Returns whether it was added.
    pub fn enroll(&mut self, course: &str) -> bool {
        if self.is_enrolled(course) {
            return false;
        }
        self.courses.push(course.to_string());
        true
    }

    /// The one-line summary shown by the student listing and profile view.
    pub fn summary(&self) -> String {
        format!(
            "ID: {}, Name: {}, Dept: {}, Semester: {}",
            self.id, self.name, self.department, self.semester
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkRecord {
    pub student_id: String,
    pub course: String,
    pub score: f64,
}

/// Decimal form used for stored and reported scores: shortest round-trip
/// representation, always with a fractional part (`85.0`, `72.5`).
pub fn format_score(score: f64) -> String {
    format!("{:?}", score)
}

/// All mark records, grouped per student in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkBook {
    records: Vec<MarkRecord>,
}

impl MarkBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkRecord> {
        self.records.iter()
    }

    pub fn score(&self, student_id: &str, course: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.student_id == student_id && r.course == course)
            .map(|r| r.score)
    }

    /// Sets or overwrites the score for `(student_id, course)`. A new course
    /// for a known student is placed after that student's other records.
    pub fn set(&mut self, student_id: &str, course: &str, score: f64) {
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|r| r.student_id == student_id && r.course == course)
        {
            existing.score = score;
            return;
        }
        let record = MarkRecord {
            student_id: student_id.to_string(),
            course: course.to_string(),
            score,
        };
        match self.records.iter().rposition(|r| r.student_id == student_id) {
            Some(last) => self.records.insert(last + 1, record),
            None => self.records.push(record),
        }
    }

    /// Drops every record of `student_id`, returning how many were removed.
    pub fn remove_student(&mut self, student_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.student_id != student_id);
        before - self.records.len()
    }
}
