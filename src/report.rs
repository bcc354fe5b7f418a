// Grade bands and the per-student report card.

use crate::error::RecordsError;
use crate::model::{format_score, MarkBook, Student};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Each band includes its lower bound.
pub fn compute_grade(score: f64) -> Grade {
    if score >= 90.0 {
        Grade::APlus
    } else if score >= 80.0 {
        Grade::A
    } else if score >= 70.0 {
        Grade::B
    } else if score >= 60.0 {
        Grade::C
    } else if score >= 50.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// One enrolled course and its mark, `None` when no mark was entered.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseResult {
    pub course: String,
    pub score: Option<f64>,
}

impl CourseResult {
    pub fn marks(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    pub fn grade(&self) -> Grade {
        compute_grade(self.marks())
    }
}

impl fmt::Display for CourseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A missing mark prints as a bare 0.
        let marks = match self.score {
            Some(score) => format_score(score),
            None => "0".to_string(),
        };
        write!(f, "Course: {}, Marks: {}, Grade: {}", self.course, marks, self.grade())
    }
}

/// Results for every course `student` is enrolled in, in enrollment order.
pub fn course_results(student: &Student, marks: &MarkBook) -> Vec<CourseResult> {
    student
        .courses
        .iter()
        .map(|course| CourseResult {
            course: course.clone(),
            score: marks.score(&student.id, course),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub student_id: String,
    pub name: String,
    pub department: String,
    pub semester: String,
    pub courses: Vec<CourseResult>,
}

impl ReportCard {
    pub fn build(student: &Student, marks: &MarkBook) -> Self {
        ReportCard {
            student_id: student.id.clone(),
            name: student.name.clone(),
            department: student.department.to_string(),
            semester: student.semester.clone(),
            courses: course_results(student, marks),
        }
    }

    /// Mean mark over enrolled courses, 0 when there are none.
    pub fn percentage(&self) -> f64 {
        if self.courses.is_empty() {
            return 0.0;
        }
        let total: f64 = self.courses.iter().map(CourseResult::marks).sum();
        total / self.courses.len() as f64
    }

    /// Write the rendered card to `<dir>/<id>_report.txt`, replacing any
    /// earlier one.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, RecordsError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_report.txt", self.student_id));
        fs::write(&path, self.to_string())?;
        Ok(path)
    }
}

impl fmt::Display for ReportCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Card for {} (ID: {})", self.name, self.student_id)?;
        writeln!(f, "Department: {}", self.department)?;
        writeln!(f, "Semester: {}", self.semester)?;
        writeln!(f, "Courses and Grades:")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for course in &self.courses {
            writeln!(f, "{}", course)?;
        }
        writeln!(f, "Percentage: {:.2}%", self.percentage())
    }
}
