// Flat-file persistence for the three record stores.
//
// Each store is read completely into memory and rewritten completely on
// save. Files are comma-delimited, one record per line, no header row.
// Load problems never fail: they produce a `LoadResult` with
// `used_fallback` set so callers can see the default was used.

use crate::config::Config;
use crate::error::RecordsError;
use crate::model::{format_score, AdminAccount, Department, MarkBook, Student};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{debug, warn};
use std::fs::{self, File};
use std::path::Path;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";

const COURSE_SEPARATOR: &str = ";";

/// Outcome of loading a store. `used_fallback` is true when the file
/// could not be read or parsed and `data` is the store's default instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult<T> {
    pub data: T,
    pub used_fallback: bool,
}

impl<T> LoadResult<T> {
    fn loaded(data: T) -> Self {
        LoadResult {
            data,
            used_fallback: false,
        }
    }

    fn fallback(data: T) -> Self {
        LoadResult {
            data,
            used_fallback: true,
        }
    }
}

pub fn default_admins() -> Vec<AdminAccount> {
    vec![AdminAccount::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)]
}

/// Create the data directory and any missing store files. Existing files
/// are left untouched.
pub fn initialize(config: &Config) -> Result<(), RecordsError> {
    fs::create_dir_all(config.data_dir())?;

    let admin_file = config.admin_file();
    if !admin_file.exists() {
        save_admins(&admin_file, &default_admins())?;
        debug!("created {} with the default account", admin_file.display());
    }
    for path in [config.students_file(), config.marks_file()] {
        if !path.exists() {
            File::create(&path)?;
            debug!("created empty {}", path.display());
        }
    }
    fs::create_dir_all(config.report_dir())?;
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<StringRecord>, csv::Error> {
    let records = read_with_quoting(path, true)?;
    // Files written without quoting may hold a field that merely starts
    // with `"`; quoted parsing then swallows the following lines.
    if records.iter().flatten().any(|field| field.contains(|c: char| c == '\n' || c == '\r')) {
        warn!("{} is not quoted csv, reading fields verbatim", path.display());
        return read_with_quoting(path, false);
    }
    Ok(records)
}

fn read_with_quoting(path: &Path, quoting: bool) -> Result<Vec<StringRecord>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(quoting)
        .from_path(path)?;
    reader.records().collect()
}

fn writer(path: &Path) -> Result<csv::Writer<File>, csv::Error> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
}

pub fn load_admins(path: &Path) -> LoadResult<Vec<AdminAccount>> {
    match try_load_admins(path) {
        Ok(admins) => LoadResult::loaded(admins),
        Err(reason) => {
            warn!(
                "admin store {} unusable ({}), using the default account",
                path.display(),
                reason
            );
            LoadResult::fallback(default_admins())
        }
    }
}

fn try_load_admins(path: &Path) -> Result<Vec<AdminAccount>, String> {
    let records = read_records(path).map_err(|e| e.to_string())?;
    let mut admins: Vec<AdminAccount> = Vec::with_capacity(records.len());
    for record in records {
        if record.len() != 2 {
            return Err(format!("expected 2 fields, found {}", record.len()));
        }
        let account: AdminAccount = record.deserialize(None).map_err(|e| e.to_string())?;
        match admins.iter_mut().find(|a| a.username == account.username) {
            Some(existing) => existing.password = account.password,
            None => admins.push(account),
        }
    }
    Ok(admins)
}

pub fn save_admins(path: &Path, admins: &[AdminAccount]) -> Result<(), RecordsError> {
    let mut wtr = writer(path)?;
    for account in admins {
        wtr.serialize(account)?;
    }
    wtr.flush()?;
    debug!("saved {} admin account(s) to {}", admins.len(), path.display());
    Ok(())
}

pub fn load_students(path: &Path) -> LoadResult<Vec<Student>> {
    let records = match read_records(path) {
        Ok(records) => records,
        Err(e) => {
            warn!("student store {} unreadable ({}), starting empty", path.display(), e);
            return LoadResult::fallback(Vec::new());
        }
    };

    let mut students: Vec<Student> = Vec::with_capacity(records.len());
    for record in &records {
        let Some(student) = parse_student(record) else {
            continue;
        };
        match students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => *existing = student,
            None => students.push(student),
        }
    }
    LoadResult::loaded(students)
}

fn parse_student(record: &StringRecord) -> Option<Student> {
    if record.len() < 5 {
        debug!("skipping short student line {:?}", record);
        return None;
    }
    let id = &record[0];
    let Some(department) = Department::parse(&record[2]) else {
        warn!("keeping student {} as-is: unknown department {:?}", id, &record[2]);
        return None;
    };
    let courses = match record.get(5) {
        Some(field) if !field.is_empty() => {
            field.split(COURSE_SEPARATOR).map(str::to_string).collect()
        }
        _ => Vec::new(),
    };
    Some(Student {
        id: id.to_string(),
        name: record[1].to_string(),
        department,
        semester: record[3].to_string(),
        password: record[4].to_string(),
        courses,
    })
}

/// Rows with all five fields that still do not load as a `Student`.
/// They are written back unchanged by `save_students`.
fn uninterpreted_students(path: &Path) -> Vec<StringRecord> {
    read_records(path)
        .map(|records| {
            records
                .into_iter()
                .filter(|r| r.len() >= 5 && parse_student(r).is_none())
                .collect()
        })
        .unwrap_or_default()
}

/// Rewrite the student store from `students`. Rows already in the file
/// that could not be interpreted on load are carried over after them.
pub fn save_students(path: &Path, students: &[Student]) -> Result<(), RecordsError> {
    let carried = uninterpreted_students(path);
    let mut wtr = writer(path)?;
    for s in students {
        let courses = s.courses.join(COURSE_SEPARATOR);
        wtr.write_record([
            s.id.as_str(),
            s.name.as_str(),
            s.department.as_str(),
            s.semester.as_str(),
            s.password.as_str(),
            courses.as_str(),
        ])?;
    }
    for record in &carried {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    debug!(
        "saved {} student(s) and {} uninterpreted row(s) to {}",
        students.len(),
        carried.len(),
        path.display()
    );
    Ok(())
}

pub fn load_marks(path: &Path) -> LoadResult<MarkBook> {
    match try_load_marks(path) {
        Ok(book) => LoadResult::loaded(book),
        Err(reason) => {
            warn!("marks store {} unusable ({}), starting empty", path.display(), reason);
            LoadResult::fallback(MarkBook::new())
        }
    }
}

fn try_load_marks(path: &Path) -> Result<MarkBook, String> {
    let records = read_records(path).map_err(|e| e.to_string())?;
    let mut book = MarkBook::new();
    for record in records.iter().filter(|r| r.len() >= 3) {
        let score: f64 = record[2]
            .trim()
            .parse()
            .map_err(|_| format!("bad score {:?} for {}", &record[2], &record[0]))?;
        book.set(&record[0], &record[1], score);
    }
    Ok(book)
}

pub fn save_marks(path: &Path, marks: &MarkBook) -> Result<(), RecordsError> {
    let mut wtr = writer(path)?;
    for record in marks.iter() {
        let score = format_score(record.score);
        wtr.write_record([
            record.student_id.as_str(),
            record.course.as_str(),
            score.as_str(),
        ])?;
    }
    wtr.flush()?;
    debug!("saved {} mark record(s) to {}", marks.len(), path.display());
    Ok(())
}
