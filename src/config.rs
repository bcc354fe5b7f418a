// Where the record files live and how much gets logged.

use log::LevelFilter;
use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "STUDENT_RECORDS_DIR";
pub const LOG_LEVEL_VAR: &str = "STUDENT_RECORDS_LOG";

const ADMIN_FILE: &str = "admin.txt";
const STUDENTS_FILE: &str = "students.txt";
const MARKS_FILE: &str = "marks.txt";
const REPORT_DIR: &str = "report_cards";
const LOG_FILE: &str = "student-records.log";

#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    log_level: LevelFilter,
}

impl Config {
    /// Build a config from `STUDENT_RECORDS_DIR` (default: the current
    /// directory, a leading `~` expands to the home directory) and
    /// `STUDENT_RECORDS_LOG` (default: `info`).
    pub fn from_env() -> Self {
        let data_dir = std::env::var(DATA_DIR_VAR)
            .map(|dir| expand_home(&dir))
            .unwrap_or_else(|_| PathBuf::from("."));
        let log_level = std::env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);
        Config {
            data_dir,
            log_level,
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            log_level: LevelFilter::Info,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn admin_file(&self) -> PathBuf {
        self.data_dir.join(ADMIN_FILE)
    }

    pub fn students_file(&self) -> PathBuf {
        self.data_dir.join(STUDENTS_FILE)
    }

    pub fn marks_file(&self) -> PathBuf {
        self.data_dir.join(MARKS_FILE)
    }

    pub fn report_dir(&self) -> PathBuf {
        self.data_dir.join(REPORT_DIR)
    }

    pub fn report_file(&self, student_id: &str) -> PathBuf {
        self.report_dir().join(format!("{}_report.txt", student_id))
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix("~") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(dir),
    }
}
