// Library root
// -----------
// Console student records manager: two roles (administrator, student),
// three comma-delimited record files and a per-student report card. The
// binary (`main.rs`) wires these modules into the interactive menus.
//
// Module responsibilities:
// - `validate`: pure field validators (ids, names, passwords, marks...).
// - `model`: the record types held in memory.
// - `store`: load/save of `admin.txt`, `students.txt` and `marks.txt`.
// - `records`: the operations (register, update, enroll, marks, ...).
// - `report`: grade bands and report cards.
// - `ui`: the `dialoguer` menus that drive `records`.
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod records;
pub mod report;
pub mod store;
pub mod ui;
pub mod validate;

pub use error::{RecordsError, ValidationError};
