// UI layer: numbered menus built with `dialoguer`. Each handler collects
// the fields an operation needs, calls into `Records` and prints the
// outcome, then returns to the menu it came from.

use crate::model::Role;
use crate::records::{NewStudent, Records, Session, StudentUpdate};
use crate::validate::{validate_student_id, validate_username};
use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::ExecutableCommand;
use dialoguer::{Input, Password, Select};
use std::fmt::Display;
use std::io;

/// Top-level menu. Runs until the user picks "Exit" or interrupts with
/// Ctrl-C, which ends the program with a farewell instead of an error.
pub fn main_menu(records: Records) -> Result<()> {
    loop {
        match top_level(&records) {
            Ok(true) => continue,
            Ok(false) => {
                println!("Goodbye!");
                break;
            }
            Err(e) if is_interrupt(&e) => {
                // dialoguer hides the cursor while a prompt is active
                let _ = io::stdout().execute(crossterm::cursor::Show);
                println!("\nProgram terminated by user. Goodbye!");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::Interrupted)
}

/// One pass through the role selection. Returns `false` on "Exit".
fn top_level(records: &Records) -> Result<bool> {
    println!("\nStudent Management System");
    let items = ["1. Admin Login", "2. Student Login", "3. Student Registration", "4. Exit"];
    let selection = Select::new()
        .with_prompt("Select user type")
        .items(&items)
        .default(0)
        .interact()?;
    match selection {
        0 => {
            if let Some(Session::Admin(_)) = handle_login(records, Role::Admin)? {
                admin_menu(records)?;
            }
        }
        1 => {
            if let Some(Session::Student(id)) = handle_login(records, Role::Student)? {
                student_menu(records, &id)?;
            }
        }
        2 => handle_register_student(records)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn success(message: impl Display) {
    println!("{}", message.to_string().green());
}

fn failure(message: impl Display) {
    println!("{}", message.to_string().red());
}

fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

/// Like `text` but an empty answer is allowed.
fn optional_text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn secret(prompt: &str) -> Result<String> {
    Ok(Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

fn handle_login(records: &Records, role: Role) -> Result<Option<Session>> {
    let (user, format) = match role {
        Role::Admin => {
            let user = text("Enter admin username")?;
            let format = validate_username(&user);
            (user, format)
        }
        Role::Student => {
            let user = text("Enter student ID")?;
            let format = validate_student_id(&user);
            (user, format)
        }
    };
    // Reject a malformed name before asking for the password.
    if let Err(e) = format {
        failure(e);
        return Ok(None);
    }
    let password = secret("Enter password")?;
    match records.login(role, &user, &password) {
        Ok(session) => {
            success(format!("{} login successful!", capitalize(&role.to_string())));
            Ok(Some(session))
        }
        Err(e) => {
            failure(e);
            Ok(None)
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn admin_menu(records: &Records) -> Result<()> {
    let items = [
        "1. Register New Admin",
        "2. Add Student",
        "3. Update Student",
        "4. Delete Student",
        "5. Enroll Student in Course",
        "6. Enter Marks",
        "7. View All Students",
        "8. Generate Report Card",
        "9. Logout",
    ];
    loop {
        println!("\nAdmin Menu:");
        let selection = Select::new()
            .with_prompt("Enter choice")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => handle_register_admin(records)?,
            1 => handle_register_student(records)?,
            2 => handle_update_student(records)?,
            3 => handle_delete_student(records)?,
            4 => handle_enroll(records)?,
            5 => handle_enter_marks(records)?,
            6 => handle_view_students(records),
            7 => {
                let id = text("Enter student ID")?;
                handle_report(records, &id);
            }
            _ => {
                println!("Logged out!");
                return Ok(());
            }
        }
    }
}

fn handle_register_admin(records: &Records) -> Result<()> {
    println!("\nAdmin Registration");
    let username = text("Enter new admin username")?;
    let password = secret("Enter new admin password")?;
    let confirm = secret("Confirm password")?;
    match records.register_admin(&username, &password, &confirm) {
        Ok(()) => success("Admin registered successfully!"),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_register_student(records: &Records) -> Result<()> {
    println!("\nStudent Registration");
    let new = NewStudent {
        id: text("Enter student ID")?,
        name: text("Enter student name")?,
        department: text("Enter department (CS/EE/ME/CE/IT)")?,
        semester: text("Enter semester (1-8)")?,
        password: secret("Enter student password")?,
        confirm_password: secret("Confirm password")?,
    };
    match records.register_student(&new) {
        Ok(_) => success("Student registered successfully!"),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_update_student(records: &Records) -> Result<()> {
    let id = text("Enter student ID to update")?;
    // Fail early instead of asking for fields of a student that isn't there.
    if let Err(e) = records.student(&id) {
        failure(e);
        return Ok(());
    }
    let keep = "(or press Enter to keep unchanged)";
    let mut update = StudentUpdate {
        name: Some(optional_text(&format!("Enter new name {}", keep))?),
        department: Some(optional_text(&format!("Enter new department {}", keep))?),
        semester: Some(optional_text(&format!("Enter new semester {}", keep))?),
        password: Some(secret(&format!("Enter new password {}", keep))?),
        confirm_password: None,
    };
    if update.password.as_deref().is_some_and(|p| !p.is_empty()) {
        update.confirm_password = Some(secret("Confirm new password")?);
    }
    match records.update_student(&id, &update) {
        Ok(_) => success("Student updated successfully!"),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_delete_student(records: &Records) -> Result<()> {
    let id = text("Enter student ID to delete")?;
    match records.delete_student(&id) {
        Ok(_) => success("Student deleted successfully!"),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_enroll(records: &Records) -> Result<()> {
    let id = text("Enter student ID")?;
    let course = text("Enter course code")?;
    match records.enroll_student(&id, &course) {
        Ok(()) => success(format!("Student enrolled in {}!", course)),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_enter_marks(records: &Records) -> Result<()> {
    let id = text("Enter student ID")?;
    let course = text("Enter course code")?;
    let score = text("Enter marks (0-100)")?;
    match records.enter_marks(&id, &course, &score) {
        Ok(_) => success("Marks entered successfully!"),
        Err(e) => failure(e),
    }
    Ok(())
}

fn handle_view_students(records: &Records) {
    let students = records.view_students();
    if students.is_empty() {
        println!("No students found!");
        return;
    }
    for student in &students {
        println!("{}", student.summary());
    }
}

fn handle_report(records: &Records, id: &str) {
    match records.generate_report_card(id) {
        Ok(report) => {
            println!("{}", report.card);
            success(format!("Report card saved to {}", report.path.display()));
        }
        Err(e) => failure(e),
    }
}

fn student_menu(records: &Records, id: &str) -> Result<()> {
    let items = [
        "1. View Profile",
        "2. View Courses",
        "3. View Grades",
        "4. View Report Card",
        "5. Logout",
    ];
    loop {
        println!("\nStudent Menu:");
        let selection = Select::new()
            .with_prompt("Enter choice")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => match records.student(id) {
                Ok(student) => println!("{}", student.summary()),
                Err(e) => failure(e),
            },
            1 => match records.student_courses(id) {
                Ok(courses) => println!("Courses: {}", courses.join(", ")),
                Err(e) => failure(e),
            },
            2 => match records.student_grades(id) {
                Ok(grades) => {
                    for result in &grades {
                        println!("{}", result);
                    }
                }
                Err(e) => failure(e),
            },
            3 => handle_report(records, id),
            _ => {
                println!("Logged out!");
                return Ok(());
            }
        }
    }
}
