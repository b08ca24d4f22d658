//! In-memory entity store.
//!
//! The store is the source of truth for all application data and lives for the process lifetime.

mod repository;

pub use repository::*;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    AssignmentGroup, DocumentFile, DocumentType, NotificationMessage, Semester, Unit, User,
};

/// The five entity collections, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub semesters: Vec<Semester>,
    pub units: Vec<Unit>,
    pub documents: Vec<DocumentFile>,
    pub groups: Vec<AssignmentGroup>,
    pub notifications: Vec<NotificationMessage>,
}

const DUMMY_PDF: &str = "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

fn semester(id: &str, name: &str, creator: &User) -> Semester {
    Semester {
        id: id.to_string(),
        name: name.to_string(),
        is_public: true,
        created_by: creator.to_ref(),
    }
}

fn unit(id: &str, name: &str, semester_id: &str) -> Unit {
    Unit {
        id: id.to_string(),
        name: name.to_string(),
        semester_id: semester_id.to_string(),
        description: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &str,
    name: &str,
    kind: DocumentType,
    url: &str,
    uploaded_at: DateTime<Utc>,
    semester_id: &str,
    unit_id: &str,
    size: &str,
) -> DocumentFile {
    DocumentFile {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        url: url.to_string(),
        uploaded_at,
        semester_id: semester_id.to_string(),
        unit_id: unit_id.to_string(),
        size: Some(size.to_string()),
    }
}

fn group(
    id: &str,
    assignment_name: &str,
    max_size: usize,
    members: Vec<&User>,
    creator: &User,
    semester_id: &str,
    unit_id: &str,
) -> AssignmentGroup {
    AssignmentGroup {
        id: id.to_string(),
        assignment_name: assignment_name.to_string(),
        max_size,
        members: members.into_iter().map(User::to_ref).collect(),
        created_by: creator.to_ref(),
        unit_id: Some(unit_id.to_string()),
        semester_id: Some(semester_id.to_string()),
    }
}

fn notification(
    id: &str,
    title: &str,
    description: &str,
    timestamp: DateTime<Utc>,
    read: bool,
    link: Option<&str>,
) -> NotificationMessage {
    NotificationMessage {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        timestamp,
        read,
        link: link.map(str::to_string),
    }
}

/// Build the fixed demo data the portal starts with.
pub fn seed_tables() -> Tables {
    let student = User::demo_student();
    let rep = User::demo_class_representative();

    let semesters = vec![
        semester("sem1", "Semester 1", &rep),
        semester("sem2", "Semester 2", &rep),
        semester("sem3", "Semester 3", &rep),
    ];

    let units = vec![
        unit("unit101", "Introduction to Programming", "sem1"),
        unit("unit102", "Calculus I", "sem1"),
        unit("unit201", "Data Structures", "sem2"),
        unit("unit202", "Linear Algebra", "sem2"),
        unit("unit301", "Algorithms", "sem3"),
    ];

    #[rustfmt::skip]
    let documents = vec![
        document("doc001", "Syllabus.pdf", DocumentType::Pdf, DUMMY_PDF, at(2023, 9, 1, 10, 0), "sem1", "unit101", "1.2MB"),
        document("doc002", "Lecture 1 Notes.pdf", DocumentType::Pdf, DUMMY_PDF, at(2023, 9, 5, 14, 30), "sem1", "unit101", "2.5MB"),
        document("doc003", "Assignment 1.docx", DocumentType::Docx, "#", at(2023, 9, 10, 10, 0), "sem1", "unit101", "0.5MB"),
        document("doc004", "Calculus Basics.pdf", DocumentType::Pdf, DUMMY_PDF, at(2023, 9, 2, 11, 0), "sem1", "unit102", "3.1MB"),
        document("doc005", "Advanced Data Structures.pdf", DocumentType::Pdf, DUMMY_PDF, at(2024, 1, 15, 9, 0), "sem2", "unit201", "4.0MB"),
        document("doc006", "Introductory Video.mp4", DocumentType::Video, "#", at(2023, 9, 1, 10, 0), "sem1", "unit101", "50.2MB"),
    ];

    #[rustfmt::skip]
    let groups = vec![
        group("group001", "Project Alpha - Programming", 4, vec![&student], &rep, "sem1", "unit101"),
        group("group002", "Calculus Problem Set 1", 3, vec![], &rep, "sem1", "unit102"),
        group("group003", "Data Structures Lab 2", 2, vec![], &rep, "sem2", "unit201"),
    ];

    let notifications = vec![
        notification(
            "notif001",
            "New Document Uploaded",
            "Syllabus.pdf was added to Introduction to Programming.",
            at(2023, 9, 1, 10, 5),
            false,
            Some("/documents/sem1/unit101"),
        ),
        notification(
            "notif002",
            "Group Created",
            "A new group for Project Alpha has been created.",
            at(2023, 9, 2, 15, 0),
            true,
            Some("/groups"),
        ),
        notification(
            "notif003",
            "Assignment Reminder",
            "Assignment 1 for Introduction to Programming is due soon.",
            at(2023, 9, 15, 9, 0),
            false,
            None,
        ),
    ];

    Tables {
        semesters,
        units,
        documents,
        groups,
        notifications,
    }
}
