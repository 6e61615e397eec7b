use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classgrade::auth;
use classgrade::classroom::{Classroom, NewCourseWork};

/// Service-account key, expected in the working directory.
const CREDENTIALS_PATH: &str = "credentials.json";
/// Identity to impersonate for delegated access.
const SUBJECT_PATH: &str = "subject.txt";

const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "classgrade",
    about = "Course, submission, and grading operations on Google Classroom"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Command {
    /// List the courses visible to the impersonated user
    ListCourses,
    /// Show one course
    GetCourse { course_id: String },
    /// List the course work of a course
    ListCourseWorks { course_id: String },
    /// Create a published assignment
    CreateCourseWork {
        course_id: String,
        /// CourseWork title
        title: String,
        /// Max points
        #[arg(long, default_value_t = 100.0)]
        max_points: f64,
    },
    /// List student submissions for one course work
    ListSubmissions {
        course_id: String,
        course_work_id: String,
    },
    /// Show one student submission
    GetSubmission {
        course_id: String,
        course_work_id: String,
        submission_id: String,
    },
    /// List the students on a course roster
    ListStudents { course_id: String },
    /// Show a user profile
    GetUserProfile { user_id: String },
    /// Download a submitted Drive file
    DownloadLab {
        file_id: String,
        /// Abort once the download exceeds this many bytes
        #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
        max_size: u64,
        /// Write the bytes here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Set the provisional, instructor-only grade on a submission
    SetDraftGrade {
        course_id: String,
        course_work_id: String,
        submission_id: String,
        grade: f64,
    },
    /// Set the finalized grade visible to the student
    SetAssignedGrade {
        course_id: String,
        course_work_id: String,
        submission_id: String,
        grade: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "classgrade=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let subject = auth::read_subject(Path::new(SUBJECT_PATH))?;
    let token = auth::access_token(Path::new(CREDENTIALS_PATH), &subject)?;
    let classroom = Classroom::new(token);

    match args.command {
        Command::ListCourses => print_result(&classroom.list_courses()?),
        Command::GetCourse { course_id } => print_result(&classroom.get_course(&course_id)?),
        Command::ListCourseWorks { course_id } => {
            print_result(&classroom.list_course_works(&course_id)?)
        }
        Command::CreateCourseWork {
            course_id,
            title,
            max_points,
        } => {
            let course_work = NewCourseWork::assignment(title, max_points);
            print_result(&classroom.create_course_work(&course_id, &course_work)?);
        }
        Command::ListSubmissions {
            course_id,
            course_work_id,
        } => print_result(&classroom.list_student_submissions(&course_id, &course_work_id, None)?),
        Command::GetSubmission {
            course_id,
            course_work_id,
            submission_id,
        } => print_result(&classroom.get_student_submission(
            &course_id,
            &course_work_id,
            &submission_id,
        )?),
        Command::ListStudents { course_id } => {
            print_result(&classroom.list_students(&course_id)?)
        }
        Command::GetUserProfile { user_id } => {
            print_result(&classroom.get_user_profile(&user_id)?)
        }
        Command::DownloadLab {
            file_id,
            max_size,
            output,
        } => {
            let bytes = classroom.download_lab(&file_id, max_size)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)?;
                    info!(bytes = bytes.len(), path = %path.display(), "wrote file");
                }
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
        Command::SetDraftGrade {
            course_id,
            course_work_id,
            submission_id,
            grade,
        } => {
            let submission =
                classroom.get_student_submission(&course_id, &course_work_id, &submission_id)?;
            print_result(&classroom.patch_draft_grade(&submission, grade)?);
        }
        Command::SetAssignedGrade {
            course_id,
            course_work_id,
            submission_id,
            grade,
        } => {
            let submission =
                classroom.get_student_submission(&course_id, &course_work_id, &submission_id)?;
            print_result(&classroom.patch_assigned_grade(&submission, grade)?);
        }
    }
    Ok(())
}

/// Prints a command result as indented JSON, falling back to the debug form
/// when the value does not serialize.
fn print_result<T: Serialize + std::fmt::Debug>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{:?}", value),
    }
}
