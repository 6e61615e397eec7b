use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Typed mirrors of the Classroom REST resources. Only the fields this tool
// reads or writes are named; everything else rides along in the flattened
// `extra` map so partial-update bodies round-trip faithfully.

/// Status of a student submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    SubmissionStateUnspecified,
    New,
    Created,
    TurnedIn,
    Returned,
    ReclaimedByStudent,
}

impl SubmissionState {
    /// Wire name, as used in the `states` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmissionStateUnspecified => "SUBMISSION_STATE_UNSPECIFIED",
            Self::New => "NEW",
            Self::Created => "CREATED",
            Self::TurnedIn => "TURNED_IN",
            Self::Returned => "RETURNED",
            Self::ReclaimedByStudent => "RECLAIMED_BY_STUDENT",
        }
    }
}

/// Kind of course work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseWorkType {
    CourseWorkTypeUnspecified,
    Assignment,
    ShortAnswerQuestion,
    MultipleChoiceQuestion,
}

/// Publication state of course work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseWorkState {
    CourseWorkStateUnspecified,
    Published,
    Draft,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    pub course_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<CourseWorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<CourseWorkState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating course work. The server assigns the identifier
/// and echoes the created resource back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseWork {
    pub title: String,
    pub work_type: CourseWorkType,
    pub state: CourseWorkState,
    pub max_points: f64,
}

impl NewCourseWork {
    /// A published `ASSIGNMENT` with the given title and point value.
    pub fn assignment(title: impl Into<String>, max_points: f64) -> Self {
        Self {
            title: title.into(),
            work_type: CourseWorkType::Assignment,
            state: CourseWorkState::Published,
            max_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubmission {
    pub id: String,
    pub course_id: String,
    pub course_work_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SubmissionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_submission: Option<AssignmentSubmission>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentSubmission {
    /// The first attached Drive file, when the submission carries one.
    pub fn drive_file(&self) -> Option<&DriveFile> {
        self.assignment_submission
            .as_ref()?
            .attachments
            .iter()
            .find_map(|a| a.drive_file.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSubmission {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_file: Option<DriveFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_link: Option<String>,
}

/// Roster entry tying a user profile to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub course_id: String,
    pub user_id: String,
    pub profile: UserProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

// List envelopes. The collection fields default to empty so a response that
// omits them yields an empty vector, not an error. Pagination tokens are
// carried but never followed.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    #[serde(default)]
    pub courses: Vec<Course>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCourseWorkResponse {
    #[serde(default)]
    pub course_work: Vec<CourseWork>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentSubmissionsResponse {
    #[serde(default)]
    pub student_submissions: Vec<StudentSubmission>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsResponse {
    #[serde(default)]
    pub students: Vec<Student>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_states_use_wire_names() {
        assert_eq!(
            serde_json::to_value(SubmissionState::TurnedIn).unwrap(),
            json!("TURNED_IN")
        );
        assert_eq!(
            serde_json::to_value(SubmissionState::ReclaimedByStudent).unwrap(),
            json!("RECLAIMED_BY_STUDENT")
        );
        assert_eq!(SubmissionState::TurnedIn.as_str(), "TURNED_IN");
    }

    #[test]
    fn missing_collections_deserialize_empty() {
        let body: ListCoursesResponse = serde_json::from_str("{}").unwrap();
        assert!(body.courses.is_empty());
        let body: ListCourseWorkResponse = serde_json::from_str("{}").unwrap();
        assert!(body.course_work.is_empty());
        let body: ListStudentSubmissionsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.student_submissions.is_empty());
        let body: ListStudentsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.students.is_empty());
    }

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let raw = json!({
            "id": "c1",
            "name": "Systems Programming",
            "courseState": "ACTIVE",
            "alternateLink": "https://classroom.google.com/c/c1",
            "enrollmentCode": "abc123"
        });
        let course: Course = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(course.extra["enrollmentCode"], json!("abc123"));
        assert_eq!(serde_json::to_value(&course).unwrap(), raw);
    }

    #[test]
    fn drive_file_found_through_attachments() {
        let submission: StudentSubmission = serde_json::from_value(json!({
            "id": "sub1",
            "courseId": "c1",
            "courseWorkId": "cw1",
            "assignmentSubmission": {
                "attachments": [
                    {"link": {"url": "https://example.com"}},
                    {"driveFile": {"id": "file9", "title": "lab.zip"}}
                ]
            }
        }))
        .unwrap();
        assert_eq!(submission.drive_file().unwrap().id, "file9");
    }

    #[test]
    fn submission_without_attachments_has_no_drive_file() {
        let submission: StudentSubmission = serde_json::from_value(json!({
            "id": "sub1",
            "courseId": "c1",
            "courseWorkId": "cw1"
        }))
        .unwrap();
        assert!(submission.drive_file().is_none());
    }
}
