//! # Classroom API facade
//!
//! One typed method per remote operation, each performing a single blocking
//! HTTP call. List envelopes are unwrapped to plain vectors; nothing is
//! retried, cached, or paginated.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::classroom::types::{
    Course, CourseWork, ListCourseWorkResponse, ListCoursesResponse,
    ListStudentSubmissionsResponse, ListStudentsResponse, NewCourseWork, Student,
    StudentSubmission, SubmissionState, UserProfile,
};
use crate::client::CLIENT;
use crate::drive;
use crate::error::ClassroomError;

const CLASSROOM_BASE_URL: &str = "https://classroom.googleapis.com/v1";

/// Facade over the Classroom and Drive services. Holds the bearer token for
/// the process lifetime; one instance per invocation.
pub struct Classroom {
    token: String,
}

impl Classroom {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClassroomError> {
        debug!(url, "GET");
        let res = CLIENT
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;
        Self::parse(res)
    }

    fn parse<T: DeserializeOwned>(
        res: reqwest::blocking::Response,
    ) -> Result<T, ClassroomError> {
        if !res.status().is_success() {
            let status = res.status();
            let message = res.text().unwrap_or_default();
            return Err(ClassroomError::Api { status, message });
        }
        Ok(res.json::<T>()?)
    }

    pub fn list_courses(&self) -> Result<Vec<Course>, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses");
        let body: ListCoursesResponse = self.get(&url, &[])?;
        Ok(body.courses)
    }

    pub fn get_course(&self, course_id: &str) -> Result<Course, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}");
        self.get(&url, &[])
    }

    pub fn list_course_works(&self, course_id: &str) -> Result<Vec<CourseWork>, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}/courseWork");
        let body: ListCourseWorkResponse = self.get(&url, &[])?;
        Ok(body.course_work)
    }

    pub fn get_course_work(
        &self,
        course_id: &str,
        course_work_id: &str,
    ) -> Result<CourseWork, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}/courseWork/{course_work_id}");
        self.get(&url, &[])
    }

    /// Creates course work in `course_id` and returns the resource as echoed
    /// by the server, identifier included.
    pub fn create_course_work(
        &self,
        course_id: &str,
        course_work: &NewCourseWork,
    ) -> Result<CourseWork, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}/courseWork");
        debug!(url, title = course_work.title.as_str(), "POST");
        let res = CLIENT
            .post(&url)
            .bearer_auth(&self.token)
            .json(course_work)
            .send()?;
        Self::parse(res)
    }

    /// Lists submissions for one course work, optionally filtered
    /// server-side by state.
    pub fn list_student_submissions(
        &self,
        course_id: &str,
        course_work_id: &str,
        state: Option<SubmissionState>,
    ) -> Result<Vec<StudentSubmission>, ClassroomError> {
        let url = format!(
            "{CLASSROOM_BASE_URL}/courses/{course_id}/courseWork/{course_work_id}/studentSubmissions"
        );
        let query = submission_states_query(state);
        let body: ListStudentSubmissionsResponse = self.get(&url, &query)?;
        Ok(body.student_submissions)
    }

    pub fn get_student_submission(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
    ) -> Result<StudentSubmission, ClassroomError> {
        let url = format!(
            "{CLASSROOM_BASE_URL}/courses/{course_id}/courseWork/{course_work_id}/studentSubmissions/{submission_id}"
        );
        self.get(&url, &[])
    }

    pub fn list_students(&self, course_id: &str) -> Result<Vec<Student>, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}/students");
        let body: ListStudentsResponse = self.get(&url, &[])?;
        Ok(body.students)
    }

    /// Fetches one roster entry and returns its embedded profile.
    pub fn get_student(
        &self,
        course_id: &str,
        user_id: &str,
    ) -> Result<UserProfile, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/courses/{course_id}/students/{user_id}");
        let student: Student = self.get(&url, &[])?;
        Ok(student.profile)
    }

    pub fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ClassroomError> {
        let url = format!("{CLASSROOM_BASE_URL}/userProfiles/{user_id}");
        self.get(&url, &[])
    }

    /// Downloads the content of a submitted Drive file, failing with
    /// `FileTooLarge` once `max_file_size` bytes are exceeded.
    pub fn download_lab(
        &self,
        file_id: &str,
        max_file_size: u64,
    ) -> Result<Vec<u8>, ClassroomError> {
        drive::download_file(&self.token, file_id, max_file_size)
    }

    /// Sets the provisional, instructor-only grade on `submission`.
    pub fn patch_draft_grade(
        &self,
        submission: &StudentSubmission,
        grade: f64,
    ) -> Result<StudentSubmission, ClassroomError> {
        self.send_grade_patch(grade_patch(submission, "draftGrade", grade)?)
    }

    /// Sets the finalized grade visible to the student on `submission`.
    pub fn patch_assigned_grade(
        &self,
        submission: &StudentSubmission,
        grade: f64,
    ) -> Result<StudentSubmission, ClassroomError> {
        self.send_grade_patch(grade_patch(submission, "assignedGrade", grade)?)
    }

    fn send_grade_patch(&self, patch: GradePatch) -> Result<StudentSubmission, ClassroomError> {
        debug!(url = patch.url.as_str(), mask = patch.update_mask, "PATCH");
        let res = CLIENT
            .patch(&patch.url)
            .bearer_auth(&self.token)
            .query(&[("updateMask", patch.update_mask)])
            .json(&patch.body)
            .send()?;
        Self::parse(res)
    }
}

/// The `states` filter is present only when a state is given.
fn submission_states_query(state: Option<SubmissionState>) -> Vec<(&'static str, &'static str)> {
    match state {
        Some(state) => vec![("states", state.as_str())],
        None => Vec::new(),
    }
}

/// A prepared partial update against one submission. The update mask names
/// exactly one grade field; everything else in the body is excluded from
/// modification by the server.
struct GradePatch {
    url: String,
    update_mask: &'static str,
    body: Value,
}

fn grade_patch(
    submission: &StudentSubmission,
    field: &'static str,
    grade: f64,
) -> Result<GradePatch, ClassroomError> {
    let url = format!(
        "{CLASSROOM_BASE_URL}/courses/{}/courseWork/{}/studentSubmissions/{}",
        submission.course_id, submission.course_work_id, submission.id
    );
    let mut body = serde_json::to_value(submission)?;
    body[field] = grade.into();
    Ok(GradePatch {
        url,
        update_mask: field,
        body,
    })
}
