use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::{MultipartBody, Resource, Upload};
use crate::utils::parse_time_range;
use crate::validation::{self, FieldErrors, Validate};

/// A scheduled class of a live or physical course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSession {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub session_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub course_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSessionForm {
    #[schema(example = "Live Q&A")]
    pub session_name: String,
    pub description: String,
    #[schema(example = "2030-03-01")]
    pub date: String,
    #[schema(example = "10:00 AM - 11:30 AM")]
    pub time: String,
    #[serde(default)]
    pub meeting_link: Option<String>,
    pub course_id: String,
    #[serde(skip)]
    pub image: Option<Upload>,
}

impl Validate for CourseSessionForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "sessionName",
            validation::length(&self.session_name, "Session name", 3, 100),
        );
        errors.check(
            "description",
            validation::length(&self.description, "Description", 10, 1000),
        );
        errors.check("date", validation::date(&self.date, "Date").map(|_| ()));
        errors.check("time", parse_time_range(&self.time).map(|_| ()));
        if let Some(link) = self.meeting_link.as_deref().filter(|l| !l.trim().is_empty()) {
            errors.check("meetingLink", validation::url(link, "Meeting link"));
        }
        errors.check("courseId", validation::required(&self.course_id, "Course"));
        errors.into_result()
    }
}

pub struct CourseSessions;

impl Resource for CourseSessions {
    const PATH: &'static str = "session";
    const SLUG: &'static str = "sessions";
    const LABEL: &'static str = "Session";

    const UPLOAD_FIELD: Option<&'static str> = Some("image");

    type Item = CourseSession;
    type Form = CourseSessionForm;

    fn id(item: &CourseSession) -> &str {
        &item.id
    }

    fn search_fields(item: &CourseSession) -> Vec<&str> {
        vec![&item.session_name, &item.description]
    }

    fn edit_form(item: &CourseSession) -> Option<CourseSessionForm> {
        Some(CourseSessionForm {
            session_name: item.session_name.clone(),
            description: item.description.clone(),
            date: item.date.chars().take(10).collect(),
            time: item.time.clone(),
            meeting_link: item.meeting_link.clone(),
            course_id: item.course_id.clone(),
            image: None,
        })
    }

    fn attach(form: &mut CourseSessionForm, upload: Upload) {
        form.image = Some(upload);
    }

    fn multipart(form: &CourseSessionForm) -> Option<MultipartBody> {
        Some(
            MultipartBody::default()
                .text("sessionName", form.session_name.trim())
                .text("description", form.description.trim())
                .text("date", form.date.trim())
                .text("time", form.time.trim())
                .text_opt(
                    "meetingLink",
                    form.meeting_link.as_deref().filter(|l| !l.trim().is_empty()),
                )
                .text("courseId", &form.course_id)
                .file("image", form.image.as_ref()),
        )
    }
}
