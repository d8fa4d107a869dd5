use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::{MultipartBody, Resource, Upload};
use crate::validation::{self, FieldErrors, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Recorded,
    Live,
    Physical,
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseType::Recorded => write!(f, "recorded"),
            CourseType::Live => write!(f, "live"),
            CourseType::Physical => write!(f, "physical"),
        }
    }
}

impl CourseType {
    /// Live and physical courses run on a schedule.
    pub fn is_scheduled(self) -> bool {
        !matches!(self, CourseType::Recorded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[schema(example = "Options Masterclass")]
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    pub instructor: String,
    #[schema(example = "English")]
    pub language: String,
    pub price: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    /// Course image. Only attached from an uploaded file part.
    #[serde(skip)]
    pub image: Option<Upload>,
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Validate for CourseForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("name", validation::length(&self.name, "Course name", 3, 100));
        errors.check(
            "description",
            validation::length(&self.description, "Description", 10, 2000),
        );
        errors.check(
            "instructor",
            validation::length(&self.instructor, "Instructor", 2, 100),
        );
        errors.check("language", validation::required(&self.language, "Language"));
        errors.check("price", validation::at_least(self.price, "Price", 0.0));

        let start = match filled(&self.start_date) {
            Some(v) => match validation::date(v, "Start date") {
                Ok(d) => Some(d),
                Err(e) => {
                    errors.add("startDate", e);
                    None
                }
            },
            None => None,
        };
        let end = match filled(&self.end_date) {
            Some(v) => match validation::date(v, "End date") {
                Ok(d) => Some(d),
                Err(e) => {
                    errors.add("endDate", e);
                    None
                }
            },
            None => None,
        };
        if let (Some(start), Some(end)) = (start, end) {
            errors.check("endDate", validation::date_order(start, end));
        }

        if self.course_type.is_scheduled() {
            if filled(&self.start_date).is_none() {
                errors.add("startDate", "Start date is required for scheduled courses");
            }
            if filled(&self.end_date).is_none() {
                errors.add("endDate", "End date is required for scheduled courses");
            }
        }

        match self.course_type {
            CourseType::Live => match filled(&self.meeting_link) {
                Some(link) => errors.check("meetingLink", validation::url(link, "Meeting link")),
                None => errors.add("meetingLink", "Meeting link is required for live courses"),
            },
            CourseType::Physical => {
                if filled(&self.location).is_none() {
                    errors.add("location", "Location is required for physical courses");
                }
                if filled(&self.address).is_none() {
                    errors.add("address", "Address is required for physical courses");
                }
            }
            CourseType::Recorded => {}
        }

        errors.into_result()
    }
}

pub struct Courses;

impl Resource for Courses {
    const PATH: &'static str = "course";
    const SLUG: &'static str = "courses";
    const LABEL: &'static str = "Course";

    const UPLOAD_FIELD: Option<&'static str> = Some("image");

    type Item = Course;
    type Form = CourseForm;

    fn id(item: &Course) -> &str {
        &item.id
    }

    fn search_fields(item: &Course) -> Vec<&str> {
        vec![&item.name, &item.instructor, &item.language]
    }

    fn edit_form(item: &Course) -> Option<CourseForm> {
        let day = |v: &Option<String>| v.as_ref().map(|s| s.chars().take(10).collect());
        Some(CourseForm {
            name: item.name.clone(),
            description: item.description.clone(),
            course_type: item.course_type,
            start_date: day(&item.start_date),
            end_date: day(&item.end_date),
            instructor: item.instructor.clone(),
            language: item.language.clone(),
            price: item.price,
            location: item.location.clone(),
            address: item.address.clone(),
            meeting_link: item.meeting_link.clone(),
            image: None,
        })
    }

    fn attach(form: &mut CourseForm, upload: Upload) {
        form.image = Some(upload);
    }

    fn multipart(form: &CourseForm) -> Option<MultipartBody> {
        // Fields that do not apply to the course type are not sent.
        let (location, address, link) = match form.course_type {
            CourseType::Physical => (filled(&form.location), filled(&form.address), None),
            CourseType::Live => (None, None, filled(&form.meeting_link)),
            CourseType::Recorded => (None, None, None),
        };
        Some(
            MultipartBody::default()
                .text("name", form.name.trim())
                .text("description", form.description.trim())
                .text("type", form.course_type)
                .text_opt("startDate", filled(&form.start_date))
                .text_opt("endDate", filled(&form.end_date))
                .text("instructor", form.instructor.trim())
                .text("language", form.language.trim())
                .text("price", form.price)
                .text_opt("location", location)
                .text_opt("address", address)
                .text_opt("meetingLink", link)
                .file("image", form.image.as_ref()),
        )
    }
}
