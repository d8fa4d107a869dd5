use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::external::{Listing, MultipartBody, Resource, ResourceApi, Upload};
use crate::utils::youtube_thumbnail;
use crate::validation::{self, FieldErrors, Validate};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub chapter_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub chapter_no: u32,
    #[serde(default)]
    pub course_id: String,
}

impl Chapter {
    pub fn thumbnail(&self) -> Option<String> {
        youtube_thumbnail(&self.video_url)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChapterForm {
    #[schema(example = "Greeks explained")]
    pub chapter_name: String,
    pub description: String,
    #[schema(example = 45)]
    pub duration_minutes: i64,
    #[schema(example = "https://youtu.be/dQw4w9WgXcQ")]
    pub video_url: String,
    #[schema(example = 3)]
    pub chapter_no: i64,
    pub course_id: String,
    /// Video file uploaded instead of a hosted link.
    #[serde(skip)]
    pub video: Option<Upload>,
}

impl Validate for ChapterForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "chapterName",
            validation::length(&self.chapter_name, "Chapter name", 3, 100),
        );
        errors.check(
            "description",
            validation::length(&self.description, "Description", 10, 1000),
        );
        errors.check(
            "durationMinutes",
            validation::range(self.duration_minutes, "Duration", 1, 600),
        );
        if self.video.is_none() {
            errors.check("videoUrl", validation::url(&self.video_url, "Video URL"));
        }
        errors.check(
            "chapterNo",
            validation::at_least(self.chapter_no, "Chapter number", 1),
        );
        errors.check("courseId", validation::required(&self.course_id, "Course"));
        errors.into_result()
    }
}

pub struct Chapters;

impl Resource for Chapters {
    const PATH: &'static str = "chapter";
    const SLUG: &'static str = "chapters";
    const LABEL: &'static str = "Chapter";

    const UPLOAD_FIELD: Option<&'static str> = Some("video");

    type Item = Chapter;
    type Form = ChapterForm;

    fn id(item: &Chapter) -> &str {
        &item.id
    }

    fn search_fields(item: &Chapter) -> Vec<&str> {
        vec![&item.chapter_name, &item.description]
    }

    fn edit_form(item: &Chapter) -> Option<ChapterForm> {
        Some(ChapterForm {
            chapter_name: item.chapter_name.clone(),
            description: item.description.clone(),
            duration_minutes: item.duration_minutes as i64,
            video_url: item.video_url.clone(),
            chapter_no: item.chapter_no as i64,
            course_id: item.course_id.clone(),
            video: None,
        })
    }

    fn attach(form: &mut ChapterForm, upload: Upload) {
        form.video = Some(upload);
    }

    fn multipart(form: &ChapterForm) -> Option<MultipartBody> {
        Some(
            MultipartBody::default()
                .text("chapterName", form.chapter_name.trim())
                .text("description", form.description.trim())
                .text("durationMinutes", form.duration_minutes)
                .text("videoUrl", form.video_url.trim())
                .text("chapterNo", form.chapter_no)
                .text("courseId", &form.course_id)
                .file("video", form.video.as_ref()),
        )
    }

    fn after_fetch(items: &mut [Chapter]) {
        items.sort_by_key(|c| c.chapter_no);
    }
}

impl ResourceApi<Chapters> {
    /// Chapters of one course, in chapter order.
    pub async fn for_course(&self, course_id: &str) -> AppResult<Listing<Chapter>> {
        let no_query: [(&str, &str); 0] = [];
        let mut listing: Listing<Chapter> = self
            .client()
            .get_listing(&format!("chapter/course/{course_id}"), &no_query)
            .await?;
        Chapters::after_fetch(&mut listing.data);
        Ok(listing)
    }
}
