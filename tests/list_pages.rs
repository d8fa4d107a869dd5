mod common;

use algodesk_admin::config::DashboardConfig;
use algodesk_admin::dashboard::{ListPage, Session, ToastLevel};
use algodesk_admin::external::{Resource, ResourceApi, Upload};
use algodesk_admin::models::{
    BotForm, Bots, Chapters, CouponForm, Coupons, CourseForm, CourseType, Courses, Customers,
};
use algodesk_admin::validation::today;
use common::*;

fn page<R: Resource>(base_url: &str) -> ListPage<R, ResourceApi<R>> {
    let api = ResourceApi::new(client(base_url).with_session(Session::with_token(ADMIN_TOKEN)));
    ListPage::new(api, &DashboardConfig::default())
}

#[actix_web::test]
async fn created_bot_shows_up_with_next_serial() {
    let (backend, base_url) = spawn_backend();
    backend.seed("bot", vec![bot("b1", "Scalper"), bot("b2", "Swing")]);
    let mut bots = page::<Bots>(&base_url);
    bots.load().await.unwrap();

    bots.open_create(BotForm {
        name: "My Bot 1".into(),
        bot_provider_id: "p1".into(),
    });
    bots.submit().await.unwrap();

    assert!(!bots.form().is_open());
    let toast = bots.toasts().last().unwrap();
    assert_eq!(toast.level, ToastLevel::Success);
    let rows = bots.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].serial, 3);
    assert_eq!(rows[2].item.name, "My Bot 1");
    assert_eq!(bots.total(), 3);
}

#[actix_web::test]
async fn out_of_range_coupon_is_rejected_without_a_call() {
    let (backend, base_url) = spawn_backend();
    let mut coupons = page::<Coupons>(&base_url);
    coupons.open_create(CouponForm {
        code: "diwali25".into(),
        discount_percent: 150,
        expiry_date: today().format("%Y-%m-%d").to_string(),
        usage_limit: 100,
    });

    let err = coupons.submit().await.unwrap_err();
    assert!(err.is_validation());
    let errors = coupons.form().errors().unwrap();
    assert!(errors.get("discountPercent").is_some());
    assert!(errors.get("code").is_none());
    assert!(coupons.form().is_open());
    assert!(backend.writes().is_empty());
}

#[actix_web::test]
async fn customer_delete_needs_confirmation() {
    let (backend, base_url) = spawn_backend();
    backend.seed(
        "user",
        vec![
            customer("u1", "Asha Verma", "asha@example.com"),
            customer("u2", "Ravi Kumar", "ravi@example.com"),
        ],
    );
    let mut customers = page::<Customers>(&base_url);
    customers.load().await.unwrap();

    customers.request_delete("u1");
    assert!(customers.confirm_dialog().is_open());
    customers.cancel_confirm();
    assert!(backend.writes().is_empty());
    assert_eq!(customers.items().len(), 2);

    customers.request_delete("u1");
    customers.confirm().await.unwrap();
    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, "DELETE");
    assert_eq!(writes[0].path, "/user/delete/u1");
    assert_eq!(customers.items().len(), 1);
    assert_eq!(customers.rows()[0].item.id, "u2");
    assert_eq!(customers.rows()[0].serial, 1);
}

#[actix_web::test]
async fn customer_search_goes_to_the_backend() {
    let (backend, base_url) = spawn_backend();
    backend.seed(
        "user",
        vec![
            customer("u1", "Asha Verma", "asha@example.com"),
            customer("u2", "Ravi Kumar", "ravi@example.com"),
        ],
    );
    let mut customers = page::<Customers>(&base_url);
    customers.load().await.unwrap();
    customers.go_to_page(1).await.unwrap();

    customers.search("ravi").await.unwrap();
    let last = backend.calls().pop().unwrap();
    assert_eq!(last.query.get("search").map(String::as_str), Some("ravi"));
    assert_eq!(customers.page_state().current_page, 1);
    assert_eq!(customers.items().len(), 1);
    assert_eq!(customers.total(), 1);
}

#[actix_web::test]
async fn failed_update_keeps_dialog_and_toasts_backend_message() {
    let (_backend, base_url) = spawn_backend();
    let mut bots = page::<Bots>(&base_url);
    bots.open_edit_with(
        "missing",
        BotForm {
            name: "Ghost Bot".into(),
            bot_provider_id: "p1".into(),
        },
    );
    assert!(bots.submit().await.is_err());
    assert!(bots.form().is_open());
    assert_eq!(bots.form().form().unwrap().values.name, "Ghost Bot");
    assert_eq!(bots.toasts().last().unwrap().message, "Record not found");
}

#[actix_web::test]
async fn rapid_customer_search_fetches_once() {
    let (backend, base_url) = spawn_backend();
    backend.seed(
        "user",
        vec![
            customer("u1", "Asha Verma", "asha@example.com"),
            customer("u2", "Ravi Kumar", "ravi@example.com"),
        ],
    );
    let mut customers = page::<Customers>(&base_url);

    let first = customers.type_search("ra").unwrap();
    let second = customers.type_search("ravi").unwrap();
    assert!(!customers.run_search(first).await.unwrap());
    assert!(customers.run_search(second).await.unwrap());

    let searches: Vec<_> = backend
        .calls()
        .into_iter()
        .filter(|c| c.query.contains_key("search"))
        .collect();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query["search"], "ravi");
    assert_eq!(customers.items().len(), 1);
    assert_eq!(customers.search_term(), "ravi");
}

#[actix_web::test]
async fn course_create_is_sent_as_multipart() {
    let (backend, base_url) = spawn_backend();
    let mut courses = page::<Courses>(&base_url);
    let mut form = CourseForm {
        name: "Options Masterclass".into(),
        description: "Six weeks of options strategy".into(),
        course_type: CourseType::Live,
        start_date: Some("2030-01-10".into()),
        end_date: Some("2030-02-20".into()),
        instructor: "R. Mehta".into(),
        language: "English".into(),
        price: 9999.0,
        location: Some("Mumbai".into()),
        address: None,
        meeting_link: Some("https://zoom.us/j/42".into()),
        image: None,
    };
    Courses::attach(&mut form, Upload::new("cover.png", b"PNGDATA".to_vec()));
    courses.open_create(form);
    courses.submit().await.unwrap();

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/course/add");
    assert_eq!(writes[0].token.as_deref(), Some(ADMIN_TOKEN));
    assert_eq!(writes[0].text("type").as_deref(), Some("live"));
    assert_eq!(writes[0].text("meetingLink").as_deref(), Some("https://zoom.us/j/42"));
    assert!(writes[0].part("location").is_none());
    let image = writes[0].part("image").unwrap();
    assert_eq!(image.file_name.as_deref(), Some("cover.png"));
    assert_eq!(image.body, b"PNGDATA".to_vec());

    assert_eq!(courses.items().len(), 1);
    assert_eq!(courses.items()[0].image.as_deref(), Some("cover.png"));
}

#[actix_web::test]
async fn chapter_update_is_sent_as_multipart() {
    let (backend, base_url) = spawn_backend();
    backend.seed("chapter", vec![chapter("ch1", "Greeks explained", 3)]);
    let mut chapters = page::<Chapters>(&base_url);
    chapters.load().await.unwrap();

    chapters.open_edit("ch1").unwrap();
    chapters.form_mut().values_mut().unwrap().chapter_name = "Greeks in practice".into();
    chapters.submit().await.unwrap();

    let writes = backend.writes();
    assert_eq!(writes[0].method, "PUT");
    assert_eq!(writes[0].path, "/chapter/edit/ch1");
    assert_eq!(writes[0].text("chapterName").as_deref(), Some("Greeks in practice"));
    assert_eq!(writes[0].text("durationMinutes").as_deref(), Some("45"));
    assert!(writes[0].part("video").is_none());
    assert_eq!(chapters.items()[0].chapter_name, "Greeks in practice");
}
