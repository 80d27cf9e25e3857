use actix_web::{test, web, App};
use adslot_api::configure_server_api;
use adslot_api_structs::check_availability;
use adslot_api_structs::check_availability_batch;
use adslot_api_structs::create_booking;
use adslot_api_structs::send_due_reminders;
use adslot_domain::{CapacityConfig, LeadTime, LeadTimeUnit};
use adslot_infra::{setup_context, ISys, InMemoryNotifier};
use chrono::TimeZone;
use std::sync::Arc;

struct StaticTimeSys {
    timestamp_millis: i64,
}
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.clone()))
                .service(web::scope("/api/v1").configure(configure_server_api)),
        )
        .await
    };
}

#[actix_web::test]
async fn health_check_is_up() {
    let ctx = setup_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn booking_and_availability_flow() {
    let ctx = setup_context();
    ctx.repos
        .settings
        .set(&CapacityConfig { max_per_day: 2 })
        .await
        .unwrap();
    let app = test_app!(ctx);

    // Book the 9 o'clock one-time slot
    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(&serde_json::json!({
            "adName": "Morning spot",
            "advertiserName": "Acme",
            "postType": "One-Time Post",
            "date": "2024-07-04",
            "time": "09:00:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let res: create_booking::APIResponse = test::read_body_json(resp).await;
    assert_eq!(res.booking.date.unwrap().to_string(), "2024-07-04");

    // The exact time is now blocked
    let req = test::TestRequest::get()
        .uri("/api/v1/availability?date=2024-07-04&postType=one_time&time=09:00:00")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let res: check_availability::APIResponse = test::read_body_json(resp).await;
    assert!(!res.availability.available);
    assert!(res.availability.time_blocked);
    assert!(!res.availability.day_full);

    // Booking the same time again conflicts
    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(&serde_json::json!({
            "adName": "Competing spot",
            "advertiserName": "Globex",
            "postType": "one_time",
            "date": "2024-07-04",
            "time": "09:00:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    // Batch view over the surrounding days
    let req = test::TestRequest::post()
        .uri("/api/v1/availability/batch")
        .set_json(&serde_json::json!({
            "dateFrom": "2024-07-03",
            "dateTo": "2024-07-05"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let res: check_availability_batch::APIResponse = test::read_body_json(resp).await;
    assert_eq!(res.days.len(), 3);
    assert_eq!(res.days[1].occupancy, 1);
    assert!(!res.days[1].full);
}

#[actix_web::test]
async fn rejects_unrecognized_post_type_labels() {
    let ctx = setup_context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(&serde_json::json!({
            "adName": "Typo",
            "advertiserName": "Acme",
            "postType": "weekly_run",
            "date": "2024-07-04"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn dispatch_sends_once_per_window() {
    let mut ctx = setup_context();
    ctx.config.timezone = chrono_tz::UTC;
    let now = chrono::Utc
        .ymd(2024, 6, 15)
        .and_hms(12, 0, 0)
        .timestamp_millis();
    ctx.sys = Arc::new(StaticTimeSys {
        timestamp_millis: now,
    });
    let notifier = Arc::new(InMemoryNotifier::new());
    ctx.notifier = notifier.clone();
    let app = test_app!(ctx);

    // A confirmed booking occurring 30 minutes from "now"
    let req = test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(&serde_json::json!({
            "adName": "Morning spot",
            "advertiserName": "Acme",
            "advertiserEmail": "ads@acme.test",
            "postType": "one_time",
            "date": "2024-06-15",
            "time": "12:30:00",
            "leadTime": { "amount": 1, "unit": "hours" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let res: create_booking::APIResponse = test::read_body_json(resp).await;
    assert_eq!(
        res.booking.lead_time,
        LeadTime {
            amount: 1,
            unit: LeadTimeUnit::Hours
        }
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/bookings/{}", res.booking.id))
        .set_json(&serde_json::json!({ "status": "scheduled" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/v1/reminders/dispatch")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let res: send_due_reminders::APIResponse = test::read_body_json(resp).await;
    assert_eq!(res.results.len(), 1);
    assert_eq!(res.results[0].outcome, "sent");
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(notifier.sent()[0].address, "ads@acme.test");

    // A second dispatch inside the 24h window is suppressed by the ledger
    let req = test::TestRequest::post()
        .uri("/api/v1/reminders/dispatch")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let res: send_due_reminders::APIResponse = test::read_body_json(resp).await;
    assert_eq!(res.results.len(), 1);
    assert_eq!(res.results[0].outcome, "already_sent");
    assert_eq!(notifier.sent().len(), 1);
}
