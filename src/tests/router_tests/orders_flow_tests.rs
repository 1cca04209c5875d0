// src/tests/router_tests/orders_flow_tests.rs

use std::io::Read;
use std::sync::Arc;

use astra::{Body, Request, Response};
use http::Method;

use crate::errors::AppError;
use crate::mailer::{Mailer, MailerError};
use crate::router::{handle, App};
use crate::tests::utils::init_test_db;

struct NullMailer;

impl Mailer for NullMailer {
    fn send(&self, _subject: &str, _body: &str) -> Result<(), MailerError> {
        Ok(())
    }
}

fn make_app() -> App {
    App {
        db: init_test_db(),
        mailer: Arc::new(NullMailer),
    }
}

fn get(path: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn post_form(path: &str, form: &str) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn add_order_flow_shows_order_in_grid() {
    let app = make_app();

    let resp = handle(
        post_form(
            "/orders",
            "customer_name=Alice&purchase_date=2024-01-01&planned_delivery_date=2024-01-10&model=X1",
        ),
        &app,
    )
    .expect("add order failed");
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/?status=added");

    let mut resp = handle(get("/?status=added"), &app).expect("grid failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Alice"));
    assert!(body.contains("X1"));
    assert!(body.contains("Order added"));
}

#[test]
fn form_values_are_percent_decoded() {
    let app = make_app();

    handle(
        post_form(
            "/orders",
            "customer_name=Anna+%C3%85berg&purchase_date=2024-01-01&planned_delivery_date=2024-01-10&model=X1",
        ),
        &app,
    )
    .expect("add order failed");

    let mut resp = handle(get("/"), &app).unwrap();
    assert!(body_string(&mut resp).contains("Anna Åberg"));
}

#[test]
fn invalid_date_is_a_validation_error_and_writes_nothing() {
    let app = make_app();

    let err = handle(
        post_form(
            "/orders",
            "customer_name=Bob&purchase_date=not-a-date&planned_delivery_date=2024-01-10&model=X1",
        ),
        &app,
    )
    .unwrap_err();
    match err {
        AppError::Validation(_) => {}
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut resp = handle(get("/"), &app).unwrap();
    assert!(!body_string(&mut resp).contains("Bob"));
}

#[test]
fn delete_flow_removes_selected_orders() {
    let app = make_app();

    handle(
        post_form(
            "/orders",
            "customer_name=Alice&purchase_date=2024-01-01&planned_delivery_date=2024-01-10&model=X1",
        ),
        &app,
    )
    .unwrap();
    handle(
        post_form(
            "/orders",
            "customer_name=Bob&purchase_date=2024-01-02&planned_delivery_date=2024-01-11&model=X2",
        ),
        &app,
    )
    .unwrap();

    let first = crate::db::orders::list_orders(&app.db).unwrap()[0].id;

    let resp = handle(post_form("/orders/delete", &format!("id={first}")), &app).unwrap();
    assert_eq!(resp.status(), 303);

    let mut resp = handle(get("/"), &app).unwrap();
    let body = body_string(&mut resp);
    assert!(!body.contains("Alice"));
    assert!(body.contains("Bob"));
}

#[test]
fn manual_notify_reports_when_nothing_is_due() {
    let app = make_app();

    let mut resp = handle(post_form("/notify", ""), &app).expect("notify failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("No orders due in 2 days"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = make_app();

    let err = handle(get("/nope"), &app).unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
