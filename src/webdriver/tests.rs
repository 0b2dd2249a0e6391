use super::*;
use crate::error::InspectError;
use reqwest::StatusCode;
use serde_json::json;

#[test]
fn unwrap_value_returns_value_member() {
    let v = unwrap_value(StatusCode::OK, json!({ "value": "hello" })).unwrap();
    assert_eq!(v, json!("hello"));

    let v = unwrap_value(StatusCode::OK, json!({ "value": null })).unwrap();
    assert!(v.is_null());
}

#[test]
fn unwrap_value_maps_w3c_errors() {
    let body = json!({
        "value": {
            "error": "no such element",
            "message": "Unable to locate element: .title",
            "stacktrace": ""
        }
    });
    match unwrap_value(StatusCode::NOT_FOUND, body) {
        Err(InspectError::Driver { error, message }) => {
            assert_eq!(error, "no such element");
            assert!(message.contains(".title"));
        }
        other => panic!("expected driver error, got {other:?}"),
    }
}

#[test]
fn unwrap_value_rejects_bare_http_failures() {
    assert!(matches!(
        unwrap_value(StatusCode::INTERNAL_SERVER_ERROR, json!({ "value": 1 })),
        Err(InspectError::Protocol(_))
    ));
    assert!(matches!(
        unwrap_value(StatusCode::OK, json!([1, 2])),
        Err(InspectError::Protocol(_))
    ));
}

#[test]
fn element_id_reads_w3c_reference() {
    let v = json!({ ELEMENT_KEY: "abc-123" });
    assert_eq!(element_id(&v).unwrap(), "abc-123");
    assert!(element_id(&json!({ "ELEMENT": "legacy" })).is_err());
}

#[test]
fn parse_rect_reads_all_fields() {
    let r = parse_rect(&json!({ "x": 12.5, "y": 0, "width": 300, "height": 40.0 })).unwrap();
    assert_eq!(r.x, 12.5);
    assert_eq!(r.width, 300.0);
    assert!(r.contains_x(12.5));
    assert!(!r.contains_x(312.5));

    assert!(parse_rect(&json!({ "x": 1 })).is_err());
}

#[test]
fn session_body_toggles_headless_arg() {
    let headless = new_session_body(true);
    assert_eq!(
        headless["capabilities"]["alwaysMatch"]["moz:firefoxOptions"]["args"],
        json!(["-headless"])
    );
    let windowed = new_session_body(false);
    assert_eq!(
        windowed["capabilities"]["alwaysMatch"]["moz:firefoxOptions"]["args"],
        json!([])
    );
}

#[test]
fn has_class_matches_whole_tokens() {
    assert!(has_class("playbutton playing", "playing"));
    assert!(!has_class("playbutton", "playing"));
    assert!(!has_class("playbutton not-playing", "playing"));
}

#[test]
fn quit_reaches_the_driver_only_once() {
    // Nothing listens on the discard port, so the first quit fails fast.
    let driver = WebDriver::attach("http://127.0.0.1:9/", "abc");
    assert!(!driver.is_closed());

    assert!(matches!(driver.quit(), Err(InspectError::Http(_))));
    assert!(driver.is_closed());
    assert!(driver.quit().is_ok());

    // Drop after quit does not try again.
    drop(driver);
}
