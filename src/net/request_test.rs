use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::state::notification::{NotificationId, NotificationSurface, NotificationTiming};
use crate::util::timer::ManualScheduler;

#[derive(Default)]
struct Mounted {
    messages: RefCell<Vec<(NotificationKind, String)>>,
}

impl NotificationSurface for Mounted {
    fn ensure_container(&self) {}

    fn mount(&self, _id: NotificationId, kind: NotificationKind, text: &str) {
        self.messages.borrow_mut().push((kind, text.to_owned()));
    }

    fn begin_exit(&self, _id: NotificationId) {}

    fn detach(&self, _id: NotificationId) {}
}

// =============================================================
// RequestOptions
// =============================================================

#[test]
fn empty_options_default_to_get() {
    let opts = RequestOptions::from_json("").unwrap();
    assert_eq!(opts.method(), "GET");
    assert_eq!(RequestOptions::from_json("null").unwrap(), RequestOptions::default());
}

#[test]
fn method_is_upper_cased() {
    let opts = RequestOptions::from_json(r#"{"method": "post"}"#).unwrap();
    assert_eq!(opts.method(), "POST");
}

#[test]
fn default_headers_carry_json_and_csrf() {
    let headers = RequestOptions::default().resolved_headers("tok123");
    assert_eq!(
        headers,
        vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("X-CSRFToken".to_owned(), "tok123".to_owned()),
        ]
    );
}

#[test]
fn caller_headers_override_by_name_and_extend() {
    let opts = RequestOptions::from_json(
        r#"{"headers": {"content-type": "text/plain", "X-Requested-With": "XMLHttpRequest"}}"#,
    )
    .unwrap();
    let headers = opts.resolved_headers("");
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[0], ("Content-Type".to_owned(), "text/plain".to_owned()));
    assert_eq!(headers[1], ("X-CSRFToken".to_owned(), String::new()));
    assert_eq!(headers[2], ("X-Requested-With".to_owned(), "XMLHttpRequest".to_owned()));
}

#[test]
fn body_string_is_verbatim_and_objects_are_serialized() {
    let opts = RequestOptions::from_json(r#"{"body": "{\"a\":1}"}"#).unwrap();
    assert_eq!(opts.body_text().as_deref(), Some(r#"{"a":1}"#));

    let opts = RequestOptions::from_json(r#"{"body": {"status": "aprovado"}}"#).unwrap();
    assert_eq!(opts.body_text().as_deref(), Some(r#"{"status":"aprovado"}"#));

    let opts = RequestOptions::from_json(r#"{"body": null}"#).unwrap();
    assert_eq!(opts.body_text(), None);
}

#[test]
fn malformed_options_are_decode_errors() {
    assert!(matches!(RequestOptions::from_json("[1,2]"), Err(AdminError::Decode(_))));
}

// =============================================================
// Status and failure reporting
// =============================================================

#[test]
fn only_2xx_is_success() {
    assert!(check_status(200).is_ok());
    assert!(check_status(204).is_ok());
    assert_eq!(check_status(199), Err(AdminError::Http { status: 199 }));
    assert_eq!(check_status(302), Err(AdminError::Http { status: 302 }));
    assert_eq!(check_status(500), Err(AdminError::Http { status: 500 }));
}

#[test]
fn failure_surfaces_error_notification() {
    let surface = Rc::new(Mounted::default());
    let notes = NotificationCoordinator::new(surface.clone(), Rc::new(ManualScheduler::new()), NotificationTiming::default());

    report_failure(&notes, &AdminError::Http { status: 500 });
    assert_eq!(
        *surface.messages.borrow(),
        vec![(NotificationKind::Error, REQUEST_FAILED_MESSAGE.to_owned())]
    );
}
