//! Tests for response module

use super::*;
use crate::pagination::{decode_cursor, OffsetPagination};
use crate::types::{JsonObject, JsonValue};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn object(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("Expected object, got {other}"),
    }
}

// ============================================================================
// OffsetPageInfo Tests
// ============================================================================

#[test_case(20, 10, 45, 3, 5, true, true ; "middle page")]
#[test_case(0, 10, 5, 1, 1, false, false ; "single page")]
#[test_case(0, 10, 45, 1, 5, true, false ; "first page")]
#[test_case(40, 10, 45, 5, 5, false, true ; "last page")]
#[test_case(0, 10, 0, 1, 0, false, false ; "empty collection")]
#[test_case(15, 10, 45, 2, 5, true, true ; "unaligned skip")]
#[test_case(60, 10, 45, 7, 5, false, true ; "past the end")]
fn test_offset_page_info(
    skip: u64,
    take: u64,
    total: u64,
    page: u64,
    total_pages: u64,
    has_next: bool,
    has_previous: bool,
) {
    let info = OffsetPageInfo::compute(skip, take, total).unwrap();
    assert_eq!(info.page, page);
    assert_eq!(info.total_pages, total_pages);
    assert_eq!(info.has_next, has_next);
    assert_eq!(info.has_previous, has_previous);
    assert_eq!(info.page_size, take);
    assert_eq!(info.skip, skip);
    assert_eq!(info.total, total);
}

#[test]
fn test_offset_page_info_zero_take() {
    let err = OffsetPageInfo::compute(0, 0, 10).unwrap_err();
    assert!(matches!(err, crate::Error::Config { .. }));
}

// ============================================================================
// offset_based_response Tests
// ============================================================================

#[test]
fn test_offset_response_body() {
    let mut reply = JsonReply::new();
    let body = offset_based_response(
        &mut reply,
        OffsetResponseOptions::new(vec![json!({"id": 21}), json!({"id": 22})], 20, 10, 45),
    )
    .unwrap();

    assert_eq!(
        body,
        json!({
            "data": [{"id": 21}, {"id": 22}],
            "pagination": {
                "page": 3,
                "pageSize": 10,
                "skip": 20,
                "total": 45,
                "totalPages": 5,
                "hasNext": true,
                "hasPrevious": true
            }
        })
    );
    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(reply.body(), Some(&body));
}

#[test]
fn test_offset_response_from_pagination() {
    let pagination = OffsetPagination::from_page(2, 5, false);
    let mut reply = JsonReply::new();

    let body = offset_based_response(
        &mut reply,
        OffsetResponseOptions::from_pagination(vec![6, 7, 8, 9, 10], &pagination, 12),
    )
    .unwrap();

    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["skip"], 5);
    assert_eq!(body["pagination"]["totalPages"], 3);
}

#[test]
fn test_offset_response_status_and_extra() {
    let mut reply = JsonReply::new();
    let body = offset_based_response(
        &mut reply,
        OffsetResponseOptions::new(Vec::<u32>::new(), 0, 10, 0)
            .with_status(StatusCode::PARTIAL_CONTENT)
            .with_extra("requestId", "abc")
            .with_extra("data", json!(["overridden"])),
    )
    .unwrap();

    assert_eq!(reply.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(body["requestId"], "abc");
    assert_eq!(body["data"], json!(["overridden"]));
}

#[test]
fn test_offset_response_zero_take_sends_nothing() {
    let mut reply = JsonReply::new();
    let result = offset_based_response(&mut reply, OffsetResponseOptions::new(vec![1], 0, 0, 1));

    assert!(result.is_err());
    assert!(reply.body().is_none());
}

#[test]
fn test_offset_response_is_deterministic() {
    let build = || {
        let mut reply = JsonReply::new();
        let body = offset_based_response(
            &mut reply,
            OffsetResponseOptions::new(vec!["a", "b"], 10, 2, 30).with_extra("x", 1),
        )
        .unwrap();
        serde_json::to_vec(&body).unwrap()
    };

    assert_eq!(build(), build());
}

// ============================================================================
// cursor_based_response Tests
// ============================================================================

#[test]
fn test_cursor_response_prev_only() {
    let mut reply = JsonReply::new();
    let body = cursor_based_response(
        &mut reply,
        CursorResponseOptions::new(vec![1, 2, 3], 20, 3)
            .with_prev_cursor(&json!({"id": 5}))
            .unwrap(),
    )
    .unwrap();

    let pagination = &body["pagination"];
    assert_eq!(pagination["hasNext"], false);
    assert_eq!(pagination["hasPrevious"], true);
    assert_eq!(pagination["nextCursor"], JsonValue::Null);
    assert_eq!(pagination["limit"], 20);
    assert_eq!(pagination["count"], 3);

    let prev = pagination["prevCursor"].as_str().unwrap();
    assert_eq!(decode_cursor(prev).unwrap(), object(json!({"id": 5})));
}

#[test]
fn test_cursor_response_body() {
    let mut reply = JsonReply::new();
    let body = cursor_based_response(
        &mut reply,
        CursorResponseOptions::new(vec![json!({"id": 1})], 1, 1)
            .with_next_cursor(&json!({"id": 5}))
            .unwrap(),
    )
    .unwrap();

    assert_eq!(
        body,
        json!({
            "data": [{"id": 1}],
            "pagination": {
                "nextCursor": "eyJpZCI6NX0=",
                "prevCursor": null,
                "hasNext": true,
                "hasPrevious": false,
                "limit": 1,
                "count": 1
            }
        })
    );
    assert_eq!(reply.body(), Some(&body));
}

#[test]
fn test_cursor_response_typed_cursor() {
    #[derive(serde::Serialize)]
    struct Position {
        last: u64,
        limit: u64,
    }

    let mut reply = JsonReply::new();
    let body = cursor_based_response(
        &mut reply,
        CursorResponseOptions::new(vec![1, 2], 2, 2)
            .with_next_cursor(&Position { last: 2, limit: 2 })
            .unwrap(),
    )
    .unwrap();

    let next = body["pagination"]["nextCursor"].as_str().unwrap();
    assert_eq!(
        decode_cursor(next).unwrap(),
        object(json!({"last": 2, "limit": 2}))
    );
    assert_eq!(body["pagination"]["hasNext"], true);
}

#[test]
fn test_cursor_response_no_cursors() {
    let mut reply = JsonReply::new();
    let body = cursor_based_response(
        &mut reply,
        CursorResponseOptions::new(Vec::<u8>::new(), 10, 0),
    )
    .unwrap();

    assert_eq!(body["pagination"]["nextCursor"], JsonValue::Null);
    assert_eq!(body["pagination"]["prevCursor"], JsonValue::Null);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrevious"], false);
}

#[test]
fn test_cursor_response_status_and_extra() {
    let mut reply = JsonReply::new();
    let body = cursor_based_response(
        &mut reply,
        CursorResponseOptions::new(vec![1], 10, 1)
            .with_status(StatusCode::CREATED)
            .with_extra("pagination", "replaced"),
    )
    .unwrap();

    assert_eq!(reply.status(), StatusCode::CREATED);
    assert_eq!(body["pagination"], "replaced");
}

#[test]
fn test_cursor_response_is_deterministic() {
    let build = || {
        let mut reply = JsonReply::new();
        let body = cursor_based_response(
            &mut reply,
            CursorResponseOptions::new(vec![1, 2], 2, 2)
                .with_next_cursor(&json!({"last": 2, "limit": 2}))
                .unwrap()
                .with_prev_cursor(&json!({"last": null, "limit": 2}))
                .unwrap(),
        )
        .unwrap();
        serde_json::to_vec(&body).unwrap()
    };

    assert_eq!(build(), build());
}

// ============================================================================
// JsonReply Tests
// ============================================================================

#[test]
fn test_json_reply_defaults() {
    let reply = JsonReply::default();
    assert_eq!(reply.status(), StatusCode::OK);
    assert!(reply.body().is_none());
}

#[test]
fn test_json_reply_into_response() {
    use axum::response::IntoResponse;

    let mut reply = JsonReply::new();
    reply.set_status(StatusCode::ACCEPTED).send(json!({"ok": true}));

    let response = reply.into_response();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response.headers()[axum::http::header::CONTENT_TYPE],
        "application/json"
    );
}
