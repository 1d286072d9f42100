//! End-to-end tests for the request pipeline: bearer injection, the single
//! refresh-and-retry cycle on 401, and session expiry handling.

mod common;

use serde_json::json;

use binwatch::api::query::QueryParams;
use binwatch::api::{ApiClient, SessionExpired};
use common::{FakeBackend, temp_store};

fn profile_body() -> serde_json::Value {
    json!({ "id": 1, "username": "admin", "role": "admin" })
}

#[test]
fn expired_access_token_is_refreshed_and_the_request_retried() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/auth/token/refresh/" => (200, json!({ "access": "new-access" })),
        "/api/auth/profile/" => {
            if req.bearer_token() == Some("new-access") {
                (200, profile_body())
            } else {
                (401, json!({ "detail": "Token is invalid or expired" }))
            }
        }
        _ => (404, json!({ "detail": "not found" })),
    });

    let (_dir, store) = temp_store();
    store.set_tokens("stale-access", "refresh-1").unwrap();
    let client = ApiClient::new(&backend.config(), store.clone());

    let body = client.get("/auth/profile/", &QueryParams::new()).unwrap();
    assert_eq!(body["username"], "admin");

    // Original attempt, refresh, retried attempt.
    let requests = backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path(), "/api/auth/profile/");
    assert_eq!(requests[0].bearer_token(), Some("stale-access"));
    assert_eq!(requests[1].path(), "/api/auth/token/refresh/");
    assert!(requests[1].body.contains("refresh-1"));
    assert_eq!(requests[2].path(), "/api/auth/profile/");
    assert_eq!(requests[2].bearer_token(), Some("new-access"));

    // The new access token is persisted; the refresh token is kept.
    assert_eq!(store.access_token().unwrap(), "new-access");
    assert_eq!(store.refresh_token().unwrap(), "refresh-1");
}

#[test]
fn failed_refresh_clears_the_session_and_signals_expiry() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/auth/token/refresh/" => (401, json!({ "detail": "Token is blacklisted" })),
        _ => (401, json!({ "detail": "Token is invalid or expired" })),
    });

    let (_dir, store) = temp_store();
    store.set_tokens("stale-access", "dead-refresh").unwrap();
    let client = ApiClient::new(&backend.config(), store.clone());

    let err = client
        .get("/auth/profile/", &QueryParams::new())
        .unwrap_err();
    assert!(err.downcast_ref::<SessionExpired>().is_some());

    // Session is gone; the caller must sign in again.
    assert!(store.get().is_none());

    // Original attempt plus the refresh call. No retry without a new token.
    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path(), "/api/auth/profile/");
    assert_eq!(requests[1].path(), "/api/auth/token/refresh/");
}

#[test]
fn a_second_unauthorized_after_refresh_is_a_plain_error() {
    // Refresh succeeds but the endpoint keeps answering 401, e.g. the
    // account lost its admin flag server-side. Exactly one retry.
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/auth/token/refresh/" => (200, json!({ "access": "new-access" })),
        _ => (401, json!({ "detail": "You do not have permission" })),
    });

    let (_dir, store) = temp_store();
    store.set_tokens("stale-access", "refresh-1").unwrap();
    let client = ApiClient::new(&backend.config(), store.clone());

    let err = client
        .get("/auth/profile/", &QueryParams::new())
        .unwrap_err();
    assert!(err.downcast_ref::<SessionExpired>().is_none());
    assert!(err.to_string().contains("unauthorized"));

    assert_eq!(backend.requests().len(), 3);

    // The refreshed tokens survive; only expiry clears the store.
    assert_eq!(store.access_token().unwrap(), "new-access");
}

#[test]
fn no_stored_session_skips_the_refresh_call() {
    let backend = FakeBackend::start(|_req| (401, json!({ "detail": "credentials not provided" })));

    let (_dir, store) = temp_store();
    let client = ApiClient::new(&backend.config(), store);

    let err = client
        .get("/auth/profile/", &QueryParams::new())
        .unwrap_err();
    assert!(err.downcast_ref::<SessionExpired>().is_some());

    // Without a refresh token there is nothing to exchange.
    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization, None);
}

#[test]
fn query_parameters_are_sent_in_a_stable_order() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/reports/admin/reports/" => {
            (200, json!({ "count": 0, "next": null, "previous": null, "results": [] }))
        }
        _ => (404, json!({ "detail": "not found" })),
    });

    let (_dir, store) = temp_store();
    store.set_tokens("access", "refresh").unwrap();
    let client = ApiClient::new(&backend.config(), store);

    // Insertion order differs from the sorted wire order.
    let params = QueryParams::new()
        .set("status", "pending")
        .set("search", "bottle");
    client.get("/reports/admin/reports/", &params).unwrap();

    let requests = backend.requests();
    assert_eq!(
        requests[0].url,
        "/api/reports/admin/reports/?search=bottle&status=pending"
    );
}

#[test]
fn backend_error_bodies_become_readable_messages() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/reports/admin/reports/99/assign/" => {
            (400, json!({ "error": "Collector is not active" }))
        }
        _ => (404, json!({ "detail": "not found" })),
    });

    let (_dir, store) = temp_store();
    store.set_tokens("access", "refresh").unwrap();
    let client = ApiClient::new(&backend.config(), store);

    let err = client.assign_collector(99, 7).unwrap_err();
    assert_eq!(err.to_string(), "Collector is not active");
}
