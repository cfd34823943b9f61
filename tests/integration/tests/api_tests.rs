//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests
//!
//! The database is shared across concurrently running tests, so assertions
//! about global state (bulk pause, admin stats) are written against each
//! test's own cohort of seeded principals.

use calldesk_core::{CallOutcome, CallRecord, Role};
use calldesk_service::UsageService;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer, TEST_PASSWORD, TEST_PIN,
};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

/// Record an answered call for a tenant through the usage ledger
async fn record_answered_call(server: &TestServer, principal_id: Uuid, minutes: f64) {
    let mut record = CallRecord::new(
        Uuid::new_v4(),
        principal_id,
        "Alice Contact".to_string(),
        "+15550100".to_string(),
        CallOutcome::Answered,
        minutes,
    )
    .expect("valid record");
    record.cost = Some(minutes * 0.4);
    record.revenue = Some(minutes * 1.2);

    UsageService::new(server.state.service_context())
        .record_call(&record)
        .await
        .expect("record call");
}

/// Record an unanswered call (not billable)
async fn record_missed_call(server: &TestServer, principal_id: Uuid) {
    let record = CallRecord::new(
        Uuid::new_v4(),
        principal_id,
        "Bob Contact".to_string(),
        "+15550101".to_string(),
        CallOutcome::NoAnswer,
        0.0,
    )
    .expect("valid record");

    UsageService::new(server.state.service_context())
        .record_call(&record)
        .await
        .expect("record call");
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_tenant_projection_has_no_revenue() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 500).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();

    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.email, tenant.email);
    assert_eq!(auth.user.role, "tenant");
    assert_eq!(auth.user.status, "active");
    assert!(auth.user.revenue_generated.is_none());
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();

    // Wrong password for an existing account
    let wrong_password = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": "WrongPass123" }),
        )
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let body_a = wrong_password.text().await.unwrap();

    // Unknown email entirely
    let unknown_email = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": "nobody@example.com", "password": "WrongPass123" }),
        )
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let body_b = unknown_email.text().await.unwrap();

    // Neither body reveals which half of the credential failed
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_paused_principal_can_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/pause", tenant.id),
            &admin_token,
            &json!({ "reason": "billing overdue", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Authentication still succeeds; the client renders the blocking notice
    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.status, "paused");
    assert_eq!(auth.user.pause_reason.as_deref(), Some("billing overdue"));
}

#[tokio::test]
async fn test_blocked_principal_cannot_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    // Block via the admin data-correction path
    let response = server
        .put_auth(
            &format!("/api/v1/users/{}", tenant.id),
            &admin_token,
            &json!({ "status": "blocked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "ACCOUNT_BLOCKED");

    // And the correction path lifts it again
    let response = server
        .put_auth(
            &format!("/api/v1/users/{}", tenant.id),
            &admin_token,
            &json!({ "status": "active" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let token = server.login_token(&tenant.email).await;
    assert!(token.is_ok());
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // New access token works against /auth/me
    let response = server
        .get_auth("/api/v1/auth/me", &refreshed.access_token)
        .await
        .unwrap();
    let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, tenant.id);
}

#[tokio::test]
async fn test_access_token_rejected_as_refresh_and_vice_versa() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": tenant.email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // Access token is not a refresh token
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.access_token }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Refresh token is not an access token
    let response = server
        .get_auth("/api/v1/auth/me", &auth.refresh_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_requests_without_token_are_unauthenticated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/api/v1/dashboard/stats").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_forgot_password_uniform_response() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();

    let existing = server
        .post("/api/v1/auth/forgot-password", &json!({ "email": tenant.email }))
        .await
        .unwrap();
    assert_eq!(existing.status(), StatusCode::OK);
    let body_existing = existing.text().await.unwrap();

    let unknown = server
        .post(
            "/api/v1/auth/forgot-password",
            &json!({ "email": "ghost@example.com" }),
        )
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::OK);
    let body_unknown = unknown.text().await.unwrap();

    // Byte-identical: no account enumeration, and no code in the body
    assert_eq!(body_existing, body_unknown);
    assert!(!body_existing.contains("code\":"));
}

#[tokio::test]
async fn test_verify_pin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();
    let token = server.login_token(&tenant.email).await.unwrap();

    let response = server
        .post_auth("/api/v1/auth/verify-pin", &token, &json!({ "pin": TEST_PIN }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/api/v1/auth/verify-pin", &token, &json!({ "pin": "0000" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_pause_resume_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/pause", tenant.id),
            &admin_token,
            &json!({ "reason": "maintenance", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/auth/me", &token).await.unwrap();
    let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.status, "paused");
    assert_eq!(me.pause_reason.as_deref(), Some("maintenance"));

    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/resume", tenant.id),
            &admin_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/v1/auth/me", &token).await.unwrap();
    let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.status, "active");
    assert!(me.pause_reason.is_none());
}

#[tokio::test]
async fn test_pause_with_wrong_pin_leaves_state_unchanged() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/pause", tenant.id),
            &admin_token,
            &json!({ "reason": "maintenance", "pin": "9999" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/auth/me", &token).await.unwrap();
    let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.status, "active");
}

#[tokio::test]
async fn test_pause_without_reason_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/pause", tenant.id),
            &admin_token,
            &json!({ "reason": "", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_pause_all_skips_already_paused() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();

    // Cohort: 5 active, 2 pre-paused with a distinctive reason
    let mut active = Vec::new();
    for _ in 0..5 {
        active.push(server.seed_principal(Role::Tenant, 100).await.unwrap());
    }
    let mut pre_paused = Vec::new();
    for _ in 0..2 {
        let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();
        let response = server
            .post_auth(
                &format!("/api/v1/users/{}/pause", tenant.id),
                &admin_token,
                &json!({ "reason": "pre-existing", "pin": TEST_PIN }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
        pre_paused.push(tenant);
    }

    let response = server
        .post_auth(
            "/api/v1/users/pause-all",
            &admin_token,
            &json!({ "reason": "maintenance", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    let result: AffectedCount = assert_json(response, StatusCode::OK).await.unwrap();
    // The shared test database may hold active tenants from other tests, so
    // the count is a lower bound for this cohort
    assert!(result.count >= 5, "expected at least 5, got {}", result.count);

    // The 5 active ones are now paused with the bulk reason
    for tenant in &active {
        let token = server.login_token(&tenant.email).await.unwrap();
        let response = server.get_auth("/api/v1/auth/me", &token).await.unwrap();
        let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(me.status, "paused");
        assert_eq!(me.pause_reason.as_deref(), Some("maintenance"));
    }

    // The 2 pre-paused ones kept their original reason, untouched
    for tenant in &pre_paused {
        let token = server.login_token(&tenant.email).await.unwrap();
        let response = server.get_auth("/api/v1/auth/me", &token).await.unwrap();
        let me: UserView = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(me.status, "paused");
        assert_eq!(me.pause_reason.as_deref(), Some("pre-existing"));
    }
}

// ============================================================================
// Call Log Tests
// ============================================================================

#[tokio::test]
async fn test_call_log_owner_scope_cannot_be_widened() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant_a = server.seed_principal(Role::Tenant, 1000).await.unwrap();
    let tenant_b = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    record_answered_call(&server, tenant_a.id, 5.0).await;
    record_answered_call(&server, tenant_a.id, 3.0).await;
    record_answered_call(&server, tenant_b.id, 7.0).await;

    // Tenant A points the owner filter at tenant B; the filter is discarded
    let token_a = server.login_token(&tenant_a.email).await.unwrap();
    let response = server
        .get_auth(
            &format!("/api/v1/dashboard/call-logs?owner_id={}", tenant_b.id),
            &token_a,
        )
        .await
        .unwrap();
    let list: CallLogList = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.pagination.total, 2);
    assert!(list.call_logs.iter().all(|r| r.principal_id == tenant_a.id));
}

#[tokio::test]
async fn test_call_log_financials_admin_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    record_answered_call(&server, tenant.id, 4.0).await;

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server
        .get_auth("/api/v1/dashboard/call-logs", &token)
        .await
        .unwrap();
    let list: CallLogList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.call_logs[0].cost.is_none());
    assert!(list.call_logs[0].revenue.is_none());

    let response = server
        .get_auth(
            &format!("/api/v1/dashboard/call-logs?owner_id={}", tenant.id),
            &admin_token,
        )
        .await
        .unwrap();
    let list: CallLogList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.call_logs[0].cost.is_some());
    assert!(list.call_logs[0].revenue.is_some());
}

#[tokio::test]
async fn test_call_log_detail_ownership_checked() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant_a = server.seed_principal(Role::Tenant, 1000).await.unwrap();
    let tenant_b = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    record_answered_call(&server, tenant_b.id, 7.0).await;

    let token_b = server.login_token(&tenant_b.email).await.unwrap();
    let response = server
        .get_auth("/api/v1/dashboard/call-logs", &token_b)
        .await
        .unwrap();
    let list: CallLogList = assert_json(response, StatusCode::OK).await.unwrap();
    let record_id = list.call_logs[0].id;

    // Owner sees it
    let response = server
        .get_auth(&format!("/api/v1/dashboard/call-logs/{record_id}"), &token_b)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A foreign record is indistinguishable from a missing one
    let token_a = server.login_token(&tenant_a.email).await.unwrap();
    let response = server
        .get_auth(&format!("/api/v1/dashboard/call-logs/{record_id}"), &token_a)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_call_log_pagination_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    for _ in 0..5 {
        record_answered_call(&server, tenant.id, 1.0).await;
    }

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server
        .get_auth("/api/v1/dashboard/call-logs?page=2&limit=2", &token)
        .await
        .unwrap();
    let list: CallLogList = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(list.pagination.page, 2);
    assert_eq!(list.pagination.limit, 2);
    assert_eq!(list.pagination.total, 5);
    assert_eq!(list.pagination.pages, 3);
    assert_eq!(list.call_logs.len(), 2);
}

// ============================================================================
// Usage Ledger Tests
// ============================================================================

#[tokio::test]
async fn test_tenant_summary_end_to_end() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    for minutes in [10.0, 15.0, 7.5] {
        record_answered_call(&server, tenant.id, minutes).await;
    }

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/dashboard/stats", &token).await.unwrap();
    let stats: TenantStats = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.calls_made, 3);
    assert_eq!(stats.pickup_rate, 100);
    assert!((stats.minutes_used - 32.5).abs() < 1e-9);
    assert_eq!(stats.minutes_allocated, 1000);
    assert!(stats.total_cost > 0.0);
}

#[tokio::test]
async fn test_pickup_rate_rounding() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 1000).await.unwrap();

    // 3 answered out of 7 total -> 43%
    for _ in 0..3 {
        record_answered_call(&server, tenant.id, 1.0).await;
    }
    for _ in 0..4 {
        record_missed_call(&server, tenant.id).await;
    }

    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/dashboard/stats", &token).await.unwrap();
    let stats: TenantStats = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.calls_made, 7);
    assert_eq!(stats.pickup_rate, 43);
}

// ============================================================================
// User Administration Tests
// ============================================================================

#[tokio::test]
async fn test_user_crud_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();

    let email = format!("created-{}@example.com", Uuid::new_v4());
    let response = server
        .post_auth(
            "/api/v1/users",
            &admin_token,
            &json!({
                "name": "Created Tenant",
                "email": email,
                "password": "CreatedPass1",
                "minutes_allocated": 250,
            }),
        )
        .await
        .unwrap();
    let created: UserView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.minutes_allocated, 250);
    assert_eq!(created.role, "tenant");

    // Duplicate email conflicts
    let response = server
        .post_auth(
            "/api/v1/users",
            &admin_token,
            &json!({
                "name": "Other",
                "email": email,
                "password": "CreatedPass1",
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Update display name and allocation
    let response = server
        .put_auth(
            &format!("/api/v1/users/{}", created.id),
            &admin_token,
            &json!({ "display_name": "Renamed Tenant", "minutes_allocated": 400 }),
        )
        .await
        .unwrap();
    let updated: UserView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Renamed Tenant");
    assert_eq!(updated.minutes_allocated, 400);

    // Soft delete; subsequent login fails like unknown credentials
    let response = server
        .delete_auth(&format!("/api/v1/users/{}", created.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": "CreatedPass1" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_routes_refuse_tenant_tokens() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();
    let token = server.login_token(&tenant.email).await.unwrap();

    let response = server.get_auth("/api/v1/users", &token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/system/toggle",
            &token,
            &json!({ "service_name": "ai" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/users/pause-all",
            &token,
            &json!({ "reason": "x", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin = server.seed_principal(Role::Admin, 0).await.unwrap();
    let token = server.login_token(&admin.email).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/users/{}", admin.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// System & Bot Settings Tests
// ============================================================================

#[tokio::test]
async fn test_service_toggle_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();

    // Unknown service name is a validation error
    let response = server
        .post_auth(
            "/api/v1/system/toggle",
            &admin_token,
            &json!({ "service_name": "sms" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Toggle twice returns to the original state
    let response = server
        .post_auth(
            "/api/v1/system/toggle",
            &admin_token,
            &json!({ "service_name": "ai" }),
        )
        .await
        .unwrap();
    let first: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let first_enabled = first["enabled"].as_bool().unwrap();

    let response = server
        .post_auth(
            "/api/v1/system/toggle",
            &admin_token,
            &json!({ "service_name": "ai" }),
        )
        .await
        .unwrap();
    let second: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second["enabled"].as_bool().unwrap(), !first_enabled);

    // The status endpoint reflects the flag
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();
    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/system/status", &token).await.unwrap();
    let status: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.get("ai").is_some());
}

#[tokio::test]
async fn test_bot_settings_lifecycle_gate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant = server.seed_principal(Role::Tenant, 100).await.unwrap();
    let token = server.login_token(&tenant.email).await.unwrap();

    // Reads work and seed defaults
    let response = server
        .get_auth("/api/v1/system/bot-settings", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Updates work while active
    let response = server
        .post_auth(
            "/api/v1/system/bot-settings",
            &token,
            &json!({ "opening_message": "Hi there!", "temperature": 0.9 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Pause the tenant; the token still validates but the action is gated
    let response = server
        .post_auth(
            &format!("/api/v1/users/{}/pause", tenant.id),
            &admin_token,
            &json!({ "reason": "billing", "pin": TEST_PIN }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/system/bot-settings",
            &token,
            &json!({ "opening_message": "Still here?" }),
        )
        .await
        .unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "ACCOUNT_PAUSED");
    assert!(error.error.message.contains("billing"));
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_contact_form_lands_as_admin_broadcast() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();

    let marker = format!("Inquiry {}", Uuid::new_v4());
    let response = server
        .post(
            "/api/v1/contact",
            &json!({
                "name": marker,
                "email": "prospect@example.com",
                "message": "I would like a demo",
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Admins see the broadcast
    let response = server
        .get_auth("/api/v1/notifications", &admin_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationView> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let found = notifications
        .iter()
        .find(|n| n.title.contains(&marker))
        .expect("broadcast visible to admin");
    assert_eq!(found.kind, "contact_form");
    assert!(!found.read);

    // Tenants do not
    let tenant = server.seed_principal(Role::Tenant, 0).await.unwrap();
    let token = server.login_token(&tenant.email).await.unwrap();
    let response = server.get_auth("/api/v1/notifications", &token).await.unwrap();
    let tenant_view: Vec<NotificationView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(tenant_view.iter().all(|n| !n.title.contains(&marker)));

    // Mark read is idempotent
    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{}/read", found.id),
            &admin_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{}/read", found.id),
            &admin_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_broadcast_to_selected_tenants() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let admin_token = server.admin_token().await.unwrap();
    let tenant_a = server.seed_principal(Role::Tenant, 0).await.unwrap();
    let tenant_b = server.seed_principal(Role::Tenant, 0).await.unwrap();

    let subject = format!("Maintenance window {}", Uuid::new_v4());
    let response = server
        .post_auth(
            "/api/v1/users/broadcast",
            &admin_token,
            &json!({
                "subject": subject,
                "message": "Saturday 02:00 UTC",
                "recipients": "individual",
                "recipient_ids": [tenant_a.id],
            }),
        )
        .await
        .unwrap();
    let result: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result["users_count"], 1);

    // Addressed tenant sees it and its unread count moves
    let token_a = server.login_token(&tenant_a.email).await.unwrap();
    let response = server
        .get_auth("/api/v1/notifications?unread_only=true", &token_a)
        .await
        .unwrap();
    let notifications: Vec<NotificationView> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notifications.iter().any(|n| n.title == subject));

    let response = server
        .get_auth("/api/v1/notifications/unread-count", &token_a)
        .await
        .unwrap();
    let unread: UnreadCount = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unread.count >= 1);

    // The other tenant does not see it
    let token_b = server.login_token(&tenant_b.email).await.unwrap();
    let response = server.get_auth("/api/v1/notifications", &token_b).await.unwrap();
    let notifications: Vec<NotificationView> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notifications.iter().all(|n| n.title != subject));
}
