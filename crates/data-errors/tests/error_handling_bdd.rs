//! Behavioural tests for backend failure normalization.
//!
//! Scenarios cover classification precedence, wrapper idempotence, and the
//! serialized error shape.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use data_errors::{DataError, ErrorCode, ErrorKind, Failure, classify, with_error_handling};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

/// Test world holding the payload under test and what became of it.
#[derive(Default, ScenarioState)]
struct World {
    payload: Slot<Value>,
    domain_error: Slot<DataError>,
    classified: Slot<DataError>,
    wrapped: Slot<Result<(), DataError>>,
    serialized: Slot<Value>,
}

impl World {
    fn payload(&self) -> Value {
        self.payload.get().expect("payload should be set")
    }

    fn classified(&self) -> DataError {
        self.classified.get().expect("payload should be classified")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime builds")
        .block_on(future)
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a backend payload with status 401 and message Not authenticated")]
fn unauthorized_payload(world: &World) {
    world
        .payload
        .set(json!({ "status": 401, "message": "Not authenticated" }));
}

#[given("a backend payload with code 23505 and message Resource not found")]
fn unique_violation_payload(world: &World) {
    world
        .payload
        .set(json!({ "code": "23505", "message": "Resource not found" }));
}

#[given("a backend payload with code 23503 and message insert or update violates foreign key")]
fn foreign_key_payload(world: &World) {
    world.payload.set(json!({
        "code": "23503",
        "message": "insert or update violates foreign key",
        "hint": "internal table layout",
    }));
}

#[given("a domain error for a missing user")]
fn missing_user_error(world: &World) {
    world.domain_error.set(
        DataError::not_found("User", Some("123")).with_original_error(json!({ "code": "x" })),
    );
}

// ============================================================================
// When steps
// ============================================================================

#[when("the payload is classified")]
fn the_payload_is_classified(world: &World) {
    world.classified.set(classify(&world.payload()));
}

#[when("the domain error is raised inside the wrapper")]
fn raised_inside_wrapper(world: &World) {
    let error = world.domain_error.get().expect("domain error should be set");
    let result = run(with_error_handling(
        async move { Err::<(), Failure>(Failure::Domain(error)) },
        Some("User"),
    ));
    world.wrapped.set(result);
}

#[when("the error is serialized")]
fn the_error_is_serialized(world: &World) {
    let value = serde_json::to_value(world.classified()).expect("error serializes");
    world.serialized.set(value);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the error is an unauthorized error")]
fn is_unauthorized(world: &World) {
    let error = world.classified();
    assert_eq!(error.kind(), ErrorKind::Unauthorized);
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[then("the error message is the backend message")]
fn keeps_backend_message(world: &World) {
    let expected = world.payload();
    assert_eq!(
        Some(world.classified().message()),
        expected.get("message").and_then(Value::as_str)
    );
}

#[then("the error code is a unique violation")]
fn is_unique_violation(world: &World) {
    assert_eq!(world.classified().code(), ErrorCode::UniqueViolation);
}

#[then("the wrapper returns the same domain error")]
fn wrapper_returns_same_error(world: &World) {
    let expected = world.domain_error.get().expect("domain error should be set");
    let returned = world
        .wrapped
        .get()
        .expect("wrapper should have run")
        .expect_err("wrapper should fail");
    assert_eq!(returned, expected);
    assert_eq!(returned.original_error(), expected.original_error());
}

#[then("the serialized error has only name, message, code and details")]
fn serialized_shape(world: &World) {
    let value = world.serialized.get().expect("error should be serialized");
    let mut keys: Vec<_> = value
        .as_object()
        .expect("serialized error is an object")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    assert_eq!(keys, ["code", "details", "message", "name"]);
    assert_eq!(value.get("code"), Some(&json!("FOREIGN_KEY_VIOLATION")));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/error_handling.feature",
    name = "Unauthorized status becomes an unauthorized error"
)]
fn unauthorized_status_becomes_an_unauthorized_error(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/error_handling.feature",
    name = "Unique violation code wins over not-found text"
)]
fn unique_violation_code_wins_over_not_found_text(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/error_handling.feature",
    name = "Domain errors pass through the wrapper unchanged"
)]
fn domain_errors_pass_through_the_wrapper_unchanged(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/error_handling.feature",
    name = "Serialized errors omit the backend payload"
)]
fn serialized_errors_omit_the_backend_payload(world: World) {
    let _ = world;
}
