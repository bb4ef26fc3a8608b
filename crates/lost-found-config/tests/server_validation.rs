//! Server config validation tests for lost-found-config.
// crates/lost-found-config/tests/server_validation.rs
// =============================================================================
// Module: Server Config Validation Tests
// Description: Validate bind, body limit, CORS, and audit constraints.
// Purpose: Ensure listener configuration fails closed on bad input.
// =============================================================================

mod common;

use common::assert_invalid;

type TestResult = Result<(), String>;

#[test]
fn bind_must_be_socket_address() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "localhost".to_string();
    assert_invalid(config.validate(), "invalid bind address")?;
    Ok(())
}

#[test]
fn max_body_bytes_rejects_zero() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = 0;
    assert_invalid(config.validate(), "max_body_bytes must be greater than zero")?;
    Ok(())
}

#[test]
fn max_body_bytes_rejects_oversized_limit() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = lost_found_config::MAX_BODY_BYTES_LIMIT + 1;
    assert_invalid(config.validate(), "max_body_bytes must not exceed")?;
    Ok(())
}

#[test]
fn cors_origin_accepts_bare_origins() -> TestResult {
    for origin in ["http://localhost:5173", "https://lost.example.org", "*"] {
        let mut config = common::minimal_config().map_err(|err| err.to_string())?;
        config.server.cors.allowed_origin = origin.to_string();
        config.validate().map_err(|err| format!("{origin}: {err}"))?;
    }
    Ok(())
}

#[test]
fn cors_origin_rejects_paths_and_schemes() -> TestResult {
    for origin in [
        "http://localhost:5173/",
        "http://localhost:5173/app",
        "http://localhost:5173?x=1",
        "ftp://localhost",
        "localhost:5173",
        "",
        " http://localhost:5173",
    ] {
        let mut config = common::minimal_config().map_err(|err| err.to_string())?;
        config.server.cors.allowed_origin = origin.to_string();
        assert_invalid(config.validate(), "cors.allowed_origin")
            .map_err(|err| format!("{origin:?}: {err}"))?;
    }
    Ok(())
}

#[test]
fn audit_path_rejects_blank() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.audit.path = Some("   ".to_string());
    assert_invalid(config.validate(), "audit.path must be non-empty")?;
    Ok(())
}
