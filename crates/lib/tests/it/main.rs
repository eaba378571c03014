/*! Integration tests for Gatekey.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - auth: Tests for the credential/session state machine
 * - request: Tests for the request-authentication strategies
 * - store: Tests for the UserStore trait and the in-memory implementation
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gatekey=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod auth;
mod store;
