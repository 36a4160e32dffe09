// SPDX-License-Identifier: Apache-2.0

use gotong_core::{to_ether, to_wei, ExitCode, MachineError, ResultExt, UnitError};

#[test]
fn display_and_debug_contracts_are_stable() {
    assert_eq!(format!("{:?}", ExitCode::Validation), "Validation");
    assert_eq!(ExitCode::DependencyFailure.as_str(), "dependency_failure");
    assert_eq!(ExitCode::Internal as u8, 10);

    let err = MachineError::new("usage_error", "invalid").with_detail("arg", "--target");
    assert_eq!(format!("{err}"), "usage_error: invalid");
    let json = serde_json::to_string(&err).expect("encode machine error");
    assert_eq!(
        json,
        r#"{"code":"usage_error","message":"invalid","details":{"arg":"--target"}}"#
    );
}

#[test]
fn result_ext_attaches_static_context() {
    let r: Result<u128, UnitError> = to_wei("abc");
    let err = r.with_context("parse donation amount").expect_err("must error");
    assert_eq!(err.context, "parse donation amount");
    assert_eq!(err.source, UnitError::InvalidCharacter('a'));
    assert_eq!(
        err.to_string(),
        "parse donation amount: invalid character `a` in amount"
    );
}

#[test]
fn donator_amounts_render_as_human_decimals() {
    let raw = [1_000_000_000_000_000_000_u128, 500_000_000_000_000_000_u128];
    let rendered: Vec<String> = raw.iter().copied().map(to_ether).collect();
    assert_eq!(rendered, vec!["1".to_string(), "0.5".to_string()]);
}
