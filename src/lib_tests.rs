use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_VIOLATIONS);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_VIOLATIONS, EXIT_CONFIG_ERROR);
}

#[test]
fn exit_codes_match_hook_contract() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_VIOLATIONS, 1);
    assert_eq!(EXIT_CONFIG_ERROR, 2);
}
