use atapro::domain::RemoteFileState;

#[test]
fn given_wire_states_when_parsing_then_round_trip_through_as_str() {
    for state in [
        RemoteFileState::Unspecified,
        RemoteFileState::Processing,
        RemoteFileState::Active,
        RemoteFileState::Failed,
    ] {
        assert_eq!(state.as_str().parse::<RemoteFileState>(), Ok(state));
    }
}

#[test]
fn given_states_when_checking_readiness_then_only_processing_is_pending() {
    assert!(RemoteFileState::Processing.is_pending());
    assert!(!RemoteFileState::Active.is_pending());
    assert!(!RemoteFileState::Unspecified.is_pending());
    assert!(RemoteFileState::Failed.is_failed());
}
