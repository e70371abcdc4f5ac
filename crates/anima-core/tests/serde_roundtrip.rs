#![cfg(feature = "serde")]

use anima_core::{AgentId, WorldState};

#[test]
fn world_state_json_roundtrip() {
    let state = WorldState::new().with(0, true).with(1, 30).with(2, "b");

    let json = serde_json::to_string(&state).expect("serialize");
    assert_eq!(json, r#"{"0":true,"1":30,"2":"b"}"#);

    let roundtrip: WorldState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, state);
}

#[test]
fn agent_id_is_a_bare_number() {
    let json = serde_json::to_string(&AgentId(7)).expect("serialize");
    assert_eq!(json, "7");
}
