use issy::signal::{invert_state, invert_state_with, SignalEncoding};
use proptest::prelude::*;

proptest! {
    #[test]
    fn inversion_is_an_involution_over_red_and_green(state in "[Gr]{0,64}") {
        let once = invert_state(&state, SignalEncoding::Sumo);
        let twice = invert_state(&once, SignalEncoding::Sumo);
        prop_assert_eq!(twice, state);
    }

    #[test]
    fn inversion_preserves_length(state in "[rygGsuoO]{0,64}") {
        let inverted = invert_state(&state, SignalEncoding::Sumo);
        prop_assert_eq!(inverted.chars().count(), state.chars().count());
    }

    #[test]
    fn inversion_only_emits_red_and_green_for_core_codes(state in "[rygG]{1,64}") {
        let inverted = invert_state(&state, SignalEncoding::Sumo);
        prop_assert!(inverted.chars().all(|c| c == 'r' || c == 'G'));
    }

    #[test]
    fn unknown_encodings_never_succeed(api in "[a-z]{1,12}") {
        prop_assume!(api != "sumo" && api != "traci");
        prop_assert!(invert_state_with("GrG", &api).is_err());
    }
}
