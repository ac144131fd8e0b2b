//! Property tests for turn assembly.

use capture::{assemble_turns, Platform, RawBlock, Role};
use proptest::prelude::*;

proptest! {
    #[test]
    fn untagged_blocks_map_one_to_one_and_alternate(texts in prop::collection::vec("[a-z ]{1,40}", 0..30)) {
        let blocks: Vec<RawBlock> = texts.iter().map(RawBlock::new).collect();
        let transcript = assemble_turns(blocks, Platform::Gemini);

        prop_assert_eq!(transcript.turns.len(), texts.len());
        for (i, turn) in transcript.turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Human } else { Role::Assistant };
            prop_assert_eq!(turn.role, expected);
            prop_assert_eq!(&turn.text, &texts[i]);
        }
    }

    #[test]
    fn tagged_blocks_come_out_in_position_order(order in Just((0..12usize).collect::<Vec<_>>()).prop_shuffle()) {
        let blocks: Vec<RawBlock> = order
            .iter()
            .map(|&p| RawBlock::tagged(format!("message {p}"), Role::by_position(p), p))
            .collect();
        let transcript = assemble_turns(blocks, Platform::ChatGpt);

        prop_assert_eq!(transcript.turns.len(), order.len());
        for (i, turn) in transcript.turns.iter().enumerate() {
            prop_assert_eq!(&turn.text, &format!("message {i}"));
            prop_assert_eq!(turn.role, Role::by_position(i));
        }
    }
}
