//! Property tests for token reconstruction

use proptest::prelude::*;
use tachtu_core::{Decoder, ResultView};

fn encode_text(chars: &[char]) -> Vec<u8> {
    chars.iter().flat_map(|&c| (c as u32).to_le_bytes()).collect()
}

fn encode_ranges(ranges: &[(i32, i32)]) -> Vec<u8> {
    ranges
        .iter()
        .flat_map(|&(start, end)| {
            [start, end, start, end, 0, 0]
                .into_iter()
                .flat_map(i32::to_le_bytes)
        })
        .collect()
}

fn encode_positions(positions: &[i32]) -> Vec<u8> {
    positions.iter().flat_map(|p| p.to_le_bytes()).collect()
}

/// Normalized text plus ranges that stay inside it
fn buffer_strategy() -> impl Strategy<Value = (Vec<char>, Vec<(i32, i32)>)> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'b', 'đ', 'ư', 'ờ', 'n', 'g', '1', ' ', '.']),
        1..40,
    )
    .prop_flat_map(|chars| {
        let len = chars.len() as i32;
        let range = (0..=len).prop_flat_map(move |start| (Just(start), start..=len));
        (Just(chars), prop::collection::vec(range, 0..12))
    })
}

proptest! {
    #[test]
    fn output_follows_range_order((chars, ranges) in buffer_strategy()) {
        let text = encode_text(&chars);
        let table = encode_ranges(&ranges);
        let view = ResultView::new(&text, &table, &[]).unwrap();

        let tokens = Decoder::new(false).decode(&view).unwrap();
        prop_assert_eq!(tokens.len(), ranges.len());
        for (token, &(start, end)) in tokens.iter().zip(&ranges) {
            prop_assert_eq!(token.normalized_range(), start as usize..end as usize);
            let expected: String = chars[start as usize..end as usize].iter().collect();
            prop_assert_eq!(token.text(), expected.as_str());
        }
    }

    #[test]
    fn decoding_twice_is_identical(
        (chars, ranges) in buffer_strategy(),
        positions in prop::collection::vec(0i32..40, 0..5),
        for_transforming in any::<bool>(),
    ) {
        let text = encode_text(&chars);
        let table = encode_ranges(&ranges);
        let spaces = encode_positions(&positions);
        let view = ResultView::new(&text, &table, &spaces).unwrap();

        let decoder = Decoder::new(for_transforming);
        prop_assert_eq!(decoder.decode(&view).unwrap(), decoder.decode(&view).unwrap());
    }

    #[test]
    fn only_first_position_inserts_separators(
        (chars, ranges) in buffer_strategy(),
        positions in prop::collection::vec(0i32..40, 1..5),
    ) {
        let text = encode_text(&chars);
        let table = encode_ranges(&ranges);
        let spaces = encode_positions(&positions);
        let view = ResultView::new(&text, &table, &spaces).unwrap();

        let tokens = Decoder::new(true).decode(&view).unwrap();
        let first = positions[0];
        for (token, &(start, end)) in tokens.iter().zip(&ranges) {
            let covers = start <= first && first < end;
            let extra = token.text().chars().count() - (end - start) as usize;
            prop_assert_eq!(extra, usize::from(covers));
        }
    }

    #[test]
    fn view_never_exposes_past_max_end((chars, ranges) in buffer_strategy()) {
        let text = encode_text(&chars);
        let table = encode_ranges(&ranges);
        let view = ResultView::new(&text, &table, &[]).unwrap();

        let max_end = ranges.iter().map(|&(_, end)| end as usize).max().unwrap_or(0);
        prop_assert_eq!(view.max_range_end(), max_end);
        prop_assert!(view.codepoint(max_end).is_err());
    }
}
