use brackets_core::{LineIndex, LineLocatorError, clamp_offset, line_number};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_documented_examples() {
    assert_eq!(line_number("", 0), Ok(1));
    assert_eq!(line_number("a\nb\nc", 0), Ok(1));
    assert_eq!(line_number("a\nb\nc", 2), Ok(2));
    assert_eq!(line_number("a\nb\nc", 4), Ok(3));
    assert_eq!(line_number("a\n", 2), Ok(2));
}

#[test]
fn test_end_of_buffer_with_trailing_newline() {
    let text = "one\ntwo\nthree\n";
    let newlines = text.matches('\n').count();
    assert_eq!(line_number(text, text.len()), Ok(newlines + 1));
}

#[test]
fn test_out_of_range_requires_clamping() {
    let text = "a\nb";
    assert_eq!(
        line_number(text, 4),
        Err(LineLocatorError::OutOfRange { offset: 4, len: 3 })
    );
    assert_eq!(line_number(text, clamp_offset(text, 4)), Ok(2));
}

/// Reference numbering from the split-based per-line walk: line `i` (1-based) owns the offsets
/// from its first unit through its last unit, plus the position just before its newline.
fn split_reference(text: &str, offset: usize) -> usize {
    let mut start = 0usize;
    let lines: Vec<&str> = text.split('\n').collect();
    for (index, line) in lines.iter().enumerate() {
        let end = start + line.encode_utf16().count();
        if offset <= end {
            return index + 1;
        }
        start = end + 1;
    }
    lines.len()
}

fn random_text(rng: &mut StdRng) -> String {
    const ALPHABET: [&str; 7] = ["a", "b", "\n", "\n", " ", "你", "👋"];
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

#[test]
fn test_locators_agree_on_random_buffers() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let text = random_text(&mut rng);
        let index = LineIndex::from_text(&text);
        let len = index.len_utf16();
        assert_eq!(len, text.encode_utf16().count());

        for offset in 0..=len {
            let offset = clamp_offset(&text, offset);
            let expected = split_reference(&text, offset);
            assert_eq!(line_number(&text, offset), Ok(expected), "{text:?} @ {offset}");
            assert_eq!(index.line_number(offset), Ok(expected), "{text:?} @ {offset}");
        }
        assert!(line_number(&text, len + 1).is_err());
        assert!(index.line_number(len + 1).is_err());
    }
}
