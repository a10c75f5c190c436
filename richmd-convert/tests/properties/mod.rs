//! Algebraic laws of the emphasis delimiter helpers

use proptest::prelude::*;
use richmd_convert::emphasis::{can_use, shift_delimiter, EmphasisSpan};

fn delimiter() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("*"), Just("**"), Just("_")]
}

proptest! {
    // The outermost positions flank regardless of the adjacent characters.
    #[test]
    fn boundary_positions_always_flank(s in ".{1,20}") {
        let len = s.chars().count();
        prop_assert!(can_use(&s, 0, true));
        prop_assert!(can_use(&s, len - 1, false));
    }

    // Trimming must finish with a well-formed span whatever the content.
    #[test]
    fn trim_terminates_within_bounds(content in ".{0,40}", delim in delimiter()) {
        let dlen = delim.chars().count();
        let clen = content.chars().count();
        let text = format!("{delim}{content}{delim}");
        let span = EmphasisSpan::new(text, dlen, dlen + clen).trim(delim);
        prop_assert!(span.from <= span.to);
        prop_assert!(span.to <= span.text.chars().count());
    }

    // Whitespace-only content always degenerates; the collapsed output must
    // carry neither delimiter token.
    #[test]
    fn whitespace_only_spans_collapse(ws in " {0,5}", delim in delimiter()) {
        let dlen = delim.chars().count();
        let clen = ws.chars().count();
        let text = format!("{delim}{ws}{delim}");
        let span = EmphasisSpan::new(text, dlen, dlen + clen).trim(delim);
        prop_assert_eq!(span.from, span.to);
        prop_assert!(!span.text.contains(delim));
    }

    // A span the trimmer decided to keep is a fixed point.
    #[test]
    fn trim_is_idempotent_on_kept_spans(content in "[ a-z.]{0,20}", delim in delimiter()) {
        let dlen = delim.chars().count();
        let clen = content.chars().count();
        let text = format!("{delim}{content}{delim}");
        let once = EmphasisSpan::new(text, dlen, dlen + clen).trim(delim);
        if once.to - once.from >= dlen + 1 {
            let twice = once.clone().trim(delim);
            prop_assert_eq!(twice, once);
        }
    }

    // Shifting a token and shifting it back restores the original text.
    #[test]
    fn shift_is_reversible(content in "[a-z]{0,10}", k in 0usize..5) {
        prop_assume!(k <= content.chars().count());
        let text = format!("*{content}");
        let moved = shift_delimiter(&text, "*", 0, k as isize);
        let back = shift_delimiter(&moved, "*", k, -(k as isize));
        prop_assert_eq!(back, text);
    }
}
