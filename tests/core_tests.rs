//! End-to-end checks of the tokenizer, index resolver, slice engine and
//! argument decoder through the public API.

use seqcall::argument::{
    decode_arguments, resolve_index, slice, split, split_nonempty, DecodedArgs, IndexPolicy,
    OperationKind,
};
use seqcall::errors::{ErrorCategory, ErrorKind};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

mod tokenizer {
    use super::*;

    #[test]
    fn plain_text_round_trips() {
        for input in ["abc", "hello world", "x y z 123", ""] {
            assert_eq!(split(input, &[',']), vec![input]);
        }
    }

    #[test]
    fn quote_and_escape_examples() {
        assert_eq!(split("A,\"B,C\",D", &[',']), strings(&["A", "B,C", "D"]));
        assert_eq!(split("A\\,B,C", &[',']), strings(&["A,B", "C"]));
    }

    #[test]
    fn empty_tokens_only_removed_on_request() {
        assert_eq!(split(",,", &[',']).len(), 3);
        assert!(split_nonempty(",,", &[',']).is_empty());
    }
}

mod index_resolution {
    use super::*;

    #[test]
    fn element_policy() {
        assert_eq!(resolve_index("-1", 5, IndexPolicy::Element).unwrap(), 4);
        assert!(resolve_index("5", 5, IndexPolicy::Element).is_err());
        assert!(resolve_index("-6", 5, IndexPolicy::Element).is_err());
    }

    #[test]
    fn position_policy() {
        assert_eq!(resolve_index("5", 5, IndexPolicy::Position).unwrap(), 5);
        assert!(resolve_index("6", 5, IndexPolicy::Position).is_err());
    }

    #[test]
    fn empty_sequence_convention() {
        assert_eq!(resolve_index("0", 0, IndexPolicy::Element).unwrap(), 0);
        assert_eq!(resolve_index("-3", 0, IndexPolicy::Position).unwrap(), 0);
    }
}

mod slicing {
    use super::*;

    #[test]
    fn full_copy_is_independent() {
        let source = strings(&["a", "b", "c"]);
        let empty: [&str; 0] = [];
        let mut copy = slice(&source, &empty, source.len());
        assert_eq!(copy, source);
        copy.push("d".into());
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn decode_then_slice_with_strides() {
        let source = strings(&["A", "B", "C", "D", "E", "F"]);
        let forward = decode_arguments("0,6,2", OperationKind::Slice, 6, ',').unwrap();
        assert_eq!(forward.apply_slice(&source).unwrap(), strings(&["A", "C", "E"]));

        let backward = decode_arguments("0,6,-3", OperationKind::Slice, 6, ',').unwrap();
        let result = backward.apply_slice(&source).unwrap();
        assert_eq!(result.len(), 6 / 3);
        assert_eq!(result, strings(&["F", "C"]));
    }

    #[test]
    fn out_of_range_start_is_empty_not_failure() {
        let source = strings(&["a", "b", "c", "d", "e"]);
        assert!(slice(&source, &["100"], 5).is_empty());
    }
}

mod decoding {
    use super::*;

    #[test]
    fn insert() {
        assert_eq!(
            decode_arguments("2,X,Y", OperationKind::Insert, 4, ',').unwrap(),
            DecodedArgs::IndexAndValues {
                position: 2,
                values: strings(&["X", "Y"]),
            }
        );
        assert_eq!(
            decode_arguments("2,", OperationKind::Insert, 4, ',').unwrap(),
            DecodedArgs::IndexAndValues {
                position: 2,
                values: vec![],
            }
        );
    }

    #[test]
    fn replace_arity() {
        for raw in ["A", "A,B,C"] {
            let err = decode_arguments(raw, OperationKind::TwoValues, 3, ',').unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Decode);
            assert!(matches!(err.kind, ErrorKind::Decode { .. }));
        }
        assert!(decode_arguments("A,B", OperationKind::TwoValues, 3, ',').is_ok());
    }

    #[test]
    fn decode_error_carries_argument_as_source() {
        let err = decode_arguments("A,B,C", OperationKind::TwoValues, 3, ',').unwrap_err();
        let rendered = format!("{:?}", miette::Report::new(err));
        assert!(rendered.contains("seqcall::decode::decode"));
        assert!(rendered.contains("A,B,C"));
    }
}
