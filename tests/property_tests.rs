// Property checks: parsing is deterministic, suggestion is repeatable, and
// matching never loses or invents input.

mod common;

use cmdtree::arguments::IntegerArgument;
use cmdtree::CursorReader;
use common::sample_tree;
use proptest::prelude::*;

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("hello1".to_string()),
            Just("hello2".to_string()),
            Just("world1".to_string()),
            Just("hello3".to_string()),
            Just("test3".to_string()),
            Just("hello6".to_string()),
            Just("allow".to_string()),
            Just("separator".to_string()),
            Just("literal".to_string()),
            "-?[0-9]{1,12}",
            "[a-z]{0,6}",
        ],
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn parsing_is_deterministic(input in words()) {
        let tree = sample_tree();
        let first = tree.parse(&input, ());
        let second = tree.parse(&input, ());
        prop_assert_eq!(first.size(), second.size());
        prop_assert_eq!(first.unparsed(), second.unparsed());
        prop_assert_eq!(first.is_executable(), second.is_executable());
        let keys = |ctx: &cmdtree::Context<(), String>| {
            ctx.slots().map(|slot| (slot.key().to_string(), slot.is_present())).collect::<Vec<_>>()
        };
        prop_assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn unparsed_is_a_suffix_of_the_input(input in words()) {
        let context = sample_tree().parse(&input, ());
        prop_assert!(input.ends_with(context.unparsed()));
    }

    #[test]
    fn suggesting_twice_gives_the_same_answer(input in words(), trailing in any::<bool>()) {
        let tree = sample_tree();
        let input = if trailing { format!("{input} ") } else { input };
        prop_assert_eq!(tree.suggest(&input, ()), tree.suggest(&input, ()));
    }

    #[test]
    fn failed_integer_parses_leave_the_reader_alone(token in "[a-z0-9.+-]{1,8}") {
        use cmdtree::Argument;
        let tree: cmdtree::Node<(), ()> = cmdtree::Node::root();
        let context = tree.parse("", ());
        let mut reader = CursorReader::new(&token);
        let result = Argument::<(), ()>::parse(&IntegerArgument::new(), &mut reader, &context);
        if !result.is_success() {
            prop_assert_eq!(reader.offset(), 0);
        }
    }
}
