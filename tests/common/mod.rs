//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use cmdtree::arguments::{ArgumentExt, IntegerArgument, MapArgument};
use cmdtree::Node;

pub const ROOT_REPLY: &str = "nothing here";

pub fn map_params() -> BTreeMap<String, i32> {
    [("test1", 1), ("test2", 2), ("test3", 3), ("test3test", 3), ("boom", 3)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// The reference tree most parse and suggest tests run against.
pub fn sample_tree() -> Node<(), String> {
    Node::root()
        .executes(|_| ROOT_REPLY.to_string())
        .then(Node::literal("hello1"))
        .then(Node::literal("hello2").then(Node::literal("world1")))
        .then(
            Node::literal("hello3")
                .then(Node::argument("map1", MapArgument::from_map(map_params()))),
        )
        .then(Node::literal("hello4").then(Node::argument("int1", IntegerArgument::new())))
        .then(
            Node::literal("hello5").then(
                Node::argument("int2", IntegerArgument::new()).executes(|ctx| {
                    let int2 = ctx.get_argument::<i32>("int2").copied().unwrap_or_default();
                    format!("int2 is {int2}")
                }),
            ),
        )
        .then(Node::literal("allow separator literal").then(Node::literal("world2")))
        .then(
            Node::literal("hello6")
                .then(Node::argument("int3", IntegerArgument::new().with_default(0))),
        )
        .then(Node::literal("hello6hello"))
        .then(Node::keyed_literal("hello7", vec![("hello7", 1), ("hello8", 2)]))
        .then(Node::literal("HELLO9"))
}

/// Every root-level literal name in declaration order.
pub fn root_names() -> Vec<&'static str> {
    vec![
        "hello1",
        "hello2",
        "hello3",
        "hello4",
        "hello5",
        "allow separator literal",
        "hello6",
        "hello6hello",
        "hello7",
        "hello8",
        "HELLO9",
    ]
}
