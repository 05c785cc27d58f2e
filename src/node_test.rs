// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::types::{encode_i64, LONG_HASH, LONG_SET};

#[test]
fn serialize_then_deserialize_round_trips_a_leaf() {
    let mut node = Node::new_leaf(false);
    node.scores.push(encode_i64(10));
    node.scores.push(encode_i64(20));
    node.scores.push(encode_i64(30));

    let bytes = node.serialize(&LONG_SET);
    let parsed = Node::deserialize(&bytes, &LONG_SET, 8).unwrap();
    assert_eq!(parsed, node);
    assert!(parsed.is_leaf());
}

#[test]
fn serialize_then_deserialize_round_trips_an_internal_node() {
    // size=3, keys=[10,20,30], children=[7,8,9,11] -- a node whose
    // trailing child id is not simply "last + 1", exercising the general
    // deserialize path rather than an arithmetic coincidence.
    let mut node = Node::new_internal(false);
    node.scores.push(encode_i64(10));
    node.scores.push(encode_i64(20));
    node.scores.push(encode_i64(30));
    node.children = Some(vec![7, 8, 9, 11]);

    let bytes = node.serialize(&LONG_SET);
    let parsed = Node::deserialize(&bytes, &LONG_SET, 8).unwrap();
    assert_eq!(parsed, node);
    assert!(!parsed.is_leaf());
    assert_eq!(parsed.children, Some(vec![7, 8, 9, 11]));
}

#[test]
fn round_trip_carries_values_for_hash_typed_nodes() {
    let mut node = Node::new_leaf(true);
    node.scores.push(encode_i64(1));
    node.scores.push(encode_i64(2));
    node.values = Some(vec![encode_i64(100), encode_i64(200)]);

    let bytes = node.serialize(&LONG_HASH);
    let parsed = Node::deserialize(&bytes, &LONG_HASH, 8).unwrap();
    assert_eq!(parsed, node);
}

#[test]
fn deserialize_rejects_size_over_max_node_size() {
    let mut node = Node::new_leaf(false);
    for i in 0..5 {
        node.scores.push(encode_i64(i));
    }
    let bytes = node.serialize(&LONG_SET);
    assert!(Node::deserialize(&bytes, &LONG_SET, 4).is_err());
}

#[test]
fn deserialize_rejects_truncated_buffer() {
    let mut node = Node::new_leaf(false);
    node.scores.push(encode_i64(1));
    let mut bytes = node.serialize(&LONG_SET);
    bytes.truncate(bytes.len() - 2);
    assert!(Node::deserialize(&bytes, &LONG_SET, 8).is_err());
}

#[test]
fn all_zero_children_deserialize_as_a_leaf() {
    // A node with a children array that happens to be all zeros is
    // indistinguishable from a leaf in the wire format, by construction.
    let mut node = Node::new_leaf(false);
    node.scores.push(encode_i64(5));
    let bytes = node.serialize(&LONG_SET);
    let parsed = Node::deserialize(&bytes, &LONG_SET, 8).unwrap();
    assert!(parsed.is_leaf());
}

#[test]
fn insert_entry_shifts_scores_values_and_children() {
    let mut node = Node::new_internal(true);
    node.scores = vec![encode_i64(1), encode_i64(3)];
    node.values = Some(vec![encode_i64(10), encode_i64(30)]);
    node.children = Some(vec![100, 101, 102]);

    node.insert_entry(1, encode_i64(2), Some(encode_i64(20)), Some(200));

    assert_eq!(node.scores, vec![encode_i64(1), encode_i64(2), encode_i64(3)]);
    assert_eq!(node.values, Some(vec![encode_i64(10), encode_i64(20), encode_i64(30)]));
    assert_eq!(node.children, Some(vec![100, 101, 200, 102]));
}

#[test]
fn remove_entry_returns_the_removed_pair_and_shifts_left() {
    let mut node = Node::new_leaf(true);
    node.scores = vec![encode_i64(1), encode_i64(2), encode_i64(3)];
    node.values = Some(vec![encode_i64(10), encode_i64(20), encode_i64(30)]);

    let (score, value) = node.remove_entry(1);
    assert_eq!(score, encode_i64(2));
    assert_eq!(value, Some(encode_i64(20)));
    assert_eq!(node.scores, vec![encode_i64(1), encode_i64(3)]);
}

#[test]
fn prepend_and_append_entry_place_child_on_the_correct_side() {
    let mut node = Node::new_internal(false);
    node.scores = vec![encode_i64(5)];
    node.children = Some(vec![10, 11]);

    node.prepend_entry(encode_i64(1), None, Some(9));
    assert_eq!(node.scores, vec![encode_i64(1), encode_i64(5)]);
    assert_eq!(node.children, Some(vec![9, 10, 11]));

    node.append_entry(encode_i64(8), None, Some(12));
    assert_eq!(node.scores, vec![encode_i64(1), encode_i64(5), encode_i64(8)]);
    assert_eq!(node.children, Some(vec![9, 10, 11, 12]));
}

#[test]
fn pop_last_and_pop_first_remove_the_matching_child() {
    let mut node = Node::new_internal(false);
    node.scores = vec![encode_i64(1), encode_i64(2)];
    node.children = Some(vec![100, 101, 102]);

    let (score, _value, child) = node.pop_last();
    assert_eq!(score, encode_i64(2));
    assert_eq!(child, Some(102));
    assert_eq!(node.children, Some(vec![100, 101]));

    let (score, _value, child) = node.pop_first();
    assert_eq!(score, encode_i64(1));
    assert_eq!(child, Some(100));
    assert_eq!(node.children, Some(vec![101]));
}

#[test]
fn append_node_moves_all_entries_onto_the_end() {
    let mut left = Node::new_internal(false);
    left.scores = vec![encode_i64(1)];
    left.children = Some(vec![10, 11]);

    let mut right = Node::new_internal(false);
    right.scores = vec![encode_i64(3), encode_i64(4)];
    right.children = Some(vec![20, 21, 22]);

    left.append_node(right);

    assert_eq!(left.scores, vec![encode_i64(1), encode_i64(3), encode_i64(4)]);
    assert_eq!(left.children, Some(vec![10, 11, 20, 21, 22]));
}
