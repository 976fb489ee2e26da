//! Maps as parallel key and value lists.
//!
//! An empty map is written as a single sentinel entry together with the
//! `is_empty` flag, so that it decodes back to an empty map rather than to an
//! absent one. Only the flag marks emptiness: a real entry that happens to
//! equal the sentinel decodes as itself. On decode, keys and values are paired
//! up positionally and any surplus on either side is dropped.

use std::collections::BTreeMap;

use crate::wire;

/// Sentinel key written for an explicitly empty string-keyed map.
pub const EMPTY_STRING_KEY: &str = "\u{0}empty";

/// Sentinel key written for an explicitly empty integer-keyed map.
pub const EMPTY_INT_KEY: u32 = u32::MAX;

fn split<K: Clone, V: Clone>(
    map: &BTreeMap<K, V>,
    sentinel: (K, V),
) -> (Vec<K>, Vec<V>, Option<bool>) {
    if map.is_empty() {
        return (vec![sentinel.0], vec![sentinel.1], Some(true));
    }
    let (keys, values) = map.iter().map(|(k, v)| (k.clone(), v.clone())).unzip();
    (keys, values, None)
}

fn join<K: Ord, V>(keys: Vec<K>, values: Vec<V>, is_empty: Option<bool>) -> BTreeMap<K, V> {
    if is_empty == Some(true) {
        return BTreeMap::new();
    }
    if keys.len() != values.len() {
        tracing::trace!(
            keys = keys.len(),
            values = values.len(),
            "association list lengths differ; extra entries dropped"
        );
    }
    keys.into_iter().zip(values).collect()
}

pub fn string_map_to_wire(map: &BTreeMap<String, String>) -> wire::StringStringMap {
    let (keys, values, is_empty) = split(map, (EMPTY_STRING_KEY.to_string(), String::new()));
    wire::StringStringMap { keys, values, is_empty }
}

pub fn string_map_from_wire(map: wire::StringStringMap) -> BTreeMap<String, String> {
    join(map.keys, map.values, map.is_empty)
}

pub fn double_map_to_wire(map: &BTreeMap<String, f64>) -> wire::StringDoubleMap {
    let (keys, values, is_empty) = split(map, (EMPTY_STRING_KEY.to_string(), 0.0));
    wire::StringDoubleMap { keys, values, is_empty }
}

pub fn double_map_from_wire(map: wire::StringDoubleMap) -> BTreeMap<String, f64> {
    join(map.keys, map.values, map.is_empty)
}

pub fn int_map_to_wire(map: &BTreeMap<u32, u32>) -> wire::IntIntMap {
    let (keys, values, is_empty) = split(map, (EMPTY_INT_KEY, 0));
    wire::IntIntMap { keys, values, is_empty }
}

pub fn int_map_from_wire(map: wire::IntIntMap) -> BTreeMap<u32, u32> {
    join(map.keys, map.values, map.is_empty)
}
