//! Whole-remainder operators. Each one receives every element still
//! unconsumed when it becomes active and returns the new sequence.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use ginq_core::error::StepError;
use ginq_core::step::Operation;
use ginq_core::value::Value;

/// Stable ascending sort.
pub fn sort<T: Ord + 'static>() -> Operation<T> {
    Operation::bulk("sort", |mut xs: Vec<T>| {
        xs.sort();
        Ok(xs)
    })
}

pub fn sort_by<T, F>(mut cmp: F) -> Operation<T>
where
    T: 'static,
    F: FnMut(&T, &T) -> Ordering + 'static,
{
    Operation::bulk("sort_by", move |mut xs: Vec<T>| {
        xs.sort_by(&mut cmp);
        Ok(xs)
    })
}

pub fn sort_by_key<T, K, F>(mut key: F) -> Operation<T>
where
    T: 'static,
    K: Ord + 'static,
    F: FnMut(&T) -> K + 'static,
{
    Operation::bulk("sort_by_key", move |mut xs: Vec<T>| {
        xs.sort_by_key(&mut key);
        Ok(xs)
    })
}

/// Drop repeats, keeping the first occurrence of each element in place.
pub fn distinct<T>() -> Operation<T>
where
    T: Eq + Hash + Clone + 'static,
{
    Operation::bulk("distinct", |xs: Vec<T>| {
        let mut seen = HashSet::with_capacity(xs.len());
        Ok(xs.into_iter().filter(|x| seen.insert(x.clone())).collect())
    })
}

pub fn reverse<T: 'static>() -> Operation<T> {
    Operation::bulk("reverse", |mut xs: Vec<T>| {
        xs.reverse();
        Ok(xs)
    })
}

/// Group by `key`, then fold each group into one element with `fold`.
///
/// Groups come out in the order their keys were first seen; members keep
/// their relative order.
pub fn group_by<T, K, KF, GF>(mut key: KF, mut fold: GF) -> Operation<T>
where
    T: 'static,
    K: Eq + Hash + Clone + 'static,
    KF: FnMut(&T) -> K + 'static,
    GF: FnMut(K, Vec<T>) -> T + 'static,
{
    Operation::bulk("group_by", move |xs: Vec<T>| {
        let mut order: Vec<K> = Vec::new();
        let mut groups: HashMap<K, Vec<T>> = HashMap::new();
        for x in xs {
            let k = key(&x);
            groups
                .entry(k)
                .or_insert_with_key(|k| {
                    order.push(k.clone());
                    Vec::new()
                })
                .push(x);
        }
        Ok(order
            .into_iter()
            .filter_map(|k| groups.remove(&k).map(|members| fold(k, members)))
            .collect())
    })
}

/// `group_by` for dynamic values: each group becomes
/// `List([key, List(members)])`, tagged `"group"`.
pub fn group_values<F>(key: F) -> Operation<Value>
where
    F: FnMut(&Value) -> Value + 'static,
{
    group_by(key, |k, members| Value::List(vec![k, Value::List(members)]))
        .with_result_tag("group")
}

/// Wrap an arbitrary fallible whole-sequence step.
pub fn try_bulk<T, E, F>(name: impl Into<Cow<'static, str>>, mut f: F) -> Operation<T>
where
    T: 'static,
    E: Into<StepError> + 'static,
    F: FnMut(Vec<T>) -> Result<Vec<T>, E> + 'static,
{
    Operation::bulk(name, move |xs| f(xs).map_err(Into::into))
}
