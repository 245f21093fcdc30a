use rcedit::cost::Cost;
use rcedit::heap::IndexedMaxHeap;
use rcedit::types::RankId;
use rcedit::util::rank_vec::RankVec;

// ---- RankVec tests ----

#[test]
fn rank_vec_filled_and_indexed() {
    let mut v: RankVec<u32> = RankVec::filled(4, 7);
    assert_eq!(v.len(), 4);
    v[RankId(2)] = 9;
    assert_eq!(v[RankId(2)], 9);
    assert_eq!(v.get(RankId(3)), Some(&7));
    assert_eq!(v.get(RankId(4)), None);
    assert!(v.contains(RankId(3)));
    assert!(!v.contains(RankId(4)));
}

#[test]
fn rank_vec_iterates_in_rank_order() {
    let v = RankVec::from_fn(3, |i| i * 10);
    let pairs: Vec<(RankId, usize)> = v.iter().map(|(r, &x)| (r, x)).collect();
    assert_eq!(pairs, vec![(RankId(0), 0), (RankId(1), 10), (RankId(2), 20)]);
    assert_eq!(v.ranks().collect::<Vec<_>>(), vec![RankId(0), RankId(1), RankId(2)]);
}

#[test]
fn rank_vec_default_is_empty() {
    let v: RankVec<String> = RankVec::default();
    assert!(v.is_empty());
    assert!(v.items().is_empty());
}

// ---- IndexedMaxHeap tests ----

/// Dummy at rank 0, then the given tracked costs at ranks 1..
fn costs(values: &[f64]) -> RankVec<Cost> {
    RankVec::from_fn(values.len() + 1, |i| {
        if i == 0 {
            Cost::Fixed
        } else {
            Cost::Tracked(values[i - 1])
        }
    })
}

#[test]
fn heap_build_is_valid() {
    let c = costs(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
    let heap = IndexedMaxHeap::build(&c);
    assert_eq!(heap.len(), 9);
    assert_eq!(heap.peek(), Some(RankId(6)));
    heap.validate(&c).unwrap();
    for (i, &r) in heap.as_slice().iter().enumerate() {
        assert_eq!(heap.position(r), Some(i));
    }
}

#[test]
fn heap_sift_up_after_increase() {
    let mut c = costs(&[5.0, 4.0, 3.0, 2.0, 1.0]);
    let mut heap = IndexedMaxHeap::build(&c);

    c[RankId(5)] = Cost::Tracked(10.0);
    heap.sift_up(RankId(5), &c);
    assert_eq!(heap.peek(), Some(RankId(5)));
    heap.validate(&c).unwrap();
}

#[test]
fn heap_sift_down_after_decrease() {
    let mut c = costs(&[5.0, 4.0, 3.0, 2.0, 1.0]);
    let mut heap = IndexedMaxHeap::build(&c);

    c[RankId(1)] = Cost::Tracked(0.5);
    heap.sift_down(RankId(1), &c);
    assert_eq!(heap.peek(), Some(RankId(2)));
    heap.validate(&c).unwrap();
}

#[test]
fn heap_retired_rank_sinks_below_zero_costs() {
    let mut c = costs(&[0.0, 0.0, 7.0]);
    let mut heap = IndexedMaxHeap::build(&c);

    c[RankId(3)] = Cost::Retired;
    heap.sift_down(RankId(3), &c);
    heap.validate(&c).unwrap();
    let root = heap.peek().unwrap();
    assert_eq!(c[root], Cost::Tracked(0.0));
}

#[test]
fn heap_equal_costs_do_not_swap() {
    let c = costs(&[2.0, 2.0, 2.0]);
    let mut heap = IndexedMaxHeap::build(&c);
    let before = heap.as_slice().to_vec();
    heap.sift_up(RankId(3), &c);
    heap.sift_down(RankId(1), &c);
    assert_eq!(heap.as_slice(), before.as_slice());
}

#[test]
fn heap_validate_reports_disorder() {
    let mut c = costs(&[5.0, 4.0]);
    let heap = IndexedMaxHeap::build(&c);
    c[RankId(2)] = Cost::Tracked(50.0);
    assert!(heap.validate(&c).is_err());
}
