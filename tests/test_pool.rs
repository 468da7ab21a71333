use arcade_shooter::pool::{Pool, SlotId};

fn pool_of(values: &[i32]) -> (Pool<i32>, Vec<SlotId>) {
    let mut pool = Pool::new();
    let ids = values.iter().map(|&v| pool.spawn(v)).collect();
    (pool, ids)
}

#[test]
fn spawn_hands_out_sequential_ids() {
    let (pool, ids) = pool_of(&[10, 20, 30]);
    assert_eq!(ids, vec![SlotId(0), SlotId(1), SlotId(2)]);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.get(ids[1]), Some(&20));
}

#[test]
fn kill_is_idempotent() {
    let (mut pool, ids) = pool_of(&[10, 20]);
    assert!(pool.kill(ids[0]));
    assert!(!pool.kill(ids[0]));
    assert_eq!(pool.len(), 1);
}

#[test]
fn kill_unknown_id_is_a_noop() {
    let (mut pool, _) = pool_of(&[10]);
    assert!(!pool.kill(SlotId(7)));
    assert_eq!(pool.len(), 1);
}

#[test]
fn tombstone_hides_value_but_keeps_slot() {
    let (mut pool, ids) = pool_of(&[10, 20]);
    pool.kill(ids[0]);

    assert!(pool.contains(ids[0]));
    assert!(!pool.is_alive(ids[0]));
    assert_eq!(pool.get(ids[0]), None);
    assert!(pool.get_mut(ids[0]).is_none());
    assert_eq!(pool.capacity_used(), 2);
}

#[test]
fn iter_skips_tombstones_in_slot_order() {
    let (mut pool, ids) = pool_of(&[10, 20, 30]);
    pool.kill(ids[1]);
    let seen: Vec<(SlotId, i32)> = pool.iter().map(|(id, v)| (id, *v)).collect();
    assert_eq!(seen, vec![(SlotId(0), 10), (SlotId(2), 30)]);
}

#[test]
fn iter_mut_updates_live_values() {
    let (mut pool, ids) = pool_of(&[1, 2, 3]);
    pool.kill(ids[0]);
    for (_, v) in pool.iter_mut() {
        *v *= 10;
    }
    let values: Vec<i32> = pool.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![20, 30]);
}

#[test]
fn compact_reclaims_tombstones() {
    let (mut pool, ids) = pool_of(&[10, 20, 30]);
    pool.kill(ids[0]);
    pool.kill(ids[2]);
    pool.compact();

    assert_eq!(pool.capacity_used(), 1);
    assert_eq!(pool.get(SlotId(0)), Some(&20));
    assert!(!pool.contains(SlotId(1)));
}

#[test]
fn clone_is_independent() {
    let (pool, ids) = pool_of(&[10]);
    let mut copy = pool.clone();
    copy.kill(ids[0]);
    assert!(pool.is_alive(ids[0]));
    assert!(copy.is_empty());
}
