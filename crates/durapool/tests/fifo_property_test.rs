//! Property tests: an LMDB pool behaves like an in-memory FIFO

use durapool::prelude::*;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Push(PoolItem),
    Pop,
}

fn any_item() -> impl Strategy<Value = PoolItem> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(PoolItem::Text),
        any::<i64>().prop_map(PoolItem::Int),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(PoolItem::Bytes),
    ]
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any_item().prop_map(Op::Push),
        2 => Just(Op::Pop),
    ]
}

fn scratch_pool(codec: Arc<dyn ItemCodec>) -> (LmdbPool, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = PoolConfig::new("prop", temp_dir.path().join("pool.mdb"))
        .with_map_size(16 * 1024 * 1024)
        .with_sync_mode(SyncMode::NoSync);
    let pool = LmdbPool::open_with(config, codec).unwrap();
    (pool, temp_dir)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// n pushes followed by n pops return the items in push order
    #[test]
    fn pops_return_push_order(items in proptest::collection::vec(any_item(), 0..40)) {
        let (pool, _temp) = scratch_pool(Arc::new(BincodeCodec));

        for item in &items {
            pool.push(item).unwrap();
        }
        prop_assert_eq!(pool.length(), items.len() as u64);

        for item in &items {
            let popped = pool.pop().unwrap();
            prop_assert_eq!(popped.as_ref(), Some(item));
        }
        prop_assert_eq!(pool.pop().unwrap(), None);
        prop_assert_eq!(pool.length(), 0);
    }

    /// Any interleaving of pushes and pops matches a VecDeque
    #[test]
    fn matches_in_memory_model(ops in proptest::collection::vec(any_op(), 0..60)) {
        let (pool, _temp) = scratch_pool(Arc::new(JsonCodec));
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(item) => {
                    pool.push(&item).unwrap();
                    model.push_back(item);
                }
                Op::Pop => {
                    prop_assert_eq!(pool.pop().unwrap(), model.pop_front());
                }
            }
            prop_assert_eq!(pool.length(), model.len() as u64);
        }
    }
}
