use flurry_snowflake::{
    FixedNodeId, GenerateOptions, Generator, GeneratorSettings, NodeId, Snowflake, UnixMillis,
    DEFAULT_EPOCH, TWITTER_EPOCH,
};

fn generator(epoch: impl Into<UnixMillis>, node_id: u32) -> Generator {
    let settings = GeneratorSettings::builder()
        .epoch(epoch)
        .node_id(node_id)
        .build();
    Generator::with_resolver(settings, &FixedNodeId(NodeId::new(0)))
}

#[test]
fn known_ids_at_epoch() {
    let gen = generator(1_420_070_400_000_i64, 277);
    let at_epoch = GenerateOptions::builder().timestamp(1_420_070_400_000_i64).build();

    assert_eq!(gen.generate(at_epoch), "1134592");
    assert_eq!(gen.generate(at_epoch), "1134593");
}

#[test]
fn timestamps_survive_the_round_trip() {
    let offsets = [0_i64, 1, 999, 86_400_000, 1 << 40, (1 << 42) - 1];

    for epoch in [DEFAULT_EPOCH, TWITTER_EPOCH, UnixMillis::new(0)] {
        let gen = generator(epoch, 513);
        for offset in offsets {
            let timestamp = epoch.as_millis() + offset;
            let wire = gen.generate(GenerateOptions::builder().timestamp(timestamp).build());

            let parts = gen.deconstruct(wire.as_str()).unwrap();
            assert_eq!(parts.timestamp, timestamp, "epoch {epoch}, offset {offset}");
            assert_eq!(parts.epoch, epoch.as_millis());
            assert_eq!(parts.node_id, 513);

            let parsed: Snowflake = wire.parse().unwrap();
            assert_eq!(parsed.as_u64(), parts.id);
            assert_eq!(parts.to_snowflake(), parsed);
            assert_eq!(parsed.to_string(), wire);
        }
    }
}

#[test]
fn every_id_carries_the_reduced_node_id() {
    for (raw, expected) in [(0, 0), (277, 277), (1023, 1023), (1024, 0), (2047, 1023)] {
        let gen = generator(DEFAULT_EPOCH, raw);
        assert_eq!(gen.node_id().get(), expected);
        for _ in 0..16 {
            let parts = gen.deconstruct(gen.next_id()).unwrap();
            assert_eq!(parts.node_id, expected);
        }
    }
}

#[test]
fn ids_sort_in_generation_order() {
    let gen = generator(DEFAULT_EPOCH, 1);
    let base = DEFAULT_EPOCH.as_millis();
    let ids: Vec<Snowflake> = (0..50)
        .flat_map(|ms| [base + ms, base + ms, base + ms])
        .map(|ts| gen.next_id_at(ts))
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn generate_without_timestamp_uses_wall_clock() {
    let gen = generator(DEFAULT_EPOCH, 0);
    let before = jiff::Timestamp::now().as_millisecond();
    let wire = gen.generate(GenerateOptions::default());
    let after = jiff::Timestamp::now().as_millisecond();

    let parts = gen.deconstruct(wire).unwrap();
    assert!(parts.timestamp >= before && parts.timestamp <= after);
}
