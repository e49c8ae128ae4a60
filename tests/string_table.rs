use bnk::error::Result;
use bnk::stream::Stream;
use bnk::strtable::{adjust_sequence, compute_ripe_size, decode, encode, TrieBlock, TrieEntry, CELL_SIZE};
use proptest::prelude::*;

/// Resource descriptor the PAK/RSB group tables store per key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ResourceSlot {
    offset: u32,
    size: u32,
}

impl TrieBlock for ResourceSlot {
    const SIZE: usize = 8;

    fn exchange<S: Stream>(stream: &mut S, value: &mut Self) -> Result<()> {
        stream.exchange_u32(&mut value.offset)?;
        stream.exchange_u32(&mut value.size)
    }
}

fn table(keys: &[&str]) -> Vec<TrieEntry<ResourceSlot>> {
    let mut entries: Vec<TrieEntry<ResourceSlot>> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| TrieEntry {
            key: (*key).to_owned(),
            value: ResourceSlot {
                offset: index as u32 * 0x1000,
                size: 0x800,
            },
        })
        .collect();
    adjust_sequence(&mut entries);
    entries
}

#[test]
fn banana_band_bar_roundtrips() {
    let entries = table(&["banana", "band", "bar"]);
    let keys: Vec<&str> = entries.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(keys, ["BAR", "BAND", "BANANA"]);

    let bytes = encode(&entries).unwrap();
    assert_eq!(decode::<ResourceSlot>(&bytes).unwrap(), entries);
    // Re-encoding the decoded table is byte-identical.
    assert_eq!(encode(&decode::<ResourceSlot>(&bytes).unwrap()).unwrap(), bytes);
}

#[test]
fn single_entry_is_one_key_plus_terminator_plus_payload() {
    let entries = table(&["IMAGES"]);
    let bytes = encode(&entries).unwrap();
    assert_eq!(bytes.len(), (6 + 1 + 2) * CELL_SIZE);
    for cell in bytes.chunks(CELL_SIZE).take(7) {
        let word = u32::from_le_bytes(cell.try_into().unwrap());
        assert_eq!(word >> 8, 0, "back-reference in a single-entry table");
    }
    assert_eq!(decode::<ResourceSlot>(&bytes).unwrap(), entries);
}

#[test]
fn ripe_size_matches_encode_exactly() {
    for keys in [
        &[][..],
        &["one"][..],
        &["atlases", "atlas", "audio", "a"][..],
        &["same", "same", "samey"][..],
    ] {
        let entries = table(keys);
        let bytes = encode(&entries).unwrap();
        assert_eq!(compute_ripe_size::<ResourceSlot>(&entries).unwrap(), bytes.len());
    }
}

#[test]
fn non_ascii_key_is_rejected() {
    let entries = vec![TrieEntry {
        key: "caf\u{e9}".to_owned(),
        value: ResourceSlot::default(),
    }];
    assert!(encode(&entries).is_err());
}

proptest! {
    #[test]
    fn arbitrary_tables_roundtrip(
        keys in proptest::collection::vec("[a-z0-9_]{1,12}", 0..24)
    ) {
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let entries = table(&keys);
        let bytes = encode(&entries).unwrap();
        prop_assert_eq!(compute_ripe_size::<ResourceSlot>(&entries).unwrap(), bytes.len());
        prop_assert_eq!(decode::<ResourceSlot>(&bytes).unwrap(), entries);
    }
}
