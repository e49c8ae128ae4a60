use bnk::error::Result;
use bnk::soundbank::model::*;
use bnk::stream::Stream;
use bnk::strtable::{self, TrieBlock, TrieEntry};
use bnk::{BankCodec, FormatVersion, Id};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_bank(events: u32) -> SoundBank {
    let mut hierarchy = Vec::new();
    for index in 0..events {
        hierarchy.push(HierarchyObject::Sound(Sound {
            id: Id(1000 + index),
            node: AudioNode {
                parent: Id(1),
                voice: AudioVoice {
                    volume: RandomizableValue {
                        value: -3.0,
                        minimum: 0.0,
                        maximum: 0.0,
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            source: AudioSourceSetting {
                plug_in: Id(0x0001_0001),
                resource: Id(index),
                resource_size: 64,
                ..Default::default()
            },
            ..Default::default()
        }));
        hierarchy.push(HierarchyObject::Event(Event {
            id: Id(2000 + index),
            child: vec![Id(1000 + index)],
        }));
    }
    SoundBank {
        header: BankHeader {
            id: Id(0xB0B0),
            ..Default::default()
        },
        media: Some(
            (0..events)
                .map(|index| MediaEntry {
                    id: Id(index + 1),
                    data: vec![0x5A; 256],
                })
                .collect(),
        ),
        hierarchy: Some(hierarchy),
        ..Default::default()
    }
}

fn bench_soundbank(c: &mut Criterion) {
    let codec = BankCodec::new(FormatVersion::new(140).unwrap());
    let bank = synthetic_bank(256);
    let bytes = codec.encode(&bank).unwrap();

    c.bench_function("bank_encode_256_sounds", |b| {
        b.iter(|| codec.encode(black_box(&bank)).unwrap())
    });
    c.bench_function("bank_decode_256_sounds", |b| {
        b.iter(|| codec.decode(black_box(&bytes)).unwrap())
    });
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Slot(u32);

impl TrieBlock for Slot {
    const SIZE: usize = 4;

    fn exchange<S: Stream>(stream: &mut S, value: &mut Self) -> Result<()> {
        stream.exchange_u32(&mut value.0)
    }
}

fn bench_string_table(c: &mut Criterion) {
    let mut entries: Vec<TrieEntry<Slot>> = (0..1000)
        .map(|index| TrieEntry {
            key: format!("resources/atlas_{:04}/sprite", index),
            value: Slot(index),
        })
        .collect();
    strtable::adjust_sequence(&mut entries);
    let bytes = strtable::encode(&entries).unwrap();

    c.bench_function("trie_encode_1000_keys", |b| {
        b.iter(|| strtable::encode(black_box(&entries)).unwrap())
    });
    c.bench_function("trie_decode_1000_keys", |b| {
        b.iter(|| strtable::decode::<Slot>(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_soundbank, bench_string_table);
criterion_main!(benches);
