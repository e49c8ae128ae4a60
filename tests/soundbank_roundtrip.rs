use bnk::soundbank::model::*;
use bnk::{BankCodec, Error, FormatVersion, Id, PropertyEmission};

fn codec(version: u32) -> BankCodec {
    BankCodec::new(FormatVersion::new(version).unwrap())
}

/// One `Sound` and one `Event` referencing it, the smallest bank a game
/// would actually post an event against.
fn minimal_bank() -> SoundBank {
    SoundBank {
        header: BankHeader {
            id: Id(0xB001),
            language: Id(0),
            expand: Vec::new(),
        },
        hierarchy: Some(vec![
            HierarchyObject::Sound(Sound {
                id: Id(100),
                node: AudioNode {
                    parent: Id(0),
                    output_bus: AudioOutputBusSetting {
                        bus: Id(0x5555),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                source: AudioSourceSetting {
                    plug_in: Id(0x0001_0001),
                    resource: Id(0xCAFE),
                    resource_size: 4096,
                    ..Default::default()
                },
                playback_setting: SoundPlaybackSetting {
                    loop_count: RandomizableValue {
                        value: 1,
                        minimum: 0,
                        maximum: 0,
                    },
                    ..Default::default()
                },
            }),
            HierarchyObject::Event(Event {
                id: Id(200),
                child: vec![Id(100)],
            }),
        ]),
        ..Default::default()
    }
}

#[test]
fn minimal_bank_scenario() {
    for version in [112, 128, 140, 150] {
        let codec = codec(version);
        let bytes = codec.encode(&minimal_bank()).unwrap();
        let bank = codec.decode(&bytes).unwrap();

        let hierarchy = bank.hierarchy.as_ref().unwrap();
        assert_eq!(hierarchy.len(), 2, "version {version}");
        match (&hierarchy[0], &hierarchy[1]) {
            (HierarchyObject::Sound(sound), HierarchyObject::Event(event)) => {
                assert_eq!(sound.id, Id(100));
                assert_eq!(event.id, Id(200));
                assert_eq!(event.child, vec![sound.id]);
            }
            other => panic!("unexpected kinds: {other:?}"),
        }

        assert_eq!(codec.encode(&bank).unwrap(), bytes, "version {version}");
    }
}

/// Wire layout pinned by hand for the simple pieces: BKHD carries the
/// literal version, HIRC entries are `{type, size, payload}`.
#[test]
fn handwritten_event_bank_decodes() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BKHD");
    bytes.extend_from_slice(&12u32.to_le_bytes());
    bytes.extend_from_slice(&140u32.to_le_bytes());
    bytes.extend_from_slice(&0x1111u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    // One Event (tag 4): id + u8 child count + one child id.
    bytes.extend_from_slice(b"HIRC");
    bytes.extend_from_slice(&14u32.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.push(4);
    bytes.extend_from_slice(&9u32.to_le_bytes());
    bytes.extend_from_slice(&0xAAu32.to_le_bytes());
    bytes.push(1);
    bytes.extend_from_slice(&0xBBu32.to_le_bytes());

    let codec = codec(140);
    let bank = codec.decode(&bytes).unwrap();
    assert_eq!(bank.header.id, Id(0x1111));
    assert_eq!(
        bank.hierarchy,
        Some(vec![HierarchyObject::Event(Event {
            id: Id(0xAA),
            child: vec![Id(0xBB)],
        })])
    );
    assert_eq!(codec.encode(&bank).unwrap(), bytes);
}

fn rich_bank(version: u32) -> SoundBank {
    let mut bank = SoundBank {
        header: BankHeader {
            id: Id(0xBEEF),
            language: Id(0x2A),
            expand: vec![0x10, 0x20],
        },
        media: Some(vec![
            MediaEntry {
                id: Id(900),
                data: vec![0x52, 0x49, 0x46, 0x46],
            },
            MediaEntry {
                id: Id::NONE,
                data: Vec::new(),
            },
        ]),
        setting: Some(Setting {
            volume_threshold: -96.3,
            maximum_voice_instance: 128,
            environment: Some(EnvironmentSetting::default()),
            ..Default::default()
        }),
        game_synchronization: Some(GameSynchronization {
            state_group: vec![StateGroup {
                id: Id(31),
                default_transition: 1000,
                custom_transition: vec![StateTransition {
                    from: Id(1),
                    to: Id(2),
                    time: 300,
                }],
            }],
            switch_group: vec![SwitchGroup {
                id: Id(32),
                parameter_id: Id(33),
                point: vec![GraphPointId {
                    position: 0.5,
                    item: Id(34),
                    curve: CurveShape::Linear,
                }],
                ..Default::default()
            }],
            game_parameter: vec![GameParameter {
                id: Id(35),
                range_default: 50.0,
                ..Default::default()
            }],
            u1: Vec::new(),
        }),
        hierarchy: Some(vec![
            HierarchyObject::AudioBus(AudioBus {
                id: Id(1),
                parent: Id(2),
                bus: BusBusSetting { volume: -4.5 },
                ..Default::default()
            }),
            HierarchyObject::Sound(Sound {
                id: Id(100),
                node: AudioNode {
                    parent: Id(50),
                    voice: AudioVoice {
                        volume: RandomizableValue {
                            value: -6.0,
                            minimum: -1.0,
                            maximum: 1.0,
                        },
                        ..Default::default()
                    },
                    output_bus: AudioOutputBusSetting {
                        bus: Id(1),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                source: AudioSourceSetting {
                    plug_in: Id(0x0001_0001),
                    resource: Id(900),
                    resource_size: 4,
                    ..Default::default()
                },
                ..Default::default()
            }),
            HierarchyObject::EventAction(EventAction {
                id: Id(300),
                scope: ActionScope::One,
                mode: ActionMode::Instant,
                target: Id(100),
                u1: 0,
                property: EventActionProperty::PlayAudio {
                    delay: RandomizableValue {
                        value: 0.25,
                        minimum: 0.0,
                        maximum: 0.0,
                    },
                    fade_time: RandomizableValue::default(),
                    probability: 100.0,
                    fade_curve: CurveShape::Linear,
                    sound_bank: Id(0xBEEF),
                },
            }),
            HierarchyObject::Event(Event {
                id: Id(200),
                child: vec![Id(300)],
            }),
            HierarchyObject::ActorMixer(ActorMixer {
                id: Id(50),
                node: AudioNode::default(),
                child: vec![Id(100)],
            }),
            HierarchyObject::Attenuation(Attenuation {
                id: Id(400),
                curve: vec![AttenuationCurve {
                    mode: AttenuationCurveMode::Custom,
                    point: vec![
                        GraphPoint {
                            position: Position2 { x: 0.0, y: 0.0 },
                            curve: CurveShape::Linear,
                        },
                        GraphPoint {
                            position: Position2 { x: 100.0, y: -96.0 },
                            curve: CurveShape::Linear,
                        },
                    ],
                }],
                ..Default::default()
            }),
            HierarchyObject::Unknown {
                kind: 0x77,
                data: vec![0x01, 0x02, 0x03],
            },
        ]),
        reference: Some(vec![SoundBankReference {
            id: Id(0xBEEF),
            name: "Init".to_owned(),
        }]),
    };
    if version >= 113 {
        if let Some(setting) = &mut bank.setting {
            setting.platform = Some("Windows".to_owned());
        }
    }
    if version >= 118 {
        if let Some(setting) = &mut bank.setting {
            setting.plug_in = Some(vec![PlugInItem {
                id: Id(0x0064_0002),
                library: "AkVorbisDecoder".to_owned(),
            }]);
        }
    }
    bank
}

#[test]
fn rich_bank_roundtrips_across_versions() {
    for version in [88, 112, 120, 128, 134, 140, 145, 150] {
        let codec = codec(version);
        let bank = rich_bank(version);
        let bytes = codec.encode(&bank).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, bank, "aggregate mismatch at version {version}");
        assert_eq!(
            codec.encode(&decoded).unwrap(),
            bytes,
            "byte mismatch at version {version}"
        );
    }
}

#[test]
fn version_mismatch_is_fatal_not_negotiated() {
    let bytes = codec(140).encode(&minimal_bank()).unwrap();
    let err = codec(150).decode(&bytes);
    assert!(matches!(
        err,
        Err(Error::UnexpectedConstant {
            expected: 150,
            found: 140,
            ..
        })
    ));
}

#[test]
fn emission_policies_decode_to_the_same_aggregate() {
    let version = FormatVersion::new(140).unwrap();
    let sparse = BankCodec::new(version);
    let full = BankCodec::new(version).with_emission(PropertyEmission::Always);

    let bank = minimal_bank();
    let sparse_bytes = sparse.encode(&bank).unwrap();
    let full_bytes = full.encode(&bank).unwrap();
    assert_ne!(sparse_bytes, full_bytes);

    assert_eq!(sparse.decode(&sparse_bytes).unwrap(), bank);
    assert_eq!(full.decode(&full_bytes).unwrap(), bank);
}

#[test]
fn truncated_bank_reports_offset() {
    let bytes = codec(140).encode(&minimal_bank()).unwrap();
    let err = codec(140).decode(&bytes[..bytes.len() - 3]);
    assert!(matches!(err, Err(Error::TruncatedInput { .. })));
}
