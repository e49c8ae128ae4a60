//! Common-property map exchange.
//!
//! Nearly every audio-object kind carries a sparse, enumeration-keyed
//! property table: a "regular" list of single values and, for randomizable
//! contexts, a "randomizer" list of (minimum, maximum) pairs.  On disk each
//! list is `[count:u8][tag×count][payload×count]` — tags first, payloads
//! second, which is why the wire exchange runs through
//! [`exchange_list_late`].
//!
//! Key spaces are closed enums backed by static attribute tables declaring
//! the wire tag, the value kind, and the default applied when an entry is
//! absent.  A wire tag with no case in the table is fatal
//! ([`Error::UnknownPropertyType`]); the schemas are exhaustively reverse
//! engineered, not forward compatible.

use serde::{Deserialize, Serialize};

use crate::bits::{exchange_bits_u32, BitEnum};
use crate::error::{Error, Result};
use crate::stream::{exchange_id, exchange_list_late, CountWidth, Id, Stream};

use super::model::RandomizableValue;

/// Value kinds a property can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Bool,
    Integer,
    Float,
    Enumerated,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i32),
    Float(f32),
    Enumerated(u32),
    Id(Id),
}

impl Default for PropertyValue {
    fn default() -> Self {
        PropertyValue::Float(0.0)
    }
}

impl PropertyValue {
    pub fn kind(self) -> PropertyKind {
        match self {
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Integer(_) => PropertyKind::Integer,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Enumerated(_) => PropertyKind::Enumerated,
            PropertyValue::Id(_) => PropertyKind::Id,
        }
    }

    fn to_f32(self) -> f32 {
        match self {
            PropertyValue::Float(v) => v,
            _ => 0.0,
        }
    }

    fn to_i32(self) -> i32 {
        match self {
            PropertyValue::Integer(v) => v,
            _ => 0,
        }
    }

    fn to_bool(self) -> bool {
        matches!(self, PropertyValue::Bool(true))
    }

    fn to_index(self) -> u32 {
        match self {
            PropertyValue::Enumerated(v) => v,
            _ => 0,
        }
    }

    fn to_id(self) -> Id {
        match self {
            PropertyValue::Id(v) => v,
            _ => Id::NONE,
        }
    }
}

/// A property key space: closed enum plus its static attribute table.
pub trait PropertyKey: Copy + Eq + Default {
    /// Diagnostic name of the key space.
    const CONTEXT: &'static str;

    fn tag(self) -> u8;
    fn default_value(self) -> PropertyValue;
    fn from_tag(tag: u8) -> Option<Self>;

    fn kind(self) -> PropertyKind {
        self.default_value().kind()
    }
}

/// Declare a property key enum together with its attribute table.
/// Each row: `Variant = wire_tag => DefaultValueVariant(default)`.
macro_rules! property_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $context:literal {
            $($variant:ident = $tag:literal => $kind:ident($default:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl Default for $name {
            fn default() -> Self {
                const ALL: &[$name] = &[$($name::$variant),+];
                ALL[0]
            }
        }

        impl PropertyKey for $name {
            const CONTEXT: &'static str = $context;

            fn tag(self) -> u8 {
                match self {
                    $(Self::$variant => $tag),+
                }
            }

            fn default_value(self) -> PropertyValue {
                match self {
                    $(Self::$variant => PropertyValue::$kind($default)),+
                }
            }

            fn from_tag(tag: u8) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

property_keys! {
    /// Audio-node parameters (voice, bus, positioning, HDR, MIDI, priority,
    /// motion, mixer, playback).
    pub enum AudioProperty : "audio property" {
        VoiceVolume = 0 => Float(0.0),
        VoicePitch = 2 => Float(0.0),
        VoiceLowPassFilter = 3 => Float(0.0),
        VoiceHighPassFilter = 4 => Float(0.0),
        BusVolume = 5 => Float(0.0),
        VoiceVolumeMakeUpGain = 6 => Float(0.0),
        PlaybackPriorityValue = 7 => Float(50.0),
        PlaybackPriorityOffsetAtMaximumDistance = 8 => Float(0.0),
        MotionVolumeOffset = 9 => Float(0.0),
        MotionLowPassFilter = 10 => Float(0.0),
        PositioningSpeakerPanningX = 12 => Float(0.0),
        PositioningSpeakerPanningY = 13 => Float(0.0),
        PositioningCenterPercent = 14 => Float(100.0),
        UserDefinedAuxiliarySendVolume0 = 19 => Float(0.0),
        UserDefinedAuxiliarySendVolume1 = 20 => Float(0.0),
        UserDefinedAuxiliarySendVolume2 = 21 => Float(0.0),
        UserDefinedAuxiliarySendVolume3 = 22 => Float(0.0),
        GameDefinedAuxiliarySendVolume = 23 => Float(0.0),
        OutputBusVolume = 24 => Float(0.0),
        OutputBusHighPassFilter = 25 => Float(0.0),
        OutputBusLowPassFilter = 26 => Float(0.0),
        HdrThreshold = 27 => Float(0.0),
        HdrRatio = 28 => Float(16.0),
        HdrReleaseTime = 29 => Float(0.0),
        HdrWindowTapOutputGameParameterId = 30 => Id(Id::NONE),
        HdrWindowTapOutputGameParameterMinimum = 31 => Float(0.0),
        HdrWindowTapOutputGameParameterMaximum = 32 => Float(0.0),
        HdrEnvelopeTrackingActiveRange = 33 => Float(12.0),
        MidiNoteTrackingRootNote = 45 => Integer(60),
        MidiEventPlayOn = 46 => Enumerated(0),
        MidiTransformationTransposition = 47 => Integer(0),
        MidiTransformationVelocityOffset = 48 => Integer(0),
        MidiFilterKeyRangeMinimum = 49 => Integer(0),
        MidiFilterKeyRangeMaximum = 50 => Integer(127),
        MidiFilterVelocityMinimum = 51 => Integer(0),
        MidiFilterVelocityMaximum = 52 => Integer(127),
        MidiFilterChannel = 53 => Integer(65535),
        PlaybackSpeed = 54 => Float(1.0),
        MidiClipTempoSource = 55 => Enumerated(0),
        MidiTargetId = 56 => Id(Id::NONE),
        PlaybackLoop = 58 => Integer(1),
        PlaybackInitialDelay = 59 => Float(0.0),
        MixerId = 61 => Id(Id::NONE),
        EarlyReflectionAuxiliarySendVolume = 62 => Float(0.0),
        GameDefinedAuxiliarySendLowPassFilter = 63 => Float(0.0),
        GameDefinedAuxiliarySendHighPassFilter = 64 => Float(0.0),
        UserDefinedAuxiliarySendLowPassFilter0 = 65 => Float(0.0),
        UserDefinedAuxiliarySendLowPassFilter1 = 66 => Float(0.0),
        UserDefinedAuxiliarySendLowPassFilter2 = 67 => Float(0.0),
        UserDefinedAuxiliarySendLowPassFilter3 = 68 => Float(0.0),
        UserDefinedAuxiliarySendHighPassFilter0 = 69 => Float(0.0),
        UserDefinedAuxiliarySendHighPassFilter1 = 70 => Float(0.0),
        UserDefinedAuxiliarySendHighPassFilter2 = 71 => Float(0.0),
        UserDefinedAuxiliarySendHighPassFilter3 = 72 => Float(0.0),
        PositioningSpeakerPanningZ = 73 => Float(0.0),
        PositioningListenerRoutingSpeakerPanningDivisionSpatializationMix = 74 => Float(0.0),
        PositioningListenerRoutingAttenuationId = 75 => Id(Id::NONE),
    }
}

property_keys! {
    /// Event-action parameters.
    pub enum ActionProperty : "event action property" {
        Delay = 15 => Float(0.0),
        FadeTime = 16 => Float(0.0),
        Probability = 17 => Float(100.0),
    }
}

property_keys! {
    /// Modulator parameters (LFO, envelope, time).
    pub enum ModulatorProperty : "modulator property" {
        Depth = 0 => Float(100.0),
        Attack = 1 => Float(0.0),
        Frequency = 2 => Float(1.0),
        Waveform = 3 => Enumerated(0),
        Smoothing = 4 => Float(0.0),
        PulseWidthModulation = 5 => Float(50.0),
        InitialPhaseOffset = 6 => Float(0.0),
        Scope = 7 => Enumerated(0),
        AttackTime = 8 => Float(0.2),
        AttackCurve = 9 => Float(50.0),
        DecayTime = 10 => Float(0.0),
        SustainLevel = 11 => Float(100.0),
        ReleaseTime = 12 => Float(0.5),
        SustainTime = 13 => Float(0.0),
        TriggerOn = 14 => Enumerated(0),
        StopPlayback = 15 => Bool(true),
        InitialDelay = 16 => Float(0.0),
        Duration = 17 => Float(1.0),
        Loop = 18 => Integer(1),
        PlaybackRate = 19 => Float(1.0),
    }
}

// ── Wire exchange ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RandomRange {
    pub minimum: PropertyValue,
    pub maximum: PropertyValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap<K> {
    pub regular: Vec<(K, PropertyValue)>,
    pub randomizer: Vec<(K, RandomRange)>,
}

fn exchange_value<S: Stream>(
    stream: &mut S,
    kind: PropertyKind,
    value: &mut PropertyValue,
) -> Result<()> {
    if stream.reading() {
        *value = match kind {
            PropertyKind::Bool => PropertyValue::Bool(false),
            PropertyKind::Integer => PropertyValue::Integer(0),
            PropertyKind::Float => PropertyValue::Float(0.0),
            PropertyKind::Enumerated => PropertyValue::Enumerated(0),
            PropertyKind::Id => PropertyValue::Id(Id::NONE),
        };
    }
    match value {
        PropertyValue::Bool(v) => exchange_bits_u32(stream, |bits| {
            bits.flag(v);
            Ok(())
        }),
        PropertyValue::Integer(v) => stream.exchange_i32(v),
        PropertyValue::Float(v) => stream.exchange_f32(v),
        PropertyValue::Enumerated(v) => stream.exchange_u32(v),
        PropertyValue::Id(v) => exchange_id(stream, v),
    }
}

fn exchange_key<S: Stream, K: PropertyKey>(stream: &mut S, key: &mut K) -> Result<()> {
    let offset = stream.position();
    let mut tag = key.tag();
    stream.exchange_u8(&mut tag)?;
    if stream.reading() {
        *key = K::from_tag(tag).ok_or(Error::UnknownPropertyType { offset, tag })?;
    }
    Ok(())
}

/// Exchange the raw map: the regular list always, the randomizer list only
/// when the object kind is randomizable.
pub fn exchange_map<S: Stream, K: PropertyKey>(
    stream: &mut S,
    map: &mut PropertyMap<K>,
    randomizable: bool,
) -> Result<()> {
    exchange_list_late(
        stream,
        &mut map.regular,
        CountWidth::U8,
        |s, entry| exchange_key(s, &mut entry.0),
        |s, entry| exchange_value(s, entry.0.kind(), &mut entry.1),
    )?;
    if randomizable {
        exchange_list_late(
            stream,
            &mut map.randomizer,
            CountWidth::U8,
            |s, entry| exchange_key(s, &mut entry.0),
            |s, entry| {
                exchange_value(s, entry.0.kind(), &mut entry.1.minimum)?;
                exchange_value(s, entry.0.kind(), &mut entry.1.maximum)
            },
        )?;
    }
    Ok(())
}

// ── Typed binding ────────────────────────────────────────────────────────────

/// When the encoder emits a property into the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyEmission {
    /// Emit only values that differ from the attribute-table default.
    #[default]
    NonDefault,
    /// Emit every bound property unconditionally.
    Always,
}

/// Bridges the wire map and the typed destination fields.
///
/// Decode: the map is read first, then each binding extracts its property
/// (attribute-table default when absent).  Encode: each binding collects its
/// field into the map (per the emission policy), then the map is written.
/// Binding order is the schema order, so encoded maps are deterministic.
pub struct PropertyBinder<'a, K: PropertyKey> {
    map: &'a mut PropertyMap<K>,
    reading: bool,
    emission: PropertyEmission,
}

impl<K: PropertyKey> PropertyBinder<'_, K> {
    fn regular(&self, key: K) -> Option<PropertyValue> {
        self.map
            .regular
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn randomizer(&self, key: K) -> Option<RandomRange> {
        self.map
            .randomizer
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn emit(&mut self, key: K, value: PropertyValue) {
        if self.emission == PropertyEmission::Always || value != key.default_value() {
            self.map.regular.push((key, value));
        }
    }

    fn emit_range(&mut self, key: K, minimum: PropertyValue, maximum: PropertyValue) {
        let zero = match key.kind() {
            PropertyKind::Integer => {
                minimum == PropertyValue::Integer(0) && maximum == PropertyValue::Integer(0)
            }
            _ => minimum == PropertyValue::Float(0.0) && maximum == PropertyValue::Float(0.0),
        };
        if self.emission == PropertyEmission::Always || !zero {
            self.map.randomizer.push((key, RandomRange { minimum, maximum }));
        }
    }

    pub fn regular_f32(&mut self, key: K, field: &mut f32) -> Result<()> {
        if self.reading {
            *field = self.regular(key).unwrap_or(key.default_value()).to_f32();
        } else {
            self.emit(key, PropertyValue::Float(*field));
        }
        Ok(())
    }

    pub fn regular_i32(&mut self, key: K, field: &mut i32) -> Result<()> {
        if self.reading {
            *field = self.regular(key).unwrap_or(key.default_value()).to_i32();
        } else {
            self.emit(key, PropertyValue::Integer(*field));
        }
        Ok(())
    }

    pub fn regular_bool(&mut self, key: K, field: &mut bool) -> Result<()> {
        if self.reading {
            *field = self.regular(key).unwrap_or(key.default_value()).to_bool();
        } else {
            self.emit(key, PropertyValue::Bool(*field));
        }
        Ok(())
    }

    pub fn id(&mut self, key: K, field: &mut Id) -> Result<()> {
        if self.reading {
            *field = self.regular(key).unwrap_or(key.default_value()).to_id();
        } else {
            self.emit(key, PropertyValue::Id(*field));
        }
        Ok(())
    }

    pub fn enumeration<E: BitEnum>(&mut self, key: K, field: &mut E) -> Result<()> {
        if self.reading {
            let index = self.regular(key).unwrap_or(key.default_value()).to_index();
            *field = E::from_index(index).ok_or(Error::UnknownVariant {
                context: K::CONTEXT,
                offset: 0,
                tag: index,
            })?;
        } else {
            self.emit(key, PropertyValue::Enumerated(field.to_index()));
        }
        Ok(())
    }

    pub fn randomizable_f32(
        &mut self,
        key: K,
        field: &mut RandomizableValue<f32>,
    ) -> Result<()> {
        if self.reading {
            field.value = self.regular(key).unwrap_or(key.default_value()).to_f32();
            let range = self.randomizer(key).unwrap_or(RandomRange {
                minimum: PropertyValue::Float(0.0),
                maximum: PropertyValue::Float(0.0),
            });
            field.minimum = range.minimum.to_f32();
            field.maximum = range.maximum.to_f32();
        } else {
            self.emit(key, PropertyValue::Float(field.value));
            self.emit_range(
                key,
                PropertyValue::Float(field.minimum),
                PropertyValue::Float(field.maximum),
            );
        }
        Ok(())
    }

    pub fn randomizable_i32(
        &mut self,
        key: K,
        field: &mut RandomizableValue<i32>,
    ) -> Result<()> {
        if self.reading {
            field.value = self.regular(key).unwrap_or(key.default_value()).to_i32();
            let range = self.randomizer(key).unwrap_or(RandomRange {
                minimum: PropertyValue::Integer(0),
                maximum: PropertyValue::Integer(0),
            });
            field.minimum = range.minimum.to_i32();
            field.maximum = range.maximum.to_i32();
        } else {
            self.emit(key, PropertyValue::Integer(field.value));
            self.emit_range(
                key,
                PropertyValue::Integer(field.minimum),
                PropertyValue::Integer(field.maximum),
            );
        }
        Ok(())
    }
}

/// Exchange a property map and bind it to typed fields in one step.  The
/// closure runs after the map is read (decode) or before it is written
/// (encode); it must bind the same keys in both directions.
pub fn exchange_properties<S: Stream, K: PropertyKey>(
    stream: &mut S,
    randomizable: bool,
    emission: PropertyEmission,
    bind: impl FnOnce(&mut PropertyBinder<'_, K>) -> Result<()>,
) -> Result<()> {
    let mut map = PropertyMap::default();
    if stream.reading() {
        exchange_map(stream, &mut map, randomizable)?;
        let mut binder = PropertyBinder {
            map: &mut map,
            reading: true,
            emission,
        };
        bind(&mut binder)?;
    } else {
        let mut binder = PropertyBinder {
            map: &mut map,
            reading: false,
            emission,
        };
        bind(&mut binder)?;
        exchange_map(stream, &mut map, randomizable)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{Reader, Writer};

    #[test]
    fn absent_property_resolves_to_declared_default() {
        // An empty regular list (count 0) plus empty randomizer list.
        let bytes = [0u8, 0u8];
        let mut reader = Reader::new(&bytes);
        let mut priority = 0.0f32;
        let mut delay = RandomizableValue::<f32>::default();
        exchange_properties::<_, ActionProperty>(
            &mut reader,
            true,
            PropertyEmission::NonDefault,
            |bind| {
                bind.randomizable_f32(ActionProperty::Delay, &mut delay)?;
                bind.regular_f32(ActionProperty::Probability, &mut priority)
            },
        )
        .unwrap();
        assert_eq!(priority, 100.0);
        assert_eq!(delay.value, 0.0);
    }

    #[test]
    fn default_valued_field_is_not_emitted() {
        let mut writer = Writer::new();
        let mut probability = 100.0f32;
        exchange_properties::<_, ActionProperty>(
            &mut writer,
            false,
            PropertyEmission::NonDefault,
            |bind| bind.regular_f32(ActionProperty::Probability, &mut probability),
        )
        .unwrap();
        assert_eq!(writer.into_bytes(), vec![0]);
    }

    #[test]
    fn always_policy_emits_defaults_too() {
        let mut writer = Writer::new();
        let mut probability = 100.0f32;
        exchange_properties::<_, ActionProperty>(
            &mut writer,
            false,
            PropertyEmission::Always,
            |bind| bind.regular_f32(ActionProperty::Probability, &mut probability),
        )
        .unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], ActionProperty::Probability.tag());
    }

    #[test]
    fn unknown_tag_is_fatal() {
        let bytes = [1u8, 0xEE, 0, 0, 0, 0];
        let mut reader = Reader::new(&bytes);
        let err = exchange_properties::<_, ActionProperty>(
            &mut reader,
            false,
            PropertyEmission::NonDefault,
            |_| Ok(()),
        );
        assert!(matches!(
            err,
            Err(Error::UnknownPropertyType { tag: 0xEE, .. })
        ));
    }

    #[test]
    fn defaulting_is_idempotent_under_reencode() {
        // Decode an empty map, re-encode with NonDefault: still empty.
        let bytes = [0u8];
        let mut reader = Reader::new(&bytes);
        let mut probability = 0.0f32;
        exchange_properties::<_, ActionProperty>(
            &mut reader,
            false,
            PropertyEmission::NonDefault,
            |bind| bind.regular_f32(ActionProperty::Probability, &mut probability),
        )
        .unwrap();

        let mut writer = Writer::new();
        exchange_properties::<_, ActionProperty>(
            &mut writer,
            false,
            PropertyEmission::NonDefault,
            |bind| bind.regular_f32(ActionProperty::Probability, &mut probability),
        )
        .unwrap();
        assert_eq!(writer.into_bytes(), bytes);
    }

    #[test]
    fn regular_and_randomizer_roundtrip() {
        let mut volume = RandomizableValue {
            value: -6.0f32,
            minimum: -2.0,
            maximum: 2.0,
        };
        let mut writer = Writer::new();
        exchange_properties::<_, AudioProperty>(
            &mut writer,
            true,
            PropertyEmission::NonDefault,
            |bind| bind.randomizable_f32(AudioProperty::VoiceVolume, &mut volume),
        )
        .unwrap();
        let bytes = writer.into_bytes();

        let mut reader = Reader::new(&bytes);
        let mut decoded = RandomizableValue::<f32>::default();
        exchange_properties::<_, AudioProperty>(
            &mut reader,
            true,
            PropertyEmission::NonDefault,
            |bind| bind.randomizable_f32(AudioProperty::VoiceVolume, &mut decoded),
        )
        .unwrap();
        assert_eq!(decoded, volume);
        assert!(reader.is_exhausted());
    }
}
