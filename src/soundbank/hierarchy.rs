//! Hierarchy-object exchange (the HIRC chunk body).
//!
//! Each entry is `{type: u8, size: u32, payload[size]}`.  The type byte is
//! resolved through a version-conditional tag table; a tag with no entry
//! becomes [`HierarchyObject::Unknown`] and its payload is preserved
//! verbatim so the bank still round-trips.  That is the single tolerant
//! path: an unrecognized *nested* tag (an event-action sub-type) is fatal,
//! because the nested schemas are exhaustively reverse engineered and a
//! miss there means a wrong version, not a new object kind.
//!
//! Payloads are decoded against a window of exactly `size` bytes;
//! under-consumption is a schema bug and fails loudly.  On encode the size
//! field is backpatched once the payload is written.

use log::warn;

use crate::bits::{exchange_bits_u32, exchange_bits_u8};
use crate::error::{Error, Result};
use crate::stream::{
    exchange_constant_u16, exchange_constant_u32, exchange_constant_u8, exchange_count,
    exchange_id, exchange_list, exchange_list_late, CountWidth, Stream,
};
use crate::version::FormatVersion;

use super::model::*;
use super::property::{exchange_properties, ActionProperty, ModulatorProperty};
use super::sections::*;
use super::Ctx;

// ── Tag table ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectKind {
    StatefulPropertySetting,
    Sound,
    EventAction,
    Event,
    SoundPlaylistContainer,
    SoundSwitchContainer,
    ActorMixer,
    AudioBus,
    SoundBlendContainer,
    MusicSegment,
    MusicTrack,
    MusicSwitchContainer,
    MusicPlaylistContainer,
    Attenuation,
    DialogueEvent,
    Effect,
    Source,
    AuxiliaryAudioBus,
    LowFrequencyOscillatorModulator,
    EnvelopeModulator,
    AudioDevice,
    TimeModulator,
}

struct TagRow {
    kind: ObjectKind,
    /// Wire byte before the 125 table shift (0: kind absent there).
    early: u8,
    /// Wire byte from 125 on, after the two feedback slots were dropped.
    late: u8,
    /// First revision carrying the kind.
    minimum: u32,
}

#[rustfmt::skip]
const TAG_TABLE: &[TagRow] = &[
    TagRow { kind: ObjectKind::StatefulPropertySetting,         early:  1, late:  1, minimum:  72 },
    TagRow { kind: ObjectKind::Sound,                           early:  2, late:  2, minimum:  72 },
    TagRow { kind: ObjectKind::EventAction,                     early:  3, late:  3, minimum:  72 },
    TagRow { kind: ObjectKind::Event,                           early:  4, late:  4, minimum:  72 },
    TagRow { kind: ObjectKind::SoundPlaylistContainer,          early:  5, late:  5, minimum:  72 },
    TagRow { kind: ObjectKind::SoundSwitchContainer,            early:  6, late:  6, minimum:  72 },
    TagRow { kind: ObjectKind::ActorMixer,                      early:  7, late:  7, minimum:  72 },
    TagRow { kind: ObjectKind::AudioBus,                        early:  8, late:  8, minimum:  72 },
    TagRow { kind: ObjectKind::SoundBlendContainer,             early:  9, late:  9, minimum:  72 },
    TagRow { kind: ObjectKind::MusicSegment,                    early: 10, late: 10, minimum:  72 },
    TagRow { kind: ObjectKind::MusicTrack,                      early: 11, late: 11, minimum:  72 },
    TagRow { kind: ObjectKind::MusicSwitchContainer,            early: 12, late: 12, minimum:  72 },
    TagRow { kind: ObjectKind::MusicPlaylistContainer,          early: 13, late: 13, minimum:  72 },
    TagRow { kind: ObjectKind::Attenuation,                     early: 14, late: 14, minimum:  72 },
    TagRow { kind: ObjectKind::DialogueEvent,                   early: 15, late: 15, minimum:  72 },
    // Slots 16/17 before the shift are the motion feedback kinds, which are
    // not reverse engineered; they fall through to Unknown.
    TagRow { kind: ObjectKind::Effect,                          early: 18, late: 16, minimum:  72 },
    TagRow { kind: ObjectKind::Source,                          early: 19, late: 17, minimum:  72 },
    TagRow { kind: ObjectKind::AuxiliaryAudioBus,               early: 20, late: 18, minimum:  72 },
    TagRow { kind: ObjectKind::LowFrequencyOscillatorModulator, early: 21, late: 19, minimum: 112 },
    TagRow { kind: ObjectKind::EnvelopeModulator,               early: 22, late: 20, minimum: 112 },
    TagRow { kind: ObjectKind::AudioDevice,                     early:  0, late: 21, minimum: 128 },
    TagRow { kind: ObjectKind::TimeModulator,                   early:  0, late: 22, minimum: 132 },
];

fn row_tag(row: &TagRow, version: FormatVersion) -> u8 {
    if version.at_least(125) {
        row.late
    } else {
        row.early
    }
}

fn kind_of_tag(version: FormatVersion, tag: u8) -> Option<ObjectKind> {
    TAG_TABLE
        .iter()
        .filter(|row| version.at_least(row.minimum))
        .find(|row| row_tag(row, version) == tag)
        .map(|row| row.kind)
}

fn tag_of_kind(version: FormatVersion, kind: ObjectKind) -> Option<u8> {
    TAG_TABLE
        .iter()
        .filter(|row| version.at_least(row.minimum))
        .find(|row| row.kind == kind)
        .map(|row| row_tag(row, version))
}

fn kind_of_object(object: &HierarchyObject) -> Option<ObjectKind> {
    Some(match object {
        HierarchyObject::StatefulPropertySetting(_) => ObjectKind::StatefulPropertySetting,
        HierarchyObject::Sound(_) => ObjectKind::Sound,
        HierarchyObject::EventAction(_) => ObjectKind::EventAction,
        HierarchyObject::Event(_) => ObjectKind::Event,
        HierarchyObject::SoundPlaylistContainer(_) => ObjectKind::SoundPlaylistContainer,
        HierarchyObject::SoundSwitchContainer(_) => ObjectKind::SoundSwitchContainer,
        HierarchyObject::ActorMixer(_) => ObjectKind::ActorMixer,
        HierarchyObject::AudioBus(_) => ObjectKind::AudioBus,
        HierarchyObject::SoundBlendContainer(_) => ObjectKind::SoundBlendContainer,
        HierarchyObject::MusicSegment(_) => ObjectKind::MusicSegment,
        HierarchyObject::MusicTrack(_) => ObjectKind::MusicTrack,
        HierarchyObject::MusicSwitchContainer(_) => ObjectKind::MusicSwitchContainer,
        HierarchyObject::MusicPlaylistContainer(_) => ObjectKind::MusicPlaylistContainer,
        HierarchyObject::Attenuation(_) => ObjectKind::Attenuation,
        HierarchyObject::DialogueEvent(_) => ObjectKind::DialogueEvent,
        HierarchyObject::Effect(_) => ObjectKind::Effect,
        HierarchyObject::Source(_) => ObjectKind::Source,
        HierarchyObject::AuxiliaryAudioBus(_) => ObjectKind::AuxiliaryAudioBus,
        HierarchyObject::LowFrequencyOscillatorModulator(_) => {
            ObjectKind::LowFrequencyOscillatorModulator
        }
        HierarchyObject::EnvelopeModulator(_) => ObjectKind::EnvelopeModulator,
        HierarchyObject::AudioDevice(_) => ObjectKind::AudioDevice,
        HierarchyObject::TimeModulator(_) => ObjectKind::TimeModulator,
        HierarchyObject::Unknown { .. } => return None,
    })
}

fn empty_object(kind: ObjectKind) -> HierarchyObject {
    match kind {
        ObjectKind::StatefulPropertySetting => {
            HierarchyObject::StatefulPropertySetting(Default::default())
        }
        ObjectKind::Sound => HierarchyObject::Sound(Default::default()),
        ObjectKind::EventAction => HierarchyObject::EventAction(Default::default()),
        ObjectKind::Event => HierarchyObject::Event(Default::default()),
        ObjectKind::SoundPlaylistContainer => {
            HierarchyObject::SoundPlaylistContainer(Default::default())
        }
        ObjectKind::SoundSwitchContainer => {
            HierarchyObject::SoundSwitchContainer(Default::default())
        }
        ObjectKind::ActorMixer => HierarchyObject::ActorMixer(Default::default()),
        ObjectKind::AudioBus => HierarchyObject::AudioBus(Default::default()),
        ObjectKind::SoundBlendContainer => {
            HierarchyObject::SoundBlendContainer(Default::default())
        }
        ObjectKind::MusicSegment => HierarchyObject::MusicSegment(Default::default()),
        ObjectKind::MusicTrack => HierarchyObject::MusicTrack(Default::default()),
        ObjectKind::MusicSwitchContainer => {
            HierarchyObject::MusicSwitchContainer(Default::default())
        }
        ObjectKind::MusicPlaylistContainer => {
            HierarchyObject::MusicPlaylistContainer(Default::default())
        }
        ObjectKind::Attenuation => HierarchyObject::Attenuation(Default::default()),
        ObjectKind::DialogueEvent => HierarchyObject::DialogueEvent(Default::default()),
        ObjectKind::Effect => HierarchyObject::Effect(Default::default()),
        ObjectKind::Source => HierarchyObject::Source(Default::default()),
        ObjectKind::AuxiliaryAudioBus => HierarchyObject::AuxiliaryAudioBus(Default::default()),
        ObjectKind::LowFrequencyOscillatorModulator => {
            HierarchyObject::LowFrequencyOscillatorModulator(Default::default())
        }
        ObjectKind::EnvelopeModulator => HierarchyObject::EnvelopeModulator(Default::default()),
        ObjectKind::AudioDevice => HierarchyObject::AudioDevice(Default::default()),
        ObjectKind::TimeModulator => HierarchyObject::TimeModulator(Default::default()),
    }
}

// ── Entry points ─────────────────────────────────────────────────────────────

pub(super) fn exchange_hierarchy<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    objects: &mut Vec<HierarchyObject>,
) -> Result<()> {
    exchange_list(stream, objects, CountWidth::U32, |s, object| {
        exchange_object(s, ctx, object)
    })
}

fn exchange_object<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    object: &mut HierarchyObject,
) -> Result<()> {
    // The type byte is direction-split container mechanics: decode reads it
    // to pick the variant, encode derives it from the variant in hand.
    let offset = stream.position();
    let mut tag = match kind_of_object(object) {
        // A kind the active version's table does not list cannot be encoded
        // under that version (e.g. a time modulator below 132).
        Some(kind) => tag_of_kind(ctx.version, kind).ok_or(Error::UnknownVariant {
            context: "hierarchy object kind",
            offset,
            tag: kind as u32,
        })?,
        None => match object {
            HierarchyObject::Unknown { kind, .. } => *kind,
            _ => 0,
        },
    };
    stream.exchange_u8(&mut tag)?;
    if stream.reading() {
        *object = match kind_of_tag(ctx.version, tag) {
            Some(kind) => empty_object(kind),
            None => {
                warn!("unknown hierarchy object kind {tag} at offset {offset:#x}");
                HierarchyObject::Unknown {
                    kind: tag,
                    data: Vec::new(),
                }
            }
        };
    }
    stream.exchange_u32_sized_block("hierarchy object", |s| match object {
        HierarchyObject::StatefulPropertySetting(value) => {
            exchange_stateful_property_setting(s, ctx, value)
        }
        HierarchyObject::Sound(value) => exchange_sound(s, ctx, value),
        HierarchyObject::EventAction(value) => exchange_event_action(s, ctx, value),
        HierarchyObject::Event(value) => exchange_event(s, ctx, value),
        HierarchyObject::SoundPlaylistContainer(value) => {
            exchange_sound_playlist_container(s, ctx, value)
        }
        HierarchyObject::SoundSwitchContainer(value) => {
            exchange_sound_switch_container(s, ctx, value)
        }
        HierarchyObject::ActorMixer(value) => exchange_actor_mixer(s, ctx, value),
        HierarchyObject::AudioBus(value) | HierarchyObject::AuxiliaryAudioBus(value) => {
            exchange_audio_bus(s, ctx, value)
        }
        HierarchyObject::SoundBlendContainer(value) => {
            exchange_sound_blend_container(s, ctx, value)
        }
        HierarchyObject::MusicSegment(value) => exchange_music_segment(s, ctx, value),
        HierarchyObject::MusicTrack(value) => exchange_music_track(s, ctx, value),
        HierarchyObject::MusicSwitchContainer(value) => {
            exchange_music_switch_container(s, ctx, value)
        }
        HierarchyObject::MusicPlaylistContainer(value) => {
            exchange_music_playlist_container(s, ctx, value)
        }
        HierarchyObject::Attenuation(value) => exchange_attenuation(s, ctx, value),
        HierarchyObject::DialogueEvent(value) => exchange_dialogue_event(s, ctx, value),
        HierarchyObject::Effect(value) | HierarchyObject::Source(value) => {
            exchange_effect(s, ctx, value)
        }
        HierarchyObject::LowFrequencyOscillatorModulator(value) => {
            exchange_lfo_modulator(s, ctx, value)
        }
        HierarchyObject::EnvelopeModulator(value) => exchange_envelope_modulator(s, ctx, value),
        HierarchyObject::AudioDevice(value) => exchange_audio_device(s, ctx, value),
        HierarchyObject::TimeModulator(value) => exchange_time_modulator(s, ctx, value),
        HierarchyObject::Unknown { data, .. } => s.exchange_rest(data),
    })
}

// ── Shared audio-node layout ─────────────────────────────────────────────────

/// Actor-mixer family head: effect through the common-property block.  The
/// priority override rides the MIDI byte from 112 on.
fn exchange_actor_node<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
    extra: NodeExtraProperty<'_>,
) -> Result<()> {
    exchange_effect_setting_with_override(stream, ctx, &mut node.effect, &mut node.override_effect)?;
    exchange_metadata_setting_with_override(
        stream,
        ctx,
        &mut node.metadata,
        &mut node.override_metadata,
    )?;
    exchange_mixer_override(stream, ctx, &mut node.override_mixer)?;
    exchange_output_bus(stream, ctx, &mut node.output_bus)?;
    exchange_id(stream, &mut node.parent)?;
    if ctx.version.within(72, 112) {
        exchange_priority_with_override(
            stream,
            ctx,
            &mut node.playback_priority,
            &mut node.override_playback_priority,
        )?;
    }
    exchange_midi_and_priority(stream, ctx, node)?;
    exchange_node_properties(stream, ctx, node, extra)?;
    exchange_node_tail(stream, ctx, node)
}

/// Interactive-music family head: same shape, but the priority override
/// keeps its own byte in every revision.
fn exchange_music_node<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
    extra: NodeExtraProperty<'_>,
) -> Result<()> {
    exchange_effect_setting_with_override(stream, ctx, &mut node.effect, &mut node.override_effect)?;
    exchange_metadata_setting_with_override(
        stream,
        ctx,
        &mut node.metadata,
        &mut node.override_metadata,
    )?;
    exchange_mixer_override(stream, ctx, &mut node.override_mixer)?;
    exchange_output_bus(stream, ctx, &mut node.output_bus)?;
    exchange_id(stream, &mut node.parent)?;
    exchange_priority_with_override(
        stream,
        ctx,
        &mut node.playback_priority,
        &mut node.override_playback_priority,
    )?;
    exchange_node_properties(stream, ctx, node, extra)?;
    exchange_node_tail(stream, ctx, node)
}

fn exchange_node_tail<S: Stream>(stream: &mut S, ctx: Ctx, node: &mut AudioNode) -> Result<()> {
    exchange_positioning(stream, ctx, &mut node.positioning, &mut node.override_positioning)?;
    exchange_auxiliary_send(
        stream,
        ctx,
        &mut node.auxiliary_send,
        &mut node.override_game_defined_auxiliary_send,
        &mut node.override_user_defined_auxiliary_send,
    )?;
    exchange_auxiliary_send_with_early_reflection(
        stream,
        ctx,
        &mut node.auxiliary_send,
        &mut node.override_game_defined_auxiliary_send,
        &mut node.override_user_defined_auxiliary_send,
        &mut node.override_early_reflection_auxiliary_send,
    )?;
    exchange_playback_limit_and_virtual_voice(stream, ctx, node)?;
    exchange_voice_volume_gain_and_hdr(stream, ctx, node)?;
    exchange_state_setting(stream, ctx, &mut node.state)?;
    exchange_rtpc_setting(stream, ctx, &mut node.real_time_parameter_control)
}

// ── Actor-mixer kinds ────────────────────────────────────────────────────────

fn exchange_sound<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut Sound) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_source_setting(stream, ctx, &mut value.source)?;
    let playback = &mut value.playback_setting;
    exchange_actor_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::SoundPlayback {
            initial_delay: &mut playback.initial_delay,
            loop_count: &mut playback.loop_count,
        },
    )
}

fn exchange_sound_playlist_container<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut SoundPlaylistContainer,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_actor_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::InitialDelay(&mut value.playback_setting.initial_delay),
    )?;
    exchange_playlist_playback_setting(stream, ctx, &mut value.playback_setting)?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_sound_playlist(stream, ctx, &mut value.playback_setting.playlist)
}

fn exchange_sound_switch_container<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut SoundSwitchContainer,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_actor_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::InitialDelay(&mut value.playback_setting.initial_delay),
    )?;
    exchange_switcher_setting(stream, ctx, &mut value.playback_setting.switcher)?;
    exchange_play_mode(stream, ctx, &mut value.playback_setting.mode)?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_switch_assign_list(stream, ctx, &mut value.playback_setting.object_assign)?;
    exchange_switch_attribute_list(stream, ctx, &mut value.playback_setting.object_attribute)
}

fn exchange_sound_blend_container<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut SoundBlendContainer,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_actor_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::InitialDelay(&mut value.playback_setting.initial_delay),
    )?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_blend_track_list(stream, ctx, &mut value.playback_setting.track)?;
    if ctx.version.at_least(120) {
        exchange_play_mode(stream, ctx, &mut value.playback_setting.mode)?;
    }
    Ok(())
}

fn exchange_actor_mixer<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut ActorMixer) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_actor_node(stream, ctx, &mut value.node, NodeExtraProperty::None)?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)
}

// ── Buses ────────────────────────────────────────────────────────────────────

fn exchange_audio_bus<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut AudioBus) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_id(stream, &mut value.parent)?;
    if ctx.version.at_least(128) && value.parent.is_none() {
        exchange_id(stream, &mut value.audio_device)?;
    }
    exchange_properties(stream, false, ctx.emission, |bind| {
        bind_bus_common_properties(bind, ctx, value)
    })?;
    if ctx.version.within(88, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.override_positioning);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.positioning.speaker_panning.enable);
            Ok(())
        })?;
    }
    if ctx.version.within(112, 125) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.override_positioning);
            bits.flag(&mut value.positioning.speaker_panning.enable);
            Ok(())
        })?;
    }
    if ctx.version.at_least(125) {
        // Buses always own their positioning; the flag on the wire is
        // constant true.
        let offset = stream.position();
        let mut overridden = true;
        exchange_positioning(stream, ctx, &mut value.positioning, &mut overridden)?;
        if !overridden {
            return Err(Error::UnexpectedConstant {
                offset,
                expected: 1,
                found: 0,
            });
        }
        value.override_positioning = overridden;
    }
    if ctx.version.within(125, 135) {
        let offset = stream.position();
        let mut override_game_defined = true;
        let mut override_user_defined = true;
        exchange_auxiliary_send(
            stream,
            ctx,
            &mut value.auxiliary_send,
            &mut override_game_defined,
            &mut override_user_defined,
        )?;
        if !override_game_defined || !override_user_defined {
            return Err(Error::UnexpectedConstant {
                offset,
                expected: 1,
                found: 0,
            });
        }
    }
    if ctx.version.at_least(135) {
        let offset = stream.position();
        let mut override_game_defined = true;
        let mut override_user_defined = true;
        let mut override_early_reflection = true;
        exchange_auxiliary_send_with_early_reflection(
            stream,
            ctx,
            &mut value.auxiliary_send,
            &mut override_game_defined,
            &mut override_user_defined,
            &mut override_early_reflection,
        )?;
        if !override_game_defined || !override_user_defined || !override_early_reflection {
            return Err(Error::UnexpectedConstant {
                offset,
                expected: 1,
                found: 0,
            });
        }
    }
    exchange_playback_limit_with_override(
        stream,
        ctx,
        &mut value.playback_limit,
        &mut value.override_playback_limit,
    )?;
    exchange_playback_limit_with_mute(
        stream,
        ctx,
        &mut value.playback_limit,
        &mut value.mute_for_background_music,
        &mut value.override_playback_limit,
    )?;
    exchange_bus_configuration(stream, ctx, &mut value.bus_configuration)?;
    exchange_bus_hdr(stream, ctx, &mut value.hdr)?;
    if ctx.version.within(72, 88) {
        exchange_constant_u32(stream, 63)?;
    }
    exchange_automatic_ducking(stream, ctx, &mut value.automatic_ducking)?;
    exchange_effect_setting(stream, ctx, &mut value.effect)?;
    if ctx.version.within(112, 150) {
        exchange_id(stream, &mut value.mixer)?;
        exchange_constant_u16(stream, 0)?;
    }
    exchange_metadata_setting(stream, ctx, &mut value.metadata)?;
    exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    exchange_state_setting(stream, ctx, &mut value.state)
}

// ── Interactive music ────────────────────────────────────────────────────────

fn exchange_music_track<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut MusicTrack) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_music_midi_override(stream, ctx, &mut value.midi)?;
    exchange_source_list(stream, ctx, &mut value.source)?;
    exchange_music_track_clip(stream, ctx, &mut value.playback_setting.clip)?;
    exchange_music_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::Music {
            speed: None,
            midi: &mut value.midi.setting,
        },
    )?;
    let playback = &mut value.playback_setting;
    if ctx.version.within(72, 112) {
        exchange_bits_u32(stream, |bits| bits.field(&mut playback.kind))?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| bits.field(&mut playback.kind))?;
        if playback.kind == MusicTrackTrackType::Switcher {
            exchange_switcher_setting(stream, ctx, &mut playback.switcher)?;
            exchange_music_track_transition_setting(stream, ctx, &mut playback.transition)?;
        }
    }
    exchange_music_track_stream(stream, ctx, &mut value.stream)?;
    exchange_constant_u16(stream, 0)
}

fn exchange_music_segment<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicSegment,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_music_midi_override(stream, ctx, &mut value.midi)?;
    exchange_music_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::Music {
            speed: Some(&mut value.playback_setting.speed),
            midi: &mut value.midi.setting,
        },
    )?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_time_setting(stream, ctx, &mut value.time_setting, &mut value.override_time_setting)?;
    exchange_stinger_setting(stream, ctx, &mut value.stinger)?;
    stream.exchange_f64(&mut value.playback_setting.duration)?;
    exchange_music_cue(stream, ctx, &mut value.playback_setting.cue)
}

fn exchange_music_playlist_container<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicPlaylistContainer,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_music_midi_override(stream, ctx, &mut value.midi)?;
    exchange_music_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::Music {
            speed: Some(&mut value.playback_setting.speed),
            midi: &mut value.midi.setting,
        },
    )?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_time_setting(stream, ctx, &mut value.time_setting, &mut value.override_time_setting)?;
    exchange_stinger_setting(stream, ctx, &mut value.stinger)?;
    exchange_music_transition_setting(stream, ctx, &mut value.transition)?;
    exchange_music_playlist(stream, ctx, &mut value.playback_setting.playlist)
}

fn exchange_music_switch_container<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicSwitchContainer,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_music_midi_override(stream, ctx, &mut value.midi)?;
    exchange_music_node(
        stream,
        ctx,
        &mut value.node,
        NodeExtraProperty::Music {
            speed: Some(&mut value.playback_setting.speed),
            midi: &mut value.midi.setting,
        },
    )?;
    exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    exchange_time_setting(stream, ctx, &mut value.time_setting, &mut value.override_time_setting)?;
    exchange_stinger_setting(stream, ctx, &mut value.stinger)?;
    exchange_music_transition_setting(stream, ctx, &mut value.transition)?;
    if ctx.version.within(72, 88) {
        exchange_switcher_setting(stream, ctx, &mut value.playback_setting.switcher)?;
    }
    exchange_bits_u8(stream, |bits| {
        bits.flag(&mut value.playback_setting.continue_playing_on_switch_change);
        Ok(())
    })?;
    exchange_association_setting(stream, ctx, &mut value.playback_setting.association)
}

// ── Standalone kinds ─────────────────────────────────────────────────────────

fn exchange_stateful_property_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut StatefulPropertySetting,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.within(72, 128) {
        exchange_list_late(
            stream,
            &mut value.value,
            CountWidth::U8,
            |s, item| {
                let mut narrow = item.kind as u8;
                s.exchange_u8(&mut narrow)?;
                item.kind = narrow as u16;
                Ok(())
            },
            |s, item| s.exchange_f32(&mut item.value),
        )?;
    }
    if ctx.version.at_least(128) {
        exchange_list_late(
            stream,
            &mut value.value,
            CountWidth::U16,
            |s, item| s.exchange_u16(&mut item.kind),
            |s, item| s.exchange_f32(&mut item.value),
        )?;
    }
    Ok(())
}

fn exchange_event<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut Event) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.within(72, 125) {
        exchange_id_list(stream, CountWidth::U32, &mut value.child)?;
    }
    if ctx.version.at_least(125) {
        exchange_id_list(stream, CountWidth::U8, &mut value.child)?;
    }
    Ok(())
}

fn exchange_dialogue_event<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut DialogueEvent,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.at_least(88) {
        stream.exchange_u8(&mut value.probability)?;
    }
    exchange_association_setting(stream, ctx, &mut value.association)?;
    if ctx.version.at_least(120) {
        exchange_constant_u16(stream, 0)?;
    }
    Ok(())
}

fn exchange_attenuation<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Attenuation,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.at_least(140) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.height_spread);
            Ok(())
        })?;
    }
    exchange_bits_u8(stream, |bits| {
        bits.flag(&mut value.cone.enable);
        Ok(())
    })?;
    if value.cone.enable {
        stream.exchange_f32(&mut value.cone.inner_angle)?;
        stream.exchange_f32(&mut value.cone.outer_angle)?;
        stream.exchange_f32(&mut value.cone.maximum_value)?;
        stream.exchange_f32(&mut value.cone.low_pass_filter)?;
        if ctx.version.at_least(112) {
            stream.exchange_f32(&mut value.cone.high_pass_filter)?;
        }
    }
    let apply = &mut value.apply;
    if ctx.version.within(72, 88) {
        stream.exchange_u8(&mut apply.output_bus_volume)?;
        stream.exchange_u8(&mut apply.auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.low_pass_filter)?;
        stream.exchange_u8(&mut apply.spread)?;
    }
    if ctx.version.within(88, 112) {
        stream.exchange_u8(&mut apply.output_bus_volume)?;
        stream.exchange_u8(&mut apply.game_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.user_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.low_pass_filter)?;
        stream.exchange_u8(&mut apply.spread)?;
    }
    if ctx.version.within(112, 145) {
        stream.exchange_u8(&mut apply.output_bus_volume)?;
        stream.exchange_u8(&mut apply.game_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.user_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.low_pass_filter)?;
        stream.exchange_u8(&mut apply.high_pass_filter)?;
        stream.exchange_u8(&mut apply.spread)?;
        stream.exchange_u8(&mut apply.focus)?;
    }
    if ctx.version.at_least(145) {
        stream.exchange_u8(&mut apply.distance_output_bus_volume)?;
        stream.exchange_u8(&mut apply.distance_game_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.distance_user_defined_auxiliary_send_volume)?;
        stream.exchange_u8(&mut apply.distance_low_pass_filter)?;
        stream.exchange_u8(&mut apply.distance_high_pass_filter)?;
        stream.exchange_u8(&mut apply.distance_spread)?;
        stream.exchange_u8(&mut apply.distance_focus)?;
        stream.exchange_u8(&mut apply.obstruction_volume)?;
        stream.exchange_u8(&mut apply.obstruction_low_pass_filter)?;
        stream.exchange_u8(&mut apply.obstruction_high_pass_filter)?;
        stream.exchange_u8(&mut apply.occlusion_volume)?;
        stream.exchange_u8(&mut apply.occlusion_low_pass_filter)?;
        stream.exchange_u8(&mut apply.occlusion_high_pass_filter)?;
        stream.exchange_u8(&mut apply.diffraction_volume)?;
        stream.exchange_u8(&mut apply.diffraction_low_pass_filter)?;
        stream.exchange_u8(&mut apply.diffraction_high_pass_filter)?;
        stream.exchange_u8(&mut apply.transmission_volume)?;
        stream.exchange_u8(&mut apply.transmission_low_pass_filter)?;
        stream.exchange_u8(&mut apply.transmission_high_pass_filter)?;
    }
    exchange_list(stream, &mut value.curve, CountWidth::U8, |s, curve| {
        exchange_bits_u8(s, |bits| bits.field(&mut curve.mode))?;
        exchange_graph_point_list(s, CountWidth::U16, &mut curve.point)
    })?;
    exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)
}

/// `Effect` and `Source` share one layout; the plug-in payload is opaque and
/// preserved verbatim.
fn exchange_effect<S: Stream>(stream: &mut S, ctx: Ctx, value: &mut Effect) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_id(stream, &mut value.plug_in)?;
    exchange_expand(stream, &mut value.expand)?;
    exchange_constant_u8(stream, 0)?;
    exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    if ctx.version.within(125, 128) {
        exchange_constant_u16(stream, 0)?;
    }
    if ctx.version.at_least(128) {
        exchange_state_setting(stream, ctx, &mut value.state)?;
    }
    exchange_effect_u1_list(stream, ctx, &mut value.u1)
}

fn exchange_audio_device<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioDevice,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_id(stream, &mut value.plug_in)?;
    exchange_expand(stream, &mut value.expand)?;
    exchange_constant_u8(stream, 0)?;
    exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    exchange_state_setting(stream, ctx, &mut value.state)?;
    exchange_effect_u1_list(stream, ctx, &mut value.u1)?;
    if ctx.version.at_least(140) {
        exchange_effect_setting(stream, ctx, &mut value.effect)?;
    }
    Ok(())
}

fn exchange_expand<S: Stream>(stream: &mut S, expand: &mut Vec<u8>) -> Result<()> {
    let mut len = expand.len();
    exchange_count(stream, CountWidth::U32, &mut len)?;
    stream.exchange_bytes(expand, len)
}

// ── Modulators ───────────────────────────────────────────────────────────────

fn exchange_lfo_modulator<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut LowFrequencyOscillatorModulator,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.at_least(112) {
        exchange_properties::<_, ModulatorProperty>(stream, true, ctx.emission, |bind| {
            bind.randomizable_f32(ModulatorProperty::Depth, &mut value.depth)?;
            bind.randomizable_f32(ModulatorProperty::Frequency, &mut value.frequency)?;
            bind.enumeration(ModulatorProperty::Waveform, &mut value.waveform)?;
            bind.randomizable_f32(ModulatorProperty::Smoothing, &mut value.smoothing)?;
            bind.randomizable_f32(
                ModulatorProperty::PulseWidthModulation,
                &mut value.pulse_width_modulation,
            )?;
            bind.randomizable_f32(ModulatorProperty::Attack, &mut value.attack)?;
            bind.randomizable_f32(
                ModulatorProperty::InitialPhaseOffset,
                &mut value.initial_phase_offset,
            )?;
            bind.enumeration(ModulatorProperty::Scope, &mut value.scope)
        })?;
        exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    }
    Ok(())
}

fn exchange_envelope_modulator<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut EnvelopeModulator,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.at_least(112) {
        exchange_properties::<_, ModulatorProperty>(stream, true, ctx.emission, |bind| {
            bind.randomizable_f32(ModulatorProperty::AttackTime, &mut value.attack_time)?;
            bind.randomizable_f32(ModulatorProperty::AttackCurve, &mut value.attack_curve)?;
            bind.randomizable_f32(ModulatorProperty::DecayTime, &mut value.decay_time)?;
            bind.randomizable_f32(ModulatorProperty::SustainLevel, &mut value.sustain_level)?;
            bind.randomizable_f32(ModulatorProperty::ReleaseTime, &mut value.release_time)?;
            bind.enumeration(ModulatorProperty::Scope, &mut value.scope)?;
            bind.enumeration(ModulatorProperty::TriggerOn, &mut value.trigger_on)?;
            bind.randomizable_f32(ModulatorProperty::SustainTime, &mut value.sustain_time)?;
            bind.regular_bool(
                ModulatorProperty::StopPlayback,
                &mut value.stop_playback_after_release,
            )
        })?;
        exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    }
    Ok(())
}

fn exchange_time_modulator<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut TimeModulator,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    if ctx.version.at_least(132) {
        exchange_properties::<_, ModulatorProperty>(stream, true, ctx.emission, |bind| {
            bind.randomizable_f32(ModulatorProperty::InitialDelay, &mut value.initial_delay)?;
            bind.regular_f32(ModulatorProperty::Duration, &mut value.duration)?;
            bind.randomizable_i32(ModulatorProperty::Loop, &mut value.loop_count)?;
            bind.randomizable_f32(ModulatorProperty::PlaybackRate, &mut value.playback_rate)?;
            bind.enumeration(ModulatorProperty::Scope, &mut value.scope)?;
            bind.enumeration(ModulatorProperty::TriggerOn, &mut value.trigger_on)?;
            bind.regular_bool(
                ModulatorProperty::StopPlayback,
                &mut value.stop_playback_at_end,
            )
        })?;
        exchange_rtpc_setting(stream, ctx, &mut value.real_time_parameter_control)?;
    }
    Ok(())
}

// ── Event actions ────────────────────────────────────────────────────────────

/// Wire sub-type for a payload shape.  The value/reset twins and the
/// enable/disable pair fold the flag into the tag.
fn action_wire_type(property: &EventActionProperty) -> u8 {
    use EventActionProperty as P;
    match property {
        P::StopAudio { .. } => 1,
        P::PauseAudio { .. } => 2,
        P::ResumeAudio { .. } => 3,
        P::PlayAudio { .. } => 4,
        P::SetMute { reset, .. } => 6 + *reset as u8,
        P::SetVoicePitch { reset, .. } => 8 + *reset as u8,
        P::SetVoiceVolume { reset, .. } => 10 + *reset as u8,
        P::SetBusVolume { reset, .. } => 12 + *reset as u8,
        P::SetVoiceLowPassFilter { reset, .. } => 14 + *reset as u8,
        P::SetStateAvailability { enable, .. } => 17 - *enable as u8,
        P::ActivateState { .. } => 18,
        P::SetGameParameter { reset, .. } => 19 + *reset as u8,
        P::ActivateSwitch { .. } => 25,
        P::SetBypassEffect { reset, .. } => 26 + *reset as u8,
        P::BreakAudio { .. } => 28,
        P::ActivateTrigger { .. } => 29,
        P::SeekAudio { .. } => 30,
        P::ReleaseEnvelope { .. } => 31,
        P::SetVoiceHighPassFilter { reset, .. } => {
            if *reset {
                48
            } else {
                32
            }
        }
        P::PostEvent { .. } => 33,
        P::ResetPlaylist { .. } => 34,
    }
}

/// Fresh payload shape for a decoded sub-type, version-gated the way the
/// wire table is.  `None` means the tag has no case under this version.
fn action_property_template(version: FormatVersion, tag: u8) -> Option<EventActionProperty> {
    use EventActionProperty as P;
    Some(match tag {
        1 => P::StopAudio {
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            resume_state_transition: false,
            apply_to_dynamic_sequence: false,
            exception: Vec::new(),
        },
        2 => P::PauseAudio {
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            include_delayed_resume_action: false,
            resume_state_transition: false,
            apply_to_dynamic_sequence: false,
            exception: Vec::new(),
        },
        3 => P::ResumeAudio {
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            master_resume: false,
            resume_state_transition: false,
            apply_to_dynamic_sequence: false,
            exception: Vec::new(),
        },
        4 => P::PlayAudio {
            delay: Default::default(),
            fade_time: Default::default(),
            probability: 100.0,
            fade_curve: Default::default(),
            sound_bank: crate::stream::Id::NONE,
        },
        6 | 7 => P::SetMute {
            reset: tag == 7,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            exception: Vec::new(),
        },
        8 | 9 => P::SetVoicePitch {
            reset: tag == 9,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        10 | 11 => P::SetVoiceVolume {
            reset: tag == 11,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        12 | 13 => P::SetBusVolume {
            reset: tag == 13,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        14 | 15 => P::SetVoiceLowPassFilter {
            reset: tag == 15,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        16 | 17 => P::SetStateAvailability {
            enable: tag == 16,
            delay: Default::default(),
        },
        18 => P::ActivateState {
            delay: Default::default(),
            group: crate::stream::Id::NONE,
            item: crate::stream::Id::NONE,
        },
        19 | 20 => P::SetGameParameter {
            reset: tag == 20,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            bypass_game_parameter_interpolation: false,
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        25 => P::ActivateSwitch {
            delay: Default::default(),
            group: crate::stream::Id::NONE,
            item: crate::stream::Id::NONE,
        },
        26 | 27 => P::SetBypassEffect {
            reset: tag == 27,
            delay: Default::default(),
            enable: false,
            value: [false; 5],
            exception: Vec::new(),
        },
        28 => P::BreakAudio {
            delay: Default::default(),
        },
        29 => P::ActivateTrigger {
            delay: Default::default(),
        },
        30 => P::SeekAudio {
            delay: Default::default(),
            seek_type: Default::default(),
            seek_value: Default::default(),
            seek_to_nearest_marker: false,
            exception: Vec::new(),
        },
        31 if version.at_least(112) => P::ReleaseEnvelope {
            delay: Default::default(),
        },
        32 | 48 if version.at_least(112) => P::SetVoiceHighPassFilter {
            reset: tag == 48,
            delay: Default::default(),
            fade_time: Default::default(),
            fade_curve: Default::default(),
            apply_mode: Default::default(),
            value: Default::default(),
            exception: Vec::new(),
        },
        33 if version.at_least(113) => P::PostEvent {
            delay: Default::default(),
        },
        34 if version.at_least(113) => P::ResetPlaylist {
            delay: Default::default(),
        },
        _ => return None,
    })
}

fn exchange_event_action<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut EventAction,
) -> Result<()> {
    exchange_id(stream, &mut value.id)?;
    exchange_bits_u8(stream, |bits| {
        bits.field(&mut value.scope)?;
        bits.field(&mut value.mode)
    })?;
    let offset = stream.position();
    let mut tag = action_wire_type(&value.property);
    stream.exchange_u8(&mut tag)?;
    exchange_id(stream, &mut value.target)?;
    stream.exchange_u8(&mut value.u1)?;
    if stream.reading() {
        // An unmatched sub-type here is fatal; only the top-level object
        // tag carries the Unknown fallback.
        value.property =
            action_property_template(ctx.version, tag).ok_or(Error::UnknownVariant {
                context: "event action sub-type",
                offset,
                tag: tag as u32,
            })?;
    }
    exchange_action_property(stream, ctx, &mut value.property)
}

fn exchange_action_exceptions<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    list: &mut Vec<ActionException>,
) -> Result<()> {
    let width = if ctx.version.at_least(125) {
        CountWidth::U8
    } else {
        CountWidth::U32
    };
    exchange_list(stream, list, width, |s, item| {
        exchange_id(s, &mut item.id)?;
        exchange_bits_u8(s, |bits| {
            bits.flag(&mut item.u1);
            Ok(())
        })
    })
}

fn exchange_action_delay<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    delay: &mut RandomizableValue<f32>,
) -> Result<()> {
    exchange_properties::<_, ActionProperty>(stream, true, ctx.emission, |bind| {
        bind.randomizable_f32(ActionProperty::Delay, delay)
    })
}

fn exchange_action_delay_and_fade<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    delay: &mut RandomizableValue<f32>,
    fade_time: &mut RandomizableValue<f32>,
) -> Result<()> {
    exchange_properties::<_, ActionProperty>(stream, true, ctx.emission, |bind| {
        bind.randomizable_f32(ActionProperty::Delay, delay)?;
        bind.randomizable_f32(ActionProperty::FadeTime, fade_time)
    })
}

/// The shared tail of the set-value family: apply mode, value triple,
/// exceptions.
fn exchange_action_value_tail<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    apply_mode: &mut ValueApplyMode,
    value: &mut RandomizableValue<f32>,
    exception: &mut Vec<ActionException>,
) -> Result<()> {
    exchange_bits_u8(stream, |bits| bits.field(apply_mode))?;
    stream.exchange_f32(&mut value.value)?;
    stream.exchange_f32(&mut value.minimum)?;
    stream.exchange_f32(&mut value.maximum)?;
    exchange_action_exceptions(stream, ctx, exception)
}

fn exchange_action_property<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    property: &mut EventActionProperty,
) -> Result<()> {
    use EventActionProperty as P;
    match property {
        P::PlayAudio {
            delay,
            fade_time,
            probability,
            fade_curve,
            sound_bank,
        } => {
            exchange_properties::<_, ActionProperty>(stream, true, ctx.emission, |bind| {
                bind.randomizable_f32(ActionProperty::Delay, delay)?;
                bind.randomizable_f32(ActionProperty::FadeTime, fade_time)?;
                bind.regular_f32(ActionProperty::Probability, probability)
            })?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            exchange_id(stream, sound_bank)?;
            if ctx.version.at_least(145) {
                exchange_constant_u32(stream, 0)?;
            }
            Ok(())
        }
        P::StopAudio {
            delay,
            fade_time,
            fade_curve,
            resume_state_transition,
            apply_to_dynamic_sequence,
            exception,
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            if ctx.version.at_least(125) {
                exchange_bits_u8(stream, |bits| {
                    bits.constant(false)?;
                    bits.flag(resume_state_transition);
                    bits.flag(apply_to_dynamic_sequence);
                    Ok(())
                })?;
            }
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::PauseAudio {
            delay,
            fade_time,
            fade_curve,
            include_delayed_resume_action,
            resume_state_transition,
            apply_to_dynamic_sequence,
            exception,
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            if ctx.version.within(72, 125) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(include_delayed_resume_action);
                    Ok(())
                })?;
            }
            if ctx.version.at_least(125) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(include_delayed_resume_action);
                    bits.flag(resume_state_transition);
                    bits.flag(apply_to_dynamic_sequence);
                    Ok(())
                })?;
            }
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::ResumeAudio {
            delay,
            fade_time,
            fade_curve,
            master_resume,
            resume_state_transition,
            apply_to_dynamic_sequence,
            exception,
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            if ctx.version.within(72, 125) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(master_resume);
                    Ok(())
                })?;
            }
            if ctx.version.at_least(125) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(master_resume);
                    bits.flag(resume_state_transition);
                    bits.flag(apply_to_dynamic_sequence);
                    Ok(())
                })?;
            }
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::BreakAudio { delay } | P::ActivateTrigger { delay } => {
            exchange_action_delay(stream, ctx, delay)
        }
        P::ReleaseEnvelope { delay } | P::PostEvent { delay } => {
            exchange_action_delay(stream, ctx, delay)
        }
        P::SeekAudio {
            delay,
            seek_type,
            seek_value,
            seek_to_nearest_marker,
            exception,
        } => {
            exchange_action_delay(stream, ctx, delay)?;
            exchange_bits_u8(stream, |bits| bits.field(seek_type))?;
            stream.exchange_f32(&mut seek_value.value)?;
            stream.exchange_f32(&mut seek_value.minimum)?;
            stream.exchange_f32(&mut seek_value.maximum)?;
            exchange_bits_u8(stream, |bits| {
                bits.flag(seek_to_nearest_marker);
                Ok(())
            })?;
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::SetVoicePitch {
            delay,
            fade_time,
            fade_curve,
            apply_mode,
            value,
            exception,
            ..
        }
        | P::SetVoiceVolume {
            delay,
            fade_time,
            fade_curve,
            apply_mode,
            value,
            exception,
            ..
        }
        | P::SetBusVolume {
            delay,
            fade_time,
            fade_curve,
            apply_mode,
            value,
            exception,
            ..
        }
        | P::SetVoiceLowPassFilter {
            delay,
            fade_time,
            fade_curve,
            apply_mode,
            value,
            exception,
            ..
        }
        | P::SetVoiceHighPassFilter {
            delay,
            fade_time,
            fade_curve,
            apply_mode,
            value,
            exception,
            ..
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            exchange_action_value_tail(stream, ctx, apply_mode, value, exception)
        }
        P::SetMute {
            delay,
            fade_time,
            fade_curve,
            exception,
            ..
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::SetGameParameter {
            delay,
            fade_time,
            fade_curve,
            bypass_game_parameter_interpolation,
            apply_mode,
            value,
            exception,
            ..
        } => {
            exchange_action_delay_and_fade(stream, ctx, delay, fade_time)?;
            exchange_bits_u8(stream, |bits| bits.field(fade_curve))?;
            if ctx.version.at_least(112) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(bypass_game_parameter_interpolation);
                    Ok(())
                })?;
            }
            exchange_action_value_tail(stream, ctx, apply_mode, value, exception)
        }
        P::SetStateAvailability { delay, .. } => exchange_action_delay(stream, ctx, delay),
        P::ActivateState { delay, group, item } | P::ActivateSwitch { delay, group, item } => {
            exchange_action_delay(stream, ctx, delay)?;
            exchange_id(stream, group)?;
            exchange_id(stream, item)
        }
        P::SetBypassEffect {
            reset,
            delay,
            enable,
            value,
            exception,
        } => {
            exchange_action_delay(stream, ctx, delay)?;
            exchange_bits_u8(stream, |bits| {
                bits.flag(enable);
                Ok(())
            })?;
            let reset = *reset;
            exchange_bits_u8(stream, |bits| {
                for slot in value.iter_mut() {
                    bits.flag(slot);
                }
                bits.constant(reset)?;
                bits.constant(reset)?;
                bits.constant(reset)
            })?;
            exchange_action_exceptions(stream, ctx, exception)
        }
        P::ResetPlaylist { delay } => {
            exchange_action_delay(stream, ctx, delay)?;
            exchange_constant_u8(stream, 4)?;
            if ctx.version.within(113, 115) {
                exchange_constant_u32(stream, 0)?;
            }
            if ctx.version.at_least(115) {
                exchange_constant_u8(stream, 0)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soundbank::property::PropertyEmission;
    use crate::stream::{Id, Reader, Writer};

    fn ctx(version: u32) -> Ctx {
        Ctx {
            version: FormatVersion::new(version).unwrap(),
            emission: PropertyEmission::NonDefault,
        }
    }

    fn roundtrip(version: u32, objects: &[HierarchyObject]) -> Vec<HierarchyObject> {
        let mut writer = Writer::new();
        let mut original = objects.to_vec();
        exchange_hierarchy(&mut writer, ctx(version), &mut original).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = Reader::new(&bytes);
        let mut decoded = Vec::new();
        exchange_hierarchy(&mut reader, ctx(version), &mut decoded).unwrap();
        assert!(reader.is_exhausted());

        // A second encode must reproduce the first byte-for-byte.
        let mut writer = Writer::new();
        let mut again = decoded.clone();
        exchange_hierarchy(&mut writer, ctx(version), &mut again).unwrap();
        assert_eq!(writer.into_bytes(), bytes);
        decoded
    }

    #[test]
    fn tag_table_shifts_at_125() {
        let before = FormatVersion::new(120).unwrap();
        let after = FormatVersion::new(140).unwrap();
        assert_eq!(kind_of_tag(before, 18), Some(ObjectKind::Effect));
        assert_eq!(kind_of_tag(after, 18), Some(ObjectKind::AuxiliaryAudioBus));
        assert_eq!(kind_of_tag(before, 16), None);
        assert_eq!(tag_of_kind(after, ObjectKind::TimeModulator), Some(22));
        assert_eq!(tag_of_kind(before, ObjectKind::TimeModulator), None);
    }

    #[test]
    fn event_roundtrips() {
        let objects = vec![HierarchyObject::Event(Event {
            id: Id(0x1234),
            child: vec![Id(1), Id(2), Id(3)],
        })];
        let decoded = roundtrip(112, &objects);
        assert_eq!(decoded, objects);
        let decoded = roundtrip(140, &objects);
        assert_eq!(decoded, objects);
    }

    #[test]
    fn unknown_kind_is_preserved_raw() {
        let objects = vec![HierarchyObject::Unknown {
            kind: 0x63,
            data: vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00],
        }];
        let decoded = roundtrip(140, &objects);
        assert_eq!(decoded, objects);
    }

    #[test]
    fn feedback_slot_decodes_as_unknown_before_shift() {
        // Kind 16 is a feedback kind before 125 and must fall back to raw.
        let mut writer = Writer::new();
        let mut objects = vec![HierarchyObject::Unknown {
            kind: 16,
            data: vec![1, 2, 3, 4],
        }];
        exchange_hierarchy(&mut writer, ctx(120), &mut objects).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = Reader::new(&bytes);
        let mut decoded = Vec::new();
        exchange_hierarchy(&mut reader, ctx(120), &mut decoded).unwrap();
        assert!(matches!(
            decoded.as_slice(),
            [HierarchyObject::Unknown { kind: 16, .. }]
        ));
    }

    #[test]
    fn event_action_play_roundtrips() {
        let objects = vec![HierarchyObject::EventAction(EventAction {
            id: Id(77),
            scope: ActionScope::All,
            mode: ActionMode::Instant,
            target: Id(0x1234),
            u1: 0,
            property: EventActionProperty::PlayAudio {
                delay: RandomizableValue {
                    value: 0.5,
                    minimum: 0.0,
                    maximum: 0.0,
                },
                fade_time: Default::default(),
                probability: 100.0,
                fade_curve: CurveShape::Linear,
                sound_bank: Id(9),
            },
        })];
        let decoded = roundtrip(112, &objects);
        assert_eq!(decoded, objects);
        let decoded = roundtrip(150, &objects);
        assert_eq!(decoded, objects);
    }

    #[test]
    fn event_action_reset_twin_folds_into_tag() {
        let action = |reset| {
            HierarchyObject::EventAction(EventAction {
                id: Id(5),
                scope: ActionScope::One,
                mode: ActionMode::Instant,
                target: Id(6),
                u1: 0,
                property: EventActionProperty::SetVoiceVolume {
                    reset,
                    delay: Default::default(),
                    fade_time: Default::default(),
                    fade_curve: CurveShape::Linear,
                    apply_mode: ValueApplyMode::Absolute,
                    value: RandomizableValue {
                        value: -6.0,
                        minimum: 0.0,
                        maximum: 0.0,
                    },
                    exception: vec![ActionException {
                        id: Id(1),
                        u1: false,
                    }],
                },
            })
        };
        for reset in [false, true] {
            let decoded = roundtrip(128, &[action(reset)]);
            match &decoded[0] {
                HierarchyObject::EventAction(EventAction {
                    property: EventActionProperty::SetVoiceVolume { reset: r, .. },
                    ..
                }) => assert_eq!(*r, reset),
                other => panic!("wrong variant: {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_action_sub_type_is_fatal() {
        // id + scope/mode + type 99 + target + u1, inside a sized entry.
        let mut payload = Vec::new();
        payload.extend_from_slice(&5u32.to_le_bytes());
        payload.push(0x01);
        payload.push(99);
        payload.extend_from_slice(&6u32.to_le_bytes());
        payload.push(0);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.push(3); // EventAction
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&payload);

        let mut reader = Reader::new(&bytes);
        let mut decoded = Vec::new();
        let err = exchange_hierarchy(&mut reader, ctx(128), &mut decoded);
        assert!(matches!(
            err,
            Err(Error::UnknownVariant {
                context: "event action sub-type",
                tag: 99,
                ..
            })
        ));
    }

    #[test]
    fn sound_roundtrips_across_eras() {
        let sound = HierarchyObject::Sound(Sound {
            id: Id(0xABCD),
            node: AudioNode {
                parent: Id(0x10),
                output_bus: AudioOutputBusSetting {
                    bus: Id(0x20),
                    volume: -3.0,
                    ..Default::default()
                },
                ..Default::default()
            },
            source: AudioSourceSetting {
                plug_in: Id(0x0001_0001),
                kind: AudioSourceType::Embedded,
                resource: Id(0x99),
                resource_size: 128,
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
        });
        for version in [88, 112, 128, 140, 150] {
            let decoded = roundtrip(version, std::slice::from_ref(&sound));
            assert_eq!(decoded, vec![sound.clone()], "version {version}");
        }
    }

    #[test]
    fn actor_mixer_roundtrips() {
        let objects = vec![HierarchyObject::ActorMixer(ActorMixer {
            id: Id(42),
            node: AudioNode {
                parent: Id(8),
                ..Default::default()
            },
            child: vec![Id(100), Id(200)],
        })];
        let decoded = roundtrip(140, &objects);
        assert_eq!(decoded, objects);
    }
}
