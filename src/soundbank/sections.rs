//! Sub-section schemas shared across object kinds.
//!
//! Each function exchanges one reverse-engineered record layout; the
//! version gates are the closed-open ranges observed across bank revisions.
//! Everything here is bidirectional — see the `stream` module docs.

use crate::bits::{exchange_bits_u16, exchange_bits_u32, exchange_bits_u8, exchange_bits_u8_ignore_reserved};
use crate::error::{Error, Result};
use crate::stream::{
    exchange_constant_u32, exchange_constant_u8, exchange_count, exchange_id, exchange_list,
    exchange_list_late, exchange_list_with, CountWidth, Stream,
};

use super::model::*;
use super::property::{exchange_properties, AudioProperty, PropertyBinder};
use super::Ctx;

// ── Graph points ─────────────────────────────────────────────────────────────

pub(super) fn exchange_graph_point<S: Stream>(stream: &mut S, point: &mut GraphPoint) -> Result<()> {
    stream.exchange_f32(&mut point.position.x)?;
    stream.exchange_f32(&mut point.position.y)?;
    exchange_bits_u32(stream, |bits| bits.field(&mut point.curve))
}

pub(super) fn exchange_graph_point_list<S: Stream>(
    stream: &mut S,
    width: CountWidth,
    points: &mut Vec<GraphPoint>,
) -> Result<()> {
    exchange_list(stream, points, width, |s, p| exchange_graph_point(s, p))
}

// ── Real-time parameter control ──────────────────────────────────────────────

pub(super) fn exchange_rtpc_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut RealTimeParameterControlSetting,
) -> Result<()> {
    if ctx.version.at_least(72) {
        exchange_list(stream, &mut value.item, CountWidth::U16, |s, rtpc| {
            exchange_id(s, &mut rtpc.parameter_id)?;
            if ctx.version.at_least(112) {
                exchange_bits_u8(s, |bits| bits.field(&mut rtpc.parameter_category))?;
                exchange_bits_u8(s, |bits| {
                    bits.flag(&mut rtpc.u1);
                    Ok(())
                })?;
            }
            if ctx.version.within(72, 112) {
                s.exchange_u32(&mut rtpc.kind)?;
            }
            if ctx.version.at_least(112) {
                let mut narrow = rtpc.kind as u8;
                s.exchange_u8(&mut narrow)?;
                rtpc.kind = narrow as u32;
            }
            exchange_id(s, &mut rtpc.u2)?;
            exchange_bits_u8(s, |bits| bits.field(&mut rtpc.mode))?;
            exchange_graph_point_list(s, CountWidth::U16, &mut rtpc.point)
        })?;
    }
    Ok(())
}

// ── State map ────────────────────────────────────────────────────────────────

pub(super) fn exchange_state_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut StateSetting,
) -> Result<()> {
    if ctx.version.within(72, 125) {
        exchange_list(stream, &mut value.item, CountWidth::U32, |s, item| {
            exchange_id(s, &mut item.group)?;
            exchange_bits_u8(s, |bits| bits.field(&mut item.change_occur_at))?;
            exchange_list(s, &mut item.apply, CountWidth::U16, |s, apply| {
                exchange_id(s, &mut apply.target)?;
                exchange_id(s, &mut apply.setting)
            })
        })?;
    }
    if ctx.version.at_least(125) {
        exchange_list(stream, &mut value.attribute, CountWidth::U8, |s, attribute| {
            s.exchange_u8(&mut attribute.kind)?;
            exchange_bits_u8(s, |bits| bits.field(&mut attribute.category))?;
            if ctx.version.at_least(128) {
                s.exchange_u8(&mut attribute.u1)?;
            }
            Ok(())
        })?;
        exchange_list(stream, &mut value.item, CountWidth::U8, |s, item| {
            exchange_id(s, &mut item.group)?;
            exchange_bits_u8(s, |bits| bits.field(&mut item.change_occur_at))?;
            exchange_list(s, &mut item.apply, CountWidth::U8, |s, apply| {
                exchange_id(s, &mut apply.target)?;
                exchange_id(s, &mut apply.setting)
            })
        })?;
    }
    Ok(())
}

// ── Effect / metadata / plug-in defaults ─────────────────────────────────────

pub(super) fn exchange_effect_u1_list<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Vec<EffectU1>,
) -> Result<()> {
    if ctx.version.at_least(112) {
        exchange_list(stream, value, CountWidth::U16, |s, item| {
            s.exchange_u8(&mut item.kind)?;
            if ctx.version.at_least(128) {
                exchange_bits_u8(s, |bits| {
                    bits.flag(&mut item.mode);
                    Ok(())
                })?;
            }
            s.exchange_f32(&mut item.value)
        })?;
    }
    Ok(())
}

pub(super) fn exchange_effect_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioEffectSetting,
) -> Result<()> {
    if ctx.version.at_least(72) {
        let bypass = &mut value.bypass;
        exchange_list_with(
            stream,
            &mut value.item,
            |s, count| {
                exchange_count(s, CountWidth::U8, count)?;
                if *count > 0 {
                    if ctx.version.within(72, 150) {
                        exchange_bits_u8(s, |bits| {
                            for flag in bypass.iter_mut() {
                                bits.flag(flag);
                            }
                            Ok(())
                        })?;
                    }
                    if ctx.version.at_least(150) {
                        exchange_bits_u8(s, |bits| {
                            bits.flag(&mut bypass[0]);
                            Ok(())
                        })?;
                    }
                }
                Ok(())
            },
            |s, item| {
                s.exchange_u8(&mut item.index)?;
                exchange_id(s, &mut item.id)?;
                if ctx.version.within(72, 150) {
                    exchange_bits_u8(s, |bits| {
                        bits.flag(&mut item.use_share_set);
                        Ok(())
                    })?;
                    exchange_bits_u8(s, |bits| {
                        bits.flag(&mut item.u1);
                        Ok(())
                    })?;
                }
                if ctx.version.at_least(150) {
                    exchange_bits_u8(s, |bits| {
                        bits.flag(&mut item.bypass);
                        bits.flag(&mut item.use_share_set);
                        Ok(())
                    })?;
                }
                Ok(())
            },
        )?;
    }
    Ok(())
}

pub(super) fn exchange_effect_setting_with_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioEffectSetting,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.at_least(72) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
    }
    exchange_effect_setting(stream, ctx, value)
}

pub(super) fn exchange_metadata_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioMetadataSetting,
) -> Result<()> {
    if ctx.version.at_least(140) {
        exchange_list(stream, &mut value.item, CountWidth::U8, |s, item| {
            s.exchange_u8(&mut item.index)?;
            exchange_id(s, &mut item.id)?;
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.use_share_set);
                Ok(())
            })
        })?;
    }
    Ok(())
}

pub(super) fn exchange_metadata_setting_with_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioMetadataSetting,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.at_least(140) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
    }
    exchange_metadata_setting(stream, ctx, value)
}

pub(super) fn exchange_mixer_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.within(112, 150) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
    }
    Ok(())
}

// ── Audio source ─────────────────────────────────────────────────────────────

pub(super) fn exchange_source_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioSourceSetting,
) -> Result<()> {
    exchange_id(stream, &mut value.plug_in)?;
    if ctx.version.within(72, 112) {
        exchange_bits_u32(stream, |bits| bits.field(&mut value.kind))?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| bits.field(&mut value.kind))?;
    }
    exchange_id(stream, &mut value.resource)?;
    if ctx.version.within(72, 113) {
        exchange_id(stream, &mut value.source)?;
    }
    if ctx.version.within(72, 113) && value.kind != AudioSourceType::Streamed {
        stream.exchange_u32(&mut value.resource_offset)?;
    }
    if ctx.version.within(72, 112) && value.kind != AudioSourceType::Streamed {
        stream.exchange_u32(&mut value.resource_size)?;
    }
    if ctx.version.at_least(112) {
        stream.exchange_u32(&mut value.resource_size)?;
    }
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.is_voice);
            Ok(())
        })?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.is_voice);
            bits.constant(false)?;
            bits.constant(false)?;
            bits.flag(&mut value.non_cachable_stream);
            Ok(())
        })?;
    }
    // Plug-in categories past the codec range carry an extra reserved word.
    if value.plug_in.0 & 0x0000_FFFF >= 0x0002 {
        exchange_constant_u32(stream, 0)?;
    }
    Ok(())
}

pub(super) fn exchange_source_list<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Vec<AudioSourceSetting>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U32, |s, item| {
        exchange_source_setting(s, ctx, item)
    })
}

// ── Bus-only sections ────────────────────────────────────────────────────────

pub(super) fn exchange_automatic_ducking<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut BusAutomaticDuckingSetting,
) -> Result<()> {
    stream.exchange_u32(&mut value.recovery_time)?;
    stream.exchange_f32(&mut value.maximum_ducking_volume)?;
    exchange_list(stream, &mut value.bus, CountWidth::U32, |s, bus| {
        exchange_id(s, &mut bus.id)?;
        s.exchange_f32(&mut bus.volume)?;
        s.exchange_u32(&mut bus.fade_out)?;
        s.exchange_u32(&mut bus.fade_in)?;
        exchange_bits_u8(s, |bits| bits.field(&mut bus.curve))?;
        exchange_bits_u8(s, |bits| bits.field(&mut bus.target))
    })
}

pub(super) fn exchange_bus_configuration<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioBusConfiguration,
) -> Result<()> {
    if ctx.version.at_least(88) {
        stream.exchange_u32(&mut value.u1)?;
    }
    Ok(())
}

pub(super) fn exchange_bus_hdr<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut BusHDRSetting,
) -> Result<()> {
    if ctx.version.within(88, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.enable);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| bits.field(&mut value.dynamic.release_mode))?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.enable);
            bits.field(&mut value.dynamic.release_mode)
        })?;
    }
    Ok(())
}

// ── Override bundles ─────────────────────────────────────────────────────────

pub(super) fn exchange_voice_volume_gain_and_hdr<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
) -> Result<()> {
    if ctx.version.within(88, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_hdr_envelope_tracking);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_voice_volume_loudness_normalization);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.voice_volume_gain.normalization);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.hdr.envelope_tracking_enable);
            Ok(())
        })?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_hdr_envelope_tracking);
            bits.flag(&mut node.override_voice_volume_loudness_normalization);
            bits.flag(&mut node.voice_volume_gain.normalization);
            bits.flag(&mut node.hdr.envelope_tracking_enable);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_output_bus<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut AudioOutputBusSetting,
) -> Result<()> {
    exchange_id(stream, &mut value.bus)
}

pub(super) fn exchange_auxiliary_send<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioAuxiliarySendSetting,
    override_game_defined: &mut bool,
    override_user_defined: &mut bool,
) -> Result<()> {
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(override_game_defined);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.game_defined.enable);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(override_user_defined);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.user_defined.enable);
            Ok(())
        })?;
    }
    if ctx.version.within(112, 135) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(override_game_defined);
            bits.flag(&mut value.game_defined.enable);
            bits.flag(override_user_defined);
            bits.flag(&mut value.user_defined.enable);
            Ok(())
        })?;
    }
    if ctx.version.within(72, 135) && value.user_defined.enable {
        for item in value.user_defined.item.iter_mut() {
            exchange_id(stream, &mut item.bus)?;
        }
    }
    Ok(())
}

pub(super) fn exchange_auxiliary_send_with_early_reflection<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioAuxiliarySendSetting,
    override_game_defined: &mut bool,
    override_user_defined: &mut bool,
    override_early_reflection: &mut bool,
) -> Result<()> {
    if ctx.version.at_least(135) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(override_game_defined);
            bits.flag(&mut value.game_defined.enable);
            bits.flag(override_user_defined);
            bits.flag(&mut value.user_defined.enable);
            bits.flag(override_early_reflection);
            Ok(())
        })?;
        if value.user_defined.enable {
            for item in value.user_defined.item.iter_mut() {
                exchange_id(stream, &mut item.bus)?;
            }
        }
        exchange_id(stream, &mut value.early_reflection.bus)?;
    }
    Ok(())
}

pub(super) fn exchange_priority_with_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioPlaybackPrioritySetting,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.use_distance_factor);
            Ok(())
        })?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            bits.flag(&mut value.use_distance_factor);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_midi_and_priority<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
) -> Result<()> {
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_playback_priority);
            bits.flag(&mut node.playback_priority.use_distance_factor);
            bits.flag(&mut node.override_midi_event);
            bits.flag(&mut node.override_midi_note_tracking);
            bits.flag(&mut node.midi.note_tracking_enable);
            bits.flag(&mut node.midi.event_break_on_note_off);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_music_midi_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicMidiOverride,
) -> Result<()> {
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.constant(false)?;
            bits.flag(&mut value.override_clip_tempo);
            bits.flag(&mut value.override_target);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_playback_limit_with_override<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioPlaybackLimitSetting,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| bits.field(&mut value.when_priority_is_equal))?;
        exchange_bits_u8(stream, |bits| bits.field(&mut value.when_limit_is_reached))?;
        stream.exchange_u16(&mut value.value)?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_playback_limit_with_mute<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioPlaybackLimitSetting,
    mute: &mut AudioBusMuteForBackgroundMusic,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.field(&mut value.when_priority_is_equal)?;
            bits.field(&mut value.when_limit_is_reached)?;
            bits.flag(overridden);
            bits.flag(&mut mute.enable);
            Ok(())
        })?;
        stream.exchange_u16(&mut value.value)?;
    }
    Ok(())
}

pub(super) fn exchange_playback_limit_and_virtual_voice<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
) -> Result<()> {
    let limit = &mut node.playback_limit;
    let virtual_voice = &mut node.virtual_voice;
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| bits.field(&mut virtual_voice.on_return_to_physical))?;
        exchange_bits_u8(stream, |bits| bits.field(&mut limit.when_priority_is_equal))?;
        exchange_bits_u8(stream, |bits| bits.field(&mut limit.when_limit_is_reached))?;
        stream.exchange_u16(&mut limit.value)?;
        exchange_bits_u8(stream, |bits| bits.field(&mut limit.scope))?;
        exchange_bits_u8(stream, |bits| bits.field(&mut virtual_voice.behavior))?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_playback_limit);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut node.override_virtual_voice);
            Ok(())
        })?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.field(&mut limit.when_priority_is_equal)?;
            bits.field(&mut limit.when_limit_is_reached)?;
            bits.field(&mut limit.scope)?;
            bits.flag(&mut node.override_playback_limit);
            bits.flag(&mut node.override_virtual_voice);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| bits.field(&mut virtual_voice.on_return_to_physical))?;
        stream.exchange_u16(&mut limit.value)?;
        exchange_bits_u8(stream, |bits| bits.field(&mut virtual_voice.behavior))?;
    }
    Ok(())
}

// ── Positioning ──────────────────────────────────────────────────────────────

/// The 3D automation block shared by every layout revision from 112 on.
fn exchange_positioning_automation<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    automation: &mut PositioningAutomation,
) -> Result<()> {
    exchange_bits_u8(stream, |bits| {
        bits.field(&mut automation.play_type)?;
        bits.field(&mut automation.play_mode)?;
        bits.flag(&mut automation.pick_new_path_when_sound_start);
        Ok(())
    })?;
    stream.exchange_u32(&mut automation.transition_time)?;
    exchange_list(stream, &mut automation.point, CountWidth::U32, |s, point| {
        s.exchange_f32(&mut point.position.x)?;
        s.exchange_f32(&mut point.position.z)?;
        s.exchange_f32(&mut point.position.y)?;
        s.exchange_u32(&mut point.duration)
    })?;
    exchange_list_late(
        stream,
        &mut automation.path,
        CountWidth::U32,
        |s, path| {
            s.exchange_u32(&mut path.point_begin)?;
            s.exchange_u32(&mut path.point_count)
        },
        |s, path| {
            s.exchange_f32(&mut path.random_range_left_right)?;
            s.exchange_f32(&mut path.random_range_front_back)?;
            s.exchange_f32(&mut path.random_range_up_down)
        },
    )
}

pub(super) fn exchange_positioning<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioPositioningSetting,
    overridden: &mut bool,
) -> Result<()> {
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
        if *overridden {
            let routing = |v: &AudioPositioningSetting| {
                v.listener_routing.position_source.mode == PositionSourceMode::GameDefined
            };
            let mut b1 = match value.kind {
                PositioningType::TwoDimension => value.speaker_panning.enable,
                PositioningType::ThreeDimension => routing(value),
            };
            let mut b2 = value.kind == PositioningType::ThreeDimension;
            let b3 = value.kind == PositioningType::TwoDimension;
            if ctx.version.within(88, 112) {
                let mut two_dimension = b3;
                exchange_bits_u8(stream, |bits| {
                    bits.flag(&mut two_dimension);
                    Ok(())
                })?;
                b2 = !two_dimension;
            }
            exchange_bits_u8(stream, |bits| bits.field(&mut value.kind))?;
            if ctx.version.within(72, 88) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(&mut b1);
                    bits.flag(&mut b2);
                    Ok(())
                })?;
            }
            if ctx.version.within(88, 112) {
                exchange_bits_u8(stream, |bits| {
                    bits.flag(&mut b1);
                    Ok(())
                })?;
            }
            let offset = stream.position();
            let three_dimension = value.kind == PositioningType::ThreeDimension;
            if b2 != three_dimension {
                return Err(Error::UnexpectedConstant {
                    offset,
                    expected: three_dimension as u64,
                    found: b2 as u64,
                });
            }
            match value.kind {
                PositioningType::TwoDimension => {
                    if stream.reading() {
                        value.speaker_panning.enable = b1;
                    }
                }
                PositioningType::ThreeDimension => {
                    if stream.reading() {
                        value.listener_routing.position_source.mode = if b1 {
                            PositionSourceMode::GameDefined
                        } else {
                            PositionSourceMode::UserDefined
                        };
                    }
                    exchange_constant_u8(stream, 0)?;
                    exchange_constant_u8(stream, 0)?;
                    exchange_constant_u8(stream, 0)?;
                    exchange_id(stream, &mut value.listener_routing.attenuation_id)?;
                    exchange_bits_u8(stream, |bits| {
                        bits.field(&mut value.listener_routing.spatialization)
                    })?;
                    let source = &mut value.listener_routing.position_source;
                    match source.mode {
                        PositionSourceMode::GameDefined => {
                            exchange_bits_u8(stream, |bits| {
                                bits.flag(&mut source.update_at_each_frame);
                                Ok(())
                            })?;
                        }
                        PositionSourceMode::UserDefined => {
                            exchange_bits_u8(stream, |bits| {
                                bits.field(&mut source.automation.play_type)?;
                                bits.field(&mut source.automation.play_mode)?;
                                bits.flag(&mut source.automation.pick_new_path_when_sound_start);
                                Ok(())
                            })?;
                            exchange_constant_u8(stream, 0)?;
                            exchange_constant_u8(stream, 0)?;
                            exchange_constant_u8(stream, 0)?;
                            exchange_bits_u8(stream, |bits| {
                                bits.flag(&mut source.automation.looping);
                                Ok(())
                            })?;
                            stream.exchange_u32(&mut source.automation.transition_time)?;
                            exchange_bits_u8(stream, |bits| {
                                bits.flag(&mut source.hold_listener_orientation);
                                Ok(())
                            })?;
                            exchange_list(
                                stream,
                                &mut source.automation.point,
                                CountWidth::U32,
                                |s, point| {
                                    s.exchange_f32(&mut point.position.x)?;
                                    exchange_constant_u32(s, 0)?;
                                    s.exchange_f32(&mut point.position.y)?;
                                    s.exchange_u32(&mut point.duration)
                                },
                            )?;
                            exchange_list_late(
                                stream,
                                &mut source.automation.path,
                                CountWidth::U32,
                                |s, path| {
                                    s.exchange_u32(&mut path.point_begin)?;
                                    s.exchange_u32(&mut path.point_count)
                                },
                                |s, path| {
                                    s.exchange_f32(&mut path.random_range_left_right)?;
                                    s.exchange_f32(&mut path.random_range_front_back)
                                },
                            )?;
                        }
                        PositionSourceMode::Emitter => {}
                    }
                }
            }
        }
    }
    if ctx.version.within(112, 132) {
        let mut b2 = false;
        if ctx.version.within(112, 125) {
            exchange_bits_u8(stream, |bits| {
                bits.flag(overridden);
                bits.flag(&mut b2);
                bits.flag(&mut value.speaker_panning.enable);
                bits.field(&mut value.kind)?;
                bits.field(&mut value.listener_routing.spatialization)?;
                bits.flag(&mut value.listener_routing.position_source.automation.looping);
                bits.flag(&mut value.listener_routing.position_source.update_at_each_frame);
                bits.flag(&mut value.listener_routing.position_source.hold_listener_orientation);
                Ok(())
            })?;
        }
        if ctx.version.within(125, 132) {
            exchange_bits_u8(stream, |bits| {
                bits.flag(overridden);
                bits.flag(&mut value.enable);
                bits.flag(&mut b2);
                bits.flag(&mut value.speaker_panning.enable);
                bits.field(&mut value.kind)?;
                Ok(())
            })?;
        }
        if value.kind == PositioningType::ThreeDimension {
            if ctx.version.within(112, 125) {
                exchange_bits_u8(stream, |bits| {
                    bits.field(&mut value.listener_routing.position_source.mode)
                })?;
            }
            if ctx.version.within(125, 132) {
                exchange_bits_u8(stream, |bits| {
                    bits.field(&mut value.listener_routing.spatialization)?;
                    bits.flag(&mut value.listener_routing.position_source.automation.looping);
                    bits.flag(&mut value.listener_routing.position_source.update_at_each_frame);
                    bits.flag(&mut value.listener_routing.position_source.hold_listener_orientation);
                    bits.field(&mut value.listener_routing.position_source.mode)
                })?;
            }
            exchange_id(stream, &mut value.listener_routing.attenuation_id)?;
            if value.listener_routing.position_source.mode == PositionSourceMode::UserDefined {
                exchange_positioning_automation(
                    stream,
                    ctx,
                    &mut value.listener_routing.position_source.automation,
                )?;
            }
        }
    }
    if ctx.version.at_least(132) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            bits.flag(&mut value.listener_routing.enable);
            bits.field(&mut value.speaker_panning.mode)?;
            bits.constant(false)?;
            bits.field(&mut value.listener_routing.position_source.mode)?;
            bits.constant(false)?;
            Ok(())
        })?;
        if value.listener_routing.enable {
            let routing = &mut value.listener_routing;
            if ctx.version.within(132, 134) {
                exchange_bits_u8(stream, |bits| {
                    bits.field(&mut routing.spatialization)?;
                    bits.flag(&mut routing.position_source.hold_emitter_position_and_orientation);
                    bits.flag(&mut routing.position_source.hold_listener_orientation);
                    bits.flag(&mut routing.position_source.automation.looping);
                    Ok(())
                })?;
            }
            if ctx.version.within(134, 140) {
                exchange_bits_u8(stream, |bits| {
                    bits.field(&mut routing.spatialization)?;
                    bits.flag(&mut routing.attenuation_enable);
                    bits.flag(&mut routing.position_source.hold_emitter_position_and_orientation);
                    bits.flag(&mut routing.position_source.hold_listener_orientation);
                    bits.flag(&mut routing.position_source.automation.looping);
                    Ok(())
                })?;
            }
            if ctx.version.at_least(140) {
                exchange_bits_u8(stream, |bits| {
                    bits.field(&mut routing.spatialization)?;
                    bits.flag(&mut routing.attenuation_enable);
                    bits.flag(&mut routing.position_source.hold_emitter_position_and_orientation);
                    bits.flag(&mut routing.position_source.hold_listener_orientation);
                    bits.flag(&mut routing.position_source.automation.looping);
                    bits.flag(&mut routing.position_source.diffraction_and_transmission);
                    Ok(())
                })?;
            }
            if routing.position_source.mode != PositionSourceMode::Emitter {
                exchange_positioning_automation(
                    stream,
                    ctx,
                    &mut routing.position_source.automation,
                )?;
            }
        }
    }
    Ok(())
}

// ── Time / music sections ────────────────────────────────────────────────────

pub(super) fn exchange_time_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioTimeSetting,
    overridden: &mut bool,
) -> Result<()> {
    stream.exchange_f64(&mut value.time)?;
    stream.exchange_f64(&mut value.offset)?;
    stream.exchange_f32(&mut value.tempo)?;
    stream.exchange_u8(&mut value.signature_first)?;
    stream.exchange_u8(&mut value.signature_second)?;
    if ctx.version.within(72, 140) {
        // Bits 1..8 mirror bit 0 per sub-field; only one flag is kept.
        let offset = stream.position();
        let mut mirror = [*overridden; 7];
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            for bit in mirror.iter_mut() {
                bits.flag(bit);
            }
            Ok(())
        })?;
        if stream.reading() && mirror.iter().any(|&bit| bit != *overridden) {
            return Err(Error::UnexpectedConstant {
                offset,
                expected: *overridden as u64,
                found: !*overridden as u64,
            });
        }
    }
    if ctx.version.at_least(140) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(overridden);
            Ok(())
        })?;
    }
    Ok(())
}

pub(super) fn exchange_music_track_clip<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicTrackClip,
) -> Result<()> {
    exchange_list(stream, &mut value.item, CountWidth::U32, |s, item| {
        s.exchange_u32(&mut item.u1)?;
        exchange_id(s, &mut item.source)?;
        if ctx.version.at_least(140) {
            exchange_id(s, &mut item.event)?;
        }
        s.exchange_f64(&mut item.offset)?;
        s.exchange_f64(&mut item.begin)?;
        s.exchange_f64(&mut item.end)?;
        s.exchange_f64(&mut item.duration)
    })?;
    if !value.item.is_empty() {
        stream.exchange_u32(&mut value.u1)?;
    }
    exchange_list(stream, &mut value.curve, CountWidth::U32, |s, curve| {
        s.exchange_u32(&mut curve.index)?;
        exchange_bits_u32(s, |bits| bits.field(&mut curve.kind))?;
        exchange_graph_point_list(s, CountWidth::U32, &mut curve.point)
    })
}

pub(super) fn exchange_stinger_setting<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut MusicStingerSetting,
) -> Result<()> {
    exchange_list(stream, &mut value.item, CountWidth::U32, |s, item| {
        exchange_id(s, &mut item.trigger)?;
        exchange_id(s, &mut item.segment_to_play)?;
        exchange_bits_u32(s, |bits| bits.field(&mut item.play_at))?;
        exchange_id(s, &mut item.cue_name)?;
        s.exchange_u32(&mut item.do_not_play_this_stinger_again_for)?;
        exchange_bits_u32(s, |bits| {
            bits.flag(&mut item.allow_playing_stinger_in_next_segment);
            Ok(())
        })
    })
}

fn exchange_transition_fade<S: Stream>(
    stream: &mut S,
    value: &mut MusicTransitionFade,
) -> Result<()> {
    stream.exchange_u32(&mut value.time)?;
    stream.exchange_u32(&mut value.curve)?;
    stream.exchange_i32(&mut value.offset)
}

pub(super) fn exchange_music_transition_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicTransitionSetting,
) -> Result<()> {
    exchange_list(stream, &mut value.item, CountWidth::U32, |s, item| {
        if ctx.version.at_least(88) {
            exchange_constant_u32(s, 1)?;
        }
        exchange_id(s, &mut item.source.id)?;
        if ctx.version.at_least(88) {
            exchange_constant_u32(s, 1)?;
        }
        exchange_id(s, &mut item.destination.id)?;
        exchange_transition_fade(s, &mut item.source.fade_out)?;
        exchange_bits_u32(s, |bits| bits.field(&mut item.source.exit_source_at))?;
        exchange_id(s, &mut item.source.exit_source_at_custom_cue_match)?;
        if ctx.version.within(72, 140) {
            exchange_bits_u8_ignore_reserved(s, |bits| {
                bits.flag(&mut item.source.play_post_exit);
                Ok(())
            })?;
        }
        if ctx.version.at_least(140) {
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.source.play_post_exit);
                Ok(())
            })?;
        }
        exchange_transition_fade(s, &mut item.destination.fade_in)?;
        exchange_id(s, &mut item.destination.custom_cue_filter_match_target)?;
        exchange_id(s, &mut item.u1)?;
        if ctx.version.at_least(134) {
            exchange_bits_u16(s, |bits| bits.field(&mut item.destination.jump_to))?;
        }
        exchange_bits_u16(s, |bits| bits.field(&mut item.destination.synchronize_to))?;
        if ctx.version.within(72, 140) {
            exchange_bits_u8_ignore_reserved(s, |bits| {
                bits.flag(&mut item.destination.play_pre_entry);
                Ok(())
            })?;
        }
        if ctx.version.at_least(140) {
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.destination.play_pre_entry);
                Ok(())
            })?;
        }
        exchange_bits_u8(s, |bits| {
            bits.flag(&mut item.destination.custom_cue_filter_match_source_cue_name);
            Ok(())
        })?;
        exchange_bits_u8(s, |bits| {
            bits.flag(&mut item.segment.enable);
            Ok(())
        })?;
        let has_segment_data = if ctx.version.within(72, 88) {
            true
        } else {
            item.segment.enable
        };
        if has_segment_data {
            exchange_id(s, &mut item.segment.id)?;
            exchange_transition_fade(s, &mut item.segment.fade_in)?;
            exchange_transition_fade(s, &mut item.segment.fade_out)?;
            if ctx.version.within(72, 140) {
                exchange_bits_u8_ignore_reserved(s, |bits| {
                    bits.flag(&mut item.segment.play_pre_entry);
                    Ok(())
                })?;
            }
            if ctx.version.at_least(140) {
                exchange_bits_u8(s, |bits| {
                    bits.flag(&mut item.segment.play_pre_entry);
                    Ok(())
                })?;
            }
            if ctx.version.within(72, 140) {
                exchange_bits_u8_ignore_reserved(s, |bits| {
                    bits.flag(&mut item.segment.play_post_exit);
                    Ok(())
                })?;
            }
            if ctx.version.at_least(140) {
                exchange_bits_u8(s, |bits| {
                    bits.flag(&mut item.segment.play_post_exit);
                    Ok(())
                })?;
            }
        }
        Ok(())
    })
}

pub(super) fn exchange_music_track_transition_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicTrackTransitionSetting,
) -> Result<()> {
    if ctx.version.at_least(112) {
        exchange_constant_u32(stream, 1)?;
        exchange_id(stream, &mut value.switcher)?;
        exchange_transition_fade(stream, &mut value.source_fade_out)?;
        exchange_bits_u32(stream, |bits| bits.field(&mut value.source_exit_at))?;
        exchange_id(stream, &mut value.source_exit_at_custom_cue_match)?;
        exchange_transition_fade(stream, &mut value.destination_fade_in)?;
    }
    Ok(())
}

pub(super) fn exchange_switcher_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioSwitcherSetting,
) -> Result<()> {
    if ctx.version.within(72, 112) {
        exchange_bits_u32(stream, |bits| {
            bits.flag(&mut value.is_state);
            Ok(())
        })?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.is_state);
            Ok(())
        })?;
    }
    exchange_id(stream, &mut value.group)?;
    exchange_id(stream, &mut value.default_item)
}

pub(super) fn exchange_association_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut AudioAssociationSetting,
) -> Result<()> {
    exchange_list_late(
        stream,
        &mut value.argument,
        CountWidth::U32,
        |s, argument| exchange_id(s, &mut argument.id),
        |s, argument| {
            if ctx.version.at_least(88) {
                exchange_bits_u8(s, |bits| {
                    bits.flag(&mut argument.is_state);
                    Ok(())
                })?;
            }
            Ok(())
        },
    )?;
    // The path count is serialized as a byte length (12 bytes per record),
    // with the probability/mode pair riding between the count and the items.
    let probability = &mut value.probability;
    let mode = &mut value.mode;
    exchange_list_with(
        stream,
        &mut value.path,
        |s, count| {
            if s.reading() {
                let mut byte_length = 0usize;
                exchange_count(s, CountWidth::U32, &mut byte_length)?;
                if byte_length % 12 != 0 {
                    return Err(Error::TrailingData {
                        context: "association path table",
                        remaining: byte_length % 12,
                    });
                }
                *count = byte_length / 12;
            } else {
                let mut byte_length = *count * 12;
                exchange_count(s, CountWidth::U32, &mut byte_length)?;
            }
            if ctx.version.within(72, 88) {
                s.exchange_u8(probability)?;
            }
            exchange_bits_u8(s, |bits| bits.field(mode))
        },
        |s, path| {
            exchange_id(s, &mut path.u1)?;
            exchange_id(s, &mut path.object)?;
            s.exchange_u16(&mut path.weight)?;
            s.exchange_u16(&mut path.probability)
        },
    )
}

// ── Container playback settings ──────────────────────────────────────────────

pub(super) fn exchange_playlist_playback_setting<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut SoundPlaylistPlaybackSetting,
) -> Result<()> {
    stream.exchange_i16(&mut value.mode_setting.continuous_loop.value)?;
    if ctx.version.at_least(88) {
        stream.exchange_i16(&mut value.mode_setting.continuous_loop.minimum)?;
        stream.exchange_i16(&mut value.mode_setting.continuous_loop.maximum)?;
    }
    stream.exchange_f32(&mut value.mode_setting.continuous_transition_duration.value)?;
    stream.exchange_f32(&mut value.mode_setting.continuous_transition_duration.minimum)?;
    stream.exchange_f32(&mut value.mode_setting.continuous_transition_duration.maximum)?;
    stream.exchange_u16(&mut value.kind_setting.random_avoid_repeat)?;
    exchange_bits_u8(stream, |bits| {
        bits.field(&mut value.mode_setting.continuous_transition_type)
    })?;
    exchange_bits_u8(stream, |bits| bits.field(&mut value.kind_setting.random_kind))?;
    exchange_bits_u8(stream, |bits| bits.field(&mut value.kind))?;
    if ctx.version.within(72, 112) {
        exchange_bits_u8(stream, |bits| bits.constant(false))?;
        exchange_bits_u8(stream, |bits| {
            bits.flag(&mut value.mode_setting.continuous_always_reset_playlist);
            Ok(())
        })?;
        exchange_bits_u8(stream, |bits| {
            bits.field(&mut value.kind_setting.sequence_at_end_of_playlist)
        })?;
        exchange_bits_u8(stream, |bits| bits.field(&mut value.mode))?;
        exchange_bits_u8(stream, |bits| bits.field(&mut value.scope))?;
    }
    if ctx.version.at_least(112) {
        exchange_bits_u8(stream, |bits| {
            bits.constant(false)?;
            bits.flag(&mut value.mode_setting.continuous_always_reset_playlist);
            bits.field(&mut value.kind_setting.sequence_at_end_of_playlist)?;
            bits.field(&mut value.mode)?;
            bits.field(&mut value.scope)
        })?;
    }
    Ok(())
}

pub(super) fn exchange_sound_playlist<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut Vec<SoundPlaylistItem>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U16, |s, item| {
        exchange_id(s, &mut item.item)?;
        s.exchange_u32(&mut item.weight)
    })
}

pub(super) fn exchange_switch_attribute_list<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Vec<SwitchObjectAttributeItem>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U32, |s, item| {
        exchange_id(s, &mut item.id)?;
        if ctx.version.within(72, 112) {
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.play_first_only);
                Ok(())
            })?;
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.continue_to_play_across_switch);
                Ok(())
            })?;
            s.exchange_u32(&mut item.u1)?;
        }
        if ctx.version.at_least(112) {
            exchange_bits_u8(s, |bits| {
                bits.flag(&mut item.play_first_only);
                bits.flag(&mut item.continue_to_play_across_switch);
                Ok(())
            })?;
            let mut narrow = item.u1 as u8;
            s.exchange_u8(&mut narrow)?;
            item.u1 = narrow as u32;
        }
        s.exchange_u32(&mut item.fade_out_time)?;
        s.exchange_u32(&mut item.fade_in_time)
    })
}

pub(super) fn exchange_switch_assign_list<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut Vec<SwitchObjectAssignItem>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U32, |s, item| {
        exchange_id(s, &mut item.item)?;
        exchange_list(s, &mut item.object, CountWidth::U32, |s, id| exchange_id(s, id))
    })
}

pub(super) fn exchange_blend_track_list<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Vec<BlendTrack>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U32, |s, track| {
        exchange_id(s, &mut track.id)?;
        exchange_rtpc_setting(s, ctx, &mut track.real_time_parameter_control)?;
        exchange_id(s, &mut track.cross_fade_id)?;
        if ctx.version.at_least(112) {
            exchange_bits_u8(s, |bits| bits.field(&mut track.cross_fade_category))?;
        }
        exchange_list(s, &mut track.child, CountWidth::U32, |s, child| {
            exchange_id(s, &mut child.id)?;
            exchange_graph_point_list(s, CountWidth::U32, &mut child.point)
        })
    })
}

pub(super) fn exchange_play_mode<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut AudioPlayMode,
) -> Result<()> {
    exchange_bits_u8(stream, |bits| bits.field(value))
}

pub(super) fn exchange_music_track_stream<S: Stream>(
    stream: &mut S,
    _ctx: Ctx,
    value: &mut MusicTrackStream,
) -> Result<()> {
    stream.exchange_u16(&mut value.look_ahead_time)
}

pub(super) fn exchange_music_cue<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut MusicSegmentCue,
) -> Result<()> {
    exchange_list(stream, &mut value.item, CountWidth::U32, |s, item| {
        exchange_id(s, &mut item.name)?;
        s.exchange_f64(&mut item.time)?;
        if ctx.version.within(72, 140) {
            exchange_constant_u32(s, 0)?;
        }
        if ctx.version.at_least(140) {
            exchange_constant_u8(s, 0)?;
        }
        Ok(())
    })
}

pub(super) fn exchange_music_playlist<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    value: &mut Vec<MusicPlaylistItem>,
) -> Result<()> {
    exchange_list(stream, value, CountWidth::U32, |s, item| {
        exchange_id(s, &mut item.item)?;
        exchange_id(s, &mut item.u1)?;
        s.exchange_u32(&mut item.child_count)?;
        crate::bits::exchange_bits_u32_ignore_reserved(s, |bits| {
            bits.field(&mut item.play_mode)?;
            bits.field(&mut item.play_type)
        })?;
        s.exchange_u16(&mut item.loop_count)?;
        if ctx.version.at_least(112) {
            exchange_constant_u32(s, 0)?;
        }
        s.exchange_u32(&mut item.weight)?;
        s.exchange_u16(&mut item.random_avoid_repeat)?;
        exchange_bits_u8(s, |bits| {
            bits.flag(&mut item.group);
            Ok(())
        })?;
        exchange_bits_u8(s, |bits| bits.field(&mut item.random_kind))
    })
}

pub(super) fn exchange_id_list<S: Stream>(
    stream: &mut S,
    width: CountWidth,
    value: &mut Vec<crate::stream::Id>,
) -> Result<()> {
    exchange_list(stream, value, width, |s, id| exchange_id(s, id))
}

// ── Common-property bindings ─────────────────────────────────────────────────

/// Voice/bus/send/positioning/HDR entries shared by every node kind, bound
/// in schema order.  The MIDI entries between HDR and priority differ per
/// family and are bound by [`exchange_node_properties`].
fn bind_node_voice_properties(
    bind: &mut PropertyBinder<'_, AudioProperty>,
    ctx: Ctx,
    node: &mut AudioNode,
) -> Result<()> {
    use AudioProperty as P;
    // Voice.
    bind.randomizable_f32(P::VoiceVolume, &mut node.voice.volume)?;
    bind.randomizable_f32(P::VoicePitch, &mut node.voice.pitch)?;
    bind.randomizable_f32(P::VoiceLowPassFilter, &mut node.voice.low_pass_filter)?;
    if ctx.version.at_least(112) {
        bind.randomizable_f32(P::VoiceHighPassFilter, &mut node.voice.high_pass_filter)?;
    }
    // Voice volume gain.
    if ctx.version.within(88, 112) {
        bind.regular_f32(P::VoiceVolumeMakeUpGain, &mut node.voice_volume_gain.make_up.value)?;
    }
    if ctx.version.at_least(112) {
        bind.randomizable_f32(P::VoiceVolumeMakeUpGain, &mut node.voice_volume_gain.make_up)?;
    }
    // Output bus.
    bind.regular_f32(P::OutputBusVolume, &mut node.output_bus.volume)?;
    bind.regular_f32(P::OutputBusLowPassFilter, &mut node.output_bus.low_pass_filter)?;
    if ctx.version.at_least(112) {
        bind.regular_f32(P::OutputBusHighPassFilter, &mut node.output_bus.high_pass_filter)?;
    }
    // Auxiliary sends.
    let send = &mut node.auxiliary_send;
    bind.regular_f32(P::GameDefinedAuxiliarySendVolume, &mut send.game_defined.volume)?;
    if ctx.version.at_least(128) {
        bind.regular_f32(
            P::GameDefinedAuxiliarySendLowPassFilter,
            &mut send.game_defined.low_pass_filter,
        )?;
        bind.regular_f32(
            P::GameDefinedAuxiliarySendHighPassFilter,
            &mut send.game_defined.high_pass_filter,
        )?;
    }
    let volume_keys = [
        P::UserDefinedAuxiliarySendVolume0,
        P::UserDefinedAuxiliarySendVolume1,
        P::UserDefinedAuxiliarySendVolume2,
        P::UserDefinedAuxiliarySendVolume3,
    ];
    let low_pass_keys = [
        P::UserDefinedAuxiliarySendLowPassFilter0,
        P::UserDefinedAuxiliarySendLowPassFilter1,
        P::UserDefinedAuxiliarySendLowPassFilter2,
        P::UserDefinedAuxiliarySendLowPassFilter3,
    ];
    let high_pass_keys = [
        P::UserDefinedAuxiliarySendHighPassFilter0,
        P::UserDefinedAuxiliarySendHighPassFilter1,
        P::UserDefinedAuxiliarySendHighPassFilter2,
        P::UserDefinedAuxiliarySendHighPassFilter3,
    ];
    for (index, item) in send.user_defined.item.iter_mut().enumerate() {
        bind.regular_f32(volume_keys[index], &mut item.volume)?;
        if ctx.version.at_least(128) {
            bind.regular_f32(low_pass_keys[index], &mut item.low_pass_filter)?;
            bind.regular_f32(high_pass_keys[index], &mut item.high_pass_filter)?;
        }
    }
    if ctx.version.at_least(135) {
        bind.regular_f32(
            P::EarlyReflectionAuxiliarySendVolume,
            &mut send.early_reflection.volume,
        )?;
    }
    // Positioning.
    let positioning = &mut node.positioning;
    bind.regular_f32(P::PositioningCenterPercent, &mut positioning.center_percent)?;
    bind.regular_f32(P::PositioningSpeakerPanningX, &mut positioning.speaker_panning.position.x)?;
    bind.regular_f32(P::PositioningSpeakerPanningY, &mut positioning.speaker_panning.position.y)?;
    if ctx.version.at_least(140) {
        bind.regular_f32(
            P::PositioningSpeakerPanningZ,
            &mut positioning.speaker_panning.position.z,
        )?;
    }
    if ctx.version.at_least(132) {
        bind.regular_f32(
            P::PositioningListenerRoutingSpeakerPanningDivisionSpatializationMix,
            &mut positioning.listener_routing.speaker_panning_division_spatialization_mix,
        )?;
        bind.id(
            P::PositioningListenerRoutingAttenuationId,
            &mut positioning.listener_routing.attenuation_id,
        )?;
    }
    // HDR envelope tracking.
    if ctx.version.at_least(88) {
        bind.regular_f32(
            P::HdrEnvelopeTrackingActiveRange,
            &mut node.hdr.envelope_tracking_active_range,
        )?;
    }
    Ok(())
}

fn bind_sound_midi_properties(
    bind: &mut PropertyBinder<'_, AudioProperty>,
    ctx: Ctx,
    midi: &mut SoundMIDISetting,
) -> Result<()> {
    use AudioProperty as P;
    if ctx.version.at_least(112) {
        bind.enumeration(P::MidiEventPlayOn, &mut midi.event_play_on)?;
        bind.regular_i32(P::MidiNoteTrackingRootNote, &mut midi.note_tracking_root_note)?;
        bind.regular_i32(
            P::MidiTransformationTransposition,
            &mut midi.transformation_transposition,
        )?;
        bind.regular_i32(
            P::MidiTransformationVelocityOffset,
            &mut midi.transformation_velocity_offset,
        )?;
        bind.regular_i32(P::MidiFilterKeyRangeMinimum, &mut midi.filter_key_range_minimum)?;
        bind.regular_i32(P::MidiFilterKeyRangeMaximum, &mut midi.filter_key_range_maximum)?;
        bind.regular_i32(P::MidiFilterVelocityMinimum, &mut midi.filter_velocity_minimum)?;
        bind.regular_i32(P::MidiFilterVelocityMaximum, &mut midi.filter_velocity_maximum)?;
        bind.regular_i32(P::MidiFilterChannel, &mut midi.filter_channel)?;
    }
    Ok(())
}

fn bind_music_midi_properties(
    bind: &mut PropertyBinder<'_, AudioProperty>,
    ctx: Ctx,
    midi: &mut MusicMIDISetting,
) -> Result<()> {
    use AudioProperty as P;
    if ctx.version.at_least(112) {
        bind.id(P::MidiTargetId, &mut midi.target)?;
        bind.enumeration(P::MidiClipTempoSource, &mut midi.clip_tempo_source)?;
    }
    Ok(())
}

fn bind_node_playback_properties(
    bind: &mut PropertyBinder<'_, AudioProperty>,
    ctx: Ctx,
    node: &mut AudioNode,
) -> Result<()> {
    use AudioProperty as P;
    // Playback priority.
    bind.regular_f32(P::PlaybackPriorityValue, &mut node.playback_priority.value)?;
    bind.regular_f32(
        P::PlaybackPriorityOffsetAtMaximumDistance,
        &mut node.playback_priority.offset_at_maximum_distance,
    )?;
    // Motion.
    if ctx.version.within(72, 128) {
        bind.randomizable_f32(P::MotionLowPassFilter, &mut node.motion.low_pass_filter)?;
        bind.randomizable_f32(P::MotionVolumeOffset, &mut node.motion.volume_offset)?;
    }
    // Mixer.
    if ctx.version.within(112, 150) {
        bind.id(P::MixerId, &mut node.mixer.id)?;
    }
    Ok(())
}

pub(super) fn bind_bus_common_properties(
    bind: &mut PropertyBinder<'_, AudioProperty>,
    ctx: Ctx,
    bus: &mut AudioBus,
) -> Result<()> {
    use AudioProperty as P;
    bind.regular_f32(P::VoiceVolume, &mut bus.voice.volume)?;
    bind.regular_f32(P::VoicePitch, &mut bus.voice.pitch)?;
    bind.regular_f32(P::VoiceLowPassFilter, &mut bus.voice.low_pass_filter)?;
    if ctx.version.at_least(112) {
        bind.regular_f32(P::VoiceHighPassFilter, &mut bus.voice.high_pass_filter)?;
    }
    if ctx.version.at_least(125) {
        bind.regular_f32(P::VoiceVolumeMakeUpGain, &mut bus.voice_volume_gain.make_up)?;
    }
    bind.regular_f32(P::BusVolume, &mut bus.bus.volume)?;
    if ctx.version.at_least(128) {
        bind.regular_f32(P::OutputBusVolume, &mut bus.output_bus.volume)?;
        bind.regular_f32(P::OutputBusLowPassFilter, &mut bus.output_bus.low_pass_filter)?;
        bind.regular_f32(P::OutputBusHighPassFilter, &mut bus.output_bus.high_pass_filter)?;
    }
    if ctx.version.at_least(125) {
        bind.regular_f32(
            P::GameDefinedAuxiliarySendVolume,
            &mut bus.auxiliary_send.game_defined.volume,
        )?;
        let volume_keys = [
            P::UserDefinedAuxiliarySendVolume0,
            P::UserDefinedAuxiliarySendVolume1,
            P::UserDefinedAuxiliarySendVolume2,
            P::UserDefinedAuxiliarySendVolume3,
        ];
        for (index, item) in bus.auxiliary_send.user_defined.item.iter_mut().enumerate() {
            bind.regular_f32(volume_keys[index], &mut item.volume)?;
        }
        if ctx.version.at_least(135) {
            bind.regular_f32(
                P::EarlyReflectionAuxiliarySendVolume,
                &mut bus.auxiliary_send.early_reflection.volume,
            )?;
        }
    }
    if ctx.version.at_least(88) {
        bind.regular_f32(P::PositioningCenterPercent, &mut bus.positioning.center_percent)?;
        bind.regular_f32(
            P::PositioningSpeakerPanningX,
            &mut bus.positioning.speaker_panning.position.x,
        )?;
        bind.regular_f32(
            P::PositioningSpeakerPanningY,
            &mut bus.positioning.speaker_panning.position.y,
        )?;
        bind.regular_f32(P::HdrThreshold, &mut bus.hdr.dynamic.threshold)?;
        bind.regular_f32(P::HdrRatio, &mut bus.hdr.dynamic.ratio)?;
        bind.regular_f32(P::HdrReleaseTime, &mut bus.hdr.dynamic.release_time)?;
        bind.id(
            P::HdrWindowTapOutputGameParameterId,
            &mut bus.hdr.window_top_output_game_parameter.id,
        )?;
        bind.regular_f32(
            P::HdrWindowTapOutputGameParameterMinimum,
            &mut bus.hdr.window_top_output_game_parameter.minimum,
        )?;
        bind.regular_f32(
            P::HdrWindowTapOutputGameParameterMaximum,
            &mut bus.hdr.window_top_output_game_parameter.maximum,
        )?;
    }
    Ok(())
}

/// Kind-specific entries of the node common-property block: the leading
/// playback parameters and the MIDI binding family.
pub(super) enum NodeExtraProperty<'a> {
    /// Actor mixer: no leading entries.
    None,
    /// Sound: initial delay plus the playback loop count.
    SoundPlayback {
        initial_delay: &'a mut RandomizableValue<f32>,
        loop_count: &'a mut RandomizableValue<i32>,
    },
    /// Sound containers: initial delay only.
    InitialDelay(&'a mut RandomizableValue<f32>),
    /// Interactive-music kinds: playback speed (absent on tracks) and the
    /// music MIDI pair in place of the sound MIDI entries.
    Music {
        speed: Option<&'a mut f32>,
        midi: &'a mut MusicMIDISetting,
    },
}

pub(super) fn exchange_node_properties<S: Stream>(
    stream: &mut S,
    ctx: Ctx,
    node: &mut AudioNode,
    extra: NodeExtraProperty<'_>,
) -> Result<()> {
    exchange_properties::<_, AudioProperty>(stream, true, ctx.emission, |bind| {
        let mut extra = extra;
        match &mut extra {
            NodeExtraProperty::None | NodeExtraProperty::Music { speed: None, .. } => {}
            NodeExtraProperty::SoundPlayback {
                initial_delay,
                loop_count,
            } => {
                if ctx.version.at_least(88) {
                    bind.randomizable_f32(AudioProperty::PlaybackInitialDelay, initial_delay)?;
                }
                bind.randomizable_i32(AudioProperty::PlaybackLoop, loop_count)?;
            }
            NodeExtraProperty::InitialDelay(initial_delay) => {
                if ctx.version.at_least(88) {
                    bind.randomizable_f32(AudioProperty::PlaybackInitialDelay, initial_delay)?;
                }
            }
            NodeExtraProperty::Music {
                speed: Some(speed), ..
            } => {
                if ctx.version.at_least(112) {
                    bind.regular_f32(AudioProperty::PlaybackSpeed, speed)?;
                }
            }
        }
        bind_node_voice_properties(bind, ctx, node)?;
        match &mut extra {
            NodeExtraProperty::Music { midi, .. } => bind_music_midi_properties(bind, ctx, midi)?,
            _ => bind_sound_midi_properties(bind, ctx, &mut node.midi)?,
        }
        bind_node_playback_properties(bind, ctx, node)
    })
}
