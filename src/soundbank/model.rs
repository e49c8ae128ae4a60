//! Decoded SoundBank aggregate.
//!
//! Every type here is plain data: constructed fresh by one decode call,
//! consumed by one encode call, never shared across calls.  The serde
//! derives exist for the external JSON bridge (CLI dumps and re-encoding
//! from edited dumps); the binary codec never goes through serde.
//!
//! Field names follow the reverse-engineered schema.  `u1`-style names mark
//! fields whose meaning is not yet pinned down but whose position and width
//! are; they round-trip verbatim.

use serde::{Deserialize, Serialize};

use crate::bits::bit_enum;
use crate::stream::Id;

// ── Value wrappers ───────────────────────────────────────────────────────────

/// A parameter with an optional (minimum, maximum) randomizer range
/// consulted at runtime.  A plain (non-randomized) value keeps the range at
/// its zero default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomizableValue<T> {
    pub value: T,
    pub minimum: T,
    pub maximum: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One point of a parameter curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub position: Position2,
    pub curve: CurveShape,
}

/// Switch-group graph point: maps a parameter position to a switch id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPointId {
    pub position: f32,
    pub item: Id,
    pub curve: CurveShape,
}

// ── Shared enumerations ──────────────────────────────────────────────────────

bit_enum! {
    /// Curve interpolation shapes.
    pub enum CurveShape {
        Log3,
        Sine,
        Log1,
        InvertedSCurve,
        Linear,
        SCurve,
        Exponential1,
        SineReciprocal,
        Exponential3,
    }
}

bit_enum! {
    pub enum ParameterCategory {
        GameParameter,
        Midi,
        Modulator,
    }
}

bit_enum! {
    pub enum AudioPlayType {
        Random,
        Sequence,
    }
}

bit_enum! {
    pub enum AudioPlayMode {
        Step,
        Continuous,
    }
}

bit_enum! {
    pub enum RandomPlayType {
        Standard,
        Shuffle,
    }
}

bit_enum! {
    pub enum SequenceAtEndOfPlaylist {
        RestartFromBeginning,
        PlayInReverseOrder,
    }
}

bit_enum! {
    pub enum ContinuousTransitionType {
        None,
        CrossFadeAmplitude,
        CrossFadePower,
        Delay,
        SampleAccurate,
        TriggerRate,
    }
}

bit_enum! {
    pub enum SoundPlaylistContainerScope {
        Global,
        GameObject,
    }
}

bit_enum! {
    pub enum PositioningType {
        TwoDimension,
        ThreeDimension,
    }
}

bit_enum! {
    pub enum SpeakerPanningMode {
        DirectAssignment,
        BalanceFade,
    }
}

bit_enum! {
    pub enum PositioningSpatialization {
        None,
        PositionAndOrientation,
    }
}

bit_enum! {
    pub enum PositionSourceMode {
        UserDefined,
        GameDefined,
        Emitter,
    }
}

bit_enum! {
    pub enum AutomationPlayType {
        Sequence,
        Random,
    }
}

bit_enum! {
    pub enum AutomationPlayMode {
        Continuous,
        Step,
    }
}

bit_enum! {
    pub enum HdrReleaseMode {
        Linear,
        Exponential,
    }
}

bit_enum! {
    pub enum MidiPlayOn {
        NoteOn,
        NoteOff,
    }
}

bit_enum! {
    pub enum MidiTempoSource {
        Hierarchy,
        File,
    }
}

bit_enum! {
    pub enum PriorityEqualBehavior {
        DiscardOldest,
        DiscardNewest,
    }
}

bit_enum! {
    pub enum LimitReachedBehavior {
        KillVoice,
        UseVirtualSetting,
    }
}

bit_enum! {
    pub enum PlaybackLimitScope {
        PerGameObject,
        Global,
    }
}

bit_enum! {
    pub enum VirtualVoiceBehavior {
        ContinueToPlay,
        KillVoice,
        SendToVirtualVoice,
        KillIfFiniteElseVirtual,
    }
}

bit_enum! {
    pub enum OnReturnToPhysical {
        PlayFromBeginning,
        PlayFromElapsedTime,
        Resume,
    }
}

bit_enum! {
    pub enum AudioSourceType {
        Embedded,
        Streamed,
        StreamedZeroLatency,
    }
}

bit_enum! {
    pub enum DuckTarget {
        VoiceVolume,
        BusVolume,
    }
}

bit_enum! {
    pub enum RtpcMode {
        Additive,
        Exclusive,
    }
}

bit_enum! {
    /// Synchronization point at which a state change or stinger applies.
    pub enum SyncPoint {
        Immediate,
        NextGrid,
        NextBar,
        NextBeat,
        NextCue,
        CustomCue,
        EntryCue,
        ExitCue,
    }
}

bit_enum! {
    pub enum MusicJumpTo {
        StartOfPlaylist,
        SpecificItem,
        LastPlayedSegment,
        NextSegment,
    }
}

bit_enum! {
    pub enum MusicSynchronizeTo {
        EntryCue,
        SameTime,
        RandomCue,
        RandomCustomCue,
    }
}

bit_enum! {
    pub enum MusicTrackTrackType {
        Normal,
        Random,
        Sequence,
        Switcher,
    }
}

bit_enum! {
    pub enum AssociationMode {
        BestMatch,
        Weighted,
    }
}

bit_enum! {
    pub enum ClipCurveType {
        Volume,
        LowPassFilter,
        HighPassFilter,
        FadeIn,
        FadeOut,
    }
}

bit_enum! {
    pub enum AttenuationCurveMode {
        Custom,
        UseOutputBusVolume,
    }
}

bit_enum! {
    pub enum ObstructionCurveMode {
        UseDefined,
        UseGlobalSetting,
    }
}

bit_enum! {
    pub enum GameParameterInterpolationMode {
        None,
        SlewRate,
        FilteringOverTime,
    }
}

bit_enum! {
    pub enum BuiltInParameter {
        None,
        DistanceToListener,
        Azimuth,
        Elevation,
        ObjectToListenerAngle,
        Obstruction,
        Occlusion,
    }
}

bit_enum! {
    pub enum VoiceFilterBehavior {
        SumAllValues,
        UseHighestValue,
    }
}

bit_enum! {
    pub enum ModulatorWaveform {
        Sine,
        Triangle,
        Square,
        SawUp,
        SawDown,
        Random,
    }
}

bit_enum! {
    pub enum ModulatorScope {
        Voice,
        NoteOrEvent,
        GameObject,
        Global,
    }
}

bit_enum! {
    pub enum ModulatorTriggerOn {
        Play,
        NoteOff,
    }
}

bit_enum! {
    pub enum ActionScope {
        One,
        All,
        AllExcept,
    }
}

bit_enum! {
    pub enum ActionMode {
        Instant,
        Paused,
    }
}

bit_enum! {
    pub enum ValueApplyMode {
        Absolute,
        Relative,
    }
}

bit_enum! {
    pub enum SeekType {
        Time,
        Percent,
    }
}

// ── Shared settings ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusVoiceSetting {
    pub volume: f32,
    pub pitch: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioVoice {
    pub volume: RandomizableValue<f32>,
    pub pitch: RandomizableValue<f32>,
    pub low_pass_filter: RandomizableValue<f32>,
    pub high_pass_filter: RandomizableValue<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusVoiceVolumeGainSetting {
    pub make_up: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioVoiceVolumeGainSetting {
    pub make_up: RandomizableValue<f32>,
    pub normalization: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusBusSetting {
    pub volume: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusOutputBusSetting {
    pub volume: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioOutputBusSetting {
    pub bus: Id,
    pub volume: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDefinedAuxiliarySend {
    pub enable: bool,
    pub volume: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedAuxiliarySendItem {
    pub bus: Id,
    pub volume: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedAuxiliarySend {
    pub enable: bool,
    pub item: [UserDefinedAuxiliarySendItem; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarlyReflectionAuxiliarySend {
    pub bus: Id,
    pub volume: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioAuxiliarySendSetting {
    pub game_defined: GameDefinedAuxiliarySend,
    pub user_defined: UserDefinedAuxiliarySend,
    pub early_reflection: EarlyReflectionAuxiliarySend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeakerPanningSetting {
    pub enable: bool,
    pub mode: SpeakerPanningMode,
    pub position: Position3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositioningAutomationPoint {
    pub position: Position3,
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositioningAutomationPath {
    pub point_begin: u32,
    pub point_count: u32,
    pub random_range_left_right: f32,
    pub random_range_front_back: f32,
    pub random_range_up_down: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositioningAutomation {
    pub play_type: AutomationPlayType,
    pub play_mode: AutomationPlayMode,
    pub pick_new_path_when_sound_start: bool,
    pub looping: bool,
    pub transition_time: u32,
    pub point: Vec<PositioningAutomationPoint>,
    pub path: Vec<PositioningAutomationPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSourceSetting {
    pub mode: PositionSourceMode,
    pub hold_emitter_position_and_orientation: bool,
    pub hold_listener_orientation: bool,
    pub update_at_each_frame: bool,
    pub diffraction_and_transmission: bool,
    pub automation: PositioningAutomation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListenerRoutingSetting {
    pub enable: bool,
    pub spatialization: PositioningSpatialization,
    pub speaker_panning_division_spatialization_mix: f32,
    pub attenuation_enable: bool,
    pub attenuation_id: Id,
    pub position_source: PositionSourceSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPositioningSetting {
    pub enable: bool,
    pub kind: PositioningType,
    pub center_percent: f32,
    pub speaker_panning: SpeakerPanningSetting,
    pub listener_routing: ListenerRoutingSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusHDRDynamic {
    pub threshold: f32,
    pub ratio: f32,
    pub release_time: f32,
    pub release_mode: HdrReleaseMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusHDRWindowTopOutput {
    pub id: Id,
    pub minimum: f32,
    pub maximum: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusHDRSetting {
    pub enable: bool,
    pub dynamic: BusHDRDynamic,
    pub window_top_output_game_parameter: BusHDRWindowTopOutput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioHDRSetting {
    pub envelope_tracking_enable: bool,
    pub envelope_tracking_active_range: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundMIDISetting {
    pub event_play_on: MidiPlayOn,
    pub event_break_on_note_off: bool,
    pub note_tracking_enable: bool,
    pub note_tracking_root_note: i32,
    pub transformation_transposition: i32,
    pub transformation_velocity_offset: i32,
    pub filter_key_range_minimum: i32,
    pub filter_key_range_maximum: i32,
    pub filter_velocity_minimum: i32,
    pub filter_velocity_maximum: i32,
    pub filter_channel: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicMIDISetting {
    pub target: Id,
    pub clip_tempo_source: MidiTempoSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPlaybackLimitSetting {
    pub value: u16,
    pub when_priority_is_equal: PriorityEqualBehavior,
    pub when_limit_is_reached: LimitReachedBehavior,
    pub scope: PlaybackLimitScope,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioVirtualVoiceSetting {
    pub behavior: VirtualVoiceBehavior,
    pub on_return_to_physical: OnReturnToPhysical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPlaybackPrioritySetting {
    pub value: f32,
    pub offset_at_maximum_distance: f32,
    pub use_distance_factor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMotionSetting {
    pub low_pass_filter: RandomizableValue<f32>,
    pub volume_offset: RandomizableValue<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMixerSetting {
    pub id: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioBusMuteForBackgroundMusic {
    pub enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rtpc {
    pub parameter_id: Id,
    pub parameter_category: ParameterCategory,
    pub u1: bool,
    pub kind: u32,
    pub u2: Id,
    pub mode: RtpcMode,
    pub point: Vec<GraphPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealTimeParameterControlSetting {
    pub item: Vec<Rtpc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateApplyItem {
    pub target: Id,
    pub setting: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateGroupUsage {
    pub group: Id,
    pub change_occur_at: SyncPoint,
    pub apply: Vec<StateApplyItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateAttribute {
    pub kind: u8,
    pub category: ParameterCategory,
    pub u1: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSetting {
    pub attribute: Vec<StateAttribute>,
    pub item: Vec<StateGroupUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioEffectItem {
    pub index: u8,
    pub id: Id,
    pub use_share_set: bool,
    pub u1: bool,
    pub bypass: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioEffectSetting {
    /// Per-slot bypass flags (slots 1..4 plus the all-slots flag).
    pub bypass: [bool; 5],
    pub item: Vec<AudioEffectItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadataItem {
    pub index: u8,
    pub id: Id,
    pub use_share_set: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadataSetting {
    pub item: Vec<AudioMetadataItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioSourceSetting {
    pub plug_in: Id,
    pub kind: AudioSourceType,
    pub resource: Id,
    pub source: Id,
    pub resource_offset: u32,
    pub resource_size: u32,
    pub is_voice: bool,
    pub non_cachable_stream: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuckedBus {
    pub id: Id,
    pub volume: f32,
    pub fade_out: u32,
    pub fade_in: u32,
    pub curve: CurveShape,
    pub target: DuckTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusAutomaticDuckingSetting {
    pub recovery_time: u32,
    pub maximum_ducking_volume: f32,
    pub bus: Vec<DuckedBus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioBusConfiguration {
    pub u1: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioTimeSetting {
    pub time: f64,
    pub offset: f64,
    pub tempo: f32,
    pub signature_first: u8,
    pub signature_second: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackClipItem {
    pub u1: u32,
    pub source: Id,
    pub event: Id,
    pub offset: f64,
    pub begin: f64,
    pub end: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackClipCurve {
    pub index: u32,
    pub kind: ClipCurveType,
    pub point: Vec<GraphPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackClip {
    pub item: Vec<MusicTrackClipItem>,
    pub u1: u32,
    pub curve: Vec<MusicTrackClipCurve>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicStinger {
    pub trigger: Id,
    pub segment_to_play: Id,
    pub play_at: SyncPoint,
    pub cue_name: Id,
    pub do_not_play_this_stinger_again_for: u32,
    pub allow_playing_stinger_in_next_segment: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicStingerSetting {
    pub item: Vec<MusicStinger>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionFade {
    pub time: u32,
    pub curve: u32,
    pub offset: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionSource {
    pub id: Id,
    pub fade_out: MusicTransitionFade,
    pub exit_source_at: SyncPoint,
    pub exit_source_at_custom_cue_match: Id,
    pub play_post_exit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionDestination {
    pub id: Id,
    pub fade_in: MusicTransitionFade,
    pub custom_cue_filter_match_target: Id,
    pub jump_to: MusicJumpTo,
    pub synchronize_to: MusicSynchronizeTo,
    pub play_pre_entry: bool,
    pub custom_cue_filter_match_source_cue_name: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionSegment {
    pub enable: bool,
    pub id: Id,
    pub fade_in: MusicTransitionFade,
    pub fade_out: MusicTransitionFade,
    pub play_pre_entry: bool,
    pub play_post_exit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionItem {
    pub source: MusicTransitionSource,
    pub destination: MusicTransitionDestination,
    pub u1: Id,
    pub segment: MusicTransitionSegment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTransitionSetting {
    pub item: Vec<MusicTransitionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackTransitionSetting {
    pub switcher: Id,
    pub source_fade_out: MusicTransitionFade,
    pub source_exit_at: SyncPoint,
    pub source_exit_at_custom_cue_match: Id,
    pub destination_fade_in: MusicTransitionFade,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioSwitcherSetting {
    pub is_state: bool,
    pub group: Id,
    pub default_item: Id,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationArgument {
    pub id: Id,
    pub is_state: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationPath {
    pub u1: Id,
    pub object: Id,
    pub weight: u16,
    pub probability: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioAssociationSetting {
    pub probability: u8,
    pub mode: AssociationMode,
    pub argument: Vec<AssociationArgument>,
    pub path: Vec<AssociationPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPlayTypeSetting {
    pub random_kind: RandomPlayType,
    pub random_avoid_repeat: u16,
    pub sequence_at_end_of_playlist: SequenceAtEndOfPlaylist,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPlayModeSetting {
    pub continuous_always_reset_playlist: bool,
    pub continuous_loop: RandomizableValue<i16>,
    pub continuous_transition_type: ContinuousTransitionType,
    pub continuous_transition_duration: RandomizableValue<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundPlaylistItem {
    pub item: Id,
    pub weight: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchObjectAttributeItem {
    pub id: Id,
    pub play_first_only: bool,
    pub continue_to_play_across_switch: bool,
    pub u1: u32,
    pub fade_out_time: u32,
    pub fade_in_time: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchObjectAssignItem {
    pub item: Id,
    pub object: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendTrackChild {
    pub id: Id,
    pub point: Vec<GraphPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendTrack {
    pub id: Id,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
    pub cross_fade_id: Id,
    pub cross_fade_category: ParameterCategory,
    pub child: Vec<BlendTrackChild>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackStream {
    pub look_ahead_time: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicCueItem {
    pub name: Id,
    pub time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSegmentCue {
    pub item: Vec<MusicCueItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicPlaylistItem {
    pub item: Id,
    pub u1: Id,
    pub child_count: u32,
    pub play_mode: AudioPlayMode,
    pub play_type: AudioPlayType,
    pub loop_count: u16,
    pub weight: u32,
    pub random_avoid_repeat: u16,
    pub group: bool,
    pub random_kind: RandomPlayType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectU1 {
    pub kind: u8,
    pub mode: bool,
    pub value: f32,
}

// ── Shared audio-node attribute block ────────────────────────────────────────

/// Attributes shared by every actor-mixer and interactive-music node kind.
/// The wire order interleaves these with kind-specific fields; the exchange
/// in `hierarchy.rs` drives that order, this struct only stores the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioNode {
    pub effect: AudioEffectSetting,
    pub override_effect: bool,
    pub metadata: AudioMetadataSetting,
    pub override_metadata: bool,
    pub mixer: AudioMixerSetting,
    pub override_mixer: bool,
    pub output_bus: AudioOutputBusSetting,
    pub parent: Id,
    pub playback_priority: AudioPlaybackPrioritySetting,
    pub override_playback_priority: bool,
    pub midi: SoundMIDISetting,
    pub override_midi_event: bool,
    pub override_midi_note_tracking: bool,
    pub voice: AudioVoice,
    pub voice_volume_gain: AudioVoiceVolumeGainSetting,
    pub auxiliary_send: AudioAuxiliarySendSetting,
    pub override_game_defined_auxiliary_send: bool,
    pub override_user_defined_auxiliary_send: bool,
    pub override_early_reflection_auxiliary_send: bool,
    pub positioning: AudioPositioningSetting,
    pub override_positioning: bool,
    pub hdr: AudioHDRSetting,
    pub override_hdr_envelope_tracking: bool,
    pub override_voice_volume_loudness_normalization: bool,
    pub playback_limit: AudioPlaybackLimitSetting,
    pub override_playback_limit: bool,
    pub virtual_voice: AudioVirtualVoiceSetting,
    pub override_virtual_voice: bool,
    pub motion: AudioMotionSetting,
    pub state: StateSetting,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
}

// ── Hierarchy object kinds ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatefulProperty {
    pub kind: u16,
    pub value: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatefulPropertySetting {
    pub id: Id,
    pub value: Vec<StatefulProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionException {
    pub id: Id,
    pub u1: bool,
}

/// Payload shapes behind the event-action sub-type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventActionProperty {
    PlayAudio {
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        probability: f32,
        fade_curve: CurveShape,
        sound_bank: Id,
    },
    StopAudio {
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        resume_state_transition: bool,
        apply_to_dynamic_sequence: bool,
        exception: Vec<ActionException>,
    },
    PauseAudio {
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        include_delayed_resume_action: bool,
        resume_state_transition: bool,
        apply_to_dynamic_sequence: bool,
        exception: Vec<ActionException>,
    },
    ResumeAudio {
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        master_resume: bool,
        resume_state_transition: bool,
        apply_to_dynamic_sequence: bool,
        exception: Vec<ActionException>,
    },
    BreakAudio {
        delay: RandomizableValue<f32>,
    },
    SeekAudio {
        delay: RandomizableValue<f32>,
        seek_type: SeekType,
        seek_value: RandomizableValue<f32>,
        seek_to_nearest_marker: bool,
        exception: Vec<ActionException>,
    },
    PostEvent {
        delay: RandomizableValue<f32>,
    },
    SetVoicePitch {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetVoiceVolume {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetBusVolume {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetVoiceLowPassFilter {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetVoiceHighPassFilter {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetMute {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        exception: Vec<ActionException>,
    },
    SetGameParameter {
        reset: bool,
        delay: RandomizableValue<f32>,
        fade_time: RandomizableValue<f32>,
        fade_curve: CurveShape,
        bypass_game_parameter_interpolation: bool,
        apply_mode: ValueApplyMode,
        value: RandomizableValue<f32>,
        exception: Vec<ActionException>,
    },
    SetStateAvailability {
        enable: bool,
        delay: RandomizableValue<f32>,
    },
    ActivateState {
        delay: RandomizableValue<f32>,
        group: Id,
        item: Id,
    },
    ActivateSwitch {
        delay: RandomizableValue<f32>,
        group: Id,
        item: Id,
    },
    ActivateTrigger {
        delay: RandomizableValue<f32>,
    },
    SetBypassEffect {
        reset: bool,
        delay: RandomizableValue<f32>,
        enable: bool,
        value: [bool; 5],
        exception: Vec<ActionException>,
    },
    ReleaseEnvelope {
        delay: RandomizableValue<f32>,
    },
    ResetPlaylist {
        delay: RandomizableValue<f32>,
    },
}

impl Default for EventActionProperty {
    fn default() -> Self {
        EventActionProperty::PlayAudio {
            delay: RandomizableValue::default(),
            fade_time: RandomizableValue::default(),
            probability: 0.0,
            fade_curve: CurveShape::default(),
            sound_bank: Id::NONE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAction {
    pub id: Id,
    pub scope: ActionScope,
    pub mode: ActionMode,
    pub target: Id,
    pub u1: u8,
    pub property: EventActionProperty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub child: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueEvent {
    pub id: Id,
    pub probability: u8,
    pub association: AudioAssociationSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttenuationCone {
    pub enable: bool,
    pub inner_angle: f32,
    pub outer_angle: f32,
    pub maximum_value: f32,
    pub low_pass_filter: f32,
    pub high_pass_filter: f32,
}

/// Per-usage indices into the attenuation curve list.  Which slots exist
/// depends on the version; unexchanged slots stay zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttenuationApply {
    pub output_bus_volume: u8,
    pub auxiliary_send_volume: u8,
    pub game_defined_auxiliary_send_volume: u8,
    pub user_defined_auxiliary_send_volume: u8,
    pub low_pass_filter: u8,
    pub high_pass_filter: u8,
    pub spread: u8,
    pub focus: u8,
    pub distance_output_bus_volume: u8,
    pub distance_game_defined_auxiliary_send_volume: u8,
    pub distance_user_defined_auxiliary_send_volume: u8,
    pub distance_low_pass_filter: u8,
    pub distance_high_pass_filter: u8,
    pub distance_spread: u8,
    pub distance_focus: u8,
    pub obstruction_volume: u8,
    pub obstruction_low_pass_filter: u8,
    pub obstruction_high_pass_filter: u8,
    pub occlusion_volume: u8,
    pub occlusion_low_pass_filter: u8,
    pub occlusion_high_pass_filter: u8,
    pub diffraction_volume: u8,
    pub diffraction_low_pass_filter: u8,
    pub diffraction_high_pass_filter: u8,
    pub transmission_volume: u8,
    pub transmission_low_pass_filter: u8,
    pub transmission_high_pass_filter: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttenuationCurve {
    pub mode: AttenuationCurveMode,
    pub point: Vec<GraphPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub id: Id,
    pub height_spread: bool,
    pub cone: AttenuationCone,
    pub apply: AttenuationApply,
    pub curve: Vec<AttenuationCurve>,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LowFrequencyOscillatorModulator {
    pub id: Id,
    pub depth: RandomizableValue<f32>,
    pub frequency: RandomizableValue<f32>,
    pub waveform: ModulatorWaveform,
    pub smoothing: RandomizableValue<f32>,
    pub pulse_width_modulation: RandomizableValue<f32>,
    pub attack: RandomizableValue<f32>,
    pub initial_phase_offset: RandomizableValue<f32>,
    pub scope: ModulatorScope,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeModulator {
    pub id: Id,
    pub attack_time: RandomizableValue<f32>,
    pub attack_curve: RandomizableValue<f32>,
    pub decay_time: RandomizableValue<f32>,
    pub sustain_level: RandomizableValue<f32>,
    pub release_time: RandomizableValue<f32>,
    pub scope: ModulatorScope,
    pub trigger_on: ModulatorTriggerOn,
    pub sustain_time: RandomizableValue<f32>,
    pub stop_playback_after_release: bool,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeModulator {
    pub id: Id,
    pub initial_delay: RandomizableValue<f32>,
    pub duration: f32,
    pub loop_count: RandomizableValue<i32>,
    pub playback_rate: RandomizableValue<f32>,
    pub scope: ModulatorScope,
    pub trigger_on: ModulatorTriggerOn,
    pub stop_playback_at_end: bool,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: Id,
    pub plug_in: Id,
    pub expand: Vec<u8>,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
    pub state: StateSetting,
    pub u1: Vec<EffectU1>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioDevice {
    pub id: Id,
    pub plug_in: Id,
    pub expand: Vec<u8>,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
    pub state: StateSetting,
    pub u1: Vec<EffectU1>,
    pub effect: AudioEffectSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioBus {
    pub id: Id,
    pub parent: Id,
    pub audio_device: Id,
    pub voice: BusVoiceSetting,
    pub voice_volume_gain: BusVoiceVolumeGainSetting,
    pub bus: BusBusSetting,
    pub output_bus: BusOutputBusSetting,
    pub auxiliary_send: AudioAuxiliarySendSetting,
    pub positioning: AudioPositioningSetting,
    pub override_positioning: bool,
    pub hdr: BusHDRSetting,
    pub playback_limit: AudioPlaybackLimitSetting,
    pub override_playback_limit: bool,
    pub mute_for_background_music: AudioBusMuteForBackgroundMusic,
    pub bus_configuration: AudioBusConfiguration,
    pub automatic_ducking: BusAutomaticDuckingSetting,
    pub effect: AudioEffectSetting,
    pub mixer: Id,
    pub metadata: AudioMetadataSetting,
    pub real_time_parameter_control: RealTimeParameterControlSetting,
    pub state: StateSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundPlaybackSetting {
    pub initial_delay: RandomizableValue<f32>,
    pub loop_count: RandomizableValue<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub id: Id,
    pub node: AudioNode,
    pub source: AudioSourceSetting,
    pub playback_setting: SoundPlaybackSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundPlaylistPlaybackSetting {
    pub initial_delay: RandomizableValue<f32>,
    pub scope: SoundPlaylistContainerScope,
    pub kind: AudioPlayType,
    pub kind_setting: AudioPlayTypeSetting,
    pub mode: AudioPlayMode,
    pub mode_setting: AudioPlayModeSetting,
    pub playlist: Vec<SoundPlaylistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundPlaylistContainer {
    pub id: Id,
    pub node: AudioNode,
    pub playback_setting: SoundPlaylistPlaybackSetting,
    pub child: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundSwitchPlaybackSetting {
    pub initial_delay: RandomizableValue<f32>,
    pub switcher: AudioSwitcherSetting,
    pub mode: AudioPlayMode,
    pub object_assign: Vec<SwitchObjectAssignItem>,
    pub object_attribute: Vec<SwitchObjectAttributeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundSwitchContainer {
    pub id: Id,
    pub node: AudioNode,
    pub playback_setting: SoundSwitchPlaybackSetting,
    pub child: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundBlendPlaybackSetting {
    pub initial_delay: RandomizableValue<f32>,
    pub track: Vec<BlendTrack>,
    pub mode: AudioPlayMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundBlendContainer {
    pub id: Id,
    pub node: AudioNode,
    pub playback_setting: SoundBlendPlaybackSetting,
    pub child: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorMixer {
    pub id: Id,
    pub node: AudioNode,
    pub child: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicMidiOverride {
    pub setting: MusicMIDISetting,
    pub override_target: bool,
    pub override_clip_tempo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrackPlaybackSetting {
    pub clip: MusicTrackClip,
    pub kind: MusicTrackTrackType,
    pub switcher: AudioSwitcherSetting,
    pub transition: MusicTrackTransitionSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicTrack {
    pub id: Id,
    pub node: AudioNode,
    pub midi: MusicMidiOverride,
    pub source: Vec<AudioSourceSetting>,
    pub playback_setting: MusicTrackPlaybackSetting,
    pub stream: MusicTrackStream,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSegmentPlaybackSetting {
    pub speed: f32,
    pub duration: f64,
    pub cue: MusicSegmentCue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSegment {
    pub id: Id,
    pub node: AudioNode,
    pub midi: MusicMidiOverride,
    pub playback_setting: MusicSegmentPlaybackSetting,
    pub child: Vec<Id>,
    pub time_setting: AudioTimeSetting,
    pub override_time_setting: bool,
    pub stinger: MusicStingerSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicPlaylistPlaybackSetting {
    pub speed: f32,
    pub playlist: Vec<MusicPlaylistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicPlaylistContainer {
    pub id: Id,
    pub node: AudioNode,
    pub midi: MusicMidiOverride,
    pub playback_setting: MusicPlaylistPlaybackSetting,
    pub child: Vec<Id>,
    pub time_setting: AudioTimeSetting,
    pub override_time_setting: bool,
    pub stinger: MusicStingerSetting,
    pub transition: MusicTransitionSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSwitchPlaybackSetting {
    pub speed: f32,
    pub switcher: AudioSwitcherSetting,
    pub continue_playing_on_switch_change: bool,
    pub association: AudioAssociationSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicSwitchContainer {
    pub id: Id,
    pub node: AudioNode,
    pub midi: MusicMidiOverride,
    pub playback_setting: MusicSwitchPlaybackSetting,
    pub child: Vec<Id>,
    pub time_setting: AudioTimeSetting,
    pub override_time_setting: bool,
    pub stinger: MusicStingerSetting,
    pub transition: MusicTransitionSetting,
}

/// Tagged union over every HIRC object kind.  A tag with no entry in the
/// dispatch table is preserved raw so the bank still round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HierarchyObject {
    StatefulPropertySetting(StatefulPropertySetting),
    Sound(Sound),
    EventAction(EventAction),
    Event(Event),
    SoundPlaylistContainer(SoundPlaylistContainer),
    SoundSwitchContainer(SoundSwitchContainer),
    ActorMixer(ActorMixer),
    AudioBus(AudioBus),
    SoundBlendContainer(SoundBlendContainer),
    MusicSegment(MusicSegment),
    MusicTrack(MusicTrack),
    MusicSwitchContainer(MusicSwitchContainer),
    MusicPlaylistContainer(MusicPlaylistContainer),
    Attenuation(Attenuation),
    DialogueEvent(DialogueEvent),
    Effect(Effect),
    Source(Effect),
    AuxiliaryAudioBus(AudioBus),
    LowFrequencyOscillatorModulator(LowFrequencyOscillatorModulator),
    EnvelopeModulator(EnvelopeModulator),
    AudioDevice(AudioDevice),
    TimeModulator(TimeModulator),
    Unknown { kind: u8, data: Vec<u8> },
}

impl Default for HierarchyObject {
    fn default() -> Self {
        HierarchyObject::Unknown {
            kind: 0,
            data: Vec::new(),
        }
    }
}

// ── Top-level aggregate ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankHeader {
    pub id: Id,
    pub language: Id,
    /// Trailing BKHD bytes past the known fields, preserved verbatim.
    pub expand: Vec<u8>,
}

/// One DIDX/DATA record.  Id zero is the "no embedded media" sentinel and
/// carries no bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: Id,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlugInItem {
    pub id: Id,
    pub library: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstructionCurve {
    pub enable: bool,
    pub mode: ObstructionCurveMode,
    pub point: Vec<GraphPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentCategory {
    pub volume: ObstructionCurve,
    pub low_pass_filter: ObstructionCurve,
    pub high_pass_filter: ObstructionCurve,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSetting {
    pub obstruction: EnvironmentCategory,
    pub occlusion: EnvironmentCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// `Some` iff the bank carries an INIT chunk.
    pub plug_in: Option<Vec<PlugInItem>>,
    pub voice_filter_behavior: VoiceFilterBehavior,
    pub volume_threshold: f32,
    pub maximum_voice_instance: u16,
    pub environment: Option<EnvironmentSetting>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: Id,
    pub to: Id,
    pub time: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateGroup {
    pub id: Id,
    pub default_transition: u32,
    pub custom_transition: Vec<StateTransition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchGroup {
    pub id: Id,
    pub parameter_id: Id,
    pub parameter_category: ParameterCategory,
    pub point: Vec<GraphPointId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameParameter {
    pub id: Id,
    pub range_default: f32,
    pub interpolation_mode: GameParameterInterpolationMode,
    pub interpolation_attack: f32,
    pub interpolation_release: f32,
    pub bind_to_built_in_parameter: BuiltInParameter,
}

/// Extra id-keyed curve table appearing in STMG from version 140.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterCurveTable {
    pub id: Id,
    pub u1: f32,
    pub u2: f32,
    pub u3: f32,
    pub u4: f32,
    pub u5: f32,
    pub u6: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSynchronization {
    pub state_group: Vec<StateGroup>,
    pub switch_group: Vec<SwitchGroup>,
    pub game_parameter: Vec<GameParameter>,
    pub u1: Vec<ParameterCurveTable>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundBankReference {
    pub id: Id,
    pub name: String,
}

/// The decoded SoundBank.  `Option` fields mirror chunk presence so the
/// encoder reproduces the original chunk sequence exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundBank {
    pub header: BankHeader,
    pub media: Option<Vec<MediaEntry>>,
    pub setting: Option<Setting>,
    pub game_synchronization: Option<GameSynchronization>,
    pub hierarchy: Option<Vec<HierarchyObject>>,
    pub reference: Option<Vec<SoundBankReference>>,
}
