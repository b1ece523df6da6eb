// Forest Sentinels — Input Events & Data Types

use crate::hal::PinId;

// ---------------------------------------------------------------------------
// Channel wiring
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSource {
    /// Resistor-ladder key sampled through the ADC.
    Analog(PinId),
    /// Dedicated GPIO with pull-up, active LOW.
    Digital(PinId),
    /// GPIO multiplexed with the SD/SPI bus.
    Shared(PinId),
}

impl ChannelSource {
    pub fn pin(&self) -> PinId {
        match *self {
            Self::Analog(pin) | Self::Digital(pin) | Self::Shared(pin) => pin,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Analog(_) => "ADC",
            Self::Digital(_) => "digital",
            Self::Shared(_) => "shared SD/SPI",
        }
    }
}

// ---------------------------------------------------------------------------
// Press Classification
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressType {
    #[default]
    None,
    Short,
    Long,
    Double,
}

impl PressType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Short => "SHORT",
            Self::Long => "LONG",
            Self::Double => "DOUBLE",
        }
    }
}

// ---------------------------------------------------------------------------
// Named Intents
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    PlayPause,
    Stop,
    Previous,
    Next,
    VolumeUp,
    VolumeDown,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Self::PlayPause,
        Self::Stop,
        Self::Previous,
        Self::Next,
        Self::VolumeUp,
        Self::VolumeDown,
    ];

    /// Channel index this intent is wired to.
    pub fn channel(&self) -> usize {
        match self {
            Self::PlayPause => 0,
            Self::Stop => 1,
            Self::Previous => 2,
            Self::Next => 3,
            Self::VolumeDown => 4,
            Self::VolumeUp => 5,
        }
    }

    pub fn for_channel(channel: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.channel() == channel)
    }
}

// ---------------------------------------------------------------------------
// Control Events — sent to the playback/volume/animation side via channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Short press on a channel bound to an intent.
    Intent(Intent),
    /// Long hold started on a channel (reported once per hold).
    Hold(usize),
    /// Two presses inside the double-press window.
    DoubleTap(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_map_to_distinct_channels() {
        for intent in Intent::ALL {
            assert_eq!(Intent::for_channel(intent.channel()), Some(intent));
        }
        assert_eq!(Intent::for_channel(6), None);
    }

    #[test]
    fn volume_keys_follow_board_order() {
        assert_eq!(Intent::VolumeDown.channel(), 4);
        assert_eq!(Intent::VolumeUp.channel(), 5);
    }
}
