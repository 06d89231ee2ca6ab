//! Logical input identifiers and the per-frame flag array
//!
//! A logical input is one abstract game button, independent of whether a
//! physical key, an overlay zone, the wheel, or a tap produced it. The flag
//! array is the subsystem's sole output: it is zeroed once per process tick
//! and every touch source ORs into it.

/// Number of logical inputs
pub const INPUT_COUNT: usize = 26;

/// Platform-independent logical game buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LogicalInput {
    // Movement
    Left = 0,
    Right,
    Up,
    Down,

    // Actions
    Jump,
    Fire,
    PrevWeapon,
    NextWeapon,

    // Menus
    Inventory,
    MapSystem,
    Escape,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Debug
    FreezeFrame,
    FrameAdvance,
    DebugFly,
}

impl LogicalInput {
    pub const COUNT: usize = INPUT_COUNT;

    /// Every logical input in flag-array order
    pub const ALL: [LogicalInput; INPUT_COUNT] = [
        LogicalInput::Left,
        LogicalInput::Right,
        LogicalInput::Up,
        LogicalInput::Down,
        LogicalInput::Jump,
        LogicalInput::Fire,
        LogicalInput::PrevWeapon,
        LogicalInput::NextWeapon,
        LogicalInput::Inventory,
        LogicalInput::MapSystem,
        LogicalInput::Escape,
        LogicalInput::F1,
        LogicalInput::F2,
        LogicalInput::F3,
        LogicalInput::F4,
        LogicalInput::F5,
        LogicalInput::F6,
        LogicalInput::F7,
        LogicalInput::F8,
        LogicalInput::F9,
        LogicalInput::F10,
        LogicalInput::F11,
        LogicalInput::F12,
        LogicalInput::FreezeFrame,
        LogicalInput::FrameAdvance,
        LogicalInput::DebugFly,
    ];

    /// Position in the flag array
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Fixed-size boolean array of logical input state for one frame
///
/// Read by the rest of the input system exactly as if set by physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFlags {
    flags: [bool; INPUT_COUNT],
}

impl InputFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every flag; called exactly once per process tick
    pub fn clear(&mut self) {
        self.flags = [false; INPUT_COUNT];
    }

    pub fn set(&mut self, input: LogicalInput) {
        self.flags[input.index()] = true;
    }

    pub fn is_set(&self, input: LogicalInput) -> bool {
        self.flags[input.index()]
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|&f| f)
    }

    /// Inputs currently set, in flag-array order
    pub fn pressed(&self) -> impl Iterator<Item = LogicalInput> + '_ {
        LogicalInput::ALL
            .iter()
            .copied()
            .filter(move |input| self.flags[input.index()])
    }

    /// The raw flag array, indexed by [`LogicalInput::index`]
    pub fn as_array(&self) -> &[bool; INPUT_COUNT] {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, input) in LogicalInput::ALL.iter().enumerate() {
            assert_eq!(input.index(), i);
            assert_eq!(LogicalInput::from_index(i), Some(*input));
        }
        assert_eq!(LogicalInput::from_index(INPUT_COUNT), None);
    }

    #[test]
    fn test_flags_set_and_clear() {
        let mut flags = InputFlags::new();
        assert!(!flags.any());

        flags.set(LogicalInput::Jump);
        flags.set(LogicalInput::Left);
        assert!(flags.is_set(LogicalInput::Jump));
        assert!(flags.is_set(LogicalInput::Left));
        assert!(!flags.is_set(LogicalInput::Fire));

        let pressed: Vec<_> = flags.pressed().collect();
        assert_eq!(pressed, vec![LogicalInput::Left, LogicalInput::Jump]);

        flags.clear();
        assert!(!flags.any());
    }
}
