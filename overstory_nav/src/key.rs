// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keys relevant to list navigation.

/// A key press as seen by list navigation.
///
/// Keys that navigation does not act on are still distinguished where the
/// distinction matters to hosts (Tab and the modifiers must keep their default
/// browser behavior).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Escape.
    Escape,
    /// Return / Enter.
    Enter,
    /// Tab.
    Tab,
    /// Shift (on its own).
    Shift,
    /// Control (on its own).
    Control,
    /// Meta / Command / Windows (on its own).
    Meta,
    /// Alt / Option (on its own).
    Alt,
    /// Anything else, such as a printable character.
    Other,
}

/// Direction a key moves the selection in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Travel {
    /// Toward higher indices.
    Forward,
    /// Toward lower indices.
    Backward,
}

impl Key {
    /// Decodes a legacy DOM `keyCode`.
    #[must_use]
    pub fn from_key_code(code: u32) -> Self {
        match code {
            9 => Self::Tab,
            13 => Self::Enter,
            16 => Self::Shift,
            17 => Self::Control,
            18 => Self::Alt,
            27 => Self::Escape,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            91 | 92 | 93 | 224 => Self::Meta,
            _ => Self::Other,
        }
    }

    /// Decodes a DOM `KeyboardEvent.key` name, including legacy aliases.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Escape" | "Esc" => Self::Escape,
            "Enter" | "Return" => Self::Enter,
            "Tab" => Self::Tab,
            "Shift" => Self::Shift,
            "Control" => Self::Control,
            "Meta" | "OS" => Self::Meta,
            "Alt" | "AltGraph" => Self::Alt,
            _ => Self::Other,
        }
    }

    /// Returns `true` for keys that are only ever modifiers.
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Shift | Self::Control | Self::Meta | Self::Alt)
    }

    /// Returns `true` for keys that move the selection.
    #[must_use]
    pub const fn is_movement(self) -> bool {
        self.travel().is_some()
    }

    /// Direction this key moves the selection, if it moves it at all.
    ///
    /// Home scans forward from the first entry and End backward from the last,
    /// which is the direction used to skip unselectable entries.
    #[must_use]
    pub const fn travel(self) -> Option<Travel> {
        match self {
            Self::Down | Self::Right | Self::PageDown | Self::Home => Some(Travel::Forward),
            Self::Up | Self::Left | Self::PageUp | Self::End => Some(Travel::Backward),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes_and_names_agree() {
        let pairs = [
            (38, "ArrowUp"),
            (40, "ArrowDown"),
            (37, "ArrowLeft"),
            (39, "ArrowRight"),
            (36, "Home"),
            (35, "End"),
            (33, "PageUp"),
            (34, "PageDown"),
            (27, "Escape"),
            (13, "Enter"),
            (9, "Tab"),
            (16, "Shift"),
            (17, "Control"),
            (18, "Alt"),
            (91, "Meta"),
        ];
        for (code, name) in pairs {
            assert_eq!(Key::from_key_code(code), Key::from_key_name(name), "{name}");
        }
        assert_eq!(Key::from_key_code(65), Key::Other);
        assert_eq!(Key::from_key_name("a"), Key::Other);
    }

    #[test]
    fn modifiers_do_not_travel() {
        for key in [Key::Shift, Key::Control, Key::Meta, Key::Alt] {
            assert!(key.is_modifier());
            assert!(!key.is_movement());
        }
        assert_eq!(Key::Home.travel(), Some(Travel::Forward));
        assert_eq!(Key::End.travel(), Some(Travel::Backward));
        assert_eq!(Key::Tab.travel(), None);
        assert_eq!(Key::Enter.travel(), None);
    }
}
