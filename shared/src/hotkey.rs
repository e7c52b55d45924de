// Global hotkey description: "Ctrl+Alt+H" style strings <-> modifier bits + virtual key

use crate::error::HotkeyError;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Modifier bits. Values match the Win32 `MOD_*` flags so they pass straight to `RegisterHotKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const ALT: Self = Self(0x0001);
    pub const CONTROL: Self = Self(0x0002);
    pub const SHIFT: Self = Self(0x0004);
    pub const WIN: Self = Self(0x0008);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// Virtual-key codes for the named keys we accept
const NAMED_KEYS: &[(&str, u32)] = &[
    ("Space", 0x20),
    ("PageUp", 0x21),
    ("PageDown", 0x22),
    ("End", 0x23),
    ("Home", 0x24),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("Insert", 0x2D),
    ("Delete", 0x2E),
];

/// A modifier combination plus one virtual key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key: u32,
}

impl Hotkey {
    /// Ctrl+Alt+H
    pub const DEFAULT: Hotkey = Hotkey {
        modifiers: Modifiers(Modifiers::CONTROL.0 | Modifiers::ALT.0),
        key: 'H' as u32,
    };

    pub const fn new(modifiers: Modifiers, key: u32) -> Self {
        Self { modifiers, key }
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn key_name(key: u32) -> String {
    match key {
        0x30..=0x39 | 0x41..=0x5A => char::from(key as u8).to_string(),
        0x70..=0x7B => format!("F{}", key - 0x6F),
        _ => NAMED_KEYS
            .iter()
            .find(|(_, vk)| *vk == key)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| format!("0x{key:02X}")),
    }
}

fn parse_key(part: &str) -> Option<u32> {
    let upper = part.to_ascii_uppercase();
    let mut chars = upper.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_alphanumeric().then_some(c as u32);
    }
    if let Some(n) = upper.strip_prefix('F').and_then(|s| s.parse::<u32>().ok()) {
        return (1..=12).contains(&n).then_some(0x6F + n);
    }
    NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(part))
        .map(|(_, vk)| *vk)
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::WIN, "Win"),
        ];
        for (modifier, label) in labels {
            if self.modifiers.contains(modifier) {
                write!(f, "{label}+")?;
            }
        }
        f.write_str(&key_name(self.key))
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    /// Parses `Mod+Mod+Key`. Exactly one key and at least one modifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HotkeyError::Parse(s.to_string());
        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            let modifier = match part.to_ascii_uppercase().as_str() {
                "CTRL" | "CONTROL" => Some(Modifiers::CONTROL),
                "ALT" => Some(Modifiers::ALT),
                "SHIFT" => Some(Modifiers::SHIFT),
                "WIN" | "WINDOWS" | "SUPER" => Some(Modifiers::WIN),
                _ => None,
            };
            match modifier {
                Some(m) => modifiers = modifiers | m,
                None if key.is_none() => key = Some(parse_key(part).ok_or_else(invalid)?),
                None => return Err(invalid()),
            }
        }

        match key {
            Some(key) if !modifiers.is_empty() => Ok(Hotkey::new(modifiers, key)),
            _ => Err(invalid()),
        }
    }
}
