//! `[I/O]` and `[Link]` key parsing.
//!
//! `"Input12Number="` → `IoKey { section: Input, index: 12, kind: Number }`.

use core::fmt;

use super::device::IoSection;

/// Kind of an `[I/O]` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoKeyKind {
    /// Polarity of slot `index`.
    Logic,
    /// Device at slot `index`.
    Type,
    /// Slot of device `index`.
    Number,
}

impl IoKeyKind {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Logic => "Logic",
            Self::Type => "Type",
            Self::Number => "Number",
        }
    }
}

/// Parsed `[I/O]` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IoKey {
    pub section: IoSection,
    pub index: i32,
    pub kind: IoKeyKind,
}

impl IoKey {
    pub const fn new(section: IoSection, index: i32, kind: IoKeyKind) -> Self {
        Self {
            section,
            index,
            kind,
        }
    }

    /// `<Section><slot>Type=`.
    pub const fn slot_type(section: IoSection, slot: i32) -> Self {
        Self::new(section, slot, IoKeyKind::Type)
    }

    /// `<Section><device>Number=`.
    pub const fn device_number(section: IoSection, device: i32) -> Self {
        Self::new(section, device, IoKeyKind::Number)
    }

    /// Parse a key with or without its trailing `=`.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.strip_suffix('=').unwrap_or(key);
        let (section, rest) = if let Some(rest) = key.strip_prefix(IoSection::Input.prefix()) {
            (IoSection::Input, rest)
        } else if let Some(rest) = key.strip_prefix(IoSection::Output.prefix()) {
            (IoSection::Output, rest)
        } else {
            return None;
        };
        let (index, suffix) = split_index(rest)?;
        let kind = [IoKeyKind::Logic, IoKeyKind::Type, IoKeyKind::Number]
            .into_iter()
            .find(|k| k.suffix() == suffix)?;
        Some(Self::new(section, index, kind))
    }
}

impl fmt::Display for IoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}=", self.section, self.index, self.kind.suffix())
    }
}

/// Parsed `[Link]` key: `Port<n>Type=` or `Port<n>Number=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKey {
    Type(i32),
    Number(i32),
}

impl PortKey {
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.strip_suffix('=').unwrap_or(key);
        let (index, suffix) = split_index(key.strip_prefix("Port")?)?;
        match suffix {
            "Type" => Some(Self::Type(index)),
            "Number" => Some(Self::Number(index)),
            _ => None,
        }
    }
}

impl fmt::Display for PortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(n) => write!(f, "Port{n}Type="),
            Self::Number(n) => write!(f, "Port{n}Number="),
        }
    }
}

/// Split leading digits from a suffix: `"12Type"` → `(12, "Type")`.
fn split_index(s: &str) -> Option<(i32, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let index = s[..digits].parse().ok()?;
    Some((index, &s[digits..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_io_keys() {
        assert_eq!(
            IoKey::parse("Input12Number="),
            Some(IoKey::device_number(IoSection::Input, 12))
        );
        assert_eq!(
            IoKey::parse("Output24Type"),
            Some(IoKey::slot_type(IoSection::Output, 24))
        );
        assert_eq!(
            IoKey::parse("Input3Logic="),
            Some(IoKey::new(IoSection::Input, 3, IoKeyKind::Logic))
        );
    }

    #[test]
    fn reject_foreign_keys() {
        assert_eq!(IoKey::parse("InputType="), None);
        assert_eq!(IoKey::parse("Input3Mode="), None);
        assert_eq!(IoKey::parse("DriveType="), None);
    }

    #[test]
    fn display_round_trips() {
        let key = IoKey::slot_type(IoSection::Input, 49);
        assert_eq!(key.to_string(), "Input49Type=");
        assert_eq!(IoKey::parse(&key.to_string()), Some(key));
    }

    #[test]
    fn parse_port_keys() {
        assert_eq!(PortKey::parse("Port3Type="), Some(PortKey::Type(3)));
        assert_eq!(PortKey::parse("Port4Number="), Some(PortKey::Number(4)));
        assert_eq!(PortKey::parse("Port4Baud="), None);
        assert_eq!(PortKey::Number(4).to_string(), "Port4Number=");
    }
}
