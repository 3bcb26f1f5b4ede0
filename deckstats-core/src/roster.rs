//! Player roster — nickname canonicalization and chart colours.
//!
//! The community spreadsheet refers to players by nickname ("Bdubs",
//! "Cub", ...). Series are keyed by the canonical channel name so the same
//! player never shows up as two lines.

use crate::domain::PlayerId;

/// An sRGB colour, independent of any rendering backend.
pub type Rgb = (u8, u8, u8);

struct Member {
    nickname: &'static str,
    name: &'static str,
    colour: Option<Rgb>,
}

const fn member(nickname: &'static str, name: &'static str, colour: Option<Rgb>) -> Member {
    Member {
        nickname,
        name,
        colour,
    }
}

static ROSTER: [Member; 25] = [
    member("Bdubs", "BdoubleO100", Some((0x66, 0x82, 0x2d))),
    member("Cub", "Cubfan135", Some((0x30, 0x86, 0xc8))),
    member("Doc", "Docm77", Some((0x22, 0x8b, 0x22))),
    member("Etho", "Ethoslab", Some((0x68, 0xfd, 0xf6))),
    member("False", "FalseSymmetry", Some((0xff, 0x69, 0xb4))),
    member("Gem", "GeminiTay", Some((0x00, 0xff, 0x7f))),
    member("Grian", "Grian", Some((0xdc, 0x14, 0x3c))),
    member("Hypno", "Hypnotizd", Some((0x00, 0x00, 0x00))),
    member("Jevin", "iJevin", Some((0x46, 0x9e, 0xc5))),
    member("Impulse", "impulseSV", Some((0xf1, 0xc9, 0x36))),
    member("Iskall", "iskall85", Some((0x9a, 0xcd, 0x32))),
    member("Joe", "JoeHills", Some((0x7c, 0xfc, 0x00))),
    member("Keralis", "Keralis", Some((0xa9, 0xa9, 0xa9))),
    member("Mumbo", "MumboJumbo", Some((0xef, 0x65, 0x62))),
    member("Pearl", "Pearl", Some((0xff, 0x45, 0x00))),
    member("Ren", "Rendog", Some((0x8b, 0x00, 0x24))),
    member("Scar", "Scar", Some((0xfe, 0x87, 0x05))),
    member("Stress", "Stress", Some((0xff, 0x00, 0xff))),
    member("Tango", "TangoTek", Some((0x00, 0xff, 0xff))),
    member("Beef", "VintageBeef", Some((0x56, 0x2d, 0x19))),
    member("Wels", "Welsknight", None),
    member("xB", "xBCrafted", Some((0x00, 0x8b, 0x8b))),
    member("X", "Xisuma", Some((0x7b, 0x68, 0xee))),
    member("Zed", "Zedaph", Some((0xff, 0x93, 0xbc))),
    member("Cleo", "ZombieCleo", Some((0x00, 0x8b, 0x8b))),
];

fn find(name: &str) -> Option<&'static Member> {
    let name = name.trim();
    ROSTER.iter().find(|m| {
        m.nickname.eq_ignore_ascii_case(name) || m.name.eq_ignore_ascii_case(name)
    })
}

/// Map a nickname or any-case full name to the canonical player id.
/// Unknown names pass through trimmed.
pub fn canonical_player(name: &str) -> PlayerId {
    match find(name) {
        Some(m) => PlayerId::from(m.name),
        None => PlayerId::from(name.trim()),
    }
}

pub fn is_rostered(name: &str) -> bool {
    find(name).is_some()
}

/// Chart colour for a player.
///
/// Rostered players keep their channel colour; everyone else gets a stable
/// colour derived from a hash of the name. Pure black is lifted so the line
/// stays visible on a dark background.
pub fn player_colour(player: &PlayerId) -> Rgb {
    let colour = find(player.as_str())
        .and_then(|m| m.colour)
        .unwrap_or_else(|| hashed_colour(player.as_str()));
    match colour {
        (0, 0, 0) => (0x70, 0x70, 0x70),
        c => c,
    }
}

fn hashed_colour(name: &str) -> Rgb {
    let hash = blake3::hash(name.as_bytes());
    let bytes = hash.as_bytes();
    // keep every channel above 64 so the line reads on a dark background
    let lift = |b: u8| 64 + b % 192;
    (lift(bytes[0]), lift(bytes[1]), lift(bytes[2]))
}
