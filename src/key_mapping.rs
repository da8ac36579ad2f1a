use std::{
    collections::{BTreeMap, HashSet},
    str::FromStr,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct KeyMapping {
    map: Vec<(Chord, KeyAction)>,
}

impl Default for KeyMapping {
    fn default() -> Self {
        use egui::Key::*;
        use KeyAction::*;

        #[rustfmt::skip]
        macro_rules! key {
            (@inner) => { Chord::builder() };
            ($ident:ident) => { key!(@inner).key($ident) };
            (ctrl $ident:ident) => { key!(@inner).ctrl().key($ident) };
            (cmd $ident:ident) => { key!(@inner).cmd().key($ident) };
        }

        #[rustfmt::skip]
        const DEFAULT: [(Chord, KeyAction); 6] = [
            (key!(Space), Spin),
            (key!(ctrl Enter), Spin),
            (key!(ctrl K), FocusInput),
            (key!(cmd K), FocusInput),
            (key!(F12), ToggleLogs),
            (key!(ctrl Delete), ClearEntries),
        ];

        Self {
            map: DEFAULT.to_vec(),
        }
    }
}

impl KeyMapping {
    pub fn iter(&self) -> impl Iterator<Item = &(Chord, KeyAction)> + ExactSizeIterator + '_ {
        self.map.iter()
    }

    pub fn find(&self, key: egui::Key, modifiers: egui::Modifiers) -> Option<KeyAction> {
        let chord = Chord {
            ctrl: modifiers.ctrl,
            alt: modifiers.alt,
            shift: modifiers.shift,
            cmd: modifiers.mac_cmd,
            key,
        };

        self.map
            .iter()
            .find_map(|&(key, action)| (key == chord).then_some(action))
    }

    pub fn chords_for(&self, action: KeyAction) -> impl Iterator<Item = Chord> + '_ {
        self.map
            .iter()
            .filter_map(move |&(chord, a)| (a == action).then_some(chord))
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeyMapping {
    type Error = String;

    fn try_from(input: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut map = vec![];
        let mut seen = HashSet::<Chord>::new();

        for (action, chords) in input {
            let action: KeyAction = action.parse()?;
            for chord in chords {
                let chord: Chord = chord.parse()?;
                if !seen.insert(chord) {
                    return Err(format!(
                        "duplicate entry found: {} -> {}",
                        chord.display(),
                        action.display(),
                    ));
                }
                map.push((chord, action));
            }
        }

        Ok(Self { map })
    }
}

impl From<KeyMapping> for BTreeMap<String, Vec<String>> {
    fn from(mapping: KeyMapping) -> Self {
        mapping
            .map
            .iter()
            .fold(BTreeMap::new(), |mut map, (chord, action)| {
                map.entry(action.display().to_string())
                    .or_insert_with(Vec::new)
                    .push(chord.display());
                map
            })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Chord {
    ctrl: bool,
    alt: bool,
    shift: bool,
    cmd: bool,
    key: egui::Key,
}

impl Chord {
    const fn builder() -> ChordBuilder {
        ChordBuilder {
            ctrl: false,
            alt: false,
            shift: false,
            cmd: false,
        }
    }

    pub const fn key(&self) -> egui::Key {
        self.key
    }

    pub fn display(&self) -> String {
        let mut buf = String::new();

        for repr in [
            (self.cmd, "Cmd"),
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
        ]
        .into_iter()
        .filter_map(|(c, key)| c.then_some(key))
        {
            buf.push_str(repr);
            buf.push('+');
        }

        buf.push_str(KeyHelper::stringify_key(&self.key));
        buf
    }
}

struct ChordBuilder {
    ctrl: bool,
    alt: bool,
    shift: bool,
    cmd: bool,
}

impl ChordBuilder {
    const fn ctrl(self) -> Self {
        Self { ctrl: true, ..self }
    }

    const fn cmd(self) -> Self {
        Self { cmd: true, ..self }
    }

    const fn key(self, key: egui::Key) -> Chord {
        Chord {
            ctrl: self.ctrl,
            alt: self.alt,
            shift: self.shift,
            cmd: self.cmd,
            key,
        }
    }
}

impl FromStr for Chord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mut ctrl, mut alt, mut shift, mut cmd) = <_>::default();

        let mut parts = s.split('+').map(str::trim).collect::<Vec<_>>();
        let key = parts.pop().filter(|k| !k.is_empty());

        for part in parts {
            *match part {
                s if s.eq_ignore_ascii_case("cmd") => &mut cmd,
                s if s.eq_ignore_ascii_case("ctrl") => &mut ctrl,
                s if s.eq_ignore_ascii_case("shift") => &mut shift,
                s if s.eq_ignore_ascii_case("alt") => &mut alt,
                s => return Err(format!("unknown modifier: '{s}'")),
            } = true;
        }

        let key = key.ok_or_else(|| format!("missing key: '{s}'"))?;
        KeyHelper::parse_key(key)
            .map(|key| Self {
                ctrl,
                alt,
                shift,
                cmd,
                key,
            })
            .ok_or_else(|| format!("unknown key: {key}"))
    }
}

pub struct KeyHelper;
impl KeyHelper {
    pub const fn keys() -> &'static [(&'static str, egui::Key)] {
        use egui::Key::*;
        #[rustfmt::skip]
        const KEYS: &[(&str, egui::Key)] = &[
            ("Escape", Escape), ("Tab", Tab), ("Backspace", Backspace), ("Enter", Enter), ("Space", Space),
            ("Insert", Insert), ("Delete", Delete), ("Home", Home), ("End", End),
            ("0", Num0), ("1", Num1), ("2", Num2), ("3", Num3), ("4", Num4), ("5", Num5), ("6", Num6), ("7", Num7), ("8", Num8), ("9", Num9),
            ("A", A), ("B", B), ("C", C), ("D", D), ("E", E), ("F", F), ("G", G), ("H", H), ("I", I), ("J", J), ("K", K), ("L", L), ("M", M),
            ("N", N), ("O", O), ("P", P), ("Q", Q), ("R", R), ("S", S), ("T", T), ("U", U), ("V", V), ("W", W), ("X", X), ("Y", Y), ("Z", Z),
            ("F1", F1), ("F2", F2), ("F3", F3), ("F4", F4), ("F5", F5), ("F6", F6), ("F7", F7), ("F8", F8), ("F9", F9), ("F10", F10), ("F11", F11), ("F12", F12),
        ];
        KEYS
    }

    pub fn parse_key(input: &str) -> Option<egui::Key> {
        Self::keys()
            .iter()
            .find_map(|&(name, key)| (name.eq_ignore_ascii_case(input)).then_some(key))
    }

    pub fn stringify_key(key: &egui::Key) -> &'static str {
        Self::keys()
            .iter()
            .find_map(|(name, k)| (k == key).then_some(*name))
            .unwrap_or("?")
    }
}

macro_rules! define_key {
    ($($ident:ident => $help:literal)*) => {
        #[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
        pub enum KeyAction {
            $($ident,)*
        }

        impl FromStr for KeyAction {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = match s {
                    $(stringify!($ident) => Self::$ident,)*
                    s => return Err(format!("unknown action: '{s}'")),
                };
                Ok(key)
            }
        }

        impl KeyAction {
            pub const fn display(&self) -> &'static str {
                match self {
                    $(Self::$ident => stringify!($ident),)*
                }
            }

            pub const fn help(&self) -> &'static str {
                match self {
                    $(Self::$ident => $help,)*
                }
            }
        }
    };
}

define_key! {
    Spin => "Spins the wheel"
    FocusInput => "Moves focus to the name input"
    ToggleLogs => "Toggles the log window"
    ClearEntries => "Removes every entry from the wheel"
}

#[cfg(test)]
mod tests {
    use egui::{Key, Modifiers};

    use super::*;

    #[test]
    fn parse_chords() {
        let chord: Chord = "ctrl+shift+K".parse().unwrap();
        assert_eq!(chord.display(), "Ctrl+Shift+K");
        assert_eq!(chord.key(), Key::K);

        assert_eq!("space".parse::<Chord>().unwrap().display(), "Space");
        assert!("hyper+K".parse::<Chord>().is_err());
        assert!("ctrl+".parse::<Chord>().is_err());
        assert!("ctrl+PrintScreen".parse::<Chord>().is_err());
    }

    #[test]
    fn defaults() {
        let mapping = KeyMapping::default();
        assert_eq!(
            mapping.find(Key::Space, Modifiers::default()),
            Some(KeyAction::Spin)
        );
        assert_eq!(
            mapping.find(
                Key::K,
                Modifiers {
                    ctrl: true,
                    ..Modifiers::default()
                }
            ),
            Some(KeyAction::FocusInput)
        );
        assert_eq!(mapping.find(Key::K, Modifiers::default()), None);
        assert_eq!(mapping.chords_for(KeyAction::FocusInput).count(), 2);
    }

    #[test]
    fn json_round_trip() {
        let mapping = KeyMapping::default();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(serde_json::from_str::<KeyMapping>(&json).unwrap().iter().len(), 6);

        let dupe = r#"{ "Spin": ["Space"], "ToggleLogs": ["Space"] }"#;
        assert!(serde_json::from_str::<KeyMapping>(dupe).is_err());

        let unknown = r#"{ "Dance": ["F1"] }"#;
        assert!(serde_json::from_str::<KeyMapping>(unknown).is_err());
    }
}
