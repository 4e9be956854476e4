//! Built-in image/sound pairs offered by the menu.

pub const MENU_BACKGROUND: &str = "assets/FNAF_static.gif";
pub const MENU_MUSIC: &str = "assets/audios/menu.wav";
pub const SELECT_SOUND: &str = "assets/audios/select.wav";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub image: &'static str,
    pub sound: &'static str,
}

pub const PRESETS: [Preset; 4] = [
    Preset {
        name: "Chica",
        image: "assets/video_jumpscare/Withered_Chica.gif",
        sound: "assets/audios/jumpscare_fnaf2.wav",
    },
    Preset {
        name: "Rat",
        image: "assets/video_jumpscare/Monster_Rat.gif",
        sound: "assets/audios/rat_sound.wav",
    },
    Preset {
        name: "Mangle",
        image: "assets/video_jumpscare/Mangle.gif",
        sound: "assets/audios/jumpscare_fnaf2.wav",
    },
    Preset {
        name: "Vinnie",
        image: "assets/video_jumpscare/Vinnie.gif",
        sound: "assets/audios/Vinnie.wav",
    },
];

/// Used when the legacy `--jumpscare` flag is given without paths.
pub fn default_preset() -> &'static Preset {
    &PRESETS[0]
}

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("mangle").map(|p| p.name), Some("Mangle"));
        assert_eq!(find(" RAT ").map(|p| p.name), Some("Rat"));
        assert!(find("foxy").is_none());
    }

    #[test]
    fn default_is_chica() {
        assert_eq!(default_preset().name, "Chica");
    }
}
