//! The fixed voice-effect catalog.
//!
//! Each effect is an ordered chain of ffmpeg audio filters. The catalog is
//! immutable and defined at compile time; menu rendering iterates it in
//! declared order so the button layout is deterministic.

use crate::error::{BotError, Result};

/// A single ffmpeg filter stage: filter name plus its arguments, rendered as
/// `name=arg:arg` (or just `name` for argument-less filters like `areverse`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStage {
    pub filter: &'static str,
    pub args: &'static [&'static str],
}

impl FilterStage {
    fn render(&self) -> String {
        if self.args.is_empty() {
            self.filter.to_string()
        } else {
            format!("{}={}", self.filter, self.args.join(":"))
        }
    }
}

/// A named, parameterized audio filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    /// Short stable key carried in callback payloads. Must not contain `:`.
    pub key: &'static str,
    /// Human-readable button label.
    pub display_name: &'static str,
    pub stages: &'static [FilterStage],
}

impl Effect {
    /// Render the full `-af` filter graph, stages in declared order.
    pub fn filter_graph(&self) -> String {
        self.stages
            .iter()
            .map(FilterStage::render)
            .collect::<Vec<_>>()
            .join(",")
    }
}

const fn stage(filter: &'static str, args: &'static [&'static str]) -> FilterStage {
    FilterStage { filter, args }
}

/// The six built-in effects, in menu order. Filter parameters are exact and
/// intentional; changing them changes the sound.
static EFFECTS: &[Effect] = &[
    Effect {
        key: "robot",
        display_name: "Робот",
        stages: &[
            stage("asetrate", &["44100*0.8"]),
            stage("atempo", &["1/0.8"]),
            stage("vibrato", &["f=20", "d=0.5"]),
        ],
    },
    Effect {
        key: "echo",
        display_name: "Эхо",
        stages: &[stage("aecho", &["0.8", "0.9", "1000", "0.3"])],
    },
    Effect {
        key: "slow",
        display_name: "Замедление",
        stages: &[stage("atempo", &["0.5"])],
    },
    Effect {
        key: "fast",
        display_name: "Ускорение",
        stages: &[stage("atempo", &["2.0"])],
    },
    Effect {
        key: "reverse",
        display_name: "Обратное воспроизведение",
        stages: &[stage("areverse", &[])],
    },
    Effect {
        key: "autotune",
        display_name: "Автотюн",
        stages: &[
            stage("asetrate", &["44100*1.2"]),
            stage("atempo", &["1/1.2"]),
            stage("vibrato", &["f=5", "d=0.8"]),
            stage("aecho", &["0.6", "0.3", "500", "0.2"]),
        ],
    },
];

/// All effects in stable menu order. Never empty.
pub fn all() -> &'static [Effect] {
    EFFECTS
}

/// Look up an effect by key.
pub fn get(key: &str) -> Result<&'static Effect> {
    EFFECTS
        .iter()
        .find(|e| e.key == key)
        .ok_or_else(|| BotError::UnknownEffect(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_nonempty_and_ordered() {
        let keys: Vec<_> = all().iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec!["robot", "echo", "slow", "fast", "reverse", "autotune"]
        );
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = all().iter().map(|e| e.display_name).collect();
        assert_eq!(
            names,
            vec![
                "Робот",
                "Эхо",
                "Замедление",
                "Ускорение",
                "Обратное воспроизведение",
                "Автотюн"
            ]
        );
    }

    #[test]
    fn keys_are_colon_free() {
        for effect in all() {
            assert!(!effect.key.contains(':'), "key {:?}", effect.key);
        }
    }

    #[test]
    fn filter_graphs_match_expected_parameters() {
        assert_eq!(
            get("robot").unwrap().filter_graph(),
            "asetrate=44100*0.8,atempo=1/0.8,vibrato=f=20:d=0.5"
        );
        assert_eq!(get("echo").unwrap().filter_graph(), "aecho=0.8:0.9:1000:0.3");
        assert_eq!(get("slow").unwrap().filter_graph(), "atempo=0.5");
        assert_eq!(get("fast").unwrap().filter_graph(), "atempo=2.0");
        assert_eq!(get("reverse").unwrap().filter_graph(), "areverse");
        assert_eq!(
            get("autotune").unwrap().filter_graph(),
            "asetrate=44100*1.2,atempo=1/1.2,vibrato=f=5:d=0.8,aecho=0.6:0.3:500:0.2"
        );
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = get("chipmunk").unwrap_err();
        assert!(matches!(err, BotError::UnknownEffect(k) if k == "chipmunk"));
    }
}
