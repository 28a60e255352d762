//! Static catalog of guided activities.
//!
//! Each descriptor pairs a session id with its total duration and display
//! content. The timer engine only reads the numeric duration; titles and
//! instruction lines exist for the presentation layer, in both supported
//! display languages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meditation,
    Breathing,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Meditation => "meditation",
            Category::Breathing => "breathing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Th,
}

/// A piece of display text in every supported language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub th: String,
}

impl Localized {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Th => &self.th,
        }
    }
}

/// Static metadata for one timed guided activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub id: String,
    pub category: Category,
    /// Total duration in seconds. Always positive for catalog entries.
    pub total_secs: u64,
    pub title: Localized,
    /// Instruction lines shown during the session, in display order.
    pub instructions: Vec<Localized>,
}

/// Session id to descriptor lookup.
///
/// "Descriptor not found" is the caller's problem to surface before a timer
/// is ever constructed; the engine assumes an already-resolved descriptor.
#[derive(Debug, Clone)]
pub struct Registry {
    sessions: Vec<SessionDescriptor>,
}

fn loc(en: &str, th: &str) -> Localized {
    Localized {
        en: en.into(),
        th: th.into(),
    }
}

impl Registry {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            sessions: vec![
                SessionDescriptor {
                    id: "mindfulness-5".into(),
                    category: Category::Meditation,
                    total_secs: 300,
                    title: loc("Mindful Awareness", "สติในปัจจุบัน"),
                    instructions: vec![
                        loc("Sit comfortably", "นั่งสบาย ๆ"),
                        loc("Close your eyes gently", "หลับตาเบา ๆ"),
                        loc("Notice your breath", "สังเกตลมหายใจ"),
                        loc("Let thoughts pass", "ปล่อยวางความคิด"),
                    ],
                },
                SessionDescriptor {
                    id: "stress-relief-10".into(),
                    category: Category::Meditation,
                    total_secs: 600,
                    title: loc("Stress Relief", "บรรเทาความเครียด"),
                    instructions: vec![
                        loc("Breathe deeply", "หายใจลึก ๆ"),
                        loc("Relax your muscles", "ผ่อนคลายกล้ามเนื้อ"),
                        loc("Release tension", "ปล่อยความตึงเครียด"),
                        loc("Feel peaceful", "รู้สึกสงบสุข"),
                    ],
                },
                SessionDescriptor {
                    id: "box-breathing".into(),
                    category: Category::Breathing,
                    total_secs: 300,
                    title: loc("Box Breathing", "การหายใจแบบกล่อง"),
                    instructions: vec![
                        loc("Inhale for 4 counts", "หายใจเข้า 4 จังหวะ"),
                        loc("Hold for 4 counts", "กลั้นหายใจ 4 จังหวะ"),
                        loc("Exhale for 4 counts", "หายใจออก 4 จังหวะ"),
                        loc("Hold for 4 counts", "พัก 4 จังหวะ"),
                    ],
                },
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&SessionDescriptor> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn sessions(&self) -> &[SessionDescriptor] {
        &self.sessions
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
