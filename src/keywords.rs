use std::collections::HashMap;

use anyhow::{bail, Result};

/// The phrases the service can illustrate, paired with their GIF filenames.
/// Keys are stored lowercase; the transcript is lowercased before lookup.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("god question", "god_question.gif"),
    ("take care", "take_care.gif"),
    ("good afternoon", "good_afternoon.gif"),
    ("good morning", "good_morning.gif"),
    ("hello", "hello.gif"),
    ("i am fine", "i_am_fine.gif"),
    ("i am sorry", "i_am_sorry.gif"),
    ("i am tired", "i_am_tired.gif"),
    ("lets go for lunch", "lets_go_for_lunch.gif"),
    ("nice to meet you", "nice_to_meet_you.gif"),
    ("shall i help you", "shall_i_help_you.gif"),
    ("sign language interpreter", "sign_language_interpreter.gif"),
    ("sit down", "sit_down.gif"),
    ("stand up", "stand_up.gif"),
    ("what is todays date", "what_is_todays_date.gif"),
    ("what is your father do", "what_is_your_father_do.gif"),
    ("what is your name", "what_is_your_name.gif"),
    ("what are you doing", "what_are_you_doing.gif"),
];

/// Immutable phrase -> GIF filename table, built once at startup.
#[derive(Debug)]
pub struct KeywordTable {
    entries: HashMap<String, String>,
}

impl KeywordTable {
    /// Build a table from arbitrary entries. Keys are lowercased; a duplicate
    /// key or a single-letter key is rejected, so the phrase rule and the
    /// fingerspelling rule of [`resolve_gif`](Self::resolve_gif) can never
    /// both apply to the same transcript.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (phrase, gif) in entries {
            let phrase = phrase.into().to_lowercase();
            if is_single_letter(&phrase) {
                bail!("keyword {:?} collides with letter fingerspelling", phrase);
            }
            if map.insert(phrase.clone(), gif.into()).is_some() {
                bail!("duplicate keyword {:?}", phrase);
            }
        }
        Ok(Self { entries: map })
    }

    /// The built-in sign-language phrase table.
    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_ENTRIES.iter().copied())
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick at most one GIF filename for a transcript:
    /// an exact (case-insensitive, whitespace-significant) phrase match wins,
    /// a lone alphabetic character falls back to its fingerspelling GIF, and
    /// everything else maps to nothing. The letter GIF is synthesized without
    /// checking that the file exists; a missing file is a 404 at fetch time.
    pub fn resolve_gif(&self, text: &str) -> Option<String> {
        let text = text.to_lowercase();
        if let Some(gif) = self.get(&text) {
            return Some(gif.to_string());
        }
        if is_single_letter(&text) {
            return Some(format!("{}.gif", text));
        }
        None
    }
}

fn is_single_letter(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
