//! Booking enrichment: resolve `name` and `description` for every booking.
//!
//! Known counterparties are split by a stored rule. Unknown ones are either
//! left whole or, interactively, split by the operator, who then picks or
//! types the display name. That choice is saved as a new rule right away, so
//! the same counterparty later in the run (or in the next file) is handled
//! without asking again.

use std::io;

use auszug_core::Booking;
use thiserror::Error;

use crate::prompt::Prompter;
use crate::similarity::shortlist;
use crate::split::clean_description;
use crate::store::{RuleSet, RuleStore, RuleStoreError};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error(transparent)]
    Store(#[from] RuleStoreError),
    #[error("operator prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Ask the operator about bookings no rule matches.
    pub interactive: bool,
    /// Minimum similarity for a declaration to be suggested.
    pub fuzzy_threshold: f64,
    /// Maximum number of suggested declarations.
    pub shortlist_limit: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            fuzzy_threshold: 0.4,
            shortlist_limit: 5,
        }
    }
}

/// How a booking got its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An existing rule matched.
    Rule,
    /// The operator split it and a rule was saved.
    Learned,
    /// Left whole: no rule, and no (or an aborted) dialogue.
    Unresolved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub by_rule: usize,
    pub learned: usize,
    pub unresolved: usize,
}

/// Operator's cut through the booking text.
struct Cut {
    key: String,
    rest: String,
}

pub struct Enricher<'a> {
    store: &'a RuleStore,
    options: EnrichOptions,
}

impl<'a> Enricher<'a> {
    pub fn new(store: &'a RuleStore, options: EnrichOptions) -> Self {
        Self { store, options }
    }

    pub fn enrich_all(
        &self,
        bookings: &mut [Booking],
        prompter: &mut dyn Prompter,
    ) -> Result<EnrichStats, EnrichError> {
        let mut stats = EnrichStats::default();
        for booking in bookings.iter_mut() {
            match self.enrich(booking, prompter)? {
                Resolution::Rule => stats.by_rule += 1,
                Resolution::Learned => stats.learned += 1,
                Resolution::Unresolved => stats.unresolved += 1,
            }
        }
        Ok(stats)
    }

    /// Resolve one booking. Rules are re-read from disk every time.
    ///
    /// If the operator's input ends mid-dialogue the booking is left whole and
    /// nothing is saved.
    pub fn enrich(
        &self,
        booking: &mut Booking,
        prompter: &mut dyn Prompter,
    ) -> Result<Resolution, EnrichError> {
        let rules = self.store.load()?;
        let text = booking.text_block.trim().to_string();

        if let Some(split) = rules.find_split(&text) {
            tracing::debug!(date = %booking.date, name = %split.name, "split by rule");
            booking.name = split.name;
            booking.description = split.description;
            return Ok(Resolution::Rule);
        }

        if !self.options.interactive {
            leave_whole(booking, text);
            return Ok(Resolution::Unresolved);
        }

        show_context(booking, &text, prompter);

        let (cut, name) = match self.dialogue(&text, &rules, prompter) {
            Ok(Some(decision)) => decision,
            Ok(None) => {
                leave_whole(booking, text);
                return Ok(Resolution::Unresolved);
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::warn!(date = %booking.date, "operator input ended, booking left unsplit");
                leave_whole(booking, text);
                return Ok(Resolution::Unresolved);
            }
            Err(e) => return Err(e.into()),
        };

        self.store.save(&cut.key, &name)?;
        tracing::info!(trigger = %cut.key, name = %name, "learned split rule");

        booking.name = name;
        booking.description = clean_description(&cut.rest).to_string();
        Ok(Resolution::Learned)
    }

    /// Split, then name. `None` if the operator skips the booking.
    fn dialogue(
        &self,
        text: &str,
        rules: &RuleSet,
        prompter: &mut dyn Prompter,
    ) -> io::Result<Option<(Cut, String)>> {
        let Some(cut) = ask_for_split(text, prompter)? else {
            return Ok(None);
        };

        let name = match self.select_declaration(&cut.key, &rules.declarations(), prompter)? {
            Some(name) => name,
            None => {
                let typed = prompter.ask("Anzeigename (z.B. PayPal; leer = Text links der Trennung)")?;
                if typed.is_empty() { cut.key.clone() } else { typed }
            }
        };
        Ok(Some((cut, name)))
    }

    /// Offer similar known names first, then all of them.
    ///
    /// `None` means the operator wants to type a new name.
    fn select_declaration(
        &self,
        key: &str,
        names: &[String],
        prompter: &mut dyn Prompter,
    ) -> io::Result<Option<String>> {
        loop {
            let similar = shortlist(
                key,
                names,
                self.options.fuzzy_threshold,
                self.options.shortlist_limit,
            );
            if similar.is_empty() {
                break;
            }

            let mut menu = String::from("Ähnliche Deklarationen:");
            for (i, (name, score)) in similar.iter().enumerate() {
                menu.push_str(&format!("\n[{}] {} ({}%)", i + 1, name, (score * 100.0) as u32));
            }
            prompter.say(&menu);

            let choice = prompter
                .ask("Nummer wählen | a = alle anzeigen | n = neu")?
                .to_lowercase();
            if let Some(i) = pick(&choice, similar.len()) {
                return Ok(Some(similar[i].0.clone()));
            }
            match choice.as_str() {
                "a" => break,
                "n" => return Ok(None),
                _ => prompter.say("Ungültige Auswahl"),
            }
        }

        if names.is_empty() {
            return Ok(None);
        }

        let mut menu = String::from("Alle Deklarationen:");
        for (i, name) in names.iter().enumerate() {
            menu.push_str(&format!("\n[{}] {}", i + 1, name));
        }
        prompter.say(&menu);

        let choice = prompter.ask("Nummer wählen | n = neu")?.to_lowercase();
        if let Some(i) = pick(&choice, names.len()) {
            return Ok(Some(names[i].clone()));
        }
        if choice != "n" {
            prompter.say("Ungültige Auswahl");
        }
        Ok(None)
    }
}

fn leave_whole(booking: &mut Booking, text: String) {
    booking.name = text;
    booking.description.clear();
}

fn show_context(booking: &Booking, text: &str, prompter: &mut dyn Prompter) {
    let source = if booking.source_file.is_empty() {
        "unbekannt"
    } else {
        booking.source_file.as_str()
    };
    prompter.say(&format!(
        "{RULE}\nUnklare Buchung\nDatei:  {source}\nDatum:  {}\nBetrag: {}\n{THIN_RULE}\n{text}\n{RULE}",
        booking.date, booking.amount
    ));
}

/// Marker dialogue, then offset adjustments. `None` if the operator skips.
fn ask_for_split(text: &str, prompter: &mut dyn Prompter) -> io::Result<Option<Cut>> {
    let chars: Vec<char> = text.chars().collect();

    let mut split = loop {
        let marker = prompter.ask("Letzte Zeichen/Ziffern des Namens (leer = überspringen)")?;
        if marker.is_empty() {
            return Ok(None);
        }
        let marker: Vec<char> = marker.chars().collect();
        match rfind_ignore_case(&chars, &marker) {
            Some(at) => break at + marker.len(),
            None => prompter.say("Marker nicht im Text gefunden, nochmal probieren"),
        }
    };

    loop {
        prompter.say(&preview(&chars, split));
        let answer = prompter.ask("Trennung verschieben (-n links / +n rechts / 0 = ok)")?;
        // Anything that is not a number accepts the current split.
        let Ok(shift) = answer.parse::<i64>() else {
            break;
        };
        if shift == 0 {
            break;
        }
        split = (split as i64)
            .saturating_add(shift)
            .clamp(0, chars.len() as i64) as usize;
    }

    let key = chars[..split].iter().collect::<String>().trim().to_string();
    let rest = chars[split..].iter().collect::<String>().trim().to_string();

    if key.is_empty() {
        prompter.say("Kein Text links der Trennung, Buchung bleibt ungeteilt");
        return Ok(None);
    }
    Ok(Some(Cut { key, rest }))
}

fn preview(chars: &[char], split: usize) -> String {
    let left: String = chars[..split].iter().collect();
    let right: String = chars[split..].iter().collect();
    format!("Trennvorschlag:\n[{left}] | [{right}]")
}

/// Start of the last case-insensitive occurrence of `needle`, in chars.
fn rfind_ignore_case(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).rev().find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a == b || a.to_lowercase().eq(b.to_lowercase()))
    })
}

/// 1-based menu choice to index.
fn pick(choice: &str, len: usize) -> Option<usize> {
    if choice.is_empty() || !choice.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: usize = choice.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}
