// src/narrative.rs
//! Narrative composer: symbolic triggers → templated report sections.
//!
//! Triggers fire when the lowercased raw text contains any configured
//! (lowercased) variant. Each
//! section is an ordered table of `(condition, branch)` rows; a condition is
//! a conjunction of any-of trigger groups. Summary collects every matching
//! row, the other tables stop at the first match. Table order is the priority
//! rule, so it must not be reshuffled.
//!
//! All display text comes from [`NarrativeCfg`]; this module only selects.

use crate::config::lexicon::NarrativeCfg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Toilet,
    Excrement,
    Pig,
    House,
    Yard,
    Hand,
}

impl Trigger {
    pub const ALL: [Trigger; 6] = [
        Trigger::Toilet,
        Trigger::Excrement,
        Trigger::Pig,
        Trigger::House,
        Trigger::Yard,
        Trigger::Hand,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of fired triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerSet(u8);

impl TriggerSet {
    pub fn insert(&mut self, t: Trigger) {
        self.0 |= t.bit();
    }

    pub fn contains(&self, t: Trigger) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Trigger> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        let mut set = TriggerSet::default();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

/// All groups must hold; a group holds if any of its triggers fired.
#[derive(Debug, Clone, Copy)]
pub struct Condition(&'static [&'static [Trigger]]);

impl Condition {
    pub fn holds(&self, fired: TriggerSet) -> bool {
        self.0
            .iter()
            .all(|group| group.iter().any(|&t| fired.contains(t)))
    }
}

const TOILET_OR_EXCREMENT: &[Trigger] = &[Trigger::Toilet, Trigger::Excrement];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFragment {
    ToiletExcrement,
    Pig,
    House,
    Yard,
}

pub const SUMMARY_RULES: &[(Condition, SummaryFragment)] = &[
    (Condition(&[TOILET_OR_EXCREMENT]), SummaryFragment::ToiletExcrement),
    (Condition(&[&[Trigger::Pig]]), SummaryFragment::Pig),
    (Condition(&[&[Trigger::House]]), SummaryFragment::House),
    (Condition(&[&[Trigger::Yard]]), SummaryFragment::Yard),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolBranch {
    ToiletExcrementPig,
    PigHouse,
    ToiletExcrementHand,
    Default,
}

pub const SYMBOL_RULES: &[(Condition, SymbolBranch)] = &[
    (
        Condition(&[TOILET_OR_EXCREMENT, &[Trigger::Pig]]),
        SymbolBranch::ToiletExcrementPig,
    ),
    (
        Condition(&[&[Trigger::Pig], &[Trigger::House]]),
        SymbolBranch::PigHouse,
    ),
    (
        Condition(&[TOILET_OR_EXCREMENT, &[Trigger::Hand]]),
        SymbolBranch::ToiletExcrementHand,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlookBranch {
    ToiletExcrement,
    Pig,
    Yard,
    Default,
}

pub const OUTLOOK_RULES: &[(Condition, OutlookBranch)] = &[
    (Condition(&[TOILET_OR_EXCREMENT]), OutlookBranch::ToiletExcrement),
    (Condition(&[&[Trigger::Pig]]), OutlookBranch::Pig),
    (Condition(&[&[Trigger::Yard]]), OutlookBranch::Yard),
];

/// First matching row, else `fallback`.
pub fn first_match<B: Copy>(rules: &[(Condition, B)], fired: TriggerSet, fallback: B) -> B {
    rules
        .iter()
        .find(|(cond, _)| cond.holds(fired))
        .map(|&(_, b)| b)
        .unwrap_or(fallback)
}

/// Every matching row, in table order.
pub fn all_matches<B: Copy>(rules: &[(Condition, B)], fired: TriggerSet) -> Vec<B> {
    rules
        .iter()
        .filter(|(cond, _)| cond.holds(fired))
        .map(|&(_, b)| b)
        .collect()
}

pub const CHECKLIST_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct NarrativeComposer {
    cfg: NarrativeCfg,
}

impl NarrativeComposer {
    pub fn from_cfg(cfg: &NarrativeCfg) -> anyhow::Result<Self> {
        if cfg.checklist.len() != CHECKLIST_LEN {
            anyhow::bail!(
                "narrative checklist must have {} tips, found {}",
                CHECKLIST_LEN,
                cfg.checklist.len()
            );
        }
        let mut cfg = cfg.clone();
        let tr = &mut cfg.triggers;
        for list in [
            &mut tr.toilet,
            &mut tr.excrement,
            &mut tr.pig,
            &mut tr.house,
            &mut tr.yard,
            &mut tr.hand,
        ] {
            for v in list.iter_mut() {
                *v = v.to_lowercase();
            }
        }
        let composer = Self { cfg };
        for t in Trigger::ALL {
            let variants = composer.variants(t);
            if variants.is_empty() || variants.iter().any(|v| v.is_empty()) {
                anyhow::bail!("narrative trigger {:?} needs non-empty variants", t);
            }
        }
        Ok(composer)
    }

    fn variants(&self, t: Trigger) -> &[String] {
        let tr = &self.cfg.triggers;
        match t {
            Trigger::Toilet => &tr.toilet,
            Trigger::Excrement => &tr.excrement,
            Trigger::Pig => &tr.pig,
            Trigger::House => &tr.house,
            Trigger::Yard => &tr.yard,
            Trigger::Hand => &tr.hand,
        }
    }

    /// Triggers whose variants appear literally in `raw`, case-folded.
    pub fn detect(&self, raw: &str) -> TriggerSet {
        let raw = raw.to_lowercase();
        Trigger::ALL
            .into_iter()
            .filter(|&t| self.variants(t).iter().any(|v| raw.contains(v.as_str())))
            .collect()
    }

    pub fn summary(&self, fired: TriggerSet) -> String {
        let s = &self.cfg.summary;
        let parts: Vec<&str> = all_matches(SUMMARY_RULES, fired)
            .into_iter()
            .map(|f| match f {
                SummaryFragment::ToiletExcrement => s.toilet_excrement.as_str(),
                SummaryFragment::Pig => s.pig.as_str(),
                SummaryFragment::House => s.house.as_str(),
                SummaryFragment::Yard => s.yard.as_str(),
            })
            .collect();
        if parts.is_empty() {
            s.fallback.clone()
        } else {
            parts.join(&self.cfg.arrow)
        }
    }

    pub fn symbol_link(&self, fired: TriggerSet) -> &str {
        let s = &self.cfg.symbol;
        match first_match(SYMBOL_RULES, fired, SymbolBranch::Default) {
            SymbolBranch::ToiletExcrementPig => &s.toilet_excrement_pig,
            SymbolBranch::PigHouse => &s.pig_house,
            SymbolBranch::ToiletExcrementHand => &s.toilet_excrement_hand,
            SymbolBranch::Default => &s.fallback,
        }
    }

    pub fn outlook(&self, fired: TriggerSet) -> &str {
        let o = &self.cfg.outlook;
        match first_match(OUTLOOK_RULES, fired, OutlookBranch::Default) {
            OutlookBranch::ToiletExcrement => &o.toilet_excrement,
            OutlookBranch::Pig => &o.pig,
            OutlookBranch::Yard => &o.yard,
            OutlookBranch::Default => &o.fallback,
        }
    }

    pub fn emotion_theme(&self, feeling: &str, themes: &[String]) -> String {
        let feeling = html_escape::encode_text(feeling);
        let e = &self.cfg.emotion;
        if themes.is_empty() {
            e.without_themes.replace("{feeling}", &feeling)
        } else {
            let joined = themes
                .iter()
                .map(|t| html_escape::encode_text(t).into_owned())
                .collect::<Vec<_>>()
                .join(&self.cfg.bullet_delimiter);
            e.with_themes
                .replace("{feeling}", &feeling)
                .replace("{themes}", &joined)
        }
    }

    /// Full report body for `raw` text.
    pub fn compose(&self, raw: &str, feeling: &str, themes: &[String]) -> String {
        let fired = self.detect(raw);
        let h = &self.cfg.headings;

        let mut out = String::new();
        self.push_section(&mut out, &h.summary, &self.summary(fired));
        self.push_section(&mut out, &h.symbol, self.symbol_link(fired));
        self.push_section(&mut out, &h.emotion, &self.emotion_theme(feeling, themes));
        self.push_section(&mut out, &h.outlook, self.outlook(fired));

        out.push_str(&format!("<p><b>{}</b></p><ul>", h.checklist));
        for tip in &self.cfg.checklist {
            out.push_str(&format!("<li>{tip}</li>"));
        }
        out.push_str("</ul>");

        let conclusion = self
            .cfg
            .conclusion
            .replace("{feeling}", &html_escape::encode_text(feeling));
        out.push_str(&format!("<p>{conclusion}</p>"));
        out
    }

    fn push_section(&self, out: &mut String, heading: &str, body: &str) {
        out.push_str(&format!(
            "<p><b>{}</b>{}{}</p>",
            heading, self.cfg.heading_separator, body
        ));
    }
}
