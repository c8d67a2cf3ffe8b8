use crate::core::Lang;
use crate::translations::{TranslationEntry, TranslationTable};

/// A raw ingredient line split into quantity, unit and name.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIngredient<'t> {
    pub quantity: Option<String>,
    pub unit: Option<&'t TranslationEntry>,
    /// Lowercased name with quantity and unit tokens removed.
    pub term: String,
    /// Vocabulary row the name resolved to, if any.
    pub entry: Option<&'t TranslationEntry>,
}

impl NormalizedIngredient<'_> {
    /// Canonical (English) form of the name. Unknown names pass through.
    pub fn canonical(&self) -> &str {
        self.localized(Lang::En)
    }

    pub fn localized(&self, lang: Lang) -> &str {
        match self.entry {
            Some(entry) => entry.term(lang),
            None => &self.term,
        }
    }

    /// Rebuilds the line in `lang`, e.g. "400 ml coconut milk" becomes
    /// "400 ml latte di cocco".
    pub fn render(&self, lang: Lang) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(quantity) = &self.quantity {
            parts.push(quantity);
        }
        if let Some(unit) = self.unit {
            parts.push(unit.term(lang));
        }
        let name = self.localized(lang);
        if !name.is_empty() {
            parts.push(name);
        }
        parts.join(" ")
    }
}

pub struct Normalizer<'t> {
    table: &'t TranslationTable,
}

impl<'t> Normalizer<'t> {
    pub fn new(table: &'t TranslationTable) -> Self {
        Self { table }
    }

    /// Splits `raw` (written in `lang`) into its parts and resolves the name
    /// against the vocabulary. Never fails.
    pub fn normalize(&self, raw: &str, lang: Lang) -> NormalizedIngredient<'t> {
        let mut quantities = Vec::new();
        let mut unit = None;
        let mut name = Vec::new();

        for token in raw.split_whitespace() {
            if token.chars().any(|c| c.is_ascii_digit()) {
                quantities.push(token);
                continue;
            }
            if unit.is_none() {
                if let Some(found) = self.table.unit(token) {
                    unit = Some(found);
                    continue;
                }
            }
            name.push(token);
        }

        let term = name.join(" ").to_lowercase();
        let entry = self.table.ingredients().lookup(&term, lang);

        NormalizedIngredient {
            quantity: (!quantities.is_empty()).then(|| quantities.join(" ")),
            unit,
            term,
            entry,
        }
    }

    /// The string a term is matched with. English input is matched as typed;
    /// other languages are first brought into the canonical vocabulary.
    pub fn match_key(&self, raw: &str, lang: Lang) -> String {
        let normalized = self.normalize(raw, lang);
        match lang {
            Lang::En => normalized.term,
            _ => normalized.canonical().to_string(),
        }
    }

    /// Translates a full ingredient line, keeping its quantity.
    pub fn translate_line(&self, raw: &str, from: Lang, to: Lang) -> String {
        let normalized = self.normalize(raw, from);
        if normalized.term.is_empty() && normalized.quantity.is_none() && normalized.unit.is_none() {
            return raw.to_string();
        }
        normalized.render(to)
    }
}
