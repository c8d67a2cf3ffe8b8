// Substring lookups take the first entry in declaration order, so compound
// terms are declared ahead of the general terms they contain.

use crate::core::Lang;
use std::collections::HashMap;

const UNITS: &[(&str, &str)] = &[
    ("ml", "ml"),
    ("l", "l"),
    ("g", "g"),
    ("kg", "kg"),
    ("tbsp", "cucchiaio"),
    ("tsp", "cucchiaino"),
    ("cup", "tazza"),
    ("cups", "tazze"),
    ("piece", "pezzo"),
    ("pieces", "pezzi"),
    ("slice", "fetta"),
    ("slices", "fette"),
    ("clove", "spicchio"),
    ("cloves", "spicchi"),
    ("bunch", "mazzo"),
    ("pinch", "pizzico"),
    ("dash", "goccio"),
    ("to taste", "quanto basta"),
];

const INGREDIENTS: &[(&str, &str)] = &[
    // Proteins
    ("chicken breast", "petto di pollo"),
    ("chicken broth", "brodo di pollo"),
    ("chicken", "pollo"),
    ("beef", "manzo"),
    ("pork", "maiale"),
    ("fish sauce", "salsa di pesce"),
    ("fish", "pesce"),
    ("shrimp", "gamberi"),
    ("eggs", "uova"),
    ("tofu", "tofu"),
    ("lentils", "lenticchie"),
    ("beans", "fagioli"),
    ("chickpeas", "ceci"),
    // Grains and starches
    ("jasmine rice", "riso jasmine"),
    ("rice", "riso"),
    ("green curry paste", "pasta di curry verde"),
    ("pasta", "pasta"),
    ("quinoa", "quinoa"),
    ("bread", "pane"),
    ("flour", "farina"),
    ("sweet potatoes", "patate dolci"),
    ("potatoes", "patate"),
    ("potato", "patata"),
    ("corn", "mais"),
    ("oats", "avena"),
    // Vegetables
    ("tomato sauce", "salsa di pomodoro"),
    ("tomatoes", "pomodori"),
    ("onion", "cipolla"),
    ("garlic", "aglio"),
    ("carrot", "carota"),
    ("lettuce", "lattuga"),
    ("spinach", "spinaci"),
    ("mushroom", "funghi"),
    ("bell peppers", "peperoni"),
    ("bell pepper", "peperone"),
    ("eggplant", "melanzana"),
    ("zucchini", "zucchine"),
    ("broccoli", "broccoli"),
    ("cauliflower", "cavolfiore"),
    ("cabbage", "cavolo"),
    ("celery", "sedano"),
    ("cucumber", "cetriolo"),
    ("asparagus", "asparagi"),
    ("artichoke", "carciofo"),
    ("fennel", "finocchio"),
    ("leek", "porro"),
    ("bamboo shoots", "germogli di bambù"),
    // Dairy
    ("coconut milk", "latte di cocco"),
    ("cheese", "formaggio"),
    ("milk", "latte"),
    ("butter", "burro"),
    ("cream", "panna"),
    ("yogurt", "yogurt"),
    ("parmesan", "parmigiano"),
    ("mozzarella", "mozzarella"),
    // Fruits
    ("apple", "mela"),
    ("lemon", "limone"),
    ("orange", "arancia"),
    ("banana", "banana"),
    ("strawberry", "fragola"),
    ("blueberry", "mirtillo"),
    ("peach", "pesca"),
    ("pear", "pera"),
    ("grape", "uva"),
    ("cherry", "ciliegia"),
    ("coconut", "cocco"),
    // Herbs and spices
    ("thai basil", "basilico thailandese"),
    ("basil", "basilico"),
    ("oregano", "origano"),
    ("rosemary", "rosmarino"),
    ("thyme", "timo"),
    ("sage", "salvia"),
    ("parsley", "prezzemolo"),
    ("mint", "menta"),
    ("cinnamon", "cannella"),
    ("nutmeg", "noce moscata"),
    ("ginger", "zenzero"),
    ("turmeric", "curcuma"),
    ("cumin", "cumino"),
    ("coriander", "coriandolo"),
    // Pantry
    ("olive oil", "olio d'oliva"),
    ("salt", "sale"),
    ("pepper", "pepe"),
    ("palm sugar", "zucchero di palma"),
    ("sugar", "zucchero"),
    ("honey", "miele"),
    ("vinegar", "aceto"),
    ("soy sauce", "salsa di soia"),
    ("mustard", "senape"),
    ("ketchup", "ketchup"),
    ("mayonnaise", "maionese"),
    ("pesto", "pesto"),
    ("vegetable broth", "brodo vegetale"),
    ("wine", "vino"),
    ("beer", "birra"),
    ("almonds", "mandorle"),
    ("walnuts", "noci"),
    ("hazelnuts", "nocciole"),
    ("peanuts", "arachidi"),
    ("nuts", "frutta secca"),
    ("sunflower seeds", "semi di girasole"),
    ("pumpkin seeds", "semi di zucca"),
    ("sesame seeds", "semi di sesamo"),
    ("seeds", "semi"),
];

/// One vocabulary row. `key` is the canonical (English) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub key: String,
    pub en: String,
    pub it: String,
}

impl TranslationEntry {
    fn new(en: &str, it: &str) -> Self {
        let en = en.trim().to_lowercase();
        Self {
            key: en.clone(),
            en,
            it: it.trim().to_lowercase(),
        }
    }

    pub fn term(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::It => &self.it,
        }
    }
}

/// An ordered vocabulary plus exact-match indexes in both directions.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<TranslationEntry>,
    forward: HashMap<String, usize>,
    reverse: HashMap<String, usize>,
}

impl Vocabulary {
    fn new(pairs: &[(&str, &str)]) -> Self {
        let entries: Vec<TranslationEntry> = pairs
            .iter()
            .map(|(en, it)| TranslationEntry::new(en, it))
            .collect();

        let mut forward = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            forward.entry(entry.key.clone()).or_insert(idx);
        }

        // Inverted from the forward index, first declaration wins on collision
        let mut reverse = HashMap::new();
        let mut ordered: Vec<(&String, &usize)> = forward.iter().collect();
        ordered.sort_by_key(|(_, idx)| **idx);
        for (_, &idx) in ordered {
            reverse.entry(entries[idx].it.clone()).or_insert(idx);
        }

        Self {
            entries,
            forward,
            reverse,
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    /// Exact lookup of `term` written in `source`.
    pub fn exact(&self, term: &str, source: Lang) -> Option<&TranslationEntry> {
        let term = term.trim().to_lowercase();
        let index = match source {
            Lang::En => &self.forward,
            Lang::It => &self.reverse,
        };
        index.get(&term).map(|&idx| &self.entries[idx])
    }

    /// First entry, in declaration order, whose `source` text occurs inside `text`.
    pub fn first_contained(&self, text: &str, source: Lang) -> Option<&TranslationEntry> {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .find(|entry| text.contains(entry.term(source)))
    }

    pub fn lookup(&self, text: &str, source: Lang) -> Option<&TranslationEntry> {
        if text.trim().is_empty() {
            return None;
        }
        self.exact(text, source)
            .or_else(|| self.first_contained(text, source))
    }
}

/// Ingredient and unit vocabularies, built once at start-up and passed by
/// reference to whatever needs them.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    ingredients: Vocabulary,
    units: Vocabulary,
}

impl TranslationTable {
    pub fn new(ingredients: &[(&str, &str)], units: &[(&str, &str)]) -> Self {
        Self {
            ingredients: Vocabulary::new(ingredients),
            units: Vocabulary::new(units),
        }
    }

    pub fn builtin() -> Self {
        Self::new(INGREDIENTS, UNITS)
    }

    pub fn ingredients(&self) -> &Vocabulary {
        &self.ingredients
    }

    /// Unit row for a single token, in either language.
    pub fn unit(&self, token: &str) -> Option<&TranslationEntry> {
        self.units
            .exact(token, Lang::En)
            .or_else(|| self.units.exact(token, Lang::It))
    }

    /// Translates an ingredient name. Unknown names come back unchanged
    /// (lowercased and trimmed).
    pub fn translate(&self, term: &str, from: Lang, to: Lang) -> String {
        match self.ingredients.lookup(term, from) {
            Some(entry) => entry.term(to).to_string(),
            None => term.trim().to_lowercase(),
        }
    }
}
