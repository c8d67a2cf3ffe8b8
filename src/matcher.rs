/// Outcome of comparing a user's terms with one recipe's ingredients.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    pub matched_count: usize,
    /// Unmatched user terms, in input order.
    pub missing: Vec<String>,
    pub total: usize,
}

impl TermMatch {
    /// `None` when there were no user terms to match.
    pub fn percentage(&self) -> Option<f64> {
        match_percentage(self.matched_count, self.total)
    }

    pub fn is_match(&self) -> bool {
        self.matched_count > 0
    }
}

/// Either string contains the other, ignoring case. Empty strings never match.
pub fn contains_either(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

pub fn match_terms(user_terms: &[String], recipe_terms: &[String]) -> TermMatch {
    let mut matched_count = 0;
    let mut missing = Vec::new();

    for term in user_terms {
        if recipe_terms.iter().any(|r| contains_either(term, r)) {
            matched_count += 1;
        } else {
            missing.push(term.clone());
        }
    }

    TermMatch {
        matched_count,
        missing,
        total: user_terms.len(),
    }
}

pub fn match_percentage(matched: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(matched.min(total) as f64 / total as f64 * 100.0)
}
