//! Static prohibited-term lexicon backing the compliance screener.
//!
//! The term list is hand-curated, grouped by protected characteristic, and
//! deliberately broad: matching is lower-cased substring containment, so the
//! screener over-flags rather than under-flags and a human reviews anything it
//! catches.

struct TermCategory {
    #[allow(dead_code)]
    label: &'static str,
    terms: &'static [&'static str],
}

const CATEGORIES: &[TermCategory] = &[
    TermCategory {
        label: "age",
        terms: &[
            "age",
            "young",
            "old",
            "mature",
            "recent graduate",
            "retirement",
            "youthful",
            "elderly",
            "senior",
            "junior",
            "experienced professional",
        ],
    },
    TermCategory {
        label: "national origin",
        terms: &[
            "native",
            "foreign",
            "accent",
            "immigrant",
            "citizenship",
            "visa",
            "work authorization",
            "country of origin",
        ],
    },
    TermCategory {
        label: "gender",
        terms: &[
            "he",
            "she",
            "his",
            "her",
            "him",
            "gender",
            "man",
            "woman",
            "masculine",
            "feminine",
            "lady",
            "gentleman",
        ],
    },
    TermCategory {
        label: "disability",
        terms: &[
            "disability",
            "handicap",
            "disabled",
            "able-bodied",
            "medical condition",
            "health",
            "accommodation",
        ],
    },
    TermCategory {
        label: "personal characteristics",
        terms: &[
            "culture fit",
            "personality",
            "enthusiasm",
            "attitude",
            "energy level",
            "passion",
            "motivated",
            "team player",
            "ambitious",
        ],
    },
    TermCategory {
        label: "family or marital status",
        terms: &[
            "family",
            "children",
            "married",
            "single",
            "parent",
            "spouse",
            "maternity",
            "paternity",
        ],
    },
    TermCategory {
        label: "religion",
        terms: &["religious", "religion", "faith", "church", "mosque", "temple"],
    },
    TermCategory {
        label: "race or ethnicity adjacent",
        terms: &["diverse", "diversity", "minority", "majority"],
    },
    TermCategory {
        label: "other protected traits",
        terms: &["pregnant", "pregnancy", "veteran", "military service"],
    },
];

/// Context phrases that excuse the term they contain, keyed by context label.
const ALLOWED_CONTEXTS: &[(&str, &[&str])] = &[
    ("experience", &["years of experience", "work experience"]),
    ("technical", &["native code", "native app", "native development"]),
];

/// Violations on any of these terms escalate the verdict to high severity.
const HIGH_SEVERITY: &[&str] = &[
    "age", "gender", "disability", "race", "religion", "pregnant", "family", "married", "children",
];

/// Immutable lexicon injected into the screener at construction. No
/// process-wide mutable state: every handle sees the same curated data.
#[derive(Debug, Clone)]
pub struct TermLexicon {
    terms: Vec<&'static str>,
}

impl Default for TermLexicon {
    fn default() -> Self {
        let terms = CATEGORIES
            .iter()
            .flat_map(|category| category.terms.iter().copied())
            .collect();
        Self { terms }
    }
}

impl TermLexicon {
    pub fn terms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.terms.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// A matched term is excused when some context phrase appears in the text
    /// and the term is a substring of that phrase. The phrase may sit anywhere
    /// in the text, not adjacent to the match: an unrelated "native app"
    /// elsewhere excuses every "native" in the document.
    pub(crate) fn is_excused(&self, term: &str, text_lower: &str) -> bool {
        ALLOWED_CONTEXTS
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .any(|phrase| text_lower.contains(phrase) && phrase.contains(term))
    }

    pub(crate) fn is_high_severity(&self, term: &str) -> bool {
        HIGH_SEVERITY.contains(&term)
    }

    /// Whether any prohibited term occurs in the (lower-cased) line, ignoring
    /// allow-list exceptions.
    pub(crate) fn matches_line(&self, line_lower: &str) -> bool {
        self.terms.iter().any(|term| line_lower.contains(term))
    }
}
