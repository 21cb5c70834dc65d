// src/search/vocabulary.rs
//! Fixed keyword lists scanned by the criteria extractor.
//!
//! Order matters: matches are reported in the order they appear here.

pub const SKILLS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "react",
    "node",
    "java",
    "sql",
    "machine learning",
    "ml",
    "ai",
    "data analysis",
    "excel",
    "figma",
    "marketing",
    "finance",
    "docker",
    "kubernetes",
    "aws",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "creativity",
    "adaptability",
    "time management",
    "critical thinking",
    "collaboration",
];

pub const FIELDS_OF_STUDY: &[&str] = &[
    "computer science",
    "engineering",
    "business",
    "economics",
    "design",
    "data science",
    "mathematics",
    "physics",
    "law",
    "architecture",
];

/// English and Italian names of the spoken languages recognised individually.
pub const LANGUAGES: &[&str] = &[
    "english", "italian", "spanish", "french", "german", "chinese", "inglese", "italiano",
    "spagnolo", "francese", "tedesco", "cinese",
];

pub const BILINGUAL_LANGUAGES: &[&str] = &["Italian", "English"];
pub const MULTILINGUAL_LANGUAGES: &[&str] = &["Italian", "English", "Spanish"];

/// A rule assigning a canonical value when any of its fragments occurs in the query.
pub struct Rule<T> {
    pub fragments: &'static [&'static str],
    pub value: T,
}

impl<T> Rule<T> {
    pub fn matches(&self, lowered: &str) -> bool {
        self.fragments.iter().any(|f| lowered.contains(f))
    }
}

pub const UNIVERSITY_RULES: &[Rule<&[&str]>] = &[
    Rule {
        fragments: &["politecnico", "polimi"],
        value: &["Politecnico di Milano", "Politecnico di Torino"],
    },
    Rule {
        fragments: &["bologna"],
        value: &["Università di Bologna"],
    },
    Rule {
        fragments: &["sapienza", "roma"],
        value: &["Sapienza Università di Roma"],
    },
    Rule {
        fragments: &["top university"],
        value: &[
            "Politecnico di Milano",
            "Università Bocconi",
            "Sapienza Università di Roma",
        ],
    },
];

pub const LOCATION_RULES: &[Rule<&str>] = &[
    Rule {
        fragments: &["milan", "milano"],
        value: "Milan",
    },
    Rule {
        fragments: &["rome", "roma"],
        value: "Rome",
    },
    Rule {
        fragments: &["turin", "torino"],
        value: "Turin",
    },
    Rule {
        fragments: &["bologna"],
        value: "Bologna",
    },
    Rule {
        fragments: &["florence", "firenze"],
        value: "Florence",
    },
    Rule {
        fragments: &["naples", "napoli"],
        value: "Naples",
    },
    Rule {
        fragments: &["remote"],
        value: "Remote",
    },
];

/// Ready-made queries offered as shortcuts next to the search box.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "Find me Computer Science grads from Milan who speak English and Italian",
    "I need Data Science students from Politecnico di Milano, available immediately",
    "Looking for Engineering students with Python and ML, 100% verified profiles",
    "Bilingual Business students in Rome with leadership experience",
    "Senior design students with Figma, 3.5+ GPA, graduating 2025",
];

/// Every keyword in `vocabulary` that occurs in `lowered`, in vocabulary order.
pub fn scan(vocabulary: &[&str], lowered: &str) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}
