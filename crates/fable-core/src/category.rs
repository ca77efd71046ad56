use serde::{Deserialize, Serialize};

/// Part-of-speech tag for a token, following the Universal Dependencies
/// inventory, plus a `None` sentinel.
///
/// `None` doubles as "no data": relation sampling returns it when a category
/// has no compatible entries, and the scorer uses it as the virtual bracket
/// at both ends of a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    None,
}

/// Every real category, in tag order. Excludes the `None` sentinel.
pub const ALL_CATEGORIES: [Category; 17] = [
    Category::Adj,
    Category::Adp,
    Category::Adv,
    Category::Aux,
    Category::Cconj,
    Category::Det,
    Category::Intj,
    Category::Noun,
    Category::Num,
    Category::Part,
    Category::Pron,
    Category::Propn,
    Category::Punct,
    Category::Sconj,
    Category::Sym,
    Category::Verb,
    Category::X,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
            Self::None => "",
        }
    }

    /// Lossy tag lookup: unrecognized names degrade to `None` rather than
    /// failing, so junk in curated data skips a branch instead of aborting.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            "X" => Self::X,
            _ => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of a relation a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Parent,
    Child,
}

impl Role {
    pub fn other(&self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
        }
    }
}
