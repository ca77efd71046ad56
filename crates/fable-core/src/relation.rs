use serde::{Deserialize, Serialize};

/// Dependency-relation label: a directed edge type from a grammatical head
/// (parent) to a dependent (child), following the Universal Dependencies
/// inventory, plus a `None` sentinel for unrecognized labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Acl,
    AclRelcl,
    Advcl,
    Advmod,
    Amod,
    Appos,
    Aux,
    AuxPass,
    Case,
    Cc,
    CcPreconj,
    Ccomp,
    Compound,
    CompoundPrt,
    Conj,
    Cop,
    Csubj,
    CsubjPass,
    Dep,
    Det,
    DetPredet,
    Discourse,
    Dislocated,
    Expl,
    Fixed,
    Flat,
    Foreign,
    Goeswith,
    Iobj,
    List,
    Mark,
    Nmod,
    NmodNpmod,
    NmodPoss,
    NmodTmod,
    Nsubj,
    NsubjPass,
    Nummod,
    Obj,
    Orphan,
    Parataxis,
    Punct,
    Reparandum,
    Root,
    Vocative,
    Xcomp,
    None,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acl => "acl",
            Self::AclRelcl => "acl:relcl",
            Self::Advcl => "advcl",
            Self::Advmod => "advmod",
            Self::Amod => "amod",
            Self::Appos => "appos",
            Self::Aux => "aux",
            Self::AuxPass => "aux:pass",
            Self::Case => "case",
            Self::Cc => "cc",
            Self::CcPreconj => "cc:preconj",
            Self::Ccomp => "ccomp",
            Self::Compound => "compound",
            Self::CompoundPrt => "compound:prt",
            Self::Conj => "conj",
            Self::Cop => "cop",
            Self::Csubj => "csubj",
            Self::CsubjPass => "csubj:pass",
            Self::Dep => "dep",
            Self::Det => "det",
            Self::DetPredet => "det:predet",
            Self::Discourse => "discourse",
            Self::Dislocated => "dislocated",
            Self::Expl => "expl",
            Self::Fixed => "fixed",
            Self::Flat => "flat",
            Self::Foreign => "flat:foreign",
            Self::Goeswith => "goeswith",
            Self::Iobj => "iobj",
            Self::List => "list",
            Self::Mark => "mark",
            Self::Nmod => "nmod",
            Self::NmodNpmod => "nmod:npmod",
            Self::NmodPoss => "nmod:poss",
            Self::NmodTmod => "nmod:tmod",
            Self::Nsubj => "nsubj",
            Self::NsubjPass => "nsubj:pass",
            Self::Nummod => "nummod",
            Self::Obj => "obj",
            Self::Orphan => "orphan",
            Self::Parataxis => "parataxis",
            Self::Punct => "punct",
            Self::Reparandum => "reparandum",
            Self::Root => "root",
            Self::Vocative => "vocative",
            Self::Xcomp => "xcomp",
            Self::None => "",
        }
    }

    /// Canonicalize a relation label from the curated statistics.
    ///
    /// The source files spell several relations more than one way
    /// (subtype colons dropped, `case` written as `pre`, the legacy `dobj`
    /// for `obj`); all variants map to one internal identifier before any
    /// table lookup. Unrecognized labels degrade to `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "acl" => Self::Acl,
            "acl:relcl" | "aclrelcl" => Self::AclRelcl,
            "advcl" => Self::Advcl,
            "advmod" => Self::Advmod,
            "amod" => Self::Amod,
            "appos" => Self::Appos,
            "aux" => Self::Aux,
            "aux:pass" | "auxpass" => Self::AuxPass,
            "case" | "pre" => Self::Case,
            "cc" => Self::Cc,
            "cc:preconj" | "ccpreconj" => Self::CcPreconj,
            "ccomp" => Self::Ccomp,
            "compound" => Self::Compound,
            "compound:prt" | "compoundprt" => Self::CompoundPrt,
            "conj" => Self::Conj,
            "cop" => Self::Cop,
            "csubj" => Self::Csubj,
            "csubj:pass" | "csubjpass" => Self::CsubjPass,
            "dep" => Self::Dep,
            "det" => Self::Det,
            "det:predet" | "detpredet" => Self::DetPredet,
            "discourse" => Self::Discourse,
            "dislocated" => Self::Dislocated,
            "expl" => Self::Expl,
            "fixed" => Self::Fixed,
            "flat" => Self::Flat,
            "flat:foreign" | "foreign" => Self::Foreign,
            "goeswith" => Self::Goeswith,
            "iobj" => Self::Iobj,
            "list" => Self::List,
            "mark" => Self::Mark,
            "nmod" => Self::Nmod,
            "nmod:npmod" | "nmodnpmod" => Self::NmodNpmod,
            "nmod:poss" | "nmodposs" => Self::NmodPoss,
            "nmod:tmod" | "nmodtmod" => Self::NmodTmod,
            "nsubj" => Self::Nsubj,
            "nsubj:pass" | "nsubjpass" => Self::NsubjPass,
            "nummod" => Self::Nummod,
            "obj" | "dobj" => Self::Obj,
            "orphan" => Self::Orphan,
            "parataxis" => Self::Parataxis,
            "punct" => Self::Punct,
            "reparandum" => Self::Reparandum,
            "root" => Self::Root,
            "vocative" => Self::Vocative,
            "xcomp" => Self::Xcomp,
            _ => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
