//! Built-in pattern definitions for the five purposes.
//!
//! Patterns are compiled case-insensitively. Each purpose has six core
//! categories (used by classification and extraction) and three widening
//! tiers (used by extraction only, once the rebalancer enables them).

use telos_core::enums::Purpose;

use super::{PatternDefinition, PurposeDefinition};

const fn pat(category: &'static str, pattern: &'static str) -> PatternDefinition<'static> {
    PatternDefinition { category, pattern }
}

const DESCRIPTIVE: &[PatternDefinition<'static>] = &[
    pat(
        "classification",
        r"\b(?:taxonom(?:y|ies|ic)|classification(?:\s+systems?)?|typolog(?:y|ies|ical)(?:\s+frameworks?)?|dimensional\s+analys[ie]s)\b",
    ),
    pat(
        "characterization",
        r"\b(?:characteri[sz](?:e|es|ed|ing|ation|ations)|describ(?:e|es|ed|ing))\b",
    ),
    pat("categorization", r"\bcategor(?:y|ies|i[sz]ation|i[sz]e[sd]?)\b"),
    pat(
        "measurement",
        r"\b(?:measure(?:ment|ments|s|d)?|indicators?|operationali[sz]ation)\b",
    ),
    pat("pattern_mapping", r"\b(?:patterns?|prevalence|distributions?)\b"),
    pat(
        "comparison",
        r"\b(?:compar(?:e|es|ed|ing|ative|ison|isons)|contrast(?:s|ed|ing)?)\b",
    ),
];

const DESCRIPTIVE_WIDENING: &[PatternDefinition<'static>] = &[
    pat("attributes", r"\b(?:features?|attributes?|properties)\b"),
    pat("kinds", r"\b(?:types?|kinds?|forms?)\b"),
    pat(
        "observation",
        r"\b(?:observ(?:e|es|ed|ing|ation|ations)|documents?|records?)\b",
    ),
];

const EXPLANATORY: &[PatternDefinition<'static>] = &[
    pat(
        "explanation",
        r"\b(?:explain(?:s|ed|ing)?|explanations?|explanatory)\b",
    ),
    pat("mechanism", r"\bmechanisms?\b"),
    pat(
        "understanding",
        r"\b(?:why|understand(?:s|ing)?|interpret(?:s|ed|ation|ations)?)\b",
    ),
    pat(
        "theoretical_framework",
        r"\b(?:theoretical|conceptual)\s+(?:frameworks?|models?|lens(?:es)?)\b",
    ),
    pat("process", r"\b(?:process(?:es)?|dynamics)\b"),
    pat(
        "reasoning",
        r"\b(?:accounts?\s+for|stems?\s+from|rooted\s+in|arises?\s+from)\b",
    ),
];

const EXPLANATORY_WIDENING: &[PatternDefinition<'static>] = &[
    pat("reasons", r"\b(?:reasons?|rationale)\b"),
    pat("factors", r"\b(?:factors?|drivers?)\b"),
    pat(
        "influence",
        r"\b(?:shapes?|shaped|shaping|influenc(?:e|es|ed|ing))\b",
    ),
];

const PREDICTIVE: &[PatternDefinition<'static>] = &[
    pat("prediction", r"\bpredict(?:s|ed|ing|ion|ions|ive)?\b"),
    pat(
        "forecasting",
        r"\b(?:forecast(?:s|ing|ed)?|projections?|anticipat(?:e|es|ed|ing|ion))\b",
    ),
    pat(
        "trend",
        r"\b(?:trends?|trajector(?:y|ies)|future\s+(?:outcomes?|states?|developments?))\b",
    ),
    pat("probability", r"\b(?:probabilit(?:y|ies)|likelihood|likely)\b"),
    pat(
        "scenario",
        r"\b(?:scenarios?|early\s+warning|simulat(?:e|es|ed|ion|ions))\b",
    ),
    pat("patterns", r"\b(?:patterns?|regularit(?:y|ies))\b"),
];

const PREDICTIVE_WIDENING: &[PatternDefinition<'static>] = &[
    pat("expectation", r"\bexpect(?:s|ed|ing|ation|ations)?\b"),
    pat("future", r"\b(?:future|will)\b"),
    pat(
        "estimation",
        r"\b(?:estimat(?:e|es|ed|ing|ion|ions)|risks?)\b",
    ),
];

const CAUSAL: &[PatternDefinition<'static>] = &[
    pat(
        "causal_relationship",
        r"\bcausal\s+(?:relationships?|links?|chains?|inference)\b",
    ),
    pat(
        "causal_mechanism",
        r"\bcausal\s+(?:mechanisms?|effects?|processes)\b",
    ),
    pat(
        "causation",
        r"\b(?:caus(?:e|es|ed|ing|ation)|determinants?|effects?\s+(?:of|on)|impacts?\s+(?:of|on)|leads?\s+to|results?\s+in)\b",
    ),
    pat(
        "counterfactual",
        r"\b(?:counterfactuals?|confound(?:s|ers?|ing)?|endogeneity)\b",
    ),
    pat(
        "identification",
        r"\b(?:instrumental\s+variables?|natural\s+experiments?|randomi[sz]ed|difference-in-differences)\b",
    ),
    pat(
        "pathway",
        r"\b(?:mechanisms?|pathways?|mediat(?:e|es|ed|ing|ion|ors?))\b",
    ),
];

const CAUSAL_WIDENING: &[PatternDefinition<'static>] = &[
    pat("consequence", r"\b(?:consequences?|drives?|triggers?)\b"),
    pat("dependence", r"\b(?:dependen(?:ce|t|cy)|conditional\s+on)\b"),
    pat("connective", r"\b(?:because|therefore|thus)\b"),
];

const INTERVENTION: &[PatternDefinition<'static>] = &[
    pat(
        "policy",
        r"\bpolic(?:y|ies)(?:\s+recommendations?|\s+design|\s+instruments?)?\b",
    ),
    pat(
        "implementation",
        r"\bimplement(?:s|ed|ing|ation)?(?:\s+strateg(?:y|ies))?\b",
    ),
    pat(
        "program_design",
        r"\b(?:programs?|programmes?|interventions?)\b",
    ),
    pat(
        "change_strategy",
        r"\b(?:reforms?|transform(?:s|ed|ing|ation)?|improv(?:e|es|ed|ing|ement|ements))\b",
    ),
    pat(
        "evaluation",
        r"\b(?:evaluat(?:e|es|ed|ing|ion|ions)|effectiveness)\b",
    ),
    pat(
        "practice",
        r"\b(?:practitioners?|best\s+practices?|guidelines?|recommend(?:s|ed|ing|ation|ations)?)\b",
    ),
];

const INTERVENTION_WIDENING: &[PatternDefinition<'static>] = &[
    pat("action", r"\b(?:actions?|responses?|measures?)\b"),
    pat("planning", r"\b(?:strateg(?:y|ies)|plans?|planning)\b"),
    pat(
        "stakeholders",
        r"\b(?:stakeholders?|communit(?:y|ies)|institutions?)\b",
    ),
];

/// The built-in catalog, one entry per purpose in declaration order.
pub const STANDARD: &[PurposeDefinition<'static>] = &[
    PurposeDefinition {
        purpose: Purpose::Descriptive,
        sophistication: "multi-dimensional classification and characterization",
        categories: DESCRIPTIVE,
        widening: DESCRIPTIVE_WIDENING,
    },
    PurposeDefinition {
        purpose: Purpose::Explanatory,
        sophistication: "mechanism-based explanation with rival account assessment",
        categories: EXPLANATORY,
        widening: EXPLANATORY_WIDENING,
    },
    PurposeDefinition {
        purpose: Purpose::Predictive,
        sophistication: "probabilistic forecasting with scenario validation",
        categories: PREDICTIVE,
        widening: PREDICTIVE_WIDENING,
    },
    PurposeDefinition {
        purpose: Purpose::Causal,
        sophistication: "counterfactual identification of causal structure",
        categories: CAUSAL,
        widening: CAUSAL_WIDENING,
    },
    PurposeDefinition {
        purpose: Purpose::Intervention,
        sophistication: "evidence-based intervention design and evaluation",
        categories: INTERVENTION,
        widening: INTERVENTION_WIDENING,
    },
];
