//! Fixed capability templates, one per purpose.
//!
//! Array lengths are part of the type, so every purpose exposes the same
//! number of core functions, operations, and output formats.

use telos_core::enums::Purpose;

pub const CORE_FUNCTION_COUNT: usize = 5;
pub const SPECIFIC_OPERATION_COUNT: usize = 3;
pub const OUTPUT_FORMAT_COUNT: usize = 3;

/// Operations every purpose exposes.
pub const SHARED_OPERATIONS: [&str; 2] = ["evidence_synthesis", "cross_purpose_validation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTemplate {
    pub purpose: Purpose,
    pub core_functions: [&'static str; CORE_FUNCTION_COUNT],
    pub operations: [&'static str; SPECIFIC_OPERATION_COUNT],
    pub output_formats: [&'static str; OUTPUT_FORMAT_COUNT],
}

impl CapabilityTemplate {
    /// Purpose-specific operations followed by the shared ones.
    pub fn all_operations(&self) -> impl Iterator<Item = &'static str> {
        self.operations.into_iter().chain(SHARED_OPERATIONS)
    }

    /// Capability a workflow step of this purpose invokes.
    #[must_use]
    pub const fn lead_function(&self) -> &'static str {
        self.core_functions[0]
    }

    /// Output a workflow step of this purpose hands on.
    #[must_use]
    pub const fn lead_output(&self) -> &'static str {
        self.output_formats[0]
    }
}

static TEMPLATES: [CapabilityTemplate; 5] = [
    CapabilityTemplate {
        purpose: Purpose::Descriptive,
        core_functions: [
            "taxonomy_construction",
            "phenomenon_profiling",
            "dimensional_mapping",
            "comparative_characterization",
            "prevalence_estimation",
        ],
        operations: ["categorize", "profile", "compare"],
        output_formats: ["taxonomy", "descriptive_profile", "comparison_matrix"],
    },
    CapabilityTemplate {
        purpose: Purpose::Explanatory,
        core_functions: [
            "mechanism_identification",
            "process_tracing",
            "theoretical_grounding",
            "rival_explanation_assessment",
            "interpretive_synthesis",
        ],
        operations: ["trace_process", "mechanism_mapping", "interpret"],
        output_formats: ["explanatory_model", "process_narrative", "mechanism_map"],
    },
    CapabilityTemplate {
        purpose: Purpose::Predictive,
        core_functions: [
            "trend_extrapolation",
            "scenario_construction",
            "probability_estimation",
            "early_warning_detection",
            "forecast_validation",
        ],
        operations: ["forecast", "simulate", "scenario_analysis"],
        output_formats: ["forecast_report", "scenario_set", "risk_profile"],
    },
    CapabilityTemplate {
        purpose: Purpose::Causal,
        core_functions: [
            "causal_graph_construction",
            "counterfactual_reasoning",
            "confounder_assessment",
            "effect_estimation",
            "pathway_decomposition",
        ],
        operations: ["identify_effects", "mechanism_mapping", "counterfactual_analysis"],
        output_formats: ["causal_graph", "effect_estimates", "pathway_diagram"],
    },
    CapabilityTemplate {
        purpose: Purpose::Intervention,
        core_functions: [
            "leverage_point_identification",
            "program_design",
            "implementation_planning",
            "impact_evaluation",
            "policy_translation",
        ],
        operations: ["design_intervention", "scenario_analysis", "evaluate_impact"],
        output_formats: ["intervention_plan", "policy_brief", "evaluation_framework"],
    },
];

#[must_use]
pub fn template(purpose: Purpose) -> &'static CapabilityTemplate {
    &TEMPLATES[purpose.index()]
}
