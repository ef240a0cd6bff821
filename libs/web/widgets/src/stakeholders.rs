use serde::Serialize;

/// One row of the stakeholders list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stakeholder {
    pub label: &'static str,
    pub value: &'static str,
}

/// Parties involved in the project, in display order. Labels are unique.
pub const STAKEHOLDERS: [Stakeholder; 6] = [
    Stakeholder {
        label: "Maitrise de l'ouvrage",
        value: "Aéroport international de Genève",
    },
    Stakeholder {
        label: "Architecte",
        value: "RSHP + Jacques Bugna SA",
    },
    Stakeholder {
        label: "Ingénieur civil",
        value: "T Ingénierie SA",
    },
    Stakeholder {
        label: "Ingénieur E",
        value: "Ingérop Conseils et Ingénierie",
    },
    Stakeholder {
        label: "Ingénieur CVS",
        value: "Ingérop Conseils et Ingénierie",
    },
    Stakeholder {
        label: "Autres",
        value: "Ingérop Conseils et Ingénierie",
    },
];
