//! Fixed label tables for the two classification fields of an ato.
//!
//! Each label has a wire value (what the API stores) and a display label
//! (what the selector shows). They differ for a handful of entries, most
//! notably `Emenda Consitucional`, whose misspelt wire value is what
//! existing records carry.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Document type of an ato (`tipo_id` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipoAto {
    ConstituicaoEstadual,
    DecretoLegislativo,
    DecretoLei,
    DecretoNumerado,
    DecretoNaoNumerado,
    EmendaConstitucional,
    InstrucaoNormativa,
    LeiComplementar,
    LeiOrdinaria,
    MensagemDoGovernador,
    Portaria,
    PortariaConjunta,
    Resolucao,
}

impl TipoAto {
    /// All types, in selector order.
    pub const ALL: [TipoAto; 13] = [
        TipoAto::ConstituicaoEstadual,
        TipoAto::DecretoLegislativo,
        TipoAto::DecretoLei,
        TipoAto::DecretoNumerado,
        TipoAto::DecretoNaoNumerado,
        TipoAto::EmendaConstitucional,
        TipoAto::InstrucaoNormativa,
        TipoAto::LeiComplementar,
        TipoAto::LeiOrdinaria,
        TipoAto::MensagemDoGovernador,
        TipoAto::Portaria,
        TipoAto::PortariaConjunta,
        TipoAto::Resolucao,
    ];

    /// Value sent to and stored by the API.
    pub fn value(self) -> &'static str {
        match self {
            TipoAto::ConstituicaoEstadual => "Constituição Estadual",
            TipoAto::DecretoLegislativo => "Decreto Legislativo",
            TipoAto::DecretoLei => "Decreto Lei",
            TipoAto::DecretoNumerado => "Decreto Numerado",
            TipoAto::DecretoNaoNumerado => "Decreto Não Numerado",
            TipoAto::EmendaConstitucional => "Emenda Consitucional",
            TipoAto::InstrucaoNormativa => "Instrução Normativa",
            TipoAto::LeiComplementar => "Lei Complementar",
            TipoAto::LeiOrdinaria => "Lei Ordinária",
            TipoAto::MensagemDoGovernador => "Mensagem do Governador",
            TipoAto::Portaria => "Portaria",
            TipoAto::PortariaConjunta => "Portaria Conjunta",
            TipoAto::Resolucao => "Resolução",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TipoAto::EmendaConstitucional => "Emenda Constitucional",
            other => other.value(),
        }
    }
}

impl FromStr for TipoAto {
    type Err = UnknownLabel;

    /// Accepts either the wire value or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TipoAto::ALL
            .into_iter()
            .find(|t| t.value() == s || t.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "tipo",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TipoAto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Legal-effect status of an ato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Situacao {
    Inconstitucional,
    Suspensa,
    Vigente,
    Revogado,
    RevogadoParcialmente,
    SemEfeito,
    SemRevogacaoExpressa,
    Vetado,
}

impl Situacao {
    /// All statuses, in selector order.
    pub const ALL: [Situacao; 8] = [
        Situacao::Inconstitucional,
        Situacao::Suspensa,
        Situacao::Vigente,
        Situacao::Revogado,
        Situacao::RevogadoParcialmente,
        Situacao::SemEfeito,
        Situacao::SemRevogacaoExpressa,
        Situacao::Vetado,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Situacao::Inconstitucional => "Inconstitucional",
            Situacao::Suspensa => "Suspensa",
            Situacao::Vigente => "Vigente",
            Situacao::Revogado => "Revogado",
            Situacao::RevogadoParcialmente => "Revogado Parcialmente",
            Situacao::SemEfeito => "Sem Efeito",
            Situacao::SemRevogacaoExpressa => "Sem RevogacaoExpressa",
            Situacao::Vetado => "Vetado(a)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Situacao::Inconstitucional => "Declarado(a) Inconstitucional",
            Situacao::Suspensa => "Eficácia Suspensa",
            Situacao::Revogado => "Revogado(a)",
            Situacao::RevogadoParcialmente => "Revogado(a) Parcialmente",
            Situacao::SemRevogacaoExpressa => "Sem Revogação Expressa",
            other => other.value(),
        }
    }
}

impl FromStr for Situacao {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Situacao::ALL
            .into_iter()
            .find(|st| st.value() == s || st.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "situação",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Situacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
