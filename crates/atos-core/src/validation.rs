//! Form validation: every field is checked and all failures are collected.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::ato::{AtoForm, ValidatedAto};
use crate::date::parse_date_input;
use crate::labels::{Situacao, TipoAto, UnknownLabel};

/// A form field, named as the API names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Numero,
    Titulo,
    Ementa,
    TipoId,
    Situacao,
    Fonte,
    DataAto,
    DataPublicacao,
    Descritores,
    Observacao,
    Conteudo,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Numero => "numero",
            Field::Titulo => "titulo",
            Field::Ementa => "ementa",
            Field::TipoId => "tipo_id",
            Field::Situacao => "situacao",
            Field::Fonte => "fonte",
            Field::DataAto => "data_ato",
            Field::DataPublicacao => "data_publicacao",
            Field::Descritores => "descritores",
            Field::Observacao => "observacao",
            Field::Conteudo => "conteudo",
        }
    }

    /// Label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            Field::Numero => "Número",
            Field::Titulo => "Título",
            Field::Ementa => "Ementa",
            Field::TipoId => "Tipo",
            Field::Situacao => "Situação",
            Field::Fonte => "Fonte",
            Field::DataAto => "Data do ato",
            Field::DataPublicacao => "Data de publicação",
            Field::Descritores => "Descritores",
            Field::Observacao => "Observação",
            Field::Conteudo => "Conteúdo do Ato Normativo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("campo obrigatório")]
    Required,
    /// Carries the rejected value.
    #[error("opção inválida {0:?}")]
    UnknownLabel(String),
    /// Carries the rejected input.
    #[error("data inválida {0:?}")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
}

/// All field errors found in one validation pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn get(&self, field: Field) -> Option<&FieldErrorKind> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check form values and convert them into a [`ValidatedAto`].
///
/// Rules:
/// - text fields must be present; an empty string is accepted
/// - `tipo_id` and `situacao` must name an entry of their label table
/// - dates may be absent or empty, otherwise they must be real calendar dates
pub fn validate(form: &AtoForm) -> Result<ValidatedAto, ValidationErrors> {
    let checked = (
        text(Field::Numero, &form.numero),
        text(Field::Titulo, &form.titulo),
        text(Field::Ementa, &form.ementa),
        label::<TipoAto>(Field::TipoId, &form.tipo_id),
        label::<Situacao>(Field::Situacao, &form.situacao),
        text(Field::Fonte, &form.fonte),
        date(Field::DataAto, &form.data_ato),
        date(Field::DataPublicacao, &form.data_publicacao),
        text(Field::Descritores, &form.descritores),
        text(Field::Observacao, &form.observacao),
        text(Field::Conteudo, &form.conteudo),
    );

    match checked {
        (
            Ok(numero),
            Ok(titulo),
            Ok(ementa),
            Ok(tipo),
            Ok(situacao),
            Ok(fonte),
            Ok(data_ato),
            Ok(data_publicacao),
            Ok(descritores),
            Ok(observacao),
            Ok(conteudo),
        ) => Ok(ValidatedAto {
            numero,
            titulo,
            ementa,
            tipo,
            situacao,
            fonte,
            data_ato,
            data_publicacao,
            descritores,
            observacao,
            conteudo,
        }),
        // At least one check failed, so the list is non-empty.
        (
            numero,
            titulo,
            ementa,
            tipo,
            situacao,
            fonte,
            data_ato,
            data_publicacao,
            descritores,
            observacao,
            conteudo,
        ) => {
            let errors: Vec<FieldError> = [
                numero.err(),
                titulo.err(),
                ementa.err(),
                tipo.err(),
                situacao.err(),
                fonte.err(),
                data_ato.err(),
                data_publicacao.err(),
                descritores.err(),
                observacao.err(),
                conteudo.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            debug!(count = errors.len(), "form validation failed");
            Err(ValidationErrors(errors))
        }
    }
}

// ── Field checks ──

fn text(field: Field, value: &Option<String>) -> Result<String, FieldError> {
    value.clone().ok_or(FieldError {
        field,
        kind: FieldErrorKind::Required,
    })
}

fn label<T>(field: Field, value: &Option<String>) -> Result<T, FieldError>
where
    T: FromStr<Err = UnknownLabel>,
{
    text(field, value)?.parse::<T>().map_err(|e| FieldError {
        field,
        kind: FieldErrorKind::UnknownLabel(e.value),
    })
}

fn date(field: Field, value: &Option<String>) -> Result<Option<NaiveDate>, FieldError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    parse_date_input(raw).map_err(|e| FieldError {
        field,
        kind: FieldErrorKind::InvalidDate(e.0),
    })
}
