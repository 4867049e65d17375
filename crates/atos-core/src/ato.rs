//! The ato record in its three shapes: form values being edited, the
//! payload posted to the API, and the record the API returns.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::date::deserialize_lenient;
use crate::labels::{Situacao, TipoAto};

/// Values bound to the registration form's controls.
///
/// `None` means the control never produced a value. Text fields accept any
/// string, empty included. Dates hold the raw picker input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtoForm {
    pub numero: Option<String>,
    pub titulo: Option<String>,
    pub ementa: Option<String>,
    pub tipo_id: Option<String>,
    pub situacao: Option<String>,
    pub fonte: Option<String>,
    pub data_ato: Option<String>,
    pub data_publicacao: Option<String>,
    pub descritores: Option<String>,
    /// Remark editor output; opaque markup.
    pub observacao: Option<String>,
    /// Body editor output; opaque markup.
    pub conteudo: Option<String>,
}

/// Form values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAto {
    pub numero: String,
    pub titulo: String,
    pub ementa: String,
    pub tipo: TipoAto,
    pub situacao: Situacao,
    pub fonte: String,
    pub data_ato: Option<NaiveDate>,
    pub data_publicacao: Option<NaiveDate>,
    pub descritores: String,
    pub observacao: String,
    pub conteudo: String,
}

impl ValidatedAto {
    pub fn to_payload(&self) -> AtoPayload {
        AtoPayload {
            numero: self.numero.clone(),
            titulo: self.titulo.clone(),
            ementa: self.ementa.clone(),
            tipo_id: self.tipo.value().to_string(),
            situacao: self.situacao.value().to_string(),
            fonte: self.fonte.clone(),
            data_ato: self.data_ato,
            data_publicacao: self.data_publicacao,
            descritores: self.descritores.clone(),
            observacao: self.observacao.clone(),
            conteudo: self.conteudo.clone(),
        }
    }
}

/// Body of `POST /atos/`.
///
/// Every key is always serialized; absent dates go out as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtoPayload {
    pub numero: String,
    pub titulo: String,
    pub ementa: String,
    pub tipo_id: String,
    pub situacao: String,
    pub fonte: String,
    /// `YYYY-MM-DD` or null.
    pub data_ato: Option<NaiveDate>,
    /// `YYYY-MM-DD` or null.
    pub data_publicacao: Option<NaiveDate>,
    pub descritores: String,
    pub observacao: String,
    pub conteudo: String,
}

impl AtoPayload {
    /// Serialize to the exact bytes sent on the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A stored ato as returned by `GET /atos/{id}`.
///
/// `tipo_id` and `situacao` stay plain strings so records saved with
/// values outside the current label tables still load. Text columns that
/// come back absent or `null` read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ato {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub numero: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub titulo: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ementa: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tipo_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub situacao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fonte: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub data_ato: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub data_publicacao: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub descritores: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub observacao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conteudo: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Ato {
    /// Display label for the stored type, falling back to the raw value.
    pub fn tipo_label(&self) -> &str {
        match self.tipo_id.parse::<TipoAto>() {
            Ok(tipo) => tipo.label(),
            Err(_) => &self.tipo_id,
        }
    }

    pub fn situacao_label(&self) -> &str {
        match self.situacao.parse::<Situacao>() {
            Ok(situacao) => situacao.label(),
            Err(_) => &self.situacao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample() -> ValidatedAto {
        ValidatedAto {
            numero: "123".into(),
            titulo: "Portaria de pessoal".into(),
            ementa: "Dispõe sobre lotação.".into(),
            tipo: TipoAto::Portaria,
            situacao: Situacao::Vigente,
            fonte: "DOE".into(),
            data_ato: NaiveDate::from_ymd_opt(2024, 3, 5),
            data_publicacao: None,
            descritores: "pessoal; lotação".into(),
            observacao: "<p>obs</p>".into(),
            conteudo: "<p>Art. 1º ...</p>".into(),
        }
    }

    #[test]
    fn payload_uses_wire_values() {
        let mut ato = sample();
        ato.tipo = TipoAto::EmendaConstitucional;
        ato.situacao = Situacao::RevogadoParcialmente;
        let payload = ato.to_payload();
        assert_eq!(payload.tipo_id, "Emenda Consitucional");
        assert_eq!(payload.situacao, "Revogado Parcialmente");
    }

    #[test]
    fn payload_json_shape() {
        let json: Value = serde_json::from_str(&sample().to_payload().to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "numero": "123",
                "titulo": "Portaria de pessoal",
                "ementa": "Dispõe sobre lotação.",
                "tipo_id": "Portaria",
                "situacao": "Vigente",
                "fonte": "DOE",
                "data_ato": "2024-03-05",
                "data_publicacao": null,
                "descritores": "pessoal; lotação",
                "observacao": "<p>obs</p>",
                "conteudo": "<p>Art. 1º ...</p>",
            })
        );
    }

    #[test]
    fn null_dates_are_explicit() {
        let mut ato = sample();
        ato.data_ato = None;
        let text = ato.to_payload().to_json().unwrap();
        assert!(text.contains(r#""data_ato":null"#));
        assert!(text.contains(r#""data_publicacao":null"#));
    }

    #[test]
    fn rich_text_passes_through() {
        let mut ato = sample();
        ato.conteudo = r#"{"ops":[{"insert":"Art. 1º\n"}]}"#.into();
        let payload = ato.to_payload();
        assert_eq!(payload.conteudo, ato.conteudo);
    }

    #[test]
    fn serialization_is_stable() {
        let a = sample().to_payload().to_json().unwrap();
        let b = sample().to_payload().to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stored_record_tolerates_sparse_json() {
        let ato: Ato = serde_json::from_str(
            r#"{
                "id": 7,
                "numero": "45",
                "titulo": "Lei 45",
                "ementa": "",
                "tipo_id": "Lei Ordinária",
                "fonte": "DOE",
                "situacao": "Revogado",
                "data_ato": "1999-12-31T00:00:00.000Z",
                "data_publicacao": null,
                "observacao": "<b>nota</b>"
            }"#,
        )
        .unwrap();
        assert_eq!(ato.id, 7);
        assert_eq!(ato.data_ato, NaiveDate::from_ymd_opt(1999, 12, 31));
        assert!(ato.data_publicacao.is_none());
        assert_eq!(ato.descritores, "");
        assert_eq!(ato.situacao_label(), "Revogado(a)");
    }

    #[test]
    fn stored_record_reads_null_text_as_empty() {
        let ato: Ato = serde_json::from_str(
            r#"{"id": 1, "titulo": "Lei 1", "observacao": null, "descritores": null, "conteudo": null}"#,
        )
        .unwrap();
        assert_eq!(ato.titulo, "Lei 1");
        assert_eq!(ato.observacao, "");
        assert_eq!(ato.descritores, "");
        assert_eq!(ato.conteudo, "");
    }

    #[test]
    fn stored_record_keeps_unlisted_labels() {
        let ato: Ato =
            serde_json::from_str(r#"{"id": 1, "tipo_id": "Ato Antigo", "situacao": "?"}"#)
                .unwrap();
        assert_eq!(ato.tipo_label(), "Ato Antigo");
        assert_eq!(ato.situacao_label(), "?");
    }
}
