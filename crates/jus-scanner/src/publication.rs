use crate::case_number::{extract_case_number, extract_date};
use chrono::NaiveDate;
use jus_core::StateCode;
use jus_gazette::GazetteSite;
use serde::{Deserialize, Serialize};

pub const PUBLICATION_TYPE: &str = "intimacao";

/// A gazette mention of a monitored attorney.
///
/// Field names on the wire follow the records consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundPublication {
    #[serde(rename = "nome_advogado")]
    pub attorney_name: String,

    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "conteudo_publicacao")]
    pub content: String,

    /// Date the scan ran, not the gazette's own publication date.
    #[serde(rename = "data_publicacao")]
    pub scan_date: NaiveDate,

    /// First `dd/mm/yyyy` date found in the content, if any.
    #[serde(rename = "data_detectada", skip_serializing_if = "Option::is_none", default)]
    pub detected_date: Option<NaiveDate>,

    #[serde(rename = "diario_oficial")]
    pub gazette: String,

    #[serde(rename = "estado")]
    pub state: StateCode,

    #[serde(rename = "numero_processo")]
    pub case_number: Option<String>,

    #[serde(rename = "tipo_publicacao")]
    pub publication_type: String,

    #[serde(rename = "url_publicacao")]
    pub source_url: String,
}

impl FoundPublication {
    #[must_use]
    pub fn new(
        site: &GazetteSite,
        attorney_name: &str,
        content: String,
        source_url: &str,
        today: NaiveDate,
    ) -> Self {
        Self {
            attorney_name: attorney_name.to_string(),
            title: format!("Publicação encontrada - {}", site.label),
            case_number: extract_case_number(&content),
            detected_date: extract_date(&content),
            content,
            scan_date: today,
            gazette: site.label.clone(),
            state: site.state.clone(),
            publication_type: PUBLICATION_TYPE.to_string(),
            source_url: source_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jus_core::SiteId;

    fn site() -> GazetteSite {
        GazetteSite {
            id: SiteId::new("dje-sp").expect("valid site ID"),
            state: StateCode::new("SP").expect("valid state"),
            label: "DJE-SP".to_string(),
            url: "https://dje.tjsp.jus.br/cdje/index.do".to_string(),
            selector: "div.conteudo".to_string(),
        }
    }

    #[test]
    fn test_new_publication() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date");
        let publication = FoundPublication::new(
            &site(),
            "Maria Souza",
            "Processo 1234567-89.2024.8.26.0100 adv. Maria Souza, prazo até 10/05/2024".to_string(),
            "https://dje.tjsp.jus.br/cdje/index.do",
            today,
        );

        assert_eq!(publication.title, "Publicação encontrada - DJE-SP");
        assert_eq!(publication.gazette, "DJE-SP");
        assert_eq!(publication.state.as_str(), "SP");
        assert_eq!(
            publication.case_number.as_deref(),
            Some("1234567-89.2024.8.26.0100")
        );
        assert_eq!(publication.scan_date, today);
        assert_eq!(publication.detected_date, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(publication.publication_type, PUBLICATION_TYPE);
    }

    #[test]
    fn test_serialized_field_names() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date");
        let publication = FoundPublication::new(
            &site(),
            "Maria Souza",
            "Intimação de Maria Souza".to_string(),
            "https://dje.tjsp.jus.br/cdje/index.do",
            today,
        );

        let json = serde_json::to_value(&publication).expect("serialize publication");
        assert_eq!(json["nome_advogado"], "Maria Souza");
        assert_eq!(json["titulo"], "Publicação encontrada - DJE-SP");
        assert_eq!(json["data_publicacao"], "2024-05-02");
        assert_eq!(json["diario_oficial"], "DJE-SP");
        assert_eq!(json["estado"], "SP");
        assert!(json["numero_processo"].is_null());
        assert_eq!(json["tipo_publicacao"], "intimacao");
        assert_eq!(json["url_publicacao"], "https://dje.tjsp.jus.br/cdje/index.do");
        assert!(json.get("data_detectada").is_none());

        let back: FoundPublication = serde_json::from_value(json).expect("deserialize publication");
        assert_eq!(back, publication);
    }
}
