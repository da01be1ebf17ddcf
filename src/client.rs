use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Result, TixError};
use crate::types::{Ticket, TicketPage, TicketStatus};

/// Tickets requested per listing page.
pub const PAGE_SIZE: u32 = 5;

/// Read-only surface of the remote ticket service.
#[async_trait]
pub trait TicketService: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<TicketPage>;
    async fn fetch_ticket(&self, id: &str) -> Result<Ticket>;
}

pub struct HelpDesk {
    client: Client,
    base_url: String,
}

impl HelpDesk {
    pub fn new(base_url: String) -> Result<Self> {
        reqwest::Url::parse(&base_url)
            .map_err(|e| TixError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TixError::Api(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TixError::Api(format!("ticket service {}: {}", status, text)));
        }

        response
            .json()
            .await
            .map_err(|e| TixError::Api(e.to_string()))
    }
}

impl std::fmt::Debug for HelpDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpDesk")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// Service API response types. Field names follow the wire format.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePage {
    content: Option<Vec<WireTicket>>,
    number: Option<u32>,
    total_pages: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTicket {
    id_ticket: Option<i64>,
    nro_ticket: Option<WireNumber>,
    categoria: Option<WireCategory>,
    titulo_ticket: Option<String>,
    desc_ticket: Option<String>,
    usuario: Option<WireRequester>,
    soporte: Option<WireAgent>,
    estado_ticket: Option<i64>,
    fecha_creacion_ticket: Option<String>,
    fecha_asignacion_ticket: Option<String>,
}

/// Display numbers arrive as either a string or a bare integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Text(String),
    Numeric(i64),
}

impl WireNumber {
    fn into_string(self) -> String {
        match self {
            WireNumber::Text(s) => s,
            WireNumber::Numeric(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCategory {
    nom_categoria: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequester {
    nom_usuario: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAgent {
    nom_soporte: Option<String>,
}

/// Timestamps arrive as ISO strings, with or without a zone offset.
/// Offset-less values are taken as UTC; unparseable values map to absent.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|n| n.and_utc())
}

impl From<WireTicket> for Ticket {
    fn from(w: WireTicket) -> Self {
        Ticket {
            id: w.id_ticket.unwrap_or_default(),
            number: w.nro_ticket.map(WireNumber::into_string).unwrap_or_default(),
            category: w.categoria.and_then(|c| c.nom_categoria),
            title: w.titulo_ticket.unwrap_or_default(),
            description: w.desc_ticket.unwrap_or_default(),
            requester: w.usuario.and_then(|u| u.nom_usuario),
            assignee: w.soporte.and_then(|s| s.nom_soporte),
            status: TicketStatus::from_code(w.estado_ticket),
            created_at: w.fecha_creacion_ticket.as_deref().and_then(parse_datetime),
            assigned_at: w.fecha_asignacion_ticket.as_deref().and_then(parse_datetime),
        }
    }
}

#[async_trait]
impl TicketService for HelpDesk {
    async fn fetch_page(&self, page: u32) -> Result<TicketPage> {
        let url = self.api_url(&format!("/ticket/page?page={}&size={}", page, PAGE_SIZE));
        let wire: WirePage = self.get_json(&url).await?;

        Ok(TicketPage {
            tickets: wire
                .content
                .unwrap_or_default()
                .into_iter()
                .map(Ticket::from)
                .collect(),
            number: wire.number.unwrap_or(page),
            total_pages: wire.total_pages.unwrap_or_default(),
        })
    }

    async fn fetch_ticket(&self, id: &str) -> Result<Ticket> {
        let url = self.api_url(&format!("/ticket/{}", urlencoding::encode(id)));
        let wire: WireTicket = self.get_json(&url).await?;
        Ok(wire.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn full_ticket_maps_to_domain() {
        let json = serde_json::json!({
            "idTicket": 42,
            "nroTicket": "TK-0042",
            "categoria": { "nomCategoria": "Hardware" },
            "tituloTicket": "Broken printer",
            "descTicket": "Paper jam on floor 3",
            "usuario": { "nomUsuario": "ana" },
            "soporte": { "nomSoporte": "luis" },
            "estadoTicket": 1,
            "fechaCreacionTicket": "2024-05-01T10:30:00",
            "fechaAsignacionTicket": "2024-05-02T09:00:00Z"
        });

        let wire: WireTicket = serde_json::from_value(json).unwrap();
        let ticket = Ticket::from(wire);

        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.number, "TK-0042");
        assert_eq!(ticket.category.as_deref(), Some("Hardware"));
        assert_eq!(ticket.title, "Broken printer");
        assert_eq!(ticket.requester.as_deref(), Some("ana"));
        assert_eq!(ticket.assignee.as_deref(), Some("luis"));
        assert_eq!(ticket.status, TicketStatus::Active);
        assert_eq!(
            ticket.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single()
        );
        assert_eq!(
            ticket.assigned_at,
            Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).single()
        );
    }

    #[test]
    fn sparse_ticket_maps_to_fallbacks() {
        let json = serde_json::json!({
            "idTicket": 7,
            "tituloTicket": "No category yet",
            "descTicket": "",
            "estadoTicket": 0
        });

        let wire: WireTicket = serde_json::from_value(json).unwrap();
        let ticket = Ticket::from(wire);

        assert_eq!(ticket.id, 7);
        assert_eq!(ticket.number, "");
        assert_eq!(ticket.category, None);
        assert_eq!(ticket.requester, None);
        assert_eq!(ticket.assignee, None);
        assert_eq!(ticket.status, TicketStatus::Inactive);
        assert_eq!(ticket.created_at, None);
        assert_eq!(ticket.assigned_at, None);
    }

    #[test]
    fn nested_entity_with_null_name_maps_to_none() {
        let json = serde_json::json!({
            "idTicket": 8,
            "categoria": { "nomCategoria": null },
            "estadoTicket": 1
        });

        let wire: WireTicket = serde_json::from_value(json).unwrap();
        let ticket = Ticket::from(wire);
        assert_eq!(ticket.category, None);
    }

    #[test]
    fn numeric_display_number_is_accepted() {
        let json = serde_json::json!({ "idTicket": 9, "nroTicket": 1042 });
        let wire: WireTicket = serde_json::from_value(json).unwrap();
        assert_eq!(Ticket::from(wire).number, "1042");
    }

    #[test]
    fn page_maps_content_and_counters() {
        let json = serde_json::json!({
            "content": [
                { "idTicket": 1, "estadoTicket": 1 },
                { "idTicket": 2, "estadoTicket": 0 }
            ],
            "number": 2,
            "totalPages": 5
        });

        let wire: WirePage = serde_json::from_value(json).unwrap();
        let tickets: Vec<Ticket> = wire
            .content
            .unwrap_or_default()
            .into_iter()
            .map(Ticket::from)
            .collect();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id, 1);
        assert_eq!(wire.number, Some(2));
        assert_eq!(wire.total_pages, Some(5));
    }

    #[test]
    fn parse_datetime_accepts_both_iso_forms() {
        assert_eq!(
            parse_datetime("2024-05-01T10:30:00Z"),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single()
        );
        assert_eq!(
            parse_datetime("2024-05-01T10:30:00"),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single()
        );
        assert_eq!(
            parse_datetime("2024-05-01T10:30:00.250"),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
                .single()
                .map(|d| d + chrono::Duration::milliseconds(250))
        );
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let desk = HelpDesk::new("http://desk.example.com/".to_string()).unwrap();
        assert_eq!(
            desk.api_url("/ticket/page?page=0&size=5"),
            "http://desk.example.com/ticket/page?page=0&size=5"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HelpDesk::new("not a url".to_string()),
            Err(TixError::Config(_))
        ));
    }
}
