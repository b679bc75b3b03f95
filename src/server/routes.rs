//! HTTP Routes Module
//! The form page and the report download endpoint.

use axum::{
    extract::Form,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;

use crate::currency::{parse_brl, CurrencyError};
use crate::report::{build_report, ReportError, SalesRecord};

const FORM_PAGE: &str = include_str!("../../templates/index.html");
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Fields of the report form as the browser submits them. The currency
/// fields arrive masked ("1.234,56"); the quantities are plain integers,
/// so negatives are already rejected by deserialization.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
    pub item: String,
    pub mes: String,
    pub valor_item: String,
    pub custo_produto: String,
    pub vendidos: u32,
    pub estoque: u32,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid field {field}: {source}")]
    InvalidCurrency {
        field: &'static str,
        source: CurrencyError,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidCurrency { .. } => StatusCode::BAD_REQUEST,
            ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "report generation failed");
        }
        (status, self.to_string()).into_response()
    }
}

pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}

pub async fn generate_report(Form(form): Form<ReportForm>) -> Result<Response, ApiError> {
    let record = SalesRecord {
        unit_price: parse_currency_field("valor_item", &form.valor_item)?,
        unit_cost: parse_currency_field("custo_produto", &form.custo_produto)?,
        units_sold: i64::from(form.vendidos),
        stock_on_hand: i64::from(form.estoque),
        item: form.item,
        period: form.mes,
    };

    tracing::info!(item = %record.item, period = %record.period, "generating report");
    let bytes = build_report(&record)?;

    let filename = format!(
        "relatorio_{}_{}.xlsx",
        sanitize(&record.item),
        sanitize(&record.period)
    );
    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

fn parse_currency_field(field: &'static str, raw: &str) -> Result<f64, ApiError> {
    parse_brl(raw).map_err(|source| ApiError::InvalidCurrency { field, source })
}

/// Download names must stay header-safe: ASCII, no separators, no quotes.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn form_page_is_served() {
        let response = crate::server::router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn report_download_has_attachment_headers() {
        let body =
            "item=Widget&mes=Marco-2024&valor_item=10,00&custo_produto=6,00&vendidos=100&estoque=150";
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = crate::server::router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XLSX_MIME
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("relatorio_Widget_Marco-2024.xlsx"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn malformed_currency_is_rejected() {
        let body = "item=Widget&mes=Marco&valor_item=abc&custo_produto=6,00&vendidos=1&estoque=1";
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = crate::server::router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sanitize_keeps_names_header_safe() {
        assert_eq!(sanitize("Março/2024"), "Mar-o-2024");
        assert_eq!(sanitize("Widget X"), "Widget-X");
        assert_eq!(sanitize("caixa_12.5"), "caixa_12.5");
    }
}
