pub mod auth_routes;
pub mod history_routes;
pub mod notification_routes;
pub mod report_routes;
pub mod solicitud_routes;
pub mod stock_routes;
pub mod user_routes;
pub mod vehicle_routes;
pub mod workorder_routes;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::controllers::history_controller::CsvExport;

/// BOM UTF-8 para que Excel abra el CSV con la codificación correcta
const UTF8_BOM: &str = "\u{feff}";

/// Respuesta de descarga de un CSV, con BOM y nombre de archivo
pub fn csv_response(export: CsvExport) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        )
        .body(Body::from(format!("{}{}", UTF8_BOM, export.csv)))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_ejemplo() -> CsvExport {
        CsvExport {
            filename: "reporte_breaks_3_2025_2025-03-31.csv".to_string(),
            csv: "ID,RUT,Mecánico,Email,Total Breaks,Total Horas\n1,11.111.111-1,Juan Pérez,juan@taller.cl,2,1 Horas 0 Minutos".to_string(),
        }
    }

    #[tokio::test]
    async fn test_csv_response_lleva_bom_y_headers_de_descarga() {
        let response = csv_response(export_ejemplo());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"reporte_breaks_3_2025_2025-03-31.csv\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let texto = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(texto.starts_with('\u{feff}'));
        // El BOM va una sola vez, antes del contenido intacto
        assert_eq!(
            texto.strip_prefix('\u{feff}').unwrap(),
            export_ejemplo().csv
        );
    }

    #[tokio::test]
    async fn test_csv_response_con_export_vacio() {
        let response = csv_response(CsvExport {
            filename: "historial_ordenes_trabajo_2025-03-31.csv".to_string(),
            csv: String::new(),
        });

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"historial_"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // Incluso sin filas, la descarga conserva el BOM
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "\u{feff}");
    }
}
