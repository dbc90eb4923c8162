//! Generación de CSV para exportaciones
//!
//! Escapado estilo RFC-4180 y construcción genérica de documentos a partir
//! de registros planos. El BOM UTF-8 se antepone una sola vez en la capa
//! HTTP, nunca aquí.

use serde_json::Value;

/// Escapar un valor para CSV
///
/// Devuelve el valor sin cambios salvo que contenga coma, comilla doble o
/// salto de línea; en ese caso lo envuelve en comillas dobles y duplica las
/// comillas internas.
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renderizar una celda a partir de un valor JSON
///
/// null → cadena vacía, objetos/arreglos → JSON serializado,
/// strings sin comillas extra, el resto coercionado a string.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        other => other.to_string(),
    }
}

/// Construir un documento CSV a partir de registros planos
///
/// La fila de headers se deriva de las claves del primer registro (en orden
/// de inserción). Si no hay registros devuelve cadena vacía, sin header.
pub fn build_csv(rows: &[Value]) -> String {
    let first = match rows.first().and_then(|r| r.as_object()) {
        Some(obj) => obj,
        None => return String::new(),
    };

    let headers: Vec<String> = first.keys().cloned().collect();

    let mut csv_rows = Vec::with_capacity(rows.len() + 1);
    csv_rows.push(
        headers
            .iter()
            .map(|h| escape_csv(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let values: Vec<String> = headers
            .iter()
            .map(|header| {
                let cell = row.get(header).unwrap_or(&Value::Null);
                escape_csv(&render_cell(cell))
            })
            .collect();
        csv_rows.push(values.join(","));
    }

    csv_rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_plain_value_unchanged() {
        assert_eq!(escape_csv("repuesto"), "repuesto");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_escape_comma() {
        assert_eq!(escape_csv("filtro, aceite"), "\"filtro, aceite\"");
    }

    #[test]
    fn test_escape_quotes_doubled() {
        assert_eq!(escape_csv("pastilla \"premium\""), "\"pastilla \"\"premium\"\"\"");
    }

    #[test]
    fn test_escape_newline() {
        assert_eq!(escape_csv("linea1\nlinea2"), "\"linea1\nlinea2\"");
    }

    #[test]
    fn test_escape_roundtrip_with_standard_parsing() {
        // des-escapar según reglas CSV estándar recupera el original
        let original = "a,b \"c\"";
        let escaped = escape_csv(original);
        let inner = &escaped[1..escaped.len() - 1];
        assert_eq!(inner.replace("\"\"", "\""), original);
    }

    #[test]
    fn test_build_csv_empty_returns_empty_string() {
        assert_eq!(build_csv(&[]), "");
    }

    #[test]
    fn test_build_csv_headers_follow_first_record_order() {
        let rows = vec![
            json!({"numero_ot": 12, "patente": "AB-123", "estado": Value::Null}),
            json!({"numero_ot": 13, "patente": "CD,456", "estado": "CERRADA"}),
        ];
        let csv = build_csv(&rows);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "numero_ot,patente,estado");
        assert_eq!(lines[1], "12,AB-123,");
        assert_eq!(lines[2], "13,\"CD,456\",CERRADA");
    }

    #[test]
    fn test_build_csv_object_cell_serialized_as_json() {
        let rows = vec![json!({"id": 1, "detalle": {"cantidad": 2}})];
        let csv = build_csv(&rows);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[1], "1,\"{\"\"cantidad\"\":2}\"");
    }
}
