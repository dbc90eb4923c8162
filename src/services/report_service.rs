//! Reporte mensual de breaks por mecánico
//!
//! La consulta trae los breaks crudos del mes; todo lo demás es lógica pura
//! sobre esas filas: el filtro de ventana de colación, la agregación por
//! mecánico y el render CSV. Nada de esto se persiste.

use chrono::{Datelike, Timelike, Utc};
use sqlx::PgPool;

use crate::dto::report_dto::BreaksReportFilters;
use crate::models::report::{BreakDetalle, BreakReportRow, BreaksReport, MecanicoBreakResumen};
use crate::repositories::ReportRepository;
use crate::utils::csv::escape_csv;
use crate::utils::errors::AppResult;

/// Margen en minutos alrededor de la ventana de colación
const MARGEN_COLACION_MIN: i64 = 10;

pub struct ReportService {
    repository: ReportRepository,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReportRepository::new(pool),
        }
    }

    /// Reporte de breaks del mes; sin filtros usa el mes y año actuales
    pub async fn breaks_report(&self, filters: &BreaksReportFilters) -> AppResult<BreaksReport> {
        let ahora = Utc::now();
        let mes = filters.mes.unwrap_or_else(|| ahora.month());
        let anno = filters.anno.unwrap_or_else(|| ahora.year());

        let rows = self.repository.find_breaks_for_month(mes, anno).await?;
        Ok(armar_reporte(mes, anno, &rows))
    }
}

/// true si el break se contabiliza en el reporte
///
/// Un break queda fuera solo cuando partió dentro de la ventana de colación
/// del día (con margen de ±10 minutos, bordes inclusive). Sin colación
/// configurada para ese día, o en fin de semana, el break siempre cuenta.
pub fn break_cuenta(row: &BreakReportRow) -> bool {
    let (colacion_inicio, colacion_salida) = match (row.colacion_inicio, row.colacion_salida) {
        (Some(inicio), Some(salida)) => (inicio, salida),
        _ => return true,
    };
    if !(1..=5).contains(&row.dia_semana) {
        return true;
    }

    let inicio_break = row.hora_inicio.time();
    let minuto_break = i64::from(inicio_break.hour()) * 60 + i64::from(inicio_break.minute());
    let ventana_desde =
        i64::from(colacion_inicio.hour()) * 60 + i64::from(colacion_inicio.minute())
            - MARGEN_COLACION_MIN;
    let ventana_hasta =
        i64::from(colacion_salida.hour()) * 60 + i64::from(colacion_salida.minute())
            + MARGEN_COLACION_MIN;

    !(minuto_break >= ventana_desde && minuto_break <= ventana_hasta)
}

/// Duración del break en minutos, redondeada al minuto más cercano
fn duracion_minutos(row: &BreakReportRow) -> i64 {
    match row.hora_termino {
        Some(termino) => {
            let ms = (termino - row.hora_inicio).num_milliseconds();
            (ms as f64 / 60_000.0).round() as i64
        }
        None => 0,
    }
}

/// Agrupar los breaks contables por mecánico y ordenar por minutos totales
///
/// El orden de llegada (nombre, hora de inicio) define el orden de los
/// detalles; el resultado final se ordena descendente por minutos totales
/// con orden estable para los empates.
pub fn armar_reporte(mes: u32, anno: i32, rows: &[BreakReportRow]) -> BreaksReport {
    let mut mecanicos: Vec<MecanicoBreakResumen> = Vec::new();
    let mut total_breaks = 0usize;

    for row in rows {
        if !break_cuenta(row) {
            continue;
        }
        total_breaks += 1;

        let idx = match mecanicos
            .iter()
            .position(|m| m.mecanico_id == row.mecanico_id)
        {
            Some(idx) => idx,
            None => {
                mecanicos.push(MecanicoBreakResumen {
                    mecanico_id: row.mecanico_id,
                    mecanico_rut: row.mecanico_rut.clone().unwrap_or_default(),
                    mecanico_nombre: row.mecanico_nombre.clone(),
                    mecanico_email: row.mecanico_email.clone(),
                    total_breaks: 0,
                    total_minutos: 0,
                    total_horas_formateado: String::new(),
                    breaks: Vec::new(),
                });
                mecanicos.len() - 1
            }
        };
        let resumen = &mut mecanicos[idx];

        resumen.total_breaks += 1;
        resumen.total_minutos += duracion_minutos(row);
        resumen.breaks.push(BreakDetalle {
            id: row.break_id,
            hora_inicio: row.hora_inicio,
            hora_termino: row.hora_termino,
        });
    }

    for resumen in &mut mecanicos {
        resumen.total_horas_formateado = formatear_total(resumen.total_minutos);
    }
    mecanicos.sort_by_key(|m| std::cmp::Reverse(m.total_minutos));

    BreaksReport {
        mes,
        anno,
        total_mecanicos: mecanicos.len(),
        total_breaks,
        mecanicos,
    }
}

/// `"{h} Horas {m} Minutos"`
pub fn formatear_total(minutos: i64) -> String {
    format!("{} Horas {} Minutos", minutos / 60, minutos % 60)
}

/// CSV del reporte
///
/// Sin mecánicos se emite la cabecera corta histórica; con datos la cabecera
/// incluye además el id y el rut del mecánico. Las líneas van unidas por
/// `\n`, sin salto final salvo en el caso vacío.
pub fn breaks_report_csv(report: &BreaksReport) -> String {
    if report.mecanicos.is_empty() {
        return String::from("Mecánico,Email,Total Breaks,Total Horas\n");
    }

    let mut lineas = vec![String::from("ID,RUT,Mecánico,Email,Total Breaks,Total Horas")];
    for mecanico in &report.mecanicos {
        lineas.push(format!(
            "{},{},{},{},{},{}",
            mecanico.mecanico_id,
            escape_csv(&mecanico.mecanico_rut),
            escape_csv(&mecanico.mecanico_nombre),
            escape_csv(&mecanico.mecanico_email),
            mecanico.total_breaks,
            escape_csv(&mecanico.total_horas_formateado),
        ));
    }
    lineas.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, TimeZone, Utc};

    fn fecha(anno: i32, mes: u32, dia: u32, hora: u32, minuto: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(anno, mes, dia, hora, minuto, 0).unwrap()
    }

    fn hora(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn fila(
        mecanico_id: i32,
        nombre: &str,
        break_id: i32,
        inicio: DateTime<Utc>,
        duracion_min: i64,
        dia_semana: i32,
        colacion: Option<(NaiveTime, NaiveTime)>,
    ) -> BreakReportRow {
        BreakReportRow {
            mecanico_id,
            mecanico_rut: Some(format!("{}-9", 10_000_000 + mecanico_id)),
            mecanico_nombre: nombre.to_string(),
            mecanico_email: format!("{}@taller.cl", nombre.to_lowercase().replace(' ', ".")),
            break_id,
            hora_inicio: inicio,
            hora_termino: Some(inicio + chrono::Duration::minutes(duracion_min)),
            dia_semana,
            colacion_inicio: colacion.map(|c| c.0),
            colacion_salida: colacion.map(|c| c.1),
        }
    }

    // Colación 13:00-14:00 => ventana de exclusión 12:50-14:10 inclusive

    #[test]
    fn test_break_dentro_de_la_ventana_no_cuenta() {
        let row = fila(
            1,
            "Juan Soto",
            1,
            fecha(2025, 3, 4, 13, 30),
            30,
            2,
            Some((hora(13, 0), hora(14, 0))),
        );
        assert!(!break_cuenta(&row));
    }

    #[test]
    fn test_bordes_de_la_ventana_son_inclusivos() {
        let colacion = Some((hora(13, 0), hora(14, 0)));
        let borde_inferior = fila(1, "Juan Soto", 1, fecha(2025, 3, 4, 12, 50), 10, 2, colacion);
        let borde_superior = fila(1, "Juan Soto", 2, fecha(2025, 3, 4, 14, 10), 10, 2, colacion);
        assert!(!break_cuenta(&borde_inferior));
        assert!(!break_cuenta(&borde_superior));
    }

    #[test]
    fn test_un_minuto_fuera_de_la_ventana_cuenta() {
        let colacion = Some((hora(13, 0), hora(14, 0)));
        let antes = fila(1, "Juan Soto", 1, fecha(2025, 3, 4, 12, 49), 10, 2, colacion);
        let despues = fila(1, "Juan Soto", 2, fecha(2025, 3, 4, 14, 11), 10, 2, colacion);
        assert!(break_cuenta(&antes));
        assert!(break_cuenta(&despues));
    }

    #[test]
    fn test_sin_colacion_configurada_siempre_cuenta() {
        let row = fila(1, "Juan Soto", 1, fecha(2025, 3, 4, 13, 30), 30, 2, None);
        assert!(break_cuenta(&row));
    }

    #[test]
    fn test_fin_de_semana_cuenta_aunque_haya_colacion() {
        // DOW 6 = sábado, 0 = domingo
        let colacion = Some((hora(13, 0), hora(14, 0)));
        let sabado = fila(1, "Juan Soto", 1, fecha(2025, 3, 8, 13, 30), 30, 6, colacion);
        let domingo = fila(1, "Juan Soto", 2, fecha(2025, 3, 9, 13, 30), 30, 0, colacion);
        assert!(break_cuenta(&sabado));
        assert!(break_cuenta(&domingo));
    }

    #[test]
    fn test_reporte_marzo_2025_agrega_por_mecanico() {
        let colacion = Some((hora(13, 0), hora(14, 0)));
        let rows = vec![
            // Ana: dos breaks contables de 15 y 20 minutos
            fila(2, "Ana Rojas", 10, fecha(2025, 3, 3, 10, 0), 15, 1, colacion),
            fila(2, "Ana Rojas", 11, fecha(2025, 3, 5, 16, 0), 20, 3, colacion),
            // Ana: break en colación, excluido
            fila(2, "Ana Rojas", 12, fecha(2025, 3, 4, 13, 15), 45, 2, colacion),
            // Juan: un break contable de 90 minutos
            fila(1, "Juan Soto", 20, fecha(2025, 3, 6, 9, 0), 90, 4, colacion),
        ];

        let report = armar_reporte(3, 2025, &rows);
        assert_eq!(report.mes, 3);
        assert_eq!(report.anno, 2025);
        assert_eq!(report.total_mecanicos, 2);
        assert_eq!(report.total_breaks, 3);

        // Juan lidera con 90 minutos sobre los 35 de Ana
        assert_eq!(report.mecanicos[0].mecanico_nombre, "Juan Soto");
        assert_eq!(report.mecanicos[0].total_breaks, 1);
        assert_eq!(report.mecanicos[0].total_minutos, 90);
        assert_eq!(report.mecanicos[0].total_horas_formateado, "1 Horas 30 Minutos");

        assert_eq!(report.mecanicos[1].mecanico_nombre, "Ana Rojas");
        assert_eq!(report.mecanicos[1].total_breaks, 2);
        assert_eq!(report.mecanicos[1].total_minutos, 35);
        assert_eq!(report.mecanicos[1].total_horas_formateado, "0 Horas 35 Minutos");
        assert_eq!(report.mecanicos[1].breaks.len(), 2);
    }

    #[test]
    fn test_empate_de_minutos_conserva_orden_de_llegada() {
        let rows = vec![
            fila(1, "Ana Rojas", 1, fecha(2025, 3, 3, 10, 0), 30, 1, None),
            fila(2, "Juan Soto", 2, fecha(2025, 3, 3, 11, 0), 30, 1, None),
        ];
        let report = armar_reporte(3, 2025, &rows);
        assert_eq!(report.mecanicos[0].mecanico_nombre, "Ana Rojas");
        assert_eq!(report.mecanicos[1].mecanico_nombre, "Juan Soto");
    }

    #[test]
    fn test_duracion_redondea_al_minuto_mas_cercano() {
        let inicio = fecha(2025, 3, 3, 10, 0);
        let mut row = fila(1, "Juan Soto", 1, inicio, 0, 1, None);

        row.hora_termino = Some(inicio + chrono::Duration::seconds(89));
        assert_eq!(duracion_minutos(&row), 1);

        row.hora_termino = Some(inicio + chrono::Duration::seconds(91));
        assert_eq!(duracion_minutos(&row), 2);
    }

    #[test]
    fn test_formatear_total() {
        assert_eq!(formatear_total(0), "0 Horas 0 Minutos");
        assert_eq!(formatear_total(59), "0 Horas 59 Minutos");
        assert_eq!(formatear_total(60), "1 Horas 0 Minutos");
        assert_eq!(formatear_total(135), "2 Horas 15 Minutos");
    }

    #[test]
    fn test_csv_vacio_emite_solo_cabecera() {
        let report = armar_reporte(3, 2025, &[]);
        assert_eq!(
            breaks_report_csv(&report),
            "Mecánico,Email,Total Breaks,Total Horas\n"
        );
    }

    #[test]
    fn test_csv_con_datos_no_termina_en_salto_de_linea() {
        let rows = vec![
            fila(1, "Juan Soto", 1, fecha(2025, 3, 3, 10, 0), 30, 1, None),
            fila(2, "Ana Rojas", 2, fecha(2025, 3, 3, 11, 0), 45, 1, None),
        ];
        let csv = breaks_report_csv(&armar_reporte(3, 2025, &rows));
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_csv_escapa_nombres_con_coma() {
        let rows = vec![fila(1, "Soto, Juan", 1, fecha(2025, 3, 3, 10, 0), 30, 1, None)];
        let report = armar_reporte(3, 2025, &rows);
        let csv = breaks_report_csv(&report);
        let mut lineas = csv.lines();
        assert_eq!(
            lineas.next(),
            Some("ID,RUT,Mecánico,Email,Total Breaks,Total Horas")
        );
        let linea = lineas.next().unwrap();
        assert!(linea.contains("\"Soto, Juan\""));
        assert!(linea.ends_with(",1,0 Horas 30 Minutos"));
    }

    #[test]
    fn test_escenario_marzo_2025() {
        // Colación 13:00-14:00: un break a las 12:52 cae dentro del margen
        // (12:50) y queda fuera; el de 09:00-09:15 cuenta 15 minutos.
        let colacion = Some((hora(13, 0), hora(14, 0)));
        let rows = vec![
            fila(1, "Juan Soto", 1, fecha(2025, 3, 4, 12, 52), 40, 2, colacion),
            fila(1, "Juan Soto", 2, fecha(2025, 3, 5, 9, 0), 15, 3, colacion),
        ];
        let report = armar_reporte(3, 2025, &rows);
        assert_eq!(report.total_breaks, 1);
        assert_eq!(report.mecanicos[0].total_minutos, 15);
        assert_eq!(report.mecanicos[0].total_horas_formateado, "0 Horas 15 Minutos");
    }

    #[test]
    fn test_agregacion_es_idempotente_sobre_las_mismas_filas() {
        let rows = vec![
            fila(1, "Juan Soto", 1, fecha(2025, 3, 3, 10, 0), 30, 1, None),
            fila(2, "Ana Rojas", 2, fecha(2025, 3, 3, 11, 0), 45, 1, None),
        ];
        let a = armar_reporte(3, 2025, &rows);
        let b = armar_reporte(3, 2025, &rows);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
