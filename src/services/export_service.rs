//! Armado de exports CSV y PDF
//!
//! El renderizado sofisticado queda fuera del back office: acá sólo se
//! ensamblan los bytes. El CSV escapa comillas al estilo RFC 4180; el
//! PDF es un documento mínimo de una página A4 apaisada (título más
//! filas de texto) escrito a mano, sin motor de layout.

/// Escapar un valor de celda CSV
fn csv_escape(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Construir un CSV con encabezados y filas
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| csv_escape(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Escapar texto para un string literal de PDF
fn pdf_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Construir un PDF mínimo de una página (A4 apaisada)
///
/// `rows` se trunca a 25 líneas, igual que el reporte original.
pub fn build_pdf(title: &str, header_line: &str, rows: &[String]) -> Vec<u8> {
    let mut content = String::new();
    content.push_str(&format!(
        "BT /F1 16 Tf 50 560 Td ({}) Tj ET\n",
        pdf_escape(title)
    ));
    content.push_str("BT /F1 9 Tf 50 530 Td 14 TL\n");
    content.push_str(&format!("({}) Tj T*\n", pdf_escape(header_line)));
    for row in rows.iter().take(25) {
        content.push_str(&format!("({}) Tj T*\n", pdf_escape(row)));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 842 595] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    pdf.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escapes_quotes_and_joins_rows() {
        let csv = build_csv(
            &["name", "licensePlate"],
            &[
                vec!["Truck \"Alpha\"".to_string(), "AB-1".to_string()],
                vec!["Van, small".to_string(), "CD-2".to_string()],
            ],
        );
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("name,licensePlate"));
        assert_eq!(lines.next(), Some("\"Truck \"\"Alpha\"\"\",\"AB-1\""));
        assert_eq!(lines.next(), Some("\"Van, small\",\"CD-2\""));
    }

    #[test]
    fn test_pdf_structure() {
        let bytes = build_pdf(
            "FleetFlow Report - vehicles",
            "Name | License | Type",
            &["Truck 1 | AB-1 | Truck".to_string()],
        );
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("FleetFlow Report - vehicles"));
        assert!(text.contains("/MediaBox [0 0 842 595]"));
    }

    #[test]
    fn test_pdf_escapes_parens() {
        let bytes = build_pdf("Report (draft)", "h", &[]);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Report \\(draft\\)"));
    }

    #[test]
    fn test_pdf_truncates_to_25_rows() {
        let rows: Vec<String> = (0..40).map(|i| format!("row-{}", i)).collect();
        let text = String::from_utf8(build_pdf("t", "h", &rows)).unwrap();
        assert!(text.contains("row-24"));
        assert!(!text.contains("row-25"));
    }
}
