/// Построение таблиц для экспорта в CSV и печатный PDF.
///
/// Скачивание файлов делает фронтенд; здесь только текст.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
}

/// Trait для типов, которые могут быть выгружены таблицей
pub trait Exportable {
    /// Заголовки колонок
    fn headers() -> Vec<&'static str>;

    /// Значения строки в порядке заголовков
    fn to_row(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn from_rows<T: Exportable>(data: &[T]) -> Result<Self, ExportError> {
        if data.is_empty() {
            return Err(ExportError::NoData);
        }
        Ok(Self {
            headers: T::headers().into_iter().map(str::to_string).collect(),
            rows: data.iter().map(Exportable::to_row).collect(),
        })
    }

    /// Таблица из одной записи (агрегаты отчётов)
    pub fn single<T: Exportable>(item: &T) -> Self {
        Self {
            headers: T::headers().into_iter().map(str::to_string).collect(),
            rows: vec![item.to_row()],
        }
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&csv_line(&self.headers));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&csv_line(row));
        }
        out
    }

    /// HTML-документ для печати; браузер сохраняет его в PDF.
    /// `<title>` становится именем файла в диалоге сохранения.
    pub fn to_print_html(&self, file_name: &str, title: &str, generated: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
        html.push_str(&format!("<title>{}.pdf</title>", escape_html(file_name)));
        html.push_str(PRINT_STYLE);
        html.push_str("</head><body>");
        html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
        html.push_str(&format!(
            "<p class=\"generated\">Generated: {}</p>",
            escape_html(generated)
        ));
        html.push_str("<table><thead><tr>");
        for h in &self.headers {
            html.push_str(&format!("<th>{}</th>", escape_html(h)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></body></html>");
        html
    }
}

const PRINT_STYLE: &str = "<style>\
body{font-family:Helvetica,Arial,sans-serif;margin:14mm;}\
h1{font-size:16pt;margin:0 0 4mm 0;}\
.generated{font-size:10pt;color:#555;margin:0 0 6mm 0;}\
table{border-collapse:collapse;width:100%;font-size:8pt;}\
th{background:#3b82f6;color:#fff;text-align:left;}\
th,td{border:1px solid #ddd;padding:4px 6px;}\
</style>";

fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_csv_cell(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Кавычки нужны, если в ячейке есть запятая, кавычка или перевод строки
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        total: u32,
    }

    impl Exportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["name", "total"]
        }

        fn to_row(&self) -> Vec<String> {
            vec![self.name.to_string(), self.total.to_string()]
        }
    }

    #[test]
    fn test_empty_data_is_rejected() {
        let empty: Vec<Row> = Vec::new();
        let err = ExportTable::from_rows(&empty).unwrap_err();
        assert_eq!(err.to_string(), "No data to export");
    }

    #[test]
    fn test_csv_quoting() {
        let table = ExportTable::from_rows(&[
            Row { name: "Norte, Sur", total: 3 },
            Row { name: "Los \"Tigres\"", total: 5 },
            Row { name: "plain", total: 0 },
        ])
        .unwrap();
        assert_eq!(
            table.to_csv(),
            "name,total\n\"Norte, Sur\",3\n\"Los \"\"Tigres\"\"\",5\nplain,0"
        );
    }

    #[test]
    fn test_print_html_escapes_and_has_header() {
        let table = ExportTable::single(&Row { name: "<b>x</b>", total: 1 });
        let html = table.to_print_html("overview-report", "Overview Report", "2024-05-01 10:00");
        assert!(html.contains("<title>overview-report.pdf</title>"));
        assert!(html.contains("<h1>Overview Report</h1>"));
        assert!(html.contains("Generated: 2024-05-01 10:00"));
        assert!(html.contains("<td>&lt;b&gt;x&lt;/b&gt;</td>"));
        assert!(html.contains("<th>total</th>"));
    }
}
