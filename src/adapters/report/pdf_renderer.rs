//! Implements ReportRendererPort. Writes the report as a PDF with `lopdf`.
//!
//! Title line, then the aggregation table with a shaded header row and a grid.
//! Uses the standard Helvetica faces, so no font is embedded.

use super::layout::{self, Align, PageSlice};
use super::metrics::{self, Face};
use crate::domain::{DomainError, Report, SalesReport};
use crate::ports::ReportRendererPort;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::path::Path;
use tokio::fs;
use tracing::info;

type Rgb = (f32, f32, f32);

const GREY: Rgb = (0.502, 0.502, 0.502);
const WHITESMOKE: Rgb = (0.961, 0.961, 0.961);
const BEIGE: Rgb = (0.961, 0.961, 0.863);
const BLACK: Rgb = (0.0, 0.0, 0.0);

/// Accumulates content-stream operations for one page.
#[derive(Default)]
struct Painter {
    ops: Vec<Operation>,
}

impl Painter {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.push(Operation::new(
            "rg",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        self.ops
            .push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        self.ops.push(Operation::new("f", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops
            .push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn text(&mut self, face: Face, size: f32, x: f32, y: f32, color: Rgb, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "rg",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        self.ops.push(Operation::new(
            "Tf",
            vec![face.resource_name().into(), size.into()],
        ));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                metrics::win_ansi_bytes(text),
                StringFormat::Literal,
            )],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// One table row: background, then each cell's text placed per column alignment.
    fn row(&mut self, cells: &[String], bottom: f32, header: bool) {
        let (height, face, size, pad_top, fill, ink) = if header {
            (
                layout::header_height(),
                Face::Bold,
                layout::HEADER_SIZE,
                layout::HEADER_PADDING_TOP,
                GREY,
                WHITESMOKE,
            )
        } else {
            (
                layout::body_height(),
                Face::Regular,
                layout::BODY_SIZE,
                layout::BODY_PADDING,
                BEIGE,
                BLACK,
            )
        };

        self.fill_rect(layout::table_left(), bottom, layout::table_width(), height, fill);

        let baseline = bottom + height - pad_top - size;
        for (col, cell) in cells.iter().enumerate() {
            let width = metrics::text_width(cell, face, size);
            let align: Align = layout::alignment(col, header);
            let x = layout::text_x(col, width, align);
            self.text(face, size, x, baseline, ink, cell);
        }
    }

    /// 1pt black grid over every cell of the page's table.
    fn grid(&mut self, page: &PageSlice) {
        self.ops.push(Operation::new(
            "RG",
            vec![BLACK.0.into(), BLACK.1.into(), BLACK.2.into()],
        ));
        self.ops
            .push(Operation::new("w", vec![layout::GRID_WIDTH.into()]));

        let mut bands = vec![(page.header_bottom(), layout::header_height())];
        for i in 0..page.rows.len() {
            bands.push((page.row_bottom(i), layout::body_height()));
        }
        for (bottom, height) in bands {
            for (col, width) in layout::COLUMN_WIDTHS.iter().enumerate() {
                self.stroke_rect(layout::column_left(col), bottom, *width, height);
            }
        }
    }
}

/// PDF renderer for the sales report.
#[derive(Debug, Default)]
pub struct PdfReportRenderer;

impl PdfReportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the whole document in memory.
    pub fn build_document(report: &SalesReport) -> Result<Vec<u8>, lopdf::Error> {
        let title = report.title();
        let header: Vec<String> = SalesReport::HEADER.iter().map(|s| s.to_string()).collect();
        let body = report.body_cells();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(font_dictionary(Face::Regular));
        let bold_id = doc.add_object(font_dictionary(Face::Bold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Face::Regular.resource_name() => regular_id,
                Face::Bold.resource_name() => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in layout::paginate(body.len()) {
            let mut painter = Painter::default();

            if page.has_title {
                let width = metrics::text_width(&title, Face::Bold, layout::TITLE_SIZE);
                let x = (layout::PAGE_WIDTH - width) / 2.0;
                painter.text(
                    Face::Bold,
                    layout::TITLE_SIZE,
                    x,
                    layout::title_baseline(),
                    BLACK,
                    &title,
                );
            }

            painter.row(&header, page.header_bottom(), true);
            for (i, cells) in body[page.rows.clone()].iter().enumerate() {
                painter.row(cells, page.row_bottom(i), false);
            }
            painter.grid(&page);

            let content = Content {
                operations: painter.ops,
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            layout::PAGE_WIDTH.into(),
            layout::PAGE_HEIGHT.into(),
        ];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(metrics::win_ansi_bytes(&title)),
            "Producer" => Object::string_literal(concat!("sales-report ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf)?;
        Ok(buf)
    }
}

fn font_dictionary(face: Face) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

#[async_trait::async_trait]
impl ReportRendererPort for PdfReportRenderer {
    async fn render(&self, report: &SalesReport, output: &Path) -> Result<Report, DomainError> {
        let bytes = Self::build_document(report)
            .map_err(|e| DomainError::RenderError(format!("build document: {}", e)))?;

        fs::write(output, &bytes)
            .await
            .map_err(|e| DomainError::RenderError(format!("{}: {}", output.display(), e)))?;

        info!(
            path = %output.display(),
            rows = report.rows.len(),
            bytes = bytes.len(),
            "report rendered"
        );

        Ok(Report {
            path: output.to_path_buf(),
            title: report.title(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AggregationRow;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn report_with(rows: usize) -> SalesReport {
        let rows = (0..rows)
            .map(|i| AggregationRow {
                product: format!("Produit {}", i),
                total_revenue: Decimal::from(1000 - i as i64),
                sale_count: 1,
                mean_revenue: Decimal::from(1000 - i as i64),
            })
            .collect();
        SalesReport::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(), rows)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_document_has_title_and_header() {
        let bytes = PdfReportRenderer::build_document(&report_with(2)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"(Rapport des Ventes - 07/03/2024)"));
        assert!(contains(&bytes, b"(Moyenne par Vente)"));
        assert!(contains(&bytes, b"(1000.00)"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_report_still_renders_one_page() {
        let bytes = PdfReportRenderer::build_document(&report_with(0)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_report_spans_pages() {
        let bytes = PdfReportRenderer::build_document(&report_with(100)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), layout::paginate(100).len());
        assert!(doc.get_pages().len() > 1);
    }

    #[tokio::test]
    async fn test_render_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapport_ventes.pdf");
        std::fs::write(&path, b"stale").unwrap();

        let report = PdfReportRenderer::new()
            .render(&report_with(3), &path)
            .await
            .unwrap();

        assert_eq!(report.path, path);
        assert_eq!(report.title, "Rapport des Ventes - 07/03/2024");
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("rapport_ventes.pdf");
        let result = PdfReportRenderer::new().render(&report_with(1), &path).await;
        assert!(matches!(result, Err(DomainError::RenderError(_))));
    }
}
