use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use printpdf::{
    image_crate::codecs::png::PngDecoder, BuiltinFont, Image, ImageTransform, IndirectFontRef,
    Line, Mm, PdfDocument, PdfLayerReference, Point,
};

use crate::{
    core::utils::percent_of,
    currency::{format_amount, format_percent},
    domain::{common::format_date, Amount, CabinetProfile, Receipt},
    errors::{NexusError, Result},
    utils::paths::sanitize_file_stem,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LOGO_DPI: f32 = 300.0;

/// Tag carried by the `DegenerateArithmetic` error of a zero-total receipt.
pub const PAID_SHARE_TAG: &str = "share of total due paid";

/// Rendering inputs that do not belong to the receipt or the cabinet.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub currency_label: String,
    pub logo_path: Option<PathBuf>,
}

/// Figures derived from one receipt for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptStatement {
    pub paid: Amount,
    pub total_due: Amount,
    pub remaining: Amount,
    pub paid_pct: f64,
}

impl ReceiptStatement {
    /// Fails with `DegenerateArithmetic` when the total due is zero.
    pub fn from_record(receipt: &Receipt) -> Result<Self> {
        let paid_pct = percent_of(receipt.paid, receipt.total_due, PAID_SHARE_TAG)?;
        Ok(Self {
            paid: receipt.paid,
            total_due: receipt.total_due,
            remaining: receipt.remaining(),
            paid_pct,
        })
    }

    pub fn percent_label(&self) -> String {
        format_percent(self.paid_pct)
    }
}

/// `Receipt_<client>.pdf`, with the client name made file-system safe.
pub fn receipt_file_name(client: &str) -> String {
    format!("Receipt_{}.pdf", sanitize_file_stem(client))
}

/// Renders a single-page PDF receipt and returns the document bytes.
pub fn render_receipt(
    receipt: &Receipt,
    cabinet: &CabinetProfile,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let statement = ReceiptStatement::from_record(receipt)?;
    let money = |amount: Amount| format_amount(amount, &options.currency_label);

    let (doc, page, layer) =
        PdfDocument::new("Payment Receipt", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Receipt");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    if let Some(path) = options.logo_path.as_deref() {
        place_logo(&layer, path);
    }

    // Header
    let mut y = PAGE_HEIGHT - 25.0;
    text(&layer, &bold, &cabinet.name, 16.0, MARGIN, y);
    y -= 7.0;
    text(&layer, &font, &format!("Tel: {}", cabinet.contact), 10.0, MARGIN, y);
    y -= 5.0;
    text(&layer, &font, &cabinet.email, 10.0, MARGIN, y);
    y -= 6.0;
    rule(&layer, y);

    y -= 16.0;
    text(&layer, &bold, "Payment Receipt", 20.0, 75.0, y);
    y -= 8.0;
    text(
        &layer,
        &font,
        &format!("Date: {}", format_date(receipt.date)),
        10.0,
        MARGIN,
        y,
    );

    y -= 14.0;
    for (label, value) in [
        ("Client", receipt.client.as_str()),
        ("Service", receipt.service.label()),
        ("Payment method", receipt.method.label()),
    ] {
        text(&layer, &bold, &format!("{label}:"), 12.0, MARGIN, y);
        text(&layer, &font, value, 12.0, 70.0, y);
        y -= 8.0;
    }

    // Boxed amount line
    y -= 6.0;
    boxed(&layer, y - 4.0, y + 8.0);
    text(
        &layer,
        &bold,
        &format!(
            "Amount paid: {} ({} of {})",
            money(statement.paid),
            statement.percent_label(),
            money(statement.total_due)
        ),
        12.0,
        MARGIN + 4.0,
        y,
    );

    y -= 16.0;
    text(
        &layer,
        &font,
        &format!("Remaining balance: {}", money(statement.remaining)),
        12.0,
        MARGIN,
        y,
    );

    // Signature
    y -= 30.0;
    text(&layer, &font, &cabinet.title, 11.0, 120.0, y);
    y -= 20.0;
    text(&layer, &bold, &cabinet.principal, 11.0, 120.0, y);

    // Footer
    rule(&layer, 22.0);
    text(&layer, &font, &cabinet.legal, 8.0, MARGIN, 16.0);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| NexusError::Document(err.to_string()))?;
    tracing::debug!(client = %receipt.client, bytes = bytes.len(), "receipt rendered");
    Ok(bytes)
}

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, value: &str, size: f32, x: f32, y: f32) {
    layer.use_text(value, size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn boxed(layer: &PdfLayerReference, bottom: f32, top: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(bottom)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(bottom)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(top)), false),
            (Point::new(Mm(MARGIN), Mm(top)), false),
        ],
        is_closed: true,
    });
}

/// Draws the logo in the top-right corner. A missing file is silently
/// skipped; an unreadable one is logged and skipped.
fn place_logo(layer: &PdfLayerReference, path: &Path) {
    if !path.exists() {
        return;
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot open logo");
            return;
        }
    };
    let image = PngDecoder::new(BufReader::new(file))
        .map_err(|err| err.to_string())
        .and_then(|decoder| Image::try_from(decoder).map_err(|err| err.to_string()));
    match image {
        Ok(image) => image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(PAGE_WIDTH - MARGIN - 35.0)),
                translate_y: Some(Mm(PAGE_HEIGHT - 45.0)),
                dpi: Some(LOGO_DPI),
                ..Default::default()
            },
        ),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "logo is not a decodable PNG");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, ServiceType};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn receipt(total: Amount, paid: Amount) -> Receipt {
        Receipt::new(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            "Awa Traoré",
            ServiceType::SchoolTraining,
            total,
            paid,
            PaymentMethod::MoovMoney,
        )
    }

    #[test]
    fn statement_reports_share_and_remaining() {
        let statement = ReceiptStatement::from_record(&receipt(1000, 250)).unwrap();
        assert_eq!(statement.percent_label(), "25.0%");
        assert_eq!(statement.remaining, 750);
    }

    #[test]
    fn zero_total_due_is_degenerate() {
        let err = render_receipt(
            &receipt(0, 0),
            &CabinetProfile::default(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, NexusError::DegenerateArithmetic(_)));
    }

    #[test]
    fn renders_pdf_without_logo() {
        let dir = tempdir().unwrap();
        let options = RenderOptions {
            currency_label: "CFA".into(),
            logo_path: Some(dir.path().join("missing.png")),
        };
        let bytes = render_receipt(&receipt(75_000, 25_000), &CabinetProfile::default(), &options)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn undecodable_logo_is_skipped() {
        let dir = tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"not a png").unwrap();
        let options = RenderOptions {
            currency_label: "CFA".into(),
            logo_path: Some(logo),
        };
        let bytes = render_receipt(&receipt(75_000, 75_000), &CabinetProfile::default(), &options)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    fn write_png_logo(path: &Path) {
        use printpdf::image_crate::{codecs::png::PngEncoder, ColorType, ImageEncoder};

        let (width, height) = (8u32, 8u32);
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|idx| [200u8, (idx * 4) as u8, 40])
            .collect();
        let file = File::create(path).unwrap();
        PngEncoder::new(file)
            .write_image(&pixels, width, height, ColorType::Rgb8)
            .unwrap();
    }

    #[test]
    fn decodable_logo_is_embedded() {
        let dir = tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        write_png_logo(&logo);
        let row = receipt(75_000, 25_000);

        let with_logo = render_receipt(
            &row,
            &CabinetProfile::default(),
            &RenderOptions {
                currency_label: "CFA".into(),
                logo_path: Some(logo),
            },
        )
        .unwrap();
        let without_logo = render_receipt(
            &row,
            &CabinetProfile::default(),
            &RenderOptions {
                currency_label: "CFA".into(),
                logo_path: None,
            },
        )
        .unwrap();
        assert!(with_logo.starts_with(b"%PDF"));
        assert!(with_logo.len() > without_logo.len());
    }

    #[test]
    fn file_name_is_sanitized() {
        assert_eq!(receipt_file_name("Awa / Traoré"), "Receipt_Awa_Traoré.pdf");
    }
}
