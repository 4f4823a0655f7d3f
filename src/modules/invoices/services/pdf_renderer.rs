use crate::core::pdf::{PdfPage, MARGIN_MM};
use crate::core::{money, AppError, Result};
use crate::modules::clients::models::ClientSummary;
use crate::modules::invoices::models::Invoice;
use crate::modules::profiles::models::UserProfile;

// Item table column positions (mm from the left edge)
const X_DESC: f32 = MARGIN_MM;
const X_QTY: f32 = 105.0;
const X_UNIT: f32 = 125.0;
const X_TAX: f32 = 152.0;
const X_TOTAL: f32 = 172.0;

/// Render an invoice as a single-page A4 PDF.
///
/// Free-form layout: a company header, the client block, an itemized table
/// with description/quantity/price/tax/line-total columns, and the totals.
pub fn render_invoice(
    invoice: &Invoice,
    client: &ClientSummary,
    profile: Option<&UserProfile>,
) -> Result<Vec<u8>> {
    let page = PdfPage::a4("Invoice")?;
    let mut y: f32 = 285.0;

    // Header: issuing company on the left
    if let Some(profile) = profile {
        page.bold(&profile.company_name, 16.0, MARGIN_MM, y);
        y -= 7.0;
        if let Some(address) = &profile.address {
            page.text(address, 10.0, MARGIN_MM, y);
            y -= 5.0;
        }
        if let Some(tax_number) = &profile.tax_number {
            page.text(&format!("Tax ID: {}", tax_number), 10.0, MARGIN_MM, y);
            y -= 5.0;
        }
        if let Some(phone) = &profile.phone {
            page.text(phone, 10.0, MARGIN_MM, y);
        }
    }

    // Header: title on the right
    page.bold("INVOICE", 24.0, 145.0, 285.0);
    page.bold(&invoice.invoice_number, 12.0, 145.0, 277.0);

    y = 262.0;
    page.rule(y);

    // Client block and invoice details
    y -= 10.0;
    page.bold("Bill to:", 12.0, MARGIN_MM, y);
    page.bold("Details:", 12.0, 120.0, y);

    y -= 7.0;
    page.text(&client.name, 10.0, MARGIN_MM, y);
    page.text(
        &format!("Issue date: {}", invoice.issue_date),
        10.0,
        120.0,
        y,
    );

    y -= 5.0;
    page.text(&client.email, 10.0, MARGIN_MM, y);
    page.text(&format!("Due date: {}", invoice.due_date), 10.0, 120.0, y);

    y -= 5.0;
    page.text(
        &format!("Status: {}", invoice.status),
        10.0,
        120.0,
        y,
    );

    y -= 12.0;

    // Items table header
    page.bold("Items", 12.0, MARGIN_MM, y);
    y -= 6.0;

    page.bold("Description", 10.0, X_DESC, y);
    page.bold("Qty", 10.0, X_QTY, y);
    page.bold("Unit Price", 10.0, X_UNIT, y);
    page.bold("Tax %", 10.0, X_TAX, y);
    page.bold("Total", 10.0, X_TOTAL, y);

    y -= 3.5;
    page.rule(y);
    y -= 7.0;

    for (idx, item) in invoice.items.iter().enumerate() {
        if y < 50.0 {
            return Err(AppError::validation(
                "Invoice has too many line items for a single page.",
            ));
        }

        let description = format!("{}. {}", idx + 1, item.description);
        page.text(&description, 10.0, X_DESC, y);
        page.text(&item.quantity.to_string(), 10.0, X_QTY, y);
        page.text(&money::format_display(item.unit_price), 10.0, X_UNIT, y);
        page.text(&money::format_display(item.tax_rate), 10.0, X_TAX, y);
        page.text(
            &money::format_display(item.total_with_tax()),
            10.0,
            X_TOTAL,
            y,
        );

        y -= 6.0;
    }

    y -= 4.0;
    page.rule(y);

    // Totals block
    let totals = invoice.totals().to_display();
    y -= 10.0;
    page.text("Subtotal:", 11.0, 145.0, y);
    page.text(&totals.subtotal, 11.0, X_TOTAL, y);

    y -= 7.0;
    page.text("Tax:", 11.0, 145.0, y);
    page.text(&totals.tax_amount, 11.0, X_TOTAL, y);

    y -= 8.0;
    page.bold("TOTAL:", 13.0, 145.0, y);
    page.bold(&totals.grand_total, 13.0, X_TOTAL, y);

    // Notes and terms at the bottom
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        y -= 14.0;
        page.bold("Notes:", 11.0, MARGIN_MM, y);
        y -= 6.0;
        for line in notes.lines() {
            if y < 20.0 {
                break;
            }
            page.text(line, 10.0, MARGIN_MM, y);
            y -= 5.0;
        }
    }

    if let Some(terms) = invoice.terms.as_deref().filter(|t| !t.trim().is_empty()) {
        y -= 8.0;
        page.bold("Terms & Conditions:", 11.0, MARGIN_MM, y);
        y -= 6.0;
        for line in terms.lines() {
            if y < 20.0 {
                break;
            }
            page.text(line, 10.0, MARGIN_MM, y);
            y -= 5.0;
        }
    }

    page.save()
}
