//! Renders a `TicketRecord` into a paginated PDF. Field presence, ordering
//! and the `"N/A"` fallback are contractual; the visual styling is not.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::models::{FlightLeg, GrandTotal, TicketRecord};

const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 40.0;
const LINE_H: f32 = 12.0;

const TITLE_SIZE: f32 = 18.0;
const SECTION_SIZE: f32 = 11.0;
const LABEL_SIZE: f32 = 8.0;
const VALUE_SIZE: f32 = 10.0;

const AGENCY_NAME: &str = "MAZ TRAVEL";
const AGENCY_EMAIL: &str = "EMAIL: RESERVATION@MAZTRAVEL.NET";
const AGENCY_PHONE: &str = "PHONE: 01005599399 / 01010737343";

const NOT_AVAILABLE: &str = "N/A";

/// Renders the full ticket document and returns the finished PDF bytes.
/// Empty fields render as `"N/A"`; the totals section appears only when a
/// grand total is set. Never fails, even on a fully-empty record.
pub fn render_ticket(ticket: &TicketRecord) -> Vec<u8> {
    let mut doc = DocumentWriter::new();

    doc.header();

    doc.section_title("PASSENGER DETAILS");
    doc.field_row(&[
        ("Pax Name", or_na(&ticket.passenger_name)),
        ("PNR", or_na(&ticket.pnr)),
    ]);
    doc.field_row(&[
        ("Ticket Number", or_na(&ticket.ticket_number)),
        ("Seat No.", or_na(&ticket.seat_no)),
    ]);
    doc.field_row(&[
        ("Frequent flyer no", or_na(&ticket.frequent_flyer_no)),
        ("Meals", or_na(&ticket.meals)),
    ]);
    doc.field_row(&[("Baggage Allowance", or_na(&ticket.baggage))]);

    doc.section_title("FLIGHT DETAILS");
    for (index, leg) in ticket.flights.iter().enumerate() {
        doc.flight_block(index + 1, leg);
    }

    if let Some(total) = &ticket.grand_total {
        doc.totals(total);
    }

    doc.finish()
}

pub fn grand_total_line(total: &GrandTotal) -> String {
    format!("{}{}", total.currency.prefix(), format_amount(total.amount))
}

/// Comma-grouped digits; fractional amounts keep two decimals.
fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction:02}")
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

struct DocumentWriter {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    bold_font_id: Ref,
    page_refs: Vec<Ref>,
    content_id: Option<Ref>,
    content: Content,
    next_id: i32,
    y: f32,
}

impl DocumentWriter {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id).base_font(Name(b"Helvetica-Bold"));

        let mut writer = Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            bold_font_id,
            page_refs: Vec::new(),
            content_id: None,
            content: Content::new(),
            next_id: 5,
            y: PAGE_H - MARGIN,
        };
        writer.start_page();
        writer
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn start_page(&mut self) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);
        drop(fonts);
        drop(resources);
        drop(page);

        self.content_id = Some(content_id);
        self.content = Content::new();
        self.y = PAGE_H - MARGIN;
    }

    fn finalize_page(&mut self) {
        if let Some(id) = self.content_id.take() {
            let content = std::mem::replace(&mut self.content, Content::new());
            self.pdf.stream(id, &content.finish());
        }
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.finalize_page();
            self.start_page();
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font: &[u8] = if bold { b"F2" } else { b"F1" };
        self.content.begin_text();
        self.content.set_font(Name(font), size);
        self.content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        self.content.show(Str(text.as_bytes()));
        self.content.end_text();
    }

    fn rule(&mut self, y: f32) {
        self.content.save_state();
        self.content.set_stroke_rgb(0.12, 0.25, 0.69);
        self.content.move_to(MARGIN, y);
        self.content.line_to(PAGE_W - MARGIN, y);
        self.content.stroke();
        self.content.restore_state();
    }

    /// Fixed issuer identity block at the top of the document.
    fn header(&mut self) {
        self.y -= TITLE_SIZE;
        self.text(MARGIN, self.y, TITLE_SIZE, true, "FLIGHT E-TICKET");
        self.y -= 6.0;

        for line in [AGENCY_NAME, AGENCY_EMAIL, AGENCY_PHONE] {
            self.y -= LINE_H;
            self.content.save_state();
            self.content.set_fill_rgb(0.12, 0.25, 0.69);
            self.text(MARGIN, self.y, 9.0, false, line);
            self.content.restore_state();
        }

        self.y -= 8.0;
        self.rule(self.y);
        self.y -= 16.0;
    }

    fn section_title(&mut self, title: &str) {
        self.ensure_space(48.0);

        let bar_h = 16.0;
        self.y -= bar_h;
        self.content.save_state();
        self.content.set_fill_rgb(0.12, 0.25, 0.69);
        self.content.rect(MARGIN, self.y, PAGE_W - 2.0 * MARGIN, bar_h);
        self.content.fill_nonzero();
        self.content.restore_state();

        self.content.save_state();
        self.content.set_fill_rgb(1.0, 1.0, 1.0);
        self.text(MARGIN + 4.0, self.y + 4.5, SECTION_SIZE, true, title);
        self.content.restore_state();

        self.y -= 10.0;
    }

    /// One row of labelled values, split into equal-width columns.
    fn field_row(&mut self, fields: &[(&str, &str)]) {
        self.ensure_space(3.0 * LINE_H);

        let col_w = (PAGE_W - 2.0 * MARGIN) / fields.len() as f32;
        let label_y = self.y;
        for (i, (label, value)) in fields.iter().enumerate() {
            let x = MARGIN + i as f32 * col_w;
            self.content.save_state();
            self.content.set_fill_rgb(0.42, 0.45, 0.50);
            self.text(x, label_y, LABEL_SIZE, false, label);
            self.content.restore_state();
            self.text(x, label_y - LINE_H, VALUE_SIZE, false, value);
        }

        self.y -= 2.0 * LINE_H + 6.0;
    }

    /// A four-column flight block: flight identity, departs, duration,
    /// arrives. Optional terminal lines appear under the endpoint cells.
    fn flight_block(&mut self, number: usize, leg: &FlightLeg) {
        let flight_cell = vec![
            leg.airline.as_str().to_string(),
            leg.class.as_str().to_string(),
            or_na(&leg.flight_number).to_string(),
        ];

        let mut departs_cell = vec![
            format!(
                "{} {}",
                or_na(&leg.departure_date),
                or_na(&leg.departure_time)
            ),
            or_na(&leg.from).to_string(),
        ];
        if !leg.terminal.is_empty() {
            departs_cell.push(format!("Terminal: {}", leg.terminal));
        }

        let duration_cell = vec![or_na(&leg.duration).to_string()];

        let mut arrives_cell = vec![
            format!("{} {}", or_na(&leg.arrival_date), or_na(&leg.arrival_time)),
            or_na(&leg.to).to_string(),
        ];
        if !leg.arrival_terminal.is_empty() {
            arrives_cell.push(format!("Terminal: {}", leg.arrival_terminal));
        }

        let cells = [
            ("Flight", &flight_cell),
            ("Departs", &departs_cell),
            ("Duration", &duration_cell),
            ("Arrives", &arrives_cell),
        ];
        let rows = cells
            .iter()
            .map(|(_, lines)| lines.len())
            .max()
            .unwrap_or(1) as f32;

        let block_h = 2.0 * LINE_H + rows * LINE_H + 18.0;
        self.ensure_space(block_h + LINE_H);

        self.y -= LINE_H;
        self.text(MARGIN, self.y, VALUE_SIZE, true, &format!("FLIGHT {number}"));
        self.y -= 4.0;

        let col_w = (PAGE_W - 2.0 * MARGIN) / cells.len() as f32;
        let label_y = self.y - LINE_H;
        for (i, (label, lines)) in cells.iter().enumerate() {
            let x = MARGIN + i as f32 * col_w;
            self.content.save_state();
            self.content.set_fill_rgb(0.42, 0.45, 0.50);
            self.text(x, label_y, LABEL_SIZE, false, label);
            self.content.restore_state();

            let mut line_y = label_y - LINE_H;
            for line in lines.iter() {
                self.text(x, line_y, VALUE_SIZE, false, line);
                line_y -= LINE_H;
            }
        }
        self.y = label_y - (rows + 1.0) * LINE_H;

        if !leg.remark.is_empty() {
            self.ensure_space(2.0 * LINE_H);
            self.text(
                MARGIN,
                self.y,
                VALUE_SIZE,
                false,
                &format!("Remark: {}", leg.remark),
            );
            self.y -= LINE_H;
        }

        self.y -= 6.0;
    }

    fn totals(&mut self, total: &GrandTotal) {
        self.section_title("GRAND TOTAL");
        self.ensure_space(2.0 * LINE_H);
        self.y -= LINE_H;
        self.text(MARGIN, self.y, 12.0, true, &grand_total_line(total));
        self.y -= LINE_H;
    }

    fn finish(mut self) -> Vec<u8> {
        self.finalize_page();

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf.finish()
    }
}
